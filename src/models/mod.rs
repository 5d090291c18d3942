use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{value::StringDeserializer, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};

/// Whether the property is offered for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SaleOrRent {
    Sale,
    Rent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PetsAllowed {
    Yes,
    No,
    Limited,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BalconyOrTerrace {
    Balcony,
    Terrace,
    Both,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Garden {
    Yes,
    No,
    Shared,
}

impl PetsAllowed {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetsAllowed::Yes => "yes",
            PetsAllowed::No => "no",
            PetsAllowed::Limited => "limited",
        }
    }
}

impl BalconyOrTerrace {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalconyOrTerrace::Balcony => "balcony",
            BalconyOrTerrace::Terrace => "terrace",
            BalconyOrTerrace::Both => "both",
            BalconyOrTerrace::None => "none",
        }
    }
}

impl Garden {
    pub fn as_str(&self) -> &'static str {
        match self {
            Garden::Yes => "yes",
            Garden::No => "no",
            Garden::Shared => "shared",
        }
    }
}

/// Structured property data collected by the form front end.
///
/// Every field is optional. Validation happens before the attributes reach
/// this crate, so nothing here rejects a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyAttributes {
    pub property_type: Option<String>,
    pub rooms: Option<f32>,
    /// Living area in square meters
    pub size: Option<f32>,
    pub location: Option<String>,
    pub year_built: Option<u16>,
    pub condition: Option<String>,
    pub furnishing: Option<String>,
    pub special_features: BTreeSet<String>,
    pub neighborhood: Option<String>,
    pub energy_efficiency: Option<String>,
    pub orientation: Option<String>,
    pub floor: Option<u16>,
    pub parking: Option<String>,
    /// Price in EUR (per month when renting)
    pub price: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub sale_or_rent: Option<SaleOrRent>,
    pub transport: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub pets_allowed: Option<PetsAllowed>,
    #[serde(deserialize_with = "empty_as_none")]
    pub balcony_or_terrace: Option<BalconyOrTerrace>,
    #[serde(deserialize_with = "empty_as_none")]
    pub garden: Option<Garden>,
    pub additional_info: Option<String>,
}

/// The form sends `""` for an unselected choice
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            let value: StringDeserializer<D::Error> = value.trim().to_string().into_deserializer();
            T::deserialize(value).map(Some)
        }
        _ => Ok(None),
    }
}

/// Target publishing destination for a generated description
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Website,
    Instagram,
    TikTok,
    All,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Website,
        Channel::Instagram,
        Channel::TikTok,
        Channel::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Website => "website",
            Channel::Instagram => "instagram",
            Channel::TikTok => "tiktok",
            Channel::All => "all",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Channel::ALL
            .into_iter()
            .find(|channel| channel.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown channel '{}': expected one of website, instagram, tiktok, all",
                    s
                )
            })
    }
}

/// Who produced a version's content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    Generator,
    Human,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::Generator => f.write_str("AI"),
            Author::Human => f.write_str("User"),
        }
    }
}

/// One snapshot of description content.
///
/// Only `annotation` may change after creation, and only through
/// [`crate::history::VersionHistory::annotate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionVersion {
    pub(crate) id: u64,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) author: Author,
    pub(crate) annotation: Option<String>,
}

impl DescriptionVersion {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Tab label: `V<id>`, timestamp and author, then the annotation if any
    pub fn label(&self) -> String {
        let mut label = format!(
            "V{} {} {}",
            self.id,
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.author
        );
        if let Some(note) = &self.annotation {
            label.push_str(" - ");
            label.push_str(note);
        }
        label
    }
}

/// A description the user explicitly saved to durable storage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedDescription {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_parses_case_insensitively() {
        assert_eq!("TikTok".parse::<Channel>().unwrap(), Channel::TikTok);
        assert_eq!(" website ".parse::<Channel>().unwrap(), Channel::Website);
        assert!("myspace".parse::<Channel>().is_err());
    }

    #[test]
    fn attributes_deserialize_from_form_json() {
        let json = r#"{
            "propertyType": "Wohnung",
            "rooms": 3,
            "size": 80,
            "location": "Berlin",
            "specialFeatures": ["Kamin", "Aufzug"],
            "saleOrRent": "rent",
            "balconyOrTerrace": "both"
        }"#;

        let attributes: PropertyAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attributes.property_type.as_deref(), Some("Wohnung"));
        assert_eq!(attributes.rooms, Some(3.0));
        assert_eq!(attributes.sale_or_rent, Some(SaleOrRent::Rent));
        assert_eq!(attributes.balcony_or_terrace, Some(BalconyOrTerrace::Both));
        assert_eq!(attributes.special_features.len(), 2);
        assert!(attributes.garden.is_none());
    }

    #[test]
    fn unselected_choices_and_fractional_rent_deserialize() {
        let json = r#"{
            "propertyType": "Wohnung",
            "rooms": 2.5,
            "size": 64,
            "location": "Hamburg",
            "yearBuilt": 1998,
            "condition": "",
            "furnishing": "",
            "specialFeatures": [],
            "neighborhood": "",
            "energyEfficiency": "",
            "orientation": "",
            "floor": null,
            "parking": "",
            "price": 1250.5,
            "saleOrRent": "rent",
            "transport": "",
            "petsAllowed": "",
            "balconyOrTerrace": "",
            "garden": "",
            "additionalInfo": ""
        }"#;

        let attributes: PropertyAttributes = serde_json::from_str(json).unwrap();
        assert_eq!(attributes.price, Some(1250.5));
        assert_eq!(attributes.sale_or_rent, Some(SaleOrRent::Rent));
        assert!(attributes.pets_allowed.is_none());
        assert!(attributes.balcony_or_terrace.is_none());
        assert!(attributes.garden.is_none());
        assert!(attributes.floor.is_none());

        let unset: PropertyAttributes =
            serde_json::from_str(r#"{"saleOrRent":"","garden":null}"#).unwrap();
        assert!(unset.sale_or_rent.is_none());
        assert!(unset.garden.is_none());

        assert!(serde_json::from_str::<PropertyAttributes>(r#"{"garden":"jungle"}"#).is_err());
    }

    #[test]
    fn version_label_includes_annotation() {
        let version = DescriptionVersion {
            id: 4,
            content: "text".to_string(),
            created_at: Utc::now(),
            author: Author::Human,
            annotation: Some("final".to_string()),
        };

        let label = version.label();
        assert!(label.starts_with("V4 "));
        assert!(label.contains("User"));
        assert!(label.ends_with(" - final"));
    }
}
