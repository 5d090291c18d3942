//! Assembly of the generation request sent to the text service.
//!
//! The request is a single German-language instruction: a fixed template with
//! every attribute substituted (or a placeholder when it is absent), followed
//! by the instruction block for the target channel.

mod instructions;

use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;

use crate::models::{Channel, PropertyAttributes, SaleOrRent};

pub use instructions::{instruction_for, GENERIC_INSTRUCTION};

/// Placeholder for an absent attribute
pub const NO_DATA: &str = "Keine Angaben";
const NO_ADDITIONAL_INFO: &str = "Keine Zusatzinformationen";
const NO_CHANNEL: &str = "Keine Angabe";
const DEFAULT_PROPERTY_TYPE: &str = "Immobilie";
const UNKNOWN_LOCATION: &str = "Unbekannt";

const GUIDELINES: &str = "Allgemeine Richtlinien:
1. Beginne mit einem fesselnden Eröffnungssatz, der die Hauptvorteile der Immobilie hervorhebt.
2. Strukturiere die Beschreibung in klare Abschnitte: Überblick, Ausstattung, Lage, Besonderheiten, Finanzielles.
3. Verwende beschreibende Adjektive, um die Immobilie lebendig darzustellen.
4. Integriere relevante Keywords für SEO, wie Immobilientyp, Lage und Hauptmerkmale.
5. Schließe mit einer Zusammenfassung ab, die die Einzigartigkeit der Immobilie betont.
6. Passe die Länge und den Stil an die jeweilige Plattform an.
7. Verwende das passende Format für jede Plattform (z.B. HTML für Website, Hashtags für Instagram).";

/// Assembled instruction text for one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    channel: Option<Channel>,
    title: String,
    text: String,
}

impl GenerationRequest {
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    /// Title synthesized from property type and location
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Build the generation request for `attributes` targeting `channel`.
///
/// `None` selects the generic instruction block. Missing attributes are
/// rendered as a placeholder, so this never fails.
pub fn build(attributes: &PropertyAttributes, channel: Option<Channel>) -> GenerationRequest {
    let title = synthesize_title(attributes);
    let text = render(attributes, channel);
    debug!(
        channel = channel.map(|c| c.as_str()).unwrap_or("none"),
        chars = text.chars().count(),
        "Built generation request"
    );

    GenerationRequest {
        channel,
        title,
        text,
    }
}

/// `"<property type> in <location>"`, with fallbacks for missing values
pub fn synthesize_title(attributes: &PropertyAttributes) -> String {
    format!(
        "{} in {}",
        present(&attributes.property_type).unwrap_or(DEFAULT_PROPERTY_TYPE),
        present(&attributes.location).unwrap_or(UNKNOWN_LOCATION)
    )
}

fn render(a: &PropertyAttributes, channel: Option<Channel>) -> String {
    let mut out = String::new();

    let scope = if channel == Some(Channel::All) {
        "mehrere Versionen einer detaillierten"
    } else {
        "eine detaillierte"
    };
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "Erstelle {} Immobilienbeschreibung für eine {} mit den folgenden Details:",
        scope,
        present(&a.property_type).unwrap_or(DEFAULT_PROPERTY_TYPE)
    );
    out.push('\n');

    out.push_str("Grundinformationen:\n");
    line(&mut out, "Anzahl der Zimmer", a.rooms.map(|r| r.to_string()));
    let _ = writeln!(out, "- Größe: {} Quadratmeter", number(a.size));
    line(&mut out, "Lage", text(&a.location));
    line(&mut out, "Baujahr", a.year_built.map(|y| y.to_string()));
    out.push('\n');

    out.push_str("Zustand und Ausstattung:\n");
    line(&mut out, "Renovierungszustand", text(&a.condition));
    line(&mut out, "Ausstattungsstandard", text(&a.furnishing));
    let features = a
        .special_features
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    line(
        &mut out,
        "Besondere Merkmale",
        (!features.is_empty()).then_some(features),
    );
    line(&mut out, "Energieeffizienz", text(&a.energy_efficiency));
    out.push('\n');

    out.push_str("Umgebung und Lage:\n");
    line(&mut out, "Nachbarschaft", text(&a.neighborhood));
    line(&mut out, "Ausrichtung", text(&a.orientation));
    line(&mut out, "Etage", a.floor.map(|f| f.to_string()));
    line(&mut out, "Verkehrsanbindung", text(&a.transport));
    out.push('\n');

    out.push_str("Zusätzliche Eigenschaften:\n");
    line(&mut out, "Parkmöglichkeiten", text(&a.parking));
    line(
        &mut out,
        "Haustiere erlaubt",
        a.pets_allowed.map(|p| p.as_str().to_string()),
    );
    line(
        &mut out,
        "Balkon/Terrasse",
        a.balcony_or_terrace.map(|b| b.as_str().to_string()),
    );
    line(&mut out, "Garten", a.garden.map(|g| g.as_str().to_string()));
    out.push('\n');

    out.push_str("Finanzielle Aspekte:\n");
    let (unit, offer) = match a.sale_or_rent {
        Some(SaleOrRent::Sale) => (" EUR", "Kaufobjekt"),
        Some(SaleOrRent::Rent) => (" EUR/Monat", "Mietobjekt"),
        None => ("", ""),
    };
    let _ = writeln!(
        out,
        "- Preis: {}{}",
        a.price.map(|p| p.to_string()).as_deref().unwrap_or(NO_DATA),
        unit
    );
    let _ = writeln!(out, "- {}", offer);
    out.push('\n');

    out.push_str("Zusatzinformationen:\n");
    out.push_str(present(&a.additional_info).unwrap_or(NO_ADDITIONAL_INFO));
    out.push_str("\n\n");

    let _ = writeln!(
        out,
        "Zielplattform: {}",
        channel.map(|c| c.as_str()).unwrap_or(NO_CHANNEL)
    );
    out.push('\n');

    out.push_str(instruction_for(channel));
    out.push_str("\n\n");
    out.push_str(GUIDELINES);

    out
}

fn line(out: &mut String, label: &str, value: Option<String>) {
    let _ = writeln!(out, "- {}: {}", label, value.as_deref().unwrap_or(NO_DATA));
}

/// Non-blank trimmed value of an optional text field
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn text(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}

/// Float `Display` already drops a zero fraction (`80`, not `80.0`)
fn number(value: Option<f32>) -> String {
    value.map_or_else(|| NO_DATA.to_string(), |v| v.to_string())
}
