use crate::models::Channel;

/// Used when no target channel was chosen
pub const GENERIC_INSTRUCTION: &str = "Erstelle eine allgemeine Beschreibung.";

const WEBSITE: &str = "Erstelle eine ausführliche, SEO-optimierte Beschreibung für die Website. Verwende HTML-Tags für die Strukturierung.";
const INSTAGRAM: &str = "Verfasse eine kurze, prägnante Beschreibung mit maximal 2200 Zeichen. Füge relevante Hashtags am Ende hinzu.";
const TIKTOK: &str = "Erstelle eine sehr kurze, aufmerksamkeitsstarke Beschreibung mit maximal 300 Zeichen. Konzentriere dich auf die herausragendsten Merkmale.";
const ALL: &str = "Erstelle drei separate Beschreibungen: eine ausführliche für die Website, eine für Instagram und eine für TikTok, gemäß den jeweiligen Plattformanforderungen.";

/// Instruction block for a channel.
///
/// Length limits are instructions to the generator only; nothing here
/// enforces them on the returned text.
pub fn instruction_for(channel: Option<Channel>) -> &'static str {
    match channel {
        Some(Channel::Website) => WEBSITE,
        Some(Channel::Instagram) => INSTAGRAM,
        Some(Channel::TikTok) => TIKTOK,
        Some(Channel::All) => ALL,
        None => GENERIC_INSTRUCTION,
    }
}
