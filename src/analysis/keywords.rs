//! Keyword frequency heuristic.
//!
//! Tokens are case-folded and split on whitespace only. There is no stemming
//! and punctuation stays attached, so `berlin.` and `berlin` are different
//! keywords.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

pub const TOP_KEYWORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Ranked keywords, most frequent first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct KeywordReport {
    pub keywords: Vec<KeywordCount>,
}

impl fmt::Display for KeywordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Top {} keywords:", TOP_KEYWORDS)?;
        for entry in &self.keywords {
            write!(f, "\n{}: {}", entry.keyword, entry.count)?;
        }
        Ok(())
    }
}

/// Up to five keywords by descending count; ties keep first-occurrence order
pub fn analyze(content: &str) -> KeywordReport {
    let folded = content.to_lowercase();

    // First-seen order, with an index for O(1) count updates.
    let mut counts: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for token in folded.split_whitespace() {
        match index.get(token).copied() {
            Some(slot) => counts[slot].count += 1,
            None => {
                index.insert(token, counts.len());
                counts.push(KeywordCount {
                    keyword: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    // `sort_by` is stable, which gives the tie-break.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_KEYWORDS);

    KeywordReport { keywords: counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(report: &KeywordReport) -> Vec<(&str, usize)> {
        report
            .keywords
            .iter()
            .map(|k| (k.keyword.as_str(), k.count))
            .collect()
    }

    #[test]
    fn ranks_by_count_then_first_occurrence() {
        let report = analyze("Ruhige Lage. Helle Wohnung, ruhige Straße, helle Räume, ruhige Nachbarn");

        assert_eq!(
            ranked(&report),
            vec![
                ("ruhige", 3),
                ("helle", 2),
                ("lage.", 1),
                ("wohnung,", 1),
                ("straße,", 1),
            ]
        );
    }

    #[test]
    fn splits_on_any_whitespace() {
        let report = analyze("garden\n\ngarden\tpool  garden");
        assert_eq!(ranked(&report), vec![("garden", 3), ("pool", 1)]);
    }

    #[test]
    fn punctuation_is_not_stripped() {
        let report = analyze("Berlin berlin Berlin.");
        assert_eq!(ranked(&report), vec![("berlin", 2), ("berlin.", 1)]);
    }

    #[test]
    fn empty_content_has_no_keywords() {
        assert!(analyze("   \n").keywords.is_empty());
    }

    #[test]
    fn report_renders_as_text() {
        let report = analyze("a b a");
        assert_eq!(report.to_string(), "Top 5 keywords:\na: 2\nb: 1");
    }
}
