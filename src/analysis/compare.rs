use serde::Serialize;

use crate::models::DescriptionVersion;

pub const LEFT_LABEL: &str = "Original";
pub const RIGHT_LABEL: &str = "Current";

/// Two full texts for side-by-side display. No diff is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub left_id: u64,
    pub left: String,
    pub right_id: u64,
    pub right: String,
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        self.left == self.right
    }
}

/// Juxtapose two versions; by convention `a` is the oldest, `b` the current one
pub fn compare(a: &DescriptionVersion, b: &DescriptionVersion) -> Comparison {
    Comparison {
        left_id: a.id(),
        left: a.content().to_string(),
        right_id: b.id(),
        right: b.content().to_string(),
    }
}
