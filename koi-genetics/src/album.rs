//! Album pages: collection goals expressed as footprints.

use serde::{Deserialize, Serialize};

use crate::footprint::PatternFootprint;
use crate::pattern::Pattern;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumPage {
    pub requirements: Vec<PatternFootprint>,
}

impl AlbumPage {
    pub fn new(requirements: Vec<PatternFootprint>) -> Self {
        Self { requirements }
    }

    /// Every requirement must be met by at least one pattern. Patterns are
    /// checked on their own, so requirements that compare against another
    /// pattern or a color pool are never met.
    pub fn is_unlocked(&self, patterns: &[Pattern]) -> bool {
        self.requirements
            .iter()
            .all(|requirement| patterns.iter().any(|pattern| requirement.matches(pattern, None, None)))
    }
}
