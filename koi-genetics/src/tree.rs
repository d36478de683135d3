//! Palette tree seam.
//!
//! A palette tree prunes layers that can no longer show through once colors
//! have been resolved. Breeding calls `trim` on every child pattern.

use crate::pattern::Pattern;

pub trait PaletteTree {
    fn trim(&self, pattern: &mut Pattern);
}

/// Leaves every pattern as it is.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl PaletteTree for KeepAll {
    fn trim(&self, _pattern: &mut Pattern) {}
}
