//! Footprints: structural queries over patterns.
//!
//! A footprint lists, position by position, which layer kind is expected and
//! what its palette color must satisfy. Position 0 is always the base.

use koi_core::PaletteIndex;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId};
use crate::pattern::Pattern;

/// Condition on a layer's palette color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteMatch {
    Exact(PaletteIndex),
    /// Any color.
    Any,
    /// The color occurs exactly once among the supplied pattern colors.
    Unique,
    /// Differs from the other pattern's layer at the same position.
    UniqueLayer,
    /// Equals the other pattern's layer at the same position.
    Shared,
}

impl PaletteMatch {
    pub const CODE_ANY: i16 = -1;
    pub const CODE_UNIQUE: i16 = -2;
    pub const CODE_UNIQUE_LAYER: i16 = -3;
    pub const CODE_SHARED: i16 = -4;

    /// Compact numeric form: a palette index, or one of the negative codes.
    pub fn code(self) -> i16 {
        match self {
            PaletteMatch::Exact(index) => i16::from(index),
            PaletteMatch::Any => Self::CODE_ANY,
            PaletteMatch::Unique => Self::CODE_UNIQUE,
            PaletteMatch::UniqueLayer => Self::CODE_UNIQUE_LAYER,
            PaletteMatch::Shared => Self::CODE_SHARED,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            Self::CODE_ANY => Some(PaletteMatch::Any),
            Self::CODE_UNIQUE => Some(PaletteMatch::Unique),
            Self::CODE_UNIQUE_LAYER => Some(PaletteMatch::UniqueLayer),
            Self::CODE_SHARED => Some(PaletteMatch::Shared),
            code => u8::try_from(code).ok().map(PaletteMatch::Exact),
        }
    }

    /// Checks that need context the caller did not supply fail.
    fn accepts(self, color: PaletteIndex, other: Option<&Layer>, colors: Option<&[PaletteIndex]>) -> bool {
        match self {
            PaletteMatch::Exact(index) => color == index,
            PaletteMatch::Any => true,
            PaletteMatch::Unique => {
                colors.is_some_and(|colors| colors.iter().filter(|c| **c == color).count() == 1)
            }
            PaletteMatch::UniqueLayer => other
                .and_then(Layer::palette_index)
                .is_some_and(|theirs| theirs != color),
            PaletteMatch::Shared => other
                .and_then(Layer::palette_index)
                .is_some_and(|theirs| theirs == color),
        }
    }
}

/// Expected kind and color at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerFootprint {
    pub id: LayerId,
    pub palette: PaletteMatch,
}

impl LayerFootprint {
    pub fn new(id: LayerId, palette: PaletteMatch) -> Self {
        Self { id, palette }
    }

    /// `other` is the layer at the same position in the pattern this one is
    /// compared against. `colors` is the color pool for uniqueness checks.
    pub fn matches(&self, layer: &Layer, other: Option<&Layer>, colors: Option<&[PaletteIndex]>) -> bool {
        if layer.id() != self.id {
            return false;
        }
        match layer.palette_index() {
            Some(color) => self.palette.accepts(color, other, colors),
            None => self.palette == PaletteMatch::Any,
        }
    }
}

/// Strategy for lining a footprint up against a pattern.
pub trait PatternMatcher {
    fn matches(
        &self,
        footprint: &PatternFootprint,
        pattern: &Pattern,
        other: Option<&Pattern>,
        colors: Option<&[PaletteIndex]>,
    ) -> bool;
}

/// Position `i` of the footprint must match position `i` of the pattern, and
/// the lengths must agree exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positional;

impl PatternMatcher for Positional {
    fn matches(
        &self,
        footprint: &PatternFootprint,
        pattern: &Pattern,
        other: Option<&Pattern>,
        colors: Option<&[PaletteIndex]>,
    ) -> bool {
        if footprint.len() != pattern.layers.len() + 1 {
            return false;
        }

        footprint.layers.iter().enumerate().all(|(position, expected)| {
            let Some(layer) = pattern.layer_at(position) else {
                return false;
            };
            let theirs = other.and_then(|other| other.layer_at(position));
            expected.matches(&layer, theirs.as_ref(), colors)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFootprint {
    pub layers: Vec<LayerFootprint>,
}

impl PatternFootprint {
    pub fn new(layers: Vec<LayerFootprint>) -> Self {
        Self { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Positional match.
    pub fn matches(&self, pattern: &Pattern, other: Option<&Pattern>, colors: Option<&[PaletteIndex]>) -> bool {
        self.matches_with(&Positional, pattern, other, colors)
    }

    pub fn matches_with(
        &self,
        matcher: &dyn PatternMatcher,
        pattern: &Pattern,
        other: Option<&Pattern>,
        colors: Option<&[PaletteIndex]>,
    ) -> bool {
        matcher.matches(self, pattern, other, colors)
    }
}
