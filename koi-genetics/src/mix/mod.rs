//! Breeding: combining a mother and a father into a child.
//!
//! Design rules:
//! - Mixing is pure given the randomizer state; parents are never modified.
//! - Draws happen in a fixed order regardless of configuration, so a seed replays exactly.
//! - Trait results are rounded and saturated, never wrapped.

mod fish;
mod layers;
mod pattern;

pub use fish::{mix_fins, mix_tail};
pub use layers::{
    mix_base, mix_layers, mix_ridge, mix_shape_body, mix_shape_fin, mix_spots, mix_stripes, mix_web,
};
pub use pattern::pick_dominant;

use koi_core::{as_trait, PaletteIndex, Sampler, Trait};

use crate::config::GeneticsConfig;
use crate::tree::PaletteTree;

/// Blend from `a` toward `b` by the sampler's shaping of `x`.
pub fn mix_trait(a: Trait, b: Trait, sampler: &Sampler, x: f64) -> Trait {
    let (a, b) = (f64::from(a), f64::from(b));
    as_trait(a + (b - a) * sampler.sample(x))
}

/// Blend from the lower parent value toward the higher one. With a sampler
/// that stays inside [0, 1] the child never leaves the parents' range.
pub fn mix_trait_ordered(a: Trait, b: Trait, sampler: &Sampler, x: f64) -> Trait {
    let (low, high) = (f64::from(a.min(b)), f64::from(a.max(b)));
    as_trait(low + (high - low) * sampler.sample(x))
}

/// Take the mother's color below the midpoint of the shaped lean, the father's above it.
pub(crate) fn inherit_palette(mother: PaletteIndex, father: PaletteIndex, lean: f64) -> PaletteIndex {
    if lean < 0.5 {
        mother
    } else {
        father
    }
}

/// Aggregate-level breeding: patterns, bodies and fish.
pub struct Mixer<'a> {
    config: &'a GeneticsConfig,
    tree: &'a dyn PaletteTree,
}

impl<'a> Mixer<'a> {
    pub fn new(config: &'a GeneticsConfig, tree: &'a dyn PaletteTree) -> Self {
        Self { config, tree }
    }

    pub fn config(&self) -> &GeneticsConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_trait_saturates() {
        let overshoot = Sampler::linear(0.0, 2.0);
        assert_eq!(mix_trait(200, 250, &overshoot, 1.0), 255);
        assert_eq!(mix_trait(50, 0, &overshoot, 1.0), 0);
    }

    #[test]
    fn test_mix_trait_direction() {
        let linear = Sampler::linear(0.0, 1.0);
        assert_eq!(mix_trait(10, 20, &linear, 0.0), 10);
        assert_eq!(mix_trait(20, 10, &linear, 0.0), 20);
        assert_eq!(mix_trait(10, 20, &linear, 0.5), 15);
    }

    #[test]
    fn test_ordered_mix_stays_between_parents() {
        let samplers = [
            Sampler::plateau(0.0, 0.4, 1.0, 0.5),
            Sampler::sigmoid(0.0, 1.0, 15.0),
            Sampler::power(0.0, 1.0, 3.0),
        ];
        for sampler in &samplers {
            for (a, b) in [(0u8, 255u8), (200, 17), (90, 91), (33, 33)] {
                for i in 0..=50 {
                    let child = mix_trait_ordered(a, b, sampler, i as f64 / 50.0);
                    assert!(child >= a.min(b) && child <= a.max(b));
                }
            }
        }
    }

    #[test]
    fn test_ordered_mix_ignores_argument_order() {
        let sampler = Sampler::plateau(0.0, 0.4, 1.0, 0.5);
        assert_eq!(
            mix_trait_ordered(10, 200, &sampler, 0.3),
            mix_trait_ordered(200, 10, &sampler, 0.3)
        );
    }
}
