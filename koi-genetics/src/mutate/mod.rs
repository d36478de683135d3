//! Mutation: small random drift applied to a freshly bred child.
//!
//! Design rules:
//! - Everything mutates in place, in a fixed field order.
//! - Palette colors only move along the transition matrix and never collide
//!   with colors already used elsewhere in the same pattern.
//! - Noise planes stay inside the anchor cube with a unit direction.

mod fish;
mod layers;
mod pattern;

pub use layers::{
    mutate_base, mutate_layer, mutate_plane, mutate_ridge, mutate_shape_body, mutate_shape_fin,
    mutate_spots, mutate_stripes, mutate_web,
};

use std::f64::consts::TAU;

use koi_core::{as_trait, PaletteIndex, PaletteSample, Randomizer, Sampler, Trait, Vector3};

use crate::config::{GeneticsConfig, PaletteTransitions};

/// Shift a trait by the sampler's offset for one draw, saturating at the ends.
pub fn mutate_trait(value: Trait, sampler: &Sampler, random: &mut Randomizer) -> Trait {
    as_trait(f64::from(value) + sampler.sample(random.next_float()))
}

/// Move a palette sample a random distance in a random direction, wrapping on the tile.
pub fn mutate_palette_sample(sample: &mut PaletteSample, distance: &Sampler, random: &mut Randomizer) {
    let angle = random.next_float() * TAU;
    let radius = distance.sample(random.next_float());
    *sample = sample.offset(
        (angle.cos() * radius).round() as i32,
        (angle.sin() * radius).round() as i32,
    );
}

/// Push a vector a random distance in a uniformly random direction.
pub fn mutate_vector(vector: &mut Vector3, distance: &Sampler, random: &mut Randomizer) {
    let direction = Vector3::from_sphere(random.next_float(), random.next_float());
    let distance = distance.sample(random.next_float()) as f32;
    *vector = *vector + direction * distance;
}

/// Like `mutate_vector`, then renormalize. A push that lands on the origin
/// leaves the vector unchanged.
pub fn mutate_normal_vector(vector: &mut Vector3, distance: &Sampler, random: &mut Randomizer) {
    let previous = *vector;
    mutate_vector(vector, distance, random);
    *vector = vector.normalized().unwrap_or(previous);
}

/// Walk the transition row of the current color and stop at the first color
/// whose cumulative chance exceeds the draw. Colors in `taken` are never picked,
/// though their chance still counts toward the sum. Consumes one draw.
pub fn mutate_palette_index(
    index: &mut PaletteIndex,
    taken: &[PaletteIndex],
    transitions: &PaletteTransitions,
    random: &mut Randomizer,
) {
    let roll = random.next_float();
    let Some(row) = transitions.get(usize::from(*index)) else {
        return;
    };

    let mut chance_sum = 0.0;
    for (candidate, chance) in row.iter().enumerate() {
        chance_sum += chance;
        let candidate = candidate as PaletteIndex;
        if taken.contains(&candidate) {
            continue;
        }
        if roll < chance_sum {
            *index = candidate;
            return;
        }
    }
}

/// Applies the configured drift to patterns, bodies and fish.
pub struct Mutator<'a> {
    config: &'a GeneticsConfig,
}

impl<'a> Mutator<'a> {
    pub fn new(config: &'a GeneticsConfig) -> Self {
        Self { config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_saturates() {
        let up = Sampler::linear(300.0, 300.0);
        let down = Sampler::linear(-300.0, -300.0);
        let mut random = Randomizer::new(1);
        assert_eq!(mutate_trait(200, &up, &mut random), 255);
        assert_eq!(mutate_trait(20, &down, &mut random), 0);
    }

    #[test]
    fn test_normal_vector_stays_unit() {
        let distance = Sampler::quadratic(0.0, 2.0, 4.0);
        let mut random = Randomizer::new(31);
        let mut vector = Vector3::new(0.0, 1.0, 0.0);
        for _ in 0..200 {
            mutate_normal_vector(&mut vector, &distance, &mut random);
            assert!((vector.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_identity_row_never_changes_color() {
        let transitions = GeneticsConfig::default().mutation.palette_transitions;
        let mut random = Randomizer::new(2);
        for _ in 0..100 {
            let mut index = 0;
            mutate_palette_index(&mut index, &[], &transitions, &mut random);
            assert_eq!(index, 0);
        }
    }

    #[test]
    fn test_taken_colors_are_skipped() {
        let mut transitions = [[0.0; koi_core::PALETTE_COUNT]; koi_core::PALETTE_COUNT];
        transitions[3] = [0.0, 0.0, 0.5, 0.5, 0.0, 0.0];
        let mut random = Randomizer::new(4);
        for _ in 0..100 {
            let mut index = 3;
            mutate_palette_index(&mut index, &[2], &transitions, &mut random);
            assert_eq!(index, 3);
        }
    }

    #[test]
    fn test_exhausted_row_keeps_color() {
        let mut transitions = [[0.0; koi_core::PALETTE_COUNT]; koi_core::PALETTE_COUNT];
        transitions[3] = [0.0, 0.0, 0.2, 0.0, 0.0, 0.0];
        let mut random = Randomizer::new(4);
        let mut seen_gold = false;
        for _ in 0..100 {
            let mut index = 3;
            mutate_palette_index(&mut index, &[], &transitions, &mut random);
            assert!(index == 2 || index == 3);
            seen_gold |= index == 2;
        }
        assert!(seen_gold);
    }

    #[test]
    fn test_palette_sample_draws_angle_then_radius() {
        let still = Sampler::linear(0.0, 0.0);
        let mut random = Randomizer::new(8);
        let mut replay = random;
        let mut sample = PaletteSample::new(250, 3);
        mutate_palette_sample(&mut sample, &still, &mut random);
        assert_eq!(sample, PaletteSample::new(250, 3));

        replay.next_float();
        replay.next_float();
        assert_eq!(random, replay);
    }
}
