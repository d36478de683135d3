use koi_core::{PaletteIndex, Plane, Randomizer};

use super::{mutate_normal_vector, mutate_palette_index, mutate_palette_sample, mutate_trait, mutate_vector};
use crate::config::{
    BaseMutationSamplers, MutationSamplers, PaletteTransitions, PlaneMutationSamplers,
    RidgeMutationSamplers, ShapeBodyMutationSamplers, ShapeFinMutationSamplers,
    SpotsMutationSamplers, StripesMutationSamplers, WebMutationSamplers,
};
use crate::layer::{
    Layer, LayerBase, LayerRidge, LayerShapeBody, LayerShapeFin, LayerSpots, LayerStripes, LayerWeb,
};

/// Anchor drift, then direction drift, then clamp back into the anchor cube.
pub fn mutate_plane(plane: &mut Plane, samplers: &PlaneMutationSamplers, random: &mut Randomizer) {
    mutate_vector(&mut plane.anchor, &samplers.anchor_distance, random);
    mutate_normal_vector(&mut plane.direction, &samplers.direction_distance, random);
    plane.clamp_anchor();
}

pub fn mutate_base(
    layer: &mut LayerBase,
    taken: &[PaletteIndex],
    samplers: &BaseMutationSamplers,
    transitions: &PaletteTransitions,
    random: &mut Randomizer,
) {
    mutate_palette_index(&mut layer.palette_index, taken, transitions, random);
    mutate_palette_sample(&mut layer.sample, &samplers.sample_distance, random);
}

pub fn mutate_spots(
    layer: &mut LayerSpots,
    taken: &[PaletteIndex],
    samplers: &SpotsMutationSamplers,
    transitions: &PaletteTransitions,
    random: &mut Randomizer,
) {
    mutate_palette_index(&mut layer.palette_index, taken, transitions, random);
    mutate_plane(&mut layer.plane, &samplers.plane, random);
    layer.stretch = mutate_trait(layer.stretch, &samplers.stretch, random);
    layer.scale = mutate_trait(layer.scale, &samplers.scale, random);
    layer.threshold = mutate_trait(layer.threshold, &samplers.threshold, random);
    layer.x_focus = mutate_trait(layer.x_focus, &samplers.x_focus, random);
    layer.y_focus = mutate_trait(layer.y_focus, &samplers.y_focus, random);
    layer.power = mutate_trait(layer.power, &samplers.power, random);
}

pub fn mutate_stripes(
    layer: &mut LayerStripes,
    taken: &[PaletteIndex],
    samplers: &StripesMutationSamplers,
    transitions: &PaletteTransitions,
    random: &mut Randomizer,
) {
    mutate_palette_index(&mut layer.palette_index, taken, transitions, random);
    mutate_plane(&mut layer.plane, &samplers.plane, random);
    layer.scale = mutate_trait(layer.scale, &samplers.scale, random);
    layer.distortion = mutate_trait(layer.distortion, &samplers.distortion, random);
    layer.roughness = mutate_trait(layer.roughness, &samplers.roughness, random);
    layer.threshold = mutate_trait(layer.threshold, &samplers.threshold, random);
    layer.slant = mutate_trait(layer.slant, &samplers.slant, random);
    layer.suppression = mutate_trait(layer.suppression, &samplers.suppression, random);
    layer.focus = mutate_trait(layer.focus, &samplers.focus, random);
    layer.power = mutate_trait(layer.power, &samplers.power, random);
}

pub fn mutate_ridge(
    layer: &mut LayerRidge,
    taken: &[PaletteIndex],
    samplers: &RidgeMutationSamplers,
    transitions: &PaletteTransitions,
    random: &mut Randomizer,
) {
    mutate_palette_index(&mut layer.palette_index, taken, transitions, random);
    mutate_plane(&mut layer.plane, &samplers.plane, random);
    layer.scale = mutate_trait(layer.scale, &samplers.scale, random);
    layer.power = mutate_trait(layer.power, &samplers.power, random);
    layer.threshold = mutate_trait(layer.threshold, &samplers.threshold, random);
    layer.focus = mutate_trait(layer.focus, &samplers.focus, random);
    layer.focus_power = mutate_trait(layer.focus_power, &samplers.focus_power, random);
}

pub fn mutate_web(
    layer: &mut LayerWeb,
    taken: &[PaletteIndex],
    samplers: &WebMutationSamplers,
    transitions: &PaletteTransitions,
    random: &mut Randomizer,
) {
    mutate_palette_index(&mut layer.palette_index, taken, transitions, random);
    mutate_plane(&mut layer.plane, &samplers.plane, random);
    layer.scale = mutate_trait(layer.scale, &samplers.scale, random);
    layer.thickness = mutate_trait(layer.thickness, &samplers.thickness, random);
    layer.threshold = mutate_trait(layer.threshold, &samplers.threshold, random);
}

pub fn mutate_shape_body(layer: &mut LayerShapeBody, samplers: &ShapeBodyMutationSamplers, random: &mut Randomizer) {
    layer.center_power = mutate_trait(layer.center_power, &samplers.center_power, random);
    layer.radius_power = mutate_trait(layer.radius_power, &samplers.radius_power, random);
    layer.eye_position = mutate_trait(layer.eye_position, &samplers.eye_position, random);
}

pub fn mutate_shape_fin(layer: &mut LayerShapeFin, samplers: &ShapeFinMutationSamplers, random: &mut Randomizer) {
    layer.angle = mutate_trait(layer.angle, &samplers.angle, random);
    layer.inset = mutate_trait(layer.inset, &samplers.inset, random);
    layer.dips = mutate_trait(layer.dips, &samplers.dips, random);
    layer.dip_power = mutate_trait(layer.dip_power, &samplers.dip_power, random);
    layer.roundness = mutate_trait(layer.roundness, &samplers.roundness, random);
}

/// Dispatch on the variant. `taken` holds the colors of every other layer in the pattern.
pub fn mutate_layer(
    layer: &mut Layer,
    taken: &[PaletteIndex],
    samplers: &MutationSamplers,
    transitions: &PaletteTransitions,
    random: &mut Randomizer,
) {
    match layer {
        Layer::Base(layer) => mutate_base(layer, taken, &samplers.base, transitions, random),
        Layer::Spots(layer) => mutate_spots(layer, taken, &samplers.spots, transitions, random),
        Layer::Stripes(layer) => mutate_stripes(layer, taken, &samplers.stripes, transitions, random),
        Layer::Ridge(layer) => mutate_ridge(layer, taken, &samplers.ridge, transitions, random),
        Layer::Web(layer) => mutate_web(layer, taken, &samplers.web, transitions, random),
        Layer::ShapeBody(layer) => mutate_shape_body(layer, &samplers.shape_body, random),
        Layer::ShapeFin(layer) => mutate_shape_fin(layer, &samplers.shape_fin, random),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneticsConfig;
    use crate::layer::fixtures::{ridge, spots, stripes, web};
    use koi_core::{Vector3, SPACE_LIMIT};

    #[test]
    fn test_planes_stay_in_bounds() {
        let samplers = PlaneMutationSamplers {
            anchor_distance: koi_core::Sampler::linear(100.0, 100.0),
            direction_distance: koi_core::Sampler::linear(3.0, 3.0),
        };
        let mut plane = Plane::new(Vector3::new(250.0, -250.0, 0.0), Vector3::new(0.0, 0.0, 1.0));
        let mut random = Randomizer::new(13);
        for _ in 0..100 {
            mutate_plane(&mut plane, &samplers, &mut random);
            for component in [plane.anchor.x, plane.anchor.y, plane.anchor.z] {
                assert!((-SPACE_LIMIT..=SPACE_LIMIT).contains(&component));
            }
            assert!((plane.direction.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_every_variant_keeps_its_kind() {
        let config = GeneticsConfig::default();
        let mut random = Randomizer::new(99);
        for original in [spots(2), stripes(3), ridge(4), web(1)] {
            let mut layer = original.clone();
            for _ in 0..30 {
                mutate_layer(&mut layer, &[], &config.mutate, &config.mutation.palette_transitions, &mut random);
                assert_eq!(layer.id(), original.id());
                assert!(layer.palette_index().is_some_and(|p| (p as usize) < koi_core::PALETTE_COUNT));
            }
        }
    }

    #[test]
    fn test_taken_color_blocks_transition() {
        let config = GeneticsConfig::default();
        let mut random = Randomizer::new(5);
        // Orange may only become gold or red, both taken here.
        for _ in 0..100 {
            let mut layer = stripes(3);
            mutate_layer(&mut layer, &[2, 4], &config.mutate, &config.mutation.palette_transitions, &mut random);
            assert_eq!(layer.palette_index(), Some(3));
        }
    }
}
