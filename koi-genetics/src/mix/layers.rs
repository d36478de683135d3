use koi_core::Randomizer;

use super::{inherit_palette, mix_trait};
use crate::config::{
    BaseMixSamplers, MixSamplers, RidgeMixSamplers, SpotsMixSamplers, StripesMixSamplers,
    WebMixSamplers,
};
use crate::layer::{
    Layer, LayerBase, LayerRidge, LayerShapeBody, LayerShapeFin, LayerSpots, LayerStripes, LayerWeb,
};
use koi_core::Sampler;

/// The child's shade follows whichever parent the blend leans to, and so does its color.
pub fn mix_base(
    mother: &LayerBase,
    father: &LayerBase,
    samplers: &BaseMixSamplers,
    random: &mut Randomizer,
) -> LayerBase {
    let blend = samplers.sample.sample(random.next_float());
    LayerBase {
        palette_index: inherit_palette(mother.palette_index, father.palette_index, blend),
        sample: mother.sample.interpolate(&father.sample, blend),
    }
}

pub fn mix_spots(
    mother: &LayerSpots,
    father: &LayerSpots,
    samplers: &SpotsMixSamplers,
    random: &mut Randomizer,
) -> LayerSpots {
    let x = random.next_float();
    let blend = samplers.blend_sample.sample(x);
    let lean = samplers.blend_palette.sample(random.next_float());
    let sampler = &samplers.blend_sample;

    LayerSpots {
        plane: mother.plane.interpolate(&father.plane, blend),
        palette_index: inherit_palette(mother.palette_index, father.palette_index, lean),
        scale: mix_trait(mother.scale, father.scale, sampler, x),
        stretch: mix_trait(mother.stretch, father.stretch, sampler, x),
        threshold: mix_trait(mother.threshold, father.threshold, sampler, x),
        x_focus: mix_trait(mother.x_focus, father.x_focus, sampler, x),
        y_focus: mix_trait(mother.y_focus, father.y_focus, sampler, x),
        power: mix_trait(mother.power, father.power, sampler, x),
    }
}

pub fn mix_stripes(
    mother: &LayerStripes,
    father: &LayerStripes,
    samplers: &StripesMixSamplers,
    random: &mut Randomizer,
) -> LayerStripes {
    let x = random.next_float();
    let lean = samplers.palette.sample(random.next_float());

    LayerStripes {
        plane: mother.plane.interpolate(&father.plane, x),
        palette_index: inherit_palette(mother.palette_index, father.palette_index, lean),
        scale: mix_trait(mother.scale, father.scale, &samplers.scale, x),
        distortion: mix_trait(mother.distortion, father.distortion, &samplers.distortion, x),
        roughness: mix_trait(mother.roughness, father.roughness, &samplers.roughness, x),
        threshold: mix_trait(mother.threshold, father.threshold, &samplers.threshold, x),
        slant: mix_trait(mother.slant, father.slant, &samplers.slant, x),
        suppression: mix_trait(mother.suppression, father.suppression, &samplers.suppression, x),
        focus: mix_trait(mother.focus, father.focus, &samplers.focus, x),
        power: mix_trait(mother.power, father.power, &samplers.power, x),
    }
}

pub fn mix_ridge(
    mother: &LayerRidge,
    father: &LayerRidge,
    samplers: &RidgeMixSamplers,
    random: &mut Randomizer,
) -> LayerRidge {
    let x = random.next_float();
    let lean = samplers.palette.sample(random.next_float());

    LayerRidge {
        plane: mother.plane.interpolate(&father.plane, x),
        palette_index: inherit_palette(mother.palette_index, father.palette_index, lean),
        scale: mix_trait(mother.scale, father.scale, &samplers.scale, x),
        power: mix_trait(mother.power, father.power, &samplers.power, x),
        threshold: mix_trait(mother.threshold, father.threshold, &samplers.threshold, x),
        focus: mix_trait(mother.focus, father.focus, &samplers.focus, x),
        focus_power: mix_trait(mother.focus_power, father.focus_power, &samplers.focus_power, x),
    }
}

/// Webs keep the mother's color.
pub fn mix_web(
    mother: &LayerWeb,
    father: &LayerWeb,
    samplers: &WebMixSamplers,
    random: &mut Randomizer,
) -> LayerWeb {
    let x = random.next_float();

    LayerWeb {
        plane: mother.plane.interpolate(&father.plane, samplers.plane.sample(x)),
        palette_index: mother.palette_index,
        scale: mix_trait(mother.scale, father.scale, &samplers.scale, x),
        thickness: mix_trait(mother.thickness, father.thickness, &samplers.thickness, x),
        threshold: mix_trait(mother.threshold, father.threshold, &samplers.threshold, x),
    }
}

pub fn mix_shape_body(
    mother: &LayerShapeBody,
    father: &LayerShapeBody,
    sampler: &Sampler,
    random: &mut Randomizer,
) -> LayerShapeBody {
    let x = random.next_float();
    LayerShapeBody {
        center_power: mix_trait(mother.center_power, father.center_power, sampler, x),
        radius_power: mix_trait(mother.radius_power, father.radius_power, sampler, x),
        eye_position: mix_trait(mother.eye_position, father.eye_position, sampler, x),
    }
}

pub fn mix_shape_fin(
    mother: &LayerShapeFin,
    father: &LayerShapeFin,
    sampler: &Sampler,
    random: &mut Randomizer,
) -> LayerShapeFin {
    let x = random.next_float();
    LayerShapeFin {
        angle: mix_trait(mother.angle, father.angle, sampler, x),
        inset: mix_trait(mother.inset, father.inset, sampler, x),
        dips: mix_trait(mother.dips, father.dips, sampler, x),
        dip_power: mix_trait(mother.dip_power, father.dip_power, sampler, x),
        roundness: mix_trait(mother.roundness, father.roundness, sampler, x),
    }
}

/// Mix two layers of the same kind. Returns `None` for layers of different kinds,
/// which are never blended.
pub fn mix_layers(
    mother: &Layer,
    father: &Layer,
    samplers: &MixSamplers,
    random: &mut Randomizer,
) -> Option<Layer> {
    let child = match (mother, father) {
        (Layer::Base(m), Layer::Base(f)) => Layer::Base(mix_base(m, f, &samplers.base, random)),
        (Layer::Spots(m), Layer::Spots(f)) => Layer::Spots(mix_spots(m, f, &samplers.spots, random)),
        (Layer::Stripes(m), Layer::Stripes(f)) => {
            Layer::Stripes(mix_stripes(m, f, &samplers.stripes, random))
        }
        (Layer::Ridge(m), Layer::Ridge(f)) => Layer::Ridge(mix_ridge(m, f, &samplers.ridge, random)),
        (Layer::Web(m), Layer::Web(f)) => Layer::Web(mix_web(m, f, &samplers.web, random)),
        (Layer::ShapeBody(m), Layer::ShapeBody(f)) => {
            Layer::ShapeBody(mix_shape_body(m, f, &samplers.shape_body, random))
        }
        (Layer::ShapeFin(m), Layer::ShapeFin(f)) => {
            Layer::ShapeFin(mix_shape_fin(m, f, &samplers.shape_fin, random))
        }
        _ => return None,
    };
    Some(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::fixtures::{base, ridge, spots, stripes, web};
    use crate::layer::LayerId;
    use koi_core::PaletteSample;

    #[test]
    fn test_identical_parents_breed_true() {
        let samplers = MixSamplers::default();
        let mut random = Randomizer::new(3);
        for layer in [spots(2), stripes(3), ridge(4), web(5)] {
            for _ in 0..20 {
                let child = mix_layers(&layer, &layer, &samplers, &mut random).unwrap();
                assert_eq!(child.palette_index(), layer.palette_index());
                assert_eq!(child.id(), layer.id());
            }
        }
    }

    #[test]
    fn test_different_kinds_do_not_mix() {
        let mut random = Randomizer::new(3);
        let before = random;
        assert!(mix_layers(&spots(2), &stripes(2), &MixSamplers::default(), &mut random).is_none());
        assert_eq!(random, before);
    }

    #[test]
    fn test_palette_comes_from_one_parent() {
        let samplers = MixSamplers::default();
        let mut random = Randomizer::new(11);
        for _ in 0..50 {
            let child = mix_layers(&stripes(3), &stripes(4), &samplers, &mut random).unwrap();
            assert!(matches!(child.palette_index(), Some(3) | Some(4)));
        }
    }

    #[test]
    fn test_web_keeps_mother_palette() {
        let samplers = MixSamplers::default();
        let mut random = Randomizer::new(8);
        for _ in 0..20 {
            let child = mix_layers(&web(1), &web(5), &samplers, &mut random).unwrap();
            assert_eq!(child.palette_index(), Some(1));
            assert_eq!(child.id(), LayerId::Web);
        }
    }

    #[test]
    fn test_base_shade_follows_inherited_color() {
        let samplers = BaseMixSamplers {
            sample: Sampler::sigmoid(0.0, 1.0, 33.0),
        };
        let mut mother = base(0);
        mother.sample = PaletteSample::new(10, 10);
        let mut father = base(2);
        father.sample = PaletteSample::new(90, 10);

        let mut random = Randomizer::new(21);
        for _ in 0..50 {
            let child = mix_base(&mother, &father, &samplers, &mut random);
            if child.palette_index == 0 {
                assert!(child.sample.x <= 50);
            } else {
                assert!(child.sample.x >= 50);
            }
        }
    }

    #[test]
    fn test_planes_stay_normalized() {
        let samplers = MixSamplers::default();
        let mut random = Randomizer::new(5);
        let mut father = spots(2);
        if let Layer::Spots(layer) = &mut father {
            layer.plane = koi_core::Plane::new(
                koi_core::Vector3::new(-100.0, 4.0, 0.0),
                koi_core::Vector3::new(1.0, 1.0, 0.0),
            );
        }
        for _ in 0..20 {
            let child = mix_layers(&spots(2), &father, &samplers, &mut random).unwrap();
            let direction = child.plane().map(|p| p.direction.length()).unwrap_or_default();
            assert!((direction - 1.0).abs() < 1e-5);
        }
    }
}
