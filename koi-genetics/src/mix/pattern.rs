use koi_core::Randomizer;

use super::layers::{mix_base, mix_layers, mix_shape_body, mix_shape_fin};
use super::Mixer;
use crate::catalog::MutationCatalog;
use crate::layer::Layer;
use crate::pattern::Pattern;

/// Settle a slot claimed by two layers of different kinds.
///
/// A recessive layer always loses to a non-recessive one without consuming a
/// draw. Otherwise each side draws a dominance score, mother first, and the
/// higher score wins; ties go to the mother.
pub fn pick_dominant<'l>(mother: &'l Layer, father: &'l Layer, random: &mut Randomizer) -> &'l Layer {
    match (mother.is_recessive(), father.is_recessive()) {
        (true, false) => father,
        (false, true) => mother,
        _ => {
            let mother_score = mother.sample_dominance(random);
            let father_score = father.sample_dominance(random);
            if father_score > mother_score {
                father
            } else {
                mother
            }
        }
    }
}

fn chance(random: &mut Randomizer, probability: f64) -> bool {
    random.next_float() < probability
}

impl Mixer<'_> {
    /// Walk both layer lists side by side and produce the child's pattern.
    ///
    /// Draw order: base, the two skip draws, the layer walk, body shape, fin shape.
    /// The child never has more listed layers than both parents together.
    pub fn mix_pattern(&self, mother: &Pattern, father: &Pattern, random: &mut Randomizer) -> Pattern {
        let breeding = &self.config.breeding;
        let samplers = &self.config.mix;

        let base = mix_base(&mother.base, &father.base, &samplers.base, random);

        let mut m = usize::from(chance(random, breeding.skip_first_layer_chance));
        let mut f = usize::from(chance(random, breeding.skip_first_layer_chance));
        let mut layers = Vec::with_capacity(mother.layers.len().max(father.layers.len()));

        loop {
            match (mother.layers.get(m), father.layers.get(f)) {
                (None, None) => break,
                (Some(layer), None) => {
                    if chance(random, breeding.unmatched_keep_chance) {
                        layers.push(layer.clone());
                    }
                    m += 1;
                }
                (None, Some(layer)) => {
                    if chance(random, breeding.unmatched_keep_chance) {
                        layers.push(layer.clone());
                    }
                    f += 1;
                }
                (Some(a), Some(b)) if a.id() == b.id() => {
                    if let Some(child) = mix_layers(a, b, samplers, random) {
                        layers.push(child);
                    }
                    m += if chance(random, breeding.double_advance_chance) { 2 } else { 1 };
                    f += if chance(random, breeding.double_advance_chance) { 2 } else { 1 };
                }
                (Some(a), Some(b)) => {
                    layers.push(pick_dominant(a, b, random).clone());
                    m += 1;
                    f += 1;
                }
            }
        }

        let shape_body = mix_shape_body(&mother.shape_body, &father.shape_body, &samplers.shape_body, random);
        let shape_fin = mix_shape_fin(&mother.shape_fin, &father.shape_fin, &samplers.shape_fin, random);

        let mut child = Pattern::new(base, layers, shape_body, shape_fin);
        self.tree.trim(&mut child);
        tracing::trace!(layers = child.layers.len(), "mixed pattern");
        child
    }

    /// Like `mix_pattern`, but first offers the pair to the catalog. Returns the
    /// index of the special mutation that produced the child, if one did.
    pub fn mix_pattern_with(
        &self,
        mother: &Pattern,
        father: &Pattern,
        catalog: Option<&MutationCatalog>,
        random: &mut Randomizer,
    ) -> (Pattern, Option<usize>) {
        let triggered = catalog.and_then(|catalog| catalog.roll(mother, father, random));

        let Some((index, mutation)) = triggered else {
            return (self.mix_pattern(mother, father, random), None);
        };

        let samplers = &self.config.mix;
        let shape_body = mix_shape_body(&mother.shape_body, &father.shape_body, &samplers.shape_body, random);
        let shape_fin = mix_shape_fin(&mother.shape_fin, &father.shape_fin, &samplers.shape_fin, random);

        let mut child = mutation.apply(mother, father, shape_body, shape_fin, samplers, random);
        self.tree.trim(&mut child);
        tracing::info!(mutation = index, "special mutation produced a pattern");
        (child, Some(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneticsConfig;
    use crate::layer::fixtures::{ridge, spots, stripes, web};
    use crate::layer::LayerId;
    use crate::pattern::fixtures::pattern;
    use crate::tree::KeepAll;

    #[test]
    fn test_recessive_never_wins_against_dominant() {
        let mut random = Randomizer::new(1);
        let before = random;
        let mother = ridge(2);
        let father = spots(3);
        for _ in 0..20 {
            assert_eq!(pick_dominant(&mother, &father, &mut random).id(), LayerId::Spots);
            assert_eq!(pick_dominant(&father, &mother, &mut random).id(), LayerId::Spots);
        }
        assert_eq!(random, before);
    }

    #[test]
    fn test_equal_recessiveness_draws_twice() {
        let mut random = Randomizer::new(9);
        let mut replay = random;
        let winner = pick_dominant(&stripes(2), &web(3), &mut random).id();

        let mother_score = replay.next_float().powf(LayerId::Stripes.dominance());
        let father_score = replay.next_float().powf(LayerId::Web.dominance());
        let expected = if father_score > mother_score { LayerId::Web } else { LayerId::Stripes };

        assert_eq!(winner, expected);
        assert_eq!(random, replay);
    }

    #[test]
    fn test_child_layer_count_is_bounded() {
        let config = GeneticsConfig::default();
        let mixer = Mixer::new(&config, &KeepAll);
        let mother = pattern(0, vec![spots(2), stripes(3), web(4)]);
        let father = pattern(1, vec![ridge(5), spots(2)]);

        let mut random = Randomizer::new(1234);
        for _ in 0..200 {
            let child = mixer.mix_pattern(&mother, &father, &mut random);
            assert!(child.layers.len() <= mother.layers.len() + father.layers.len());
            assert!(child.layers.iter().all(|layer| layer.id().is_listed()));
        }
    }

    #[test]
    fn test_stable_structure_keeps_matching_layers() {
        let config = GeneticsConfig::stable_structure();
        let mixer = Mixer::new(&config, &KeepAll);
        let mother = pattern(0, vec![spots(2), stripes(3)]);
        let father = pattern(0, vec![spots(2), stripes(3)]);

        let mut random = Randomizer::new(42);
        for _ in 0..50 {
            let child = mixer.mix_pattern(&mother, &father, &mut random);
            let ids: Vec<_> = child.layers.iter().map(Layer::id).collect();
            assert_eq!(ids, vec![LayerId::Spots, LayerId::Stripes]);
        }
    }

    #[test]
    fn test_mix_pattern_is_deterministic() {
        let config = GeneticsConfig::default();
        let mixer = Mixer::new(&config, &KeepAll);
        let mother = pattern(0, vec![spots(2), ridge(4)]);
        let father = pattern(2, vec![stripes(3), web(1), spots(5)]);

        let mut a = Randomizer::new(77);
        let mut b = Randomizer::new(77);
        for _ in 0..10 {
            assert_eq!(
                mixer.mix_pattern(&mother, &father, &mut a),
                mixer.mix_pattern(&mother, &father, &mut b)
            );
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_catalog_falls_through() {
        let config = GeneticsConfig::default();
        let mixer = Mixer::new(&config, &KeepAll);
        let mother = pattern(0, vec![spots(2)]);
        let father = pattern(2, vec![]);

        let mut a = Randomizer::new(5);
        let mut b = Randomizer::new(5);
        let (child, mutation) =
            mixer.mix_pattern_with(&mother, &father, Some(&MutationCatalog::new(vec![])), &mut a);
        assert_eq!(mutation, None);
        assert_eq!(child, mixer.mix_pattern(&mother, &father, &mut b));
    }
}
