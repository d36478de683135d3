use koi_core::{PaletteIndex, Randomizer};

use super::layers::{mutate_base, mutate_layer, mutate_shape_body, mutate_shape_fin};
use super::Mutator;
use crate::layer::Layer;
use crate::pattern::Pattern;

/// Colors of the base and every listed layer except the one at `skip`.
fn colors_except(pattern: &Pattern, skip: usize) -> Vec<PaletteIndex> {
    std::iter::once(pattern.base.palette_index)
        .chain(
            pattern
                .layers
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != skip)
                .filter_map(|(_, layer)| layer.palette_index()),
        )
        .collect()
}

impl Mutator<'_> {
    /// Listed layers are visited from the top down. Each one may be dropped;
    /// survivors mutate against the colors of everything else in the pattern.
    /// Then the base, body shape and fin shape follow.
    pub fn mutate_pattern(&self, pattern: &mut Pattern, random: &mut Randomizer) {
        let samplers = &self.config.mutate;
        let transitions = &self.config.mutation.palette_transitions;

        for index in (0..pattern.layers.len()).rev() {
            if random.next_float() < self.config.mutation.layer_removal_chance {
                let removed = pattern.layers.remove(index);
                tracing::trace!(index = index, layer = ?removed.id(), "layer removed by mutation");
                continue;
            }

            let taken = colors_except(pattern, index);
            if let Some(layer) = pattern.layers.get_mut(index) {
                mutate_layer(layer, &taken, samplers, transitions, random);
            }
        }

        let taken: Vec<PaletteIndex> = pattern.layers.iter().filter_map(Layer::palette_index).collect();
        mutate_base(&mut pattern.base, &taken, &samplers.base, transitions, random);
        mutate_shape_body(&mut pattern.shape_body, &samplers.shape_body, random);
        mutate_shape_fin(&mut pattern.shape_fin, &samplers.shape_fin, random);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneticsConfig;
    use crate::layer::fixtures::{spots, stripes, web};
    use crate::pattern::fixtures::pattern;

    #[test]
    fn test_certain_removal_clears_layers() {
        let mut config = GeneticsConfig::default();
        config.mutation.layer_removal_chance = 1.0;
        let mutator = Mutator::new(&config);

        let mut p = pattern(0, vec![spots(2), stripes(3), web(4)]);
        mutator.mutate_pattern(&mut p, &mut Randomizer::new(6));
        assert!(p.layers.is_empty());
    }

    #[test]
    fn test_stable_structure_keeps_layer_kinds() {
        let config = GeneticsConfig::stable_structure();
        let mutator = Mutator::new(&config);
        let mut random = Randomizer::new(6);

        let mut p = pattern(0, vec![spots(2), stripes(3), web(4)]);
        for _ in 0..50 {
            mutator.mutate_pattern(&mut p, &mut random);
            let ids: Vec<_> = p.layers.iter().map(Layer::id).collect();
            assert_eq!(ids, vec![crate::layer::LayerId::Spots, crate::layer::LayerId::Stripes, crate::layer::LayerId::Web]);
        }
    }

    #[test]
    fn test_colors_never_merge() {
        let config = GeneticsConfig::stable_structure();
        let mutator = Mutator::new(&config);
        let mut random = Randomizer::new(10);

        // Gold and orange sit next to each other in the transition matrix.
        let mut p = pattern(0, vec![spots(2), stripes(3)]);
        for _ in 0..200 {
            mutator.mutate_pattern(&mut p, &mut random);
            let colors = p.palette_indices();
            let mut unique = colors.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(unique.len(), colors.len());
        }
    }

    #[test]
    fn test_mutation_is_deterministic() {
        let config = GeneticsConfig::default();
        let mutator = Mutator::new(&config);
        let original = pattern(0, vec![spots(2), stripes(3), web(4)]);

        let (mut a, mut b) = (original.clone(), original);
        let (mut ra, mut rb) = (Randomizer::new(71), Randomizer::new(71));
        mutator.mutate_pattern(&mut a, &mut ra);
        mutator.mutate_pattern(&mut b, &mut rb);
        assert_eq!(a, b);
        assert_eq!(ra, rb);
    }
}
