//! Breeding driver: produces a whole brood from one mating.

use koi_core::Randomizer;

use crate::catalog::MutationCatalog;
use crate::config::GeneticsConfig;
use crate::fish::Fish;
use crate::mix::Mixer;
use crate::mutate::Mutator;
use crate::tree::PaletteTree;

/// Children of one mating, in birth order.
#[derive(Debug, Clone, PartialEq)]
pub struct Brood {
    pub offspring: Vec<Fish>,
    /// Catalog index of the special mutation that produced one of the children.
    pub mutation: Option<usize>,
}

pub struct Breeder<'a> {
    mixer: Mixer<'a>,
    mutator: Mutator<'a>,
    tree: &'a dyn PaletteTree,
}

impl<'a> Breeder<'a> {
    pub fn new(config: &'a GeneticsConfig, tree: &'a dyn PaletteTree) -> Self {
        Self {
            mixer: Mixer::new(config, tree),
            mutator: Mutator::new(config),
            tree,
        }
    }

    /// The mother's offspring count sets the brood size. Each child is mixed,
    /// mutated, then trimmed. The catalog is offered to every child until one
    /// special mutation triggers; the rest of the brood breeds normally.
    pub fn breed(
        &self,
        mother: &Fish,
        father: &Fish,
        catalog: Option<&MutationCatalog>,
        random: &mut Randomizer,
    ) -> Brood {
        let count = mother.body.offspring_count();
        let mut catalog = catalog;
        let mut mutation = None;
        let mut offspring = Vec::with_capacity(count);

        for _ in 0..count {
            let (mut child, triggered) = self.mixer.mix_fish(mother, father, catalog, random);
            if triggered.is_some() {
                mutation = triggered;
                catalog = None;
            }

            self.mutator.mutate_fish(&mut child, random);
            self.tree.trim(&mut child.body.pattern);
            offspring.push(child);
        }

        tracing::debug!(
            offspring = offspring.len(),
            mutation = ?mutation,
            seed_after = random.state(),
            "brood complete"
        );
        Brood { offspring, mutation }
    }
}
