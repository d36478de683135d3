use std::f64::consts::TAU;

use koi_core::{Randomizer, Sampler, Vector2};

use super::{mix_trait, mix_trait_ordered, Mixer};
use crate::catalog::MutationCatalog;
use crate::fish::{Fin, Fins, Fish, FishBody, Tail};

fn mix_fin(mother: &Fin, father: &Fin, sampler: &Sampler, random: &mut Randomizer) -> Fin {
    let x = random.next_float();
    Fin {
        at: mix_trait(mother.at, father.at, sampler, x),
        radius: mix_trait(mother.radius, father.radius, sampler, x),
    }
}

/// The child takes one parent's pair count. Pairs both parents have are blended,
/// pairs only one parent has are copied.
pub fn mix_fins(mother: &Fins, father: &Fins, sampler: &Sampler, random: &mut Randomizer) -> Fins {
    let count = if random.next_float() < 0.5 {
        mother.len()
    } else {
        father.len()
    };

    let pairs = (0..count)
        .filter_map(|i| match (mother.pairs().get(i), father.pairs().get(i)) {
            (Some(a), Some(b)) => Some(mix_fin(a, b, sampler, random)),
            (Some(fin), None) | (None, Some(fin)) => Some(*fin),
            (None, None) => None,
        })
        .collect();

    Fins::new(pairs).unwrap_or_else(|_| mother.clone())
}

pub fn mix_tail(mother: &Tail, father: &Tail, sampler: &Sampler, random: &mut Randomizer) -> Tail {
    Tail {
        length: mix_trait(mother.length, father.length, sampler, random.next_float()),
    }
}

impl Mixer<'_> {
    /// Draw order: pattern, fins, tail, length, radius, growth speed, mating
    /// frequency, offspring count. The child starts at age zero.
    pub fn mix_body(
        &self,
        mother: &FishBody,
        father: &FishBody,
        catalog: Option<&MutationCatalog>,
        random: &mut Randomizer,
    ) -> (FishBody, Option<usize>) {
        let samplers = &self.config.mix.body;
        let (pattern, mutation) = self.mix_pattern_with(&mother.pattern, &father.pattern, catalog, random);

        let body = FishBody {
            pattern,
            fins: mix_fins(&mother.fins, &father.fins, &samplers.fin, random),
            tail: mix_tail(&mother.tail, &father.tail, &samplers.tail, random),
            length: mix_trait_ordered(mother.length, father.length, &samplers.length, random.next_float()),
            radius: mix_trait_ordered(mother.radius, father.radius, &samplers.radius, random.next_float()),
            growth_speed: mix_trait(
                mother.growth_speed,
                father.growth_speed,
                &samplers.growth_speed,
                random.next_float(),
            ),
            mating_frequency: mix_trait_ordered(
                mother.mating_frequency,
                father.mating_frequency,
                &samplers.mating_frequency,
                random.next_float(),
            ),
            offspring_count: mix_trait_ordered(
                mother.offspring_count,
                father.offspring_count,
                &samplers.offspring_count,
                random.next_float(),
            ),
            age: 0,
        };
        (body, mutation)
    }

    /// The child is placed at the mother and faces a random heading.
    pub fn mix_fish(
        &self,
        mother: &Fish,
        father: &Fish,
        catalog: Option<&MutationCatalog>,
        random: &mut Randomizer,
    ) -> (Fish, Option<usize>) {
        let (body, mutation) = self.mix_body(&mother.body, &father.body, catalog, random);
        let fish = Fish {
            body,
            position: mother.position,
            direction: Vector2::from_angle(random.next_float() * TAU),
        };
        (fish, mutation)
    }
}
