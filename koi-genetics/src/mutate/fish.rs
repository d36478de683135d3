use koi_core::{Randomizer, Trait, TRAIT_MAX};

use super::{mutate_trait, Mutator};
use crate::config::BodyMutationSamplers;
use crate::fish::{Fins, Fish, FishBody, Tail};

/// Each fin's attachment point stays between its neighbours' attachment points,
/// so pairs never swap order along the spine.
fn mutate_fins(fins: &mut Fins, samplers: &BodyMutationSamplers, random: &mut Randomizer) {
    for index in 0..fins.len() {
        let pairs = fins.pairs();
        let lower = index
            .checked_sub(1)
            .and_then(|previous| pairs.get(previous))
            .map_or(0, |fin| fin.at);
        let upper = pairs.get(index + 1).map_or(TRAIT_MAX, |fin| fin.at);
        let (lower, upper): (Trait, Trait) = (lower.min(upper), lower.max(upper));

        if let Some(fin) = fins.pairs_mut().get_mut(index) {
            fin.at = mutate_trait(fin.at, &samplers.fin_at, random).max(lower).min(upper);
            fin.radius = mutate_trait(fin.radius, &samplers.fin_radius, random);
        }
    }
}

fn mutate_tail(tail: &mut Tail, samplers: &BodyMutationSamplers, random: &mut Randomizer) {
    tail.length = mutate_trait(tail.length, &samplers.tail_length, random);
}

impl Mutator<'_> {
    /// Order: length, radius, growth speed, mating frequency, offspring count,
    /// pattern, fins, tail.
    pub fn mutate_body(&self, body: &mut FishBody, random: &mut Randomizer) {
        let samplers = &self.config.mutate.body;
        body.length = mutate_trait(body.length, &samplers.length, random);
        body.radius = mutate_trait(body.radius, &samplers.radius, random);
        body.growth_speed = mutate_trait(body.growth_speed, &samplers.growth_speed, random);
        body.mating_frequency = mutate_trait(body.mating_frequency, &samplers.mating_frequency, random);
        body.offspring_count = mutate_trait(body.offspring_count, &samplers.offspring_count, random);
        self.mutate_pattern(&mut body.pattern, random);
        mutate_fins(&mut body.fins, samplers, random);
        mutate_tail(&mut body.tail, samplers, random);
    }

    /// Position and heading are not heritable and stay as they are.
    pub fn mutate_fish(&self, fish: &mut Fish, random: &mut Randomizer) {
        self.mutate_body(&mut fish.body, random);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneticsConfig;
    use crate::fish::fixtures::fish;
    use crate::fish::Fin;
    use crate::layer::fixtures::spots;

    #[test]
    fn test_fins_keep_their_order() {
        let mut samplers = GeneticsConfig::default().mutate.body;
        samplers.fin_at = koi_core::Sampler::linear(-60.0, 60.0);
        let mut fins = Fins::new(vec![
            Fin { at: 50, radius: 100 },
            Fin { at: 100, radius: 100 },
            Fin { at: 150, radius: 100 },
        ])
        .unwrap();

        let mut random = Randomizer::new(3);
        for _ in 0..200 {
            mutate_fins(&mut fins, &samplers, &mut random);
            let at: Vec<_> = fins.pairs().iter().map(|fin| fin.at).collect();
            assert!(at.windows(2).all(|pair| pair[0] <= pair[1]), "{at:?}");
        }
    }

    #[test]
    fn test_fish_keeps_position_and_heading() {
        let config = GeneticsConfig::default();
        let mutator = Mutator::new(&config);
        let original = fish(0, vec![spots(2)]);
        let mut mutated = original.clone();

        let mut random = Randomizer::new(12);
        for _ in 0..20 {
            mutator.mutate_fish(&mut mutated, &mut random);
        }
        assert_eq!(mutated.position, original.position);
        assert_eq!(mutated.direction, original.direction);
        assert_eq!(mutated.body.fins.len(), original.body.fins.len());
        assert_eq!(mutated.body.age, original.body.age);
    }
}
