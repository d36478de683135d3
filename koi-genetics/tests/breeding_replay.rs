mod common;

use common::{fish, init_tracing, pattern, ridge, spots, stripes, web};
use koi_core::{Encode, Randomizer};
use koi_genetics::mix::pick_dominant;
use koi_genetics::{Breeder, GeneticsConfig, KeepAll, LayerId, Mixer, MutationCatalog};

#[test]
fn brood_replays_byte_for_byte() {
    init_tracing();
    let config = GeneticsConfig::default();
    let breeder = Breeder::new(&config, &KeepAll);
    let catalog = MutationCatalog::builtin();
    let mother = fish(0, vec![spots(2), stripes(3), web(4)]);
    let father = fish(2, vec![ridge(5), spots(3)]);

    let mut a = Randomizer::new(2024);
    let mut b = Randomizer::new(2024);
    let first = breeder.breed(&mother, &father, Some(&catalog), &mut a);
    let second = breeder.breed(&mother, &father, Some(&catalog), &mut b);

    assert_eq!(first.mutation, second.mutation);
    assert_eq!(first.offspring.len(), second.offspring.len());
    for (x, y) in first.offspring.iter().zip(&second.offspring) {
        assert_eq!(x.to_buffer().into_bytes(), y.to_buffer().into_bytes());
    }
    assert_eq!(a, b);
}

#[test]
fn trailing_layer_is_kept_or_dropped_reproducibly() {
    init_tracing();
    let config = GeneticsConfig::stable_structure();
    let mixer = Mixer::new(&config, &KeepAll);
    let mother = pattern(0, vec![spots(3)]);
    let father = pattern(0, vec![spots(3), stripes(5)]);

    let mut kept = 0;
    let mut dropped = 0;
    for n in 0..64u32 {
        let seed = n.wrapping_mul(2_654_435_761);
        let child = mixer.mix_pattern(&mother, &father, &mut Randomizer::new(seed));
        let again = mixer.mix_pattern(&mother, &father, &mut Randomizer::new(seed));
        assert_eq!(child, again);

        assert_eq!(child.layers[0].id(), LayerId::Spots);
        assert_eq!(child.layers[0].palette_index(), Some(3));
        match child.layers.len() {
            1 => dropped += 1,
            2 => {
                assert_eq!(child.layers[1], stripes(5));
                kept += 1;
            }
            n => panic!("unexpected layer count {n}"),
        }
    }
    assert!(kept > 0 && dropped > 0);
}

#[test]
fn child_layer_count_never_exceeds_parents() {
    let config = GeneticsConfig::default();
    let breeder = Breeder::new(&config, &KeepAll);
    let mother = fish(1, vec![stripes(0), spots(2), web(3), ridge(4)]);
    let father = fish(3, vec![web(2), web(5)]);
    let limit = mother.body.pattern.layers.len() + father.body.pattern.layers.len();

    let mut random = Randomizer::new(7);
    for _ in 0..30 {
        let brood = breeder.breed(&mother, &father, None, &mut random);
        for child in &brood.offspring {
            assert!(child.body.pattern.layers.len() <= limit);
            assert_eq!(child.body.age, 0);
            assert!((child.direction.length() - 1.0).abs() < 1e-5);
        }
    }
}

#[test]
fn planes_stay_unit_across_generations() {
    let config = GeneticsConfig::default();
    let breeder = Breeder::new(&config, &KeepAll);
    let mut mother = fish(0, vec![spots(2), stripes(3), ridge(4), web(5)]);
    let mut father = fish(0, vec![spots(2), stripes(3), ridge(4), web(5)]);

    let mut random = Randomizer::new(99);
    for _ in 0..10 {
        let brood = breeder.breed(&mother, &father, None, &mut random);
        for child in &brood.offspring {
            for layer in &child.body.pattern.layers {
                if let Some(plane) = layer.plane() {
                    assert!((plane.direction.length() - 1.0).abs() < 1e-4);
                    assert!(plane.anchor.x.abs() <= koi_core::SPACE_LIMIT);
                }
            }
        }
        if brood.offspring.len() >= 2 {
            mother = brood.offspring[0].clone();
            father = brood.offspring[1].clone();
        }
    }
}

#[test]
fn recessive_ridge_loses_without_a_draw() {
    let mut random = Randomizer::new(5);
    let before = random;
    let mother = ridge(1);
    let father = web(2);
    assert_eq!(pick_dominant(&mother, &father, &mut random).id(), LayerId::Web);
    assert_eq!(random, before);

    // Two recessive layers fall back to a dominance draw.
    let ridge_a = ridge(1);
    let ridge_b = ridge(2);
    let winner = pick_dominant(&ridge_a, &ridge_b, &mut random);
    assert_eq!(winner.id(), LayerId::Ridge);
    assert_ne!(random, before);
}
