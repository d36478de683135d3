//! Special mutations: rare recipes that replace normal pattern mixing for
//! specific parent combinations.
//!
//! Design rules:
//! - A recipe is keyed on the structure of both parents, via footprints.
//! - Unless forced, each recipe consumes exactly one draw per breeding it is offered.
//! - A child built from a recipe still gets mixed shapes; only the layers come from the template.

use koi_core::palette::{GOLD, WHITE};
use koi_core::{PaletteIndex, PaletteSample, Plane, Randomizer, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::MixSamplers;
use crate::footprint::{LayerFootprint, PaletteMatch, PatternFootprint};
use crate::layer::{Layer, LayerBase, LayerId, LayerShapeBody, LayerShapeFin, LayerSpots};
use crate::mix::mix_layers;
use crate::pattern::Pattern;

/// Where a spawned layer's color comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteRef {
    Absolute(PaletteIndex),
    /// The mother's layer at this position plus a delta.
    Mother(i8),
    /// The father's layer at this position plus a delta.
    Father(i8),
}

/// How one position of the child's pattern is produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum LayerTemplate {
    Mother,
    Father,
    /// Blend both parents' layers at this position. Layers of different kinds
    /// fall back to the mother's.
    Mix,
    /// A fixed blueprint layer, recolored.
    Spawn { layer: Layer, palette: PaletteRef },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialMutation {
    pub mother: PatternFootprint,
    pub father: PatternFootprint,
    /// Position 0 builds the base, the rest build the listed layers.
    pub layers: Vec<LayerTemplate>,
    pub probability: f64,
    /// Set when both footprints are equal; the parents are then always swapped
    /// before the template is applied.
    pub symmetrical: bool,
}

impl SpecialMutation {
    pub fn new(
        mother: PatternFootprint,
        father: PatternFootprint,
        layers: Vec<LayerTemplate>,
        probability: f64,
    ) -> Self {
        let symmetrical = mother == father;
        Self {
            mother,
            father,
            layers,
            probability,
            symmetrical,
        }
    }

    /// Whether `a` fits the mother footprint and `b` the father footprint.
    pub fn applicable(&self, a: &Pattern, b: &Pattern) -> bool {
        if a.layers.len() + 1 != self.mother.len() || b.layers.len() + 1 != self.father.len() {
            return false;
        }

        let mut colors = vec![a.base.palette_index, b.base.palette_index];
        colors.extend(a.layers.iter().filter_map(Layer::palette_index));
        colors.extend(b.layers.iter().filter_map(Layer::palette_index));

        let colors = colors.as_slice();
        self.mother.matches(a, Some(b), Some(colors)) && self.father.matches(b, Some(a), Some(colors))
    }

    /// Roll for this recipe. Consumes one draw unless `force` is set.
    pub fn mutates(&self, a: &Pattern, b: &Pattern, force: bool, random: &mut Randomizer) -> bool {
        if !force && random.next_float() > self.probability {
            return false;
        }
        self.applicable(a, b) || self.applicable(b, a)
    }

    /// Build the child pattern. Parents are swapped first when the recipe is
    /// symmetrical or only fits the other way round.
    pub fn apply(
        &self,
        a: &Pattern,
        b: &Pattern,
        shape_body: LayerShapeBody,
        shape_fin: LayerShapeFin,
        samplers: &MixSamplers,
        random: &mut Randomizer,
    ) -> Pattern {
        let (mother, father) = if self.symmetrical || !self.applicable(a, b) {
            (b, a)
        } else {
            (a, b)
        };

        let mut base = mother.base;
        let mut layers = Vec::with_capacity(self.layers.len().saturating_sub(1));

        for (position, template) in self.layers.iter().enumerate() {
            let made = build_layer(template, position, mother, father, samplers, random);
            match (position, made) {
                (0, Some(Layer::Base(layer))) => base = layer,
                (0, _) => tracing::warn!("mutation template did not produce a base, keeping the mother's"),
                (_, Some(layer)) if layer.id().is_listed() => layers.push(layer),
                (_, made) => tracing::warn!(
                    position = position,
                    layer = ?made.map(|l| l.id()),
                    "mutation template produced no listed layer"
                ),
            }
        }

        Pattern::new(base, layers, shape_body, shape_fin)
    }
}

fn resolve_palette(reference: PaletteRef, position: usize, mother: &Pattern, father: &Pattern) -> Option<PaletteIndex> {
    let relative = |parent: &Pattern, delta: i8| {
        let at = position.checked_add_signed(isize::from(delta))?;
        parent.layer_at(at)?.palette_index()
    };
    match reference {
        PaletteRef::Absolute(index) => Some(index),
        PaletteRef::Mother(delta) => relative(mother, delta),
        PaletteRef::Father(delta) => relative(father, delta),
    }
}

fn build_layer(
    template: &LayerTemplate,
    position: usize,
    mother: &Pattern,
    father: &Pattern,
    samplers: &MixSamplers,
    random: &mut Randomizer,
) -> Option<Layer> {
    match template {
        LayerTemplate::Mother => mother.layer_at(position),
        LayerTemplate::Father => father.layer_at(position),
        LayerTemplate::Mix => match (mother.layer_at(position), father.layer_at(position)) {
            (Some(m), Some(f)) => mix_layers(&m, &f, samplers, random).or(Some(m)),
            (m, f) => m.or(f),
        },
        LayerTemplate::Spawn { layer, palette } => {
            let mut spawned = layer.clone();
            let resolved = resolve_palette(*palette, position, mother, father);
            if let (Some(slot), Some(color)) = (spawned.palette_index_mut(), resolved) {
                *slot = color;
            }
            Some(spawned)
        }
    }
}

/// Ordered list of recipes. The first one that triggers wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationCatalog {
    mutations: Vec<SpecialMutation>,
}

impl MutationCatalog {
    pub fn new(mutations: Vec<SpecialMutation>) -> Self {
        Self { mutations }
    }

    /// The recipes the game ships with.
    pub fn builtin() -> Self {
        tracing::debug!("creating builtin mutation catalog");
        let white_base = PatternFootprint::new(vec![LayerFootprint::new(
            LayerId::Base,
            PaletteMatch::Exact(WHITE),
        )]);
        let gold_base = PatternFootprint::new(vec![LayerFootprint::new(
            LayerId::Base,
            PaletteMatch::Exact(GOLD),
        )]);

        let gold_spots = Layer::Spots(LayerSpots {
            plane: Plane::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
            palette_index: GOLD,
            scale: 128,
            stretch: 128,
            threshold: 140,
            x_focus: 128,
            y_focus: 128,
            power: 100,
        });

        Self::new(vec![SpecialMutation::new(
            white_base,
            gold_base,
            vec![
                LayerTemplate::Spawn {
                    layer: Layer::Base(LayerBase {
                        palette_index: WHITE,
                        sample: PaletteSample::new(32, 32),
                    }),
                    palette: PaletteRef::Absolute(WHITE),
                },
                LayerTemplate::Spawn {
                    layer: gold_spots,
                    palette: PaletteRef::Absolute(GOLD),
                },
            ],
            0.1,
        )])
    }

    pub fn mutations(&self) -> &[SpecialMutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Offer a parent pair to each recipe in order; return the first that triggers.
    pub fn roll(&self, a: &Pattern, b: &Pattern, random: &mut Randomizer) -> Option<(usize, &SpecialMutation)> {
        self.mutations
            .iter()
            .enumerate()
            .find(|(_, mutation)| mutation.mutates(a, b, false, random))
    }
}
