//! Tunable constants for breeding and mutation.
//!
//! Everything here is plain data so a tuning pass can be saved as JSON, diffed
//! and reloaded. `Default` carries the tuned values the game ships with.

use anyhow::Context;
use koi_core::{Sampler, PALETTE_COUNT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Layer-list structure changes during pattern mixing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedingConfig {
    /// Chance that a parent's first listed layer is skipped outright.
    pub skip_first_layer_chance: f64,
    /// Chance that a layer left over after the other parent ran out is kept.
    pub unmatched_keep_chance: f64,
    /// Chance that a cursor jumps two layers after a same-kind blend.
    pub double_advance_chance: f64,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            skip_first_layer_chance: 0.02,
            unmatched_keep_chance: 0.5,
            double_advance_chance: 0.06,
        }
    }
}

/// Rows: current color, columns: chance of becoming each color.
/// Order is white, black, gold, orange, red, brown.
pub type PaletteTransitions = [[f64; PALETTE_COUNT]; PALETTE_COUNT];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Chance that a listed layer disappears during mutation.
    pub layer_removal_chance: f64,
    pub palette_transitions: PaletteTransitions,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            layer_removal_chance: 0.04,
            palette_transitions: [
                [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 0.9, 0.1, 0.0, 0.0],
                [0.0, 0.0, 0.07, 0.87, 0.06, 0.0],
                [0.0, 0.0, 0.0, 0.06, 0.94, 0.0],
                [0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

/// Per-field heritability curves. Steeper sigmoids make children take after one
/// parent instead of landing between both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixSamplers {
    pub base: BaseMixSamplers,
    pub spots: SpotsMixSamplers,
    pub stripes: StripesMixSamplers,
    pub ridge: RidgeMixSamplers,
    pub web: WebMixSamplers,
    pub shape_body: Sampler,
    pub shape_fin: Sampler,
    pub body: BodyMixSamplers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMixSamplers {
    pub sample: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotsMixSamplers {
    pub blend_sample: Sampler,
    pub blend_palette: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripesMixSamplers {
    pub palette: Sampler,
    pub scale: Sampler,
    pub distortion: Sampler,
    pub roughness: Sampler,
    pub threshold: Sampler,
    pub slant: Sampler,
    pub suppression: Sampler,
    pub focus: Sampler,
    pub power: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeMixSamplers {
    pub palette: Sampler,
    pub scale: Sampler,
    pub power: Sampler,
    pub threshold: Sampler,
    pub focus: Sampler,
    pub focus_power: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebMixSamplers {
    pub plane: Sampler,
    pub scale: Sampler,
    pub thickness: Sampler,
    pub threshold: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMixSamplers {
    pub length: Sampler,
    pub radius: Sampler,
    pub growth_speed: Sampler,
    pub mating_frequency: Sampler,
    pub offspring_count: Sampler,
    pub fin: Sampler,
    pub tail: Sampler,
}

impl Default for MixSamplers {
    fn default() -> Self {
        let body_ordered = Sampler::plateau(0.0, 0.4, 1.0, 0.5);
        Self {
            base: BaseMixSamplers {
                sample: Sampler::sigmoid(0.0, 1.0, 33.0),
            },
            spots: SpotsMixSamplers {
                blend_sample: Sampler::sigmoid(0.0, 1.0, 33.0),
                blend_palette: Sampler::sigmoid(0.0, 1.0, 15.0),
            },
            stripes: StripesMixSamplers {
                palette: Sampler::sigmoid(0.0, 1.0, 15.0),
                scale: Sampler::sigmoid(0.0, 1.0, 6.0),
                distortion: Sampler::sigmoid(0.0, 1.0, 5.0),
                roughness: Sampler::sigmoid(0.0, 1.0, 3.0),
                threshold: Sampler::sigmoid(0.0, 1.0, 9.0),
                slant: Sampler::sigmoid(0.0, 1.0, 6.0),
                suppression: Sampler::sigmoid(0.0, 1.0, 10.0),
                focus: Sampler::sigmoid(0.0, 1.0, 6.0),
                power: Sampler::sigmoid(0.0, 1.0, 8.0),
            },
            ridge: RidgeMixSamplers {
                palette: Sampler::sigmoid(0.0, 1.0, 15.0),
                scale: Sampler::sigmoid(0.0, 1.0, 6.0),
                power: Sampler::sigmoid(0.0, 1.0, 5.0),
                threshold: Sampler::sigmoid(0.0, 1.0, 9.0),
                focus: Sampler::sigmoid(0.0, 1.0, 6.0),
                focus_power: Sampler::sigmoid(0.0, 1.0, 5.0),
            },
            web: WebMixSamplers {
                plane: Sampler::sigmoid(0.0, 1.0, 15.0),
                scale: Sampler::sigmoid(0.0, 1.0, 5.0),
                thickness: Sampler::sigmoid(0.0, 1.0, 6.0),
                threshold: Sampler::sigmoid(0.0, 1.0, 3.0),
            },
            shape_body: Sampler::sigmoid(0.0, 1.0, 4.0),
            shape_fin: Sampler::sigmoid(0.0, 1.0, 4.0),
            body: BodyMixSamplers {
                length: body_ordered,
                radius: body_ordered,
                growth_speed: Sampler::sigmoid(0.0, 1.0, 2.0),
                mating_frequency: Sampler::plateau(0.0, 0.5, 1.0, 1.0),
                offspring_count: Sampler::plateau(0.0, 0.5, 1.0, 1.0),
                fin: Sampler::sigmoid(0.0, 1.0, 3.0),
                tail: Sampler::sigmoid(0.0, 1.0, 3.0),
            },
        }
    }
}

/// Drift applied to anchors and directions of noise planes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneMutationSamplers {
    pub anchor_distance: Sampler,
    pub direction_distance: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationSamplers {
    pub base: BaseMutationSamplers,
    pub spots: SpotsMutationSamplers,
    pub stripes: StripesMutationSamplers,
    pub ridge: RidgeMutationSamplers,
    pub web: WebMutationSamplers,
    pub shape_body: ShapeBodyMutationSamplers,
    pub shape_fin: ShapeFinMutationSamplers,
    pub body: BodyMutationSamplers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMutationSamplers {
    pub sample_distance: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotsMutationSamplers {
    pub plane: PlaneMutationSamplers,
    pub scale: Sampler,
    pub threshold: Sampler,
    pub stretch: Sampler,
    pub x_focus: Sampler,
    pub y_focus: Sampler,
    pub power: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripesMutationSamplers {
    pub plane: PlaneMutationSamplers,
    pub scale: Sampler,
    pub threshold: Sampler,
    pub slant: Sampler,
    pub roughness: Sampler,
    pub distortion: Sampler,
    pub suppression: Sampler,
    pub focus: Sampler,
    pub power: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeMutationSamplers {
    pub plane: PlaneMutationSamplers,
    pub scale: Sampler,
    pub power: Sampler,
    pub threshold: Sampler,
    pub focus: Sampler,
    pub focus_power: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebMutationSamplers {
    pub plane: PlaneMutationSamplers,
    pub scale: Sampler,
    pub thickness: Sampler,
    pub threshold: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBodyMutationSamplers {
    pub center_power: Sampler,
    pub radius_power: Sampler,
    pub eye_position: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeFinMutationSamplers {
    pub angle: Sampler,
    pub inset: Sampler,
    pub dips: Sampler,
    pub dip_power: Sampler,
    pub roundness: Sampler,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMutationSamplers {
    pub length: Sampler,
    pub radius: Sampler,
    pub growth_speed: Sampler,
    pub mating_frequency: Sampler,
    pub offspring_count: Sampler,
    pub fin_at: Sampler,
    pub fin_radius: Sampler,
    pub tail_length: Sampler,
}

impl Default for MutationSamplers {
    fn default() -> Self {
        Self {
            base: BaseMutationSamplers {
                sample_distance: Sampler::quadratic(0.0, 6.0, 2.0),
            },
            spots: SpotsMutationSamplers {
                plane: PlaneMutationSamplers {
                    anchor_distance: Sampler::quadratic(0.0, 2.5, 5.0),
                    direction_distance: Sampler::quadratic(0.0, 2.0, 4.0),
                },
                scale: Sampler::offset(11.0, 0.6),
                threshold: Sampler::offset(20.0, 1.0),
                stretch: Sampler::offset(13.0, 0.7),
                x_focus: Sampler::offset(11.0, 0.3),
                y_focus: Sampler::offset(11.0, 0.3),
                power: Sampler::offset(10.0, 0.8),
            },
            stripes: StripesMutationSamplers {
                plane: PlaneMutationSamplers {
                    anchor_distance: Sampler::quadratic(0.0, 4.0, 5.0),
                    direction_distance: Sampler::quadratic(0.0, 0.6, 4.0),
                },
                scale: Sampler::offset(14.0, 0.3),
                threshold: Sampler::offset(12.0, 0.4),
                slant: Sampler::offset(10.0, 0.2),
                roughness: Sampler::offset(11.0, 0.8),
                distortion: Sampler::offset(11.0, 0.1),
                suppression: Sampler::offset(13.0, 0.7),
                focus: Sampler::offset(12.0, 0.8),
                power: Sampler::offset(13.0, 0.8),
            },
            ridge: RidgeMutationSamplers {
                plane: PlaneMutationSamplers {
                    anchor_distance: Sampler::quadratic(0.0, 3.0, 4.0),
                    direction_distance: Sampler::quadratic(0.0, 0.6, 4.0),
                },
                scale: Sampler::offset(11.0, 0.5),
                power: Sampler::offset(10.0, 0.8),
                threshold: Sampler::offset(14.0, 0.8),
                focus: Sampler::offset(13.0, 0.9),
                focus_power: Sampler::offset(12.0, 0.5),
            },
            web: WebMutationSamplers {
                plane: PlaneMutationSamplers {
                    anchor_distance: Sampler::quadratic(0.0, 4.0, 4.0),
                    direction_distance: Sampler::quadratic(0.0, 3.0, 4.0),
                },
                scale: Sampler::offset(11.0, 0.5),
                thickness: Sampler::offset(25.0, 1.1),
                threshold: Sampler::offset(14.0, 1.0),
            },
            shape_body: ShapeBodyMutationSamplers {
                center_power: Sampler::offset(8.0, 0.8),
                radius_power: Sampler::offset(8.0, 0.8),
                eye_position: Sampler::offset(5.0, 0.5),
            },
            shape_fin: ShapeFinMutationSamplers {
                angle: Sampler::offset(8.0, 0.8),
                inset: Sampler::offset(8.0, 0.8),
                dips: Sampler::offset(6.0, 0.5),
                dip_power: Sampler::offset(8.0, 0.8),
                roundness: Sampler::offset(8.0, 0.8),
            },
            body: BodyMutationSamplers {
                length: Sampler::offset(15.0, 1.5),
                radius: Sampler::offset(15.0, 1.0),
                growth_speed: Sampler::offset(3.0, 1.5),
                mating_frequency: Sampler::offset(5.0, 0.5),
                offspring_count: Sampler::offset(15.0, 1.0),
                fin_at: Sampler::offset(10.0, 0.5),
                fin_radius: Sampler::offset(11.0, 0.8),
                tail_length: Sampler::offset(10.0, 0.8),
            },
        }
    }
}

/// Everything breeding and mutation read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneticsConfig {
    pub breeding: BreedingConfig,
    pub mutation: MutationConfig,
    pub mix: MixSamplers,
    pub mutate: MutationSamplers,
}

impl GeneticsConfig {
    /// Tuned values, but layer lists never gain skips, double steps or removals.
    /// Useful for controlled breeding experiments.
    pub fn stable_structure() -> Self {
        tracing::debug!("creating stable-structure genetics preset");
        Self {
            breeding: BreedingConfig {
                skip_first_layer_chance: 0.0,
                double_advance_chance: 0.0,
                ..BreedingConfig::default()
            },
            mutation: MutationConfig {
                layer_removal_chance: 0.0,
                ..MutationConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("breeding.skip_first_layer_chance", self.breeding.skip_first_layer_chance),
            ("breeding.unmatched_keep_chance", self.breeding.unmatched_keep_chance),
            ("breeding.double_advance_chance", self.breeding.double_advance_chance),
            ("mutation.layer_removal_chance", self.mutation.layer_removal_chance),
        ];

        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                tracing::error!(field = name, value = value, "probability out of range [0.0, 1.0]");
                return Err(ConfigError::InvalidProbability {
                    field: name.to_string(),
                    value,
                });
            }
        }

        for (row, chances) in self.mutation.palette_transitions.iter().enumerate() {
            let sum: f64 = chances.iter().sum();
            let negative = chances.iter().any(|chance| !(*chance >= 0.0));
            if negative || sum > 1.0 + 1e-9 {
                tracing::error!(row = row, sum = sum, "palette transition row is not a distribution");
                return Err(ConfigError::InvalidTransitionRow { row, sum });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a probability in [0.0, 1.0], got {value}")]
    InvalidProbability { field: String, value: f64 },

    #[error("palette transition row {row} is not a distribution (sum {sum})")]
    InvalidTransitionRow { row: usize, sum: f64 },
}

/// Save a config as pretty JSON.
pub fn save_config(path: impl AsRef<Path>, config: &GeneticsConfig) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(config).context("serialize genetics config to json")?;
    fs::write(path, json).with_context(|| format!("write config file: {}", path.display()))?;
    Ok(())
}

/// Load and validate a config.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<GeneticsConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: GeneticsConfig = serde_json::from_str(&data).context("parse genetics config json")?;
    config
        .validate()
        .with_context(|| format!("validate config file: {}", path.display()))?;
    Ok(config)
}
