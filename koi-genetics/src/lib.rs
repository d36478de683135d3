//! koi-genetics: heritable koi patterns, breeding and mutation.
//!
//! Design rules:
//! - A pattern is a base, an ordered list of pattern layers and two shape layers.
//! - Breeding is deterministic: same parents, same config, same randomizer state,
//!   same brood.
//! - Every tunable constant lives in `GeneticsConfig`; nothing reads globals.
//! - Saved fish are validated field by field on load.

pub mod album;
pub mod breeder;
pub mod catalog;
pub mod config;
pub mod fish;
pub mod footprint;
pub mod layer;
pub mod mix;
pub mod mutate;
pub mod pattern;
pub mod save;
pub mod tree;

pub use album::AlbumPage;
pub use breeder::{Breeder, Brood};
pub use catalog::{LayerTemplate, MutationCatalog, PaletteRef, SpecialMutation};
pub use config::{load_config, save_config, ConfigError, GeneticsConfig};
pub use fish::{Fin, Fins, Fish, FishBody, Tail};
pub use footprint::{LayerFootprint, PaletteMatch, PatternFootprint, PatternMatcher, Positional};
pub use layer::{Layer, LayerFlags, LayerId};
pub use mix::Mixer;
pub use mutate::Mutator;
pub use pattern::Pattern;
pub use save::{load_snapshot, save_snapshot, Snapshot};
pub use tree::{KeepAll, PaletteTree};
