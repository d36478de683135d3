//! koi-core: numeric and binary primitives shared by the koi genetics engine.
//!
//! Design rules:
//! - Randomness is an explicit, seedable stream. Nothing here reaches for ambient entropy.
//! - Samplers are pure curves over [0, 1].
//! - Every value that lands in a save file has a symmetric Encode/Decode pair,
//!   and decoding rejects anything outside its documented domain.
//! - Trait values are 8-bit and saturate, they never wrap.

pub mod codec;
pub mod gene;
pub mod palette;
pub mod plane;
pub mod random;
pub mod sampler;
pub mod state;
pub mod vector;

pub use codec::{BinBuffer, CodecError, Decode, Encode};
pub use gene::{as_trait, normalized, Trait, TRAIT_MAX};
pub use palette::{PaletteIndex, PaletteSample, PALETTE_COUNT};
pub use plane::{Plane, SPACE_LIMIT};
pub use random::Randomizer;
pub use sampler::Sampler;
pub use state::{PathPosition, WeatherKind, WeatherState};
pub use vector::{Vector2, Vector3};
