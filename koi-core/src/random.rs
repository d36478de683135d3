//! Deterministic pseudo-random stream.
//!
//! A 32-bit linear congruential generator: `n <- 69069 * n + 1 (mod 2^32)`.
//! It is not meant to be unpredictable, only reproducible: the same seed always
//! replays the same breeding outcomes, and the whole state fits in one u32 of save data.

use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::codec::{BinBuffer, CodecError, Decode, Encode};

const MULTIPLIER: u32 = 69069;
const INCREMENT: u32 = 1;
const MODULUS: f64 = 4_294_967_296.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Randomizer {
    state: u32,
}

impl Randomizer {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// The current state. Feeding it back into `new` resumes the stream.
    pub fn state(&self) -> u32 {
        self.state
    }

    fn advance(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    /// Next uniform variate in [0, 1).
    pub fn next_float(&mut self) -> f64 {
        f64::from(self.advance()) / MODULUS
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(0)
    }
}

// Lets rand's distributions and slice helpers draw from the same replayable stream.
impl RngCore for Randomizer {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.advance());
        let high = u64::from(self.advance());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Randomizer {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

impl Encode for Randomizer {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u32(self.state);
    }
}

impl Decode for Randomizer {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self::new(buffer.read_u32()?))
    }
}
