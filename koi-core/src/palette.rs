//! Koi palette indices and toroidal palette samples.

use serde::{Deserialize, Serialize};

use crate::codec::{ensure_within, BinBuffer, CodecError, Decode, Encode};

/// One of the six koi colors.
pub type PaletteIndex = u8;

pub const WHITE: PaletteIndex = 0;
pub const BLACK: PaletteIndex = 1;
pub const GOLD: PaletteIndex = 2;
pub const ORANGE: PaletteIndex = 3;
pub const RED: PaletteIndex = 4;
pub const BROWN: PaletteIndex = 5;

pub const PALETTE_COUNT: usize = 6;

/// Read a palette index, rejecting anything that is not a koi color.
pub fn decode_palette_index(buffer: &mut BinBuffer, field: &'static str) -> Result<PaletteIndex, CodecError> {
    let index = buffer.read_u8()?;
    ensure_within(field, f64::from(index), 0.0, (PALETTE_COUNT - 1) as f64)?;
    Ok(index)
}

/// A coordinate on the 256x256 palette texture. The grid tiles in both
/// directions, so arithmetic wraps instead of clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteSample {
    pub x: u8,
    pub y: u8,
}

const GRID: i32 = 256;

impl PaletteSample {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Shift by an integer displacement and tile back into the grid.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: (i32::from(self.x) + dx).rem_euclid(GRID) as u8,
            y: (i32::from(self.y) + dy).rem_euclid(GRID) as u8,
        }
    }

    /// Blend toward `other` along the shortest path around the torus.
    pub fn interpolate(&self, other: &PaletteSample, t: f64) -> Self {
        let step = |from: u8, to: u8| {
            let delta = (i32::from(to) - i32::from(from) + GRID / 2).rem_euclid(GRID) - GRID / 2;
            (f64::from(delta) * t).round() as i32
        };
        self.offset(step(self.x, other.x), step(self.y, other.y))
    }
}

impl Encode for PaletteSample {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.x);
        buffer.write_u8(self.y);
    }
}

impl Decode for PaletteSample {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self::new(buffer.read_u8()?, buffer.read_u8()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_tiles() {
        let s = PaletteSample::new(250, 3);
        assert_eq!(s.offset(10, -5), PaletteSample::new(4, 254));
        assert_eq!(s.offset(-512, 512), s);
    }

    #[test]
    fn test_interpolate_takes_short_way_round() {
        let a = PaletteSample::new(250, 10);
        let b = PaletteSample::new(4, 10);
        // 250 -> 4 is 10 steps forward across the seam, not 246 back.
        assert_eq!(a.interpolate(&b, 0.5), PaletteSample::new(255, 10));
        assert_eq!(a.interpolate(&b, 1.0), b);
        assert_eq!(a.interpolate(&b, 0.0), a);
    }

    #[test]
    fn test_decode_palette_index_bounds() {
        let mut ok = BinBuffer::from_bytes(vec![BROWN]);
        assert_eq!(decode_palette_index(&mut ok, "palette").unwrap(), BROWN);

        let mut bad = BinBuffer::from_bytes(vec![6]);
        assert!(decode_palette_index(&mut bad, "palette").is_err());
    }
}
