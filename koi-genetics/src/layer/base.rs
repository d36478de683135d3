use koi_core::palette::decode_palette_index;
use koi_core::{BinBuffer, CodecError, Decode, Encode, PaletteIndex, PaletteSample};
use serde::{Deserialize, Serialize};

/// Solid body color underneath every other layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerBase {
    pub palette_index: PaletteIndex,
    /// Exact shade within the palette texture.
    pub sample: PaletteSample,
}

impl Encode for LayerBase {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.palette_index);
        self.sample.encode(buffer);
    }
}

impl Decode for LayerBase {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            palette_index: decode_palette_index(buffer, "base.palette_index")?,
            sample: PaletteSample::decode(buffer)?,
        })
    }
}
