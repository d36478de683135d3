use koi_core::palette::decode_palette_index;
use koi_core::{normalized, BinBuffer, CodecError, Decode, Encode, PaletteIndex, Plane, Sampler, Trait};
use serde::{Deserialize, Serialize};

const SAMPLER_SCALE: Sampler = Sampler::plateau(1.5, 3.0, 6.5, 1.0);
const SAMPLER_THICKNESS: Sampler = Sampler::plateau(0.1, 0.15, 0.3, 2.0);
const SAMPLER_THRESHOLD: Sampler = Sampler::plateau(0.3, 0.5, 0.7, 1.0);

/// A net of thin lines where the noise crosses a threshold band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerWeb {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    pub scale: Trait,
    pub thickness: Trait,
    pub threshold: Trait,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebParameters {
    pub scale: f64,
    pub thickness: f64,
    pub threshold: f64,
}

impl LayerWeb {
    pub fn parameters(&self) -> WebParameters {
        WebParameters {
            scale: SAMPLER_SCALE.sample(normalized(self.scale)),
            thickness: SAMPLER_THICKNESS.sample(normalized(self.thickness)),
            threshold: SAMPLER_THRESHOLD.sample(normalized(self.threshold)),
        }
    }
}

impl Encode for LayerWeb {
    fn encode(&self, buffer: &mut BinBuffer) {
        self.plane.encode(buffer);
        buffer.write_u8(self.palette_index);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.thickness);
        buffer.write_u8(self.threshold);
    }
}

impl Decode for LayerWeb {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            plane: Plane::decode(buffer)?,
            palette_index: decode_palette_index(buffer, "web.palette_index")?,
            scale: buffer.read_u8()?,
            thickness: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
        })
    }
}
