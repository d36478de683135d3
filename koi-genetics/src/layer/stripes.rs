use koi_core::palette::decode_palette_index;
use koi_core::{normalized, BinBuffer, CodecError, Decode, Encode, PaletteIndex, Plane, Sampler, Trait};
use serde::{Deserialize, Serialize};

const SAMPLER_SCALE: Sampler = Sampler::plateau(2.8, 4.3, 8.5, 0.9);
const SAMPLER_DISTORTION: Sampler = Sampler::plateau(3.0, 7.0, 12.0, 0.5);
const SAMPLER_ROUGHNESS: Sampler = Sampler::linear(2.0, 0.3);
const SAMPLER_THRESHOLD: Sampler = Sampler::sigmoid(0.4, 0.6, 0.1);
const SAMPLER_SLANT: Sampler = Sampler::power(0.0, 1.6, 1.2);
const SAMPLER_SUPPRESSION: Sampler = Sampler::power(0.3, 2.0, 1.0);
const SAMPLER_FOCUS: Sampler = Sampler::plateau(0.0, 0.3, 1.0, 1.0);
const SAMPLER_POWER: Sampler = Sampler::power(0.4, 0.6, 10.0);

/// Bands across the body, distorted by noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerStripes {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    pub scale: Trait,
    pub distortion: Trait,
    pub roughness: Trait,
    pub threshold: Trait,
    pub slant: Trait,
    pub suppression: Trait,
    pub focus: Trait,
    pub power: Trait,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripesParameters {
    pub scale: f64,
    pub distortion: f64,
    pub roughness: f64,
    pub threshold: f64,
    pub slant: f64,
    pub suppression: f64,
    pub focus: f64,
    pub power: f64,
}

impl LayerStripes {
    pub fn parameters(&self) -> StripesParameters {
        StripesParameters {
            scale: SAMPLER_SCALE.sample(normalized(self.scale)),
            distortion: SAMPLER_DISTORTION.sample(normalized(self.distortion)),
            roughness: SAMPLER_ROUGHNESS.sample(normalized(self.roughness)),
            threshold: SAMPLER_THRESHOLD.sample(normalized(self.threshold)),
            slant: SAMPLER_SLANT.sample(normalized(self.slant)),
            suppression: SAMPLER_SUPPRESSION.sample(normalized(self.suppression)),
            focus: SAMPLER_FOCUS.sample(normalized(self.focus)),
            power: SAMPLER_POWER.sample(normalized(self.power)),
        }
    }
}

impl Encode for LayerStripes {
    fn encode(&self, buffer: &mut BinBuffer) {
        self.plane.encode(buffer);
        buffer.write_u8(self.palette_index);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.distortion);
        buffer.write_u8(self.roughness);
        buffer.write_u8(self.threshold);
        buffer.write_u8(self.slant);
        buffer.write_u8(self.suppression);
        buffer.write_u8(self.focus);
        buffer.write_u8(self.power);
    }
}

impl Decode for LayerStripes {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            plane: Plane::decode(buffer)?,
            palette_index: decode_palette_index(buffer, "stripes.palette_index")?,
            scale: buffer.read_u8()?,
            distortion: buffer.read_u8()?,
            roughness: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
            slant: buffer.read_u8()?,
            suppression: buffer.read_u8()?,
            focus: buffer.read_u8()?,
            power: buffer.read_u8()?,
        })
    }
}
