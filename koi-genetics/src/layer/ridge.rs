use koi_core::palette::decode_palette_index;
use koi_core::{normalized, BinBuffer, CodecError, Decode, Encode, PaletteIndex, Plane, Sampler, Trait};
use serde::{Deserialize, Serialize};

const SAMPLER_SCALE: Sampler = Sampler::plateau(1.8, 4.0, 5.5, 0.7);
const SAMPLER_POWER: Sampler = Sampler::plateau(0.73, 2.15, 3.5, 0.5);
const SAMPLER_THRESHOLD: Sampler = Sampler::plateau(0.3, 0.5, 0.7, 0.4);
const SAMPLER_FOCUS: Sampler = Sampler::plateau(0.0, 0.5, 1.0, 0.6);
const SAMPLER_FOCUS_POWER: Sampler = Sampler::power(0.4, 0.6, 1.0);

/// Markings along the spine. Recessive: loses slot fights against any non-recessive layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerRidge {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    pub scale: Trait,
    pub power: Trait,
    pub threshold: Trait,
    pub focus: Trait,
    pub focus_power: Trait,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeParameters {
    pub scale: f64,
    pub power: f64,
    pub threshold: f64,
    pub focus: f64,
    pub focus_power: f64,
}

impl LayerRidge {
    pub fn parameters(&self) -> RidgeParameters {
        RidgeParameters {
            scale: SAMPLER_SCALE.sample(normalized(self.scale)),
            power: SAMPLER_POWER.sample(normalized(self.power)),
            threshold: SAMPLER_THRESHOLD.sample(normalized(self.threshold)),
            focus: SAMPLER_FOCUS.sample(normalized(self.focus)),
            focus_power: SAMPLER_FOCUS_POWER.sample(normalized(self.focus_power)),
        }
    }
}

impl Encode for LayerRidge {
    fn encode(&self, buffer: &mut BinBuffer) {
        self.plane.encode(buffer);
        buffer.write_u8(self.palette_index);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.power);
        buffer.write_u8(self.threshold);
        buffer.write_u8(self.focus);
        buffer.write_u8(self.focus_power);
    }
}

impl Decode for LayerRidge {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            plane: Plane::decode(buffer)?,
            palette_index: decode_palette_index(buffer, "ridge.palette_index")?,
            scale: buffer.read_u8()?,
            power: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
            focus: buffer.read_u8()?,
            focus_power: buffer.read_u8()?,
        })
    }
}
