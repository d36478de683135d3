use koi_core::palette::decode_palette_index;
use koi_core::{normalized, BinBuffer, CodecError, Decode, Encode, PaletteIndex, Plane, Sampler, Trait};
use serde::{Deserialize, Serialize};

const SAMPLER_SCALE: Sampler = Sampler::plateau(0.5, 1.8, 6.0, 0.3);
const SAMPLER_STRETCH: Sampler = Sampler::plateau(0.37, 1.0, 2.5, 0.1);
const SAMPLER_THRESHOLD: Sampler = Sampler::plateau(0.25, 0.5, 0.75, 0.2);
const SAMPLER_X_FOCUS: Sampler = Sampler::plateau(0.0, 0.4, 1.0, 0.2);
const SAMPLER_Y_FOCUS: Sampler = Sampler::plateau(0.0, 0.5, 1.0, 1.0);
const SAMPLER_POWER: Sampler = Sampler::power(0.0, 1.0, 2.0);

/// Blotches cut from 3D noise, strongest around a focus point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpots {
    pub plane: Plane,
    pub palette_index: PaletteIndex,
    pub scale: Trait,
    pub stretch: Trait,
    pub threshold: Trait,
    pub x_focus: Trait,
    pub y_focus: Trait,
    pub power: Trait,
}

/// Render-ready values derived from a spots layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotsParameters {
    pub scale: f64,
    pub stretch: f64,
    pub threshold: f64,
    pub focus: (f64, f64),
    pub power: f64,
}

impl LayerSpots {
    pub fn parameters(&self) -> SpotsParameters {
        SpotsParameters {
            scale: SAMPLER_SCALE.sample(normalized(self.scale)),
            stretch: SAMPLER_STRETCH.sample(normalized(self.stretch)),
            threshold: SAMPLER_THRESHOLD.sample(normalized(self.threshold)),
            focus: (
                SAMPLER_X_FOCUS.sample(normalized(self.x_focus)),
                SAMPLER_Y_FOCUS.sample(normalized(self.y_focus)),
            ),
            power: SAMPLER_POWER.sample(normalized(self.power)),
        }
    }
}

impl Encode for LayerSpots {
    fn encode(&self, buffer: &mut BinBuffer) {
        self.plane.encode(buffer);
        buffer.write_u8(self.palette_index);
        buffer.write_u8(self.scale);
        buffer.write_u8(self.stretch);
        buffer.write_u8(self.threshold);
        buffer.write_u8(self.x_focus);
        buffer.write_u8(self.y_focus);
        buffer.write_u8(self.power);
    }
}

impl Decode for LayerSpots {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            plane: Plane::decode(buffer)?,
            palette_index: decode_palette_index(buffer, "spots.palette_index")?,
            scale: buffer.read_u8()?,
            stretch: buffer.read_u8()?,
            threshold: buffer.read_u8()?,
            x_focus: buffer.read_u8()?,
            y_focus: buffer.read_u8()?,
            power: buffer.read_u8()?,
        })
    }
}
