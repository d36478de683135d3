use koi_core::{normalized, BinBuffer, CodecError, Decode, Encode, Sampler, Trait};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const SAMPLER_CENTER_POWER: Sampler = Sampler::plateau(0.5, 0.6, 1.0, 1.2);
const SAMPLER_RADIUS_POWER: Sampler = Sampler::plateau(0.6, 0.7, 1.2, 0.7);
const SAMPLER_EYE_POSITION: Sampler = Sampler::linear(0.07, 0.115);

const SAMPLER_ANGLE: Sampler = Sampler::power(PI * 0.35, PI * 0.45, 0.5);
const SAMPLER_INSET: Sampler = Sampler::power(0.03, 0.17, 0.7);
const SAMPLER_DIPS: Sampler = Sampler::power(0.25, 3.0, 1.5);
const SAMPLER_DIP_POWER: Sampler = Sampler::power(0.5, 2.0, 0.7);
const SAMPLER_ROUNDNESS: Sampler = Sampler::power(0.05, 0.25, 0.6);

/// Body silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerShapeBody {
    pub center_power: Trait,
    pub radius_power: Trait,
    pub eye_position: Trait,
}

impl LayerShapeBody {
    /// Relative body thickness at `x` along the spine, 0 at the head and 1 at the tail.
    pub fn thickness(&self, x: f64) -> f64 {
        let center_power = SAMPLER_CENTER_POWER.sample(normalized(self.center_power));
        let radius_power = SAMPLER_RADIUS_POWER.sample(normalized(self.radius_power));

        (PI * (x.powf(center_power) - 0.5)).cos().max(0.0).powf(radius_power)
    }

    /// Eye location as a fraction of body length.
    pub fn eye_position(&self) -> f64 {
        SAMPLER_EYE_POSITION.sample(normalized(self.eye_position))
    }
}

impl Encode for LayerShapeBody {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.center_power);
        buffer.write_u8(self.radius_power);
        buffer.write_u8(self.eye_position);
    }
}

impl Decode for LayerShapeBody {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            center_power: buffer.read_u8()?,
            radius_power: buffer.read_u8()?,
            eye_position: buffer.read_u8()?,
        })
    }
}

/// Fin silhouette, shared by every fin of a fish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerShapeFin {
    pub angle: Trait,
    pub inset: Trait,
    pub dips: Trait,
    pub dip_power: Trait,
    pub roundness: Trait,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinParameters {
    pub angle: f64,
    pub inset: f64,
    /// Odd number of dips along the fin edge, at least 1.
    pub dips: u32,
    pub dip_power: f64,
    pub roundness: f64,
}

impl LayerShapeFin {
    pub fn parameters(&self) -> FinParameters {
        let dips = SAMPLER_DIPS.sample(normalized(self.dips)).round() as i64 * 2 - 1;
        FinParameters {
            angle: SAMPLER_ANGLE.sample(normalized(self.angle)),
            inset: SAMPLER_INSET.sample(normalized(self.inset)),
            dips: dips.max(1) as u32,
            dip_power: SAMPLER_DIP_POWER.sample(normalized(self.dip_power)),
            roundness: SAMPLER_ROUNDNESS.sample(normalized(self.roundness)),
        }
    }
}

impl Encode for LayerShapeFin {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.angle);
        buffer.write_u8(self.inset);
        buffer.write_u8(self.dips);
        buffer.write_u8(self.dip_power);
        buffer.write_u8(self.roundness);
    }
}

impl Decode for LayerShapeFin {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            angle: buffer.read_u8()?,
            inset: buffer.read_u8()?,
            dips: buffer.read_u8()?,
            dip_power: buffer.read_u8()?,
            roundness: buffer.read_u8()?,
        })
    }
}
