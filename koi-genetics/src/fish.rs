//! Body-level aggregates: fins, tail, fish body and the fish itself.

use koi_core::codec::ensure_within;
use koi_core::{normalized, BinBuffer, CodecError, Decode, Encode, Sampler, Trait, Vector2};
use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;

/// One fin of a mirrored pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fin {
    /// Attachment point along the spine.
    pub at: Trait,
    pub radius: Trait,
}

impl Encode for Fin {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.at);
        buffer.write_u8(self.radius);
    }
}

impl Decode for Fin {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            at: buffer.read_u8()?,
            radius: buffer.read_u8()?,
        })
    }
}

/// Between one and three fin pairs. Only one side is stored; the other mirrors it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fins {
    pairs: Vec<Fin>,
}

impl Fins {
    pub const PAIRS_MIN: usize = 1;
    pub const PAIRS_MAX: usize = 3;

    pub fn new(pairs: Vec<Fin>) -> Result<Self, CodecError> {
        ensure_within(
            "fins.pairs",
            pairs.len() as f64,
            Self::PAIRS_MIN as f64,
            Self::PAIRS_MAX as f64,
        )?;
        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[Fin] {
        &self.pairs
    }

    /// Mutable access to each fin. The pair count itself is fixed.
    pub fn pairs_mut(&mut self) -> &mut [Fin] {
        &mut self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Encode for Fins {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.pairs.len() as u8);
        for fin in &self.pairs {
            fin.encode(buffer);
        }
    }
}

impl Decode for Fins {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        let count = buffer.read_u8()?;
        ensure_within(
            "fins.pairs",
            f64::from(count),
            Self::PAIRS_MIN as f64,
            Self::PAIRS_MAX as f64,
        )?;

        let pairs = (0..count)
            .map(|_| Fin::decode(buffer))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { pairs })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tail {
    /// Share of the spine the tail fin covers.
    pub length: Trait,
}

impl Encode for Tail {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_u8(self.length);
    }
}

impl Decode for Tail {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            length: buffer.read_u8()?,
        })
    }
}

const SAMPLER_LENGTH: Sampler = Sampler::power(0.62, 1.3, 3.0);
const SAMPLER_RADIUS: Sampler = Sampler::plateau(0.1, 0.13, 0.18, 4.0);
const SAMPLER_OFFSPRING_COUNT: Sampler = Sampler::plateau(1.0, 5.0, 12.0, 2.5);
const SAMPLER_MATING_FREQUENCY: Sampler = Sampler::power(30.0, 450.0, 0.3);
const SAMPLER_GROWTH_MULTIPLIER: Sampler = Sampler::power(50.0, 100.0, 4.0);
const SIZE_MIN: f64 = 0.1;

/// Everything heritable about a fish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishBody {
    pub pattern: Pattern,
    pub fins: Fins,
    pub tail: Tail,
    pub length: Trait,
    pub radius: Trait,
    pub growth_speed: Trait,
    pub mating_frequency: Trait,
    pub offspring_count: Trait,
    /// Ticks lived. Not inherited; offspring start at zero.
    pub age: u16,
}

impl FishBody {
    /// Number of children this fish produces per breeding, when it is the mother.
    pub fn offspring_count(&self) -> usize {
        SAMPLER_OFFSPRING_COUNT
            .sample(normalized(self.offspring_count))
            .round()
            .max(0.0) as usize
    }

    /// Seconds to wait before this fish will mate again.
    pub fn mate_timeout(&self) -> f64 {
        SAMPLER_MATING_FREQUENCY.sample(normalized(self.mating_frequency))
    }

    /// Full-grown body length in meters.
    pub fn adult_length(&self) -> f64 {
        SAMPLER_LENGTH.sample(normalized(self.length))
    }

    /// Full-grown body radius in meters.
    pub fn adult_radius(&self) -> f64 {
        self.adult_length() * SAMPLER_RADIUS.sample(normalized(self.radius))
    }

    /// Current size as a fraction of adult size, growing quickly at first.
    pub fn size(&self) -> f64 {
        let multiplier = SAMPLER_GROWTH_MULTIPLIER.sample(normalized(self.growth_speed));
        Sampler::inverse(SIZE_MIN, 1.0, multiplier).sample(f64::from(self.age) / f64::from(u16::MAX))
    }
}

impl Encode for FishBody {
    fn encode(&self, buffer: &mut BinBuffer) {
        self.pattern.encode(buffer);
        self.fins.encode(buffer);
        self.tail.encode(buffer);
        buffer.write_u8(self.length);
        buffer.write_u8(self.radius);
        buffer.write_u8(self.growth_speed);
        buffer.write_u8(self.mating_frequency);
        buffer.write_u8(self.offspring_count);
        buffer.write_u16(self.age);
    }
}

impl Decode for FishBody {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self {
            pattern: Pattern::decode(buffer)?,
            fins: Fins::decode(buffer)?,
            tail: Tail::decode(buffer)?,
            length: buffer.read_u8()?,
            radius: buffer.read_u8()?,
            growth_speed: buffer.read_u8()?,
            mating_frequency: buffer.read_u8()?,
            offspring_count: buffer.read_u8()?,
            age: buffer.read_u16()?,
        })
    }
}

const HEADING_TOLERANCE: f64 = 1e-3;

/// A fish in the pond: its body plus where it is and where it faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub body: FishBody,
    pub position: Vector2,
    /// Unit heading.
    pub direction: Vector2,
}

impl Encode for Fish {
    fn encode(&self, buffer: &mut BinBuffer) {
        self.body.encode(buffer);
        self.position.encode(buffer);
        self.direction.encode(buffer);
    }
}

impl Decode for Fish {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        let body = FishBody::decode(buffer)?;
        let position = Vector2::decode(buffer)?;
        let direction = Vector2::decode(buffer)?;

        ensure_within("fish.position.x", f64::from(position.x), f64::MIN, f64::MAX)?;
        ensure_within("fish.position.y", f64::from(position.y), f64::MIN, f64::MAX)?;

        let length = f64::from(direction.length());
        if !((length - 1.0).abs() <= HEADING_TOLERANCE) {
            tracing::error!(length = length, "fish heading is not normalized");
            return Err(CodecError::NotNormalized {
                field: "fish.direction",
                length,
            });
        }

        Ok(Self {
            body,
            position,
            direction,
        })
    }
}
