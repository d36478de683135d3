//! Noise planes: where a pattern layer cuts through 3D noise space.
//!
//! Invariants:
//! - anchor components stay within [-SPACE_LIMIT, SPACE_LIMIT]
//! - direction is unit length

use serde::{Deserialize, Serialize};

use crate::codec::{ensure_within, BinBuffer, CodecError, Decode, Encode};
use crate::vector::Vector3;

/// Half the edge of the cube anchors live in.
pub const SPACE_LIMIT: f32 = 256.0;

/// How far a decoded direction may stray from unit length.
const NORMAL_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub anchor: Vector3,
    pub direction: Vector3,
}

impl Plane {
    /// Build a plane, clamping the anchor and normalizing the direction.
    /// A degenerate direction falls back to +X.
    pub fn new(anchor: Vector3, direction: Vector3) -> Self {
        let mut plane = Self {
            anchor,
            direction: direction.normalized().unwrap_or(Vector3::UNIT_X),
        };
        plane.clamp_anchor();
        plane
    }

    /// Blend toward `other`. Anchors interpolate linearly, directions are
    /// interpolated and renormalized; if they cancel out, this plane's direction is kept.
    pub fn interpolate(&self, other: &Plane, t: f64) -> Plane {
        let t = t as f32;
        let direction = self
            .direction
            .interpolate(&other.direction, t)
            .normalized()
            .unwrap_or(self.direction);

        let mut plane = Plane {
            anchor: self.anchor.interpolate(&other.anchor, t),
            direction,
        };
        plane.clamp_anchor();
        plane
    }

    pub fn clamp_anchor(&mut self) {
        self.anchor.x = self.anchor.x.clamp(-SPACE_LIMIT, SPACE_LIMIT);
        self.anchor.y = self.anchor.y.clamp(-SPACE_LIMIT, SPACE_LIMIT);
        self.anchor.z = self.anchor.z.clamp(-SPACE_LIMIT, SPACE_LIMIT);
    }
}

impl Encode for Plane {
    fn encode(&self, buffer: &mut BinBuffer) {
        self.anchor.encode(buffer);
        self.direction.encode(buffer);
    }
}

impl Decode for Plane {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        let anchor = Vector3::decode(buffer)?;
        let direction = Vector3::decode(buffer)?;

        let limit = f64::from(SPACE_LIMIT);
        ensure_within("plane.anchor.x", f64::from(anchor.x), -limit, limit)?;
        ensure_within("plane.anchor.y", f64::from(anchor.y), -limit, limit)?;
        ensure_within("plane.anchor.z", f64::from(anchor.z), -limit, limit)?;

        let length = f64::from(direction.length());
        if !((length - 1.0).abs() <= NORMAL_TOLERANCE) {
            tracing::error!(length = length, "plane direction is not normalized");
            return Err(CodecError::NotNormalized {
                field: "plane.direction",
                length,
            });
        }

        Ok(Self { anchor, direction })
    }
}
