//! Small f32 vectors for headings, positions and plane geometry.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::codec::{BinBuffer, CodecError, Decode, Encode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos() as f32, angle.sin() as f32)
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Encode for Vector2 {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_f32(self.x);
        buffer.write_f32(self.y);
    }
}

impl Decode for Vector2 {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self::new(buffer.read_f32()?, buffer.read_f32()?))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const UNIT_X: Vector3 = Vector3::new(1.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point on the unit sphere from two uniform variates, evenly spread over the surface.
    pub fn from_sphere(u: f64, v: f64) -> Self {
        let latitude = (2.0 * u - 1.0).acos() - std::f64::consts::FRAC_PI_2;
        let longitude = 2.0 * std::f64::consts::PI * v;
        Self::new(
            (latitude.cos() * longitude.cos()) as f32,
            latitude.sin() as f32,
            (latitude.cos() * longitude.sin()) as f32,
        )
    }

    pub fn dot(&self, other: &Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy, or `None` when the vector is too short to have a direction.
    pub fn normalized(&self) -> Option<Vector3> {
        let length = self.length();
        if !length.is_finite() || length < f32::EPSILON {
            return None;
        }
        Some(*self * (1.0 / length))
    }

    pub fn interpolate(&self, other: &Vector3, t: f32) -> Vector3 {
        *self + (*other - *self) * t
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Encode for Vector3 {
    fn encode(&self, buffer: &mut BinBuffer) {
        buffer.write_f32(self.x);
        buffer.write_f32(self.y);
        buffer.write_f32(self.z);
    }
}

impl Decode for Vector3 {
    fn decode(buffer: &mut BinBuffer) -> Result<Self, CodecError> {
        Ok(Self::new(buffer.read_f32()?, buffer.read_f32()?, buffer.read_f32()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_points_are_unit() {
        for (u, v) in [(0.0, 0.0), (0.3, 0.9), (0.5, 0.5), (0.999, 0.1)] {
            let p = Vector3::from_sphere(u, v);
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_normalize_zero_is_none() {
        assert!(Vector3::default().normalized().is_none());
        let n = Vector3::new(3.0, 0.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_angle() {
        let v = Vector2::from_angle(std::f64::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert!((v.length() - 1.0).abs() < 1e-6);
    }
}
