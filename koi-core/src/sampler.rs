//! Shaped curves mapping a uniform variate in [0, 1] onto a value range.
//!
//! Samplers are immutable and pure. Inputs outside [0, 1] are not rejected;
//! the curve formula is simply evaluated there.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sampler {
    /// Straight interpolation from `min` to `max`.
    Linear { min: f64, max: f64 },
    /// `min + (max - min) * x^power`. Powers above 1 lean toward `min`.
    Power { min: f64, max: f64, power: f64 },
    /// Same curve as `Power`, used for magnitudes such as mutation distances.
    Quadratic { min: f64, max: f64, power: f64 },
    /// S-curve around the midpoint; steep powers push results toward either end.
    Sigmoid { min: f64, max: f64, power: f64 },
    /// Centered bell with `sample(0.5) == plateau`; `width` flattens the middle.
    Plateau {
        min: f64,
        plateau: f64,
        max: f64,
        width: f64,
    },
    /// Fast initial rise, reaching `max` at x = 1.
    Inverse { min: f64, max: f64, multiplier: f64 },
}

impl Sampler {
    pub const fn linear(min: f64, max: f64) -> Self {
        Sampler::Linear { min, max }
    }

    pub const fn power(min: f64, max: f64, power: f64) -> Self {
        Sampler::Power { min, max, power }
    }

    pub const fn quadratic(min: f64, max: f64, power: f64) -> Self {
        Sampler::Quadratic { min, max, power }
    }

    pub const fn sigmoid(min: f64, max: f64, power: f64) -> Self {
        Sampler::Sigmoid { min, max, power }
    }

    pub const fn plateau(min: f64, plateau: f64, max: f64, width: f64) -> Self {
        Sampler::Plateau {
            min,
            plateau,
            max,
            width,
        }
    }

    /// A plateau centered on zero, the usual shape of a mutation offset.
    pub const fn offset(amplitude: f64, width: f64) -> Self {
        Sampler::plateau(-amplitude, 0.0, amplitude, width)
    }

    pub const fn inverse(min: f64, max: f64, multiplier: f64) -> Self {
        Sampler::Inverse {
            min,
            max,
            multiplier,
        }
    }

    pub fn sample(&self, x: f64) -> f64 {
        match *self {
            Sampler::Linear { min, max } => min + (max - min) * x,
            Sampler::Power { min, max, power } | Sampler::Quadratic { min, max, power } => {
                min + (max - min) * x.powf(power)
            }
            Sampler::Sigmoid { min, max, power } => {
                let range = max - min;
                if x < 0.5 {
                    min + range * 0.5 * (2.0 * x).powf(power)
                } else {
                    min + range * (1.0 - 0.5 * (2.0 - 2.0 * x).powf(power))
                }
            }
            Sampler::Plateau {
                min,
                plateau,
                max,
                width,
            } => {
                let range = max - min;
                if range == 0.0 {
                    return min;
                }

                let centered = x - 0.5;
                let t = 4.0 * centered * centered * centered * (1.0 - (PI * x).sin()).powf(width) + 0.5;
                let ratio = ((plateau - min) / range).clamp(0.0, 1.0);
                let exponent = ratio.ln() / 0.5f64.ln();
                min + range * t.max(0.0).powf(exponent)
            }
            Sampler::Inverse {
                min,
                max,
                multiplier,
            } => {
                let amplitude = (max - min) * (1.0 + 1.0 / multiplier);
                min + amplitude * (1.0 - 1.0 / (multiplier * x + 1.0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_linear_endpoints() {
        let s = Sampler::linear(2.0, 6.0);
        assert!(close(s.sample(0.0), 2.0));
        assert!(close(s.sample(0.25), 3.0));
        assert!(close(s.sample(1.0), 6.0));
    }

    #[test]
    fn test_power_bias() {
        let steep = Sampler::power(0.0, 1.0, 4.0);
        let shallow = Sampler::power(0.0, 1.0, 0.25);
        assert!(steep.sample(0.5) < 0.5);
        assert!(shallow.sample(0.5) > 0.5);
        assert!(close(steep.sample(1.0), 1.0));
        assert_eq!(
            Sampler::quadratic(0.0, 3.0, 2.0).sample(0.5),
            Sampler::power(0.0, 3.0, 2.0).sample(0.5)
        );
    }

    #[test]
    fn test_sigmoid_symmetry() {
        let s = Sampler::sigmoid(0.0, 1.0, 15.0);
        assert!(close(s.sample(0.5), 0.5));
        assert!(close(s.sample(0.2) + s.sample(0.8), 1.0));
        assert!(s.sample(0.3) < 0.01);
        assert!(s.sample(0.7) > 0.99);
    }

    #[test]
    fn test_plateau_hits_plateau_at_midpoint() {
        let cases = [
            (0.5, 1.8, 6.0, 0.3),
            (0.0, 0.4, 1.0, 0.5),
            (-11.0, 0.0, 11.0, 0.6),
            (1.0, 5.0, 12.0, 2.5),
            (0.1, 0.13, 0.18, 4.0),
        ];
        for (min, plateau, max, width) in cases {
            let s = Sampler::plateau(min, plateau, max, width);
            assert!(close(s.sample(0.5), plateau), "plateau {plateau}");
            assert!(close(s.sample(0.0), min));
            assert!(close(s.sample(1.0), max));
        }
    }

    #[test]
    fn test_plateau_stays_in_range() {
        let s = Sampler::offset(20.0, 1.0);
        for i in 0..=100 {
            let v = s.sample(i as f64 / 100.0);
            assert!((-20.0..=20.0).contains(&v));
        }
    }

    #[test]
    fn test_degenerate_plateau_returns_min() {
        assert_eq!(Sampler::plateau(3.0, 3.0, 3.0, 1.0).sample(0.7), 3.0);
    }

    #[test]
    fn test_inverse_reaches_max() {
        let s = Sampler::inverse(0.1, 1.0, 60.0);
        assert!(close(s.sample(0.0), 0.1));
        assert!(close(s.sample(1.0), 1.0));
        assert!(s.sample(0.1) > 0.8);
    }

    #[test]
    fn test_serde_tagged() {
        let s = Sampler::sigmoid(0.0, 1.0, 6.0);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"kind\":\"sigmoid\""));
        let back: Sampler = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
