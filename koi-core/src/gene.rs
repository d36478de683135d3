//! Trait values: the 8-bit quantities genes are made of.

/// A normalized parameter stored as 0..=255.
pub type Trait = u8;

pub const TRAIT_MAX: Trait = u8::MAX;

/// Round and saturate a real number into trait range. NaN maps to 0.
pub fn as_trait(n: f64) -> Trait {
    if n.is_nan() {
        return 0;
    }
    n.round().clamp(0.0, f64::from(TRAIT_MAX)) as Trait
}

/// Trait value as a fraction of its range, ready to feed a sampler.
pub fn normalized(value: Trait) -> f64 {
    f64::from(value) / f64::from(TRAIT_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_trait_saturates() {
        assert_eq!(as_trait(-3.0), 0);
        assert_eq!(as_trait(300.0), 255);
        assert_eq!(as_trait(254.6), 255);
        assert_eq!(as_trait(12.4), 12);
        assert_eq!(as_trait(f64::NAN), 0);
    }

    #[test]
    fn test_normalized_endpoints() {
        assert_eq!(normalized(0), 0.0);
        assert_eq!(normalized(255), 1.0);
    }
}
