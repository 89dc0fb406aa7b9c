/// Resolution of the unit draw behind closed-interval sampling (2^53).
const UNIT_STEPS: u64 = 1 << 53;

/// Generate a random `f64` in the closed range `[low, high]`.
///
/// Both endpoints have nonzero probability, and the result never exceeds
/// `high` even after rounding.
#[inline]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn f64_range_inclusive(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    let unit = rng.u64(0..=UNIT_STEPS) as f64 / UNIT_STEPS as f64;
    (low + unit * (high - low)).min(high)
}

/// A uniform draw in `(0, 1]`, safe to pass to `ln`.
#[inline]
fn open_unit(rng: &mut fastrand::Rng) -> f64 {
    1.0 - rng.f64()
}

/// Draw from a geometric distribution with success probability `p`,
/// supported on `1, 2, 3, ...` (mean `1 / p`).
///
/// Uses inversion: `floor(ln U / ln(1 - p)) + 1`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn geometric(rng: &mut fastrand::Rng, p: f64) -> i64 {
    if p >= 1.0 {
        return 1;
    }
    let trials = (open_unit(rng).ln() / (-p).ln_1p()).floor();
    // `as` saturates at `i64::MAX`; the add must saturate too.
    (trials as i64).saturating_add(1)
}

/// Draw from an exponential distribution with the given mean.
#[inline]
pub(crate) fn exponential(rng: &mut fastrand::Rng, mean: f64) -> f64 {
    -mean * open_unit(rng).ln()
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_range_inclusive_bounds() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..10_000 {
            let v = f64_range_inclusive(&mut rng, 2.0, 10.0);
            assert!((2.0..=10.0).contains(&v), "{v} outside [2, 10]");
        }
    }

    #[test]
    fn test_f64_range_inclusive_degenerate() {
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(f64_range_inclusive(&mut rng, 4.0, 4.0), 4.0);
    }

    #[test]
    fn test_geometric_support_and_mean() {
        let mut rng = fastrand::Rng::with_seed(42);
        let n = 20_000;
        let mut sum = 0i64;
        for _ in 0..n {
            let v = geometric(&mut rng, 1.0 / 6.0);
            assert!(v >= 1);
            sum += v;
        }
        let mean = sum as f64 / f64::from(n);
        assert!((mean - 6.0).abs() < 0.2, "geometric mean {mean} far from 6");
    }

    #[test]
    fn test_geometric_tiny_probability_saturates() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..1000 {
            assert!(geometric(&mut rng, 1e-30) >= 1);
        }
    }

    #[test]
    fn test_geometric_certain_success() {
        let mut rng = fastrand::Rng::with_seed(1);
        for _ in 0..100 {
            assert_eq!(geometric(&mut rng, 1.0), 1);
        }
    }

    #[test]
    fn test_exponential_positive_and_mean() {
        let mut rng = fastrand::Rng::with_seed(42);
        let n = 20_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let v = exponential(&mut rng, 4.0);
            assert!(v >= 0.0 && v.is_finite());
            sum += v;
        }
        let mean = sum / f64::from(n);
        assert!((mean - 4.0).abs() < 0.15, "exponential mean {mean} far from 4");
    }
}
