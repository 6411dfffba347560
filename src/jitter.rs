//! Gaussian timing jitter for humanizing press/release instants.

use std::f64::consts::TAU;

use rand::Rng;

/// Draw one pseudo-random timing offset in milliseconds.
///
/// Box-Muller transform over two uniform draws, scaled so `max_offset_ms`
/// sits at 3 standard deviations: roughly 99.7% of draws fall within
/// `±max_offset_ms`. Amplitudes of zero or below disable jitter entirely.
pub fn bell_curve_offset_ms<R: Rng + ?Sized>(rng: &mut R, max_offset_ms: i64) -> i64 {
    if max_offset_ms <= 0 {
        return 0;
    }
    // ln(0) is a domain error; the uniform source can yield exactly 0.
    let mut u1: f64 = rng.gen_range(0.0..1.0);
    while u1 <= 0.0 {
        u1 = rng.gen_range(0.0..1.0);
    }
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    (z * max_offset_ms as f64 / 3.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_amplitude_is_silent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(bell_curve_offset_ms(&mut rng, 0), 0);
        }
    }

    #[test]
    fn test_negative_amplitude_is_silent() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(bell_curve_offset_ms(&mut rng, -30), 0);
    }

    /// Empirical distribution check: mean near zero, ~99.7% of draws
    /// within ±amplitude (amplitude = 3σ).
    #[test]
    fn test_bell_curve_statistics() {
        let amplitude = 30i64;
        let samples = 100_000;
        let mut rng = StdRng::seed_from_u64(0xBEA7);

        let mut sum = 0i64;
        let mut inside = 0usize;
        for _ in 0..samples {
            let offset = bell_curve_offset_ms(&mut rng, amplitude);
            sum += offset;
            if offset.abs() <= amplitude {
                inside += 1;
            }
        }

        let mean = sum as f64 / samples as f64;
        assert!(mean.abs() < 0.5, "mean {mean} too far from zero");

        let fraction = inside as f64 / samples as f64;
        assert!(
            fraction > 0.99 && fraction <= 1.0,
            "expected ~99.7% within ±{amplitude}, got {fraction}"
        );
    }

    #[test]
    fn test_draws_vary() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws: Vec<i64> = (0..50).map(|_| bell_curve_offset_ms(&mut rng, 30)).collect();
        assert!(draws.iter().any(|&d| d != draws[0]));
    }
}
