// ── Fallback generators ──
//
// Plausible substitute readings used when a mock-policy source fails.
// Values are whole numbers drawn uniformly from an inclusive range.

use rand::Rng;

/// Inclusive integer range a fallback value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackRange {
    pub min: u32,
    pub max: u32,
}

impl FallbackRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        f64::from(rng.gen_range(self.min..=self.max))
    }

    pub fn contains(self, value: f64) -> bool {
        value >= f64::from(self.min) && value <= f64::from(self.max) && value.fract() == 0.0
    }
}

pub const CPU_USAGE: FallbackRange = FallbackRange::new(0, 100);
pub const GPU_USAGE: FallbackRange = FallbackRange::new(0, 100);
pub const MEMORY_USAGE: FallbackRange = FallbackRange::new(50, 80);
pub const DISK_USAGE: FallbackRange = FallbackRange::new(40, 60);
/// 45 °C base plus up to 29 °C.
pub const CPU_TEMPERATURE: FallbackRange = FallbackRange::new(45, 74);

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const SAMPLES: usize = 10_000;

    fn assert_in_range(range: FallbackRange) {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..SAMPLES {
            let v = range.sample(&mut rng);
            assert!(range.contains(v), "{v} outside {range:?}");
            seen_min |= (v - f64::from(range.min)).abs() < f64::EPSILON;
            seen_max |= (v - f64::from(range.max)).abs() < f64::EPSILON;
        }
        // Both endpoints are reachable, so the range is inclusive.
        assert!(seen_min && seen_max, "endpoints not hit for {range:?}");
    }

    #[test]
    fn cpu_and_gpu_span_zero_to_hundred() {
        assert_in_range(CPU_USAGE);
        assert_in_range(GPU_USAGE);
    }

    #[test]
    fn memory_stays_between_fifty_and_eighty() {
        assert_in_range(MEMORY_USAGE);
    }

    #[test]
    fn disk_stays_between_forty_and_sixty() {
        assert_in_range(DISK_USAGE);
    }

    #[test]
    fn temperature_stays_between_45_and_74() {
        assert_in_range(CPU_TEMPERATURE);
    }

    #[test]
    fn distribution_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut buckets = [0_usize; 3];
        for _ in 0..SAMPLES {
            // 40..=60 split into 40..=46, 47..=53, 54..=60
            let v = DISK_USAGE.sample(&mut rng);
            let idx = if v <= 46.0 {
                0
            } else if v <= 53.0 {
                1
            } else {
                2
            };
            buckets[idx] += 1;
        }
        for count in buckets {
            assert!((2_800..=3_900).contains(&count), "bucket skew: {buckets:?}");
        }
    }
}
