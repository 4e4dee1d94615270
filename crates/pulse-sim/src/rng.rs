use serde::{Deserialize, Serialize};

/// Tiny deterministic RNG used by the drift generator.
///
/// This is intentionally simple and reproducible across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a new deterministic RNG from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Next pseudo-random `u64`.
    #[must_use]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Next value in `[0, upper_exclusive)`.
    #[must_use]
    pub fn next_bounded(&mut self, upper_exclusive: u64) -> u64 {
        if upper_exclusive == 0 {
            return 0;
        }
        self.next_u64() % upper_exclusive
    }

    /// Signed perturbation in `[-max_abs, +max_abs]`.
    #[must_use]
    pub fn jitter(&mut self, max_abs: u8) -> i32 {
        let span = u64::from(max_abs) * 2 + 1;
        let draw = i64::try_from(self.next_bounded(span)).unwrap_or(0);
        i32::try_from(draw - i64::from(max_abs)).unwrap_or(0)
    }

    /// Signed perturbation in `lo..=hi`.
    #[must_use]
    pub fn jitter_in(&mut self, lo: i8, hi: i8) -> i32 {
        debug_assert!(lo <= hi);
        let span = u64::try_from(i64::from(hi) - i64::from(lo) + 1).unwrap_or(1);
        let draw = i64::try_from(self.next_bounded(span)).unwrap_or(0);
        i32::try_from(draw + i64::from(lo)).unwrap_or(0)
    }
}
