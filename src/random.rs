//! The random-number source used for jitter and spawning.

use rand::Rng;

/// Anything that can hand out uniform samples.
///
/// Every [`rand::Rng`] is a `RandomSource`, so production code passes a
/// seeded `StdRng` while tests can plug in a fixed sequence.
pub trait RandomSource {
    /// Uniform sample in `[low, high]`.
    fn uniform(&mut self, low: f32, high: f32) -> f32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        self.random_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Returns the value nearest to zero inside every requested range.
    pub struct ZeroJitter;

    impl RandomSource for ZeroJitter {
        fn uniform(&mut self, low: f32, high: f32) -> f32 {
            0.0_f32.clamp(low, high)
        }

        fn index(&mut self, _len: usize) -> usize {
            0
        }
    }
}
