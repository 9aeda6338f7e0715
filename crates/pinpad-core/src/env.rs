//! Environment abstraction for deterministic testing.
//!
//! Decouples PIN entry from system resources (time, randomness). Production
//! uses the real clock and OS entropy; simulation uses a pausable clock and a
//! seeded RNG so keypad shuffles and feedback timing are reproducible.

use std::time::Duration;

/// Abstract environment providing time, randomness, and sleeping.
///
/// Implementations MUST guarantee:
///
/// - `now()` never goes backwards
/// - `random_bytes()` uses cryptographically secure entropy in production,
///   since it decides the keypad layout an observer must not predict
pub trait Environment: Clone + Send + Sync + 'static {
    /// The instant type used by this environment.
    ///
    /// Production uses `std::time::Instant`, simulation uses a virtual clock.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// Only driver and runtime code sleeps; the controller never does.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Generates a uniformly distributed value in `0..bound`.
    ///
    /// Uses rejection sampling so small bounds carry no modulo bias.
    /// Returns 0 when `bound` is 0.
    fn random_below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.random_u64();
            if value < zone {
                return value % bound;
            }
        }
    }
}
