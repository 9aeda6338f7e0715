//! Production environment backed by the system clock and OS entropy.
//!
//! Keypad permutations come from getrandom, so the layout a customer sees
//! cannot be predicted by someone watching the terminal between sessions.

use std::time::Duration;

use pinpad_core::Environment;

/// Production environment using system time and cryptographic RNG.
///
/// # Panics
///
/// `random_bytes` panics if the OS RNG fails. A terminal that cannot shuffle
/// its keypad unpredictably must not show the PIN screen at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).expect("invariant: OS RNG available for keypad shuffle");
    }
}

#[cfg(test)]
mod tests {
    use pinpad_core::KeypadOrder;

    use super::*;

    #[test]
    fn random_bytes_differ_between_calls() {
        let env = SystemEnv::new();
        let mut first = [0u8; 32];
        let mut second = [0u8; 32];

        env.random_bytes(&mut first);
        env.random_bytes(&mut second);

        assert_ne!(first, second);
    }

    #[test]
    fn shuffled_keypad_is_a_permutation() {
        let order = KeypadOrder::shuffled(&SystemEnv::new());

        let mut values: Vec<u8> = order.digits().iter().map(|d| d.value()).collect();
        values.sort_unstable();
        assert_eq!(values, (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn sleep_waits_at_least_requested() {
        let env = SystemEnv::new();

        let start = env.now();
        env.sleep(Duration::from_millis(20)).await;

        assert!(env.now() - start >= Duration::from_millis(20));
    }
}
