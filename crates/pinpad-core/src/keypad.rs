//! Randomized keypad.
//!
//! The keypad shows the ten digits in a per-session permutation so that an
//! onlooker cannot learn the PIN from finger positions. The permutation is
//! chosen once when the screen is presented and never changes for the
//! lifetime of that session.
//!
//! Front ends report taps as [`KeypadKey`] screen positions; [`KeypadOrder`]
//! resolves them into canonical [`PinEvent`]s so the controller never sees a
//! screen position.

use serde::{Deserialize, Serialize};

use crate::{Digit, Environment, PinError, PinEvent};

/// Number of digit keys on the keypad.
pub const DIGIT_KEYS: usize = 10;

/// Keypad grid width.
pub const COLUMNS: usize = 3;

/// Keypad grid, row-major. `None` cells are empty.
///
/// Three rows of three digit positions, a fourth row holding the tenth digit
/// in the middle, and an action row below.
pub const LAYOUT: [[Option<KeypadKey>; COLUMNS]; 5] = [
    [
        Some(KeypadKey::Digit { position: 0 }),
        Some(KeypadKey::Digit { position: 1 }),
        Some(KeypadKey::Digit { position: 2 }),
    ],
    [
        Some(KeypadKey::Digit { position: 3 }),
        Some(KeypadKey::Digit { position: 4 }),
        Some(KeypadKey::Digit { position: 5 }),
    ],
    [
        Some(KeypadKey::Digit { position: 6 }),
        Some(KeypadKey::Digit { position: 7 }),
        Some(KeypadKey::Digit { position: 8 }),
    ],
    [None, Some(KeypadKey::Digit { position: 9 }), None],
    [Some(KeypadKey::Cancel), Some(KeypadKey::Backspace), Some(KeypadKey::Confirm)],
];

/// A tap on the keypad, identified by screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeypadKey {
    /// Digit key at a screen position (`0..10`).
    Digit {
        /// Screen position, row-major over the digit keys.
        position: usize,
    },
    /// Remove the last entered digit.
    Backspace,
    /// Abandon the PIN screen.
    Cancel,
    /// Submit the entered PIN.
    Confirm,
}

/// Per-session mapping from screen position to digit.
///
/// Always a permutation of the ten digits, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 10]", into = "[u8; 10]")]
pub struct KeypadOrder([Digit; DIGIT_KEYS]);

impl KeypadOrder {
    /// Unshuffled phone layout: 1-9 then 0.
    pub fn canonical() -> Self {
        let mut digits = Digit::ALL;
        digits.rotate_left(1);
        Self(digits)
    }

    /// Build an order from explicit digit values.
    ///
    /// Every digit must appear exactly once.
    pub fn from_permutation(values: [u8; DIGIT_KEYS]) -> Result<Self, PinError> {
        let mut seen = [false; DIGIT_KEYS];
        let mut digits = Digit::ALL;

        for (slot, value) in digits.iter_mut().zip(values) {
            let digit = Digit::new(value)
                .map_err(|_| PinError::InvalidKeypadOrder { reason: "value out of range" })?;
            let index = usize::from(digit.value());
            if seen[index] {
                return Err(PinError::InvalidKeypadOrder { reason: "duplicate digit" });
            }
            seen[index] = true;
            *slot = digit;
        }

        Ok(Self(digits))
    }

    /// Draw a fresh permutation (Fisher-Yates) from the environment RNG.
    pub fn shuffled<E: Environment>(env: &E) -> Self {
        let mut digits = Digit::ALL;
        for i in (1..DIGIT_KEYS).rev() {
            let j = env.random_below(i as u64 + 1) as usize;
            digits.swap(i, j);
        }
        Self(digits)
    }

    /// Digit shown at a screen position. `None` if out of range.
    pub fn digit_at(&self, position: usize) -> Option<Digit> {
        self.0.get(position).copied()
    }

    /// Screen position of a digit. `None` only if the order lost the digit.
    pub fn position_of(&self, digit: Digit) -> Option<usize> {
        self.0.iter().position(|d| *d == digit)
    }

    /// Digits in screen order.
    pub fn digits(&self) -> &[Digit; DIGIT_KEYS] {
        &self.0
    }

    /// Translate a keypad tap into a controller event.
    ///
    /// Returns `None` for a digit position outside the keypad.
    pub fn resolve(&self, key: KeypadKey) -> Option<PinEvent> {
        match key {
            KeypadKey::Digit { position } => self.digit_at(position).map(PinEvent::Digit),
            KeypadKey::Backspace => Some(PinEvent::Backspace),
            KeypadKey::Cancel => Some(PinEvent::Cancel),
            KeypadKey::Confirm => Some(PinEvent::Confirm),
        }
    }
}

impl TryFrom<[u8; DIGIT_KEYS]> for KeypadOrder {
    type Error = PinError;

    fn try_from(values: [u8; DIGIT_KEYS]) -> Result<Self, Self::Error> {
        Self::from_permutation(values)
    }
}

impl From<KeypadOrder> for [u8; DIGIT_KEYS] {
    fn from(order: KeypadOrder) -> Self {
        order.0.map(u8::from)
    }
}

impl Default for KeypadOrder {
    fn default() -> Self {
        Self::canonical()
    }
}
