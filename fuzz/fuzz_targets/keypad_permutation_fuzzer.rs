//! Fuzz target for keypad permutations
//!
//! # Invariants
//!
//! - `from_permutation` accepts exactly the permutations of 0..=9
//! - An accepted layout maps every position to a distinct digit
//! - `position_of` inverts `digit_at`

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinpad_core::KeypadOrder;

fuzz_target!(|values: [u8; 10]| {
    let mut seen = [false; 10];
    let is_permutation = values.iter().all(|&v| {
        let fresh = v < 10 && !seen[usize::from(v)];
        if fresh {
            seen[usize::from(v)] = true;
        }
        fresh
    });

    match KeypadOrder::from_permutation(values) {
        Ok(keypad) => {
            assert!(is_permutation, "accepted {values:?}");
            for position in 0..10 {
                let Some(digit) = keypad.digit_at(position) else {
                    panic!("position {position} empty");
                };
                assert_eq!(digit.value(), values[position]);
                assert_eq!(keypad.position_of(digit), Some(position));
            }
        },
        Err(_) => assert!(!is_permutation, "rejected permutation {values:?}"),
    }
});
