// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The Modlo sequence: a Fibonacci head followed by modulus-wrapped Fibonacci steps.

use std::iter::FusedIterator;

/// The first seven Fibonacci terms, emitted unchanged.
const SEED: [u32; 7] = [1, 1, 2, 3, 5, 8, 13];

/// Modulus applied at each step of the 8-step cycle that follows the seed.
const MODULI: [u32; 8] = [17, 9, 44, 29, 47, 19, 9, 199];

/// Per-step corrections `[0, 8, 0, 0, -10, 0, 0, 0]`, written as non-negative residues.
///
/// `-10 ≡ 37 (mod 47)`.
const OFFSETS: [u32; 8] = [0, 8, 0, 0, 37, 0, 0, 0];

/// Returns the first `n_terms` terms of the Modlo sequence.
///
/// The sequence starts with `1, 1, 2, 3, 5, 8, 13`. Every later term is the sum of the two before
/// it, shifted by a per-step correction and wrapped by a per-step modulus, both cycling with
/// period 8. A wrapped value of zero is replaced by the modulus, so every term is positive.
///
/// # Examples
///
/// ```
/// use resonance_cache::modlo_sequence;
///
/// assert_eq!(modlo_sequence(10), [1, 1, 2, 3, 5, 8, 13, 4, 7, 11]);
/// assert!(modlo_sequence(0).is_empty());
/// ```
#[must_use]
pub fn modlo_sequence(n_terms: usize) -> Vec<u32> {
    ModloSequence::new().take(n_terms).collect()
}

/// An endless iterator over the Modlo sequence. See [`modlo_sequence`].
#[derive(Debug, Clone, Default)]
pub struct ModloSequence {
    index: usize,
    previous: u32,
    current: u32,
}

impl ModloSequence {
    /// Creates an iterator positioned at the first term.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: 0,
            previous: 0,
            current: 0,
        }
    }
}

impl Iterator for ModloSequence {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let term = if let Some(&seed) = SEED.get(self.index) {
            seed
        } else {
            let step = (self.index - SEED.len()) % MODULI.len();
            let modulus = MODULI[step];
            match (self.previous + self.current + OFFSETS[step]) % modulus {
                0 => modulus,
                wrapped => wrapped,
            }
        };

        self.previous = self.current;
        self.current = term;
        self.index = self.index.saturating_add(1);
        Some(term)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl FusedIterator for ModloSequence {}
