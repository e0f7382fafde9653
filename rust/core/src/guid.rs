// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC GlobalId allocation.
//!
//! A GlobalId is a 128-bit value written as 22 characters of the IFC base-64
//! alphabet. The first character carries the top two bits, the remaining 21
//! characters six bits each.

use rustc_hash::FxHashSet;
use std::fmt;

const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Compressed 22-character IFC GlobalId
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalId([u8; 22]);

impl GlobalId {
    /// Compress a 128-bit value
    pub fn from_u128(value: u128) -> Self {
        let mut chars = [0u8; 22];
        chars[0] = ALPHABET[((value >> 126) & 0x3) as usize];
        for (i, c) in chars.iter_mut().enumerate().skip(1) {
            let shift = 6 * (21 - i);
            *c = ALPHABET[((value >> shift) & 0x3F) as usize];
        }
        GlobalId(chars)
    }

    pub fn as_str(&self) -> &str {
        // Every byte comes from ALPHABET, which is ASCII
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of fresh GlobalIds.
///
/// One allocator serves a whole conversion, so every id it hands out must be
/// distinct from every other id it has handed out.
pub trait IdAllocator {
    fn allocate(&mut self) -> GlobalId;
}

/// Random (UUID v4) GlobalIds, re-drawn on the unlikely collision
#[derive(Debug, Default)]
pub struct UuidAllocator {
    issued: FxHashSet<u128>,
}

impl UuidAllocator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for UuidAllocator {
    fn allocate(&mut self) -> GlobalId {
        loop {
            let value = uuid::Uuid::new_v4().as_u128();
            if self.issued.insert(value) {
                return GlobalId::from_u128(value);
            }
        }
    }
}

/// Deterministic GlobalIds: a fixed 64-bit seed in the high half and a
/// counter in the low half. Used for reproducible output and in tests.
#[derive(Debug, Clone)]
pub struct SequentialAllocator {
    seed: u64,
    counter: u64,
}

impl SequentialAllocator {
    pub fn new(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl Default for SequentialAllocator {
    fn default() -> Self {
        Self::new(0x6769_7332_6966_6321)
    }
}

impl IdAllocator for SequentialAllocator {
    fn allocate(&mut self) -> GlobalId {
        self.counter += 1;
        GlobalId::from_u128(((self.seed as u128) << 64) | self.counter as u128)
    }
}
