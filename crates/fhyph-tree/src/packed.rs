#![forbid(unsafe_code)]

//! Packed interletter values.
//!
//! Hyphenation patterns carry one small digit per letter gap. Storing them
//! as bytes wastes half of every byte, so runs are packed two digits per
//! byte, high nibble first. Digit `d` is stored as nibble `d + 1`, which
//! leaves nibble `0` free to terminate a run.
//!
//! ```text
//! digits  [0, 0, 3, 0, 0]
//! nibbles  1  1  4  1  1  0
//! bytes   [0x11, 0x41, 0x10]
//! ```
//!
//! Offset 0 holds a single zero byte and means "no value".

/// Largest digit a nibble can carry (nibble 15).
pub const MAX_DIGIT: u8 = 14;

/// Append-only buffer of nibble-packed digit runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedValues {
    bytes: Vec<u8>,
}

impl PackedValues {
    /// Create a value space holding only the reserved offset 0.
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: vec![0] }
    }

    /// Pack `digits` and return the offset of the new run.
    ///
    /// Appends `digits.len() / 2 + 1` bytes. Every digit must be at most
    /// [`MAX_DIGIT`].
    pub fn pack(&mut self, digits: &[u8]) -> u32 {
        debug_assert!(digits.iter().all(|&d| d <= MAX_DIGIT));
        let offset = self.bytes.len();
        let byte_len = digits.len() / 2 + 1;
        self.bytes.resize(offset + byte_len, 0);

        for (i, &digit) in digits.iter().enumerate() {
            let nibble = (digit + 1) & 0x0f;
            let slot = &mut self.bytes[offset + (i >> 1)];
            if i & 1 == 0 {
                *slot = nibble << 4;
            } else {
                *slot |= nibble;
            }
        }
        offset as u32
    }

    /// Iterate the digits of the run starting at `offset`.
    ///
    /// An offset past the end yields nothing.
    #[must_use]
    pub fn digits(&self, offset: u32) -> Digits<'_> {
        Digits {
            bytes: self.bytes.get(offset as usize..).unwrap_or(&[]),
            nibble: 0,
        }
    }

    /// Collect the run starting at `offset`.
    #[must_use]
    pub fn unpack(&self, offset: u32) -> Vec<u8> {
        self.digits(offset).collect()
    }

    /// Size of the value space in bytes, including the reserved byte.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when nothing but the reserved offset is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.len() <= 1
    }

    /// Release spare capacity.
    pub fn trim_to_size(&mut self) {
        self.bytes.shrink_to_fit();
    }

    /// Check that the reserved byte survived a reload and the buffer ends
    /// on a terminator.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.bytes.first() == Some(&0) && self.bytes.last().is_some_and(|&b| b & 0x0f == 0)
    }
}

impl Default for PackedValues {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowing iterator over one packed run.
#[derive(Debug, Clone)]
pub struct Digits<'a> {
    bytes: &'a [u8],
    nibble: usize,
}

impl Iterator for Digits<'_> {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.nibble >> 1)?;
        let v = if self.nibble & 1 == 0 {
            byte >> 4
        } else {
            byte & 0x0f
        };
        if v == 0 {
            // Park past the end so later calls stay at None.
            self.nibble = self.bytes.len() * 2;
            return None;
        }
        self.nibble += 1;
        Some(v - 1)
    }
}
