//! Byte-level comparison of two buffers.
//!
//! The comparator is independent of the voice model: it reports differing
//! bytes over the common prefix and lists the tail of the longer input.

use std::fmt;

use serde::Serialize;

/// One differing byte at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteDifference {
    pub index: usize,
    pub left: u8,
    pub right: u8,
}

/// A byte present only in the longer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrailingByte {
    pub index: usize,
    pub value: u8,
}

/// Result of [`compare`].
///
/// # Examples
/// ```
/// use dx7cart_core::diff::compare;
///
/// let diff = compare(&[1, 2, 3, 4], &[1, 0xFF, 3, 4]);
/// assert_eq!(diff.differences.len(), 1);
/// assert_eq!(diff.differences[0].index, 1);
/// assert!(!diff.is_identical());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByteDiff {
    pub left_len: usize,
    pub right_len: usize,
    pub differences: Vec<ByteDifference>,
    pub trailing: Vec<TrailingByte>,
}

impl ByteDiff {
    pub fn size_mismatch(&self) -> bool {
        self.left_len != self.right_len
    }

    pub fn is_identical(&self) -> bool {
        !self.size_mismatch() && self.differences.is_empty()
    }
}

/// Compare two buffers byte by byte. Neither input is modified.
pub fn compare(left: &[u8], right: &[u8]) -> ByteDiff {
    let differences = left
        .iter()
        .zip(right)
        .enumerate()
        .filter(|(_, (l, r))| l != r)
        .map(|(index, (l, r))| ByteDifference {
            index,
            left: *l,
            right: *r,
        })
        .collect();

    let common = left.len().min(right.len());
    let longer = if left.len() > right.len() { left } else { right };
    let trailing = longer[common..]
        .iter()
        .enumerate()
        .map(|(offset, value)| TrailingByte {
            index: common + offset,
            value: *value,
        })
        .collect();

    ByteDiff {
        left_len: left.len(),
        right_len: right.len(),
        differences,
        trailing,
    }
}

impl fmt::Display for ByteDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size_mismatch() {
            writeln!(
                f,
                "Files differ in size: {} vs {} bytes",
                self.left_len, self.right_len
            )?;
        }

        if self.differences.is_empty() {
            if !self.size_mismatch() {
                writeln!(f, "Files are identical.")?;
            }
        } else {
            writeln!(f, "Found {} differences:", self.differences.len())?;
            for diff in &self.differences {
                writeln!(f, "Byte {}: {:02X} != {:02X}", diff.index, diff.left, diff.right)?;
            }
        }

        if self.size_mismatch() {
            writeln!(f, "Additional bytes in the longer file:")?;
            for byte in &self.trailing {
                writeln!(f, "Byte {}: {:02X}", byte.index, byte.value)?;
            }
        }
        Ok(())
    }
}
