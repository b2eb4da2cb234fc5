use smallvec::SmallVec;

use super::error::{DawgError, Result};

/// Buffer holding the labels of one word.
pub type Labels = SmallVec<[u8; 32]>;

/// Converts a character to its edge label.
///
/// Labels are raw single-byte character codes, so any `char` up to U+00FF is
/// accepted and anything above is rejected.
#[inline]
pub fn label_of(ch: char) -> Option<u8> {
    u8::try_from(ch).ok()
}

/// Trait for types that can be inserted as a word.
///
/// Implemented for common string and byte sequence types so that
/// [`Trie::insert`](super::trie::Trie::insert) and
/// [`build_dawg`](super::builder::build_dawg) accept them directly.
pub trait IntoWord {
    /// Collects this word into a label buffer.
    ///
    /// # Errors
    ///
    /// Returns [`DawgError::Label`] if a character does not fit in one byte.
    fn into_labels(self) -> Result<Labels>;
}

fn str_labels(word: &str) -> Result<Labels> {
    word.chars()
        .map(|ch| {
            label_of(ch).ok_or_else(|| DawgError::Label {
                word: word.to_string(),
                ch,
            })
        })
        .collect()
}

// String types

impl IntoWord for &str {
    fn into_labels(self) -> Result<Labels> {
        str_labels(self)
    }
}

impl IntoWord for &&str {
    fn into_labels(self) -> Result<Labels> {
        str_labels(self)
    }
}

impl IntoWord for String {
    fn into_labels(self) -> Result<Labels> {
        str_labels(&self)
    }
}

impl IntoWord for &String {
    fn into_labels(self) -> Result<Labels> {
        str_labels(self)
    }
}

// Byte sequences are already labels.

impl IntoWord for &[u8] {
    fn into_labels(self) -> Result<Labels> {
        Ok(SmallVec::from_slice(self))
    }
}

impl IntoWord for Vec<u8> {
    fn into_labels(self) -> Result<Labels> {
        Ok(SmallVec::from_vec(self))
    }
}

impl IntoWord for &Vec<u8> {
    fn into_labels(self) -> Result<Labels> {
        Ok(SmallVec::from_slice(self))
    }
}

impl<const N: usize> IntoWord for [u8; N] {
    fn into_labels(self) -> Result<Labels> {
        Ok(SmallVec::from_slice(&self))
    }
}

impl<const N: usize> IntoWord for &[u8; N] {
    fn into_labels(self) -> Result<Labels> {
        Ok(SmallVec::from_slice(self))
    }
}
