//! C symbol derivation
//!
//! Embedded resources are exposed by the linker as `_binary_<stem>_start` and
//! `_binary_<stem>_end`, where the stem is the file name with every byte that
//! is not an identifier character replaced. All generated names go through
//! [`linker_stem`] so declared and referenced symbols never disagree.
//!
//! # Character mapping
//!
//! | Input byte                          | Output      |
//! |-------------------------------------|-------------|
//! | `A`-`Z`, `a`-`z`, `0`-`9`, `_`      | unchanged   |
//! | anything else (`.`, `-`, space, ...) | `_`        |
//!
//! Non-ASCII characters map each of their UTF-8 bytes to `_`.

use crate::error::{MediaError, Result};

/// Map one byte of a file name to its identifier byte
#[inline]
fn map_byte(b: u8) -> char {
    if b.is_ascii_alphanumeric() || b == b'_' {
        b as char
    } else {
        '_'
    }
}

/// Derive the linker stem for an embedded file name
///
/// # Example
/// ```
/// use media_embed::symbol::linker_stem;
///
/// assert_eq!(linker_stem("a.b.png"), "a_b_png");
/// assert_eq!(linker_stem("walk-01.png"), "walk_01_png");
/// ```
pub fn linker_stem(file_name: &str) -> String {
    file_name.bytes().map(map_byte).collect()
}

/// Derive a C identifier from a file name
///
/// Same as [`linker_stem`], prefixed with `_` when the stem would start with
/// a digit. The linker-side name always uses the unprefixed stem.
pub fn c_identifier(file_name: &str) -> String {
    let stem = linker_stem(file_name);
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", stem)
    } else {
        stem
    }
}

/// Check that `name` is usable as-is as a C identifier
pub fn is_c_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

/// Validate a user-supplied symbol prefix
pub fn validate_identifier(name: &str) -> Result<()> {
    if is_c_identifier(name) {
        Ok(())
    } else {
        Err(MediaError::InvalidSymbol {
            name: name.to_string(),
        })
    }
}
