//! Frame ordering policies

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::error::{MediaError, Result};

/// How discovered frame files are ordered in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum FrameOrder {
    /// By the integer index in the name: `frame_12.png` sorts as 12
    ///
    /// Every file must be named `<prefix>_<index>[_...].<ext>`; anything else
    /// is rejected with `InvalidFrameName`.
    #[default]
    Numeric,
    /// Plain byte-wise ordering of file names
    Lexicographic,
}

/// Extract the numeric sort key of a frame file name
///
/// The key is the second `_`-delimited token with its extension removed.
///
/// # Example
/// ```
/// use media_embed::frames::order::numeric_key;
///
/// assert_eq!(numeric_key("frame_12.png").unwrap(), 12);
/// assert!(numeric_key("cover.png").is_err());
/// ```
pub fn numeric_key(name: &str) -> Result<u64> {
    let invalid = |reason: &str| MediaError::InvalidFrameName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let token = name
        .split('_')
        .nth(1)
        .ok_or_else(|| invalid("expected '<prefix>_<index>.<ext>'"))?;
    let digits = token.rsplit_once('.').map_or(token, |(stem, _ext)| stem);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("index after '_' is not a number"));
    }
    digits.parse().map_err(|_| invalid("index out of range"))
}

/// Sort frame names in place according to `order`
///
/// Numeric ordering validates every name before sorting. Equal indices fall
/// back to name order so output is deterministic.
pub fn sort_frames(names: &mut Vec<String>, order: FrameOrder) -> Result<()> {
    match order {
        FrameOrder::Lexicographic => names.sort(),
        FrameOrder::Numeric => {
            let mut keyed = names
                .drain(..)
                .map(|name| numeric_key(&name).map(|key| (key, name)))
                .collect::<Result<Vec<_>>>()?;
            keyed.sort_by(|a, b| match a.0.cmp(&b.0) {
                Ordering::Equal => a.1.cmp(&b.1),
                other => other,
            });
            names.extend(keyed.into_iter().map(|(_, name)| name));
        }
    }
    Ok(())
}
