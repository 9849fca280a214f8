//! Board views and board name decoding
//!
//! Board names are stored decoded: whatever UTF-8 string the author put in
//! the bulletin. Callers hand us the percent-encoded path segment, so the
//! lookup value is produced by [`BoardName::decode`].

use serde::{Deserialize, Serialize};

use super::Bulletin;
use crate::error::{RecordError, Result};

/// A decoded board name, compared byte-for-byte against the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardName(String);

impl BoardName {
    /// Percent-decode a caller-supplied board segment.
    ///
    /// Query-string rules: `+` is a space, every `%` must start a two-digit
    /// hex escape, and the decoded bytes must be valid UTF-8. A literal `+`
    /// arrives as `%2B`. No case folding or Unicode normalization is applied.
    ///
    /// # Example
    /// ```
    /// use pubrec_core::models::BoardName;
    ///
    /// let name = BoardName::decode("bo%C3%84rd+one").unwrap();
    /// assert_eq!(name.as_str(), "boÄrd one");
    /// assert!(BoardName::decode("%zz").is_err());
    /// ```
    pub fn decode(raw: &str) -> Result<Self> {
        check_escapes(raw)?;
        let spaced = raw.replace('+', " ");
        let decoded = urlencoding::decode(&spaced)
            .map_err(|e| RecordError::malformed("board", e.to_string()))?;
        Ok(Self(decoded.into_owned()))
    }

    /// The nil board holds bulletins posted without a board.
    pub fn is_nil(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_escapes(raw: &str) -> Result<()> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => {
                    return Err(RecordError::malformed(
                        "board",
                        format!("invalid percent escape at byte {}", i),
                    ))
                }
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Aggregate activity of one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub name: String,
    pub num_bltns: u64,
    /// Earliest block timestamp among the board's confirmed bulletins,
    /// 0 while none are confirmed.
    pub created_at: i64,
    /// Latest self-reported bulletin timestamp
    pub last_active: i64,
    pub created_by: String,
}

/// A board summary with the board's bulletins in chronological order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WholeBoard {
    pub summary: BoardSummary,
    #[serde(rename = "bltns")]
    pub bulletins: Vec<Bulletin>,
}
