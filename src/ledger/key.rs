//! Storage keys naming each ledger slot.
//!
//! Built-in keys combine a [`LedgerKind`] prefix with a [`ContentKind`]
//! suffix (`savedPapers`, `downloadedNotes`, ...). Any other non-empty
//! string is accepted as a custom key so the ledger stays generic.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::LedgerError;

/// Content categories that carry saved/downloaded ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Papers,
    Books,
    Notes,
}

impl ContentKind {
    /// All categories in display order.
    pub const ALL: [Self; 3] = [Self::Papers, Self::Books, Self::Notes];

    /// Lowercase label used on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Papers => "papers",
            Self::Books => "books",
            Self::Notes => "notes",
        }
    }

    /// Capitalized suffix used inside storage keys.
    fn key_suffix(self) -> &'static str {
        match self {
            Self::Papers => "Papers",
            Self::Books => "Books",
            Self::Notes => "Notes",
        }
    }

    /// Singular noun for user notices ("paper", "book", "note").
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::Papers => "paper",
            Self::Books => "book",
            Self::Notes => "note",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "papers" | "paper" => Ok(Self::Papers),
            "books" | "book" => Ok(Self::Books),
            "notes" | "note" => Ok(Self::Notes),
            other => Err(format!(
                "unknown content kind '{other}' (expected papers, books, or notes)"
            )),
        }
    }
}

/// What membership in a ledger means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// Bookmarked by the user.
    Saved,
    /// Materialized as a local file.
    Downloaded,
}

impl LedgerKind {
    /// All ledger kinds.
    pub const ALL: [Self; 2] = [Self::Saved, Self::Downloaded];

    /// Lowercase label, also the storage key prefix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Downloaded => "downloaded",
        }
    }
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "saved" | "save" => Ok(Self::Saved),
            "downloaded" | "download" => Ok(Self::Downloaded),
            other => Err(format!(
                "unknown ledger kind '{other}' (expected saved or downloaded)"
            )),
        }
    }
}

/// A validated storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LedgerKey {
    raw: String,
}

impl LedgerKey {
    /// Key for a built-in `(kind, content)` ledger.
    #[must_use]
    pub fn new(kind: LedgerKind, content: ContentKind) -> Self {
        Self {
            raw: format!("{}{}", kind.as_str(), content.key_suffix()),
        }
    }

    /// Shorthand for `LedgerKey::new(LedgerKind::Saved, content)`.
    #[must_use]
    pub fn saved(content: ContentKind) -> Self {
        Self::new(LedgerKind::Saved, content)
    }

    /// Shorthand for `LedgerKey::new(LedgerKind::Downloaded, content)`.
    #[must_use]
    pub fn downloaded(content: ContentKind) -> Self {
        Self::new(LedgerKind::Downloaded, content)
    }

    /// Wraps an arbitrary storage key.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidKey`] when `raw` is empty or only whitespace.
    pub fn custom(raw: impl Into<String>) -> Result<Self, LedgerError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(LedgerError::InvalidKey(raw));
        }
        Ok(Self { raw })
    }

    /// The storage key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Splits a built-in key back into its parts; `None` for custom keys.
    #[must_use]
    pub fn parts(&self) -> Option<(LedgerKind, ContentKind)> {
        LedgerKind::ALL.into_iter().find_map(|kind| {
            let suffix = self.raw.strip_prefix(kind.as_str())?;
            ContentKind::ALL
                .into_iter()
                .find(|content| content.key_suffix() == suffix)
                .map(|content| (kind, content))
        })
    }

    /// Ledger kind of a built-in key.
    #[must_use]
    pub fn kind(&self) -> Option<LedgerKind> {
        self.parts().map(|(kind, _)| kind)
    }
}

impl AsRef<str> for LedgerKey {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
