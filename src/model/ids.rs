// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

/// Number of leading hex digits used for the short display form.
pub const ABBREV_LEN: usize = 7;

const FULL_LEN: usize = 40;

/// A full content-addressed commit identifier.
///
/// The engine ships ids as fixed-width lowercase hex; anything else is a
/// malformed document, not a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId {
    value: String,
}

impl CommitId {
    pub fn new(value: impl Into<String>) -> Result<Self, CommitIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(CommitIdError::Empty);
        }
        if value.len() != FULL_LEN {
            return Err(CommitIdError::Length { found: value.len() });
        }
        if let Some(ch) = value
            .chars()
            .find(|ch| !ch.is_ascii_hexdigit() || ch.is_ascii_uppercase())
        {
            return Err(CommitIdError::NotHex { found: ch });
        }
        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Short display form (first [`ABBREV_LEN`] digits).
    pub fn abbreviated(&self) -> SmolStr {
        SmolStr::new(&self.value[..ABBREV_LEN])
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for CommitId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for CommitId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for CommitId {
    type Err = CommitIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for CommitId {
    type Error = CommitIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitIdError {
    Empty,
    Length { found: usize },
    NotHex { found: char },
}

impl fmt::Display for CommitIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("commit id must not be empty"),
            Self::Length { found } => {
                write!(f, "commit id must be {FULL_LEN} hex digits (found {found})")
            }
            Self::NotHex { found } => {
                write!(f, "commit id must be lowercase hex (found {found:?})")
            }
        }
    }
}

impl std::error::Error for CommitIdError {}
