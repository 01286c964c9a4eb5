// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The engine boundary.
//!
//! The browser core never talks to a real version-control engine directly; it
//! goes through [`Repository`]. Implementations must be safe to call from a
//! worker thread, because the UI loop hands calls off and collects results
//! later.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{CommitId, CommitRecord};

pub mod log;
pub mod memory;

pub use log::{load_document, LogDocument, LogEntry, LogLoadError};
pub use memory::MemoryRepository;

/// Change counts for one working layer inside a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerChange {
    pub layer: String,
    #[serde(default)]
    pub inserts: usize,
    #[serde(default)]
    pub updates: usize,
    #[serde(default)]
    pub deletes: usize,
}

/// A structured change-set between two commits, opaque to the browser core;
/// the diff display renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    newer: CommitId,
    older: CommitId,
    entries: Vec<LayerChange>,
}

impl ChangeSet {
    pub fn new(newer: CommitId, older: CommitId, entries: Vec<LayerChange>) -> Self {
        Self {
            newer,
            older,
            entries,
        }
    }

    pub fn newer(&self) -> &CommitId {
        &self.newer
    }

    pub fn older(&self) -> &CommitId {
        &self.older
    }

    pub fn entries(&self) -> &[LayerChange] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The operations the browser delegates to the engine.
///
/// Every mutating operation either succeeds (after which the browser pulls a
/// fresh commit list) or fails with an error whose text is surfaced to the
/// user verbatim.
pub trait Repository: Send + Sync {
    fn list_commits(&self) -> Result<Vec<CommitRecord>, RepoError>;

    /// Changes between two commits; `newer` is the side selected first.
    fn diff(&self, newer: &CommitId, older: &CommitId) -> Result<ChangeSet, RepoError>;

    fn create_branch(&self, name: &str, at: &CommitId) -> Result<(), RepoError>;
    fn delete_branch(&self, name: &str) -> Result<(), RepoError>;
    fn checkout_branch(&self, name: &str) -> Result<(), RepoError>;
    fn create_tag(&self, name: &str, at: &CommitId) -> Result<(), RepoError>;
    fn delete_tag(&self, name: &str) -> Result<(), RepoError>;
    fn reset_current_branch(&self, to: &CommitId) -> Result<(), RepoError>;

    /// Restores working layers to their state at `at`; `None` restores all.
    fn restore_working_layers(&self, at: &CommitId, layer: Option<&str>) -> Result<(), RepoError>;
    fn working_layers(&self) -> Result<Vec<String>, RepoError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// The engine could not produce a commit list at all.
    Unavailable { reason: String },
    /// A delegated operation failed; `reason` is shown verbatim.
    OperationFailed {
        operation: &'static str,
        reason: String,
    },
    /// A branch, tag, or commit id the operation referenced does not exist.
    UnknownRef { name: String },
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "repository unavailable: {reason}"),
            Self::OperationFailed { operation, reason } => {
                write!(f, "{operation} failed: {reason}")
            }
            Self::UnknownRef { name } => write!(f, "unknown ref '{name}'"),
        }
    }
}

impl std::error::Error for RepoError {}
