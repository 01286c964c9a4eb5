// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The engine's captured-log document.
//!
//! A log document is the JSON the engine emits for a history snapshot:
//! commits newest-first with their precomputed lane/edge data, plus the live
//! ref tables (branches, tags, the checked-out branch) and the working layer
//! names. `galatea --log <file>` loads one into the in-memory engine.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::LayerChange;
use crate::model::{CommitId, CommitRecord, EdgeShape, GraphRow};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogDocument {
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub branches: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub layers: Vec<String>,
    pub commits: Vec<LogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub commit: String,
    #[serde(default)]
    pub abbrev: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
    pub message: String,
    pub author: String,
    /// ISO-8601 author instant.
    pub authored: String,
    #[serde(default)]
    pub lane: u16,
    #[serde(default)]
    pub above: EdgeList,
    #[serde(default)]
    pub below: EdgeList,
    /// Per-layer change counts introduced by this commit.
    #[serde(default)]
    pub changes: Vec<LayerChange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeList {
    #[serde(default)]
    pub vertical: Vec<u16>,
    #[serde(default)]
    pub diagonal_right: Vec<u16>,
    #[serde(default)]
    pub diagonal_left: Vec<u16>,
}

impl EdgeList {
    fn apply(&self, edges: &mut crate::model::EdgeSet) {
        for &lane in &self.vertical {
            edges.insert(EdgeShape::Vertical, lane);
        }
        for &lane in &self.diagonal_right {
            edges.insert(EdgeShape::DiagonalRight, lane);
        }
        for &lane in &self.diagonal_left {
            edges.insert(EdgeShape::DiagonalLeft, lane);
        }
    }
}

impl LogEntry {
    /// Builds the model record. Refs are not part of the entry; they are
    /// derived from the document's ref tables.
    pub fn to_record(&self) -> Result<CommitRecord, LogLoadError> {
        let id = parse_id(&self.commit)?;

        let mut parents = Vec::with_capacity(self.parents.len());
        for parent in &self.parents {
            parents.push(parse_id(parent)?);
        }

        let authored = DateTime::parse_from_rfc3339(&self.authored).map_err(|err| {
            LogLoadError::Invalid {
                reason: format!("commit {}: bad author timestamp: {err}", self.commit),
            }
        })?;

        let mut graph = GraphRow::new(self.lane);
        self.above.apply(graph.above_mut());
        self.below.apply(graph.below_mut());

        let mut record = CommitRecord::new(
            id,
            parents,
            self.message.clone(),
            self.author.clone(),
            authored,
            graph,
        );
        if let Some(abbrev) = &self.abbrev {
            record.set_abbreviated_id(abbrev.as_str());
        }
        Ok(record)
    }
}

pub fn load_document(path: &Path) -> Result<LogDocument, LogLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: LogDocument =
        serde_json::from_str(&raw).map_err(|source| LogLoadError::Parse { source })?;
    if document.commits.is_empty() {
        return Err(LogLoadError::Invalid {
            reason: "log document has no commits".to_owned(),
        });
    }
    Ok(document)
}

pub(crate) fn parse_id(raw: &str) -> Result<CommitId, LogLoadError> {
    CommitId::new(raw.to_owned()).map_err(|err| LogLoadError::Invalid {
        reason: format!("bad commit id '{raw}': {err}"),
    })
}

#[derive(Debug)]
pub enum LogLoadError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        source: serde_json::Error,
    },
    Invalid {
        reason: String,
    },
}

impl fmt::Display for LogLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read log document {}: {source}", path.display())
            }
            Self::Parse { source } => write!(f, "failed to parse log document: {source}"),
            Self::Invalid { reason } => write!(f, "invalid log document: {reason}"),
        }
    }
}

impl std::error::Error for LogLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}
