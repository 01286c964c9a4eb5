// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use smol_str::SmolStr;

use super::graph::GraphRow;
use super::ids::CommitId;

/// A ref attached to a commit, classified by the engine's label convention.
///
/// Classification is by fixed prefix and mutually exclusive per label:
/// `HEAD -> name` marks the checked-out branch, `tag: name` marks a tag,
/// anything else is a branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefLabel {
    Head { branch: String },
    Tag { name: String },
    Branch { name: String },
}

impl RefLabel {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Some(rest) = raw.strip_prefix("HEAD") {
            let branch = rest.trim_start_matches("->").trim().to_owned();
            return Self::Head { branch };
        }
        if let Some(rest) = raw.strip_prefix("tag:") {
            return Self::Tag {
                name: rest.trim().to_owned(),
            };
        }
        Self::Branch {
            name: raw.to_owned(),
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(self, Self::Head { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Self::Tag { .. })
    }

    /// The bare name shown to the user (branch or tag name without markers).
    pub fn display_name(&self) -> &str {
        match self {
            Self::Head { branch } => branch,
            Self::Tag { name } => name,
            Self::Branch { name } => name,
        }
    }
}

impl fmt::Display for RefLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Head { branch } => write!(f, "HEAD -> {branch}"),
            Self::Tag { name } => write!(f, "tag: {name}"),
            Self::Branch { name } => f.write_str(name),
        }
    }
}

/// One entry of the commit history, immutable for the lifetime of a refresh.
///
/// Carries the engine-supplied metadata plus the precomputed [`GraphRow`]
/// describing this row of the commit graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    id: CommitId,
    abbreviated_id: SmolStr,
    parent_ids: Vec<CommitId>,
    refs: Vec<RefLabel>,
    message: String,
    author_name: String,
    author_timestamp: DateTime<FixedOffset>,
    graph: GraphRow,
}

impl CommitRecord {
    pub fn new(
        id: CommitId,
        parent_ids: Vec<CommitId>,
        message: impl Into<String>,
        author_name: impl Into<String>,
        author_timestamp: DateTime<FixedOffset>,
        graph: GraphRow,
    ) -> Self {
        let abbreviated_id = id.abbreviated();
        Self {
            id,
            abbreviated_id,
            parent_ids,
            refs: Vec::new(),
            message: message.into(),
            author_name: author_name.into(),
            author_timestamp,
            graph,
        }
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn abbreviated_id(&self) -> &str {
        &self.abbreviated_id
    }

    /// Overrides the derived short form with the engine-supplied one.
    pub fn set_abbreviated_id(&mut self, abbreviated_id: impl Into<SmolStr>) {
        self.abbreviated_id = abbreviated_id.into();
    }

    pub fn parent_ids(&self) -> &[CommitId] {
        &self.parent_ids
    }

    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() >= 2
    }

    /// Refs in display order.
    pub fn refs(&self) -> &[RefLabel] {
        &self.refs
    }

    pub fn set_refs(&mut self, refs: Vec<RefLabel>) {
        self.refs = refs;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, for single-row display.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    pub fn author_timestamp(&self) -> DateTime<FixedOffset> {
        self.author_timestamp
    }

    pub fn graph(&self) -> &GraphRow {
        &self.graph
    }
}
