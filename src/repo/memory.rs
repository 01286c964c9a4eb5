// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! An engine with fixed history topology and live ref state.
//!
//! Backs both `--demo` and `--log <file>`. Commit topology never changes, but
//! branches, tags, and the checked-out branch do: a mutation updates the ref
//! tables and becomes visible on the next [`list_commits`], the same
//! refresh-after-mutation contract the real engine has.
//!
//! [`list_commits`]: Repository::list_commits

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::log::{parse_id, LogDocument, LogLoadError};
use super::{ChangeSet, LayerChange, RepoError, Repository};
use crate::model::{fixtures, CommitId, CommitRecord, RefLabel};

#[derive(Debug)]
pub struct MemoryRepository {
    state: Mutex<EngineState>,
}

#[derive(Debug)]
struct EngineState {
    commits: Vec<CommitRecord>,
    branches: BTreeMap<String, CommitId>,
    tags: BTreeMap<String, CommitId>,
    head: Option<String>,
    layers: Vec<String>,
    edits: BTreeMap<CommitId, Vec<LayerChange>>,
}

impl EngineState {
    fn contains(&self, id: &CommitId) -> bool {
        self.commits.iter().any(|commit| commit.id() == id)
    }
}

impl MemoryRepository {
    /// The built-in demo engine: the fixture history with `main` checked out,
    /// a `survey-points` branch, and two tags.
    pub fn demo() -> Self {
        let commits = fixtures::demo_history();
        let id = |at: usize| commits[at].id().clone();

        let mut branches = BTreeMap::new();
        branches.insert("main".to_owned(), id(0));
        branches.insert("survey-points".to_owned(), id(2));

        let mut tags = BTreeMap::new();
        tags.insert("v0.1".to_owned(), id(7));
        tags.insert("v0.2".to_owned(), id(5));

        let touched = [
            ("parcels", 0, 18, 3),
            ("survey_points", 412, 96, 0),
            ("survey_points", 0, 96, 0),
            ("roads", 0, 75, 0),
            ("survey_points", 412, 0, 0),
            ("roads", 868, 0, 0),
            ("parcels", 0, 1240, 0),
            ("parcels", 1240, 0, 0),
            ("parcels", 0, 0, 0),
        ];
        let mut edits = BTreeMap::new();
        for (at, (layer, inserts, updates, deletes)) in touched.into_iter().enumerate() {
            edits.insert(
                id(at),
                vec![LayerChange {
                    layer: layer.to_owned(),
                    inserts,
                    updates,
                    deletes,
                }],
            );
        }

        Self {
            state: Mutex::new(EngineState {
                commits,
                branches,
                tags,
                head: Some("main".to_owned()),
                layers: vec![
                    "parcels".to_owned(),
                    "roads".to_owned(),
                    "survey_points".to_owned(),
                ],
                edits,
            }),
        }
    }

    /// Builds an engine from a captured log document.
    pub fn from_document(document: LogDocument) -> Result<Self, LogLoadError> {
        let mut commits = Vec::with_capacity(document.commits.len());
        let mut edits = BTreeMap::new();
        for entry in &document.commits {
            let record = entry.to_record()?;
            if !entry.changes.is_empty() {
                edits.insert(record.id().clone(), entry.changes.clone());
            }
            commits.push(record);
        }

        let mut branches = BTreeMap::new();
        for (name, target) in &document.branches {
            let id = parse_id(target)?;
            if !commits.iter().any(|commit| commit.id() == &id) {
                return Err(LogLoadError::Invalid {
                    reason: format!("branch '{name}' points outside the history"),
                });
            }
            branches.insert(name.clone(), id);
        }

        let mut tags = BTreeMap::new();
        for (name, target) in &document.tags {
            let id = parse_id(target)?;
            if !commits.iter().any(|commit| commit.id() == &id) {
                return Err(LogLoadError::Invalid {
                    reason: format!("tag '{name}' points outside the history"),
                });
            }
            tags.insert(name.clone(), id);
        }

        if let Some(head) = &document.head {
            if !branches.contains_key(head) {
                return Err(LogLoadError::Invalid {
                    reason: format!("head branch '{head}' is not a branch"),
                });
            }
        }

        Ok(Self {
            state: Mutex::new(EngineState {
                commits,
                branches,
                tags,
                head: document.head,
                layers: document.layers,
                edits,
            }),
        })
    }

    fn state(&self) -> Result<MutexGuard<'_, EngineState>, RepoError> {
        self.state.lock().map_err(|_| RepoError::Unavailable {
            reason: "engine state poisoned".to_owned(),
        })
    }
}

impl Repository for MemoryRepository {
    fn list_commits(&self) -> Result<Vec<CommitRecord>, RepoError> {
        let state = self.state()?;

        let mut commits = state.commits.clone();
        for commit in &mut commits {
            let mut refs = Vec::new();
            if let Some(head) = &state.head {
                if state.branches.get(head) == Some(commit.id()) {
                    refs.push(RefLabel::Head {
                        branch: head.clone(),
                    });
                }
            }
            for (name, target) in &state.branches {
                if target == commit.id() && state.head.as_deref() != Some(name.as_str()) {
                    refs.push(RefLabel::Branch { name: name.clone() });
                }
            }
            for (name, target) in &state.tags {
                if target == commit.id() {
                    refs.push(RefLabel::Tag { name: name.clone() });
                }
            }
            commit.set_refs(refs);
        }
        Ok(commits)
    }

    fn diff(&self, newer: &CommitId, older: &CommitId) -> Result<ChangeSet, RepoError> {
        let state = self.state()?;
        let Some(newer_record) = state.commits.iter().find(|commit| commit.id() == newer) else {
            return Err(RepoError::UnknownRef {
                name: newer.to_string(),
            });
        };
        if !state.contains(older) {
            return Err(RepoError::UnknownRef {
                name: older.to_string(),
            });
        }

        // Parent diffs report exactly what the newer commit introduced;
        // arbitrary pairs merge both endpoints' edits per layer.
        let mut merged: BTreeMap<String, LayerChange> = BTreeMap::new();
        let single = [newer];
        let pair = [newer, older];
        let sides: &[&CommitId] = if newer_record.parent_ids().contains(older) {
            &single
        } else {
            &pair
        };
        for side in sides {
            for edit in state.edits.get(*side).into_iter().flatten() {
                let entry = merged
                    .entry(edit.layer.clone())
                    .or_insert_with(|| LayerChange {
                        layer: edit.layer.clone(),
                        inserts: 0,
                        updates: 0,
                        deletes: 0,
                    });
                entry.inserts += edit.inserts;
                entry.updates += edit.updates;
                entry.deletes += edit.deletes;
            }
        }

        Ok(ChangeSet::new(
            newer.clone(),
            older.clone(),
            merged.into_values().collect(),
        ))
    }

    fn create_branch(&self, name: &str, at: &CommitId) -> Result<(), RepoError> {
        let mut state = self.state()?;
        if name.trim().is_empty() {
            return Err(RepoError::OperationFailed {
                operation: "create-branch",
                reason: "branch name must not be empty".to_owned(),
            });
        }
        if state.branches.contains_key(name) {
            return Err(RepoError::OperationFailed {
                operation: "create-branch",
                reason: format!("branch '{name}' already exists"),
            });
        }
        if !state.contains(at) {
            return Err(RepoError::UnknownRef {
                name: at.to_string(),
            });
        }
        state.branches.insert(name.to_owned(), at.clone());
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<(), RepoError> {
        let mut state = self.state()?;
        if !state.branches.contains_key(name) {
            return Err(RepoError::UnknownRef {
                name: name.to_owned(),
            });
        }
        if state.head.as_deref() == Some(name) {
            return Err(RepoError::OperationFailed {
                operation: "delete-branch",
                reason: format!("cannot delete the checked-out branch '{name}'"),
            });
        }
        state.branches.remove(name);
        Ok(())
    }

    fn checkout_branch(&self, name: &str) -> Result<(), RepoError> {
        let mut state = self.state()?;
        if !state.branches.contains_key(name) {
            return Err(RepoError::UnknownRef {
                name: name.to_owned(),
            });
        }
        state.head = Some(name.to_owned());
        Ok(())
    }

    fn create_tag(&self, name: &str, at: &CommitId) -> Result<(), RepoError> {
        let mut state = self.state()?;
        if name.trim().is_empty() {
            return Err(RepoError::OperationFailed {
                operation: "create-tag",
                reason: "tag name must not be empty".to_owned(),
            });
        }
        if state.tags.contains_key(name) {
            return Err(RepoError::OperationFailed {
                operation: "create-tag",
                reason: format!("tag '{name}' already exists"),
            });
        }
        if !state.contains(at) {
            return Err(RepoError::UnknownRef {
                name: at.to_string(),
            });
        }
        state.tags.insert(name.to_owned(), at.clone());
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<(), RepoError> {
        let mut state = self.state()?;
        if state.tags.remove(name).is_none() {
            return Err(RepoError::UnknownRef {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    fn reset_current_branch(&self, to: &CommitId) -> Result<(), RepoError> {
        let mut state = self.state()?;
        let Some(head) = state.head.clone() else {
            return Err(RepoError::OperationFailed {
                operation: "reset",
                reason: "no branch is checked out".to_owned(),
            });
        };
        if !state.contains(to) {
            return Err(RepoError::UnknownRef {
                name: to.to_string(),
            });
        }
        state.branches.insert(head, to.clone());
        Ok(())
    }

    fn restore_working_layers(&self, at: &CommitId, layer: Option<&str>) -> Result<(), RepoError> {
        let state = self.state()?;
        if !state.contains(at) {
            return Err(RepoError::UnknownRef {
                name: at.to_string(),
            });
        }
        if let Some(layer) = layer {
            if !state.layers.iter().any(|known| known == layer) {
                return Err(RepoError::OperationFailed {
                    operation: "restore",
                    reason: format!("unknown working layer '{layer}'"),
                });
            }
        }
        Ok(())
    }

    fn working_layers(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.state()?.layers.clone())
    }
}
