// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The history browser controller.
//!
//! [`HistoryBrowser`] is a sans-IO state machine: the host starts engine
//! calls off the UI loop and feeds results back through the `complete_*`
//! methods, so every model mutation happens on the UI thread and a torn model
//! is never observable. A failed refresh or action keeps the last known-good
//! contents.

use image::RgbaImage;
use rayon::prelude::*;

use crate::actions::{resolve, ActionKind, ResolvedAction, Selection};
use crate::history::{CommitFilter, HistoryListModel};
use crate::model::{CommitId, CommitRecord};
use crate::render::{render_lane_row, GraphGeometry, LanePalette};
use crate::repo::{ChangeSet, RepoError, Repository};

/// Controller phase. `Failed` is re-enterable: any new refresh or action
/// leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserPhase {
    Idle,
    Loading,
    Ready,
    ActionInFlight,
    Failed,
}

/// What a dispatched action produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// A diff action: display the change-set, no refresh.
    Changes(ChangeSet),
    /// A mutation: the engine changed, pull a fresh commit list.
    Mutated { message: String },
}

/// What the host should do after feeding an action result back.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionFollowUp {
    ShowChanges(ChangeSet),
    RefreshRequired { message: String },
    Failed { message: String },
}

/// Extra user input an [`ActionKind`] needs at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionInput {
    None,
    Name(String),
    /// A working layer choice; `None` means all layers.
    Layer(Option<String>),
}

pub struct HistoryBrowser {
    model: HistoryListModel,
    lane_images: Vec<RgbaImage>,
    lane_count: usize,
    geometry: GraphGeometry,
    palette: LanePalette,
    selection: Vec<CommitId>,
    phase: BrowserPhase,
    last_error: Option<String>,
}

impl HistoryBrowser {
    pub fn new(geometry: GraphGeometry, palette: LanePalette) -> Self {
        Self {
            model: HistoryListModel::new(),
            lane_images: Vec::new(),
            lane_count: 1,
            geometry,
            palette,
            selection: Vec::new(),
            phase: BrowserPhase::Idle,
            last_error: None,
        }
    }

    pub fn phase(&self) -> BrowserPhase {
        self.phase
    }

    pub fn model(&self) -> &HistoryListModel {
        &self.model
    }

    pub fn geometry(&self) -> GraphGeometry {
        self.geometry
    }

    pub fn palette(&self) -> &LanePalette {
        &self.palette
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// The rendered lane strip for row `at`, replaced wholesale on refresh.
    pub fn lane_image(&self, at: usize) -> Option<&RgbaImage> {
        self.lane_images.get(at)
    }

    pub fn lane_images(&self) -> &[RgbaImage] {
        &self.lane_images
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_refresh(&mut self) {
        self.phase = BrowserPhase::Loading;
    }

    /// Applies the engine's answer to a refresh.
    ///
    /// On success the list model is rebuilt wholesale and every row's lane
    /// image re-rendered (rows are independent, so rendering fans out across
    /// the rayon pool and reassembles in row order). A selection pointing at
    /// ids that no longer exist is stale and gets cleared. On failure the
    /// previous contents stay untouched.
    pub fn complete_refresh(&mut self, result: Result<Vec<CommitRecord>, RepoError>) {
        match result {
            Ok(commits) => {
                let lane_count = commits
                    .iter()
                    .map(|commit| commit.graph().required_lanes())
                    .max()
                    .unwrap_or(1);
                self.model.load(commits);
                self.lane_count = lane_count;

                let geometry = self.geometry;
                let palette = &self.palette;
                self.lane_images = self
                    .model
                    .records()
                    .par_iter()
                    .map(|commit| render_lane_row(commit.graph(), lane_count, geometry, palette))
                    .collect();

                if self
                    .selection
                    .iter()
                    .any(|id| self.model.lookup(id).is_err())
                {
                    self.selection.clear();
                }

                self.phase = BrowserPhase::Ready;
                self.last_error = None;
            }
            Err(err) => {
                self.phase = BrowserPhase::Failed;
                self.last_error = Some(err.to_string());
            }
        }
    }

    pub fn set_filter(&mut self, filter: CommitFilter) {
        self.model.set_filter(filter);
    }

    /// Replaces the selection, in selection order. Ids not present in the
    /// current model are stale; the whole selection is cleared rather than
    /// silently truncated.
    pub fn set_selection(&mut self, ids: Vec<CommitId>) {
        if ids.iter().all(|id| self.model.lookup(id).is_ok()) {
            self.selection = ids;
        } else {
            self.selection.clear();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &[CommitId] {
        &self.selection
    }

    pub fn selected_records(&self) -> Vec<CommitRecord> {
        self.selection
            .iter()
            .filter_map(|id| self.model.lookup(id).ok())
            .cloned()
            .collect()
    }

    /// The context menu for the current selection.
    pub fn resolve_actions(&self) -> Vec<ResolvedAction> {
        resolve(&Selection::from_records(self.selected_records()))
    }

    pub fn begin_action(&mut self) {
        self.phase = BrowserPhase::ActionInFlight;
    }

    /// Applies the engine's answer to a dispatched action.
    pub fn complete_action(&mut self, result: Result<ActionOutcome, RepoError>) -> ActionFollowUp {
        match result {
            Ok(ActionOutcome::Changes(changes)) => {
                self.phase = BrowserPhase::Ready;
                ActionFollowUp::ShowChanges(changes)
            }
            Ok(ActionOutcome::Mutated { message }) => {
                self.phase = BrowserPhase::Loading;
                ActionFollowUp::RefreshRequired { message }
            }
            Err(err) => {
                let message = err.to_string();
                self.phase = BrowserPhase::Failed;
                self.last_error = Some(message.clone());
                ActionFollowUp::Failed { message }
            }
        }
    }
}

/// Runs one resolved action against the engine.
///
/// Dispatch matches on [`ActionKind`]; labels are display-only. This call can
/// take as long as the engine takes, so hosts run it off the UI loop.
pub fn dispatch_action(
    repo: &dyn Repository,
    kind: &ActionKind,
    input: &ActionInput,
) -> Result<ActionOutcome, RepoError> {
    match kind {
        ActionKind::DiffAgainstParent { commit, parent } => {
            repo.diff(commit, parent).map(ActionOutcome::Changes)
        }
        ActionKind::DiffBetween { newer, older } => {
            repo.diff(newer, older).map(ActionOutcome::Changes)
        }
        ActionKind::ResetCurrentBranch { to } => repo.reset_current_branch(to).map(|()| mutated(
            "Branch correctly reset to selected commit",
        )),
        ActionKind::CreateBranchAt { at } => {
            let name = require_name(input, "create-branch")?;
            repo.create_branch(name, at)
                .map(|()| mutated("Branch correctly created"))
        }
        ActionKind::CreateTagAt { at } => {
            let name = require_name(input, "create-tag")?;
            repo.create_tag(name, at)
                .map(|()| mutated("Tag correctly created"))
        }
        ActionKind::RestoreWorkingLayers { at } => {
            let ActionInput::Layer(layer) = input else {
                return Err(RepoError::OperationFailed {
                    operation: "restore",
                    reason: "missing layer choice".to_owned(),
                });
            };
            repo.restore_working_layers(at, layer.as_deref())
                .map(|()| mutated("Working layers correctly restored"))
        }
        ActionKind::SwitchToBranch { name } => repo
            .checkout_branch(name)
            .map(|()| mutated(format!("Correctly switched to branch '{name}'"))),
        ActionKind::DeleteBranch { name } => repo
            .delete_branch(name)
            .map(|()| mutated(format!("Correctly deleted branch '{name}'"))),
        ActionKind::DeleteTag { name } => repo
            .delete_tag(name)
            .map(|()| mutated(format!("Correctly deleted tag '{name}'"))),
    }
}

fn mutated(message: impl Into<String>) -> ActionOutcome {
    ActionOutcome::Mutated {
        message: message.into(),
    }
}

fn require_name<'a>(
    input: &'a ActionInput,
    operation: &'static str,
) -> Result<&'a str, RepoError> {
    match input {
        ActionInput::Name(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(RepoError::OperationFailed {
            operation,
            reason: "missing name".to_owned(),
        }),
    }
}
