// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection-to-action resolution.
//!
//! [`resolve`] turns the current selection into the ordered list of legal
//! context actions. It only builds the candidate list; dispatching a chosen
//! action to the engine is the browser's job, and it matches on
//! [`ActionKind`], never on the display label.

use crate::model::{CommitId, CommitRecord};

/// The current selection, as a named state per cardinality.
///
/// `Pair` keeps the records in the order they were selected: the two-commit
/// diff treats the first-selected commit as the "newer" side, so click order
/// controls diff direction. More than two selected commits is the explicit
/// `Unsupported` state, not a fallthrough.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    None,
    Single(CommitRecord),
    Pair(CommitRecord, CommitRecord),
    Unsupported(usize),
}

impl Selection {
    pub fn from_records(records: Vec<CommitRecord>) -> Self {
        let mut records = records.into_iter();
        match (records.next(), records.next()) {
            (None, _) => Self::None,
            (Some(first), None) => Self::Single(first),
            (Some(first), Some(second)) => {
                let rest = records.count();
                if rest == 0 {
                    Self::Pair(first, second)
                } else {
                    Self::Unsupported(rest + 2)
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Pair(_, _) => 2,
            Self::Unsupported(count) => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// What an action does, carrying the ids it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    DiffAgainstParent { commit: CommitId, parent: CommitId },
    DiffBetween { newer: CommitId, older: CommitId },
    ResetCurrentBranch { to: CommitId },
    CreateBranchAt { at: CommitId },
    CreateTagAt { at: CommitId },
    RestoreWorkingLayers { at: CommitId },
    SwitchToBranch { name: String },
    DeleteBranch { name: String },
    DeleteTag { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionIcon {
    Diff,
    Reset,
    CreateBranch,
    CreateTag,
    Restore,
    Checkout,
    Delete,
}

/// One entry of the context menu, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAction {
    pub kind: ActionKind,
    pub label: String,
    pub icon: ActionIcon,
}

impl ResolvedAction {
    fn new(kind: ActionKind, label: impl Into<String>, icon: ActionIcon) -> Self {
        Self {
            kind,
            label: label.into(),
            icon,
        }
    }
}

/// Builds the ordered action list for a selection.
///
/// Single selection: diff entries derived from the parent count (none for a
/// root commit), the four topology-independent actions, then per-ref entries
/// for every non-HEAD ref. Pair selection: exactly the order-dependent
/// two-commit diff. Anything else resolves to no actions.
pub fn resolve(selection: &Selection) -> Vec<ResolvedAction> {
    match selection {
        Selection::None | Selection::Unsupported(_) => Vec::new(),
        Selection::Single(commit) => resolve_single(commit),
        Selection::Pair(first, second) => vec![ResolvedAction::new(
            ActionKind::DiffBetween {
                newer: first.id().clone(),
                older: second.id().clone(),
            },
            "Show changes between these commits...",
            ActionIcon::Diff,
        )],
    }
}

fn resolve_single(commit: &CommitRecord) -> Vec<ResolvedAction> {
    let mut actions = Vec::new();

    match commit.parent_ids() {
        [] => {}
        [parent] => actions.push(ResolvedAction::new(
            ActionKind::DiffAgainstParent {
                commit: commit.id().clone(),
                parent: parent.clone(),
            },
            "Show changes introduced by this commit...",
            ActionIcon::Diff,
        )),
        parents => {
            for parent in parents {
                actions.push(ResolvedAction::new(
                    ActionKind::DiffAgainstParent {
                        commit: commit.id().clone(),
                        parent: parent.clone(),
                    },
                    format!(
                        "Show diff between this commit and parent {}...",
                        parent.abbreviated()
                    ),
                    ActionIcon::Diff,
                ));
            }
        }
    }

    actions.push(ResolvedAction::new(
        ActionKind::ResetCurrentBranch {
            to: commit.id().clone(),
        },
        "Reset current branch to this commit",
        ActionIcon::Reset,
    ));
    actions.push(ResolvedAction::new(
        ActionKind::CreateBranchAt {
            at: commit.id().clone(),
        },
        "Create branch at this commit...",
        ActionIcon::CreateBranch,
    ));
    actions.push(ResolvedAction::new(
        ActionKind::CreateTagAt {
            at: commit.id().clone(),
        },
        "Create tag at this commit...",
        ActionIcon::CreateTag,
    ));
    actions.push(ResolvedAction::new(
        ActionKind::RestoreWorkingLayers {
            at: commit.id().clone(),
        },
        "Restore working layers to this version...",
        ActionIcon::Restore,
    ));

    for ref_label in commit.refs() {
        if ref_label.is_head() {
            continue;
        }
        let name = ref_label.display_name();
        if ref_label.is_tag() {
            actions.push(ResolvedAction::new(
                ActionKind::DeleteTag {
                    name: name.to_owned(),
                },
                format!("Delete tag '{name}'"),
                ActionIcon::Delete,
            ));
        } else {
            actions.push(ResolvedAction::new(
                ActionKind::SwitchToBranch {
                    name: name.to_owned(),
                },
                format!("Switch to branch '{name}'"),
                ActionIcon::Checkout,
            ));
            actions.push(ResolvedAction::new(
                ActionKind::DeleteBranch {
                    name: name.to_owned(),
                },
                format!("Delete branch '{name}'"),
                ActionIcon::Delete,
            ));
        }
    }

    actions
}
