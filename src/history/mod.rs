// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The ordered commit list behind the browser table.
//!
//! The model never re-sorts: row order is exactly what the engine supplied.
//! Filtering flags rows invisible instead of removing them, which keeps row
//! indices (and with them scroll position and selection) stable.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use memchr::memmem;

use crate::model::{CommitId, CommitRecord};

/// Free-text plus date-window filter.
///
/// Text matches case-insensitively as a substring of the message, the author
/// name, or the full id. The date window is exclusive on both ends: a commit
/// authored exactly on `start_date` or `end_date` is hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFilter {
    needle: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Default for CommitFilter {
    fn default() -> Self {
        Self::new("", NaiveDate::MIN, NaiveDate::MAX)
    }
}

impl CommitFilter {
    pub fn new(text: impl AsRef<str>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            needle: text.as_ref().trim().to_lowercase(),
            start_date,
            end_date,
        }
    }

    pub fn text(&self) -> &str {
        &self.needle
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_pass_through(&self) -> bool {
        self.needle.is_empty()
            && self.start_date == NaiveDate::MIN
            && self.end_date == NaiveDate::MAX
    }

    pub fn matches(&self, record: &CommitRecord) -> bool {
        let text_hit = self.needle.is_empty()
            || [record.message(), record.author_name(), record.id().as_str()]
                .into_iter()
                .any(|haystack| {
                    memmem::find(haystack.to_lowercase().as_bytes(), self.needle.as_bytes())
                        .is_some()
                });

        let date = record.author_timestamp().date_naive();
        text_hit && date > self.start_date && date < self.end_date
    }
}

/// Ordered commit rows plus per-row visibility.
///
/// Rebuilt wholesale by [`load`](Self::load) on every refresh; a partially
/// rebuilt model is never observable.
#[derive(Debug, Clone, Default)]
pub struct HistoryListModel {
    records: Vec<CommitRecord>,
    visible: Vec<bool>,
    index: BTreeMap<CommitId, usize>,
    filter: CommitFilter,
}

impl HistoryListModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the model contents atomically, keeping the current filter.
    pub fn load(&mut self, commits: Vec<CommitRecord>) {
        let mut index = BTreeMap::new();
        for (at, commit) in commits.iter().enumerate() {
            index.insert(commit.id().clone(), at);
        }
        let visible = commits.iter().map(|c| self.filter.matches(c)).collect();

        self.records = commits;
        self.visible = visible;
        self.index = index;
    }

    /// Recomputes every row's visibility flag. Idempotent.
    pub fn set_filter(&mut self, filter: CommitFilter) {
        self.filter = filter;
        for (at, record) in self.records.iter().enumerate() {
            self.visible[at] = self.filter.matches(record);
        }
    }

    pub fn filter(&self) -> &CommitFilter {
        &self.filter
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    pub fn record(&self, at: usize) -> Option<&CommitRecord> {
        self.records.get(at)
    }

    pub fn is_visible(&self, at: usize) -> bool {
        self.visible.get(at).copied().unwrap_or(false)
    }

    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter_map(|(at, &visible)| visible.then_some(at))
    }

    pub fn visible_len(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }

    pub fn lookup(&self, id: &CommitId) -> Result<&CommitRecord, LookupError> {
        self.index
            .get(id)
            .map(|&at| &self.records[at])
            .ok_or_else(|| LookupError::NotFound { id: id.clone() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    NotFound { id: CommitId },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "commit {id} is not in the current history"),
        }
    }
}

impl std::error::Error for LookupError {}
