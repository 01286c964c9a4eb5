// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo history.
//!
//! Nine commits on two lanes: a `survey-points` feature branch forked at
//! `c3`, merged back by `c8`, two tags, and a root commit. Newest first, the
//! order the engine ships.

use chrono::{DateTime, FixedOffset};

use super::commit::CommitRecord;
use super::graph::{EdgeShape, GraphRow};
use super::ids::CommitId;

pub(crate) const DEMO_IDS: [&str; 9] = [
    "9e4d1c7b2a8f5e3d6c0b9a4f1e7d2c5b8a3f6e90", // c9  Update parcel boundaries
    "8c2f6a1d9e4b7c3a5f8d2e6b0c9a7f4e1d5b3a82", // c8  merge survey-points
    "6a9e3d5c1f8b4a7e2d6c9f3b5a8e1d4c7b2f6e05", // c6  survey-points tip
    "7f3b8e2a6d1c9f4b7a3e8d2c6f1b9a4e7d3c8b51", // c7  road classification fix
    "5d8a2f6c3b9e1d4a7c5f8b2e6d9a3c1f4b7e8d20", // c5  survey points layer
    "4b7d1e9a5c3f8b2d6a4e7c1f9b3d8a5e2c6f0b94", // c4  roads import (v0.2)
    "3e6c9b4f2a8d5e1c7b3f6a9d4e2c8b5f1a7d3e68", // c3  attribute normalize
    "2a5f8c3e6b1d9a4f7c2e5b8d3a6f1c9e4b7a2d53", // c2  parcels import (v0.1)
    "1c4e7a2d5b8f3c6e9a1d4b7f2e5c8a3d6b9f1e47", // c1  root
];

fn cid(index: usize) -> CommitId {
    CommitId::new(DEMO_IDS[index]).expect("demo commit id")
}

fn ts(raw: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(raw).expect("demo timestamp")
}

fn row(lane: u16, above: &[(EdgeShape, u16)], below: &[(EdgeShape, u16)]) -> GraphRow {
    let mut row = GraphRow::new(lane);
    for &(shape, lane) in above {
        row.above_mut().insert(shape, lane);
    }
    for &(shape, lane) in below {
        row.below_mut().insert(shape, lane);
    }
    row
}

/// The demo commit list, without refs (the engine decorates those from its
/// live ref tables).
pub(crate) fn demo_history() -> Vec<CommitRecord> {
    use EdgeShape::{DiagonalLeft, DiagonalRight, Vertical};

    let v = Vertical;
    vec![
        CommitRecord::new(
            cid(0),
            vec![cid(1)],
            "Update parcel boundaries after survey",
            "alice",
            ts("2023-06-14T09:41:00+00:00"),
            row(0, &[], &[(v, 0)]),
        ),
        CommitRecord::new(
            cid(1),
            vec![cid(3), cid(2)],
            "Merge branch 'survey-points'",
            "alice",
            ts("2023-06-01T15:02:00+00:00"),
            row(0, &[(v, 0)], &[(v, 0), (DiagonalLeft, 0)]),
        ),
        CommitRecord::new(
            cid(2),
            vec![cid(4)],
            "Snap survey points to parcel corners",
            "carol",
            ts("2023-05-05T11:27:00+00:00"),
            row(1, &[(v, 0), (DiagonalLeft, 0)], &[(v, 0), (v, 1)]),
        ),
        CommitRecord::new(
            cid(3),
            vec![cid(5)],
            "Fix road classification codes",
            "bob",
            ts("2023-05-11T17:55:00+00:00"),
            row(0, &[(v, 0), (v, 1)], &[(v, 0), (v, 1)]),
        ),
        CommitRecord::new(
            cid(4),
            vec![cid(6)],
            "Add survey points layer",
            "carol",
            ts("2023-04-20T08:13:00+00:00"),
            row(1, &[(v, 0), (v, 1)], &[(v, 0), (v, 1)]),
        ),
        CommitRecord::new(
            cid(5),
            vec![cid(6)],
            "Import roads layer",
            "bob",
            ts("2023-04-18T14:30:00+00:00"),
            row(0, &[(v, 0), (v, 1)], &[(v, 0), (DiagonalRight, 0)]),
        ),
        CommitRecord::new(
            cid(6),
            vec![cid(7)],
            "Normalize parcel attribute names",
            "alice",
            ts("2023-04-02T10:08:00+00:00"),
            row(0, &[(v, 0), (DiagonalRight, 0)], &[(v, 0)]),
        ),
        CommitRecord::new(
            cid(7),
            vec![cid(8)],
            "Import parcels layer",
            "alice",
            ts("2023-03-10T13:45:00+00:00"),
            row(0, &[(v, 0)], &[(v, 0)]),
        ),
        CommitRecord::new(
            cid(8),
            Vec::new(),
            "Initial repository structure",
            "bob",
            ts("2023-03-02T09:00:00+00:00"),
            row(0, &[(v, 0)], &[]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::demo_history;

    #[test]
    fn demo_history_parent_ids_stay_inside_the_history() {
        let commits = demo_history();
        for commit in &commits {
            for parent in commit.parent_ids() {
                assert!(
                    commits.iter().any(|other| other.id() == parent),
                    "dangling parent {parent} on {}",
                    commit.abbreviated_id()
                );
            }
        }
    }

    #[test]
    fn demo_history_has_one_merge_and_one_root() {
        let commits = demo_history();
        assert_eq!(commits.iter().filter(|c| c.is_merge()).count(), 1);
        assert_eq!(commits.iter().filter(|c| c.is_root()).count(), 1);
    }

    #[test]
    fn demo_history_needs_two_lanes() {
        let lanes = demo_history()
            .iter()
            .map(|c| c.graph().required_lanes())
            .max()
            .expect("non-empty history");
        assert_eq!(lanes, 2);
    }
}
