// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset};
use galatea::model::{CommitId, CommitRecord, EdgeShape, GraphRow};

pub mod graph {
    use galatea::model::{EdgeShape, GraphRow};

    #[derive(Clone, Copy)]
    pub enum Case {
        Straight,
        MergeRow,
        WideBusy,
    }

    impl Case {
        pub fn id(self) -> &'static str {
            match self {
                Self::Straight => "straight",
                Self::MergeRow => "merge_row",
                Self::WideBusy => "wide_busy",
            }
        }
    }

    /// Returns the row plus the lane count to render it at.
    pub fn fixture(case: Case) -> (GraphRow, usize) {
        match case {
            Case::Straight => {
                let mut row = GraphRow::new(0);
                row.above_mut().insert(EdgeShape::Vertical, 0);
                row.below_mut().insert(EdgeShape::Vertical, 0);
                (row, 1)
            }
            Case::MergeRow => {
                let mut row = GraphRow::new(0);
                row.above_mut().insert(EdgeShape::Vertical, 0);
                row.below_mut().insert(EdgeShape::Vertical, 0);
                row.below_mut().insert(EdgeShape::DiagonalLeft, 0);
                row.above_mut().insert(EdgeShape::Vertical, 1);
                (row, 2)
            }
            Case::WideBusy => {
                let mut row = GraphRow::new(6);
                for lane in 0..12 {
                    row.above_mut().insert(EdgeShape::Vertical, lane);
                    row.below_mut().insert(EdgeShape::Vertical, lane);
                }
                row.above_mut().insert(EdgeShape::DiagonalRight, 3);
                row.below_mut().insert(EdgeShape::DiagonalRight, 8);
                row.above_mut().insert(EdgeShape::DiagonalLeft, 9);
                row.below_mut().insert(EdgeShape::DiagonalLeft, 2);
                (row, 12)
            }
        }
    }
}

/// A synthetic linear history, sized for filter benchmarks.
pub fn linear_history(commits: usize) -> Vec<CommitRecord> {
    let epoch: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339("2023-01-01T00:00:00+00:00").expect("timestamp");

    (0..commits)
        .map(|at| {
            let id = CommitId::new(format!("{at:040x}")).expect("commit id");
            let parents = if at + 1 < commits {
                vec![CommitId::new(format!("{:040x}", at + 1)).expect("parent id")]
            } else {
                Vec::new()
            };
            let mut graph = GraphRow::new(0);
            graph.above_mut().insert(EdgeShape::Vertical, 0);
            if at + 1 < commits {
                graph.below_mut().insert(EdgeShape::Vertical, 0);
            }
            CommitRecord::new(
                id,
                parents,
                format!("Update parcel batch {at}"),
                if at % 3 == 0 { "alice" } else { "bob" },
                epoch + Duration::minutes(at as i64),
                graph,
            )
        })
        .collect()
}
