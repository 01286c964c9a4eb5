// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Precomputed per-row graph description.
//!
//! The layout solver lives in the engine; this model only carries its output:
//! which lanes need a vertical or diagonal segment above/below each row, and
//! which lane the row's own node occupies.

use smallvec::{Array, SmallVec};

/// Insert `lane` into a sorted lane list, keeping it sorted and deduplicated.
fn insert_sorted<A: Array<Item = u16>>(lanes: &mut SmallVec<A>, lane: u16) {
    if let Err(at) = lanes.binary_search(&lane) {
        lanes.insert(at, lane);
    }
}

/// Shape of a connector segment within one half-row.
///
/// `DiagonalRight` is the `/` direction (toward higher lanes going down),
/// `DiagonalLeft` the `\` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeShape {
    Vertical,
    DiagonalRight,
    DiagonalLeft,
}

/// The lanes that need a segment of each shape in one half-row.
///
/// Lane lists are short in practice (a handful of concurrent branches), so
/// they live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    vertical: SmallVec<[u16; 4]>,
    diagonal_right: SmallVec<[u16; 2]>,
    diagonal_left: SmallVec<[u16; 2]>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: EdgeShape, lane: u16) {
        match shape {
            EdgeShape::Vertical => insert_sorted(&mut self.vertical, lane),
            EdgeShape::DiagonalRight => insert_sorted(&mut self.diagonal_right, lane),
            EdgeShape::DiagonalLeft => insert_sorted(&mut self.diagonal_left, lane),
        }
    }

    pub fn lanes(&self, shape: EdgeShape) -> &[u16] {
        match shape {
            EdgeShape::Vertical => &self.vertical,
            EdgeShape::DiagonalRight => &self.diagonal_right,
            EdgeShape::DiagonalLeft => &self.diagonal_left,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty() && self.diagonal_right.is_empty() && self.diagonal_left.is_empty()
    }
}

/// One row of the commit graph: the node's lane plus the segments entering
/// from the row above and leaving toward the row below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphRow {
    lane: u16,
    above: EdgeSet,
    below: EdgeSet,
}

impl GraphRow {
    pub fn new(lane: u16) -> Self {
        Self {
            lane,
            above: EdgeSet::new(),
            below: EdgeSet::new(),
        }
    }

    pub fn lane(&self) -> u16 {
        self.lane
    }

    pub fn above(&self) -> &EdgeSet {
        &self.above
    }

    pub fn above_mut(&mut self) -> &mut EdgeSet {
        &mut self.above
    }

    pub fn below(&self) -> &EdgeSet {
        &self.below
    }

    pub fn below_mut(&mut self) -> &mut EdgeSet {
        &mut self.below
    }

    /// Smallest lane count that fits every segment of this row.
    ///
    /// Diagonals anchored one lane to the right of their index (`\` above,
    /// `/` below) occupy lane `L + 1`.
    pub fn required_lanes(&self) -> usize {
        let mut max_lane = self.lane;
        for &lane in self.above.lanes(EdgeShape::Vertical) {
            max_lane = max_lane.max(lane);
        }
        for &lane in self.below.lanes(EdgeShape::Vertical) {
            max_lane = max_lane.max(lane);
        }
        for &lane in self.above.lanes(EdgeShape::DiagonalRight) {
            max_lane = max_lane.max(lane);
        }
        for &lane in self.below.lanes(EdgeShape::DiagonalLeft) {
            max_lane = max_lane.max(lane);
        }
        for &lane in self.above.lanes(EdgeShape::DiagonalLeft) {
            max_lane = max_lane.max(lane + 1);
        }
        for &lane in self.below.lanes(EdgeShape::DiagonalRight) {
            max_lane = max_lane.max(lane + 1);
        }
        usize::from(max_lane) + 1
    }
}
