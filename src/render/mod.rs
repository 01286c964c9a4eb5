// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Raster rendering of commit-graph rows.
//!
//! [`render_lane_row`] turns one precomputed [`GraphRow`] into a fixed-size
//! RGBA strip: connector segments stroked in black, the row's node disc on
//! top, colored by lane. The function is pure and deterministic, so callers
//! may render rows in parallel and reassemble in row order.

use image::{Rgba, RgbaImage};

use crate::model::{EdgeShape, GraphRow};

mod palette;

pub use palette::{LanePalette, PaletteError};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const LINE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Pixel dimensions of one graph row.
///
/// A row image is `lane_width * lane_count + node_radius * 2` wide and
/// `row_height` tall; lane `L`'s center sits at `node_radius + lane_width * L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphGeometry {
    pub lane_width: u32,
    pub row_height: u32,
    pub node_radius: u32,
    pub line_width: u32,
}

impl Default for GraphGeometry {
    fn default() -> Self {
        Self {
            lane_width: 20,
            row_height: 20,
            node_radius: 4,
            line_width: 2,
        }
    }
}

impl GraphGeometry {
    pub fn image_width(&self, lane_count: usize) -> u32 {
        self.lane_width * lane_count as u32 + self.node_radius * 2
    }

    fn lane_center_x(&self, lane: f32) -> f32 {
        self.node_radius as f32 + self.lane_width as f32 * lane
    }
}

/// Renders one row of the commit graph.
///
/// Invalid geometry (zero dimensions, zero lanes, a node lane outside
/// `lane_count`) is a caller bug and asserts; it is never a runtime error to
/// recover from.
pub fn render_lane_row(
    row: &GraphRow,
    lane_count: usize,
    geometry: GraphGeometry,
    palette: &LanePalette,
) -> RgbaImage {
    assert!(lane_count > 0, "lane_count must be positive");
    assert!(
        geometry.lane_width > 0
            && geometry.row_height > 0
            && geometry.node_radius > 0
            && geometry.line_width > 0,
        "graph geometry must have positive dimensions"
    );
    assert!(
        usize::from(row.lane()) < lane_count,
        "node lane {} outside lane count {lane_count}",
        row.lane()
    );

    let width = geometry.image_width(lane_count);
    let height = geometry.row_height;
    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);

    let mid_y = height as f32 / 2.0;
    let top = 0.0;
    let bottom = height as f32;

    for &lane in row.above().lanes(EdgeShape::Vertical) {
        let x = geometry.lane_center_x(f32::from(lane));
        stroke_segment(&mut image, geometry, (x, mid_y), (x, top));
    }
    for &lane in row.below().lanes(EdgeShape::Vertical) {
        let x = geometry.lane_center_x(f32::from(lane));
        stroke_segment(&mut image, geometry, (x, mid_y), (x, bottom));
    }
    for &lane in row.above().lanes(EdgeShape::DiagonalRight) {
        let x0 = geometry.lane_center_x(f32::from(lane));
        let x1 = geometry.lane_center_x(f32::from(lane) + 0.5);
        stroke_segment(&mut image, geometry, (x0, mid_y), (x1, top));
    }
    for &lane in row.below().lanes(EdgeShape::DiagonalRight) {
        let x0 = geometry.lane_center_x(f32::from(lane) + 1.0);
        let x1 = geometry.lane_center_x(f32::from(lane) + 0.5);
        stroke_segment(&mut image, geometry, (x0, mid_y), (x1, bottom));
    }
    for &lane in row.above().lanes(EdgeShape::DiagonalLeft) {
        let x0 = geometry.lane_center_x(f32::from(lane) + 1.0);
        let x1 = geometry.lane_center_x(f32::from(lane) + 0.5);
        stroke_segment(&mut image, geometry, (x0, mid_y), (x1, top));
    }
    for &lane in row.below().lanes(EdgeShape::DiagonalLeft) {
        let x0 = geometry.lane_center_x(f32::from(lane));
        let x1 = geometry.lane_center_x(f32::from(lane) + 0.5);
        stroke_segment(&mut image, geometry, (x0, mid_y), (x1, bottom));
    }

    draw_node(&mut image, geometry, row.lane(), palette);

    image
}

/// Strokes one segment by sampling x at every pixel row the segment spans and
/// painting a `line_width` run centered on the sample. All segments span half
/// a row vertically, so a per-row sweep is exact and deterministic.
fn stroke_segment(image: &mut RgbaImage, geometry: GraphGeometry, from: (f32, f32), to: (f32, f32)) {
    let (x0, y0) = from;
    let (x1, y1) = to;
    let y_lo = y0.min(y1);
    let y_hi = y0.max(y1);

    for py in 0..image.height() {
        let y_center = py as f32 + 0.5;
        if y_center < y_lo || y_center > y_hi {
            continue;
        }
        let t = if (y1 - y0).abs() < f32::EPSILON {
            0.0
        } else {
            (y_center - y0) / (y1 - y0)
        };
        let x = x0 + (x1 - x0) * t;
        let run_start = (x - geometry.line_width as f32 / 2.0).round() as i64;
        for dx in 0..i64::from(geometry.line_width) {
            put_pixel_checked(image, run_start + dx, i64::from(py), LINE_COLOR);
        }
    }
}

fn draw_node(image: &mut RgbaImage, geometry: GraphGeometry, lane: u16, palette: &LanePalette) {
    let color = palette.color(usize::from(lane));
    let cx = i64::from(geometry.node_radius) + i64::from(geometry.lane_width) * i64::from(lane);
    let cy = i64::from(geometry.row_height / 2);
    let radius = i64::from(geometry.node_radius);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_checked(image, cx + dx, cy + dy, color);
            }
        }
    }
}

fn put_pixel_checked(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::{render_lane_row, GraphGeometry, LanePalette, BACKGROUND, LINE_COLOR};
    use crate::model::{EdgeShape, GraphRow};

    fn geometry() -> GraphGeometry {
        GraphGeometry::default()
    }

    fn lane_x(lane: u32) -> u32 {
        geometry().node_radius + geometry().lane_width * lane
    }

    #[test]
    fn render_produces_the_contracted_image_size() {
        let row = GraphRow::new(0);
        let image = render_lane_row(&row, 3, geometry(), &LanePalette::default());
        assert_eq!(image.width(), 20 * 3 + 8);
        assert_eq!(image.height(), 20);
    }

    #[test]
    fn render_is_deterministic() {
        let mut row = GraphRow::new(1);
        row.above_mut().insert(EdgeShape::Vertical, 0);
        row.below_mut().insert(EdgeShape::DiagonalRight, 0);

        let palette = LanePalette::default();
        let first = render_lane_row(&row, 2, geometry(), &palette);
        let second = render_lane_row(&row, 2, geometry(), &palette);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn node_is_colored_by_lane_with_wraparound() {
        let palette = LanePalette::default();
        let image = render_lane_row(&GraphRow::new(1), 2, geometry(), &palette);
        assert_eq!(*image.get_pixel(lane_x(1), 10), palette.color(1));

        let wrapped = render_lane_row(&GraphRow::new(10), 11, geometry(), &palette);
        assert_eq!(*wrapped.get_pixel(lane_x(10), 10), palette.color(1));
    }

    #[test]
    fn vertical_segments_reach_the_row_edges() {
        let mut row = GraphRow::new(0);
        row.above_mut().insert(EdgeShape::Vertical, 1);
        row.below_mut().insert(EdgeShape::Vertical, 1);

        let image = render_lane_row(&row, 2, geometry(), &LanePalette::default());
        assert_eq!(*image.get_pixel(lane_x(1), 0), LINE_COLOR);
        assert_eq!(*image.get_pixel(lane_x(1), 19), LINE_COLOR);
        // Nothing stroked in the untouched corner.
        assert_eq!(*image.get_pixel(lane_x(1) + 9, 0), BACKGROUND);
    }

    #[test]
    fn node_disc_covers_segments_at_its_lane() {
        let mut row = GraphRow::new(0);
        row.above_mut().insert(EdgeShape::Vertical, 0);
        row.below_mut().insert(EdgeShape::Vertical, 0);

        let palette = LanePalette::default();
        let image = render_lane_row(&row, 1, geometry(), &palette);
        assert_eq!(*image.get_pixel(lane_x(0), 10), palette.color(0));
    }

    #[test]
    fn adjacent_rows_connect_diagonals_at_the_half_lane() {
        // A branch line leaving lane 0 down-right must meet the line entering
        // lane 1 from up-left at the shared half-lane x.
        let mut upper = GraphRow::new(0);
        upper.below_mut().insert(EdgeShape::DiagonalLeft, 0);
        let mut lower = GraphRow::new(1);
        lower.above_mut().insert(EdgeShape::DiagonalLeft, 0);

        let palette = LanePalette::default();
        let top = render_lane_row(&upper, 2, geometry(), &palette);
        let bottom = render_lane_row(&lower, 2, geometry(), &palette);

        let half_lane_x = geometry().node_radius + geometry().lane_width / 2;
        let seam_top: Vec<u32> = (0..top.width())
            .filter(|&x| *top.get_pixel(x, top.height() - 1) == LINE_COLOR)
            .collect();
        let seam_bottom: Vec<u32> = (0..bottom.width())
            .filter(|&x| *bottom.get_pixel(x, 0) == LINE_COLOR)
            .collect();
        assert!(seam_top.contains(&half_lane_x));
        assert!(seam_bottom.contains(&half_lane_x));
    }

    #[test]
    #[should_panic(expected = "lane_count must be positive")]
    fn render_asserts_on_zero_lanes() {
        let _ = render_lane_row(&GraphRow::new(0), 0, geometry(), &LanePalette::default());
    }

    #[test]
    #[should_panic(expected = "outside lane count")]
    fn render_asserts_on_node_lane_outside_range() {
        let _ = render_lane_row(&GraphRow::new(3), 2, geometry(), &LanePalette::default());
    }
}
