// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::style::{Color, Modifier, Style};

use crate::model::RefLabel;
use crate::render::LanePalette;

/// Terminal styling derived from the shared lane palette, so the cell graph
/// and the raster graph agree on node colors.
#[derive(Debug, Clone)]
pub(crate) struct TuiTheme {
    lane_colors: Vec<Color>,
}

impl TuiTheme {
    pub(crate) fn from_palette(palette: &LanePalette) -> Self {
        let lane_colors = (0..palette.len())
            .map(|lane| {
                let (r, g, b) = palette.rgb(lane);
                Color::Rgb(r, g, b)
            })
            .collect();
        Self { lane_colors }
    }

    pub(crate) fn lane_color(&self, lane: usize) -> Color {
        self.lane_colors[lane % self.lane_colors.len()]
    }

    pub(crate) fn base_style(&self) -> Style {
        Style::default()
    }

    pub(crate) fn header_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn cursor_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn picked_style(&self) -> Style {
        self.base_style()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(Color::Red)
    }

    pub(crate) fn toast_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub(crate) fn hint_key_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub(crate) fn hint_label_style(&self) -> Style {
        self.base_style().fg(Color::Gray)
    }

    /// Ref badges keep the original viewer's color coding: the checked-out
    /// branch on red, tags on yellow, other branches on light red.
    pub(crate) fn ref_style(&self, label: &RefLabel) -> Style {
        match label {
            RefLabel::Head { .. } => self
                .base_style()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
            RefLabel::Tag { .. } => self.base_style().fg(Color::Black).bg(Color::Yellow),
            RefLabel::Branch { .. } => self.base_style().fg(Color::White).bg(Color::LightRed),
        }
    }
}
