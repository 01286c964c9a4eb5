// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! PNG export of the commit graph.
//!
//! Writes one `row_NNN.png` per commit plus `graph.png`, the rows stacked
//! into a single strip. Rows are rendered in parallel and written in row
//! order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use image::{GenericImage, RgbaImage};
use rayon::prelude::*;

use crate::render::{render_lane_row, GraphGeometry, LanePalette};
use crate::repo::{RepoError, Repository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub directory: PathBuf,
}

pub fn export_graph(
    repo: &dyn Repository,
    directory: &Path,
    geometry: GraphGeometry,
    palette: &LanePalette,
) -> Result<ExportSummary, ExportError> {
    let commits = repo.list_commits().map_err(ExportError::Repo)?;
    fs::create_dir_all(directory).map_err(|source| ExportError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let lane_count = commits
        .iter()
        .map(|commit| commit.graph().required_lanes())
        .max()
        .unwrap_or(1);

    let images: Vec<RgbaImage> = commits
        .par_iter()
        .map(|commit| render_lane_row(commit.graph(), lane_count, geometry, palette))
        .collect();

    for (at, image) in images.iter().enumerate() {
        let path = directory.join(format!("row_{at:03}.png"));
        image
            .save(&path)
            .map_err(|source| ExportError::Write { path, source })?;
    }

    let strip_height = geometry.row_height * images.len() as u32;
    let mut strip = RgbaImage::new(geometry.image_width(lane_count), strip_height.max(1));
    for (at, image) in images.iter().enumerate() {
        let y = geometry.row_height * at as u32;
        strip
            .copy_from(image, 0, y)
            .map_err(|source| ExportError::Write {
                path: directory.join("graph.png"),
                source,
            })?;
    }
    let strip_path = directory.join("graph.png");
    strip.save(&strip_path).map_err(|source| ExportError::Write {
        path: strip_path,
        source,
    })?;

    Ok(ExportSummary {
        rows: commits.len(),
        directory: directory.to_path_buf(),
    })
}

#[derive(Debug)]
pub enum ExportError {
    Repo(RepoError),
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "export failed: {err}"),
            Self::CreateDir { path, source } => {
                write!(f, "failed to create {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::CreateDir { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}
