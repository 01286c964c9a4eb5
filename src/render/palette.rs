// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use image::Rgba;

/// The node color cycle, indexed by lane.
///
/// Lanes beyond the palette wrap around and visually alias; that is an
/// accepted cosmetic limit, not a correctness problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanePalette {
    colors: Vec<Rgba<u8>>,
}

impl Default for LanePalette {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgba([255, 0, 0, 255]),
                Rgba([0, 255, 0, 255]),
                Rgba([0, 0, 255, 255]),
                Rgba([0, 0, 0, 255]),
                Rgba([255, 166, 0, 255]),
                Rgba([0, 128, 0, 255]),
                Rgba([0, 0, 128, 255]),
                Rgba([0, 255, 255, 255]),
                Rgba([255, 0, 255, 255]),
            ],
        }
    }
}

impl LanePalette {
    /// Reads the `GALATEA_PALETTE` override (comma-separated `#RRGGBB`
    /// entries). Unset or blank means the built-in palette.
    pub fn from_env() -> Result<Self, PaletteError> {
        const NAME: &str = "GALATEA_PALETTE";
        let value = match env::var(NAME) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(PaletteError::InvalidEnv {
                    name: NAME.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        Self::parse_list(trimmed).map_err(|error| PaletteError::InvalidEnv {
            name: NAME.to_owned(),
            value: format!("{trimmed} ({error})"),
        })
    }

    pub fn parse_list(value: &str) -> Result<Self, String> {
        let mut colors = Vec::new();
        for part in value.split(',') {
            colors.push(parse_hex_color(part)?);
        }
        if colors.is_empty() {
            return Err("expected at least one color".to_owned());
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `palette[lane mod len]`, the wraparound lookup.
    pub fn color(&self, lane: usize) -> Rgba<u8> {
        self.colors[lane % self.colors.len()]
    }

    pub fn rgb(&self, lane: usize) -> (u8, u8, u8) {
        let Rgba([r, g, b, _]) = self.color(lane);
        (r, g, b)
    }
}

fn parse_hex_color(value: &str) -> Result<Rgba<u8>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(Rgba([r, g, b, 255]))
}

#[derive(Debug, Clone)]
pub enum PaletteError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for PaletteError {}
