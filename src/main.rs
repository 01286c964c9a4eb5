// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galatea CLI entrypoint.
//!
//! By default this browses the built-in demo history in the TUI. Point it at
//! a captured engine log with `--log <file>`, or render the graph to PNG
//! files with `--export <dir>` instead of opening the TUI.
//!
//! `GALATEA_PALETTE` (comma-separated `#RRGGBB` entries) overrides the lane
//! palette for both surfaces.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use galatea::export::export_graph;
use galatea::render::{GraphGeometry, LanePalette};
use galatea::repo::{load_document, MemoryRepository, Repository};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--demo] [--export <dir>]\n  {program} [--log] <file> [--export <dir>]\n\nTUI mode (default) browses the history interactively.\n\n--demo uses the built-in demo history (the default when no log is given)\nand cannot be combined with a log file.\n--log <file> loads a captured engine log document (JSON).\n--export <dir> renders per-row PNGs plus a stacked graph.png and exits."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    log_file: Option<String>,
    export_dir: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--log" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                let file = args.next().ok_or(())?;
                options.log_file = Some(file);
            }
            "--export" => {
                if options.export_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.export_dir = Some(dir);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(arg);
            }
        }
    }

    if options.demo && options.log_file.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "galatea".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let palette = LanePalette::from_env()?;

        let repo: Arc<dyn Repository> = if let Some(path) = &options.log_file {
            let document = load_document(Path::new(path))?;
            Arc::new(MemoryRepository::from_document(document)?)
        } else {
            Arc::new(MemoryRepository::demo())
        };

        if let Some(directory) = &options.export_dir {
            let summary = export_graph(
                repo.as_ref(),
                Path::new(directory),
                GraphGeometry::default(),
                &palette,
            )?;
            println!(
                "galatea: exported {} rows to {}",
                summary.rows,
                summary.directory.display()
            );
            return Ok(());
        }

        galatea::tui::run_with_repository(repo, palette)
    })();

    if let Err(err) = result {
        eprintln!("galatea: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(options.log_file.is_none());
        assert!(options.export_dir.is_none());
    }

    #[test]
    fn parses_log_flag_and_positional_file() {
        let options = parse_options(["--log".to_owned(), "log.json".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.log_file.as_deref(), Some("log.json"));

        let options =
            parse_options(["log.json".to_owned()].into_iter()).expect("parse options");
        assert_eq!(options.log_file.as_deref(), Some("log.json"));
    }

    #[test]
    fn parses_export_with_either_source() {
        let options = parse_options(
            ["--demo".to_owned(), "--export".to_owned(), "out".to_owned()].into_iter(),
        )
        .expect("parse options");
        assert!(options.demo);
        assert_eq!(options.export_dir.as_deref(), Some("out"));

        let options = parse_options(
            ["log.json".to_owned(), "--export".to_owned(), "out".to_owned()].into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.log_file.as_deref(), Some("log.json"));
        assert_eq!(options.export_dir.as_deref(), Some("out"));
    }

    #[test]
    fn rejects_demo_with_a_log_file() {
        parse_options(["--demo".to_owned(), "log.json".to_owned()].into_iter()).unwrap_err();
        parse_options(
            ["--log".to_owned(), "log.json".to_owned(), "--demo".to_owned()].into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags_and_missing_values() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();
        parse_options(["--log".to_owned()].into_iter()).unwrap_err();
        parse_options(["--export".to_owned()].into_iter()).unwrap_err();
        parse_options(
            ["one.json".to_owned(), "two.json".to_owned()].into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_unknown_flags() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
    }
}
