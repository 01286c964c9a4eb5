// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use galatea::actions::ActionKind;
use galatea::browser::{
    dispatch_action, ActionFollowUp, ActionInput, BrowserPhase, HistoryBrowser,
};
use galatea::export::export_graph;
use galatea::history::CommitFilter;
use galatea::model::RefLabel;
use galatea::render::{GraphGeometry, LanePalette};
use galatea::repo::{load_document, MemoryRepository, Repository};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn ready_browser(repo: &dyn Repository) -> HistoryBrowser {
    let mut browser = HistoryBrowser::new(GraphGeometry::default(), LanePalette::default());
    browser.begin_refresh();
    browser.complete_refresh(repo.list_commits());
    assert_eq!(browser.phase(), BrowserPhase::Ready);
    browser
}

#[test]
fn demo_history_supports_a_full_mutation_cycle() {
    let repo = MemoryRepository::demo();
    let mut browser = ready_browser(&repo);
    assert_eq!(browser.model().len(), 9);
    assert_eq!(browser.lane_images().len(), 9);

    // Resolve on the tip and create a branch there.
    let tip = browser.model().record(0).expect("tip").id().clone();
    browser.set_selection(vec![tip.clone()]);
    let actions = browser.resolve_actions();
    let create = actions
        .iter()
        .find(|action| matches!(action.kind, ActionKind::CreateBranchAt { .. }))
        .expect("create-branch action");

    browser.begin_action();
    let outcome = dispatch_action(
        &repo,
        &create.kind,
        &ActionInput::Name("release".to_owned()),
    );
    let follow_up = browser.complete_action(outcome);
    let ActionFollowUp::RefreshRequired { message } = follow_up else {
        panic!("expected refresh request, got {follow_up:?}");
    };
    assert_eq!(message, "Branch correctly created");
    assert_eq!(browser.phase(), BrowserPhase::Loading);

    // The fresh pull shows the new ref on the same commit.
    browser.complete_refresh(repo.list_commits());
    assert_eq!(browser.phase(), BrowserPhase::Ready);
    let tip_record = browser.model().lookup(&tip).expect("tip still present");
    assert!(tip_record.refs().contains(&RefLabel::Branch {
        name: "release".to_owned()
    }));

    // The selection survived the refresh and still resolves.
    assert_eq!(browser.selection(), &[tip]);
    assert!(!browser.resolve_actions().is_empty());
}

#[test]
fn captured_log_document_drives_the_browser() {
    let document = load_document(&fixtures_dir().join("survey_log.json")).expect("document");
    let repo = MemoryRepository::from_document(document).expect("engine");
    let mut browser = ready_browser(&repo);

    assert_eq!(browser.model().len(), 3);
    assert_eq!(browser.lane_count(), 2);

    // The merge resolves to one diff per parent, labeled in parent order.
    let merge = browser.model().record(0).expect("merge").clone();
    assert!(merge.is_merge());
    browser.set_selection(vec![merge.id().clone()]);
    let actions = browser.resolve_actions();
    let diff_labels: Vec<&str> = actions
        .iter()
        .filter(|action| matches!(action.kind, ActionKind::DiffAgainstParent { .. }))
        .map(|action| action.label.as_str())
        .collect();
    assert_eq!(
        diff_labels,
        vec![
            "Show diff between this commit and parent a1b2c3d...",
            "Show diff between this commit and parent b2c3d4e...",
        ]
    );

    // Ref decoration came from the document's ref tables.
    assert_eq!(
        merge.refs(),
        &[RefLabel::Head {
            branch: "main".to_owned()
        }]
    );
    let tagged = browser.model().record(2).expect("root");
    assert!(tagged.refs().contains(&RefLabel::Tag {
        name: "v1".to_owned()
    }));

    // Author filter narrows to bob's commit without dropping rows.
    browser.set_filter(CommitFilter::new(
        "bob",
        chrono::NaiveDate::MIN,
        chrono::NaiveDate::MAX,
    ));
    assert_eq!(browser.model().visible_len(), 1);
    assert_eq!(browser.model().len(), 3);
}

#[test]
fn stale_selection_is_cleared_by_the_next_refresh() {
    let repo = MemoryRepository::demo();
    let mut browser = ready_browser(&repo);

    let victim = browser.model().record(2).expect("row 2").id().clone();
    browser.set_selection(vec![victim.clone()]);

    let without_victim: Vec<_> = repo
        .list_commits()
        .expect("list")
        .into_iter()
        .filter(|commit| commit.id() != &victim)
        .collect();
    browser.begin_refresh();
    browser.complete_refresh(Ok(without_victim));

    assert!(browser.selection().is_empty());
    assert!(browser.resolve_actions().is_empty());
}

#[test]
fn export_writes_row_pngs_and_a_stacked_strip() {
    let repo = Arc::new(MemoryRepository::demo());
    let directory = std::env::temp_dir().join(format!(
        "galatea-export-test-{}",
        std::process::id()
    ));

    let summary = export_graph(
        repo.as_ref(),
        &directory,
        GraphGeometry::default(),
        &LanePalette::default(),
    )
    .expect("export");
    assert_eq!(summary.rows, 9);

    let strip = image::open(directory.join("graph.png")).expect("strip").to_rgba8();
    let geometry = GraphGeometry::default();
    assert_eq!(strip.height(), geometry.row_height * 9);
    assert_eq!(strip.width(), geometry.image_width(2));
    for at in 0..9 {
        assert!(directory.join(format!("row_{at:03}.png")).is_file());
    }

    let _ = fs::remove_dir_all(&directory);
}
