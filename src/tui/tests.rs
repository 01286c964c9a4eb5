// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{graph_cell, parse_filter_date, App, Mode, Prompt};
use crate::actions::ActionKind;
use crate::browser::BrowserPhase;
use crate::model::RefLabel;
use crate::render::LanePalette;
use crate::repo::{MemoryRepository, Repository};
use crate::tui::theme::TuiTheme;

fn test_app() -> (App, tokio::runtime::Runtime) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    let app = App::new(
        Arc::new(MemoryRepository::demo()),
        LanePalette::default(),
        runtime.handle().clone(),
    );
    (app, runtime)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.handle_key(key(KeyCode::Char(ch)));
    }
}

fn wait_for(app: &mut App, what: &str, done: impl Fn(&App) -> bool) {
    for _ in 0..400 {
        app.drain_engine_events();
        if done(app) {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("timed out waiting for {what}");
}

fn ready_app() -> (App, tokio::runtime::Runtime) {
    let (mut app, runtime) = test_app();
    app.start_refresh();
    wait_for(&mut app, "initial refresh", |app| {
        app.browser.phase() == BrowserPhase::Ready
    });
    (app, runtime)
}

fn choose_menu_action(app: &mut App, label: &str) {
    let Mode::Menu { actions, state } = &mut app.mode else {
        panic!("expected menu mode");
    };
    let at = actions
        .iter()
        .position(|action| action.label == label)
        .unwrap_or_else(|| panic!("no action labeled {label:?}"));
    state.select(Some(at));
    app.handle_key(key(KeyCode::Enter));
}

fn line_text(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[test]
fn refresh_populates_the_model() {
    let (app, _runtime) = ready_app();
    assert_eq!(app.browser.model().len(), 9);
    assert_eq!(app.visible_rows().len(), 9);
    assert_eq!(app.cursor, 0);
}

#[test]
fn cursor_movement_clamps_to_visible_rows() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Char('G')));
    assert_eq!(app.cursor, 8);
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.cursor, 8);
    app.handle_key(key(KeyCode::Char('g')));
    assert_eq!(app.cursor, 0);
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.cursor, 0);
}

#[test]
fn space_picks_in_selection_order() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Char(' ')));
    app.handle_key(key(KeyCode::Char('g')));
    app.handle_key(key(KeyCode::Char(' ')));

    let row1 = app.browser.model().record(1).expect("row 1").id().clone();
    let row0 = app.browser.model().record(0).expect("row 0").id().clone();
    assert_eq!(app.picked, vec![row1.clone(), row0.clone()]);

    app.handle_key(key(KeyCode::Enter));
    let Mode::Menu { actions, .. } = &app.mode else {
        panic!("expected menu mode");
    };
    assert_eq!(actions.len(), 1);
    assert_eq!(
        actions[0].kind,
        ActionKind::DiffBetween {
            newer: row1,
            older: row0,
        }
    );
}

#[test]
fn picking_again_unpicks_and_esc_clears() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(app.picked.len(), 1);
    app.handle_key(key(KeyCode::Char(' ')));
    assert!(app.picked.is_empty());

    app.handle_key(key(KeyCode::Char(' ')));
    app.handle_key(key(KeyCode::Esc));
    assert!(app.picked.is_empty());
}

#[test]
fn more_than_two_picks_offer_no_actions() {
    let (mut app, _runtime) = ready_app();

    for _ in 0..3 {
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Down));
    }
    assert_eq!(app.picked.len(), 3);

    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.mode, Mode::Browse));
    let (message, _) = app.toast.as_ref().expect("toast");
    assert!(message.contains("No actions"));
}

#[test]
fn merge_commit_menu_lists_one_diff_per_parent() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));

    let Mode::Menu { actions, .. } = &app.mode else {
        panic!("expected menu mode");
    };
    let parent_diffs: Vec<&str> = actions
        .iter()
        .filter(|action| matches!(action.kind, ActionKind::DiffAgainstParent { .. }))
        .map(|action| action.label.as_str())
        .collect();
    assert_eq!(parent_diffs.len(), 2);
    assert!(parent_diffs[0].starts_with("Show diff between this commit and parent"));
}

#[test]
fn filter_prompt_narrows_visible_rows() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Char('/')));
    assert!(matches!(
        app.mode,
        Mode::Prompt {
            purpose: Prompt::FilterText,
            ..
        }
    ));
    type_text(&mut app, "survey");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.visible_rows().len(), 2);
    assert_eq!(app.browser.model().len(), 9);

    app.handle_key(key(KeyCode::Char('c')));
    assert_eq!(app.visible_rows().len(), 9);
}

#[test]
fn invalid_date_prompt_surfaces_a_toast() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Char('s')));
    type_text(&mut app, "not-a-date");
    app.handle_key(key(KeyCode::Enter));

    let (message, _) = app.toast.as_ref().expect("toast");
    assert!(message.contains("Invalid date"));
    assert!(app.filter_start.is_none());
}

#[test]
fn create_branch_flows_through_prompt_action_and_refresh() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Enter));
    choose_menu_action(&mut app, "Create branch at this commit...");
    assert!(matches!(
        app.mode,
        Mode::Prompt {
            purpose: Prompt::ActionName { .. },
            ..
        }
    ));

    type_text(&mut app, "hotfix");
    app.handle_key(key(KeyCode::Enter));

    wait_for(&mut app, "branch creation refresh", |app| {
        app.browser.phase() == BrowserPhase::Ready
            && app
                .browser
                .model()
                .record(0)
                .is_some_and(|record| record.refs().len() == 2)
    });
    let refs = app.browser.model().record(0).expect("row 0").refs().to_vec();
    assert!(refs.contains(&RefLabel::Branch {
        name: "hotfix".to_owned()
    }));
}

#[test]
fn failed_action_lands_in_failed_phase_with_the_reason() {
    let (mut app, _runtime) = ready_app();

    app.handle_key(key(KeyCode::Enter));
    choose_menu_action(&mut app, "Create tag at this commit...");
    type_text(&mut app, "v0.1");
    app.handle_key(key(KeyCode::Enter));

    wait_for(&mut app, "tag failure", |app| {
        app.browser.phase() == BrowserPhase::Failed
    });
    let (message, _) = app.toast.as_ref().expect("toast");
    assert!(message.contains("already exists"));
    assert_eq!(app.browser.model().len(), 9, "model retained");
}

#[test]
fn switch_branch_moves_head_on_the_next_refresh() {
    let (mut app, _runtime) = ready_app();

    app.cursor = 2;
    app.handle_key(key(KeyCode::Enter));
    choose_menu_action(&mut app, "Switch to branch 'survey-points'");

    wait_for(&mut app, "checkout refresh", |app| {
        app.browser.phase() == BrowserPhase::Ready
            && app.browser.model().record(2).is_some_and(|record| {
                record.refs().iter().any(RefLabel::is_head)
            })
    });
}

#[test]
fn graph_cells_project_nodes_verticals_and_diagonals() {
    let repo = MemoryRepository::demo();
    let commits = repo.list_commits().expect("list");
    let theme = TuiTheme::from_palette(&LanePalette::default());

    let cells: Vec<String> = commits
        .iter()
        .map(|record| line_text(&graph_cell(&theme, record, 2)))
        .collect();

    assert_eq!(cells[0], "●   "); // tip
    assert_eq!(cells[1], "●╲  "); // merge leaves lane 0 toward lane 1
    assert_eq!(cells[2], "│╲● "); // branch tip receives the merge line
    assert_eq!(cells[3], "● │ "); // pass-through lane 1
    assert_eq!(cells[5], "●╱╵ "); // branch line bends back toward lane 0
    assert_eq!(cells[6], "●╱  "); // and arrives at the fork commit
    assert_eq!(cells[8], "●   "); // root
}

#[test]
fn filter_dates_parse_or_clear() {
    assert_eq!(parse_filter_date("  "), Ok(None));
    assert_eq!(
        parse_filter_date("2023-05-01"),
        Ok(Some(
            chrono::NaiveDate::parse_from_str("2023-05-01", "%Y-%m-%d").expect("date")
        ))
    );
    assert!(parse_filter_date("05/01/2023").is_err());
}
