//! End-to-end key sequences through the public API

use pocket_calc::prelude::*;

fn session(script: &str) -> CalculatorApp {
    let mut app = CalculatorApp::new();
    app.run_script(script).unwrap();
    app
}

// ===== Arithmetic =====

#[test]
fn test_add_and_trace() {
    let app = session("5 + 3 =");
    assert_eq!(app.display(), "8");
    assert_eq!(app.history_line(), "5 + 3 = 8");
}

#[test]
fn test_each_operator() {
    assert_eq!(session("9 - 12 =").display(), "-3");
    assert_eq!(session("6 * 7 =").display(), "42");
    assert_eq!(session("7 / 2 =").display(), "3.5");
}

#[test]
fn test_repeating_fraction_fits_budget() {
    let app = session("1 / 3 =");
    assert_eq!(app.display(), "0.33333333333");
    assert_eq!(app.history_line(), "1 / 3 = 0.33333333333");
}

#[test]
fn test_chain_then_continue_from_result() {
    let app = session("2 + 3 * 4 = - 1 =");
    assert_eq!(app.display(), "19");
    assert_eq!(app.history().len(), 2);
    assert_eq!(app.history().first().unwrap().display(), "5 * 4 = 20");
}

#[test]
fn test_digit_after_result_starts_fresh() {
    let app = session("2 + 2 = 7");
    assert_eq!(app.display(), "7");
    assert_eq!(app.history_line(), "2 + 2 = 4");
}

// ===== Editing keys =====

#[test]
fn test_backspace_edits_entry() {
    assert_eq!(session("1 2 3 Backspace").display(), "12");
    assert_eq!(session("7 Backspace").display(), "0");
}

#[test]
fn test_percent_of_entry() {
    assert_eq!(session("5 0 %").display(), "0.5");
}

#[test]
fn test_sign_then_operation() {
    let app = session("7 Negate * 3 =");
    assert_eq!(app.display(), "-21");
    assert_eq!(app.history_line(), "-7 * 3 = -21");
}

// ===== Errors =====

#[test]
fn test_divide_by_zero_then_recover() {
    let mut app = session("8 / 0 =");
    assert_eq!(app.display(), ERROR_MARKER);
    assert!(app.history().is_empty());

    app.run_script("+").unwrap();
    assert_eq!(app.display(), ERROR_MARKER);

    app.run_script("4 + 1 =").unwrap();
    assert_eq!(app.display(), "5");
}

#[test]
fn test_escape_after_error() {
    let app = session("1 / 0 = Escape");
    assert_eq!(app.state(), &CalculatorState::new());
    assert_eq!(app.history_line(), EMPTY_HISTORY_LINE);
}

// ===== Snapshots =====

#[test]
fn test_state_snapshot_serializes() {
    let app = session("5 +");
    let json = serde_json::to_value(app.state()).unwrap();
    assert_eq!(json["current"], "5");
    assert_eq!(json["previous"], "5");
    assert_eq!(json["operator"], "+");
    assert_eq!(json["waiting_for_next"], true);

    let restored: CalculatorState = serde_json::from_value(json).unwrap();
    assert_eq!(&restored, app.state());
}

#[test]
fn test_history_export() {
    let app = session("1 + 1 = 2 * 3 =");
    assert_eq!(app.history().export_formatted(), "1 + 1 = 2\n2 * 3 = 6");
    let restored = History::from_json(&app.history().to_json().unwrap()).unwrap();
    assert_eq!(&restored, app.history());
}
