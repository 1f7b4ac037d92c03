use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use super::input::NormalAction;
use super::Screen;
use crate::filter::FilterSpec;
use crate::model::{BudgetTier, DurationBucket};
use crate::tui::filters::{FilterColumn, FilterOverlay};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn space_and_enter_both_tap_the_card() {
    assert_eq!(
        NormalAction::from_event(&key(KeyCode::Char(' '))),
        Some(NormalAction::Tap)
    );
    assert_eq!(
        NormalAction::from_event(&key(KeyCode::Enter)),
        Some(NormalAction::Tap)
    );
}

#[test]
fn screen_shortcuts_map_to_their_screens() {
    assert_eq!(
        NormalAction::from_event(&key(KeyCode::Char('1'))),
        Some(NormalAction::GoTo(Screen::ForYou))
    );
    assert_eq!(
        NormalAction::from_event(&key(KeyCode::Char('3'))),
        Some(NormalAction::GoTo(Screen::Liked))
    );
    assert_eq!(
        NormalAction::from_event(&key(KeyCode::Char('l'))),
        Some(NormalAction::Like)
    );
}

#[test]
fn ctrl_c_quits_from_normal_mode() {
    let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(NormalAction::from_event(&event), Some(NormalAction::Quit));
}

#[test]
fn filter_overlay_toggles_categories_and_commits() {
    let mut overlay = FilterOverlay::new(&FilterSpec::default());

    overlay.next_row(); // first category
    overlay.toggle_current();
    assert!(overlay.working.categories.contains("nature"));

    overlay.toggle_current();
    assert!(overlay.working.categories.is_empty());

    overlay.toggle_current();
    let spec = overlay.commit();
    assert!(spec.categories.contains("nature"));
}

#[test]
fn filter_overlay_single_selects_toggle_off_when_reselected() {
    let mut overlay = FilterOverlay::new(&FilterSpec::default());

    overlay.next_column();
    assert_eq!(overlay.column, FilterColumn::Duration);
    overlay.next_row();
    overlay.toggle_current();
    assert_eq!(overlay.working.duration, Some(DurationBucket::Weekend));

    overlay.toggle_current();
    assert_eq!(overlay.working.duration, None);
}

#[test]
fn filter_overlay_cancel_restores_the_initial_spec() {
    let initial = FilterSpec {
        query: "bali".to_string(),
        budget: Some(BudgetTier::Moderate),
        ..FilterSpec::default()
    };
    let mut overlay = FilterOverlay::new(&initial);

    overlay.next_column();
    overlay.next_column();
    overlay.next_row();
    overlay.toggle_current();

    assert_eq!(overlay.cancel(), initial);
}

#[test]
fn filter_overlay_clear_all_spares_the_text_query() {
    let initial = FilterSpec {
        query: "bali".to_string(),
        categories: ["beach".to_string()].into_iter().collect(),
        duration: Some(DurationBucket::FiveDays),
        budget: Some(BudgetTier::Luxury),
    };
    let mut overlay = FilterOverlay::new(&initial);

    overlay.clear_all();
    let spec = overlay.commit();

    assert_eq!(spec.query, "bali");
    assert!(spec.categories.is_empty());
    assert_eq!(spec.duration, None);
    assert_eq!(spec.budget, None);
}

#[test]
fn filter_overlay_row_zero_clears_its_column() {
    let initial = FilterSpec {
        categories: ["beach".to_string(), "food".to_string()].into_iter().collect(),
        ..FilterSpec::default()
    };
    let mut overlay = FilterOverlay::new(&initial);

    overlay.toggle_current(); // row 0 of the categories column
    assert!(overlay.working.categories.is_empty());
}
