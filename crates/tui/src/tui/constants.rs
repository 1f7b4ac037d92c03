use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(100);

/// How long the double-tap heart acknowledgment stays on screen.
pub(crate) const HEART_OVERLAY_DURATION: Duration = Duration::from_millis(1000);
pub(crate) const STATUS_DURATION: Duration = Duration::from_secs(5);

pub(crate) const STATUS_QUERY: &str =
    "Type to search destinations and activities • Enter/Esc to close";
pub(crate) const STATUS_FILTER_PICKER: &str =
    "Filter picker — ←/→ column • ↑/↓ move • Space toggle • C clears all • Enter apply • Esc cancel";
pub(crate) const STATUS_SURVEY: &str =
    "↑/↓ choose • Space select • Enter continue • Shift+Tab back • Esc skip";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_REFRESHED: &str = "Refreshed quests";
pub(crate) const STATUS_CLEARED_FILTERS: &str = "Cleared all filters";
pub(crate) const STATUS_PREFS_SAVED: &str = "Preferences saved — happy wandering";
