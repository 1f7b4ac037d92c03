use std::time::Instant;

use ratatui::style::{Color, Style};
use tokio::runtime::Handle;

use super::buffer::InputBuffer;
use super::constants::*;
use super::filters::FilterOverlay;
use super::onboarding::OnboardingFlow;
use crate::core::{FeedService, FeedSnapshot};
use crate::filter::{filter, FilterSpec};
use crate::likes::LikedSet;
use crate::model::Quest;
use crate::tap::{TapDisambiguator, TapOutcome};

mod input;
mod render;
#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    ForYou,
    Search,
    Liked,
}

impl Screen {
    pub(crate) const ALL: [Screen; 3] = [Screen::ForYou, Screen::Search, Screen::Liked];

    fn index(self) -> usize {
        match self {
            Screen::ForYou => 0,
            Screen::Search => 1,
            Screen::Liked => 2,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Screen::ForYou => "🧭 For You",
            Screen::Search => "🔍 Search",
            Screen::Liked => "❤️ Liked",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Screen::ForYou => "Fresh quests, newest first",
            Screen::Search => "Narrow the feed by text, category, length and budget",
            Screen::Liked => "Quests you double-tapped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Query,
    Filter,
    Survey,
    Help,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    service: FeedService,
    runtime: Handle,
    screen: Screen,
    quests: Vec<Quest>,
    visible: Vec<Quest>,
    liked: LikedSet,
    spec: FilterSpec,
    current: usize,
    flipped: bool,
    heart_since: Option<Instant>,
    tap: TapDisambiguator,
    input_mode: InputMode,
    query_input: InputBuffer,
    filter_overlay: Option<FilterOverlay>,
    survey: Option<OnboardingFlow>,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(
        service: FeedService,
        runtime: Handle,
        snapshot: FeedSnapshot,
        needs_onboarding: bool,
    ) -> Self {
        let mut app = Self {
            service,
            runtime,
            screen: Screen::ForYou,
            quests: snapshot.quests,
            visible: Vec::new(),
            liked: snapshot.liked,
            spec: FilterSpec::default(),
            current: 0,
            flipped: false,
            heart_since: None,
            tap: TapDisambiguator::new(),
            input_mode: InputMode::Normal,
            query_input: InputBuffer::new(),
            filter_overlay: None,
            survey: None,
            status: None,
            should_quit: false,
        };
        app.rebuild_visible();
        if needs_onboarding {
            app.survey = Some(OnboardingFlow::new());
            app.input_mode = InputMode::Survey;
            app.set_status_info(STATUS_SURVEY);
        }
        app
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_DURATION {
                self.status = None;
            }
        }

        if let Some(since) = self.heart_since {
            if since.elapsed() >= HEART_OVERLAY_DURATION {
                self.heart_since = None;
            }
        }

        let outcome = self.tap.poll(Instant::now());
        self.apply_tap(outcome);
    }

    /// Recompute what the current screen pages through, from local
    /// state. The cursor is clamped, not reset; callers that change the
    /// sequence itself reset it explicitly.
    fn rebuild_visible(&mut self) {
        self.visible = match self.screen {
            Screen::ForYou => self.quests.clone(),
            Screen::Search => filter(&self.quests, &self.spec),
            Screen::Liked => self
                .quests
                .iter()
                .filter(|quest| self.liked.contains(&quest.id))
                .cloned()
                .collect(),
        };
        if self.current >= self.visible.len() {
            self.current = self.visible.len().saturating_sub(1);
        }
    }

    fn current_quest(&self) -> Option<&Quest> {
        self.visible.get(self.current)
    }

    fn set_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        self.current = 0;
        self.card_changed();

        if screen == Screen::Liked {
            // The liked shelf re-fetches so likes recorded on other
            // devices show up.
            match self.runtime.block_on(self.service.liked_feed()) {
                Ok(snapshot) => {
                    self.liked = snapshot.liked;
                    self.visible = snapshot.quests;
                    return;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "liked feed unavailable, using local state");
                    self.set_status_error("Couldn't refresh likes — showing local state");
                }
            }
        }
        self.rebuild_visible();
    }

    fn next_screen(&mut self) {
        let idx = (self.screen.index() + 1) % Screen::ALL.len();
        self.set_screen(Screen::ALL[idx]);
    }

    fn prev_screen(&mut self) {
        let idx = self.screen.index();
        let prev = if idx == 0 { Screen::ALL.len() - 1 } else { idx - 1 };
        self.set_screen(Screen::ALL[prev]);
    }

    /// The old card is gone: its pending tap, face and overlay with it.
    fn card_changed(&mut self) {
        self.tap.cancel();
        self.flipped = false;
        self.heart_since = None;
    }

    fn select_next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let next = (self.current + 1).min(self.visible.len() - 1);
        if next != self.current {
            self.current = next;
            self.card_changed();
        }
    }

    fn select_prev(&mut self) {
        if self.current > 0 {
            self.current -= 1;
            self.card_changed();
        }
    }

    fn select_first(&mut self) {
        if !self.visible.is_empty() && self.current != 0 {
            self.current = 0;
            self.card_changed();
        }
    }

    fn select_last(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        if self.current != last {
            self.current = last;
            self.card_changed();
        }
    }

    /// Reload quests and likes from the store. Failures keep whatever
    /// was already on screen.
    fn refresh(&mut self) {
        match self.runtime.block_on(self.service.load_feed()) {
            Ok(snapshot) => {
                self.quests = snapshot.quests;
                self.liked = snapshot.liked;
                self.current = 0;
                self.card_changed();
                self.rebuild_visible();
                self.set_status_info(STATUS_REFRESHED);
            }
            Err(err) => {
                tracing::warn!(error = %err, "refresh failed, keeping previous feed");
                self.set_status_error(format!("Refresh failed: {err:#}"));
            }
        }
    }

    /// One tap on the current card, fed through the disambiguator.
    fn tap_current(&mut self) {
        let Some(quest) = self.current_quest() else {
            return;
        };
        let id = quest.id.clone();
        let outcome = self.tap.on_tap(&id, Instant::now());
        self.apply_tap(outcome);
    }

    fn apply_tap(&mut self, outcome: Option<TapOutcome>) {
        match outcome {
            Some(TapOutcome::Single(id)) => {
                if self.current_quest().map(|q| q.id == id).unwrap_or(false) {
                    self.flipped = !self.flipped;
                }
            }
            Some(TapOutcome::Double(id)) => {
                self.heart_since = Some(Instant::now());
                self.toggle_like(id);
            }
            None => {}
        }
    }

    /// Flip the like locally, then write to the store without waiting.
    /// A failed write is logged and heals on the next refresh.
    fn toggle_like(&mut self, quest_id: String) {
        let liked_now = self.liked.toggle(&quest_id);

        let service = self.service.clone();
        let id = quest_id.clone();
        self.runtime.spawn(async move {
            if let Err(err) = service.push_like(&id, liked_now).await {
                tracing::warn!(error = %err, quest_id = %id, "like write failed");
            }
        });

        if self.screen == Screen::Liked && !liked_now {
            self.visible.retain(|quest| quest.id != quest_id);
            if self.current >= self.visible.len() && self.current > 0 {
                self.current -= 1;
            }
            self.card_changed();
        }
    }

    fn like_current(&mut self) {
        let Some(quest) = self.current_quest() else {
            self.set_status_info("Nothing to like here yet");
            return;
        };
        let id = quest.id.clone();
        self.toggle_like(id);
    }

    fn start_query(&mut self) {
        self.set_screen(Screen::Search);
        self.query_input.set(self.spec.query.clone());
        self.input_mode = InputMode::Query;
        self.set_status_info(STATUS_QUERY);
    }

    /// Re-run the filter engine after any query edit; the cursor goes
    /// back to the first match.
    fn on_query_changed(&mut self) {
        self.spec.query = self.query_input.as_str().to_string();
        self.apply_filters();
    }

    fn apply_filters(&mut self) {
        if self.screen == Screen::Search {
            self.visible = filter(&self.quests, &self.spec);
            self.current = 0;
            self.card_changed();
        }
    }

    fn open_filter_overlay(&mut self) {
        self.set_screen(Screen::Search);
        self.filter_overlay = Some(FilterOverlay::new(&self.spec));
        self.input_mode = InputMode::Filter;
        self.set_status_info(STATUS_FILTER_PICKER);
    }

    fn clear_filters(&mut self) {
        self.spec = FilterSpec::default();
        self.query_input.clear();
        self.apply_filters();
        self.set_status_info(STATUS_CLEARED_FILTERS);
    }

    /// Re-run the survey, pre-filled with whatever the store has.
    fn start_survey(&mut self) {
        let flow = match self.runtime.block_on(self.service.preferences()) {
            Ok(Some(prefs)) => OnboardingFlow::from_preferences(&prefs),
            Ok(None) => OnboardingFlow::new(),
            Err(err) => {
                tracing::warn!(error = %err, "preferences unavailable, starting a blank survey");
                OnboardingFlow::new()
            }
        };
        self.survey = Some(flow);
        self.input_mode = InputMode::Survey;
        self.set_status_info(STATUS_SURVEY);
    }

    fn submit_survey(&mut self) {
        let Some(prefs) = self.survey.as_ref().and_then(|flow| flow.finish()) else {
            return;
        };
        match self.runtime.block_on(self.service.save_preferences(&prefs)) {
            Ok(()) => {
                self.survey = None;
                self.input_mode = InputMode::Normal;
                self.set_status_info(STATUS_PREFS_SAVED);
            }
            Err(err) => {
                tracing::warn!(error = %err, "saving preferences failed");
                self.set_status_error(format!("Couldn't save preferences: {err:#}"));
            }
        }
    }

    fn cancel_survey(&mut self) {
        self.survey = None;
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
