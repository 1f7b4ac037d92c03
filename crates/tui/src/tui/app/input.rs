use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::constants::STATUS_HELP;
use crate::tui::onboarding::SurveyStep;

use super::{App, InputMode, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Quit,
    Tap,
    Like,
    NextCard,
    PrevCard,
    FirstCard,
    LastCard,
    NextScreen,
    PrevScreen,
    GoTo(Screen),
    EnterQuery,
    OpenFilter,
    ClearFilters,
    Refresh,
    EditPreferences,
    ShowHelp,
}

impl NormalAction {
    pub(crate) fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::Tap),
            KeyCode::Char('l') => Some(Self::Like),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::NextCard),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::PrevCard),
            KeyCode::Char('g') | KeyCode::Home => Some(Self::FirstCard),
            KeyCode::Char('G') | KeyCode::End => Some(Self::LastCard),
            KeyCode::Tab | KeyCode::Right => Some(Self::NextScreen),
            KeyCode::BackTab | KeyCode::Left => Some(Self::PrevScreen),
            KeyCode::Char('1') => Some(Self::GoTo(Screen::ForYou)),
            KeyCode::Char('2') => Some(Self::GoTo(Screen::Search)),
            KeyCode::Char('3') => Some(Self::GoTo(Screen::Liked)),
            KeyCode::Char('/') => Some(Self::EnterQuery),
            KeyCode::Char('f') => Some(Self::OpenFilter),
            KeyCode::Char('x') => Some(Self::ClearFilters),
            KeyCode::Char('r') => Some(Self::Refresh),
            KeyCode::Char('p') => Some(Self::EditPreferences),
            KeyCode::Char('h') => Some(Self::ShowHelp),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Query => self.handle_query_mode(key),
            InputMode::Filter => self.handle_filter_mode(key),
            InputMode::Survey => self.handle_survey_mode(key),
            InputMode::Help => self.handle_help_mode(key),
        }
        Ok(())
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::Tap => self.tap_current(),
            NormalAction::Like => self.like_current(),
            NormalAction::NextCard => self.select_next(),
            NormalAction::PrevCard => self.select_prev(),
            NormalAction::FirstCard => self.select_first(),
            NormalAction::LastCard => self.select_last(),
            NormalAction::NextScreen => self.next_screen(),
            NormalAction::PrevScreen => self.prev_screen(),
            NormalAction::GoTo(screen) => self.set_screen(screen),
            NormalAction::EnterQuery => self.start_query(),
            NormalAction::OpenFilter => self.open_filter_overlay(),
            NormalAction::ClearFilters => self.clear_filters(),
            NormalAction::Refresh => self.refresh(),
            NormalAction::EditPreferences => self.start_survey(),
            NormalAction::ShowHelp => {
                self.input_mode = InputMode::Help;
                self.set_status_info(STATUS_HELP);
            }
        }
    }

    fn handle_query_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.status = None;
            }
            KeyCode::Backspace => {
                self.query_input.backspace();
                self.on_query_changed();
            }
            KeyCode::Delete => {
                self.query_input.delete_char();
                self.on_query_changed();
            }
            KeyCode::Char(c) => {
                self.query_input.insert_char(c);
                self.on_query_changed();
            }
            KeyCode::Left => self.query_input.move_left(),
            KeyCode::Right => self.query_input.move_right(),
            KeyCode::Home => self.query_input.move_home(),
            KeyCode::End => self.query_input.move_end(),
            _ => {}
        }
    }

    fn handle_filter_mode(&mut self, key: KeyEvent) {
        if self.filter_overlay.is_none() {
            self.input_mode = InputMode::Normal;
            return;
        }

        let mut apply = false;
        let mut cancel = false;

        match key.code {
            KeyCode::Esc => cancel = true,
            KeyCode::Enter => apply = true,
            KeyCode::Left => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.prev_column();
                }
            }
            KeyCode::Right | KeyCode::Tab => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.next_column();
                }
            }
            KeyCode::BackTab => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.prev_column();
                }
            }
            KeyCode::Up => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.prev_row();
                }
            }
            KeyCode::Down => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.next_row();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.toggle_current();
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.clear_all();
                    self.set_status_info("Cleared filter selections — press Enter to apply");
                }
            }
            _ => {}
        }

        if apply {
            if let Some(overlay) = self.filter_overlay.take() {
                self.spec = overlay.commit();
                self.input_mode = InputMode::Normal;
                self.apply_filters();
                let status = match self.spec.summary() {
                    Some(summary) => format!("Applied filters: {summary}"),
                    None => String::from("Cleared filters"),
                };
                self.set_status_info(status);
            }
        } else if cancel {
            if let Some(overlay) = self.filter_overlay.take() {
                self.spec = overlay.cancel();
                self.input_mode = InputMode::Normal;
                self.apply_filters();
                let status = match self.spec.summary() {
                    Some(summary) => format!("Filters unchanged: {summary}"),
                    None => String::from("Filters unchanged"),
                };
                self.set_status_info(status);
            }
        }
    }

    fn handle_survey_mode(&mut self, key: KeyEvent) {
        let Some(flow) = self.survey.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };

        let typing = flow.step() == SurveyStep::HomeLocation;
        match key.code {
            KeyCode::Esc => self.cancel_survey(),
            KeyCode::Enter | KeyCode::Tab => {
                if flow.is_last() {
                    self.submit_survey();
                } else if !flow.advance() {
                    self.set_status_info("Answer this step to continue");
                }
            }
            KeyCode::BackTab => {
                flow.back();
            }
            KeyCode::Up => flow.prev_row(),
            KeyCode::Down => flow.next_row(),
            KeyCode::Char(' ') if !typing => flow.toggle_current(),
            KeyCode::Char(c) if typing => flow.location.insert_char(c),
            KeyCode::Backspace if typing => flow.location.backspace(),
            KeyCode::Delete if typing => flow.location.delete_char(),
            KeyCode::Left if typing => flow.location.move_left(),
            KeyCode::Right if typing => flow.location.move_right(),
            KeyCode::Home if typing => flow.location.move_home(),
            KeyCode::End if typing => flow.location.move_end(),
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') => {
                self.input_mode = InputMode::Normal;
                self.status = None;
            }
            _ => {}
        }
    }
}
