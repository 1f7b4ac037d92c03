use std::collections::BTreeSet;

use crate::model::{BudgetTier, DurationBucket, Preferences};

use super::buffer::InputBuffer;

pub(crate) struct InterestOption {
    pub(crate) id: &'static str,
    pub(crate) label: &'static str,
    pub(crate) emoji: &'static str,
}

pub(crate) const INTEREST_OPTIONS: [InterestOption; 8] = [
    InterestOption { id: "nature", label: "Nature", emoji: "🌿" },
    InterestOption { id: "nightlife", label: "Nightlife", emoji: "🎉" },
    InterestOption { id: "culture", label: "Culture", emoji: "🎭" },
    InterestOption { id: "history", label: "History", emoji: "🏛️" },
    InterestOption { id: "adventure", label: "Adventure", emoji: "⛰️" },
    InterestOption { id: "beach", label: "Beach", emoji: "🏖️" },
    InterestOption { id: "food", label: "Food", emoji: "🍜" },
    InterestOption { id: "wellness", label: "Wellness", emoji: "🧘" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SurveyStep {
    Interests,
    HomeLocation,
    Budget,
    Duration,
}

impl SurveyStep {
    pub(crate) const ALL: [Self; 4] = [
        SurveyStep::Interests,
        SurveyStep::HomeLocation,
        SurveyStep::Budget,
        SurveyStep::Duration,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            SurveyStep::Interests => 0,
            SurveyStep::HomeLocation => 1,
            SurveyStep::Budget => 2,
            SurveyStep::Duration => 3,
        }
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            SurveyStep::Interests => "What interests you?",
            SurveyStep::HomeLocation => "Where are you based?",
            SurveyStep::Budget => "What's your budget?",
            SurveyStep::Duration => "Trip duration?",
        }
    }

    pub(crate) fn subtitle(self) -> &'static str {
        match self {
            SurveyStep::Interests => "Select all that apply to personalize your quest feed",
            SurveyStep::HomeLocation => "We'll use this to suggest quests from your location",
            SurveyStep::Budget => "Choose your preferred price range",
            SurveyStep::Duration => "How long do you typically travel for?",
        }
    }
}

/// Four-step preference survey. Each step gates Continue: interests
/// non-empty, location non-empty, budget and duration chosen.
#[derive(Debug)]
pub(crate) struct OnboardingFlow {
    step: SurveyStep,
    pub(crate) interests: BTreeSet<String>,
    pub(crate) location: InputBuffer,
    pub(crate) budget: Option<BudgetTier>,
    pub(crate) duration: Option<DurationBucket>,
    cursor: usize,
}

impl OnboardingFlow {
    pub(crate) fn new() -> Self {
        Self {
            step: SurveyStep::Interests,
            interests: BTreeSet::new(),
            location: InputBuffer::new(),
            budget: None,
            duration: None,
            cursor: 0,
        }
    }

    /// Pre-filled flow for editing previously saved answers.
    pub(crate) fn from_preferences(prefs: &Preferences) -> Self {
        let mut location = InputBuffer::new();
        location.set(prefs.home_location.clone());
        Self {
            step: SurveyStep::Interests,
            interests: prefs.interests.iter().cloned().collect(),
            location,
            budget: Some(prefs.budget),
            duration: Some(prefs.duration),
            cursor: 0,
        }
    }

    pub(crate) fn step(&self) -> SurveyStep {
        self.step
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn option_count(&self) -> usize {
        match self.step {
            SurveyStep::Interests => INTEREST_OPTIONS.len(),
            SurveyStep::HomeLocation => 0,
            SurveyStep::Budget => BudgetTier::ALL.len(),
            SurveyStep::Duration => DurationBucket::ALL.len(),
        }
    }

    pub(crate) fn next_row(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % count;
    }

    pub(crate) fn prev_row(&mut self) {
        let count = self.option_count();
        if count == 0 {
            return;
        }
        if self.cursor == 0 {
            self.cursor = count - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Toggle or select the highlighted option of the current step.
    pub(crate) fn toggle_current(&mut self) {
        match self.step {
            SurveyStep::Interests => {
                if let Some(option) = INTEREST_OPTIONS.get(self.cursor) {
                    if !self.interests.remove(option.id) {
                        self.interests.insert(option.id.to_string());
                    }
                }
            }
            SurveyStep::HomeLocation => {}
            SurveyStep::Budget => {
                if let Some(tier) = BudgetTier::ALL.get(self.cursor) {
                    self.budget = Some(*tier);
                }
            }
            SurveyStep::Duration => {
                if let Some(bucket) = DurationBucket::ALL.get(self.cursor) {
                    self.duration = Some(*bucket);
                }
            }
        }
    }

    pub(crate) fn can_advance(&self) -> bool {
        match self.step {
            SurveyStep::Interests => !self.interests.is_empty(),
            SurveyStep::HomeLocation => !self.location.as_str().trim().is_empty(),
            SurveyStep::Budget => self.budget.is_some(),
            SurveyStep::Duration => self.duration.is_some(),
        }
    }

    pub(crate) fn is_last(&self) -> bool {
        self.step == SurveyStep::Duration
    }

    /// Move to the next step if the current one is satisfied.
    pub(crate) fn advance(&mut self) -> bool {
        if !self.can_advance() || self.is_last() {
            return false;
        }
        self.step = SurveyStep::ALL[self.step.index() + 1];
        self.cursor = 0;
        true
    }

    pub(crate) fn back(&mut self) -> bool {
        if self.step == SurveyStep::Interests {
            return false;
        }
        self.step = SurveyStep::ALL[self.step.index() - 1];
        self.cursor = 0;
        true
    }

    /// The completed answers, once every step is satisfied.
    pub(crate) fn finish(&self) -> Option<Preferences> {
        if !(self.is_last() && self.can_advance()) {
            return None;
        }
        Some(Preferences {
            interests: self.interests.iter().cloned().collect(),
            home_location: self.location.as_str().trim().to_string(),
            budget: self.budget?,
            duration: self.duration?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_flow() -> OnboardingFlow {
        let mut flow = OnboardingFlow::new();
        flow.toggle_current(); // nature
        assert!(flow.advance());
        flow.location.set("Lisbon, Portugal");
        assert!(flow.advance());
        flow.toggle_current(); // $
        assert!(flow.advance());
        flow.next_row();
        flow.toggle_current(); // 5days
        flow
    }

    #[test]
    fn steps_gate_on_their_answers() {
        let mut flow = OnboardingFlow::new();
        assert!(!flow.advance(), "interests start empty");

        flow.toggle_current();
        assert!(flow.can_advance());
        assert!(flow.advance());
        assert_eq!(flow.step(), SurveyStep::HomeLocation);

        assert!(!flow.advance(), "location still blank");
        flow.location.set("  ");
        assert!(!flow.can_advance(), "whitespace is not a location");
    }

    #[test]
    fn interests_toggle_like_chips() {
        let mut flow = OnboardingFlow::new();
        flow.toggle_current();
        assert!(flow.interests.contains("nature"));
        flow.toggle_current();
        assert!(flow.interests.is_empty());
    }

    #[test]
    fn finish_requires_the_last_step_to_be_answered() {
        let mut flow = OnboardingFlow::new();
        flow.toggle_current();
        flow.advance();
        flow.location.set("Porto");
        flow.advance();
        flow.toggle_current();
        flow.advance();
        assert_eq!(flow.finish(), None);

        flow.toggle_current();
        let prefs = flow.finish().expect("complete survey");
        assert_eq!(prefs.interests, vec!["nature".to_string()]);
        assert_eq!(prefs.home_location, "Porto");
        assert_eq!(prefs.budget, BudgetTier::Budget);
        assert_eq!(prefs.duration, DurationBucket::Weekend);
    }

    #[test]
    fn back_retraces_steps_without_losing_answers() {
        let mut flow = complete_flow();
        assert_eq!(flow.step(), SurveyStep::Duration);
        assert!(flow.back());
        assert!(flow.back());
        assert_eq!(flow.step(), SurveyStep::HomeLocation);
        assert_eq!(flow.location.as_str(), "Lisbon, Portugal");
        assert!(flow.back());
        assert!(!flow.back(), "cannot back out of the first step");
        assert!(flow.interests.contains("nature"));
    }

    #[test]
    fn prefilled_flow_round_trips_preferences() {
        let prefs = Preferences {
            interests: vec!["beach".to_string(), "food".to_string()],
            home_location: "Lisbon, Portugal".to_string(),
            budget: BudgetTier::Moderate,
            duration: DurationBucket::TwoWeeks,
        };
        let mut flow = OnboardingFlow::from_preferences(&prefs);
        assert!(flow.advance());
        assert!(flow.advance());
        assert!(flow.advance());
        assert_eq!(flow.finish(), Some(prefs));
    }
}
