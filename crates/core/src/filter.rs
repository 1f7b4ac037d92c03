use std::collections::BTreeSet;

use crate::model::{BudgetTier, DurationBucket, Quest};

/// The current combination of text query, category selection, duration
/// bucket and budget tier used to narrow the quest list. Rebuilt from
/// user input on every change; never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub query: String,
    pub categories: BTreeSet<String>,
    pub duration: Option<DurationBucket>,
    pub budget: Option<BudgetTier>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.categories.is_empty()
            && self.duration.is_none()
            && self.budget.is_none()
    }

    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut parts = Vec::new();
        let query = self.query.trim();
        if !query.is_empty() {
            parts.push(format!("\"{query}\""));
        }

        if !self.categories.is_empty() {
            let joined = self
                .categories
                .iter()
                .map(|c| format!("#{c}"))
                .collect::<Vec<_>>()
                .join(",");
            parts.push(joined);
        }

        if let Some(duration) = self.duration {
            parts.push(duration.label().to_string());
        }

        if let Some(budget) = self.budget {
            parts.push(budget.as_str().to_string());
        }

        Some(parts.join(" | "))
    }

    /// Whether a quest satisfies every active dimension. Categories OR
    /// within the dimension; duration and budget are exact matches.
    /// Unset dimensions match everything.
    pub fn matches(&self, quest: &Quest) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() {
            let hit = quest.title.to_lowercase().contains(&query)
                || quest.description.to_lowercase().contains(&query)
                || quest.destination.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        if !self.categories.is_empty()
            && !quest
                .categories
                .iter()
                .any(|cat| self.categories.contains(cat))
        {
            return false;
        }

        if let Some(duration) = self.duration {
            if !duration.contains(quest.duration_days) {
                return false;
            }
        }

        if let Some(budget) = self.budget {
            if quest.budget != budget {
                return false;
            }
        }

        true
    }
}

/// Ordered subsequence of `quests` satisfying `spec`. Pure; safe to
/// re-run on every keystroke or selection change.
pub fn filter(quests: &[Quest], spec: &FilterSpec) -> Vec<Quest> {
    quests
        .iter()
        .filter(|quest| spec.matches(quest))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn quest(
        id: &str,
        title: &str,
        categories: &[&str],
        duration_days: u32,
        budget: BudgetTier,
    ) -> Quest {
        Quest {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} in a nutshell"),
            destination: "Somewhere".to_string(),
            cover_image: String::new(),
            budget,
            duration: format!("{duration_days} days"),
            duration_days,
            total_price: 1200.0,
            currency: "USD".to_string(),
            activities: Vec::new(),
            itinerary: Vec::new(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Quest> {
        vec![
            quest("a", "Bali Retreat", &["wellness"], 5, BudgetTier::Moderate),
            quest(
                "b",
                "Tokyo Nights",
                &["nightlife", "city"],
                3,
                BudgetTier::Luxury,
            ),
            quest("c", "Lisbon Weekender", &["food", "city"], 2, BudgetTier::Budget),
        ]
    }

    #[test]
    fn empty_spec_returns_input_unchanged() {
        let quests = sample();
        let spec = FilterSpec::default();
        assert_eq!(filter(&quests, &spec), quests);
    }

    #[test]
    fn result_is_order_preserving_subsequence() {
        let quests = sample();
        let spec = FilterSpec {
            categories: ["city".to_string()].into_iter().collect(),
            ..FilterSpec::default()
        };

        let result = filter(&quests, &spec);
        let ids: Vec<&str> = result.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);

        // Membership only ever narrows: re-filtering is a no-op.
        assert_eq!(filter(&result, &spec), result);
    }

    #[test]
    fn query_matches_title_description_or_destination_case_insensitively() {
        let mut quests = sample();
        quests[2].destination = "Lisbon, Portugal".to_string();

        let spec = FilterSpec {
            query: "BALI".to_string(),
            ..FilterSpec::default()
        };
        let filtered = filter(&quests, &spec);
        let ids: Vec<&str> = filtered.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);

        let spec = FilterSpec {
            query: "portugal".to_string(),
            ..FilterSpec::default()
        };
        let filtered = filter(&quests, &spec);
        let ids: Vec<&str> = filtered.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn category_selection_is_or_within_the_dimension() {
        let quests = vec![quest(
            "a",
            "Coastal Feast",
            &["beach", "food"],
            4,
            BudgetTier::Moderate,
        )];
        let spec = FilterSpec {
            categories: ["food".to_string(), "wine".to_string()].into_iter().collect(),
            ..FilterSpec::default()
        };
        assert_eq!(filter(&quests, &spec).len(), 1);
    }

    #[test]
    fn duration_bucket_boundaries_are_inclusive() {
        let three = quest("3", "Three", &[], 3, BudgetTier::Budget);
        let four = quest("4", "Four", &[], 4, BudgetTier::Budget);

        let weekend = FilterSpec {
            duration: Some(DurationBucket::Weekend),
            ..FilterSpec::default()
        };
        let five_days = FilterSpec {
            duration: Some(DurationBucket::FiveDays),
            ..FilterSpec::default()
        };

        assert!(weekend.matches(&three));
        assert!(!five_days.matches(&three));
        assert!(!weekend.matches(&four));
        assert!(five_days.matches(&four));
    }

    #[test]
    fn budget_requires_exact_tier() {
        let moderate = quest("m", "Moderate", &[], 5, BudgetTier::Moderate);
        let budget_spec = FilterSpec {
            budget: Some(BudgetTier::Budget),
            ..FilterSpec::default()
        };
        let moderate_spec = FilterSpec {
            budget: Some(BudgetTier::Moderate),
            ..FilterSpec::default()
        };
        assert!(!budget_spec.matches(&moderate));
        assert!(moderate_spec.matches(&moderate));
    }

    #[test]
    fn dimensions_combine_with_and() {
        let quests = sample();
        let spec = FilterSpec {
            categories: ["city".to_string()].into_iter().collect(),
            duration: Some(DurationBucket::Weekend),
            budget: Some(BudgetTier::Luxury),
            ..FilterSpec::default()
        };
        let filtered = filter(&quests, &spec);
        let ids: Vec<&str> = filtered.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn bali_tokyo_scenario() {
        let quests = vec![
            quest("a", "Bali Retreat", &["wellness"], 5, BudgetTier::Moderate),
            quest(
                "b",
                "Tokyo Nights",
                &["nightlife", "city"],
                3,
                BudgetTier::Luxury,
            ),
        ];

        let by_query = FilterSpec {
            query: "bali".to_string(),
            ..FilterSpec::default()
        };
        let filtered = filter(&quests, &by_query);
        let titles: Vec<&str> = filtered.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Bali Retreat"]);

        let by_duration = FilterSpec {
            duration: Some(DurationBucket::Weekend),
            ..FilterSpec::default()
        };
        let filtered = filter(&quests, &by_duration);
        let titles: Vec<&str> = filtered
            .iter()
            .map(|q| q.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Tokyo Nights"]);

        assert_eq!(filter(&quests, &FilterSpec::default()), quests);
    }

    #[test]
    fn summary_lists_active_dimensions_only() {
        let mut spec = FilterSpec::default();
        assert_eq!(spec.summary(), None);

        spec.query = "bali".to_string();
        spec.categories.insert("beach".to_string());
        spec.duration = Some(DurationBucket::Weekend);
        spec.budget = Some(BudgetTier::Moderate);
        assert_eq!(spec.summary().as_deref(), Some("\"bali\" | #beach | Weekend | $$"));
    }
}
