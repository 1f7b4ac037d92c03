use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The fixed catalog of filterable quest categories.
pub const CATEGORIES: [&str; 11] = [
    "nature",
    "nightlife",
    "culture",
    "history",
    "adventure",
    "beach",
    "food",
    "wellness",
    "city",
    "wine",
    "hiking",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BudgetTier {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury];

    /// Wire form, as stored in the quests table.
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "$",
            BudgetTier::Moderate => "$$",
            BudgetTier::Luxury => "$$$",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Budget",
            BudgetTier::Moderate => "Moderate",
            BudgetTier::Luxury => "Luxury",
        }
    }

    pub fn range_hint(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Under $1000",
            BudgetTier::Moderate => "$1000-$2500",
            BudgetTier::Luxury => "$2500+",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "$" | "budget" => Ok(BudgetTier::Budget),
            "$$" | "moderate" => Ok(BudgetTier::Moderate),
            "$$$" | "luxury" => Ok(BudgetTier::Luxury),
            other => Err(anyhow!(
                "Unknown budget tier '{}': expected $|$$|$$$ or budget|moderate|luxury",
                other
            )),
        }
    }
}

impl ValueEnum for BudgetTier {
    fn value_variants<'a>() -> &'a [Self] {
        &BudgetTier::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let value = match self {
            BudgetTier::Budget => "budget",
            BudgetTier::Moderate => "moderate",
            BudgetTier::Luxury => "luxury",
        };
        Some(clap::builder::PossibleValue::new(value).alias(self.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DurationBucket {
    #[serde(rename = "weekend")]
    Weekend,
    #[serde(rename = "5days")]
    FiveDays,
    #[serde(rename = "2weeks")]
    TwoWeeks,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 3] = [
        DurationBucket::Weekend,
        DurationBucket::FiveDays,
        DurationBucket::TwoWeeks,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DurationBucket::Weekend => "weekend",
            DurationBucket::FiveDays => "5days",
            DurationBucket::TwoWeeks => "2weeks",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::Weekend => "Weekend",
            DurationBucket::FiveDays => "5 Days",
            DurationBucket::TwoWeeks => "2 Weeks",
        }
    }

    /// Inclusive day-count range covered by this bucket.
    pub fn days(&self) -> RangeInclusive<u32> {
        match self {
            DurationBucket::Weekend => 2..=3,
            DurationBucket::FiveDays => 4..=6,
            DurationBucket::TwoWeeks => 7..=14,
        }
    }

    pub fn days_hint(&self) -> &'static str {
        match self {
            DurationBucket::Weekend => "2-3 days",
            DurationBucket::FiveDays => "4-6 days",
            DurationBucket::TwoWeeks => "7-14 days",
        }
    }

    pub fn contains(&self, duration_days: u32) -> bool {
        self.days().contains(&duration_days)
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for DurationBucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weekend" => Ok(DurationBucket::Weekend),
            "5days" => Ok(DurationBucket::FiveDays),
            "2weeks" => Ok(DurationBucket::TwoWeeks),
            other => Err(anyhow!(
                "Unknown duration bucket '{}': expected weekend|5days|2weeks",
                other
            )),
        }
    }
}

impl ValueEnum for DurationBucket {
    fn value_variants<'a>() -> &'a [Self] {
        &DurationBucket::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.id()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub duration: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    pub activities: Vec<String>,
}

/// A curated travel itinerary, shown as one swipeable card. Read-only
/// once it crosses the store boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub destination: String,
    pub cover_image: String,
    pub budget: BudgetTier,
    pub duration: String,
    pub duration_days: u32,
    pub total_price: f64,
    pub currency: String,
    pub activities: Vec<Activity>,
    pub itinerary: Vec<ItineraryDay>,
    pub categories: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Onboarding survey answers, upserted to the store per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub interests: Vec<String>,
    pub home_location: String,
    pub budget: BudgetTier,
    pub duration: DurationBucket,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn budget_tier_roundtrips_symbols_and_labels() {
        assert_eq!("$$".parse::<BudgetTier>().unwrap(), BudgetTier::Moderate);
        assert_eq!("luxury".parse::<BudgetTier>().unwrap(), BudgetTier::Luxury);
        assert_eq!(BudgetTier::Budget.to_string(), "$");
        assert!("$$$$".parse::<BudgetTier>().is_err());
    }

    #[rstest]
    #[case(DurationBucket::Weekend, 2, true)]
    #[case(DurationBucket::Weekend, 3, true)]
    #[case(DurationBucket::Weekend, 4, false)]
    #[case(DurationBucket::FiveDays, 3, false)]
    #[case(DurationBucket::FiveDays, 4, true)]
    #[case(DurationBucket::FiveDays, 6, true)]
    #[case(DurationBucket::TwoWeeks, 7, true)]
    #[case(DurationBucket::TwoWeeks, 14, true)]
    #[case(DurationBucket::TwoWeeks, 15, false)]
    fn duration_buckets_cover_documented_ranges(
        #[case] bucket: DurationBucket,
        #[case] days: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(bucket.contains(days), expected);
    }

    #[test]
    fn duration_bucket_parses_its_id() {
        for bucket in DurationBucket::ALL {
            assert_eq!(bucket.id().parse::<DurationBucket>().unwrap(), bucket);
        }
    }

    #[test]
    fn budget_tier_serializes_as_symbol() {
        let json = serde_json::to_string(&BudgetTier::Moderate).unwrap();
        assert_eq!(json, "\"$$\"");
        let parsed: BudgetTier = serde_json::from_str("\"$$$\"").unwrap();
        assert_eq!(parsed, BudgetTier::Luxury);
    }
}
