use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::{Activity, BudgetTier, ItineraryDay, Preferences, Quest};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("store rejected the request with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("malformed {entity} record: {reason}")]
    Invalid {
        entity: &'static str,
        reason: String,
    },

    #[error("store configuration error: {0}")]
    Config(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The remote relational store the client reads quests and likes from.
/// Every call is fallible and asynchronous; callers decide how far a
/// failure propagates (the hosts log and keep prior state).
#[async_trait]
pub trait QuestStore: Send + Sync {
    /// All quests, newest first.
    async fn list_quests(&self) -> StoreResult<Vec<Quest>>;

    /// The subset of quests with the given ids, in store order.
    async fn quests_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Quest>>;

    async fn liked_ids(&self, user_id: &str) -> StoreResult<Vec<String>>;

    async fn add_like(&self, user_id: &str, quest_id: &str) -> StoreResult<()>;

    async fn remove_like(&self, user_id: &str, quest_id: &str) -> StoreResult<()>;

    async fn preferences(&self, user_id: &str) -> StoreResult<Option<Preferences>>;

    async fn save_preferences(&self, user_id: &str, prefs: &Preferences) -> StoreResult<()>;
}

/// PostgREST-style client over the hosted store. Auth is pass-through:
/// the `apikey` header always, plus a bearer token when a session was
/// configured.
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    pub fn new(config: &AppConfig) -> StoreResult<Self> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(config.api_key())
            .map_err(|_| StoreError::Config("API key contains invalid header bytes".into()))?;
        headers.insert("apikey", api_key);
        if let Some(token) = config.access_token() {
            let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| StoreError::Config("access token contains invalid header bytes".into()))?;
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            base_url: config.api_url().trim_end_matches('/').to_string(),
        })
    }

    fn table(&self, method: Method, name: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, name))
    }

    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::Rejected { status, body })
        }
    }

    async fn fetch_quests(&self, request: RequestBuilder) -> StoreResult<Vec<Quest>> {
        let response = Self::check(request.send().await?).await?;
        let rows: Vec<QuestRow> = response.json().await?;
        rows.into_iter().map(quest_from_row).collect()
    }
}

#[async_trait]
impl QuestStore for RestStore {
    async fn list_quests(&self) -> StoreResult<Vec<Quest>> {
        let request = self
            .table(Method::GET, "quests")
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.fetch_quests(request).await
    }

    async fn quests_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Quest>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let id_filter = format!("in.({})", ids.join(","));
        let request = self
            .table(Method::GET, "quests")
            .query(&[("select", "*"), ("id", id_filter.as_str())]);
        self.fetch_quests(request).await
    }

    async fn liked_ids(&self, user_id: &str) -> StoreResult<Vec<String>> {
        let user_filter = format!("eq.{user_id}");
        let request = self
            .table(Method::GET, "liked_quests")
            .query(&[("select", "quest_id"), ("user_id", user_filter.as_str())]);
        let response = Self::check(request.send().await?).await?;
        let rows: Vec<LikedRow> = response.json().await?;
        Ok(rows.into_iter().map(|row| row.quest_id).collect())
    }

    async fn add_like(&self, user_id: &str, quest_id: &str) -> StoreResult<()> {
        let request = self.table(Method::POST, "liked_quests").json(&LikedInsert {
            user_id,
            quest_id,
        });
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn remove_like(&self, user_id: &str, quest_id: &str) -> StoreResult<()> {
        let user_filter = format!("eq.{user_id}");
        let quest_filter = format!("eq.{quest_id}");
        let request = self.table(Method::DELETE, "liked_quests").query(&[
            ("user_id", user_filter.as_str()),
            ("quest_id", quest_filter.as_str()),
        ]);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn preferences(&self, user_id: &str) -> StoreResult<Option<Preferences>> {
        let user_filter = format!("eq.{user_id}");
        let request = self
            .table(Method::GET, "user_preferences")
            .query(&[("select", "*"), ("user_id", user_filter.as_str())]);
        let response = Self::check(request.send().await?).await?;
        let rows: Vec<PreferenceRow> = response.json().await?;
        rows.into_iter().next().map(preferences_from_row).transpose()
    }

    async fn save_preferences(&self, user_id: &str, prefs: &Preferences) -> StoreResult<()> {
        let row = PreferenceUpsert {
            user_id,
            interests: &prefs.interests,
            home_location: &prefs.home_location,
            budget_preference: prefs.budget.as_str(),
            duration_preference: prefs.duration.id(),
            updated_at: Utc::now().to_rfc3339(),
        };
        let request = self
            .table(Method::POST, "user_preferences")
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row);
        Self::check(request.send().await?).await?;
        Ok(())
    }
}

/// Raw quest row as the store returns it. Enumerated fields arrive as
/// plain strings and are validated here, at the boundary, rather than
/// trusted downstream.
#[derive(Debug, Deserialize)]
struct QuestRow {
    id: String,
    title: String,
    description: String,
    destination: String,
    #[serde(default)]
    cover_image: String,
    budget_level: String,
    duration: String,
    duration_days: i64,
    total_price: f64,
    currency: String,
    #[serde(default)]
    activities: Vec<Activity>,
    #[serde(default)]
    itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    categories: Vec<String>,
    created_at: String,
}

#[derive(Debug, Deserialize)]
struct LikedRow {
    quest_id: String,
}

#[derive(Debug, Serialize)]
struct LikedInsert<'a> {
    user_id: &'a str,
    quest_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct PreferenceRow {
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    home_location: String,
    budget_preference: String,
    duration_preference: String,
}

#[derive(Debug, Serialize)]
struct PreferenceUpsert<'a> {
    user_id: &'a str,
    interests: &'a [String],
    home_location: &'a str,
    budget_preference: &'a str,
    duration_preference: &'a str,
    updated_at: String,
}

fn invalid(entity: &'static str, reason: impl Into<String>) -> StoreError {
    StoreError::Invalid {
        entity,
        reason: reason.into(),
    }
}

fn quest_from_row(row: QuestRow) -> StoreResult<Quest> {
    let budget = row
        .budget_level
        .parse::<BudgetTier>()
        .map_err(|err| invalid("quest", err.to_string()))?;

    if row.duration_days < 1 {
        return Err(invalid(
            "quest",
            format!("duration_days must be at least 1, got {}", row.duration_days),
        ));
    }

    if row.total_price < 0.0 {
        return Err(invalid(
            "quest",
            format!("total_price must be non-negative, got {}", row.total_price),
        ));
    }

    if let Some(activity) = row.activities.iter().find(|a| a.price < 0.0) {
        return Err(invalid(
            "quest",
            format!("activity '{}' has a negative price", activity.name),
        ));
    }

    let created_at = parse_timestamp(&row.created_at)?;

    Ok(Quest {
        id: row.id,
        title: row.title,
        description: row.description,
        destination: row.destination,
        cover_image: row.cover_image,
        budget,
        duration: row.duration,
        duration_days: row.duration_days as u32,
        total_price: row.total_price,
        currency: row.currency,
        activities: row.activities,
        itinerary: row.itinerary,
        categories: row.categories,
        created_at,
    })
}

fn preferences_from_row(row: PreferenceRow) -> StoreResult<Preferences> {
    let budget = row
        .budget_preference
        .parse::<BudgetTier>()
        .map_err(|err| invalid("preferences", err.to_string()))?;
    let duration = row
        .duration_preference
        .parse()
        .map_err(|err: anyhow::Error| invalid("preferences", err.to_string()))?;

    Ok(Preferences {
        interests: row.interests,
        home_location: row.home_location,
        budget,
        duration,
    })
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| invalid("quest", format!("timestamp '{raw}': {err}")))
}
