use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::likes::LikedSet;
use crate::model::{Preferences, Quest};
use crate::store::{QuestStore, RestStore};

/// One consistent view of the feed: the quests to page through plus the
/// liked set they should be rendered against.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub quests: Vec<Quest>,
    pub liked: LikedSet,
}

impl FeedSnapshot {
    pub fn empty() -> Self {
        Self {
            quests: Vec::new(),
            liked: LikedSet::default(),
        }
    }
}

/// Orchestrates the remote store for every client surface (TUI and
/// headless commands). Cheap to clone; the store is shared.
#[derive(Clone)]
pub struct FeedService {
    config: AppConfig,
    store: Arc<dyn QuestStore>,
}

impl FeedService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = RestStore::new(&config).context("Failed to build the quest store client")?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    /// Service with an injected store, used by tests and embedders.
    pub fn with_store(config: AppConfig, store: Arc<dyn QuestStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Full feed, newest first, plus the liked set reconciled from the
    /// store. A liked-row failure degrades to an empty set so the feed
    /// still renders; quest failures propagate.
    pub async fn load_feed(&self) -> Result<FeedSnapshot> {
        let quests = self
            .store
            .list_quests()
            .await
            .context("Failed to load quests")?;

        let liked = match self.config.user_id() {
            Some(user_id) => match self.store.liked_ids(user_id).await {
                Ok(ids) => LikedSet::from_ids(ids),
                Err(err) => {
                    tracing::warn!(error = %err, "liked quests unavailable, rendering unliked");
                    LikedSet::default()
                }
            },
            None => LikedSet::default(),
        };

        Ok(FeedSnapshot { quests, liked })
    }

    /// Only the liked quests, re-fetched by id.
    pub async fn liked_feed(&self) -> Result<FeedSnapshot> {
        let user_id = self.config.require_user()?;
        let ids = self
            .store
            .liked_ids(user_id)
            .await
            .context("Failed to load liked quests")?;
        if ids.is_empty() {
            return Ok(FeedSnapshot::empty());
        }

        let quests = self
            .store
            .quests_by_ids(&ids)
            .await
            .context("Failed to load liked quests")?;
        Ok(FeedSnapshot {
            quests,
            liked: LikedSet::from_ids(ids),
        })
    }

    /// Write one like toggle outcome to the store. The caller has
    /// already flipped its local set; a failure here leaves local state
    /// alone and heals on the next `load_feed`.
    pub async fn push_like(&self, quest_id: &str, liked: bool) -> Result<()> {
        let user_id = self.config.require_user()?;
        if liked {
            self.store
                .add_like(user_id, quest_id)
                .await
                .with_context(|| format!("Failed to record like for quest {quest_id}"))?;
        } else {
            self.store
                .remove_like(user_id, quest_id)
                .await
                .with_context(|| format!("Failed to remove like for quest {quest_id}"))?;
        }
        Ok(())
    }

    pub async fn preferences(&self) -> Result<Option<Preferences>> {
        let user_id = self.config.require_user()?;
        self.store
            .preferences(user_id)
            .await
            .context("Failed to load preferences")
    }

    /// Whether the onboarding survey should run: no preferences row yet.
    pub async fn needs_onboarding(&self) -> Result<bool> {
        Ok(self.preferences().await?.is_none())
    }

    pub async fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        let user_id = self.config.require_user()?;
        self.store
            .save_preferences(user_id, prefs)
            .await
            .context("Failed to save preferences")
    }
}
