use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::cli::{CliCommand, LikeArgs, SearchArgs};
use crate::core::{FeedService, FeedSnapshot};
use crate::filter::{filter, FilterSpec};
use crate::model::Quest;

/// Run a headless subcommand against the store and write a report.
pub fn execute<W: Write>(service: &FeedService, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Search(args) => handle_search(service, &args, &mut writer),
        CliCommand::Like(args) => handle_like(service, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;
    Ok(runtime.block_on(future))
}

fn handle_search<W: Write>(service: &FeedService, args: &SearchArgs, mut writer: W) -> Result<()> {
    let snapshot = block_on(service.load_feed())??;
    let spec = FilterSpec::from(args);
    let matches = filter(&snapshot.quests, &spec);

    if args.json {
        serde_json::to_writer_pretty(&mut writer, &matches)?;
        writeln!(writer)?;
        return Ok(());
    }

    for quest in &matches {
        writeln!(writer, "{}", QuestLine(quest, &snapshot))?;
    }
    writeln!(writer, "{}", Tally(matches.len()))?;
    Ok(())
}

fn handle_like<W: Write>(service: &FeedService, args: &LikeArgs, mut writer: W) -> Result<()> {
    let mut snapshot = block_on(service.load_feed())??;

    for id in &args.ids {
        if !snapshot.quests.iter().any(|quest| quest.id == *id) {
            writeln!(writer, "Not found: {id}")?;
            continue;
        }

        let liked = snapshot.liked.toggle(id);
        block_on(service.push_like(id, liked))??;
        if liked {
            writeln!(writer, "Liked {id}")?;
        } else {
            writeln!(writer, "Unliked {id}")?;
        }
    }
    Ok(())
}

struct QuestLine<'a>(&'a Quest, &'a FeedSnapshot);

impl fmt::Display for QuestLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let QuestLine(quest, snapshot) = self;
        let heart = if snapshot.liked.contains(&quest.id) {
            "♥"
        } else {
            " "
        };
        write!(
            f,
            "{} {}  {} — {} · {} · {}",
            heart,
            &quest.id[..quest.id.len().min(8)],
            quest.title,
            quest.destination,
            quest.duration,
            quest.budget.as_str(),
        )
    }
}

struct Tally(usize);

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} quest{} found",
            self.0,
            if self.0 == 1 { "" } else { "s" }
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::core::store::{QuestStore, StoreResult};
    use crate::core::AppConfig;
    use crate::model::{BudgetTier, DurationBucket, Preferences};

    fn quest(id: &str, title: &str, days: u32, budget: BudgetTier) -> Quest {
        Quest {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            destination: "Somewhere".to_string(),
            cover_image: String::new(),
            budget,
            duration: format!("{days} days"),
            duration_days: days,
            total_price: 800.0,
            currency: "USD".to_string(),
            activities: Vec::new(),
            itinerary: Vec::new(),
            categories: vec!["beach".to_string()],
            created_at: Utc::now(),
        }
    }

    struct MemoryStore {
        quests: Vec<Quest>,
        likes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QuestStore for MemoryStore {
        async fn list_quests(&self) -> StoreResult<Vec<Quest>> {
            Ok(self.quests.clone())
        }

        async fn quests_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Quest>> {
            Ok(self
                .quests
                .iter()
                .filter(|q| ids.contains(&q.id))
                .cloned()
                .collect())
        }

        async fn liked_ids(&self, _user_id: &str) -> StoreResult<Vec<String>> {
            Ok(self.likes.lock().unwrap().clone())
        }

        async fn add_like(&self, _user_id: &str, quest_id: &str) -> StoreResult<()> {
            self.likes.lock().unwrap().push(quest_id.to_string());
            Ok(())
        }

        async fn remove_like(&self, _user_id: &str, quest_id: &str) -> StoreResult<()> {
            self.likes.lock().unwrap().retain(|id| id != quest_id);
            Ok(())
        }

        async fn preferences(&self, _user_id: &str) -> StoreResult<Option<Preferences>> {
            Ok(None)
        }

        async fn save_preferences(
            &self,
            _user_id: &str,
            _prefs: &Preferences,
        ) -> StoreResult<()> {
            Ok(())
        }
    }

    fn seeded_service() -> FeedService {
        let store = MemoryStore {
            quests: vec![
                quest("bali-5d", "Bali Retreat", 5, BudgetTier::Moderate),
                quest("tokyo-3d", "Tokyo Nights", 3, BudgetTier::Luxury),
            ],
            likes: Mutex::new(vec!["tokyo-3d".to_string()]),
        };
        let config = AppConfig::from_parts(
            "http://store.local",
            "key",
            None,
            Some("user-1".to_string()),
        );
        FeedService::with_store(config, Arc::new(store))
    }

    #[test]
    fn search_reports_matches_and_tally() {
        let service = seeded_service();
        let args = SearchArgs {
            query: vec!["bali".to_string()],
            category: Vec::new(),
            duration: None,
            budget: None,
            json: false,
        };

        let mut output = Vec::new();
        execute(&service, CliCommand::Search(args), &mut output).expect("execute search");
        let output = String::from_utf8(output).expect("utf8");

        assert!(output.contains("Bali Retreat"));
        assert!(!output.contains("Tokyo Nights"));
        assert!(output.contains("1 quest found"));
    }

    #[test]
    fn search_duration_filter_narrows_results() {
        let service = seeded_service();
        let args = SearchArgs {
            query: Vec::new(),
            category: Vec::new(),
            duration: Some(DurationBucket::Weekend),
            budget: None,
            json: false,
        };

        let mut output = Vec::new();
        execute(&service, CliCommand::Search(args), &mut output).expect("execute search");
        let output = String::from_utf8(output).expect("utf8");

        assert!(output.contains("Tokyo Nights"));
        assert!(output.contains("♥"));
        assert!(output.contains("1 quest found"));
    }

    #[test]
    fn search_json_emits_the_matching_records() {
        let service = seeded_service();
        let args = SearchArgs {
            query: Vec::new(),
            category: Vec::new(),
            duration: None,
            budget: Some(BudgetTier::Luxury),
            json: true,
        };

        let mut output = Vec::new();
        execute(&service, CliCommand::Search(args), &mut output).expect("execute search");
        let parsed: serde_json::Value =
            serde_json::from_slice(&output).expect("valid json output");

        assert_eq!(parsed.as_array().map(Vec::len), Some(1));
        assert_eq!(parsed[0]["title"], "Tokyo Nights");
    }

    #[test]
    fn like_toggles_and_reports_each_id() {
        let service = seeded_service();
        let args = LikeArgs {
            ids: vec![
                "bali-5d".to_string(),
                "tokyo-3d".to_string(),
                "missing".to_string(),
            ],
        };

        let mut output = Vec::new();
        execute(&service, CliCommand::Like(args), &mut output).expect("execute like");
        let output = String::from_utf8(output).expect("utf8");

        assert!(output.contains("Liked bali-5d"));
        assert!(output.contains("Unliked tokyo-3d"));
        assert!(output.contains("Not found: missing"));
    }
}
