use clap::{ArgAction, Args, Parser, Subcommand};

use crate::filter::FilterSpec;
use crate::model::{BudgetTier, DurationBucket};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "wander",
    version,
    about = "A swipeable feed of curated travel quests, in your terminal.",
    after_help = "Examples:\n  wander                  Launch the TUI feed (same as `wander tui`)\n  wander search bali --duration weekend\n  wander search --category beach,food --budget moderate --json\n  wander like 4f1c9d2a"
)]
pub struct Cli {
    /// Override the quest store URL (defaults to WANDER_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Filter the quest feed and print matches
    Search(SearchArgs),
    /// Toggle likes for one or more quests by id
    Like(LikeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Free-text query matched against title, description and destination
    #[arg(value_name = "QUERY")]
    pub query: Vec<String>,

    /// Restrict to categories (comma-separated or repeated flag)
    #[arg(long, value_delimiter = ',', action = ArgAction::Append)]
    pub category: Vec<String>,

    /// Restrict to a trip-length bucket
    #[arg(long, value_enum)]
    pub duration: Option<DurationBucket>,

    /// Restrict to a budget tier
    #[arg(long, value_enum)]
    pub budget: Option<BudgetTier>,

    /// Emit machine-readable JSON instead of the table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LikeArgs {
    /// One or more quest ids to toggle
    #[arg(value_name = "QUEST_ID", required = true)]
    pub ids: Vec<String>,
}

impl From<&SearchArgs> for FilterSpec {
    fn from(args: &SearchArgs) -> Self {
        FilterSpec {
            query: args.query.join(" "),
            categories: args.category.iter().cloned().collect(),
            duration: args.duration,
            budget: args.budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn search_args_build_a_filter_spec() {
        let cli = Cli::parse_from([
            "wander", "search", "bali", "retreat", "--category", "beach,food", "--duration",
            "weekend", "--budget", "moderate",
        ]);

        let Some(CliCommand::Search(args)) = cli.command else {
            panic!("expected search command");
        };
        let spec = FilterSpec::from(&args);

        assert_eq!(spec.query, "bali retreat");
        assert!(spec.categories.contains("beach"));
        assert!(spec.categories.contains("food"));
        assert_eq!(spec.duration, Some(DurationBucket::Weekend));
        assert_eq!(spec.budget, Some(BudgetTier::Moderate));
    }

    #[test]
    fn no_subcommand_defaults_to_the_tui() {
        let cli = Cli::parse_from(["wander"]);
        assert!(cli.command.is_none());
    }
}
