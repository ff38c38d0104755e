use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre};

use crate::api::TweetApiClient;
use crate::api::cache::{ResponseCache, Throttle};
use crate::api::types::{Includes, Tweet};
use crate::avatar::avatar_url;
use crate::config::{AppConfig, load_api_settings, load_config};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "chirptui", about = "TUI and CLI for a mock tweet API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui,
    /// Fetch all tweets (JSONL)
    Tweets,
    /// Fetch a single tweet by ID (JSONL)
    Open {
        /// Tweet ID
        id: String,
    },
    /// List available tweet IDs
    Ids,
    /// Check backend health
    Health,
}

// ---------------------------------------------------------------------------
// Denormalization helper
// ---------------------------------------------------------------------------

/// Build a self-contained JSON object for a tweet with its resolved author
/// and avatar URL embedded. The author may be absent from `includes`; the
/// avatar seed then falls back to the tweet's own `author_id`.
fn denormalize_tweet(tweet: &Tweet, includes: &Option<Includes>) -> serde_json::Value {
    let author = includes
        .as_ref()
        .and_then(|inc| inc.users.as_ref())
        .and_then(|users| users.iter().find(|u| u.id == tweet.author_id));

    let avatar_seed = author.map(|u| u.id.as_str()).unwrap_or(&tweet.author_id);

    serde_json::json!({
        "tweet": tweet,
        "author": author,
        "avatar_url": avatar_url(avatar_seed, 48),
    })
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Print a list of tweets as JSONL to stdout.
fn print_tweets(tweets: &[Tweet], includes: &Option<Includes>) -> eyre::Result<()> {
    for tweet in tweets {
        let line = serde_json::to_string(&denormalize_tweet(tweet, includes))?;
        println!("{line}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Client construction (shared with main.rs TUI path)
// ---------------------------------------------------------------------------

/// Build a `TweetApiClient` from env settings + config. The cache and
/// throttle collaborators are attached only when enabled in config.
pub fn build_api_client(config: &AppConfig) -> TweetApiClient {
    let settings = load_api_settings();
    tracing::info!(base_url = %settings.base_url, authenticated = settings.api_key.is_some(), "api client configured");

    let mut client = TweetApiClient::new(settings.base_url, settings.api_key);
    if config.cache_enabled {
        client = client
            .with_cache(ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)))
            .with_throttle(Throttle::new(Duration::from_millis(
                config.request_interval_ms,
            )));
    }
    client
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

pub async fn run_command(cmd: CliCommand) -> eyre::Result<()> {
    let config = load_config();
    let mut client = build_api_client(&config);

    match cmd {
        CliCommand::Tui => {
            unreachable!("tui is handled in main")
        }

        CliCommand::Tweets => {
            let resp = client.get_tweets().await.map_err(|e| eyre!("{e}"))?;
            if let Some(tweets) = &resp.data {
                print_tweets(tweets, &resp.includes)?;
            }
        }

        CliCommand::Open { id } => {
            let resp = client.get_tweet(&id).await.map_err(|e| eyre!("{e}"))?;
            let tweet = resp.data.as_ref().ok_or_else(|| eyre!("tweet {id} not found"))?;
            let line = serde_json::to_string(&denormalize_tweet(tweet, &resp.includes))?;
            println!("{line}");
        }

        CliCommand::Ids => {
            let ids = client.get_tweet_ids().await.map_err(|e| eyre!("{e}"))?;
            for id in ids {
                println!("{id}");
            }
        }

        CliCommand::Health => {
            let health = client.health_check().await.map_err(|e| eyre!("{e}"))?;
            println!("{}", serde_json::to_string(&health)?);
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::User;

    fn tweet(author_id: &str, username: &str) -> Tweet {
        Tweet {
            id: "20".into(),
            author_id: author_id.into(),
            username: username.into(),
            text: "just setting up my twttr".into(),
            created_at: Some("2006-03-21T20:50:14.000Z".into()),
        }
    }

    #[test]
    fn denormalize_resolves_author_from_includes() {
        let includes = Some(Includes {
            users: Some(vec![User {
                id: "12".into(),
                name: "Jack Dorsey".into(),
                username: "jack".into(),
                profile_image_url: None,
            }]),
            places: None,
            polls: None,
            topics: None,
        });

        let value = denormalize_tweet(&tweet("12", "jack"), &includes);
        assert_eq!(value["author"]["name"], "Jack Dorsey");
    }

    #[test]
    fn denormalize_tolerates_missing_author() {
        let includes = Some(Includes {
            users: Some(vec![]),
            places: None,
            polls: None,
            topics: None,
        });

        let value = denormalize_tweet(&tweet("12", "jack"), &includes);
        assert!(value["author"].is_null());
        // Avatar seed falls back to the tweet's author_id.
        assert_eq!(value["avatar_url"], avatar_url("12", 48));
    }

    #[test]
    fn denormalize_avatar_is_deterministic() {
        let a = denormalize_tweet(&tweet("12", "jack"), &None);
        let b = denormalize_tweet(&tweet("12", "jack"), &None);
        assert_eq!(a["avatar_url"], b["avatar_url"]);
    }
}
