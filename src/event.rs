use color_eyre::eyre::OptionExt;
use crossterm::event::Event as CrosstermEvent;
use futures::{FutureExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::api::types::{HealthStatus, ListResponse, SingleResponse, Tweet};

/// Tick interval for a configured frames-per-second rate, clamped so a
/// zero or negative config value cannot produce a non-finite duration.
fn tick_interval(tick_fps: f64) -> Duration {
    Duration::from_secs_f64(1.0 / tick_fps.clamp(1.0, 240.0))
}

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// An event that is emitted on a regular schedule.
    Tick,
    /// Crossterm events from the terminal.
    Crossterm(CrosstermEvent),
    /// Application-level events.
    App(Box<AppEvent>),
}

/// The three list pages. They share the same backing fetch (`GET /tweets`)
/// but hold independent state, so a response is routed by feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Home,
    AllTweets,
    Profile,
}

/// Application events for navigation, API requests, and API responses.
///
/// Fetch triggers and their completions carry a per-feed sequence number so
/// that a response resolving after a newer request (or after the view was
/// left) is discarded instead of applied.
#[derive(Clone, Debug)]
pub enum AppEvent {
    // -- Navigation --
    Quit,
    PushView(ViewKind),
    PopView,
    SwitchView(ViewKind),

    // -- API request triggers (sent from key handlers) --
    FetchFeed {
        feed: FeedKind,
        seq: u64,
    },
    FetchTweet {
        tweet_id: String,
        seq: u64,
    },
    FetchHealth,

    // -- API response events (sent from async tasks back to the event loop) --
    FeedLoaded {
        feed: FeedKind,
        seq: u64,
        result: ApiResult<ListResponse<Tweet>>,
    },
    TweetLoaded {
        seq: u64,
        result: Box<ApiResult<SingleResponse<Tweet>>>,
    },
    HealthLoaded(ApiResult<HealthStatus>),
}

/// API result type using `Arc<String>` so errors are `Clone`.
pub type ApiResult<T> = Result<T, Arc<String>>;

/// Identifies a view for the view-stack navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    AllTweets,
    TweetDetail(String), // tweet_id
    Profile,
    Help,
}

/// Terminal event handler.
///
/// Spawns a background task that emits tick and crossterm events, and exposes
/// an unbounded channel for application events.
#[derive(Debug)]
pub struct EventHandler {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver channel.
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] and spawns the event
    /// task, ticking at the configured frames per second.
    pub fn new(tick_fps: f64) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = EventTask::new(sender.clone(), tick_fps);
        tokio::spawn(async { actor.run().await });
        Self { sender, receiver }
    }

    /// Receives the next event, blocking until one is available.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Failed to receive event")
    }

    /// Queue an app event to be processed by the event loop.
    pub fn send(&self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(Box::new(app_event)));
    }

    /// Clone the underlying sender for use in spawned async tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

/// Background task that reads crossterm events and emits ticks.
struct EventTask {
    sender: mpsc::UnboundedSender<Event>,
    tick_rate: Duration,
}

impl EventTask {
    fn new(sender: mpsc::UnboundedSender<Event>, tick_fps: f64) -> Self {
        Self {
            sender,
            tick_rate: tick_interval(tick_fps),
        }
    }

    async fn run(self) -> color_eyre::Result<()> {
        let mut reader = crossterm::event::EventStream::new();
        let mut tick = tokio::time::interval(self.tick_rate);
        loop {
            let tick_delay = tick.tick();
            let crossterm_event = reader.next().fuse();
            tokio::select! {
                _ = self.sender.closed() => {
                    break;
                }
                _ = tick_delay => {
                    self.send(Event::Tick);
                }
                Some(Ok(evt)) = crossterm_event => {
                    self.send(Event::Crossterm(evt));
                }
            };
        }
        Ok(())
    }

    fn send(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_interval_follows_configured_fps() {
        assert_eq!(tick_interval(30.0), Duration::from_secs_f64(1.0 / 30.0));
        assert_eq!(tick_interval(60.0), Duration::from_secs_f64(1.0 / 60.0));
    }

    #[test]
    fn tick_interval_clamps_degenerate_fps() {
        assert_eq!(tick_interval(0.0), Duration::from_secs(1));
        assert_eq!(tick_interval(-5.0), Duration::from_secs(1));
        assert_eq!(tick_interval(100_000.0), tick_interval(240.0));
    }

    #[test]
    fn event_task_uses_configured_tick_rate() {
        let (sender, _receiver) = mpsc::unbounded_channel();
        let task = EventTask::new(sender, 60.0);
        assert_eq!(task.tick_rate, Duration::from_secs_f64(1.0 / 60.0));
    }
}
