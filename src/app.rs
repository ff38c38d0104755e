use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::api::TweetApiClient;
use crate::api::types::{Includes, ListResponse, SingleResponse, Tweet, User};
use crate::command::{self, Command};
use crate::config::AppConfig;
use crate::event::{ApiResult, AppEvent, Event, EventHandler, FeedKind, ViewKind};
use crate::ui;

// ---------------------------------------------------------------------------
// Load phase
// ---------------------------------------------------------------------------

/// Per-page fetch lifecycle. Every data view starts in `Loading` on mount
/// and ends in `Loaded` or `Failed`; there is no automatic retry, but
/// re-entering the view restarts the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Loading,
    Loaded,
    Failed,
}

// ---------------------------------------------------------------------------
// Feed state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FeedState {
    pub tweets: Vec<Tweet>,
    pub phase: LoadPhase,
    /// Latest issued request sequence number. A completion carrying an older
    /// number lost the race to a newer fetch and is discarded.
    pub seq: u64,
}

impl FeedState {
    /// Start a new fetch cycle, invalidating any in-flight response.
    fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.phase = LoadPhase::Loading;
        self.tweets.clear();
        self.seq
    }
}

#[derive(Default)]
pub struct DetailState {
    pub tweet: Option<Tweet>,
    pub phase: LoadPhase,
    pub seq: u64,
}

impl DetailState {
    fn begin_fetch(&mut self) -> u64 {
        self.seq += 1;
        self.phase = LoadPhase::Loading;
        self.tweet = None;
        self.seq
    }
}

// ---------------------------------------------------------------------------
// Result application
// ---------------------------------------------------------------------------

/// Apply a feed fetch completion. Returns false if the completion was stale
/// and ignored. The error itself is logged, never stored for display: the
/// views render a fixed generic message for the `Failed` phase.
fn apply_feed_result(
    state: &mut FeedState,
    users: &mut HashMap<String, User>,
    feed: FeedKind,
    seq: u64,
    result: ApiResult<ListResponse<Tweet>>,
) -> bool {
    if seq != state.seq {
        tracing::debug!(?feed, seq, latest = state.seq, "discarding stale feed response");
        return false;
    }

    match result {
        Ok(resp) => {
            cache_users_from_includes(users, &resp.includes);
            state.tweets = resp.data.unwrap_or_default();
            state.phase = LoadPhase::Loaded;
        }
        Err(e) => {
            tracing::warn!(?feed, error = %e, "feed fetch failed");
            state.phase = LoadPhase::Failed;
        }
    }
    true
}

/// Apply a single-tweet fetch completion. A success envelope with no `data`
/// counts as a failure (tweet absent).
fn apply_tweet_result(
    state: &mut DetailState,
    users: &mut HashMap<String, User>,
    seq: u64,
    result: ApiResult<SingleResponse<Tweet>>,
) -> bool {
    if seq != state.seq {
        tracing::debug!(seq, latest = state.seq, "discarding stale tweet response");
        return false;
    }

    match result {
        Ok(resp) => {
            cache_users_from_includes(users, &resp.includes);
            match resp.data {
                Some(tweet) => {
                    state.tweet = Some(tweet);
                    state.phase = LoadPhase::Loaded;
                }
                None => {
                    tracing::warn!("tweet response contained no data");
                    state.phase = LoadPhase::Failed;
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "tweet fetch failed");
            state.phase = LoadPhase::Failed;
        }
    }
    true
}

fn cache_users_from_includes(users: &mut HashMap<String, User>, includes: &Option<Includes>) {
    if let Some(inc) = includes
        && let Some(included_users) = &inc.users
    {
        for user in included_users {
            users.insert(user.id.clone(), user.clone());
        }
    }
}

/// Case-insensitive substring filter over tweet text and username. Pure and
/// synchronous; recomputed on every render, never sent to the API.
pub fn filter_tweets<'a>(tweets: &'a [Tweet], term: &str) -> Vec<&'a Tweet> {
    if term.is_empty() {
        return tweets.iter().collect();
    }
    let needle = term.to_lowercase();
    tweets
        .iter()
        .filter(|t| {
            t.text.to_lowercase().contains(&needle) || t.username.to_lowercase().contains(&needle)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// App mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Command,
    Search,
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

pub struct ViewState {
    pub kind: ViewKind,
    pub selected_index: usize,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub config: AppConfig,

    // View system
    pub view_stack: Vec<ViewState>,
    pub mode: AppMode,

    // Data state (one feed per list page, independent fetch lifecycles)
    pub home: FeedState,
    pub all_tweets: FeedState,
    pub profile: FeedState,
    pub detail: DetailState,

    // Input state
    pub search_term: String,
    pub command_input: String,

    // API client (wrapped for sharing with spawned tasks)
    pub api_client: Arc<Mutex<TweetApiClient>>,

    // Users collected from `includes` of every response, for author lookup
    pub users_cache: HashMap<String, User>,

    // Status
    pub status_message: Option<String>,
    /// API requests dispatched but not yet completed. Overlapping fetches
    /// each hold one slot, so the indicator stays on until the last one
    /// resolves.
    pub in_flight: usize,
}

impl App {
    pub fn new(config: AppConfig, api_client: TweetApiClient) -> Self {
        let default_view = match config.default_view {
            crate::config::DefaultView::Home => ViewKind::Home,
            crate::config::DefaultView::Tweets => ViewKind::AllTweets,
            crate::config::DefaultView::Profile => ViewKind::Profile,
        };

        let initial_view = ViewState {
            kind: default_view,
            selected_index: 0,
        };

        Self {
            running: true,
            events: EventHandler::new(config.tick_rate_fps),
            config,
            view_stack: vec![initial_view],
            mode: AppMode::Normal,
            home: FeedState::default(),
            all_tweets: FeedState::default(),
            profile: FeedState::default(),
            detail: DetailState::default(),
            search_term: String::new(),
            command_input: String::new(),
            api_client: Arc::new(Mutex::new(api_client)),
            users_cache: HashMap::new(),
            status_message: None,
            in_flight: 0,
        }
    }

    // -- Main event loop ----------------------------------------------------

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        // Mount the initial view: trigger its one fetch.
        if let Some(kind) = self.current_view().cloned() {
            self.mount_view(&kind);
        }

        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let crossterm::event::Event::Key(key) = event
                        && key.kind == crossterm::event::KeyEventKind::Press
                    {
                        self.handle_key_event(key);
                    }
                }
                Event::App(app_event) => self.handle_app_event(*app_event),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        ui::draw(frame, self);
    }

    fn tick(&self) {}

    // -- View stack ---------------------------------------------------------

    pub fn current_view(&self) -> Option<&ViewKind> {
        self.view_stack.last().map(|vs| &vs.kind)
    }

    fn push_view(&mut self, kind: ViewKind) {
        self.view_stack.push(ViewState {
            kind: kind.clone(),
            selected_index: 0,
        });
        self.mount_view(&kind);
    }

    fn pop_view(&mut self) {
        if self.view_stack.len() > 1 {
            self.view_stack.pop();
            // Returning to a view re-mounts it: the fetch sequence restarts
            // from Loading, exactly as on first entry.
            if let Some(kind) = self.current_view().cloned() {
                self.mount_view(&kind);
            }
        }
    }

    /// A view was entered: issue its single fetch. Help is a pure overlay
    /// and fetches nothing.
    fn mount_view(&mut self, kind: &ViewKind) {
        match kind {
            ViewKind::Home => self.request_feed(FeedKind::Home),
            ViewKind::AllTweets => self.request_feed(FeedKind::AllTweets),
            ViewKind::Profile => self.request_feed(FeedKind::Profile),
            ViewKind::TweetDetail(id) => self.request_tweet(id.clone()),
            ViewKind::Help => {}
        }
    }

    fn request_feed(&mut self, feed: FeedKind) {
        let seq = self.feed_state_mut(feed).begin_fetch();
        self.events.send(AppEvent::FetchFeed { feed, seq });
    }

    fn request_tweet(&mut self, tweet_id: String) {
        let seq = self.detail.begin_fetch();
        self.events.send(AppEvent::FetchTweet { tweet_id, seq });
    }

    fn feed_state_mut(&mut self, feed: FeedKind) -> &mut FeedState {
        match feed {
            FeedKind::Home => &mut self.home,
            FeedKind::AllTweets => &mut self.all_tweets,
            FeedKind::Profile => &mut self.profile,
        }
    }

    // -- Key event routing --------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent) {
        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c' | 'C'))
        {
            self.events.send(AppEvent::Quit);
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_key(key),
            AppMode::Command => self.handle_command_key(key),
            AppMode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.view_stack.len() > 1 {
                    self.events.send(AppEvent::PopView);
                } else {
                    self.events.send(AppEvent::Quit);
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Enter => {
                self.open_selected();
            }
            KeyCode::Char('/') => {
                // The live filter belongs to the all-tweets page.
                if self.current_view() != Some(&ViewKind::AllTweets) {
                    self.events.send(AppEvent::SwitchView(ViewKind::AllTweets));
                }
                self.mode = AppMode::Search;
            }
            KeyCode::Char(':') => {
                self.mode = AppMode::Command;
                self.command_input.clear();
            }
            KeyCode::Char('?') => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            KeyCode::Char('1') => {
                self.events.send(AppEvent::SwitchView(ViewKind::Home));
            }
            KeyCode::Char('2') => {
                self.events.send(AppEvent::SwitchView(ViewKind::AllTweets));
            }
            KeyCode::Char('3') => {
                self.events.send(AppEvent::SwitchView(ViewKind::Profile));
            }
            _ => {}
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.command_input.clear();
            }
            KeyCode::Enter => {
                self.execute_command();
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.command_input.pop();
            }
            KeyCode::Char(c) => {
                self.command_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        // The filter applies live on every keystroke; Enter merely leaves
        // input mode, Esc additionally clears the term.
        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.search_term.clear();
            }
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
            }
            KeyCode::Backspace => {
                self.search_term.pop();
            }
            KeyCode::Char(c) => {
                self.search_term.push(c);
            }
            _ => {}
        }
    }

    // -- Command execution --------------------------------------------------

    fn execute_command(&mut self) {
        let input = self.command_input.clone();
        match command::parse_command(&input) {
            Some(Command::Open(id_or_route)) => {
                if let Some(tweet_id) = command::parse_tweet_ref(&id_or_route) {
                    self.events
                        .send(AppEvent::PushView(ViewKind::TweetDetail(tweet_id)));
                } else {
                    self.status_message = Some(format!("Invalid tweet ID: {id_or_route}"));
                }
            }
            Some(Command::Home) => {
                self.events.send(AppEvent::SwitchView(ViewKind::Home));
            }
            Some(Command::Tweets) => {
                self.events.send(AppEvent::SwitchView(ViewKind::AllTweets));
            }
            Some(Command::Profile) => {
                self.events.send(AppEvent::SwitchView(ViewKind::Profile));
            }
            Some(Command::Health) => {
                self.events.send(AppEvent::FetchHealth);
            }
            Some(Command::Help) => {
                self.events.send(AppEvent::PushView(ViewKind::Help));
            }
            Some(Command::Quit) => {
                self.events.send(AppEvent::Quit);
            }
            None => {
                self.status_message = Some(format!("Unknown command: {input}"));
            }
        }
        self.command_input.clear();
    }

    // -- Selection helpers --------------------------------------------------

    fn move_selection_down(&mut self) {
        let count = self.current_item_count();
        if let Some(vs) = self.view_stack.last_mut()
            && vs.selected_index + 1 < count
        {
            vs.selected_index += 1;
        }
    }

    fn move_selection_up(&mut self) {
        if let Some(vs) = self.view_stack.last_mut() {
            vs.selected_index = vs.selected_index.saturating_sub(1);
        }
    }

    fn current_item_count(&self) -> usize {
        match self.current_view() {
            Some(ViewKind::Home) => self.home.tweets.len(),
            Some(ViewKind::AllTweets) => self.filtered_all_tweets().len(),
            Some(ViewKind::Profile) => self.profile_tweets().len(),
            Some(ViewKind::TweetDetail(_)) | Some(ViewKind::Help) | None => 0,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.view_stack.last().map_or(0, |vs| vs.selected_index)
    }

    fn open_selected(&mut self) {
        let idx = self.selected_index();
        let tweet_id = match self.current_view() {
            Some(ViewKind::Home) => self.home.tweets.get(idx).map(|t| t.id.clone()),
            Some(ViewKind::AllTweets) => {
                self.filtered_all_tweets().get(idx).map(|t| t.id.clone())
            }
            Some(ViewKind::Profile) => self.profile_tweets().get(idx).map(|t| t.id.clone()),
            _ => None,
        };
        if let Some(id) = tweet_id {
            self.events.send(AppEvent::PushView(ViewKind::TweetDetail(id)));
        }
    }

    // -- App event handling -------------------------------------------------

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            // Navigation
            AppEvent::Quit => {
                self.running = false;
            }
            AppEvent::PushView(kind) => {
                self.push_view(kind);
            }
            AppEvent::PopView => {
                self.pop_view();
            }
            AppEvent::SwitchView(kind) => {
                // Replace the current top-of-stack view.
                self.view_stack.pop();
                self.push_view(kind);
            }

            // API request triggers -> dispatch to async tasks.
            ref evt @ (AppEvent::FetchFeed { .. }
            | AppEvent::FetchTweet { .. }
            | AppEvent::FetchHealth) => {
                self.in_flight += 1;
                self.dispatch_api_request(evt.clone());
            }

            // API response events
            AppEvent::FeedLoaded { feed, seq, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                let state = match feed {
                    FeedKind::Home => &mut self.home,
                    FeedKind::AllTweets => &mut self.all_tweets,
                    FeedKind::Profile => &mut self.profile,
                };
                apply_feed_result(state, &mut self.users_cache, feed, seq, result);
            }
            AppEvent::TweetLoaded { seq, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                apply_tweet_result(&mut self.detail, &mut self.users_cache, seq, *result);
            }
            AppEvent::HealthLoaded(result) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match result {
                    Ok(health) => {
                        self.status_message = Some(format!("Backend status: {}", health.status));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "health check failed");
                        self.status_message = Some("Backend unreachable".to_owned());
                    }
                }
            }
        }
    }

    // -- API dispatch -------------------------------------------------------

    fn dispatch_api_request(&self, event: AppEvent) {
        let client = Arc::clone(&self.api_client);
        let sender = self.events.sender();

        tokio::spawn(async move {
            match event {
                AppEvent::FetchFeed { feed, seq } => {
                    let mut api = client.lock().await;
                    let result = api.get_tweets().await;
                    let mapped: ApiResult<_> = result.map_err(|e| Arc::new(e.to_string()));
                    let _ = sender.send(Event::App(Box::new(AppEvent::FeedLoaded {
                        feed,
                        seq,
                        result: mapped,
                    })));
                }
                AppEvent::FetchTweet { tweet_id, seq } => {
                    let mut api = client.lock().await;
                    let result = api.get_tweet(&tweet_id).await;
                    let mapped: ApiResult<_> = result.map_err(|e| Arc::new(e.to_string()));
                    let _ = sender.send(Event::App(Box::new(AppEvent::TweetLoaded {
                        seq,
                        result: Box::new(mapped),
                    })));
                }
                AppEvent::FetchHealth => {
                    let api = client.lock().await;
                    let result = api.health_check().await;
                    let mapped: ApiResult<_> = result.map_err(|e| Arc::new(e.to_string()));
                    let _ = sender.send(Event::App(Box::new(AppEvent::HealthLoaded(mapped))));
                }
                _ => {
                    // Not an API request event -- ignore.
                }
            }
        });
    }

    // -- Helpers ------------------------------------------------------------

    /// Whether any API request is still in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Look up a user by ID among those collected from `includes`.
    pub fn lookup_user(&self, user_id: &str) -> Option<&User> {
        self.users_cache.get(user_id)
    }

    /// All-tweets page collection after the live search filter.
    pub fn filtered_all_tweets(&self) -> Vec<&Tweet> {
        filter_tweets(&self.all_tweets.tweets, &self.search_term)
    }

    /// Profile page collection: tweets by the configured profile identity.
    pub fn profile_tweets(&self) -> Vec<&Tweet> {
        self.profile
            .tweets
            .iter()
            .filter(|t| t.author_id == self.config.profile.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet(id: &str, author_id: &str, username: &str, text: &str) -> Tweet {
        Tweet {
            id: id.into(),
            author_id: author_id.into(),
            username: username.into(),
            text: text.into(),
            created_at: Some("2020-01-01T00:00:00.000Z".into()),
        }
    }

    fn ok_list(tweets: Vec<Tweet>, includes: Option<Includes>) -> ApiResult<ListResponse<Tweet>> {
        Ok(ListResponse {
            data: Some(tweets),
            includes,
        })
    }

    // -- filter -------------------------------------------------------------

    #[test]
    fn filter_matches_text_substring() {
        let tweets = vec![
            tweet("1", "a", "amy", "hello world"),
            tweet("2", "b", "bob", "goodbye"),
        ];
        let filtered = filter_tweets(&tweets, "hel");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn filter_matches_username_case_insensitively() {
        let tweets = vec![
            tweet("1", "a", "amy", "hello world"),
            tweet("2", "b", "bob", "goodbye"),
        ];
        let filtered = filter_tweets(&tweets, "BOB");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "2");
    }

    #[test]
    fn filter_empty_term_keeps_everything() {
        let tweets = vec![tweet("1", "a", "amy", "x"), tweet("2", "b", "bob", "y")];
        assert_eq!(filter_tweets(&tweets, "").len(), 2);
    }

    #[test]
    fn filter_no_match_yields_empty() {
        let tweets = vec![tweet("1", "a", "amy", "hello")];
        assert!(filter_tweets(&tweets, "zzz").is_empty());
    }

    // -- feed result application ---------------------------------------------

    #[test]
    fn empty_data_reaches_loaded_not_failed() {
        let mut state = FeedState::default();
        let mut users = HashMap::new();
        let seq = state.begin_fetch();

        let applied = apply_feed_result(
            &mut state,
            &mut users,
            FeedKind::Home,
            seq,
            ok_list(vec![], None),
        );
        assert!(applied);
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert!(state.tweets.is_empty());
    }

    #[test]
    fn failed_fetch_reaches_failed_without_storing_error_text() {
        let mut state = FeedState::default();
        let mut users = HashMap::new();
        let seq = state.begin_fetch();

        apply_feed_result(
            &mut state,
            &mut users,
            FeedKind::Home,
            seq,
            Err(Arc::new("server error (status 500): boom".to_string())),
        );
        assert_eq!(state.phase, LoadPhase::Failed);
        // Nothing user-visible carries the underlying error: the state owns
        // only the phase flag and an empty collection.
        assert!(state.tweets.is_empty());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut state = FeedState::default();
        let mut users = HashMap::new();

        let first = state.begin_fetch();
        let _second = state.begin_fetch();

        // The first (now stale) response resolves after the second was issued.
        let applied = apply_feed_result(
            &mut state,
            &mut users,
            FeedKind::Home,
            first,
            ok_list(vec![tweet("1", "a", "amy", "old")], None),
        );
        assert!(!applied);
        assert_eq!(state.phase, LoadPhase::Loading);
        assert!(state.tweets.is_empty());
    }

    #[test]
    fn latest_completion_is_applied_after_stale_one() {
        let mut state = FeedState::default();
        let mut users = HashMap::new();

        let first = state.begin_fetch();
        let second = state.begin_fetch();

        apply_feed_result(&mut state, &mut users, FeedKind::Home, first, ok_list(vec![], None));
        apply_feed_result(
            &mut state,
            &mut users,
            FeedKind::Home,
            second,
            ok_list(vec![tweet("2", "b", "bob", "new")], None),
        );
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert_eq!(state.tweets.len(), 1);
        assert_eq!(state.tweets[0].id, "2");
    }

    #[test]
    fn includes_users_are_cached_for_lookup() {
        let mut state = FeedState::default();
        let mut users = HashMap::new();
        let seq = state.begin_fetch();

        let includes = Includes {
            users: Some(vec![User {
                id: "a".into(),
                name: "Amy A".into(),
                username: "amy".into(),
                profile_image_url: None,
            }]),
            places: None,
            polls: None,
            topics: None,
        };
        apply_feed_result(
            &mut state,
            &mut users,
            FeedKind::Home,
            seq,
            ok_list(vec![tweet("1", "a", "amy", "hi")], Some(includes)),
        );
        assert_eq!(users.get("a").map(|u| u.name.as_str()), Some("Amy A"));
    }

    // -- tweet detail -------------------------------------------------------

    #[test]
    fn missing_detail_data_is_a_failure() {
        let mut state = DetailState::default();
        let mut users = HashMap::new();
        let seq = state.begin_fetch();

        apply_tweet_result(
            &mut state,
            &mut users,
            seq,
            Ok(SingleResponse {
                data: None,
                includes: None,
            }),
        );
        assert_eq!(state.phase, LoadPhase::Failed);
        assert!(state.tweet.is_none());
    }

    #[test]
    fn detail_success_stores_tweet() {
        let mut state = DetailState::default();
        let mut users = HashMap::new();
        let seq = state.begin_fetch();

        apply_tweet_result(
            &mut state,
            &mut users,
            seq,
            Ok(SingleResponse {
                data: Some(tweet("20", "12", "jack", "just setting up my twttr")),
                includes: None,
            }),
        );
        assert_eq!(state.phase, LoadPhase::Loaded);
        assert_eq!(state.tweet.as_ref().map(|t| t.id.as_str()), Some("20"));
    }

    // -- loading indicator ----------------------------------------------------

    #[tokio::test]
    async fn loading_stays_on_until_last_overlapping_fetch_resolves() {
        let client = TweetApiClient::new("http://127.0.0.1:9", None);
        let mut app = App::new(AppConfig::default(), client);

        app.handle_app_event(AppEvent::FetchFeed {
            feed: FeedKind::Home,
            seq: 1,
        });
        app.handle_app_event(AppEvent::FetchTweet {
            tweet_id: "20".into(),
            seq: 1,
        });
        assert!(app.is_loading());

        app.handle_app_event(AppEvent::FeedLoaded {
            feed: FeedKind::Home,
            seq: 1,
            result: ok_list(vec![], None),
        });
        // The tweet fetch is still pending.
        assert!(app.is_loading());

        app.handle_app_event(AppEvent::TweetLoaded {
            seq: 1,
            result: Box::new(Ok(SingleResponse {
                data: None,
                includes: None,
            })),
        });
        assert!(!app.is_loading());
    }
}
