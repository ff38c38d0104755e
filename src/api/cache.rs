use std::collections::HashMap;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Response cache
// ---------------------------------------------------------------------------

/// In-memory response cache keyed by endpoint path.
///
/// An entry older than the TTL is treated as absent. There is no eviction
/// beyond expiry; the key space is the handful of fixed endpoint paths, so
/// growth is bounded in practice. Per-id and list fetches are distinct keys
/// and never invalidate each other.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    body: String,
    stored_at: Instant,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return the cached body for `key`, or `None` if absent or expired.
    pub fn get(&self, key: &str, now: Instant) -> Option<&str> {
        self.entries.get(key).and_then(|entry| {
            if now.duration_since(entry.stored_at) < self.ttl {
                Some(entry.body.as_str())
            } else {
                None
            }
        })
    }

    /// Store `body` under `key`, overwriting any previous entry.
    pub fn insert(&mut self, key: &str, body: String, now: Instant) {
        self.entries.insert(
            key.to_owned(),
            CacheEntry {
                body,
                stored_at: now,
            },
        );
    }

    /// Drop all entries. Used to reset state between independent runs,
    /// never by end-user flows.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Request throttle
// ---------------------------------------------------------------------------

/// Single-slot rate limiter enforcing a minimum interval between dispatched
/// requests, shared across all endpoints of one client instance.
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_dispatch: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: None,
        }
    }

    /// Reserve the next dispatch slot. Returns how long the caller must wait
    /// before sending, or `None` if it may send immediately. The slot is
    /// claimed at decision time, so a later call is measured against the
    /// reserved dispatch instant rather than the call instant.
    pub fn delay_until_dispatch(&mut self, now: Instant) -> Option<Duration> {
        match self.last_dispatch {
            Some(last) if now < last + self.min_interval => {
                let dispatch_at = last + self.min_interval;
                self.last_dispatch = Some(dispatch_at);
                Some(dispatch_at - now)
            }
            _ => {
                self.last_dispatch = Some(now);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn cache_hit_within_ttl() {
        let mut cache = ResponseCache::new(TTL);
        let t0 = Instant::now();
        cache.insert("/tweets", "{\"data\":[]}".into(), t0);

        let later = t0 + TTL - Duration::from_secs(1);
        assert_eq!(cache.get("/tweets", later), Some("{\"data\":[]}"));
    }

    #[test]
    fn cache_miss_after_ttl() {
        let mut cache = ResponseCache::new(TTL);
        let t0 = Instant::now();
        cache.insert("/tweets", "{}".into(), t0);

        assert_eq!(cache.get("/tweets", t0 + TTL), None);
        assert_eq!(cache.get("/tweets", t0 + TTL + Duration::from_secs(1)), None);
    }

    #[test]
    fn cache_keys_are_independent() {
        let mut cache = ResponseCache::new(TTL);
        let t0 = Instant::now();
        cache.insert("/tweets", "list".into(), t0);

        assert_eq!(cache.get("/2/tweet/1", t0), None);
        assert_eq!(cache.get("/tweets", t0), Some("list"));
    }

    #[test]
    fn cache_overwrites_on_refetch() {
        let mut cache = ResponseCache::new(TTL);
        let t0 = Instant::now();
        cache.insert("/tweets", "old".into(), t0);
        cache.insert("/tweets", "new".into(), t0 + Duration::from_secs(10));

        assert_eq!(cache.get("/tweets", t0 + Duration::from_secs(11)), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_clear_drops_everything() {
        let mut cache = ResponseCache::new(TTL);
        let t0 = Instant::now();
        cache.insert("/tweets", "a".into(), t0);
        cache.insert("/2/tweet/1", "b".into(), t0);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("/tweets", t0), None);
    }

    #[test]
    fn throttle_first_call_is_immediate() {
        let mut throttle = Throttle::new(Duration::from_secs(1));
        assert_eq!(throttle.delay_until_dispatch(Instant::now()), None);
    }

    #[test]
    fn throttle_delays_call_inside_interval() {
        let interval = Duration::from_secs(1);
        let mut throttle = Throttle::new(interval);
        let t0 = Instant::now();

        assert_eq!(throttle.delay_until_dispatch(t0), None);

        // 400ms later: must wait the remaining 600ms.
        let wait = throttle.delay_until_dispatch(t0 + Duration::from_millis(400));
        assert_eq!(wait, Some(Duration::from_millis(600)));
    }

    #[test]
    fn throttle_allows_call_after_interval() {
        let interval = Duration::from_secs(1);
        let mut throttle = Throttle::new(interval);
        let t0 = Instant::now();

        assert_eq!(throttle.delay_until_dispatch(t0), None);
        assert_eq!(throttle.delay_until_dispatch(t0 + interval), None);
    }

    #[test]
    fn throttle_reserves_slot_for_delayed_call() {
        let interval = Duration::from_secs(1);
        let mut throttle = Throttle::new(interval);
        let t0 = Instant::now();

        throttle.delay_until_dispatch(t0);
        // Second call reserves the t0+1s slot...
        throttle.delay_until_dispatch(t0 + Duration::from_millis(100));
        // ...so a third call at t0+500ms waits until t0+2s.
        let wait = throttle.delay_until_dispatch(t0 + Duration::from_millis(500));
        assert_eq!(wait, Some(Duration::from_millis(1500)));
    }
}
