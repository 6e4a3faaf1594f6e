//! Time-windowed reuse of fetched payloads.
//!
//! Validity is recomputed from the clock on every read; nothing is expired by
//! a timer.

use chrono::{DateTime, Utc};

/// Window during which a fetched payload may be reused.
pub const DEFAULT_CACHE_DURATION_MS: i64 = 300_000;

/// Whether data fetched at `last_fetch` may still be reused now.
pub fn is_cache_valid(last_fetch: Option<DateTime<Utc>>, duration_ms: i64) -> bool {
    is_cache_valid_at(last_fetch, Utc::now(), duration_ms)
}

/// Pure form of [`is_cache_valid`]: never fetched is invalid, otherwise valid
/// while `now - last_fetch < duration_ms`.
pub fn is_cache_valid_at(
    last_fetch: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    duration_ms: i64,
) -> bool {
    match last_fetch {
        Some(last_fetch) => (now - last_fetch).num_milliseconds() < duration_ms,
        None => false,
    }
}

/// Timestamp of the last successful fetch plus its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheRecord<T> {
    pub last_fetch: Option<DateTime<Utc>>,
    pub payload: Option<T>,
}

impl<T> Default for CacheRecord<T> {
    fn default() -> Self {
        Self {
            last_fetch: None,
            payload: None,
        }
    }
}

impl<T> CacheRecord<T> {
    pub fn is_valid_at(&self, now: DateTime<Utc>, duration_ms: i64) -> bool {
        self.payload.is_some() && is_cache_valid_at(self.last_fetch, now, duration_ms)
    }
}

/// What the caller of [`ResourceCache::begin_fetch`] should do.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchDecision<T> {
    /// The cached payload is fresh; skip the network call.
    UseCached(T),
    /// Another fetch for this resource is pending. Carries the stale payload,
    /// if there is one.
    InFlight(Option<T>),
    /// The caller now owns the fetch and must finish it with
    /// [`ResourceCache::complete`] or [`ResourceCache::fail`].
    Fetch,
}

/// Cache record of one resource plus its in-flight marker.
///
/// `generation` counts invalidations. A fetch claimed before an invalidation
/// may still store its payload, but it is not stamped fresh.
#[derive(Debug)]
pub struct ResourceCache<T> {
    record: CacheRecord<T>,
    duration_ms: i64,
    in_flight: bool,
    generation: u64,
    fetch_generation: u64,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DURATION_MS)
    }
}

impl<T> ResourceCache<T> {
    pub fn new(duration_ms: i64) -> Self {
        Self {
            record: CacheRecord::default(),
            duration_ms,
            in_flight: false,
            generation: 0,
            fetch_generation: 0,
        }
    }

    /// Stores a successful fetch stamped with `now`. When the cache was
    /// invalidated after the fetch was claimed, the payload is kept as stale
    /// and the next read fetches again.
    pub fn complete(&mut self, payload: T, now: DateTime<Utc>) {
        let last_fetch = (self.fetch_generation == self.generation).then_some(now);
        self.record = CacheRecord {
            last_fetch,
            payload: Some(payload),
        };
        self.in_flight = false;
    }

    /// Releases the in-flight marker, keeping the previous payload.
    pub fn fail(&mut self) {
        self.in_flight = false;
    }

    /// Forces the next read to fetch, e.g. after an admin edit.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.record.last_fetch = None;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn record(&self) -> &CacheRecord<T> {
        &self.record
    }
}

impl<T: Clone> ResourceCache<T> {
    /// Checks validity and, when a fetch is needed, claims it in the same
    /// step so a second caller sees `InFlight`.
    pub fn begin_fetch(&mut self, now: DateTime<Utc>) -> FetchDecision<T> {
        if self.record.is_valid_at(now, self.duration_ms) {
            if let Some(payload) = &self.record.payload {
                return FetchDecision::UseCached(payload.clone());
            }
        }
        if self.in_flight {
            return FetchDecision::InFlight(self.record.payload.clone());
        }
        self.in_flight = true;
        self.fetch_generation = self.generation;
        FetchDecision::Fetch
    }
}
