//! Event sources: where the store loads events from.
//!
//! The [`EventSource`] trait is the only seam between the store and its data.
//! Two implementations ship here:
//!
//! - [`InMemoryEventSource`]: a static collection served after an artificial
//!   delay. Never fails.
//! - [`JsonFileEventSource`]: reads a JSON array of events from disk on every
//!   call and validates each record before handing it to the store.
//!
//! The trait returns `Pin<Box<dyn Future>>` instead of using `async fn` so
//! it can be held as `Arc<dyn EventSource>` in the reducer environment.

use crate::types::{HistoricalEvent, MAX_LEVEL, MIN_LEVEL};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Errors an event source can report
#[derive(Error, Debug)]
pub enum FetchError {
    /// The backing file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The data is not a valid JSON array of events
    #[error("Malformed event data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record parsed but violates a domain rule
    #[error("Invalid event {id}: {reason}")]
    InvalidRecord {
        /// Id of the offending record
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// The source cannot serve requests right now
    #[error("Event source unavailable: {0}")]
    Unavailable(String),
}

/// Boxed future returned by [`EventSource`] operations
pub type SourceFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<HistoricalEvent>, FetchError>> + Send + 'a>>;

/// Asynchronous access to historical events
pub trait EventSource: Send + Sync {
    /// Every known event, unfiltered
    fn get_events(&self) -> SourceFuture<'_>;

    /// Events whose title or description contains `query`, ignoring case
    ///
    /// An empty query matches everything.
    fn search_events<'a>(&'a self, query: &'a str) -> SourceFuture<'a>;

    /// Events dated within `[start, end]`
    fn get_events_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SourceFuture<'_>;
}

/// Events whose title or description contains `query`, ignoring case
#[must_use]
pub fn search(events: &[HistoricalEvent], query: &str) -> Vec<HistoricalEvent> {
    let needle = query.to_lowercase();
    events
        .iter()
        .filter(|event| event.mentions(&needle))
        .cloned()
        .collect()
}

/// Events dated within `[start, end]`
#[must_use]
pub fn within_range(
    events: &[HistoricalEvent],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<HistoricalEvent> {
    events
        .iter()
        .filter(|event| event.occurs_within(start, end))
        .cloned()
        .collect()
}

/// Artificial delays applied before a source answers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLatency {
    /// Delay of `get_events`
    pub fetch: Duration,
    /// Delay of `search_events` and `get_events_by_date_range`
    pub query: Duration,
}

impl SourceLatency {
    /// No delay at all
    #[must_use]
    pub const fn none() -> Self {
        Self {
            fetch: Duration::ZERO,
            query: Duration::ZERO,
        }
    }
}

impl Default for SourceLatency {
    fn default() -> Self {
        Self {
            fetch: Duration::from_millis(500),
            query: Duration::from_millis(300),
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Serves a fixed collection of events
#[derive(Clone, Debug)]
pub struct InMemoryEventSource {
    events: Vec<HistoricalEvent>,
    latency: SourceLatency,
}

impl InMemoryEventSource {
    /// Source over `events` with the default latency
    #[must_use]
    pub fn new(events: Vec<HistoricalEvent>) -> Self {
        Self {
            events,
            latency: SourceLatency::default(),
        }
    }

    /// Source over the fifteen bundled sample events
    #[must_use]
    pub fn sample() -> Self {
        Self::new(crate::fixtures::sample_events())
    }

    /// Replaces the latency
    #[must_use]
    pub const fn with_latency(mut self, latency: SourceLatency) -> Self {
        self.latency = latency;
        self
    }

    /// The events this source serves
    #[must_use]
    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }
}

impl EventSource for InMemoryEventSource {
    fn get_events(&self) -> SourceFuture<'_> {
        Box::pin(async move {
            pause(self.latency.fetch).await;
            Ok(self.events.clone())
        })
    }

    fn search_events<'a>(&'a self, query: &'a str) -> SourceFuture<'a> {
        Box::pin(async move {
            pause(self.latency.query).await;
            Ok(search(&self.events, query))
        })
    }

    fn get_events_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SourceFuture<'_> {
        Box::pin(async move {
            pause(self.latency.query).await;
            Ok(within_range(&self.events, start, end))
        })
    }
}

/// Reads events from a JSON file on every call
///
/// The file holds an array of events in their serialized form. Records with
/// an unknown category fail to parse; records with a blank id or a relevancy
/// outside 1-10 are rejected as [`FetchError::InvalidRecord`].
#[derive(Clone, Debug)]
pub struct JsonFileEventSource {
    path: PathBuf,
}

impl JsonFileEventSource {
    /// Source backed by the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<HistoricalEvent>, FetchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;

        let events: Vec<HistoricalEvent> = serde_json::from_slice(&bytes)?;
        for event in &events {
            validate(event)?;
        }

        tracing::debug!(path = %self.path.display(), count = events.len(), "Loaded events from file");
        Ok(events)
    }
}

fn validate(event: &HistoricalEvent) -> Result<(), FetchError> {
    if event.id.as_str().trim().is_empty() {
        return Err(FetchError::InvalidRecord {
            id: event.id.to_string(),
            reason: "id is blank".to_string(),
        });
    }

    if !(MIN_LEVEL..=MAX_LEVEL).contains(&event.relevancy_level) {
        return Err(FetchError::InvalidRecord {
            id: event.id.to_string(),
            reason: format!(
                "relevancy {} outside {MIN_LEVEL}-{MAX_LEVEL}",
                event.relevancy_level
            ),
        });
    }

    Ok(())
}

impl EventSource for JsonFileEventSource {
    fn get_events(&self) -> SourceFuture<'_> {
        Box::pin(self.load())
    }

    fn search_events<'a>(&'a self, query: &'a str) -> SourceFuture<'a> {
        Box::pin(async move { Ok(search(&self.load().await?, query)) })
    }

    fn get_events_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SourceFuture<'_> {
        Box::pin(async move { Ok(within_range(&self.load().await?, start, end)) })
    }
}
