//! Configuration for the timeline store.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unlike a missing variable, a present but unparsable one is an error.

use crate::reducer::TimelineEnvironment;
use crate::service::{EventSource, InMemoryEventSource, JsonFileEventSource, SourceLatency};
use crate::state::{default_end_date, default_start_date, TimelineState, DEFAULT_ZOOM_LEVEL};
use crate::types::{clamp_level, EventCategory};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be parsed
    #[error("Invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        /// Variable name
        key: &'static str,
        /// Raw value found
        value: String,
        /// What would have been accepted
        expected: &'static str,
    },

    /// A hidden category name is not a known category
    #[error("Unknown category {0:?} in TIMELINE_HIDDEN_CATEGORIES")]
    UnknownCategory(String),
}

/// Settings the store and demo start from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineConfig {
    /// Initial zoom level (clamped to 1-10)
    pub zoom_level: u8,
    /// Initial start of the visible window
    pub start_date: DateTime<Utc>,
    /// Initial end of the visible window
    pub end_date: DateTime<Utc>,
    /// Categories hidden at startup
    pub hidden_categories: Vec<EventCategory>,
    /// Delays of the in-memory source
    pub latency: SourceLatency,
    /// When set, events are read from this JSON file instead of the samples
    pub data_file: Option<PathBuf>,
    /// How long the demo waits for a single load
    pub load_timeout: Duration,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            zoom_level: DEFAULT_ZOOM_LEVEL,
            start_date: default_start_date(),
            end_date: default_end_date(),
            hidden_categories: Vec::new(),
            latency: SourceLatency::default(),
            data_file: None,
            load_timeout: Duration::from_secs(10),
        }
    }
}

impl TimelineConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let zoom_level = match get("TIMELINE_ZOOM_LEVEL") {
            Some(raw) => clamp_level(parse(&raw, "TIMELINE_ZOOM_LEVEL", "an integer")?),
            None => defaults.zoom_level,
        };

        let start_date = match get("TIMELINE_START_DATE") {
            Some(raw) => parse_date(&raw, "TIMELINE_START_DATE")?,
            None => defaults.start_date,
        };

        let end_date = match get("TIMELINE_END_DATE") {
            Some(raw) => parse_date(&raw, "TIMELINE_END_DATE")?,
            None => defaults.end_date,
        };

        let hidden_categories = match get("TIMELINE_HIDDEN_CATEGORIES") {
            Some(raw) => raw
                .split(',')
                .filter(|name| !name.trim().is_empty())
                .map(|name| {
                    name.parse::<EventCategory>()
                        .map_err(|unknown| ConfigError::UnknownCategory(unknown.0))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.hidden_categories,
        };

        let fetch = match get("TIMELINE_FETCH_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse(&raw, "TIMELINE_FETCH_DELAY_MS", "milliseconds")?),
            None => defaults.latency.fetch,
        };

        let query = match get("TIMELINE_SEARCH_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse(&raw, "TIMELINE_SEARCH_DELAY_MS", "milliseconds")?),
            None => defaults.latency.query,
        };

        let load_timeout = match get("TIMELINE_LOAD_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse(&raw, "TIMELINE_LOAD_TIMEOUT_SECS", "seconds")?),
            None => defaults.load_timeout,
        };

        Ok(Self {
            zoom_level,
            start_date,
            end_date,
            hidden_categories,
            latency: SourceLatency { fetch, query },
            data_file: get("TIMELINE_DATA_FILE").map(PathBuf::from),
            load_timeout,
        })
    }

    /// The state a new store starts from
    #[must_use]
    pub fn initial_state(&self) -> TimelineState {
        let mut state = TimelineState {
            zoom_level: self.zoom_level,
            start_date: self.start_date,
            end_date: self.end_date,
            ..TimelineState::default()
        };

        for settings in &mut state.categories {
            if self.hidden_categories.contains(&settings.name) {
                settings.visible = false;
            }
        }

        state.refresh_visible();
        state
    }

    /// The event source described by this configuration
    #[must_use]
    pub fn event_source(&self) -> Arc<dyn EventSource> {
        match &self.data_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Reading events from file");
                Arc::new(JsonFileEventSource::new(path.clone()))
            }
            None => Arc::new(InMemoryEventSource::sample().with_latency(self.latency)),
        }
    }

    /// Reducer environment over [`TimelineConfig::event_source`]
    #[must_use]
    pub fn environment(&self) -> TimelineEnvironment {
        TimelineEnvironment::new(self.event_source())
    }
}

fn parse<T: std::str::FromStr>(
    raw: &str,
    key: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        expected,
    })
}

fn parse_date(raw: &str, key: &'static str) -> Result<DateTime<Utc>, ConfigError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            expected: "a date as YYYY-MM-DD",
        })
}
