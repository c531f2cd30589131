//! Historical timeline store.
//!
//! Holds a list of historical events and derives the subset a timeline view
//! should show, filtered by:
//!
//! - zoom level: the minimum relevancy an event needs,
//! - category visibility,
//! - an inclusive date range.
//!
//! Events are loaded from an [`EventSource`]. Loads run as cancellable
//! effects; when several overlap, the last one issued wins.
//!
//! # Quick Start
//!
//! ```no_run
//! use timeline::{build_store, TimelineAction, TimelineConfig};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = build_store(&TimelineConfig::default());
//!
//! let mut handle = store.send(TimelineAction::FetchEvents).await?;
//! handle.wait_with_timeout(Duration::from_secs(5)).await?;
//!
//! store.send(TimelineAction::SetZoomLevel { level: 9 }).await?;
//!
//! let titles: Vec<String> = store
//!     .state(|s| s.visible_events().iter().map(|e| e.title.clone()).collect())
//!     .await;
//! println!("{titles:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod filter;
pub mod fixtures;
pub mod reducer;
pub mod service;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, TimelineConfig};
pub use filter::VisibilityFilter;
pub use reducer::{TimelineEnvironment, TimelineReducer, LOAD_EFFECT_ID};
pub use service::{
    EventSource, FetchError, InMemoryEventSource, JsonFileEventSource, SourceFuture, SourceLatency,
};
pub use state::{TimelineAction, TimelineState};
pub use types::{CategorySettings, EventCategory, EventId, HistoricalEvent};

use timeline_runtime::Store;

/// Store running the timeline reducer
pub type TimelineStore = Store<TimelineState, TimelineAction, TimelineEnvironment, TimelineReducer>;

/// Builds a store from configuration
///
/// The store starts with no events and `is_loading` set; send
/// [`TimelineAction::FetchEvents`] to populate it.
#[must_use]
pub fn build_store(config: &TimelineConfig) -> TimelineStore {
    Store::new(config.initial_state(), TimelineReducer::new(), config.environment())
}
