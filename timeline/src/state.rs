//! Timeline state and actions.

use crate::filter::VisibilityFilter;
use crate::types::{calendar_date, CategorySettings, EventCategory, EventId, HistoricalEvent};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Zoom level a fresh store starts at
pub const DEFAULT_ZOOM_LEVEL: u8 = 5;

/// Start of the default date window
#[must_use]
pub fn default_start_date() -> DateTime<Utc> {
    calendar_date(1, 1, 1).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// End of the default date window
#[must_use]
pub fn default_end_date() -> DateTime<Utc> {
    calendar_date(2024, 12, 31).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// State of the timeline
///
/// `visible_events` is derived from the other fields and recomputed by the
/// reducer after every action, so it is always consistent with them.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineState {
    /// All loaded events
    pub events: Vec<HistoricalEvent>,
    /// Per-category display settings
    pub categories: Vec<CategorySettings>,
    /// Relevancy threshold, 1-10
    pub zoom_level: u8,
    /// Start of the visible window (inclusive)
    pub start_date: DateTime<Utc>,
    /// End of the visible window (inclusive)
    pub end_date: DateTime<Utc>,
    /// A load is in flight
    pub is_loading: bool,
    /// Message of the last failed load
    pub error: Option<String>,
    /// Number of the most recently issued load
    #[serde(skip)]
    pub(crate) latest_request: u64,
    #[serde(rename = "visibleEvents")]
    pub(crate) visible: Vec<HistoricalEvent>,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            categories: CategorySettings::defaults(),
            zoom_level: DEFAULT_ZOOM_LEVEL,
            start_date: default_start_date(),
            end_date: default_end_date(),
            is_loading: true,
            error: None,
            latest_request: 0,
            visible: Vec::new(),
        }
    }
}

impl TimelineState {
    /// Default state holding the given events
    #[must_use]
    pub fn with_events(events: Vec<HistoricalEvent>) -> Self {
        let mut state = Self {
            events,
            ..Self::default()
        };
        state.refresh_visible();
        state
    }

    /// Events passing the zoom, category and date filters, in list order
    #[must_use]
    pub fn visible_events(&self) -> &[HistoricalEvent] {
        &self.visible
    }

    /// The filter described by the current state
    #[must_use]
    pub fn filter(&self) -> VisibilityFilter<'_> {
        VisibilityFilter::new(self.zoom_level, &self.categories, self.start_date, self.end_date)
    }

    /// Recomputes `visible_events` from the current fields
    ///
    /// Call after mutating the public fields directly.
    pub fn refresh_visible(&mut self) {
        self.visible = self.filter().apply(&self.events);
    }

    /// Whether the category has settings marked visible
    #[must_use]
    pub fn is_category_visible(&self, category: EventCategory) -> bool {
        self.categories
            .iter()
            .any(|settings| settings.name == category && settings.visible)
    }

    /// Number of the most recently issued load, 0 before the first
    #[must_use]
    pub const fn latest_request(&self) -> u64 {
        self.latest_request
    }
}

/// Actions accepted by the timeline reducer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimelineAction {
    /// Load every event from the source
    FetchEvents,
    /// Load events whose title or description contains `query`
    SearchEvents {
        /// Case-insensitive substring
        query: String,
    },
    /// Load events dated within `[start, end]`
    LoadDateRange {
        /// Inclusive lower bound
        start: DateTime<Utc>,
        /// Inclusive upper bound
        end: DateTime<Utc>,
    },
    /// Set the zoom level, clamped to 1-10
    SetZoomLevel {
        /// Requested level
        level: i64,
    },
    /// Set the visible window without checking its order
    SetDateRange {
        /// Inclusive lower bound
        start: DateTime<Utc>,
        /// Inclusive upper bound
        end: DateTime<Utc>,
    },
    /// Flip the visibility of a category
    ToggleCategory {
        /// Category to flip
        category: EventCategory,
    },
    /// Append an event
    AddEvent {
        /// The new event
        event: HistoricalEvent,
    },
    /// Remove every event with the id
    RemoveEvent {
        /// Id to remove
        id: EventId,
    },
    /// A load finished
    EventsLoaded {
        /// Load number the result belongs to
        request: u64,
        /// Events returned by the source
        events: Vec<HistoricalEvent>,
    },
    /// A load failed
    LoadFailed {
        /// Load number the failure belongs to
        request: u64,
        /// Human-readable message
        error: String,
    },
}

impl TimelineAction {
    /// Whether this action reports the outcome of a load
    #[must_use]
    pub const fn is_load_result(&self) -> bool {
        matches!(self, Self::EventsLoaded { .. } | Self::LoadFailed { .. })
    }

    /// Short name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FetchEvents => "FetchEvents",
            Self::SearchEvents { .. } => "SearchEvents",
            Self::LoadDateRange { .. } => "LoadDateRange",
            Self::SetZoomLevel { .. } => "SetZoomLevel",
            Self::SetDateRange { .. } => "SetDateRange",
            Self::ToggleCategory { .. } => "ToggleCategory",
            Self::AddEvent { .. } => "AddEvent",
            Self::RemoveEvent { .. } => "RemoveEvent",
            Self::EventsLoaded { .. } => "EventsLoaded",
            Self::LoadFailed { .. } => "LoadFailed",
        }
    }
}
