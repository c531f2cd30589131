//! Domain types for the timeline.
//!
//! Events, the fixed set of categories they are grouped by, and the
//! per-category display settings.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest relevancy and zoom level
pub const MIN_LEVEL: u8 = 1;

/// Highest relevancy and zoom level
pub const MAX_LEVEL: u8 = 10;

/// Clamps any integer into `[MIN_LEVEL, MAX_LEVEL]`
#[must_use]
pub fn clamp_level(level: i64) -> u8 {
    let clamped = level.clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL));
    u8::try_from(clamped).unwrap_or(MAX_LEVEL)
}

/// Midnight UTC on the given calendar day, if the day exists
#[must_use]
pub fn calendar_date(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

/// Error returned when parsing an unknown category name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown event category: {0}")]
pub struct UnknownCategory(pub String);

/// The fixed set of categories used to group and color events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Trade, finance, markets
    Economic,
    /// Religious movements and institutions
    Religion,
    /// States, revolutions, treaties
    Politics,
    /// Technology and production
    Industrial,
}

impl EventCategory {
    /// Every category, in display order
    pub const ALL: [Self; 4] = [
        Self::Economic,
        Self::Religion,
        Self::Politics,
        Self::Industrial,
    ];

    /// Lowercase name used in serialized data
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Economic => "economic",
            Self::Religion => "religion",
            Self::Politics => "politics",
            Self::Industrial => "industrial",
        }
    }

    /// Default display color (hex)
    #[must_use]
    pub const fn default_color(self) -> &'static str {
        match self {
            Self::Economic => "#2ecc71",
            Self::Religion => "#9b59b6",
            Self::Politics => "#e74c3c",
            Self::Industrial => "#3498db",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory(name.to_string()))
    }
}

/// Identifier of a historical event
///
/// Uniqueness is not enforced; several events may share an id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates an id from any string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single event on the timeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEvent {
    /// Identifier
    pub id: EventId,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: String,
    /// When it happened
    pub date: DateTime<Utc>,
    /// Categories the event belongs to
    pub categories: Vec<EventCategory>,
    /// Significance, 1-10; higher is more significant
    pub relevancy_level: u8,
    /// Optional image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Optional icon name (Material Symbols)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl HistoricalEvent {
    /// Creates an event without image or icon
    #[must_use]
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
        categories: Vec<EventCategory>,
        relevancy_level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            date,
            categories,
            relevancy_level,
            image_url: None,
            icon: None,
        }
    }

    /// Sets the icon name
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the image reference
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Case-insensitive substring match on title or description
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.description.to_lowercase().contains(needle)
    }

    /// Whether the event date lies in `[start, end]`
    #[must_use]
    pub fn occurs_within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.date && self.date <= end
    }
}

/// Display settings for one category
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySettings {
    /// The category these settings apply to
    pub name: EventCategory,
    /// Display color
    pub color: String,
    /// Whether events of this category are shown
    pub visible: bool,
}

impl CategorySettings {
    /// Visible settings with the category's default color
    #[must_use]
    pub fn new(name: EventCategory) -> Self {
        Self {
            name,
            color: name.default_color().to_string(),
            visible: true,
        }
    }

    /// One visible entry per category, in display order
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        EventCategory::ALL.into_iter().map(Self::new).collect()
    }
}
