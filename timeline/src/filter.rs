//! The visibility predicate behind `visible_events`.
//!
//! An event is visible when all three hold:
//!
//! 1. its relevancy is at least the zoom level,
//! 2. at least one of its categories has visible settings,
//! 3. its date lies in `[start, end]`.
//!
//! A category without a settings entry never counts as visible.

use crate::types::{CategorySettings, HistoricalEvent};
use chrono::{DateTime, Utc};

/// Borrowed view of the filter state
#[derive(Clone, Copy, Debug)]
pub struct VisibilityFilter<'a> {
    zoom_level: u8,
    categories: &'a [CategorySettings],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl<'a> VisibilityFilter<'a> {
    /// Creates a filter from its parts
    #[must_use]
    pub const fn new(
        zoom_level: u8,
        categories: &'a [CategorySettings],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            zoom_level,
            categories,
            start,
            end,
        }
    }

    /// Relevancy meets the zoom threshold
    #[must_use]
    pub const fn is_relevant(&self, event: &HistoricalEvent) -> bool {
        event.relevancy_level >= self.zoom_level
    }

    /// Some category of the event is switched on
    #[must_use]
    pub fn has_visible_category(&self, event: &HistoricalEvent) -> bool {
        event.categories.iter().any(|category| {
            self.categories
                .iter()
                .find(|settings| settings.name == *category)
                .is_some_and(|settings| settings.visible)
        })
    }

    /// Date lies in the inclusive range
    #[must_use]
    pub fn in_date_range(&self, event: &HistoricalEvent) -> bool {
        event.occurs_within(self.start, self.end)
    }

    /// All three conditions hold
    #[must_use]
    pub fn matches(&self, event: &HistoricalEvent) -> bool {
        self.is_relevant(event) && self.has_visible_category(event) && self.in_date_range(event)
    }

    /// The matching events, in list order
    #[must_use]
    pub fn apply(&self, events: &[HistoricalEvent]) -> Vec<HistoricalEvent> {
        events
            .iter()
            .filter(|event| self.matches(event))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::types::{calendar_date, EventCategory};

    fn event(level: u8, categories: Vec<EventCategory>, year: i32) -> HistoricalEvent {
        HistoricalEvent::new(
            format!("{level}-{year}"),
            "title",
            "description",
            calendar_date(year, 6, 1).unwrap(),
            categories,
            level,
        )
    }

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (calendar_date(1, 1, 1).unwrap(), calendar_date(2024, 12, 31).unwrap())
    }

    #[test]
    fn relevancy_threshold_is_inclusive() {
        let settings = CategorySettings::defaults();
        let (start, end) = window();
        let filter = VisibilityFilter::new(9, &settings, start, end);

        assert!(filter.is_relevant(&event(9, vec![], 1900)));
        assert!(filter.is_relevant(&event(10, vec![], 1900)));
        assert!(!filter.is_relevant(&event(8, vec![], 1900)));
    }

    #[test]
    fn one_visible_category_is_enough() {
        let mut settings = CategorySettings::defaults();
        settings
            .iter_mut()
            .filter(|s| s.name == EventCategory::Religion)
            .for_each(|s| s.visible = false);
        let (start, end) = window();
        let filter = VisibilityFilter::new(1, &settings, start, end);

        assert!(filter.has_visible_category(&event(5, vec![EventCategory::Religion, EventCategory::Politics], 1900)));
        assert!(!filter.has_visible_category(&event(5, vec![EventCategory::Religion], 1900)));
        assert!(!filter.has_visible_category(&event(5, vec![], 1900)));
    }

    #[test]
    fn category_without_settings_is_never_visible() {
        let settings = vec![CategorySettings::new(EventCategory::Economic)];
        let (start, end) = window();
        let filter = VisibilityFilter::new(1, &settings, start, end);

        assert!(!filter.matches(&event(10, vec![EventCategory::Industrial], 1900)));
        assert!(filter.matches(&event(10, vec![EventCategory::Industrial, EventCategory::Economic], 1900)));
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let settings = CategorySettings::defaults();
        let start = calendar_date(1900, 6, 1).unwrap();
        let end = calendar_date(1950, 6, 1).unwrap();
        let filter = VisibilityFilter::new(1, &settings, start, end);

        assert!(filter.in_date_range(&event(5, vec![], 1900)));
        assert!(filter.in_date_range(&event(5, vec![], 1950)));
        assert!(!filter.in_date_range(&event(5, vec![], 1899)));
        assert!(!filter.in_date_range(&event(5, vec![], 1951)));
    }

    #[test]
    fn reversed_range_shows_nothing() {
        let settings = CategorySettings::defaults();
        let filter = VisibilityFilter::new(
            1,
            &settings,
            calendar_date(1950, 1, 1).unwrap(),
            calendar_date(1900, 1, 1).unwrap(),
        );

        assert!(filter.apply(&[event(10, vec![EventCategory::Politics], 1925)]).is_empty());
    }

    #[test]
    fn apply_keeps_order() {
        let settings = CategorySettings::defaults();
        let (start, end) = window();
        let filter = VisibilityFilter::new(9, &settings, start, end);
        let events = vec![
            event(10, vec![EventCategory::Economic], 1700),
            event(9, vec![EventCategory::Politics], 1800),
            event(8, vec![EventCategory::Politics], 1850),
            event(9, vec![EventCategory::Economic], 1900),
            event(7, vec![EventCategory::Industrial], 1950),
        ];

        let levels: Vec<u8> = filter.apply(&events).iter().map(|e| e.relevancy_level).collect();
        assert_eq!(levels, vec![10, 9, 9]);
    }
}
