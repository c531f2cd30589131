//! Reducer logic for the timeline.
//!
//! Filter actions update state directly. Load actions mark the state as
//! loading and return a cancellable effect that queries the event source;
//! its outcome comes back as `EventsLoaded` or `LoadFailed`. The visible
//! events are recomputed after every action.

use crate::service::EventSource;
use crate::state::{TimelineAction, TimelineState};
use crate::types::clamp_level;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use timeline_core::{cancellable_effect, effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Cancellation id shared by every load; a new load aborts the running one
pub const LOAD_EFFECT_ID: &str = "timeline.load";

/// Environment dependencies for the timeline reducer
#[derive(Clone)]
pub struct TimelineEnvironment {
    /// Where loads read events from
    pub source: Arc<dyn EventSource>,
}

impl TimelineEnvironment {
    /// Creates a new `TimelineEnvironment`
    #[must_use]
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }
}

impl std::fmt::Debug for TimelineEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineEnvironment").finish_non_exhaustive()
    }
}

/// What a load asks the source for
#[derive(Debug)]
enum LoadQuery {
    All,
    Search(String),
    Range(DateTime<Utc>, DateTime<Utc>),
}

/// Reducer for the timeline
#[derive(Clone, Debug)]
pub struct TimelineReducer;

impl TimelineReducer {
    /// Creates a new `TimelineReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Marks the state as loading and returns the effect that runs the query
    fn begin_load(
        state: &mut TimelineState,
        query: LoadQuery,
        env: &TimelineEnvironment,
    ) -> Effect<TimelineAction> {
        state.latest_request += 1;
        state.is_loading = true;
        state.error = None;

        let request = state.latest_request;
        let source = Arc::clone(&env.source);
        tracing::debug!(request, ?query, "Starting load");

        cancellable_effect! {
            id: LOAD_EFFECT_ID,
            async {
                let result = match &query {
                    LoadQuery::All => source.get_events().await,
                    LoadQuery::Search(text) => source.search_events(text).await,
                    LoadQuery::Range(start, end) => {
                        source.get_events_by_date_range(*start, *end).await
                    }
                };

                Some(match result {
                    Ok(events) => TimelineAction::EventsLoaded { request, events },
                    Err(error) => TimelineAction::LoadFailed {
                        request,
                        error: error.to_string(),
                    },
                })
            }
        }
    }

    /// Whether a load result belongs to the latest request
    fn is_current(state: &TimelineState, request: u64) -> bool {
        if request == state.latest_request {
            return true;
        }

        tracing::debug!(
            request,
            latest = state.latest_request,
            "Discarding result of superseded load"
        );
        false
    }
}

impl Default for TimelineReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TimelineReducer {
    type State = TimelineState;
    type Action = TimelineAction;
    type Environment = TimelineEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.name(), "Reducing");

        let effects = match action {
            // ========== Loads ==========
            TimelineAction::FetchEvents => {
                smallvec![Self::begin_load(state, LoadQuery::All, env)]
            }

            TimelineAction::SearchEvents { query } => {
                smallvec![Self::begin_load(state, LoadQuery::Search(query), env)]
            }

            TimelineAction::LoadDateRange { start, end } => {
                smallvec![Self::begin_load(state, LoadQuery::Range(start, end), env)]
            }

            TimelineAction::EventsLoaded { request, events } => {
                if Self::is_current(state, request) {
                    tracing::debug!(request, count = events.len(), "Events loaded");
                    state.events = events;
                    state.is_loading = false;
                }
                SmallVec::new()
            }

            TimelineAction::LoadFailed { request, error } => {
                if Self::is_current(state, request) {
                    tracing::error!(request, error = %error, "Failed to load events");
                    state.error = Some(error);
                    state.is_loading = false;
                }
                SmallVec::new()
            }

            // ========== Filters ==========
            TimelineAction::SetZoomLevel { level } => {
                state.zoom_level = clamp_level(level);
                SmallVec::new()
            }

            TimelineAction::SetDateRange { start, end } => {
                if start > end {
                    tracing::warn!(%start, %end, "Date range start is after its end");
                }
                state.start_date = start;
                state.end_date = end;
                SmallVec::new()
            }

            TimelineAction::ToggleCategory { category } => {
                if let Some(settings) = state.categories.iter_mut().find(|s| s.name == category) {
                    settings.visible = !settings.visible;
                }
                SmallVec::new()
            }

            // ========== Edits ==========
            TimelineAction::AddEvent { event } => {
                state.events.push(event);
                SmallVec::new()
            }

            TimelineAction::RemoveEvent { id } => {
                state.events.retain(|event| event.id != id);
                SmallVec::new()
            }
        };

        state.refresh_visible();
        effects
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::fixtures::sample_events;
    use crate::service::{InMemoryEventSource, SourceLatency};
    use crate::types::{calendar_date, CategorySettings, EventCategory, EventId, HistoricalEvent};
    use timeline_testing::{assertions, ReducerTest};

    fn env() -> TimelineEnvironment {
        TimelineEnvironment::new(Arc::new(
            InMemoryEventSource::sample().with_latency(SourceLatency::none()),
        ))
    }

    fn loaded() -> TimelineState {
        TimelineState::with_events(sample_events())
    }

    fn visible_ids(state: &TimelineState) -> Vec<String> {
        state
            .visible_events()
            .iter()
            .map(|e| e.id.to_string())
            .collect()
    }

    fn event_with_level(id: &str, level: u8) -> HistoricalEvent {
        HistoricalEvent::new(
            id,
            "title",
            "description",
            calendar_date(1900, 1, 1).unwrap(),
            vec![EventCategory::Economic],
            level,
        )
    }

    #[test]
    fn fetch_starts_cancellable_load() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(TimelineState {
                is_loading: false,
                error: Some("old failure".to_string()),
                ..TimelineState::default()
            })
            .when_action(TimelineAction::FetchEvents)
            .then_state(|state| {
                assert!(state.is_loading);
                assert!(state.error.is_none());
                assert_eq!(state.latest_request(), 1);
            })
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_cancellable_effect(effects, LOAD_EFFECT_ID);
            })
            .run();
    }

    #[test]
    fn every_load_takes_a_new_request_number() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(TimelineState::default())
            .when_action(TimelineAction::FetchEvents)
            .when_action(TimelineAction::SearchEvents {
                query: "steam".to_string(),
            })
            .when_action(TimelineAction::LoadDateRange {
                start: calendar_date(1900, 1, 1).unwrap(),
                end: calendar_date(1950, 1, 1).unwrap(),
            })
            .then_state(|state| assert_eq!(state.latest_request(), 3))
            .then_effects(|effects| {
                assertions::assert_has_cancellable_effect(effects, LOAD_EFFECT_ID);
            })
            .run();
    }

    #[test]
    fn loaded_events_replace_the_list() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::FetchEvents)
            .when_action(TimelineAction::EventsLoaded {
                request: 1,
                events: vec![event_with_level("a", 7)],
            })
            .then_state(|state| {
                assert!(!state.is_loading);
                assert_eq!(state.events.len(), 1);
                assert_eq!(visible_ids(state), vec!["a"]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn failed_load_records_error_and_keeps_events() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::FetchEvents)
            .when_action(TimelineAction::LoadFailed {
                request: 1,
                error: "Event source unavailable: offline".to_string(),
            })
            .then_state(|state| {
                assert!(!state.is_loading);
                assert_eq!(
                    state.error.as_deref(),
                    Some("Event source unavailable: offline")
                );
                assert_eq!(state.events.len(), 15);
            })
            .run();
    }

    #[test]
    fn stale_results_are_ignored() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::FetchEvents)
            .when_action(TimelineAction::SearchEvents {
                query: "steam".to_string(),
            })
            .when_action(TimelineAction::EventsLoaded {
                request: 1,
                events: Vec::new(),
            })
            .when_action(TimelineAction::LoadFailed {
                request: 1,
                error: "late".to_string(),
            })
            .then_state(|state| {
                assert!(state.is_loading);
                assert!(state.error.is_none());
                assert_eq!(state.events.len(), 15);
            })
            .run();
    }

    #[test]
    fn zoom_is_clamped() {
        for (requested, stored) in [(-5, 1), (0, 1), (1, 1), (6, 6), (10, 10), (42, 10)] {
            ReducerTest::new(TimelineReducer::new())
                .with_env(env())
                .given_state(TimelineState::default())
                .when_action(TimelineAction::SetZoomLevel { level: requested })
                .then_state(move |state| assert_eq!(state.zoom_level, stored))
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn zoom_nine_keeps_the_most_relevant() {
        let events = [10, 9, 8, 9, 7]
            .iter()
            .enumerate()
            .map(|(i, level)| event_with_level(&i.to_string(), *level))
            .collect();

        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(TimelineState::with_events(events))
            .when_action(TimelineAction::SetZoomLevel { level: 9 })
            .then_state(|state| assert_eq!(visible_ids(state), vec!["0", "1", "3"]))
            .run();
    }

    #[test]
    fn zoom_nine_on_sample_data() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::SetZoomLevel { level: 9 })
            .then_state(|state| assert_eq!(visible_ids(state), vec!["1", "2", "4", "13"]))
            .run();
    }

    #[test]
    fn toggle_twice_restores_visibility() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::ToggleCategory {
                category: EventCategory::Religion,
            })
            .then_state(|state| {
                assert!(!state.is_category_visible(EventCategory::Religion));
                // 11 is the only event tagged religion alone
                assert_eq!(state.visible_events().len(), 14);
            })
            .run();

        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::ToggleCategory {
                category: EventCategory::Religion,
            })
            .when_action(TimelineAction::ToggleCategory {
                category: EventCategory::Religion,
            })
            .then_state(|state| {
                assert!(state.is_category_visible(EventCategory::Religion));
                assert_eq!(state.visible_events().len(), 15);
            })
            .run();
    }

    #[test]
    fn toggle_without_settings_is_a_no_op() {
        let state = TimelineState {
            categories: vec![CategorySettings::new(EventCategory::Economic)],
            ..loaded()
        };

        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(state)
            .when_action(TimelineAction::ToggleCategory {
                category: EventCategory::Politics,
            })
            .then_state(|state| {
                assert_eq!(state.categories, vec![CategorySettings::new(EventCategory::Economic)]);
            })
            .run();
    }

    #[test]
    fn date_range_restricts_view() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::SetDateRange {
                start: calendar_date(1900, 1, 1).unwrap(),
                end: calendar_date(1950, 1, 1).unwrap(),
            })
            .then_state(|state| {
                assert_eq!(visible_ids(state), vec!["4", "5", "8", "10", "14", "15"]);
            })
            .run();
    }

    #[test]
    fn reversed_date_range_is_stored_and_shows_nothing() {
        let start = calendar_date(1950, 1, 1).unwrap();
        let end = calendar_date(1900, 1, 1).unwrap();

        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::SetDateRange { start, end })
            .then_state(move |state| {
                assert_eq!(state.start_date, start);
                assert_eq!(state.end_date, end);
                assert!(state.visible_events().is_empty());
            })
            .run();
    }

    #[test]
    fn add_allows_duplicates_and_remove_drops_them_all() {
        let duplicate = event_with_level("1", 10);

        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::AddEvent {
                event: duplicate.clone(),
            })
            .then_state(|state| {
                assert_eq!(state.events.len(), 16);
                assert_eq!(state.visible_events().len(), 16);
            })
            .run();

        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::AddEvent { event: duplicate })
            .when_action(TimelineAction::RemoveEvent {
                id: EventId::from("1"),
            })
            .then_state(|state| {
                assert_eq!(state.events.len(), 14);
                assert!(state.events.iter().all(|e| e.id.as_str() != "1"));
                assert!(state.visible_events().iter().all(|e| e.id.as_str() != "1"));
            })
            .run();
    }

    #[test]
    fn remove_unknown_id_changes_nothing() {
        ReducerTest::new(TimelineReducer::new())
            .with_env(env())
            .given_state(loaded())
            .when_action(TimelineAction::RemoveEvent {
                id: EventId::from("404"),
            })
            .then_state(|state| assert_eq!(state.events.len(), 15))
            .run();
    }

    #[tokio::test]
    async fn load_effect_resolves_to_events() {
        let mut state = TimelineState::default();
        let effects = TimelineReducer::new().reduce(
            &mut state,
            TimelineAction::SearchEvents {
                query: "steam".to_string(),
            },
            &env(),
        );

        let Some(Effect::Cancellable { future, .. }) = effects.into_iter().next() else {
            panic!("load must return a cancellable effect");
        };

        match future.await {
            Some(TimelineAction::EventsLoaded { request, events }) => {
                assert_eq!(request, 1);
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].id.as_str(), "6");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
