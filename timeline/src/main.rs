//! Scripted demo of the timeline store.
//!
//! Loads events, then walks through zoom, category, date range and search
//! changes, logging the visible events after each step.
//!
//! Configuration comes from `TIMELINE_*` environment variables; log output
//! is controlled by `RUST_LOG`.

use anyhow::Context;
use std::time::Duration;
use timeline::{build_store, EventCategory, TimelineAction, TimelineConfig, TimelineStore};
use timeline::types::calendar_date;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timeline=info,timeline_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = TimelineConfig::from_env().context("Invalid timeline configuration")?;
    tracing::info!(
        zoom_level = config.zoom_level,
        data_file = ?config.data_file,
        "Starting timeline demo"
    );

    let store = build_store(&config);

    run(&store, TimelineAction::FetchEvents, "Fetched events", config.load_timeout).await?;

    run(&store, TimelineAction::SetZoomLevel { level: 9 }, "Zoomed in to 9", config.load_timeout).await?;
    run(&store, TimelineAction::SetZoomLevel { level: 1 }, "Zoomed out to 1", config.load_timeout).await?;

    run(
        &store,
        TimelineAction::ToggleCategory { category: EventCategory::Religion },
        "Hid religion",
        config.load_timeout,
    )
    .await?;

    let start = calendar_date(1900, 1, 1).context("Invalid demo start date")?;
    let end = calendar_date(1950, 1, 1).context("Invalid demo end date")?;
    run(
        &store,
        TimelineAction::SetDateRange { start, end },
        "Restricted to 1900-1950",
        config.load_timeout,
    )
    .await?;

    run(
        &store,
        TimelineAction::SetDateRange { start: config.start_date, end: config.end_date },
        "Restored the date range",
        config.load_timeout,
    )
    .await?;

    run(
        &store,
        TimelineAction::SearchEvents { query: "Revolution".to_string() },
        "Searched for \"Revolution\"",
        config.load_timeout,
    )
    .await?;

    if let Some(error) = store.state(|s| s.error.clone()).await {
        tracing::warn!(%error, "Last load failed");
    }

    store
        .shutdown(Duration::from_secs(5))
        .await
        .context("Store did not shut down cleanly")?;

    tracing::info!("Demo complete");
    Ok(())
}

/// Sends an action, waits for its effects and logs the visible events
async fn run(
    store: &TimelineStore,
    action: TimelineAction,
    step: &str,
    timeout: Duration,
) -> anyhow::Result<()> {
    let mut handle = store.send(action).await?;
    handle
        .wait_with_timeout(timeout)
        .await
        .with_context(|| format!("{step}: load did not finish within {timeout:?}"))?;

    let (zoom_level, total, visible) = store
        .state(|s| {
            let titles: Vec<String> = s
                .visible_events()
                .iter()
                .map(|e| format!("{} ({}, relevancy {})", e.title, e.date.format("%Y-%m-%d"), e.relevancy_level))
                .collect();
            (s.zoom_level, s.events.len(), titles)
        })
        .await;

    tracing::info!(zoom_level, total, visible = visible.len(), "{step}");
    for line in visible {
        tracing::info!("  {line}");
    }

    Ok(())
}
