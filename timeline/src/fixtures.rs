//! Sample events served by the in-memory source.

use crate::types::{calendar_date, EventCategory, HistoricalEvent};
use chrono::{DateTime, Utc};
use EventCategory::{Economic, Industrial, Politics, Religion};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    calendar_date(year, month, day).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Fifteen well-known events spanning economics, religion, politics and industry
#[must_use]
pub fn sample_events() -> Vec<HistoricalEvent> {
    vec![
        HistoricalEvent::new(
            "1",
            "Industrial Revolution Begins",
            "The Industrial Revolution marks a major turning point in human history, fundamentally changing economic and social organization.",
            day(1760, 1, 1),
            vec![Industrial, Economic],
            10,
        )
        .with_icon("precision_manufacturing"),
        HistoricalEvent::new(
            "2",
            "French Revolution",
            "The French Revolution was a period of radical political and societal change in France.",
            day(1789, 7, 14),
            vec![Politics],
            9,
        )
        .with_icon("gavel"),
        HistoricalEvent::new(
            "3",
            "Protestant Reformation",
            "The Protestant Reformation was a major religious reform movement that began in the 16th century.",
            day(1517, 10, 31),
            vec![Religion, Politics],
            8,
        )
        .with_icon("menu_book"),
        HistoricalEvent::new(
            "4",
            "Great Depression",
            "The Great Depression was a severe worldwide economic depression that began in 1929.",
            day(1929, 10, 29),
            vec![Economic, Politics],
            9,
        )
        .with_icon("trending_down"),
        HistoricalEvent::new(
            "5",
            "First Assembly Line",
            "Henry Ford introduces the first moving assembly line, revolutionizing industrial production.",
            day(1913, 12, 1),
            vec![Industrial, Economic],
            7,
        )
        .with_icon("conveyor_belt"),
        HistoricalEvent::new(
            "6",
            "Steam Engine Patent",
            "James Watt patents the steam engine, powering the Industrial Revolution.",
            day(1769, 1, 5),
            vec![Industrial],
            8,
        )
        .with_icon("engineering"),
        HistoricalEvent::new(
            "7",
            "First Stock Market",
            "The Amsterdam Stock Exchange becomes the first modern stock market.",
            day(1602, 9, 1),
            vec![Economic],
            7,
        )
        .with_icon("monitoring"),
        HistoricalEvent::new(
            "8",
            "Vatican City Established",
            "The Lateran Treaty establishes Vatican City as a sovereign state.",
            day(1929, 2, 11),
            vec![Religion, Politics],
            6,
        )
        .with_icon("church"),
        HistoricalEvent::new(
            "9",
            "First Electric Power Grid",
            "Thomas Edison launches the first commercial electric power grid in Manhattan.",
            day(1882, 9, 4),
            vec![Industrial, Economic],
            8,
        )
        .with_icon("electric_bolt"),
        HistoricalEvent::new(
            "10",
            "Bretton Woods Conference",
            "International monetary system established, creating the World Bank and IMF.",
            day(1944, 7, 1),
            vec![Economic, Politics],
            7,
        )
        .with_icon("account_balance"),
        HistoricalEvent::new(
            "11",
            "First Ecumenical Council",
            "The Council of Nicaea establishes core Christian doctrines.",
            day(325, 5, 20),
            vec![Religion],
            8,
        )
        .with_icon("groups"),
        HistoricalEvent::new(
            "12",
            "First Factory Act",
            "Britain passes the Factory Act of 1833, regulating child labor.",
            day(1833, 8, 29),
            vec![Industrial, Politics],
            6,
        )
        .with_icon("policy"),
        HistoricalEvent::new(
            "13",
            "Islamic Golden Age Begins",
            "The House of Wisdom in Baghdad becomes a major intellectual center.",
            day(800, 1, 1),
            vec![Religion, Economic],
            9,
        )
        .with_icon("auto_stories"),
        HistoricalEvent::new(
            "14",
            "First Modern Assembly Line",
            "Ransom Olds creates the first automotive assembly line.",
            day(1901, 1, 1),
            vec![Industrial],
            6,
        )
        .with_icon("directions_car"),
        HistoricalEvent::new(
            "15",
            "Creation of Federal Reserve",
            "The United States establishes its central banking system.",
            day(1913, 12, 23),
            vec![Economic, Politics],
            8,
        )
        .with_icon("savings"),
    ]
}
