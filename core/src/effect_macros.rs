//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants that wrap
//! async blocks or timers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use timeline_core::async_effect;
///
/// async_effect! {
///     let events = source.get_events().await.ok()?;
///     Some(TimelineAction::EventsLoaded { request, events })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Cancellable` from an id and an async block
///
/// Any in-flight effect started under the same id is aborted when this one
/// starts.
///
/// # Example
///
/// ```rust,ignore
/// use timeline_core::cancellable_effect;
///
/// cancellable_effect! {
///     id: "timeline.load",
///     async {
///         let events = source.get_events().await.ok()?;
///         Some(TimelineAction::EventsLoaded { request, events })
///     }
/// }
/// ```
#[macro_export]
macro_rules! cancellable_effect {
    (
        id: $id:expr,
        async { $($body:tt)* }
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $crate::effect::EffectId::new($id),
            future: ::std::boxed::Box::pin(async move { $($body)* }),
        }
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use timeline_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(250),
///     action: TimelineAction::FetchEvents
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
