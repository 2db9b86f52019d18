//! Projections
//!
//! Application state rebuilt by folding replayed events in write order.
//! The log attaches no meaning to event types; a projection does.

use serde::de::DeserializeOwned;

/// State reconstructed from the log.
///
/// ```
/// use std::collections::BTreeSet;
/// use appendlog::Projection;
///
/// #[derive(Default)]
/// struct CompletedSegments(BTreeSet<u32>);
///
/// impl Projection for CompletedSegments {
///     type Event = u32;
///
///     fn apply(&mut self, event_type: &str, segment: u32) {
///         if event_type == "download" {
///             self.0.insert(segment);
///         }
///     }
/// }
/// ```
pub trait Projection {
    /// Payload type stored in the log
    type Event: DeserializeOwned;

    /// Fold one recovered event into the state
    fn apply(&mut self, event_type: &str, event: Self::Event);
}
