//! Event sinks for the run log.
//!
//! Components never own the log; they record into whatever [`EventSink`]
//! the caller hands them. The engine owns an [`EventLog`]; strategy
//! lookahead runs against [`DiscardEvents`] so trial plays leave no trace.

use shift_types::{EventKind, EventPayload, RunEvent};
use tracing::trace;

/// Build an [`EventPayload`] from `"key" => value` pairs.
///
/// Values go through `serde_json::json!`, so anything serializable works.
macro_rules! payload {
    () => {
        ::shift_types::EventPayload::new()
    };
    ($($key:literal => $value:expr),+ $(,)?) => {
        ::shift_types::EventPayload::from([
            $((::std::string::String::from($key), ::serde_json::json!($value))),+
        ])
    };
}

pub(crate) use payload;

/// Destination for run events.
pub trait EventSink {
    /// Record one event that happened during `round`.
    fn record(&mut self, round: u32, kind: EventKind, payload: EventPayload);
}

/// In-memory, append-only run log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<RunEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All events in order.
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one kind, in order.
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &RunEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Drop every event. Only used when a new run starts.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for EventLog {
    fn record(&mut self, round: u32, kind: EventKind, payload: EventPayload) {
        let sequence = u64::try_from(self.events.len()).unwrap_or(u64::MAX);
        trace!(sequence, round, kind = %kind, "Event recorded");
        self.events.push(RunEvent {
            sequence,
            round,
            kind,
            payload,
        });
    }
}

/// A sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    fn record(&mut self, _round: u32, _kind: EventKind, _payload: EventPayload) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_are_contiguous() {
        let mut log = EventLog::new();
        log.record(1, EventKind::RunInitialized, payload!());
        log.record(1, EventKind::CardDrawn, payload!("card_id" => 4));
        log.record(2, EventKind::RoundEnded, payload!("round" => 2, "over" => false));
        let seqs: Vec<u64> = log.events().iter().map(|e| e.sequence).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(log.of_kind(EventKind::CardDrawn).count(), 1);
    }

    #[test]
    fn payload_macro_builds_flat_map() {
        let p = payload!("track" => "planet", "delta" => -2);
        assert_eq!(p.get("track"), Some(&serde_json::json!("planet")));
        assert_eq!(p.get("delta"), Some(&serde_json::json!(-2)));
    }

    #[test]
    fn discard_sink_records_nothing() {
        let mut sink = DiscardEvents;
        sink.record(1, EventKind::GameOver, payload!());
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.clear();
        assert_eq!(log.len(), 0);
    }
}
