//! Session segmentation and acceptance.
//!
//! Events are grouped into sessions separated by inactivity gaps. A
//! session is kept only when its activity looks naturally paced: enough
//! events, spread over enough time, at a bounded detection rate. This
//! rejects calibration bursts where a device fires many detections within
//! a few seconds.

use crate::constants::session::{MIN_SESSION_EVENTS, SESSION_GAP_MINUTES};
use crate::filter::TimedEvent;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// A maximal run of events with no gap over [`SESSION_GAP_MINUTES`].
#[derive(Debug, Clone)]
pub struct Session {
    /// Events in chronological order.
    pub events: Vec<TimedEvent>,
}

impl Session {
    /// Timestamp of the first event.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.events.first().map(|e| e.instant)
    }

    /// Timestamp of the last event.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.events.last().map(|e| e.instant)
    }

    /// Span between the first and last event, in minutes.
    pub fn duration_minutes(&self) -> f64 {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => minutes_between(start, end),
            _ => 0.0,
        }
    }

    /// Detections per minute; infinite when the duration is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn detection_rate(&self) -> f64 {
        let duration = self.duration_minutes();
        if duration > 0.0 {
            self.events.len() as f64 / duration
        } else {
            f64::INFINITY
        }
    }
}

/// Why a session was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVerdict {
    /// Session kept.
    Accepted,
    /// Fewer than [`MIN_SESSION_EVENTS`] events.
    TooFewEvents,
    /// Detection rate above the limit.
    RateTooHigh,
    /// Duration below the minimum.
    TooShort,
}

/// Split chronologically sorted events into sessions.
///
/// A new session starts when the gap to the previous event is strictly
/// greater than [`SESSION_GAP_MINUTES`].
pub fn segment_sessions(sorted: Vec<TimedEvent>) -> Vec<Session> {
    let max_gap = Duration::minutes(SESSION_GAP_MINUTES);

    let mut sessions = Vec::new();
    let mut current: Vec<TimedEvent> = Vec::new();

    for event in sorted {
        let starts_new = current
            .last()
            .is_some_and(|last| event.instant - last.instant > max_gap);

        if starts_new {
            sessions.push(Session {
                events: std::mem::take(&mut current),
            });
        }

        current.push(event);
    }

    if !current.is_empty() {
        sessions.push(Session { events: current });
    }

    sessions
}

/// Decide whether a session represents real activity.
pub fn judge_session(
    session: &Session,
    detection_rate_limit: f64,
    session_min_duration_minutes: f64,
) -> SessionVerdict {
    if session.events.len() < MIN_SESSION_EVENTS {
        return SessionVerdict::TooFewEvents;
    }

    if session.detection_rate() > detection_rate_limit || detection_rate_limit.is_nan() {
        return SessionVerdict::RateTooHigh;
    }

    if session.duration_minutes() < session_min_duration_minutes
        || session_min_duration_minutes.is_nan()
    {
        return SessionVerdict::TooShort;
    }

    SessionVerdict::Accepted
}

/// Events of all accepted sessions, in chronological order.
#[derive(Debug, Default)]
pub struct SessionOutcome {
    /// Events from accepted sessions.
    pub events: Vec<TimedEvent>,
    /// Total sessions found.
    pub sessions_found: usize,
    /// Sessions accepted.
    pub sessions_accepted: usize,
}

/// Sort, segment and filter events by session acceptance.
pub fn filter_sessions(
    mut events: Vec<TimedEvent>,
    detection_rate_limit: f64,
    session_min_duration_minutes: f64,
) -> SessionOutcome {
    // Stable sort keeps input order among equal instants.
    events.sort_by_key(|e| e.instant);

    let sessions = segment_sessions(events);
    let mut outcome = SessionOutcome {
        sessions_found: sessions.len(),
        ..SessionOutcome::default()
    };

    for session in sessions {
        let verdict = judge_session(&session, detection_rate_limit, session_min_duration_minutes);
        debug!(
            "Session {:?}..{:?}: {} events, {:.2} min, {:.2}/min -> {:?}",
            session.start(),
            session.end(),
            session.events.len(),
            session.duration_minutes(),
            session.detection_rate(),
            verdict
        );

        if verdict == SessionVerdict::Accepted {
            outcome.sessions_accepted += 1;
            outcome.events.extend(session.events);
        }
    }

    outcome
}

/// Minutes between two instants, with microsecond precision.
#[allow(clippy::cast_precision_loss)]
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 60_000.0,
        |us| us as f64 / 60_000_000.0,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minutes: i64) -> TimedEvent {
        TimedEvent {
            index: usize::try_from(minutes).unwrap_or(0),
            instant: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap() + Duration::minutes(minutes),
            label: "bee".to_string(),
        }
    }

    #[test]
    fn test_gap_over_sixty_minutes_splits() {
        let sessions = segment_sessions(vec![at(0), at(10), at(71), at(80)]);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].events.len(), 2);
        assert_eq!(sessions[1].events.len(), 2);
    }

    #[test]
    fn test_gap_of_exactly_sixty_minutes_does_not_split() {
        let sessions = segment_sessions(vec![at(0), at(60), at(120)]);
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_empty_input_has_no_sessions() {
        assert!(segment_sessions(Vec::new()).is_empty());
    }

    #[test]
    fn test_duration_and_rate() {
        let session = Session {
            events: vec![at(0), at(1), at(2), at(3), at(4)],
        };
        assert_eq!(session.duration_minutes(), 4.0);
        assert_eq!(session.detection_rate(), 1.25);
    }

    #[test]
    fn test_zero_duration_rate_is_infinite() {
        let session = Session {
            events: vec![at(5), at(5), at(5)],
        };
        assert_eq!(session.duration_minutes(), 0.0);
        assert!(session.detection_rate().is_infinite());
    }

    #[test]
    fn test_judge_size_floor() {
        let session = Session {
            events: vec![at(0), at(30)],
        };
        assert_eq!(judge_session(&session, f64::INFINITY, 0.0), SessionVerdict::TooFewEvents);
    }

    #[test]
    fn test_judge_rate_and_duration() {
        let session = Session {
            events: vec![at(0), at(1), at(2), at(3), at(4)],
        };
        assert_eq!(judge_session(&session, 50.0, 1.0), SessionVerdict::Accepted);
        assert_eq!(judge_session(&session, 1.25, 4.0), SessionVerdict::Accepted);
        assert_eq!(judge_session(&session, 1.0, 1.0), SessionVerdict::RateTooHigh);
        assert_eq!(judge_session(&session, 50.0, 5.0), SessionVerdict::TooShort);
    }

    #[test]
    fn test_same_instant_burst_needs_infinite_limit() {
        let session = Session {
            events: vec![at(5), at(5), at(5), at(5)],
        };
        assert_eq!(judge_session(&session, 1000.0, 0.0), SessionVerdict::RateTooHigh);
        assert_eq!(judge_session(&session, f64::INFINITY, 0.0), SessionVerdict::Accepted);
    }

    #[test]
    fn test_filter_sessions_sorts_and_counts() {
        let outcome = filter_sessions(vec![at(4), at(0), at(2), at(200)], 50.0, 1.0);
        assert_eq!(outcome.sessions_found, 2);
        assert_eq!(outcome.sessions_accepted, 1);
        let indices: Vec<usize> = outcome.events.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 2, 4]);
    }

    #[test]
    fn test_minutes_between_sub_minute() {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let end = start + Duration::seconds(30);
        assert_eq!(minutes_between(start, end), 0.5);
    }
}
