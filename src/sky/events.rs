//! Previous/next sunrise and sunset bookkeeping
//!
//! For each [`EventKind`] the face remembers the most recent past
//! occurrence and the soonest future one. Event times arrive from the
//! phone out of order and repeatedly; [`EventTable::assign`] decides which
//! of them are worth keeping.

use core::fmt::Write;

use heapless::String;

use crate::system::time::{Timestamp, SECONDS_PER_DAY};

/// Placeholder label for an unknown event
pub const NOT_AVAILABLE: &str = "N/A";

pub type Label = String<8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    Sunrise,
    Sunset,
}

impl EventKind {
    pub const ALL: [EventKind; 2] = [EventKind::Sunrise, EventKind::Sunset];

    const fn index(self) -> usize {
        match self {
            EventKind::Sunrise => 0,
            EventKind::Sunset => 1,
        }
    }
}

/// What [`EventTable::assign`] did with an incoming time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Assignment {
    /// Older than the stored previous occurrence
    Stale,
    /// Became the new previous occurrence
    Previous,
    /// Became the new next occurrence
    Next,
    /// Not later than now and not newer than previous, or not sooner than next
    Ignored,
}

/// Last and upcoming occurrence of one event kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventState {
    /// `None` if never observed
    pub previous: Option<Timestamp>,
    /// `None` if no future occurrence is known
    pub next: Option<Timestamp>,
}

impl EventState {
    pub const UNKNOWN: Self = Self {
        previous: None,
        next: None,
    };

    /// `previous <= now <= next`, treating unknown ends as open
    pub fn brackets(&self, now: Timestamp) -> bool {
        self.previous.map_or(true, |p| p <= now) && self.next.map_or(true, |n| now <= n)
    }

    fn assign(&mut self, incoming: Timestamp, now: Timestamp) -> Assignment {
        // An unknown previous is before everything, an unknown next after.
        let after_previous = self.previous.map_or(true, |p| incoming > p);
        let before_next = self.next.map_or(true, |n| incoming < n);

        if self.previous.is_some_and(|p| p > incoming) {
            Assignment::Stale
        } else if after_previous && incoming < now {
            self.previous = Some(incoming);
            Assignment::Previous
        } else if incoming > now && before_next {
            self.next = Some(incoming);
            Assignment::Next
        } else {
            Assignment::Ignored
        }
    }

    fn roll_past_due(&mut self, now: Timestamp) -> bool {
        match self.next {
            Some(next) if now > next => {
                self.previous = Some(next);
                self.next = None;
                true
            }
            _ => false,
        }
    }

    /// The occurrence to draw: `next` if it is less than a day away, else
    /// `previous` if it was less than a day ago
    pub fn effective(&self, now: Timestamp) -> Option<Timestamp> {
        match (self.next, self.previous) {
            (Some(next), _) if next - now < SECONDS_PER_DAY => Some(next),
            (_, Some(previous)) if now - previous < SECONDS_PER_DAY => Some(previous),
            _ => None,
        }
    }

    /// `next` is known and more than a day away
    pub fn next_beyond_day(&self, now: Timestamp) -> Option<Timestamp> {
        self.next.filter(|next| *next - now > SECONDS_PER_DAY)
    }

    /// `previous` is known and less than a day ago
    pub fn previous_within_day(&self, now: Timestamp) -> Option<Timestamp> {
        self.previous.filter(|previous| now - *previous < SECONDS_PER_DAY)
    }
}

/// Sunrise and sunset state, indexed by [`EventKind`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventTable {
    states: [EventState; 2],
}

impl EventTable {
    pub const fn new() -> Self {
        Self {
            states: [EventState::UNKNOWN; 2],
        }
    }

    pub fn get(&self, kind: EventKind) -> &EventState {
        &self.states[kind.index()]
    }

    pub fn get_mut(&mut self, kind: EventKind) -> &mut EventState {
        &mut self.states[kind.index()]
    }

    /// File an incoming event time as the previous or next occurrence of
    /// `kind`, or discard it.
    ///
    /// Boundaries are strict: a time equal to previous, now or next is
    /// discarded, so repeating a call changes nothing. Expects
    /// [`roll_past_due`](Self::roll_past_due) to have run for `now`.
    pub fn assign(&mut self, kind: EventKind, incoming: Timestamp, now: Timestamp) -> Assignment {
        let state = self.get_mut(kind);
        if !state.brackets(now) {
            warn!(
                "{} state does not bracket now ({}): {}",
                kind, now, *state
            );
        }

        let outcome = state.assign(incoming, now);
        match outcome {
            Assignment::Stale => debug!("{} at {} older than previous; not using", kind, incoming),
            Assignment::Ignored => debug!("{} at {} not used", kind, incoming),
            Assignment::Previous | Assignment::Next => {
                debug!("{} at {} stored as {}", kind, incoming, outcome)
            }
        }
        outcome
    }

    /// Demote every `next` that `now` has passed to `previous`
    pub fn roll_past_due(&mut self, now: Timestamp) {
        for kind in EventKind::ALL {
            if self.get_mut(kind).roll_past_due(now) {
                debug!("{} passed, demoted to previous", kind);
            }
        }
    }

    pub fn labels(&self) -> EventLabels {
        let sunrise = self.get(EventKind::Sunrise);
        let sunset = self.get(EventKind::Sunset);
        EventLabels {
            next_sunrise: label(sunrise.next),
            next_sunset: label(sunset.next),
            prev_sunrise: label(sunrise.previous),
            prev_sunset: label(sunset.previous),
        }
    }
}

/// "HH:MM" texts for the four stored event times
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLabels {
    pub next_sunrise: Label,
    pub next_sunset: Label,
    pub prev_sunrise: Label,
    pub prev_sunset: Label,
}

/// "HH:MM" for a known time, [`NOT_AVAILABLE`] otherwise
pub fn label(time: Option<Timestamp>) -> Label {
    let mut text = Label::new();
    // fits
    let _ = match time {
        Some(t) => write!(text, "{:02}:{:02}", t.hour(), t.minute()),
        None => text.write_str(NOT_AVAILABLE),
    };
    text
}
