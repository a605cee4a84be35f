//! Event loop driving the watchface
//!
//! The platform feeds minute ticks, phone messages and status changes into
//! a channel; [`Runtime::run`] handles them one at a time, so reconciler
//! updates never interleave.

use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Receiver};

use crate::{
    system::{
        companion::{Dictionary, Message},
        storage::Storage,
        time::Clock,
    },
    ui::{
        natural_watchface::{NaturalWatchface, Update},
        status::BatteryCharge,
        Frame,
    },
    Error,
};

/// Host events for the watchface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A new minute started
    Tick,
    Message(Message),
    Bluetooth(bool),
    Battery(BatteryCharge),
    /// Save state and stop
    Shutdown,
}

impl Input {
    /// Validate a raw dictionary from the phone
    pub fn from_dictionary(dict: &Dictionary<'_>) -> Result<Self, Error> {
        Message::parse(dict).map(Input::Message)
    }
}

/// Shows frames on the screen
pub trait Display {
    fn present(&mut self, frame: &Frame);
}

/// Outbound link to the phone
pub trait Outbox {
    fn send(&mut self, message: &Dictionary<'_>) -> Result<(), SendError>;
}

/// The phone link refused an outbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendError;

/// Platform collaborators the face runs against
pub struct Runtime<C, S, D, O> {
    pub clock: C,
    pub storage: S,
    pub display: D,
    pub outbox: O,
}

impl<C, S, D, O> Runtime<C, S, D, O>
where
    C: Clock,
    S: Storage,
    D: Display,
    O: Outbox,
{
    pub fn new(clock: C, storage: S, display: D, outbox: O) -> Self {
        Self {
            clock,
            storage,
            display,
            outbox,
        }
    }

    /// Restore saved state, show the first frame, then handle inputs until
    /// [`Input::Shutdown`]. Unreadable saved state is skipped; only the final
    /// save can fail the loop.
    pub async fn run<const N: usize>(
        &mut self,
        face: &mut NaturalWatchface,
        inbox: Receiver<'_, NoopRawMutex, Input, N>,
    ) -> Result<(), Error> {
        let now = self.clock.now();
        if let Err(err) = face.load(&self.storage, now) {
            warn!("could not restore saved state: {}", err);
        }
        let update = face.on_minute_tick(now);
        self.apply(face, update);

        loop {
            let input = inbox.receive().await;
            let now = self.clock.now();

            let update = match input {
                Input::Tick => face.on_minute_tick(now),
                Input::Message(message) => face.on_message(message, now),
                Input::Bluetooth(connected) => face.on_bluetooth(connected, now),
                Input::Battery(charge) => face.on_battery(charge, now),
                Input::Shutdown => {
                    face.save(&mut self.storage)?;
                    return Ok(());
                }
            };
            self.apply(face, update);
        }
    }

    fn apply(&mut self, face: &mut NaturalWatchface, mut update: Update) {
        if update.request_data {
            if let Err(SendError) = self.outbox.send(&Dictionary::request()) {
                warn!("failed to send data request");
                update = face.on_request_failed(self.clock.now());
            }
        }
        self.display.present(&update.frame);
    }
}
