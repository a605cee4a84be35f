//! The "natural" watchface: sun, moon and daylight on a 24-hour dial

use crate::{
    sky::{
        daylight::compute_day_polygon,
        dial::{marker_frame, point_for_time},
        events::{label, EventKind, EventTable},
        moon::{moon_dial_time, moon_phase, moon_sprite, MoonSprite},
    },
    system::{
        companion::Message,
        config::FaceConfig,
        storage::{PersistedState, Storage},
        time::{Timestamp, TzOffset},
    },
    ui::{
        status::{BatteryCharge, BatteryIcon, NotificationIcon},
        Frame, MoonMarker,
    },
    Error,
};

/// State for the watch face
#[derive(Debug, Clone, PartialEq)]
pub struct WatchfaceState {
    pub events: EventTable,
    /// Unknown until the phone first reports it; blocks event ingestion
    pub tz_offset: Option<TzOffset>,
    /// Time of the last data update, backdated while a request is pending
    pub last_update: Option<Timestamp>,
    /// The phone side has reported `ready`
    pub companion_ready: bool,
    pub request_in_flight: bool,
    pub companion_failed: bool,
    pub bluetooth_connected: bool,
    pub battery: BatteryCharge,
    /// Sprite currently shown for the moon
    pub moon_sprite: Option<MoonSprite>,
}

impl Default for WatchfaceState {
    fn default() -> Self {
        Self {
            events: EventTable::new(),
            tz_offset: None,
            last_update: None,
            companion_ready: false,
            request_in_flight: false,
            companion_failed: false,
            bluetooth_connected: true,
            battery: BatteryCharge::default(),
            moon_sprite: None,
        }
    }
}

/// Outcome of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub frame: Frame,
    /// Send a data request to the phone
    pub request_data: bool,
}

pub struct NaturalWatchface {
    config: FaceConfig,
    state: WatchfaceState,
}

impl NaturalWatchface {
    pub fn new(config: FaceConfig) -> Self {
        Self {
            config,
            state: WatchfaceState::default(),
        }
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn state(&self) -> &WatchfaceState {
        &self.state
    }

    /// True if data was never fetched or the refresh interval has passed
    pub fn time_to_refresh(&self, now: Timestamp) -> bool {
        self.state
            .last_update
            .map_or(true, |last| now - last >= self.config.refresh_interval)
    }

    /// Claim the single outstanding request slot.
    ///
    /// Returns `false` if a request is already in flight. On success the
    /// refresh timer is backdated, so the next tick after a reply, a failed
    /// send or a reply timeout may ask again.
    pub fn request_data(&mut self, now: Timestamp) -> bool {
        if self.state.request_in_flight {
            return false;
        }
        self.state.request_in_flight = true;
        self.state.last_update = Some(now - self.config.refresh_interval);
        true
    }

    /// Minute tick: move the sun and moon, expire passed events, redraw
    pub fn on_minute_tick(&mut self, now: Timestamp) -> Update {
        self.state.events.roll_past_due(now);
        self.expire_request(now);

        let request_data =
            self.time_to_refresh(now) && self.state.companion_ready && self.request_data(now);

        self.update(now, request_data)
    }

    /// Release a request that has waited a full refresh interval for its
    /// reply. `last_update` was backdated by one interval when it was sent.
    fn expire_request(&mut self, now: Timestamp) {
        let timeout = 2 * self.config.refresh_interval;
        if self.state.request_in_flight
            && self.state.last_update.is_some_and(|last| now - last >= timeout)
        {
            warn!("no reply to data request, asking again");
            self.state.request_in_flight = false;
        }
    }

    pub fn on_message(&mut self, message: Message, now: Timestamp) -> Update {
        debug!("message {}", message);
        let mut request_data = false;

        match message {
            Message::Ready => {
                self.state.companion_ready = true;
                request_data = self.request_data(now);
            }
            Message::Reporting {
                tz_offset,
                sunrise,
                sunset,
            } => {
                self.state.request_in_flight = false;
                self.state.companion_failed = false;
                if tz_offset.is_some() {
                    self.state.tz_offset = tz_offset;
                }

                if let Some(tz) = self.state.tz_offset {
                    self.state.events.roll_past_due(now);
                    for (kind, utc) in [(EventKind::Sunrise, sunrise), (EventKind::Sunset, sunset)] {
                        if let Some(utc) = utc {
                            self.state.events.assign(kind, tz.to_local(utc), now);
                        }
                    }
                    self.state.events.roll_past_due(now);
                } else if sunrise.is_some() || sunset.is_some() {
                    warn!("timezone offset unknown, dropping sunrise/sunset");
                }

                self.state.last_update = Some(now);
            }
            Message::Failed { tz_offset } => {
                self.state.request_in_flight = false;
                self.state.companion_failed = true;
                if tz_offset.is_some() {
                    self.state.tz_offset = tz_offset;
                }
                // Retry after the shorter error interval.
                self.state.last_update =
                    Some(now - (self.config.refresh_interval - self.config.error_retry));
            }
        }

        self.update(now, request_data)
    }

    pub fn on_bluetooth(&mut self, connected: bool, now: Timestamp) -> Update {
        debug!("bluetooth connected={}", connected);
        self.state.bluetooth_connected = connected;
        if !connected {
            self.state.request_in_flight = false;
        }
        self.update(now, false)
    }

    pub fn on_battery(&mut self, charge: BatteryCharge, now: Timestamp) -> Update {
        debug!("battery {}% charging={}", charge.percent, charge.charging);
        self.state.battery = charge;
        self.update(now, false)
    }

    /// The outbound request could not be sent; free the request slot
    pub fn on_request_failed(&mut self, now: Timestamp) -> Update {
        self.state.request_in_flight = false;
        self.update(now, false)
    }

    /// Persist the reconciled state. Nothing is written while the timezone
    /// offset is unknown; returns whether anything was saved.
    pub fn save<S: Storage>(&self, storage: &mut S) -> Result<bool, Error> {
        let Some(tz_offset) = self.state.tz_offset else {
            info!("timezone offset unknown, not saving");
            return Ok(false);
        };

        PersistedState {
            events: self.state.events,
            last_update: self.state.last_update,
            tz_offset,
        }
        .save(storage)?;
        info!("state saved");
        Ok(true)
    }

    /// Restore a saved state if storage holds a complete one
    pub fn load<S: Storage>(&mut self, storage: &S, now: Timestamp) -> Result<bool, Error> {
        let Some(saved) = PersistedState::load(storage)? else {
            return Ok(false);
        };

        info!("loading state from storage");
        self.state.events = saved.events;
        self.state.tz_offset = Some(saved.tz_offset);
        self.state.last_update = saved.last_update;
        self.state.events.roll_past_due(now);
        Ok(true)
    }

    fn update(&mut self, now: Timestamp, request_data: bool) -> Update {
        Update {
            frame: self.compose(now),
            request_data,
        }
    }

    fn compose(&mut self, now: Timestamp) -> Frame {
        let config = &self.config;
        let ring = config.marker_radius();

        let sun = marker_frame(
            point_for_time(now, ring, config.center),
            config.sun_diameter,
        );

        let moon = self.state.tz_offset.map(|tz| {
            let phase = moon_phase(now, tz);
            let sprite = moon_sprite(phase, now);
            let sprite_changed = self.state.moon_sprite != Some(sprite);
            self.state.moon_sprite = Some(sprite);
            MoonMarker {
                frame: marker_frame(
                    point_for_time(moon_dial_time(now, phase), ring, config.center),
                    config.moon_diameter,
                ),
                sprite,
                sprite_changed,
            }
        });

        Frame {
            clock: label(Some(now)),
            sun,
            moon,
            daylight: compute_day_polygon(now, &self.state.events, config),
            events: self.state.events.labels(),
            notification: NotificationIcon::select(
                self.state.bluetooth_connected,
                self.state.request_in_flight,
                self.state.companion_failed,
            ),
            battery: BatteryIcon::for_charge(self.state.battery),
        }
    }
}
