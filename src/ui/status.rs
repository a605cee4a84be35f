//! Battery and connection status icons

/// Charge state as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryCharge {
    /// Battery percentage
    pub percent: u8,
    /// Charging state
    pub charging: bool,
}

impl Default for BatteryCharge {
    fn default() -> Self {
        Self {
            percent: 100,
            charging: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryIcon {
    Charging,
    Full,
    P80,
    P60,
    P40,
    P20,
    P10,
}

impl BatteryIcon {
    pub fn for_charge(charge: BatteryCharge) -> Self {
        if charge.charging {
            return BatteryIcon::Charging;
        }

        match charge.percent {
            81.. => BatteryIcon::Full,
            61..=80 => BatteryIcon::P80,
            41..=60 => BatteryIcon::P60,
            21..=40 => BatteryIcon::P40,
            11..=20 => BatteryIcon::P20,
            _ => BatteryIcon::P10,
        }
    }
}

/// Icon in the notification corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotificationIcon {
    Empty,
    /// A data request is in flight
    Refresh,
    /// The phone reported a failure
    Error,
    NoBluetooth,
}

impl NotificationIcon {
    pub fn select(bluetooth_connected: bool, request_in_flight: bool, failed: bool) -> Self {
        if !bluetooth_connected {
            NotificationIcon::NoBluetooth
        } else if request_in_flight {
            NotificationIcon::Refresh
        } else if failed {
            NotificationIcon::Error
        } else {
            NotificationIcon::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(percent: u8) -> BatteryIcon {
        BatteryIcon::for_charge(BatteryCharge {
            percent,
            charging: false,
        })
    }

    #[test]
    fn battery_thresholds() {
        assert_eq!(icon(100), BatteryIcon::Full);
        assert_eq!(icon(81), BatteryIcon::Full);
        assert_eq!(icon(80), BatteryIcon::P80);
        assert_eq!(icon(61), BatteryIcon::P80);
        assert_eq!(icon(60), BatteryIcon::P60);
        assert_eq!(icon(40), BatteryIcon::P40);
        assert_eq!(icon(20), BatteryIcon::P20);
        assert_eq!(icon(11), BatteryIcon::P20);
        assert_eq!(icon(10), BatteryIcon::P10);
        assert_eq!(icon(0), BatteryIcon::P10);
    }

    #[test]
    fn charging_overrides_level() {
        let charge = BatteryCharge {
            percent: 5,
            charging: true,
        };
        assert_eq!(BatteryIcon::for_charge(charge), BatteryIcon::Charging);
    }

    #[test]
    fn notification_priority() {
        assert_eq!(
            NotificationIcon::select(false, true, true),
            NotificationIcon::NoBluetooth
        );
        assert_eq!(
            NotificationIcon::select(true, true, true),
            NotificationIcon::Refresh
        );
        assert_eq!(
            NotificationIcon::select(true, false, true),
            NotificationIcon::Error
        );
        assert_eq!(
            NotificationIcon::select(true, false, false),
            NotificationIcon::Empty
        );
    }
}
