//! The lit ("day") part of the face

use embedded_graphics::{
    geometry::Point,
    prelude::*,
    primitives::{PrimitiveStyle, Triangle},
};
use heapless::Vec;

use super::{
    dial::point_for_time,
    events::{EventKind, EventTable},
};
use crate::system::{config::FaceConfig, time::Timestamp};

/// Upper bound on the number of polygon vertices
pub const MAX_POINTS: usize = 7;

pub type Polygon = Vec<Point, MAX_POINTS>;

/// Region of the face to fill as daylight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayRegion {
    /// Nothing lit
    Night,
    /// The whole face: top-left, top-right, bottom-right, bottom-left
    FullDay([Point; 4]),
    /// Center, sunrise, left edge, top-left, top-right, right edge, sunset
    Terminator([Point; 7]),
}

impl DayRegion {
    /// Every pixel of the face, corners inclusive
    pub fn full_day(config: &FaceConfig) -> Self {
        let (right, bottom) = (config.width() - 1, config.height() - 1);
        DayRegion::FullDay([
            Point::new(0, 0),
            Point::new(right, 0),
            Point::new(right, bottom),
            Point::new(0, bottom),
        ])
    }

    /// Day side bounded by the dial radii through sunrise and sunset.
    ///
    /// Only meaningful for a sunrise before noon and a sunset after it.
    pub fn terminator(sunrise: Point, sunset: Point, config: &FaceConfig) -> Self {
        let w = config.width();
        DayRegion::Terminator([
            config.center,
            sunrise,
            Point::new(0, sunrise.y),
            Point::new(0, 0),
            Point::new(w, 0),
            Point::new(w, sunset.y),
            sunset,
        ])
    }

    /// Closed point list, empty for [`DayRegion::Night`]
    pub fn points(&self) -> Polygon {
        let slice: &[Point] = match self {
            DayRegion::Night => &[],
            DayRegion::FullDay(points) => points,
            DayRegion::Terminator(points) => points,
        };
        // At most MAX_POINTS by construction.
        Vec::from_slice(slice).unwrap_or_default()
    }

    pub fn is_night(&self) -> bool {
        matches!(self, DayRegion::Night)
    }

    /// Fill the region as a fan of triangles around its first point.
    ///
    /// Both polygon shapes are star-shaped around their first vertex, so
    /// the fan covers them exactly.
    pub fn draw<D>(&self, target: &mut D, color: D::Color) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        let points = self.points();
        let style = PrimitiveStyle::with_fill(color);
        if let Some((first, rest)) = points.split_first() {
            for pair in rest.windows(2) {
                Triangle::new(*first, pair[0], pair[1])
                    .into_styled(style)
                    .draw(target)?;
            }
        }
        Ok(())
    }
}

/// Day region for `now` from the reconciled sunrise and sunset state
pub fn compute_day_polygon(now: Timestamp, events: &EventTable, config: &FaceConfig) -> DayRegion {
    let sunrise = events.get(EventKind::Sunrise);
    let sunset = events.get(EventKind::Sunset);

    // Both within a day: draw the terminator.
    if let (Some(rise), Some(set)) = (sunrise.effective(now), sunset.effective(now)) {
        return DayRegion::terminator(
            point_for_time(rise, config.dial_radius, config.center),
            point_for_time(set, config.dial_radius, config.center),
            config,
        );
    }

    // Both more than a day away: perpetual day or night until the sooner one.
    if let (Some(next_rise), Some(next_set)) =
        (sunrise.next_beyond_day(now), sunset.next_beyond_day(now))
    {
        debug!("24h day/night: next rise {}, next set {}", next_rise, next_set);
        return if next_rise < next_set {
            DayRegion::full_day(config)
        } else {
            DayRegion::Night
        };
    }

    // Set recently and no rise for over a day.
    if sunset.previous_within_day(now).is_some() && sunrise.next_beyond_day(now).is_some() {
        return DayRegion::Night;
    }

    // Rose recently and no set for over a day.
    if sunrise.previous_within_day(now).is_some() && sunset.next_beyond_day(now).is_some() {
        return DayRegion::full_day(config);
    }

    // Not enough information; show day.
    DayRegion::full_day(config)
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor};

    use super::*;
    use crate::{
        sky::events::EventState,
        system::time::{SECONDS_PER_DAY, SECONDS_PER_HOUR},
    };

    // 10:00 on the watch clock
    const NOW: Timestamp = Timestamp::from_secs(100 * SECONDS_PER_DAY + 10 * SECONDS_PER_HOUR);

    fn table(sunrise: EventState, sunset: EventState) -> EventTable {
        let mut table = EventTable::new();
        *table.get_mut(EventKind::Sunrise) = sunrise;
        *table.get_mut(EventKind::Sunset) = sunset;
        table
    }

    fn at(offset_hours: i64) -> Option<Timestamp> {
        Some(NOW + offset_hours * SECONDS_PER_HOUR)
    }

    #[test]
    fn terminator_between_sunrise_and_sunset() {
        let config = FaceConfig::default();
        // previous sunrise at 06:00, next sunset at 18:00
        let events = table(
            EventState { previous: at(-4), next: None },
            EventState { previous: None, next: at(8) },
        );

        let region = compute_day_polygon(NOW, &events, &config);
        let DayRegion::Terminator(points) = region else {
            panic!("expected a terminator, got {:?}", region);
        };
        assert_eq!(points[0], config.center);
        assert!(points[1].x < config.center.x);
        assert!(points[6].x > config.center.x);
        assert_eq!(points[1], Point::new(0, 84));
        assert_eq!(points[2], Point::new(0, 84));
        assert_eq!(points[3], Point::new(0, 0));
        assert_eq!(points[4], Point::new(144, 0));
        assert_eq!(points[5], Point::new(144, 84));
        assert_eq!(points[6], Point::new(144, 84));
        assert_eq!(region.points().len(), 7);
    }

    #[test]
    fn polar_night() {
        let config = FaceConfig::default();
        let events = table(
            EventState { previous: None, next: at(24 * 5) },
            EventState { previous: None, next: at(30) },
        );
        let region = compute_day_polygon(NOW, &events, &config);
        assert!(region.is_night());
        assert!(region.points().is_empty());
    }

    #[test]
    fn polar_day() {
        let config = FaceConfig::default();
        let events = table(
            EventState { previous: None, next: at(30) },
            EventState { previous: None, next: at(24 * 5) },
        );
        assert_eq!(
            compute_day_polygon(NOW, &events, &config),
            DayRegion::full_day(&config)
        );
    }

    #[test]
    fn recent_sunset_with_distant_sunrise_is_night() {
        let config = FaceConfig::default();
        let events = table(
            EventState { previous: None, next: at(40) },
            EventState { previous: at(-2), next: None },
        );
        assert!(compute_day_polygon(NOW, &events, &config).is_night());
    }

    #[test]
    fn recent_sunrise_with_distant_sunset_is_day() {
        let config = FaceConfig::default();
        let events = table(
            EventState { previous: at(-2), next: None },
            EventState { previous: None, next: at(40) },
        );
        assert_eq!(
            compute_day_polygon(NOW, &events, &config),
            DayRegion::full_day(&config)
        );
    }

    #[test]
    fn no_data_fails_open_to_day() {
        let config = FaceConfig::default();
        let region = compute_day_polygon(NOW, &EventTable::new(), &config);
        assert_eq!(region, DayRegion::full_day(&config));
        assert_eq!(
            region.points().as_slice(),
            &[
                Point::new(0, 0),
                Point::new(143, 0),
                Point::new(143, 167),
                Point::new(0, 167)
            ]
        );
    }

    #[test]
    fn stale_data_fails_open_to_day() {
        let config = FaceConfig::default();
        let events = table(
            EventState { previous: at(-50), next: None },
            EventState { previous: at(-40), next: None },
        );
        assert_eq!(
            compute_day_polygon(NOW, &events, &config),
            DayRegion::full_day(&config)
        );
    }

    #[test]
    fn draw_fills_top_and_leaves_bottom() {
        let config = FaceConfig::for_size(Size::new(64, 64));
        // sunrise 06:00, sunset 18:00
        let region = DayRegion::terminator(
            point_for_time(NOW - 4 * SECONDS_PER_HOUR, config.dial_radius, config.center),
            point_for_time(NOW + 8 * SECONDS_PER_HOUR, config.dial_radius, config.center),
            &config,
        );

        let mut display = MockDisplay::<BinaryColor>::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        region.draw(&mut display, BinaryColor::On).unwrap();

        assert_eq!(display.get_pixel(Point::new(32, 10)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(3, 10)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(32, 55)), None);
    }

    #[test]
    fn full_day_covers_face_without_leaving_it() {
        let config = FaceConfig::for_size(Size::new(64, 64));
        let mut display = MockDisplay::<BinaryColor>::new();
        display.set_allow_overdraw(true);
        DayRegion::full_day(&config)
            .draw(&mut display, BinaryColor::On)
            .unwrap();

        for corner in [(0, 0), (63, 0), (63, 63), (0, 63), (32, 32)] {
            assert_eq!(
                display.get_pixel(Point::new(corner.0, corner.1)),
                Some(BinaryColor::On)
            );
        }
    }

    #[test]
    fn night_draws_nothing() {
        let mut display = MockDisplay::<BinaryColor>::new();
        DayRegion::Night.draw(&mut display, BinaryColor::On).unwrap();
        assert_eq!(display.get_pixel(Point::new(0, 0)), None);
    }
}
