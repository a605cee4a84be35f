//! Draw a [`Frame`] with embedded-graphics

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Text},
};

use super::Frame;
use crate::system::config::FaceConfig;

const MARGIN: i32 = 2;

/// Draw the whole face: night background, daylight, clock, markers and,
/// in debug mode, the event labels in the corners
pub fn draw_frame<D>(frame: &Frame, config: &FaceConfig, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;
    frame.daylight.draw(target, BinaryColor::On)?;

    let clock_style = MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::Off)
        .background_color(BinaryColor::On)
        .build();
    let clock_position = config.center - Point::new(0, config.dial_radius / 2);
    Text::with_alignment(&frame.clock, clock_position, clock_style, Alignment::Center)
        .draw(target)?;

    draw_marker(
        frame.sun,
        PrimitiveStyleBuilder::new()
            .fill_color(BinaryColor::On)
            .stroke_color(BinaryColor::Off)
            .stroke_width(1)
            .build(),
        target,
    )?;

    if let Some(moon) = &frame.moon {
        draw_marker(
            moon.frame,
            PrimitiveStyleBuilder::new()
                .fill_color(BinaryColor::Off)
                .stroke_color(BinaryColor::On)
                .stroke_width(1)
                .build(),
            target,
        )?;
    }

    if config.debug_labels {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let (w, h) = (config.width(), config.height());
        let top = FONT_6X10.character_size.height as i32;
        let bottom = h - MARGIN;
        let labels = [
            (&frame.events.prev_sunrise, Point::new(MARGIN, top), Alignment::Left),
            (&frame.events.next_sunrise, Point::new(w - MARGIN, top), Alignment::Right),
            (&frame.events.prev_sunset, Point::new(MARGIN, bottom), Alignment::Left),
            (&frame.events.next_sunset, Point::new(w - MARGIN, bottom), Alignment::Right),
        ];
        for (text, position, alignment) in labels {
            Text::with_alignment(text, position, style, alignment).draw(target)?;
        }
    }

    Ok(())
}

fn draw_marker<D>(
    frame: Rectangle,
    style: PrimitiveStyle<BinaryColor>,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::new(frame.top_left, frame.size.width)
        .into_styled(style)
        .draw(target)
}
