//! Position/angle telemetry in the bottom-left corner.

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::framebuffer::{Framebuffer, to_rgb888};

pub const TEXT_COLOR: u32 = 0x00FF_FFFF;
pub const FONT: &MonoFont<'static> = &FONT_10X20;

const MARGIN: i32 = 10;
const LINE_GAP: i32 = 4;

pub fn format_position(x: f32, y: f32) -> String {
    format!("Position: ({x:.2}, {y:.2})")
}

pub fn format_angle(angle: f32) -> String {
    format!("Angle: {:.2} degrees", angle.to_degrees())
}

/// Text with its top-left corner at `(x, y)`.
fn label(text: &str, x: i32, y: i32) -> Text<'_, MonoTextStyle<'static, Rgb888>> {
    let style = MonoTextStyle::new(FONT, to_rgb888(TEXT_COLOR));
    Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
}

/// Two telemetry lines anchored to the bottom-left corner.
pub fn draw_overlay(buf: &mut Framebuffer, x: f32, y: f32, angle: f32) {
    let bottom = buf.height as i32;
    let line_h = FONT.character_size.height as i32 + LINE_GAP;
    let position = format_position(x, y);
    let heading = format_angle(angle);

    let _ = label(&position, MARGIN, bottom - 2 * line_h - MARGIN).draw(buf);
    let _ = label(&heading, MARGIN, bottom - line_h - MARGIN).draw(buf);
}
