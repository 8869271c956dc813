//! Half-disc gauge showing the air quality index.

use std::f64::consts::PI;

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{
        iso_8859_1::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::{Rgb888, RgbColor},
    primitives::{Circle, Line, Primitive, PrimitiveStyle, Rectangle},
    text::Alignment,
    Drawable,
};

use crate::{
    assessment::Category,
    drawing::{
        label, Framebuffer, ImageFormat, RenderError, VisualArtifact, DARK_RED, GREEN, LIGHT_GREY,
        ORANGE, RED, YELLOW,
    },
};

/// Tick labels, left to right around the arc.
pub const TICKS: [&str; 6] = ["0", "50", "100", "150", "200", "300"];

const SIZE: Size = Size::new(360, 210);
const CENTER: Point = Point::new(180, 180);
const RADIUS: u32 = 150;

/// Fraction of the gauge that is filled: `min(index / 5, 1)`, and never
/// less than empty.
pub fn fill_fraction(index: i32) -> f32 {
    (index as f32 / 5.0).clamp(0.0, 1.0)
}

/// Fill color for an index's category.
///
/// Indices with no category are drawn as the most severe.
pub fn fill_color(index: i32) -> Rgb888 {
    match Category::from_index(index) {
        Some(Category::Good) => GREEN,
        Some(Category::Fair) => YELLOW,
        Some(Category::Moderate) => ORANGE,
        Some(Category::Poor) => RED,
        Some(Category::VeryPoor) | None => DARK_RED,
    }
}

/// Where the `i`th tick sits, `r` pixels from the center.
///
/// Ticks run clockwise from the left end of the arc (angle PI) to the
/// right end (angle 0), so "0" reads on the left. A polar plot with
/// default settings would start at 0 radians, putting "0" on the right.
fn tick_point(i: usize, r: f64) -> Point {
    let theta = PI * (1.0 - i as f64 / (TICKS.len() - 1) as f64);
    Point::new(
        CENTER.x + (r * theta.cos()).round() as i32,
        CENTER.y - (r * theta.sin()).round() as i32,
    )
}

/// A gauge for one index.
///
/// The filled region is a half-disc concentric with the background,
/// its radius the fill fraction of the full radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gauge {
    pub index: i32,
    pub fraction: f32,
    pub color: Rgb888,
}

impl Gauge {
    pub fn new(index: i32) -> Self {
        Gauge {
            index,
            fraction: fill_fraction(index),
            color: fill_color(index),
        }
    }

    pub fn size(&self) -> Size {
        SIZE
    }

    pub fn center(&self) -> Point {
        CENTER
    }

    /// Radius of the background half-disc.
    pub fn radius(&self) -> u32 {
        RADIUS
    }

    /// Radius of the filled half-disc.
    pub fn fill_radius(&self) -> u32 {
        (self.fraction * RADIUS as f32).round() as u32
    }

    /// Draw the gauge onto the buffer.
    pub fn draw(&self, fb: &mut Framebuffer) {
        Circle::with_center(CENTER, 2 * RADIUS + 1)
            .into_styled(PrimitiveStyle::with_fill(LIGHT_GREY))
            .draw(fb)
            .expect("infallible");
        let fill = self.fill_radius();
        if fill > 0 {
            Circle::with_center(CENTER, 2 * fill + 1)
                .into_styled(PrimitiveStyle::with_fill(self.color))
                .draw(fb)
                .expect("infallible");
        }
        // Keep only the upper half of both discs.
        let below = CENTER.y + 1;
        Rectangle::new(
            Point::new(0, below),
            Size::new(SIZE.width, SIZE.height - below as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(Rgb888::WHITE))
        .draw(fb)
        .expect("infallible");

        let ticks = MonoTextStyle::new(&FONT_6X10, Rgb888::BLACK);
        let stroke = PrimitiveStyle::with_stroke(Rgb888::BLACK, 1);
        let r = RADIUS as f64;
        for (i, text) in TICKS.iter().enumerate() {
            Line::new(tick_point(i, r), tick_point(i, r + 5.0))
                .into_styled(stroke)
                .draw(fb)
                .expect("infallible");
            label(fb, text, tick_point(i, r + 14.0), ticks, Alignment::Center);
        }

        label(
            fb,
            &format!("AQI: {}", self.index),
            Point::new(CENTER.x, CENTER.y - RADIUS as i32 / 2),
            MonoTextStyle::new(&FONT_10X20, Rgb888::BLACK),
            Alignment::Center,
        );
    }
}

/// Render the gauge for an index.
pub fn render(index: i32) -> Result<VisualArtifact, RenderError> {
    let gauge = Gauge::new(index);
    let mut fb = Framebuffer::new(gauge.size());
    gauge.draw(&mut fb);
    fb.encode(ImageFormat::Png)
}
