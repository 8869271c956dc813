//! Horizontal bar chart of pollutant concentrations.

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{
        iso_8859_1::{FONT_6X10, FONT_7X13_BOLD},
        MonoTextStyle,
    },
    pixelcolor::{Rgb888, RgbColor},
    primitives::{Line, Primitive, PrimitiveStyle, Rectangle},
    text::Alignment,
    Drawable,
};

use crate::{
    atmosphere::PollutantReading,
    drawing::{label, Framebuffer, ImageFormat, RenderError, VisualArtifact, SKY_BLUE},
};

pub const TITLE: &str = "Pollutant Concentrations";
pub const AXIS_LABEL: &str = "Concentration (µg/m³)";

const WIDTH: u32 = 480;
const MARGIN: u32 = 10;
const TITLE_HEIGHT: u32 = 24;
const BAR_PITCH: u32 = 20;
const BAR_HEIGHT: u32 = 14;
// Tick labels, then the axis label.
const AXIS_HEIGHT: u32 = 36;
// Room past the end of the axis for the last tick label.
const RIGHT_PAD: u32 = 20;
const CHAR_WIDTH: u32 = 6;
// Longer pollutant names are shortened so the plot keeps its width.
const MAX_LABEL_CHARS: usize = 16;

/// One pollutant's bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub name: String,
    /// `name`, shortened to fit beside the plot.
    pub label: String,
    pub value: f64,
    pub area: Rectangle,
}

/// Where everything in the chart goes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub size: Size,
    /// Region the bars are drawn in; bars start at its left edge.
    pub plot: Rectangle,
    /// Concentration at the right edge of the plot.
    pub scale_max: f64,
    /// One bar per pollutant, top to bottom in reading order.
    pub bars: Vec<Bar>,
}

/// Shorten a name to at most [MAX_LABEL_CHARS] characters, marking the cut.
fn bar_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        return name.to_owned();
    }
    let mut label: String = name.chars().take(MAX_LABEL_CHARS - 1).collect();
    label.push('~');
    label
}

/// Lay out a chart for the reading.
///
/// Every pollutant gets a bar, even if its concentration rounds to nothing.
pub fn layout(reading: &PollutantReading) -> ChartLayout {
    let label_width = reading
        .iter()
        .map(|(name, _)| name.chars().count().min(MAX_LABEL_CHARS) as u32 * CHAR_WIDTH)
        .max()
        .unwrap_or(0)
        .max(4 * CHAR_WIDTH)
        + 8;
    let left = MARGIN + label_width;
    let top = MARGIN + TITLE_HEIGHT;
    let plot_size = Size::new(
        WIDTH.saturating_sub(left + MARGIN + RIGHT_PAD),
        reading.len() as u32 * BAR_PITCH,
    );
    let plot = Rectangle::new(Point::new(left as i32, top as i32), plot_size);

    let scale_max = reading
        .iter()
        .map(|(_, v)| v)
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(0.0, f64::max);
    let scale_max = if scale_max > 0.0 { scale_max } else { 1.0 };

    let bars = reading
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let fraction = (value.max(0.0) / scale_max).min(1.0);
            let length = (fraction * plot_size.width as f64).round() as u32;
            let y = top + i as u32 * BAR_PITCH + (BAR_PITCH - BAR_HEIGHT) / 2;
            Bar {
                name: name.to_owned(),
                label: bar_label(name),
                value,
                area: Rectangle::new(
                    Point::new(left as i32, y as i32),
                    Size::new(length, BAR_HEIGHT),
                ),
            }
        })
        .collect();

    ChartLayout {
        size: Size::new(WIDTH, top + plot_size.height + AXIS_HEIGHT + MARGIN),
        plot,
        scale_max,
        bars,
    }
}

fn tick_label(v: f64) -> String {
    if v >= 10.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Draw the laid-out chart.
pub fn draw(chart: &ChartLayout, fb: &mut Framebuffer) {
    let text = MonoTextStyle::new(&FONT_6X10, Rgb888::BLACK);
    let axis = PrimitiveStyle::with_stroke(Rgb888::BLACK, 1);
    let plot = chart.plot;
    let bottom = plot.top_left.y + plot.size.height as i32;

    label(
        fb,
        TITLE,
        Point::new(chart.size.width as i32 / 2, (MARGIN + TITLE_HEIGHT / 2) as i32),
        MonoTextStyle::new(&FONT_7X13_BOLD, Rgb888::BLACK),
        Alignment::Center,
    );

    for bar in &chart.bars {
        let center_y = bar.area.top_left.y + BAR_HEIGHT as i32 / 2;
        label(
            fb,
            &bar.label,
            Point::new(plot.top_left.x - 4, center_y),
            text,
            Alignment::Right,
        );
        bar.area
            .into_styled(PrimitiveStyle::with_fill(SKY_BLUE))
            .draw(fb)
            .expect("infallible");
    }

    Line::new(plot.top_left, Point::new(plot.top_left.x, bottom))
        .into_styled(axis)
        .draw(fb)
        .expect("infallible");
    let right = plot.top_left.x + plot.size.width as i32;
    Line::new(
        Point::new(plot.top_left.x, bottom),
        Point::new(right, bottom),
    )
    .into_styled(axis)
    .draw(fb)
    .expect("infallible");

    for fraction in [0.0, 0.5, 1.0] {
        let x = plot.top_left.x + (fraction * plot.size.width as f64).round() as i32;
        Line::new(Point::new(x, bottom), Point::new(x, bottom + 3))
            .into_styled(axis)
            .draw(fb)
            .expect("infallible");
        label(
            fb,
            &tick_label(fraction * chart.scale_max),
            Point::new(x, bottom + 10),
            text,
            Alignment::Center,
        );
    }

    label(
        fb,
        AXIS_LABEL,
        Point::new(plot.top_left.x + plot.size.width as i32 / 2, bottom + 26),
        text,
        Alignment::Center,
    );
}

/// Render a bar chart of the reading, one bar per pollutant in reading order.
pub fn render(reading: &PollutantReading) -> Result<VisualArtifact, RenderError> {
    let chart = layout(reading);
    let mut fb = Framebuffer::new(chart.size);
    draw(&chart, &mut fb);
    fb.encode(ImageFormat::Png)
}
