//! Utilities for drawing.
//!
//! Charts are drawn with embedded-graphics onto an in-memory [Framebuffer],
//! then encoded into a [VisualArtifact].

use std::{convert::Infallible, io::Cursor};

use embedded_graphics::{
    mono_font::MonoTextStyle,
    prelude::Point,
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Rgb888, RgbColor},
    Pixel,
};
use image::{ImageOutputFormat, Rgb, RgbImage};

// Named colors, as CSS / matplotlib define them.
pub const GREEN: Rgb888 = Rgb888::new(0x00, 0x80, 0x00);
pub const YELLOW: Rgb888 = Rgb888::new(0xFF, 0xFF, 0x00);
pub const ORANGE: Rgb888 = Rgb888::new(0xFF, 0xA5, 0x00);
pub const RED: Rgb888 = Rgb888::new(0xFF, 0x00, 0x00);
pub const DARK_RED: Rgb888 = Rgb888::new(0x8B, 0x00, 0x00);
pub const LIGHT_GREY: Rgb888 = Rgb888::new(0xD3, 0xD3, 0xD3);
pub const SKY_BLUE: Rgb888 = Rgb888::new(0x87, 0xCE, 0xEB);

/// Encoding of a [VisualArtifact].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
        }
    }
}

/// A rendered, encoded image. The caller owns it.
#[derive(Clone, PartialEq, Eq)]
pub struct VisualArtifact {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for VisualArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualArtifact")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// An error in producing a [VisualArtifact].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("encoding image: {0}")]
    Encode(#[from] image::ImageError),
}

/// An RGB pixel buffer that embedded-graphics can draw on.
///
/// Pixels drawn outside the buffer are dropped.
pub struct Framebuffer {
    image: RgbImage,
}

impl Framebuffer {
    /// A buffer of the given size, filled with white.
    pub fn new(size: Size) -> Self {
        Framebuffer {
            image: RgbImage::from_pixel(size.width, size.height, Rgb([0xFF, 0xFF, 0xFF])),
        }
    }

    /// Color at the given point, if it is within the buffer.
    pub fn pixel(&self, p: Point) -> Option<Rgb888> {
        let x = u32::try_from(p.x).ok()?;
        let y = u32::try_from(p.y).ok()?;
        let Rgb([r, g, b]) = *self.image.get_pixel_checked(x, y)?;
        Some(Rgb888::new(r, g, b))
    }

    /// Encode the buffer's contents.
    pub fn encode(&self, format: ImageFormat) -> Result<VisualArtifact, RenderError> {
        let mut bytes = Vec::new();
        let output = match format {
            ImageFormat::Png => ImageOutputFormat::Png,
        };
        self.image.write_to(&mut Cursor::new(&mut bytes), output)?;
        tracing::debug!(
            "encoded {}x{} {:?}: {} bytes",
            self.image.width(),
            self.image.height(),
            format,
            bytes.len()
        );
        Ok(VisualArtifact {
            format,
            width: self.image.width(),
            height: self.image.height(),
            bytes,
        })
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(p.x), u32::try_from(p.y)) else {
                continue;
            };
            if x < self.image.width() && y < self.image.height() {
                self.image
                    .put_pixel(x, y, Rgb([color.r(), color.g(), color.b()]));
            }
        }
        Ok(())
    }
}

/// Draw a line of text anchored at `at`, vertically centered on it.
pub fn label<D>(
    target: &mut D,
    text: &str,
    at: Point,
    style: MonoTextStyle<'_, Rgb888>,
    alignment: Alignment,
) where
    D: DrawTarget<Color = Rgb888, Error = Infallible>,
{
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, at, style, text_style)
        .draw(target)
        .expect("infallible");
}
