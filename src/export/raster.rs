//! Raster capture of the render surface.
//!
//! The surface is drawn into an off-screen ratatui `Buffer`, then every cell
//! is painted as a block of pixels: background fill first, then an 8x8 glyph
//! from `font8x8` stretched to the cell height.

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS};
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};

use super::error::ExportError;
use crate::ui::RenderSurface;

/// Cell size in pixels at scale 1
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

/// Upper bound on captured pixels (width * height)
pub const MAX_PIXELS: u64 = 64_000_000;

/// Capture settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Integer upscale factor applied to every cell
    pub scale: u32,
    /// Leave cells without a background color transparent instead of white
    pub preserve_background: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2,
            preserve_background: true,
        }
    }
}

/// RGBA8 pixel data, row-major, top row first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Image filled with one RGBA value
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, rgba: [u8; 4]) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y..y_end {
            let row = py as usize * self.width as usize;
            for px in x..x_end {
                let i = (row + px as usize) * 4;
                self.pixels[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }

    /// Color channels without alpha
    pub fn rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect()
    }

    /// Alpha channel only
    pub fn alpha_bytes(&self) -> Vec<u8> {
        self.pixels.chunks_exact(4).map(|p| p[3]).collect()
    }

    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks_exact(4).any(|p| p[3] != 255)
    }
}

/// Something that can turn a render surface into pixels
pub trait RasterCapture: Send + Sync {
    fn capture(
        &self,
        surface: &RenderSurface,
        options: CaptureOptions,
    ) -> Result<RasterImage, ExportError>;
}

/// Rasterizes the surface through an off-screen ratatui buffer
#[derive(Debug, Default, Clone, Copy)]
pub struct BufferRasterizer;

impl RasterCapture for BufferRasterizer {
    fn capture(
        &self,
        surface: &RenderSurface,
        options: CaptureOptions,
    ) -> Result<RasterImage, ExportError> {
        if surface.width == 0 || surface.height() == 0 {
            return Err(ExportError::Capture("render surface is empty".to_string()));
        }
        rasterize(&surface.to_buffer(), options)
    }
}

/// Paint every buffer cell into a new image
pub fn rasterize(buffer: &Buffer, options: CaptureOptions) -> Result<RasterImage, ExportError> {
    let scale = options.scale.clamp(1, 8);
    let cell_w = CELL_WIDTH * scale;
    let cell_h = CELL_HEIGHT * scale;
    let area = buffer.area;
    let width = area.width as u64 * cell_w as u64;
    let height = area.height as u64 * cell_h as u64;

    if width * height > MAX_PIXELS {
        return Err(ExportError::CaptureTooLarge {
            width,
            height,
            limit: MAX_PIXELS,
        });
    }

    let empty = if options.preserve_background {
        [0, 0, 0, 0]
    } else {
        [255, 255, 255, 255]
    };
    let mut image = RasterImage::filled(width as u32, height as u32, empty);

    for row in 0..area.height {
        for col in 0..area.width {
            let cell = &buffer[(area.x + col, area.y + row)];
            let x = col as u32 * cell_w;
            let y = row as u32 * cell_h;

            if let Some([r, g, b]) = to_rgb(cell.bg) {
                image.fill_rect(x, y, cell_w, cell_h, [r, g, b, 255]);
            }

            let Some(ch) = cell.symbol().chars().next() else {
                continue;
            };
            if ch == ' ' {
                continue;
            }
            let [r, g, b] = to_rgb(cell.fg).unwrap_or([0, 0, 0]);
            let bold = cell.modifier.contains(Modifier::BOLD);
            draw_glyph(&mut image, x, y, scale, glyph(ch), [r, g, b, 255], bold);
        }
    }

    Ok(image)
}

/// Glyph bitmap for `ch`; unknown characters render as '?'
fn glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| fallback_glyph(ch))
        .unwrap_or_else(|| BASIC_FONTS.get('?').unwrap_or([0; 8]))
}

// Punctuation the bundled fonts do not carry
fn fallback_glyph(ch: char) -> Option<[u8; 8]> {
    match ch {
        '—' | '–' => Some([0, 0, 0, 0xFF, 0, 0, 0, 0]),
        '•' => Some([0, 0, 0x18, 0x3C, 0x3C, 0x18, 0, 0]),
        '×' => Some([0, 0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0]),
        _ => None,
    }
}

/// Each glyph row covers two pixel rows so the 8x8 bitmap fills an 8x16 cell
fn draw_glyph(
    image: &mut RasterImage,
    x: u32,
    y: u32,
    scale: u32,
    bitmap: [u8; 8],
    rgba: [u8; 4],
    bold: bool,
) {
    let row_h = (CELL_HEIGHT / 8) * scale;
    for (gy, bits) in bitmap.iter().enumerate() {
        for gx in 0..8u32 {
            // bit 0 is the leftmost pixel
            if bits & (1 << gx) == 0 {
                continue;
            }
            let px = x + gx * scale;
            let py = y + gy as u32 * row_h;
            image.fill_rect(px, py, scale, row_h, rgba);
            if bold && gx < 7 {
                image.fill_rect(px + scale, py, scale, row_h, rgba);
            }
        }
    }
}

/// Map a terminal color to RGB; `Reset` has no fixed value
pub fn to_rgb(color: Color) -> Option<[u8; 3]> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(i) => indexed(i),
        Color::Black => ANSI[0],
        Color::Red => ANSI[1],
        Color::Green => ANSI[2],
        Color::Yellow => ANSI[3],
        Color::Blue => ANSI[4],
        Color::Magenta => ANSI[5],
        Color::Cyan => ANSI[6],
        Color::Gray => ANSI[7],
        Color::DarkGray => ANSI[8],
        Color::LightRed => ANSI[9],
        Color::LightGreen => ANSI[10],
        Color::LightYellow => ANSI[11],
        Color::LightBlue => ANSI[12],
        Color::LightMagenta => ANSI[13],
        Color::LightCyan => ANSI[14],
        Color::White => ANSI[15],
    };
    Some(rgb)
}

/// xterm default palette for the 16 named colors
const ANSI: [[u8; 3]; 16] = [
    [0, 0, 0],
    [205, 49, 49],
    [13, 188, 121],
    [229, 229, 16],
    [36, 114, 200],
    [188, 63, 188],
    [17, 168, 205],
    [229, 229, 229],
    [102, 102, 102],
    [241, 76, 76],
    [35, 209, 139],
    [245, 245, 67],
    [59, 142, 234],
    [214, 112, 214],
    [41, 184, 219],
    [255, 255, 255],
];

/// xterm 256-color palette
fn indexed(i: u8) -> [u8; 3] {
    match i {
        0..=15 => ANSI[i as usize],
        16..=231 => {
            const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
            let n = i - 16;
            [
                LEVELS[(n / 36) as usize],
                LEVELS[((n / 6) % 6) as usize],
                LEVELS[(n % 6) as usize],
            ]
        }
        _ => {
            let v = 8 + 10 * (i - 232);
            [v, v, v]
        }
    }
}
