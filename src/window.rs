use anyhow::{Context, Result};
use chip8vm::display::{FrameBuffer, HEIGHT, WIDTH};
use minifb::{Key, KeyRepeat, Scale, Window, WindowOptions};

const LIT: u32 = from_u8_rgb(0, 127, 255);
const UNLIT: u32 = from_u8_rgb(0, 0, 0);

const fn from_u8_rgb(r: u8, g: u8, b: u8) -> u32 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    (r << 16) | (g << 8) | b
}

/// Copies the frame buffer into a packed RGB pixel buffer.
pub fn rasterize(fb: &FrameBuffer, pixel_buffer: &mut [u32]) {
    for (y, row) in fb.rows().iter().enumerate() {
        for (x, lit) in row.iter().enumerate() {
            pixel_buffer[y * WIDTH + x] = if *lit { LIT } else { UNLIT };
        }
    }
}

pub struct Screen {
    pixel_buffer: Vec<u32>,
    window: Window,
}

impl Screen {
    pub fn new(scale: u32) -> Result<Self> {
        let scale = match scale {
            1 => Scale::X1,
            2 => Scale::X2,
            4 => Scale::X4,
            8 => Scale::X8,
            16 => Scale::X16,
            _ => Scale::X32,
        };
        let mut window = Window::new(
            "chip8vm - ESC to exit",
            WIDTH,
            HEIGHT,
            WindowOptions {
                scale,
                ..WindowOptions::default()
            },
        )
        .context("failed to open window")?;
        // Limit to max ~60 fps update rate
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600)));
        Ok(Self {
            pixel_buffer: vec![UNLIT; WIDTH * HEIGHT],
            window,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_pressed(Key::Escape, KeyRepeat::Yes)
    }

    pub fn redraw(&mut self, fb: &FrameBuffer) {
        rasterize(fb, &mut self.pixel_buffer);
    }

    /// Presents the pixel buffer and pumps window events. Blocks to hold ~60 fps.
    pub fn sync(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.pixel_buffer, WIDTH, HEIGHT)
            .context("failed to update window")
    }
}
