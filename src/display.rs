use std::fmt;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Monochrome 64x32 pixel grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bit_buffer: [[bool; WIDTH]; HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: [[false; WIDTH]; HEIGHT],
        }
    }

    pub fn clear_buffer(&mut self) {
        self.bit_buffer = [[false; WIDTH]; HEIGHT];
    }

    /// Panics unless `x < WIDTH` and `y < HEIGHT`.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bit_buffer[y][x]
    }

    /// Panics unless `x < WIDTH` and `y < HEIGHT`.
    pub fn set(&mut self, x: usize, y: usize, lit: bool) {
        self.bit_buffer[y][x] = lit;
    }

    pub fn rows(&self) -> &[[bool; WIDTH]; HEIGHT] {
        &self.bit_buffer
    }

    pub fn lit_count(&self) -> usize {
        self.bit_buffer.iter().flatten().filter(|p| **p).count()
    }

    /// XORs `sprite` onto the grid with its top-left corner at (x, y).
    ///
    /// The origin wraps around the screen; anything hanging past the right or
    /// bottom edge is clipped. Returns true if a lit pixel was switched off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let (x, y) = (x as usize % WIDTH, y as usize % HEIGHT);
        let mut vf = false;
        for (i, row) in sprite.iter().enumerate() {
            let ny = y + i;
            if ny >= HEIGHT {
                break;
            }
            for j in 0..8 {
                let nx = x + j;
                if nx >= WIDTH {
                    break;
                }
                if (row >> (7 - j)) & 1 == 0 {
                    continue;
                }
                let pixel = &mut self.bit_buffer[ny][nx];
                if *pixel {
                    vf = true;
                }
                *pixel = !*pixel;
            }
        }
        vf
    }
}

/// `#` for lit, `.` for unlit, one line per row.
impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.bit_buffer {
            for lit in row {
                f.write_str(if *lit { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
