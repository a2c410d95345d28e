/// 8-bit countdown, one tick per executed instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn new(init_count: u8) -> Self {
        Self { count: init_count }
    }

    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn get(&self) -> u8 {
        self.count
    }

    /// Decrements unless already at zero.
    pub fn tick(&mut self) {
        if self.count > 0 {
            self.count -= 1;
        }
    }
}
