// https://wiki.nesdev.com/w/index.php/APU_Length_Counter
pub struct LengthCounter {
    counter: u8,
    pub halt: bool, // Shared with the envelope loop flag or the linear counter control flag
}

impl LengthCounter {
    pub fn new() -> Self {
        Self {
            counter: 0,
            halt: false,
        }
    }

    pub fn reset(&mut self) {
        self.counter = 0;
        self.halt = false;
    }

    pub fn do_half(&mut self) {
        if !self.halt && self.counter > 0 {
            self.counter -= 1;
        }
    }

    pub fn enabled(&self) -> bool {
        self.counter > 0
    }

    /// Disabling silences the channel at once; enabling leaves the counter alone
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.counter = 0;
        }
    }

    /// Takes the whole register byte, the table index lives in the top five bits
    pub fn load(&mut self, data: u8) {
        self.counter = LENGTH_TABLE[(data >> 3) as usize & 0b1_1111];
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }
}

// https://wiki.nesdev.com/w/index.php/APU_Length_Counter#Table_structure
pub const LENGTH_TABLE: [u8; 0x20] = [
    0x0A, 0xFE, 0x14, 0x02, 0x28, 0x04, 0x50, 0x06, 0xA0, 0x08, 0x3C, 0x0A, 0x0E, 0x0C, 0x1A, 0x0E,
    0x0C, 0x10, 0x18, 0x12, 0x30, 0x14, 0x60, 0x16, 0xC0, 0x18, 0x48, 0x1A, 0x10, 0x1C, 0x20, 0x1E,
];
