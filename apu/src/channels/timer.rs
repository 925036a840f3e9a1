// https://wiki.nesdev.com/w/index.php/APU#Glossary
// Every channel's waveform is clocked by a divider that counts down from an
// 11-bit period and reloads on underflow.
pub struct Timer {
    period: u16,
    cycle: u16,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            period: 0,
            cycle: 0,
        }
    }

    pub fn reset(&mut self) {
        self.period = 0;
        self.cycle = 0;
    }

    pub fn period(&self) -> u16 {
        self.period
    }

    /// Used by the sweep unit and the table-driven channels
    pub fn set_period(&mut self, period: u16) {
        self.period = period & 0x7FF;
    }

    // Writes to the low register only touch the low byte, so the high bits
    // from an earlier high-register write survive
    pub fn set_period_low(&mut self, data: u8) {
        if self.period > 0xFF {
            self.period = (self.period & 0x700) | data as u16;
        } else {
            self.period = data as u16;
        }
    }

    pub fn set_period_high(&mut self, data: u8) {
        self.period = ((data as u16 & 0b111) << 8) | (self.period & 0xFF);
    }

    /// Returns true when the divider wraps
    pub fn step(&mut self) -> bool {
        if self.cycle > 0 {
            self.cycle -= 1;
            false
        } else {
            self.cycle = self.period;
            true
        }
    }
}
