// https://wiki.nesdev.com/w/index.php/APU_Triangle
pub struct LinearCounter {
    pub control: bool, // Shared with the length counter halt flag
    counter: u8,
    reload_value: u8,
    reload: bool,
}

impl LinearCounter {
    pub fn new() -> Self {
        Self {
            control: false,
            counter: 0,
            reload_value: 0,
            reload: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn write(&mut self, data: u8) {
        self.control = (data >> 7) & 1 == 1;
        self.reload_value = data & 0b0111_1111;
    }

    pub fn reload(&mut self) {
        self.reload = true;
    }

    pub fn is_reload_pending(&self) -> bool {
        self.reload
    }

    pub fn counter(&self) -> u8 {
        self.counter
    }

    pub fn do_quarter(&mut self) {
        if self.reload {
            self.counter = self.reload_value;
        } else if self.counter > 0 {
            self.counter -= 1;
        }

        if !self.control {
            self.reload = false;
        }
    }
}
