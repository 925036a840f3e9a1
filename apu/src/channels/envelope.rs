// https://wiki.nesdev.com/w/index.php/APU_Envelope
pub struct Envelope {
    pub constant_volume: bool,
    pub loop_flag: bool,
    start: bool,
    period: u8, // Either the constant volume or envelope period
    timer: u8,
    decay_counter: u8,
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            constant_volume: false,
            loop_flag: false,
            start: false,
            period: 0,
            timer: 0,
            decay_counter: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Decodes the low six bits of a channel's first register. The caller
    /// copies the loop flag into its length counter's halt flag.
    pub fn write(&mut self, data: u8) {
        self.loop_flag = (data >> 5) & 1 == 1;
        self.constant_volume = (data >> 4) & 1 == 1;
        self.period = data & 0b1111;
    }

    // Takes effect on the next quarter frame, not immediately
    pub fn restart(&mut self) {
        self.start = true;
    }

    pub fn is_restart_pending(&self) -> bool {
        self.start
    }

    pub fn do_quarter(&mut self) {
        if self.start {
            self.start = false;
            self.decay_counter = 15;
            self.timer = self.period;
        } else if self.timer > 0 {
            self.timer -= 1;
        } else {
            self.timer = self.period;
            if self.decay_counter > 0 {
                self.decay_counter -= 1;
            } else if self.loop_flag {
                self.decay_counter = 15;
            }
        }
    }

    pub fn volume(&self) -> u8 {
        if self.constant_volume {
            self.period
        } else {
            self.decay_counter
        }
    }
}
