use crate::channels::{length_counter::LengthCounter, linear_counter::LinearCounter, timer::Timer};

// https://wiki.nesdev.com/w/index.php/APU_Triangle
pub struct TriangleChannel {
    pub timer: Timer,
    pub length_counter: LengthCounter,
    pub linear_counter: LinearCounter,
    pub sequence_step: u8,
}

impl TriangleChannel {
    pub fn new() -> Self {
        Self {
            timer: Timer::new(),
            length_counter: LengthCounter::new(),
            linear_counter: LinearCounter::new(),
            sequence_step: 0,
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.length_counter.reset();
        self.linear_counter.reset();
        self.sequence_step = 0;
    }

    /// Clocked once per CPU cycle
    pub fn step(&mut self) {
        if self.timer.step()
            && self.length_counter.enabled()
            && self.linear_counter.counter() > 0
            && !self.is_ultrasonic()
        {
            self.sequence_step = (self.sequence_step + 1) % 32;
        }
    }

    pub fn do_quarter(&mut self) {
        self.linear_counter.do_quarter();
    }

    pub fn do_half(&mut self) {
        self.length_counter.do_half();
    }

    // Periods below 2 would sequence far above audible range; the sequencer
    // holds its position so the output stays at its last value
    pub fn is_ultrasonic(&self) -> bool {
        self.timer.period() < 2
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.linear_counter.write(data);
                self.length_counter.halt = self.linear_counter.control; // These two share a bit
            }
            1 => {}
            2 => self.timer.set_period_low(data),
            3 => {
                self.timer.set_period_high(data);
                self.length_counter.load(data);
                self.linear_counter.reload();
            }
            _ => unreachable!("triangle register offset {}", register_offset),
        }
    }

    pub fn output(&self) -> u8 {
        if !self.length_counter.enabled() || self.linear_counter.counter() == 0 {
            0
        } else {
            TRIANGLE_TABLE[self.sequence_step as usize]
        }
    }
}

const TRIANGLE_TABLE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, // Both 0 and 15 are repeated
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
];
