use crate::channels::{envelope::Envelope, length_counter::LengthCounter, timer::Timer};

// https://wiki.nesdev.com/w/index.php/APU_Noise
pub struct NoiseChannel {
    pub timer: Timer,
    pub length_counter: LengthCounter,
    pub envelope: Envelope,

    pub shift: u16,
    pub shift_mode: bool,
}

impl NoiseChannel {
    pub fn new() -> Self {
        Self {
            timer: Timer::new(),
            length_counter: LengthCounter::new(),
            envelope: Envelope::new(),

            shift: 1,
            shift_mode: false,
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.length_counter.reset();
        self.envelope.reset();
        self.shift = 1;
        self.shift_mode = false;
    }

    /// Clocked once per APU cycle (every other CPU cycle)
    pub fn step(&mut self) {
        if self.timer.step() {
            // 1. Feedback is calculated as the exclusive-OR of bit 0 and one other bit: bit 6 if Mode flag is set, otherwise bit 1.
            // 2. The shift register is shifted right by one bit.
            // 3. Bit 14, the leftmost bit, is set to the feedback calculated earlier.
            let feedback_xor_bit_index = if self.shift_mode { 6 } else { 1 };
            let feedback_xor_bit = (self.shift >> feedback_xor_bit_index) & 1;
            let feedback = (self.shift & 1) ^ feedback_xor_bit;
            self.shift = (self.shift >> 1) | (feedback << 14);
        }
    }

    pub fn do_quarter(&mut self) {
        self.envelope.do_quarter();
    }

    pub fn do_half(&mut self) {
        self.length_counter.do_half();
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.envelope.write(data);
                self.length_counter.halt = self.envelope.loop_flag; // These two share a bit
            }
            1 => {}
            2 => {
                // The divider runs for period + 1 APU cycles
                self.timer
                    .set_period(NTSC_PERIOD_TABLE[data as usize & 0b1111] - 1);
                self.shift_mode = (data >> 7) & 1 == 1;
            }
            3 => {
                self.length_counter.load(data);
                self.envelope.restart();
            }
            _ => unreachable!("noise register offset {}", register_offset),
        }
    }

    pub fn output(&self) -> u8 {
        if self.shift & 1 == 1 || !self.length_counter.enabled() {
            0
        } else {
            self.envelope.volume()
        }
    }
}

// https://wiki.nesdev.com/w/index.php/APU_Noise
// NTSC periods in CPU cycles are twice these: 4, 8, 16, ... 2034, 4068
const NTSC_PERIOD_TABLE: [u16; 16] = [
    0x002, 0x004, 0x008, 0x010, 0x020, 0x030, 0x040, 0x050, 0x065, 0x07F, 0x0BE, 0x0FE, 0x17D,
    0x1FC, 0x3F9, 0x7F2,
];
