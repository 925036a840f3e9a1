use crate::channels::{
    envelope::Envelope,
    length_counter::LengthCounter,
    sweep::{NegateMode, Sweep},
    timer::Timer,
};

// https://wiki.nesdev.com/w/index.php/APU_Pulse
pub struct PulseChannel {
    pub timer: Timer,
    pub length_counter: LengthCounter,
    pub envelope: Envelope,
    pub sweep: Sweep,

    pub duty_cycle_select: u8,
    pub sequence_step: u8,
}

impl PulseChannel {
    pub fn new(negate_mode: NegateMode) -> Self {
        Self {
            timer: Timer::new(),
            length_counter: LengthCounter::new(),
            envelope: Envelope::new(),
            sweep: Sweep::new(negate_mode),

            duty_cycle_select: 0,
            sequence_step: 0,
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.length_counter.reset();
        self.envelope.reset();
        self.sweep.reset();
        self.duty_cycle_select = 0;
        self.sequence_step = 0;
    }

    /// Clocked once per APU cycle (every other CPU cycle)
    pub fn step(&mut self) {
        if self.timer.step() {
            self.sequence_step = (self.sequence_step + 1) % 8;
        }
    }

    pub fn do_quarter(&mut self) {
        self.envelope.do_quarter();
    }

    pub fn do_half(&mut self) {
        self.length_counter.do_half();
        self.sweep.do_half(&mut self.timer);
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.duty_cycle_select = data >> 6;
                self.envelope.write(data);
                self.length_counter.halt = self.envelope.loop_flag; // These two share a bit
            }
            1 => self.sweep.write(data),
            2 => self.timer.set_period_low(data),
            3 => {
                self.timer.set_period_high(data);
                self.length_counter.load(data);
                self.envelope.restart();
                self.sequence_step = 0;
            }
            _ => unreachable!("pulse register offset {}", register_offset),
        }
    }

    pub fn output(&self) -> u8 {
        if !self.length_counter.enabled()
            || self.sweep.is_muting(self.timer.period())
            || DUTY_TABLE[self.duty_cycle_select as usize][self.sequence_step as usize] == 0
        {
            0
        } else {
            self.envelope.volume()
        }
    }
}

// https://wiki.nesdev.com/w/index.php/APU_Pulse#Sequencer_behavior
const DUTY_TABLE: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0], // 12.5%
    [0, 1, 1, 0, 0, 0, 0, 0], // 25%
    [0, 1, 1, 1, 1, 0, 0, 0], // 50%
    [1, 0, 0, 1, 1, 1, 1, 1], // 25% negated
];
