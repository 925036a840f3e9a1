use crate::channels::timer::Timer;
use memory::Memory;

use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// CPU cycles stolen by each sample fetch. Real hardware takes between 1 and
/// 4 depending on what the CPU is doing; 4 is the common case.
pub const DMC_STALL_CYCLES: u8 = 4;

// https://wiki.nesdev.com/w/index.php/APU_DMC
pub struct DMCChannel {
    pub timer: Timer,
    pub irq_enabled: bool,
    pub loop_flag: bool,
    pub irq: bool,
    pub dac_level: u8,

    pub sample_address: u16,
    pub sample_length: u16,
    current_address: u16,
    bytes_remaining: u16,
    sample_buffer: Option<u8>,

    shift: u8,
    bits_remaining: u8,
    silence: bool,

    stall_cycles: u8,
    dma: Option<Rc<RefCell<dyn Memory>>>,
}

impl DMCChannel {
    pub fn new() -> Self {
        let mut timer = Timer::new();
        timer.set_period(NTSC_RATE_TABLE[0] - 1);

        Self {
            timer,
            irq_enabled: false,
            loop_flag: false,
            irq: false,
            dac_level: 0,

            sample_address: 0xC000,
            sample_length: 1,
            current_address: 0xC000,
            bytes_remaining: 0,
            sample_buffer: None,

            shift: 0,
            bits_remaining: 8,
            silence: true,

            stall_cycles: 0,
            dma: None,
        }
    }

    pub fn set_dma(&mut self, dma: Rc<RefCell<dyn Memory>>) {
        self.dma = Some(dma);
    }

    /// Power-on state; the attached bus is kept
    pub fn reset(&mut self) {
        let dma = self.dma.take();
        *self = Self::new();
        self.dma = dma;
    }

    /// Clocked once per APU cycle (every other CPU cycle)
    pub fn step(&mut self) {
        self.fill_sample_buffer();

        if self.timer.step() {
            self.clock_output();
        }
    }

    fn clock_output(&mut self) {
        if !self.silence {
            if self.shift & 1 == 1 {
                if self.dac_level <= 125 {
                    self.dac_level += 2;
                }
            } else if self.dac_level >= 2 {
                self.dac_level -= 2;
            }
        }
        self.shift >>= 1;

        self.bits_remaining -= 1;
        if self.bits_remaining == 0 {
            self.bits_remaining = 8;
            match self.sample_buffer.take() {
                Some(sample) => {
                    self.silence = false;
                    self.shift = sample;
                }
                None => self.silence = true,
            }
        }
    }

    // The memory reader runs whenever the buffer is empty, independent of the timer
    fn fill_sample_buffer(&mut self) {
        if self.sample_buffer.is_some() || self.bytes_remaining == 0 {
            return;
        }

        let sample = match &self.dma {
            Some(dma) => dma.borrow_mut().read(self.current_address),
            None => return,
        };
        self.sample_buffer = Some(sample);
        self.stall_cycles = self.stall_cycles.saturating_add(DMC_STALL_CYCLES);

        // "If the address exceeds $FFFF, it is wrapped around to $8000"
        self.current_address = if self.current_address == 0xFFFF {
            0x8000
        } else {
            self.current_address + 1
        };

        self.bytes_remaining -= 1;
        if self.bytes_remaining == 0 {
            if self.loop_flag {
                debug!("DMC sample looped at {:#06X}", self.sample_address);
                self.restart();
            } else if self.irq_enabled {
                debug!("DMC sample finished, raising IRQ");
                self.irq = true;
            }
        }
    }

    fn restart(&mut self) {
        self.current_address = self.sample_address;
        self.bytes_remaining = self.sample_length;
    }

    /// Driven by bit 4 of $4015
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.bytes_remaining = 0;
        } else if self.bytes_remaining == 0 {
            self.restart();
        }
    }

    pub fn bytes_remaining(&self) -> u16 {
        self.bytes_remaining
    }

    pub fn current_address(&self) -> u16 {
        self.current_address
    }

    pub fn acknowledge_irq(&mut self) {
        self.irq = false;
    }

    pub fn take_stall_cycles(&mut self) -> u8 {
        let stall = self.stall_cycles;
        self.stall_cycles = 0;
        stall
    }

    pub fn update_register(&mut self, register_offset: u16, data: u8) {
        match register_offset {
            0 => {
                self.irq_enabled = (data >> 7) & 1 == 1;
                self.loop_flag = (data >> 6) & 1 == 1;
                self.timer
                    .set_period(NTSC_RATE_TABLE[data as usize & 0b1111] - 1);
                if !self.irq_enabled {
                    self.irq = false;
                }
            }
            1 => self.dac_level = data & 0b0111_1111,
            2 => self.sample_address = 0xC000 | ((data as u16) << 6),
            3 => self.sample_length = ((data as u16) << 4) + 1,
            _ => unreachable!("DMC register offset {}", register_offset),
        }
    }

    pub fn output(&self) -> u8 {
        self.dac_level
    }
}

// https://wiki.nesdev.com/w/index.php/APU_DMC#Pitch_table
// In APU cycles; the NTSC CPU-cycle rates are twice these: 428, 380, ... 54
const NTSC_RATE_TABLE: [u16; 16] = [
    214, 190, 170, 160, 143, 127, 113, 107, 95, 80, 71, 64, 53, 42, 36, 27,
];
