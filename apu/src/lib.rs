#[macro_use]
extern crate bitflags;

pub mod channels;
mod config;
mod error;
mod status_register;

pub use channels::*;
pub use config::{ApuConfig, FRAME_RATE};
pub use error::ApuError;
pub use status_register::StatusRegister;

use log::{debug, trace, warn};
use memory::Memory;

use std::cell::RefCell;
use std::rc::Rc;

/// Largest value `APU::mix` can produce: four 4-bit channels plus the 7-bit DMC
pub const MAX_MIX: u16 = 15 * 4 + 127;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    FourStep,
    FiveStep,
}

impl FrameMode {
    fn step_count(self) -> u8 {
        match self {
            FrameMode::FourStep => 4,
            FrameMode::FiveStep => 5,
        }
    }
}

// http://www.slack.net/~ant/nes-emu/apu_ref.txt
pub struct APU {
    pub pulse1: PulseChannel,
    pub pulse2: PulseChannel,
    pub triangle: TriangleChannel,
    pub noise: NoiseChannel,
    pub dmc: DMCChannel,

    config: ApuConfig,
    even_latch: bool,
    frame_counter_cycle: u64,
    frame_mode: FrameMode,
    frame_sequence_step: u8,
    sample_cycle: u64,
    bus_latch: u8,

    irq_disable: bool,
    frame_irq: bool,

    audio_buff: Vec<f32>,
}

impl APU {
    pub fn new() -> Self {
        Self::build(ApuConfig::default())
    }

    pub fn with_config(config: ApuConfig) -> Result<Self, ApuError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ApuConfig) -> Self {
        Self {
            pulse1: PulseChannel::new(NegateMode::OnesComplement),
            pulse2: PulseChannel::new(NegateMode::TwosComplement),
            triangle: TriangleChannel::new(),
            noise: NoiseChannel::new(),
            dmc: DMCChannel::new(),

            audio_buff: Vec::with_capacity(config.buffer_capacity),
            config,
            even_latch: true,
            frame_counter_cycle: 0,
            frame_mode: FrameMode::FourStep,
            frame_sequence_step: 0,
            sample_cycle: 0,
            bus_latch: 0,

            irq_disable: false,
            frame_irq: false,
        }
    }

    pub fn config(&self) -> &ApuConfig {
        &self.config
    }

    pub fn frame_mode(&self) -> FrameMode {
        self.frame_mode
    }

    pub fn set_dma(&mut self, dma: Rc<RefCell<dyn Memory>>) {
        self.dmc.set_dma(dma);
    }

    /// CPU cycles the DMC has stolen since the last call
    pub fn take_stall_cycles(&mut self) -> u8 {
        self.dmc.take_stall_cycles()
    }

    pub fn check_irq(&self) -> bool {
        self.dmc.irq || self.frame_irq
    }

    pub fn reset(&mut self) {
        self.pulse1.reset();
        self.pulse2.reset();
        self.triangle.reset();
        self.noise.reset();
        self.dmc.reset();

        self.even_latch = true;
        self.frame_counter_cycle = 0;
        self.frame_mode = FrameMode::FourStep;
        self.frame_sequence_step = 0;
        self.sample_cycle = 0;
        self.bus_latch = 0;

        self.irq_disable = false;
        self.frame_irq = false;
        self.audio_buff.clear();
    }

    /// Advances the APU by one CPU cycle
    pub fn tick(&mut self) {
        // The triangle is clocked by the CPU clock directly
        // The pulse, noise, and DMC channels are clocked on even cycles
        self.triangle.step();
        if self.even_latch {
            self.pulse1.step();
            self.pulse2.step();
            self.noise.step();
            self.dmc.step();
        }
        self.even_latch = !self.even_latch;

        // The frame counter divides the clock to ~240 Hz
        // which feeds a variable-step sequencer, which controls
        // length counters, sweep units, envelopes, the linear counter, and interrupts
        self.frame_counter_cycle += 1;
        if self.frame_counter_cycle >= self.config.cycles_per_frame_step() {
            self.frame_counter_cycle = 0;
            self.clock_frame_sequencer();
        }

        self.sample_cycle += 1;
        if self.sample_cycle >= self.config.cycles_per_sample() {
            self.sample_cycle = 0;
            if self.audio_buff.len() < self.config.buffer_capacity {
                let sample = self.mix() as f32 / MAX_MIX as f32;
                self.audio_buff.push(sample);
            }
        }
    }

    // https://wiki.nesdev.com/w/index.php/APU_Frame_Counter
    // mode 0:    mode 1:       function
    // ---------  -----------  -----------------------------
    //  - - - f    - - - - -    IRQ (if bit 6 is clear)
    //  - l - l    - l - - l    Length counter and sweep
    //  e e e e    e e e - e    Envelope and linear counter
    fn clock_frame_sequencer(&mut self) {
        let step = self.frame_sequence_step;
        let (quarter, half) = match (self.frame_mode, step) {
            (FrameMode::FourStep, 1) | (FrameMode::FourStep, 3) => (true, true),
            (FrameMode::FiveStep, 1) | (FrameMode::FiveStep, 4) => (true, true),
            (FrameMode::FiveStep, 3) => (false, false),
            _ => (true, false),
        };

        if quarter {
            self.quarter_frame();
        }
        if half {
            self.half_frame();
        }

        if self.frame_mode == FrameMode::FourStep && step == 3 && !self.irq_disable {
            self.frame_irq = true;
        }

        self.frame_sequence_step = (step + 1) % self.frame_mode.step_count();
    }

    fn quarter_frame(&mut self) {
        self.pulse1.do_quarter();
        self.pulse2.do_quarter();
        self.triangle.do_quarter();
        self.noise.do_quarter();
    }

    fn half_frame(&mut self) {
        self.pulse1.do_half();
        self.pulse2.do_half();
        self.triangle.do_half();
        self.noise.do_half();
    }

    /// Linear sum of the channel outputs, 0 to `MAX_MIX`
    pub fn mix(&self) -> u16 {
        self.pulse1.output() as u16
            + self.pulse2.output() as u16
            + self.triangle.output() as u16
            + self.noise.output() as u16
            + self.dmc.output() as u16
    }

    pub fn take_audio_buff(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.audio_buff)
    }

    pub fn status(&self) -> StatusRegister {
        let mut status = StatusRegister::empty();
        status.set(StatusRegister::PULSE1, self.pulse1.length_counter.enabled());
        status.set(StatusRegister::PULSE2, self.pulse2.length_counter.enabled());
        status.set(StatusRegister::TRIANGLE, self.triangle.length_counter.enabled());
        status.set(StatusRegister::NOISE, self.noise.length_counter.enabled());
        status.set(StatusRegister::DMC, self.dmc.bytes_remaining() > 0);
        status.set(StatusRegister::FRAME_IRQ, self.frame_irq);
        status.set(StatusRegister::DMC_IRQ, self.dmc.irq);
        status
    }

    // https://wiki.nesdev.com/w/index.php/APU_registers
    pub fn write_register(&mut self, addr: u16, data: u8) -> Result<(), ApuError> {
        trace!("APU write {:#06X} <- {:#04X}", addr, data);

        match addr {
            0x4000..=0x4003 => self.pulse1.update_register(addr - 0x4000, data),
            0x4004..=0x4007 => self.pulse2.update_register(addr - 0x4004, data),
            0x4008..=0x400B => self.triangle.update_register(addr - 0x4008, data),
            0x400C..=0x400F => self.noise.update_register(addr - 0x400C, data),
            0x4010..=0x4013 => self.dmc.update_register(addr - 0x4010, data),
            0x4015 => {
                self.dmc.acknowledge_irq();
                self.pulse1.length_counter.set_enabled(data & 1 == 1);
                self.pulse2.length_counter.set_enabled((data >> 1) & 1 == 1);
                self.triangle.length_counter.set_enabled((data >> 2) & 1 == 1);
                self.noise.length_counter.set_enabled((data >> 3) & 1 == 1);
                self.dmc.set_enabled((data >> 4) & 1 == 1);
            }
            0x4017 => self.write_frame_counter(data),
            _ => return Err(ApuError::UnmappedRegister(addr)),
        }

        self.bus_latch = data;
        Ok(())
    }

    fn write_frame_counter(&mut self, data: u8) {
        self.frame_counter_cycle = 0;
        self.frame_sequence_step = 0;

        // "If the mode flag is clear, the 4-step sequence is selected, otherwise the
        // 5-step sequence is selected and the sequencer is immediately clocked once."
        self.frame_mode = if data >> 7 == 1 {
            FrameMode::FiveStep
        } else {
            FrameMode::FourStep
        };
        debug!("frame sequencer set to {:?}", self.frame_mode);

        if self.frame_mode == FrameMode::FiveStep {
            self.quarter_frame();
            self.half_frame();
        }

        self.irq_disable = (data >> 6) & 1 == 1;
        if self.irq_disable {
            self.frame_irq = false;
        }
    }
}

impl Default for APU {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory for APU {
    fn read(&mut self, addr: u16) -> u8 {
        if addr != 0x4015 {
            return self.bus_latch;
        }

        let data = self.peek(addr);
        self.frame_irq = false;
        self.bus_latch = data;
        data
    }

    fn peek(&self, addr: u16) -> u8 {
        if addr != 0x4015 {
            return self.bus_latch;
        }

        self.status().bits()
    }

    fn write(&mut self, addr: u16, data: u8) {
        if let Err(err) = self.write_register(addr, data) {
            warn!("{}", err);
        }
    }
}
