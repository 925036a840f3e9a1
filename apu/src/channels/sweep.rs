use std::convert::TryFrom;

use crate::channels::timer::Timer;
use crate::error::ApuError;

/// How a negated sweep turns the change amount into a subtraction.
///
/// https://wiki.nesdev.com/w/index.php/APU_Sweep#Calculating_the_target_period
/// "Pulse 1 adds the ones' complement (−c − 1). Pulse 2 adds the two's complement (−c)."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegateMode {
    OnesComplement,
    TwosComplement,
}

impl NegateMode {
    /// Panics on anything other than 0 (pulse 1) or 1 (pulse 2); no real
    /// channel is ever wired any other way.
    pub fn from_raw(mode: u8) -> Self {
        match Self::try_from(mode) {
            Ok(negate_mode) => negate_mode,
            Err(err) => panic!("{}", err),
        }
    }

    fn bias(self) -> u16 {
        match self {
            NegateMode::OnesComplement => 1,
            NegateMode::TwosComplement => 0,
        }
    }
}

impl TryFrom<u8> for NegateMode {
    type Error = ApuError;

    fn try_from(mode: u8) -> Result<Self, Self::Error> {
        match mode {
            0 => Ok(NegateMode::OnesComplement),
            1 => Ok(NegateMode::TwosComplement),
            _ => Err(ApuError::InvalidNegateMode(mode)),
        }
    }
}

// https://wiki.nesdev.com/w/index.php/APU_Sweep
pub struct Sweep {
    negate_mode: NegateMode,
    pub enabled: bool,
    pub period: u8,
    pub negate: bool,
    pub shift: u8,
    reset: bool,
    cycle: u8,
}

impl Sweep {
    pub fn new(negate_mode: NegateMode) -> Self {
        Self {
            negate_mode,
            enabled: false,
            period: 0,
            negate: false,
            shift: 0,
            reset: false,
            cycle: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.negate_mode);
    }

    pub fn negate_mode(&self) -> NegateMode {
        self.negate_mode
    }

    pub fn write(&mut self, data: u8) {
        self.enabled = (data >> 7) & 1 == 1;
        self.period = (data >> 4) & 0b111;
        self.negate = (data >> 3) & 1 == 1;
        self.shift = data & 0b111;
        self.reset = true;
    }

    pub fn is_reset_pending(&self) -> bool {
        self.reset
    }

    /// A shift of zero never moves the period, in either direction
    pub fn target_period(&self, current: u16) -> u16 {
        if self.shift == 0 {
            return current;
        }

        let change = current >> self.shift;
        if self.negate {
            current.saturating_sub(change + self.negate_mode.bias())
        } else {
            current + change
        }
    }

    // Muting only silences the output, it never touches the enable flag
    pub fn is_muting(&self, current: u16) -> bool {
        current < 8 || self.target_period(current) > 0x7FF
    }

    pub fn do_half(&mut self, timer: &mut Timer) {
        if self.reset {
            self.reset = false;
            self.cycle = self.period;
        } else if self.cycle > 0 {
            self.cycle -= 1;
        } else {
            self.cycle = self.period;
            let current = timer.period();
            if self.enabled && !self.is_muting(current) {
                timer.set_period(self.target_period(current));
            }
        }
    }
}
