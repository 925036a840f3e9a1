use crate::error::ApuError;

/// Frame sequencer rate
pub const FRAME_RATE: u64 = 240;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApuConfig {
    pub clock_rate: u64,  // CPU cycles per second
    pub sample_rate: u64, // Samples pushed to the audio buffer per second
    pub buffer_capacity: usize,
}

impl ApuConfig {
    pub fn validate(&self) -> Result<(), ApuError> {
        if self.clock_rate < FRAME_RATE {
            return Err(ApuError::InvalidClockRate(self.clock_rate));
        }
        if self.sample_rate == 0 || self.sample_rate > self.clock_rate {
            return Err(ApuError::InvalidSampleRate {
                clock_rate: self.clock_rate,
                sample_rate: self.sample_rate,
            });
        }
        Ok(())
    }

    pub fn cycles_per_frame_step(&self) -> u64 {
        self.clock_rate / FRAME_RATE
    }

    pub fn cycles_per_sample(&self) -> u64 {
        self.clock_rate / self.sample_rate
    }
}

// NTSC
impl Default for ApuConfig {
    fn default() -> Self {
        Self {
            clock_rate: 1_789_773,
            sample_rate: 44_100,
            buffer_capacity: 4096,
        }
    }
}
