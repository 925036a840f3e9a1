use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApuError {
    #[error("no APU register at {0:#06X}")]
    UnmappedRegister(u16),
    #[error("invalid sweep negate mode {0}, expected 0 or 1")]
    InvalidNegateMode(u8),
    #[error("sample rate {sample_rate} Hz must be nonzero and at most the clock rate {clock_rate} Hz")]
    InvalidSampleRate { clock_rate: u64, sample_rate: u64 },
    #[error("clock rate {0} Hz is too slow to drive the 240 Hz frame sequencer")]
    InvalidClockRate(u64),
}
