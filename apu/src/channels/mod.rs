mod envelope;
mod length_counter;
mod linear_counter;
mod sweep;
mod timer;

pub mod dmc_channel;
pub mod noise_channel;
pub mod pulse_channel;
pub mod triangle_channel;

pub use dmc_channel::{DMCChannel, DMC_STALL_CYCLES};
pub use envelope::Envelope;
pub use length_counter::{LengthCounter, LENGTH_TABLE};
pub use linear_counter::LinearCounter;
pub use noise_channel::NoiseChannel;
pub use pulse_channel::PulseChannel;
pub use sweep::{NegateMode, Sweep};
pub use timer::Timer;
pub use triangle_channel::TriangleChannel;
