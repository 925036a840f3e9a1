pub mod ram;

/// A CPU-visible address space. The APU reads DMC samples through this.
pub trait Memory {
    fn read(&mut self, addr: u16) -> u8;
    /// Reads without side effects
    fn peek(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}
