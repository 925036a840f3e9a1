use crate::Memory;

/// Byte-addressed storage mapped at `start`. Addresses past the end mirror
/// back to the beginning, the way a 16 KiB PRG bank fills $8000-$FFFF.
pub struct RAM {
    pub memory: Vec<u8>,
    pub start: u16,
}

impl RAM {
    pub fn new(size: usize, start: u16) -> Self {
        RAM {
            memory: vec![0; size],
            start,
        }
    }

    pub fn from_bytes(memory: Vec<u8>, start: u16) -> Self {
        RAM { memory, start }
    }

    fn index(&self, addr: u16) -> usize {
        addr.wrapping_sub(self.start) as usize % self.memory.len()
    }
}

impl Memory for RAM {
    fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn peek(&self, addr: u16) -> u8 {
        if self.memory.is_empty() {
            return 0;
        }
        self.memory[self.index(addr)]
    }

    fn write(&mut self, addr: u16, data: u8) {
        if self.memory.is_empty() {
            return;
        }
        let index = self.index(addr);
        self.memory[index] = data;
    }
}
