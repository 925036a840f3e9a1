bitflags! {
    /// $4015 read value https://wiki.nesdev.com/w/index.php/APU#Status_.28.244015.29
    pub struct StatusRegister: u8 {
        const PULSE1    = 1 << 0;
        const PULSE2    = 1 << 1;
        const TRIANGLE  = 1 << 2;
        const NOISE     = 1 << 3;
        const DMC       = 1 << 4;
        const FRAME_IRQ = 1 << 6;
        const DMC_IRQ   = 1 << 7;
    }
}
