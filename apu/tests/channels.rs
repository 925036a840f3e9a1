use apu::{NegateMode, NoiseChannel, PulseChannel, TriangleChannel};

fn play_pulse(pulse: &mut PulseChannel, period: u8, ticks: usize) -> Vec<u8> {
    let steps_per_tick = period as usize + 1;
    let mut outputs = Vec::new();
    for i in 0..ticks * steps_per_tick {
        pulse.step();
        if i % steps_per_tick == 0 {
            outputs.push(pulse.output());
        }
    }
    outputs
}

#[test]
fn pulse_half_duty_is_four_high_four_low() {
    let mut pulse = PulseChannel::new(NegateMode::TwosComplement);
    pulse.update_register(0, 0b1011_1111); // 50% duty, halt, constant volume 15
    pulse.update_register(2, 0x08);
    pulse.update_register(3, 0x08);

    let outputs = play_pulse(&mut pulse, 0x08, 8);
    assert_eq!(outputs.iter().filter(|&&x| x == 15).count(), 4);
    assert_eq!(outputs.iter().filter(|&&x| x == 0).count(), 4);
    assert_eq!(outputs, vec![15, 15, 15, 15, 0, 0, 0, 0]);
}

#[test]
fn pulse_eighth_duty() {
    let mut pulse = PulseChannel::new(NegateMode::OnesComplement);
    pulse.update_register(0, 0b0011_0111);
    pulse.update_register(2, 0x20);
    pulse.update_register(3, 0x08);

    let outputs = play_pulse(&mut pulse, 0x20, 16);
    assert_eq!(outputs.iter().filter(|&&x| x == 7).count(), 2);
}

#[test]
fn pulse_silent_without_length() {
    let mut pulse = PulseChannel::new(NegateMode::TwosComplement);
    pulse.update_register(0, 0b1011_1111);
    pulse.update_register(2, 0x08);
    assert!(play_pulse(&mut pulse, 0x08, 8).iter().all(|&x| x == 0));
}

#[test]
fn pulse_sweep_mute_keeps_length() {
    let mut pulse = PulseChannel::new(NegateMode::TwosComplement);
    pulse.update_register(0, 0b1011_1111);
    pulse.update_register(1, 0b1000_0001); // Enabled, shift 1
    pulse.update_register(2, 0xFF);
    pulse.update_register(3, 0x0E); // Period 0x6FF, target 0xA7E

    assert!(play_pulse(&mut pulse, 0xFF, 8).iter().all(|&x| x == 0));
    assert!(pulse.length_counter.enabled());
    assert!(pulse.sweep.enabled);

    pulse.do_half();
    pulse.do_half();
    assert_eq!(pulse.timer.period(), 0x6FF);
}

#[test]
fn pulse_envelope_restarts_on_next_quarter_frame() {
    let mut pulse = PulseChannel::new(NegateMode::TwosComplement);
    pulse.update_register(0, 0b1100_0000); // 75% duty, decaying envelope
    pulse.update_register(2, 0x40);
    pulse.update_register(3, 0x08);
    assert_eq!(pulse.envelope.volume(), 0);
    assert!(pulse.envelope.is_restart_pending());

    pulse.do_quarter();
    assert_eq!(pulse.envelope.volume(), 15);
    assert_eq!(pulse.output(), 15); // Step 0 is high at 75%
}

#[test]
fn pulse_register_three_resets_sequence() {
    let mut pulse = PulseChannel::new(NegateMode::TwosComplement);
    pulse.update_register(2, 0x08);
    for _ in 0..30 {
        pulse.step();
    }
    assert_ne!(pulse.sequence_step, 0);
    pulse.update_register(3, 0x00);
    assert_eq!(pulse.sequence_step, 0);
}

#[test]
fn pulse_reset_keeps_negate_mode() {
    let mut pulse = PulseChannel::new(NegateMode::OnesComplement);
    pulse.update_register(0, 0xFF);
    pulse.update_register(3, 0xFF);
    pulse.reset();
    assert_eq!(pulse.timer.period(), 0);
    assert_eq!(pulse.length_counter.counter(), 0);
    assert_eq!(pulse.sweep.negate_mode(), NegateMode::OnesComplement);
}

fn start_triangle(control: bool, linear: u8, period_low: u8) -> TriangleChannel {
    let mut triangle = TriangleChannel::new();
    triangle.update_register(0, ((control as u8) << 7) | linear);
    triangle.update_register(2, period_low);
    triangle.update_register(3, 0x08);
    triangle.do_quarter();
    triangle
}

#[test]
fn triangle_sequence_advances_on_timer() {
    let mut triangle = start_triangle(true, 0x10, 0x04);
    let mut outputs = Vec::new();
    for i in 0..5 * 8 {
        triangle.step();
        if i % 5 == 0 {
            outputs.push(triangle.output());
        }
    }
    assert_eq!(outputs, vec![14, 13, 12, 11, 10, 9, 8, 7]);
}

#[test]
fn triangle_control_reloads_every_quarter() {
    let mut triangle = start_triangle(true, 0x03, 0x40);
    for _ in 0..100 {
        triangle.do_quarter();
        assert_eq!(triangle.linear_counter.counter(), 3);
    }
    assert_eq!(triangle.output(), 15);
}

#[test]
fn triangle_depletes_without_control() {
    let mut triangle = start_triangle(false, 0x03, 0x40);
    assert_eq!(triangle.linear_counter.counter(), 3);
    for _ in 0..10 {
        triangle.do_quarter();
    }
    assert_eq!(triangle.linear_counter.counter(), 0);
    assert_eq!(triangle.output(), 0);

    let before = triangle.sequence_step;
    for _ in 0..1000 {
        triangle.step();
    }
    assert_eq!(triangle.sequence_step, before);

    triangle.update_register(3, 0x08);
    triangle.do_quarter();
    assert_eq!(triangle.linear_counter.counter(), 3);
}

#[test]
fn triangle_ultrasonic_holds_output() {
    let mut triangle = start_triangle(true, 0x10, 0x04);
    for _ in 0..11 {
        triangle.step();
    }
    let held = triangle.output();
    assert_eq!(held, 12);

    triangle.update_register(2, 0x01);
    triangle.update_register(3, 0x08);
    for _ in 0..1000 {
        triangle.step();
    }
    assert_eq!(triangle.output(), held);
}

#[test]
fn triangle_halt_shares_control_bit() {
    let mut triangle = start_triangle(true, 0x10, 0x40);
    for _ in 0..10 {
        triangle.do_half();
    }
    assert_eq!(triangle.length_counter.counter(), 254);

    triangle.update_register(0, 0x10);
    triangle.do_half();
    assert_eq!(triangle.length_counter.counter(), 253);
}

fn noise_bits(noise: &mut NoiseChannel, ticks: usize) -> Vec<u16> {
    // Period index 0 is a divider of two APU cycles, the first step ticks at once
    (0..ticks * 2)
        .filter_map(|i| {
            noise.step();
            if i % 2 == 0 {
                Some(noise.shift & 1)
            } else {
                None
            }
        })
        .collect()
}

#[test]
fn noise_long_mode_sequence() {
    let mut noise = NoiseChannel::new();
    noise.update_register(2, 0x00);

    let mut expected = vec![0; 32];
    expected[14] = 1;
    expected[28] = 1;
    expected[29] = 1;
    assert_eq!(noise_bits(&mut noise, 32), expected);
    assert_eq!(noise.shift, 0x2800);
}

#[test]
fn noise_short_mode_taps_bit_six() {
    let mut noise = NoiseChannel::new();
    noise.update_register(2, 0x80);
    assert!(noise.shift_mode);

    noise_bits(&mut noise, 20);
    assert_eq!(noise.shift, 0x2410);
}

#[test]
fn noise_output_follows_shift_register() {
    let mut noise = NoiseChannel::new();
    noise.update_register(0, 0b0011_1001); // Halt, constant volume 9
    noise.update_register(2, 0x00);
    assert_eq!(noise.output(), 0); // No length loaded yet

    noise.update_register(3, 0x08);
    assert_eq!(noise.output(), 0); // Bit 0 of the reset value is set

    noise.step();
    assert_eq!(noise.shift, 0x4000);
    assert_eq!(noise.output(), 9);

    noise.length_counter.set_enabled(false);
    assert_eq!(noise.output(), 0);
}

#[test]
fn noise_reset_restores_shift_register() {
    let mut noise = NoiseChannel::new();
    noise.update_register(2, 0x80);
    noise_bits(&mut noise, 5);
    noise.reset();
    assert_eq!(noise.shift, 1);
    assert!(!noise.shift_mode);
}
