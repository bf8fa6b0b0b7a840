//! Property-based tests for machine invariants.
//!
//! These use proptest to check flag arithmetic, timers, register block transfers and
//! sprite drawing across arbitrary inputs.

use emu8::{Chip8, FrameBuffer, NoKeys};
use proptest::prelude::*;

/// A machine with `program` loaded at 0x200
fn setup(program: &[u16]) -> Chip8 {
    let bytes: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
    let mut chip8 = Chip8::with_seed(0);
    chip8.load_rom(&mut bytes.as_slice()).unwrap();
    chip8
}

fn lit(frame: &FrameBuffer) -> usize {
    frame.rows().iter().flatten().filter(|&&p| p == 1).count()
}

proptest! {
    #[test]
    fn prop_add_sets_carry_iff_sum_exceeds_byte(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = setup(&[0x8014]);
        chip8.state_mut().registers.v[0x0] = a;
        chip8.state_mut().registers.v[0x1] = b;
        chip8.cycle(&NoKeys).unwrap();

        let sum = u16::from(a) + u16::from(b);
        let registers = &chip8.state().registers;
        prop_assert_eq!(registers.v[0x0], (sum & 0xFF) as u8);
        prop_assert_eq!(registers.v[0xF], u8::from(sum > 0xFF));
    }

    #[test]
    fn prop_sub_sets_flag_iff_strictly_greater(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = setup(&[0x8015, 0x8237]);
        chip8.state_mut().registers.v[0x0] = a;
        chip8.state_mut().registers.v[0x1] = b;
        chip8.state_mut().registers.v[0x2] = a;
        chip8.state_mut().registers.v[0x3] = b;
        chip8.cycle(&NoKeys).unwrap();
        prop_assert_eq!(chip8.state().registers.v[0x0], a.wrapping_sub(b));
        prop_assert_eq!(chip8.state().registers.v[0xF], u8::from(a > b));

        // SUBN V2, V3
        chip8.cycle(&NoKeys).unwrap();
        prop_assert_eq!(chip8.state().registers.v[0x2], b.wrapping_sub(a));
        prop_assert_eq!(chip8.state().registers.v[0xF], u8::from(b > a));
    }

    #[test]
    fn prop_timers_never_go_below_zero(delay in any::<u8>(), sound in any::<u8>(), ticks in 0usize..600) {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state_mut().timers.delay = delay;
        chip8.state_mut().timers.sound = sound;
        for _ in 0..ticks {
            chip8.tick_timers();
        }
        let timers = chip8.state().timers;
        prop_assert_eq!(usize::from(timers.delay), usize::from(delay).saturating_sub(ticks));
        prop_assert_eq!(usize::from(timers.sound), usize::from(sound).saturating_sub(ticks));
    }

    #[test]
    fn prop_store_then_read_restores_registers(
        x in 0u8..16,
        values in proptest::array::uniform16(any::<u8>()),
        i in 0x300u16..0xF00,
    ) {
        let store = 0xF055 | u16::from(x) << 8;
        let read = 0xF065 | u16::from(x) << 8;
        let mut chip8 = setup(&[store, read]);
        chip8.state_mut().registers.v = values;
        chip8.state_mut().registers.i = i;

        chip8.cycle(&NoKeys).unwrap();
        chip8.state_mut().registers.v = [0; 16];
        chip8.cycle(&NoKeys).unwrap();

        let x = usize::from(x);
        prop_assert_eq!(&chip8.state().registers.v[..=x], &values[..=x]);
        prop_assert!(chip8.state().registers.v[x + 1..].iter().all(|&v| v == 0));
        prop_assert_eq!(chip8.state().registers.i, i);
    }

    #[test]
    fn prop_drawing_twice_erases_sprite(
        sprite in proptest::collection::vec(1u8..=255, 1..=15),
        x in 0u8..56,
        y in 0u8..17,
    ) {
        // DRW V0, V1, n twice
        let draw = 0xD010 | sprite.len() as u16;
        let mut chip8 = setup(&[draw, draw]);
        {
            let state = chip8.state_mut();
            state.registers.v[0x0] = x;
            state.registers.v[0x1] = y;
            state.registers.i = 0x300;
            state.memory.slice_mut(0x300, sprite.len()).unwrap().copy_from_slice(&sprite);
        }

        chip8.cycle(&NoKeys).unwrap();
        let expected: usize = sprite.iter().map(|row| row.count_ones() as usize).sum();
        prop_assert_eq!(lit(&chip8.state().frame_buffer), expected);
        prop_assert_eq!(chip8.state().registers.v[0xF], 0);

        chip8.cycle(&NoKeys).unwrap();
        prop_assert_eq!(lit(&chip8.state().frame_buffer), 0);
        prop_assert_eq!(chip8.state().registers.v[0xF], 1);
    }
}
