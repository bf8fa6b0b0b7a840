//! Runs small hand-assembled programs through the whole machine.

use emu8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8::{Chip8, Fault, FrameBuffer, KeyState, NoKeys};

fn load(program: &[u16]) -> Chip8 {
    let bytes: Vec<u8> = program.iter().flat_map(|op| op.to_be_bytes()).collect();
    let mut chip8 = Chip8::with_seed(1);
    let loaded = chip8.load_rom(&mut bytes.as_slice()).unwrap();
    assert_eq!(loaded, bytes.len());
    chip8
}

fn run(chip8: &mut Chip8, cycles: usize) {
    for _ in 0..cycles {
        chip8.cycle(&NoKeys).unwrap();
    }
}

fn lit(frame: &FrameBuffer) -> usize {
    frame.rows().iter().flatten().filter(|&&p| p == 1).count()
}

#[test]
fn test_subroutine_returns_after_call() {
    let mut chip8 = load(&[
        0x2206, // 200: CALL 0x206
        0x6101, // 202: LD V1, 0x01
        0x1204, // 204: JP 0x204
        0x6042, // 206: LD V0, 0x42
        0x00EE, // 208: RET
    ]);
    run(&mut chip8, 3);
    let registers = &chip8.state().registers;
    assert_eq!(registers.v[0x0], 0x42);
    assert_eq!(registers.pc, 0x202);
    assert_eq!(registers.sp, 0);

    run(&mut chip8, 1);
    assert_eq!(chip8.state().registers.v[0x1], 0x01);
}

#[test]
fn test_recursion_overflows_stack() {
    let mut chip8 = load(&[
        0x2200, // 200: CALL 0x200
    ]);
    run(&mut chip8, 16);
    assert_eq!(
        chip8.cycle(&NoKeys),
        Err(Fault::StackOverflow { pc: 0x200 })
    );
    assert_eq!(chip8.state().registers.sp, 16);
}

#[test]
fn test_draws_font_digit() {
    let mut chip8 = load(&[
        0x6007, // LD V0, 0x07
        0xF029, // LD F, V0
        0x6105, // LD V1, 0x05
        0x6203, // LD V2, 0x03
        0xD125, // DRW V1, V2, 5
    ]);
    run(&mut chip8, 5);
    let frame = chip8.frame().expect("drawing should dirty the frame");
    // 7 is F0 10 20 40 40
    assert!((5..9).all(|x| frame.pixel(x, 3)));
    assert!(frame.pixel(8, 4));
    assert!(frame.pixel(7, 5));
    assert!(frame.pixel(6, 6));
    assert!(frame.pixel(6, 7));
    assert_eq!(lit(frame), 8);
    assert_eq!(chip8.state().registers.v[0xF], 0);
}

#[test]
fn test_bcd_then_read_back() {
    let mut chip8 = load(&[
        0x609D, // LD V0, 157
        0xA300, // LD I, 0x300
        0xF033, // LD B, V0
        0xF265, // LD V2, [I]
    ]);
    run(&mut chip8, 4);
    assert_eq!(chip8.state().registers.v[0..3], [1, 5, 7]);
}

#[test]
fn test_delay_timer_counts_down_with_ticks() {
    let mut chip8 = load(&[
        0x6003, // 200: LD V0, 3
        0xF015, // 202: LD DT, V0
        0xF107, // 204: LD V1, DT
        0x3100, // 206: SE V1, 0
        0x1204, // 208: JP 0x204
        0x120A, // 20A: JP 0x20A
    ]);
    run(&mut chip8, 2);
    let mut polls = 0;
    while chip8.state().registers.pc != 0x20A {
        run(&mut chip8, 1);
        if chip8.state().registers.pc == 0x206 {
            polls += 1;
            chip8.tick_timers();
        }
        assert!(polls < 10, "delay timer never reached zero");
    }
    assert_eq!(polls, 4);
}

#[test]
fn test_key_wait_then_skip_on_key() {
    let mut chip8 = load(&[
        0xF50A, // 200: LD V5, K
        0xE59E, // 202: SKP V5
        0x6A01, // 204: LD VA, 1
        0x6B01, // 206: LD VB, 1
    ]);
    let mut keys = KeyState::new();
    chip8.cycle(&keys).unwrap();
    assert_eq!(chip8.state().registers.pc, 0x200);

    keys.press(0xF);
    chip8.cycle(&keys).unwrap();
    chip8.cycle(&keys).unwrap();
    chip8.cycle(&keys).unwrap();
    let registers = &chip8.state().registers;
    assert_eq!(registers.v[0x5], 0xF);
    assert_eq!(registers.v[0xA], 0);
    assert_eq!(registers.v[0xB], 1);
}

#[test]
fn test_unknown_opcode_reports_pc() {
    let mut chip8 = load(&[
        0x00E0, // 200: CLS
        0x8008, // 202: not an instruction
    ]);
    run(&mut chip8, 1);
    let fault = chip8.cycle(&NoKeys).unwrap_err();
    assert_eq!(fault.pc(), 0x202);
    assert_eq!(
        fault,
        Fault::UnknownOpcode {
            opcode: 0x8008,
            pc: 0x202
        }
    );
    assert!(chip8.is_halted());
}

#[test]
fn test_random_numbers_follow_seed() {
    let program = [0xC0FF, 0xC1FF, 0xC2FF, 0xC3FF];
    let mut a = load(&program);
    let mut b = load(&program);
    run(&mut a, 4);
    run(&mut b, 4);
    assert_eq!(a.state().registers.v, b.state().registers.v);
}

#[test]
fn test_clear_after_draw_blanks_screen() {
    let mut chip8 = load(&[
        0xA000, // LD I, 0x000
        0xD00F, // DRW V0, V0, 15
        0x00E0, // CLS
    ]);
    run(&mut chip8, 3);
    let frame = chip8.frame().unwrap();
    assert_eq!(lit(frame), 0);
    assert_eq!(frame.rows().len(), DISPLAY_HEIGHT);
    assert_eq!(frame.rows()[0].len(), DISPLAY_WIDTH);
}
