use rand::{Rng, RngCore};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, GLYPH_SIZE, KEY_COUNT};
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::OutOfBounds;
use crate::state::State;

type Outcome = Result<(), Fault>;

/// Applies one decoded instruction to `state`, leaving the program counter on the next
/// instruction to fetch.
///
/// A fault leaves `state` exactly as it was before the instruction.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    keypad: &dyn Keypad,
    rng: &mut dyn RngCore,
) -> Outcome {
    use Instruction::*;

    match instruction {
        Cls => cls(state),
        Ret => ret(state),
        Jump { addr } => jump(state, addr),
        Call { addr } => call(state, addr),
        SkipEqByte { x, kk } => ske(state, x, kk),
        SkipNeByte { x, kk } => skne(state, x, kk),
        SkipEqReg { x, y } => skre(state, x, y),
        LoadByte { x, kk } => load(state, x, kk),
        AddByte { x, kk } => add(state, x, kk),
        Move { x, y } => mv(state, x, y),
        Or { x, y } => or(state, x, y),
        And { x, y } => and(state, x, y),
        Xor { x, y } => xor(state, x, y),
        AddReg { x, y } => addr(state, x, y),
        Sub { x, y } => sub(state, x, y),
        Shr { x } => shr(state, x),
        SubN { x, y } => subn(state, x, y),
        Shl { x } => shl(state, x),
        SkipNeReg { x, y } => skrne(state, x, y),
        LoadI { addr } => loadi(state, addr),
        JumpV0 { addr } => jumpi(state, addr),
        Rand { x, kk } => rnd(state, x, kk, rng),
        Draw { x, y, n } => draw(state, x, y, n),
        SkipKeyDown { x } => skpr(state, x, keypad),
        SkipKeyUp { x } => skup(state, x, keypad),
        LoadDelay { x } => moved(state, x),
        WaitKey { x } => keyd(state, x, keypad),
        SetDelay { x } => loads(state, x),
        SetSound { x } => ld(state, x),
        AddI { x } => addi(state, x),
        LoadGlyph { x } => ldspr(state, x),
        Bcd { x } => bcd(state, x),
        Store { x } => stor(state, x),
        Read { x } => read(state, x),
    }
}

fn out_of_bounds(pc: u16) -> impl Fn(OutOfBounds) -> Fault {
    move |err| Fault::MemoryOutOfBounds {
        address: err.address,
        pc,
    }
}

/// clear
fn cls(state: &mut State) -> Outcome {
    state.frame_buffer.clear();
    state.registers.advance();
    Ok(())
}

/// PC = STACK.pop() + 2
fn ret(state: &mut State) -> Outcome {
    let r = &mut state.registers;
    r.pc = r.pop()?.wrapping_add(2);
    Ok(())
}

/// PC = addr
fn jump(state: &mut State, addr: u16) -> Outcome {
    state.registers.pc = addr;
    Ok(())
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Outcome {
    let r = &mut state.registers;
    r.push(r.pc)?;
    r.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
fn ske(state: &mut State, x: u8, kk: u8) -> Outcome {
    let r = &mut state.registers;
    r.skip_if(r.vx(x) == kk);
    Ok(())
}

/// if Vx != kk then pc += 2
fn skne(state: &mut State, x: u8, kk: u8) -> Outcome {
    let r = &mut state.registers;
    r.skip_if(r.vx(x) != kk);
    Ok(())
}

/// if Vx == Vy then pc += 2
fn skre(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    r.skip_if(r.vx(x) == r.vx(y));
    Ok(())
}

/// Vx = kk
fn load(state: &mut State, x: u8, kk: u8) -> Outcome {
    let r = &mut state.registers;
    r.set(x, kk);
    r.advance();
    Ok(())
}

/// Vx += kk
/// Overflow wraps and leaves VF alone
fn add(state: &mut State, x: u8, kk: u8) -> Outcome {
    let r = &mut state.registers;
    r.set(x, r.vx(x).wrapping_add(kk));
    r.advance();
    Ok(())
}

/// Vx = Vy
fn mv(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    r.set(x, r.vx(y));
    r.advance();
    Ok(())
}

/// Vx |= Vy
fn or(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    r.set(x, r.vx(x) | r.vx(y));
    r.advance();
    Ok(())
}

/// Vx &= Vy
fn and(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    r.set(x, r.vx(x) & r.vx(y));
    r.advance();
    Ok(())
}

/// Vx ^= Vy
fn xor(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    r.set(x, r.vx(x) ^ r.vx(y));
    r.advance();
    Ok(())
}

// The arithmetic below writes VF before Vx, so with x == F the result wins over the flag.

/// Vx += Vy; VF = carry
fn addr(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    let (res, carry) = r.vx(x).overflowing_add(r.vx(y));
    r.set_flag(carry);
    r.set(x, res);
    r.advance();
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
fn sub(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    let (vx, vy) = (r.vx(x), r.vx(y));
    r.set_flag(vx > vy);
    r.set(x, vx.wrapping_sub(vy));
    r.advance();
    Ok(())
}

/// Vx >>= 1; VF = shifted out bit
fn shr(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    let vx = r.vx(x);
    r.set_flag(vx & 0x1 == 1);
    r.set(x, vx >> 1);
    r.advance();
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
fn subn(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    let (vx, vy) = (r.vx(x), r.vx(y));
    r.set_flag(vy > vx);
    r.set(x, vy.wrapping_sub(vx));
    r.advance();
    Ok(())
}

/// Vx <<= 1; VF = shifted out bit
fn shl(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    let vx = r.vx(x);
    r.set_flag(vx & 0x80 != 0);
    r.set(x, vx << 1);
    r.advance();
    Ok(())
}

/// if Vx != Vy then pc += 2
fn skrne(state: &mut State, x: u8, y: u8) -> Outcome {
    let r = &mut state.registers;
    r.skip_if(r.vx(x) != r.vx(y));
    Ok(())
}

/// I = addr
fn loadi(state: &mut State, addr: u16) -> Outcome {
    let r = &mut state.registers;
    r.i = addr;
    r.advance();
    Ok(())
}

/// PC = V0 + addr
fn jumpi(state: &mut State, addr: u16) -> Outcome {
    let r = &mut state.registers;
    r.pc = addr + u16::from(r.v[0x0]);
    Ok(())
}

/// Vx = rand_byte & kk
fn rnd(state: &mut State, x: u8, kk: u8, rng: &mut dyn RngCore) -> Outcome {
    let r = &mut state.registers;
    let byte: u8 = rng.gen();
    r.set(x, byte & kk);
    r.advance();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position Vx, Vy on the FrameBuffer with wrapping.
/// VF is set if any lit pixel gets erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Outcome {
    let r = &mut state.registers;
    let sprite = state
        .memory
        .slice(usize::from(r.i), usize::from(n))
        .map_err(out_of_bounds(r.pc))?;

    // VF is cleared before the coordinates are read, so Vx or Vy being VF draws at 0
    r.set_flag(false);
    let px = usize::from(r.vx(x)) % DISPLAY_WIDTH;
    let py = usize::from(r.vx(y)) % DISPLAY_HEIGHT;
    let collision = state.frame_buffer.draw_sprite(px, py, sprite);
    r.set_flag(collision);
    r.advance();
    Ok(())
}

/// if Vx.pressed then pc += 2
fn skpr(state: &mut State, x: u8, keypad: &dyn Keypad) -> Outcome {
    let r = &mut state.registers;
    r.skip_if(keypad.is_key_down(r.vx(x)));
    Ok(())
}

/// if !Vx.pressed then pc += 2
fn skup(state: &mut State, x: u8, keypad: &dyn Keypad) -> Outcome {
    let r = &mut state.registers;
    r.skip_if(!keypad.is_key_down(r.vx(x)));
    Ok(())
}

/// Vx = DT
fn moved(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    r.set(x, state.timers.delay);
    r.advance();
    Ok(())
}

/// await keypress for Vx
/// With no key held the pc stays put, so the instruction is fetched again next cycle.
fn keyd(state: &mut State, x: u8, keypad: &dyn Keypad) -> Outcome {
    let r = &mut state.registers;
    if let Some(key) = (0..KEY_COUNT as u8).find(|&key| keypad.is_key_down(key)) {
        r.set(x, key);
        r.advance();
    }
    Ok(())
}

/// DT = Vx
fn loads(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    state.timers.delay = r.vx(x);
    r.advance();
    Ok(())
}

/// ST = Vx
fn ld(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    state.timers.sound = r.vx(x);
    r.advance();
    Ok(())
}

/// I += Vx
fn addi(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    r.i = r.i.wrapping_add(u16::from(r.vx(x)));
    r.advance();
    Ok(())
}

/// I = Vx * 5
/// Points I at the sprite sheet glyph for Vx
fn ldspr(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    r.i = FONT_START + u16::from(r.vx(x)) * GLYPH_SIZE;
    r.advance();
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    let vx = r.vx(x);
    state
        .memory
        .slice_mut(usize::from(r.i), 3)
        .map_err(out_of_bounds(r.pc))?
        .copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    r.advance();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    let x = usize::from(x);
    state
        .memory
        .slice_mut(usize::from(r.i), x + 1)
        .map_err(out_of_bounds(r.pc))?
        .copy_from_slice(&r.v[..=x]);
    r.advance();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8) -> Outcome {
    let r = &mut state.registers;
    let x = usize::from(x);
    let bytes = state
        .memory
        .slice(usize::from(r.i), x + 1)
        .map_err(out_of_bounds(r.pc))?;
    r.v[..=x].copy_from_slice(bytes);
    r.advance();
    Ok(())
}
