use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::error::Fault;

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter
/// - (stack) 16 return addresses, with (sp) counting how many are in use
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
        }
    }

    /// Vx
    pub fn vx(&self, x: u8) -> u8 {
        self.v[usize::from(x)]
    }

    /// Sets Vx
    pub fn set(&mut self, x: u8, value: u8) {
        self.v[usize::from(x)] = value;
    }

    /// Sets VF; whichever instruction defines the flag replaces it outright.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }

    /// Moves the program counter past the current instruction.
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Moves the program counter past the current and the next instruction.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(4);
    }

    /// Advances past the next instruction only when `condition` holds.
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.skip()
        } else {
            self.advance()
        }
    }

    /// Pushes a return address; a full stack is fatal.
    pub fn push(&mut self, address: u16) -> Result<(), Fault> {
        let sp = usize::from(self.sp);
        if sp >= STACK_DEPTH {
            return Err(Fault::StackOverflow { pc: self.pc });
        }
        self.stack[sp] = address;
        self.sp += 1;
        Ok(())
    }

    /// Pops the latest return address; an empty stack is fatal.
    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[usize::from(self.sp)])
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
