use std::collections::VecDeque;
use std::io::Read;

use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::MAX_SAVED_STATES;
use crate::display::Display;
use crate::error::{Fault, LoadError, SinkError};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the random source behind `Cxkk`
///  - the fault that halted it, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU by a cycle and rewinding it
/// - advancing its timers
/// - handing its frame buffer to some display
///
/// Keys are not tracked here; every cycle is given a `Keypad` to ask.
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    rng: StdRng,
    fault: Option<Fault>,
}

impl Chip8 {
    /// A machine whose random numbers are seeded from the OS.
    pub fn new() -> Self {
        Chip8::with_rng(StdRng::from_entropy())
    }

    /// A machine whose random numbers are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Chip8::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            rng,
            fault: None,
        }
    }

    /// Puts the machine back into its initial state, forgetting any program, halt
    /// and saved states. The random source carries on where it was.
    pub fn reset(&mut self) {
        debug!("resetting machine");
        self.state = State::new();
        self.previous_states.clear();
        self.fault = None;
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader that yields a raw ROM image
    ///
    /// Returns the number of bytes loaded at 0x200.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let len = self.state.memory.load_rom(reader)?;
        debug!("loaded {} byte ROM", len);
        Ok(len)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Mutable access for hosts and tests that poke at the machine directly.
    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// The fault that halted the machine.
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    pub fn is_halted(&self) -> bool {
        self.fault.is_some()
    }

    /// Whether a tone should be playing.
    pub fn is_sounding(&self) -> bool {
        self.state.timers.is_sounding()
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc
    /// - decodes it
    /// - executes it against the current state
    ///
    /// Any fault halts the machine. A halted machine doesn't cycle; it keeps reporting
    /// the fault until it is reset or rewound.
    pub fn cycle(&mut self, keypad: &dyn Keypad) -> Result<(), Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        match self.step(keypad) {
            Ok(saved) => {
                self.save_state(saved);
                Ok(())
            }
            Err(fault) => {
                error!("halting: {}", fault);
                self.fault = Some(fault);
                Err(fault)
            }
        }
    }

    /// Runs one instruction, returning the state from before it on success.
    fn step(&mut self, keypad: &dyn Keypad) -> Result<State, Fault> {
        let op = self.fetch()?;
        let pc = self.state.registers.pc;
        let instruction =
            Instruction::decode(op).ok_or(Fault::UnknownOpcode { opcode: op.0, pc })?;
        trace!(
            "{:03X}: {} {:<16} v{:02X?} i{:03X} sp{}",
            pc,
            op,
            instruction.to_string(),
            self.state.registers.v,
            self.state.registers.i,
            self.state.registers.sp
        );

        let saved = self.state.clone();
        operations::execute(instruction, &mut self.state, keypad, &mut self.rng)?;
        Ok(saved)
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn fetch(&self) -> Result<Opcode, Fault> {
        let pc = self.state.registers.pc;
        self.state
            .memory
            .word(usize::from(pc))
            .map(Opcode)
            .map_err(|err| Fault::MemoryOutOfBounds {
                address: err.address,
                pc,
            })
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - clears any halt, since the restored state predates it
    ///
    /// Returns whether there was anything to rewind to.
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                debug!("rewound to {:03X}", state.registers.pc);
                self.state = state;
                self.fault = None;
                true
            }
            None => false,
        }
    }

    /// Puts a state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(state);
    }

    /// One 60Hz tick of the delay and sound timers.
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn frame(&self) -> Option<&FrameBuffer> {
        if self.state.frame_buffer.is_dirty() {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Renders the frame on `display` if it changed since the last render.
    ///
    /// Returns whether anything was rendered. The frame stays dirty if rendering fails.
    pub fn present(&mut self, display: &mut dyn Display) -> Result<bool, SinkError> {
        match self.frame() {
            Some(frame) => display.render(frame)?,
            None => return Ok(false),
        }
        self.state.frame_buffer.clean();
        Ok(true)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
