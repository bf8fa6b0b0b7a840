pub use chip8::Chip8;
pub use display::Display;
pub use error::{Fault, LoadError, SinkError};
pub use frame_buffer::FrameBuffer;
pub use instruction::Instruction;
pub use keypad::{KeyState, Keypad, NoKeys};
pub use opcode::Opcode;
pub use state::State;

mod chip8;
pub mod constants;
mod display;
mod error;
mod frame_buffer;
mod instruction;
mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod registers;
pub mod state;
pub mod timers;
