use std::io;

use anyhow::{anyhow, Context};
use log::info;

use display::Text;
use emu8::constants::TIMER_HZ;
use emu8::{Chip8, Display, NoKeys};

/// Runs `cycles` cycles with no keys held, then prints the frame to stdout.
///
/// Timers tick once every `ips / 60` cycles so programs see the same timer rate they
/// would in a window. A fault stops the run early; the frame is still printed.
pub fn headless(chip8: &mut Chip8, ips: u32, cycles: u64) -> anyhow::Result<()> {
    let mut text = Text::new(io::stdout().lock());
    let result = execute(chip8, ips, cycles);

    text.render(&chip8.state().frame_buffer)
        .map_err(|err| anyhow!(err))
        .context("unable to print frame")?;

    let executed = result?;
    info!("ran {} cycles", executed);
    Ok(())
}

/// Returns how many cycles ran.
fn execute(chip8: &mut Chip8, ips: u32, cycles: u64) -> anyhow::Result<u64> {
    let cycles_per_tick = u64::from((ips / TIMER_HZ).max(1));
    for n in 1..=cycles {
        chip8
            .cycle(&NoKeys)
            .with_context(|| format!("machine halted after {} cycles", n - 1))?;
        if n % cycles_per_tick == 0 {
            chip8.tick_timers();
        }
    }
    Ok(cycles)
}
