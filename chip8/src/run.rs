use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Window;
use emu8::constants::TIMER_HZ;
use emu8::{Chip8, KeyState};

use crate::keymap::keymap;

/// Runs `chip8` in an SDL window until the window is closed.
///
/// Hold Space to ignore the clock speed and Escape to step backwards through saved states.
pub fn run(chip8: &mut Chip8, ips: u32, scale: u32) -> anyhow::Result<()> {
    // Get SDL2 context
    let sdl = sdl2::init()
        .map_err(|err| anyhow!(err))
        .context("unable to initialise SDL")?;
    let mut window = Window::new(&sdl, scale)
        .map_err(|err| anyhow!(err))
        .context("unable to open window")?;
    let mut events = sdl.event_pump().map_err(|err| anyhow!(err))?;

    let mut keys = KeyState::new();

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / ips;
    let timer_period = Duration::from_secs(1) / TIMER_HZ;
    let mut last_cycle = Instant::now();
    let mut last_tick = last_cycle;

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    // Whether the machine should be cycled forwards or backwards
    let mut rewind = false;

    'event: loop {
        chip8
            .present(&mut window)
            .map_err(|err| anyhow!(err))
            .context("unable to render frame")?;

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(code)) => keys.press(code),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(code)) => keys.release(code),
                    (Keycode::Space, _) => fast_forward = false,
                    (Keycode::Escape, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        let now = Instant::now();
        if rewind {
            chip8.rewind();
            last_tick = now;
        } else if !chip8.is_halted() {
            if chip8.cycle(&keys).is_err() {
                warn!("machine halted, hold Escape to rewind or close the window to quit");
            }
            while now - last_tick >= timer_period {
                chip8.tick_timers();
                last_tick += timer_period;
            }
        }

        // Handle timing
        let elapsed_cycle_time = now - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("window closed, ending session");
    match chip8.fault() {
        Some(fault) => Err(anyhow::Error::new(fault).context("machine halted")),
        None => Ok(()),
    }
}
