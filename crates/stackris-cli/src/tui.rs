use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::Frame;

/// A frame-driven terminal application run by [`run`].
pub trait App {
    /// Whether the event loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles one terminal event (key input, resize, ...).
    fn handle_event(&mut self, event: &Event);

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);

    /// Advances the state by one tick.
    fn update(&mut self);
}

/// Runs `app` in the alternate screen until it asks to exit.
///
/// Ticks fire at `tick_rate` Hz and drive `update`; terminal events are
/// forwarded as they arrive. The screen is redrawn after either, so an idle
/// app does not busy-render.
pub fn run(app: &mut impl App, tick_rate: u64) -> anyhow::Result<()> {
    let tick_interval = Duration::from_micros(1_000_000 / tick_rate.max(1));

    ratatui::run(|terminal| {
        let mut last_tick = Instant::now();
        let mut dirty = true;

        while !app.should_exit() {
            if last_tick.elapsed() >= tick_interval {
                last_tick = Instant::now();
                app.update();
                dirty = true;
            }
            if dirty {
                terminal.draw(|frame| app.draw(frame))?;
                dirty = false;
            }

            let timeout = (last_tick + tick_interval).saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                app.handle_event(&event::read()?);
                dirty = true;
            }
        }
        Ok(())
    })
}
