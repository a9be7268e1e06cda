//! Terminal slot machine (default binary).
//!
//! Drives a `SlotMachine` from a fixed-timestep loop, reads keys with
//! crossterm, and draws through the framebuffer renderer. Settings come from
//! `SLOTS_*` environment variables; logs are written only when
//! `SLOTS_LOG_PATH` is set.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tui_slots::core::{MachineSnapshot, SlotMachine};
use tui_slots::input::{handle_key_event, should_quit};
use tui_slots::runtime::{telemetry, SessionConfig};
use tui_slots::term::{FrameBuffer, MachineView, RenderThrottle, TerminalRenderer, Viewport};

/// Redraw an idle screen at least this often.
const IDLE_REFRESH_MS: u64 = 1000;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    if let Some(path) = &config.log_path {
        telemetry::init_file(path)?;
    }

    let mut machine = config.build_machine();
    info!(
        seed = ?config.seed,
        balance = machine.stats().balance,
        "terminal session started"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut machine, config.tick());

    // Always try to restore terminal state.
    let _ = term.exit();

    let stats = machine.stats();
    info!(
        spins = stats.spins,
        balance = stats.balance,
        profit = stats.profit,
        "terminal session ended"
    );
    result
}

fn run(
    term: &mut TerminalRenderer,
    machine: &mut SlotMachine,
    tick_duration: Duration,
) -> Result<()> {
    let view = MachineView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = MachineSnapshot::default();
    let mut throttle = RenderThrottle::new(IDLE_REFRESH_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        // Render.
        machine.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, &snap) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        machine.apply_action(action);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            machine.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
            if let Some(outcome) = machine.take_last_event() {
                info!(
                    spin = outcome.id,
                    tier = outcome.tier.as_str(),
                    payout = outcome.payout,
                    balance = machine.stats().balance,
                    "spin settled"
                );
            }
        }
    }
}
