//! Rendering of machine snapshots into the framebuffer.

use tui_slots::core::{MachineConfig, MachineSnapshot, ScriptedSymbols, SlotMachine};
use tui_slots::term::{FrameBuffer, MachineView, Viewport};
use tui_slots::types::{Symbol, SPIN_FRAME_COUNT, SPIN_FRAME_MS};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

fn settled_snapshot(outcomes: &[[Symbol; 3]]) -> MachineSnapshot {
    let config = MachineConfig::default();
    let source = ScriptedSymbols::for_outcomes(outcomes, config.frame_count, Symbol::Grape);
    let mut m = SlotMachine::with_source(config, source);
    for _ in outcomes {
        m.request_spin();
        m.tick(SPIN_FRAME_COUNT * SPIN_FRAME_MS);
    }
    m.snapshot()
}

#[test]
fn fresh_machine_shows_title_and_prompt() {
    let snap = SlotMachine::new(1).snapshot();
    let fb = MachineView::default().render(&snap, Viewport::new(40, 24));
    let text = screen_text(&fb);

    assert!(text.contains("AUTO SLOT ENGINE"));
    assert!(text.contains("PRESS SPACE TO SPIN"));
    assert!(text.contains("AUTOPLAY OFF"));
    assert!(!text.contains("SESSION STATS"), "narrow viewports hide the side panel");
}

#[test]
fn reels_are_boxed_with_symbol_labels() {
    let snap = settled_snapshot(&[[Symbol::Diamond, Symbol::Seven, Symbol::Bell]]);
    let fb = MachineView::compact().render(&snap, Viewport::new(40, 24));

    // Three 10-wide reels with 2-column gaps, centered in 40 columns.
    assert_eq!(fb.get(3, 3).unwrap().ch, '┌');
    assert_eq!(fb.get(12, 3).unwrap().ch, '┐');
    assert_eq!(fb.get(15, 3).unwrap().ch, '┌');
    assert_eq!(fb.get(27, 7).unwrap().ch, '└');
    assert_eq!(fb.get(36, 7).unwrap().ch, '┘');

    let faces = fb.row_text(5);
    assert!(faces.contains("DIAMND"));
    assert!(faces.contains("  7   "));
    assert!(faces.contains("BELL"));
}

#[test]
fn wide_viewport_shows_stats_and_payouts() {
    let snap = settled_snapshot(&[[Symbol::Clover; 3]]);
    let fb = MachineView::default().render(&snap, Viewport::new(100, 30));
    let text = screen_text(&fb);

    assert!(text.contains("SESSION STATS"));
    assert!(text.contains("Balance   246 credits"));
    assert!(text.contains("Profit    +46 credits"));
    assert!(text.contains("Jackpots  1"));
    assert!(text.contains("Win rate  100%"));
    assert!(text.contains("PAYOUT TABLE"));
    assert!(text.contains("Jackpot (3 matching)"));
    assert!(text.contains("RECENT SPINS"));
    assert!(text.contains("JACKPOT +48"));
}

#[test]
fn empty_history_placeholder() {
    let snap = SlotMachine::new(9).snapshot();
    let fb = MachineView::default().render(&snap, Viewport::new(100, 30));
    assert!(screen_text(&fb).contains("No spins yet."));
}

#[test]
fn broke_machine_prompts_reset() {
    let mut snap = settled_snapshot(&[[Symbol::Cherry, Symbol::Bell, Symbol::Lemon]]);
    snap.stats.balance = 1;
    let fb = MachineView::default().render(&snap, Viewport::new(40, 24));
    let text = screen_text(&fb);
    assert!(text.contains("LOSS"));
    assert!(text.contains("INSUFFICIENT CREDITS - PRESS R"));
}

#[test]
fn spinning_machine_shows_progress_line() {
    let mut m = SlotMachine::new(4);
    m.request_spin();
    m.tick(SPIN_FRAME_MS);
    let fb = MachineView::default().render(&m.snapshot(), Viewport::new(40, 24));
    assert!(screen_text(&fb).contains("SPINNING..."));
}

#[test]
fn armed_autoplay_shows_countdown() {
    let mut m = SlotMachine::new(4);
    m.set_autoplay(true);
    m.tick(250);
    let fb = MachineView::default().render(&m.snapshot(), Viewport::new(40, 24));
    let text = screen_text(&fb);
    assert!(text.contains("AUTOPLAY ON"));
    assert!(text.contains("delay 750ms"));
    assert!(text.contains("next spin in 500ms"));
}

#[test]
fn render_into_reuses_buffer_across_sizes() {
    let snap = SlotMachine::new(1).snapshot();
    let view = MachineView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(100, 30), &mut fb);
    assert_eq!((fb.width(), fb.height()), (100, 30));
    view.render_into(&snap, Viewport::new(40, 20), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 20));
    assert!(screen_text(&fb).contains("AUTO SLOT ENGINE"));
}
