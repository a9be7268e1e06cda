//! MachineView: maps a `MachineSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{MachineSnapshot, SpinOutcome};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Symbol, WinTier, REEL_COUNT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BLACK: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(24, 18, 40);
const ACCENT: Rgb = Rgb::new(250, 204, 21);
const SUCCESS: Rgb = Rgb::new(74, 222, 128);
const DANGER: Rgb = Rgb::new(248, 113, 113);
const TEXT: Rgb = Rgb::new(230, 230, 240);
const MUTED: Rgb = Rgb::new(140, 140, 160);

/// Width of the reels/controls column.
const MAIN_W: u16 = 40;
/// Minimum width of the stats/history column.
const SIDE_MIN_W: u16 = 34;
const REEL_W: u16 = 10;
const REEL_H: u16 = 5;
const REEL_GAP: u16 = 2;

/// A lightweight terminal renderer for the slot machine.
#[derive(Debug, Clone, Default)]
pub struct MachineView {
    /// Hide the stats column even when the viewport is wide enough.
    compact: bool,
}

impl MachineView {
    pub fn compact() -> Self {
        Self { compact: true }
    }

    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(&self, snap: &MachineSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let with_side = !self.compact && viewport.width >= MAIN_W + 2 + SIDE_MIN_W;
        let total_w = if with_side {
            MAIN_W + 2 + SIDE_MIN_W
        } else {
            MAIN_W
        };
        let x0 = viewport.width.saturating_sub(total_w) / 2;

        self.draw_main(fb, snap, x0);
        if with_side {
            let side_x = x0 + MAIN_W + 2;
            let side_w = viewport.width - side_x;
            self.draw_side(fb, snap, side_x, side_w, viewport.height);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &MachineSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_main(&self, fb: &mut FrameBuffer, snap: &MachineSnapshot, x0: u16) {
        let title = CellStyle::new(ACCENT, BLACK).bold();
        let muted = CellStyle::new(MUTED, BLACK);
        let text = CellStyle::new(TEXT, BLACK);

        fb.put_str_centered(x0, 0, MAIN_W, "AUTO SLOT ENGINE", title);
        fb.put_str_centered(x0, 1, MAIN_W, "autoplay slots with bankroll tracking", muted);

        // Reels.
        let reels_w = REEL_W * REEL_COUNT as u16 + REEL_GAP * (REEL_COUNT as u16 - 1);
        let reels_x = x0 + (MAIN_W - reels_w) / 2;
        let reels_y = 3;
        let settled_tier = if snap.spinning {
            None
        } else {
            snap.last_outcome().map(|o| o.tier)
        };
        for (i, sym) in snap.reels.iter().enumerate() {
            let x = reels_x + i as u16 * (REEL_W + REEL_GAP);
            self.draw_reel(fb, x, reels_y, *sym, snap.spinning, settled_tier);
        }

        // Result line.
        let mut y = reels_y + REEL_H + 1;
        if snap.spinning {
            fb.put_str_centered(x0, y, MAIN_W, "SPINNING...", CellStyle::new(ACCENT, BLACK));
        } else if let Some(last) = snap.last_outcome() {
            let mut label = [0u8; 24];
            let s = outcome_label(last, &mut label);
            fb.put_str_centered(x0, y, MAIN_W, s, tier_style(last.tier));
        } else {
            fb.put_str_centered(x0, y, MAIN_W, "PRESS SPACE TO SPIN", muted);
        }
        y += 1;
        if !snap.spinning && !snap.can_spin() {
            fb.put_str_centered(
                x0,
                y,
                MAIN_W,
                "INSUFFICIENT CREDITS - PRESS R",
                CellStyle::new(DANGER, BLACK).bold(),
            );
        }

        // Autoplay.
        y += 2;
        let (state, style) = if snap.autoplay.enabled {
            ("AUTOPLAY ON ", CellStyle::new(SUCCESS, BLACK).bold())
        } else {
            ("AUTOPLAY OFF", muted)
        };
        let mut cx = fb.put_str(x0 + 2, y, state, style);
        cx = fb.put_str(cx, y, "   delay ", muted);
        cx = fb.put_i64(cx, y, i64::from(snap.autoplay.delay_ms), text);
        fb.put_str(cx, y, "ms", muted);
        y += 1;
        if let Some(ms) = snap.autoplay.next_spin_in_ms {
            let cx = fb.put_str(x0 + 2, y, "next spin in ", muted);
            let cx = fb.put_i64(cx, y, i64::from(ms), text);
            fb.put_str(cx, y, "ms", muted);
        }

        // Controls.
        y += 2;
        fb.put_str(x0 + 2, y, "[SPACE] spin   [A] autoplay", muted);
        fb.put_str(x0 + 2, y + 1, "[-/+] delay    [R] reset   [Q] quit", muted);
    }

    fn draw_reel(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        sym: Symbol,
        spinning: bool,
        settled: Option<WinTier>,
    ) {
        let border = match settled {
            Some(tier) if tier.is_win() => tier_style(tier),
            _ => CellStyle::new(MUTED, BLACK),
        };
        fb.draw_box(x, y, REEL_W, REEL_H, border);
        fb.fill_rect(x + 1, y + 1, REEL_W - 2, REEL_H - 2, ' ', CellStyle::new(TEXT, PANEL_BG));

        let face = if spinning {
            CellStyle::new(MUTED, PANEL_BG).dim()
        } else if sym == crate::types::LUCKY_SYMBOL {
            CellStyle::new(ACCENT, PANEL_BG).bold()
        } else {
            CellStyle::new(TEXT, PANEL_BG).bold()
        };
        fb.put_str_centered(x + 1, y + REEL_H / 2, REEL_W - 2, sym.label(), face);
    }

    fn draw_side(&self, fb: &mut FrameBuffer, snap: &MachineSnapshot, x: u16, w: u16, h: u16) {
        let heading = CellStyle::new(ACCENT, BLACK).bold();
        let label = CellStyle::new(MUTED, BLACK);
        let value = CellStyle::new(TEXT, BLACK).bold();
        let stats = &snap.stats;

        let mut y = 0;
        fb.put_str(x, y, "SESSION STATS", heading);
        y += 1;

        let cx = fb.put_str(x, y, "Balance   ", label);
        let cx = fb.put_i64(cx, y, stats.balance, CellStyle::new(ACCENT, BLACK).bold());
        fb.put_str(cx, y, " credits", label);
        y += 1;

        let profit_style = if stats.profit >= 0 {
            CellStyle::new(SUCCESS, BLACK).bold()
        } else {
            CellStyle::new(DANGER, BLACK).bold()
        };
        let mut cx = fb.put_str(x, y, "Profit    ", label);
        if stats.profit >= 0 {
            cx = fb.put_str(cx, y, "+", profit_style);
        }
        let cx = fb.put_i64(cx, y, stats.profit, profit_style);
        fb.put_str(cx, y, " credits", label);
        y += 1;

        for (name, n) in [
            ("Spins     ", i64::from(stats.spins)),
            ("Wins      ", i64::from(stats.wins)),
            ("Jackpots  ", i64::from(stats.jackpots)),
        ] {
            let cx = fb.put_str(x, y, name, label);
            fb.put_i64(cx, y, n, value);
            y += 1;
        }
        let cx = fb.put_str(x, y, "Win rate  ", label);
        let cx = fb.put_i64(cx, y, i64::from(stats.win_rate_percent()), value);
        fb.put_str(cx, y, "%", value);
        y += 2;

        fb.put_str(x, y, "PAYOUT TABLE", heading);
        y += 1;
        let amount_x = x + w.min(SIDE_MIN_W).saturating_sub(4);
        for tier in [WinTier::Jackpot, WinTier::Double, WinTier::Single] {
            fb.put_str(x, y, tier.description(), label);
            let cx = fb.put_str(amount_x, y, "+", tier_style(tier));
            fb.put_i64(cx, y, i64::from(tier.payout()), tier_style(tier));
            y += 1;
        }
        fb.put_str(x, y, "Spin cost", label);
        let danger = CellStyle::new(DANGER, BLACK).bold();
        fb.put_i64(amount_x, y, -snap.spin_cost, danger);
        y += 2;

        fb.put_str(x, y, "RECENT SPINS", heading);
        y += 1;
        if snap.history.is_empty() {
            fb.put_str(x, y, "No spins yet.", label);
            return;
        }
        for outcome in snap.history.iter() {
            if y >= h {
                break;
            }
            self.draw_history_row(fb, outcome, x, y);
            y += 1;
        }
    }

    fn draw_history_row(&self, fb: &mut FrameBuffer, outcome: &SpinOutcome, x: u16, y: u16) {
        let face = CellStyle::new(TEXT, BLACK);
        let mut cx = x;
        for sym in outcome.symbols {
            cx = fb.put_str(cx, y, sym.label(), face);
        }
        let mut label = [0u8; 24];
        let s = outcome_label(outcome, &mut label);
        fb.put_str(cx + 1, y, s, tier_style(outcome.tier));
    }
}

fn tier_style(tier: WinTier) -> CellStyle {
    match tier {
        WinTier::Loss => CellStyle::new(MUTED, BLACK),
        WinTier::Single => CellStyle::new(ACCENT, BLACK),
        WinTier::Double => CellStyle::new(SUCCESS, BLACK).bold(),
        WinTier::Jackpot => CellStyle::new(BLACK, ACCENT).bold(),
    }
}

/// "LOSS" or e.g. "JACKPOT +48", written into a stack buffer.
fn outcome_label<'a>(outcome: &SpinOutcome, buf: &'a mut [u8; 24]) -> &'a str {
    let name: &[u8] = match outcome.tier {
        WinTier::Loss => return "LOSS",
        WinTier::Single => b"SINGLE +",
        WinTier::Double => b"DOUBLE +",
        WinTier::Jackpot => b"JACKPOT +",
    };
    buf[..name.len()].copy_from_slice(name);
    let mut len = name.len();

    let mut digits = [0u8; 10];
    let mut n = outcome.payout;
    let mut nd = 0;
    loop {
        digits[nd] = b'0' + (n % 10) as u8;
        nd += 1;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    for d in digits[..nd].iter().rev() {
        buf[len] = *d;
        len += 1;
    }
    std::str::from_utf8(&buf[..len]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_labels() {
        let mut buf = [0u8; 24];
        let jackpot = SpinOutcome::settle(1, [Symbol::Bell; 3], 0);
        assert_eq!(outcome_label(&jackpot, &mut buf), "JACKPOT +48");

        let loss = SpinOutcome::settle(2, [Symbol::Bell, Symbol::Star, Symbol::Lemon], 0);
        assert_eq!(outcome_label(&loss, &mut buf), "LOSS");
    }
}
