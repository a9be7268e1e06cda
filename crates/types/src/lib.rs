//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (core engine, terminal rendering, async runtime, headless simulation).
//!
//! # Machine Layout
//!
//! - **Reels**: 3 reels, one visible symbol each
//! - **Alphabet**: 8 symbols, drawn uniformly with replacement
//! - **Lucky symbol**: [`Symbol::Seven`]
//!
//! # Economy
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_BALANCE` | 200 | Credits at session start and after reset |
//! | `SPIN_COST` | 2 | Credits debited when a spin starts |
//! | `HISTORY_CAPACITY` | 25 | Most recent outcomes kept in the history log |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 15 | Fixed timestep interval of the driver loop |
//! | `SPIN_FRAME_COUNT` | 26 | Rolling frames shown before a spin settles |
//! | `SPIN_FRAME_MS` | 45 | Spacing between rolling frames |
//! | `AUTOPLAY_DELAY_MIN_MS` | 300 | Lower clamp for the autoplay delay |
//! | `AUTOPLAY_DELAY_MAX_MS` | 2000 | Upper clamp for the autoplay delay |
//! | `AUTOPLAY_DELAY_DEFAULT_MS` | 750 | Autoplay delay for a fresh session |
//!
//! # Examples
//!
//! ```
//! use tui_slots_types::{Symbol, WinTier, SlotAction, LUCKY_SYMBOL};
//!
//! assert_eq!(Symbol::from_str("seven"), Some(Symbol::Seven));
//! assert_eq!(LUCKY_SYMBOL, Symbol::Seven);
//!
//! assert_eq!(WinTier::Jackpot.payout(), 48);
//! assert!(WinTier::Double > WinTier::Single);
//!
//! assert_eq!(SlotAction::from_str("toggleAutoplay"), Some(SlotAction::ToggleAutoplay));
//! ```

use serde::{Deserialize, Serialize};

/// Signed credit amount. Profit can go negative, so balances share the type.
pub type Credits = i64;

/// Number of reels on the machine.
pub const REEL_COUNT: usize = 3;

/// Number of distinct symbols on a reel.
pub const SYMBOL_COUNT: usize = 8;

/// Credits at session start.
pub const INITIAL_BALANCE: Credits = 200;

/// Credits debited for each spin.
pub const SPIN_COST: Credits = 2;

/// Maximum number of outcomes kept in the history log.
pub const HISTORY_CAPACITY: usize = 25;

/// Fixed timestep interval in milliseconds for driver loops.
pub const TICK_MS: u32 = 15;

/// Number of rolling animation frames per spin.
pub const SPIN_FRAME_COUNT: u32 = 26;

/// Spacing between rolling animation frames.
pub const SPIN_FRAME_MS: u32 = 45;

/// Lower bound of the autoplay delay.
pub const AUTOPLAY_DELAY_MIN_MS: u32 = 300;

/// Upper bound of the autoplay delay.
pub const AUTOPLAY_DELAY_MAX_MS: u32 = 2000;

/// Autoplay delay of a fresh session.
pub const AUTOPLAY_DELAY_DEFAULT_MS: u32 = 750;

/// Delay adjustment applied by the faster/slower keyboard actions.
pub const AUTOPLAY_DELAY_STEP_MS: u32 = 150;

/// The symbol whose presence upgrades an all-distinct reel set to a win.
pub const LUCKY_SYMBOL: Symbol = Symbol::Seven;

/// Clamp an autoplay delay into the accepted range.
pub fn clamp_autoplay_delay(ms: u32) -> u32 {
    ms.clamp(AUTOPLAY_DELAY_MIN_MS, AUTOPLAY_DELAY_MAX_MS)
}

/// The eight reel symbols, in alphabet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    Cherry,
    Bell,
    Diamond,
    Seven,
    Lemon,
    Star,
    Clover,
    Grape,
}

impl Symbol {
    /// Every symbol in alphabet order.
    pub const ALL: [Symbol; SYMBOL_COUNT] = [
        Symbol::Cherry,
        Symbol::Bell,
        Symbol::Diamond,
        Symbol::Seven,
        Symbol::Lemon,
        Symbol::Star,
        Symbol::Clover,
        Symbol::Grape,
    ];

    /// Symbol at `index` in the alphabet (wraps around).
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % SYMBOL_COUNT]
    }

    /// Parse symbol from its lowercase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_slots_types::Symbol;
    ///
    /// assert_eq!(Symbol::from_str("Cherry"), Some(Symbol::Cherry));
    /// assert_eq!(Symbol::from_str("grape"), Some(Symbol::Grape));
    /// assert_eq!(Symbol::from_str("banana"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cherry" => Some(Symbol::Cherry),
            "bell" => Some(Symbol::Bell),
            "diamond" => Some(Symbol::Diamond),
            "seven" | "7" => Some(Symbol::Seven),
            "lemon" => Some(Symbol::Lemon),
            "star" => Some(Symbol::Star),
            "clover" => Some(Symbol::Clover),
            "grape" => Some(Symbol::Grape),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Cherry => "cherry",
            Symbol::Bell => "bell",
            Symbol::Diamond => "diamond",
            Symbol::Seven => "seven",
            Symbol::Lemon => "lemon",
            Symbol::Star => "star",
            Symbol::Clover => "clover",
            Symbol::Grape => "grape",
        }
    }

    /// Short fixed-width label for terminal display.
    pub fn label(&self) -> &'static str {
        match self {
            Symbol::Cherry => "CHERRY",
            Symbol::Bell => " BELL ",
            Symbol::Diamond => "DIAMND",
            Symbol::Seven => "  7   ",
            Symbol::Lemon => "LEMON ",
            Symbol::Star => " STAR ",
            Symbol::Clover => "CLOVER",
            Symbol::Grape => "GRAPE ",
        }
    }
}

/// Win classification of a settled spin, ordered by payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinTier {
    Loss,
    Single,
    Double,
    Jackpot,
}

impl WinTier {
    /// Every tier from lowest to highest payout.
    pub const ALL: [WinTier; 4] = [
        WinTier::Loss,
        WinTier::Single,
        WinTier::Double,
        WinTier::Jackpot,
    ];

    /// Credits paid out for this tier.
    pub fn payout(&self) -> u32 {
        match self {
            WinTier::Loss => 0,
            WinTier::Single => 4,
            WinTier::Double => 12,
            WinTier::Jackpot => 48,
        }
    }

    pub fn is_win(&self) -> bool {
        *self != WinTier::Loss
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WinTier::Loss => "loss",
            WinTier::Single => "single",
            WinTier::Double => "double",
            WinTier::Jackpot => "jackpot",
        }
    }

    /// Payout table wording.
    pub fn description(&self) -> &'static str {
        match self {
            WinTier::Loss => "No match",
            WinTier::Single => "Lucky Seven combo",
            WinTier::Double => "Lucky Streak (two matching)",
            WinTier::Jackpot => "Jackpot (3 matching)",
        }
    }
}

/// Keyboard-level actions.
///
/// Actions are resolved against the current machine state (for example the
/// autoplay toggle depends on whether autoplay is on), unlike [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    /// Request one spin
    Spin,
    /// Turn autoplay on or off
    ToggleAutoplay,
    /// Shorten the autoplay delay by one step
    AutoplayFaster,
    /// Lengthen the autoplay delay by one step
    AutoplaySlower,
    /// Reset the session
    Reset,
}

impl SlotAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_slots_types::SlotAction;
    ///
    /// assert_eq!(SlotAction::from_str("spin"), Some(SlotAction::Spin));
    /// assert_eq!(SlotAction::from_str("autoplayFaster"), Some(SlotAction::AutoplayFaster));
    /// assert_eq!(SlotAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spin" => Some(SlotAction::Spin),
            "toggleautoplay" => Some(SlotAction::ToggleAutoplay),
            "autoplayfaster" => Some(SlotAction::AutoplayFaster),
            "autoplayslower" => Some(SlotAction::AutoplaySlower),
            "reset" => Some(SlotAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotAction::Spin => "spin",
            SlotAction::ToggleAutoplay => "toggleAutoplay",
            SlotAction::AutoplayFaster => "autoplayFaster",
            SlotAction::AutoplaySlower => "autoplaySlower",
            SlotAction::Reset => "reset",
        }
    }
}

/// Engine commands, forwarded verbatim from any front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    RequestSpin,
    SetAutoplay { enabled: bool },
    SetAutoplayDelay { ms: u32 },
    ResetSession,
}
