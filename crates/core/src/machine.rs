//! Slot machine module - spin orchestration and autoplay scheduling
//!
//! This module ties together the core components: symbol source, classifier,
//! bankroll, history and autoplay. The machine is a fixed-timestep state
//! machine: front ends issue commands and call [`SlotMachine::tick`] with the
//! elapsed time, and every timed effect (animation frames, the settle step,
//! the autoplay countdown) happens inside `tick`. Nothing here sleeps or
//! spawns, so a pending autoplay spin is cancelled simply by clearing state.
//!
//! # Spin lifecycle
//!
//! ```text
//! Idle --request_spin (affordable)--> Spinning { frames_left: N }
//! Spinning --every frame_ms--> draw 3 fresh symbols (display only)
//! Spinning --last frame--> draw final reels, classify, settle, log --> Idle
//! ```

use serde::Serialize;
use tracing::debug;

use crate::autoplay::{Autoplay, AutoplayState};
use crate::bankroll::{Bankroll, SessionStats};
use crate::history::HistoryLog;
use crate::outcome::SpinOutcome;
use crate::rng::{SymbolGenerator, SymbolSource};
use crate::snapshot::MachineSnapshot;
use crate::types::*;

/// Tunable machine parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MachineConfig {
    pub initial_balance: Credits,
    pub spin_cost: Credits,
    pub frame_count: u32,
    pub frame_ms: u32,
    pub autoplay_delay_ms: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            initial_balance: INITIAL_BALANCE,
            spin_cost: SPIN_COST,
            frame_count: SPIN_FRAME_COUNT,
            frame_ms: SPIN_FRAME_MS,
            autoplay_delay_ms: AUTOPLAY_DELAY_DEFAULT_MS,
        }
    }
}

/// Where the current spin is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Spinning { frames_left: u32, frame_timer_ms: u32 },
}

/// Result of a spin request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAttempt {
    Started,
    /// A spin is already in flight; the request was ignored.
    AlreadySpinning,
    /// Balance below the spin cost; the request was rejected and autoplay stopped.
    InsufficientFunds,
}

impl SpinAttempt {
    pub fn started(&self) -> bool {
        *self == SpinAttempt::Started
    }
}

/// Complete single-session machine state.
#[derive(Debug, Clone)]
pub struct SlotMachine<S = SymbolGenerator> {
    config: MachineConfig,
    source: S,
    reels: [Symbol; REEL_COUNT],
    phase: SpinPhase,
    bankroll: Bankroll,
    history: HistoryLog,
    autoplay: Autoplay,
    /// Monotonic session clock, advanced only by `tick`.
    clock_ms: u64,
    /// Id of the most recently settled outcome (0 before the first spin).
    last_outcome_id: u64,
    /// Last settled outcome (consumed by observers).
    last_event: Option<SpinOutcome>,
}

impl SlotMachine<SymbolGenerator> {
    /// Create a machine with default parameters and a deterministic seed
    pub fn new(seed: u64) -> Self {
        Self::with_config(MachineConfig::default(), SymbolGenerator::new(seed))
    }

    /// Create a machine with default parameters and an entropy-seeded generator.
    pub fn from_entropy() -> Self {
        Self::with_config(MachineConfig::default(), SymbolGenerator::from_entropy())
    }
}

impl<S: SymbolSource> SlotMachine<S> {
    /// Create a machine whose resting reels are drawn from `source`.
    pub fn with_config(config: MachineConfig, mut source: S) -> Self {
        let reels = source.next_reels();
        let mut machine = Self::with_source(config, source);
        machine.reels = reels;
        machine
    }

    /// Create a machine without consuming from `source`.
    ///
    /// The reels rest on the lucky symbol until the first spin, which keeps
    /// scripted sources aligned with spin boundaries.
    pub fn with_source(config: MachineConfig, source: S) -> Self {
        Self {
            config,
            source,
            reels: [LUCKY_SYMBOL; REEL_COUNT],
            phase: SpinPhase::Idle,
            bankroll: Bankroll::new(config.initial_balance),
            history: HistoryLog::new(),
            autoplay: Autoplay::new(config.autoplay_delay_ms),
            clock_ms: 0,
            last_outcome_id: 0,
            last_event: None,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn reels(&self) -> [Symbol; REEL_COUNT] {
        self.reels
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Spinning { .. })
    }

    pub fn stats(&self) -> SessionStats {
        self.bankroll.stats()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn autoplay(&self) -> AutoplayState {
        self.autoplay.state()
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn can_afford_spin(&self) -> bool {
        self.bankroll.can_afford(self.config.spin_cost)
    }

    /// Start a spin if idle and affordable.
    pub fn request_spin(&mut self) -> SpinAttempt {
        if self.is_spinning() {
            return SpinAttempt::AlreadySpinning;
        }

        if !self.can_afford_spin() {
            if self.autoplay.enabled() {
                self.autoplay.disable();
                debug!(balance = self.bankroll.balance(), "autoplay stopped: insufficient funds");
            }
            return SpinAttempt::InsufficientFunds;
        }

        self.bankroll.apply_spin_cost(self.config.spin_cost);
        self.phase = SpinPhase::Spinning {
            frames_left: self.config.frame_count,
            frame_timer_ms: 0,
        };
        // Spinning invalidates any armed autoplay spin.
        self.autoplay.cancel();
        debug!(balance = self.bankroll.balance(), "spin started");
        SpinAttempt::Started
    }

    /// Turn autoplay on or off. Returns the resulting enabled flag.
    pub fn set_autoplay(&mut self, enabled: bool) -> bool {
        if enabled {
            if self.autoplay.enable(self.can_afford_spin()) {
                debug!(delay_ms = self.autoplay.delay_ms(), "autoplay enabled");
            }
        } else if self.autoplay.enabled() {
            self.autoplay.disable();
            debug!("autoplay disabled");
        }
        self.reschedule_autoplay();
        self.autoplay.enabled()
    }

    /// Set the autoplay delay (clamped). An armed countdown is left alone.
    pub fn set_autoplay_delay(&mut self, ms: u32) -> u32 {
        self.autoplay.set_delay(ms)
    }

    /// Restore a fresh session: funds, counters, history, autoplay.
    ///
    /// A spin still animating is abandoned without settlement.
    pub fn reset_session(&mut self) {
        self.bankroll.reset();
        self.history.clear();
        self.autoplay.reset();
        self.phase = SpinPhase::Idle;
        self.last_event = None;
        debug!("session reset");
    }

    /// Apply a front-end command. Returns whether anything changed.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::RequestSpin => self.request_spin().started(),
            Command::SetAutoplay { enabled } => {
                let before = self.autoplay.enabled();
                self.set_autoplay(enabled) != before
            }
            Command::SetAutoplayDelay { ms } => {
                let before = self.autoplay.delay_ms();
                self.set_autoplay_delay(ms) != before
            }
            Command::ResetSession => {
                self.reset_session();
                true
            }
        }
    }

    /// Resolve a keyboard action against the current state and apply it.
    pub fn apply_action(&mut self, action: SlotAction) -> bool {
        let delay = self.autoplay.delay_ms();
        let command = match action {
            SlotAction::Spin => Command::RequestSpin,
            SlotAction::ToggleAutoplay => Command::SetAutoplay {
                enabled: !self.autoplay.enabled(),
            },
            SlotAction::AutoplayFaster => Command::SetAutoplayDelay {
                ms: delay.saturating_sub(AUTOPLAY_DELAY_STEP_MS),
            },
            SlotAction::AutoplaySlower => Command::SetAutoplayDelay {
                ms: delay.saturating_add(AUTOPLAY_DELAY_STEP_MS),
            },
            SlotAction::Reset => Command::ResetSession,
        };
        self.apply(command)
    }

    /// Advance the machine by `elapsed_ms`.
    ///
    /// Returns true when displayed state changed (new frame, settlement,
    /// autoplay firing).
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.clock_ms = self.clock_ms.saturating_add(u64::from(elapsed_ms));

        match self.phase {
            SpinPhase::Spinning {
                mut frames_left,
                frame_timer_ms,
            } => {
                let mut timer = frame_timer_ms.saturating_add(elapsed_ms);
                let mut changed = false;
                while frames_left > 0 && timer >= self.config.frame_ms {
                    timer -= self.config.frame_ms;
                    frames_left -= 1;
                    self.reels = self.source.next_reels();
                    changed = true;
                }

                if frames_left == 0 {
                    self.settle();
                    return true;
                }

                self.phase = SpinPhase::Spinning {
                    frames_left,
                    frame_timer_ms: timer,
                };
                changed
            }
            SpinPhase::Idle => {
                if self.autoplay.advance(elapsed_ms) {
                    // Either starts a spin or stops autoplay; both are visible.
                    self.request_spin();
                    return true;
                }
                false
            }
        }
    }

    /// Take the last settled outcome, if not yet consumed.
    pub fn take_last_event(&mut self) -> Option<SpinOutcome> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut MachineSnapshot) {
        out.reels = self.reels;
        out.spinning = self.is_spinning();
        out.frames_left = match self.phase {
            SpinPhase::Spinning { frames_left, .. } => frames_left,
            SpinPhase::Idle => 0,
        };
        out.spin_cost = self.config.spin_cost;
        out.initial_balance = self.bankroll.initial_balance();
        out.stats = self.bankroll.stats();
        out.autoplay = self.autoplay.state();
        out.history.clear();
        out.history.extend(self.history.iter().copied());
        out.clock_ms = self.clock_ms;
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        let mut s = MachineSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Final draw, classification and settlement of the current spin.
    ///
    /// The final reels are a fresh draw, not the last animation frame.
    fn settle(&mut self) {
        let reels = self.source.next_reels();
        self.reels = reels;
        self.last_outcome_id += 1;

        let outcome = SpinOutcome::settle(self.last_outcome_id, reels, self.clock_ms);
        self.bankroll.apply_settlement(&outcome);
        self.history.push(outcome);
        self.last_event = Some(outcome);
        self.phase = SpinPhase::Idle;

        debug!(
            spin = outcome.id,
            tier = outcome.tier.as_str(),
            payout = outcome.payout,
            balance = self.bankroll.balance(),
            "spin settled"
        );

        self.reschedule_autoplay();
    }

    /// Arm or cancel the autoplay countdown to match the current state.
    fn reschedule_autoplay(&mut self) {
        if !self.autoplay.enabled() || self.is_spinning() {
            self.autoplay.cancel();
            return;
        }

        if !self.can_afford_spin() {
            self.autoplay.disable();
            debug!(balance = self.bankroll.balance(), "autoplay stopped: insufficient funds");
            return;
        }

        self.autoplay.arm();
    }
}
