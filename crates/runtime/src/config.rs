//! Session configuration from environment variables.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SLOTS_SEED` | entropy | Seed for the symbol generator |
//! | `SLOTS_INITIAL_BALANCE` | 200 | Starting credits |
//! | `SLOTS_SPIN_COST` | 2 | Credits per spin |
//! | `SLOTS_FRAME_MS` | 45 | Rolling frame spacing |
//! | `SLOTS_AUTOPLAY_DELAY_MS` | 750 | Autoplay delay (clamped to 300..=2000) |
//! | `SLOTS_TICK_MS` | 15 | Driver loop timestep |
//! | `SLOTS_LOG_PATH` | unset | Log file for the terminal UI |
//!
//! Unparseable values fall back to the default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::core::{MachineConfig, SlotMachine, SymbolGenerator};
use crate::types::{clamp_autoplay_delay, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub machine: MachineConfig,
    pub seed: Option<u64>,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            machine: MachineConfig::default(),
            seed: None,
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = MachineConfig::default();
        let read = |key: &str| lookup(key).map(|s| s.trim().to_string());

        let machine = MachineConfig {
            initial_balance: parse_or(read("SLOTS_INITIAL_BALANCE"), defaults.initial_balance)
                .max(0),
            spin_cost: parse_or(read("SLOTS_SPIN_COST"), defaults.spin_cost).max(0),
            frame_count: defaults.frame_count,
            frame_ms: parse_or(read("SLOTS_FRAME_MS"), defaults.frame_ms),
            autoplay_delay_ms: clamp_autoplay_delay(parse_or(
                read("SLOTS_AUTOPLAY_DELAY_MS"),
                defaults.autoplay_delay_ms,
            )),
        };

        Self {
            machine,
            seed: read("SLOTS_SEED").and_then(|s| s.parse().ok()),
            tick_ms: parse_or(read("SLOTS_TICK_MS"), TICK_MS).max(1),
            log_path: read("SLOTS_LOG_PATH")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_ms))
    }

    /// A machine seeded from `seed`, or from entropy when unset.
    pub fn build_machine(&self) -> SlotMachine {
        let generator = match self.seed {
            Some(seed) => SymbolGenerator::new(seed),
            None => SymbolGenerator::from_entropy(),
        };
        SlotMachine::with_config(self.machine, generator)
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, fallback: T) -> T {
    raw.and_then(|s| s.parse().ok()).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SessionConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SessionConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_env_gives_defaults() {
        assert_eq!(config_from(&[]), SessionConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let c = config_from(&[
            ("SLOTS_SEED", "42"),
            ("SLOTS_INITIAL_BALANCE", "50"),
            ("SLOTS_SPIN_COST", "5"),
            ("SLOTS_FRAME_MS", "1"),
            ("SLOTS_TICK_MS", "10"),
            ("SLOTS_LOG_PATH", "/tmp/slots.log"),
        ]);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.machine.initial_balance, 50);
        assert_eq!(c.machine.spin_cost, 5);
        assert_eq!(c.machine.frame_ms, 1);
        assert_eq!(c.tick(), Duration::from_millis(10));
        assert_eq!(c.log_path, Some(PathBuf::from("/tmp/slots.log")));
    }

    #[test]
    fn bad_values_fall_back_and_delay_is_clamped() {
        let c = config_from(&[
            ("SLOTS_SEED", "not-a-number"),
            ("SLOTS_SPIN_COST", "-3"),
            ("SLOTS_AUTOPLAY_DELAY_MS", "10"),
            ("SLOTS_TICK_MS", "0"),
            ("SLOTS_LOG_PATH", "  "),
        ]);
        assert_eq!(c.seed, None);
        assert_eq!(c.machine.spin_cost, 0);
        assert_eq!(c.machine.autoplay_delay_ms, 300);
        assert_eq!(c.tick_ms, 1);
        assert_eq!(c.log_path, None);
    }

    #[test]
    fn seeded_machines_match() {
        let c = config_from(&[("SLOTS_SEED", "7")]);
        assert_eq!(c.build_machine().reels(), c.build_machine().reels());
    }
}
