//! Headless autoplay run.
//!
//! Hosts the machine on the async session runtime, turns autoplay on, and
//! logs every settled spin until the bankroll runs dry, `--max-spins` is
//! reached, or Ctrl-C is pressed.

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use tui_slots::runtime::{telemetry, SessionConfig, SessionHandle};
use tui_slots::types::clamp_autoplay_delay;

#[derive(Debug, Parser)]
#[command(name = "slots-sim", about = "Run the slot engine on autoplay without a terminal UI")]
struct Cli {
    /// Symbol generator seed (overrides SLOTS_SEED).
    #[arg(long)]
    seed: Option<u64>,

    /// Autoplay delay in milliseconds, clamped to 300..=2000.
    #[arg(long)]
    delay_ms: Option<u32>,

    /// Spacing between rolling frames in milliseconds.
    #[arg(long)]
    frame_ms: Option<u32>,

    /// Stop after this many settled spins.
    #[arg(long, default_value_t = 100)]
    max_spins: u32,

    /// Print the final summary as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_stderr()?;

    let mut config = SessionConfig::from_env();
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(ms) = cli.delay_ms {
        config.machine.autoplay_delay_ms = clamp_autoplay_delay(ms);
    }
    if let Some(ms) = cli.frame_ms {
        config.machine.frame_ms = ms;
    }

    let session = SessionHandle::spawn(config.build_machine(), config.tick());
    let mut outcomes = session.outcomes();
    let mut snapshots = session.subscribe();

    let snap = session.set_autoplay(true).await?;
    if !snap.autoplay.enabled {
        warn!(balance = snap.stats.balance, "cannot afford a spin; nothing to do");
    } else {
        info!(
            delay_ms = snap.autoplay.delay_ms,
            max_spins = cli.max_spins,
            "autoplay started"
        );

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut settled = 0u32;

        loop {
            tokio::select! {
                received = outcomes.recv() => match received {
                    Ok(_) => {
                        settled += 1;
                        if settled >= cli.max_spins {
                            session.set_autoplay(false).await?;
                            info!(settled, "spin limit reached");
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "outcome stream lagged");
                        settled = settled.saturating_add(skipped as u32);
                    }
                    Err(RecvError::Closed) => break,
                },
                changed = snapshots.changed() => {
                    changed?;
                    let snap = snapshots.borrow_and_update();
                    if !snap.autoplay.enabled && !snap.spinning {
                        info!(balance = snap.stats.balance, "autoplay stopped");
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    warn!("interrupted");
                    break;
                }
            }
        }
    }

    let last = session.shutdown().await?;
    let stats = last.stats;

    if cli.json {
        let summary = json!({
            "seed": config.seed,
            "stats": stats,
            "winRate": stats.win_rate_percent(),
            "reels": last.reels,
            "recent": last.history.as_slice(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("spins     {}", stats.spins);
        println!("wins      {}", stats.wins);
        println!("jackpots  {}", stats.jackpots);
        println!("win rate  {}%", stats.win_rate_percent());
        println!("balance   {}", stats.balance);
        println!("profit    {:+}", stats.profit);
    }
    Ok(())
}
