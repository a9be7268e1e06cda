//! Async session runtime.
//!
//! A [`SlotMachine`] is owned by a single tokio task that ticks it on a fixed
//! interval and applies commands between ticks. Callers talk to it through a
//! [`SessionHandle`]:
//!
//! - commands go in over an mpsc channel and are acknowledged with the
//!   resulting snapshot,
//! - the latest [`MachineSnapshot`] is published on a watch channel,
//! - every settled [`SpinOutcome`] is broadcast.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::{MachineSnapshot, SlotMachine, SpinOutcome, SymbolSource};
use crate::error::{Result, RuntimeError};
use crate::types::Command;

const COMMAND_QUEUE: usize = 32;
const OUTCOME_QUEUE: usize = 64;

enum Request {
    Command(Command, oneshot::Sender<MachineSnapshot>),
    Shutdown(oneshot::Sender<MachineSnapshot>),
}

/// Cloneable command sender for a running session.
#[derive(Debug, Clone)]
pub struct Commander {
    requests: mpsc::Sender<Request>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Command(command, _) => f.debug_tuple("Command").field(command).finish(),
            Request::Shutdown(_) => f.write_str("Shutdown"),
        }
    }
}

impl Commander {
    /// Apply `command` and wait for the snapshot it produced.
    pub async fn send(&self, command: Command) -> Result<MachineSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(Request::Command(command, reply))
            .await
            .map_err(|_| RuntimeError::SessionClosed)?;
        rx.await.map_err(|_| RuntimeError::SessionClosed)
    }

    pub async fn request_spin(&self) -> Result<MachineSnapshot> {
        self.send(Command::RequestSpin).await
    }

    pub async fn set_autoplay(&self, enabled: bool) -> Result<MachineSnapshot> {
        self.send(Command::SetAutoplay { enabled }).await
    }

    pub async fn set_autoplay_delay(&self, ms: u32) -> Result<MachineSnapshot> {
        self.send(Command::SetAutoplayDelay { ms }).await
    }

    pub async fn reset_session(&self) -> Result<MachineSnapshot> {
        self.send(Command::ResetSession).await
    }
}

/// Owner handle for a running session task.
pub struct SessionHandle {
    commander: Commander,
    snapshots: watch::Receiver<MachineSnapshot>,
    outcomes: broadcast::Sender<SpinOutcome>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Spawn a session task driving `machine` every `tick`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(machine: SlotMachine<S>, tick: Duration) -> Self
    where
        S: SymbolSource + Send + 'static,
    {
        let (req_tx, req_rx) = mpsc::channel(COMMAND_QUEUE);
        let (snap_tx, snap_rx) = watch::channel(machine.snapshot());
        let (out_tx, _) = broadcast::channel(OUTCOME_QUEUE);

        let task = tokio::spawn(run_session(machine, tick, req_rx, snap_tx, out_tx.clone()));

        Self {
            commander: Commander { requests: req_tx },
            snapshots: snap_rx,
            outcomes: out_tx,
            task,
        }
    }

    pub fn commander(&self) -> Commander {
        self.commander.clone()
    }

    pub async fn send(&self, command: Command) -> Result<MachineSnapshot> {
        self.commander.send(command).await
    }

    pub async fn request_spin(&self) -> Result<MachineSnapshot> {
        self.commander.request_spin().await
    }

    pub async fn set_autoplay(&self, enabled: bool) -> Result<MachineSnapshot> {
        self.commander.set_autoplay(enabled).await
    }

    pub async fn set_autoplay_delay(&self, ms: u32) -> Result<MachineSnapshot> {
        self.commander.set_autoplay_delay(ms).await
    }

    pub async fn reset_session(&self) -> Result<MachineSnapshot> {
        self.commander.reset_session().await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> MachineSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Watch receiver that is notified after every tick and command.
    pub fn subscribe(&self) -> watch::Receiver<MachineSnapshot> {
        self.snapshots.clone()
    }

    /// Receiver for outcomes settled after this call.
    pub fn outcomes(&self) -> broadcast::Receiver<SpinOutcome> {
        self.outcomes.subscribe()
    }

    /// Stop the session task and return the final state.
    pub async fn shutdown(self) -> Result<MachineSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.commander
            .requests
            .send(Request::Shutdown(reply))
            .await
            .map_err(|_| RuntimeError::SessionClosed)?;
        let snapshot = rx.await.map_err(|_| RuntimeError::SessionClosed)?;
        let _ = self.task.await;
        Ok(snapshot)
    }
}

async fn run_session<S: SymbolSource>(
    mut machine: SlotMachine<S>,
    tick: Duration,
    mut requests: mpsc::Receiver<Request>,
    snapshots: watch::Sender<MachineSnapshot>,
    outcomes: broadcast::Sender<SpinOutcome>,
) {
    let mut interval = time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();
    let mut snap = machine.snapshot();

    info!(
        balance = machine.stats().balance,
        tick_ms = tick.as_millis() as u64,
        "slot session started"
    );

    loop {
        tokio::select! {
            request = requests.recv() => match request {
                Some(Request::Command(command, reply)) => {
                    let changed = machine.apply(command);
                    debug!(?command, changed, "command applied");
                    publish(&mut machine, &mut snap, &snapshots, &outcomes);
                    let _ = reply.send(snap.clone());
                }
                Some(Request::Shutdown(reply)) => {
                    machine.snapshot_into(&mut snap);
                    let _ = reply.send(snap.clone());
                    break;
                }
                None => break,
            },
            _ = interval.tick() => {
                let elapsed = last_tick.elapsed();
                let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
                last_tick += Duration::from_millis(u64::from(elapsed_ms));
                if machine.tick(elapsed_ms) {
                    publish(&mut machine, &mut snap, &snapshots, &outcomes);
                } else {
                    machine.snapshot_into(&mut snap);
                    snapshots.send_replace(snap.clone());
                }
            }
        }
    }

    let stats = machine.stats();
    info!(
        spins = stats.spins,
        balance = stats.balance,
        profit = stats.profit,
        "slot session stopped"
    );
}

/// Publish the current snapshot, then any newly settled outcome.
fn publish<S: SymbolSource>(
    machine: &mut SlotMachine<S>,
    snap: &mut MachineSnapshot,
    snapshots: &watch::Sender<MachineSnapshot>,
    outcomes: &broadcast::Sender<SpinOutcome>,
) {
    machine.snapshot_into(snap);
    snapshots.send_replace(snap.clone());
    if let Some(outcome) = machine.take_last_event() {
        info!(
            spin = outcome.id,
            tier = outcome.tier.as_str(),
            payout = outcome.payout,
            balance = snap.stats.balance,
            "spin settled"
        );
        // No subscribers is fine.
        let _ = outcomes.send(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MachineConfig, ScriptedSymbols};
    use crate::types::{Symbol, WinTier, SPIN_FRAME_COUNT};

    const TICK: Duration = Duration::from_millis(15);
    const LOSS: [Symbol; 3] = [Symbol::Cherry, Symbol::Bell, Symbol::Lemon];

    fn scripted(config: MachineConfig, outcomes: &[[Symbol; 3]]) -> SlotMachine<ScriptedSymbols> {
        let source = ScriptedSymbols::for_outcomes(outcomes, SPIN_FRAME_COUNT, Symbol::Grape);
        SlotMachine::with_source(config, source)
    }

    #[tokio::test(start_paused = true)]
    async fn manual_spin_settles_and_broadcasts() {
        let machine = scripted(MachineConfig::default(), &[[Symbol::Star; 3]]);
        let session = SessionHandle::spawn(machine, TICK);
        let mut outcomes = session.outcomes();

        let snap = session.request_spin().await.unwrap();
        assert!(snap.spinning);
        assert_eq!(snap.stats.balance, 198);

        let outcome = outcomes.recv().await.unwrap();
        assert_eq!(outcome.id, 1);
        assert_eq!(outcome.tier, WinTier::Jackpot);
        assert_eq!(outcome.payout, 48);

        let snap = session.snapshot();
        assert!(!snap.spinning);
        assert_eq!(snap.stats.balance, 246);
        assert_eq!(snap.last_outcome(), Some(&outcome));

        let last = session.shutdown().await.unwrap();
        assert_eq!(last.stats.spins, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_stops_when_broke() {
        let config = MachineConfig {
            initial_balance: 6,
            ..MachineConfig::default()
        };
        let session = SessionHandle::spawn(scripted(config, &[LOSS]), TICK);
        let mut snapshots = session.subscribe();

        let snap = session.set_autoplay(true).await.unwrap();
        assert!(snap.autoplay.enabled);

        let snap = snapshots
            .wait_for(|s| !s.autoplay.enabled)
            .await
            .unwrap()
            .clone();
        assert_eq!(snap.stats.spins, 3);
        assert_eq!(snap.stats.balance, 0);
        assert!(!snap.spinning);

        session.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_pending_autoplay() {
        let session = SessionHandle::spawn(scripted(MachineConfig::default(), &[LOSS]), TICK);

        session.set_autoplay(true).await.unwrap();
        let snap = session.reset_session().await.unwrap();
        assert!(!snap.autoplay.enabled);
        assert_eq!(snap.autoplay.next_spin_in_ms, None);

        time::sleep(Duration::from_secs(5)).await;
        let snap = session.snapshot();
        assert_eq!(snap.stats.spins, 0);
        assert_eq!(snap.stats.balance, 200);
    }

    #[tokio::test(start_paused = true)]
    async fn commands_after_shutdown_fail() {
        let session = SessionHandle::spawn(SlotMachine::new(1), TICK);
        let commander = session.commander();
        session.shutdown().await.unwrap();

        assert!(matches!(
            commander.request_spin().await,
            Err(RuntimeError::SessionClosed)
        ));
    }
}
