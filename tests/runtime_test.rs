//! End-to-end checks of the async session and its wire types.

use std::time::Duration;

use serde_json::json;

use tui_slots::core::{MachineConfig, ScriptedSymbols, SlotMachine};
use tui_slots::runtime::{RuntimeError, SessionHandle};
use tui_slots::types::{Command, Symbol, WinTier};

const TICK: Duration = Duration::from_millis(15);

#[test]
fn commands_use_tagged_camel_case_json() {
    let spin: Command = serde_json::from_value(json!({ "type": "requestSpin" })).unwrap();
    assert_eq!(spin, Command::RequestSpin);

    let auto: Command =
        serde_json::from_value(json!({ "type": "setAutoplay", "enabled": true })).unwrap();
    assert_eq!(auto, Command::SetAutoplay { enabled: true });

    let delay = serde_json::to_value(Command::SetAutoplayDelay { ms: 900 }).unwrap();
    assert_eq!(delay, json!({ "type": "setAutoplayDelay", "ms": 900 }));

    let reset = serde_json::to_value(Command::ResetSession).unwrap();
    assert_eq!(reset, json!({ "type": "resetSession" }));
}

#[test]
fn snapshot_serializes_for_observers() {
    let mut m = SlotMachine::new(11);
    m.request_spin();
    m.tick(5000);

    let v = serde_json::to_value(m.snapshot()).unwrap();
    assert_eq!(v["spinning"], false);
    assert_eq!(v["stats"]["spins"], 1);
    assert_eq!(v["history"].as_array().unwrap().len(), 1);
    assert_eq!(v["history"][0]["id"], 1);
    assert!(v["reels"][0].is_string());
    assert_eq!(v["autoplay"]["delay_ms"], 750);
}

#[tokio::test(start_paused = true)]
async fn autoplay_session_streams_outcomes_until_broke() {
    let config = MachineConfig {
        initial_balance: 8,
        ..MachineConfig::default()
    };
    let source = ScriptedSymbols::for_outcomes(
        &[
            [Symbol::Cherry, Symbol::Bell, Symbol::Lemon],
            [Symbol::Seven, Symbol::Star, Symbol::Grape],
        ],
        config.frame_count,
        Symbol::Grape,
    );
    let session = SessionHandle::spawn(SlotMachine::with_source(config, source), TICK);
    let mut outcomes = session.outcomes();

    let snap = session.set_autoplay(true).await.unwrap();
    assert!(snap.autoplay.enabled);

    // Alternating loss (-2) and single (+2 net) never runs dry; stop after ten.
    let mut tiers = Vec::new();
    for _ in 0..10 {
        tiers.push(outcomes.recv().await.unwrap().tier);
    }
    assert_eq!(tiers[..4], [WinTier::Loss, WinTier::Single, WinTier::Loss, WinTier::Single]);

    let snap = session.set_autoplay(false).await.unwrap();
    assert!(!snap.autoplay.enabled);

    tokio::time::sleep(Duration::from_secs(10)).await;
    let last = session.shutdown().await.unwrap();
    assert!(last.stats.spins >= 10 && last.stats.spins <= 11);
    assert_eq!(last.stats.profit, last.stats.balance - 8);
}

#[tokio::test(start_paused = true)]
async fn delay_commands_are_clamped_by_the_session() {
    let session = SessionHandle::spawn(SlotMachine::new(5), TICK);

    assert_eq!(session.set_autoplay_delay(5).await.unwrap().autoplay.delay_ms, 300);
    assert_eq!(session.set_autoplay_delay(9000).await.unwrap().autoplay.delay_ms, 2000);
    assert_eq!(session.snapshot().autoplay.delay_ms, 2000);

    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn closed_session_rejects_commands() {
    let session = SessionHandle::spawn(SlotMachine::new(5), TICK);
    let commander = session.commander();
    let last = session.shutdown().await.unwrap();
    assert_eq!(last.stats.spins, 0);

    let err = commander.send(Command::ResetSession).await.unwrap_err();
    assert!(matches!(err, RuntimeError::SessionClosed));
}
