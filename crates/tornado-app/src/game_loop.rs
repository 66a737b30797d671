//! Game loop thread. Runs the simulation engine at 60Hz.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Reports are folded into the shared run
//! totals and stored in shared state for synchronous polling.

use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use tornado_core::constants::{DT, TICK_RATE};
use tornado_core::settings::TornadoUpgradeSettings;
use tornado_core::state::TickReport;
use tornado_sim::damage::CriticalStrike;
use tornado_sim::pause::PauseFlag;
use tornado_sim::upgrades::UpgradeLibrary;
use tornado_sim::{SimConfig, SimulationEngine};

use crate::state::{AppState, GameLoopCommand, RunTotals};
use crate::targets::TargetField;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Everything the loop thread needs to build its engine.
pub struct LoopConfig {
    pub sim: SimConfig,
    pub settings: TornadoUpgradeSettings,
    pub targets: TargetField,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle; the thread exits on
/// `Shutdown` or when every sender is dropped.
pub fn spawn_game_loop(
    config: LoopConfig,
    state: &AppState,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let pause = state.pause.clone();
    let latest_report = Arc::clone(&state.latest_report);
    let totals = Arc::clone(&state.totals);

    let handle = std::thread::Builder::new()
        .name("tornado-game-loop".into())
        .spawn(move || {
            run_game_loop(config, pause, cmd_rx, &latest_report, &totals);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: LoopConfig,
    pause: PauseFlag,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_report: &Mutex<Option<TickReport>>,
    totals: &Mutex<RunTotals>,
) {
    let library = UpgradeLibrary::with_tornado(config.settings);
    let mut engine = SimulationEngine::new(
        config.sim,
        &library,
        Box::new(CriticalStrike::default()),
        pause,
    );
    let targets = config.targets;
    let mut last_report: Option<TickReport> = None;
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Weapon(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Upgrade(event)) => {
                    let delivered = engine.publish_upgrade(event);
                    debug!(
                        upgrade = ?event.upgrade_type,
                        level = event.level,
                        delivered,
                        "Upgrade published"
                    );
                }
                Ok(GameLoopCommand::SetOrigin(origin)) => engine.set_origin(origin),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    engine.shutdown();
                    info!(tick = engine.time().tick, "Game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Report overlaps seen in the previous tick's positions
        if let Some(report) = &last_report {
            for (instance, touching) in targets.contacts(report) {
                engine.report_contacts(instance, touching);
            }
        }

        // 3. Advance one tick (engine handles pause semantics internally)
        let report = engine.tick(DT);

        // 4. Fold into totals and store latest report for synchronous polling
        if let Ok(mut lock) = totals.lock() {
            lock.record(&report);
        }
        if let Ok(mut lock) = latest_report.lock() {
            *lock = Some(report.clone());
        }
        last_report = Some(report);

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use tornado_core::commands::WeaponCommand;
    use tornado_core::enums::UpgradeType;
    use tornado_core::events::UpgradeEvent;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Weapon(WeaponCommand::IncreaseLevel))
            .unwrap();
        tx.send(GameLoopCommand::Upgrade(UpgradeEvent {
            upgrade_type: UpgradeType::Spread,
            level: 1,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Weapon(WeaponCommand::IncreaseLevel)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Upgrade(UpgradeEvent {
                upgrade_type: UpgradeType::Spread,
                level: 1
            })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_loop_runs_and_shuts_down() {
        let state = AppState::new();
        let config = LoopConfig {
            sim: SimConfig::default(),
            settings: TornadoUpgradeSettings::default(),
            targets: TargetField::ring(Vec3::ZERO, 2.0, 4),
        };
        let (tx, handle) = spawn_game_loop(config, &state).unwrap();

        tx.send(GameLoopCommand::Weapon(WeaponCommand::SpawnNow))
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        let totals = *state.totals.lock().unwrap();
        assert!(totals.ticks > 0);
        assert!(totals.spawned >= 1);
        let report = state.latest_report.lock().unwrap();
        assert!(report.is_some());
    }

    #[test]
    fn test_paused_loop_does_not_advance() {
        let state = AppState::new();
        state.pause.set_paused(true);
        let config = LoopConfig {
            sim: SimConfig::default(),
            settings: TornadoUpgradeSettings::default(),
            targets: TargetField::ring(Vec3::ZERO, 2.0, 4),
        };
        let (tx, handle) = spawn_game_loop(config, &state).unwrap();

        std::thread::sleep(Duration::from_millis(100));
        drop(tx);
        handle.join().unwrap();

        let totals = *state.totals.lock().unwrap();
        assert_eq!(totals.ticks, 0);
        assert!(totals.paused_ticks > 0);
        let report = state.latest_report.lock().unwrap();
        assert_eq!(report.as_ref().map(|r| r.time.tick), Some(0));
    }
}
