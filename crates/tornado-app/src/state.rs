//! State shared between the host thread and the game loop thread.

use std::sync::{Arc, Mutex};

use glam::Vec3;
use serde::Serialize;

use tornado_core::commands::WeaponCommand;
use tornado_core::events::UpgradeEvent;
use tornado_core::state::TickReport;
use tornado_sim::pause::PauseFlag;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A weapon command to forward to the simulation engine.
    Weapon(WeaponCommand),
    /// A player upgrade to publish on the engine's upgrade bus.
    Upgrade(UpgradeEvent),
    /// Move the spawn origin (the player's position).
    SetOrigin(Vec3),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Running totals over a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunTotals {
    pub ticks: u64,
    pub paused_ticks: u64,
    pub spawned: u64,
    pub recycled: u64,
    pub dropped: u64,
    pub damage_events: u64,
    pub critical_hits: u64,
    pub damage_dealt: f64,
    pub peak_live: usize,
}

impl RunTotals {
    /// Fold one tick report into the totals.
    pub fn record(&mut self, report: &TickReport) {
        if report.paused {
            self.paused_ticks += 1;
            return;
        }
        self.ticks += 1;
        self.spawned += u64::from(report.spawned);
        self.recycled += u64::from(report.recycled);
        self.dropped += u64::from(report.dropped);
        self.damage_events += report.damage.len() as u64;
        self.critical_hits += report.damage.iter().filter(|d| d.is_critical).count() as u64;
        self.damage_dealt += report.damage.iter().map(|d| f64::from(d.amount)).sum::<f64>();
        self.peak_live = self.peak_live.max(report.pool.live);
    }
}

/// Shared host state.
///
/// - The pause flag is cloned into the engine; the host flips it directly.
/// - `Arc<Mutex<...>>` for the latest report and totals (written by the game loop thread).
#[derive(Default)]
pub struct AppState {
    pub pause: PauseFlag,
    /// Latest report for synchronous polling.
    pub latest_report: Arc<Mutex<Option<TickReport>>>,
    pub totals: Arc<Mutex<RunTotals>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
