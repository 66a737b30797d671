use std::error::Error;
use std::time::{Duration, Instant};

use glam::Vec3;
use tracing::{error, info, warn};

use tornado_app::config;
use tornado_app::game_loop::{spawn_game_loop, LoopConfig, TICK_DURATION};
use tornado_app::state::{AppState, GameLoopCommand};
use tornado_app::targets::TargetField;
use tornado_core::commands::WeaponCommand;
use tornado_core::enums::UpgradeType;
use tornado_core::events::UpgradeEvent;
use tornado_core::settings::TornadoUpgradeSettings;
use tornado_sim::SimConfig;

/// Upgrades handed out in turn, one per scripted level-up.
const UPGRADE_CYCLE: [UpgradeType; 3] = [
    UpgradeType::Spread,
    UpgradeType::AttackSpeed,
    UpgradeType::ProjectileSize,
];

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn load_settings() -> TornadoUpgradeSettings {
    let Some(path) = config::settings_path() else {
        info!("TORNADO_SETTINGS not set, using built-in tuning");
        return TornadoUpgradeSettings::default();
    };
    match TornadoUpgradeSettings::load(&path) {
        Ok(settings) => {
            info!(path = %path.display(), levels = settings.per_level_settings.len(), "Loaded upgrade settings");
            settings
        }
        Err(e) => {
            error!(error = %e, "Failed to load upgrade settings, using built-in tuning");
            TornadoUpgradeSettings::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let run_for = config::run_duration();
    let level_up_every = config::level_up_every();
    let loop_config = LoopConfig {
        sim: SimConfig {
            seed: config::seed(),
            pool_capacity: config::pool_capacity(),
            ..SimConfig::default()
        },
        settings: load_settings(),
        targets: TargetField::ring(Vec3::ZERO, 6.0, 8),
    };

    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(loop_config, &state)?;
    tx.send(GameLoopCommand::SetOrigin(Vec3::ZERO))?;
    info!(run_secs = run_for.as_secs_f32(), "Session started");

    // Scripted session: level up on a timer, hand out an upgrade with each
    // level, and pause for a second halfway through.
    let started = Instant::now();
    let pause_at = run_for / 2;
    let mut paused_once = false;
    let mut level_ups = 0u32;
    let mut upgrade_levels = [0u32; UPGRADE_CYCLE.len()];

    while started.elapsed() < run_for {
        let elapsed = started.elapsed();

        if !level_up_every.is_zero() && elapsed >= level_up_every * (level_ups + 1) {
            level_ups += 1;
            tx.send(GameLoopCommand::Weapon(WeaponCommand::IncreaseLevel))?;

            let slot = (level_ups as usize - 1) % UPGRADE_CYCLE.len();
            upgrade_levels[slot] += 1;
            tx.send(GameLoopCommand::Upgrade(UpgradeEvent {
                upgrade_type: UPGRADE_CYCLE[slot],
                level: upgrade_levels[slot],
            }))?;
            info!(level_ups, upgrade = ?UPGRADE_CYCLE[slot], "Scripted level-up");
        }

        if !paused_once && elapsed >= pause_at {
            paused_once = true;
            state.pause.set_paused(true);
            info!("Paused");
            std::thread::sleep(Duration::from_secs(1));
            state.pause.set_paused(false);
            info!("Resumed");
        }

        std::thread::sleep(TICK_DURATION * 6);
    }

    tx.send(GameLoopCommand::Shutdown)?;
    if handle.join().is_err() {
        warn!("Game loop thread panicked");
    }

    let totals = match state.totals.lock() {
        Ok(lock) => *lock,
        Err(poisoned) => *poisoned.into_inner(),
    };
    info!(
        ticks = totals.ticks,
        spawned = totals.spawned,
        recycled = totals.recycled,
        damage = totals.damage_dealt,
        "Session finished"
    );
    println!("{}", serde_json::to_string_pretty(&totals)?);
    Ok(())
}
