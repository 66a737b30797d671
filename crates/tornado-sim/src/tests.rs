//! Tests for the simulation engine: cadence, spawning, pooling, damage,
//! pause semantics and determinism.

use glam::Vec3;

use tornado_core::commands::WeaponCommand;
use tornado_core::constants::*;
use tornado_core::enums::*;
use tornado_core::events::UpgradeEvent;
use tornado_core::settings::TornadoUpgradeSettings;
use tornado_core::state::TickReport;
use tornado_core::stats::{SpreadAugment, TornadoStats};
use tornado_core::table::ClampedTable;
use tornado_core::types::{InstanceId, TargetId};

use crate::damage::CriticalStrike;
use crate::engine::{SimConfig, SimulationEngine};
use crate::pause::PauseFlag;
use crate::upgrades::UpgradeLibrary;

const NO_CRIT: CriticalStrike = CriticalStrike {
    chance: 0.0,
    multiplier: 2.0,
};

fn engine_with(settings: TornadoUpgradeSettings, config: SimConfig) -> SimulationEngine {
    SimulationEngine::new(
        config,
        &UpgradeLibrary::with_tornado(settings),
        Box::new(NO_CRIT),
        PauseFlag::new(),
    )
}

fn single_level(stats: TornadoStats) -> TornadoUpgradeSettings {
    TornadoUpgradeSettings {
        per_level_settings: ClampedTable::new(vec![stats]),
        ..Default::default()
    }
}

/// Stats whose attack cadence never fires within a test; spawns come from `SpawnNow`.
fn manual_stats() -> TornadoStats {
    TornadoStats {
        attack_rate: 1000.0,
        attack_interval: 1000.0,
        ..Default::default()
    }
}

fn to_json(report: &TickReport) -> String {
    serde_json::to_string(report).unwrap()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(
        config,
        &UpgradeLibrary::with_tornado(TornadoUpgradeSettings::default()),
        Box::new(CriticalStrike::default()),
        PauseFlag::new(),
    );
    let mut engine_b = SimulationEngine::new(
        config,
        &UpgradeLibrary::with_tornado(TornadoUpgradeSettings::default()),
        Box::new(CriticalStrike::default()),
        PauseFlag::new(),
    );

    let mut live: Vec<InstanceId> = Vec::new();
    for tick in 0..600 {
        if tick == 100 {
            for engine in [&mut engine_a, &mut engine_b] {
                engine.publish_upgrade(UpgradeEvent {
                    upgrade_type: UpgradeType::Spread,
                    level: 2,
                });
                engine.queue_command(WeaponCommand::IncreaseLevel);
            }
        }
        for &instance in &live {
            engine_a.report_contacts(instance, vec![TargetId(1), TargetId(2)]);
            engine_b.report_contacts(instance, vec![TargetId(1), TargetId(2)]);
        }

        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);
        assert_eq!(to_json(&snap_a), to_json(&snap_b), "Reports diverged with same seed");
        live = snap_a.projectiles.iter().map(|p| p.instance).collect();
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine_with(
        TornadoUpgradeSettings::default(),
        SimConfig {
            seed: 111,
            ..Default::default()
        },
    );
    let mut engine_b = engine_with(
        TornadoUpgradeSettings::default(),
        SimConfig {
            seed: 222,
            ..Default::default()
        },
    );

    // Initial headings are random, so trajectories split soon after the first spawn.
    let mut diverged = false;
    for _ in 0..300 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);
        if to_json(&snap_a) != to_json(&snap_b) {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Cadence ----

#[test]
fn test_first_attack_at_half_interval_then_every_interval() {
    let mut engine = engine_with(TornadoUpgradeSettings::default(), SimConfig::default());
    let mut fired_at = Vec::new();
    for tick in 1..=20 {
        let report = engine.tick(0.5);
        if report.spawned > 0 {
            assert_eq!(report.spawned, 1);
            fired_at.push(tick as f32 * 0.5);
        }
    }
    assert_eq!(fired_at, vec![1.5, 4.5, 7.5]);
}

#[test]
fn test_count_plus_spread_bonus_spawns_five_in_one_tick() {
    let stats = TornadoStats {
        attack_rate: 1.0,
        attack_interval: 2.0,
        count: 3,
        ..Default::default()
    };
    let mut settings = single_level(stats);
    settings.spread_augment_settings = ClampedTable::new(vec![SpreadAugment {
        bonus_projectile_count: 2,
        spread_damage_multiplier: 0.5,
    }]);
    let mut engine = engine_with(settings, SimConfig::default());
    engine.publish_upgrade(UpgradeEvent {
        upgrade_type: UpgradeType::Spread,
        level: 1,
    });

    let report = engine.tick(0.5);
    assert_eq!(report.spawned, 5);
    assert_eq!(report.projectiles.len(), 5);
    assert_eq!(report.visual_params.len(), 15);
    assert_eq!(report.weapon.projectiles_per_attack, 5);
}

#[test]
fn test_upgrades_apply_on_next_tick() {
    let mut engine = engine_with(TornadoUpgradeSettings::default(), SimConfig::default());
    let before = engine.tick(DT).weapon;

    assert_eq!(
        engine.publish_upgrade(UpgradeEvent {
            upgrade_type: UpgradeType::AttackSpeed,
            level: 1,
        }),
        1
    );
    engine.publish_upgrade(UpgradeEvent {
        upgrade_type: UpgradeType::MaxHealth,
        level: 3,
    });
    let after = engine.tick(DT).weapon;

    assert_eq!(after.attack_interval, before.attack_interval - 0.25);
    assert_eq!(after.projectiles_per_attack, before.projectiles_per_attack);
}

#[test]
fn test_level_commands() {
    let mut engine = engine_with(TornadoUpgradeSettings::default(), SimConfig::default());
    engine.queue_commands([WeaponCommand::IncreaseLevel, WeaponCommand::IncreaseLevel]);
    assert_eq!(engine.tick(DT).weapon.level, 2);
    engine.queue_command(WeaponCommand::SetBaseLevel);
    assert_eq!(engine.tick(DT).weapon.level, 0);
}

// ---- Spawning and pooling ----

#[test]
fn test_pool_exhaustion_drops_spawns() {
    let stats = TornadoStats {
        attack_rate: 1.0,
        attack_interval: 2.0,
        count: 5,
        ..Default::default()
    };
    let mut engine = engine_with(
        single_level(stats),
        SimConfig {
            pool_capacity: 2,
            ..Default::default()
        },
    );

    let report = engine.tick(0.5);
    assert_eq!(report.spawned, 2);
    assert_eq!(report.dropped, 3);
    assert_eq!(report.pool.live, 2);
    assert_eq!(report.projectiles.len(), 2);
}

#[test]
fn test_spawn_at_origin_with_spawn_scale() {
    let mut engine = engine_with(single_level(manual_stats()), SimConfig::default());
    let origin = Vec3::new(10.0, 0.0, -4.0);
    engine.set_origin(origin);
    engine.queue_command(WeaponCommand::SpawnNow);

    let report = engine.tick(DT);
    assert_eq!(report.spawned, 1);
    let view = &report.projectiles[0];
    assert_eq!(view.position, origin);
    assert_eq!(view.scale, SPAWN_SCALE);
    assert_eq!(view.phase, LifecyclePhase::ScalingUp);
}

#[test]
fn test_recycled_exactly_once_and_slot_reused_with_new_handle() {
    let stats = TornadoStats {
        duration: 1.0,
        ..manual_stats()
    };
    let mut engine = engine_with(single_level(stats), SimConfig::default());
    engine.queue_command(WeaponCommand::SpawnNow);

    let first = engine.tick(0.1);
    let instance = first.projectiles[0].instance;

    let mut recycled = 0;
    let mut phases = vec![first.projectiles[0].phase];
    for _ in 0..100 {
        let report = engine.tick(0.1);
        recycled += report.recycled;
        if let Some(view) = report.projectiles.first() {
            if phases.last() != Some(&view.phase) {
                phases.push(view.phase);
            }
        }
    }
    assert_eq!(recycled, 1);
    assert_eq!(
        phases,
        vec![
            LifecyclePhase::ScalingUp,
            LifecyclePhase::Steady,
            LifecyclePhase::ScalingDown
        ]
    );
    assert_eq!(engine.pool().live_count(), 0);
    assert_eq!(engine.pool().dormant_count(), 1);

    engine.queue_command(WeaponCommand::SpawnNow);
    let report = engine.tick(0.1);
    assert_eq!(report.pool.dormant, 0);
    assert_ne!(report.projectiles[0].instance, instance);
    assert_eq!(report.projectiles[0].scale, SPAWN_SCALE);
    assert_eq!(report.projectiles[0].phase, LifecyclePhase::ScalingUp);
}

fn short_lived_stats() -> TornadoStats {
    TornadoStats {
        duration: 1.0,
        ..manual_stats()
    }
}

/// Number of ticks of `dt` from the spawn tick until the tornado is recycled.
fn ticks_until_recycled(dt: f32) -> usize {
    let mut engine = engine_with(single_level(short_lived_stats()), SimConfig::default());
    engine.queue_command(WeaponCommand::SpawnNow);
    engine.tick(dt);
    (1..=1000)
        .find(|_| engine.tick(dt).recycled == 1)
        .unwrap()
}

#[test]
fn test_stale_handle_commands_do_not_reach_new_tornado() {
    let mut engine = engine_with(single_level(short_lived_stats()), SimConfig::default());
    engine.queue_command(WeaponCommand::SpawnNow);
    let old = engine.tick(0.1).projectiles[0].instance;
    while engine.tick(0.1).recycled == 0 {}

    engine.queue_command(WeaponCommand::SpawnNow);
    let new = engine.tick(0.1).projectiles[0].instance;
    assert_ne!(old, new);

    engine.queue_commands([
        WeaponCommand::Dissipate { instance: old },
        WeaponCommand::Wobble {
            instance: old,
            direction: WobbleDirection::Up,
        },
    ]);
    let report = engine.tick(0.1);
    assert_eq!(report.projectiles.len(), 1);
    assert_eq!(report.projectiles[0].instance, new);
    assert_eq!(report.projectiles[0].phase, LifecyclePhase::ScalingUp);
    assert!(!report.projectiles[0].wobbling);
}

#[test]
fn test_stale_contacts_do_not_hit_new_tornado() {
    let recycle_tick = ticks_until_recycled(0.1);

    let mut engine = engine_with(single_level(short_lived_stats()), SimConfig::default());
    engine.queue_command(WeaponCommand::SpawnNow);
    let old = engine.tick(0.1).projectiles[0].instance;
    for _ in 1..recycle_tick {
        assert_eq!(engine.tick(0.1).recycled, 0);
    }

    // The old tornado recycles this tick and its slot is respawned at once.
    engine.report_contacts(old, vec![TargetId(42)]);
    engine.queue_command(WeaponCommand::SpawnNow);
    let report = engine.tick(0.1);
    assert_eq!(report.recycled, 1);
    assert_eq!(report.spawned, 1);
    assert_ne!(report.projectiles[0].instance, old);
    assert!(report.damage.is_empty());
}

#[test]
fn test_projectile_scales_up_then_moves() {
    let mut engine = engine_with(single_level(manual_stats()), SimConfig::default());
    engine.queue_command(WeaponCommand::SpawnNow);
    engine.tick(0.1);

    let mut previous = SPAWN_SCALE;
    for _ in 0..9 {
        let scale = engine.tick(0.1).projectiles[0].scale;
        assert!(scale > previous);
        previous = scale;
    }
    for _ in 0..30 {
        engine.tick(0.1);
    }
    let view = engine.tick(0.1).projectiles[0].clone();
    assert_eq!(view.scale, BASE_SCALE);
    assert_eq!(view.phase, LifecyclePhase::Steady);
    assert!(view.speed > 0.0);
    assert_ne!(view.position, Vec3::ZERO);
}

#[test]
fn test_missing_settings_never_fires() {
    let mut engine = SimulationEngine::new(
        SimConfig::default(),
        &UpgradeLibrary::new(),
        Box::new(NO_CRIT),
        PauseFlag::new(),
    );
    engine.queue_command(WeaponCommand::SpawnNow);
    let report = engine.tick(0.5);
    assert_eq!(report.spawned, 0);
    assert_eq!(report.dropped, 1);
    assert!(!report.weapon.configured);

    for _ in 0..100 {
        assert_eq!(engine.tick(0.5).spawned, 0);
    }
}

// ---- Damage ----

#[test]
fn test_contacts_damage_gated_by_interval() {
    let stats = TornadoStats {
        damage: 10.0,
        damage_interval: 0.5,
        duration: 100.0,
        ..manual_stats()
    };
    let mut engine = engine_with(single_level(stats), SimConfig::default());
    engine.queue_commands([
        WeaponCommand::SetBaseDamageMultiplier { multiplier: 2.0 },
        WeaponCommand::SpawnNow,
    ]);
    let instance = engine.tick(0.25).projectiles[0].instance;

    let mut hits = Vec::new();
    for _ in 0..8 {
        engine.report_contacts(instance, vec![TargetId(5)]);
        hits.extend(engine.tick(0.25).damage);
    }
    assert_eq!(hits.len(), 4);
    for hit in &hits {
        assert_eq!(hit.instance, instance);
        assert_eq!(hit.target, TargetId(5));
        assert_eq!(hit.amount, 20.0);
        assert!(!hit.is_critical);
        assert_eq!(hit.source, DamageSource::Tornado);
        assert!(hit.status_effect.is_none());
    }

    // Contacts are consumed by the tick they were reported for.
    assert!(engine.tick(0.25).damage.is_empty());
}

#[test]
fn test_status_effect_and_color_follow_level() {
    let settings = TornadoUpgradeSettings::default();
    let shock_color = settings.color_for(StatusEffect::Shock).unwrap();
    let mut engine = engine_with(settings, SimConfig::default());
    engine.queue_commands([
        WeaponCommand::IncreaseLevel,
        WeaponCommand::IncreaseLevel,
        WeaponCommand::SpawnNow,
    ]);
    let report = engine.tick(DT);
    assert_eq!(report.spawned, 1);

    let primary = report
        .visual_params
        .iter()
        .find(|p| p.name == VFX_PRIMARY_COLOR)
        .unwrap();
    assert_eq!(primary.value, shock_color.main);
    let secondary = report
        .visual_params
        .iter()
        .find(|p| p.name == VFX_SECONDARY_COLOR)
        .unwrap();
    assert_eq!(secondary.value, shock_color.secondary);

    let instance = report.projectiles[0].instance;
    engine.report_contacts(instance, vec![TargetId(1)]);
    let hit = engine.tick(DT).damage[0];
    assert_eq!(hit.status_effect.map(|s| s.effect), Some(StatusEffect::Shock));
}

// ---- Projectile commands ----

#[test]
fn test_dissipate_and_wobble_commands() {
    let mut engine = engine_with(single_level(manual_stats()), SimConfig::default());
    engine.queue_command(WeaponCommand::SpawnNow);
    let instance = engine.tick(0.1).projectiles[0].instance;

    engine.queue_command(WeaponCommand::Wobble {
        instance,
        direction: WobbleDirection::Up,
    });
    let report = engine.tick(0.1);
    assert!(report.projectiles[0].wobbling);

    engine.queue_command(WeaponCommand::Dissipate { instance });
    let report = engine.tick(0.1);
    assert_eq!(report.projectiles[0].phase, LifecyclePhase::ScalingDown);
}

#[test]
fn test_commands_for_unknown_instances_are_ignored() {
    let mut engine = engine_with(single_level(manual_stats()), SimConfig::default());
    engine.queue_commands([
        WeaponCommand::Dissipate {
            instance: InstanceId(999_999),
        },
        WeaponCommand::Wobble {
            instance: InstanceId(0),
            direction: WobbleDirection::Down,
        },
    ]);
    let report = engine.tick(DT);
    assert!(report.projectiles.is_empty());
}

// ---- Pause ----

#[test]
fn test_pause_is_a_resumable_no_op() {
    let pause = PauseFlag::new();
    let library = UpgradeLibrary::with_tornado(TornadoUpgradeSettings::default());
    let mut paused_engine =
        SimulationEngine::new(SimConfig::default(), &library, Box::new(NO_CRIT), pause.clone());
    let mut reference =
        SimulationEngine::new(SimConfig::default(), &library, Box::new(NO_CRIT), PauseFlag::new());

    for _ in 0..120 {
        paused_engine.tick(DT);
        reference.tick(DT);
    }

    pause.set_paused(true);
    let time_before = paused_engine.time();
    paused_engine.queue_command(WeaponCommand::IncreaseLevel);
    paused_engine.publish_upgrade(UpgradeEvent {
        upgrade_type: UpgradeType::Spread,
        level: 1,
    });
    for _ in 0..200 {
        let report = paused_engine.tick(DT);
        assert!(report.paused);
        assert_eq!(report.time, time_before);
        assert_eq!(report.spawned, 0);
        assert_eq!(report.weapon.level, 0);
    }

    pause.set_paused(false);
    reference.queue_command(WeaponCommand::IncreaseLevel);
    reference.publish_upgrade(UpgradeEvent {
        upgrade_type: UpgradeType::Spread,
        level: 1,
    });
    for _ in 0..300 {
        let a = paused_engine.tick(DT);
        let b = reference.tick(DT);
        assert_eq!(to_json(&a), to_json(&b));
    }
}

// ---- Shutdown ----

#[test]
fn test_shutdown_stops_weapon_and_unsubscribes() {
    let mut engine = engine_with(TornadoUpgradeSettings::default(), SimConfig::default());
    engine.shutdown();
    assert!(!engine.weapon().is_active());
    assert_eq!(
        engine.publish_upgrade(UpgradeEvent {
            upgrade_type: UpgradeType::Spread,
            level: 1,
        }),
        0
    );
    for _ in 0..40 {
        assert_eq!(engine.tick(0.5).spawned, 0);
    }
}
