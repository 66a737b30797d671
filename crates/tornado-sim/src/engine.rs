//! Simulation engine for the tornado weapon and its projectiles.
//!
//! `SimulationEngine` owns the instance pool (and with it the hecs world),
//! the weapon, the upgrade bus and the RNG. The host queues commands,
//! publishes upgrades, reports contacts and calls `tick(dt)` once per frame.
//! Completely headless, enabling deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use tornado_core::commands::WeaponCommand;
use tornado_core::constants::{DEFAULT_POOL_CAPACITY, TORNADO_PROTOTYPE};
use tornado_core::enums::UpgradeType;
use tornado_core::events::UpgradeEvent;
use tornado_core::state::TickReport;
use tornado_core::types::{InstanceId, PrototypeId, SimTime, TargetId};

use crate::bus::UpgradeBus;
use crate::damage::DamageResolver;
use crate::pause::PauseFlag;
use crate::pool::InstancePool;
use crate::projectile::{self, TornadoProjectile};
use crate::systems;
use crate::systems::snapshot::TickEvents;
use crate::upgrades::UpgradeDataSource;
use crate::weapon::TornadoWeapon;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Maximum live tornadoes.
    pub pool_capacity: usize,
    /// Prototype the pool builds tornadoes from.
    pub prototype: PrototypeId,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool_capacity: DEFAULT_POOL_CAPACITY,
            prototype: TORNADO_PROTOTYPE,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    pool: InstancePool,
    prototype: PrototypeId,
    weapon: TornadoWeapon,
    bus: UpgradeBus,
    resolver: Box<dyn DamageResolver>,
    pause: PauseFlag,
    time: SimTime,
    rng: ChaCha8Rng,
    /// Where new tornadoes appear (the weapon holder's position).
    origin: Vec3,
    command_queue: VecDeque<WeaponCommand>,
    /// Overlaps reported by the host for the next tick.
    contacts: BTreeMap<InstanceId, Vec<TargetId>>,
    /// Manual spawns waiting for the next unpaused tick.
    pending_spawns: u32,
    recycle_buffer: Vec<InstanceId>,
}

impl SimulationEngine {
    /// Create an engine and activate its weapon at level 0.
    pub fn new(
        config: SimConfig,
        upgrades: &dyn UpgradeDataSource,
        resolver: Box<dyn DamageResolver>,
        pause: PauseFlag,
    ) -> Self {
        let mut pool = InstancePool::new(config.pool_capacity);
        pool.register_prototype(config.prototype, projectile::tornado_bundle);

        let settings = upgrades.upgrade_settings(UpgradeType::Tornado);
        if settings.is_none() {
            warn!("No upgrade settings for the tornado weapon");
        }

        let mut bus = UpgradeBus::new();
        let mut weapon = TornadoWeapon::new(settings);
        weapon.set_base_level();
        weapon.activate(&mut bus);

        info!(
            seed = config.seed,
            pool_capacity = config.pool_capacity,
            "Simulation engine created"
        );

        Self {
            pool,
            prototype: config.prototype,
            weapon,
            bus,
            resolver,
            pause,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            origin: Vec3::ZERO,
            command_queue: VecDeque::new(),
            contacts: BTreeMap::new(),
            pending_spawns: 0,
            recycle_buffer: Vec::new(),
        }
    }

    /// Queue a command for processing at the next unpaused tick.
    pub fn queue_command(&mut self, command: WeaponCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = WeaponCommand>) {
        self.command_queue.extend(commands);
    }

    /// Publish a player upgrade. Subscribers see it at their next unpaused tick.
    /// Returns the number of subscribers it was delivered to.
    pub fn publish_upgrade(&mut self, event: UpgradeEvent) -> usize {
        self.bus.publish(event)
    }

    /// Move the spawn origin.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Report the targets `instance` overlaps. Replaces any earlier report
    /// for the same instance; consumed by the next unpaused tick.
    pub fn report_contacts(&mut self, instance: InstanceId, targets: Vec<TargetId>) {
        self.contacts.insert(instance, targets);
    }

    /// Advance the simulation by `dt` seconds and return the resulting report.
    ///
    /// While the pause flag is set nothing advances: queued commands,
    /// upgrades and contacts wait for the next unpaused tick.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let paused = self.pause.is_paused();
        let mut events = TickEvents::default();

        if !paused {
            self.time.advance(dt);
            self.process_commands();
            self.weapon.poll_upgrades(&mut self.bus);
            self.run_systems(dt, &mut events);
        }

        systems::snapshot::build_report(
            self.pool.world(),
            self.time,
            paused,
            self.weapon.view(),
            self.pool.view(),
            events,
        )
    }

    /// Deactivate the weapon (unsubscribing it from upgrades).
    pub fn shutdown(&mut self) {
        self.weapon.deactivate(&mut self.bus);
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn weapon(&self) -> &TornadoWeapon {
        &self.weapon
    }

    pub fn pool(&self) -> &InstancePool {
        &self.pool
    }

    pub fn pause_flag(&self) -> &PauseFlag {
        &self.pause
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single weapon command.
    fn handle_command(&mut self, command: WeaponCommand) {
        match command {
            WeaponCommand::SetBaseLevel => self.weapon.set_base_level(),
            WeaponCommand::IncreaseLevel => self.weapon.increase_level(),
            WeaponCommand::SetBaseDamageMultiplier { multiplier } => {
                self.weapon.set_base_weapon_damage_multiplier(multiplier);
            }
            WeaponCommand::SpawnNow => {
                self.pending_spawns = self.pending_spawns.saturating_add(1);
            }
            WeaponCommand::Dissipate { instance } => {
                let applied = self.with_projectile(instance, |projectile| {
                    if !projectile.dissipate() {
                        debug!(instance = instance.0, "Tornado already dissipating");
                    }
                });
                if !applied {
                    warn!(instance = instance.0, "Dissipate for unknown tornado ignored");
                }
            }
            WeaponCommand::Wobble {
                instance,
                direction,
            } => {
                let applied = self.with_projectile(instance, |projectile| {
                    projectile.wobble(direction);
                });
                if !applied {
                    warn!(instance = instance.0, "Wobble for unknown tornado ignored");
                }
            }
        }
    }

    /// Run `f` on a live tornado. Returns false if the handle is not live.
    fn with_projectile(
        &mut self,
        instance: InstanceId,
        f: impl FnOnce(&mut TornadoProjectile),
    ) -> bool {
        let Some(entity) = self.pool.entity(instance) else {
            return false;
        };
        match self.pool.world().get::<&mut TornadoProjectile>(entity) {
            Ok(mut projectile) => {
                f(&mut projectile);
                true
            }
            Err(_) => false,
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, events: &mut TickEvents) {
        // 1. Lifecycle + motion, then release finished instances
        systems::projectiles::run(
            self.pool.world_mut(),
            &mut self.rng,
            self.time.elapsed_secs,
            dt,
            &mut self.recycle_buffer,
        );
        events.recycled =
            systems::projectiles::release_recycled(&mut self.pool, &mut self.recycle_buffer);

        // 2. Attack cadence + manual spawns
        let requests = self
            .weapon
            .tick(dt)
            .saturating_add(std::mem::take(&mut self.pending_spawns));
        systems::spawner::run(
            &mut self.pool,
            self.prototype,
            &self.weapon,
            self.resolver.as_ref(),
            &mut self.rng,
            self.origin,
            requests,
            events,
        );

        // 3. Damage against reported contacts
        events.damage = systems::damage::run(self.pool.world_mut(), &self.contacts, dt);
        self.contacts.clear();
    }
}
