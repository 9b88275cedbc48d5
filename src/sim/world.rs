//! World state and the per-frame update
//!
//! One `update` call is one tick, always in this order:
//! 1. decide the time scale (freeze input vs. energy)
//! 2. update every entity collection and run the spawners
//! 3. resolve collisions against the full, not-yet-purged collections
//! 4. purge everything marked for deletion
//!
//! Drawing happens afterwards in `render`, reading the world immutably.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::background::Background;
use super::context::TickContext;
use super::enemy::Enemy;
use super::events::{GameEvent, HeatLevel, SoundCue};
use super::geom::within_radius;
use super::input::InputState;
use super::meteor::Meteor;
use super::particles::ParticleManager;
use super::player::Player;
use super::powerup::{PowerUp, PowerUpKind};
use super::projectile::Projectile;
use super::shooting_star::{SHOOTING_STAR_SCORE, ShootingStar};
use super::spawner::{SpawnSide, Spawner};
use crate::consts::*;
use crate::tuning::Tuning;

/// Score for breaking a meteor
pub const METEOR_SCORE: u64 = 5;

// Screen shake magnitudes per impact
const SHAKE_ENEMY_FIRE: f32 = 5.0;
const SHAKE_ENEMY_CONTACT: f32 = 10.0;
const SHAKE_ENEMY_KILL: f32 = 2.0;
const SHAKE_METEOR_CONTACT: f32 = 20.0;
const SHAKE_STAR_CONTACT: f32 = 10.0;
const SHAKE_STAR_KILL: f32 = 5.0;

const PLAYER_COLOR: &str = "#0ff";
const ENEMY_FIRE_COLOR: &str = "#f00";
const METEOR_COLOR: &str = "#888";
const METEOR_CHIP_COLOR: &str = "#aaa";
const STAR_COLOR: &str = "#fff";

/// Offsets the decorative RNG stream from the gameplay one
const BACKGROUND_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Top-level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Attract screen: only the starfield runs
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Remaining screen shake
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenShake {
    pub magnitude: f32,
    /// Real milliseconds left
    pub remaining: f32,
}

impl ScreenShake {
    pub fn trigger(&mut self, magnitude: f32) {
        self.magnitude = magnitude;
        self.remaining = SHAKE_DURATION_MS;
    }

    pub fn update(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.remaining = 0.0;
                self.magnitude = 0.0;
            }
        }
    }

    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// The whole live simulation
#[derive(Debug, Clone)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub tuning: Tuning,
    pub mode: GameMode,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub meteors: Vec<Meteor>,
    pub powerups: Vec<PowerUp>,
    pub shooting_stars: Vec<ShootingStar>,
    pub particles: ParticleManager,
    pub background: Background,

    pub score: u64,
    pub lives: u32,
    pub energy: f32,
    /// Global time dilation, decided once per tick
    pub time_scale: f32,
    pub time_frozen: bool,
    pub shake: ScreenShake,

    pub enemy_spawner: Spawner,
    pub meteor_spawner: Spawner,
    pub star_spawner: Spawner,

    /// Real milliseconds simulated so far (drives cosmetic pulses)
    pub elapsed_ms: f64,

    seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
    reported_heat: HeatLevel,
    reported_energy: f32,
    pending_game_over: bool,
}

impl World {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_tuning(width, height, seed, Tuning::default())
    }

    /// Starts in menu mode; call `restart` to begin a run
    pub fn with_tuning(width: f32, height: f32, seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let player = Player::new(
            Vec2::new(width / 2.0 - PLAYER_SIZE / 2.0, height / 2.0),
            &tuning,
        );
        Self {
            width,
            height,
            mode: GameMode::Menu,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            meteors: Vec::new(),
            powerups: Vec::new(),
            shooting_stars: Vec::new(),
            particles: ParticleManager::new(tuning.max_particles, tuning.particles_follow_time_scale),
            background: Background::new(width, height, seed.wrapping_add(BACKGROUND_STREAM)),
            score: 0,
            lives: tuning.starting_lives,
            energy: tuning.max_energy,
            time_scale: tuning.base_time_scale,
            time_frozen: false,
            shake: ScreenShake::default(),
            enemy_spawner: Spawner::fixed(tuning.enemy_interval),
            meteor_spawner: Spawner::fixed(tuning.meteor_interval),
            star_spawner: Self::star_spawner(&tuning),
            elapsed_ms: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            reported_heat: HeatLevel::Normal,
            reported_energy: 100.0,
            pending_game_over: false,
            tuning,
        }
    }

    fn star_spawner(tuning: &Tuning) -> Spawner {
        Spawner::variable(
            tuning.shooting_star_initial_interval,
            tuning.shooting_star_interval_min,
            tuning.shooting_star_interval_max,
        )
    }

    /// Events queued since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn sound(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(cue));
    }

    pub fn energy_percent(&self) -> f32 {
        if self.tuning.max_energy > 0.0 {
            self.energy / self.tuning.max_energy * 100.0
        } else {
            0.0
        }
    }

    pub fn lives_percent(&self) -> f32 {
        (self.lives as f32 / self.tuning.starting_lives as f32 * 100.0).min(100.0)
    }

    // === Mode transitions ===

    /// Reset everything and start a fresh run
    pub fn restart(&mut self) {
        self.clear_entities();
        let tuning = &self.tuning;
        self.score = 0;
        self.lives = tuning.starting_lives;
        self.energy = tuning.max_energy;
        self.time_scale = tuning.base_time_scale;
        self.time_frozen = false;
        self.shake = ScreenShake::default();
        self.player = Player::new(
            Vec2::new(
                self.width / 2.0 - PLAYER_SIZE / 2.0,
                self.height - PLAYER_RESPAWN_OFFSET,
            ),
            tuning,
        );
        self.enemy_spawner = Spawner::fixed(tuning.enemy_interval);
        self.meteor_spawner = Spawner::fixed(tuning.meteor_interval);
        self.star_spawner = Self::star_spawner(tuning);
        self.pending_game_over = false;
        self.mode = GameMode::Playing;

        for _ in 0..self.tuning.initial_meteors {
            let meteor = Meteor::spawn(self.width, self.height, &mut self.rng);
            self.meteors.push(meteor);
        }

        self.reported_heat = HeatLevel::Normal;
        self.reported_energy = self.energy_percent();
        self.emit(GameEvent::Score(0));
        self.emit(GameEvent::LivesPercent(self.lives_percent()));
        self.emit(GameEvent::EnergyPercent(self.reported_energy));
        self.emit(GameEvent::Heat(HeatLevel::Normal));
        self.emit(GameEvent::Paused(false));
        log::info!("Run started (seed {}, {}x{})", self.seed, self.width, self.height);
    }

    /// Back to the attract screen
    pub fn reset_menu(&mut self) {
        self.clear_entities();
        self.time_scale = self.tuning.base_time_scale;
        self.time_frozen = false;
        self.shake = ScreenShake::default();
        self.mode = GameMode::Menu;
        self.emit(GameEvent::Paused(false));
        log::info!("Returned to menu");
    }

    pub fn toggle_pause(&mut self) {
        match self.mode {
            GameMode::Playing => {
                self.mode = GameMode::Paused;
                self.emit(GameEvent::Paused(true));
                log::info!("Paused");
            }
            GameMode::Paused => {
                self.mode = GameMode::Playing;
                self.emit(GameEvent::Paused(false));
                log::info!("Resumed");
            }
            GameMode::Menu | GameMode::GameOver => {}
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.background.resize(width, height);
    }

    fn clear_entities(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.meteors.clear();
        self.powerups.clear();
        self.shooting_stars.clear();
        self.particles.clear();
    }

    // === Tick ===

    /// Advance the world by `dt` real milliseconds
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let dt = dt.max(0.0);
        match self.mode {
            GameMode::Menu => {
                self.elapsed_ms += dt as f64;
                self.background.update(dt, self.time_scale);
                return;
            }
            GameMode::Paused | GameMode::GameOver => return,
            GameMode::Playing => {}
        }

        self.elapsed_ms += dt as f64;
        self.shake.update(dt);
        self.update_clock(dt, input);

        let ctx = TickContext {
            dt,
            time_scale: self.time_scale,
            width: self.width,
            height: self.height,
            player_pos: self.player.pos,
        };

        self.background.update(dt, ctx.time_scale);
        self.update_player(&ctx, input);

        // Enemies chase where the player is now
        let ctx = TickContext {
            player_pos: self.player.pos,
            ..ctx
        };
        self.update_entities(&ctx);
        self.resolve_collisions();
        self.purge();

        let energy = self.energy_percent();
        if energy != self.reported_energy {
            self.reported_energy = energy;
            self.emit(GameEvent::EnergyPercent(energy));
        }
        if self.pending_game_over {
            self.pending_game_over = false;
            self.emit(GameEvent::GameOver {
                final_score: self.score,
            });
        }
    }

    /// Freeze while the input is held and energy remains
    fn update_clock(&mut self, dt: f32, input: &InputState) {
        if input.freeze_held() && self.energy > 0.0 {
            self.time_frozen = true;
            self.time_scale = self.tuning.frozen_time_scale;
            self.energy = (self.energy - self.tuning.energy_drain_per_sec * dt / 1000.0).max(0.0);
        } else {
            self.time_frozen = false;
            self.time_scale = self.tuning.base_time_scale;
        }
    }

    fn update_player(&mut self, ctx: &TickContext, input: &InputState) {
        let output = self.player.update(ctx, input);
        if let Some(shot) = output.shot {
            self.projectiles.push(shot);
            self.sound(SoundCue::Shoot);
        }
        if let Some(exhaust) = output.exhaust {
            if self.rng.random_bool(0.5) {
                self.particles.thruster(exhaust.pos, exhaust.angle, &mut self.rng);
            }
        }

        let heat = self.player.heat.level();
        if heat != self.reported_heat {
            self.reported_heat = heat;
            self.emit(GameEvent::Heat(heat));
        }
    }

    fn update_entities(&mut self, ctx: &TickContext) {
        let scaled_dt = ctx.scaled_dt();

        for projectile in &mut self.projectiles {
            projectile.update(ctx);
        }

        if self.enemy_spawner.tick(scaled_dt, &mut self.rng) {
            let side = self
                .tuning
                .enemy_spawn_sides
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(SpawnSide::Top);
            let enemy = Enemy::spawn(side, self.width, self.height, &mut self.rng);
            log::debug!("Spawned {:?} from {:?}", enemy.kind, side);
            self.enemies.push(enemy);
        }
        for enemy in &mut self.enemies {
            if let Some(shot) = enemy.update(ctx) {
                self.projectiles.push(shot);
            }
        }

        for powerup in &mut self.powerups {
            powerup.update(ctx);
        }

        if self.meteor_spawner.tick(scaled_dt, &mut self.rng) {
            let meteor = Meteor::spawn(self.width, self.height, &mut self.rng);
            log::debug!("Spawned meteor (size {:.0})", meteor.size);
            self.meteors.push(meteor);
        }
        for meteor in &mut self.meteors {
            meteor.update(ctx);
        }

        if self.star_spawner.tick(scaled_dt, &mut self.rng) {
            log::debug!(
                "Spawned shooting star, next in {:.0}ms",
                self.star_spawner.interval
            );
            let star = ShootingStar::spawn(self.width, self.height, &mut self.rng);
            self.shooting_stars.push(star);
        }
        for star in &mut self.shooting_stars {
            let exhaust = star.update(ctx);
            self.particles.thruster(exhaust.pos, exhaust.angle, &mut self.rng);
        }

        self.particles.update(ctx);
    }

    // === Collisions ===

    /// Every rule runs over the full tick snapshot; marked entities still collide
    fn resolve_collisions(&mut self) {
        self.resolve_enemy_fire();
        self.resolve_enemy_contact();
        self.resolve_enemy_kills();
        self.resolve_powerup_pickups();
        self.resolve_meteor_contact();
        self.resolve_meteor_hits();
        self.resolve_star_contact();
        self.resolve_star_kills();
    }

    fn resolve_enemy_fire(&mut self) {
        let player_rect = self.player.rect();
        for i in 0..self.projectiles.len() {
            let projectile = &mut self.projectiles[i];
            if !projectile.is_enemy || !projectile.rect().overlaps(&player_rect) {
                continue;
            }
            projectile.marked_for_deletion = true;
            let at = projectile.pos;

            if !self.player.is_shielded() {
                self.take_damage(SHAKE_ENEMY_FIRE);
                self.sound(SoundCue::Hit);
            }
            self.particles.explosion(at, ENEMY_FIRE_COLOR, 5, &mut self.rng);
        }
    }

    fn resolve_enemy_contact(&mut self) {
        let player_rect = self.player.rect();
        for i in 0..self.enemies.len() {
            let enemy = &mut self.enemies[i];
            if !enemy.rect().overlaps(&player_rect) {
                continue;
            }
            enemy.marked_for_deletion = true;
            let (center, color) = (enemy.center(), enemy.stats().color);

            if self.player.is_shielded() {
                self.sound(SoundCue::Hit);
            } else {
                self.take_damage(SHAKE_ENEMY_CONTACT);
                self.sound(SoundCue::Explosion);
            }
            self.particles.explosion(center, color, 15, &mut self.rng);
        }
    }

    fn resolve_enemy_kills(&mut self) {
        for i in 0..self.enemies.len() {
            for j in 0..self.projectiles.len() {
                let (enemy, projectile) = (&mut self.enemies[i], &mut self.projectiles[j]);
                if projectile.is_enemy || !projectile.rect().overlaps(&enemy.rect()) {
                    continue;
                }
                enemy.marked_for_deletion = true;
                projectile.marked_for_deletion = true;
                let (pos, center, stats) = (enemy.pos, enemy.center(), enemy.stats());

                self.score += stats.score;
                self.gain_energy(self.tuning.energy_per_enemy);
                self.emit(GameEvent::Score(self.score));

                if self.rng.random_bool(self.tuning.powerup_drop_chance as f64) {
                    let powerup = PowerUp::spawn(pos, self.tuning.powerup_lifetime, &mut self.rng);
                    log::debug!("Dropped {:?} power-up", powerup.kind);
                    self.powerups.push(powerup);
                }

                self.particles.explosion(center, stats.color, 10, &mut self.rng);
                self.shake.trigger(SHAKE_ENEMY_KILL);
                self.sound(SoundCue::Explosion);
            }
        }
    }

    fn resolve_powerup_pickups(&mut self) {
        let player_rect = self.player.rect();
        for i in 0..self.powerups.len() {
            let powerup = &mut self.powerups[i];
            if !powerup.rect().overlaps(&player_rect) {
                continue;
            }
            powerup.marked_for_deletion = true;
            let kind = powerup.kind;
            self.sound(SoundCue::PowerUp);
            self.apply_powerup(kind);
        }
    }

    fn resolve_meteor_contact(&mut self) {
        let player_center = self.player.center();
        for i in 0..self.meteors.len() {
            let meteor = &mut self.meteors[i];
            let reach = meteor.size / 2.0 + PLAYER_SIZE / 3.0;
            if !within_radius(meteor.pos, player_center, reach) {
                continue;
            }
            meteor.marked_for_deletion = true;
            let at = meteor.pos;

            if self.player.is_shielded() {
                self.sound(SoundCue::Hit);
            } else {
                self.take_damage(SHAKE_METEOR_CONTACT);
                self.sound(SoundCue::Explosion);
            }
            self.particles.explosion(at, METEOR_COLOR, 20, &mut self.rng);
        }
    }

    fn resolve_meteor_hits(&mut self) {
        for i in 0..self.meteors.len() {
            for j in 0..self.projectiles.len() {
                let (meteor, projectile) = (&mut self.meteors[i], &mut self.projectiles[j]);
                if projectile.is_enemy || !within_radius(meteor.pos, projectile.pos, meteor.size) {
                    continue;
                }
                projectile.marked_for_deletion = true;
                let (chip_at, meteor_at) = (projectile.pos, meteor.pos);
                let destroyed = meteor.hit();

                self.sound(SoundCue::Hit);
                self.particles.explosion(chip_at, METEOR_CHIP_COLOR, 2, &mut self.rng);

                if destroyed {
                    self.sound(SoundCue::Explosion);
                    self.particles.explosion(meteor_at, METEOR_COLOR, 15, &mut self.rng);
                    self.score += METEOR_SCORE;
                    self.emit(GameEvent::Score(self.score));
                }
            }
        }
    }

    fn resolve_star_contact(&mut self) {
        let player_center = self.player.center();
        for i in 0..self.shooting_stars.len() {
            let star = &mut self.shooting_stars[i];
            let reach = star.radius() + PLAYER_SIZE / 3.0;
            if !within_radius(star.center(), player_center, reach) {
                continue;
            }
            star.marked_for_deletion = true;
            let at = star.center();

            // Ramming the bonus always hurts, shield or not
            self.take_damage(SHAKE_STAR_CONTACT);
            self.particles.explosion(at, STAR_COLOR, 10, &mut self.rng);
        }
    }

    fn resolve_star_kills(&mut self) {
        for i in 0..self.shooting_stars.len() {
            for j in 0..self.projectiles.len() {
                let (star, projectile) = (&mut self.shooting_stars[i], &mut self.projectiles[j]);
                let reach = star.radius() + PROJECTILE_SIZE / 2.0;
                if projectile.is_enemy || !within_radius(star.center(), projectile.rect().center(), reach)
                {
                    continue;
                }
                star.marked_for_deletion = true;
                projectile.marked_for_deletion = true;
                let at = star.center();

                self.score += SHOOTING_STAR_SCORE;
                self.gain_energy(self.tuning.energy_per_shooting_star);
                self.emit(GameEvent::Score(self.score));

                self.sound(SoundCue::PowerUp);
                self.particles.explosion(at, STAR_COLOR, 30, &mut self.rng);
                self.shake.trigger(SHAKE_STAR_KILL);
            }
        }
    }

    fn gain_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, self.tuning.max_energy);
    }

    fn apply_powerup(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => {
                self.lives = (self.lives + self.tuning.health_powerup_lives).min(MAX_LIVES);
                self.emit(GameEvent::LivesPercent(self.lives_percent()));
            }
            PowerUpKind::Energy => self.energy = self.tuning.max_energy,
            PowerUpKind::RapidFire => self.player.activate_rapid_fire(),
            PowerUpKind::Shield => self.player.activate_shield(),
        }
    }

    /// Lose one life and shake by `impact`; the last life ends the run
    fn take_damage(&mut self, impact: f32) {
        self.lives = self.lives.saturating_sub(1);
        self.emit(GameEvent::LivesPercent(self.lives_percent()));
        self.shake.trigger(impact);

        if self.lives == 0 && self.mode == GameMode::Playing {
            self.mode = GameMode::GameOver;
            self.pending_game_over = true;
            let at = self.player.center();
            self.particles.explosion(at, PLAYER_COLOR, 50, &mut self.rng);
            log::info!("Game over, final score {}", self.score);
        }
    }

    /// Drop everything marked during this tick
    fn purge(&mut self) {
        self.projectiles.retain(|p| !p.marked_for_deletion);
        self.enemies.retain(|e| !e.marked_for_deletion);
        self.powerups.retain(|p| !p.marked_for_deletion);
        self.meteors.retain(|m| !m.marked_for_deletion);
        self.shooting_stars.retain(|s| !s.marked_for_deletion);
        self.particles.enforce_cap();
    }
}
