//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a JSON blob can
//! retune a build without touching code. Times are in milliseconds.

use serde::{Deserialize, Serialize};

use crate::sim::SpawnSide;

/// Balance table consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Clock ===
    /// Time scale outside of a freeze
    pub base_time_scale: f32,
    /// Time scale while the freeze input is held with energy left
    pub frozen_time_scale: f32,

    // === Energy ===
    pub max_energy: f32,
    /// Energy drained per real second of freeze
    pub energy_drain_per_sec: f32,
    pub energy_per_enemy: f32,
    pub energy_per_shooting_star: f32,

    // === Heat ===
    pub max_heat: f32,
    pub heat_per_shot: f32,
    /// Heat lost per real second
    pub heat_decay_per_sec: f32,
    pub heat_warning_threshold: f32,
    pub heat_overheat_threshold: f32,

    // === Weapons and power-ups ===
    pub shoot_interval: f32,
    pub rapid_fire_interval: f32,
    pub rapid_fire_duration: f32,
    pub shield_duration: f32,
    pub powerup_lifetime: f32,
    pub powerup_drop_chance: f32,
    pub health_powerup_lives: u32,

    // === Spawners ===
    pub enemy_interval: f32,
    pub meteor_interval: f32,
    pub shooting_star_initial_interval: f32,
    pub shooting_star_interval_min: f32,
    pub shooting_star_interval_max: f32,
    /// Edges enemies may enter from (picked uniformly)
    pub enemy_spawn_sides: Vec<SpawnSide>,

    // === Run ===
    pub starting_lives: u32,
    pub initial_meteors: usize,

    // === Particles ===
    pub max_particles: usize,
    /// Whether particle motion and decay slow down during a freeze
    pub particles_follow_time_scale: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_time_scale: 1.0,
            frozen_time_scale: 0.05,

            max_energy: 100.0,
            energy_drain_per_sec: 40.0,
            energy_per_enemy: 15.0,
            energy_per_shooting_star: 50.0,

            max_heat: 100.0,
            heat_per_shot: 10.0,
            heat_decay_per_sec: 30.0,
            heat_warning_threshold: 40.0,
            heat_overheat_threshold: 80.0,

            shoot_interval: 100.0,
            rapid_fire_interval: 50.0,
            rapid_fire_duration: 5000.0,
            shield_duration: 8000.0,
            powerup_lifetime: 10_000.0,
            powerup_drop_chance: 0.2,
            health_powerup_lives: 5,

            enemy_interval: 800.0,
            meteor_interval: 5000.0,
            shooting_star_initial_interval: 10_000.0,
            shooting_star_interval_min: 5000.0,
            shooting_star_interval_max: 15_000.0,
            // Enemies only enter from the top for now (difficulty tuning)
            enemy_spawn_sides: vec![SpawnSide::Top],

            starting_lives: 10,
            initial_meteors: 3,

            max_particles: 200,
            particles_follow_time_scale: true,
        }
    }
}

impl Tuning {
    /// Parse a tuning blob; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse a tuning blob, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values into something playable
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        self.base_time_scale = self.base_time_scale.max(0.0);
        self.frozen_time_scale = self.frozen_time_scale.clamp(0.0, self.base_time_scale);
        self.max_energy = self.max_energy.max(0.0);
        self.energy_drain_per_sec = self.energy_drain_per_sec.max(0.0);
        self.max_heat = self.max_heat.max(0.0);
        self.heat_decay_per_sec = self.heat_decay_per_sec.max(0.0);
        self.powerup_drop_chance = self.powerup_drop_chance.clamp(0.0, 1.0);

        for (value, fallback) in [
            (&mut self.enemy_interval, defaults.enemy_interval),
            (&mut self.meteor_interval, defaults.meteor_interval),
            (
                &mut self.shooting_star_initial_interval,
                defaults.shooting_star_initial_interval,
            ),
        ] {
            if !(*value > 0.0) {
                log::warn!("Spawn interval {value} is not positive, using {fallback}");
                *value = fallback;
            }
        }

        if self.shooting_star_interval_min > self.shooting_star_interval_max {
            std::mem::swap(
                &mut self.shooting_star_interval_min,
                &mut self.shooting_star_interval_max,
            );
        }
        self.shooting_star_interval_min = self.shooting_star_interval_min.max(0.0);

        if self.enemy_spawn_sides.is_empty() {
            log::warn!("No enemy spawn sides configured, spawning from the top");
            self.enemy_spawn_sides = defaults.enemy_spawn_sides;
        }

        self.starting_lives = self.starting_lives.clamp(1, crate::consts::MAX_LIVES);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "enemy_interval": 400.0 }"#).unwrap();
        assert_eq!(tuning.enemy_interval, 400.0);
        assert_eq!(tuning.max_particles, 200);
        assert_eq!(tuning.enemy_spawn_sides, vec![SpawnSide::Top]);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_sanitize_clamps() {
        let tuning = Tuning {
            enemy_interval: -5.0,
            powerup_drop_chance: 3.0,
            shooting_star_interval_min: 9000.0,
            shooting_star_interval_max: 1000.0,
            enemy_spawn_sides: Vec::new(),
            starting_lives: 99,
            ..Default::default()
        }
        .sanitized();

        assert_eq!(tuning.enemy_interval, 800.0);
        assert_eq!(tuning.powerup_drop_chance, 1.0);
        assert_eq!(tuning.shooting_star_interval_min, 1000.0);
        assert_eq!(tuning.shooting_star_interval_max, 9000.0);
        assert_eq!(tuning.enemy_spawn_sides, vec![SpawnSide::Top]);
        assert_eq!(tuning.starting_lives, 20);
    }

    #[test]
    fn test_spawn_sides_round_trip_names() {
        let tuning = Tuning::from_json(r#"{ "enemy_spawn_sides": ["Top", "Left"] }"#).unwrap();
        assert_eq!(tuning.enemy_spawn_sides, vec![SpawnSide::Top, SpawnSide::Left]);
    }
}
