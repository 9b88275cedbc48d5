//! The player ship
//!
//! Movement is inertial (accelerate, then bleed speed through friction) and
//! runs on real time: a time freeze slows the world, never the pilot. The gun
//! builds heat per shot and latches into an overheat lockout that only clears
//! once the barrel is completely cold.

use glam::Vec2;

use super::context::TickContext;
use super::events::HeatLevel;
use super::geom::Rect;
use super::input::InputState;
use super::particles::Exhaust;
use super::projectile::Projectile;
use crate::consts::PLAYER_SIZE;
use crate::lerp_angle;
use crate::tuning::Tuning;

/// Velocity gained per tick of held input
const ACCELERATION: f32 = 0.6;
/// Velocity kept per tick
const FRICTION: f32 = 0.94;
/// Speed cap (units per tick)
const MAX_SPEED: f32 = 7.0;
/// Aim smoothing (fraction of the angular gap per tick)
const AIM_SMOOTHING: f32 = 0.15;
/// Bullet speed (units per frame)
const BULLET_SPEED: f32 = 15.0;
/// Muzzle distance from the ship center
const MUZZLE_OFFSET: f32 = 20.0;
/// Thruster distance behind the ship center
const THRUSTER_OFFSET: f32 = 20.0;

/// Weapon heat with a latched overheat
#[derive(Debug, Clone, PartialEq)]
pub struct Heat {
    pub value: f32,
    pub max: f32,
    pub per_shot: f32,
    /// Heat lost per real second
    pub decay_per_sec: f32,
    pub warning_threshold: f32,
    pub overheat_threshold: f32,
    pub overheated: bool,
}

impl Heat {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            value: 0.0,
            max: tuning.max_heat,
            per_shot: tuning.heat_per_shot,
            decay_per_sec: tuning.heat_decay_per_sec,
            warning_threshold: tuning.heat_warning_threshold,
            overheat_threshold: tuning.heat_overheat_threshold,
            overheated: false,
        }
    }

    /// Cool down by `dt` real milliseconds
    pub fn cool(&mut self, dt: f32) {
        if self.value > 0.0 {
            self.value = (self.value - self.decay_per_sec * dt / 1000.0).max(0.0);
        }
        self.update_latch();
    }

    pub fn add_shot(&mut self) {
        self.value = (self.value + self.per_shot).min(self.max);
        self.update_latch();
    }

    /// Crossing the upper threshold latches; only reaching zero releases
    fn update_latch(&mut self) {
        if self.value > self.overheat_threshold {
            self.overheated = true;
        }
        if self.overheated && self.value <= 0.0 {
            self.overheated = false;
        }
    }

    pub fn level(&self) -> HeatLevel {
        if self.overheated {
            HeatLevel::Overheated
        } else if self.value > self.warning_threshold {
            HeatLevel::Warning
        } else {
            HeatLevel::Normal
        }
    }
}

/// What the player produced this tick
#[derive(Debug, Clone, Default)]
pub struct PlayerOutput {
    pub shot: Option<Projectile>,
    /// Present while a movement key is held
    pub exhaust: Option<Exhaust>,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub angle: f32,

    pub shoot_timer: f32,
    pub base_shoot_interval: f32,
    pub shoot_interval: f32,

    pub rapid_fire_interval: f32,
    pub rapid_fire_duration: f32,
    /// Remaining real milliseconds of rapid fire (0 when inactive)
    pub rapid_fire_timer: f32,

    pub shield_duration: f32,
    /// Remaining real milliseconds of shield (0 when inactive)
    pub shield_timer: f32,

    pub heat: Heat,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            shoot_timer: 0.0,
            base_shoot_interval: tuning.shoot_interval,
            shoot_interval: tuning.shoot_interval,
            rapid_fire_interval: tuning.rapid_fire_interval,
            rapid_fire_duration: tuning.rapid_fire_duration,
            rapid_fire_timer: 0.0,
            shield_duration: tuning.shield_duration,
            shield_timer: 0.0,
            heat: Heat::from_tuning(tuning),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(PLAYER_SIZE))
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_timer > 0.0
    }

    pub fn is_rapid_fire(&self) -> bool {
        self.rapid_fire_timer > 0.0
    }

    pub fn is_overheated(&self) -> bool {
        self.heat.overheated
    }

    pub fn activate_rapid_fire(&mut self) {
        self.rapid_fire_timer = self.rapid_fire_duration;
        self.shoot_interval = self.rapid_fire_interval;
    }

    pub fn activate_shield(&mut self) {
        self.shield_timer = self.shield_duration;
    }

    /// Advance one tick on real time
    pub fn update(&mut self, ctx: &TickContext, input: &InputState) -> PlayerOutput {
        let dt = ctx.dt;

        if self.rapid_fire_timer > 0.0 {
            self.rapid_fire_timer -= dt;
            if self.rapid_fire_timer <= 0.0 {
                self.rapid_fire_timer = 0.0;
                self.shoot_interval = self.base_shoot_interval;
            }
        }

        self.heat.cool(dt);

        if self.shield_timer > 0.0 {
            self.shield_timer = (self.shield_timer - dt).max(0.0);
        }

        // Aim at the pointer
        let to_pointer = input.pointer.pos - self.center();
        let target = to_pointer.y.atan2(to_pointer.x);
        self.angle = lerp_angle(self.angle, target, AIM_SMOOTHING);

        // Inertial movement
        let axis = input.move_axis();
        if axis != Vec2::ZERO {
            self.vel += axis.normalize() * ACCELERATION;
        }
        self.vel *= FRICTION;
        let speed = self.vel.length();
        if speed > MAX_SPEED {
            self.vel *= MAX_SPEED / speed;
        }
        self.pos += self.vel;
        self.pos = self.pos.clamp(
            Vec2::ZERO,
            Vec2::new(
                (ctx.width - PLAYER_SIZE).max(0.0),
                (ctx.height - PLAYER_SIZE).max(0.0),
            ),
        );

        let mut output = PlayerOutput::default();

        if input.fire_held() && self.shoot_timer > self.shoot_interval {
            output.shot = self.shoot();
            self.shoot_timer = 0.0;
        }
        self.shoot_timer += dt;

        if input.thrusting() {
            let back = Vec2::new(self.angle.cos(), self.angle.sin()) * THRUSTER_OFFSET;
            output.exhaust = Some(Exhaust {
                pos: self.center() - back,
                angle: self.angle,
            });
        }

        output
    }

    /// Fire one bullet along the aim; a no-op while overheated
    pub fn shoot(&mut self) -> Option<Projectile> {
        if self.heat.overheated {
            return None;
        }
        let dir = Vec2::new(self.angle.cos(), self.angle.sin());
        let muzzle = self.center() + dir * MUZZLE_OFFSET;
        self.heat.add_shot();
        Some(Projectile::new(muzzle, dir * BULLET_SPEED, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(dt: f32) -> TickContext {
        TickContext {
            dt,
            time_scale: 1.0,
            width: 800.0,
            height: 600.0,
            player_pos: Vec2::ZERO,
        }
    }

    fn player() -> Player {
        Player::new(Vec2::new(380.0, 280.0), &Tuning::default())
    }

    #[test]
    fn test_ten_shots_overheat_and_lock() {
        let mut p = player();
        for _ in 0..10 {
            assert!(p.shoot().is_some());
        }
        assert_eq!(p.heat.value, 100.0);
        assert!(p.is_overheated());
        assert!(p.shoot().is_none());
        assert_eq!(p.heat.value, 100.0);

        p.update(&ctx(16.67), &InputState::new());
        assert!(p.is_overheated());
        let before = p.heat.value;
        assert!(p.shoot().is_none());
        assert_eq!(p.heat.value, before);
    }

    #[test]
    fn test_crossing_threshold_latches_on_the_shot() {
        let mut p = player();
        for _ in 0..8 {
            p.shoot();
        }
        // Exactly at the threshold is still a warning
        assert!(!p.is_overheated());
        assert_eq!(p.heat.level(), HeatLevel::Warning);

        assert!(p.shoot().is_some());
        assert!(p.is_overheated());
        assert!(p.shoot().is_none());
    }

    #[test]
    fn test_heat_clamps_at_max() {
        let mut p = player();
        for _ in 0..11 {
            p.shoot();
        }
        assert_eq!(p.heat.value, 100.0);
    }

    #[test]
    fn test_overheat_hysteresis() {
        let mut p = player();
        for _ in 0..10 {
            p.shoot();
        }
        p.heat.cool(0.0);
        assert!(p.is_overheated());

        // Cool to 50: still locked
        p.heat.cool(50.0 / 30.0 * 1000.0);
        assert!((p.heat.value - 50.0).abs() < 1e-3);
        assert!(p.is_overheated());
        assert!(p.shoot().is_none());
        assert_eq!(p.heat.level(), HeatLevel::Overheated);

        // Cool all the way: unlocked
        p.heat.cool(10_000.0);
        assert_eq!(p.heat.value, 0.0);
        assert!(!p.is_overheated());
        assert!(p.shoot().is_some());
    }

    #[test]
    fn test_heat_levels() {
        let mut heat = Heat::from_tuning(&Tuning::default());
        assert_eq!(heat.level(), HeatLevel::Normal);
        for _ in 0..5 {
            heat.add_shot();
        }
        assert_eq!(heat.level(), HeatLevel::Warning);
        for _ in 0..3 {
            heat.add_shot();
        }
        assert_eq!(heat.level(), HeatLevel::Warning);
        heat.add_shot();
        assert_eq!(heat.level(), HeatLevel::Overheated);
        heat.cool(0.0);
        assert_eq!(heat.level(), HeatLevel::Overheated);
    }

    #[test]
    fn test_movement_accelerates_with_friction_and_cap() {
        let mut p = player();
        let mut input = InputState::new();
        input.press("d");
        p.update(&ctx(16.67), &input);
        assert!((p.vel.x - 0.6 * 0.94).abs() < 1e-5);

        for _ in 0..200 {
            p.update(&ctx(16.67), &input);
        }
        assert!(p.vel.length() <= MAX_SPEED + 1e-4);
    }

    #[test]
    fn test_diagonal_input_is_normalized() {
        let mut p = player();
        let mut input = InputState::new();
        input.press("w");
        input.press("d");
        p.update(&ctx(16.67), &input);
        assert!((p.vel.length() - 0.6 * 0.94).abs() < 1e-5);
    }

    #[test]
    fn test_drift_decays_without_input() {
        let mut p = player();
        p.vel = Vec2::new(5.0, 0.0);
        p.update(&ctx(16.67), &InputState::new());
        assert!((p.vel.x - 4.7).abs() < 1e-5);
    }

    #[test]
    fn test_clamped_to_screen() {
        let mut p = player();
        p.pos = Vec2::new(-10.0, 700.0);
        p.update(&ctx(16.67), &InputState::new());
        assert_eq!(p.pos, Vec2::new(0.0, 560.0));
    }

    #[test]
    fn test_fire_respects_interval() {
        let mut p = player();
        let mut input = InputState::new();
        input.pointer.down = true;
        let mut shots = 0;
        // 100ms interval, 16.67ms ticks: shots on ticks 7, 13, 19 and 25
        for _ in 0..30 {
            if p.update(&ctx(16.67), &input).shot.is_some() {
                shots += 1;
            }
        }
        assert_eq!(shots, 4);
    }

    #[test]
    fn test_rapid_fire_expires_and_restores_interval() {
        let mut p = player();
        p.activate_rapid_fire();
        assert_eq!(p.shoot_interval, 50.0);
        assert!(p.is_rapid_fire());
        p.update(&ctx(4999.0), &InputState::new());
        assert_eq!(p.shoot_interval, 50.0);
        p.update(&ctx(2.0), &InputState::new());
        assert_eq!(p.shoot_interval, 100.0);
        assert!(!p.is_rapid_fire());
    }

    #[test]
    fn test_shield_runs_on_real_time() {
        let mut p = player();
        p.activate_shield();
        let frozen = TickContext {
            time_scale: 0.05,
            ..ctx(4000.0)
        };
        p.update(&frozen, &InputState::new());
        assert!(p.is_shielded());
        p.update(&frozen, &InputState::new());
        assert!(!p.is_shielded());
    }

    #[test]
    fn test_aim_smooths_toward_pointer() {
        let mut p = player();
        let mut input = InputState::new();
        // Pointer straight below the ship center
        input.pointer.pos = p.center() + Vec2::new(0.0, 100.0);
        p.update(&ctx(16.67), &input);
        assert!((p.angle - std::f32::consts::FRAC_PI_2 * 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_emits_exhaust_behind() {
        let mut p = player();
        let mut input = InputState::new();
        input.press("ArrowUp");
        let out = p.update(&ctx(16.67), &input);
        let exhaust = out.exhaust.expect("thrusting ship leaves exhaust");
        assert!(exhaust.pos.x < p.center().x);
    }
}
