//! Stasis Strike - A 2D arcade space shooter with a time-freeze mechanic
//!
//! Core modules:
//! - `sim`: Simulation core (entities, spawners, collisions, world state)
//! - `render`: Canvas drawing surface and per-entity shapes
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio` / `ui` (wasm only): Web Audio cues and DOM HUD

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference frame length in milliseconds (60 Hz)
    pub const FRAME_MS: f32 = 16.67;

    /// Player ship bounding box
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Player rests this far above the bottom edge after a restart
    pub const PLAYER_RESPAWN_OFFSET: f32 = 100.0;

    /// Enemy bounding box
    pub const ENEMY_SIZE: f32 = 40.0;
    /// Projectile bounding box
    pub const PROJECTILE_SIZE: f32 = 5.0;
    /// Power-up bounding box
    pub const POWERUP_SIZE: f32 = 20.0;
    /// Shooting star bounding box (hit radius is half of it)
    pub const SHOOTING_STAR_SIZE: f32 = 30.0;

    /// Off-screen margin before enemies, meteors and stars are culled
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Hard ceiling on player lives
    pub const MAX_LIVES: u32 = 20;

    /// Particles below this life are purged
    pub const PARTICLE_MIN_LIFE: f32 = 0.01;

    /// Screen shake duration (ms)
    pub const SHAKE_DURATION_MS: f32 = 200.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Step `current` toward `target` along the shortest arc by `factor` of the gap
#[inline]
pub fn lerp_angle(current: f32, target: f32, factor: f32) -> f32 {
    current + normalize_angle(target - current) * factor
}
