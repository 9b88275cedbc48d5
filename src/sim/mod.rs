//! Simulation core
//!
//! All gameplay logic lives here, with no rendering or platform dependencies:
//! - Seeded RNG only, so a seed and an input script replay exactly
//! - Entities never touch each other; they return requests (shots, exhaust)
//! - The world applies collisions, then purges, once per tick
//! - Side effects leave as `GameEvent`s for audio and HUD collaborators

pub mod background;
pub mod context;
pub mod enemy;
pub mod events;
pub mod geom;
pub mod input;
pub mod meteor;
pub mod particles;
pub mod player;
pub mod powerup;
pub mod projectile;
pub mod shooting_star;
pub mod spawner;
pub mod world;

pub use background::Background;
pub use context::TickContext;
pub use enemy::{Enemy, EnemyKind, EnemyStats};
pub use events::{AudioSink, GameEvent, HeatLevel, HudSink, SoundCue, dispatch_events};
pub use geom::Rect;
pub use input::{InputState, PointerState};
pub use meteor::Meteor;
pub use particles::{Exhaust, Particle, ParticleManager};
pub use player::{Heat, Player, PlayerOutput};
pub use powerup::{PowerUp, PowerUpKind};
pub use projectile::Projectile;
pub use shooting_star::ShootingStar;
pub use spawner::{SpawnSide, Spawner};
pub use world::{GameMode, ScreenShake, World};
