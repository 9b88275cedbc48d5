//! Per-tick snapshot handed to every entity update

use glam::Vec2;

use crate::consts::FRAME_MS;

/// Read-only view of the world for one tick
///
/// The time scale is decided once at the start of the tick; entities read it
/// from here and never change it.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Real milliseconds since the previous frame
    pub dt: f32,
    /// Global time dilation for this tick
    pub time_scale: f32,
    pub width: f32,
    pub height: f32,
    /// Player top-left corner (what enemies aim at)
    pub player_pos: Vec2,
}

impl TickContext {
    /// Elapsed time expressed in 60 Hz reference frames
    #[inline]
    pub fn frames(&self) -> f32 {
        self.dt / FRAME_MS
    }

    /// Simulated milliseconds (real time dilated by the time scale)
    #[inline]
    pub fn scaled_dt(&self) -> f32 {
        self.dt * self.time_scale
    }
}
