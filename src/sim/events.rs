//! Side effects emitted by the simulation
//!
//! The world never talks to audio or the DOM directly. It queues events during
//! a tick and the driver routes them to whichever collaborators it has; a unit
//! `()` collaborator swallows everything.

use serde::{Deserialize, Serialize};

/// Procedural sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Shoot,
    Explosion,
    Hit,
    PowerUp,
}

/// Weapon heat band shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatLevel {
    #[default]
    Normal,
    Warning,
    /// Latched until heat is back to zero
    Overheated,
}

/// Something outside the simulation should hear about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    Score(u64),
    LivesPercent(f32),
    EnergyPercent(f32),
    Heat(HeatLevel),
    Paused(bool),
    GameOver { final_score: u64 },
}

/// Audio collaborator: fire-and-forget cues
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);

    fn play_shoot(&mut self) {
        self.play(SoundCue::Shoot);
    }

    fn play_explosion(&mut self) {
        self.play(SoundCue::Explosion);
    }

    fn play_hit(&mut self) {
        self.play(SoundCue::Hit);
    }

    fn play_power_up(&mut self) {
        self.play(SoundCue::PowerUp);
    }
}

impl AudioSink for () {
    fn play(&mut self, _cue: SoundCue) {}
}

/// UI collaborator: score/lives/energy display and overlays
///
/// Every method defaults to a no-op so a partial HUD is fine.
pub trait HudSink {
    fn set_score(&mut self, _score: u64) {}
    fn set_lives_percent(&mut self, _percent: f32) {}
    fn set_energy_percent(&mut self, _percent: f32) {}
    fn set_heat_level(&mut self, _level: HeatLevel) {}
    fn set_paused(&mut self, _paused: bool) {}
    fn show_game_over(&mut self, _final_score: u64) {}
}

impl HudSink for () {}

/// Route queued events to the collaborators in emission order
pub fn dispatch_events<A, H>(events: impl IntoIterator<Item = GameEvent>, audio: &mut A, hud: &mut H)
where
    A: AudioSink + ?Sized,
    H: HudSink + ?Sized,
{
    for event in events {
        match event {
            GameEvent::Sound(cue) => audio.play(cue),
            GameEvent::Score(score) => hud.set_score(score),
            GameEvent::LivesPercent(p) => hud.set_lives_percent(p),
            GameEvent::EnergyPercent(p) => hud.set_energy_percent(p),
            GameEvent::Heat(level) => hud.set_heat_level(level),
            GameEvent::Paused(paused) => hud.set_paused(paused),
            GameEvent::GameOver { final_score } => hud.show_game_over(final_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<SoundCue>,
        score: Option<u64>,
        game_over: Option<u64>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.cues.push(cue);
        }
    }

    impl HudSink for Recorder {
        fn set_score(&mut self, score: u64) {
            self.score = Some(score);
        }
        fn show_game_over(&mut self, final_score: u64) {
            self.game_over = Some(final_score);
        }
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut audio = Recorder::default();
        let mut hud = Recorder::default();
        dispatch_events(
            [
                GameEvent::Sound(SoundCue::Shoot),
                GameEvent::Score(30),
                GameEvent::EnergyPercent(50.0),
                GameEvent::GameOver { final_score: 30 },
            ],
            &mut audio,
            &mut hud,
        );
        assert_eq!(audio.cues, vec![SoundCue::Shoot]);
        assert_eq!(hud.score, Some(30));
        assert_eq!(hud.game_over, Some(30));
    }

    #[test]
    fn test_unit_collaborators_swallow_everything() {
        dispatch_events(
            [GameEvent::Sound(SoundCue::Hit), GameEvent::Paused(true)],
            &mut (),
            &mut (),
        );
    }

    #[test]
    fn test_named_cues_map_to_play() {
        let mut audio = Recorder::default();
        audio.play_shoot();
        audio.play_explosion();
        audio.play_hit();
        audio.play_power_up();
        assert_eq!(
            audio.cues,
            vec![SoundCue::Shoot, SoundCue::Explosion, SoundCue::Hit, SoundCue::PowerUp]
        );
    }
}
