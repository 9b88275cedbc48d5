//! DOM HUD
//!
//! Looks elements up by id on every write; a page missing any of them
//! simply shows less.

use web_sys::{Document, Element};

use crate::sim::{HeatLevel, HudSink};

const SCORE: &str = "score-val";
const HEALTH_BAR: &str = "health-bar-fill";
const ENERGY_BAR: &str = "time-energy-bar";
const HEAT_WARNING: &str = "warning-display";
const GAME_OVER_SCREEN: &str = "game-over-screen";
const FINAL_SCORE: &str = "final-score";
const PAUSE_SCREEN: &str = "pause-screen";
pub const START_SCREEN: &str = "start-screen";

/// Writes HUD updates into the page
pub struct DomHud {
    document: Option<Document>,
}

impl Default for DomHud {
    fn default() -> Self {
        Self::new()
    }
}

impl DomHud {
    pub fn new() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        if document.is_none() {
            log::warn!("No document - HUD disabled");
        }
        Self { document }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_width_percent(&self, id: &str, percent: f32) {
        if let Some(el) = self.element(id) {
            let width = format!("width: {:.1}%", percent.clamp(0.0, 100.0));
            let _ = el.set_attribute("style", &width);
        }
    }

    /// Show or hide an overlay via the `hidden` class
    pub fn set_visible(&self, id: &str, visible: bool) {
        if let Some(el) = self.element(id) {
            let classes = el.class_list();
            let _ = if visible {
                classes.remove_1("hidden")
            } else {
                classes.add_1("hidden")
            };
        }
    }
}

impl HudSink for DomHud {
    fn set_score(&mut self, score: u64) {
        self.set_text(SCORE, &score.to_string());
    }

    fn set_lives_percent(&mut self, percent: f32) {
        self.set_width_percent(HEALTH_BAR, percent);
    }

    fn set_energy_percent(&mut self, percent: f32) {
        self.set_width_percent(ENERGY_BAR, percent);
    }

    fn set_heat_level(&mut self, level: HeatLevel) {
        let Some(el) = self.element(HEAT_WARNING) else {
            return;
        };
        let (text, class) = match level {
            HeatLevel::Normal => ("", "hidden"),
            HeatLevel::Warning => ("WEAPON HEAT CRITICAL", "level-1"),
            HeatLevel::Overheated => ("OVERHEATED - COOLING DOWN", "level-2"),
        };
        el.set_text_content(Some(text));
        el.set_class_name(class);
    }

    fn set_paused(&mut self, paused: bool) {
        self.set_visible(PAUSE_SCREEN, paused);
    }

    fn show_game_over(&mut self, final_score: u64) {
        self.set_text(FINAL_SCORE, &final_score.to_string());
        self.set_visible(GAME_OVER_SCREEN, true);
    }
}
