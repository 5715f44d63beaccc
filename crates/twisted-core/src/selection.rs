//! Architect overlay state: open/booting/closed, the current selection, and
//! the hidden keystroke trigger.
//!
//! Time is passed in explicitly (`now`) so the boot latency can be driven by
//! whatever clock the rendering surface ticks with.

use crate::keystrokes::KeystrokeBuffer;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Clicking toggles membership in a selection set
    #[default]
    Multi,
    /// Clicking replaces the single active target
    Single,
}

/// Outcome of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Opening started; the overlay opens once the boot delay has elapsed
    Booting,
    Closed,
    /// A boot was already in progress
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    mode: SelectionMode,
    boot_delay: Duration,
    open: bool,
    boot_started: Option<Instant>,
    selected: Vec<String>,
    active: Option<String>,
    keystrokes: KeystrokeBuffer,
}

impl SelectionController {
    pub fn new(mode: SelectionMode, boot_delay: Duration, trigger: &str) -> Self {
        Self {
            mode,
            boot_delay,
            open: false,
            boot_started: None,
            selected: Vec::new(),
            active: None,
            keystrokes: KeystrokeBuffer::new(trigger),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.selection_mode,
            settings.boot_delay(),
            &settings.trigger_phrase,
        )
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True while the open transition is still booting.
    pub fn is_busy(&self) -> bool {
        self.boot_started.is_some()
    }

    pub fn toggle_overlay(&mut self, now: Instant) -> Toggle {
        if self.is_busy() {
            debug!("overlay toggle ignored while booting");
            return Toggle::Ignored;
        }
        if self.open {
            self.close();
            return Toggle::Closed;
        }
        info!(delay_ms = self.boot_delay.as_millis() as u64, "architect overlay booting");
        self.boot_started = Some(now);
        Toggle::Booting
    }

    /// Finishes a pending boot once its delay has elapsed. Returns `true` on
    /// the tick that opened the overlay.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.boot_started {
            Some(started) if now.saturating_duration_since(started) >= self.boot_delay => {
                self.boot_started = None;
                self.open = true;
                info!("architect overlay open");
                true
            }
            _ => false,
        }
    }

    /// Panel close button: closes without going through the toggle.
    pub fn close_overlay(&mut self) {
        if self.open {
            self.close();
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.clear_selection();
        info!("architect overlay closed");
    }

    /// A click on a page element. Ignored unless the overlay is open.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.open {
            return false;
        }
        match self.mode {
            SelectionMode::Multi => {
                if let Some(pos) = self.selected.iter().position(|s| s == id) {
                    self.selected.remove(pos);
                } else {
                    self.selected.push(id.to_string());
                }
            }
            SelectionMode::Single => self.active = Some(id.to_string()),
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.active = None;
    }

    pub fn is_selected(&self, id: &str) -> bool {
        match self.mode {
            SelectionMode::Multi => self.selected.iter().any(|s| s == id),
            SelectionMode::Single => self.active.as_deref() == Some(id),
        }
    }

    /// Selected ids in selection order.
    pub fn selected_ids(&self) -> Vec<&str> {
        match self.mode {
            SelectionMode::Multi => self.selected.iter().map(String::as_str).collect(),
            SelectionMode::Single => self.active.as_deref().into_iter().collect(),
        }
    }

    /// What a mutation request should be aimed at, if anything.
    pub fn target(&self) -> Option<String> {
        match self.mode {
            SelectionMode::Multi if self.selected.is_empty() => None,
            SelectionMode::Multi => Some(self.selected.join(", ")),
            SelectionMode::Single => self.active.clone(),
        }
    }

    /// Keystroke watcher, fed every key by name (`"t"`, `"arrowdown"`).
    /// Keys typed into an editable field are not observed.
    pub fn on_key(&mut self, key: &str, in_editable: bool, now: Instant) -> Option<Toggle> {
        if in_editable {
            return None;
        }
        if self.keystrokes.push_key(key) {
            debug!("activation phrase typed");
            return Some(self.toggle_overlay(now));
        }
        None
    }

    pub fn keystrokes(&self) -> &KeystrokeBuffer {
        &self.keystrokes
    }
}
