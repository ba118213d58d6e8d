//! Thread-safe control handle for a running application

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel::Sender;
use gauges_core::{Display, DisplayId, Theme, ThemeResolver};

/// Change to the display list, applied at the next frame boundary
pub(crate) enum Command {
    Add(Display),
    Remove(DisplayId),
}

/// Cloneable handle for stopping the loop and editing the dashboard from
/// event handlers, layers or other threads.
#[derive(Clone)]
pub struct AppHandle {
    stop: Arc<AtomicBool>,
    commands: Sender<Command>,
    theme: Arc<ThemeResolver>,
}

impl AppHandle {
    pub(crate) fn new(commands: Sender<Command>, theme: Arc<ThemeResolver>) -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            commands,
            theme,
        }
    }

    /// Ask the loop to exit at the top of its next iteration
    pub fn stop(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            log::info!("Stop requested");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Queue `display` for insertion on top of the others
    pub fn add_display(&self, display: Display) -> DisplayId {
        let id = display.id();
        self.send(Command::Add(display));
        id
    }

    /// Queue removal of a display; unknown ids are ignored
    pub fn remove_display(&self, id: DisplayId) {
        self.send(Command::Remove(id));
    }

    /// Switch the active theme; takes effect from the next frame's palette
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set_theme(theme);
    }

    pub fn clear_theme(&self) {
        self.theme.clear_theme();
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::warn!("Application is gone, dropping display command");
        }
    }
}

impl std::fmt::Debug for AppHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppHandle")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
