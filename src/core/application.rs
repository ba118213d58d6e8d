//! The dashboard application loop
//!
//! One thread owns the surface and every display. Each frame applies queued
//! display commands, routes input, ingests every display's sources, advances
//! every display, renders them in registration order and presents the
//! surface, then sleeps until the next frame deadline.

use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{self, Receiver};
use gauges_core::{
    Color, Display, DisplayId, EventResponse, GaugeError, InputEvent, Palette, Result,
    SharedClock, Size, Surface, SurfaceBackend, SystemClock, ThemeResolver, WindowSpec,
    DEFAULT_FRAME_RATE,
};
use gauges_types::{roles, EventKind, Key};

use super::events::EventSource;
use super::frame_pacer::FramePacer;
use super::handle::{AppHandle, Command};
use super::overlay::FpsOverlay;

/// Lifecycle of an [`Application`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Created,
    Running,
    Stopped,
}

/// Runtime options of the application loop
#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    pub title: String,
    pub size: Size,
    pub frame_rate: u32,
    pub show_fps: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            title: "Gauges Dashboard".to_string(),
            size: Size::new(1280.0, 1024.0),
            frame_rate: DEFAULT_FRAME_RATE,
            show_fps: false,
        }
    }
}

/// Per-display counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayStats {
    /// Frames in which the display ingested and advanced successfully
    pub updates: u64,
    pub renders: u64,
    /// Frames in which the display was skipped after an error
    pub failures: u64,
}

/// Whole-loop counters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub frames: u64,
    /// Frames per second measured over the last full second
    pub fps: f64,
    pub last_dt: Duration,
    window_start: Option<Duration>,
    window_frames: u32,
}

impl FrameStats {
    fn record(&mut self, now: Duration, dt: Duration) {
        self.frames += 1;
        self.last_dt = dt;
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return;
        };
        self.window_frames += 1;
        let span = now.saturating_sub(start);
        if span >= Duration::from_secs(1) {
            self.fps = f64::from(self.window_frames) / span.as_secs_f64();
            self.window_start = Some(now);
            self.window_frames = 0;
            log::trace!("Measured {:.1} fps", self.fps);
        }
    }
}

/// Handler for events no display consumed
pub type GlobalHandler = Box<dyn FnMut(&InputEvent, &AppHandle) -> EventResponse>;

struct Entry {
    display: Display,
    stats: DisplayStats,
    healthy: bool,
}

impl Entry {
    fn new(display: Display) -> Self {
        Self {
            display,
            stats: DisplayStats::default(),
            healthy: true,
        }
    }

    fn fail(&mut self, stage: &str, error: &GaugeError) {
        self.stats.failures += 1;
        self.healthy = false;
        log::error!(
            "Display '{}' failed to {}: {}; skipped this frame",
            self.display.name(),
            stage,
            error
        );
    }
}

/// Owner of the surface, the displays and the frame loop
pub struct Application {
    options: AppOptions,
    state: AppState,
    backend: Box<dyn SurfaceBackend>,
    clock: SharedClock,
    theme: Arc<ThemeResolver>,
    displays: Vec<Entry>,
    event_sources: Vec<Box<dyn EventSource>>,
    handlers: Vec<GlobalHandler>,
    overlay: FpsOverlay,
    handle: AppHandle,
    commands: Receiver<Command>,
    frame_stats: FrameStats,
    flash: bool,
}

impl Application {
    /// Application on the system clock with the default theme resolver
    pub fn new(options: AppOptions, backend: impl SurfaceBackend + 'static) -> Self {
        Self::with_theme(options, backend, ThemeResolver::new())
    }

    pub fn with_theme(
        options: AppOptions,
        backend: impl SurfaceBackend + 'static,
        theme: ThemeResolver,
    ) -> Self {
        let (sender, commands) = channel::unbounded();
        let theme = Arc::new(theme);
        Self {
            overlay: FpsOverlay::new(options.show_fps),
            options,
            state: AppState::Created,
            backend: Box::new(backend),
            clock: SystemClock::shared(),
            handle: AppHandle::new(sender, Arc::clone(&theme)),
            theme,
            displays: Vec::new(),
            event_sources: Vec::new(),
            handlers: Vec::new(),
            commands,
            frame_stats: FrameStats::default(),
            flash: false,
        }
    }

    /// Replace the frame clock, e.g. with a `ManualClock` for reproducible runs
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn handle(&self) -> AppHandle {
        self.handle.clone()
    }

    pub fn theme(&self) -> &ThemeResolver {
        &self.theme
    }

    /// Register a display on top of the existing ones
    pub fn add_display(&mut self, display: Display) -> DisplayId {
        let id = display.id();
        log::info!(
            "Added display '{}' ({}) at {:?}",
            display.name(),
            id,
            display.bounds()
        );
        self.displays.push(Entry::new(display));
        id
    }

    pub fn remove_display(&mut self, id: DisplayId) -> Option<Display> {
        let index = self.displays.iter().position(|e| e.display.id() == id)?;
        let entry = self.displays.remove(index);
        log::info!("Removed display '{}' ({})", entry.display.name(), id);
        Some(entry.display)
    }

    pub fn add_event_source(&mut self, source: impl EventSource + 'static) {
        self.event_sources.push(Box::new(source));
    }

    /// Register a handler for events no display consumed
    pub fn on_event(
        &mut self,
        handler: impl FnMut(&InputEvent, &AppHandle) -> EventResponse + 'static,
    ) {
        self.handlers.push(Box::new(handler));
    }

    pub fn display(&self, id: DisplayId) -> Option<&Display> {
        self.entry(id).map(|e| &e.display)
    }

    pub fn display_mut(&mut self, id: DisplayId) -> Option<&mut Display> {
        self.displays
            .iter_mut()
            .find(|e| e.display.id() == id)
            .map(|e| &mut e.display)
    }

    /// Display ids in registration (drawing) order
    pub fn display_ids(&self) -> Vec<DisplayId> {
        self.displays.iter().map(|e| e.display.id()).collect()
    }

    pub fn display_count(&self) -> usize {
        self.displays.len()
    }

    pub fn display_stats(&self, id: DisplayId) -> Option<DisplayStats> {
        self.entry(id).map(|e| e.stats)
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.frame_stats
    }

    /// Run until stopped by a handle, `Escape` or a quit event
    pub fn run(&mut self) -> Result<()> {
        self.run_until(None)
    }

    /// Run until `duration` has passed on the application clock
    pub fn run_for(&mut self, duration: Duration) -> Result<()> {
        self.run_until(Some(duration))
    }

    fn entry(&self, id: DisplayId) -> Option<&Entry> {
        self.displays.iter().find(|e| e.display.id() == id)
    }

    fn run_until(&mut self, limit: Option<Duration>) -> Result<()> {
        match self.state {
            AppState::Created => {}
            AppState::Running => {
                log::warn!("Application is already running");
                return Ok(());
            }
            AppState::Stopped => {
                log::warn!("Application has stopped and cannot run again");
                return Ok(());
            }
        }

        let spec = WindowSpec {
            title: self.options.title.clone(),
            size: self.options.size,
        };
        let mut surface = self.backend.create_surface(&spec)?;

        self.state = AppState::Running;
        let start = self.clock.now();
        let deadline = limit.map(|limit| start + limit);
        let mut pacer = FramePacer::new(self.options.frame_rate, start);
        log::info!(
            "Running '{}' at {} fps with {} display(s)",
            self.options.title,
            pacer.frame_rate(),
            self.displays.len()
        );

        let result = loop {
            if self.handle.is_stopped() {
                break Ok(());
            }
            if deadline.map_or(false, |deadline| self.clock.now() >= deadline) {
                log::debug!("Run deadline reached");
                break Ok(());
            }

            self.apply_commands();

            let now = self.clock.now();
            let dt = pacer.begin_frame(now);
            let palette = self.theme.palette();
            self.dispatch_events(now);

            if let Err(e) = self.run_frame(surface.as_mut(), &palette, dt) {
                log::error!("Frame {} failed: {}", pacer.index(), e);
                break Err(e);
            }
            self.frame_stats.record(now, dt);

            let next = pacer.finish_frame(self.clock.now());
            self.clock.sleep_until(next);
        };

        self.state = AppState::Stopped;
        log::info!(
            "Stopped after {} frame(s)",
            self.frame_stats.frames
        );
        result
    }

    fn apply_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                Command::Add(display) => {
                    self.add_display(display);
                }
                Command::Remove(id) => {
                    if self.remove_display(id).is_none() {
                        log::debug!("Ignoring removal of unknown display {}", id);
                    }
                }
            }
        }
    }

    fn dispatch_events(&mut self, now: Duration) {
        let mut events = Vec::new();
        for source in &mut self.event_sources {
            events.extend(source.poll_events(now));
        }
        for event in &events {
            self.route_event(event);
        }
    }

    fn route_event(&mut self, event: &InputEvent) {
        match event.kind {
            EventKind::Quit | EventKind::Key { key: Key::Escape } => {
                self.handle.stop();
                return;
            }
            EventKind::Key { key: Key::F5 } => {
                log::info!("Refreshing all displays");
                for entry in &mut self.displays {
                    entry.display.refresh();
                }
                self.flash = true;
                return;
            }
            _ => {}
        }

        if let Some(position) = event.position() {
            for entry in self.displays.iter_mut().rev() {
                if entry.display.contains(position)
                    && entry.display.handle_event(event).is_handled()
                {
                    return;
                }
            }
        }

        for handler in &mut self.handlers {
            if handler(event, &self.handle).is_handled() {
                return;
            }
        }
        log::trace!("Unhandled event {:?}", event.kind);
    }

    fn run_frame(&mut self, surface: &mut dyn Surface, palette: &Palette, dt: Duration) -> Result<()> {
        // A refresh shows one blank frame in the flash color first
        if std::mem::take(&mut self.flash) {
            surface.clear(palette.resolve_or(roles::FLASH, Color::WHITE))?;
            surface.present()?;
        }

        // Every display drains its sources before any display advances, so a
        // sample pushed during this frame's updates waits for the next frame
        for entry in &mut self.displays {
            entry.healthy = true;
            if let Err(e) = entry.display.ingest() {
                entry.fail("ingest", &e);
            }
        }
        for entry in &mut self.displays {
            if !entry.healthy {
                continue;
            }
            match entry.display.advance(dt) {
                Ok(()) => entry.stats.updates += 1,
                Err(e) => entry.fail("update", &e),
            }
        }

        surface.clear(palette.resolve_or(roles::BACKGROUND, Color::BLACK))?;
        for entry in &mut self.displays {
            if !entry.healthy {
                continue;
            }
            match entry.display.render(surface, palette) {
                Ok(()) => entry.stats.renders += 1,
                Err(e) => entry.fail("render", &e),
            }
        }

        self.overlay.draw(surface, palette, self.frame_stats.fps)?;
        surface.present()
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("title", &self.options.title)
            .field("state", &self.state)
            .field("displays", &self.displays.len())
            .finish()
    }
}
