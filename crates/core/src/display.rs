//! Display: named roles bound to data sources plus an ordered layer stack

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::time::Duration;

use gauges_types::{InputEvent, Point, Rect, Sample, SampleValue};
use uuid::Uuid;

use crate::capability::{Capability, Requirement};
use crate::data_source::BoxedDataSource;
use crate::error::{GaugeError, Result};
use crate::history::HistoryBuffer;
use crate::layer::{EventResponse, Layer, LayerContext};
use crate::queue::SampleQueue;
use crate::surface::{Canvas, DrawList, Surface};
use crate::theme::Palette;

/// Instance identity of a display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayId(Uuid);

impl DisplayId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DisplayId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value generator used by a role while no source is bound to it.
///
/// Driven only by the display's accumulated elapsed time, so the output is
/// reproducible for a given sequence of `update` calls.
pub trait Simulator: Send {
    fn sample_at(&mut self, elapsed: Duration) -> SampleValue;
}

impl<F> Simulator for F
where
    F: FnMut(Duration) -> SampleValue + Send,
{
    fn sample_at(&mut self, elapsed: Duration) -> SampleValue {
        self(elapsed)
    }
}

/// A named input declared by a display
pub struct RoleSpec {
    name: String,
    requirement: Requirement,
    simulator: Box<dyn Simulator>,
}

impl RoleSpec {
    pub fn new(
        name: impl Into<String>,
        requirement: Requirement,
        simulator: impl Simulator + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            requirement,
            simulator: Box::new(simulator),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> Requirement {
        self.requirement
    }
}

impl fmt::Debug for RoleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleSpec")
            .field("name", &self.name)
            .field("requirement", &self.requirement)
            .finish_non_exhaustive()
    }
}

/// How a bound source is read each frame
enum Binding {
    Pull(BoxedDataSource),
    Push {
        source: BoxedDataSource,
        queue: SampleQueue,
    },
    Historical {
        source: BoxedDataSource,
        window: NonZeroUsize,
        poll_first: bool,
    },
}

impl Binding {
    fn source(&self) -> &BoxedDataSource {
        match self {
            Binding::Pull(source) => source,
            Binding::Push { source, .. } | Binding::Historical { source, .. } => source,
        }
    }

    fn into_source(self) -> BoxedDataSource {
        match self {
            Binding::Pull(source) => source,
            Binding::Push { source, .. } | Binding::Historical { source, .. } => source,
        }
    }
}

struct RoleSlot {
    spec: RoleSpec,
    binding: Option<Binding>,
    simulated: Option<HistoryBuffer>,
}

impl RoleSlot {
    fn new(spec: RoleSpec) -> Self {
        let simulated = spec.requirement.window().map(HistoryBuffer::new);
        Self {
            spec,
            binding: None,
            simulated,
        }
    }
}

/// Samples visible to layers during one frame, keyed by role name
#[derive(Debug, Clone, Default)]
pub struct Readings {
    latest: BTreeMap<String, Sample>,
    history: BTreeMap<String, Vec<Sample>>,
}

impl Readings {
    pub fn latest(&self, role: &str) -> Option<&Sample> {
        self.latest.get(role)
    }

    pub fn scalar(&self, role: &str) -> Option<f64> {
        self.latest(role).map(Sample::scalar)
    }

    pub fn pair(&self, role: &str) -> Option<(f64, f64)> {
        self.latest(role).map(Sample::pair)
    }

    /// History window for a historical role, oldest first
    pub fn history(&self, role: &str) -> &[Sample] {
        self.history.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    fn record(&mut self, role: &str, sample: Sample) {
        self.latest.insert(role.to_string(), sample);
    }

    fn record_history(&mut self, role: &str, samples: Vec<Sample>) {
        if let Some(last) = samples.last() {
            self.latest.insert(role.to_string(), *last);
        }
        self.history.insert(role.to_string(), samples);
    }
}

/// A redrawable dashboard widget.
///
/// Concrete displays (clock, horizon, line chart) are built by choosing roles
/// and layers; the update and render machinery is shared.
pub struct Display {
    id: DisplayId,
    name: String,
    bounds: Rect,
    roles: Vec<RoleSlot>,
    layers: Vec<Box<dyn Layer>>,
    readings: Readings,
    elapsed: Duration,
}

impl Display {
    pub fn new(name: impl Into<String>, bounds: Rect) -> Self {
        Self {
            id: DisplayId::new(),
            name: name.into(),
            bounds,
            roles: Vec::new(),
            layers: Vec::new(),
            readings: Readings::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_role(mut self, spec: RoleSpec) -> Self {
        self.add_role(spec);
        self
    }

    pub fn with_layer(mut self, layer: impl Layer + 'static) -> Self {
        self.push_layer(Box::new(layer));
        self
    }

    pub fn add_role(&mut self, spec: RoleSpec) {
        self.roles.retain(|slot| slot.spec.name != spec.name);
        self.roles.push(RoleSlot::new(spec));
    }

    /// Add a layer on top of the existing ones
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    pub fn id(&self) -> DisplayId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    fn slot(&self, role: &str) -> Option<&RoleSlot> {
        self.roles.iter().find(|slot| slot.spec.name == role)
    }

    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|slot| slot.spec.name.as_str())
    }

    pub fn requirement(&self, role: &str) -> Option<Requirement> {
        self.slot(role).map(|slot| slot.spec.requirement)
    }

    pub fn is_bound(&self, role: &str) -> bool {
        self.slot(role).map_or(false, |slot| slot.binding.is_some())
    }

    /// Id of the source bound to `role`, if any
    pub fn bound_source(&self, role: &str) -> Option<&str> {
        self.slot(role)
            .and_then(|slot| slot.binding.as_ref())
            .map(|binding| binding.source().metadata().id.as_str())
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// First layer of type `T`
    pub fn layer<T: Layer + 'static>(&self) -> Option<&T> {
        self.layers
            .iter()
            .find_map(|layer| layer.as_any().downcast_ref::<T>())
    }

    pub fn layer_mut<T: Layer + 'static>(&mut self) -> Option<&mut T> {
        self.layers
            .iter_mut()
            .find_map(|layer| layer.as_any_mut().downcast_mut::<T>())
    }

    /// Associate `source` with `role`.
    ///
    /// The source's capabilities are checked here, not at first use. A role
    /// that already had a source is rebound and the old source dropped.
    pub fn bind(&mut self, role: &str, mut source: BoxedDataSource) -> Result<()> {
        let display = self.name.clone();
        let slot = self
            .roles
            .iter_mut()
            .find(|slot| slot.spec.name == role)
            .ok_or_else(|| GaugeError::NoSuchRole {
                display: display.clone(),
                role: role.to_string(),
            })?;

        let required = slot.spec.requirement;
        let offered = source.capabilities();
        if !required.is_satisfied_by(offered) {
            return Err(GaugeError::IncompatibleSource {
                display,
                role: role.to_string(),
                source_id: source.metadata().id.clone(),
                required,
                offered,
            });
        }

        let binding = match required {
            Requirement::Historical { window } => Binding::Historical {
                source,
                window,
                poll_first: offered.contains(Capability::Pull),
            },
            Requirement::Pull => Binding::Pull(source),
            Requirement::Live if offered.contains(Capability::Pull) => Binding::Pull(source),
            Requirement::Live | Requirement::Push => {
                let queue = SampleQueue::bounded(SampleQueue::DEFAULT_CAPACITY);
                source.subscribe(queue.clone())?;
                Binding::Push { source, queue }
            }
        };

        log::info!(
            "Display '{}': bound source '{}' to role '{}' ({})",
            self.name,
            binding.source().metadata().id,
            role,
            required
        );
        slot.binding = Some(binding);
        Ok(())
    }

    /// Detach the source bound to `role`; the role goes back to its simulator
    pub fn unbind(&mut self, role: &str) -> Option<BoxedDataSource> {
        let slot = self.roles.iter_mut().find(|slot| slot.spec.name == role)?;
        slot.binding.take().map(Binding::into_source)
    }

    /// `ingest` followed by `advance`
    pub fn update(&mut self, dt: Duration) -> Result<()> {
        self.ingest()?;
        self.advance(dt)
    }

    /// Read every bound source: poll PULL roles, drain PUSH queues and query
    /// history for HISTORICAL roles.
    ///
    /// A historical source that can also be pulled is polled once before its
    /// history is read, so recording sources advance once per frame.
    ///
    /// Samples pushed after this call are not seen until the next frame.
    pub fn ingest(&mut self) -> Result<()> {
        for slot in &mut self.roles {
            let role = slot.spec.name.as_str();
            match &mut slot.binding {
                None => {}
                Some(Binding::Pull(source)) => {
                    let sample = source.poll()?;
                    self.readings.record(role, sample);
                }
                Some(Binding::Push { queue, .. }) => {
                    let drained = queue.drain();
                    if drained.len() > 1 {
                        log::trace!("Role '{}': drained {} samples", role, drained.len());
                    }
                    if let Some(last) = drained.last() {
                        self.readings.record(role, *last);
                    }
                }
                Some(Binding::Historical {
                    source,
                    window,
                    poll_first,
                }) => {
                    if *poll_first {
                        source.poll()?;
                    }
                    let samples = source.history(*window)?;
                    self.readings.record_history(role, samples);
                }
            }
        }
        Ok(())
    }

    /// Advance the display's clock by `dt`, evaluate simulators for unbound
    /// roles, then update every layer in order.
    pub fn advance(&mut self, dt: Duration) -> Result<()> {
        self.elapsed += dt;
        let elapsed = self.elapsed;

        for slot in &mut self.roles {
            if slot.binding.is_some() {
                continue;
            }
            let sample = Sample::new(elapsed, slot.spec.simulator.sample_at(elapsed));
            match (&mut slot.simulated, slot.spec.requirement.window()) {
                (Some(buffer), Some(window)) => {
                    buffer.push(sample);
                    self.readings
                        .record_history(&slot.spec.name, buffer.last_n(window));
                }
                _ => self.readings.record(&slot.spec.name, sample),
            }
        }

        let ctx = LayerContext {
            dt,
            elapsed,
            readings: &self.readings,
        };
        for layer in &mut self.layers {
            layer.update(&ctx)?;
        }
        Ok(())
    }

    /// Draw every layer, back to front, clipped to the display's bounds.
    ///
    /// Layers draw into a [`DrawList`] first; nothing reaches `surface`
    /// unless every layer succeeds.
    pub fn render(&self, surface: &mut dyn Surface, palette: &Palette) -> Result<()> {
        let mut list = DrawList::new(&*surface);
        let mut canvas = Canvas::new(&mut list, self.bounds);
        for layer in &self.layers {
            layer.render(&mut canvas, palette).map_err(|e| {
                log::debug!(
                    "Display '{}': layer '{}' failed to render: {}",
                    self.name,
                    layer.name(),
                    e
                );
                e
            })?;
        }
        for op in list.into_ops() {
            op.apply(surface)?;
        }
        Ok(())
    }

    /// Offer an event to the layers, foreground first.
    ///
    /// Pointer coordinates are converted to display-local ones.
    pub fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        let local = event.relative_to(self.bounds.origin());
        for layer in self.layers.iter_mut().rev() {
            if layer.handle_event(&local).is_handled() {
                log::debug!(
                    "Display '{}': event handled by layer '{}'",
                    self.name,
                    layer.name()
                );
                return EventResponse::Handled;
            }
        }
        EventResponse::Ignored
    }

    /// Force every layer to drop cached state
    pub fn refresh(&mut self) {
        for layer in &mut self.layers {
            layer.refresh();
        }
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Display")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("roles", &self.role_names().collect::<Vec<_>>())
            .field("layers", &self.layer_names())
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilitySet;
    use crate::data_source::{DataSource, SourceMetadata};
    use crate::layer::{Backdrop, BackdropShape};
    use gauges_types::{roles, Color, EventKind, PointerButton, Size, Theme};
    use std::any::Any;

    #[derive(Default)]
    struct CountingSurface {
        primitives: usize,
    }

    impl Surface for CountingSurface {
        fn size(&self) -> Size {
            Size::new(640.0, 480.0)
        }

        fn clear(&mut self, _color: Color) -> Result<()> {
            Ok(())
        }

        fn draw_primitive(
            &mut self,
            _shape: &crate::surface::Shape,
            _color: Color,
            _bounds: Rect,
        ) -> Result<()> {
            self.primitives += 1;
            Ok(())
        }

        fn draw_text(&mut self, _text: &str, _position: Point, _color: Color) -> Result<()> {
            Ok(())
        }

        fn present(&mut self) -> Result<()> {
            Ok(())
        }
    }

    struct Counter {
        metadata: SourceMetadata,
        capabilities: CapabilitySet,
        value: f64,
    }

    impl Counter {
        fn boxed(capabilities: CapabilitySet) -> BoxedDataSource {
            Box::new(Self {
                metadata: SourceMetadata::new("counter", "Counter", "counts polls"),
                capabilities,
                value: 0.0,
            })
        }
    }

    impl DataSource for Counter {
        fn metadata(&self) -> &SourceMetadata {
            &self.metadata
        }

        fn capabilities(&self) -> CapabilitySet {
            self.capabilities
        }

        fn poll(&mut self) -> Result<Sample> {
            self.value += 1.0;
            Ok(Sample::new(Duration::ZERO, self.value))
        }

        fn history(&self, n: NonZeroUsize) -> Result<Vec<Sample>> {
            Ok((0..n.get().min(3))
                .map(|i| Sample::new(Duration::from_secs(i as u64), i as f64))
                .collect())
        }
    }

    /// Remembers the last `value` reading and any pointer press
    #[derive(Default)]
    struct Probe {
        seen: Option<f64>,
        pressed_at: Option<Point>,
    }

    impl Layer for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        fn update(&mut self, ctx: &LayerContext<'_>) -> Result<()> {
            self.seen = ctx.readings.scalar("value");
            Ok(())
        }

        fn render(&self, canvas: &mut Canvas<'_>, _palette: &Palette) -> Result<()> {
            canvas.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Color::WHITE, 1.0)
        }

        fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
            if let EventKind::PointerPress { position, .. } = event.kind {
                self.pressed_at = Some(position);
                return EventResponse::Handled;
            }
            EventResponse::Ignored
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn window(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn display(requirement: Requirement) -> Display {
        Display::new("test", Rect::new(100.0, 50.0, 200.0, 200.0))
            .with_role(RoleSpec::new("value", requirement, |t: Duration| {
                SampleValue::Scalar(t.as_secs_f64())
            }))
            .with_layer(Backdrop::new(BackdropShape::Rect))
            .with_layer(Probe::default())
    }

    #[test]
    fn test_pull_only_source_rejected_for_historical_role() {
        let mut d = display(Requirement::Historical { window: window(10) });
        let err = d.bind("value", Counter::boxed(CapabilitySet::PULL)).unwrap_err();
        match err {
            GaugeError::IncompatibleSource {
                role,
                source_id,
                offered,
                ..
            } => {
                assert_eq!(role, "value");
                assert_eq!(source_id, "counter");
                assert_eq!(offered, CapabilitySet::PULL);
            }
            other => panic!("expected IncompatibleSource, got {:?}", other),
        }
        assert!(!d.is_bound("value"));
    }

    #[test]
    fn test_compatible_bind_then_render_succeeds() {
        let mut d = display(Requirement::Historical { window: window(10) });
        d.bind(
            "value",
            Counter::boxed(CapabilitySet::PULL.with(Capability::Historical)),
        )
        .unwrap();
        assert_eq!(d.bound_source("value"), Some("counter"));

        d.update(Duration::from_millis(20)).unwrap();
        assert_eq!(d.readings().history("value").len(), 3);
        assert_eq!(d.layer::<Probe>().unwrap().seen, Some(2.0));

        let mut surface = CountingSurface::default();
        let palette = Palette::from_theme(Theme::solarized_dark());
        d.render(&mut surface, &palette).unwrap();
        assert_eq!(surface.primitives, 2);
    }

    #[test]
    fn test_unknown_role_is_reported() {
        let mut d = display(Requirement::Live);
        assert!(matches!(
            d.bind("nope", Counter::boxed(CapabilitySet::PULL)),
            Err(GaugeError::NoSuchRole { .. })
        ));
    }

    #[test]
    fn test_unbound_role_uses_simulator() {
        let mut d = display(Requirement::Live);
        d.update(Duration::from_millis(250)).unwrap();
        d.update(Duration::from_millis(250)).unwrap();
        assert_eq!(d.elapsed(), Duration::from_millis(500));
        assert_eq!(d.layer::<Probe>().unwrap().seen, Some(0.5));
    }

    #[test]
    fn test_simulated_history_is_windowed() {
        let mut d = display(Requirement::Historical { window: window(4) });
        for _ in 0..10 {
            d.update(Duration::from_secs(1)).unwrap();
        }
        let values: Vec<f64> = d
            .readings()
            .history("value")
            .iter()
            .map(Sample::scalar)
            .collect();
        assert_eq!(values, vec![7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn test_live_role_prefers_pull() {
        let mut d = display(Requirement::Live);
        d.bind(
            "value",
            Counter::boxed(CapabilitySet::PULL.union(CapabilitySet::PUSH)),
        )
        .unwrap();
        d.update(Duration::ZERO).unwrap();
        d.update(Duration::ZERO).unwrap();
        assert_eq!(d.readings().scalar("value"), Some(2.0));

        let source = d.unbind("value").unwrap();
        assert_eq!(source.metadata().id, "counter");
        assert!(!d.is_bound("value"));
    }

    #[test]
    fn test_pointer_events_are_local_and_foreground_first() {
        let mut d = display(Requirement::Live);
        let press = InputEvent::new(
            Duration::ZERO,
            EventKind::PointerPress {
                position: Point::new(110.0, 70.0),
                button: PointerButton::Primary,
            },
        );
        assert_eq!(d.handle_event(&press), EventResponse::Handled);
        assert_eq!(
            d.layer::<Probe>().unwrap().pressed_at,
            Some(Point::new(10.0, 20.0))
        );
        assert_eq!(d.layer_names(), vec!["backdrop", "probe"]);
    }

    #[test]
    fn test_display_ids_are_unique() {
        let a = display(Requirement::Live);
        let b = display(Requirement::Live);
        assert_ne!(a.id(), b.id());
    }

    struct Broken;

    impl Layer for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn render(&self, _canvas: &mut Canvas<'_>, _palette: &Palette) -> Result<()> {
            Err(GaugeError::render("no ink"))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_failed_render_leaves_surface_untouched() {
        let d = Display::new("test", Rect::new(0.0, 0.0, 50.0, 50.0))
            .with_layer(Backdrop::new(BackdropShape::Rect).border(roles::BORDER, 1.0))
            .with_layer(Broken);
        let mut surface = CountingSurface::default();
        let palette = Palette::from_theme(Theme::solarized_dark());

        assert!(matches!(
            d.render(&mut surface, &palette),
            Err(GaugeError::Render { .. })
        ));
        assert_eq!(surface.primitives, 0);
    }
}
