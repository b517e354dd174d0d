//! The interaction engine: routes host events through the active mode.

use crate::clipboard::{ClipboardSink, NoClipboard};
use crate::config::{EngineConfig, MeasureShape, OperationMode};
use crate::debug::DebugTrace;
use crate::drag::DragSession;
use crate::events::{ClickKind, ClickTracker, KeyEvent, PointerButton, PointerEvent};
use crate::hover::HoverTracker;
use crate::keyboard::KeyCapture;
use crate::measure::MeasureSession;
use crate::mount::GraphicMount;
use crate::output::OutputSnapshot;
use crate::selection::{SELECTABLE_CLASS, SelectionTracker};
use crate::session::ActiveSession;
use inlay_svg::Document;
use kurbo::{Point, Size};

/// Mode-driven interaction engine over mounted SVG markup.
///
/// The host calls [`update`](Engine::update) on every configuration cycle,
/// forwards raw events to [`handle_pointer_event`](Engine::handle_pointer_event)
/// and [`handle_key_event`](Engine::handle_key_event), and reads
/// [`outputs`](Engine::outputs) whenever a handler returns `true`.
///
/// Events are routed by matching on the active mode, so switching modes can
/// never leave behind wiring from the previous one.
pub struct Engine {
    mount: GraphicMount,
    mode: OperationMode,
    measure_shape: MeasureShape,
    selection: SelectionTracker,
    hover: HoverTracker,
    keys: KeyCapture,
    session: ActiveSession,
    clicks: ClickTracker,
    debug: DebugTrace,
    clipboard: Box<dyn ClipboardSink>,
    p1: Point,
    p2: Point,
    mounted_once: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            mount: GraphicMount::new(),
            mode: OperationMode::default(),
            measure_shape: MeasureShape::default(),
            selection: SelectionTracker::new(),
            hover: HoverTracker::default(),
            keys: KeyCapture::default(),
            session: ActiveSession::Idle,
            clicks: ClickTracker::new(),
            debug: DebugTrace::default(),
            clipboard: Box::new(NoClipboard),
            p1: Point::ZERO,
            p2: Point::ZERO,
            mounted_once: false,
        }
    }

    /// Replace the clipboard sink (the default discards everything).
    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardSink>) {
        self.clipboard = clipboard;
    }

    /// Apply a configuration cycle from the host.
    ///
    /// Markup mounts on the first cycle and, when `reload_on_every_update`
    /// is set, on each one after that; remounting or switching modes tears
    /// down any live session first.
    pub fn update(&mut self, config: &EngineConfig) {
        self.debug.set_enabled(config.show_debug);
        self.mount
            .set_container(Size::new(config.container_width, config.container_height));

        if !self.mounted_once || config.reload_on_every_update {
            self.abort_session();
            self.mount.mount(&config.svg);
            self.mounted_once = self.mount.is_mounted();
        }

        if self.mode != config.operation_mode {
            self.abort_session();
            self.clicks.reset();
            self.mode = config.operation_mode;
        }
        self.measure_shape = config.measure_shape;

        self.selection.configure(
            config.use_fill,
            &config.fill_color,
            &config.fill_selected_color,
        );
        if let Some(id) = &config.selected_id {
            self.selection.selected_id = Some(id.clone());
        }
        if matches!(self.mode, OperationMode::Select | OperationMode::Hover) {
            if let Some(doc) = self.mount.document_mut() {
                self.selection.apply_fills(doc);
            }
        }
    }

    fn abort_session(&mut self) {
        if let ActiveSession::Measure(session) = std::mem::take(&mut self.session) {
            session.abort(&mut self.mount);
        }
    }

    /// Route a pointer event through the active mode. Returns true when the
    /// outputs changed and the host should read a fresh snapshot.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> bool {
        match self.mode {
            OperationMode::None | OperationMode::Keypress => {
                if matches!(event, PointerEvent::Cancel) {
                    self.clicks.reset();
                }
                false
            }
            OperationMode::OnePoint => self.on_one_point(event),
            OperationMode::TwoPoints => self.on_two_points(event),
            OperationMode::Select => self.on_select(event, false),
            OperationMode::Hover => self.on_select(event, true),
            OperationMode::Drag => self.on_drag(event),
        }
    }

    /// Record a key press. Notifies the host only in keypress mode.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        let KeyEvent::Pressed(key) = event;
        self.keys.record(&key);
        self.debug.record(format!("[key] {key}"));
        self.mode == OperationMode::Keypress
    }

    fn on_one_point(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position, button, ..
            } => {
                self.clicks.classify_down(position, button);
                false
            }
            PointerEvent::Up {
                position, button, ..
            } => {
                if self.clicks.classify_up(position, button) != Some(ClickKind::Single) {
                    return false;
                }
                let Some(point) = self.mount.to_document_space(position) else {
                    return false;
                };
                self.p1 = point;
                self.debug
                    .record(format!("[1point] x={:.1} y={:.1}", point.x, point.y));
                true
            }
            PointerEvent::Move { .. } => false,
            PointerEvent::Cancel => {
                self.clicks.reset();
                false
            }
        }
    }

    fn on_two_points(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, .. } => {
                if !self.session.is_idle() {
                    return false;
                }
                if let Some(point) = self.mount.to_document_space(position) {
                    if let Some(session) =
                        MeasureSession::start(&mut self.mount, self.measure_shape, point)
                    {
                        self.session = ActiveSession::Measure(session);
                    }
                }
                false
            }
            PointerEvent::Move { position, .. } => {
                if let ActiveSession::Measure(session) = &mut self.session {
                    if let Some(point) = self.mount.to_document_space(position) {
                        if session.update(&mut self.mount, point) {
                            self.debug
                                .record(format!("[2points] x={:.1} y={:.1}", point.x, point.y));
                        }
                    }
                }
                false
            }
            PointerEvent::Up { .. } => {
                if let ActiveSession::Measure(session) = std::mem::take(&mut self.session) {
                    let (anchor, end) = session.finish(&mut self.mount);
                    self.p1 = anchor;
                    self.p2 = end;
                    self.debug.record(format!(
                        "[2points] x1={:.1} y1={:.1} x2={:.1} y2={:.1}",
                        anchor.x, anchor.y, end.x, end.y
                    ));
                    return true;
                }
                false
            }
            PointerEvent::Cancel => {
                self.abort_session();
                false
            }
        }
    }

    fn on_select(&mut self, event: PointerEvent, with_hover: bool) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button,
                target,
            } => match self.clicks.classify_down(position, button) {
                Some(kind) => self.element_click(target.as_deref(), kind),
                None => false,
            },
            PointerEvent::Up {
                position,
                button,
                target,
            } => match self.clicks.classify_up(position, button) {
                Some(kind) => self.element_click(target.as_deref(), kind),
                None => false,
            },
            PointerEvent::Move { position, target } => {
                if with_hover {
                    self.hover_move(position, target.as_deref())
                } else {
                    false
                }
            }
            PointerEvent::Cancel => {
                self.clicks.reset();
                false
            }
        }
    }

    fn on_drag(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button: PointerButton::Left,
                target: Some(target),
            } => {
                if !self.session.is_idle() {
                    return false;
                }
                if let Some(point) = self.mount.to_document_space(position) {
                    if let Some(session) = DragSession::start(&self.mount, &target, point) {
                        self.p1 = session.start_translate.to_point();
                        self.session = ActiveSession::Drag(session);
                    }
                }
                false
            }
            PointerEvent::Move { position, .. } => {
                if let ActiveSession::Drag(session) = &mut self.session {
                    if let Some(point) = self.mount.to_document_space(position) {
                        let before = session.current_translate;
                        // Coalesced: saturated moves against the view-box
                        // edge change nothing and stay silent.
                        if session.update(&mut self.mount, point)
                            && session.current_translate != before
                        {
                            self.p2 = session.current_translate.to_point();
                            self.debug.record(format!(
                                "[drag] id={} x={:.1} y={:.1}",
                                session.element_id,
                                session.current_translate.x,
                                session.current_translate.y
                            ));
                            return true;
                        }
                    }
                }
                false
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => {
                if let ActiveSession::Drag(session) = std::mem::take(&mut self.session) {
                    self.p2 = session.current_translate.to_point();
                    return true;
                }
                false
            }
            PointerEvent::Down { .. } => false,
        }
    }

    /// A classified click landed on `target`; select it when eligible.
    fn element_click(&mut self, target: Option<&str>, kind: ClickKind) -> bool {
        let Some(target) = target else {
            return false;
        };
        let Some(doc) = self.mount.document_mut() else {
            return false;
        };
        let Some(node) = doc.element_by_id(target) else {
            return false;
        };
        if !doc.has_class(node, SELECTABLE_CLASS) {
            return false;
        }
        let Some(id) = self.selection.click(doc, node, kind) else {
            return false;
        };
        if kind == ClickKind::Single {
            self.clipboard.copy_text(&id);
        }
        log::debug!("selected id={id}");
        self.debug.record(format!("[select] id={id}"));
        true
    }

    fn hover_move(&mut self, position: Point, target: Option<&str>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let Some(doc) = self.mount.document() else {
            return false;
        };
        let Some(node) = doc.element_by_id(target) else {
            return false;
        };
        if !doc.has_class(node, SELECTABLE_CLASS) {
            return false;
        }
        let Some(point) = self.mount.to_document_space(position) else {
            return false;
        };
        if !self.hover.update(target, point) {
            return false;
        }
        self.p1 = point;
        self.debug.record(format!(
            "[hover] id={target} x={:.1} y={:.1}",
            point.x, point.y
        ));
        true
    }

    /// Snapshot of everything the host binds to.
    pub fn outputs(&self) -> OutputSnapshot {
        OutputSnapshot {
            selected_id: self.selection.selected_id.clone(),
            hover_id: self.hover.hover_id.clone(),
            click_kind: self.selection.click_kind,
            x1: self.p1.x,
            y1: self.p1.y,
            x2: self.p2.x,
            y2: self.p2.y,
            last_key: self.keys.last_key.clone(),
        }
    }

    /// Serialized markup of the mounted document, overlays and fills
    /// included, for hosts that re-render from the engine's state.
    pub fn markup(&self) -> Option<String> {
        self.mount.document().map(Document::to_markup)
    }

    pub fn debug_text(&self) -> &str {
        self.debug.text()
    }

    pub fn document(&self) -> Option<&Document> {
        self.mount.document()
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::PointerButton;
    use std::cell::RefCell;
    use std::rc::Rc;

    const MARKUP: &str = r#"<svg viewBox="0 0 100 100"><rect id="a" class="selectableObject"/><rect id="b" class="selectableObject"/><circle id="c" class="draggableObject" transform="translate(5 5)" r="2"/></svg>"#;

    fn config(mode: OperationMode) -> EngineConfig {
        EngineConfig {
            svg: MARKUP.to_string(),
            operation_mode: mode,
            use_fill: true,
            // Container matches the view box, so screen and document
            // coordinates coincide.
            container_width: 100.0,
            container_height: 100.0,
            ..EngineConfig::default()
        }
    }

    fn engine(mode: OperationMode) -> Engine {
        let mut engine = Engine::new();
        engine.update(&config(mode));
        engine
    }

    fn down(engine: &mut Engine, x: f64, y: f64, target: Option<&str>) -> bool {
        engine.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: PointerButton::Left,
            target: target.map(str::to_string),
        })
    }

    fn moved(engine: &mut Engine, x: f64, y: f64, target: Option<&str>) -> bool {
        engine.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
            target: target.map(str::to_string),
        })
    }

    fn up(engine: &mut Engine, x: f64, y: f64, target: Option<&str>) -> bool {
        engine.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            button: PointerButton::Left,
            target: target.map(str::to_string),
        })
    }

    fn click(engine: &mut Engine, x: f64, y: f64, target: Option<&str>) -> bool {
        let a = down(engine, x, y, target);
        let b = up(engine, x, y, target);
        a || b
    }

    fn fill_of(engine: &Engine, id: &str) -> String {
        let doc = engine.document().unwrap();
        let node = doc.element_by_id(id).unwrap();
        doc.attribute(node, "fill").unwrap_or("").to_string()
    }

    #[test]
    fn test_select_click_reports_and_highlights() {
        let mut engine = engine(OperationMode::Select);

        assert!(click(&mut engine, 10.0, 10.0, Some("a")));
        let outputs = engine.outputs();
        assert_eq!(outputs.selected_id.as_deref(), Some("a"));
        assert_eq!(outputs.click_kind, Some(ClickKind::Single));
        assert_eq!(fill_of(&engine, "a"), "green");
        assert_eq!(fill_of(&engine, "b"), "lightgray");

        // Selecting b moves the highlight.
        assert!(click(&mut engine, 50.0, 10.0, Some("b")));
        assert_eq!(engine.outputs().selected_id.as_deref(), Some("b"));
        assert_eq!(fill_of(&engine, "a"), "lightgray");
        assert_eq!(fill_of(&engine, "b"), "green");
    }

    #[test]
    fn test_select_ignores_non_selectable_target() {
        let mut engine = engine(OperationMode::Select);
        assert!(!click(&mut engine, 5.0, 5.0, Some("c")));
        assert!(!click(&mut engine, 5.0, 5.0, None));
        assert_eq!(engine.outputs().selected_id, None);
    }

    #[test]
    fn test_single_click_copies_id() {
        #[derive(Clone, Default)]
        struct RecordingClipboard(Rc<RefCell<Vec<String>>>);
        impl ClipboardSink for RecordingClipboard {
            fn copy_text(&mut self, text: &str) {
                self.0.borrow_mut().push(text.to_string());
            }
        }

        let copied = RecordingClipboard::default();
        let mut engine = engine(OperationMode::Select);
        engine.set_clipboard(Box::new(copied.clone()));

        assert!(click(&mut engine, 10.0, 10.0, Some("a")));
        assert_eq!(*copied.0.borrow(), vec!["a".to_string()]);
    }

    #[test]
    fn test_one_point_reports_click_location() {
        let mut engine = engine(OperationMode::OnePoint);

        assert!(click(&mut engine, 30.0, 40.0, None));
        let outputs = engine.outputs();
        assert!((outputs.x1 - 30.0).abs() < 1e-9);
        assert!((outputs.y1 - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_measurement_reports_both_points() {
        let mut engine = Engine::new();
        engine.update(&EngineConfig {
            measure_shape: MeasureShape::Rect,
            ..config(OperationMode::TwoPoints)
        });

        assert!(!down(&mut engine, 10.0, 10.0, None));
        assert!(!moved(&mut engine, 25.0, 20.0, None));
        {
            let doc = engine.document().unwrap();
            let overlay = doc.element_by_id("measurerect").unwrap();
            assert_eq!(doc.attribute(overlay, "width"), Some("15"));
            assert_eq!(doc.attribute(overlay, "height"), Some("10"));
        }
        assert!(!moved(&mut engine, 40.0, 30.0, None));
        assert!(up(&mut engine, 40.0, 30.0, None));

        let outputs = engine.outputs();
        assert_eq!(
            (outputs.x1, outputs.y1, outputs.x2, outputs.y2),
            (10.0, 10.0, 40.0, 30.0)
        );
        // The overlay is gone once the measurement ends.
        assert!(engine.document().unwrap().element_by_id("measurerect").is_none());
    }

    #[test]
    fn test_drag_clamps_inside_view_box() {
        let mut engine = engine(OperationMode::Drag);

        // Grab c at (7, 7): two units into the element's translation.
        assert!(!down(&mut engine, 7.0, 7.0, Some("c")));
        assert!(moved(&mut engine, 150.0, 50.0, Some("c")));
        // Still pinned against the right edge: nothing changed, no report.
        assert!(!moved(&mut engine, 160.0, 50.0, Some("c")));
        assert!(up(&mut engine, 160.0, 50.0, Some("c")));

        let outputs = engine.outputs();
        assert_eq!((outputs.x1, outputs.y1), (5.0, 5.0));
        assert_eq!((outputs.x2, outputs.y2), (98.0, 48.0));
        let doc = engine.document().unwrap();
        let node = doc.element_by_id("c").unwrap();
        assert_eq!(doc.translate(node), Some((98.0, 48.0)));
    }

    #[test]
    fn test_reload_aborts_live_drag() {
        let mut engine = Engine::new();
        let reload = EngineConfig {
            reload_on_every_update: true,
            ..config(OperationMode::Drag)
        };
        engine.update(&reload);

        assert!(!down(&mut engine, 7.0, 7.0, Some("c")));
        engine.update(&reload);

        // The session died with the remount; moves do nothing and the fresh
        // document keeps its original translation.
        assert!(!moved(&mut engine, 50.0, 50.0, Some("c")));
        let doc = engine.document().unwrap();
        let node = doc.element_by_id("c").unwrap();
        assert_eq!(doc.translate(node), Some((5.0, 5.0)));
    }

    #[test]
    fn test_cancel_aborts_measurement_silently() {
        let mut engine = engine(OperationMode::TwoPoints);
        assert!(!down(&mut engine, 10.0, 10.0, None));
        assert!(!moved(&mut engine, 30.0, 20.0, None));
        assert!(engine.document().unwrap().element_by_id("measureline").is_some());

        // Pointer loss tears the session down without emitting points.
        assert!(!engine.handle_pointer_event(PointerEvent::Cancel));
        assert!(engine.document().unwrap().element_by_id("measureline").is_none());
        let outputs = engine.outputs();
        assert_eq!(
            (outputs.x1, outputs.y1, outputs.x2, outputs.y2),
            (0.0, 0.0, 0.0, 0.0)
        );
        // A late release lands on an idle session.
        assert!(!up(&mut engine, 30.0, 20.0, None));
    }

    #[test]
    fn test_cancel_ends_drag_and_notifies() {
        let mut engine = engine(OperationMode::Drag);
        assert!(!down(&mut engine, 7.0, 7.0, Some("c")));
        assert!(moved(&mut engine, 30.0, 30.0, Some("c")));

        // Pointer loss ends the drag like a release: the element keeps its
        // dragged position and the host reads the final translate.
        assert!(engine.handle_pointer_event(PointerEvent::Cancel));
        let outputs = engine.outputs();
        assert_eq!((outputs.x1, outputs.y1), (5.0, 5.0));
        assert_eq!((outputs.x2, outputs.y2), (28.0, 28.0));
        let doc = engine.document().unwrap();
        let node = doc.element_by_id("c").unwrap();
        assert_eq!(doc.translate(node), Some((28.0, 28.0)));

        // No session survives; further moves are inert.
        assert!(!moved(&mut engine, 60.0, 60.0, Some("c")));
        let doc = engine.document().unwrap();
        let node = doc.element_by_id("c").unwrap();
        assert_eq!(doc.translate(node), Some((28.0, 28.0)));
    }

    #[test]
    fn test_mode_switch_aborts_measurement() {
        let mut engine = engine(OperationMode::TwoPoints);
        assert!(!down(&mut engine, 10.0, 10.0, None));
        assert!(!moved(&mut engine, 20.0, 20.0, None));
        assert!(engine.document().unwrap().element_by_id("measureline").is_some());

        engine.update(&config(OperationMode::Select));
        assert!(engine.document().unwrap().element_by_id("measureline").is_none());
        // The pointer-up that ends the gesture lands in the new mode and
        // emits nothing.
        assert!(!up(&mut engine, 20.0, 20.0, None));
    }

    #[test]
    fn test_hover_coalesces_moves() {
        let mut engine = engine(OperationMode::Hover);

        assert!(moved(&mut engine, 3.0, 4.0, Some("a")));
        let outputs = engine.outputs();
        assert_eq!(outputs.hover_id.as_deref(), Some("a"));
        assert!((outputs.x1 - 3.0).abs() < 1e-9);

        // Identical move: no notification.
        assert!(!moved(&mut engine, 3.0, 4.0, Some("a")));
        // New element under the pointer.
        assert!(moved(&mut engine, 3.0, 4.0, Some("b")));
        assert_eq!(engine.outputs().hover_id.as_deref(), Some("b"));
        // Hover mode still selects on click.
        assert!(click(&mut engine, 3.0, 4.0, Some("a")));
        assert_eq!(engine.outputs().selected_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_keypress_mode_gates_notification() {
        let mut engine = engine(OperationMode::Select);
        assert!(!engine.handle_key_event(KeyEvent::Pressed("Escape".to_string())));
        // Captured regardless of mode.
        assert_eq!(engine.outputs().last_key.as_deref(), Some("Escape"));

        engine.update(&config(OperationMode::Keypress));
        assert!(engine.handle_key_event(KeyEvent::Pressed("a".to_string())));
        assert_eq!(engine.outputs().last_key.as_deref(), Some("a"));
        // Pointer events are inert in keypress mode.
        assert!(!click(&mut engine, 10.0, 10.0, Some("a")));
    }

    #[test]
    fn test_none_mode_is_inert() {
        let mut engine = engine(OperationMode::None);
        assert!(!click(&mut engine, 10.0, 10.0, Some("a")));
        assert!(!moved(&mut engine, 10.0, 10.0, Some("a")));
        assert_eq!(engine.outputs(), OutputSnapshot::default());
    }

    #[test]
    fn test_host_bound_selection_is_adopted() {
        let mut engine = Engine::new();
        engine.update(&EngineConfig {
            selected_id: Some("b".to_string()),
            ..config(OperationMode::Select)
        });
        assert_eq!(engine.outputs().selected_id.as_deref(), Some("b"));
        assert_eq!(fill_of(&engine, "b"), "green");
        assert_eq!(fill_of(&engine, "a"), "lightgray");
    }

    #[test]
    fn test_debug_trace_records_events() {
        let mut engine = Engine::new();
        engine.update(&EngineConfig {
            show_debug: true,
            ..config(OperationMode::Select)
        });
        assert_eq!(engine.debug_text(), "");
        assert!(click(&mut engine, 10.0, 10.0, Some("a")));
        assert_eq!(engine.debug_text(), "[select] id=a");
    }
}
