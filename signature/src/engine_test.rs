#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::blank::{self, SignatureCheck};

// =============================================================
// Helpers
// =============================================================

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn small_config() -> PadConfig {
    PadConfig { width: 200, height: 200, ..PadConfig::default() }
}

fn core() -> SignatureCore {
    SignatureCore::new(small_config()).unwrap()
}

fn drag(core: &mut SignatureCore, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    core.on_pointer_down(pt(first.0, first.1));
    for &(x, y) in rest {
        core.on_pointer_move(pt(x, y));
    }
    let last = points[points.len() - 1];
    core.on_pointer_up(pt(last.0, last.1));
}

fn inked(core: &SignatureCore, x: u32, y: u32) -> bool {
    core.surface().pixel(x, y).is_some_and(|c| c != Rgba::WHITE)
}

#[derive(Default)]
struct RecordingHost {
    events: Vec<&'static str>,
    saved: Vec<EncodedImage>,
}

impl SignatureHost for RecordingHost {
    fn on_save(&mut self, image: EncodedImage) {
        self.events.push("save");
        self.saved.push(image);
    }

    fn on_close(&mut self) {
        self.events.push("close");
    }
}

#[derive(Default)]
struct MemorySink {
    files: Vec<(String, EncodedImage)>,
}

impl DownloadSink for MemorySink {
    fn download(&mut self, filename: &str, image: &EncodedImage) -> Result<(), SignatureError> {
        self.files.push((filename.to_string(), image.clone()));
        Ok(())
    }
}

struct RefusingSink;

impl DownloadSink for RefusingSink {
    fn download(&mut self, _filename: &str, _image: &EncodedImage) -> Result<(), SignatureError> {
        Err(SignatureError::Download("popup blocked".into()))
    }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn default_config_is_800_by_600_white() {
    let config = PadConfig::default();
    assert_eq!((config.width, config.height), (800, 600));
    assert_eq!(config.background, Rgba::WHITE);
    assert_eq!(config.ink.line_width, 5.0);
}

#[test]
fn new_core_is_idle_empty_and_blank() {
    let core = core();
    assert!(!core.is_drawing());
    assert!(core.strokes().is_empty());
    assert!(core.is_blank());
}

#[test]
fn unusable_surface_fails_construction() {
    let config = PadConfig { width: 0, ..PadConfig::default() };
    assert!(matches!(SignatureCore::new(config), Err(SignatureError::SurfaceUnavailable { .. })));
    assert!(SignaturePad::new(config, RecordingHost::default()).is_err());
}

// =============================================================
// State machine
// =============================================================

#[test]
fn pointer_down_enters_drawing() {
    let mut core = core();
    let actions = core.on_pointer_down(pt(5.0, 5.0));
    assert!(actions.is_empty());
    assert_eq!(core.input(), InputState::Drawing { start: pt(5.0, 5.0) });
    assert_eq!(core.strokes().len(), 1);
}

#[test]
fn second_pointer_down_while_drawing_is_ignored() {
    let mut core = core();
    core.on_pointer_down(pt(5.0, 5.0));
    core.on_pointer_down(pt(50.0, 50.0));
    assert_eq!(core.strokes().len(), 1);
    assert_eq!(core.input().start(), Some(pt(5.0, 5.0)));
}

#[test]
fn move_while_idle_does_nothing() {
    let mut core = core();
    assert!(core.on_pointer_move(pt(10.0, 10.0)).is_empty());
    assert!(core.strokes().is_empty());
    assert!(core.is_blank());
}

#[test]
fn move_while_drawing_appends_and_requests_render() {
    let mut core = core();
    core.on_pointer_down(pt(10.0, 10.0));
    let actions = core.on_pointer_move(pt(10.0, 40.0));
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.strokes()[0].len(), 2);
    assert!(inked(&core, 10, 25));
}

#[test]
fn up_and_leave_both_return_to_idle() {
    let mut core = core();
    core.on_pointer_down(pt(1.0, 1.0));
    core.on_pointer_move(pt(2.0, 2.0));
    core.on_pointer_up(pt(2.0, 2.0));
    assert_eq!(core.input(), InputState::Idle);

    core.on_pointer_down(pt(30.0, 30.0));
    core.on_pointer_move(pt(40.0, 30.0));
    core.on_pointer_leave(pt(199.0, 30.0));
    assert_eq!(core.input(), InputState::Idle);
    assert_eq!(core.strokes().len(), 2);
}

#[test]
fn moves_after_release_do_not_extend_stroke() {
    let mut core = core();
    drag(&mut core, &[(10.0, 10.0), (20.0, 10.0)]);
    core.on_pointer_move(pt(90.0, 90.0));
    assert_eq!(core.strokes()[0].len(), 2);
    assert!(!inked(&core, 60, 60));
}

#[test]
fn release_while_idle_does_nothing() {
    let mut core = core();
    assert!(core.on_pointer_up(pt(3.0, 3.0)).is_empty());
    assert!(core.on_pointer_leave(pt(3.0, 3.0)).is_empty());
    assert!(core.is_blank());
}

#[test]
fn handle_dispatches_pointer_events() {
    let mut core = core();
    core.handle(PointerEvent::Down { x: 10.0, y: 10.0 });
    core.handle(PointerEvent::Move { x: 10.0, y: 60.0 });
    assert!(core.is_drawing());
    core.handle(PointerEvent::Leave { x: 10.0, y: 60.0 });
    assert!(!core.is_drawing());
    assert_eq!(core.strokes()[0].points(), &[pt(10.0, 10.0), pt(10.0, 60.0)]);
}

// =============================================================
// Taps
// =============================================================

#[test]
fn tap_draws_visible_dot() {
    let mut core = core();
    core.on_pointer_down(pt(100.0, 100.0));
    let actions = core.on_pointer_up(pt(100.0, 100.0));

    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(core.strokes().len(), 1);
    assert_eq!(core.strokes()[0].len(), 1);
    assert!(inked(&core, 100, 100));
    assert!(inked(&core, 99, 99));
    assert!(!inked(&core, 104, 100));
    assert!(!core.is_blank());
}

#[test]
fn tap_survives_save_and_is_not_blank() {
    let mut pad = SignaturePad::new(small_config(), RecordingHost::default()).unwrap();
    pad.on_pointer_down(pt(100.0, 100.0));
    pad.on_pointer_up(pt(100.0, 100.0));
    pad.save().unwrap();

    let image = &pad.host().saved[0];
    assert_eq!(blank::check(image.bytes(), &small_config().blank_policy()), SignatureCheck::Signed);
}

#[test]
fn release_elsewhere_without_moves_draws_dot_at_start() {
    let mut core = core();
    core.on_pointer_down(pt(100.0, 100.0));
    let actions = core.on_pointer_up(pt(150.0, 100.0));

    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(inked(&core, 100, 100));
    assert!(!inked(&core, 150, 100));
    assert!(!core.is_blank());
}

#[test]
fn live_surface_matches_export_for_unmoved_release() {
    let mut core = core();
    core.on_pointer_down(pt(100.0, 100.0));
    core.on_pointer_leave(pt(150.0, 100.0));
    let live = core.surface().raw_data().to_vec();
    let live_blank = core.is_blank();

    let image = core.export().unwrap();
    let exported = blank::check(image.bytes(), &small_config().blank_policy());

    assert_eq!(core.surface().raw_data(), live.as_slice());
    assert_eq!(live_blank, !exported.is_signed());
    assert_eq!(exported, SignatureCheck::Signed);
}

#[test]
fn release_at_start_after_moving_draws_no_dot() {
    let mut core = core();
    core.on_pointer_down(pt(50.0, 50.0));
    core.on_pointer_move(pt(80.0, 50.0));
    core.on_pointer_move(pt(50.0, 50.0));
    let actions = core.on_pointer_up(pt(50.0, 50.0));
    assert!(actions.is_empty());
}

// =============================================================
// Multi-stroke capture
// =============================================================

#[test]
fn two_drags_make_two_disconnected_strokes() {
    let mut core = core();
    drag(&mut core, &[(10.0, 10.0), (10.0, 50.0)]);
    drag(&mut core, &[(60.0, 10.0), (60.0, 50.0)]);

    assert_eq!(core.strokes().len(), 2);
    assert!(core.strokes().iter().all(|s| s.len() >= 2));

    core.export().unwrap();
    assert!(inked(&core, 10, 30));
    assert!(inked(&core, 60, 30));
    assert!(!inked(&core, 35, 30));
}

// =============================================================
// Reset
// =============================================================

#[test]
fn reset_restores_fresh_surface() {
    let mut core = core();
    drag(&mut core, &[(10.0, 10.0), (190.0, 190.0)]);
    drag(&mut core, &[(10.0, 190.0), (190.0, 10.0)]);

    let actions = core.reset();
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert!(core.strokes().is_empty());
    assert!(core.is_blank());

    let fresh = SignatureCore::new(small_config()).unwrap();
    assert_eq!(core.surface().raw_data(), fresh.surface().raw_data());
}

#[test]
fn reset_mid_stroke_returns_to_idle() {
    let mut core = core();
    core.on_pointer_down(pt(10.0, 10.0));
    core.on_pointer_move(pt(20.0, 20.0));
    core.reset();
    assert!(!core.is_drawing());
    assert!(core.on_pointer_move(pt(30.0, 30.0)).is_empty());
    assert!(core.strokes().is_empty());
}

#[test]
fn pad_is_reusable_after_reset() {
    let mut core = core();
    drag(&mut core, &[(10.0, 10.0), (50.0, 10.0)]);
    core.reset();
    drag(&mut core, &[(10.0, 100.0), (50.0, 100.0)]);
    assert_eq!(core.strokes().len(), 1);
    assert!(inked(&core, 30, 100));
    assert!(!inked(&core, 30, 10));
}

// =============================================================
// Export
// =============================================================

#[test]
fn export_twice_yields_identical_png() {
    let mut core = core();
    drag(&mut core, &[(10.0, 10.0), (80.0, 120.0), (150.0, 30.0)]);
    let a = core.export().unwrap();
    let b = core.export().unwrap();
    assert_eq!(a, b);
}

#[test]
fn same_events_on_two_pads_export_identically() {
    let events = [
        PointerEvent::Down { x: 20.0, y: 20.0 },
        PointerEvent::Move { x: 40.0, y: 60.0 },
        PointerEvent::Move { x: 90.0, y: 30.0 },
        PointerEvent::Up { x: 90.0, y: 30.0 },
        PointerEvent::Down { x: 150.0, y: 150.0 },
        PointerEvent::Up { x: 150.0, y: 150.0 },
    ];
    let mut a = core();
    let mut b = core();
    for event in events {
        a.handle(event);
        b.handle(event);
    }
    assert_eq!(a.export().unwrap(), b.export().unwrap());
}

#[test]
fn export_with_no_strokes_succeeds_and_is_blank() {
    let mut core = core();
    let image = core.export().unwrap();
    assert_eq!(blank::check(image.bytes(), &core.config().blank_policy()), SignatureCheck::Blank);
}

#[test]
fn export_matches_incremental_view_for_simple_drag() {
    let mut core = core();
    drag(&mut core, &[(10.0, 100.0), (190.0, 100.0)]);
    let before = core.surface().raw_data().to_vec();
    core.export().unwrap();
    assert_eq!(core.surface().raw_data(), before.as_slice());
}

// =============================================================
// Embedded host
// =============================================================

#[test]
fn save_calls_on_save_then_on_close() {
    let mut pad = SignaturePad::new(small_config(), RecordingHost::default()).unwrap();
    pad.on_pointer_down(pt(10.0, 10.0));
    pad.on_pointer_move(pt(100.0, 100.0));
    pad.on_pointer_up(pt(100.0, 100.0));

    let actions = pad.save().unwrap();
    assert_eq!(actions, vec![Action::Saved, Action::Closed]);
    assert_eq!(pad.host().events, vec!["save", "close"]);
    assert!(pad.host().saved[0].to_data_uri().starts_with("data:image/png;base64,"));
}

#[test]
fn close_without_saving_only_signals_close() {
    let mut pad = SignaturePad::new(small_config(), RecordingHost::default()).unwrap();
    pad.on_pointer_down(pt(10.0, 10.0));
    pad.on_pointer_move(pt(20.0, 20.0));
    assert_eq!(pad.close(), vec![Action::Closed]);

    let host = pad.into_host();
    assert_eq!(host.events, vec!["close"]);
    assert!(host.saved.is_empty());
}

#[test]
fn closure_callbacks_receive_image() {
    let saved: Rc<RefCell<Option<String>>> = Rc::default();
    let closed = Rc::new(RefCell::new(0));
    let host = Callbacks {
        on_save: {
            let saved = Rc::clone(&saved);
            move |image: EncodedImage| *saved.borrow_mut() = Some(image.to_data_uri())
        },
        on_close: {
            let closed = Rc::clone(&closed);
            move || *closed.borrow_mut() += 1
        },
    };

    let mut pad = SignaturePad::new(small_config(), host).unwrap();
    pad.on_pointer_down(pt(50.0, 50.0));
    pad.on_pointer_up(pt(50.0, 50.0));
    pad.save().unwrap();

    assert!(saved.borrow().as_deref().is_some_and(|uri| uri.starts_with("data:image/png")));
    assert_eq!(*closed.borrow(), 1);
}

// =============================================================
// Standalone download
// =============================================================

#[test]
fn download_uses_fixed_filename() {
    let mut pad = SignaturePad::new(small_config(), MemorySink::default()).unwrap();
    pad.on_pointer_down(pt(10.0, 10.0));
    pad.on_pointer_move(pt(100.0, 10.0));
    pad.on_pointer_up(pt(100.0, 10.0));

    let actions = pad.download().unwrap();
    assert_eq!(actions, vec![Action::Downloaded { filename: "drawing.png".into() }]);

    let (name, image) = &pad.host().files[0];
    assert_eq!(name, "drawing.png");
    assert_eq!(blank::check(image.bytes(), &small_config().blank_policy()), SignatureCheck::Signed);
}

#[test]
fn download_failure_propagates() {
    let mut pad = SignaturePad::new(small_config(), RefusingSink).unwrap();
    assert!(matches!(pad.download(), Err(SignatureError::Download(_))));
}

#[test]
fn directory_sink_writes_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut pad = SignaturePad::new(small_config(), DirectorySink::new(dir.path())).unwrap();
    pad.on_pointer_down(pt(20.0, 20.0));
    pad.on_pointer_move(pt(120.0, 80.0));
    pad.on_pointer_up(pt(120.0, 80.0));
    pad.download().unwrap();

    let path = pad.host().path_for("drawing.png");
    let bytes = std::fs::read(&path).unwrap();
    assert!(!blank::is_blank(&bytes, &small_config().blank_policy()).unwrap());
    assert_eq!(pad.host().dir(), dir.path());
}

#[test]
fn directory_sink_reports_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let mut pad = SignaturePad::new(small_config(), DirectorySink::new(missing)).unwrap();
    assert!(matches!(pad.download(), Err(SignatureError::Io(_))));
}
