// Host-side tests for the dial mapping and controller.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod signal {
    include!("../src/signal.rs");
}
mod surface {
    include!("../src/surface.rs");
}
mod dial {
    include!("../src/dial.rs");
}

use dial::*;
use glam::DVec2;
use signal::ChangeSignal;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use surface::NumericSurface;

const EPS: f64 = 1e-9;

fn full_turn() -> DialConfig {
    DialConfig::new(0.0, 360.0, 90.0, 0.1).unwrap()
}

/// Point at `angle_deg` around `center`, screen coordinates (y down).
fn point_at(center: DVec2, angle_deg: f64, radius: f64) -> DVec2 {
    let r = angle_deg.to_radians();
    center + DVec2::new(r.cos(), r.sin()) * radius
}

struct FakeFace {
    pivot: DVec2,
    rotation: Cell<Option<i64>>,
}

impl FakeFace {
    fn at(pivot: DVec2) -> Self {
        Self {
            pivot,
            rotation: Cell::new(None),
        }
    }
}

impl DialFace for FakeFace {
    fn pivot(&self) -> DVec2 {
        self.pivot
    }
    fn rotate_to(&self, degrees: i64) {
        self.rotation.set(Some(degrees));
    }
}

#[derive(Default)]
struct FakeReadout {
    text: RefCell<String>,
}

impl NumericSurface for FakeReadout {
    fn read_raw(&self) -> String {
        self.text.borrow().clone()
    }
    fn write_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }
}

struct Rig {
    dial: DialController<FakeFace, Rc<FakeReadout>>,
    readout: Rc<FakeReadout>,
    emitted: Rc<Cell<usize>>,
}

fn rig(config: DialConfig, pivot: DVec2) -> Rig {
    let changed = Rc::new(ChangeSignal::new());
    let emitted = Rc::new(Cell::new(0));
    {
        let emitted = emitted.clone();
        changed.subscribe(move || emitted.set(emitted.get() + 1));
    }
    let readout = Rc::new(FakeReadout::default());
    let dial = DialController::new(config, FakeFace::at(pivot), readout.clone(), changed);
    Rig {
        dial,
        readout,
        emitted,
    }
}

// ---------------- Config ----------------

#[test]
fn config_accepts_valid_range() {
    let c = full_turn();
    assert_eq!(c.min(), 0.0);
    assert_eq!(c.max(), 360.0);
    assert_eq!(c.initial_value(), 90.0);
    assert_eq!(c.step(), 0.1);
}

#[test]
fn config_rejects_invalid_values() {
    assert_eq!(
        DialConfig::new(10.0, 10.0, 10.0, 1.0),
        Err(DialConfigError::EmptyRange { min: 10.0, max: 10.0 })
    );
    assert_eq!(
        DialConfig::new(0.0, 10.0, 5.0, 0.0),
        Err(DialConfigError::NonPositiveStep(0.0))
    );
    assert_eq!(
        DialConfig::new(0.0, 10.0, 11.0, 1.0),
        Err(DialConfigError::InitialOutOfRange {
            value: 11.0,
            min: 0.0,
            max: 10.0
        })
    );
    assert!(matches!(
        DialConfig::new(0.0, f64::INFINITY, 5.0, 1.0),
        Err(DialConfigError::NonFinite { .. })
    ));
}

// ---------------- Angle and mapping ----------------

#[test]
fn pointer_angle_is_normalized() {
    let c = DVec2::new(100.0, 100.0);
    assert!((pointer_angle_deg(c, DVec2::new(150.0, 100.0)) - 0.0).abs() < EPS);
    assert!((pointer_angle_deg(c, DVec2::new(100.0, 150.0)) - 90.0).abs() < EPS);
    assert!((pointer_angle_deg(c, DVec2::new(50.0, 100.0)) - 180.0).abs() < EPS);
    // straight up is -90 before normalization
    assert!((pointer_angle_deg(c, DVec2::new(100.0, 50.0)) - 270.0).abs() < EPS);
}

#[test]
fn pointer_angle_stays_in_range() {
    let c = DVec2::new(-20.0, 35.0);
    for i in 0..720 {
        let a = pointer_angle_deg(c, point_at(c, i as f64 * 0.5 - 180.0, 40.0));
        assert!((0.0..360.0).contains(&a), "angle {} out of range", a);
    }
}

#[test]
fn raw_mapping_is_inverted_linear() {
    let c = DialConfig::new(-50.0, 150.0, 0.0, 1.0).unwrap();
    assert_eq!(angle_to_raw(0.0, &c), 150.0);
    assert!((angle_to_raw(180.0, &c) - 50.0).abs() < EPS);
    assert!((angle_to_raw(359.999, &c) - -50.0).abs() < 0.01);
    for i in 0..360 {
        let theta = i as f64;
        let expected = 150.0 - (theta / 360.0) * 200.0;
        assert!((angle_to_raw(theta, &c) - expected).abs() < EPS);
    }
}

// ---------------- Quantize and clamp ----------------

#[test]
fn quantize_snaps_to_step_from_min() {
    let c = DialConfig::new(1.0, 11.0, 1.0, 2.0).unwrap();
    assert_eq!(quantize(4.2, &c), 5.0);
    assert_eq!(quantize(3.9, &c), 3.0);
    for i in 0..1000 {
        let v = 1.0 + i as f64 * 0.0099;
        let q = quantize(v, &c);
        assert!((q - v).abs() <= 1.0 + EPS, "{} -> {}", v, q);
        let offset = (q - 1.0) / 2.0;
        assert!((offset - offset.round()).abs() < EPS);
    }
}

#[test]
fn quantize_ties_go_to_even_offset() {
    let c = DialConfig::new(0.0, 10.0, 0.0, 1.0).unwrap();
    assert_eq!(quantize(2.5, &c), 2.0);
    assert_eq!(quantize(3.5, &c), 4.0);
}

#[test]
fn quantize_clamps_into_range() {
    let c = full_turn();
    assert_eq!(quantize(angle_to_raw(0.0, &c), &c), 360.0);
    assert_eq!(quantize(360.04, &c), 360.0);
    assert_eq!(quantize(-3.0, &c), 0.0);

    let odd = DialConfig::new(0.0, 10.0, 0.0, 6.0).unwrap();
    // nearest step is 12, clamp keeps it at max
    assert_eq!(quantize(10.0, &odd), 10.0);
}

#[test]
fn value_for_pointer_stays_in_range() {
    let c = full_turn();
    let center = DVec2::new(200.0, 200.0);
    for i in 0..3600 {
        let v = value_for_pointer(center, point_at(center, i as f64 * 0.1, 60.0), &c);
        assert!((0.0..=360.0).contains(&v));
    }
}

#[test]
fn display_value_rounds_half_up() {
    assert_eq!(display_value(269.96), 270);
    assert_eq!(display_value(270.4), 270);
    assert_eq!(display_value(270.5), 271);
    assert_eq!(display_value(-2.5), -2);
    assert_eq!(display_value(0.0), 0);
}

// ---------------- Controller ----------------

#[test]
fn construction_shows_initial_value() {
    let r = rig(full_turn(), DVec2::ZERO);
    assert_eq!(r.dial.value(), 90.0);
    assert!(!r.dial.is_dragging());
    assert_eq!(&*r.readout.text.borrow(), "90");
    assert_eq!(r.dial.face().rotation.get(), Some(90));
}

#[test]
fn drag_to_ninety_degrees_reads_270() {
    let center = DVec2::new(100.0, 100.0);
    let mut r = rig(full_turn(), center);
    r.dial.start_gesture(DVec2::new(100.0, 120.0));
    assert!(r.dial.is_dragging());
    assert_eq!(r.dial.state().center, center);

    assert!(r.dial.continue_gesture(DVec2::new(100.0, 180.0)));
    assert!((r.dial.value() - 270.0).abs() < 1e-6);
    assert_eq!(&*r.readout.text.borrow(), "270");
    assert_eq!(r.dial.face().rotation.get(), Some(270));
}

#[test]
fn drag_to_zero_degrees_reads_max_exactly() {
    let mut r = rig(full_turn(), DVec2::ZERO);
    r.dial.start_gesture(DVec2::ZERO);
    r.dial.continue_gesture(DVec2::new(30.0, 0.0));
    assert_eq!(r.dial.value(), 360.0);
    assert_eq!(&*r.readout.text.borrow(), "360");
}

#[test]
fn fractional_value_is_kept_but_shown_whole() {
    let mut r = rig(full_turn(), DVec2::ZERO);
    r.dial.start_gesture(DVec2::ZERO);
    // 100.27 degrees -> raw 259.73 -> stepped 259.7
    r.dial.continue_gesture(point_at(DVec2::ZERO, 100.27, 50.0));
    let v = r.dial.value();
    assert!((v - 259.7).abs() < 1e-6, "value {}", v);
    assert_eq!(&*r.readout.text.borrow(), "260");
    assert_eq!(r.dial.face().rotation.get(), Some(260));
}

#[test]
fn move_without_drag_changes_nothing() {
    let mut r = rig(full_turn(), DVec2::ZERO);
    let before = r.dial.state();
    let emitted = r.emitted.get();
    assert!(!r.dial.continue_gesture(DVec2::new(0.0, -40.0)));
    assert_eq!(r.dial.state(), before);
    assert_eq!(r.emitted.get(), emitted);
    assert_eq!(&*r.readout.text.borrow(), "90");
}

#[test]
fn end_gesture_is_idempotent() {
    let mut r = rig(full_turn(), DVec2::ZERO);
    let before = r.dial.state();
    r.dial.end_gesture();
    assert_eq!(r.dial.state(), before);

    r.dial.start_gesture(DVec2::ZERO);
    r.dial.continue_gesture(DVec2::new(-10.0, 0.0));
    r.dial.end_gesture();
    let after = r.dial.state();
    r.dial.end_gesture();
    assert_eq!(r.dial.state(), after);
    assert!(!r.dial.is_dragging());

    // moves after release are ignored
    assert!(!r.dial.continue_gesture(DVec2::new(10.0, 0.0)));
    assert!((r.dial.value() - 180.0).abs() < 1e-6);
}

#[test]
fn every_refresh_emits_change() {
    let mut r = rig(full_turn(), DVec2::ZERO);
    assert_eq!(r.emitted.get(), 1);
    r.dial.start_gesture(DVec2::ZERO);
    for i in 0..5 {
        r.dial.continue_gesture(point_at(DVec2::ZERO, 10.0 * i as f64, 20.0));
    }
    assert_eq!(r.emitted.get(), 6);
    r.dial.refresh_display();
    assert_eq!(r.emitted.get(), 7);
}

#[test]
fn pivot_is_sampled_at_gesture_start() {
    let mut r = rig(full_turn(), DVec2::new(10.0, 10.0));
    r.dial.start_gesture(DVec2::ZERO);
    assert_eq!(r.dial.state().center, DVec2::new(10.0, 10.0));
    // left of the pivot -> 180 degrees -> 180
    r.dial.continue_gesture(DVec2::new(-90.0, 10.0));
    assert!((r.dial.value() - 180.0).abs() < 1e-6);
}

#[test]
fn client_point_prefers_fractional_coordinates() {
    assert_eq!(
        client_point(Some((10.75, 4.25)), (10, 4)),
        DVec2::new(10.75, 4.25)
    );
    assert_eq!(client_point(None, (10, 4)), DVec2::new(10.0, 4.0));
    assert_eq!(
        client_point(Some((f64::NAN, 4.25)), (10, 4)),
        DVec2::new(10.0, 4.0)
    );
}

#[test]
fn sub_pixel_pointer_near_pivot_keeps_precision() {
    let config = full_turn();
    let center = DVec2::new(0.6, 0.6);
    let exact = client_point(Some((10.75, 0.4)), (10, 0));
    let truncated = client_point(None, (10, 0));
    // about 358.87 degrees vs 356.35 degrees
    assert!((value_for_pointer(center, exact, &config) - 1.1).abs() < 1e-6);
    assert!((value_for_pointer(center, truncated, &config) - 3.7).abs() < 1e-6);
}
