use crate::signal::ChangeSignal;
use crate::surface::NumericSurface;
use glam::DVec2;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum DialConfigError {
    #[error("dial bounds must be finite (min={min}, max={max}, value={value}, step={step})")]
    NonFinite {
        min: f64,
        max: f64,
        value: f64,
        step: f64,
    },
    #[error("dial range is empty: min {min} is not below max {max}")]
    EmptyRange { min: f64, max: f64 },
    #[error("dial step must be positive, got {0}")]
    NonPositiveStep(f64),
    #[error("initial value {value} outside [{min}, {max}]")]
    InitialOutOfRange { value: f64, min: f64, max: f64 },
}

/// Validated value range of a dial. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialConfig {
    min: f64,
    max: f64,
    initial_value: f64,
    step: f64,
}

impl DialConfig {
    pub fn new(min: f64, max: f64, initial_value: f64, step: f64) -> Result<Self, DialConfigError> {
        if !(min.is_finite() && max.is_finite() && initial_value.is_finite() && step.is_finite()) {
            return Err(DialConfigError::NonFinite {
                min,
                max,
                value: initial_value,
                step,
            });
        }
        if min >= max {
            return Err(DialConfigError::EmptyRange { min, max });
        }
        if step <= 0.0 {
            return Err(DialConfigError::NonPositiveStep(step));
        }
        if initial_value < min || initial_value > max {
            return Err(DialConfigError::InitialOutOfRange {
                value: initial_value,
                min,
                max,
            });
        }
        Ok(Self {
            min,
            max,
            initial_value,
            step,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }
    pub fn max(&self) -> f64 {
        self.max
    }
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }
    pub fn step(&self) -> f64 {
        self.step
    }
}

// ---------------- Mapping helpers ----------------

/// Angle of `pointer` around `center` in degrees, normalized into [0, 360).
/// Screen coordinates: y grows downward, so 90 degrees is straight below.
#[inline]
pub fn pointer_angle_deg(center: DVec2, pointer: DVec2) -> f64 {
    let d = pointer - center;
    let deg = d.y.atan2(d.x).to_degrees();
    if deg < 0.0 {
        deg + 360.0
    } else {
        deg
    }
}

/// Inverted linear map: 0 degrees is `max`, 360 degrees is `min`.
#[inline]
pub fn angle_to_raw(angle_deg: f64, config: &DialConfig) -> f64 {
    config.max - (angle_deg / 360.0) * (config.max - config.min)
}

/// Snap to the nearest `step` counted from `min`, then clamp into range.
#[inline]
pub fn quantize(raw: f64, config: &DialConfig) -> f64 {
    let steps = ((raw - config.min) / config.step).round_ties_even();
    (steps * config.step + config.min).clamp(config.min, config.max)
}

/// Whole-degree value shown on the face and written to the readout.
/// Halves round up, the same way the page's own scripts would round.
#[inline]
pub fn display_value(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Stepped, clamped value for a pointer position around a pivot.
#[inline]
pub fn value_for_pointer(center: DVec2, pointer: DVec2, config: &DialConfig) -> f64 {
    quantize(angle_to_raw(pointer_angle_deg(center, pointer), config), config)
}

/// Pointer position from fractional client coordinates when the host reports
/// them, else from the whole-pixel ones.
#[inline]
pub fn client_point(fractional: Option<(f64, f64)>, whole: (i32, i32)) -> DVec2 {
    match fractional {
        Some((x, y)) if x.is_finite() && y.is_finite() => DVec2::new(x, y),
        _ => DVec2::new(whole.0 as f64, whole.1 as f64),
    }
}

// ---------------- Controller ----------------

/// The rotatable part of a dial.
pub trait DialFace {
    /// Current on-screen center of the face.
    fn pivot(&self) -> DVec2;
    /// Show the face rotated by whole degrees.
    fn rotate_to(&self, degrees: i64);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialState {
    pub dragging: bool,
    pub center: DVec2,
    pub current_value: f64,
}

pub struct DialController<F: DialFace, O: NumericSurface> {
    config: DialConfig,
    state: DialState,
    face: F,
    output: O,
    changed: Rc<ChangeSignal>,
}

impl<F: DialFace, O: NumericSurface> DialController<F, O> {
    /// Build the controller and show the initial value.
    pub fn new(config: DialConfig, face: F, output: O, changed: Rc<ChangeSignal>) -> Self {
        let dial = Self {
            config,
            state: DialState {
                dragging: false,
                center: DVec2::ZERO,
                current_value: config.initial_value(),
            },
            face,
            output,
            changed,
        };
        dial.refresh_display();
        dial
    }

    pub fn face(&self) -> &F {
        &self.face
    }

    pub fn state(&self) -> DialState {
        self.state
    }

    pub fn value(&self) -> f64 {
        self.state.current_value
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// Begin a drag: the face's current center becomes the pivot.
    pub fn start_gesture(&mut self, _pointer: DVec2) {
        self.state.center = self.face.pivot();
        self.state.dragging = true;
    }

    /// Track the pointer during a drag. Returns false when no drag is active.
    pub fn continue_gesture(&mut self, pointer: DVec2) -> bool {
        if !self.state.dragging {
            return false;
        }
        let value = value_for_pointer(self.state.center, pointer, &self.config);
        log::debug!("[dial] pointer=({:.1},{:.1}) value={:.2}", pointer.x, pointer.y, value);
        self.state.current_value = value;
        self.refresh_display();
        true
    }

    pub fn end_gesture(&mut self) {
        self.state.dragging = false;
    }

    pub fn refresh_display(&self) {
        let shown = display_value(self.state.current_value);
        self.face.rotate_to(shown);
        self.output.write_text(&shown.to_string());
        self.changed.emit();
    }
}
