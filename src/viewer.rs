//! Zoom and vertical pan for the modal image viewer.
//!
//! This module contains the viewer's transform math and input mapping,
//! kept free of DOM access for testability.

use crate::constants::viewer::{
    MAX_SCALE, MIN_SCALE, PAN_STEP, PINCH_DIVISOR, SCALE_STEP, TOUCH_PAN_DIVISOR,
};

/// Zoom factor and vertical offset of the viewer image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerTransform {
    pub scale: f32,
    pub pan_y: f32,
}

impl ViewerTransform {
    /// Create an identity transform (scale=1, no pan).
    pub fn identity() -> Self {
        Self {
            scale: MIN_SCALE,
            pan_y: 0.0,
        }
    }

    /// Change the zoom by `delta`, staying within the allowed range.
    pub fn zoom_by(&self, delta: f32) -> ViewerTransform {
        ViewerTransform {
            scale: clamp_scale(self.scale + delta),
            pan_y: self.pan_y,
        }
    }

    /// Move the image vertically. Pan is not bounded.
    pub fn pan_by(&self, dy: f32) -> ViewerTransform {
        ViewerTransform {
            scale: self.scale,
            pan_y: self.pan_y + dy,
        }
    }

    /// CSS `transform` value: scale first, then translate.
    pub fn css(&self) -> String {
        format!("scale({}) translateY({}px)", self.scale, self.pan_y)
    }
}

impl Default for ViewerTransform {
    fn default() -> Self {
        Self::identity()
    }
}

fn clamp_scale(scale: f32) -> f32 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    Reset,
    Close,
}

impl ViewerKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(ViewerKey::PanUp),
            "ArrowDown" => Some(ViewerKey::PanDown),
            "+" | "=" => Some(ViewerKey::ZoomIn),
            "-" | "_" => Some(ViewerKey::ZoomOut),
            "0" => Some(ViewerKey::Reset),
            "Escape" => Some(ViewerKey::Close),
            _ => None,
        }
    }
}

/// A touch point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer and touch input over the zoom container.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerInput {
    /// Mouse wheel. `delta_x` is only consulted when `delta_y` is zero.
    Wheel { delta_x: f32, delta_y: f32, shift: bool },
    /// Touches present after a touchstart
    TouchStart(Vec<TouchPoint>),
    /// Touches present after a touchmove
    TouchMove(Vec<TouchPoint>),
    /// Touches still present after a touchend/touchcancel
    TouchEnd(Vec<TouchPoint>),
}

/// Incremental tracker for one- and two-finger gestures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchGesture {
    /// Finger count the references below were recorded for
    pub fingers: usize,
    /// Distance between the two fingers at the last event
    pub last_distance: f32,
    /// Vertical position of the single finger at the last event
    pub last_y: Option<f32>,
}

impl TouchGesture {
    /// Record reference values for the given touches.
    pub fn seed(&mut self, touches: &[TouchPoint]) {
        match touches {
            [a, b] => {
                self.fingers = 2;
                self.last_distance = distance(a, b);
                self.last_y = None;
            }
            [one] => {
                self.fingers = 1;
                self.last_distance = 0.0;
                self.last_y = Some(one.y);
            }
            _ => self.reset(),
        }
    }

    /// Update with a move and return (zoom delta, pan delta).
    ///
    /// A move whose finger count has no recorded reference only seeds the
    /// tracker, so the first move after a finger change never jumps.
    pub fn track_move(&mut self, touches: &[TouchPoint]) -> (f32, f32) {
        match touches {
            [a, b] if self.fingers == 2 => {
                let current = distance(a, b);
                let delta = (current - self.last_distance) / PINCH_DIVISOR;
                self.last_distance = current;
                (delta, 0.0)
            }
            [one] if self.fingers == 1 => match self.last_y {
                Some(last_y) => {
                    let delta = (one.y - last_y) / TOUCH_PAN_DIVISOR;
                    self.last_y = Some(one.y);
                    (0.0, delta)
                }
                None => {
                    self.last_y = Some(one.y);
                    (0.0, 0.0)
                }
            },
            _ => {
                self.seed(touches);
                (0.0, 0.0)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn distance(a: &TouchPoint, b: &TouchPoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Viewer transform plus gesture tracking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerState {
    transform: ViewerTransform,
    gesture: TouchGesture,
}

impl ViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to identity with no gesture in progress.
    pub fn reset(&mut self) {
        self.transform = ViewerTransform::identity();
        self.gesture.reset();
    }

    pub fn transform(&self) -> ViewerTransform {
        self.transform
    }

    pub fn gesture(&self) -> &TouchGesture {
        &self.gesture
    }

    /// Apply a key press. Returns false for [`ViewerKey::Close`], which the
    /// caller handles.
    pub fn apply_key(&mut self, key: ViewerKey) -> bool {
        self.transform = match key {
            ViewerKey::PanUp => self.transform.pan_by(-PAN_STEP),
            ViewerKey::PanDown => self.transform.pan_by(PAN_STEP),
            ViewerKey::ZoomIn => self.transform.zoom_by(SCALE_STEP),
            ViewerKey::ZoomOut => self.transform.zoom_by(-SCALE_STEP),
            ViewerKey::Reset => ViewerTransform::identity(),
            ViewerKey::Close => return false,
        };
        true
    }

    /// Apply pointer or touch input. Returns whether the transform changed.
    pub fn apply_input(&mut self, input: &ViewerInput) -> bool {
        let before = self.transform;
        match input {
            ViewerInput::Wheel {
                delta_x,
                delta_y,
                shift,
            } => {
                // Some browsers report shift+wheel as a horizontal scroll
                let delta = if *delta_y != 0.0 { *delta_y } else { *delta_x };
                if delta == 0.0 {
                    return false;
                }
                let direction = if delta > 0.0 { 1.0 } else { -1.0 };
                self.transform = if *shift {
                    self.transform.pan_by(direction * PAN_STEP)
                } else {
                    self.transform.zoom_by(-direction * SCALE_STEP)
                };
            }
            ViewerInput::TouchStart(touches) => self.gesture.seed(touches),
            ViewerInput::TouchMove(touches) => {
                let (zoom, pan) = self.gesture.track_move(touches);
                self.transform = self.transform.zoom_by(zoom).pan_by(pan);
            }
            ViewerInput::TouchEnd(remaining) => {
                if remaining.is_empty() {
                    self.gesture.reset();
                } else {
                    self.gesture.seed(remaining);
                }
            }
        }
        self.transform != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn wheel(delta_y: f32, shift: bool) -> ViewerInput {
        ViewerInput::Wheel {
            delta_x: 0.0,
            delta_y,
            shift,
        }
    }

    #[test]
    fn test_identity_transform() {
        let t = ViewerTransform::identity();
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.pan_y, 0.0);
        assert_eq!(t.css(), "scale(1) translateY(0px)");
    }

    #[test]
    fn test_wheel_zoom_direction_and_clamp() {
        let mut v = ViewerState::new();
        assert!(v.apply_input(&wheel(-100.0, false)));
        assert!(approx_eq(v.transform().scale, 1.1));

        // Zoom out below the minimum clamps at 1
        v.apply_input(&wheel(100.0, false));
        v.apply_input(&wheel(100.0, false));
        assert_eq!(v.transform().scale, 1.0);
        assert!(!v.apply_input(&wheel(100.0, false)));

        for _ in 0..100 {
            v.apply_input(&wheel(-1.0, false));
        }
        assert_eq!(v.transform().scale, 5.0);
    }

    #[test]
    fn test_shift_wheel_pans_without_clamp() {
        let mut v = ViewerState::new();
        for _ in 0..50 {
            v.apply_input(&wheel(-3.0, true));
        }
        assert_eq!(v.transform().pan_y, -1000.0);
        assert_eq!(v.transform().scale, 1.0);
        v.apply_input(&wheel(3.0, true));
        assert_eq!(v.transform().pan_y, -980.0);
    }

    #[test]
    fn test_shift_wheel_reported_as_horizontal() {
        let mut v = ViewerState::new();
        v.apply_input(&ViewerInput::Wheel {
            delta_x: 40.0,
            delta_y: 0.0,
            shift: true,
        });
        assert_eq!(v.transform().pan_y, 20.0);
    }

    #[test]
    fn test_wheel_without_delta_is_ignored() {
        let mut v = ViewerState::new();
        assert!(!v.apply_input(&wheel(0.0, false)));
        assert_eq!(v.transform(), ViewerTransform::identity());
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(ViewerKey::from_key_name("="), Some(ViewerKey::ZoomIn));
        assert_eq!(ViewerKey::from_key_name("_"), Some(ViewerKey::ZoomOut));
        assert_eq!(ViewerKey::from_key_name("Escape"), Some(ViewerKey::Close));
        assert_eq!(ViewerKey::from_key_name("a"), None);

        let mut v = ViewerState::new();
        v.apply_key(ViewerKey::PanUp);
        v.apply_key(ViewerKey::PanUp);
        v.apply_key(ViewerKey::PanDown);
        assert_eq!(v.transform().pan_y, -20.0);

        v.apply_key(ViewerKey::ZoomIn);
        assert!(approx_eq(v.transform().scale, 1.1));
        v.apply_key(ViewerKey::ZoomOut);
        v.apply_key(ViewerKey::ZoomOut);
        assert_eq!(v.transform().scale, 1.0);
        assert!(!v.apply_key(ViewerKey::Close));
    }

    #[test]
    fn test_reset_key_after_zoom_and_pan() {
        let mut v = ViewerState::new();
        for _ in 0..22 {
            v.apply_key(ViewerKey::ZoomIn);
        }
        for _ in 0..7 {
            v.apply_key(ViewerKey::PanUp);
        }
        assert!(approx_eq(v.transform().scale, 3.2));
        assert_eq!(v.transform().pan_y, -140.0);

        v.apply_key(ViewerKey::Reset);
        assert_eq!(v.transform(), ViewerTransform::identity());
    }

    #[test]
    fn test_pinch_zoom_is_incremental() {
        let mut v = ViewerState::new();
        let pair = |gap: f32| vec![TouchPoint::new(0.0, 0.0), TouchPoint::new(gap, 0.0)];

        v.apply_input(&ViewerInput::TouchStart(pair(100.0)));
        v.apply_input(&ViewerInput::TouchMove(pair(200.0)));
        assert!(approx_eq(v.transform().scale, 1.5));
        v.apply_input(&ViewerInput::TouchMove(pair(300.0)));
        assert!(approx_eq(v.transform().scale, 2.0));

        // Pinching far out stays within bounds
        v.apply_input(&ViewerInput::TouchMove(pair(5000.0)));
        assert_eq!(v.transform().scale, 5.0);
        v.apply_input(&ViewerInput::TouchMove(pair(0.0)));
        assert_eq!(v.transform().scale, 1.0);
    }

    #[test]
    fn test_single_finger_pan() {
        let mut v = ViewerState::new();
        v.apply_input(&ViewerInput::TouchStart(vec![TouchPoint::new(5.0, 100.0)]));
        v.apply_input(&ViewerInput::TouchMove(vec![TouchPoint::new(5.0, 150.0)]));
        assert_eq!(v.transform().pan_y, 5.0);
        v.apply_input(&ViewerInput::TouchMove(vec![TouchPoint::new(5.0, 130.0)]));
        assert_eq!(v.transform().pan_y, 3.0);

        v.apply_input(&ViewerInput::TouchEnd(Vec::new()));
        assert_eq!(*v.gesture(), TouchGesture::default());
    }

    #[test]
    fn test_move_without_reference_does_not_jump() {
        let mut v = ViewerState::new();
        // Second finger appears mid-gesture without its own touchstart
        v.apply_input(&ViewerInput::TouchStart(vec![TouchPoint::new(0.0, 0.0)]));
        let changed = v.apply_input(&ViewerInput::TouchMove(vec![
            TouchPoint::new(0.0, 0.0),
            TouchPoint::new(400.0, 0.0),
        ]));
        assert!(!changed);
        assert_eq!(v.gesture().fingers, 2);
    }

    #[test]
    fn test_lifting_one_finger_reseeds_pan() {
        let mut v = ViewerState::new();
        v.apply_input(&ViewerInput::TouchStart(vec![
            TouchPoint::new(0.0, 0.0),
            TouchPoint::new(100.0, 0.0),
        ]));
        v.apply_input(&ViewerInput::TouchEnd(vec![TouchPoint::new(0.0, 50.0)]));
        v.apply_input(&ViewerInput::TouchMove(vec![TouchPoint::new(0.0, 70.0)]));
        assert_eq!(v.transform().pan_y, 2.0);
    }

    #[test]
    fn test_scale_stays_bounded_under_mixed_input() {
        let mut v = ViewerState::new();
        let inputs = [-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, 1.0, -1.0];
        for (i, dy) in inputs.iter().cycle().take(500).enumerate() {
            if i % 3 == 0 {
                v.apply_key(if *dy > 0.0 { ViewerKey::ZoomIn } else { ViewerKey::ZoomOut });
            } else {
                v.apply_input(&wheel(*dy * 120.0, false));
            }
            let s = v.transform().scale;
            assert!((1.0..=5.0).contains(&s), "scale {s} out of range");
        }
    }
}
