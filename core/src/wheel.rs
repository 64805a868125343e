// Angle/color math for the wheel.
// Screen coordinates: x grows right, y grows down, angles grow clockwise from +x.

use serde::{Deserialize, Serialize};

use crate::constants::{WHEEL_CENTER_X, WHEEL_CENTER_Y, WHEEL_RADIUS};

const FULL_TURN: f64 = 360.0;
const CHANNEL_MAX: f64 = 255.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Wheel geometry in the pointer's coordinate space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub center: Point,
    pub radius: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            center: Point::new(WHEEL_CENTER_X, WHEEL_CENTER_Y),
            radius: WHEEL_RADIUS,
        }
    }
}

/// Wrap any angle into [0, 360).
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(FULL_TURN);
    // rem_euclid may round up to the modulus for tiny negative inputs
    if a >= FULL_TURN {
        0.0
    } else {
        a
    }
}

/// Map a tab angle to a channel value: `round(normalized / 360 * 255)`.
#[inline]
pub fn color_channel_from_angle(angle: f64) -> u8 {
    let normalized = normalize_degrees(angle);
    let v = (normalized / FULL_TURN * CHANNEL_MAX).round();
    v.clamp(0.0, CHANNEL_MAX) as u8
}

/// Polar to Cartesian: where a tab at `angle` is drawn.
#[inline]
pub fn tab_position(angle: f64, center: Point, radius: f64) -> Point {
    let radians = angle.to_radians();
    Point {
        x: center.x + radius * radians.cos(),
        y: center.y + radius * radians.sin(),
    }
}

/// Angle of the vector from `origin` to `pointer`, in [0, 360).
/// A pointer sitting exactly on the origin yields 0.
#[inline]
pub fn angle_from_pointer(pointer: Point, origin: Point) -> f64 {
    let dx = pointer.x - origin.x;
    let dy = pointer.y - origin.y;
    let mut angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 {
        angle += FULL_TURN;
    }
    normalize_degrees(angle)
}
