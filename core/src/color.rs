use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BLUE_ANGLE, DEFAULT_GREEN_ANGLE, DEFAULT_RED_ANGLE};
use crate::wheel::color_channel_from_angle;

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draw three independent uniform channels in [0, 255].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.gen_range(0..=255),
            g: rng.gen_range(0..=255),
            b: rng.gen_range(0..=255),
        }
    }
}

/// CSS functional notation, e.g. `rgb(12, 200, 7)`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One of the three draggable markers on the wheel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "g")]
    Green,
    #[serde(rename = "b")]
    Blue,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Red, Tab::Green, Tab::Blue];

    /// Short label drawn on the tab
    pub fn label(self) -> &'static str {
        match self {
            Tab::Red => "R",
            Tab::Green => "G",
            Tab::Blue => "B",
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Tab::Red => 0,
            Tab::Green => 1,
            Tab::Blue => 2,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Angular position of each tab (degrees)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TabAngles {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for TabAngles {
    fn default() -> Self {
        Self {
            r: DEFAULT_RED_ANGLE,
            g: DEFAULT_GREEN_ANGLE,
            b: DEFAULT_BLUE_ANGLE,
        }
    }
}

impl TabAngles {
    pub fn get(&self, tab: Tab) -> f64 {
        match tab {
            Tab::Red => self.r,
            Tab::Green => self.g,
            Tab::Blue => self.b,
        }
    }

    pub fn set(&mut self, tab: Tab, angle: f64) {
        match tab {
            Tab::Red => self.r = angle,
            Tab::Green => self.g = angle,
            Tab::Blue => self.b = angle,
        }
    }

    /// The color mixed by the current tab positions.
    pub fn color(&self) -> Color {
        Color {
            r: color_channel_from_angle(self.r),
            g: color_channel_from_angle(self.g),
            b: color_channel_from_angle(self.b),
        }
    }
}
