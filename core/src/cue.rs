// Audio feedback as data. Playback belongs to the presentation layer.

use serde::Serialize;

use crate::session::Signal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
}

/// A single oscillator note, fading out over `duration_ms`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    /// Delay from the start of the cue
    pub offset_ms: u32,
    pub waveform: Waveform,
}

/// Rising two-note chime
pub const WIN_CUE: [Tone; 2] = [
    Tone { frequency_hz: 440.0, duration_ms: 200, offset_ms: 0, waveform: Waveform::Sine },
    Tone { frequency_hz: 660.0, duration_ms: 200, offset_ms: 250, waveform: Waveform::Sine },
];

/// Falling two-note buzz
pub const LOSE_CUE: [Tone; 2] = [
    Tone { frequency_hz: 300.0, duration_ms: 500, offset_ms: 0, waveform: Waveform::Triangle },
    Tone { frequency_hz: 200.0, duration_ms: 500, offset_ms: 500, waveform: Waveform::Triangle },
];

impl Signal {
    /// Tones the presentation layer plays for this signal
    pub fn cue(self) -> &'static [Tone] {
        match self {
            Signal::Won => &WIN_CUE,
            Signal::Lost => &LOSE_CUE,
        }
    }
}
