use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::color::{Color, Tab};
use crate::constants::LOG_HASH_PREFIX;
use crate::wheel::WheelConfig;

/// One player input, as recorded by the front end
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Input {
    /// "New color" button. A recorded `target` replaces the random draw.
    NewRound {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<Color>,
    },
    PointerDown { tab: Tab },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    TogglePause,
    ResetTabs,
}

/// An input stamped with milliseconds since the session started
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub input: Input,
}

/// Recorded play session (JSON)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub v: u32,
    /// Seeds target draws for rounds without a recorded target
    #[serde(default)]
    pub seed: u64,
    /// Wheel geometry in pointer coordinates; defaults when absent
    #[serde(default)]
    pub wheel: Option<WheelConfig>,
    pub events: Vec<LoggedEvent>,
    /// Session end; the clock runs up to here after the last event
    #[serde(default)]
    pub ended_at_ms: Option<u64>,
}

impl SessionLog {
    pub fn wheel(&self) -> WheelConfig {
        self.wheel.unwrap_or_default()
    }
}

/// Compute SHA-256 hash of a session log
/// This hash binds a replay report to the exact inputs it was computed from
pub fn compute_log_hash(log: &SessionLog) -> [u8; 32] {
    // Version prefix + seed + ~25 bytes per event
    let mut buf = Vec::with_capacity(LOG_HASH_PREFIX.len() + 8 + log.events.len() * 25);

    buf.extend_from_slice(LOG_HASH_PREFIX);
    buf.extend_from_slice(&log.seed.to_le_bytes());

    for ev in log.events.iter() {
        buf.extend_from_slice(&ev.at_ms.to_le_bytes());
        encode_input(&ev.input, &mut buf);
    }

    match log.ended_at_ms {
        Some(end) => {
            buf.push(1);
            buf.extend_from_slice(&end.to_le_bytes());
        }
        None => buf.push(0),
    }

    let out = Sha256::digest(&buf);
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

// kind byte, then a fixed little-endian payload per kind
fn encode_input(input: &Input, buf: &mut Vec<u8>) {
    match *input {
        Input::NewRound { target: None } => buf.push(0),
        Input::NewRound { target: Some(c) } => {
            buf.push(1);
            buf.extend_from_slice(&[c.r, c.g, c.b]);
        }
        Input::PointerDown { tab } => {
            buf.push(2);
            buf.push(tab.code());
        }
        Input::PointerMove { x, y } => {
            buf.push(3);
            buf.extend_from_slice(&x.to_bits().to_le_bytes());
            buf.extend_from_slice(&y.to_bits().to_le_bytes());
        }
        Input::PointerUp => buf.push(4),
        Input::TogglePause => buf.push(5),
        Input::ResetTabs => buf.push(6),
    }
}
