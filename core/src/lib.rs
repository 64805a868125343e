//! Game core for the color wheel: drag three tabs around a wheel until the
//! mixed color matches the target before the countdown runs out.
//!
//! Everything here is deterministic and clock-free. Front ends feed pointer
//! events and elapsed time in, and read state and signals back out.

pub mod color;
pub mod constants;
pub mod cue;
pub mod interaction;
pub mod log;
pub mod matching;
pub mod replay;
pub mod session;
pub mod timer;
pub mod view;
pub mod wheel;

pub use color::{Color, Tab, TabAngles};
pub use cue::{Tone, Waveform};
pub use interaction::DragController;
pub use log::{compute_log_hash, Input, LoggedEvent, SessionLog};
pub use matching::is_match;
pub use replay::{replay, ReplayOutput};
pub use session::{PresentationSink, RoundState, Session, Signal};
pub use timer::RoundTimer;
pub use view::{format_time, Banner, Controls, Snapshot};
pub use wheel::{angle_from_pointer, color_channel_from_angle, tab_position, Point, WheelConfig};
