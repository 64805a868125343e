// Read model handed to the presentation layer.

use serde::Serialize;

use crate::color::{Color, Tab, TabAngles};
use crate::constants::CRITICAL_SECONDS;
use crate::session::{RoundState, Session};
use crate::wheel::{tab_position, Point, WheelConfig};

/// `MM:SS`, zero padded.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// The countdown is flagged in the last seconds of a running clock.
pub fn time_is_critical(seconds: u32) -> bool {
    seconds > 0 && seconds <= CRITICAL_SECONDS
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Banner {
    None,
    Paused,
    /// `streak` is the current run of consecutive wins, this one included
    Matched { streak: u32 },
    OutOfTime,
}

impl Banner {
    pub fn for_session(session: &Session) -> Self {
        match session.state() {
            RoundState::Paused => Banner::Paused,
            RoundState::Won => Banner::Matched {
                streak: session.multiplier().saturating_sub(1),
            },
            RoundState::TimedOut => Banner::OutOfTime,
            RoundState::Idle | RoundState::Active => Banner::None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseLabel {
    Pause,
    Resume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub drag_enabled: bool,
    pub reset_enabled: bool,
    pub pause_enabled: bool,
    pub pause_label: PauseLabel,
    pub new_round_enabled: bool,
}

impl Controls {
    pub fn for_state(state: RoundState) -> Self {
        let active = state == RoundState::Active;
        let paused = state == RoundState::Paused;
        Self {
            drag_enabled: active,
            reset_enabled: active,
            pause_enabled: active || paused,
            pause_label: if paused { PauseLabel::Resume } else { PauseLabel::Pause },
            new_round_enabled: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TabView {
    pub tab: Tab,
    pub angle: f64,
    pub position: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub state: RoundState,
    pub target: Color,
    pub player: Color,
    pub angles: TabAngles,
    pub tabs: [TabView; 3],
    pub score: u64,
    pub multiplier: u32,
    pub time_left: u32,
    pub clock: String,
    pub time_critical: bool,
    pub banner: Banner,
    pub controls: Controls,
}

impl Snapshot {
    pub fn capture(session: &Session, wheel: &WheelConfig) -> Self {
        let angles = session.angles();
        let tabs = Tab::ALL.map(|tab| {
            let angle = angles.get(tab);
            TabView {
                tab,
                angle,
                position: tab_position(angle, wheel.center, wheel.radius),
            }
        });
        let time_left = session.time_left();
        Self {
            state: session.state(),
            target: session.target(),
            player: session.player_color(),
            angles,
            tabs,
            score: session.score(),
            multiplier: session.multiplier(),
            time_left,
            clock: format_time(time_left),
            time_critical: time_is_critical(time_left),
            banner: Banner::for_session(session),
            controls: Controls::for_state(session.state()),
        }
    }
}
