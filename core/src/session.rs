use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{Color, Tab, TabAngles};
use crate::constants::{BASE_MULTIPLIER, POINTS_PER_MATCH, ROUND_SECONDS};
use crate::matching::is_match;
use crate::timer::RoundTimer;
use crate::wheel::normalize_degrees;

/// Lifecycle of the current round
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// Before the first round
    #[default]
    Idle,
    /// Countdown running, input accepted
    Active,
    /// Countdown frozen, input rejected
    Paused,
    /// Target matched; terminal for the round
    Won,
    /// Countdown expired; terminal for the round
    TimedOut,
}

/// Discrete notifications for the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Won,
    Lost,
}

/// Consumer of game output (rendering, audio).
pub trait PresentationSink {
    fn signal(&mut self, signal: Signal);

    fn frame(&mut self, _session: &Session) {}
}

impl PresentationSink for Vec<Signal> {
    fn signal(&mut self, signal: Signal) {
        self.push(signal);
    }
}

/// Scoring state machine for one player.
///
/// Every mutation is gated on [`RoundState::Active`]; requests that arrive in
/// any other state are dropped without error. The player color is never
/// stored, it is recomputed from the tab angles on every read.
#[derive(Clone, Debug)]
pub struct Session {
    state: RoundState,
    target: Color,
    angles: TabAngles,
    score: u64,
    multiplier: u32,
    time_left: u32,
    timer: RoundTimer,
    pending: Vec<Signal>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: RoundState::Idle,
            target: Color::BLACK,
            angles: TabAngles::default(),
            score: 0,
            multiplier: BASE_MULTIPLIER,
            time_left: ROUND_SECONDS,
            timer: RoundTimer::default(),
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == RoundState::Active
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn player_color(&self) -> Color {
        self.angles.color()
    }

    pub fn angles(&self) -> TabAngles {
        self.angles
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    /// Draw a fresh random target and start a round.
    pub fn start_new_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.start_round_with_target(Color::random(rng));
    }

    /// Start a round against a known target. Abandons any round in progress
    /// without touching score, multiplier or tab angles.
    pub fn start_round_with_target(&mut self, target: Color) {
        tracing::debug!(from = ?self.state, %target, "new round");
        self.target = target;
        self.state = RoundState::Active;
        self.time_left = ROUND_SECONDS;
        self.timer.arm();
    }

    /// One second of countdown.
    pub fn tick(&mut self) {
        if !self.is_active() {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            tracing::debug!(score = self.score, "round timed out");
            self.state = RoundState::TimedOut;
            self.multiplier = BASE_MULTIPLIER;
            self.timer.cancel();
            self.pending.push(Signal::Lost);
        }
    }

    /// Feed elapsed wall time; fires every tick that became due.
    pub fn advance_clock(&mut self, elapsed_ms: u64) {
        let due = self.timer.advance(elapsed_ms);
        for _ in 0..due {
            if !self.is_active() {
                break;
            }
            self.tick();
        }
    }

    /// Re-evaluate the derived player color against the target.
    pub fn on_angles_changed(&mut self) {
        if !self.is_active() || !is_match(self.target, self.player_color()) {
            return;
        }
        let points = POINTS_PER_MATCH * u64::from(self.multiplier);
        self.score += points;
        self.multiplier += 1;
        self.state = RoundState::Won;
        self.timer.cancel();
        tracing::debug!(points, score = self.score, multiplier = self.multiplier, "target matched");
        self.pending.push(Signal::Won);
    }

    /// Move one tab, wrapping the angle into [0, 360). Ignored outside an
    /// active round.
    pub fn set_tab_angle(&mut self, tab: Tab, angle: f64) {
        if !self.is_active() {
            return;
        }
        self.angles.set(tab, normalize_degrees(angle));
        self.on_angles_changed();
    }

    /// Put all tabs back at their default positions.
    pub fn reset_tabs(&mut self) {
        if !self.is_active() {
            return;
        }
        self.angles = TabAngles::default();
        self.on_angles_changed();
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            RoundState::Active => {
                self.state = RoundState::Paused;
                self.timer.cancel();
            }
            RoundState::Paused => {
                self.state = RoundState::Active;
                self.timer.arm();
            }
            RoundState::Idle | RoundState::Won | RoundState::TimedOut => return,
        }
        tracing::debug!(state = ?self.state, time_left = self.time_left, "pause toggled");
    }

    /// Drain queued signals in emission order.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.pending)
    }

    /// Forward queued signals, then the current state, to a sink.
    pub fn flush_to<S: PresentationSink + ?Sized>(&mut self, sink: &mut S) {
        for signal in self.take_signals() {
            sink.signal(signal);
        }
        sink.frame(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // 180 deg -> 128, 90 deg -> 64, 270 deg -> 191
    const REACHABLE: Color = Color::new(128, 64, 191);

    fn active(target: Color) -> Session {
        let mut s = Session::new();
        s.start_round_with_target(target);
        s
    }

    fn steer_to_reachable(s: &mut Session) {
        s.set_tab_angle(Tab::Red, 180.0);
        s.set_tab_angle(Tab::Green, 90.0);
        s.set_tab_angle(Tab::Blue, 270.0);
    }

    fn run_out_clock(s: &mut Session) {
        for _ in 0..ROUND_SECONDS {
            s.tick();
        }
    }

    #[test]
    fn new_session_is_idle() {
        let s = Session::new();
        assert_eq!(s.state(), RoundState::Idle);
        assert_eq!(s.score(), 0);
        assert_eq!(s.multiplier(), 1);
        assert_eq!(s.time_left(), 60);
        assert!(!s.timer().is_armed());
    }

    #[test]
    fn matching_color_wins_the_round() {
        let mut s = active(Color::new(100, 100, 100));
        // 141.1765 deg -> 100
        let angle = 100.0 / 255.0 * 360.0;
        s.set_tab_angle(Tab::Red, angle);
        s.set_tab_angle(Tab::Green, angle);
        assert_eq!(s.state(), RoundState::Active);
        s.set_tab_angle(Tab::Blue, angle);

        assert_eq!(s.player_color(), Color::new(100, 100, 100));
        assert_eq!(s.state(), RoundState::Won);
        assert_eq!(s.score(), 100);
        assert_eq!(s.multiplier(), 2);
        assert_eq!(s.take_signals(), vec![Signal::Won]);
        assert!(!s.timer().is_armed());
    }

    #[test]
    fn win_is_counted_once() {
        let mut s = active(REACHABLE);
        steer_to_reachable(&mut s);
        s.on_angles_changed();
        s.on_angles_changed();
        assert_eq!(s.score(), 100);
        assert_eq!(s.take_signals(), vec![Signal::Won]);
    }

    #[test]
    fn streak_scales_points() {
        let mut s = active(REACHABLE);
        steer_to_reachable(&mut s);
        s.start_round_with_target(REACHABLE);
        // already on target: any angle event wins straight away
        s.on_angles_changed();
        s.start_round_with_target(REACHABLE);
        s.on_angles_changed();
        assert_eq!(s.score(), 100 + 200 + 300);
        assert_eq!(s.multiplier(), 4);
    }

    #[test]
    fn timeout_resets_multiplier_but_keeps_score() {
        let mut s = active(REACHABLE);
        steer_to_reachable(&mut s);
        s.start_round_with_target(Color::BLACK);
        assert_eq!(s.multiplier(), 2);

        run_out_clock(&mut s);
        assert_eq!(s.state(), RoundState::TimedOut);
        assert_eq!(s.time_left(), 0);
        assert_eq!(s.multiplier(), 1);
        assert_eq!(s.score(), 100);
        assert_eq!(s.take_signals(), vec![Signal::Won, Signal::Lost]);
    }

    #[test]
    fn tick_never_goes_below_zero() {
        let mut s = active(Color::BLACK);
        run_out_clock(&mut s);
        s.tick();
        s.tick();
        assert_eq!(s.time_left(), 0);
        assert_eq!(s.take_signals(), vec![Signal::Lost]);
    }

    #[test]
    fn tick_is_ignored_when_not_active() {
        let mut s = Session::new();
        s.tick();
        assert_eq!(s.time_left(), 60);

        let mut s = active(Color::BLACK);
        s.toggle_pause();
        s.tick();
        assert_eq!(s.time_left(), 60);
    }

    #[test]
    fn no_angle_changes_after_round_ends() {
        let mut s = active(Color::BLACK);
        run_out_clock(&mut s);
        let before = s.angles();
        s.set_tab_angle(Tab::Red, 45.0);
        s.reset_tabs();
        assert_eq!(s.angles(), before);
    }

    #[test]
    fn reset_refused_while_paused_or_won() {
        let mut s = active(REACHABLE);
        s.set_tab_angle(Tab::Red, 180.0);
        s.toggle_pause();
        s.reset_tabs();
        assert_eq!(s.angles().r, 180.0);
        assert_eq!(s.state(), RoundState::Paused);

        s.toggle_pause();
        steer_to_reachable(&mut s);
        assert_eq!(s.state(), RoundState::Won);
        s.reset_tabs();
        assert_eq!(s.angles().color(), REACHABLE);
        assert_eq!(s.state(), RoundState::Won);
    }

    #[test]
    fn pause_after_timeout_is_noop() {
        let mut s = active(Color::BLACK);
        run_out_clock(&mut s);
        s.toggle_pause();
        assert_eq!(s.state(), RoundState::TimedOut);
        assert!(!s.timer().is_armed());
    }

    #[test]
    fn tab_angles_are_stored_normalized() {
        let mut s = active(Color::BLACK);
        s.set_tab_angle(Tab::Red, 725.0);
        s.set_tab_angle(Tab::Blue, -90.0);
        let angles = s.angles();
        assert!((angles.r - 5.0).abs() < 1e-9);
        assert!((angles.b - 270.0).abs() < 1e-9);
    }

    #[test]
    fn pause_while_won_is_noop() {
        let mut s = active(REACHABLE);
        steer_to_reachable(&mut s);
        s.toggle_pause();
        assert_eq!(s.state(), RoundState::Won);
    }

    #[test]
    fn pause_from_idle_is_noop() {
        let mut s = Session::new();
        s.toggle_pause();
        assert_eq!(s.state(), RoundState::Idle);
    }

    #[test]
    fn pause_freezes_countdown_and_input() {
        let mut s = active(REACHABLE);
        s.advance_clock(3_000);
        s.toggle_pause();
        assert_eq!(s.state(), RoundState::Paused);

        s.advance_clock(20_000);
        steer_to_reachable(&mut s);
        assert_eq!(s.time_left(), 57);
        assert_eq!(s.angles(), TabAngles::default());

        s.toggle_pause();
        assert_eq!(s.state(), RoundState::Active);
        s.advance_clock(2_000);
        assert_eq!(s.time_left(), 55);
    }

    #[test]
    fn new_round_mid_round_keeps_streak() {
        let mut s = active(REACHABLE);
        steer_to_reachable(&mut s);
        s.start_round_with_target(REACHABLE);
        s.on_angles_changed();
        s.start_round_with_target(Color::BLACK);
        assert_eq!((s.score(), s.multiplier()), (300, 3));

        s.advance_clock(12_000);
        s.start_new_round(&mut StdRng::seed_from_u64(99));
        assert_eq!(s.state(), RoundState::Active);
        assert_eq!(s.time_left(), 60);
        assert_eq!((s.score(), s.multiplier()), (300, 3));
        assert_eq!(s.angles().color(), REACHABLE);
    }

    #[test]
    fn new_round_resumes_from_pause() {
        let mut s = active(Color::BLACK);
        s.toggle_pause();
        s.start_round_with_target(Color::new(9, 9, 9));
        assert_eq!(s.state(), RoundState::Active);
        assert!(s.timer().is_armed());
    }

    #[test]
    fn clock_stops_at_timeout() {
        let mut s = active(Color::BLACK);
        s.advance_clock(90_000);
        assert_eq!(s.state(), RoundState::TimedOut);
        assert_eq!(s.time_left(), 0);
        assert_eq!(s.take_signals(), vec![Signal::Lost]);
    }

    #[test]
    fn reset_tabs_restores_defaults_and_can_win() {
        let mut s = active(Color::new(0, 85, 170));
        s.set_tab_angle(Tab::Red, 200.0);
        assert_eq!(s.state(), RoundState::Active);
        s.reset_tabs();
        assert_eq!(s.angles(), TabAngles::default());
        assert_eq!(s.state(), RoundState::Won);
    }

    #[test]
    fn flush_forwards_signals_in_order() {
        let mut s = active(REACHABLE);
        steer_to_reachable(&mut s);
        s.start_round_with_target(Color::BLACK);
        run_out_clock(&mut s);
        let mut sink: Vec<Signal> = Vec::new();
        s.flush_to(&mut sink);
        assert_eq!(sink, vec![Signal::Won, Signal::Lost]);
        assert!(s.take_signals().is_empty());
    }
}
