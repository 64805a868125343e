use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::constants::{LOG_VERSION, MAX_EVENTS};
use crate::interaction::DragController;
use crate::log::{compute_log_hash, Input, SessionLog};
use crate::session::{PresentationSink, RoundState, Session, Signal};
use crate::wheel::Point;

/// Result of replaying a session log
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutput {
    pub valid: bool,
    pub reason: Option<String>,
    pub score: u64,
    pub multiplier: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub final_state: RoundState,
    pub time_left: u32,
    pub events_len: u32,
    pub log_hash_sha256: [u8; 32],
}

impl ReplayOutput {
    fn ok(session: &Session, tally: Tally, events_len: u32, hash: [u8; 32]) -> Self {
        Self {
            valid: true,
            reason: None,
            score: session.score(),
            multiplier: session.multiplier(),
            rounds_won: tally.won,
            rounds_lost: tally.lost,
            final_state: session.state(),
            time_left: session.time_left(),
            events_len,
            log_hash_sha256: hash,
        }
    }

    pub fn invalid(msg: &str) -> Self {
        Self {
            valid: false,
            reason: Some(msg.into()),
            score: 0,
            multiplier: 0,
            rounds_won: 0,
            rounds_lost: 0,
            final_state: RoundState::Idle,
            time_left: 0,
            events_len: 0,
            log_hash_sha256: [0u8; 32],
        }
    }
}

#[derive(Clone, Copy, Default)]
struct Tally {
    won: u32,
    lost: u32,
}

// Counts signals on their way to the caller's sink
struct Counting<'a, S: ?Sized> {
    inner: &'a mut S,
    tally: Tally,
}

impl<S: PresentationSink + ?Sized> PresentationSink for Counting<'_, S> {
    fn signal(&mut self, signal: Signal) {
        match signal {
            Signal::Won => self.tally.won += 1,
            Signal::Lost => self.tally.lost += 1,
        }
        self.inner.signal(signal);
    }

    fn frame(&mut self, session: &Session) {
        self.inner.frame(session);
    }
}

/// Replay a recorded session through a fresh game, feeding `sink` as a live
/// front end would be fed.
pub fn replay<S: PresentationSink + ?Sized>(log: &SessionLog, sink: &mut S) -> ReplayOutput {
    if log.v != LOG_VERSION {
        return ReplayOutput::invalid("Unsupported log version");
    }
    if log.events.len() > MAX_EVENTS {
        return ReplayOutput::invalid("Too many events");
    }

    let wheel = log.wheel();
    let mut rng = StdRng::seed_from_u64(log.seed);
    let mut session = Session::new();
    let mut drag = DragController::new(wheel.center);
    let mut sink = Counting { inner: sink, tally: Tally::default() };
    let mut clock_ms: u64 = 0;

    for ev in log.events.iter() {
        if ev.at_ms < clock_ms {
            return ReplayOutput::invalid("Event timestamps go backwards");
        }
        session.advance_clock(ev.at_ms - clock_ms);
        clock_ms = ev.at_ms;

        match ev.input {
            Input::NewRound { target: Some(target) } => session.start_round_with_target(target),
            Input::NewRound { target: None } => session.start_new_round(&mut rng),
            Input::PointerDown { tab } => drag.begin_drag(&session, tab),
            // move/up are only delivered while a drag holds the subscription
            Input::PointerMove { x, y } if drag.is_subscribed() => {
                drag.on_pointer_move(&mut session, Point::new(x, y));
            }
            Input::PointerUp if drag.is_subscribed() => drag.end_drag(),
            Input::PointerMove { .. } | Input::PointerUp => {}
            Input::TogglePause => session.toggle_pause(),
            Input::ResetTabs => session.reset_tabs(),
        }
        session.flush_to(&mut sink);
    }

    if let Some(end) = log.ended_at_ms {
        if end < clock_ms {
            return ReplayOutput::invalid("Session ends before its last event");
        }
        session.advance_clock(end - clock_ms);
        session.flush_to(&mut sink);
    }

    tracing::debug!(
        score = session.score(),
        won = sink.tally.won,
        lost = sink.tally.lost,
        "replay finished"
    );

    let hash = compute_log_hash(log);
    let tally = sink.tally;
    ReplayOutput::ok(&session, tally, log.events.len() as u32, hash)
}
