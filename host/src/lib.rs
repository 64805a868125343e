use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use wheel_core::constants::LOG_VERSION;
use wheel_core::{
    replay, PresentationSink, ReplayOutput, RoundState, Session, SessionLog, Signal, Snapshot,
    WheelConfig,
};

/// Refuse log files above this size before reading them (10 MB)
pub const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Outcome of a replayed session, ready for display or JSON output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplayReport {
    /// Whether the log was well formed
    pub valid: bool,

    /// Why the log was rejected
    pub reason: Option<String>,

    /// Cumulative score at the end of the session
    pub score: u64,

    /// Streak multiplier at the end of the session
    pub multiplier: u32,

    /// Rounds that ended in a match
    pub rounds_won: u32,

    /// Rounds that ran out of time
    pub rounds_lost: u32,

    /// State of the last round
    pub final_state: RoundState,

    /// Seconds left on the last round's clock
    pub time_left: u32,

    /// Number of events processed
    pub events_len: u32,

    /// SHA-256 hash of the session log (hex)
    pub log_hash: String,
}

impl From<ReplayOutput> for ReplayReport {
    fn from(out: ReplayOutput) -> Self {
        Self {
            valid: out.valid,
            reason: out.reason,
            score: out.score,
            multiplier: out.multiplier,
            rounds_won: out.rounds_won,
            rounds_lost: out.rounds_lost,
            final_state: out.final_state,
            time_left: out.time_left,
            events_len: out.events_len,
            log_hash: hex::encode(out.log_hash_sha256),
        }
    }
}

/// Presentation sink that narrates the game through `tracing`.
///
/// Signals are logged with the tone sequence a front end would play; every
/// frame is logged at trace level as a JSON snapshot.
#[derive(Debug, Default)]
pub struct TracingSink {
    wheel: WheelConfig,
    signals: Vec<Signal>,
}

impl TracingSink {
    pub fn new(wheel: WheelConfig) -> Self {
        Self { wheel, signals: Vec::new() }
    }

    /// Signals received so far, in order
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }
}

impl PresentationSink for TracingSink {
    fn signal(&mut self, signal: Signal) {
        let notes: Vec<String> = signal
            .cue()
            .iter()
            .map(|t| format!("{}Hz@+{}ms", t.frequency_hz, t.offset_ms))
            .collect();
        match signal {
            Signal::Won => tracing::info!(cue = %notes.join(" "), "Target matched"),
            Signal::Lost => tracing::info!(cue = %notes.join(" "), "Out of time"),
        }
        self.signals.push(signal);
    }

    fn frame(&mut self, session: &Session) {
        if tracing::enabled!(tracing::Level::TRACE) {
            let snapshot = Snapshot::capture(session, &self.wheel);
            match serde_json::to_string(&snapshot) {
                Ok(json) => tracing::trace!(frame = %json),
                Err(e) => tracing::warn!("Failed to encode frame: {}", e),
            }
        }
    }
}

/// Read and parse a session log from disk.
///
/// Files larger than [`MAX_LOG_SIZE`] are rejected without being read.
pub fn load_session_log(path: impl AsRef<Path>) -> Result<SessionLog, Box<dyn std::error::Error>> {
    let path = path.as_ref();

    let metadata = fs::metadata(path)
        .map_err(|e| format!("Error accessing file '{}': {}", path.display(), e))?;
    if metadata.len() > MAX_LOG_SIZE {
        return Err(format!(
            "Log file too large: {} bytes (max {} bytes)",
            metadata.len(),
            MAX_LOG_SIZE
        )
        .into());
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Error reading file '{}': {}", path.display(), e))?;
    parse_session_log(&raw)
}

/// Parse a session log from JSON text.
pub fn parse_session_log(raw: &str) -> Result<SessionLog, Box<dyn std::error::Error>> {
    let log: SessionLog =
        serde_json::from_str(raw).map_err(|e| format!("Error parsing JSON: {}", e))?;

    if log.v != LOG_VERSION {
        return Err(format!("Unsupported log version: {}", log.v).into());
    }
    Ok(log)
}

/// Replay a session log, narrating it through `sink`.
pub fn replay_session<S: PresentationSink + ?Sized>(log: &SessionLog, sink: &mut S) -> ReplayReport {
    tracing::info!(
        "Replaying session log with {} events (seed {})",
        log.events.len(),
        log.seed
    );

    let report = ReplayReport::from(replay(log, sink));

    if report.valid {
        tracing::info!(
            "Replay finished: score {} after {} won / {} lost",
            report.score,
            report.rounds_won,
            report.rounds_lost
        );
    } else {
        tracing::warn!(
            "Session log rejected: {}",
            report.reason.as_deref().unwrap_or("unknown")
        );
    }
    report
}

/// Load, replay and report in one step.
pub fn replay_file(path: impl AsRef<Path>) -> Result<(ReplayReport, Vec<Signal>), Box<dyn std::error::Error>> {
    let log = load_session_log(path)?;
    let mut sink = TracingSink::new(log.wheel());
    let report = replay_session(&log, &mut sink);
    Ok((report, sink.signals))
}
