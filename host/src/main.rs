use std::env;
use std::time::Instant;

use wheel_core::{format_time, RoundState, Signal};
use wheel_host::{replay_file, ReplayReport};

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    // Parse CLI arguments
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("color-wheel", String::as_str);

    if args.len() < 2 {
        print_usage(program);
        std::process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "replay" => {
            if args.len() < 3 {
                eprintln!("Usage: {} replay <log_file> [--json]", program);
                eprintln!("Error: Missing required argument");
                std::process::exit(1);
            }

            let log_file = &args[2];
            let json = match args.get(3).map(String::as_str) {
                None => false,
                Some("--json") => true,
                Some(other) => {
                    eprintln!("❌ Unknown option: {}", other);
                    std::process::exit(1);
                }
            };

            replay_command(log_file, json);
        }

        "--help" | "-h" => {
            print_usage(program);
            std::process::exit(0);
        }

        _ => {
            eprintln!("❌ Unknown command: {}", command);
            print_usage(program);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  replay <log_file> [--json]");
    eprintln!("      Replay a recorded color wheel session and report the outcome");
    eprintln!("      - log_file: JSON file containing the session log");
    eprintln!("      - --json:   Print the report as JSON instead of text");
    eprintln!();
    eprintln!("Logging is controlled with RUST_LOG, e.g. RUST_LOG=info or RUST_LOG=trace");
    eprintln!("(trace prints a JSON frame after every event).");
}

fn replay_command(log_file: &str, json: bool) {
    let start = Instant::now();

    let (report, signals) = replay_file(log_file).unwrap_or_else(|e| {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    });

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("❌ Error encoding report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(log_file, &report, &signals, start.elapsed().as_secs_f64());
    }

    if !report.valid {
        std::process::exit(1);
    }
}

fn print_report(log_file: &str, report: &ReplayReport, signals: &[Signal], secs: f64) {
    println!("🎨 Color Wheel session replay");
    println!("{}", "=".repeat(70));
    println!("  Log file: {}", log_file);
    println!("  Events processed: {}", report.events_len);
    println!("  Replay time: {:.3}s", secs);
    println!();

    if !report.valid {
        println!("❌ INVALID LOG");
        println!("  Reason: {}", report.reason.as_deref().unwrap_or("Unknown"));
        println!("{}", "=".repeat(70));
        return;
    }

    let timeline: Vec<&str> = signals
        .iter()
        .map(|s| match s {
            Signal::Won => "🎉",
            Signal::Lost => "⏰",
        })
        .collect();

    println!("🏆 Score: {}", report.score);
    println!("  Rounds won: {}", report.rounds_won);
    println!("  Rounds lost: {}", report.rounds_lost);
    if !timeline.is_empty() {
        println!("  Results: {}", timeline.join(" "));
    }
    println!("  Streak multiplier: {}x", report.multiplier);
    println!(
        "  Last round: {} ({} left)",
        describe(report.final_state),
        format_time(report.time_left)
    );
    println!("  Log Hash: 0x{}", report.log_hash);
    println!("{}", "=".repeat(70));
}

fn describe(state: RoundState) -> &'static str {
    match state {
        RoundState::Idle => "never started",
        RoundState::Active => "in progress",
        RoundState::Paused => "paused",
        RoundState::Won => "perfect match",
        RoundState::TimedOut => "out of time",
    }
}
