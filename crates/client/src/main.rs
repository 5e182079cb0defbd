//! Wayfare client binary.
//!
//! Composition root for the navigation client: assembles the navigator via
//! client-bootstrap, wires a transport and scan source, and drives it with
//! a line-oriented REPL. Without a chain configured the mock transport is
//! used, which makes the binary a dry-run cockpit for the planner.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use client_bootstrap::{ClientConfig, build_navigator};
use client_chain_core::MockWorldClient;
use nav_core::Direction;
use runtime::{Event, MovementEvent, Navigator, ScanEvent, SkillEvent, TableScanSource, Topic};

/// Demo terrain fed to the scan source by the `seed` command.
const DEMO_TABLE: &str = "\
+2: Air Air Air Air Air
+1: Air Air Air Air Air
0: Air Air Air Air Air
-1: Grass Grass Stone Stone Stone
-2: Stone Stone Stone Stone Stone
-3: Stone Stone Stone Stone Stone";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ClientConfig::from_env();
    tracing::info!("Starting wayfare client");
    tracing::info!("Actor: {}", config.actor);

    let transport = MockWorldClient::new();
    let scan_source = TableScanSource::new();
    let navigator = Arc::new(
        build_navigator(&config, transport.clone(), scan_source.clone()).await?,
    );

    spawn_event_echo(&navigator);

    run_repl(navigator, scan_source).await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}

/// Forward runtime events to the log so every outcome stays visible.
fn spawn_event_echo(navigator: &Arc<Navigator>) {
    for topic in [Topic::Scan, Topic::Movement, Topic::Skill] {
        let mut events = navigator.subscribe(topic);
        tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                match event {
                    Event::Scan(ScanEvent::Requested { direction }) => {
                        tracing::info!("scan requested: {direction}");
                    }
                    Event::Scan(ScanEvent::Digested { direction, safe_len }) => {
                        tracing::info!("scan {direction}: {safe_len} safe steps ahead");
                    }
                    Event::Scan(ScanEvent::CacheCleared) => {
                        tracing::info!("scan cache cleared");
                    }
                    Event::Movement(MovementEvent::Planned { command, .. }) => {
                        tracing::info!("queued: {command}");
                    }
                    Event::Movement(MovementEvent::Blocked { direction, reason }) => {
                        tracing::warn!("march {direction} blocked: {reason}");
                    }
                    Event::Movement(MovementEvent::Submitted { program, gas_used }) => {
                        tracing::info!("submitted: {program} (gas {gas_used})");
                    }
                    Event::Movement(MovementEvent::SubmissionFailed { program, error }) => {
                        tracing::warn!("submission failed: {program}: {error}");
                    }
                    Event::Skill(SkillEvent::Dispatched { name }) => {
                        tracing::debug!("skill dispatched: {name}");
                    }
                    Event::Skill(SkillEvent::Rejected { name, reason }) => {
                        tracing::warn!("skill {name} locked: {reason}");
                    }
                }
            }
        });
    }
}

async fn run_repl(navigator: Arc<Navigator>, scan_source: TableScanSource) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_help();

    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<String> = parts.map(str::to_string).collect();

        match command {
            "march" | "survey" => {
                let outcome = navigator.dispatch_skill(command, &args).await;
                println!("{}", outcome.as_str());
            }
            "seed" => match parse_direction(args.first()) {
                Ok(direction) => {
                    scan_source.insert(direction, DEMO_TABLE);
                    println!("demo terrain seeded for {direction}");
                }
                Err(message) => println!("{message}"),
            },
            "scan" => match parse_direction(args.first()) {
                Ok(direction) => match navigator.refresh_scan(direction).await {
                    Some(summary) => println!(
                        "scan {direction}: safe {} water {:?} hazard {:?}",
                        summary.safe_len, summary.water_at, summary.hazard_at
                    ),
                    None => println!("no scan output for {direction}"),
                },
                Err(message) => println!("{message}"),
            },
            "skills" => {
                for name in navigator.skill_names() {
                    println!("{name}");
                }
            }
            "progress" => {
                let progress = navigator.progress_snapshot();
                println!(
                    "level {} distance {} unlocked [{}]",
                    progress.level,
                    progress.distance_moved,
                    progress
                        .unlocked_skills
                        .iter()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            "unlock" => match args.first() {
                Some(skill) => {
                    let skill = skill.clone();
                    navigator.update_progress(|progress| progress.unlock(skill))?;
                    println!("unlocked");
                }
                None => println!("usage: unlock <skill>"),
            },
            "flag" => match args.first() {
                Some(name) => {
                    let value = args.get(1).is_none_or(|v| v != "off");
                    let name = name.clone();
                    navigator.update_progress(|progress| progress.set_flag(name, value))?;
                    println!("flag set");
                }
                None => println!("usage: flag <name> [on|off]"),
            },
            "history" => {
                for entry in navigator.history_snapshot() {
                    println!("{entry:?}");
                }
            }
            "clear" => {
                navigator.clear_cache();
                println!("cache cleared");
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try 'help')"),
        }
    }

    Ok(())
}

fn parse_direction(arg: Option<&String>) -> Result<Direction, String> {
    let Some(raw) = arg else {
        return Err("a direction is required (e.g. east, ne)".to_string());
    };
    Direction::parse(raw).map_err(|err| err.to_string())
}

fn print_help() {
    println!("commands:");
    println!("  march <dir>        plan and queue a march");
    println!("  survey <dir>       gated fresh scan (skill)");
    println!("  scan <dir>         fresh scan, bypassing the gate");
    println!("  seed <dir>         load demo terrain into the scan source");
    println!("  skills             list registered skills");
    println!("  progress           show level, distance, unlocks");
    println!("  unlock <skill>     add a skill to the unlock set");
    println!("  flag <name> [off]  set or clear a progression flag");
    println!("  history            show recent command history");
    println!("  clear              drop all cached scans");
    println!("  quit               exit");
}
