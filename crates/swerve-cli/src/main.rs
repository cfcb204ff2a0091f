//! `swerve-cli` – the swerve demo binary.
//!
//! This binary is the entry point for the swerve stack.  It:
//!
//! 1. Initialises tracing (`RUST_LOG`, `SWERVE_LOG_FORMAT`, optional OTLP
//!    export).
//! 2. Checks for `~/.swerve/config.toml`; writes the defaults when the file
//!    is absent.
//! 3. Starts the control loop against a simulated lidar and drive base.
//! 4. Waits for **Ctrl-C**, then stops dispatch and joins every task before
//!    exiting.

mod config;

use colored::Colorize;
use swerve_hal::sim::{SimDrive, SimLidar};
use swerve_runtime::adapter::{DriveAdapter, SensorAdapter};
use swerve_runtime::control_loop::ControlLoop;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Hold the guard for the entire process lifetime so pending spans are
    // flushed on exit.
    let _guard = swerve_runtime::telemetry::init_tracing("swerve");

    print_banner();

    // ── Configuration vault ───────────────────────────────────────────────
    let cfg = match config::load() {
        Ok(Some(cfg)) => {
            println!(
                "  Config loaded from {}",
                config::config_path().display().to_string().bold()
            );
            cfg
        }
        Ok(None) => {
            let cfg = config::Config::default();
            match config::save(&cfg) {
                Ok(()) => println!(
                    "  {} Default config written to {}",
                    "✓".green().bold(),
                    config::config_path().display().to_string().bold()
                ),
                Err(e) => println!("{}: {}", "Error saving config".red(), e),
            }
            cfg
        }
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            config::Config::default()
        }
    };

    // ── Control loop + simulated hardware ─────────────────────────────────
    let control = ControlLoop::new(cfg.control_loop());
    let bus = control.bus();
    let mut handle = control.start();

    let lidar = SimLidar::new("sim_lidar", demo_course());
    let drive = SimDrive::new("drive_base");
    let drive_view = drive.clone();

    handle.attach(
        SensorAdapter::new(Box::new(lidar), bus.clone(), cfg.scan_period())
            .spawn(handle.shutdown_signal()),
    );
    handle.attach(DriveAdapter::new(Box::new(drive), bus).spawn(handle.shutdown_signal()));

    println!();
    println!(
        "  {}",
        "Control loop running against the simulated course.".green()
    );
    println!("  Press {} to stop.\n", "Ctrl-C".bold());

    // ── Wait for the interrupt ────────────────────────────────────────────
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C; stopping immediately");
    }

    println!();
    println!(
        "{}",
        "⚠  Interrupt received – stopping control loop …"
            .yellow()
            .bold()
    );
    info!("stopping control loop");

    handle.shutdown().await;

    println!(
        "{}",
        format!(
            "  ✓ {} drive command(s) applied.",
            drive_view.history().len()
        )
        .green()
    );
    println!("{}", "  ✓ Exiting swerve.".green());
}

// ─────────────────────────────────────────────────────────────────────────────
// Simulated course
// ─────────────────────────────────────────────────────────────────────────────

/// A looping corridor: a clear run-up, an obstacle sliding under the 0.5 m
/// threshold, then open space again.
fn demo_course() -> Vec<Vec<f32>> {
    vec![
        vec![2.5, 2.2, 2.0],
        vec![1.8, 1.5, 1.6],
        vec![1.1, 0.9, 1.0],
        vec![0.7, 0.6, 0.8],
        vec![0.6, 0.4, 0.5],
        vec![0.9, 0.45, 0.7],
        vec![1.4, 1.2, 1.3],
        vec![2.0, 1.8, 1.9],
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("{}", r#"   _____ _      _____  ______   _____"#.bold().cyan());
    println!("{}", r#"  / ___/| | /| / / _ \/ ___/ | / / _ \"#.bold().cyan());
    println!("{}", r#" (__  ) | |/ |/ /  __/ /   | |/ /  __/"#.bold().cyan());
    println!("{}", r#"/____/  |__/|__/\___/_/    |___/\___/"#.bold().cyan());
    println!();
    println!(
        "  {}",
        "reactive obstacle-avoidance control loop".dimmed()
    );
}
