/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use cpu_sched::config::{sample_tasks, WorkloadConfig};
use cpu_sched::result::SchedulingResult;
use cpu_sched::scheduler::{compare, MetricLeader, SchedulerManager};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Offline CPU scheduling simulator.
///
/// Example:
///   cpu-sched --tasks workload.yaml --policy srtf
#[derive(Debug, Parser)]
#[command(
    name = "cpu-sched",
    about = "Simulate greedy CPU scheduling policies over a task set",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML workload file.  The built-in sample set is used when
    /// omitted.
    #[arg(short = 't', long = "tasks")]
    tasks: Option<PathBuf>,

    /// Run a single policy (e.g. `fcfs`, `srtf`, `priority-p`) instead of
    /// the workload's policy list.
    #[arg(short = 'p', long = "policy")]
    policy: Option<String>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!(tasks = ?cli.tasks, policy = ?cli.policy, "Configuration");

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Load workload ─────────────────────────────────────────────────────────
    let workload = match &cli.tasks {
        Some(path) => WorkloadConfig::load_from_file(path)?,
        None => {
            warn!("No workload file provided, using the built-in sample tasks");
            WorkloadConfig {
                tasks: sample_tasks(),
                policies: Vec::new(),
            }
        }
    };

    let mut manager = SchedulerManager::new();
    manager.set_tasks(workload.tasks);

    // ── Run ───────────────────────────────────────────────────────────────────
    let results = match &cli.policy {
        Some(selector) => vec![manager.run_scheduler(selector)?],
        None if workload.policies.is_empty() => manager.run_all_schedulers(),
        None => workload
            .policies
            .iter()
            .map(|kind| manager.run_scheduler(kind.as_str()))
            .collect::<Result<Vec<_>, _>>()?,
    };

    for result in &results {
        report(result);
    }

    if results.len() > 1 {
        let cmp = compare(&results);
        report_leader("Best average waiting time", cmp.best_waiting.as_ref());
        report_leader("Best average turnaround time", cmp.best_turnaround.as_ref());
        report_leader("Best CPU utilization", cmp.best_utilization.as_ref());
    }

    Ok(())
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn report(result: &SchedulingResult) {
    info!("=== {} ===", result.algorithm_name());

    let timeline: Vec<String> = result.schedule().iter().map(|s| s.to_string()).collect();
    info!("  schedule: {}", timeline.join(" "));

    for task in result.tasks() {
        info!(
            task       = task.name(),
            start      = ?task.start_time(),
            completion = ?task.completion_time(),
            waiting    = ?task.waiting_time(),
            turnaround = ?task.turnaround_time(),
            deadline   = ?task.deadline(),
            "  task"
        );
    }

    let stats = result.statistics();
    info!(
        "  avg waiting {:.2} | avg turnaround {:.2} | completion {} | CPU {:.2}% | missed deadlines {}",
        stats.average_waiting_time,
        stats.average_turnaround_time,
        stats.total_completion_time,
        stats.cpu_utilization,
        stats.missed_deadlines,
    );
}

fn report_leader(label: &str, leader: Option<&MetricLeader>) {
    if let Some(l) = leader {
        info!("{}: {} ({:.2})", label, l.algorithm, l.value);
    }
}
