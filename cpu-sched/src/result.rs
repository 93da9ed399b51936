/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Outcome of one policy run: the timeline, the per-task copies and the
//! aggregate statistics derived from them.

use crate::task::{Task, TaskId, Time, TimeSlot};

// ── Statistics ────────────────────────────────────────────────────────────────

/// Aggregate metrics for one run.
///
/// All values are zero until [`SchedulingResult::calculate_statistics`] runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    /// Mean waiting time over completed tasks.
    pub average_waiting_time: f64,
    /// Mean turnaround time over completed tasks.
    pub average_turnaround_time: f64,
    /// End time of the last slot, or `0` for an empty timeline.
    pub total_completion_time: Time,
    /// Tasks with a deadline that completed after it.
    pub missed_deadlines: usize,
    /// Busy time as a percentage of `total_completion_time`.
    pub cpu_utilization: f64,
}

// ── SchedulingResult ──────────────────────────────────────────────────────────

/// Timeline and per-task outcomes produced by one policy.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    algorithm_name: String,
    schedule: Vec<TimeSlot>,
    tasks: Vec<Task>,
    stats: Statistics,
}

impl SchedulingResult {
    pub fn new(algorithm_name: impl Into<String>) -> Self {
        Self {
            algorithm_name: algorithm_name.into(),
            schedule: Vec::new(),
            tasks: Vec::new(),
            stats: Statistics::default(),
        }
    }

    /// Append a slot.  Slots must be pushed in chronological order.
    pub fn add_time_slot(&mut self, slot: TimeSlot) {
        debug_assert!(
            self.schedule
                .last()
                .map_or(true, |prev| prev.end_time() <= slot.start_time()),
            "time slot {} overlaps the previous one",
            slot
        );
        self.schedule.push(slot);
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Derive the aggregate metrics from the finished timeline.
    ///
    /// A no-op when the task list is empty.  Every field is recomputed from
    /// scratch, so repeated calls without intervening mutation agree.
    pub fn calculate_statistics(&mut self) {
        if self.tasks.is_empty() {
            return;
        }

        let mut total_waiting: Time = 0;
        let mut total_turnaround: Time = 0;
        let mut completed: usize = 0;

        for task in &self.tasks {
            if let (Some(waiting), Some(turnaround)) = (task.waiting_time(), task.turnaround_time())
            {
                total_waiting += waiting;
                total_turnaround += turnaround;
                completed += 1;
            }
        }

        let (average_waiting_time, average_turnaround_time) = if completed > 0 {
            (
                total_waiting as f64 / completed as f64,
                total_turnaround as f64 / completed as f64,
            )
        } else {
            (0.0, 0.0)
        };

        let total_completion_time = self.schedule.last().map_or(0, |s| s.end_time());

        let missed_deadlines = self
            .tasks
            .iter()
            .filter(|t| t.completion_time().is_some_and(|c| t.missed_deadline(c)))
            .count();

        let busy: Time = self.schedule.iter().map(TimeSlot::duration).sum();
        let cpu_utilization = if total_completion_time > 0 {
            busy as f64 / total_completion_time as f64 * 100.0
        } else {
            0.0
        };

        self.stats = Statistics {
            average_waiting_time,
            average_turnaround_time,
            total_completion_time,
            missed_deadlines,
            cpu_utilization,
        };
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn schedule(&self) -> &[TimeSlot] {
        &self.schedule
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up the simulated copy of task `id`.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.stats.average_waiting_time
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.stats.average_turnaround_time
    }

    pub fn total_completion_time(&self) -> Time {
        self.stats.total_completion_time
    }

    pub fn missed_deadlines(&self) -> usize {
        self.stats.missed_deadlines
    }

    pub fn cpu_utilization(&self) -> f64 {
        self.stats.cpu_utilization
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
