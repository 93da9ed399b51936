/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the scheduling simulator.
//!
//! Two types model the two sides of a simulation run:
//!
//! ```text
//! caller  ──(Vec<Task>)──►  policy  ──(fresh copies, mutated)──►  SchedulingResult
//!                                    └──(TimeSlot per contiguous run)──┘
//! ```
//!
//! # Ownership model
//! A [`Task`] handed to a policy is never mutated.  Every policy starts from
//! [`Task::fresh_copy`], which resets the simulation state (remaining time,
//! start / completion times), and only those private copies end up inside the
//! [`SchedulingResult`](crate::result::SchedulingResult).
//!
//! Unset simulation fields are `Option::None` instead of `-1` sentinels, so a
//! waiting time can never be read before the task has completed.

use std::fmt;

/// Externally assigned task identifier.  Unique within one run by contract;
/// the engine does not re-check it.
pub type TaskId = u32;

/// Logical simulation time, in abstract units.
pub type Time = u64;

/// Priority given to tasks created without one.
///
/// Lower value = higher priority, so the default is the least urgent value.
pub const DEFAULT_PRIORITY: i32 = i32::MAX;

// ── Task ──────────────────────────────────────────────────────────────────────

/// One process-like unit of work competing for the simulated CPU.
///
/// # Lifecycle
/// `Unarrived → Ready → Running → {Ready ↔ Running}* → Completed`.
/// Only [`set_completion_time`](Self::set_completion_time) derives the
/// waiting and turnaround times; there is no way to set them directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    // ── Identity ──────────────────────────────────────────────────────────────
    id: TaskId,
    name: String,

    // ── Scheduling parameters ─────────────────────────────────────────────────
    arrival_time: Time,
    burst_time: Time,
    /// `None` = no deadline.  A zero deadline is normalised to `None`.
    deadline: Option<Time>,
    priority: i32,

    // ── Simulation state ──────────────────────────────────────────────────────
    remaining_time: Time,
    start_time: Option<Time>,
    completion_time: Option<Time>,
    waiting_time: Option<Time>,
    turnaround_time: Option<Time>,
}

impl Task {
    /// Create a task without a deadline and with [`DEFAULT_PRIORITY`].
    pub fn new(id: TaskId, name: impl Into<String>, arrival_time: Time, burst_time: Time) -> Self {
        Self::with_details(id, name, arrival_time, burst_time, None, DEFAULT_PRIORITY)
    }

    /// Create a task with every parameter given explicitly.
    ///
    /// A deadline of `Some(0)` is treated as absent.
    pub fn with_details(
        id: TaskId,
        name: impl Into<String>,
        arrival_time: Time,
        burst_time: Time,
        deadline: Option<Time>,
        priority: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            arrival_time,
            burst_time,
            deadline: deadline.filter(|&d| d > 0),
            priority,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: None,
            turnaround_time: None,
        }
    }

    /// Copy the task parameters with all simulation state reset.
    pub fn fresh_copy(&self) -> Self {
        Self::with_details(
            self.id,
            self.name.clone(),
            self.arrival_time,
            self.burst_time,
            self.deadline,
            self.priority,
        )
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arrival_time(&self) -> Time {
        self.arrival_time
    }

    pub fn burst_time(&self) -> Time {
        self.burst_time
    }

    pub fn remaining_time(&self) -> Time {
        self.remaining_time
    }

    pub fn deadline(&self) -> Option<Time> {
        self.deadline
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn start_time(&self) -> Option<Time> {
        self.start_time
    }

    pub fn completion_time(&self) -> Option<Time> {
        self.completion_time
    }

    /// `turnaround − burst`.  `None` until the task has completed.
    pub fn waiting_time(&self) -> Option<Time> {
        self.waiting_time
    }

    /// `completion − arrival`.  `None` until the task has completed.
    pub fn turnaround_time(&self) -> Option<Time> {
        self.turnaround_time
    }

    // ── Simulation ────────────────────────────────────────────────────────────

    /// Returns `true` once the remaining time has reached zero.
    pub fn is_completed(&self) -> bool {
        self.remaining_time == 0
    }

    /// Consume `units` of CPU time.  Remaining time saturates at zero.
    pub fn execute(&mut self, units: Time) {
        self.remaining_time = self.remaining_time.saturating_sub(units);
    }

    /// Record the first instant the task held the CPU.  Later calls are
    /// ignored.
    pub fn mark_started(&mut self, at: Time) {
        if self.start_time.is_none() {
            self.start_time = Some(at);
        }
    }

    /// Record the completion instant and derive turnaround and waiting time.
    pub fn set_completion_time(&mut self, at: Time) {
        let turnaround = at.saturating_sub(self.arrival_time);
        self.completion_time = Some(at);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround.saturating_sub(self.burst_time));
    }

    /// Returns `true` if the task has a deadline and `at` lies past it.
    pub fn missed_deadline(&self, at: Time) -> bool {
        self.deadline.is_some_and(|d| at > d)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task[{}: AT={}, BT={}, RT={}, DL=",
            self.name, self.arrival_time, self.burst_time, self.remaining_time
        )?;
        match self.deadline {
            Some(d) => write!(f, "{}", d)?,
            None => write!(f, "-")?,
        }
        write!(f, ", P={}]", self.priority)
    }
}

// ── TimeSlot ──────────────────────────────────────────────────────────────────

/// One uninterrupted span during which a single task held the CPU.
///
/// A preempted task contributes one slot per contiguous run.  The slot keeps
/// the task's id and name rather than a reference, so a timeline outlives
/// nothing it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    task_id: TaskId,
    task_name: String,
    start_time: Time,
    end_time: Time,
}

impl TimeSlot {
    pub fn new(task: &Task, start_time: Time, end_time: Time) -> Self {
        debug_assert!(
            end_time >= start_time,
            "time slot for '{}' ends ({}) before it starts ({})",
            task.name,
            end_time,
            start_time
        );
        Self {
            task_id: task.id,
            task_name: task.name.clone(),
            start_time,
            end_time,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn start_time(&self) -> Time {
        self.start_time
    }

    pub fn end_time(&self) -> Time {
        self.end_time
    }

    pub fn duration(&self) -> Time {
        self.end_time - self.start_time
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}: {}]", self.start_time, self.end_time, self.task_name)
    }
}

// ── TaskIdAllocator ───────────────────────────────────────────────────────────

/// Hands out task ids for entries that do not carry one.
///
/// Owned by whoever builds a task list (e.g. the workload loader), never
/// global.  Ids reserved explicitly are never handed out again.
#[derive(Debug, Clone)]
pub struct TaskIdAllocator {
    next: TaskId,
}

impl Default for TaskIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl TaskIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as taken; subsequent ids are allocated above it.
    pub fn reserve(&mut self, id: TaskId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }

    pub fn next_id(&mut self) -> TaskId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
