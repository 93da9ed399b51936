/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Greedy dispatch policies.
//!
//! Every policy is a pure function from a task slice to a
//! [`SchedulingResult`].  The six built-in policies differ only in the key
//! they order the ready queue by and in whether a new arrival may displace
//! the running task:
//!
//! | Policy | Ready-queue key | Preemptive |
//! |---|---|---|
//! | [`FirstComeFirstServed`] | arrival time | no |
//! | [`ShortestJobFirst`] | burst time | no |
//! | [`ShortestRemainingTimeFirst`] | remaining time | yes |
//! | [`EarliestDeadlineFirst`] | deadline (absent last) | yes |
//! | [`PriorityScheduling`] | priority (lower = more urgent) | either |
//!
//! Ties on the key fall back to earlier arrival, then to lower task id, so a
//! run never depends on the order of the input slice.
//!
//! Both simulation drivers below jump straight over idle gaps to the next
//! arrival, and the preemptive driver advances from event to event (next
//! arrival or completion).  Arrivals are the only preemption points, so this
//! yields exactly the timeline of a tick-by-tick simulation.

pub mod edf;
pub mod fcfs;
pub mod priority;
pub mod sjf;
pub mod srtf;

pub use edf::EarliestDeadlineFirst;
pub use fcfs::FirstComeFirstServed;
pub use priority::PriorityScheduling;
pub use sjf::ShortestJobFirst;
pub use srtf::ShortestRemainingTimeFirst;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info};

use crate::result::SchedulingResult;
use crate::scheduler::SchedulerError;
use crate::task::{Task, TaskId, Time, TimeSlot};

// ── Policy contract ───────────────────────────────────────────────────────────

/// A dispatch policy.
///
/// `schedule` must not mutate its input: implementations work on
/// [`Task::fresh_copy`] values and return those copies in the result.
pub trait SchedulingPolicy: Send + Sync {
    /// Stable short identifier used for selection, e.g. `"srtf"`.
    fn key(&self) -> &str;

    /// Human-readable name, e.g. `"Shortest Remaining Time First (SRTF)"`.
    fn name(&self) -> &str;

    fn schedule(&self, tasks: &[Task]) -> SchedulingResult;
}

// ── PolicyKind ────────────────────────────────────────────────────────────────

/// The built-in policies, in registry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Fcfs,
    Sjf,
    Srtf,
    Edf,
    PriorityNonPreemptive,
    PriorityPreemptive,
}

impl PolicyKind {
    /// Every built-in policy, in the order they are registered and displayed.
    pub const ALL: [PolicyKind; 6] = [
        PolicyKind::Fcfs,
        PolicyKind::Sjf,
        PolicyKind::Srtf,
        PolicyKind::Edf,
        PolicyKind::PriorityNonPreemptive,
        PolicyKind::PriorityPreemptive,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "fcfs",
            PolicyKind::Sjf => "sjf",
            PolicyKind::Srtf => "srtf",
            PolicyKind::Edf => "edf",
            PolicyKind::PriorityNonPreemptive => "priority-np",
            PolicyKind::PriorityPreemptive => "priority-p",
        }
    }

    /// Parse a short key.  Case-insensitive; `_` and `-` are interchangeable.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "fcfs" | "fifo" => Some(PolicyKind::Fcfs),
            "sjf" => Some(PolicyKind::Sjf),
            "srtf" => Some(PolicyKind::Srtf),
            "edf" => Some(PolicyKind::Edf),
            "priority-np" | "priority" | "prio" => Some(PolicyKind::PriorityNonPreemptive),
            "priority-p" | "prio-p" => Some(PolicyKind::PriorityPreemptive),
            _ => None,
        }
    }

    /// Instantiate the policy.
    pub fn build(self) -> Box<dyn SchedulingPolicy> {
        match self {
            PolicyKind::Fcfs => Box::new(FirstComeFirstServed),
            PolicyKind::Sjf => Box::new(ShortestJobFirst),
            PolicyKind::Srtf => Box::new(ShortestRemainingTimeFirst),
            PolicyKind::Edf => Box::new(EarliestDeadlineFirst),
            PolicyKind::PriorityNonPreemptive => Box::new(PriorityScheduling::non_preemptive()),
            PolicyKind::PriorityPreemptive => Box::new(PriorityScheduling::preemptive()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| SchedulerError::UnknownPolicy(s.to_string()))
    }
}

impl Serialize for PolicyKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PolicyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Ready queue ───────────────────────────────────────────────────────────────

/// Min-heap of admitted tasks, ordered by `(key, arrival, id)`.
///
/// Entries refer to tasks by their index in the simulation's task vector.
/// A task's key is captured when it is pushed; tasks only change while
/// running, and a running task is re-pushed with a fresh key when preempted.
struct ReadyQueue<K: Ord> {
    heap: BinaryHeap<Reverse<(K, Time, TaskId, usize)>>,
}

impl<K: Ord> ReadyQueue<K> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    fn push(&mut self, key: K, task: &Task, index: usize) {
        self.heap
            .push(Reverse((key, task.arrival_time(), task.id(), index)));
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|Reverse((_, _, _, index))| index)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

// ── Simulation drivers ────────────────────────────────────────────────────────

/// Private working copies sorted by `(arrival, id)`.
fn prepare(tasks: &[Task]) -> Vec<Task> {
    let mut copies: Vec<Task> = tasks.iter().map(Task::fresh_copy).collect();
    copies.sort_by_key(|t| (t.arrival_time(), t.id()));
    debug_assert!(
        copies.iter().all(|t| t.burst_time() > 0),
        "tasks must have a positive burst time"
    );
    copies
}

fn finish(mut result: SchedulingResult, tasks: Vec<Task>) -> SchedulingResult {
    result.set_tasks(tasks);
    result.calculate_statistics();

    let stats = result.statistics();
    info!(
        policy          = result.algorithm_name(),
        slots           = result.schedule().len(),
        avg_waiting     = stats.average_waiting_time,
        avg_turnaround  = stats.average_turnaround_time,
        completion      = stats.total_completion_time,
        utilization_pct = stats.cpu_utilization,
        missed          = stats.missed_deadlines,
        "=== simulation complete ==="
    );
    result
}

/// Non-preemptive driver: the task with the smallest `key` runs to
/// completion, then the next one is chosen.
pub(crate) fn run_to_completion<K, F>(name: &str, tasks: &[Task], key: F) -> SchedulingResult
where
    K: Ord,
    F: Fn(&Task) -> K,
{
    let mut tasks = prepare(tasks);
    let mut result = SchedulingResult::new(name);
    let mut ready = ReadyQueue::new();
    let mut now: Time = 0;
    let mut next = 0usize;

    info!(policy = name, task_count = tasks.len(), "=== simulation start ===");

    loop {
        while next < tasks.len() && tasks[next].arrival_time() <= now {
            ready.push(key(&tasks[next]), &tasks[next], next);
            next += 1;
        }

        let Some(index) = ready.pop() else {
            match tasks.get(next) {
                Some(upcoming) => {
                    debug!(from = now, to = upcoming.arrival_time(), "CPU idle, jumping to next arrival");
                    now = upcoming.arrival_time();
                    continue;
                }
                None => break,
            }
        };

        let task = &mut tasks[index];
        let run = task.remaining_time();
        task.mark_started(now);
        result.add_time_slot(TimeSlot::new(task, now, now + run));
        task.execute(run);
        now += run;
        task.set_completion_time(now);

        debug!(
            task    = task.name(),
            start   = now - run,
            end     = now,
            waiting = ready.len(),
            "dispatched to completion"
        );
    }

    finish(result, tasks)
}

/// Preemptive driver: on every arrival whose `key` is strictly smaller than
/// the running task's, the running task is put back in the ready queue and
/// the best ready task takes over.
pub(crate) fn run_preemptive<K, F>(name: &str, tasks: &[Task], key: F) -> SchedulingResult
where
    K: Ord,
    F: Fn(&Task) -> K,
{
    let mut tasks = prepare(tasks);
    let mut result = SchedulingResult::new(name);
    let mut ready = ReadyQueue::new();
    let mut now: Time = 0;
    let mut next = 0usize;
    let mut running: Option<usize> = None;
    // Start of the running task's current contiguous run.
    let mut last_switch: Time = 0;

    info!(policy = name, task_count = tasks.len(), "=== simulation start ===");

    loop {
        // ── Admission (the only preemption point) ─────────────────────────────
        while next < tasks.len() && tasks[next].arrival_time() <= now {
            let arriving = next;
            next += 1;
            ready.push(key(&tasks[arriving]), &tasks[arriving], arriving);

            let Some(current) = running else { continue };
            if key(&tasks[arriving]) < key(&tasks[current]) {
                if now > last_switch {
                    result.add_time_slot(TimeSlot::new(&tasks[current], last_switch, now));
                }
                ready.push(key(&tasks[current]), &tasks[current], current);
                running = ready.pop();
                last_switch = now;

                debug!(
                    at        = now,
                    preempted = tasks[current].name(),
                    remaining = tasks[current].remaining_time(),
                    arriving  = tasks[arriving].name(),
                    "preemption"
                );
            }
        }

        if running.is_none() {
            running = ready.pop();
            last_switch = now;
        }

        let Some(current) = running else {
            match tasks.get(next) {
                Some(upcoming) => {
                    debug!(from = now, to = upcoming.arrival_time(), "CPU idle, jumping to next arrival");
                    now = upcoming.arrival_time();
                    continue;
                }
                None => break,
            }
        };

        // ── Run until the next arrival or completion, whichever comes first ───
        let finish_at = now + tasks[current].remaining_time();
        let until = tasks
            .get(next)
            .map_or(finish_at, |upcoming| upcoming.arrival_time().min(finish_at));

        let task = &mut tasks[current];
        task.mark_started(now);
        task.execute(until - now);
        now = until;

        if task.is_completed() {
            result.add_time_slot(TimeSlot::new(task, last_switch, now));
            task.set_completion_time(now);
            debug!(task = task.name(), start = last_switch, end = now, "completed");
            running = None;
            last_switch = now;
        }
    }

    finish(result, tasks)
}

// ── Test helpers ──────────────────────────────────────────────────────────────

/// `[start-end: name]` rendering of a timeline, for compact assertions.
#[cfg(test)]
pub(crate) fn render(result: &SchedulingResult) -> Vec<String> {
    result.schedule().iter().map(|s| s.to_string()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_kind_keys_round_trip() {
        for kind in PolicyKind::ALL {
            assert_eq!(PolicyKind::parse(kind.as_str()), Some(kind));
            assert_eq!(kind.build().key(), kind.as_str());
        }
    }

    #[test]
    fn policy_kind_parse_accepts_aliases() {
        assert_eq!(PolicyKind::parse("FCFS"), Some(PolicyKind::Fcfs));
        assert_eq!(PolicyKind::parse("fifo"), Some(PolicyKind::Fcfs));
        assert_eq!(
            PolicyKind::parse("priority_np"),
            Some(PolicyKind::PriorityNonPreemptive)
        );
        assert_eq!(
            PolicyKind::parse(" Priority-P "),
            Some(PolicyKind::PriorityPreemptive)
        );
    }

    #[test]
    fn policy_kind_from_str_reports_unknown_policy() {
        let err = "round-robin".parse::<PolicyKind>().unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownPolicy(ref s) if s == "round-robin"));
    }

    #[test]
    fn ready_queue_orders_by_key_then_arrival_then_id() {
        let a = Task::new(2, "A", 1, 5);
        let b = Task::new(1, "B", 1, 5);
        let c = Task::new(3, "C", 0, 5);
        let d = Task::new(4, "D", 9, 1);

        let mut q = ReadyQueue::new();
        q.push(5, &a, 0);
        q.push(5, &b, 1);
        q.push(5, &c, 2);
        q.push(1, &d, 3);

        assert_eq!(q.len(), 4);
        assert_eq!(q.pop(), Some(3)); // smallest key
        assert_eq!(q.pop(), Some(2)); // earliest arrival
        assert_eq!(q.pop(), Some(1)); // same arrival, lower id
        assert_eq!(q.pop(), Some(0));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn drivers_do_not_mutate_input() {
        let input = vec![Task::new(1, "A", 0, 5), Task::new(2, "B", 2, 2)];
        let snapshot = input.clone();
        let _ = run_preemptive("p", &input, |t| t.remaining_time());
        let _ = run_to_completion("np", &input, |t| t.burst_time());
        assert_eq!(input, snapshot);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let r = run_preemptive("p", &[], |t| t.remaining_time());
        assert!(r.schedule().is_empty());
        assert!(r.tasks().is_empty());
        assert_eq!(r.total_completion_time(), 0);

        let r = run_to_completion("np", &[], |_| ());
        assert!(r.schedule().is_empty());
        assert_eq!(r.missed_deadlines(), 0);
    }

    #[test]
    fn idle_gap_is_jumped_not_ticked() {
        let tasks = vec![Task::new(1, "A", 0, 2), Task::new(2, "B", 1_000_000_000, 3)];
        let r = run_preemptive("p", &tasks, |t| t.remaining_time());
        assert_eq!(render(&r), ["[0-2: A]", "[1000000000-1000000003: B]"]);
        assert_eq!(r.total_completion_time(), 1_000_000_003);
    }

    #[test]
    fn preemptive_driver_uninterrupted_run_is_one_slot() {
        // B arrives mid-run but does not dominate, so A keeps one slot.
        let tasks = vec![Task::new(1, "A", 0, 4), Task::new(2, "B", 1, 9)];
        let r = run_preemptive("p", &tasks, |t| t.remaining_time());
        assert_eq!(render(&r), ["[0-4: A]", "[4-13: B]"]);
    }

    #[test]
    fn displaced_at_switch_instant_has_no_empty_slot() {
        // At t=2, B preempts A and C (arriving at the same instant) beats B.
        let tasks = vec![
            Task::new(1, "A", 0, 10),
            Task::new(2, "B", 2, 5),
            Task::new(3, "C", 2, 1),
        ];
        let r = run_preemptive("p", &tasks, |t| t.remaining_time());
        assert_eq!(
            render(&r),
            ["[0-2: A]", "[2-3: C]", "[3-8: B]", "[8-16: A]"]
        );
        assert!(r.schedule().iter().all(|s| s.duration() > 0));
        // B only started once it actually ran
        assert_eq!(r.task(2).and_then(Task::start_time), Some(3));
    }
}
