/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Earliest Deadline First – preemptive, ordered by absolute deadline.

use crate::result::SchedulingResult;
use crate::task::{Task, Time};

use super::{run_preemptive, PolicyKind, SchedulingPolicy};

/// Runs the ready task whose deadline is nearest.  Tasks without a deadline
/// sort after every task that has one.  An arrival with a strictly earlier
/// deadline preempts the running task.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestDeadlineFirst;

/// `(false, d)` for a deadline `d`, `(true, 0)` for none.
fn deadline_key(task: &Task) -> (bool, Time) {
    match task.deadline() {
        Some(d) => (false, d),
        None => (true, 0),
    }
}

impl SchedulingPolicy for EarliestDeadlineFirst {
    fn key(&self) -> &str {
        PolicyKind::Edf.as_str()
    }

    fn name(&self) -> &str {
        "Earliest Deadline First (EDF)"
    }

    fn schedule(&self, tasks: &[Task]) -> SchedulingResult {
        run_preemptive(self.name(), tasks, deadline_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::render;

    fn dl(id: u32, name: &str, arrival: Time, burst: Time, deadline: Option<Time>) -> Task {
        Task::with_details(id, name, arrival, burst, deadline, 0)
    }

    #[test]
    fn earlier_deadline_arrival_preempts() {
        let tasks = vec![dl(1, "A", 0, 5, Some(20)), dl(2, "B", 1, 2, Some(4))];
        let r = EarliestDeadlineFirst.schedule(&tasks);
        assert_eq!(render(&r), ["[0-1: A]", "[1-3: B]", "[3-7: A]"]);
        assert_eq!(r.missed_deadlines(), 0);
    }

    #[test]
    fn equal_deadline_does_not_preempt() {
        let tasks = vec![dl(1, "A", 0, 5, Some(10)), dl(2, "B", 1, 2, Some(10))];
        let r = EarliestDeadlineFirst.schedule(&tasks);
        assert_eq!(render(&r), ["[0-5: A]", "[5-7: B]"]);
    }

    #[test]
    fn tasks_without_deadline_run_last() {
        let tasks = vec![
            dl(1, "Free", 0, 3, None),
            dl(2, "Due", 1, 2, Some(50)),
            dl(3, "Also", 1, 1, None),
        ];
        let r = EarliestDeadlineFirst.schedule(&tasks);
        // Due preempts Free at t=1; Free resumes before Also (earlier arrival).
        assert_eq!(
            render(&r),
            ["[0-1: Free]", "[1-3: Due]", "[3-5: Free]", "[5-6: Also]"]
        );
    }

    #[test]
    fn missed_deadlines_are_counted() {
        let tasks = vec![
            dl(1, "A", 0, 4, Some(3)),
            dl(2, "B", 0, 4, Some(5)),
            dl(3, "C", 0, 1, None),
        ];
        let r = EarliestDeadlineFirst.schedule(&tasks);
        assert_eq!(render(&r), ["[0-4: A]", "[4-8: B]", "[8-9: C]"]);
        // A finishes at 4 > 3, B at 8 > 5; C has no deadline.
        assert_eq!(r.missed_deadlines(), 2);
    }
}
