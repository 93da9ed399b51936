/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Shortest Job First – non-preemptive, ordered by burst time.

use crate::result::SchedulingResult;
use crate::task::Task;

use super::{run_to_completion, PolicyKind, SchedulingPolicy};

/// Whenever the CPU frees up, runs the ready task with the smallest burst
/// time to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestJobFirst;

impl SchedulingPolicy for ShortestJobFirst {
    fn key(&self) -> &str {
        PolicyKind::Sjf.as_str()
    }

    fn name(&self) -> &str {
        "Shortest Job First (SJF)"
    }

    fn schedule(&self, tasks: &[Task]) -> SchedulingResult {
        run_to_completion(self.name(), tasks, Task::burst_time)
    }
}
