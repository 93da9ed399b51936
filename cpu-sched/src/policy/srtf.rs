/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Shortest Remaining Time First – the preemptive form of SJF.

use crate::result::SchedulingResult;
use crate::task::Task;

use super::{run_preemptive, PolicyKind, SchedulingPolicy};

/// Runs the ready task with the least remaining work.  An arrival whose
/// remaining time is strictly less than the running task's preempts it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestRemainingTimeFirst;

impl SchedulingPolicy for ShortestRemainingTimeFirst {
    fn key(&self) -> &str {
        PolicyKind::Srtf.as_str()
    }

    fn name(&self) -> &str {
        "Shortest Remaining Time First (SRTF)"
    }

    fn schedule(&self, tasks: &[Task]) -> SchedulingResult {
        run_preemptive(self.name(), tasks, Task::remaining_time)
    }
}
