/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Priority scheduling, in non-preemptive and preemptive flavours.

use crate::result::SchedulingResult;
use crate::task::Task;

use super::{run_preemptive, run_to_completion, PolicyKind, SchedulingPolicy};

/// Runs the ready task with the numerically lowest priority value.
///
/// In preemptive mode an arrival with a strictly lower value displaces the
/// running task; otherwise the selected task runs to completion.
#[derive(Debug, Clone, Copy)]
pub struct PriorityScheduling {
    preemptive: bool,
}

impl PriorityScheduling {
    pub fn new(preemptive: bool) -> Self {
        Self { preemptive }
    }

    pub fn non_preemptive() -> Self {
        Self::new(false)
    }

    pub fn preemptive() -> Self {
        Self::new(true)
    }

    pub fn is_preemptive(&self) -> bool {
        self.preemptive
    }
}

impl SchedulingPolicy for PriorityScheduling {
    fn key(&self) -> &str {
        if self.preemptive {
            PolicyKind::PriorityPreemptive.as_str()
        } else {
            PolicyKind::PriorityNonPreemptive.as_str()
        }
    }

    fn name(&self) -> &str {
        if self.preemptive {
            "Priority Scheduling (Preemptive)"
        } else {
            "Priority Scheduling (Non-Preemptive)"
        }
    }

    fn schedule(&self, tasks: &[Task]) -> SchedulingResult {
        if self.preemptive {
            run_preemptive(self.name(), tasks, Task::priority)
        } else {
            run_to_completion(self.name(), tasks, Task::priority)
        }
    }
}
