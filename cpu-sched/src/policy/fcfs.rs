/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! First Come First Served – the non-preemptive baseline.

use crate::result::SchedulingResult;
use crate::task::Task;

use super::{run_to_completion, PolicyKind, SchedulingPolicy};

/// Runs tasks to completion in arrival order.
///
/// Tasks are admitted in arrival order and the ready queue breaks every tie
/// on arrival, so ordering on a unit key makes it a plain FIFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstComeFirstServed;

impl SchedulingPolicy for FirstComeFirstServed {
    fn key(&self) -> &str {
        PolicyKind::Fcfs.as_str()
    }

    fn name(&self) -> &str {
        "First Come First Served (FCFS)"
    }

    fn schedule(&self, tasks: &[Task]) -> SchedulingResult {
        run_to_completion(self.name(), tasks, |_| ())
    }
}
