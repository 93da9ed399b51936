/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the scheduling simulator.
//!
//! Two types model the two failure layers:
//!
//! * [`TaskRejection`]: why a single task failed validation at the
//!   boundary where task lists are built (carries the offending value).
//! * [`SchedulerError`]: top-level failure returned by
//!   [`SchedulerManager`](super::SchedulerManager) and the workload loader.
//!
//! Policies themselves never fail: an empty task list yields an empty result,
//! and malformed tasks must be rejected before they reach a policy.

use thiserror::Error;

use crate::task::TaskId;

// ── Task validation ───────────────────────────────────────────────────────────

/// Detailed reason why a task was rejected during validation.
///
/// Carried inside [`SchedulerError::InvalidTask`] so the caller knows both
/// *which* task failed and *why*.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRejection {
    /// Burst time must be strictly positive.
    NonPositiveBurst { burst: i64 },

    /// Arrival time must not be negative.
    NegativeArrival { arrival: i64 },

    /// Another task in the same list already uses this id.
    DuplicateId { id: TaskId },

    /// The display name is empty or whitespace.
    EmptyName,
}

impl std::fmt::Display for TaskRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskRejection::NonPositiveBurst { burst } => {
                write!(f, "burst time must be positive (got {})", burst)
            }
            TaskRejection::NegativeArrival { arrival } => {
                write!(f, "arrival time must not be negative (got {})", arrival)
            }
            TaskRejection::DuplicateId { id } => write!(f, "task id {} is already in use", id),
            TaskRejection::EmptyName => write!(f, "task name is empty"),
        }
    }
}

// ── Top-level errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The requested policy is not in the registry.
    #[error("unknown scheduling policy: '{0}' (valid: fcfs, sjf, srtf, edf, priority-np, priority-p)")]
    UnknownPolicy(String),

    /// A task failed validation.  `task` is the task's name, or its position
    /// in the list when the name itself is the problem.
    #[error("task '{task}' rejected: {reason}")]
    InvalidTask { task: String, reason: TaskRejection },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
