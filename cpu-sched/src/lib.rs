/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! cpu-sched – offline CPU scheduling simulator
//!
//! Runs a task set through classical greedy dispatch policies and reports
//! the resulting timeline and statistics.  Time is logical: nothing here
//! touches a real CPU or process table.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task        – Task, TimeSlot, id allocation
//! ├── result      – SchedulingResult and its statistics
//! ├── policy/     – FCFS, SJF, SRTF, EDF, Priority (NP / P)
//! ├── scheduler/  – SchedulerManager, errors, cross-policy comparison
//! └── config/     – YAML workloads, validation, sample data
//! ```

pub mod config;
pub mod policy;
pub mod result;
pub mod scheduler;
pub mod task;
