/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Cross-policy comparison of finished runs.
//!
//! Picks, for each headline metric, the policy that did best on the same
//! task set:
//!
//! | Metric | Best is |
//! |---|---|
//! | average waiting time | lowest |
//! | average turnaround time | lowest |
//! | CPU utilisation | highest |
//!
//! On a tie the earlier result in the slice wins, so with registry-ordered
//! input the simpler policy is reported.

use crate::result::SchedulingResult;

/// One metric's winning policy and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLeader {
    pub algorithm: String,
    pub value: f64,
}

/// Best policy per metric.  Every field is `None` for an empty input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub best_waiting: Option<MetricLeader>,
    pub best_turnaround: Option<MetricLeader>,
    pub best_utilization: Option<MetricLeader>,
}

pub fn compare(results: &[SchedulingResult]) -> Comparison {
    Comparison {
        best_waiting: leader(results, SchedulingResult::average_waiting_time, false),
        best_turnaround: leader(results, SchedulingResult::average_turnaround_time, false),
        best_utilization: leader(results, SchedulingResult::cpu_utilization, true),
    }
}

fn leader(
    results: &[SchedulingResult],
    metric: fn(&SchedulingResult) -> f64,
    higher_is_better: bool,
) -> Option<MetricLeader> {
    let mut best: Option<(&SchedulingResult, f64)> = None;
    for result in results {
        let value = metric(result);
        let better = match best {
            None => true,
            Some((_, current)) if higher_is_better => value > current,
            Some((_, current)) => value < current,
        };
        if better {
            best = Some((result, value));
        }
    }
    best.map(|(result, value)| MetricLeader {
        algorithm: result.algorithm_name().to_string(),
        value,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{
        FirstComeFirstServed, SchedulingPolicy, ShortestJobFirst, ShortestRemainingTimeFirst,
    };
    use crate::task::Task;

    #[test]
    fn empty_input_has_no_leaders() {
        assert_eq!(compare(&[]), Comparison::default());
    }

    #[test]
    fn srtf_wins_waiting_time_on_preemptible_set() {
        let tasks = vec![Task::new(1, "A", 0, 5), Task::new(2, "B", 2, 2)];
        let results = vec![
            FirstComeFirstServed.schedule(&tasks),
            ShortestRemainingTimeFirst.schedule(&tasks),
        ];
        let cmp = compare(&results);

        let waiting = cmp.best_waiting.unwrap();
        assert_eq!(waiting.algorithm, "Shortest Remaining Time First (SRTF)");
        // FCFS: (0 + 3) / 2 = 1.5, SRTF: (2 + 0) / 2 = 1.0
        assert!((waiting.value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ties_go_to_the_earlier_result() {
        let tasks = vec![Task::new(1, "A", 0, 5), Task::new(2, "B", 1, 3)];
        let results = vec![
            FirstComeFirstServed.schedule(&tasks),
            ShortestJobFirst.schedule(&tasks),
        ];
        let cmp = compare(&results);
        assert_eq!(
            cmp.best_utilization.unwrap().algorithm,
            "First Come First Served (FCFS)"
        );
        assert_eq!(
            cmp.best_turnaround.unwrap().algorithm,
            "First Come First Served (FCFS)"
        );
    }
}
