//! Workload loading and validation.
//!
//! This is the boundary where task lists are built, so it is also where they
//! are validated: policies assume well-formed input and never re-check it.
//!
//! The expected YAML structure is:
//! ```yaml
//! tasks:
//!   - id: 1            # optional, allocated when absent
//!     name: Browser
//!     arrival: 0
//!     burst: 5
//!     deadline: 10     # optional, non-positive means none
//!     priority: 3      # optional, lower = more urgent
//! policies: [fcfs, srtf]   # optional, default = all
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::policy::PolicyKind;
use crate::scheduler::{SchedulerError, TaskRejection};
use crate::task::{Task, TaskId, TaskIdAllocator, Time, DEFAULT_PRIORITY};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkloadFile {
    #[serde(default)]
    tasks: Vec<TaskEntry>,
    #[serde(default)]
    policies: Vec<PolicyKind>,
}

/// Per-task fields as they appear in the YAML file.
///
/// Times are signed here so that negative values reach validation and get a
/// precise rejection instead of a generic parse error.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskEntry {
    id: Option<TaskId>,
    name: String,
    #[serde(default)]
    arrival: i64,
    burst: i64,
    deadline: Option<i64>,
    priority: Option<i32>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// A validated workload: the task list plus the policies to run it through.
#[derive(Debug, Clone, Default)]
pub struct WorkloadConfig {
    pub tasks: Vec<Task>,
    /// Policies named in the file.  Empty means "every registered policy".
    pub policies: Vec<PolicyKind>,
}

impl WorkloadConfig {
    /// Read and validate a workload file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or a task fails validation.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading workload from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open workload file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid workload file: {}", path.display()))
    }

    /// Parse and validate a workload from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: WorkloadFile =
            serde_yaml::from_str(content).context("Failed to parse workload YAML")?;

        if file.tasks.is_empty() {
            warn!("Workload contains no tasks");
        }

        let tasks = build_tasks(file.tasks)?;

        info!(
            task_count = tasks.len(),
            policies = ?file.policies,
            "Workload loaded"
        );
        for task in &tasks {
            debug!("  {} (id {})", task, task.id());
        }

        Ok(Self {
            tasks,
            policies: file.policies,
        })
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Convert raw entries into tasks, allocating missing ids.
///
/// Explicit ids are reserved first so allocated ids never collide with them.
fn build_tasks(entries: Vec<TaskEntry>) -> Result<Vec<Task>, SchedulerError> {
    let mut ids = TaskIdAllocator::new();
    for id in entries.iter().filter_map(|e| e.id) {
        ids.reserve(id);
    }

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let label = if entry.name.trim().is_empty() {
            format!("#{}", index + 1)
        } else {
            entry.name.clone()
        };
        let reject = |reason| SchedulerError::InvalidTask {
            task: label.clone(),
            reason,
        };

        if entry.name.trim().is_empty() {
            return Err(reject(TaskRejection::EmptyName));
        }
        if entry.burst <= 0 {
            return Err(reject(TaskRejection::NonPositiveBurst { burst: entry.burst }));
        }
        if entry.arrival < 0 {
            return Err(reject(TaskRejection::NegativeArrival {
                arrival: entry.arrival,
            }));
        }

        let id = entry.id.unwrap_or_else(|| ids.next_id());
        if !seen.insert(id) {
            return Err(reject(TaskRejection::DuplicateId { id }));
        }

        // Non-positive deadlines mean "none".
        let deadline = entry.deadline.filter(|&d| d > 0).map(|d| d as Time);

        tasks.push(Task::with_details(
            id,
            entry.name,
            entry.arrival as Time,
            entry.burst as Time,
            deadline,
            entry.priority.unwrap_or(DEFAULT_PRIORITY),
        ));
    }

    Ok(tasks)
}

/// Check a task list built in code against the same rules the loader
/// applies.  Arrival times are unsigned, so only burst, name and id
/// uniqueness can fail.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), SchedulerError> {
    let mut seen = HashSet::new();
    for task in tasks {
        let reject = |reason| SchedulerError::InvalidTask {
            task: task.name().to_string(),
            reason,
        };
        if task.name().trim().is_empty() {
            return Err(reject(TaskRejection::EmptyName));
        }
        if task.burst_time() == 0 {
            return Err(reject(TaskRejection::NonPositiveBurst { burst: 0 }));
        }
        if !seen.insert(task.id()) {
            return Err(reject(TaskRejection::DuplicateId { id: task.id() }));
        }
    }
    Ok(())
}

// ── Sample data ───────────────────────────────────────────────────────────────

/// The built-in demonstration workload: five desktop processes with
/// overlapping arrivals, deadlines and priorities.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::with_details(1, "Browser", 0, 5, Some(10), 3),
        Task::with_details(2, "System", 1, 3, Some(8), 1),
        Task::with_details(3, "Media", 2, 8, Some(15), 4),
        Task::with_details(4, "Editor", 3, 6, Some(12), 2),
        Task::with_details(5, "Backup", 4, 4, Some(9), 5),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    /// Unwrap the `SchedulerError` behind an `anyhow` chain.
    fn rejection(err: &anyhow::Error) -> &TaskRejection {
        match err.downcast_ref::<SchedulerError>() {
            Some(SchedulerError::InvalidTask { reason, .. }) => reason,
            other => panic!("expected InvalidTask, got {:?}", other),
        }
    }

    // ── load_from_file ────────────────────────────────────────────────────────

    #[test]
    fn load_full_workload_file() {
        let yaml = r#"
tasks:
  - id: 1
    name: Browser
    arrival: 0
    burst: 5
    deadline: 10
    priority: 3
  - id: 2
    name: System
    arrival: 1
    burst: 3
    deadline: 8
    priority: 1
policies: [fcfs, priority-p]
"#;
        let f = yaml_tempfile(yaml);
        let cfg = WorkloadConfig::load_from_file(f.path()).unwrap();

        assert_eq!(cfg.tasks.len(), 2);
        assert_eq!(cfg.policies, [PolicyKind::Fcfs, PolicyKind::PriorityPreemptive]);

        let system = &cfg.tasks[1];
        assert_eq!(system.id(), 2);
        assert_eq!(system.name(), "System");
        assert_eq!(system.arrival_time(), 1);
        assert_eq!(system.burst_time(), 3);
        assert_eq!(system.deadline(), Some(8));
        assert_eq!(system.priority(), 1);
    }

    #[test]
    fn optional_fields_use_defaults_when_absent() {
        let yaml = r#"
tasks:
  - name: Minimal
    burst: 2
"#;
        let cfg = WorkloadConfig::from_yaml_str(yaml).unwrap();
        let t = &cfg.tasks[0];
        assert_eq!(t.id(), 1);
        assert_eq!(t.arrival_time(), 0);
        assert_eq!(t.deadline(), None);
        assert_eq!(t.priority(), DEFAULT_PRIORITY);
        assert!(cfg.policies.is_empty());
    }

    #[test]
    fn non_positive_deadline_means_none() {
        let yaml = r#"
tasks:
  - { name: A, burst: 1, deadline: -1 }
  - { name: B, burst: 1, deadline: 0 }
"#;
        let cfg = WorkloadConfig::from_yaml_str(yaml).unwrap();
        assert!(cfg.tasks.iter().all(|t| t.deadline().is_none()));
    }

    #[test]
    fn missing_ids_are_allocated_above_explicit_ones() {
        let yaml = r#"
tasks:
  - { name: A, burst: 1 }
  - { id: 4, name: B, burst: 1 }
  - { name: C, burst: 1 }
"#;
        let cfg = WorkloadConfig::from_yaml_str(yaml).unwrap();
        let ids: Vec<TaskId> = cfg.tasks.iter().map(Task::id).collect();
        assert_eq!(ids, [5, 4, 6]);
    }

    #[test]
    fn empty_workload_is_accepted() {
        let cfg = WorkloadConfig::from_yaml_str("tasks: []\n").unwrap();
        assert!(cfg.tasks.is_empty());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = WorkloadConfig::load_from_file(Path::new("/nonexistent/path/workload.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(WorkloadConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_policy_in_file_returns_error() {
        let yaml = "tasks: []\npolicies: [lottery]\n";
        assert!(WorkloadConfig::from_yaml_str(yaml).is_err());
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn zero_burst_is_rejected() {
        let err = WorkloadConfig::from_yaml_str("tasks: [{ name: A, burst: 0 }]").unwrap_err();
        assert_eq!(
            *rejection(&err),
            TaskRejection::NonPositiveBurst { burst: 0 }
        );
    }

    #[test]
    fn negative_arrival_is_rejected() {
        let err = WorkloadConfig::from_yaml_str("tasks: [{ name: A, arrival: -3, burst: 2 }]")
            .unwrap_err();
        assert_eq!(
            *rejection(&err),
            TaskRejection::NegativeArrival { arrival: -3 }
        );
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let yaml = r#"
tasks:
  - { id: 1, name: A, burst: 1 }
  - { id: 1, name: B, burst: 1 }
"#;
        let err = WorkloadConfig::from_yaml_str(yaml).unwrap_err();
        assert_eq!(*rejection(&err), TaskRejection::DuplicateId { id: 1 });
    }

    #[test]
    fn blank_name_is_rejected_with_position() {
        let err = WorkloadConfig::from_yaml_str("tasks: [{ name: A, burst: 1 }, { name: '  ', burst: 1 }]")
            .unwrap_err();
        match err.downcast_ref::<SchedulerError>() {
            Some(SchedulerError::InvalidTask { task, reason }) => {
                assert_eq!(task, "#2");
                assert_eq!(*reason, TaskRejection::EmptyName);
            }
            other => panic!("expected InvalidTask, got {:?}", other),
        }
    }

    #[test]
    fn validate_tasks_checks_code_built_lists() {
        assert!(validate_tasks(&sample_tasks()).is_ok());

        let zero = vec![Task::new(1, "Z", 0, 0)];
        assert!(matches!(
            validate_tasks(&zero),
            Err(SchedulerError::InvalidTask {
                reason: TaskRejection::NonPositiveBurst { .. },
                ..
            })
        ));

        let dup = vec![Task::new(1, "A", 0, 1), Task::new(1, "B", 0, 1)];
        assert!(matches!(
            validate_tasks(&dup),
            Err(SchedulerError::InvalidTask {
                reason: TaskRejection::DuplicateId { id: 1 },
                ..
            })
        ));
    }

    // ── Sample data ───────────────────────────────────────────────────────────

    #[test]
    fn sample_tasks_match_demo_set() {
        let tasks = sample_tasks();
        let names: Vec<&str> = tasks.iter().map(Task::name).collect();
        assert_eq!(names, ["Browser", "System", "Media", "Editor", "Backup"]);
        assert_eq!(tasks[4].deadline(), Some(9));
        assert_eq!(tasks[1].priority(), 1);
    }
}
