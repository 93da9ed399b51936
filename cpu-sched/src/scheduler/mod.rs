//! Policy registry and run orchestration.
//!
//! [`SchedulerManager`] owns the ordered set of available policies and the
//! current task list, and runs that list through one policy or all of them.
//!
//! # Ownership model
//!
//! | Boundary | Mechanism |
//! |---|---|
//! | `set_tasks` | takes the `Vec<Task>` by value, so the caller keeps no alias |
//! | `get_tasks` | returns a clone |
//! | policy runs | each policy works on [`Task::fresh_copy`] values |
//!
//! Results from [`run_all_schedulers`](SchedulerManager::run_all_schedulers)
//! therefore never share a `Task` with each other or with the manager.
//!
//! # Example
//! ```rust
//! use cpu_sched::scheduler::SchedulerManager;
//! use cpu_sched::task::Task;
//!
//! let mut mgr = SchedulerManager::new();
//! mgr.set_tasks(vec![Task::new(1, "A", 0, 5), Task::new(2, "B", 2, 2)]);
//!
//! let result = mgr.run_scheduler("srtf").unwrap();
//! let timeline: Vec<String> = result.schedule().iter().map(|s| s.to_string()).collect();
//! assert_eq!(timeline, ["[0-2: A]", "[2-4: B]", "[4-7: A]"]);
//! ```

pub mod compare;
pub mod error;

pub use compare::{compare, Comparison, MetricLeader};
pub use error::{SchedulerError, TaskRejection};

use tracing::{debug, info};

use crate::policy::{PolicyKind, SchedulingPolicy};
use crate::result::SchedulingResult;
use crate::task::Task;

// ── SchedulerManager ──────────────────────────────────────────────────────────

pub struct SchedulerManager {
    /// Registry, in display order.
    policies: Vec<Box<dyn SchedulingPolicy>>,
    tasks: Vec<Task>,
}

impl Default for SchedulerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchedulerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerManager")
            .field("policies", &self.policy_keys())
            .field("tasks", &self.tasks)
            .finish()
    }
}

impl SchedulerManager {
    /// Create a manager with every built-in policy registered, in
    /// [`PolicyKind::ALL`] order, and an empty task list.
    pub fn new() -> Self {
        Self {
            policies: PolicyKind::ALL.iter().map(|k| k.build()).collect(),
            tasks: Vec::new(),
        }
    }

    /// Create a manager with no policies registered.
    pub fn empty() -> Self {
        Self {
            policies: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Append a policy to the registry.
    pub fn add_policy(&mut self, policy: Box<dyn SchedulingPolicy>) {
        debug!(key = policy.key(), name = policy.name(), "policy registered");
        self.policies.push(policy);
    }

    // ── Task set ──────────────────────────────────────────────────────────────

    /// Replace the current task list wholesale.
    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        debug!(task_count = tasks.len(), "task set replaced");
        self.tasks = tasks;
    }

    /// A copy of the current task list.
    pub fn get_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    // ── Registry ──────────────────────────────────────────────────────────────

    /// Display names of the registered policies, in registry order.
    pub fn get_schedulers(&self) -> Vec<&str> {
        self.policies.iter().map(|p| p.name()).collect()
    }

    /// Short keys of the registered policies, in registry order.
    pub fn policy_keys(&self) -> Vec<&str> {
        self.policies.iter().map(|p| p.key()).collect()
    }

    /// Find a registered policy by short key (aliases accepted) or by its
    /// exact display name.
    pub fn find_policy(&self, selector: &str) -> Option<&dyn SchedulingPolicy> {
        let key = PolicyKind::parse(selector);
        let wanted = selector.trim();
        self.policies
            .iter()
            .find(|p| {
                key.is_some_and(|k| p.key() == k.as_str())
                    || p.key().eq_ignore_ascii_case(wanted)
                    || p.name() == wanted
            })
            .map(|p| &**p)
    }

    // ── Runs ──────────────────────────────────────────────────────────────────

    /// Run one registered policy over the current task list.
    ///
    /// # Errors
    /// [`SchedulerError::UnknownPolicy`] if `selector` matches no registered
    /// policy.
    pub fn run_scheduler(&self, selector: &str) -> Result<SchedulingResult, SchedulerError> {
        let policy = self
            .find_policy(selector)
            .ok_or_else(|| SchedulerError::UnknownPolicy(selector.to_string()))?;
        Ok(self.run_policy(policy))
    }

    /// Run any policy, registered or not, over the current task list.
    pub fn run_policy(&self, policy: &dyn SchedulingPolicy) -> SchedulingResult {
        info!(
            policy = policy.name(),
            task_count = self.tasks.len(),
            "=== SchedulerManager::run_policy() ==="
        );
        policy.schedule(&self.tasks)
    }

    /// Run every registered policy, in registry order, over the same
    /// snapshot of the task list.
    pub fn run_all_schedulers(&self) -> Vec<SchedulingResult> {
        info!(
            policy_count = self.policies.len(),
            task_count = self.tasks.len(),
            "=== SchedulerManager::run_all_schedulers() ==="
        );
        self.policies
            .iter()
            .map(|p| p.schedule(&self.tasks))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
