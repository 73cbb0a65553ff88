//! Best-effort execution of auxiliary statements around a table copy.
//!
//! Tasks and post scripts are hooks, not data movement: each one runs as a
//! standalone statement, failures are recorded and logged per statement,
//! and the copy run never aborts because of them.

use odbc_api::Connection;
use tracing::{error, info};

use crate::config::{DbTask, PostRunScript};

/// Detail of a single failed task or script.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFailure {
    /// The statement (or script label) that failed.
    pub what: String,
    pub detail: String,
}

/// Outcome of one task or script.
pub type TaskOutcome = std::result::Result<(), TaskFailure>;

/// Per-table (or per-run) report of task outcomes.
#[derive(Debug)]
pub struct TaskReport {
    /// Table name or run stage the tasks belong to.
    pub label: String,
    pub outcomes: Vec<TaskOutcome>,
}

impl TaskReport {
    /// Number of tasks that completed.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of tasks that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Run every task against the target, isolating failures per statement.
pub fn run_tasks(conn: &Connection<'_>, label: &str, tasks: &[DbTask]) -> TaskReport {
    run_tasks_with(label, tasks, |sql| {
        conn.execute(sql, ()).map(|_| ()).map_err(|e| e.to_string())
    })
}

/// Run every post script against the target, isolating failures per
/// script. Scripts are update statements; each one logs its completion.
pub fn run_post_scripts(conn: &Connection<'_>, scripts: &[PostRunScript]) -> TaskReport {
    run_scripts_with(scripts, |sql| {
        conn.execute(sql, ()).map(|_| ()).map_err(|e| e.to_string())
    })
}

fn run_tasks_with(
    label: &str,
    tasks: &[DbTask],
    mut exec: impl FnMut(&str) -> std::result::Result<(), String>,
) -> TaskReport {
    info!("Running {} task(s) for {}", tasks.len(), label);

    let outcomes = tasks
        .iter()
        .map(|task| match exec(&task.sql) {
            Ok(()) => Ok(()),
            Err(detail) => {
                error!("Task failed for {}: {}", label, detail);
                Err(TaskFailure {
                    what: task.sql.clone(),
                    detail,
                })
            }
        })
        .collect();

    TaskReport {
        label: label.to_string(),
        outcomes,
    }
}

fn run_scripts_with(
    scripts: &[PostRunScript],
    mut exec: impl FnMut(&str) -> std::result::Result<(), String>,
) -> TaskReport {
    let outcomes = scripts
        .iter()
        .map(|script| {
            info!("Running script: {}...", script.label);
            match exec(&script.sql) {
                Ok(()) => {
                    info!("{} complete", script.label);
                    Ok(())
                }
                Err(detail) => {
                    error!("Script {} failed: {}", script.label, detail);
                    Err(TaskFailure {
                        what: script.label.clone(),
                        detail,
                    })
                }
            }
        })
        .collect();

    TaskReport {
        label: "post scripts".to_string(),
        outcomes,
    }
}
