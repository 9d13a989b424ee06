//! Forensic action checklist: the fixed template set, completion state, and
//! progress computation.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

define_text_enum! {
    /// Workflow status of a single checklist item.
    ActionStatus ("action_status") {
        Pending = "pending",
        InProgress = "in_progress",
        Completed = "completed",
    }
}

impl Default for ActionStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// A checklist item that can be instantiated on any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionTemplate {
    pub id: &'static str,
    pub action_type: &'static str,
    pub description: &'static str,
    /// Pre-selected when a case is created without an explicit selection.
    pub is_default: bool,
}

/// The fixed template set offered on every new case.
pub const ACTION_TEMPLATES: &[ActionTemplate] = &[
    ActionTemplate {
        id: "1",
        action_type: "Evidence Collection",
        description: "Collect all digital evidence items",
        is_default: true,
    },
    ActionTemplate {
        id: "2",
        action_type: "Log Analysis",
        description: "Analyse system logs for suspicious activity",
        is_default: true,
    },
    ActionTemplate {
        id: "3",
        action_type: "Data Recovery",
        description: "Attempt recovery of deleted or corrupted data",
        is_default: false,
    },
    ActionTemplate {
        id: "4",
        action_type: "Malware Analysis",
        description: "Identify and analyse any malware found",
        is_default: false,
    },
    ActionTemplate {
        id: "5",
        action_type: "Reporting",
        description: "Write the full investigation report",
        is_default: true,
    },
];

/// Look up a template by id.
pub fn find_template(id: &str) -> Option<&'static ActionTemplate> {
    ACTION_TEMPLATES.iter().find(|t| t.id == id)
}

/// Ids of the templates that are pre-selected on new cases.
pub fn default_template_ids() -> Vec<String> {
    ACTION_TEMPLATES
        .iter()
        .filter(|t| t.is_default)
        .map(|t| t.id.to_string())
        .collect()
}

/// Resolve a caller's template selection.
///
/// Unknown ids are rejected. Duplicates collapse, and the result follows the
/// order of [`ACTION_TEMPLATES`] rather than the order of `ids`.
pub fn resolve_templates(ids: &[String]) -> Result<Vec<&'static ActionTemplate>, CoreError> {
    if let Some(unknown) = ids.iter().find(|id| find_template(id).is_none()) {
        return Err(CoreError::Validation(format!(
            "Unknown action template '{unknown}'"
        )));
    }
    Ok(ACTION_TEMPLATES
        .iter()
        .filter(|t| ids.iter().any(|id| id == t.id))
        .collect())
}

/// Status and completion timestamp for a checklist item toggled to
/// `is_completed` at `now`.
pub fn completion_state(is_completed: bool, now: Timestamp) -> (ActionStatus, Option<Timestamp>) {
    if is_completed {
        (ActionStatus::Completed, Some(now))
    } else {
        (ActionStatus::Pending, None)
    }
}

/// Percentage of completed checklist items, rounded to the nearest integer.
///
/// A case with no checklist items is 0% complete.
pub fn progress_pct(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed.min(total) as f64 / total as f64 * 100.0).round();
    pct as u8
}

/// Validate a free-form (non-template) action.
pub fn validate_custom_action(action_type: &str, description: &str) -> Result<(), CoreError> {
    if action_type.trim().is_empty() {
        return Err(CoreError::Validation("action_type must not be empty".to_string()));
    }
    if description.trim().is_empty() {
        return Err(CoreError::Validation("description must not be empty".to_string()));
    }
    Ok(())
}
