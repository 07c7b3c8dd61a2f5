// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Input validation for estimate and task payloads.
//!
//! All violations are collected (does not fail fast) and reported together
//! in a single [`SlabdeskError::Validation`].

use chrono::{DateTime, Datelike, Utc};

use crate::error::SlabdeskError;
use crate::types::{EstimateDraft, NewTask};

/// Latest calendar year a due date may fall in.
///
/// Stored timestamps are compared as fixed-width text, which only orders
/// correctly for four-digit years.
pub const MAX_DUE_YEAR: i32 = 9999;

/// Check an estimate payload against the record invariants.
///
/// Material and edge finish must be non-empty, dimensions strictly positive,
/// cost components, tax rate and discount non-negative, and the total cost
/// strictly positive.
pub fn validate_estimate(draft: &EstimateDraft) -> Result<(), SlabdeskError> {
    let mut problems = Vec::new();

    if draft.material.trim().is_empty() {
        problems.push("material must not be empty".to_string());
    }
    if draft.edge_finish.trim().is_empty() {
        problems.push("edgeFinish must not be empty".to_string());
    }

    for (name, value) in [
        ("length", draft.length),
        ("width", draft.width),
        ("thickness", draft.thickness),
        ("cost", draft.cost),
    ] {
        if !positive(value) {
            problems.push(format!("{name} must be greater than zero, got {value}"));
        }
    }

    for (name, value) in [
        ("materialCost", draft.material_cost),
        ("edgeFinishCost", draft.edge_finish_cost),
        ("laborCost", draft.labor_cost),
        ("taxRate", draft.tax_rate),
        ("discount", draft.discount),
    ] {
        if !non_negative(value) {
            problems.push(format!("{name} must not be negative, got {value}"));
        }
    }

    finish(problems)
}

/// Check a task creation payload.
pub fn validate_new_task(task: &NewTask) -> Result<(), SlabdeskError> {
    let mut problems = Vec::new();

    if task.estimate_id <= 0 {
        problems.push(format!(
            "estimateId must be a positive identifier, got {}",
            task.estimate_id
        ));
    }
    if task.assigned_to.trim().is_empty() {
        problems.push("assignedTo must not be empty".to_string());
    }
    match &task.due_date {
        None => problems.push("dueDate is required".to_string()),
        Some(due) => {
            if let Err(problem) = check_due_date(due) {
                problems.push(problem);
            }
        }
    }

    finish(problems)
}

/// Check a reassignment target.
pub fn validate_assignee(assignee: &str) -> Result<(), SlabdeskError> {
    if assignee.trim().is_empty() {
        return Err(SlabdeskError::Validation(
            "assignedTo must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Check that a due date falls within years 0 through [`MAX_DUE_YEAR`] in UTC.
pub fn validate_due_date(due: &DateTime<Utc>) -> Result<(), SlabdeskError> {
    check_due_date(due).map_err(SlabdeskError::Validation)
}

fn check_due_date(due: &DateTime<Utc>) -> Result<(), String> {
    if (0..=MAX_DUE_YEAR).contains(&due.year()) {
        Ok(())
    } else {
        Err(format!(
            "dueDate must fall between years 0 and {MAX_DUE_YEAR} in UTC, got {due}"
        ))
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn finish(problems: Vec<String>) -> Result<(), SlabdeskError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(SlabdeskError::Validation(problems.join("; ")))
    }
}
