// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample payloads shared by integration tests.

use chrono::{DateTime, Utc};
use slabdesk_core::{EstimateDraft, NewTask};

/// The reference Quartz countertop estimate with the given status.
pub fn quartz_draft(status: &str) -> EstimateDraft {
    EstimateDraft {
        material: "Quartz".to_string(),
        length: 96.0,
        width: 26.0,
        thickness: 1.5,
        edge_finish: "Bullnose".to_string(),
        material_cost: 800.0,
        edge_finish_cost: 50.0,
        labor_cost: 200.0,
        tax_rate: 0.08,
        discount: 0.0,
        cost: 1050.0,
        status: status.to_string(),
    }
}

/// A granite estimate used where a second, distinct record is needed.
pub fn granite_draft(status: &str) -> EstimateDraft {
    EstimateDraft {
        material: "Granite".to_string(),
        length: 110.0,
        width: 25.5,
        thickness: 3.0,
        edge_finish: "Eased".to_string(),
        material_cost: 1200.0,
        edge_finish_cost: 75.0,
        labor_cost: 350.0,
        tax_rate: 0.0625,
        discount: 100.0,
        cost: 1625.0,
        status: status.to_string(),
    }
}

/// An open task for `estimate_id` assigned to "Dana".
pub fn task_for(estimate_id: i64, due: DateTime<Utc>) -> NewTask {
    NewTask {
        estimate_id,
        assigned_to: "Dana".to_string(),
        due_date: Some(due),
        completed: false,
    }
}
