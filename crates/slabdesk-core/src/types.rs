// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain records shared by the store, the lifecycle services, and the gateway.
//!
//! Field names serialize in camelCase to match the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The only estimate status with behaviour attached to it.
pub const STATUS_SENT: &str = "Sent";

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The store answered a round-trip query.
    Healthy,
    /// The store is not reachable.
    Unhealthy(String),
}

/// Every field of an estimate except the store-assigned identifier.
///
/// Missing JSON fields fall back to zero values so that an incomplete payload
/// is reported by validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EstimateDraft {
    pub material: String,
    pub length: f64,
    pub width: f64,
    pub thickness: f64,
    pub edge_finish: String,
    pub material_cost: f64,
    pub edge_finish_cost: f64,
    pub labor_cost: f64,
    pub tax_rate: f64,
    pub discount: f64,
    /// Total quoted cost.
    pub cost: f64,
    /// Free-text status label. Only [`STATUS_SENT`] triggers a follow-up.
    pub status: String,
}

impl EstimateDraft {
    /// Whether this payload carries the "Sent" status.
    pub fn is_sent(&self) -> bool {
        self.status == STATUS_SENT
    }
}

/// A persisted estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub id: i64,
    #[serde(flatten)]
    pub draft: EstimateDraft,
}

/// Outcome of a full-record estimate update.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateUpdate {
    /// Status stored before the update was applied.
    pub previous_status: String,
    /// The record as it reads after the update.
    pub estimate: Estimate,
}

impl EstimateUpdate {
    /// True when the status moved from anything other than "Sent" to "Sent".
    pub fn entered_sent(&self) -> bool {
        self.previous_status != STATUS_SENT && self.estimate.draft.is_sent()
    }
}

/// A follow-up work item tied to one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub estimate_id: i64,
    pub assigned_to: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewTask {
    pub estimate_id: i64,
    pub assigned_to: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
}

/// Known interaction labels written by the follow-up workflow and the sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum InteractionKind {
    #[strum(serialize = "Reminder Created")]
    ReminderCreated,
    #[strum(serialize = "Reminder Sent")]
    ReminderSent,
}

/// An append-only audit entry describing an event on an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInteraction {
    pub id: i64,
    pub estimate_id: i64,
    /// Free-text label; see [`InteractionKind`] for the values the system writes.
    pub interaction_type: String,
    pub interaction_time: DateTime<Utc>,
}

/// An interaction waiting to be appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInteraction {
    pub estimate_id: i64,
    pub interaction_type: String,
    pub interaction_time: DateTime<Utc>,
}

impl NewInteraction {
    /// Build an interaction of a known kind.
    pub fn of_kind(estimate_id: i64, kind: InteractionKind, at: DateTime<Utc>) -> Self {
        Self {
            estimate_id,
            interaction_type: kind.to_string(),
            interaction_time: at,
        }
    }
}
