// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Estimate CRUD operations.

use rusqlite::{OptionalExtension, params};
use slabdesk_core::{Estimate, EstimateDraft, EstimateUpdate, SlabdeskError};

use crate::database::{Database, map_tr_err};

const SELECT_COLUMNS: &str = "SELECT id, material, length, width, thickness, edge_finish,
        material_cost, edge_finish_cost, labor_cost, tax_rate, discount, cost, status
     FROM estimates";

fn estimate_from_row(row: &rusqlite::Row<'_>) -> Result<Estimate, rusqlite::Error> {
    Ok(Estimate {
        id: row.get(0)?,
        draft: EstimateDraft {
            material: row.get(1)?,
            length: row.get(2)?,
            width: row.get(3)?,
            thickness: row.get(4)?,
            edge_finish: row.get(5)?,
            material_cost: row.get(6)?,
            edge_finish_cost: row.get(7)?,
            labor_cost: row.get(8)?,
            tax_rate: row.get(9)?,
            discount: row.get(10)?,
            cost: row.get(11)?,
            status: row.get(12)?,
        },
    })
}

fn select_one(conn: &rusqlite::Connection, id: i64) -> Result<Option<Estimate>, rusqlite::Error> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id],
        estimate_from_row,
    )
    .optional()
}

/// Insert a new estimate and return it with its assigned id.
pub async fn create_estimate(db: &Database, draft: &EstimateDraft) -> Result<Estimate, SlabdeskError> {
    let draft = draft.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO estimates (material, length, width, thickness, edge_finish,
                    material_cost, edge_finish_cost, labor_cost, tax_rate, discount, cost, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    draft.material,
                    draft.length,
                    draft.width,
                    draft.thickness,
                    draft.edge_finish,
                    draft.material_cost,
                    draft.edge_finish_cost,
                    draft.labor_cost,
                    draft.tax_rate,
                    draft.discount,
                    draft.cost,
                    draft.status,
                ],
            )?;
            Ok(Estimate {
                id: conn.last_insert_rowid(),
                draft,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Get an estimate by id.
pub async fn get_estimate(db: &Database, id: i64) -> Result<Option<Estimate>, SlabdeskError> {
    db.connection()
        .call(move |conn| select_one(conn, id))
        .await
        .map_err(map_tr_err)
}

/// List all estimates in id order.
pub async fn list_estimates(db: &Database) -> Result<Vec<Estimate>, SlabdeskError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
            let rows = stmt.query_map([], estimate_from_row)?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite every field of an estimate.
///
/// The previous status is read and the new record written in one transaction,
/// so concurrent updates each observe the status the other left behind.
/// Returns `None` if the estimate does not exist.
pub async fn update_estimate(
    db: &Database,
    id: i64,
    draft: &EstimateDraft,
) -> Result<Option<EstimateUpdate>, SlabdeskError> {
    let draft = draft.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let previous_status: Option<String> = tx
                .query_row(
                    "SELECT status FROM estimates WHERE id = ?1",
                    params![id],
                    |row| row.get(0),
                )
                .optional()?;
            let Some(previous_status) = previous_status else {
                return Ok(None);
            };

            tx.execute(
                "UPDATE estimates SET material = ?1, length = ?2, width = ?3, thickness = ?4,
                    edge_finish = ?5, material_cost = ?6, edge_finish_cost = ?7, labor_cost = ?8,
                    tax_rate = ?9, discount = ?10, cost = ?11, status = ?12
                 WHERE id = ?13",
                params![
                    draft.material,
                    draft.length,
                    draft.width,
                    draft.thickness,
                    draft.edge_finish,
                    draft.material_cost,
                    draft.edge_finish_cost,
                    draft.labor_cost,
                    draft.tax_rate,
                    draft.discount,
                    draft.cost,
                    draft.status,
                    id,
                ],
            )?;
            let estimate = select_one(&tx, id)?;
            tx.commit()?;

            Ok(estimate.map(|estimate| EstimateUpdate {
                previous_status,
                estimate,
            }))
        })
        .await
        .map_err(map_tr_err)
}

/// Whether an estimate with this id exists.
pub async fn estimate_exists(db: &Database, id: i64) -> Result<bool, SlabdeskError> {
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM estimates WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

/// Delete an estimate. Tasks and interactions go with it via `ON DELETE CASCADE`.
///
/// Returns `false` if no row was deleted.
pub async fn delete_estimate(db: &Database, id: i64) -> Result<bool, SlabdeskError> {
    db.connection()
        .call(move |conn| {
            let deleted = conn.execute("DELETE FROM estimates WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
        .await
        .map_err(map_tr_err)
}
