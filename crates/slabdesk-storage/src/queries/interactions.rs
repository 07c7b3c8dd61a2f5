// SPDX-FileCopyrightText: 2026 Slabdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only customer interaction log.

use chrono::SubsecRound;
use rusqlite::params;
use slabdesk_core::{CustomerInteraction, NewInteraction, SlabdeskError};

use crate::database::{Database, format_timestamp, map_tr_err, timestamp_column};

/// Append an interaction and return the stored entry.
pub async fn log_interaction(
    db: &Database,
    interaction: &NewInteraction,
) -> Result<CustomerInteraction, SlabdeskError> {
    let estimate_id = interaction.estimate_id;
    let interaction_type = interaction.interaction_type.clone();
    let interaction_time = interaction.interaction_time.trunc_subsecs(3);
    let time_text = format_timestamp(&interaction_time);

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO customer_interactions (estimate_id, interaction_type, interaction_time)
                 VALUES (?1, ?2, ?3)",
                params![estimate_id, interaction_type, time_text],
            )?;
            Ok(CustomerInteraction {
                id: conn.last_insert_rowid(),
                estimate_id,
                interaction_type,
                interaction_time,
            })
        })
        .await
        .map_err(map_tr_err)
}

/// List every interaction in id order.
pub async fn list_interactions(db: &Database) -> Result<Vec<CustomerInteraction>, SlabdeskError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, estimate_id, interaction_type, interaction_time
                 FROM customer_interactions ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(CustomerInteraction {
                    id: row.get(0)?,
                    estimate_id: row.get(1)?,
                    interaction_type: row.get(2)?,
                    interaction_time: timestamp_column(row, 3)?,
                })
            })?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::estimates::tests::{quartz, setup_db};
    use crate::queries::estimates::{create_estimate, delete_estimate};
    use chrono::Utc;
    use slabdesk_core::InteractionKind;

    #[tokio::test]
    async fn log_and_list_interactions() {
        let (db, _dir) = setup_db().await;
        let estimate = create_estimate(&db, &quartz("Sent")).await.unwrap();

        let first = log_interaction(
            &db,
            &NewInteraction::of_kind(estimate.id, InteractionKind::ReminderCreated, Utc::now()),
        )
        .await
        .unwrap();
        let second = log_interaction(
            &db,
            &NewInteraction::of_kind(estimate.id, InteractionKind::ReminderSent, Utc::now()),
        )
        .await
        .unwrap();

        let listed = list_interactions(&db).await.unwrap();
        assert_eq!(listed, vec![first, second]);
        assert_eq!(listed[0].interaction_type, "Reminder Created");
        assert_eq!(listed[1].interaction_type, "Reminder Sent");
    }

    #[tokio::test]
    async fn interaction_for_missing_estimate_is_rejected() {
        let (db, _dir) = setup_db().await;
        let result = log_interaction(
            &db,
            &NewInteraction::of_kind(404, InteractionKind::ReminderSent, Utc::now()),
        )
        .await;
        assert!(matches!(result, Err(SlabdeskError::Storage { .. })));
    }

    #[tokio::test]
    async fn deleting_estimate_cascades_to_interactions() {
        let (db, _dir) = setup_db().await;
        let estimate = create_estimate(&db, &quartz("Sent")).await.unwrap();
        log_interaction(
            &db,
            &NewInteraction::of_kind(estimate.id, InteractionKind::ReminderCreated, Utc::now()),
        )
        .await
        .unwrap();

        delete_estimate(&db, estimate.id).await.unwrap();
        assert!(list_interactions(&db).await.unwrap().is_empty());
    }
}
