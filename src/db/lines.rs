//! Database queries for transmission lines.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::line::{self, Entity as LineEntity};
use crate::error::{AppError, AppResult};
use crate::models::Line;

use super::DbPool;

fn to_model(row: line::Model) -> Line {
    Line {
        id: row.id,
        name: row.name,
        voltage: row.voltage,
        created_at: row.created_at,
    }
}

impl DbPool {
    /// List all transmission lines, ordered by name.
    pub async fn list_lines(&self) -> AppResult<Vec<Line>> {
        let rows = LineEntity::find()
            .order_by_asc(line::Column::Name)
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to list lines: {}", e)))?;

        Ok(rows.into_iter().map(to_model).collect())
    }

    /// Insert a new transmission line.
    ///
    /// The (name, voltage) pair is unique; a duplicate surfaces as a
    /// database error with the constraint message.
    pub async fn insert_line(&self, name: &str, voltage: i32) -> AppResult<Line> {
        let model = line::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            voltage: Set(voltage),
            created_at: Set(Utc::now()),
        };

        let row = model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert line: {}", e)))?;

        Ok(to_model(row))
    }
}
