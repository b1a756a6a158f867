//! Migration: Create towers table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE towers (
                    id UUID PRIMARY KEY,
                    work_day_id UUID NOT NULL
                        REFERENCES work_days(id) ON DELETE CASCADE,
                    -- Free text in the source form; numeric by convention
                    tower_number VARCHAR(50) NOT NULL,
                    tower_type VARCHAR(10) NOT NULL
                        CHECK (tower_type IN ('SS', 'TT')),
                    insulators_r INTEGER NOT NULL DEFAULT 0
                        CHECK (insulators_r >= 0),
                    insulators_y INTEGER NOT NULL DEFAULT 0
                        CHECK (insulators_y >= 0),
                    insulators_b INTEGER NOT NULL DEFAULT 0
                        CHECK (insulators_b >= 0),
                    remarks VARCHAR(500) NOT NULL DEFAULT '',
                    -- Insertion order within the work day
                    position INTEGER NOT NULL DEFAULT 0
                );

                CREATE INDEX idx_towers_work_day_id ON towers(work_day_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS towers CASCADE;")
            .await?;

        Ok(())
    }
}
