//! Migration: Create transmission lines table.

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
                CREATE TABLE lines (
                    id UUID PRIMARY KEY,
                    name VARCHAR(200) NOT NULL,
                    voltage INTEGER NOT NULL
                        CHECK (voltage > 0),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    -- The display label "<name> <voltage>kV" must be unambiguous
                    CONSTRAINT uq_lines_name_voltage UNIQUE (name, voltage)
                );

                CREATE INDEX idx_lines_name ON lines(name);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS lines CASCADE;")
            .await?;

        Ok(())
    }
}
