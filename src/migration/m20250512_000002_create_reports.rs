//! Migration: Create weekly reports table.

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
                CREATE TABLE reports (
                    id UUID PRIMARY KEY,
                    -- Line display label ("<name> <voltage>kV"), the FK the
                    -- original schema stores instead of a line id
                    line VARCHAR(220) NOT NULL,
                    from_person VARCHAR(200) NOT NULL,
                    to_person VARCHAR(200) NOT NULL,
                    report_date DATE NOT NULL,
                    team VARCHAR(200) NOT NULL,
                    location VARCHAR(200) NOT NULL,
                    "ref" VARCHAR(200) NOT NULL DEFAULT '',
                    status VARCHAR(20) NOT NULL DEFAULT 'draft'
                        CHECK (status IN ('draft', 'completed')),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for listing reports by status
                CREATE INDEX idx_reports_status ON reports(status);

                -- Index for filtering by line
                CREATE INDEX idx_reports_line ON reports(line);

                -- Index for listing by report date (newest first)
                CREATE INDEX idx_reports_report_date ON reports(report_date DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS reports CASCADE;")
            .await?;

        Ok(())
    }
}
