//! Migration: Create work days table.

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
                CREATE TABLE work_days (
                    id UUID PRIMARY KEY,
                    report_id UUID NOT NULL
                        REFERENCES reports(id) ON DELETE CASCADE,
                    day_name VARCHAR(20) NOT NULL,
                    work_date DATE NOT NULL,
                    work_type VARCHAR(10) NOT NULL
                        CHECK (work_type IN ('normal', 'nowork')),
                    no_work_reason VARCHAR(40)
                        CHECK (no_work_reason IN
                            ('PUBLIC HOLIDAY', 'RAIN', 'EQUIPMENT ISSUE', 'OTHER')),
                    no_work_details VARCHAR(500),
                    -- Insertion order within the report; work_date is the
                    -- primary sort key, this breaks ties deterministically
                    position INTEGER NOT NULL DEFAULT 0
                );

                -- Join index for re-nesting a report's days
                CREATE INDEX idx_work_days_report_id ON work_days(report_id);

                -- Days are read back in chronological order
                CREATE INDEX idx_work_days_work_date ON work_days(report_id, work_date);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS work_days CASCADE;")
            .await?;

        Ok(())
    }
}
