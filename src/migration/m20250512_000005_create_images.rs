//! Migration: Create image attachments table.

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
                CREATE TABLE images (
                    id UUID PRIMARY KEY,
                    work_day_id UUID NOT NULL
                        REFERENCES work_days(id) ON DELETE CASCADE,
                    image_url VARCHAR(1000) NOT NULL,
                    caption VARCHAR(500) NOT NULL DEFAULT '',
                    file_name VARCHAR(300) NOT NULL DEFAULT ''
                );

                CREATE INDEX idx_images_work_day_id ON images(work_day_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS images CASCADE;")
            .await?;

        Ok(())
    }
}
