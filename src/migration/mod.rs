//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250512_000001_create_lines;
mod m20250512_000002_create_reports;
mod m20250512_000003_create_work_days;
mod m20250512_000004_create_towers;
mod m20250512_000005_create_images;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250512_000001_create_lines::Migration),
            Box::new(m20250512_000002_create_reports::Migration),
            Box::new(m20250512_000003_create_work_days::Migration),
            Box::new(m20250512_000004_create_towers::Migration),
            Box::new(m20250512_000005_create_images::Migration),
        ]
    }
}
