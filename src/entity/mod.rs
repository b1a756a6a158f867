//! SeaORM entity definitions for PostgreSQL database.

pub mod image;
pub mod line;
pub mod report;
pub mod tower;
pub mod work_day;
