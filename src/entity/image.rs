//! Image attachment entity.
//!
//! Rows reference objects already uploaded to S3; the URL is assigned
//! at upload time, before the row is written.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub work_day_id: Uuid,
    pub image_url: String,
    pub caption: String,
    pub file_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::work_day::Entity",
        from = "Column::WorkDayId",
        to = "super::work_day::Column::Id",
        on_delete = "Cascade"
    )]
    WorkDay,
}

impl Related<super::work_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkDay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
