//! Work day entity.
//!
//! `day_name` is persisted for schema compatibility but the stored date
//! is authoritative; the label is re-derived on read.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "work_days")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub report_id: Uuid,
    pub day_name: String,
    pub work_date: Date,
    pub work_type: String,
    pub no_work_reason: Option<String>,
    pub no_work_details: Option<String>,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::report::Entity",
        from = "Column::ReportId",
        to = "super::report::Column::Id",
        on_delete = "Cascade"
    )]
    Report,
    #[sea_orm(has_many = "super::tower::Entity")]
    Towers,
    #[sea_orm(has_many = "super::image::Entity")]
    Images,
}

impl Related<super::report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Report.def()
    }
}

impl Related<super::tower::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Towers.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
