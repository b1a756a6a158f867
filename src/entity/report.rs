//! Weekly report entity.
//!
//! The `line` column stores the line display label ("<name> <voltage>kV"),
//! which is the foreign key the original schema uses.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub line: String,
    pub from_person: String,
    pub to_person: String,
    pub report_date: Date,
    pub team: String,
    pub location: String,
    #[sea_orm(column_name = "ref")]
    pub reference: String,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::work_day::Entity")]
    WorkDays,
}

impl Related<super::work_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkDays.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
