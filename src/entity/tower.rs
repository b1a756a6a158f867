//! Tower entity: one inspected structure on a work day.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "towers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub work_day_id: Uuid,
    /// Free text in the source form; numeric by convention.
    pub tower_number: String,
    pub tower_type: String,
    pub insulators_r: i32,
    pub insulators_y: i32,
    pub insulators_b: i32,
    pub remarks: String,
    pub position: i32,
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
