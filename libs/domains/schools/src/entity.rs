use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::School;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub logo: Option<String>,
    #[sea_orm(unique)]
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for School {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            logo: model.logo,
            slug: model.slug,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<School> for ActiveModel {
    fn from(school: School) -> Self {
        ActiveModel {
            id: Set(school.id),
            name: Set(school.name),
            logo: Set(school.logo),
            slug: Set(school.slug),
            created_at: Set(school.created_at.into()),
            updated_at: Set(school.updated_at.into()),
        }
    }
}
