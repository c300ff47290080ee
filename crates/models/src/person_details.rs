use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use common::types::PersonRecord;

use crate::errors;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and designation are required";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "personDetails")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub designation: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PersonRecord {
    fn from(m: Model) -> Self {
        PersonRecord { id: m.id, name: m.name, designation: m.designation }
    }
}

/// Presence check only: both fields must be non-empty. Whitespace counts as present.
pub fn validate_fields(name: &str, designation: &str) -> Result<(), errors::ModelError> {
    if name.is_empty() || designation.is_empty() {
        return Err(errors::ModelError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    designation: &str,
) -> Result<Model, errors::ModelError> {
    validate_fields(name, designation)?;
    let am = ActiveModel {
        name: Set(name.to_string()),
        designation: Set(designation.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// All records in ascending id order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
