use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::debug;

use models::person_details::{self, Entity as PersonEntity};
use crate::errors::ServiceError;

/// Create a record after the presence check; the database assigns `id`.
pub async fn create_person(
    db: &DatabaseConnection,
    name: &str,
    designation: &str,
) -> Result<person_details::Model, ServiceError> {
    let created = person_details::create(db, name, designation).await?;
    debug!(id = created.id, "person created");
    Ok(created)
}

/// All records in storage order.
pub async fn list_people(
    db: &DatabaseConnection,
) -> Result<Vec<person_details::Model>, ServiceError> {
    let rows = person_details::list(db).await?;
    Ok(rows)
}

/// Get a record by id.
pub async fn get_person(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<person_details::Model>, ServiceError> {
    PersonEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Replace both fields of an existing record.
pub async fn update_person(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    designation: &str,
) -> Result<person_details::Model, ServiceError> {
    person_details::validate_fields(name, designation)?;
    let Some(existing) = get_person(db, id).await? else {
        return Err(ServiceError::not_found("user"));
    };
    let mut am: person_details::ActiveModel = existing.into();
    am.name = Set(name.to_string());
    am.designation = Set(designation.to_string());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Hard delete; unknown ids are reported as not found.
pub async fn delete_person(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = PersonEntity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("user"));
    }
    Ok(())
}
