use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use common::types::{Envelope, PersonRecord, UserList};
use models::person_details::REQUIRED_FIELDS_MESSAGE;
use service::person_service;

use crate::errors::{ApiError, INVALID_ID_MESSAGE};
use crate::routes::AppState;

/// Body of create and update. Fields are optional here so that absence is
/// reported as a validation failure instead of a deserialization error.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PersonInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
}

impl PersonInput {
    fn required(&self) -> Result<(&str, &str), ApiError> {
        match (self.name.as_deref(), self.designation.as_deref()) {
            (Some(n), Some(d)) if !n.is_empty() && !d.is_empty() => Ok((n, d)),
            _ => Err(ApiError::Validation(REQUIRED_FIELDS_MESSAGE.into())),
        }
    }
}

fn body(payload: Result<Json<PersonInput>, JsonRejection>) -> Result<PersonInput, ApiError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(rej) => {
            debug!(err = %rej.body_text(), "unreadable request body");
            Err(ApiError::Validation(REQUIRED_FIELDS_MESSAGE.into()))
        }
    }
}

/// Non-numeric ids are rejected before touching storage.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| ApiError::Validation(INVALID_ID_MESSAGE.into()))
}

#[utoipa::path(
    post, path = "/api/user", tag = "user",
    request_body = PersonInput,
    responses(
        (status = 201, description = "User created successfully"),
        (status = 400, description = "Name and designation are required"),
        (status = 500, description = "Failed to create user")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<PersonInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<PersonRecord>>), ApiError> {
    let input = body(payload)?;
    let (name, designation) = input.required()?;
    let created = person_service::create_person(&state.db, name, designation)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to create user"))?;
    info!(id = created.id, "created user");
    Ok((StatusCode::CREATED, Json(Envelope::ok("User created successfully", created.into()))))
}

#[utoipa::path(
    get, path = "/api/user", tag = "user",
    responses(
        (status = 200, description = "Users fetched successfully"),
        (status = 500, description = "Failed to fetch users")
    )
)]
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Envelope<UserList<PersonRecord>>>, ApiError> {
    let rows = person_service::list_people(&state.db)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch users"))?;
    info!(count = rows.len(), "list users");
    let users = rows.into_iter().map(PersonRecord::from).collect();
    Ok(Json(Envelope::ok("Users fetched successfully", UserList { users })))
}

#[utoipa::path(
    put, path = "/api/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User ID")),
    request_body = PersonInput,
    responses(
        (status = 200, description = "User updated successfully"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Failed to update user")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<PersonInput>, JsonRejection>,
) -> Result<Json<Envelope<PersonRecord>>, ApiError> {
    let input = body(payload)?;
    let (name, designation) = input.required()?;
    let id = parse_id(&raw_id)?;
    let updated = person_service::update_person(&state.db, id, name, designation)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to update user"))?;
    info!(id, "updated user");
    Ok(Json(Envelope::ok("User updated successfully", updated.into())))
}

#[utoipa::path(
    delete, path = "/api/user/{id}", tag = "user",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Failed to delete user")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let id = parse_id(&raw_id)?;
    person_service::delete_person(&state.db, id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete user"))?;
    info!(id, "deleted user");
    Ok(Json(Envelope::confirm("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_accepts_present_fields() {
        let input = PersonInput { name: Some("Ada".into()), designation: Some("Engineer".into()) };
        assert_eq!(input.required().unwrap(), ("Ada", "Engineer"));
    }

    #[test]
    fn required_rejects_missing_or_empty() {
        let cases = [
            PersonInput::default(),
            PersonInput { name: Some("Ada".into()), designation: None },
            PersonInput { name: Some(String::new()), designation: Some("Engineer".into()) },
        ];
        for input in cases {
            assert!(matches!(input.required(), Err(ApiError::Validation(_))));
        }
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id("17").unwrap(), 17);
        for raw in ["abc", "1.5", "", "99999999999"] {
            let err = parse_id(raw);
            assert!(matches!(err, Err(ApiError::Validation(m)) if m == INVALID_ID_MESSAGE));
        }
    }
}
