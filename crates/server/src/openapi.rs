use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct PersonRecordDoc { pub id: i32, pub name: String, pub designation: String }

#[derive(ToSchema)]
pub struct EnvelopeDoc { pub success: bool, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create,
        crate::routes::users::list,
        crate::routes::users::update,
        crate::routes::users::delete,
    ),
    components(
        schemas(
            HealthResponse,
            PersonRecordDoc,
            EnvelopeDoc,
            crate::routes::users::PersonInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "user")
    )
)]
pub struct ApiDoc;
