use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Todo API",
        version = "0.1.0",
        description = "CRUD API for todo items"
    )
)]
struct BaseApiDoc;

/// Full API document: the shared error schema plus every domain's paths.
///
/// Domain routes are mounted at the root, so their documents are merged
/// rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        BaseApiDoc::openapi().merge_from(domain_todo_items::handlers::ApiDoc::openapi())
    }
}
