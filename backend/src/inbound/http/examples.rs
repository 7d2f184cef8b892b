//! Example record HTTP handlers.
//!
//! ```text
//! POST   /api/v1/examples {"name":"Widget","price":9.5,"tags":["tools"]}
//! GET    /api/v1/examples?search=wid&sortBy=price&sortOrder=desc&page=1&limit=10
//! GET    /api/v1/examples/{id}
//! PATCH  /api/v1/examples/{id} {"description":"Blue"}
//! DELETE /api/v1/examples/{id}
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, PageRequest, PaginationMeta};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Example, ExampleDraft, ExamplePatch, ExampleQuery, ExampleSort, ExampleSortKey, Price,
    SortOrder,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::response::ApiResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, not_positive_error, parse_bounded_u32,
    parse_example_name,
};

const NAME: FieldName = FieldName::new("name");
const DESCRIPTION: FieldName = FieldName::new("description");
const PRICE: FieldName = FieldName::new("price");
const TAGS: FieldName = FieldName::new("tags");
const LIMIT: FieldName = FieldName::new("limit");
const PAGE: FieldName = FieldName::new("page");
const SORT_BY: FieldName = FieldName::new("sortBy");
const SORT_ORDER: FieldName = FieldName::new("sortOrder");

/// Request body for `POST /api/v1/examples`.
///
/// Each member is `None` when omitted and `Some(None)` when sent as `null`;
/// explicit nulls are rejected during parsing.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateExampleRequest {
    /// Display name, 1 to 100 characters. Required.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String, example = "Widget")]
    pub name: Option<Option<String>>,
    /// Free-form description.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "A blue widget")]
    pub description: Option<Option<String>>,
    /// Price; must be greater than zero.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>, example = 9.5)]
    pub price: Option<Option<f64>>,
    /// Tags; defaults to an empty list.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Option<Vec<String>>>,
}

/// Request body for `PATCH /api/v1/examples/{id}`; omitted fields stay unchanged.
///
/// Members follow the same omitted/`null` distinction as
/// [`CreateExampleRequest`].
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateExampleRequest {
    /// Replacement name, 1 to 100 characters.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    /// Replacement description.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    /// Replacement price; must be greater than zero.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Option<f64>>,
    /// Replacement tag list.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<String>>)]
    pub tags: Option<Option<Vec<String>>>,
}

/// Keep a present `null` apart from an omitted member.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string accepted by `GET /api/v1/examples`.
///
/// Numeric and enumerated values arrive as text and are coerced here so
/// failures can name the offending parameter.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExampleListQuery {
    /// Page size, 1 to 100.
    #[param(value_type = Option<u32>, minimum = 1, maximum = 100, example = 10)]
    pub limit: Option<String>,
    /// 1-based page number.
    #[param(value_type = Option<u32>, minimum = 1, example = 1)]
    pub page: Option<String>,
    /// Case-insensitive text matched against name and description.
    pub search: Option<String>,
    /// Field to order by: id, name, description, price, createdAt, updatedAt.
    #[param(example = "name")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    #[param(example = "asc")]
    pub sort_order: Option<String>,
}

/// Example record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExampleResponse {
    /// Store-assigned identifier.
    #[schema(example = "example-1")]
    pub id: String,
    /// Display name.
    #[schema(example = "Widget")]
    pub name: String,
    /// Description, omitted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price, omitted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Creation time (RFC 3339).
    #[schema(example = "2024-01-01T00:00:00.000Z")]
    pub created_at: String,
    /// Last update time (RFC 3339).
    #[schema(example = "2024-01-01T00:00:00.000Z")]
    pub updated_at: String,
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<Example> for ExampleResponse {
    fn from(value: Example) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            description: value.description().map(str::to_owned),
            price: value.price().map(Price::value),
            tags: value.tags().to_vec(),
            created_at: format_timestamp(value.created_at()),
            updated_at: format_timestamp(value.updated_at()),
        }
    }
}

/// Pagination metadata as returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    /// Page size used for the request.
    #[schema(example = 10)]
    pub limit: u32,
    /// 1-based page returned.
    #[schema(example = 1)]
    pub page: u32,
    /// Matching records across every page.
    #[schema(example = 25)]
    pub total: usize,
    /// Pages needed to show every match.
    #[schema(example = 3)]
    pub total_pages: usize,
}

impl From<PaginationMeta> for PaginationResponse {
    fn from(value: PaginationMeta) -> Self {
        Self {
            limit: value.limit,
            page: value.page,
            total: value.total,
            total_pages: value.total_pages,
        }
    }
}

/// One page of example records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExampleListResponse {
    /// Records on the requested page.
    pub items: Vec<ExampleResponse>,
    /// Metadata describing the full result set.
    pub pagination: PaginationResponse,
}

/// Confirmation returned by `DELETE /api/v1/examples/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteExampleResponse {
    /// Human-readable confirmation.
    #[schema(example = "Example with ID example-1 has been deleted")]
    pub message: String,
}

fn parse_price(value: f64) -> Result<Price, Error> {
    Price::new(value).map_err(|_| not_positive_error(PRICE, value))
}

/// Reject an explicit `null`, leaving omitted members as `None`.
fn reject_null<T>(
    value: Option<Option<T>>,
    field: FieldName,
    expected: &str,
) -> Result<Option<T>, Error> {
    value
        .map(|inner| inner.ok_or_else(|| invalid_value_error(field, "null", expected)))
        .transpose()
}

fn parse_create_request(payload: CreateExampleRequest) -> Result<ExampleDraft, Error> {
    let CreateExampleRequest {
        name,
        description,
        price,
        tags,
    } = payload;
    let name = reject_null(name, NAME, "a string")?.ok_or_else(|| missing_field_error(NAME))?;
    Ok(ExampleDraft {
        name: parse_example_name(name, NAME)?,
        description: reject_null(description, DESCRIPTION, "a string")?,
        price: reject_null(price, PRICE, "a number")?
            .map(parse_price)
            .transpose()?,
        tags: reject_null(tags, TAGS, "an array of strings")?.unwrap_or_default(),
    })
}

fn parse_update_request(payload: UpdateExampleRequest) -> Result<ExamplePatch, Error> {
    let UpdateExampleRequest {
        name,
        description,
        price,
        tags,
    } = payload;
    Ok(ExamplePatch {
        name: reject_null(name, NAME, "a string")?
            .map(|name| parse_example_name(name, NAME))
            .transpose()?,
        description: reject_null(description, DESCRIPTION, "a string")?,
        price: reject_null(price, PRICE, "a number")?
            .map(parse_price)
            .transpose()?,
        tags: reject_null(tags, TAGS, "an array of strings")?,
    })
}

fn parse_sort_key(value: Option<String>) -> Result<ExampleSortKey, Error> {
    let Some(raw) = value else {
        return Ok(ExampleSortKey::Name);
    };
    raw.parse().map_err(|_| {
        let allowed = ExampleSortKey::ALL.map(ExampleSortKey::as_str).join(", ");
        invalid_value_error(SORT_BY, &raw, &format!("one of {allowed}"))
    })
}

fn parse_sort_order(value: Option<String>) -> Result<SortOrder, Error> {
    let Some(raw) = value else {
        return Ok(SortOrder::default());
    };
    raw.parse()
        .map_err(|_| invalid_value_error(SORT_ORDER, &raw, "one of asc, desc"))
}

fn parse_list_query(query: ExampleListQuery) -> Result<(ExampleQuery, PageRequest), Error> {
    let ExampleListQuery {
        limit,
        page,
        search,
        sort_by,
        sort_order,
    } = query;
    let limit = parse_bounded_u32(limit, LIMIT, DEFAULT_LIMIT, 1, Some(MAX_LIMIT))?;
    let page = parse_bounded_u32(page, PAGE, DEFAULT_PAGE, 1, None)?;
    let page_request =
        PageRequest::new(page, limit).map_err(|err| Error::invalid_request(err.to_string()))?;
    let sort = ExampleSort {
        key: parse_sort_key(sort_by)?,
        order: parse_sort_order(sort_order)?,
    };
    let query = ExampleQuery {
        search: search.filter(|text| !text.is_empty()),
        sort: Some(sort),
    };
    Ok((query, page_request))
}

/// Create an example record.
#[utoipa::path(
    post,
    path = "/api/v1/examples",
    request_body = CreateExampleRequest,
    responses(
        (status = 201, description = "Example created successfully", body = ApiResponse<ExampleResponse>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["examples"],
    operation_id = "createExample"
)]
#[post("/examples")]
pub async fn create_example(
    state: web::Data<HttpState>,
    payload: web::Json<CreateExampleRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_create_request(payload.into_inner())?;
    let example = state.examples.create(draft).await?;
    Ok(ApiResponse::respond(
        StatusCode::CREATED,
        ExampleResponse::from(example),
        "Example created successfully",
    ))
}

/// List example records with search, ordering, and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/examples",
    params(ExampleListQuery),
    responses(
        (status = 200, description = "Examples retrieved successfully", body = ApiResponse<ExampleListResponse>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["examples"],
    operation_id = "listExamples"
)]
#[get("/examples")]
pub async fn list_examples(
    state: web::Data<HttpState>,
    query: web::Query<ExampleListQuery>,
) -> ApiResult<HttpResponse> {
    let (query, page) = parse_list_query(query.into_inner())?;
    let page = state.examples_query.list(query, page).await?;
    let page = page.map(ExampleResponse::from);
    Ok(ApiResponse::respond(
        StatusCode::OK,
        ExampleListResponse {
            items: page.items,
            pagination: page.pagination.into(),
        },
        "Examples retrieved successfully",
    ))
}

/// Fetch one example record.
#[utoipa::path(
    get,
    path = "/api/v1/examples/{id}",
    params(("id" = String, Path, description = "Example identifier", example = "example-1")),
    responses(
        (status = 200, description = "Example retrieved successfully", body = ApiResponse<ExampleResponse>),
        (status = 404, description = "Example not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["examples"],
    operation_id = "getExample"
)]
#[get("/examples/{id}")]
pub async fn get_example(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let example = state.examples_query.fetch(&id).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        ExampleResponse::from(example),
        "Example retrieved successfully",
    ))
}

/// Apply a partial update to an example record.
#[utoipa::path(
    patch,
    path = "/api/v1/examples/{id}",
    params(("id" = String, Path, description = "Example identifier", example = "example-1")),
    request_body = UpdateExampleRequest,
    responses(
        (status = 200, description = "Example updated successfully", body = ApiResponse<ExampleResponse>),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Example not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["examples"],
    operation_id = "updateExample"
)]
#[patch("/examples/{id}")]
pub async fn update_example(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateExampleRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let patch = parse_update_request(payload.into_inner())?;
    let example = state.examples.update(&id, patch).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        ExampleResponse::from(example),
        "Example updated successfully",
    ))
}

/// Delete an example record.
#[utoipa::path(
    delete,
    path = "/api/v1/examples/{id}",
    params(("id" = String, Path, description = "Example identifier", example = "example-1")),
    responses(
        (status = 200, description = "Example deleted successfully", body = ApiResponse<DeleteExampleResponse>),
        (status = 404, description = "Example not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["examples"],
    operation_id = "deleteExample"
)]
#[delete("/examples/{id}")]
pub async fn delete_example(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let confirmation = state.examples.delete(&id).await?;
    Ok(ApiResponse::respond(
        StatusCode::OK,
        DeleteExampleResponse {
            message: confirmation.message,
        },
        "Example deleted successfully",
    ))
}
