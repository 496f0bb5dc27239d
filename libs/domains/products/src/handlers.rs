use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, State},
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome,
    errors::handlers::method_not_allowed,
    errors::responses::{BadRequestJsonResponse, InternalServerErrorResponse},
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::envelope::{
    ErrorBody, ErrorEnvelope, ErrorMessage, ProductAttributes, ProductBody,
    ProductCollectionDocument, ProductDocument, ProductListBody, ProductResource,
    ResourceFormatter, ResourceLink,
};
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, TAG};
use crate::repository::ProductRepository;
use crate::service::ProductService;
use crate::validation::{FieldErrors, PayloadShape};

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product,
            ProductBody,
            ProductListBody,
            ProductDocument,
            ProductCollectionDocument,
            ProductResource,
            ProductAttributes,
            ResourceLink,
            ErrorBody,
            ErrorEnvelope,
            ErrorMessage,
            FieldErrors,
        ),
        responses(BadRequestJsonResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Router state: the shared service plus the response convention of this mount.
pub struct ProductsState<R: ProductRepository> {
    service: Arc<ProductService<R>>,
    formatter: ResourceFormatter,
}

impl<R: ProductRepository> Clone for ProductsState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            formatter: self.formatter.clone(),
        }
    }
}

impl<R: ProductRepository> ProductsState<R> {
    fn shape(&self) -> PayloadShape {
        self.formatter.shape()
    }
}

/// Create the product router for one response convention, mounted at `prefix`.
///
/// The collection answers at `prefix` and `prefix/`. `link_base` is the
/// absolute URL of the collection, used for JSON:API `self` links and ignored
/// by the flat convention.
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    shape: PayloadShape,
    prefix: &str,
    link_base: impl Into<String>,
) -> Router {
    let state = ProductsState {
        service: Arc::new(service),
        formatter: ResourceFormatter::new(shape, link_base),
    };
    let prefix = prefix.trim_end_matches('/');

    Router::new()
        .route(prefix, get(list_products::<R>).post(create_product::<R>))
        .route(
            &format!("{prefix}/"),
            get(list_products::<R>).post(create_product::<R>),
        )
        .route(
            &format!("{prefix}/{{id}}"),
            get(get_product::<R>)
                .put(update_product::<R>)
                .patch(update_product::<R>)
                .delete(delete_product::<R>),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

/// `{"name": ..., "price": ...}` bodies and bare product objects.
pub fn flat_router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    prefix: &str,
) -> Router {
    router(service, PayloadShape::Flat, prefix, "")
}

/// JSON:API documents with `self` links under `link_base`.
pub fn json_api_router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    prefix: &str,
    link_base: impl Into<String>,
) -> Router {
    router(service, PayloadShape::JsonApi, prefix, link_base)
}

/// Product id from the path. Anything that is not an integer is an unknown product.
pub struct ProductId(pub i64);

impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        raw.parse::<i64>()
            .map(ProductId)
            .map_err(|_| ProductError::NotFound(raw).into_response())
    }
}

/// Raw JSON request body.
///
/// An empty body reads as `{}` so that validation reports the missing fields.
/// The `Content-Type` header is not enforced.
pub struct ProductPayload(pub Value);

impl<S> FromRequest<S> for ProductPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ProductPayload(Value::Object(Map::new())));
        }

        serde_json::from_slice(&bytes)
            .map(ProductPayload)
            .map_err(|e| ProductError::MalformedPayload(e).into_response())
    }
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All products, ascending by id", body = ProductListBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
) -> ProductResult<Json<ProductListBody>> {
    let products = state.service.list_products().await?;
    Ok(Json(state.formatter.many(products)))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body(
        content = Value,
        description = "Flat `{name, price}` or JSON:API `{data: {type, attributes: {name, price}}}`",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Product created", body = ProductBody),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, description = "Validation failed", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    headers: HeaderMap,
    ProductPayload(payload): ProductPayload,
) -> ProductResult<impl IntoResponse> {
    let product = state.service.create_product(&payload, state.shape()).await?;

    AuditEvent::new("product.create", AuditOutcome::Success)
        .with_resource("product", product.id)
        .with_request_headers(&headers)
        .with_details(json!({
            "name": product.name,
            "price": product.price,
        }))
        .log();

    Ok((StatusCode::CREATED, Json(state.formatter.one(product))))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductBody),
        (status = 404, description = "No product with that id", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    ProductId(id): ProductId,
) -> ProductResult<Json<ProductBody>> {
    let product = state.service.get_product(id).await?;
    Ok(Json(state.formatter.one(product)))
}

/// Update a product
///
/// Also routed for PATCH.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body(
        content = Value,
        description = "Any subset of name and price, flat or as a JSON:API document",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Product updated", body = ProductBody),
        (status = 400, response = BadRequestJsonResponse),
        (status = 404, description = "No product with that id", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    ProductId(id): ProductId,
    headers: HeaderMap,
    ProductPayload(payload): ProductPayload,
) -> ProductResult<Json<ProductBody>> {
    let product = state
        .service
        .update_product(id, &payload, state.shape())
        .await?;

    AuditEvent::new("product.update", AuditOutcome::Success)
        .with_resource("product", id)
        .with_request_headers(&headers)
        .with_details(json!({
            "name": product.name,
            "price": product.price,
        }))
        .log();

    Ok(Json(state.formatter.one(product)))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No product with that id", body = ErrorBody),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<ProductsState<R>>,
    ProductId(id): ProductId,
    headers: HeaderMap,
) -> ProductResult<StatusCode> {
    state.service.delete_product(id).await?;

    AuditEvent::new("product.delete", AuditOutcome::Success)
        .with_resource("product", id)
        .with_request_headers(&headers)
        .log();

    Ok(StatusCode::NO_CONTENT)
}
