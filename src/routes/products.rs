use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::Query;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{ProductJson, ProductListQuery, ProductListResponse},
    queries::product_queries,
};

/// Public catalog listing. The storefront treats any non-200 as a broken
/// page, so every failure is folded into the `{success: false, message}`
/// body instead of a status code.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Json<ProductListResponse> {
    match product_queries::list_products(&state.db, &params).await {
        Ok(page) => Json(ProductListResponse::page(page)),
        Err(e) => {
            tracing::error!("Product listing failed: {:?}", e);
            Json(ProductListResponse::failure(
                params.page(),
                "Failed to load products",
            ))
        }
    }
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductJson>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    Ok(Json(ProductJson::from(product)))
}
