use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        Category, MAX_PRODUCT_IMAGES, NewProduct, ProductJson, ProductRequest, SubCategory,
        backfill_trio, is_valid_size,
    },
    queries::product_queries,
};

pub async fn add_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductJson>)> {
    let new_product = validate_new_product(&payload)?;
    let product = product_queries::create_product(&state.db, &new_product).await?;

    Ok((StatusCode::CREATED, Json(ProductJson::from(product))))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductJson>> {
    validate_update(&payload)?;

    let product = product_queries::update_product(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {} not found", id)))?;

    Ok(Json(ProductJson::from(product)))
}

pub async fn remove_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let deleted = product_queries::delete_product(&state.db, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!(
            "Product with id {} not found",
            id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Checks a create payload and backfills the bilingual trios. Every stored
/// product leaves here with all three name and description variants set.
fn validate_new_product(req: &ProductRequest) -> Result<NewProduct> {
    let (name, name_en, name_tr) = backfill_trio(
        req.name.as_deref(),
        req.name_en.as_deref(),
        req.name_tr.as_deref(),
    )
    .ok_or_else(|| AppError::BadRequest("At least one name variant is required".to_string()))?;

    let (description, description_en, description_tr) = backfill_trio(
        req.description.as_deref(),
        req.description_en.as_deref(),
        req.description_tr.as_deref(),
    )
    .ok_or_else(|| {
        AppError::BadRequest("At least one description variant is required".to_string())
    })?;

    let price = req
        .price
        .ok_or_else(|| AppError::BadRequest("Price is required".to_string()))?;
    validate_price(price)?;

    let discount = req.discount.unwrap_or(0);
    validate_discount(discount)?;

    let category = req
        .category
        .as_deref()
        .and_then(Category::parse)
        .ok_or_else(|| {
            AppError::BadRequest("Category must be one of Men, Women, Kids".to_string())
        })?;

    let sub_category = req
        .sub_category
        .as_deref()
        .and_then(SubCategory::parse)
        .ok_or_else(|| {
            AppError::BadRequest(
                "Sub category must be one of Topwear, Bottomwear, Winterwear".to_string(),
            )
        })?;

    let sizes = req.sizes.clone().unwrap_or_default();
    validate_sizes(&sizes)?;

    let image = req.image.clone().unwrap_or_default();
    validate_images(&image)?;

    Ok(NewProduct {
        name,
        name_en,
        name_tr,
        description,
        description_en,
        description_tr,
        price,
        discount,
        category,
        sub_category,
        product_type: req.product_type.clone(),
        sizes,
        image,
        bestseller: req.bestseller.unwrap_or(false),
    })
}

/// Update payloads are partial; only the supplied fields are checked.
fn validate_update(req: &ProductRequest) -> Result<()> {
    for (field, value) in [
        ("name", &req.name),
        ("nameEn", &req.name_en),
        ("nameTr", &req.name_tr),
        ("description", &req.description),
        ("descriptionEn", &req.description_en),
        ("descriptionTr", &req.description_tr),
    ] {
        if let Some(value) = value {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{} must not be blank", field)));
            }
        }
    }

    if let Some(price) = req.price {
        validate_price(price)?;
    }
    if let Some(discount) = req.discount {
        validate_discount(discount)?;
    }
    if let Some(category) = req.category.as_deref() {
        if Category::parse(category).is_none() {
            return Err(AppError::BadRequest(
                "Category must be one of Men, Women, Kids".to_string(),
            ));
        }
    }
    if let Some(sub_category) = req.sub_category.as_deref() {
        if SubCategory::parse(sub_category).is_none() {
            return Err(AppError::BadRequest(
                "Sub category must be one of Topwear, Bottomwear, Winterwear".to_string(),
            ));
        }
    }
    if let Some(sizes) = &req.sizes {
        validate_sizes(sizes)?;
    }
    if let Some(image) = &req.image {
        validate_images(image)?;
    }

    Ok(())
}

fn validate_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Price must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_discount(discount: i32) -> Result<()> {
    if !(0..=100).contains(&discount) {
        return Err(AppError::BadRequest(
            "Discount must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

fn validate_sizes(sizes: &[String]) -> Result<()> {
    if sizes.is_empty() {
        return Err(AppError::BadRequest(
            "At least one size is required".to_string(),
        ));
    }
    for size in sizes {
        if !is_valid_size(size) {
            return Err(AppError::BadRequest(format!("Unknown size: {}", size)));
        }
    }
    Ok(())
}

fn validate_images(image: &[String]) -> Result<()> {
    if image.is_empty() {
        return Err(AppError::BadRequest(
            "At least one image URL is required".to_string(),
        ));
    }
    if image.len() > MAX_PRODUCT_IMAGES {
        return Err(AppError::BadRequest(format!(
            "At most {} image URLs are allowed",
            MAX_PRODUCT_IMAGES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ProductRequest {
        ProductRequest {
            name: Some("Linen Shirt".to_string()),
            name_tr: Some("Keten Gömlek".to_string()),
            description: Some("Lightweight summer shirt".to_string()),
            price: Some(Decimal::new(4990, 2)),
            discount: Some(10),
            category: Some("Men".to_string()),
            sub_category: Some("Topwear".to_string()),
            sizes: Some(vec!["M".to_string(), "L".to_string()]),
            image: Some(vec!["https://cdn.example.com/shirt.jpg".to_string()]),
            ..ProductRequest::default()
        }
    }

    #[test]
    fn create_backfills_missing_variants() {
        let new_product = validate_new_product(&valid_request()).unwrap();

        assert_eq!(new_product.name, "Linen Shirt");
        assert_eq!(new_product.name_en, "Linen Shirt");
        assert_eq!(new_product.name_tr, "Keten Gömlek");
        assert_eq!(new_product.description_en, "Lightweight summer shirt");
        assert_eq!(new_product.description_tr, "Lightweight summer shirt");
    }

    #[test]
    fn create_defaults_discount_and_bestseller() {
        let mut req = valid_request();
        req.discount = None;

        let new_product = validate_new_product(&req).unwrap();

        assert_eq!(new_product.discount, 0);
        assert!(!new_product.bestseller);
    }

    #[test]
    fn create_rejects_missing_names() {
        let mut req = valid_request();
        req.name = None;
        req.name_tr = Some("   ".to_string());

        assert!(validate_new_product(&req).is_err());
    }

    #[test]
    fn create_rejects_unknown_category() {
        let mut req = valid_request();
        req.category = Some("Accessories".to_string());

        assert!(validate_new_product(&req).is_err());
    }

    #[test]
    fn create_rejects_bad_image_counts() {
        let mut req = valid_request();
        req.image = Some(vec![]);
        assert!(validate_new_product(&req).is_err());

        req.image = Some(vec!["a".to_string(); MAX_PRODUCT_IMAGES + 1]);
        assert!(validate_new_product(&req).is_err());
    }

    #[test]
    fn create_rejects_out_of_range_discount() {
        let mut req = valid_request();
        req.discount = Some(101);
        assert!(validate_new_product(&req).is_err());

        req.discount = Some(-1);
        assert!(validate_new_product(&req).is_err());
    }

    #[test]
    fn update_allows_partial_payloads() {
        let req = ProductRequest {
            price: Some(Decimal::new(1999, 2)),
            ..ProductRequest::default()
        };

        assert!(validate_update(&req).is_ok());
    }

    #[test]
    fn update_rejects_blank_name() {
        let req = ProductRequest {
            name_en: Some("  ".to_string()),
            ..ProductRequest::default()
        };

        assert!(validate_update(&req).is_err());
    }

    #[test]
    fn update_rejects_invalid_supplied_fields() {
        let req = ProductRequest {
            sizes: Some(vec!["XXS".to_string()]),
            ..ProductRequest::default()
        };
        assert!(validate_update(&req).is_err());

        let req = ProductRequest {
            image: Some(vec![]),
            ..ProductRequest::default()
        };
        assert!(validate_update(&req).is_err());
    }
}
