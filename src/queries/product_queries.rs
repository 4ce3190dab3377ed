use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{NewProduct, Pagination, Product, ProductListQuery, ProductPage, ProductRequest},
};

/// Append the filter predicate: OR within a field (membership), AND across
/// fields, substring search OR-ed over the bilingual name fields and the
/// generic description. Fields without input add no predicate.
fn push_filters(query: &mut QueryBuilder<Postgres>, params: &ProductListQuery) {
    if !params.category.is_empty() {
        query.push(" AND category = ANY(");
        query.push_bind(params.category.clone());
        query.push(")");
    }

    if !params.sub_category.is_empty() {
        query.push(" AND sub_category = ANY(");
        query.push_bind(params.sub_category.clone());
        query.push(")");
    }

    if !params.product_type.is_empty() {
        query.push(" AND product_type = ANY(");
        query.push_bind(params.product_type.clone());
        query.push(")");
    }

    if let Some(term) = params.search_term() {
        let pattern = format!("%{}%", term);
        query.push(" AND (name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR name_en ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR name_tr ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}

/// Count plus slice over the same predicate. The two reads are independent,
/// so the count stays correct even when the requested page is past the end.
pub async fn list_products(pool: &PgPool, params: &ProductListQuery) -> Result<ProductPage> {
    let page = params.page();
    let limit = params.limit();

    let mut count_query: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM products WHERE 1=1");
    push_filters(&mut count_query, params);

    let total: i64 = count_query.build_query_scalar().fetch_one(pool).await?;

    let mut slice_query: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT * FROM products WHERE 1=1");
    push_filters(&mut slice_query, params);
    // id breaks timestamp ties so pagination never duplicates or skips rows
    slice_query.push(" ORDER BY date DESC, id DESC LIMIT ");
    slice_query.push_bind(limit);
    slice_query.push(" OFFSET ");
    slice_query.push_bind(params.offset());

    let products = slice_query
        .build_query_as::<Product>()
        .fetch_all(pool)
        .await?;

    let pagination = Pagination::compute(page, limit, total, products.len());

    Ok(ProductPage {
        products,
        pagination,
    })
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn create_product(pool: &PgPool, new_product: &NewProduct) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (
            name, name_en, name_tr,
            description, description_en, description_tr,
            price, discount, category, sub_category, product_type,
            sizes, image, bestseller
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(&new_product.name)
    .bind(&new_product.name_en)
    .bind(&new_product.name_tr)
    .bind(&new_product.description)
    .bind(&new_product.description_en)
    .bind(&new_product.description_tr)
    .bind(new_product.price)
    .bind(new_product.discount)
    .bind(new_product.category.as_str())
    .bind(new_product.sub_category.as_str())
    .bind(&new_product.product_type)
    .bind(&new_product.sizes)
    .bind(&new_product.image)
    .bind(new_product.bestseller)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Partial update: absent fields keep their current values. `image`, when
/// present, is the full surviving-plus-appended list sent by the client.
pub async fn update_product(
    pool: &PgPool,
    id: i32,
    req: &ProductRequest,
) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET
            name = COALESCE($1, name),
            name_en = COALESCE($2, name_en),
            name_tr = COALESCE($3, name_tr),
            description = COALESCE($4, description),
            description_en = COALESCE($5, description_en),
            description_tr = COALESCE($6, description_tr),
            price = COALESCE($7, price),
            discount = COALESCE($8, discount),
            category = COALESCE($9, category),
            sub_category = COALESCE($10, sub_category),
            product_type = COALESCE($11, product_type),
            sizes = COALESCE($12, sizes),
            image = COALESCE($13, image),
            bestseller = COALESCE($14, bestseller)
        WHERE id = $15
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(&req.name_en)
    .bind(&req.name_tr)
    .bind(&req.description)
    .bind(&req.description_en)
    .bind(&req.description_tr)
    .bind(req.price)
    .bind(req.discount)
    .bind(&req.category)
    .bind(&req.sub_category)
    .bind(&req.product_type)
    .bind(&req.sizes)
    .bind(&req.image)
    .bind(req.bestseller)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT COUNT(*) FROM products WHERE 1=1")
    }

    #[test]
    fn no_input_adds_no_predicates() {
        let mut query = builder();
        push_filters(&mut query, &ProductListQuery::default());

        assert_eq!(query.sql(), "SELECT COUNT(*) FROM products WHERE 1=1");
    }

    #[test]
    fn membership_filters_use_any() {
        let params = ProductListQuery {
            category: vec!["Men".to_string(), "Women".to_string()],
            ..Default::default()
        };

        let mut query = builder();
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM products WHERE 1=1 AND category = ANY($1)"
        );
    }

    #[test]
    fn filter_kinds_are_conjoined() {
        let params = ProductListQuery {
            category: vec!["Kids".to_string()],
            sub_category: vec!["Topwear".to_string()],
            product_type: vec!["Boots".to_string()],
            ..Default::default()
        };

        let mut query = builder();
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM products WHERE 1=1 \
             AND category = ANY($1) \
             AND sub_category = ANY($2) \
             AND product_type = ANY($3)"
        );
    }

    #[test]
    fn search_spans_bilingual_name_fields_and_description() {
        let params = ProductListQuery {
            search: Some("kırmızı".to_string()),
            ..Default::default()
        };

        let mut query = builder();
        push_filters(&mut query, &params);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM products WHERE 1=1 \
             AND (name ILIKE $1 OR name_en ILIKE $2 OR name_tr ILIKE $3 OR description ILIKE $4)"
        );
    }

    #[test]
    fn blank_search_is_ignored() {
        let params = ProductListQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };

        let mut query = builder();
        push_filters(&mut query, &params);

        assert_eq!(query.sql(), "SELECT COUNT(*) FROM products WHERE 1=1");
    }
}
