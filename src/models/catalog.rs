use serde::{Deserialize, Serialize};

use super::{Product, ProductJson};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters of `GET /api/product/list`. `page` and `limit` arrive
/// as raw strings so malformed values can fall back to their defaults
/// instead of rejecting the request. The three filter fields are
/// repeatable; repeated values OR together within a field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Vec<String>,
    pub sub_category: Vec<String>,
    pub product_type: Vec<String>,
    pub search: Option<String>,
}

impl ProductListQuery {
    pub fn page(&self) -> i64 {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        parse_positive(self.limit.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Flatten into repeatable query pairs for an outbound request.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = &self.page {
            pairs.push(("page", page.clone()));
        }
        if let Some(limit) = &self.limit {
            pairs.push(("limit", limit.clone()));
        }
        for value in &self.category {
            pairs.push(("category", value.clone()));
        }
        for value in &self.sub_category {
            pairs.push(("subCategory", value.clone()));
        }
        for value in &self.product_type {
            pairs.push(("productType", value.clone()));
        }
        if let Some(search) = self.search_term() {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_products: i64,
    pub has_more: bool,
}

impl Pagination {
    /// Metadata for one fetched slice. `returned` is the number of records
    /// actually in the slice, which may run short on the last page.
    pub fn compute(page: i64, limit: i64, total: i64, returned: usize) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        let consumed = (page - 1).saturating_mul(limit).saturating_add(returned as i64);

        Self {
            current_page: page,
            total_pages,
            total_products: total,
            has_more: consumed < total,
        }
    }

    pub fn empty(page: i64) -> Self {
        Self {
            current_page: page,
            total_pages: 0,
            total_products: 0,
            has_more: false,
        }
    }
}

/// One fetched page of catalog records plus its metadata.
#[derive(Debug)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

/// Body of the list endpoint. Failures ride in the same shape with
/// `success:false` and HTTP 200; callers key off the flag, not the status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ProductJson>,
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProductListResponse {
    pub fn page(page: ProductPage) -> Self {
        Self {
            success: true,
            products: page.products.into_iter().map(ProductJson::from).collect(),
            pagination: page.pagination,
            message: None,
        }
    }

    pub fn failure(page: i64, message: impl Into<String>) -> Self {
        Self {
            success: false,
            products: Vec::new(),
            pagination: Pagination::empty(page),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query(page: Option<&str>, limit: Option<&str>) -> ProductListQuery {
        ProductListQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn malformed_pagination_input_defaults_instead_of_rejecting() {
        assert_eq!(query(None, None).page(), 1);
        assert_eq!(query(Some("abc"), None).page(), 1);
        assert_eq!(query(Some("0"), None).page(), 1);
        assert_eq!(query(Some("-3"), None).page(), 1);
        assert_eq!(query(Some("7"), None).page(), 7);

        assert_eq!(query(None, None).limit(), 10);
        assert_eq!(query(None, Some("x")).limit(), 10);
        assert_eq!(query(None, Some("25")).limit(), 25);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(query(None, Some("500")).limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_math() {
        assert_eq!(query(Some("1"), Some("10")).offset(), 0);
        assert_eq!(query(Some("3"), Some("10")).offset(), 20);
    }

    #[test]
    fn pagination_for_25_products_in_pages_of_10() {
        let first = Pagination::compute(1, 10, 25, 10);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_products, 25);
        assert!(first.has_more);

        let last = Pagination::compute(3, 10, 25, 5);
        assert_eq!(last.total_pages, 3);
        assert!(!last.has_more);
    }

    #[test]
    fn empty_catalog_has_zero_pages() {
        let meta = Pagination::compute(1, 10, 0, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.total_products, 0);
        assert!(!meta.has_more);
    }

    #[test]
    fn page_beyond_the_end_still_reports_the_true_total() {
        let meta = Pagination::compute(10, 10, 25, 0);
        assert_eq!(meta.total_products, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_more);
    }

    #[test]
    fn search_term_ignores_blank_input() {
        let mut q = ProductListQuery {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(q.search_term(), None);

        q.search = Some(" kırmızı ".to_string());
        assert_eq!(q.search_term(), Some("kırmızı"));
    }

    #[test]
    fn query_pairs_repeat_multi_value_fields() {
        let q = ProductListQuery {
            page: Some("2".to_string()),
            limit: Some("10".to_string()),
            category: vec!["Men".to_string(), "Women".to_string()],
            sub_category: vec!["Topwear".to_string()],
            product_type: Vec::new(),
            search: Some("dress".to_string()),
        };

        assert_eq!(
            q.to_query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("category", "Men".to_string()),
                ("category", "Women".to_string()),
                ("subCategory", "Topwear".to_string()),
                ("search", "dress".to_string()),
            ]
        );
    }

    #[test]
    fn failure_body_keeps_the_uniform_shape() {
        let value = serde_json::to_value(ProductListResponse::failure(1, "Failed to load products"))
            .unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["products"], json!([]));
        assert_eq!(value["pagination"]["totalProducts"], json!(0));
        assert_eq!(value["pagination"]["currentPage"], json!(1));
        assert_eq!(value["message"], json!("Failed to load products"));
    }

    #[test]
    fn success_body_omits_the_message_field() {
        let page = ProductPage {
            products: Vec::new(),
            pagination: Pagination::compute(1, 10, 0, 0),
        };
        let value = serde_json::to_value(ProductListResponse::page(page)).unwrap();

        assert_eq!(value["success"], json!(true));
        assert!(value.get("message").is_none());
        assert_eq!(value["pagination"]["hasMore"], json!(false));
    }
}
