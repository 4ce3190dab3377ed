mod pager;

pub use pager::{CatalogFilter, FetchTicket, ProductPager, SortMode};

use std::time::Duration;

use reqwest::Client;

use crate::{
    error::{AppError, Result},
    models::{ProductListQuery, ProductListResponse},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Consumer of the public catalog API, typically driving a [`ProductPager`]
/// behind a product grid.
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    pub async fn list(&self, query: &ProductListQuery) -> Result<ProductListResponse> {
        let url = format!("{}/api/product/list", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Catalog request failed: {}", e)))?;

        response
            .json::<ProductListResponse>()
            .await
            .map_err(|e| AppError::InternalError(format!("Invalid catalog response: {}", e)))
    }

    /// Fetch and append the pager's next page. Returns `false` when nothing
    /// was due, either because a fetch is already in flight or the last
    /// page has been reached. Failures release the fetch slot and leave the
    /// loaded records intact.
    pub async fn fetch_next(&self, pager: &mut ProductPager) -> Result<bool> {
        let Some(ticket) = pager.begin_fetch() else {
            return Ok(false);
        };

        match self.list(&ticket.query).await {
            Ok(response) if response.success => {
                pager.complete(&ticket, response);
                Ok(true)
            }
            Ok(response) => {
                pager.fail(&ticket);
                let message = response
                    .message
                    .unwrap_or_else(|| "Catalog query failed".to_string());
                Err(AppError::InternalError(message))
            }
            Err(e) => {
                pager.fail(&ticket);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalised() {
        let client = CatalogClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:4000");
    }

    #[tokio::test]
    async fn unreachable_server_releases_the_fetch_slot() {
        // Port 9 is the discard service; nothing listens there.
        let client = CatalogClient::new("http://127.0.0.1:9").unwrap();
        let mut pager = ProductPager::new(CatalogFilter::default(), 10);

        assert!(client.fetch_next(&mut pager).await.is_err());
        assert!(!pager.is_loading());
        assert!(pager.is_empty());
        assert!(pager.begin_fetch().is_some());
    }
}
