use crate::models::{ProductJson, ProductListQuery, ProductListResponse};

/// Display-order override applied over the accumulated records. `Relevant`
/// keeps the order pages arrived in, which is the server's newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Relevant,
    PriceAsc,
    PriceDesc,
}

/// Filter inputs of one catalog view. Changing any of them starts the view
/// over from page one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub category: Vec<String>,
    pub sub_category: Vec<String>,
    pub product_type: Vec<String>,
    pub search: Option<String>,
}

/// A claimed fetch slot. Hand it back through [`ProductPager::complete`] or
/// [`ProductPager::fail`]; tickets issued before a reset are recognised and
/// dropped, so a late response can never pollute a fresh view.
#[derive(Debug)]
pub struct FetchTicket {
    pub query: ProductListQuery,
    generation: u64,
}

/// Accumulates catalog pages for an incrementally loaded product grid.
///
/// At most one fetch is in flight at a time. Pages append in order, the
/// sort mode is a pure display transform over whatever has loaded, and a
/// failed fetch keeps the loaded records so the same page can be retried.
#[derive(Debug)]
pub struct ProductPager {
    filter: CatalogFilter,
    limit: i64,
    items: Vec<ProductJson>,
    display: Vec<usize>,
    next_page: i64,
    has_more: bool,
    in_flight: bool,
    sort: SortMode,
    generation: u64,
}

impl ProductPager {
    pub fn new(filter: CatalogFilter, limit: i64) -> Self {
        Self {
            filter,
            limit,
            items: Vec::new(),
            display: Vec::new(),
            next_page: 1,
            has_more: true,
            in_flight: false,
            sort: SortMode::default(),
            generation: 0,
        }
    }

    /// Replace the filter and drop the accumulated pages. The response to
    /// any fetch still out for the old filter will be ignored.
    pub fn set_filter(&mut self, filter: CatalogFilter) {
        self.filter = filter;
        self.items.clear();
        self.display.clear();
        self.next_page = 1;
        self.has_more = true;
        self.in_flight = false;
        self.generation += 1;
    }

    /// Claim the next page if one is due: never while a fetch is in flight
    /// and never past the last page.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.in_flight || !self.has_more {
            return None;
        }

        self.in_flight = true;
        Some(FetchTicket {
            query: self.list_query(),
            generation: self.generation,
        })
    }

    /// Append a fetched page and advance the cursor.
    pub fn complete(&mut self, ticket: &FetchTicket, response: ProductListResponse) {
        if ticket.generation != self.generation {
            return;
        }

        self.in_flight = false;
        self.next_page += 1;
        self.has_more = response.pagination.has_more;
        self.items.extend(response.products);
        self.rebuild_display();
    }

    /// Release the fetch slot after a failed request. Loaded records stay,
    /// and the same page is claimed again on the next trigger.
    pub fn fail(&mut self, ticket: &FetchTicket) {
        if ticket.generation != self.generation {
            return;
        }

        self.in_flight = false;
    }

    /// Reorder the loaded records without touching the fetch cursor.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.rebuild_display();
    }

    /// Loaded records in display order.
    pub fn items(&self) -> Vec<&ProductJson> {
        self.display.iter().map(|&index| &self.items[index]).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    fn list_query(&self) -> ProductListQuery {
        ProductListQuery {
            page: Some(self.next_page.to_string()),
            limit: Some(self.limit.to_string()),
            category: self.filter.category.clone(),
            sub_category: self.filter.sub_category.clone(),
            product_type: self.filter.product_type.clone(),
            search: self.filter.search.clone(),
        }
    }

    // Sorts compare the list price, not the discounted one, so a discount
    // never moves a product relative to its neighbours. The sort is stable;
    // equal prices keep arrival order.
    fn rebuild_display(&mut self) {
        let items = &self.items;
        let mut display: Vec<usize> = (0..items.len()).collect();
        match self.sort {
            SortMode::Relevant => {}
            SortMode::PriceAsc => {
                display.sort_by(|a, b| items[*a].product.price.cmp(&items[*b].product.price));
            }
            SortMode::PriceDesc => {
                display.sort_by(|a, b| items[*b].product.price.cmp(&items[*a].product.price));
            }
        }
        self.display = display;
    }
}
