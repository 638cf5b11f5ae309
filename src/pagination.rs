use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QuerySelect, Select};
use serde::Deserialize;

use crate::error::AppResult;

pub const DEFAULT_RECORDS_PER_PAGE: i64 = 10;
pub const MAX_RECORDS_PER_PAGE: i64 = 50;

/// Response header carrying the pre-window total for paged listings.
pub const TOTAL_COUNT_HEADER: &str = "total-amount-of-records";

/// Windowing parameters for paged listings. Out-of-range values are
/// clamped, never rejected: `page < 1` behaves as page 1, and
/// `records_per_page` is bounded to 1..=50.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: i64,
    pub records_per_page: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, records_per_page: DEFAULT_RECORDS_PER_PAGE }
    }
}

impl Pagination {
    fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            records_per_page: self.records_per_page.clamp(1, MAX_RECORDS_PER_PAGE),
        }
    }

    pub fn offset(self) -> u64 {
        let p = self.clamped();
        ((p.page - 1) * p.records_per_page) as u64
    }

    pub fn limit(self) -> u64 {
        self.clamped().records_per_page as u64
    }
}

/// One page of a windowed listing plus the pre-window total.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Counts the selection, then applies the window. A page past the end
/// yields empty items rather than an error.
pub async fn paged<E, C>(select: Select<E>, pagination: Pagination, db: &C) -> AppResult<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let total = select.clone().count(db).await?;
    let items =
        select.offset(pagination.offset()).limit(pagination.limit()).all(db).await?;
    Ok(Page { items, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: i64, records_per_page: i64) -> Pagination {
        Pagination { page, records_per_page }
    }

    #[test]
    fn page_zero_behaves_as_page_one() {
        let p = pagination(0, 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 10);

        let negative = pagination(-3, 10);
        assert_eq!(negative.offset(), pagination(1, 10).offset());
    }

    #[test]
    fn records_per_page_is_bounded() {
        assert_eq!(pagination(1, 500).limit(), MAX_RECORDS_PER_PAGE as u64);
        assert_eq!(pagination(1, 0).limit(), 1);
        assert_eq!(pagination(1, -7).limit(), 1);
    }

    #[test]
    fn offset_is_zero_based_window_start() {
        assert_eq!(pagination(1, 10).offset(), 0);
        assert_eq!(pagination(2, 10).offset(), 10);
        assert_eq!(pagination(3, 7).offset(), 14);
        // Oversized page size clamps before the window is computed.
        assert_eq!(pagination(2, 500).offset(), MAX_RECORDS_PER_PAGE as u64);
    }

    #[test]
    fn defaults() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.records_per_page, DEFAULT_RECORDS_PER_PAGE);
    }
}
