/// Page/limit pair for the admin listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    limit: i64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    /// Missing values fall back to page 1 / `DEFAULT_LIMIT`; out of range
    /// values are clamped rather than rejected.
    pub fn new(
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn page(&self) -> i64 { self.page }

    pub fn limit(&self) -> i64 { self.limit }

    pub fn offset(&self) -> i64 { (self.page - 1).saturating_mul(self.limit) }

    /// ceil(total / limit)
    pub fn total_pages(
        &self,
        total: i64,
    ) -> i64 {
        (total.max(0) + self.limit - 1) / self.limit
    }
}
