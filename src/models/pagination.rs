use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Clamps the requested page into `page >= 1` and `1 <= limit <= max_limit`.
    pub fn resolve(&self, default_limit: u64, max_limit: u64) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, max_limit);
        (page, limit)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        Self {
            data,
            meta: PageMeta {
                total,
                page,
                limit,
                total_pages: total.div_ceil(limit.max(1)),
            },
        }
    }

    /// Documents to skip before `page`. Capped at `i64::MAX`, the largest
    /// skip MongoDB accepts.
    pub fn skip(page: u64, limit: u64) -> u64 {
        page.saturating_sub(1)
            .saturating_mul(limit)
            .min(i64::MAX as u64)
    }
}
