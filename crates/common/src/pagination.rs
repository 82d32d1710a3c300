//! Pagination helpers shared by list and filter endpoints.
//!
//! Clients send `limit` and a 1-based `pageNumber`; repositories want an
//! offset and a row count.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Highest page a client may ask for.
pub const MAX_PAGE_NUMBER: u64 = 1_000_000;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    pub page_number: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    pub fn new(limit: Option<u64>, page_number: Option<u64>) -> Self {
        Self {
            page_number: page_number.unwrap_or(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
        .normalized()
    }

    /// Clamp `limit` into `1..=100` and `page_number` into `1..=MAX_PAGE_NUMBER`.
    pub fn normalized(self) -> Self {
        Self {
            page_number: self.page_number.clamp(1, MAX_PAGE_NUMBER),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        let p = self.normalized();
        p.limit.saturating_mul(p.page_number - 1)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page_number: 1, limit: DEFAULT_LIMIT } }
}

#[cfg(test)]
mod tests {
    use super::{Pagination, MAX_LIMIT, MAX_PAGE_NUMBER};

    #[test]
    fn first_page_starts_at_zero() {
        let p = Pagination::new(Some(10), Some(1));
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn second_page_skips_one_limit() {
        assert_eq!(Pagination::new(Some(10), Some(2)).offset(), 10);
        assert_eq!(Pagination::new(Some(25), Some(3)).offset(), 50);
    }

    #[test]
    fn clamps_zero_and_upper_bound() {
        let p = Pagination::new(Some(0), Some(0));
        assert_eq!(p, Pagination { page_number: 1, limit: 1 });
        assert_eq!(Pagination::new(Some(1000), None).limit, 100);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let p = Pagination { page_number: u64::MAX, limit: MAX_LIMIT };
        assert_eq!(p.offset(), MAX_LIMIT * (MAX_PAGE_NUMBER - 1));
        assert_eq!(Pagination::new(Some(100), Some(i64::MAX as u64)).page_number, MAX_PAGE_NUMBER);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::new(None, None);
        assert_eq!(d, Pagination::default());
        assert_eq!(d.limit, 10);
        assert_eq!(d.page_number, 1);
    }
}
