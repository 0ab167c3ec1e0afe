//! Common types

use serde::{Deserialize, Serialize};

/// Limit/offset pagination parameters for session listings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: super::constants::DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Clamps the limit to the allowed maximum and the offset to zero or above.
    pub fn clamped(self) -> Self {
        Self {
            limit: self.limit.clamp(1, super::constants::MAX_PAGE_SIZE),
            offset: self.offset.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_clamps_oversized_limit() {
        let p = Pagination { limit: 5000, offset: -3 }.clamped();
        assert_eq!(p.limit, 200);
        assert_eq!(p.offset, 0);
    }
}
