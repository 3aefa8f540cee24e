//! Page identifier type.

use std::fmt;

/// Identifies a virtual page.
///
/// A page number is an address divided by the configured page size
/// (see [`SimConfig::page_size`](crate::common::SimConfig)). Using `u64`
/// keeps the arithmetic trivial for any address the generator can produce.
///
/// In multi-process mode a `PageId` alone does not identify a frame: two
/// processes may hold the same page number as distinct physical frames, so
/// frame identity is the `(owner, page)` pair.
///
/// # Example
/// ```
/// use pagesim::PageId;
///
/// let page = PageId::from_address(47, 10);
/// assert_eq!(page, PageId::new(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl PageId {
    /// Create a new PageId from a raw page number.
    #[inline]
    pub fn new(id: u64) -> Self {
        PageId(id)
    }

    /// Derive the page number for an address under the given page size.
    #[inline]
    pub fn from_address(address: u64, page_size: u64) -> Self {
        PageId(address / page_size)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_new() {
        let pid = PageId::new(42);
        assert_eq!(pid.0, 42);
    }

    #[test]
    fn test_page_id_from_address() {
        assert_eq!(PageId::from_address(0, 10), PageId::new(0));
        assert_eq!(PageId::from_address(9, 10), PageId::new(0));
        assert_eq!(PageId::from_address(10, 10), PageId::new(1));
        assert_eq!(PageId::from_address(599, 10), PageId::new(59));
    }

    #[test]
    fn test_page_id_ordering() {
        assert!(PageId::new(1) < PageId::new(2));
        assert!(PageId::new(5) > PageId::new(3));
    }

    #[test]
    fn test_page_id_display() {
        assert_eq!(format!("{}", PageId::new(42)), "Page(42)");
    }
}
