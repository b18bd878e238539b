use crate::core::Page;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// `ceil(len / page_size)`, never less than 1. A zero page size is treated as 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = clamp_page(page, total_pages);

    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    tracing::debug!(
        "Paginating {} items: page {}/{} [{}..{})",
        items.len(),
        page,
        total_pages,
        start,
        end
    );

    Page {
        rows: items[start..end].to_vec(),
        page,
        page_size,
        total_pages,
        total_records: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(5, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn test_last_page_is_truncated() {
        let items: Vec<usize> = (0..25).collect();
        let page = paginate(&items, 3, 10);
        assert_eq!(page.rows, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_records, 25);
    }

    #[test]
    fn test_page_is_clamped() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 0, 10).page, 1);
        let past_end = paginate(&items, 99, 10);
        assert_eq!(past_end.page, 3);
        assert_eq!(past_end.rows.len(), 5);
    }

    #[test]
    fn test_empty_input_yields_one_empty_page() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, 4, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_pages_cover_sequence_exactly_once() {
        for len in [0usize, 1, 9, 10, 11, 25, 30] {
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, 10);
            let mut rebuilt = Vec::new();
            for n in 1..=pages {
                rebuilt.extend(paginate(&items, n, 10).rows);
            }
            assert_eq!(rebuilt, items, "len = {}", len);
        }
    }
}
