/// Pagination control under the user list
use directory_core::page_count;

/// Pages shown without gaps up to this many
const MAX_CONTIGUOUS: u64 = 7;

/// One slot of the page selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u64),
    Gap,
}

/// Page numbers to offer around `current`.
///
/// Short ranges are listed in full. Longer ones keep the first and last page
/// plus the neighbours of `current`, with gaps in between.
pub fn page_window(current: u64, pages: u64) -> Vec<PageItem> {
    if pages <= MAX_CONTIGUOUS {
        return (1..=pages).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, pages);
    let mut shown = vec![1, current.saturating_sub(1).max(1), current, (current + 1).min(pages), pages];
    shown.sort_unstable();
    shown.dedup();

    let mut items = Vec::with_capacity(shown.len() * 2);
    let mut previous = 0;
    for page in shown {
        if page > previous + 1 {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page(page));
        previous = page;
    }
    items
}

/// `None` when everything fits on one page
pub fn render_pagination(current: u32, total: u64, limit: u32) -> Option<String> {
    let pages = page_count(total, limit);
    if pages <= 1 {
        return None;
    }

    let current = u64::from(current).clamp(1, pages);
    let limit = u64::from(limit);
    let first = (current - 1) * limit + 1;
    let last = (current * limit).min(total);

    let mut controls = Vec::new();
    if current > 1 {
        controls.push("< Previous".to_string());
    }
    for item in page_window(current, pages) {
        controls.push(match item {
            PageItem::Page(page) if page == current => format!("[{}]", page),
            PageItem::Page(page) => page.to_string(),
            PageItem::Gap => "...".to_string(),
        });
    }
    if current < pages {
        controls.push("Next >".to_string());
    }

    Some(format!(
        "Showing {} to {} of {} users\n{}",
        first,
        last,
        total,
        controls.join(" ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Gap, Page};

    #[test]
    fn test_short_range_lists_every_page() {
        assert_eq!(page_window(2, 4), vec![Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn test_long_range_has_gaps() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]
        );
        assert_eq!(page_window(1, 10), vec![Page(1), Page(2), Gap, Page(10)]);
        assert_eq!(page_window(10, 10), vec![Page(1), Gap, Page(9), Page(10)]);
    }

    #[test]
    fn test_single_page_has_no_control() {
        assert_eq!(render_pagination(1, 12, 12), None);
        assert_eq!(render_pagination(1, 0, 12), None);
    }

    #[test]
    fn test_render_middle_page() {
        let control = render_pagination(2, 45, 12).unwrap();
        assert_eq!(
            control,
            "Showing 13 to 24 of 45 users\n< Previous 1 [2] 3 4 Next >"
        );
    }

    #[test]
    fn test_render_last_page() {
        let control = render_pagination(4, 45, 12).unwrap();
        assert!(control.starts_with("Showing 37 to 45 of 45 users"));
        assert!(control.ends_with("[4]"));
    }
}
