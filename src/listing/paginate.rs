use serde::Serialize;

/// 一页的内容及分页信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    /// 请求的页码（从 1 开始），越界时不做修正
    pub page: usize,
    pub page_size: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> PageResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
            page: self.page,
            page_size: self.page_size,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }
}

/// 计算总页数，`page_size` 为 0 时返回 0
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// 截取第 `page` 页（从 1 开始）。
///
/// 越界的页码返回空切片而不是报错；筛选条件变化后由调用方把页码重置为 1。
/// 页码为 0 同样返回空切片，`has_next_page` 仍按 `page < total_pages` 计算。
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> PageResult<T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);

    let visible = match page.checked_sub(1) {
        Some(index) if page_size > 0 => {
            let start = index.saturating_mul(page_size).min(total_items);
            let end = start.saturating_add(page_size).min(total_items);
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    PageResult {
        items: visible,
        total_items,
        total_pages,
        page,
        page_size,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
    }
}
