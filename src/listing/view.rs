use serde::Serialize;

use super::{FilterCriteria, PageResult};

/// 列表页面渲染所需的全部数据
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel<T> {
    #[serde(flatten)]
    pub page: PageResult<T>,
    pub filters: FilterCriteria,
    /// 例如 `Showing 2 of 6 articles, filtered by category "SEO"`
    pub summary: String,
    /// 例如 `Page 2 of 3`；没有结果或页码为 0 时为 `None`。
    /// 越界页码按原样显示，例如 `Page 5 of 2`
    pub page_label: Option<String>,
    pub show_clear_filters: bool,
}

impl<T> ViewModel<T> {
    pub fn assemble(page: PageResult<T>, criteria: &FilterCriteria) -> Self {
        let noun = if page.total_items == 1 {
            "article"
        } else {
            "articles"
        };
        let mut summary = format!("Showing {} of {} {}", page.items.len(), page.total_items, noun);

        let mut active = Vec::new();
        if let Some(category) = criteria.category {
            active.push(format!("category \"{category}\""));
        }
        if let Some(tag) = &criteria.tag {
            active.push(format!("tag \"{tag}\""));
        }
        if let Some(search) = criteria.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            active.push(format!("search \"{search}\""));
        }
        if !active.is_empty() {
            summary.push_str(", filtered by ");
            summary.push_str(&active.join(", "));
        }

        let page_label = (page.total_pages > 0 && page.page > 0)
            .then(|| format!("Page {} of {}", page.page, page.total_pages));

        Self {
            page,
            filters: criteria.clone(),
            summary,
            page_label,
            show_clear_filters: criteria.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::Category, listing::paginate};

    #[test]
    fn test_unfiltered_summary() {
        let items: Vec<u32> = (1..=6).collect();
        let view = ViewModel::assemble(paginate(&items, 2, 1), &FilterCriteria::default());

        assert_eq!(view.summary, "Showing 2 of 6 articles");
        assert_eq!(view.page_label.as_deref(), Some("Page 1 of 3"));
        assert!(!view.show_clear_filters);
    }

    #[test]
    fn test_filtered_summary_lists_active_filters() {
        let items: Vec<u32> = vec![1];
        let criteria = FilterCriteria::default()
            .with_category(Category::SocialMedia)
            .with_tag("instagram")
            .with_search("  reels ");
        let view = ViewModel::assemble(paginate(&items, 6, 1), &criteria);

        assert_eq!(
            view.summary,
            "Showing 1 of 1 article, filtered by category \"Social Media\", tag \"instagram\", search \"reels\""
        );
        assert!(view.show_clear_filters);
    }

    #[test]
    fn test_blank_search_does_not_show_clear() {
        let criteria = FilterCriteria::default().with_search("   ");
        let view = ViewModel::assemble(paginate::<u32>(&[], 6, 1), &criteria);

        assert_eq!(view.summary, "Showing 0 of 0 articles");
        assert!(view.page_label.is_none());
        assert!(!view.show_clear_filters);
    }

    #[test]
    fn test_page_zero_has_no_label() {
        let items: Vec<u32> = (1..=3).collect();
        let view = ViewModel::assemble(paginate(&items, 6, 0), &FilterCriteria::default());

        assert!(view.page.items.is_empty());
        assert!(view.page_label.is_none());
        assert_eq!(view.summary, "Showing 0 of 3 articles");
    }

    #[test]
    fn test_out_of_range_page_label_not_clamped() {
        let items: Vec<u32> = (1..=3).collect();
        let view = ViewModel::assemble(paginate(&items, 2, 5), &FilterCriteria::default());

        assert_eq!(view.page_label.as_deref(), Some("Page 5 of 2"));
    }

    #[test]
    fn test_serialize_flattens_page() {
        let items: Vec<u32> = (1..=3).collect();
        let view = ViewModel::assemble(paginate(&items, 2, 2), &FilterCriteria::default());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["items"], serde_json::json!([3]));
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["has_previous_page"], true);
        assert_eq!(json["show_clear_filters"], false);
        assert!(json["filters"]["category"].is_null());
    }
}
