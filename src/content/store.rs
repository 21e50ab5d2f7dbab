use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    sync::Arc,
};

use serde::Serialize;

use super::{Category, ContentItem};
use crate::error::{Error, Result};

/// 分类及其已发布文章数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// 只读的内存内容库。
///
/// 加载后不可变，克隆只复制 [`Arc`] 引用。条目保持构造时的声明顺序。
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    items: Arc<[ContentItem]>,
}

impl ContentStore {
    /// 创建内容库，slug 重复时返回 [`Error::DuplicateSlug`]
    pub fn new(items: Vec<ContentItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.slug.as_str()) {
                return Err(Error::DuplicateSlug(item.slug.clone()));
            }
        }

        Ok(Self {
            items: items.into(),
        })
    }

    pub fn all_items(&self) -> &[ContentItem] {
        &self.items
    }

    fn published(&self) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(|item| item.published)
    }

    /// 根据 slug 获取已发布的文章
    pub fn get(&self, slug: &str) -> Option<&ContentItem> {
        self.published().find(|item| item.slug == slug)
    }

    /// 已发布文章中出现过的全部标签，去重并排序
    pub fn tags(&self) -> Vec<&str> {
        self.published()
            .flat_map(|item| item.tags.iter().map(String::as_str))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 各分类的已发布文章数，省略数量为零的分类
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts = BTreeMap::new();
        for item in self.published() {
            *counts.entry(item.category).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect()
    }

    /// 同分类的其他已发布文章，最多 `limit` 篇
    pub fn related(&self, slug: &str, limit: usize) -> Vec<&ContentItem> {
        let Some(current) = self.get(slug) else {
            return Vec::new();
        };

        self.published()
            .filter(|item| item.category == current.category && item.slug != current.slug)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::content::SeoMeta;

    pub(crate) fn item(slug: &str, category: Category, tags: &[&str]) -> ContentItem {
        ContentItem {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: format!("Title of {slug}"),
            excerpt: format!("Excerpt of {slug}"),
            content: String::new(),
            author: "Agency Team".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            read_time: 3,
            seo: SeoMeta::default(),
            published: true,
        }
    }

    fn sample_store() -> ContentStore {
        let mut draft = item("draft", Category::Seo, &["secret"]);
        draft.published = false;

        ContentStore::new(vec![
            item("a", Category::Seo, &["rust", "local"]),
            item("b", Category::Ppc, &["ads"]),
            draft,
            item("c", Category::Seo, &["local"]),
            item("d", Category::Seo, &[]),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let result = ContentStore::new(vec![
            item("same", Category::Seo, &[]),
            item("same", Category::Ppc, &[]),
        ]);
        assert!(matches!(result, Err(Error::DuplicateSlug(s)) if s == "same"));
    }

    #[test]
    fn test_all_items_keeps_declaration_order() {
        let store = sample_store();
        let slugs: Vec<_> = store.all_items().iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "draft", "c", "d"]);
    }

    #[test]
    fn test_get_skips_unpublished() {
        let store = sample_store();
        assert!(store.get("a").is_some());
        assert!(store.get("draft").is_none());
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_tags_are_distinct_sorted_published() {
        let store = sample_store();
        assert_eq!(store.tags(), vec!["ads", "local", "rust"]);
    }

    #[test]
    fn test_categories_count_published() {
        let store = sample_store();
        assert_eq!(
            store.categories(),
            vec![
                CategoryCount {
                    category: Category::Seo,
                    count: 3
                },
                CategoryCount {
                    category: Category::Ppc,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_related_same_category() {
        let store = sample_store();
        let related: Vec<_> = store.related("a", 5).iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(related, vec!["c", "d"]);

        let related: Vec<_> = store.related("a", 1).iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(related, vec!["c"]);

        assert!(store.related("b", 5).is_empty());
        assert!(store.related("draft", 5).is_empty());
    }

    #[test]
    fn test_empty_store() {
        let store = ContentStore::default();
        assert!(store.all_items().is_empty());
        assert!(store.tags().is_empty());
        assert!(store.categories().is_empty());
    }
}
