use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::{Category, ContentItem};

/// 用户选择的筛选条件，每一项独立可选，缺省表示该维度不做约束。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// 归一后的搜索词：去掉首尾空白并转小写，空串视为未设置
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// 是否有任何筛选条件生效
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.tag.is_some() || self.search_term().is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// 搜索词与分类/标签条件同时存在时的组合方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPolicy {
    /// 先按分类、标签过滤，再用搜索词进一步收窄
    #[default]
    Compose,
    /// 存在搜索词时忽略分类和标签条件
    Bypass,
}

impl FromStr for SearchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compose" => Ok(SearchPolicy::Compose),
            "bypass" => Ok(SearchPolicy::Bypass),
            other => Err(format!("unknown search policy: {other}")),
        }
    }
}

fn matches_search(item: &ContentItem, term: &str) -> bool {
    item.title.to_lowercase().contains(term)
        || item.excerpt.to_lowercase().contains(term)
        || item.tags.iter().any(|t| t.to_lowercase().contains(term))
}

fn matches_gates(item: &ContentItem, criteria: &FilterCriteria) -> bool {
    if let Some(category) = criteria.category {
        if item.category != category {
            return false;
        }
    }

    if let Some(tag) = &criteria.tag {
        if !item.tags.iter().any(|t| t == tag) {
            return false;
        }
    }

    true
}

/// 按条件过滤，保持原有相对顺序。
///
/// 未发布的条目始终被排除。分类和标签为精确匹配；搜索词对标题、摘要和标签做
/// 不区分大小写的子串匹配。
pub fn apply_filters<'a>(
    items: &'a [ContentItem],
    criteria: &FilterCriteria,
    policy: SearchPolicy,
) -> Vec<&'a ContentItem> {
    let term = criteria.search_term();

    items
        .iter()
        .filter(|item| item.published)
        .filter(|item| match (&term, policy) {
            (Some(term), SearchPolicy::Bypass) => matches_search(item, term),
            (Some(term), SearchPolicy::Compose) => {
                matches_gates(item, criteria) && matches_search(item, term)
            }
            (None, _) => matches_gates(item, criteria),
        })
        .collect()
}
