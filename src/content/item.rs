use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 文章分类，取值范围固定。
///
/// 序列化为展示名（例如 `"Social Media"`），匹配时区分大小写。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "SEO")]
    Seo,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Content Marketing")]
    ContentMarketing,
    #[serde(rename = "PPC")]
    Ppc,
    #[serde(rename = "Web Design")]
    WebDesign,
    #[serde(rename = "Email Marketing")]
    EmailMarketing,
    #[serde(rename = "Analytics")]
    Analytics,
}

impl Category {
    /// 全部分类，按展示顺序排列
    pub const ALL: [Category; 7] = [
        Category::Seo,
        Category::SocialMedia,
        Category::ContentMarketing,
        Category::Ppc,
        Category::WebDesign,
        Category::EmailMarketing,
        Category::Analytics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Seo => "SEO",
            Category::SocialMedia => "Social Media",
            Category::ContentMarketing => "Content Marketing",
            Category::Ppc => "PPC",
            Category::WebDesign => "Web Design",
            Category::EmailMarketing => "Email Marketing",
            Category::Analytics => "Analytics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// 精确匹配展示名，不做大小写归一
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// SEO 元信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoMeta {
    /// 覆盖页面标题，缺省时使用文章标题
    pub title: Option<String>,
    pub description: String,
    pub keywords: Vec<String>,
    /// 社交分享图路径
    pub og_image: Option<String>,
}

/// 一篇可发布的文章。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Markdown 正文
    pub content: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub category: Category,
    pub tags: Vec<String>,
    /// 预计阅读时间（分钟）
    pub read_time: u32,
    pub seo: SeoMeta,
    pub published: bool,
}

impl ContentItem {
    /// 列表展示时的 SEO 标题
    pub fn seo_title(&self) -> &str {
        self.seo.title.as_deref().unwrap_or(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str_is_exact() {
        assert_eq!("SEO".parse::<Category>(), Ok(Category::Seo));
        assert_eq!(
            "Social Media".parse::<Category>(),
            Ok(Category::SocialMedia)
        );
        assert!("seo".parse::<Category>().is_err());
        assert!("Social media".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_display_name() {
        let json = serde_json::to_string(&Category::ContentMarketing).unwrap();
        assert_eq!(json, "\"Content Marketing\"");

        let parsed: Category = serde_yaml::from_str("Web Design").unwrap();
        assert_eq!(parsed, Category::WebDesign);

        for c in Category::ALL {
            assert_eq!(c.to_string().parse::<Category>(), Ok(c));
        }
    }
}
