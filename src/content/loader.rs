use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::{Category, ContentItem, SeoMeta};
use crate::error::{Error, Result};

/// 阅读速度（词/分钟），用于估算阅读时间
const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Deserialize)]
struct FrontMatter {
    id: Option<String>,
    title: String,
    excerpt: String,
    author: String,
    #[serde(deserialize_with = "parse_timestamp")]
    published_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "parse_optional_timestamp")]
    updated_at: Option<DateTime<Utc>>,
    category: Category,
    #[serde(default)]
    tags: Vec<String>,
    read_time: Option<u32>,
    #[serde(default)]
    seo: SeoMeta,
    #[serde(default = "published_default")]
    published: bool,
}

fn published_default() -> bool {
    true
}

pub struct NoContent;
pub struct Content(String);

/// 由 Markdown 文件构建 [`ContentItem`]。
///
/// slug 取自文件名（去掉扩展名），其余字段来自 YAML Front Matter。
pub struct ItemBuilder<T> {
    path: PathBuf,
    slug: String,
    content: T,
}

impl ItemBuilder<NoContent> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            slug,
            content: NoContent,
        }
    }

    pub fn content(self, md_content: impl Into<String>) -> ItemBuilder<Content> {
        ItemBuilder {
            path: self.path,
            slug: self.slug,
            content: Content(md_content.into()),
        }
    }
}

impl ItemBuilder<Content> {
    /// 从原始 Markdown 内容中提取 Front Matter 字符串和正文。
    fn extract_front_matter_and_body(&self) -> Result<(&str, &str)> {
        const DELIM: &str = "---";

        let content = self.content.0.trim_start();

        let Some(rest) = content.strip_prefix(DELIM) else {
            return Err(self.front_matter_error("missing required YAML front matter"));
        };

        let end_pos = rest.find(&format!("\n{DELIM}")).ok_or_else(|| {
            self.front_matter_error("front matter does not terminate with expected delimiter ---")
        })?;

        let yaml_str = &rest[..end_pos];
        let body_str = rest[end_pos + 1 + DELIM.len()..].trim_start();

        Ok((yaml_str.trim(), body_str))
    }

    fn front_matter_error(&self, reason: &'static str) -> Error {
        Error::FrontMatter {
            path: self.path.clone(),
            reason,
        }
    }

    pub fn build(self) -> Result<ContentItem> {
        let (yaml_str, body) = self.extract_front_matter_and_body()?;

        let fm: FrontMatter = serde_yaml::from_str(yaml_str).map_err(|source| Error::Yaml {
            path: self.path.clone(),
            source,
        })?;

        if self.slug.is_empty() {
            return Err(self.front_matter_error("file name does not yield a slug"));
        }

        let read_time = fm.read_time.unwrap_or_else(|| estimate_read_time(body));
        let body = body.to_string();

        Ok(ContentItem {
            id: fm.id.unwrap_or_else(|| self.slug.clone()),
            slug: self.slug,
            title: fm.title,
            excerpt: fm.excerpt,
            content: body,
            author: fm.author,
            published_at: fm.published_at,
            updated_at: fm.updated_at,
            category: fm.category,
            tags: fm.tags,
            read_time,
            seo: fm.seo,
            published: fm.published,
        })
    }
}

fn estimate_read_time(body: &str) -> u32 {
    let words = body.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// 加载目录下所有 `.md` 文件。
///
/// 返回顺序为发布时间倒序，发布时间相同时按 slug 升序。
pub fn load_dir(dir: impl AsRef<Path>) -> Result<Vec<ContentItem>> {
    let dir = dir.as_ref();

    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"));
    paths.sort();

    let mut items = Vec::with_capacity(paths.len());
    for path in paths {
        let md = fs::read_to_string(&path)?;
        let item = ItemBuilder::new(&path).content(md).build()?;
        tracing::debug!(slug = %item.slug, published = item.published, "content loaded");
        items.push(item);
    }

    items.sort_by(|a, b| {
        b.published_at
            .cmp(&a.published_at)
            .then_with(|| a.slug.cmp(&b.slug))
    });

    Ok(items)
}

fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive_dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive_dt| naive_dt.and_utc())
}

fn parse_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_datetime_str(s.trim())
        .ok_or_else(|| serde::de::Error::custom(format!("cannot parse timestamp: {}", s)))
}

fn parse_optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_datetime_str(s.trim())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("cannot parse timestamp: {}", s))),
        None => Ok(None),
    }
}
