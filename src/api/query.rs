use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    content::{Category, CategoryCount, ContentItem, ContentStore, SeoMeta},
    error::{Error, Result},
    listing::{FilterCriteria, ViewModel, apply_filters, paginate},
    state::{AppState, ListingOptions},
};

/// 配置文章相关路由。
///
/// 路由包括：
/// - `GET /articles`：文章列表，支持筛选和分页
/// - `GET /articles/{slug}`：获取单篇文章
/// - `GET /tags`：获取所有标签
/// - `GET /categories`：获取所有分类
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/articles", get(articles_list))
        .route("/articles/{slug}", get(article))
        .route("/tags", get(tag_list))
        .route("/categories", get(category_list))
}

/// 文章元信息，用于列表展示。
#[derive(Debug, Serialize)]
pub struct ArticleMeta {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub read_time: u32,
    pub published_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&ContentItem> for ArticleMeta {
    fn from(item: &ContentItem) -> Self {
        Self {
            slug: item.slug.clone(),
            title: item.title.clone(),
            excerpt: item.excerpt.clone(),
            author: item.author.clone(),
            category: item.category,
            tags: item.tags.clone(),
            read_time: item.read_time,
            published_at: item.published_at,
            updated_at: item.updated_at,
        }
    }
}

/// 完整文章，包括元信息、正文和相关文章。
#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    meta: ArticleMeta,

    content: String,
    seo: SeoMeta,
    related: Vec<ArticleMeta>,
}

/// 查询参数，用于文章列表分页和筛选。
///
/// 无法识别的值按未设置处理；同名参数重复出现时只取第一个。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    category: Vec<String>,
    tag: Vec<String>,
    search: Vec<String>,
    page: Vec<String>,
}

fn first_non_blank(values: &[String]) -> Option<&str> {
    values.first().map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl QueryParams {
    fn criteria(&self) -> FilterCriteria {
        let category = first_non_blank(&self.category).and_then(|c| match c.parse::<Category>() {
            Ok(category) => Some(category),
            Err(e) => {
                tracing::debug!(%e, "category ignored");
                None
            }
        });

        FilterCriteria {
            category,
            tag: first_non_blank(&self.tag).map(str::to_string),
            search: self.search.first().cloned(),
        }
    }

    /// 纯数字但超出范围的页码按 `usize::MAX` 处理，其余无法解析的值视为第 1 页
    fn page(&self) -> usize {
        let Some(page) = first_non_blank(&self.page) else {
            return 1;
        };

        match page.parse() {
            Ok(page) => page,
            Err(_) if page.bytes().all(|b| b.is_ascii_digit()) => usize::MAX,
            Err(_) => 1,
        }
    }
}

/// 获取文章列表。
///
/// 返回 [`ViewModel`]，包含当前页的 [`ArticleMeta`] 和分页信息。
async fn articles_list(
    Query(params): Query<QueryParams>,
    State(store): State<ContentStore>,
    State(options): State<ListingOptions>,
) -> Json<ViewModel<ArticleMeta>> {
    let criteria = params.criteria();
    let filtered = apply_filters(store.all_items(), &criteria, options.search_policy);
    let page = paginate(&filtered, options.page_size, params.page()).map(ArticleMeta::from);

    Json(ViewModel::assemble(page, &criteria))
}

/// 根据 slug 获取单篇文章。
///
/// 返回 [`ArticleDetail`]，如果文章不存在或未发布返回 [`Error::NotFound`]。
async fn article(
    Path(slug): Path<String>,
    State(store): State<ContentStore>,
    State(options): State<ListingOptions>,
) -> Result<Json<ArticleDetail>> {
    let item = store.get(&slug).ok_or(Error::NotFound)?;

    Ok(Json(ArticleDetail {
        meta: ArticleMeta::from(item),
        content: item.content.clone(),
        seo: item.seo.clone(),
        related: store
            .related(&slug, options.related_limit)
            .into_iter()
            .map(ArticleMeta::from)
            .collect(),
    }))
}

/// 获取所有文章标签。
async fn tag_list(State(store): State<ContentStore>) -> Json<Vec<String>> {
    Json(store.tags().into_iter().map(str::to_string).collect())
}

/// 获取所有文章分类及文章数。
async fn category_list(State(store): State<ContentStore>) -> Json<Vec<CategoryCount>> {
    Json(store.categories())
}
