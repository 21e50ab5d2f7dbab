use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    content::ContentStore,
    leads::{LeadGateway, SimulatedGateway},
    listing::SearchPolicy,
};

/// 列表相关配置
#[derive(Debug, Clone, Copy)]
pub struct ListingOptions {
    pub page_size: usize,
    pub search_policy: SearchPolicy,
    pub related_limit: usize,
}

/// 应用程序上下文
///
/// [`AppState`] 封装了内容库、列表配置和线索投递接口，提供统一访问入口。
#[derive(Clone, FromRef)]
pub struct AppState {
    store: ContentStore,
    options: ListingOptions,
    gateway: Arc<dyn LeadGateway>,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(store: ContentStore, config: &Config) -> Self {
        Self {
            store,
            options: ListingOptions {
                page_size: config.page_size,
                search_policy: config.search_policy,
                related_limit: config.related_limit,
            },
            gateway: Arc::new(SimulatedGateway::new(config.lead_delay())),
        }
    }

    /// 替换线索投递接口，默认使用 [`SimulatedGateway`]
    pub fn with_gateway(mut self, gateway: impl LeadGateway + 'static) -> Self {
        self.gateway = Arc::new(gateway);
        self
    }
}
