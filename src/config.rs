use std::{env, fs, path::PathBuf, time::Duration};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    listing::SearchPolicy,
};

/// 运行配置
///
/// 先读取 `INKWELL_CONFIG` 指向的 TOML 文件（可选），再由环境变量覆盖：
///
/// - `CONTENT_DIR`：文章目录，默认 `content`
/// - `LISTEN_ADDR`：监听地址，默认 `0.0.0.0:3000`
/// - `PAGE_SIZE`：每页文章数，默认 6
/// - `SEARCH_POLICY`：`compose` 或 `bypass`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content_dir: PathBuf,
    pub listen_addr: String,
    pub page_size: usize,
    pub search_policy: SearchPolicy,
    pub related_limit: usize,
    /// 模拟提交线索的延迟（毫秒）
    pub lead_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            listen_addr: "0.0.0.0:3000".to_string(),
            page_size: 6,
            search_policy: SearchPolicy::Compose,
            related_limit: 3,
            lead_delay_ms: 1000,
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(Into::into)
    }

    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("INKWELL_CONFIG") {
            Ok(path) => Self::from_toml(&fs::read_to_string(path)?)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(dir) = var("CONTENT_DIR") {
            self.content_dir = PathBuf::from(dir);
        }
        if let Some(addr) = var("LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(size) = var("PAGE_SIZE") {
            self.page_size = size
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PAGE_SIZE is not a number: {size}")))?;
        }
        if let Some(policy) = var("SEARCH_POLICY") {
            self.search_policy = policy.parse().map_err(Error::Config)?;
        }
        Ok(())
    }

    pub fn lead_delay(&self) -> Duration {
        Duration::from_millis(self.lead_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = Config::from_toml(
            r#"
            page_size = 9
            search_policy = "bypass"
            "#,
        )
        .unwrap();

        assert_eq!(config.page_size, 9);
        assert_eq!(config.search_policy, SearchPolicy::Bypass);
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.content_dir, PathBuf::from("content"));
    }

    #[test]
    fn test_env_overrides() {
        let vars = HashMap::from([
            ("CONTENT_DIR", "/srv/posts"),
            ("PAGE_SIZE", " 12 "),
            ("SEARCH_POLICY", "bypass"),
        ]);
        let mut config = Config::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.content_dir, PathBuf::from("/srv/posts"));
        assert_eq!(config.page_size, 12);
        assert_eq!(config.search_policy, SearchPolicy::Bypass);
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = Config::default();
        let result = config.apply_overrides(|k| (k == "PAGE_SIZE").then(|| "six".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));

        let result =
            config.apply_overrides(|k| (k == "SEARCH_POLICY").then(|| "fuzzy".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
