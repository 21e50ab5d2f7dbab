use std::{future::Future, pin::Pin, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 联系表单提交的原始数据
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    /// 感兴趣的服务，例如 "SEO"
    pub service: Option<String>,
    pub message: String,
}

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// 通过校验的线索
#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (7..=20).contains(&digits)
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

impl ContactForm {
    /// 校验所有字段，一次性返回全部错误
    pub fn validate(self) -> Result<Lead> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.chars().count() < 2 {
            errors.push(FieldError {
                field: "name",
                message: "Name must be at least 2 characters",
            });
        }

        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.push(FieldError {
                field: "email",
                message: "Please enter a valid email address",
            });
        }

        let phone = non_blank(self.phone);
        if phone.as_deref().is_some_and(|p| !is_valid_phone(p)) {
            errors.push(FieldError {
                field: "phone",
                message: "Please enter a valid phone number",
            });
        }

        let message = self.message.trim().to_string();
        if message.chars().count() < 10 {
            errors.push(FieldError {
                field: "message",
                message: "Message must be at least 10 characters",
            });
        }

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        Ok(Lead {
            name,
            email,
            company: non_blank(self.company),
            phone,
            service: non_blank(self.service),
            message,
            received_at: Utc::now(),
        })
    }
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// 线索投递接口，可替换为真实的 CRM 或邮件后端
///
/// 以 `Arc<dyn LeadGateway>` 的形式存放在应用状态中。
pub trait LeadGateway: Send + Sync {
    fn submit<'a>(&'a self, lead: &'a Lead) -> BoxFuture<'a, Result<()>>;
}

/// 模拟投递：等待固定时长后写日志，不做持久化
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl LeadGateway for SimulatedGateway {
    fn submit<'a>(&'a self, lead: &'a Lead) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            tracing::info!(
                name = %lead.name,
                email = %lead.email,
                service = ?lead.service,
                "lead received"
            );
            Ok(())
        })
    }
}
