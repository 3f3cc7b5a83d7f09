//! 用户反馈 - 业务能力层
//!
//! 只负责"把结果告诉用户"，不关心流程

use tracing::{error, info, warn};

/// 提示条类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

/// 非阻塞的状态提示条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// 反馈界面
pub trait FeedbackSurface: Send + Sync {
    /// 阻塞式错误对话框，一次列出全部错误
    fn show_errors(&self, title: &str, messages: &[String]);

    /// 非阻塞提示条
    fn show_banner(&self, banner: &Banner);
}

/// 输出到日志的反馈界面
#[derive(Debug, Clone, Default)]
pub struct ConsoleFeedback {
    /// 日志前缀，例如 "[表单 3]"
    prefix: String,
}

impl ConsoleFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl FeedbackSurface for ConsoleFeedback {
    fn show_errors(&self, title: &str, messages: &[String]) {
        error!("{} ❌ {}", self.prefix, title);
        for message in messages {
            error!("{}    • {}", self.prefix, message);
        }
    }

    fn show_banner(&self, banner: &Banner) {
        match banner.kind {
            BannerKind::Success => info!("{} ✅ {}", self.prefix, banner.message),
            BannerKind::Warning => warn!("{} ⚠️ {}", self.prefix, banner.message),
            BannerKind::Error => error!("{} ❌ {}", self.prefix, banner.message),
        }
    }
}
