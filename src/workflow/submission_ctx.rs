//! 表单提交上下文
//!
//! 封装"我正在提交哪一份表单"这一信息

use chrono::{DateTime, Utc};
use std::fmt::Display;

/// 表单提交上下文
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 表单索引（仅用于日志显示）
    pub form_index: usize,

    /// 作品标题
    pub title: String,

    /// 提交时间，写入主记录的 `fecha_envio`
    pub sent_at: DateTime<Utc>,
}

impl SubmissionCtx {
    pub fn new(form_index: usize, title: impl Into<String>) -> Self {
        Self {
            form_index,
            title: title.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn with_sent_at(mut self, sent_at: DateTime<Utc>) -> Self {
        self.sent_at = sent_at;
        self
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[表单 #{} 《{}》]", self.form_index, self.title)
    }
}
