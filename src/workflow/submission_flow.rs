//! 表单提交流程 - 流程层
//!
//! 核心职责：定义"一份表单"的完整提交流程
//!
//! 流程顺序：
//! 1. 提交前校验（任何网络请求之前）
//! 2. 构建三个批次：主记录 / 国际展映 / 其他标题
//! 3. 三个批次并发提交，各自独立结束
//! 4. 主批次失败 → 整体失败；次要批次失败 → 只给出警告

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::SubmissionTransport;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::models::form::WorkForm;
use crate::models::record::BatchKind;
use crate::services::{
    collect_alternate_titles, collect_exhibition_records, expand_records, validate_form, Banner,
    FeedbackSurface,
};
use crate::workflow::submission_ctx::SubmissionCtx;

/// 校验失败对话框标题
pub const VALIDATION_DIALOG_TITLE: &str = "No se puede enviar el formulario";
/// 成功提示
pub const SUCCESS_MESSAGE: &str = "¡Datos enviados correctamente!";

/// 单个批次的提交结果
#[derive(Debug)]
pub enum BatchStatus {
    /// 已提交的行数
    Sent(usize),
    /// 批次为空，未提交
    Skipped,
    Failed(AppError),
}

/// 表单提交结果
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// 校验未通过，没有发出任何请求
    Rejected { errors: Vec<ValidationError> },
    /// 主批次失败
    Failed { error: AppError },
    /// 主批次成功，次要批次的失败记录为警告
    Submitted { rows: usize, warnings: Vec<String> },
}

impl SubmissionOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionOutcome::Submitted { .. })
    }

    /// 转换为 Result，成功时返回主批次行数
    pub fn into_result(self) -> AppResult<usize> {
        match self {
            SubmissionOutcome::Submitted { rows, .. } => Ok(rows),
            SubmissionOutcome::Rejected { errors } => Err(AppError::Validation(errors)),
            SubmissionOutcome::Failed { error } => Err(error),
        }
    }
}

/// 表单提交流程
///
/// - 编排校验与提交的先后顺序
/// - 不持有表单状态
/// - 只依赖提交通道和反馈界面
#[derive(Clone)]
pub struct SubmissionFlow {
    transport: Arc<dyn SubmissionTransport>,
    config: Config,
}

impl SubmissionFlow {
    /// 创建新的提交流程
    pub fn new(config: &Config, transport: Arc<dyn SubmissionTransport>) -> Self {
        Self {
            transport,
            config: config.clone(),
        }
    }

    pub async fn run(
        &self,
        form: &WorkForm,
        ctx: &SubmissionCtx,
        feedback: &dyn FeedbackSurface,
    ) -> SubmissionOutcome {
        // ========== 1. 提交前校验 ==========
        let errors = validate_form(form);
        if !errors.is_empty() {
            warn!("{} ⚠️ 表单校验未通过: {} 个问题", ctx, errors.len());
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            feedback.show_errors(VALIDATION_DIALOG_TITLE, &messages);
            return SubmissionOutcome::Rejected { errors };
        }

        // ========== 2. 构建批次 ==========
        let records = expand_records(form, ctx.sent_at);
        let exhibitions = collect_exhibition_records(form);
        let alternate_titles = collect_alternate_titles(form);

        info!(
            "{} 📦 主记录 {} 行, 国际展映 {} 行, 其他标题 {} 行",
            ctx,
            records.len(),
            exhibitions.len(),
            alternate_titles.len()
        );

        // ========== 3. 并发提交 ==========
        let (primary, exhibitions, alternate_titles) = futures::join!(
            self.send_batch(BatchKind::Primary, &records, ctx),
            self.send_batch(BatchKind::Exhibitions, &exhibitions, ctx),
            self.send_batch(BatchKind::AlternateTitles, &alternate_titles, ctx),
        );

        // ========== 4. 汇总结果 ==========
        let rows = match primary {
            BatchStatus::Sent(rows) => rows,
            BatchStatus::Failed(error) => {
                error!("{} ❌ 主批次提交失败: {}", ctx, error);
                feedback.show_banner(&Banner::error(format!(
                    "Error al enviar los datos: {}",
                    error
                )));
                return SubmissionOutcome::Failed { error };
            }
            // 主记录至少有一行，不会出现
            BatchStatus::Skipped => 0,
        };

        feedback.show_banner(&Banner::success(SUCCESS_MESSAGE));

        let mut warnings = Vec::new();
        for (kind, status) in [
            (BatchKind::Exhibitions, exhibitions),
            (BatchKind::AlternateTitles, alternate_titles),
        ] {
            if let BatchStatus::Failed(error) = status {
                warn!("{} ⚠️ {}批次提交失败: {}", ctx, kind, error);
                let message = format!("No se pudo enviar el lote de {}: {}", kind.label(), error);
                feedback.show_banner(&Banner::warning(message.clone()));
                warnings.push(message);
            }
        }

        info!("{} ✓ 提交完成，主记录 {} 行", ctx, rows);
        SubmissionOutcome::Submitted { rows, warnings }
    }

    /// 提交一个批次，空批次直接跳过
    async fn send_batch<T: Serialize>(
        &self,
        kind: BatchKind,
        rows: &[T],
        ctx: &SubmissionCtx,
    ) -> BatchStatus {
        if rows.is_empty() {
            return BatchStatus::Skipped;
        }

        match self.try_send_batch(kind, rows).await {
            Ok(()) => {
                info!("{} ✓ {}批次提交成功 ({} 行)", ctx, kind, rows.len());
                BatchStatus::Sent(rows.len())
            }
            Err(error) => BatchStatus::Failed(error),
        }
    }

    async fn try_send_batch<T: Serialize>(&self, kind: BatchKind, rows: &[T]) -> AppResult<()> {
        let endpoint = self.config.endpoint(kind);
        if endpoint.trim().is_empty() {
            return Err(AppError::Config(ConfigError::MissingEndpoint {
                name: kind.name().to_string(),
            }));
        }

        let batch: JsonValue = serde_json::to_value(rows)?;
        let response = self.transport.submit(endpoint, &batch).await?;

        if !response.ok {
            return Err(AppError::bad_response(
                endpoint,
                response.status,
                response.error_message(),
            ));
        }

        Ok(())
    }
}
