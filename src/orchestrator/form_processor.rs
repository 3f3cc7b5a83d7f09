//! 单个表单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单份申报表单，是表单级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **载入表单**：把 `WorkForm` 交给控制器
//! 2. **提交**：校验 + 三个批次并发提交
//! 3. **文件清理**：主批次成功后按配置删除表单文件
//! 4. **统计输出**：记录结果

use crate::config::Config;
use crate::error::AppError;
use crate::models::form::WorkForm;
use crate::orchestrator::controller::DeclarationController;
use crate::utils::truncate_text;
use crate::workflow::SubmissionOutcome;
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// 处理单份表单
///
/// # 参数
/// - `controller`: 表单控制器（已加载参考数据）
/// - `form`: 表单数据
/// - `form_index`: 表单索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 主批次是否提交成功
pub async fn process_form(
    controller: &mut DeclarationController,
    form: WorkForm,
    form_index: usize,
    config: &Config,
) -> Result<bool> {
    log_form_start(form_index, &form);

    let file_path = form.file_path.clone();
    controller.load_form(form);

    let outcome = controller.submit(form_index).await;

    let submitted = match &outcome {
        SubmissionOutcome::Submitted { rows, warnings } => {
            info!(
                "[表单 {}] ✅ 提交成功: 主记录 {} 行, 警告 {} 条",
                form_index,
                rows,
                warnings.len()
            );
            true
        }
        SubmissionOutcome::Rejected { errors } => {
            warn!(
                "[表单 {}] ⚠️ 未提交: {} 个校验问题，文件保留待修改",
                form_index,
                errors.len()
            );
            false
        }
        SubmissionOutcome::Failed { error } => {
            warn!("[表单 {}] ❌ 提交失败，文件保留以便重试: {}", form_index, error);
            false
        }
    };

    if submitted && config.remove_after_submit {
        cleanup_file(file_path.as_deref(), form_index)?;
    }

    // 控制器被复用，处理完后清空
    controller.reset();

    Ok(submitted)
}

/// 删除已提交的表单文件
fn cleanup_file(file_path: Option<&str>, form_index: usize) -> Result<()> {
    info!("[表单 {}] 🗑️ 清理已提交的文件...", form_index);

    let Some(file_path) = file_path else {
        warn!("[表单 {}] ⚠️ 文件路径未设置", form_index);
        return Ok(());
    };

    let path = Path::new(file_path);
    if !path.exists() {
        warn!("[表单 {}] ⚠️ 文件不存在: {}", form_index, file_path);
        return Ok(());
    }

    std::fs::remove_file(path).map_err(|e| AppError::file_delete_failed(file_path, e))?;
    info!(
        "[表单 {}] ✓ 文件已删除: {}",
        form_index,
        path.file_name().unwrap_or_default().to_string_lossy()
    );

    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_form_start(form_index: usize, form: &WorkForm) {
    info!("[表单 {}] 开始处理", form_index);
    info!(
        "[表单 {}] 标题: {}",
        form_index,
        truncate_text(&form.general.title, 40)
    );
    info!("[表单 {}] 格式: {}", form_index, form.general.format_type);
    info!(
        "[表单 {}] 剧集区块: {}, 参与行: {}",
        form_index,
        form.episode_blocks.len(),
        form.active_participation_lines().count()
    );
}
