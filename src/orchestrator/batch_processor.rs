//! 批量表单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量表单的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建提交客户端和控制器
//! 2. **参考数据**：启动时加载一次，所有表单共享
//! 3. **批量加载**：扫描并加载所有待提交的表单（`Vec<WorkForm>`）
//! 4. **并发控制**：按批处理，批内使用 Semaphore 限制并发数量
//! 5. **全局统计**：汇总所有表单的处理结果

use crate::clients::AutomationClient;
use crate::config::Config;
use crate::models::form::WorkForm;
use crate::orchestrator::controller::DeclarationController;
use crate::orchestrator::form_processor;
use crate::services::{ConsoleFeedback, ReferenceDataLoader};
use crate::utils::logging;
use crate::workflow::SubmissionFlow;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    loader: ReferenceDataLoader,
    controller: DeclarationController,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(config.max_concurrent_forms);

        if config.primary_endpoint.trim().is_empty() {
            warn!("⚠️ 未配置 PRIMARY_ENDPOINT，所有提交都会失败");
        }

        let transport = Arc::new(AutomationClient::new(&config));
        let flow = SubmissionFlow::new(&config, transport);
        let controller = DeclarationController::new(flow, Arc::new(ConsoleFeedback::new()));
        let loader = ReferenceDataLoader::new(config.reference_data_dir.clone());

        Ok(Self {
            config,
            loader,
            controller,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(mut self) -> Result<()> {
        // 加载所有待提交的表单
        let forms = self.load_forms().await?;

        if forms.is_empty() {
            warn!("⚠️ 没有找到待提交的表单文件，程序结束");
            return Ok(());
        }

        logging::log_forms_loaded(forms.len(), self.config.max_concurrent_forms);

        self.controller.start(&self.loader).await;

        let stats = self.process_all_forms(forms).await?;

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载表单
    async fn load_forms(&self) -> Result<Vec<WorkForm>> {
        info!("\n📁 正在扫描待提交的表单...");
        crate::models::load_all_form_files(&self.config.forms_folder).await
    }

    /// 分批处理所有表单
    async fn process_all_forms(&self, forms: Vec<WorkForm>) -> Result<ProcessingStats> {
        let batch_size = self.config.max_concurrent_forms.max(1);
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total_forms = forms.len();
        let total_batches = total_forms.div_ceil(batch_size);
        let mut stats = ProcessingStats {
            total: total_forms,
            ..Default::default()
        };

        for (batch_idx, batch_forms) in forms.chunks(batch_size).enumerate() {
            let batch_start = batch_idx * batch_size;
            let batch_num = batch_idx + 1;

            logging::log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_start + batch_forms.len(),
                total_forms,
            );

            let batch_result = self
                .process_batch(batch_forms, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;

            logging::log_batch_complete(batch_num, batch_result.success, batch_forms.len());
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_forms: &[WorkForm],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        for (idx, form) in batch_forms.iter().enumerate() {
            let form_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            // 每个任务一份控制器，参考列表通过 Arc 共享
            let mut controller = self
                .controller
                .clone()
                .with_feedback(Arc::new(ConsoleFeedback::with_prefix(format!(
                    "[表单 {}]",
                    form_index
                ))));
            let form = form.clone();
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match form_processor::process_form(&mut controller, form, form_index, &config)
                    .await
                {
                    Ok(submitted) => Ok(submitted),
                    Err(e) => {
                        error!("[表单 {}] ❌ 处理过程中发生错误: {:#}", form_index, e);
                        Err(e)
                    }
                }
            });
            batch_handles.push((form_index, handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for (form_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(true)) => result.success += 1,
                Ok(Ok(false)) | Ok(Err(_)) => result.failed += 1,
                Err(e) => {
                    error!("[表单 {}] 任务执行失败: {}", form_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
}
