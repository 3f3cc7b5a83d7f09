//! # Obra Submit
//!
//! 一个用于批量提交视听作品申报表单的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 表单（`WorkForm`）、提交记录、参考列表
//! - `loaders` - 从 TOML 文件加载表单
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单份表单
//! - `record_expander` - 把表单展开成扁平的提交记录
//! - `form_validator` / `percentage_validator` / `presence_validator` - 提交前校验
//! - `reference_loader` - 加载作者、国家、制作公司、语言、角色列表
//! - `feedback` - 错误弹窗与提示横幅
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份表单"的完整提交流程
//! - `SubmissionCtx` - 上下文封装（表单序号 + 标题 + 提交时间）
//! - `SubmissionFlow` - 流程编排（校验 → 展开 → 三个批次并发提交 → 反馈）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/controller` - 持有参考列表与当前表单
//! - `orchestrator/batch_processor` - 批量表单处理器，管理资源和并发
//! - `orchestrator/form_processor` - 单个表单处理器
//!
//! `clients/` 是提交通道（HTTP 自动化端点），通过 `SubmissionTransport` trait 注入。

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AutomationClient, SubmissionTransport, SubmitResponse};
pub use config::Config;
pub use error::{AppError, AppResult, ValidationError};
pub use models::{BatchKind, ReferenceKind, ReferenceLists, SubmissionRecord, WorkForm};
pub use orchestrator::{process_form, App, DeclarationController};
pub use workflow::{SubmissionCtx, SubmissionFlow, SubmissionOutcome};
