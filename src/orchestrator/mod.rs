//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责状态持有和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量表单处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载表单（Vec<WorkForm>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `form_processor` - 单个表单处理器
//! - 把表单交给控制器并提交
//! - 清理已提交的文件
//!
//! ### `controller` - 表单控制器
//! - 唯一持有参考列表、当前表单、区块计数器
//! - 提供新增/删除展映、剧集区块、参与行的操作
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<WorkForm>)
//!     ↓
//! form_processor (处理单个 WorkForm)
//!     ↓
//! controller (持有状态)
//!     ↓
//! workflow::SubmissionFlow (校验 → 构建批次 → 并发提交)
//!     ↓
//! services (能力层：展开 / 校验 / 参考数据 / 反馈)
//!     ↓
//! clients (提交通道)
//! ```

pub mod batch_processor;
pub mod controller;
pub mod form_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use controller::DeclarationController;
pub use form_processor::process_form;
