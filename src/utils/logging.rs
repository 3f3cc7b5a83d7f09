use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅者
///
/// 优先使用 `RUST_LOG`；未设置时默认 info，`verbose` 为 true 时为 debug。
/// 重复调用是安全的（测试中会多次调用）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

const RULE_WIDTH: usize = 60;

/// 创建本次运行的日志文件，写入带时间戳的标题
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let started = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    fs::write(
        log_file_path,
        format!("# 作品申报提交日志\n# 开始于 {}\n\n", started),
    )?;
    Ok(())
}

pub fn log_startup(max_concurrent: usize) {
    info!("{}", "=".repeat(RULE_WIDTH));
    info!("🎬 作品申报批量提交 (并发上限 {})", max_concurrent);
}

pub fn log_forms_loaded(total: usize, batch_size: usize) {
    info!(
        "✓ 待提交表单 {} 份，分 {} 批处理",
        total,
        total.div_ceil(batch_size.max(1))
    );
}

/// 批次开始：`[批次 2/3] 表单 5-8 / 10`
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("{}", "─".repeat(RULE_WIDTH));
    info!(
        "📦 [批次 {}/{}] 表单 {}-{} / {}",
        batch_num, total_batches, start, end, total
    );
}

pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    info!("📦 [批次 {}] 已提交 {}/{}", batch_num, success, total);
}

/// 运行结束时的汇总
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("{}", "=".repeat(RULE_WIDTH));
    info!(
        "🏁 {} 完成: 已提交 {} / 未提交 {} / 共 {}",
        chrono::Local::now().format("%H:%M:%S"),
        success,
        failed,
        total
    );
    info!("日志文件: {}", log_file_path);
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
