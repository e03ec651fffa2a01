//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数

use crate::config::Config;
use crate::services::CollectionReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化全局日志（默认 info 级别，可通过 `RUST_LOG` 覆盖）
///
/// 重复调用是安全的，只有第一次生效。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - ChEMBL 活性数据采集");
    info!(
        "🎯 目标: {} | 需要 {} 个唯一分子",
        config.target_chembl_id, config.required_molecules
    );
    info!(
        "📄 每页 {} 条 | offset 上限 {} | 请求间隔 {:?}",
        config.page_size, config.max_offset, config.request_delay
    );
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `collected`: 实际收集到的唯一分子数
/// - `required`: 目标数量
/// - `report`: 分页统计
pub fn print_final_stats(collected: usize, required: usize, report: &CollectionReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 采集完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 唯一分子: {}/{}", collected, required);
    info!(
        "📄 请求页数: {} (成功 {} / 跳过 {})",
        report.pages_requested, report.pages_succeeded, report.pages_failed
    );
    info!(
        "🧪 处理记录: {} (丢弃 {} / 重复 {})",
        report.records_seen, report.records_discarded, report.duplicates_skipped
    );
    info!("🛑 结束原因: {:?} (offset={})", report.stop_reason, report.final_offset);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars_not_bytes() {
        assert_eq!(truncate_text("表皮生长因子受体", 4), "表皮生长...");
        assert_eq!(truncate_text("EGFR", 4), "EGFR");
        assert_eq!(truncate_text("", 3), "");
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
