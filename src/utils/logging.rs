use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::{info, warn};

use crate::models::BenchmarkReport;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
///
/// # 返回
/// 返回是否成功初始化
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目基准测试日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `max_concurrent`: 最大并发数
/// - `model_name`: 路由伪模型名称
pub fn log_startup(max_concurrent: usize, model_name: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 路由 API 基准测试模式");
    info!("📊 最大并发数: {}", max_concurrent);
    info!("🤖 路由模型: {}", model_name);
    info!("{}", "=".repeat(60));
}

/// 记录题目加载信息
///
/// # 参数
/// - `total`: 题目总数
/// - `max_concurrent`: 最大并发数
pub fn log_questions_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的题目", total);
    info!("📋 同时在途请求不超过 {} 个\n", max_concurrent);
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 完整的基准测试报告
/// - `total`: 题目总数
/// - `output_file`: 结果文件路径
pub fn print_final_stats(report: &BenchmarkReport, total: usize, output_file: &str) {
    let success = report.results.iter().filter(|e| e.is_success()).count();

    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", report.summary.failed_ids.len());
    for (model, count) in &report.summary.model_counts {
        info!("  模型 {}: 回答 {} 题", model, count);
    }
    if !report.summary.failed_ids.is_empty() {
        warn!("⚠️ 失败题目: {:?}", report.summary.failed_ids);
    }
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_file);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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
