//! 报告写入服务 - 业务能力层
//!
//! 只负责"写结果文件"能力，不关心流程

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::BenchmarkReport;

/// 报告写入服务
///
/// 职责：
/// - 把完整的结果 + 汇总写成一个 JSON 文档
/// - 不做任何聚合计算
pub struct ReportWriter {
    output_path: String,
}

impl ReportWriter {
    /// 创建新的报告写入服务
    pub fn new(config: &Config) -> Self {
        Self {
            output_path: config.output_file.clone(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    /// 写入基准测试报告
    pub async fn write(&self, report: &BenchmarkReport) -> Result<()> {
        debug!(
            "写入报告: {} 条结果 | {} 个失败",
            report.results.len(),
            report.summary.failed_ids.len()
        );

        let json = serde_json::to_string_pretty(report).context("无法序列化基准测试报告")?;

        fs::write(&self.output_path, json)
            .await
            .with_context(|| format!("无法写入结果文件: {}", self.output_path))?;

        info!("✓ 基准测试结果已保存至: {}", self.output_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BenchmarkEntry, Summary};

    #[test]
    fn test_write_report_round_trip() {
        let path = std::env::temp_dir().join("question_benchmark_report_test.json");
        let writer = ReportWriter::with_path(path.to_string_lossy().to_string());

        let mut summary = Summary::default();
        summary.model_counts.insert("model-x".to_string(), 1);
        let report = BenchmarkReport {
            results: vec![BenchmarkEntry::success(1, "model-x", "4")],
            summary,
        };

        tokio_test::block_on(writer.write(&report)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["results"][0]["model"], "model-x");
        assert_eq!(value["summary"]["model_counts"]["model-x"], 1);

        let _ = std::fs::remove_file(&path);
    }
}
