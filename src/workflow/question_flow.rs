//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 调用路由 API（客户端内部重试限流/连接错误）
//! 2. 成功 → 记录所用模型和回答
//! 3. 失败 → 记录错误，不中断整个批次

use tracing::{error, info};

use crate::config::Config;
use crate::models::{BenchmarkEntry, Question};
use crate::services::LlmService;
use crate::utils::logging::truncate_text;

/// 题目处理流程
///
/// - 编排单个题目的完整处理
/// - 不持有任何批量状态
/// - 只依赖业务能力（services）
pub struct QuestionFlow {
    llm_service: LlmService,
    verbose_logging: bool,
}

impl QuestionFlow {
    /// 创建新的题目处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            llm_service: LlmService::new(config),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理单个题目
    ///
    /// 任何终止性错误都在这里被捕获并转成失败记录，
    /// 保证每个题目恰好产出一条结果
    pub async fn run(&self, question: &Question) -> BenchmarkEntry {
        info!(
            "[题目 {}] 开始处理 (难度: {})",
            question.id, question.difficulty
        );

        if self.verbose_logging {
            info!(
                "[题目 {}] 题干: {}",
                question.id,
                truncate_text(&question.question, 80)
            );
        }

        match self.llm_service.get_completion(&question.question).await {
            Ok((model, answer)) => {
                info!("[题目 {}] ✓ 完成，使用模型: {}", question.id, model);
                BenchmarkEntry::success(question.id, model, answer)
            }
            Err(e) => {
                error!("[题目 {}] ❌ 获取回答失败: {}", question.id, e);
                BenchmarkEntry::failure(question.id, e.to_string())
            }
        }
    }
}
