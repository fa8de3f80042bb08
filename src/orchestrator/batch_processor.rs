//! 批量题目处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量题目的处理和汇总。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、校验配置、创建 QuestionFlow
//! 2. **批量加载**：加载所有待处理的题目（`Vec<Question>`）
//! 3. **并发控制**：使用 Semaphore 限制同时在途的请求数
//! 4. **结果汇总**：按模型统计使用次数、收集失败题目
//! 5. **结果持久化**：结果 + 汇总写成一个 JSON 文档
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个题目的细节
//! - **并发安全**：通过 Semaphore 和 tokio::spawn 实现并发
//! - **失败隔离**：单个题目失败只产生一条失败记录，不中断批次
//! - **向下委托**：委托 QuestionFlow 处理单个题目

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::{
    load_questions_from_json, BenchmarkEntry, BenchmarkReport, Question, Summary,
};
use crate::services::ReportWriter;
use crate::utils::logging;
use crate::workflow::QuestionFlow;

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<QuestionFlow>,
    report_writer: ReportWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(config.max_concurrent_requests, &config.model_name);

        // API Key 缺失属于不可恢复的启动错误，提前失败
        config.validate()?;

        Ok(Self {
            flow: Arc::new(QuestionFlow::new(&config)),
            report_writer: ReportWriter::new(&config),
            config,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的题目
        let questions = self.load_questions().await?;

        if questions.is_empty() {
            warn!("⚠️ 题目文件中没有题目，程序结束");
            return Ok(());
        }

        let total_questions = questions.len();
        logging::log_questions_loaded(total_questions, self.config.max_concurrent_requests);

        // 并发处理所有题目
        let flow = Arc::clone(&self.flow);
        let mut results = dispatch_all(
            questions,
            self.config.max_concurrent_requests,
            move |question| {
                let flow = Arc::clone(&flow);
                async move { flow.run(&question).await }
            },
        )
        .await?;

        // 按题目 ID 排序，保证输出顺序稳定
        results.sort_by_key(|entry| entry.id);

        let summary = aggregate_summary(&results);
        let report = BenchmarkReport { results, summary };

        // 保存结果
        self.report_writer.write(&report).await?;

        // 输出最终统计
        logging::print_final_stats(&report, total_questions, &self.config.output_file);

        Ok(())
    }

    /// 加载题目
    async fn load_questions(&self) -> Result<Vec<Question>> {
        info!("\n📁 正在加载题目文件...");
        load_questions_from_json(Path::new(&self.config.questions_file)).await
    }
}

/// 并发处理所有题目，同时在途的请求数不超过 `max_concurrent`
///
/// 每个题目在 spawn 前先取得一个信号量许可，许可随任务结束释放。
/// 任务 panic 时以失败记录兜底，保证每个题目恰好产出一条结果。
pub async fn dispatch_all<F, Fut>(
    questions: Vec<Question>,
    max_concurrent: usize,
    handler: F,
) -> Result<Vec<BenchmarkEntry>>
where
    F: Fn(Question) -> Fut,
    Fut: Future<Output = BenchmarkEntry> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrent));
    let mut question_ids = Vec::with_capacity(questions.len());
    let mut handles = Vec::with_capacity(questions.len());

    for question in questions {
        let permit = semaphore.clone().acquire_owned().await?;
        question_ids.push(question.id);

        let fut = handler(question);
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            fut.await
        }));
    }

    // 等待所有任务完成
    let mut entries = Vec::with_capacity(handles.len());
    for (question_id, joined) in question_ids.into_iter().zip(join_all(handles).await) {
        match joined {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                error!("[题目 {}] 任务执行失败: {}", question_id, e);
                entries.push(BenchmarkEntry::failure(
                    question_id,
                    format!("任务执行失败: {}", e),
                ));
            }
        }
    }

    Ok(entries)
}

/// 汇总结果：按模型统计回答数量，收集失败题目 ID
pub fn aggregate_summary(entries: &[BenchmarkEntry]) -> Summary {
    let mut summary = Summary::default();

    for entry in entries {
        if entry.error.is_some() {
            summary.failed_ids.push(entry.id);
        } else if let Some(model) = &entry.model {
            *summary.model_counts.entry(model.clone()).or_insert(0) += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn make_questions(count: u64) -> Vec<Question> {
        (1..=count)
            .map(|id| Question {
                id,
                difficulty: "easy".to_string(),
                question: format!("问题 {}", id),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_dispatch_one_entry_per_question() {
        let questions = make_questions(7);
        let entries = dispatch_all(questions, 3, |question| async move {
            BenchmarkEntry::success(question.id, "stub-model", "ok")
        })
        .await
        .unwrap();

        assert_eq!(entries.len(), 7);
        let mut ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=7).collect::<Vec<u64>>());
    }

    /// 在途请求数永远不超过信号量容量
    #[tokio::test]
    async fn test_dispatch_respects_concurrency_limit() {
        let limit = 3;
        let active = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handler = {
            let active = active.clone();
            let max_seen = max_seen.clone();
            move |question: Question| {
                let active = active.clone();
                let max_seen = max_seen.clone();
                async move {
                    let current = active.fetch_add(1, Ordering::SeqCst) + 1;
                    max_seen.fetch_max(current, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    BenchmarkEntry::success(question.id, "stub-model", "ok")
                }
            }
        };

        let entries = dispatch_all(make_questions(20), limit, handler).await.unwrap();

        assert_eq!(entries.len(), 20);
        assert!(max_seen.load(Ordering::SeqCst) <= limit);
        assert_eq!(active.load(Ordering::SeqCst), 0);
    }

    /// 单个题目失败不影响其他题目
    #[tokio::test]
    async fn test_dispatch_isolates_failures() {
        let entries = dispatch_all(make_questions(4), 2, |question| async move {
            if question.id % 2 == 0 {
                BenchmarkEntry::failure(question.id, "模拟失败")
            } else {
                BenchmarkEntry::success(question.id, "stub-model", "ok")
            }
        })
        .await
        .unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries.iter().filter(|e| e.is_success()).count(), 2);
    }

    #[test]
    fn test_aggregate_summary_counts_and_failures() {
        let entries = vec![
            BenchmarkEntry::success(1, "model-a", "答案一"),
            BenchmarkEntry::success(2, "model-b", "答案二"),
            BenchmarkEntry::success(3, "model-a", "答案三"),
            BenchmarkEntry::failure(4, "限流"),
            BenchmarkEntry::failure(5, "连接失败"),
        ];

        let summary = aggregate_summary(&entries);

        assert_eq!(summary.model_counts.get("model-a"), Some(&2));
        assert_eq!(summary.model_counts.get("model-b"), Some(&1));
        assert_eq!(summary.failed_ids, vec![4, 5]);

        // 模型计数之和 == 成功条目数
        let counted: usize = summary.model_counts.values().sum();
        let successes = entries.iter().filter(|e| e.is_success()).count();
        assert_eq!(counted, successes);

        // 失败 ID 恰好是 error 非空的条目
        let failed: Vec<u64> = entries
            .iter()
            .filter(|e| e.error.is_some())
            .map(|e| e.id)
            .collect();
        assert_eq!(summary.failed_ids, failed);
    }

    #[test]
    fn test_aggregate_summary_empty() {
        let summary = aggregate_summary(&[]);
        assert!(summary.model_counts.is_empty());
        assert!(summary.failed_ids.is_empty());
    }
}
