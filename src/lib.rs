//! # Question Benchmark
//!
//! 一个通过模型路由 API 对大模型回答进行基准测试的 Rust 应用程序
//!
//! 请求使用固定的路由伪模型（如 `openrouter/auto`），由后端自动选择
//! 具体模型，并在响应元数据中返回所用模型的名称。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Question
//! - `LlmService` - 路由 API 调用能力（含重试/退避）
//! - `ReportWriter` - 写结果报告文件能力
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionFlow` - 流程编排（调用 LLM → 记录成功/失败）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量题目处理器，管理并发和汇总
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, LlmError};
pub use models::{load_questions_from_json, BenchmarkEntry, BenchmarkReport, Question, Summary};
pub use orchestrator::{aggregate_summary, dispatch_all, App};
pub use services::{LlmService, ReportWriter};
pub use workflow::QuestionFlow;
