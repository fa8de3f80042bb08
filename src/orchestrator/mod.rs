//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量题目处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载题目（Vec<Question>）
//! - 控制并发数量（Semaphore）
//! - 汇总并持久化结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<Question>)
//!     ↓
//! workflow::QuestionFlow (处理单个 Question)
//!     ↓
//! services (能力层：llm / report)
//! ```

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{aggregate_summary, dispatch_all, App};
