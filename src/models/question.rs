use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 基准测试题目
///
/// 从输入 JSON 数组加载，加载后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(default)]
    pub difficulty: String,
    pub question: String,
}

/// 单个题目的处理结果
///
/// 每个输入题目对应且仅对应一条记录。失败时 `model` 和 `answer`
/// 为 null，`error` 记录原因；序列化时 null 字段保留，不跳过。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub id: u64,
    pub model: Option<String>,
    pub answer: Option<String>,
    pub error: Option<String>,
}

impl BenchmarkEntry {
    /// 创建成功记录
    pub fn success(id: u64, model: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            model: Some(model.into()),
            answer: Some(answer.into()),
            error: None,
        }
    }

    /// 创建失败记录
    pub fn failure(id: u64, error: impl Into<String>) -> Self {
        Self {
            id,
            model: None,
            answer: None,
            error: Some(error.into()),
        }
    }

    /// 是否成功
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// 模型使用情况汇总
///
/// BTreeMap 保证序列化输出的键顺序稳定
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub model_counts: BTreeMap<String, usize>,
    pub failed_ids: Vec<u64>,
}

/// 完整的输出文档：所有结果 + 汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub results: Vec<BenchmarkEntry>,
    pub summary: Summary,
}
