use crate::models::question::Question;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载题目列表
///
/// 输入为 JSON 数组，每个元素形如 `{"id": 1, "difficulty": "easy", "question": "..."}`
pub async fn load_questions_from_json(path: &Path) -> Result<Vec<Question>> {
    if !path.exists() {
        anyhow::bail!("题目文件不存在: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取题目文件: {}", path.display()))?;

    let questions: Vec<Question> = serde_json::from_str(&content)
        .with_context(|| format!("无法解析题目文件: {}", path.display()))?;

    tracing::info!("成功加载 {} 个题目", questions.len());

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_questions_from_json() {
        let path = std::env::temp_dir().join("question_benchmark_loader_test.json");
        fs::write(
            &path,
            r#"[{"id":1,"difficulty":"easy","question":"2+2?"},{"id":2,"difficulty":"hard","question":"P=NP?"}]"#,
        )
        .await
        .unwrap();

        let questions = load_questions_from_json(&path).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "2+2?");
        assert_eq!(questions[1].id, 2);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let path = std::env::temp_dir().join("question_benchmark_no_such_file.json");
        let result = load_questions_from_json(&path).await;
        assert!(result.is_err());
    }
}
