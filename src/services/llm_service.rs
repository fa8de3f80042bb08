//! LLM 服务 - 业务能力层
//!
//! 只负责"向路由 API 要回答"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点（OpenRouter 等兼容 OpenAI API 的服务）
//! - 限流和连接错误在内部重试，指数退避

use std::future::Future;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::LlmError;

/// LLM 服务
///
/// 职责：
/// - 调用路由 API 获取单个题目的回答
/// - 返回后端实际选用的模型名称
/// - 只处理单个 prompt
/// - 不出现 Vec<Question>
/// - 不关心流程顺序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_retries: usize,
    retry_base_delay: Duration,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的路由服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.model_name.clone(),
            max_retries: config.max_retries,
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
        }
    }

    /// 获取单个题目的回答，内部吸收可重试错误
    ///
    /// # 参数
    /// - `prompt`: 题目内容
    ///
    /// # 返回
    /// 返回 `(实际使用的模型名称, 回答内容)`；重试耗尽或遇到不可重试
    /// 错误时返回最后一次的错误
    pub async fn get_completion(&self, prompt: &str) -> Result<(String, String), LlmError> {
        retry_with_backoff(self.max_retries, self.retry_base_delay, |attempt| {
            debug!(
                "第 {}/{} 次尝试 (模型: {})",
                attempt, self.max_retries, self.model_name
            );
            self.send_to_llm(prompt)
        })
        .await
    }

    /// 发送一次聊天补全请求
    ///
    /// 请求中只写路由伪模型，后端自行选择具体模型并在响应的
    /// `model` 字段中返回
    pub async fn send_to_llm(&self, prompt: &str) -> Result<(String, String), LlmError> {
        debug!("调用路由 API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", prompt.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| self.classify_error(e))?;

        let messages = vec![ChatCompletionRequestMessage::User(user_msg)];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .build()
            .map_err(|e| self.classify_error(e))?;

        // 调用 API
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| self.classify_error(e))?;

        // 路由后端在响应中返回实际使用的模型
        let model_used = response.model.clone();

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LlmError::EmptyResponse {
                model: model_used.clone(),
            })?;

        let content = choice
            .message
            .content
            .clone()
            .ok_or_else(|| LlmError::EmptyContent {
                model: model_used.clone(),
            })?;

        debug!("路由 API 调用成功，使用模型: {}", model_used);

        Ok((model_used, content.trim().to_string()))
    }

    /// 把 async-openai 的错误归类为可重试/不可重试
    fn classify_error(&self, err: OpenAIError) -> LlmError {
        let model = self.model_name.clone();

        if let OpenAIError::ApiError(api) = &err {
            if is_rate_limit(api) {
                return LlmError::RateLimited {
                    model,
                    message: api.message.clone(),
                };
            }
        }

        if matches!(err, OpenAIError::Reqwest(_)) {
            LlmError::ConnectionFailed {
                model,
                source: Box::new(err),
            }
        } else {
            LlmError::ApiCallFailed {
                model,
                source: Box::new(err),
            }
        }
    }
}

/// 判断 API 错误是否为频率限制
fn is_rate_limit(api: &ApiError) -> bool {
    if let Some(kind) = api.r#type.as_deref() {
        if kind.contains("rate_limit") {
            return true;
        }
    }

    let message = api.message.to_lowercase();
    message.contains("rate limit") || message.contains("429")
}

/// 带指数退避的有界重试
///
/// 可重试错误（限流、连接失败）等待后重试，等待时间每次翻倍；
/// 不可重试错误立即上抛。尝试 `max_attempts` 次后仍失败则返回
/// 最后一次的错误。
///
/// `op` 接收当前尝试次数（从 1 开始），便于调用方打日志。
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: usize,
    base_delay: Duration,
    mut op: F,
) -> Result<T, LlmError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let attempts = max_attempts.max(1);
    let mut delay = base_delay;

    for attempt in 1..attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() => {
                warn!(
                    "第 {}/{} 次尝试失败: {}，{} 毫秒后重试",
                    attempt,
                    attempts,
                    e,
                    delay.as_millis()
                );
                sleep(delay).await;
                delay *= 2;
            }
            Err(e) => return Err(e),
        }
    }

    // 最后一次尝试，失败则把错误直接上抛
    op(attempts).await
}
