/// 程序配置文件
use crate::error::{AppResult, ConfigError};

#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的请求数量
    pub max_concurrent_requests: usize,
    /// 题目文件路径
    pub questions_file: String,
    /// 结果输出文件路径
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    // --- 路由 API 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    /// 路由伪模型，后端自动选择具体模型
    pub model_name: String,
    /// 单题最大尝试次数
    pub max_retries: usize,
    /// 首次重试前的等待时间（毫秒），每次翻倍
    pub retry_base_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 5,
            questions_file: "questions-benchmark.json".to_string(),
            output_file: "questions_benchmark_results.json".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            api_key: String::new(),
            api_base_url: "https://openrouter.ai/api/v1".to_string(),
            model_name: "openrouter/auto".to_string(),
            max_retries: 3,
            retry_base_delay_ms: 2000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_requests: std::env::var("CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            questions_file: std::env::var("QUESTIONS_FILE").unwrap_or(default.questions_file),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            api_key: std::env::var("OPEN_ROUTER_API_KEY").unwrap_or(default.api_key),
            api_base_url: std::env::var("OPEN_ROUTER_API_BASE_URL").unwrap_or(default.api_base_url),
            model_name: std::env::var("ROUTER_MODEL_NAME").unwrap_or(default.model_name),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            retry_base_delay_ms: std::env::var("RETRY_BASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_base_delay_ms),
        }
    }

    /// 校验配置，API Key 缺失属于不可恢复的启动错误
    pub fn validate(&self) -> AppResult<()> {
        if self.api_key.is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "OPEN_ROUTER_API_KEY".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
