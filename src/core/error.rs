// 错误处理系统
// 开发心理：统一的错误类型，区分"调用方配置错误"和"上游代码违约"
// 注意：目标不可达和取消都不是错误，用空/部分结果表示

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SolverError {
    // 配置类错误 - 求解开始前同步拒绝
    #[error("目标描述无效: {0}")]
    InvalidTarget(String),
    #[error("配置错误: {0}")]
    Config(String),

    // 契约违规 - 上游调用方的bug，当前请求直接失败，不做恢复
    #[error("契约违规: {0}")]
    Contract(String),

    // 图鉴/数据错误
    #[error("图鉴错误: {0}")]
    Catalog(String),

    // IO与解析 - 仅CLI与加载路径会触发
    #[error("文件错误: {0}")]
    Io(String),
    #[error("解析错误: {0}")]
    Parse(String),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<std::io::Error> for SolverError {
    fn from(error: std::io::Error) -> Self {
        SolverError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(error: serde_json::Error) -> Self {
        SolverError::Parse(error.to_string())
    }
}

impl From<toml::de::Error> for SolverError {
    fn from(error: toml::de::Error) -> Self {
        SolverError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = SolverError::InvalidTarget("重复的期望词条".to_string());
        assert_eq!(error.to_string(), "目标描述无效: 重复的期望词条");
    }

    #[test]
    fn test_io_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "pool.json");
        let error: SolverError = io_error.into();
        assert!(matches!(error, SolverError::Io(_)));
    }
}
