// 核心模块 - 错误、配置、取消令牌
// 开发心理：求解器的公共地基，所有上层模块都依赖这里

pub mod cancel;
pub mod config;
pub mod error;

pub use cancel::CancellationToken;
pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
