// 帕鲁配种路径求解器库入口
// 开发心理：纯计算库，不碰存档文件格式也不画界面，
// 输入是图鉴+现货池+目标描述，输出是按综合代价排好的配种树
// 架构：编码层（定宽值类型）-> 目录层（图鉴/图谱）-> 引用层（获取方案）-> 求解层（搜索+剪枝）

// 核心模块 - 错误、配置、取消
pub mod core;

// 紧凑属性编码
pub mod encoding;

// 图鉴与配种图谱
pub mod catalog;

// 已拥有实例池
pub mod pool;

// 获取方案引用与配种树
pub mod reference;

// 搜索、遗传模型、手术、剪枝管线
pub mod solver;

// 重新导出核心类型
pub use crate::catalog::{builtin_catalog, BreedingGraph, Catalog};
pub use crate::core::{CancellationToken, SolverConfig, SolverError, SolverResult};
pub use crate::encoding::{Effort, Gender, IvThresholds, Probability};
pub use crate::pool::PalPool;
pub use crate::reference::tree::BreedingTree;
pub use crate::reference::PalReference;
pub use crate::solver::{BreedingSolver, TargetSpec};

// 版本信息 - 使用默认值避免编译时环境变量依赖
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "palbreed";

// 便利函数：一次性初始化日志系统
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::debug!("帕鲁配种求解器初始化完成 v{}", VERSION);
}

// 求解计时器：离开作用域时把整段求解耗时打进debug日志
// 阈值放在5ms，现货秒杀的查询不值得占一行日志
pub struct PerformanceProfiler {
    started: std::time::Instant,
    label: &'static str,
}

impl PerformanceProfiler {
    pub fn new(label: &'static str) -> Self {
        Self {
            started: std::time::Instant::now(),
            label,
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.started.elapsed()
    }
}

impl Drop for PerformanceProfiler {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        if elapsed.as_millis() >= 5 {
            log::debug!(
                "{} 求解耗时 {:.1}ms",
                self.label,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }
}
