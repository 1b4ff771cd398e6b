/*
* 开发心理过程：
* 1. 求解器配置集中在一个结构里，serde派生，支持TOML/JSON两种来源
* 2. 提供合理的游戏向默认值（孵蛋间隔5分钟、最多3步配种等）
* 3. validate()在求解前同步拒绝非法配置
* 4. "多农场"标志只切换父母工时的合并方式（sum/max），按策略保留
*/

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{SolverError, SolverResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    // 搜索深度上限（配种步数）
    pub max_breeding_steps: u8,

    // IV剪枝容差：与观测到的最优IV差距超过该值的候选被淘汰
    pub max_iv_tolerance: u8,

    // 多配种农场：父母双方可以同时产出时，工时取max而不是sum
    pub multiple_breeding_farms: bool,

    // 最终结果数量硬上限
    pub max_results: usize,

    // 多样性阶段的相似度阈值，0.0-1.0，越低越苛刻
    pub diversity_threshold: f64,

    // 手术（付费突变）最多允许几次操作来填平差距
    pub max_surgery_ops: u8,

    // 强制性别手术的单次价格
    pub gender_surgery_price: u32,

    // 单次孵蛋的期望耗时（分钟）
    pub breeding_attempt_minutes: f64,

    // 是否允许野外捕捉作为叶子来源
    pub allow_wild_pals: bool,

    // 每个中间物种在工作集里保留的引用数量上限，防止代际爆炸
    pub max_refs_per_species: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_breeding_steps: 3,
            max_iv_tolerance: 10,
            multiple_breeding_farms: true,
            max_results: 10,
            diversity_threshold: 0.7,
            max_surgery_ops: 2,
            gender_surgery_price: 10_000,
            breeding_attempt_minutes: 5.0,
            allow_wild_pals: true,
            max_refs_per_species: 256,
        }
    }
}

impl SolverConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> SolverResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SolverConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> SolverResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SolverConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.max_breeding_steps == 0 {
            return Err(SolverError::Config(
                "max_breeding_steps 必须至少为1".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(SolverError::Config("max_results 必须至少为1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.diversity_threshold) {
            return Err(SolverError::Config(
                "diversity_threshold 必须在0.0-1.0之间".to_string(),
            ));
        }
        if self.breeding_attempt_minutes <= 0.0 {
            return Err(SolverError::Config(
                "breeding_attempt_minutes 必须为正数".to_string(),
            ));
        }
        if self.max_refs_per_species == 0 {
            return Err(SolverError::Config(
                "max_refs_per_species 必须至少为1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_breeding_steps, 3);
        assert!(config.multiple_breeding_farms);
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let config = SolverConfig {
            max_breeding_steps: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SolverError::Config(_))));
    }

    #[test]
    fn test_invalid_diversity_rejected() {
        let config = SolverConfig {
            diversity_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SolverConfig::default();
        let text = toml::to_string(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();

        let loaded = SolverConfig::load_toml(file.path()).unwrap();
        assert_eq!(loaded.max_breeding_steps, config.max_breeding_steps);
        assert_eq!(loaded.max_results, config.max_results);
    }
}
