/*
* 已拥有实例池
* 开发心理过程:
* 1. 池子由外部的存档解码器产出，这里只读消费，求解器绝不修改它
* 2. 每个实例带性别、实际词条、实际IV、存放位置和归属玩家
* 3. 存放位置按取用顺手程度分层：帕鲁箱 > 储物箱 > 据点/观赏笼 > 队伍 > 全局仓库
*    （队伍里的帕鲁正在被用，全局仓库跨世界，两者都不方便拿来配种）
*/

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::SpeciesId;
use crate::core::error::SolverResult;
use crate::encoding::passive_set::PassiveId;

// 存档里的性别只有两种，Wildcard之类是求解器自己的概念
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum OwnedGender {
    Male,
    Female,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Palbox,
    StorageContainer,
    Base,
    ViewingCage,
    Party,
    GlobalStorage,
}

impl LocationKind {
    // 数字越小越顺手
    pub fn preference_tier(&self) -> u8 {
        match self {
            LocationKind::Palbox => 0,
            LocationKind::StorageContainer => 1,
            LocationKind::Base | LocationKind::ViewingCage => 2,
            LocationKind::Party => 3,
            LocationKind::GlobalStorage => 4,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct StorageLocation {
    pub kind: LocationKind,
    // 槽位/容器描述，展示用
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnedInstance {
    // 存档里的实例id，跨次解码稳定
    pub instance_id: String,
    pub species: SpeciesId,
    pub gender: OwnedGender,
    pub passives: Vec<PassiveId>,
    pub iv_hp: u8,
    pub iv_attack: u8,
    pub iv_defense: u8,
    pub location: StorageLocation,
    pub player: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PalPool {
    pub instances: Vec<OwnedInstance>,
}

impl PalPool {
    pub fn load_json<P: AsRef<Path>>(path: P) -> SolverResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let pool: PalPool = serde_json::from_str(&content)?;
        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn by_species(&self, species: SpeciesId) -> impl Iterator<Item = &OwnedInstance> {
        self.instances.iter().filter(move |i| i.species == species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn sample_instance(id: &str, species: SpeciesId, gender: OwnedGender) -> OwnedInstance {
        OwnedInstance {
            instance_id: id.to_string(),
            species,
            gender,
            passives: vec![],
            iv_hp: 50,
            iv_attack: 50,
            iv_defense: 50,
            location: StorageLocation {
                kind: LocationKind::Palbox,
                label: None,
            },
            player: "player1".to_string(),
        }
    }

    #[test]
    fn test_location_tiers_ordered() {
        assert!(LocationKind::Palbox.preference_tier() < LocationKind::StorageContainer.preference_tier());
        assert!(LocationKind::StorageContainer.preference_tier() < LocationKind::Base.preference_tier());
        assert_eq!(
            LocationKind::Base.preference_tier(),
            LocationKind::ViewingCage.preference_tier()
        );
        assert!(LocationKind::Party.preference_tier() < LocationKind::GlobalStorage.preference_tier());
    }

    #[test]
    fn test_pool_species_filter() {
        let pool = PalPool {
            instances: vec![
                sample_instance("a", 1, OwnedGender::Male),
                sample_instance("b", 2, OwnedGender::Female),
                sample_instance("c", 1, OwnedGender::Female),
            ],
        };
        assert_eq!(pool.by_species(1).count(), 2);
        assert_eq!(pool.by_species(3).count(), 0);
    }
}
