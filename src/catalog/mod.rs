/*
* 帕鲁图鉴模块
* 开发心理过程:
* 1. 图鉴是只读的外部契约：物种记录（编号、名字、配种力、雄性概率、保底词条、捕捉等级）
*    和词条记录（id、阶级、手术价格），加载一次之后不再变化
* 2. 支持从JSON加载完整游戏数据，同时内置一份演示数据方便测试和CLI demo
* 3. 设计原则：数据驱动、可扩展
*/

pub mod breeding_graph;

pub use breeding_graph::BreedingGraph;

use hashbrown::HashMap;
use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{SolverError, SolverResult};
use crate::encoding::passive_set::PassiveId;

pub type SpeciesId = u16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalSpecies {
    pub id: SpeciesId,
    pub name: String,
    // 无特例组合时，孩子物种由双亲配种力的平均值决定
    pub breeding_power: u16,
    // 雄性概率，百分比0-100
    pub male_probability: u8,
    // 这一物种天生自带的保底词条
    pub guaranteed_passives: Vec<PassiveId>,
    // 捕捉等级1-10，驱动野外捕捉的期望耗时估计
    pub capture_rank: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassiveSkill {
    pub id: PassiveId,
    pub name: String,
    // 阶级，负数为减益词条
    pub rank: i8,
    // 手术植入价格；None表示这条词条买不到（比如传说系）
    pub surgery_price: Option<u32>,
}

// 特例组合：某些双亲组合无视配种力，直接产出固定物种
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialCombo {
    pub parent_a: SpeciesId,
    pub parent_b: SpeciesId,
    pub child: SpeciesId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub species: Vec<PalSpecies>,
    pub passives: Vec<PassiveSkill>,
    pub special_combos: Vec<SpecialCombo>,
    #[serde(skip)]
    species_index: HashMap<SpeciesId, usize>,
    #[serde(skip)]
    passive_index: HashMap<PassiveId, usize>,
}

impl Catalog {
    pub fn new(
        species: Vec<PalSpecies>,
        passives: Vec<PassiveSkill>,
        special_combos: Vec<SpecialCombo>,
    ) -> SolverResult<Self> {
        let mut catalog = Catalog {
            species,
            passives,
            special_combos,
            species_index: HashMap::new(),
            passive_index: HashMap::new(),
        };
        catalog.rebuild_indices()?;
        Ok(catalog)
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> SolverResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut catalog: Catalog = serde_json::from_str(&content)?;
        catalog.rebuild_indices()?;
        debug!(
            "图鉴加载完成：{}个物种，{}条词条，{}条特例组合",
            catalog.species.len(),
            catalog.passives.len(),
            catalog.special_combos.len()
        );
        Ok(catalog)
    }

    fn rebuild_indices(&mut self) -> SolverResult<()> {
        self.species_index.clear();
        for (i, s) in self.species.iter().enumerate() {
            if s.male_probability > 100 {
                return Err(SolverError::Catalog(format!(
                    "物种 {} 的雄性概率超出0-100",
                    s.name
                )));
            }
            if self.species_index.insert(s.id, i).is_some() {
                return Err(SolverError::Catalog(format!("重复的物种id: {}", s.id)));
            }
        }
        self.passive_index.clear();
        for (i, p) in self.passives.iter().enumerate() {
            if self.passive_index.insert(p.id, i).is_some() {
                return Err(SolverError::Catalog(format!("重复的词条id: {}", p.id)));
            }
        }
        Ok(())
    }

    pub fn species(&self, id: SpeciesId) -> SolverResult<&PalSpecies> {
        self.species_index
            .get(&id)
            .map(|&i| &self.species[i])
            .ok_or_else(|| SolverError::Catalog(format!("未知的物种id: {}", id)))
    }

    pub fn species_by_name(&self, name: &str) -> Option<&PalSpecies> {
        self.species
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn passive(&self, id: PassiveId) -> SolverResult<&PassiveSkill> {
        self.passive_index
            .get(&id)
            .map(|&i| &self.passives[i])
            .ok_or_else(|| SolverError::Catalog(format!("未知的词条id: {}", id)))
    }

    pub fn passive_by_name(&self, name: &str) -> Option<&PassiveSkill> {
        self.passives
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

// 内置演示图鉴
lazy_static! {
    static ref BUILTIN_CATALOG: Catalog = {
        let catalog = build_demo_catalog().expect("内置图鉴数据非法");
        debug!("内置演示图鉴初始化完成，共{}个物种", catalog.species_count());
        catalog
    };
}

pub fn builtin_catalog() -> &'static Catalog {
    &BUILTIN_CATALOG
}

fn build_demo_catalog() -> SolverResult<Catalog> {
    let species = vec![
        PalSpecies {
            id: 1,
            name: "Lamball".to_string(),
            breeding_power: 1470,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 1,
        },
        PalSpecies {
            id: 2,
            name: "Cattiva".to_string(),
            breeding_power: 1460,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 1,
        },
        PalSpecies {
            id: 3,
            name: "Chikipi".to_string(),
            breeding_power: 1500,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 1,
        },
        PalSpecies {
            id: 4,
            name: "Foxparks".to_string(),
            breeding_power: 1440,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 2,
        },
        PalSpecies {
            id: 5,
            name: "Pengullet".to_string(),
            breeding_power: 1410,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 2,
        },
        PalSpecies {
            id: 6,
            name: "Celaray".to_string(),
            breeding_power: 1280,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 3,
        },
        PalSpecies {
            id: 7,
            name: "Rushoar".to_string(),
            breeding_power: 1130,
            male_probability: 70,
            guaranteed_passives: vec![],
            capture_rank: 3,
        },
        PalSpecies {
            id: 8,
            name: "Direhowl".to_string(),
            breeding_power: 1060,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 4,
        },
        PalSpecies {
            id: 9,
            name: "Penking".to_string(),
            breeding_power: 1025,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 6,
        },
        PalSpecies {
            id: 10,
            name: "Anubis".to_string(),
            breeding_power: 120,
            male_probability: 85,
            guaranteed_passives: vec![],
            capture_rank: 9,
        },
        PalSpecies {
            id: 11,
            name: "Relaxaurus".to_string(),
            breeding_power: 490,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 7,
        },
        PalSpecies {
            id: 12,
            name: "Sparkit".to_string(),
            breeding_power: 1420,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 2,
        },
        PalSpecies {
            id: 13,
            name: "Mossanda".to_string(),
            breeding_power: 1390,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 5,
        },
        PalSpecies {
            id: 14,
            name: "Grizzbolt".to_string(),
            breeding_power: 1160,
            male_probability: 50,
            guaranteed_passives: vec![],
            capture_rank: 8,
        },
    ];

    let passives = vec![
        PassiveSkill {
            id: 1,
            name: "Swift".to_string(),
            rank: 2,
            surgery_price: Some(20_000),
        },
        PassiveSkill {
            id: 2,
            name: "Runner".to_string(),
            rank: 1,
            surgery_price: Some(10_000),
        },
        PassiveSkill {
            id: 3,
            name: "Ferocious".to_string(),
            rank: 2,
            surgery_price: Some(20_000),
        },
        PassiveSkill {
            id: 4,
            name: "Musclehead".to_string(),
            rank: 1,
            surgery_price: Some(10_000),
        },
        PassiveSkill {
            id: 5,
            name: "Lucky".to_string(),
            rank: 3,
            surgery_price: Some(50_000),
        },
        PassiveSkill {
            id: 6,
            name: "Legend".to_string(),
            rank: 4,
            surgery_price: None,
        },
        PassiveSkill {
            id: 7,
            name: "Workaholic".to_string(),
            rank: 2,
            surgery_price: Some(20_000),
        },
        PassiveSkill {
            id: 8,
            name: "Artisan".to_string(),
            rank: 3,
            surgery_price: Some(50_000),
        },
        PassiveSkill {
            id: 9,
            name: "Slacker".to_string(),
            rank: -1,
            surgery_price: None,
        },
        PassiveSkill {
            id: 10,
            name: "Nimble".to_string(),
            rank: 1,
            surgery_price: Some(10_000),
        },
    ];

    // Mossanda x Sparkit -> Grizzbolt 这种固定配方的简化演示版
    let special_combos = vec![SpecialCombo {
        parent_a: 13,
        parent_b: 12,
        child: 14,
    }];

    Catalog::new(species, passives, special_combos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog();
        assert!(catalog.species_count() >= 10);
        let lamball = catalog.species_by_name("Lamball").unwrap();
        assert_eq!(lamball.id, 1);
        assert_eq!(lamball.male_probability, 50);
    }

    #[test]
    fn test_unknown_species_is_catalog_error() {
        let catalog = builtin_catalog();
        assert!(matches!(
            catalog.species(9999),
            Err(SolverError::Catalog(_))
        ));
    }

    #[test]
    fn test_passive_lookup() {
        let catalog = builtin_catalog();
        let swift = catalog.passive_by_name("swift").unwrap();
        assert_eq!(swift.id, 1);
        assert!(swift.surgery_price.is_some());
        // 传说词条买不到
        let legend = catalog.passive_by_name("Legend").unwrap();
        assert!(legend.surgery_price.is_none());
    }

    #[test]
    fn test_duplicate_species_rejected() {
        let dup = vec![
            PalSpecies {
                id: 1,
                name: "A".to_string(),
                breeding_power: 100,
                male_probability: 50,
                guaranteed_passives: vec![],
                capture_rank: 1,
            },
            PalSpecies {
                id: 1,
                name: "B".to_string(),
                breeding_power: 200,
                male_probability: 50,
                guaranteed_passives: vec![],
                capture_rank: 1,
            },
        ];
        assert!(Catalog::new(dup, vec![], vec![]).is_err());
    }
}
