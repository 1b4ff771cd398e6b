/*
* 开发心理过程：
* 1. IV（个体值）按属性建模：要么完全随机（不带任何信息），要么收敛到一个闭区间
* 2. relevant标志表示"用户给这一项设了门槛"，合并时有信息的一侧胜出
* 3. 双方同为relevant或同为irrelevant时取区间并集——配出的孩子可能落在两边任何一处
* 4. 游戏里的IV取值0-100
*/

use serde::{Deserialize, Serialize};

pub const IV_MAX: u8 = 100;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct IvRange {
    pub min: u8,
    pub max: u8,
    pub relevant: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum IvProspect {
    // 完全随机，没有约束，也不带信息
    Random,
    Range(IvRange),
}

impl IvProspect {
    pub fn from_value(value: u8, relevant: bool) -> Self {
        let v = value.min(IV_MAX);
        IvProspect::Range(IvRange {
            min: v,
            max: v,
            relevant,
        })
    }

    pub fn is_relevant(&self) -> bool {
        matches!(self, IvProspect::Range(r) if r.relevant)
    }

    // 合并两侧的遗传信息：
    // - 相关性相同 -> 区间并集（孩子可能继承任何一侧）
    // - 相关性不同 -> 相关的一侧直接胜出，无关数据不携带信息
    pub fn merge(&self, other: &IvProspect) -> IvProspect {
        match (self, other) {
            (IvProspect::Random, IvProspect::Random) => IvProspect::Random,
            (IvProspect::Range(a), IvProspect::Range(b)) => {
                if a.relevant == b.relevant {
                    IvProspect::Range(IvRange {
                        min: a.min.min(b.min),
                        max: a.max.max(b.max),
                        relevant: a.relevant,
                    })
                } else if a.relevant {
                    IvProspect::Range(*a)
                } else {
                    IvProspect::Range(*b)
                }
            }
            (IvProspect::Random, IvProspect::Range(r)) | (IvProspect::Range(r), IvProspect::Random) => {
                if r.relevant {
                    IvProspect::Range(*r)
                } else {
                    // 两侧都无关，随机一侧让并集退化为无约束
                    IvProspect::Random
                }
            }
        }
    }

    // 保守判断：整个区间都要过线才算满足门槛
    pub fn satisfies(&self, threshold: u8) -> bool {
        match self {
            IvProspect::Random => false,
            IvProspect::Range(r) => r.min >= threshold,
        }
    }

    // 剪枝用的下界，Random没有保证
    pub fn floor(&self) -> u8 {
        match self {
            IvProspect::Random => 0,
            IvProspect::Range(r) => r.min,
        }
    }
}

// 三项IV：HP / 攻击 / 防御
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct IvSet {
    pub hp: IvProspect,
    pub attack: IvProspect,
    pub defense: IvProspect,
}

// 用户设定的每项最低门槛，None表示不关心
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IvThresholds {
    pub hp: Option<u8>,
    pub attack: Option<u8>,
    pub defense: Option<u8>,
}

impl IvSet {
    pub const UNCONSTRAINED: IvSet = IvSet {
        hp: IvProspect::Random,
        attack: IvProspect::Random,
        defense: IvProspect::Random,
    };

    // 从存档实例的实际数值构造，relevant由用户门槛决定
    pub fn from_actual(hp: u8, attack: u8, defense: u8, thresholds: &IvThresholds) -> Self {
        IvSet {
            hp: IvProspect::from_value(hp, thresholds.hp.is_some()),
            attack: IvProspect::from_value(attack, thresholds.attack.is_some()),
            defense: IvProspect::from_value(defense, thresholds.defense.is_some()),
        }
    }

    pub fn merge(&self, other: &IvSet) -> IvSet {
        IvSet {
            hp: self.hp.merge(&other.hp),
            attack: self.attack.merge(&other.attack),
            defense: self.defense.merge(&other.defense),
        }
    }

    pub fn satisfies(&self, thresholds: &IvThresholds) -> bool {
        let check = |prospect: &IvProspect, threshold: Option<u8>| match threshold {
            Some(t) => prospect.satisfies(t),
            None => true,
        };
        check(&self.hp, thresholds.hp)
            && check(&self.attack, thresholds.attack)
            && check(&self.defense, thresholds.defense)
    }

    // 相关项保证值之和，IV剪枝阶段用它比较候选的优劣
    pub fn relevant_floor(&self) -> u32 {
        let floor = |p: &IvProspect| if p.is_relevant() { p.floor() as u32 } else { 0 };
        floor(&self.hp) + floor(&self.attack) + floor(&self.defense)
    }
}

impl IvThresholds {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("hp", self.hp),
            ("attack", self.attack),
            ("defense", self.defense),
        ] {
            if let Some(v) = value {
                if v > IV_MAX {
                    return Err(format!("IV门槛 {} = {} 超出0-{}", name, v, IV_MAX));
                }
            }
        }
        Ok(())
    }

    pub fn any_set(&self) -> bool {
        self.hp.is_some() || self.attack.is_some() || self.defense.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_same_relevance_is_union() {
        let a = IvProspect::Range(IvRange {
            min: 40,
            max: 60,
            relevant: true,
        });
        let b = IvProspect::Range(IvRange {
            min: 20,
            max: 80,
            relevant: true,
        });
        match a.merge(&b) {
            IvProspect::Range(r) => {
                assert!(r.min <= 20);
                assert!(r.max >= 80);
                assert!(r.relevant);
            }
            _ => panic!("并集应当仍是区间"),
        }
    }

    #[test]
    fn test_merge_relevance_differs_relevant_wins() {
        let relevant = IvProspect::Range(IvRange {
            min: 70,
            max: 70,
            relevant: true,
        });
        let irrelevant = IvProspect::Range(IvRange {
            min: 5,
            max: 5,
            relevant: false,
        });
        assert_eq!(relevant.merge(&irrelevant), relevant);
        assert_eq!(irrelevant.merge(&relevant), relevant);
    }

    #[test]
    fn test_merge_random_with_irrelevant_range() {
        let irrelevant = IvProspect::Range(IvRange {
            min: 5,
            max: 5,
            relevant: false,
        });
        assert_eq!(IvProspect::Random.merge(&irrelevant), IvProspect::Random);

        let relevant = IvProspect::Range(IvRange {
            min: 50,
            max: 50,
            relevant: true,
        });
        assert_eq!(IvProspect::Random.merge(&relevant), relevant);
    }

    #[test]
    fn test_satisfies_is_conservative() {
        let wide = IvProspect::Range(IvRange {
            min: 30,
            max: 90,
            relevant: true,
        });
        // 区间可能落在门槛之下，不算满足
        assert!(!wide.satisfies(50));
        assert!(wide.satisfies(30));
        assert!(!IvProspect::Random.satisfies(1));
    }

    #[test]
    fn test_set_satisfies_thresholds() {
        let thresholds = IvThresholds {
            hp: Some(60),
            attack: None,
            defense: None,
        };
        let good = IvSet::from_actual(80, 10, 10, &thresholds);
        let bad = IvSet::from_actual(40, 99, 99, &thresholds);
        assert!(good.satisfies(&thresholds));
        assert!(!bad.satisfies(&thresholds));
    }

    #[test]
    fn test_thresholds_validation() {
        let bad = IvThresholds {
            hp: Some(150),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        assert!(IvThresholds::default().validate().is_ok());
    }
}
