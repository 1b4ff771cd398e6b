// 性别编码
// 开发心理：比游戏本体多两个值——Wildcard表示"还没被任何配种槽位约束"，
// OppositeWildcard表示"游戏给什么都行，但消费它的那一步需要相反的那个"

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Gender {
    Male,
    Female,
    Wildcard,
    OppositeWildcard,
}

impl Gender {
    // 两个引用能否占据同一次配种的两个亲本槽位
    // 对称；Wildcard和任何值兼容（包括自己）；相同的具体性别永不兼容；
    // 两个OppositeWildcard互相没有锚点，也不兼容
    pub fn compatible_with(&self, other: &Gender) -> bool {
        match (self, other) {
            (Gender::Wildcard, _) | (_, Gender::Wildcard) => true,
            (Gender::Male, Gender::Female) | (Gender::Female, Gender::Male) => true,
            (Gender::Male, Gender::Male) | (Gender::Female, Gender::Female) => false,
            (Gender::OppositeWildcard, Gender::OppositeWildcard) => false,
            (Gender::OppositeWildcard, _) | (_, Gender::OppositeWildcard) => true,
        }
    }

    pub fn opposite(&self) -> Gender {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
            Gender::Wildcard => Gender::OppositeWildcard,
            Gender::OppositeWildcard => Gender::Wildcard,
        }
    }

    pub fn is_specific(&self) -> bool {
        matches!(self, Gender::Male | Gender::Female)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Gender::Male => "♂",
            Gender::Female => "♀",
            Gender::Wildcard => "*",
            Gender::OppositeWildcard => "!*",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Wildcard,
        Gender::OppositeWildcard,
    ];

    #[test]
    fn test_compatibility_symmetric() {
        for a in ALL {
            for b in ALL {
                assert_eq!(a.compatible_with(&b), b.compatible_with(&a));
            }
        }
    }

    #[test]
    fn test_wildcard_compatible_with_everything() {
        for g in ALL {
            assert!(Gender::Wildcard.compatible_with(&g));
        }
    }

    #[test]
    fn test_equal_specific_never_compatible() {
        assert!(!Gender::Male.compatible_with(&Gender::Male));
        assert!(!Gender::Female.compatible_with(&Gender::Female));
        assert!(Gender::Male.compatible_with(&Gender::Female));
    }

    #[test]
    fn test_opposite_wildcard_needs_anchor() {
        assert!(!Gender::OppositeWildcard.compatible_with(&Gender::OppositeWildcard));
        assert!(Gender::OppositeWildcard.compatible_with(&Gender::Male));
        assert!(Gender::OppositeWildcard.compatible_with(&Gender::Female));
    }

    #[test]
    fn test_opposite_involution() {
        for g in ALL {
            assert_eq!(g.opposite().opposite(), g);
        }
    }
}
