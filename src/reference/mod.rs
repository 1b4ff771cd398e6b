/*
* 帕鲁引用模型 - "用某种手段获得一只满足约束的帕鲁"
* 开发心理过程:
* 1. 封闭的和类型，五种来源：已拥有、野外捕捉、配种产出、雌雄合体、手术改造
* 2. 全部结构化相等/哈希，由各变体公开字段派生——没有调用方可见的身份语义
* 3. 构造后不可变；性别特化返回新对象，纯函数重算，没有构造后再塞的缓存字段
* 4. 工时/花费/步数在构造时算好存下，剪枝阶段读字段就行，不用每次遍历整棵树
* 5. Bred的双亲按全序稳定排列，交换双亲顺序不会产生不同对象
*/

pub mod tree;

use smallvec::SmallVec;

use crate::catalog::SpeciesId;
use crate::core::error::{SolverError, SolverResult};
use crate::encoding::effort::{Effort, Probability};
use crate::encoding::gender::Gender;
use crate::encoding::iv::{IvSet, IvThresholds};
use crate::encoding::passive_set::{PassiveId, PassiveSet, PassiveSpec, RANDOM_PASSIVE_ID};
use crate::pool::{OwnedGender, OwnedInstance};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PalReference {
    Owned(OwnedRef),
    Wild(WildRef),
    Bred(Box<BredRef>),
    Composite(Box<CompositeRef>),
    Surgery(Box<SurgeryRef>),
}

// 存档里已经有的实例，工时为零
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnedRef {
    pub instance: OwnedInstance,
    // 相对期望词条的两个视图：effective只保留期望命中、其余抹成Random
    pub spec: PassiveSpec,
    pub effective: PassiveSet,
    pub actual: PassiveSet,
    pub ivs: IvSet,
}

impl OwnedRef {
    pub fn new(
        instance: OwnedInstance,
        desired: &[PassiveId],
        thresholds: &IvThresholds,
    ) -> SolverResult<Self> {
        let actual = PassiveSet::from_ids(&instance.passives)?;
        let spec = PassiveSpec::from_actual(desired, &actual);
        let effective = spec.effective(desired)?;
        let ivs = IvSet::from_actual(
            instance.iv_hp,
            instance.iv_attack,
            instance.iv_defense,
            thresholds,
        );
        Ok(OwnedRef {
            instance,
            spec,
            effective,
            actual,
            ivs,
        })
    }

    pub fn gender(&self) -> Gender {
        match self.instance.gender {
            OwnedGender::Male => Gender::Male,
            OwnedGender::Female => Gender::Female,
        }
    }
}

// 野外捕捉：一个物种 + 指望它身上随机出几条词条槽
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WildRef {
    pub species: SpeciesId,
    pub random_slots: u8,
    pub gender: Gender,
    pub effective: PassiveSet,
    pub effort: Effort,
}

impl WildRef {
    pub fn new(species: SpeciesId, random_slots: u8, effort: Effort) -> SolverResult<Self> {
        let mut ids = SmallVec::<[PassiveId; 4]>::new();
        for _ in 0..random_slots {
            ids.push(RANDOM_PASSIVE_ID);
        }
        let effective = PassiveSet::from_ids(&ids)?;
        Ok(WildRef {
            species,
            random_slots,
            gender: Gender::Wildcard,
            effective,
            effort,
        })
    }
}

// 配种产出：双亲 + 调用方已经算好的有效词条集和单次命中概率
// （遗传概率模型属于搜索组件，这里不重推）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BredRef {
    pub species: SpeciesId,
    pub gender: Gender,
    pub parents: (PalReference, PalReference),
    pub effective: PassiveSet,
    pub ivs: IvSet,
    pub probability: Probability,
    pub self_effort: Effort,
    pub total_effort: Effort,
    pub total_cost: u32,
    pub steps: u8,
}

impl BredRef {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        species: SpeciesId,
        parent_a: PalReference,
        parent_b: PalReference,
        effective: PassiveSet,
        ivs: IvSet,
        probability: Probability,
        attempt: Effort,
        multiple_farms: bool,
    ) -> SolverResult<Self> {
        if !parent_a.gender().compatible_with(&parent_b.gender()) {
            return Err(SolverError::Contract(format!(
                "双亲性别不兼容: {} 与 {}",
                parent_a.gender(),
                parent_b.gender()
            )));
        }

        // 稳定的双亲排序：交换顺序构造出完全相同的值
        let (first, second) = if parent_a <= parent_b {
            (parent_a, parent_b)
        } else {
            (parent_b, parent_a)
        };

        let self_effort = attempt.scaled_by_probability(probability);
        let parents_effort = if multiple_farms {
            // 多农场：双亲可以同时产出，工时取慢的那一边
            first.total_effort().max(second.total_effort())
        } else {
            first.total_effort().saturating_add(second.total_effort())
        };
        let total_effort = self_effort.saturating_add(parents_effort);
        let total_cost = first.total_cost().saturating_add(second.total_cost());
        let steps = 1u8
            .saturating_add(first.breeding_steps())
            .saturating_add(second.breeding_steps());

        Ok(BredRef {
            species,
            // 刚孵出来的孩子还没被任何槽位约束
            gender: Gender::Wildcard,
            parents: (first, second),
            effective,
            ivs,
            probability,
            self_effort,
            total_effort,
            total_cost,
            steps,
        })
    }
}

// 雌雄合体：同物种的一公一母已拥有实例，代表"这个物种现在两种性别都有现货"
// 避免为了凑相反性别而多配一轮冗余的蛋
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeRef {
    pub male: OwnedRef,
    pub female: OwnedRef,
    pub effective: PassiveSet,
    pub ivs: IvSet,
}

impl CompositeRef {
    pub fn new(male: OwnedRef, female: OwnedRef) -> SolverResult<Self> {
        if male.instance.species != female.instance.species {
            return Err(SolverError::Contract(
                "合体引用的两侧必须是同一物种".to_string(),
            ));
        }
        if male.gender() != Gender::Male || female.gender() != Gender::Female {
            return Err(SolverError::Contract(
                "合体引用必须由一公一母组成".to_string(),
            ));
        }

        // 有效视图合并两侧的期望命中：这对现货合起来能覆盖的词条
        // （特化到某一侧后仍然只剩那一侧自己的词条）
        let mut ids: SmallVec<[PassiveId; 8]> = SmallVec::new();
        for id in male.effective.iter().chain(female.effective.iter()) {
            if id != RANDOM_PASSIVE_ID && !ids.contains(&id) {
                ids.push(id);
            }
        }
        // Random槽位取更富一侧的份数，别让两侧的未知词条翻倍
        let randoms = male
            .effective
            .random_count()
            .max(female.effective.random_count())
            .min(8 - ids.len());
        for _ in 0..randoms {
            ids.push(RANDOM_PASSIVE_ID);
        }
        let effective = PassiveSet::from_ids(&ids)?;
        let ivs = male.ivs.merge(&female.ivs);

        Ok(CompositeRef {
            male,
            female,
            effective,
            ivs,
        })
    }
}

// 手术操作：花钱、立即生效、不占工时
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurgeryOp {
    AddPassive { passive: PassiveId, price: u32 },
    SwapPassive { remove: PassiveId, add: PassiveId, price: u32 },
    ForceGender { gender: Gender, price: u32 },
}

impl SurgeryOp {
    pub fn price(&self) -> u32 {
        match self {
            SurgeryOp::AddPassive { price, .. } => *price,
            SurgeryOp::SwapPassive { price, .. } => *price,
            SurgeryOp::ForceGender { price, .. } => *price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurgeryRef {
    pub input: PalReference,
    pub ops: SmallVec<[SurgeryOp; 2]>,
    pub effective: PassiveSet,
    pub gender: Gender,
    pub total_cost: u32,
}

impl SurgeryRef {
    pub fn new(input: PalReference, ops: SmallVec<[SurgeryOp; 2]>) -> SolverResult<Self> {
        let mut effective = *input.effective_passives();
        let mut gender = input.gender();
        let mut cost = input.total_cost();

        for op in &ops {
            match op {
                SurgeryOp::AddPassive { passive, price } => {
                    effective = effective.union(&PassiveSet::from_ids(&[*passive])?)?;
                    cost = cost.saturating_add(*price);
                }
                SurgeryOp::SwapPassive { remove, add, price } => {
                    if !effective.contains(*remove) && *remove != RANDOM_PASSIVE_ID {
                        return Err(SolverError::Contract(format!(
                            "换除的词条{}不在集合里",
                            remove
                        )));
                    }
                    let removed = if *remove == RANDOM_PASSIVE_ID {
                        remove_one_random(&effective)?
                    } else {
                        effective.difference(&PassiveSet::from_ids(&[*remove])?)
                    };
                    effective = removed.union(&PassiveSet::from_ids(&[*add])?)?;
                    cost = cost.saturating_add(*price);
                }
                SurgeryOp::ForceGender { gender: g, price } => {
                    if !g.is_specific() {
                        return Err(SolverError::Contract(
                            "性别手术只能指定具体性别".to_string(),
                        ));
                    }
                    gender = *g;
                    cost = cost.saturating_add(*price);
                }
            }
        }

        Ok(SurgeryRef {
            input,
            ops,
            effective,
            gender,
            total_cost: cost,
        })
    }
}

// 去掉一份Random槽位（Random互不相等，difference去不掉它）
fn remove_one_random(set: &PassiveSet) -> SolverResult<PassiveSet> {
    let mut ids: SmallVec<[PassiveId; 8]> = set.iter().collect();
    match ids.iter().rposition(|&id| id == RANDOM_PASSIVE_ID) {
        Some(pos) => {
            ids.remove(pos);
            PassiveSet::from_ids(&ids)
        }
        None => Err(SolverError::Contract("集合里没有Random槽位".to_string())),
    }
}

impl PalReference {
    pub fn species_id(&self) -> SpeciesId {
        match self {
            PalReference::Owned(r) => r.instance.species,
            PalReference::Wild(r) => r.species,
            PalReference::Bred(r) => r.species,
            PalReference::Composite(r) => r.male.instance.species,
            PalReference::Surgery(r) => r.input.species_id(),
        }
    }

    pub fn gender(&self) -> Gender {
        match self {
            PalReference::Owned(r) => r.gender(),
            PalReference::Wild(r) => r.gender,
            PalReference::Bred(r) => r.gender,
            PalReference::Composite(_) => Gender::Wildcard,
            PalReference::Surgery(r) => r.gender,
        }
    }

    pub fn effective_passives(&self) -> &PassiveSet {
        match self {
            PalReference::Owned(r) => &r.effective,
            PalReference::Wild(r) => &r.effective,
            PalReference::Bred(r) => &r.effective,
            PalReference::Composite(r) => &r.effective,
            PalReference::Surgery(r) => &r.effective,
        }
    }

    // 实际视图：已拥有实例给全量词条，推导出来的引用只有有效视图可言
    pub fn actual_passives(&self) -> &PassiveSet {
        match self {
            PalReference::Owned(r) => &r.actual,
            _ => self.effective_passives(),
        }
    }

    pub fn ivs(&self) -> IvSet {
        match self {
            PalReference::Owned(r) => r.ivs,
            PalReference::Wild(_) => IvSet::UNCONSTRAINED,
            PalReference::Bred(r) => r.ivs,
            PalReference::Composite(r) => r.ivs,
            PalReference::Surgery(r) => r.input.ivs(),
        }
    }

    pub fn total_effort(&self) -> Effort {
        match self {
            PalReference::Owned(_) | PalReference::Composite(_) => Effort::ZERO,
            PalReference::Wild(r) => r.effort,
            PalReference::Bred(r) => r.total_effort,
            PalReference::Surgery(r) => r.input.total_effort(),
        }
    }

    pub fn total_cost(&self) -> u32 {
        match self {
            PalReference::Owned(_) | PalReference::Wild(_) | PalReference::Composite(_) => 0,
            PalReference::Bred(r) => r.total_cost,
            PalReference::Surgery(r) => r.total_cost,
        }
    }

    // 整棵树里的配种步数
    pub fn breeding_steps(&self) -> u8 {
        match self {
            PalReference::Owned(_) | PalReference::Wild(_) | PalReference::Composite(_) => 0,
            PalReference::Bred(r) => r.steps,
            PalReference::Surgery(r) => r.input.breeding_steps(),
        }
    }

    // 摊平整棵树最终消耗的叶子引用（Owned/Wild/Composite）
    // 剪枝管线用它推理位置/归属多样性
    pub fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a PalReference>) {
        match self {
            PalReference::Owned(_) | PalReference::Wild(_) | PalReference::Composite(_) => {
                out.push(self)
            }
            PalReference::Bred(r) => {
                r.parents.0.collect_leaves(out);
                r.parents.1.collect_leaves(out);
            }
            PalReference::Surgery(r) => r.input.collect_leaves(out),
        }
    }

    pub fn leaves(&self) -> Vec<&PalReference> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    // 性别特化：返回锁定到requested的等价引用，期望尝试次数按遗传概率放大。
    // male_probability是本物种的雄性概率（百分比）。
    // 已锁定到另一个具体性别的引用拒绝改写（契约违规）；
    // Owned拒绝与存档数据矛盾的性别。
    pub fn with_gender(
        &self,
        requested: Gender,
        male_probability: u8,
    ) -> SolverResult<PalReference> {
        if !requested.is_specific() {
            return Err(SolverError::Contract(
                "性别特化只接受具体性别".to_string(),
            ));
        }
        let current = self.gender();
        if current == requested {
            return Ok(self.clone());
        }
        if current.is_specific() {
            return Err(SolverError::Contract(format!(
                "引用已锁定为{}，不能改为{}",
                current, requested
            )));
        }

        let probability = gender_probability(requested, male_probability);
        match self {
            // current具体且不等的情况上面已经拦掉，这里只剩矛盾的Owned
            PalReference::Owned(_) => Err(SolverError::Contract(
                "已拥有实例的性别由存档决定，不能改写".to_string(),
            )),
            PalReference::Composite(r) => {
                // 两种性别都有现货，按需取用，零开销
                let side = match requested {
                    Gender::Male => r.male.clone(),
                    _ => r.female.clone(),
                };
                Ok(PalReference::Owned(side))
            }
            PalReference::Wild(r) => {
                let mut locked = *r;
                locked.gender = requested;
                locked.effort = r.effort.scaled_by_probability(probability);
                Ok(PalReference::Wild(locked))
            }
            PalReference::Bred(r) => {
                let mut locked = (**r).clone();
                locked.gender = requested;
                // 只有最后一步的期望尝试次数被放大，父母的积累不变
                let scaled_self = r.self_effort.scaled_by_probability(probability);
                let parents_part = Effort::from_seconds(
                    r.total_effort
                        .as_seconds()
                        .saturating_sub(r.self_effort.as_seconds()),
                );
                locked.self_effort = scaled_self;
                locked.total_effort = scaled_self.saturating_add(parents_part);
                Ok(PalReference::Bred(Box::new(locked)))
            }
            PalReference::Surgery(r) => {
                let specialized = r.input.with_gender(requested, male_probability)?;
                let rebuilt = SurgeryRef::new(specialized, r.ops.clone())?;
                Ok(PalReference::Surgery(Box::new(rebuilt)))
            }
        }
    }

    // 降级为"需要与对面相反的性别"。效率记账取最坏情况的性别概率。
    // 已拥有实例性别固定，合体引用两边都有货，两者都不需要降级。
    pub fn as_opposite_wildcard(&self, male_probability: u8) -> SolverResult<PalReference> {
        match self {
            PalReference::Owned(_) | PalReference::Composite(_) => Ok(self.clone()),
            _ if self.gender().is_specific() => Ok(self.clone()),
            PalReference::Wild(r) => {
                let mut adjusted = *r;
                adjusted.gender = Gender::OppositeWildcard;
                adjusted.effort = r
                    .effort
                    .scaled_by_probability(worst_case_gender_probability(male_probability));
                Ok(PalReference::Wild(adjusted))
            }
            PalReference::Bred(r) => {
                let mut adjusted = (**r).clone();
                adjusted.gender = Gender::OppositeWildcard;
                let scaled_self = r
                    .self_effort
                    .scaled_by_probability(worst_case_gender_probability(male_probability));
                let parents_part = Effort::from_seconds(
                    r.total_effort
                        .as_seconds()
                        .saturating_sub(r.self_effort.as_seconds()),
                );
                adjusted.self_effort = scaled_self;
                adjusted.total_effort = scaled_self.saturating_add(parents_part);
                Ok(PalReference::Bred(Box::new(adjusted)))
            }
            PalReference::Surgery(r) => {
                let adjusted = r.input.as_opposite_wildcard(male_probability)?;
                let rebuilt = SurgeryRef::new(adjusted, r.ops.clone())?;
                Ok(PalReference::Surgery(Box::new(rebuilt)))
            }
        }
    }
}

pub fn gender_probability(gender: Gender, male_probability: u8) -> Probability {
    let male = male_probability.min(100) as f64 / 100.0;
    match gender {
        Gender::Male => Probability::from_f64(male),
        Gender::Female => Probability::from_f64(1.0 - male),
        // 非具体性别不需要任何尝试就能满足
        _ => Probability::CERTAIN,
    }
}

fn worst_case_gender_probability(male_probability: u8) -> Probability {
    let male = male_probability.min(100) as f64 / 100.0;
    Probability::from_f64(male.min(1.0 - male))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{LocationKind, StorageLocation};

    fn instance(id: &str, species: SpeciesId, gender: OwnedGender, passives: &[PassiveId]) -> OwnedInstance {
        OwnedInstance {
            instance_id: id.to_string(),
            species,
            gender,
            passives: passives.to_vec(),
            iv_hp: 60,
            iv_attack: 50,
            iv_defense: 40,
            location: StorageLocation {
                kind: LocationKind::Palbox,
                label: None,
            },
            player: "player1".to_string(),
        }
    }

    fn owned(id: &str, species: SpeciesId, gender: OwnedGender, passives: &[PassiveId]) -> OwnedRef {
        OwnedRef::new(
            instance(id, species, gender, passives),
            &[1, 2],
            &IvThresholds::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_owned_ref_views() {
        let r = owned("a", 1, OwnedGender::Male, &[1, 99]);
        assert!(r.actual.contains(99));
        // 有效视图里99被抹成Random
        assert!(!r.effective.contains(99));
        assert!(r.effective.contains(1));
        assert_eq!(r.effective.random_count(), 1);
    }

    #[test]
    fn test_owned_rejects_contradicting_gender() {
        let male = PalReference::Owned(owned("a", 1, OwnedGender::Male, &[]));
        assert!(male.with_gender(Gender::Male, 50).is_ok());
        assert!(matches!(
            male.with_gender(Gender::Female, 50),
            Err(SolverError::Contract(_))
        ));
    }

    #[test]
    fn test_bred_parent_order_stable() {
        let a = PalReference::Owned(owned("a", 1, OwnedGender::Male, &[1]));
        let b = PalReference::Owned(owned("b", 2, OwnedGender::Female, &[2]));
        let effective = PassiveSet::from_ids(&[1, 2]).unwrap();
        let attempt = Effort::from_minutes(5.0);

        let ab = BredRef::new(
            3,
            a.clone(),
            b.clone(),
            effective,
            IvSet::UNCONSTRAINED,
            Probability::from_f64(0.25),
            attempt,
            true,
        )
        .unwrap();
        let ba = BredRef::new(
            3,
            b,
            a,
            effective,
            IvSet::UNCONSTRAINED,
            Probability::from_f64(0.25),
            attempt,
            true,
        )
        .unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_bred_effort_monotonic_in_parent_effort() {
        let cheap_wild = PalReference::Wild(WildRef::new(1, 0, Effort::from_minutes(10.0)).unwrap());
        let pricey_wild = PalReference::Wild(WildRef::new(1, 0, Effort::from_minutes(90.0)).unwrap());
        let partner = PalReference::Owned(owned("b", 2, OwnedGender::Female, &[]));
        let effective = PassiveSet::EMPTY;
        let p = Probability::from_f64(0.5);
        let attempt = Effort::from_minutes(5.0);

        for farms in [false, true] {
            let cheap = BredRef::new(
                3, cheap_wild.clone(), partner.clone(), effective,
                IvSet::UNCONSTRAINED, p, attempt, farms,
            )
            .unwrap();
            let pricey = BredRef::new(
                3, pricey_wild.clone(), partner.clone(), effective,
                IvSet::UNCONSTRAINED, p, attempt, farms,
            )
            .unwrap();
            assert!(pricey.total_effort >= cheap.total_effort);
        }
    }

    #[test]
    fn test_incompatible_parent_genders_rejected() {
        let a = PalReference::Owned(owned("a", 1, OwnedGender::Male, &[]));
        let b = PalReference::Owned(owned("b", 1, OwnedGender::Male, &[]));
        let result = BredRef::new(
            3, a, b, PassiveSet::EMPTY, IvSet::UNCONSTRAINED,
            Probability::CERTAIN, Effort::from_minutes(5.0), true,
        );
        assert!(matches!(result, Err(SolverError::Contract(_))));
    }

    #[test]
    fn test_wildcard_specialization_never_decreases_effort() {
        let wild = PalReference::Wild(WildRef::new(1, 1, Effort::from_minutes(30.0)).unwrap());
        let locked = wild.with_gender(Gender::Female, 30).unwrap();
        assert!(locked.total_effort() >= wild.total_effort());
        assert_eq!(locked.gender(), Gender::Female);
    }

    #[test]
    fn test_composite_covers_union_and_splits_free() {
        let male = owned("m", 1, OwnedGender::Male, &[1]);
        let female = owned("f", 1, OwnedGender::Female, &[2]);
        let composite = CompositeRef::new(male, female).unwrap();
        // 两侧各出一条期望词条，这对现货合起来覆盖{1, 2}
        assert!(composite.effective.contains(1));
        assert!(composite.effective.contains(2));

        let reference = PalReference::Composite(Box::new(composite));
        assert_eq!(reference.total_effort(), Effort::ZERO);
        let male_side = reference.with_gender(Gender::Male, 50).unwrap();
        assert_eq!(male_side.gender(), Gender::Male);
        assert_eq!(male_side.total_effort(), Effort::ZERO);
    }

    #[test]
    fn test_composite_requires_same_species_pair() {
        let male = owned("m", 1, OwnedGender::Male, &[]);
        let female = owned("f", 2, OwnedGender::Female, &[]);
        assert!(CompositeRef::new(male, female).is_err());
    }

    #[test]
    fn test_surgery_accumulates_cost_not_effort() {
        let wild = PalReference::Wild(WildRef::new(1, 1, Effort::from_minutes(20.0)).unwrap());
        let before = wild.total_effort();
        let ops: SmallVec<[SurgeryOp; 2]> = smallvec::smallvec![SurgeryOp::AddPassive {
            passive: 2,
            price: 10_000
        }];
        let surgery = SurgeryRef::new(wild, ops).unwrap();
        assert_eq!(surgery.total_cost, 10_000);

        let reference = PalReference::Surgery(Box::new(surgery));
        assert_eq!(reference.total_effort(), before);
        assert!(reference.effective_passives().contains(2));
    }

    #[test]
    fn test_surgery_swap_replaces_random_slot() {
        let wild = PalReference::Wild(WildRef::new(1, 2, Effort::from_minutes(20.0)).unwrap());
        let ops: SmallVec<[SurgeryOp; 2]> = smallvec::smallvec![SurgeryOp::SwapPassive {
            remove: RANDOM_PASSIVE_ID,
            add: 5,
            price: 50_000
        }];
        let surgery = SurgeryRef::new(wild, ops).unwrap();
        assert!(surgery.effective.contains(5));
        assert_eq!(surgery.effective.random_count(), 1);
    }

    #[test]
    fn test_leaves_flattened_through_tree() {
        let a = PalReference::Owned(owned("a", 1, OwnedGender::Male, &[1]));
        let b = PalReference::Wild(WildRef::new(2, 0, Effort::from_minutes(15.0)).unwrap());
        let bred = PalReference::Bred(Box::new(
            BredRef::new(
                3, a, b, PassiveSet::EMPTY, IvSet::UNCONSTRAINED,
                Probability::from_f64(0.5), Effort::from_minutes(5.0), true,
            )
            .unwrap(),
        ));
        let leaves = bred.leaves();
        assert_eq!(leaves.len(), 2);
        assert!(leaves.iter().any(|l| matches!(l, PalReference::Owned(_))));
        assert!(leaves.iter().any(|l| matches!(l, PalReference::Wild(_))));
    }
}
