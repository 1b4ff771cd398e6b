/*
* 配种路径求解器
* 开发心理过程:
* 1. 逐代扩张工作集：第0代放进已有现货、雌雄合体和野捕计划，
*    之后每代把工作集里的引用两两配对生成新的配种引用
* 2. 物种级剪枝先行：孩子物种到目标的最短配种距离超过剩余步数的配对整对跳过，
*    引用级的笛卡尔积只在有希望的物种对上展开
* 3. 配对展开纯函数、无共享可变状态，rayon按对并行，收集后统一排序去重保证确定性
* 4. 性别在配对时才解决：具体对具体直接用，自由一侧按遗传概率折算期望尝试次数
* 5. 取消与不可达都不是错误：随时交出目前为止的（可能为空的）结果
*/

pub mod inheritance;
pub mod pruning;
pub mod surgery;

use hashbrown::HashSet;
use indexmap::IndexMap;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::{BreedingGraph, Catalog, SpeciesId};
use crate::core::cancel::CancellationToken;
use crate::core::config::SolverConfig;
use crate::core::error::{SolverError, SolverResult};
use crate::encoding::effort::{Effort, Probability};
use crate::encoding::gender::Gender;
use crate::encoding::iv::IvThresholds;
use crate::encoding::passive_set::{PassiveId, PassiveSet, RANDOM_PASSIVE_ID};
use crate::pool::{OwnedGender, PalPool};
use crate::reference::tree::BreedingTree;
use crate::reference::{BredRef, CompositeRef, OwnedRef, PalReference, WildRef};
use crate::solver::inheritance::{exact_subset_probability, wild_capture_effort, GAME_PASSIVE_CAP};
use crate::solver::pruning::{PruneContext, PruningPipeline};
use crate::solver::surgery::surgery_variants;

// 用户想要的那只帕鲁
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSpec {
    pub species: SpeciesId,
    #[serde(default)]
    pub desired_passives: Vec<PassiveId>,
    #[serde(default)]
    pub iv_thresholds: IvThresholds,
    // None表示性别无所谓
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl TargetSpec {
    pub fn validate(&self, catalog: &Catalog) -> SolverResult<()> {
        catalog
            .species(self.species)
            .map_err(|e| SolverError::InvalidTarget(e.to_string()))?;

        if self.desired_passives.len() > GAME_PASSIVE_CAP {
            return Err(SolverError::InvalidTarget(format!(
                "期望词条最多{}条，给了{}条",
                GAME_PASSIVE_CAP,
                self.desired_passives.len()
            )));
        }
        let mut sorted = self.desired_passives.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(SolverError::InvalidTarget("期望词条不能重复".to_string()));
        }
        for &id in &self.desired_passives {
            if id == 0 || id == RANDOM_PASSIVE_ID {
                return Err(SolverError::InvalidTarget(format!("非法词条id: {}", id)));
            }
            catalog
                .passive(id)
                .map_err(|e| SolverError::InvalidTarget(e.to_string()))?;
        }

        if let Some(gender) = self.gender {
            if !gender.is_specific() {
                return Err(SolverError::InvalidTarget(
                    "目标性别只能是具体的公或母".to_string(),
                ));
            }
        }

        self.iv_thresholds
            .validate()
            .map_err(SolverError::InvalidTarget)?;
        Ok(())
    }
}

pub struct BreedingSolver<'a> {
    catalog: &'a Catalog,
    graph: BreedingGraph,
    config: SolverConfig,
}

impl<'a> BreedingSolver<'a> {
    pub fn new(catalog: &'a Catalog, config: SolverConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(BreedingSolver {
            catalog,
            graph: BreedingGraph::new(catalog),
            config,
        })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    // 求解入口：返回按剪枝管线裁决排好的获取方案，不可达时为空
    pub fn solve(
        &self,
        pool: &PalPool,
        target: &TargetSpec,
        token: &CancellationToken,
    ) -> SolverResult<Vec<PalReference>> {
        target.validate(self.catalog)?;
        let _profiler = crate::PerformanceProfiler::new("solve");

        // IndexMap保持插入顺序，整个搜索的遍历顺序与输入一一对应
        let mut working: IndexMap<SpeciesId, Vec<PalReference>> = IndexMap::new();
        let mut seen: HashSet<PalReference> = HashSet::new();

        let seeded = self.seed_generation_zero(pool, target, &mut working, &mut seen)?;
        info!(
            "第0代工作集就绪：{}个物种，共{}条引用",
            working.len(),
            working.values().map(Vec::len).sum::<usize>()
        );

        // 满足目标的候选单独保管，每代结束走一遍剪枝管线压住内存
        let mut candidates = self.collect_target_candidates(&seeded, target)?;
        candidates = self.prune_candidates(candidates, target, token);

        let attempt = Effort::from_minutes(self.config.breeding_attempt_minutes);
        for generation in 1..=self.config.max_breeding_steps {
            if token.is_cancelled() {
                warn!("第{}代开始前收到取消信号，停止扩张", generation);
                break;
            }
            let remaining = self.config.max_breeding_steps - generation;

            let produced = self.expand_generation(&working, target, attempt, remaining, token)?;

            let mut fresh: Vec<PalReference> = Vec::new();
            for reference in produced {
                if seen.insert(reference.clone()) {
                    fresh.push(reference);
                }
            }
            // 目标物种的新引用立刻尝试用手术填平剩余差距
            let mut surgical: Vec<PalReference> = Vec::new();
            for reference in &fresh {
                if reference.species_id() == target.species {
                    for variant in surgery_variants(reference, target, self.catalog, &self.config)?
                    {
                        if seen.insert(variant.clone()) {
                            surgical.push(variant);
                        }
                    }
                }
            }
            fresh.extend(surgical);

            if fresh.is_empty() {
                debug!("第{}代没有产生新引用，工作集到达不动点", generation);
                break;
            }
            debug!("第{}代新增{}条引用", generation, fresh.len());

            let new_candidates = self.collect_target_candidates(&fresh, target)?;
            if !new_candidates.is_empty() {
                candidates.extend(new_candidates);
                candidates = self.prune_candidates(candidates, target, token);
            }

            for reference in fresh {
                working
                    .entry(reference.species_id())
                    .or_default()
                    .push(reference);
            }
            self.cap_working_set(&mut working);
        }

        info!("求解完成，保留{}个方案", candidates.len());
        Ok(candidates)
    }

    // 求解并直接物化为可展示的配种树
    pub fn solve_trees(
        &self,
        pool: &PalPool,
        target: &TargetSpec,
        token: &CancellationToken,
    ) -> SolverResult<Vec<BreedingTree>> {
        let results = self.solve(pool, target, token)?;
        Ok(results
            .iter()
            .map(|r| BreedingTree::from_reference(r, self.catalog))
            .collect())
    }

    // 物种离目标太远（或根本到不了）就不值得进工作集
    fn reachable(&self, species: SpeciesId, target: SpeciesId) -> bool {
        species == target
            || matches!(
                self.graph.min_breeding_distance(species, target),
                Some(d) if d <= self.config.max_breeding_steps
            )
    }

    fn seed_generation_zero(
        &self,
        pool: &PalPool,
        target: &TargetSpec,
        working: &mut IndexMap<SpeciesId, Vec<PalReference>>,
        seen: &mut HashSet<PalReference>,
    ) -> SolverResult<Vec<PalReference>> {
        // 已有现货
        let mut owned_by_species: IndexMap<SpeciesId, Vec<OwnedRef>> = IndexMap::new();
        for instance in &pool.instances {
            if !self.reachable(instance.species, target.species) {
                continue;
            }
            let owned = OwnedRef::new(
                instance.clone(),
                &target.desired_passives,
                &target.iv_thresholds,
            )?;
            owned_by_species
                .entry(instance.species)
                .or_default()
                .push(owned);
        }

        let mut seeds: Vec<PalReference> = Vec::new();
        for refs in owned_by_species.values() {
            // 同物种的一公一母配成合体引用，免掉凑相反性别的冗余步骤
            for male in refs.iter().filter(|r| r.instance.gender == OwnedGender::Male) {
                for female in refs
                    .iter()
                    .filter(|r| r.instance.gender == OwnedGender::Female)
                {
                    let composite = CompositeRef::new(male.clone(), female.clone())?;
                    seeds.push(PalReference::Composite(Box::new(composite)));
                }
            }
            for owned in refs {
                seeds.push(PalReference::Owned(owned.clone()));
            }
        }

        // 野外捕捉计划
        if self.config.allow_wild_pals {
            for species in &self.catalog.species {
                if !self.reachable(species.id, target.species) {
                    continue;
                }
                let effort = wild_capture_effort(species.capture_rank, 0);
                seeds.push(PalReference::Wild(WildRef::new(species.id, 0, effort)?));
            }
        }

        let mut fresh: Vec<PalReference> = Vec::new();
        for seed in seeds {
            if seen.insert(seed.clone()) {
                fresh.push(seed);
            }
        }
        // 第0代的目标物种引用同样有手术机会
        let mut surgical: Vec<PalReference> = Vec::new();
        for reference in &fresh {
            if reference.species_id() == target.species {
                for variant in surgery_variants(reference, target, self.catalog, &self.config)? {
                    if seen.insert(variant.clone()) {
                        surgical.push(variant);
                    }
                }
            }
        }
        fresh.extend(surgical);

        for reference in &fresh {
            working
                .entry(reference.species_id())
                .or_default()
                .push(reference.clone());
        }
        self.cap_working_set(working);
        Ok(fresh)
    }

    // 一代配对展开：物种对级距离剪枝 + 引用对级并行展开
    fn expand_generation(
        &self,
        working: &IndexMap<SpeciesId, Vec<PalReference>>,
        target: &TargetSpec,
        attempt: Effort,
        remaining: u8,
        token: &CancellationToken,
    ) -> SolverResult<Vec<PalReference>> {
        let mut keys: Vec<SpeciesId> = working.keys().copied().collect();
        keys.sort_unstable();

        let mut tasks: Vec<(&PalReference, &PalReference)> = Vec::new();
        for (index, &species_a) in keys.iter().enumerate() {
            for &species_b in &keys[index..] {
                let child = self.graph.child_of(species_a, species_b);
                let viable = child == target.species
                    || matches!(
                        self.graph.min_breeding_distance(child, target.species),
                        Some(d) if d <= remaining
                    );
                if !viable {
                    continue;
                }
                let refs_a = &working[&species_a];
                if species_a == species_b {
                    for i in 0..refs_a.len() {
                        for j in i..refs_a.len() {
                            // 自己配自己只对野捕计划有意义（抓两只）
                            if i == j && !matches!(refs_a[i], PalReference::Wild(_)) {
                                continue;
                            }
                            tasks.push((&refs_a[i], &refs_a[j]));
                        }
                    }
                } else {
                    for ref_a in refs_a {
                        for ref_b in &working[&species_b] {
                            tasks.push((ref_a, ref_b));
                        }
                    }
                }
            }
        }

        let expanded: SolverResult<Vec<Option<PalReference>>> = tasks
            .par_iter()
            .map(|&(a, b)| {
                if token.is_cancelled() {
                    return Ok(None);
                }
                self.expand_pair(a, b, target, attempt)
            })
            .collect();

        let mut produced: Vec<PalReference> = expanded?.into_iter().flatten().collect();
        // 并行收集顺序不定，排序去重换回确定性
        produced.sort_unstable();
        produced.dedup();
        Ok(produced)
    }

    fn expand_pair(
        &self,
        a: &PalReference,
        b: &PalReference,
        target: &TargetSpec,
        attempt: Effort,
    ) -> SolverResult<Option<PalReference>> {
        let (parent_a, parent_b) = match self.resolve_pair(a, b)? {
            Some(pair) => pair,
            None => return Ok(None),
        };

        let child = self.graph.child_of(a.species_id(), b.species_id());
        let (effective, probability) = self.child_passives(child, &parent_a, &parent_b, target)?;
        let ivs = parent_a.ivs().merge(&parent_b.ivs());

        let bred = BredRef::new(
            child,
            parent_a,
            parent_b,
            effective,
            ivs,
            probability,
            attempt,
            self.config.multiple_breeding_farms,
        )?;
        if bred.steps > self.config.max_breeding_steps {
            return Ok(None);
        }
        Ok(Some(PalReference::Bred(Box::new(bred))))
    }

    // 把一对引用的性别解决成可以同时上农场的状态
    fn resolve_pair(
        &self,
        a: &PalReference,
        b: &PalReference,
    ) -> SolverResult<Option<(PalReference, PalReference)>> {
        let gender_a = a.gender();
        let gender_b = b.gender();
        if !gender_a.compatible_with(&gender_b) {
            return Ok(None);
        }

        match (gender_a.is_specific(), gender_b.is_specific()) {
            (true, true) => Ok(Some((a.clone(), b.clone()))),
            (true, false) => {
                let male_probability = self.catalog.species(b.species_id())?.male_probability;
                match b.with_gender(gender_a.opposite(), male_probability) {
                    Ok(locked) => Ok(Some((a.clone(), locked))),
                    Err(SolverError::Contract(_)) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            (false, true) => {
                let male_probability = self.catalog.species(a.species_id())?.male_probability;
                match a.with_gender(gender_b.opposite(), male_probability) {
                    Ok(locked) => Ok(Some((locked, b.clone()))),
                    Err(SolverError::Contract(_)) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            (false, false) => {
                if gender_a == Gender::Wildcard && gender_b == Gender::Wildcard {
                    // 两侧都自由：留一侧当锚点，另一侧降级为"要相反性别的那只"
                    let male_probability = self.catalog.species(b.species_id())?.male_probability;
                    let adjusted = b.as_opposite_wildcard(male_probability)?;
                    Ok(Some((a.clone(), adjusted)))
                } else {
                    // 已有一侧是OppositeWildcard，锚点已经齐了
                    Ok(Some((a.clone(), b.clone())))
                }
            }
        }
    }

    // 孩子的有效词条视图与单次命中概率：
    // 保底词条白拿，其余期望命中要从双亲词条池里恰好抽出来
    fn child_passives(
        &self,
        child: SpeciesId,
        parent_a: &PalReference,
        parent_b: &PalReference,
        target: &TargetSpec,
    ) -> SolverResult<(PassiveSet, Probability)> {
        let species = self.catalog.species(child)?;
        let mut guaranteed: SmallVec<[PassiveId; 4]> = species
            .guaranteed_passives
            .iter()
            .copied()
            .filter(|id| target.desired_passives.contains(id))
            .collect();
        guaranteed.sort_unstable();
        guaranteed.dedup();

        let mut inherited: SmallVec<[PassiveId; 8]> = SmallVec::new();
        for id in parent_a
            .effective_passives()
            .iter()
            .chain(parent_b.effective_passives().iter())
        {
            if id != RANDOM_PASSIVE_ID && !guaranteed.contains(&id) && !inherited.contains(&id) {
                inherited.push(id);
            }
        }
        inherited.sort_unstable();

        let pool_size = inherited.len();
        let free_slots = GAME_PASSIVE_CAP.saturating_sub(guaranteed.len());
        // 槽位装不下的部分放弃掉，保留id最小的那些以保证确定性
        inherited.truncate(free_slots);
        let probability = exact_subset_probability(pool_size, inherited.len());

        let mut ids: SmallVec<[PassiveId; 8]> = guaranteed.iter().copied().collect();
        ids.extend(inherited);
        ids.sort_unstable();
        let effective = PassiveSet::from_ids(&ids)?;
        Ok((effective, probability))
    }

    // 每个物种按(工时, 步数, 花费)留下最好的一批，防止代际爆炸
    fn cap_working_set(&self, working: &mut IndexMap<SpeciesId, Vec<PalReference>>) {
        for refs in working.values_mut() {
            refs.sort_by(|x, y| {
                (x.total_effort(), x.breeding_steps(), x.total_cost())
                    .cmp(&(y.total_effort(), y.breeding_steps(), y.total_cost()))
                    .then_with(|| x.cmp(y))
            });
            refs.truncate(self.config.max_refs_per_species);
        }
    }

    // 从一批新引用里挑出满足目标的候选：性别特化、期望词条全覆盖、IV门槛
    fn collect_target_candidates(
        &self,
        fresh: &[PalReference],
        target: &TargetSpec,
    ) -> SolverResult<Vec<PalReference>> {
        let male_probability = self.catalog.species(target.species)?.male_probability;
        let mut candidates: Vec<PalReference> = Vec::new();

        for reference in fresh {
            if reference.species_id() != target.species {
                continue;
            }
            let specialized = match target.gender {
                Some(wanted) => match reference.with_gender(wanted, male_probability) {
                    Ok(locked) => locked,
                    // 锁死在相反性别的候选直接淘汰
                    Err(SolverError::Contract(_)) => continue,
                    Err(e) => return Err(e),
                },
                None => reference.clone(),
            };

            let effective = specialized.effective_passives();
            let covers = target
                .desired_passives
                .iter()
                .all(|&id| effective.contains(id));
            let ivs_ok = !target.iv_thresholds.any_set()
                || specialized.ivs().satisfies(&target.iv_thresholds);
            if covers && ivs_ok {
                candidates.push(specialized);
            }
        }
        Ok(candidates)
    }

    fn prune_candidates(
        &self,
        mut candidates: Vec<PalReference>,
        target: &TargetSpec,
        token: &CancellationToken,
    ) -> Vec<PalReference> {
        // 性别特化可能把合体引用折叠成已在列表里的现货，去掉结构化重复
        candidates.sort_unstable();
        candidates.dedup();
        let ctx = PruneContext {
            target,
            config: &self.config,
            token,
        };
        PruningPipeline::default().run(candidates, &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::pool::{LocationKind, OwnedInstance, StorageLocation};

    fn instance(
        id: &str,
        species: SpeciesId,
        gender: OwnedGender,
        passives: &[PassiveId],
    ) -> OwnedInstance {
        OwnedInstance {
            instance_id: id.to_string(),
            species,
            gender,
            passives: passives.to_vec(),
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

    fn solver(config: SolverConfig) -> BreedingSolver<'static> {
        BreedingSolver::new(builtin_catalog(), config).unwrap()
    }

    #[test]
    fn test_target_validation() {
        let catalog = builtin_catalog();
        let good = TargetSpec {
            species: 1,
            desired_passives: vec![1, 2],
            iv_thresholds: IvThresholds::default(),
            gender: Some(Gender::Male),
        };
        assert!(good.validate(catalog).is_ok());

        let dup = TargetSpec {
            desired_passives: vec![1, 1],
            ..good.clone()
        };
        assert!(matches!(
            dup.validate(catalog),
            Err(SolverError::InvalidTarget(_))
        ));

        let unknown_species = TargetSpec {
            species: 9999,
            ..good.clone()
        };
        assert!(unknown_species.validate(catalog).is_err());

        let vague_gender = TargetSpec {
            gender: Some(Gender::Wildcard),
            ..good
        };
        assert!(vague_gender.validate(catalog).is_err());
    }

    #[test]
    fn test_owned_exact_match_is_free() {
        let s = solver(SolverConfig::default());
        let pool = PalPool {
            instances: vec![instance("a", 1, OwnedGender::Male, &[1, 2])],
        };
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![1, 2],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let results = s.solve(&pool, &target, &CancellationToken::new()).unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].total_effort(), Effort::ZERO);
        assert!(matches!(results[0], PalReference::Owned(_)));
    }

    #[test]
    fn test_composite_outranks_bred_pair() {
        let s = solver(SolverConfig::default());
        // 一公一母各带一条期望词条：合体引用零工时零花费覆盖{1,2}
        let pool = PalPool {
            instances: vec![
                instance("m", 1, OwnedGender::Male, &[1]),
                instance("f", 1, OwnedGender::Female, &[2]),
            ],
        };
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![1, 2],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let results = s.solve(&pool, &target, &CancellationToken::new()).unwrap();
        assert!(!results.is_empty());
        assert!(matches!(results[0], PalReference::Composite(_)));
        assert_eq!(results[0].total_effort(), Effort::ZERO);
        assert_eq!(results[0].total_cost(), 0);
    }

    #[test]
    fn test_bred_path_carries_both_parents_passives() {
        // 关掉手术，强迫答案走配种：两条期望词条分别在不同物种的亲本身上
        let s = solver(SolverConfig {
            max_surgery_ops: 0,
            allow_wild_pals: false,
            ..Default::default()
        });
        let pool = PalPool {
            instances: vec![
                instance("m", 1, OwnedGender::Male, &[1]),
                instance("f", 2, OwnedGender::Female, &[2]),
            ],
        };
        // Lamball x Cattiva 的孩子按配种力平手取小id，还是Lamball
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![1, 2],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let results = s.solve(&pool, &target, &CancellationToken::new()).unwrap();
        assert!(!results.is_empty());
        assert!(matches!(results[0], PalReference::Bred(_)));
        assert!(results[0].effective_passives().contains(1));
        assert!(results[0].effective_passives().contains(2));
        assert!(results[0].total_effort() > Effort::ZERO);
    }

    #[test]
    fn test_special_combo_path_found() {
        let s = solver(SolverConfig {
            allow_wild_pals: false,
            ..Default::default()
        });
        let pool = PalPool {
            instances: vec![
                instance("m", 13, OwnedGender::Male, &[]),
                instance("f", 12, OwnedGender::Female, &[]),
            ],
        };
        // Grizzbolt只能从Mossanda x Sparkit的特例组合孵出来
        let target = TargetSpec {
            species: 14,
            desired_passives: vec![],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let results = s.solve(&pool, &target, &CancellationToken::new()).unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].species_id(), 14);
        assert_eq!(results[0].breeding_steps(), 1);
    }

    #[test]
    fn test_unreachable_is_empty_not_error() {
        let s = solver(SolverConfig {
            allow_wild_pals: false,
            ..Default::default()
        });
        let target = TargetSpec {
            species: 14,
            desired_passives: vec![],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let results = s
            .solve(&PalPool::default(), &target, &CancellationToken::new())
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_wild_capture_when_pool_empty() {
        let s = solver(SolverConfig::default());
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let results = s
            .solve(&PalPool::default(), &target, &CancellationToken::new())
            .unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].species_id(), 1);
        assert!(matches!(results[0], PalReference::Wild(_)));
    }

    #[test]
    fn test_gender_requirement_filters_locked_candidates() {
        let s = solver(SolverConfig {
            allow_wild_pals: false,
            max_surgery_ops: 0,
            ..Default::default()
        });
        let pool = PalPool {
            instances: vec![instance("f", 1, OwnedGender::Female, &[])],
        };
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![],
            iv_thresholds: IvThresholds::default(),
            gender: Some(Gender::Male),
        };
        // 只有一只母的，不许野捕也不许手术：没有办法给出公的
        let results = s.solve(&pool, &target, &CancellationToken::new()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_gender_surgery_closes_locked_gender() {
        // 同样的局面放开手术预算：一刀性别手术就是答案
        let s = solver(SolverConfig {
            allow_wild_pals: false,
            ..Default::default()
        });
        let pool = PalPool {
            instances: vec![instance("f", 1, OwnedGender::Female, &[])],
        };
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![],
            iv_thresholds: IvThresholds::default(),
            gender: Some(Gender::Male),
        };
        let results = s.solve(&pool, &target, &CancellationToken::new()).unwrap();
        assert!(!results.is_empty());
        assert!(matches!(results[0], PalReference::Surgery(_)));
        assert_eq!(results[0].gender(), Gender::Male);
        assert!(results[0].total_cost() > 0);
        assert_eq!(results[0].total_effort(), Effort::ZERO);
    }

    #[test]
    fn test_gender_requirement_satisfied_by_wild() {
        let s = solver(SolverConfig::default());
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![],
            iv_thresholds: IvThresholds::default(),
            gender: Some(Gender::Male),
        };
        let results = s
            .solve(&PalPool::default(), &target, &CancellationToken::new())
            .unwrap();
        assert!(!results.is_empty());
        for reference in &results {
            assert_eq!(reference.gender(), Gender::Male);
        }
    }

    #[test]
    fn test_cancelled_solve_is_ok_not_error() {
        let s = solver(SolverConfig::default());
        let token = CancellationToken::new();
        token.cancel();
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let result = s.solve(&PalPool::default(), &target, &token);
        assert!(result.is_ok());
    }

    #[test]
    fn test_iv_threshold_rejects_unconstrained_sources() {
        let s = solver(SolverConfig::default());
        let pool = PalPool {
            instances: vec![instance("a", 1, OwnedGender::Male, &[])],
        };
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![],
            iv_thresholds: IvThresholds {
                hp: Some(60),
                attack: None,
                defense: None,
            },
            gender: None,
        };
        // 现货HP只有50，野捕完全随机：两类来源都过不了60的门槛
        let results = s.solve(&pool, &target, &CancellationToken::new()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_solve_trees_materializes_results() {
        let s = solver(SolverConfig::default());
        let pool = PalPool {
            instances: vec![instance("a", 1, OwnedGender::Male, &[1])],
        };
        let target = TargetSpec {
            species: 1,
            desired_passives: vec![1],
            iv_thresholds: IvThresholds::default(),
            gender: None,
        };
        let trees = s
            .solve_trees(&pool, &target, &CancellationToken::new())
            .unwrap();
        assert!(!trees.is_empty());
        assert_eq!(trees[0].breeding_steps, 0);
        assert!(trees[0].render_text().contains("Lamball"));
    }
}
