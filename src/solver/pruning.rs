/*
* 剪枝管线
* 开发心理过程:
* 1. 有序的独立过滤阶段链，每一阶段只在前面留下的平局里继续收窄
* 2. 默认顺序固定：工时 > 步数 > IV > 花费 > 位置 > 复用 > 野捕数 > 玩家数 > 多样性 > 硬上限
* 3. 叶子摘要（位置层级、归属玩家、物种直方图）进管线前算一次，
*    各阶段共享，避免每个阶段都做O(深度)的树遍历
* 4. 所有键都是稳定的，绝不依赖到达顺序；协作取消时阶段原样返回输入，
*    调用方拿到"目前最好"的部分结果而不是异常
*/

use hashbrown::HashSet;
use log::{debug, warn};

use crate::catalog::SpeciesId;
use crate::core::cancel::CancellationToken;
use crate::core::config::SolverConfig;
use crate::pool::LocationKind;
use crate::reference::PalReference;
use crate::solver::TargetSpec;

// 进管线前为每个候选算好的叶子摘要
#[derive(Debug, Clone)]
pub struct LeafSummary {
    pub owned_leaf_ids: Vec<String>,
    pub distinct_players: usize,
    pub wild_count: usize,
    // 不在最优先层（帕鲁箱）的已有叶子数
    pub outside_preferred: usize,
    // 叶子物种出现直方图，物种id升序
    pub species_histogram: Vec<(SpeciesId, u32)>,
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub reference: PalReference,
    pub summary: LeafSummary,
}

pub fn summarize(reference: &PalReference) -> LeafSummary {
    let leaves = reference.leaves();
    let mut owned_leaf_ids = Vec::new();
    let mut players: HashSet<&str> = HashSet::new();
    let mut wild_count = 0usize;
    let mut outside_preferred = 0usize;
    let mut histogram: hashbrown::HashMap<SpeciesId, u32> = hashbrown::HashMap::new();

    for leaf in leaves {
        *histogram.entry(leaf.species_id()).or_insert(0) += 1;
        match leaf {
            PalReference::Owned(r) => {
                owned_leaf_ids.push(r.instance.instance_id.clone());
                players.insert(r.instance.player.as_str());
                if r.instance.location.kind.preference_tier()
                    > LocationKind::Palbox.preference_tier()
                {
                    outside_preferred += 1;
                }
            }
            PalReference::Composite(r) => {
                for side in [&r.male, &r.female] {
                    owned_leaf_ids.push(side.instance.instance_id.clone());
                    players.insert(side.instance.player.as_str());
                    if side.instance.location.kind.preference_tier()
                        > LocationKind::Palbox.preference_tier()
                    {
                        outside_preferred += 1;
                    }
                }
            }
            PalReference::Wild(_) => wild_count += 1,
            _ => {}
        }
    }

    let mut species_histogram: Vec<(SpeciesId, u32)> = histogram.into_iter().collect();
    species_histogram.sort_unstable();

    LeafSummary {
        owned_leaf_ids,
        distinct_players: players.len(),
        wild_count,
        outside_preferred,
        species_histogram,
    }
}

pub struct PruneContext<'a> {
    pub target: &'a TargetSpec,
    pub config: &'a SolverConfig,
    pub token: &'a CancellationToken,
}

pub trait PruningStage: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate>;
}

// 通用骨架：留下共享最小键值的候选
fn keep_minimal<K: Ord + Copy>(
    candidates: Vec<Candidate>,
    key: impl Fn(&Candidate) -> K,
) -> Vec<Candidate> {
    let minimum = match candidates.iter().map(&key).min() {
        Some(minimum) => minimum,
        None => return candidates,
    };
    candidates
        .into_iter()
        .filter(|c| key(c) == minimum)
        .collect()
}

pub struct MinimumEffortStage;

impl PruningStage for MinimumEffortStage {
    fn name(&self) -> &'static str {
        "minimum_effort"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        keep_minimal(candidates, |c| c.reference.total_effort())
    }
}

pub struct MinimumStepsStage;

impl PruningStage for MinimumStepsStage {
    fn name(&self) -> &'static str {
        "minimum_steps"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        keep_minimal(candidates, |c| c.reference.breeding_steps())
    }
}

// IV阶段不是纯最小键：与观测最优差距在容差内的都留下
pub struct IvOptimalityStage;

impl PruningStage for IvOptimalityStage {
    fn name(&self) -> &'static str {
        "iv_optimality"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        if !ctx.target.iv_thresholds.any_set() {
            return candidates;
        }
        let best = match candidates
            .iter()
            .map(|c| c.reference.ivs().relevant_floor())
            .max()
        {
            Some(best) => best,
            None => return candidates,
        };
        let tolerance = ctx.config.max_iv_tolerance as u32;
        candidates
            .into_iter()
            .filter(|c| c.reference.ivs().relevant_floor() + tolerance >= best)
            .collect()
    }
}

pub struct MinimumCostStage;

impl PruningStage for MinimumCostStage {
    fn name(&self) -> &'static str {
        "minimum_cost"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        keep_minimal(candidates, |c| c.reference.total_cost())
    }
}

pub struct LocationPreferenceStage;

impl PruningStage for LocationPreferenceStage {
    fn name(&self) -> &'static str {
        "location_preference"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        keep_minimal(candidates, |c| c.summary.outside_preferred)
    }
}

// 同一只已有帕鲁在一棵树里被引用多次，现实里要等它反复进出农场
pub struct MinimumReuseStage;

impl PruningStage for MinimumReuseStage {
    fn name(&self) -> &'static str {
        "minimum_reuse"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        keep_minimal(candidates, |c| {
            let distinct: HashSet<&str> = c
                .summary
                .owned_leaf_ids
                .iter()
                .map(|s| s.as_str())
                .collect();
            c.summary.owned_leaf_ids.len() - distinct.len()
        })
    }
}

pub struct MinimumWildStage;

impl PruningStage for MinimumWildStage {
    fn name(&self) -> &'static str {
        "minimum_wild"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        keep_minimal(candidates, |c| c.summary.wild_count)
    }
}

pub struct FewestPlayersStage;

impl PruningStage for FewestPlayersStage {
    fn name(&self) -> &'static str {
        "fewest_players"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        keep_minimal(candidates, |c| c.summary.distinct_players)
    }
}

// 贪心挑出彼此足够不像的子集（按叶子物种直方图），给用户几个真正不同的方案
pub struct DiversityStage;

fn histogram_similarity(a: &[(SpeciesId, u32)], b: &[(SpeciesId, u32)]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let mut overlap = 0u32;
    let mut total = 0u32;
    let mut i = 0usize;
    let mut j = 0usize;
    while i < a.len() || j < b.len() {
        match (a.get(i), b.get(j)) {
            (Some(&(sa, ca)), Some(&(sb, cb))) if sa == sb => {
                overlap += ca.min(cb);
                total += ca.max(cb);
                i += 1;
                j += 1;
            }
            (Some(&(sa, ca)), Some(&(sb, _))) if sa < sb => {
                total += ca;
                i += 1;
            }
            (Some(_), Some(&(_, cb))) => {
                total += cb;
                j += 1;
            }
            (Some(&(_, ca)), None) => {
                total += ca;
                i += 1;
            }
            (None, Some(&(_, cb))) => {
                total += cb;
                j += 1;
            }
            (None, None) => break,
        }
    }
    if total == 0 {
        1.0
    } else {
        overlap as f64 / total as f64
    }
}

impl PruningStage for DiversityStage {
    fn name(&self) -> &'static str {
        "diversity"
    }
    fn apply(&self, candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if candidates.len() <= 1 {
            return candidates;
        }
        let threshold = ctx.config.diversity_threshold;
        let mut kept: Vec<Candidate> = Vec::new();
        for candidate in &candidates {
            // 取消信号到来时原样交回输入
            if ctx.token.is_cancelled() {
                return candidates;
            }
            let too_similar = kept.iter().any(|k| {
                histogram_similarity(
                    &k.summary.species_histogram,
                    &candidate.summary.species_histogram,
                ) > threshold
            });
            if !too_similar {
                kept.push(candidate.clone());
            }
        }
        kept
    }
}

pub struct ResultCapStage;

impl PruningStage for ResultCapStage {
    fn name(&self) -> &'static str {
        "result_cap"
    }
    fn apply(&self, mut candidates: Vec<Candidate>, ctx: &PruneContext) -> Vec<Candidate> {
        if ctx.token.is_cancelled() {
            return candidates;
        }
        candidates.truncate(ctx.config.max_results);
        candidates
    }
}

pub struct PruningPipeline {
    stages: Vec<Box<dyn PruningStage>>,
}

impl Default for PruningPipeline {
    fn default() -> Self {
        PruningPipeline {
            stages: vec![
                Box::new(MinimumEffortStage),
                Box::new(MinimumStepsStage),
                Box::new(IvOptimalityStage),
                Box::new(MinimumCostStage),
                Box::new(LocationPreferenceStage),
                Box::new(MinimumReuseStage),
                Box::new(MinimumWildStage),
                Box::new(FewestPlayersStage),
                Box::new(DiversityStage),
                Box::new(ResultCapStage),
            ],
        }
    }
}

impl PruningPipeline {
    // 输入任意顺序的候选，输出按最终平局裁决排好的存活者
    pub fn run(&self, references: Vec<PalReference>, ctx: &PruneContext) -> Vec<PalReference> {
        let mut candidates: Vec<Candidate> = references
            .into_iter()
            .map(|reference| {
                let summary = summarize(&reference);
                Candidate { reference, summary }
            })
            .collect();

        // 稳定的全序排序：后续所有阶段都在确定性的顺序上工作
        candidates.sort_by(|a, b| {
            (
                a.reference.total_effort(),
                a.reference.breeding_steps(),
                a.reference.total_cost(),
            )
                .cmp(&(
                    b.reference.total_effort(),
                    b.reference.breeding_steps(),
                    b.reference.total_cost(),
                ))
                .then_with(|| a.reference.cmp(&b.reference))
        });

        for stage in &self.stages {
            if ctx.token.is_cancelled() {
                warn!("剪枝管线收到取消信号，跳过阶段 {} 及其后续", stage.name());
                break;
            }
            let before = candidates.len();
            candidates = stage.apply(candidates, ctx);
            debug!("剪枝阶段 {}: {} -> {}", stage.name(), before, candidates.len());
        }

        candidates.into_iter().map(|c| c.reference).collect()
    }
}
