/*
* 遗传概率模型
* 开发心理过程:
* 1. 所有概率按独立期望折算进标量工时，不模拟游戏的RNG
* 2. 词条遗传：孩子从双亲词条池里恰好抽中想要的那个子集的概率，
*    由"恰好直传k条"的权重表除以组合数得到
* 3. 野外捕捉：捕捉等级给出期望捕捉耗时，再除以"身上恰好滚出k条随机词条"的概率
* 4. 常数全部表驱动，换成实测数据只要改表
*/

use crate::encoding::effort::{Effort, Probability};

// 孩子恰好从双亲词条池直传0..=4条的权重
const DIRECT_INHERIT_WEIGHTS: [f64; 5] = [0.08, 0.22, 0.30, 0.25, 0.15];

// 野生个体身上恰好滚出0..=4条随机词条的概率
const WILD_PASSIVE_COUNT_PROB: [f64; 5] = [0.40, 0.30, 0.20, 0.08, 0.02];

// 捕捉等级1..=10对应的期望捕捉耗时（分钟），涵盖找怪、削血、丢球
const CAPTURE_MINUTES_BY_RANK: [f64; 10] =
    [3.0, 5.0, 8.0, 12.0, 18.0, 25.0, 35.0, 50.0, 70.0, 100.0];

// 游戏里每只帕鲁同时生效的词条上限
pub const GAME_PASSIVE_CAP: usize = 4;

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0f64;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

// 双亲合并词条池大小为pool_size时，孩子恰好继承指定的want条的概率
pub fn exact_subset_probability(pool_size: usize, want: usize) -> Probability {
    if want > GAME_PASSIVE_CAP || want > pool_size {
        return Probability::ZERO;
    }
    if pool_size == 0 {
        // 没有词条可传，空集必然出现
        return Probability::CERTAIN;
    }
    let ways = binomial(pool_size, want);
    if ways <= 0.0 {
        return Probability::ZERO;
    }
    Probability::from_f64(DIRECT_INHERIT_WEIGHTS[want] / ways)
}

pub fn wild_passive_probability(random_slots: u8) -> f64 {
    WILD_PASSIVE_COUNT_PROB
        .get(random_slots as usize)
        .copied()
        .unwrap_or(0.0)
}

pub fn expected_capture_minutes(capture_rank: u8) -> f64 {
    let index = capture_rank.clamp(1, 10) as usize - 1;
    CAPTURE_MINUTES_BY_RANK[index]
}

// 野外捕捉一只恰好带random_slots条随机词条的期望工时
pub fn wild_capture_effort(capture_rank: u8, random_slots: u8) -> Effort {
    let base = expected_capture_minutes(capture_rank);
    let probability = wild_passive_probability(random_slots);
    Effort::from_minutes(base).scaled_by_probability(Probability::from_f64(probability))
}
