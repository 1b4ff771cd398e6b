/*
* 开发心理过程：
* 1. 一个实例最多8条被动词条，用两条u64车道（8个16位槽）打包整个集合
* 2. 已填槽位左对齐、按词条id升序；Random哨兵编码为0xFFFF，天然排在最大
* 3. Random表示"这个槽位被某个未知/不想要的词条占着"，它不等于任何词条，
*    包括另一个Random——所以去重永远不会合并Random
* 4. 构造时拒绝超过8条或含重复非Random词条的输入（契约违规，不静默截断）
* 5. 集合代数（并/交/差/包含/计数）都在定宽数组上完成，无堆分配
*/

use serde::{Deserialize, Serialize};

use crate::core::error::{SolverError, SolverResult};

pub type PassiveId = u16;

pub const MAX_PASSIVE_SLOTS: usize = 8;
pub const RANDOM_PASSIVE_ID: PassiveId = 0xFFFF;
const EMPTY_SLOT: u16 = 0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PassiveSet {
    lanes: [u64; 2],
}

impl PassiveSet {
    pub const EMPTY: PassiveSet = PassiveSet { lanes: [0, 0] };

    // 从词条id列表构造；id为0非法（0是空槽编码）
    pub fn from_ids(ids: &[PassiveId]) -> SolverResult<Self> {
        if ids.len() > MAX_PASSIVE_SLOTS {
            return Err(SolverError::Contract(format!(
                "词条集合最多{}条，收到{}条",
                MAX_PASSIVE_SLOTS,
                ids.len()
            )));
        }

        let mut slots = [EMPTY_SLOT; MAX_PASSIVE_SLOTS];
        for (i, &id) in ids.iter().enumerate() {
            if id == EMPTY_SLOT {
                return Err(SolverError::Contract("词条id不能为0".to_string()));
            }
            slots[i] = id;
        }
        slots[..ids.len()].sort_unstable();

        // 非Random词条不允许重复；Random允许任意多份
        for window in slots[..ids.len()].windows(2) {
            if window[0] == window[1] && window[0] != RANDOM_PASSIVE_ID {
                return Err(SolverError::Contract(format!(
                    "重复的词条id: {}",
                    window[0]
                )));
            }
        }

        Ok(Self::from_slots(&slots))
    }

    fn from_slots(slots: &[u16; MAX_PASSIVE_SLOTS]) -> Self {
        let mut lanes = [0u64; 2];
        for (i, &slot) in slots.iter().enumerate() {
            lanes[i >> 2] |= (slot as u64) << ((i & 3) * 16);
        }
        PassiveSet { lanes }
    }

    fn to_slots(self) -> [u16; MAX_PASSIVE_SLOTS] {
        let mut slots = [EMPTY_SLOT; MAX_PASSIVE_SLOTS];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = ((self.lanes[i >> 2] >> ((i & 3) * 16)) & 0xFFFF) as u16;
        }
        slots
    }

    pub fn count(&self) -> usize {
        self.to_slots().iter().filter(|&&s| s != EMPTY_SLOT).count()
    }

    pub fn random_count(&self) -> usize {
        self.to_slots()
            .iter()
            .filter(|&&s| s == RANDOM_PASSIVE_ID)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes == [0, 0]
    }

    // 成员测试；Random不等于任何词条，查询Random恒为false
    pub fn contains(&self, id: PassiveId) -> bool {
        if id == RANDOM_PASSIVE_ID || id == EMPTY_SLOT {
            return false;
        }
        self.to_slots().contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = PassiveId> {
        self.to_slots().into_iter().filter(|&s| s != EMPTY_SLOT)
    }

    // 并集：非Random去重，Random与任何一侧都保留双份
    // 结果超过8条是契约违规（调用方应先把集合压到游戏上限）
    pub fn union(&self, other: &PassiveSet) -> SolverResult<PassiveSet> {
        let a = self.to_slots();
        let b = other.to_slots();
        let mut merged = [EMPTY_SLOT; MAX_PASSIVE_SLOTS];
        let mut out = 0usize;

        let mut i = 0usize;
        let mut j = 0usize;
        loop {
            let x = if i < MAX_PASSIVE_SLOTS { a[i] } else { EMPTY_SLOT };
            let y = if j < MAX_PASSIVE_SLOTS { b[j] } else { EMPTY_SLOT };
            if x == EMPTY_SLOT && y == EMPTY_SLOT {
                break;
            }

            let pick = if y == EMPTY_SLOT || (x != EMPTY_SLOT && x <= y) {
                // 相等的非Random词条只保留一份
                if x == y && x != RANDOM_PASSIVE_ID {
                    j += 1;
                }
                i += 1;
                x
            } else {
                j += 1;
                y
            };

            if out >= MAX_PASSIVE_SLOTS {
                return Err(SolverError::Contract(
                    "词条并集超过8条槽位".to_string(),
                ));
            }
            merged[out] = pick;
            out += 1;
        }

        Ok(Self::from_slots(&merged))
    }

    // 交集：只有非Random词条可能相等
    pub fn intersect(&self, other: &PassiveSet) -> PassiveSet {
        let mut slots = [EMPTY_SLOT; MAX_PASSIVE_SLOTS];
        let mut out = 0usize;
        for id in self.iter() {
            if id != RANDOM_PASSIVE_ID && other.contains(id) {
                slots[out] = id;
                out += 1;
            }
        }
        Self::from_slots(&slots)
    }

    // 差集：self中不属于other的词条；Random不等于任何词条，全部保留
    pub fn difference(&self, other: &PassiveSet) -> PassiveSet {
        let mut slots = [EMPTY_SLOT; MAX_PASSIVE_SLOTS];
        let mut out = 0usize;
        for id in self.iter() {
            if id == RANDOM_PASSIVE_ID || !other.contains(id) {
                slots[out] = id;
                out += 1;
            }
        }
        Self::from_slots(&slots)
    }
}

// 相对于最多4条期望词条的紧凑视图：
// match_mask记录哪几条期望词条在场，slot_count记录实际占用槽位数，
// 有了这两个字节就能随时重建"有效"（只看期望，其余抹成Random）视图
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct PassiveSpec {
    pub match_mask: u8,
    pub slot_count: u8,
}

impl PassiveSpec {
    pub fn from_actual(desired: &[PassiveId], actual: &PassiveSet) -> Self {
        debug_assert!(desired.len() <= 4);
        let mut mask = 0u8;
        for (i, &id) in desired.iter().enumerate() {
            if actual.contains(id) {
                mask |= 1 << i;
            }
        }
        PassiveSpec {
            match_mask: mask,
            slot_count: actual.count() as u8,
        }
    }

    pub fn matched_count(&self) -> usize {
        self.match_mask.count_ones() as usize
    }

    // 有效视图：命中的期望词条 + 把其余占用槽位抹成Random
    pub fn effective(&self, desired: &[PassiveId]) -> SolverResult<PassiveSet> {
        let mut ids = smallvec::SmallVec::<[PassiveId; MAX_PASSIVE_SLOTS]>::new();
        for (i, &id) in desired.iter().enumerate() {
            if self.match_mask & (1 << i) != 0 {
                ids.push(id);
            }
        }
        let blanked = (self.slot_count as usize).saturating_sub(ids.len());
        for _ in 0..blanked {
            ids.push(RANDOM_PASSIVE_ID);
        }
        PassiveSet::from_ids(&ids)
    }
}
