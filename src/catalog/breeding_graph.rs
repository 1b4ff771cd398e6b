/*
* 配种图谱预言机
* 开发心理过程:
* 1. child_of：先查特例组合表，否则取配种力最接近双亲平均值的物种（平手取小id）
* 2. parents_of：构造时一次性枚举所有无序双亲对，建好逆向索引
* 3. min_breeding_distance：从起点物种出发、任选伙伴的BFS最短配种步数，
*    按起点缓存整行距离，搜索期间只读
* 4. 不可达返回None，调用方据此提前剪掉没有希望的配对
*/

use hashbrown::HashMap;
use log::debug;
use std::sync::RwLock;

use crate::catalog::{Catalog, SpeciesId};

pub struct BreedingGraph {
    // (a<=b)归一化的特例组合
    combos: HashMap<(SpeciesId, SpeciesId), SpeciesId>,
    // 配种力升序的(power, id)表，二分找最近
    powers: Vec<(u16, SpeciesId)>,
    // child -> 能产出它的(父, 母)物种对列表
    parents: HashMap<SpeciesId, Vec<(SpeciesId, SpeciesId)>>,
    // from -> (to -> 最短步数)
    distance_cache: RwLock<HashMap<SpeciesId, HashMap<SpeciesId, u8>>>,
}

impl BreedingGraph {
    pub fn new(catalog: &Catalog) -> Self {
        let mut combos = HashMap::new();
        for combo in &catalog.special_combos {
            let key = normalize_pair(combo.parent_a, combo.parent_b);
            combos.insert(key, combo.child);
        }

        let mut powers: Vec<(u16, SpeciesId)> = catalog
            .species
            .iter()
            .map(|s| (s.breeding_power, s.id))
            .collect();
        powers.sort_unstable();

        let graph = BreedingGraph {
            combos,
            powers,
            parents: HashMap::new(),
            distance_cache: RwLock::new(HashMap::new()),
        };

        // 逆向索引：n²对枚举，图鉴规模下完全可接受
        let mut parents: HashMap<SpeciesId, Vec<(SpeciesId, SpeciesId)>> = HashMap::new();
        let ids: Vec<SpeciesId> = catalog.species.iter().map(|s| s.id).collect();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i..] {
                let child = graph.child_of(a, b);
                parents.entry(child).or_default().push((a, b));
            }
        }
        debug!("配种图谱构建完成：{}个可产出物种", parents.len());

        BreedingGraph { parents, ..graph }
    }

    // 双亲物种 -> 孩子物种。对任何图鉴内物种全函数。
    pub fn child_of(&self, a: SpeciesId, b: SpeciesId) -> SpeciesId {
        if let Some(&child) = self.combos.get(&normalize_pair(a, b)) {
            return child;
        }

        let pa = self.power_of(a);
        let pb = self.power_of(b);
        let average = (pa as u32 + pb as u32 + 1) / 2;
        self.nearest_by_power(average as u16)
    }

    fn power_of(&self, id: SpeciesId) -> u16 {
        self.powers
            .iter()
            .find(|&&(_, s)| s == id)
            .map(|&(p, _)| p)
            .unwrap_or(0)
    }

    fn nearest_by_power(&self, target: u16) -> SpeciesId {
        let mut best: Option<(u32, SpeciesId)> = None;
        for &(power, id) in &self.powers {
            let diff = (power as i32 - target as i32).unsigned_abs();
            let candidate = (diff, id);
            best = Some(match best {
                // 平手取小id，保证确定性
                Some(current) if current <= candidate => current,
                _ => candidate,
            });
        }
        best.map(|(_, id)| id).unwrap_or(0)
    }

    // 能产出child的双亲物种对（无序，a<=b）
    pub fn parents_of(&self, child: SpeciesId) -> &[(SpeciesId, SpeciesId)] {
        self.parents
            .get(&child)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    // 从from出发（允许任选伙伴）到to的最短配种步数；不可达为None
    pub fn min_breeding_distance(&self, from: SpeciesId, to: SpeciesId) -> Option<u8> {
        if from == to {
            return Some(0);
        }

        {
            let cache = self.distance_cache.read().expect("距离缓存读锁中毒");
            if let Some(row) = cache.get(&from) {
                return row.get(&to).copied();
            }
        }

        let row = self.bfs_distances(from);
        let result = row.get(&to).copied();
        self.distance_cache
            .write()
            .expect("距离缓存写锁中毒")
            .insert(from, row);
        result
    }

    fn bfs_distances(&self, from: SpeciesId) -> HashMap<SpeciesId, u8> {
        let all: Vec<SpeciesId> = self.powers.iter().map(|&(_, id)| id).collect();
        let mut distances: HashMap<SpeciesId, u8> = HashMap::new();
        distances.insert(from, 0);
        let mut frontier = vec![from];

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for &current in &frontier {
                let depth = distances[&current];
                if depth == u8::MAX {
                    continue;
                }
                for &partner in &all {
                    let child = self.child_of(current, partner);
                    if let hashbrown::hash_map::Entry::Vacant(entry) = distances.entry(child) {
                        entry.insert(depth + 1);
                        next.push(child);
                    }
                }
            }
            frontier = next;
        }

        distances
    }
}

fn normalize_pair(a: SpeciesId, b: SpeciesId) -> (SpeciesId, SpeciesId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;

    #[test]
    fn test_child_is_symmetric() {
        let graph = BreedingGraph::new(builtin_catalog());
        for a in [1u16, 3, 7, 10] {
            for b in [2u16, 5, 9, 11] {
                assert_eq!(graph.child_of(a, b), graph.child_of(b, a));
            }
        }
    }

    #[test]
    fn test_special_combo_overrides_power() {
        let graph = BreedingGraph::new(builtin_catalog());
        // 演示组合：Mossanda(13) x Sparkit(12) -> Grizzbolt(14)
        assert_eq!(graph.child_of(13, 12), 14);
        assert_eq!(graph.child_of(12, 13), 14);
    }

    #[test]
    fn test_parents_inverse_consistent() {
        let graph = BreedingGraph::new(builtin_catalog());
        let child = graph.child_of(1, 3);
        let parents = graph.parents_of(child);
        assert!(parents
            .iter()
            .any(|&(a, b)| (a, b) == (1, 3) || (a, b) == (3, 1)));
    }

    #[test]
    fn test_distance_zero_to_self() {
        let graph = BreedingGraph::new(builtin_catalog());
        assert_eq!(graph.min_breeding_distance(5, 5), Some(0));
    }

    #[test]
    fn test_distance_one_for_direct_child() {
        let graph = BreedingGraph::new(builtin_catalog());
        let child = graph.child_of(1, 2);
        if child != 1 {
            assert_eq!(graph.min_breeding_distance(1, child), Some(1));
        }
    }

    #[test]
    fn test_distance_cached_consistently() {
        let graph = BreedingGraph::new(builtin_catalog());
        let first = graph.min_breeding_distance(1, 9);
        let second = graph.min_breeding_distance(1, 9);
        assert_eq!(first, second);
    }
}
