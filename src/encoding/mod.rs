/*
 * Palbreed - 紧凑属性编码模块
 * 开发心理过程:
 * 1. 性别、IV区间、词条集合都是定宽值类型，全部无分配、全函数（构造后无部分输入）
 * 2. 词条集合用两条u64车道打包，集合代数常数时间完成
 * 3. 工时/概率用定点数表示，让引用类型能派生结构化相等和哈希
 */

pub mod effort;
pub mod gender;
pub mod iv;
pub mod passive_set;

pub use effort::{Effort, Probability};
pub use gender::Gender;
pub use iv::{IvProspect, IvRange, IvSet, IvThresholds};
pub use passive_set::{PassiveSet, PassiveSpec, MAX_PASSIVE_SLOTS, RANDOM_PASSIVE_ID};
