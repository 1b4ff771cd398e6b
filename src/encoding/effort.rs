// 工时与概率的定点编码
// 开发心理：引用类型要派生结构化Eq/Hash，f64做不到，
// 所以工时用整秒、概率用十亿分之一(ppb)存储，计算时再转f64

use serde::{Deserialize, Serialize};

// 期望工时，单位秒
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Effort(u64);

impl Effort {
    pub const ZERO: Effort = Effort(0);

    pub fn from_minutes(minutes: f64) -> Self {
        if minutes <= 0.0 {
            return Effort(0);
        }
        // 超长工时饱和而不是溢出，这种候选反正会被剪掉
        let seconds = (minutes * 60.0).min(u64::MAX as f64 / 2.0);
        Effort(seconds.round() as u64)
    }

    pub fn from_seconds(seconds: u64) -> Self {
        Effort(seconds)
    }

    pub fn as_minutes(&self) -> f64 {
        self.0 as f64 / 60.0
    }

    pub fn as_seconds(&self) -> u64 {
        self.0
    }

    pub fn saturating_add(&self, other: Effort) -> Effort {
        Effort(self.0.saturating_add(other.0))
    }

    // 按概率缩放：期望尝试次数 = 1/p
    pub fn scaled_by_probability(&self, probability: Probability) -> Effort {
        let p = probability.as_f64();
        if p <= 0.0 {
            return Effort(u64::MAX / 2);
        }
        let scaled = (self.0 as f64 / p).min(u64::MAX as f64 / 2.0);
        Effort(scaled.round() as u64)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_minutes = self.0 / 60;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        if hours > 0 {
            write!(f, "{}h{:02}m", hours, minutes)
        } else {
            write!(f, "{}m", minutes)
        }
    }
}

// 单次尝试的成功概率，定点ppb，1_000_000_000 = 必然
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Probability(u32);

impl Probability {
    pub const CERTAIN: Probability = Probability(1_000_000_000);
    pub const ZERO: Probability = Probability(0);

    pub fn from_f64(p: f64) -> Self {
        let clamped = p.clamp(0.0, 1.0);
        Probability((clamped * 1_000_000_000.0).round() as u32)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}%", self.as_f64() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_minutes_roundtrip() {
        let effort = Effort::from_minutes(5.0);
        assert_eq!(effort.as_seconds(), 300);
        assert!((effort.as_minutes() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_effort_scaling() {
        let effort = Effort::from_minutes(5.0);
        let half = Probability::from_f64(0.5);
        assert_eq!(effort.scaled_by_probability(half).as_seconds(), 600);
        // 概率为零时饱和为巨大但有限的工时
        let scaled = effort.scaled_by_probability(Probability::ZERO);
        assert!(scaled.as_seconds() > Effort::from_minutes(1e9).as_seconds());
    }

    #[test]
    fn test_effort_saturating_add() {
        let big = Effort::from_seconds(u64::MAX - 10);
        let sum = big.saturating_add(Effort::from_seconds(100));
        assert_eq!(sum.as_seconds(), u64::MAX);
    }

    #[test]
    fn test_probability_clamped() {
        assert_eq!(Probability::from_f64(2.0), Probability::CERTAIN);
        assert_eq!(Probability::from_f64(-1.0), Probability::ZERO);
        assert!((Probability::from_f64(0.25).as_f64() - 0.25).abs() < 1e-6);
    }
}
