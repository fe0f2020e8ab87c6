use serde::{Deserialize, Serialize};

/// 回撤比例，从区间低点向上计算。
pub const RETRACEMENT_RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

/// 扩展比例 (完整 8 档)，从区间高点继续向外延伸。
pub const EXTENSION_RATIOS: [f64; 8] = [1.0, 1.236, 1.382, 1.5, 1.618, 1.786, 2.0, 2.618];

/// 斐波那契价位种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelKind {
    Retracement,
    Extension,
}

impl std::fmt::Display for LevelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelKind::Retracement => f.write_str("Retracement"),
            LevelKind::Extension => f.write_str("Extension"),
        }
    }
}

/// # Summary
/// 单个斐波那契价位。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub kind: LevelKind,
    pub ratio: f64,
    // 展示标签，例如 "Retracement 61.8%"
    pub label: String,
    // 完整精度价格
    pub price: f64,
}

/// # Summary
/// 一组 (high, low) 锚点对应的全部斐波那契价位。
///
/// # Invariants
/// - 先回撤后扩展，各自按固定比例顺序排列。
/// - 标签在集合内唯一；构造后不可修改。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FibonacciLevelSet {
    levels: Vec<FibonacciLevel>,
}

impl FibonacciLevelSet {
    /// 按标签查找价格。
    pub fn get(&self, label: &str) -> Option<f64> {
        self.levels
            .iter()
            .find(|level| level.label == label)
            .map(|level| level.price)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FibonacciLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<'a> IntoIterator for &'a FibonacciLevelSet {
    type Item = &'a FibonacciLevel;
    type IntoIter = std::slice::Iter<'a, FibonacciLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

/// # Summary
/// 根据区间高低点计算斐波那契回撤与扩展价位。
///
/// # Logic
/// 1. 回撤：`low + (high - low) * r`。
/// 2. 扩展：`high + (high - low) * (r - 1)`。
///
/// # Arguments
/// * `high`: 区间高点。
/// * `low`: 区间低点。
///
/// # Returns
/// 有序的价位集合。对任意实数输入都有定义：`high == low` 时所有价位都等于 `high`；
/// `high < low` 时得到方向反转但数学上一致的价位，是否允许由调用方决定。
pub fn calculate_fibonacci_levels(high: f64, low: f64) -> FibonacciLevelSet {
    let range = high - low;

    let retracements = RETRACEMENT_RATIOS.iter().map(|&ratio| FibonacciLevel {
        kind: LevelKind::Retracement,
        ratio,
        label: level_label(LevelKind::Retracement, ratio),
        price: low + range * ratio,
    });
    let extensions = EXTENSION_RATIOS.iter().map(|&ratio| FibonacciLevel {
        kind: LevelKind::Extension,
        ratio,
        label: level_label(LevelKind::Extension, ratio),
        price: high + range * (ratio - 1.0),
    });

    FibonacciLevelSet {
        levels: retracements.chain(extensions).collect(),
    }
}

/// 百分比保留一位小数，整数时省略 ".0"：0.618 -> "61.8"，0.5 -> "50"。
fn level_label(kind: LevelKind, ratio: f64) -> String {
    let pct = format!("{:.1}", ratio * 100.0);
    let pct = pct.strip_suffix(".0").unwrap_or(&pct);
    format!("{} {}%", kind, pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(level_label(LevelKind::Retracement, 0.236), "Retracement 23.6%");
        assert_eq!(level_label(LevelKind::Retracement, 0.5), "Retracement 50%");
        assert_eq!(level_label(LevelKind::Extension, 1.0), "Extension 100%");
        assert_eq!(level_label(LevelKind::Extension, 2.618), "Extension 261.8%");
    }
}
