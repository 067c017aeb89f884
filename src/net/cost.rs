//! 代价类型
//!
//! `Cost` 显式区分“有限代价”和“不可达”，取代浮点 infinity 哨兵。

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DvrError, DvrResult};

/// 到某个目的的代价
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cost {
    Finite(f64),
    #[default]
    Unreachable,
}

impl Cost {
    pub const ZERO: Cost = Cost::Finite(0.0);

    pub fn is_finite(&self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    /// 有限代价的数值；不可达时为 `None`
    pub fn value(&self) -> Option<f64> {
        match *self {
            Cost::Finite(v) => Some(v),
            Cost::Unreachable => None,
        }
    }
}

// 代价永远不是 NaN（链路代价在入口处校验），因此可以给出全序。
impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Cost::Finite(a), Cost::Finite(b)) => a.partial_cmp(b),
            (Cost::Finite(_), Cost::Unreachable) => Some(Ordering::Less),
            (Cost::Unreachable, Cost::Finite(_)) => Some(Ordering::Greater),
            (Cost::Unreachable, Cost::Unreachable) => Some(Ordering::Equal),
        }
    }
}

impl Add<f64> for Cost {
    type Output = Cost;

    /// 和溢出为非有限值时视为不可达
    fn add(self, rhs: f64) -> Cost {
        match self {
            Cost::Finite(v) => {
                let sum = v + rhs;
                if sum.is_finite() { Cost::Finite(sum) } else { Cost::Unreachable }
            }
            Cost::Unreachable => Cost::Unreachable,
        }
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Cost::Finite(v) if v.fract() == 0.0 => write!(f, "{}", v as i64),
            Cost::Finite(v) => write!(f, "{v}"),
            Cost::Unreachable => f.write_str("∞"),
        }
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<f64>::deserialize(deserializer)? {
            Some(v) => Cost::Finite(v),
            None => Cost::Unreachable,
        })
    }
}

/// 校验链路代价：必须是正的有限数
pub(crate) fn validate_link_cost(cost: f64) -> DvrResult<f64> {
    if cost.is_finite() && cost > 0.0 {
        Ok(cost)
    } else {
        Err(DvrError::InvalidCost(cost.to_string()))
    }
}

/// 解析用户输入的链路代价
pub fn parse_cost(raw: &str) -> DvrResult<f64> {
    let trimmed = raw.trim();
    let cost = trimmed
        .parse::<f64>()
        .map_err(|_| DvrError::InvalidCost(trimmed.to_string()))?;
    validate_link_cost(cost)
}
