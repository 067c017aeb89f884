//! 标识符类型
//!
//! 定义路由器的唯一标识符。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 路由器标识符
///
/// 按数值升序排序；DVR 每一轮按此顺序处理路由器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouterId(pub u32);

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
