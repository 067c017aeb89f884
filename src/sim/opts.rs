//! 仿真配置

use std::time::Duration;

use crate::dvr::MAX_ROUNDS;

/// DVR 仿真配置选项
#[derive(Debug, Clone)]
pub struct DvrOpts {
    /// 轮数上限（不超过 `MAX_ROUNDS`）
    pub max_rounds: u32,
    /// 驱动循环在两次 `step()` 之间的间隔，仅用于动画节奏
    pub step_delay: Duration,
}

impl Default for DvrOpts {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            step_delay: Duration::ZERO,
        }
    }
}
