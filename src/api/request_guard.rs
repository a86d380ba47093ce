// ==========================================
// 清运运营报表分析引擎 - 请求时序守卫
// ==========================================
// 职责: "最后请求胜出" 约束
// 场景: 用户快速连续改动日期范围, 两次计算可能乱序完成;
//       过期计算的结果不得覆盖更新请求的结果
// 规则: 发布结果前校验票据, 过期票据的结果直接丢弃, 不合并
// ==========================================

use std::sync::atomic::{AtomicU64, Ordering};

// ==========================================
// RequestGuard - 请求票据发放器
// ==========================================
#[derive(Debug, Default)]
pub struct RequestGuard {
    /// 最新票据号 (0 表示尚无请求)
    latest: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// 登记一次新请求, 返回其票据并使所有旧票据失效
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 计算完成后校验: 该票据是否仍是最新请求
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}
