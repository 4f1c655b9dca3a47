// ==========================================
// 车间生产跟踪系统 - 完成率规则
// ==========================================
// 规则: 完成率 = 生产数量 / 需求数量 × 100
// 红线: 需求数量 <= 0 时完成率固定为 0.0，不产生 NaN/inf
// ==========================================

/// 需求数量为 0 时的完成率
pub const ZERO_REQUIRED_PERCENTAGE: f64 = 0.0;

/// 计算完成率（百分比）
///
/// # 参数
/// - produced: 生产数量（单条或合计）
/// - required: 需求数量（单条快照或合计）
///
/// # 返回
/// - required > 0: produced / required × 100（可超过 100）
/// - 否则: ZERO_REQUIRED_PERCENTAGE
pub fn completion_percentage(produced: i64, required: i64) -> f64 {
    if required > 0 {
        (produced as f64 / required as f64) * 100.0
    } else {
        ZERO_REQUIRED_PERCENTAGE
    }
}
