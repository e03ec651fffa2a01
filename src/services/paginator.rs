//! 累加式分页器 - 业务能力层
//!
//! ## 职责
//!
//! 沿 offset 逐页拉取活性记录，过滤无效记录，按分子 ID 去重写入累加器，
//! 直到收集够目标数量或 offset 超过安全上限。
//!
//! ## 循环规则
//!
//! 1. 每一轮无论成功失败，offset 都前进 `page_size`，
//!    失败的页不会在同一 offset 重试
//! 2. 网络错误 / 非 200 状态 / JSON 解析失败只记录日志并跳过该页
//! 3. 页内记录按顺序处理，累加器满了立即停止处理剩余记录
//! 4. 每一轮结束后固定等待 `delay`

use crate::clients::ActivitySource;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{ActivityPage, MoleculeRecord, ValuePolicy};
use crate::services::accumulator::{Accumulator, InsertOutcome};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// 循环结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 已收集到目标数量
    GoalReached,
    /// offset 超过安全上限，结果可能不足目标数量
    OffsetBoundExceeded,
}

/// 一次采集的统计信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub pages_requested: usize,
    pub pages_succeeded: usize,
    pub pages_failed: usize,
    pub records_seen: usize,
    pub records_discarded: usize,
    pub duplicates_skipped: usize,
    /// 循环结束时的 offset（即下一页本应请求的位置）
    pub final_offset: u64,
    pub stop_reason: StopReason,
}

/// 累加式分页器
pub struct AccumulatingPaginator<S> {
    source: S,
    delay: Duration,
    value_policy: ValuePolicy,
}

impl<S: ActivitySource> AccumulatingPaginator<S> {
    /// 创建分页器
    ///
    /// # 参数
    /// - `source`: 分页数据源
    /// - `delay`: 每轮之后的固定等待
    /// - `value_policy`: 活性值为 0 时的处理策略
    pub fn new(source: S, delay: Duration, value_policy: ValuePolicy) -> Self {
        Self {
            source,
            delay,
            value_policy,
        }
    }

    /// 按配置中的等待时间和取值策略创建分页器
    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(source, config.request_delay, config.value_policy)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 采集唯一分子
    ///
    /// # 参数
    /// - `target_id`: 目标 ChEMBL ID
    /// - `page_size`: 每页记录数
    /// - `required_count`: 需要的唯一分子数
    /// - `max_offset`: offset 安全上限
    ///
    /// # 返回
    /// 返回累加器；数据不足时返回的记录数会少于 `required_count`
    pub async fn collect(
        &self,
        target_id: &str,
        page_size: u64,
        required_count: usize,
        max_offset: u64,
    ) -> Accumulator {
        self.collect_with_report(target_id, page_size, required_count, max_offset)
            .await
            .0
    }

    /// 采集唯一分子，同时返回统计信息
    pub async fn collect_with_report(
        &self,
        target_id: &str,
        page_size: u64,
        required_count: usize,
        max_offset: u64,
    ) -> (Accumulator, CollectionReport) {
        let mut accumulator = Accumulator::new(required_count);
        let mut offset: u64 = 0;
        let mut report = CollectionReport {
            pages_requested: 0,
            pages_succeeded: 0,
            pages_failed: 0,
            records_seen: 0,
            records_discarded: 0,
            duplicates_skipped: 0,
            final_offset: 0,
            stop_reason: StopReason::OffsetBoundExceeded,
        };

        // page_size 为 0 时 offset 不会前进，直接返回空结果
        if page_size == 0 {
            warn!("page_size 为 0，跳过采集");
            return (accumulator, report);
        }

        while !accumulator.is_full() && offset <= max_offset {
            report.pages_requested += 1;

            match self.source.fetch_page(target_id, page_size, offset).await {
                Ok(page) => {
                    report.pages_succeeded += 1;
                    self.absorb_page(&page, &mut accumulator, &mut report);
                    debug!(
                        "offset={} 处理完成，已收集 {}/{} 个分子",
                        offset,
                        accumulator.len(),
                        required_count
                    );
                }
                Err(e) => {
                    report.pages_failed += 1;
                    log_skipped_page(offset, &e);
                }
            }

            offset = match offset.checked_add(page_size) {
                Some(next) => next,
                None => {
                    report.final_offset = u64::MAX;
                    break;
                }
            };
            report.final_offset = offset;

            if !self.delay.is_zero() {
                sleep(self.delay).await;
            }
        }

        if accumulator.is_full() {
            report.stop_reason = StopReason::GoalReached;
        } else {
            info!(
                "⚠️ offset 超过上限 {}，仅收集到 {}/{} 个分子",
                max_offset,
                accumulator.len(),
                required_count
            );
        }

        (accumulator, report)
    }

    /// 处理一页记录，累加器满了立即返回
    fn absorb_page(
        &self,
        page: &ActivityPage,
        accumulator: &mut Accumulator,
        report: &mut CollectionReport,
    ) {
        for activity in &page.activities {
            if accumulator.is_full() {
                break;
            }
            report.records_seen += 1;

            if !activity.is_usable(self.value_policy) {
                report.records_discarded += 1;
                continue;
            }
            let Some(record) = MoleculeRecord::from_activity(activity) else {
                report.records_discarded += 1;
                continue;
            };

            match accumulator.insert(record) {
                InsertOutcome::Inserted => {}
                InsertOutcome::Duplicate => report.duplicates_skipped += 1,
                InsertOutcome::Full => break,
            }
        }
    }
}

fn log_skipped_page(offset: u64, error: &ApiError) {
    match error {
        ApiError::BadStatus { status, .. } => {
            warn!("跳过 offset {}: HTTP {}", offset, status);
        }
        other => {
            warn!("offset {} 请求失败: {}", offset, other);
        }
    }
}
