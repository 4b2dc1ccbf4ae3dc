// src/stats/operation.rs
//! 操作统计 - 跟踪哈希表各类操作次数

use crate::types::OperationType;
use std::{
    fmt::Write,
    sync::atomic::{AtomicU64, Ordering},
};

/// 操作统计快照
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationStatsSnapshot {
    pub insert_count: u64,
    pub set_count: u64,
    pub push_double_count: u64,
    pub get_count: u64,
    pub contains_count: u64,
    pub remove_count: u64,
    /// get/contains 未命中次数
    pub miss_count: u64,
    /// push_double 被判定为重复而忽略的次数
    pub suppressed_count: u64,
}

impl OperationStatsSnapshot {
    pub fn count(&self, op_type: OperationType) -> u64 {
        match op_type {
            OperationType::Insert => self.insert_count,
            OperationType::Set => self.set_count,
            OperationType::PushDouble => self.push_double_count,
            OperationType::Get => self.get_count,
            OperationType::Contains => self.contains_count,
            OperationType::Remove => self.remove_count,
        }
    }
}

/// 原子操作统计
///
/// 读操作只持有 `&self`，计数器因此使用原子类型
#[derive(Debug, Default)]
pub struct AtomicOperationStats {
    insert_count: AtomicU64,
    set_count: AtomicU64,
    push_double_count: AtomicU64,
    get_count: AtomicU64,
    contains_count: AtomicU64,
    remove_count: AtomicU64,
    miss_count: AtomicU64,
    suppressed_count: AtomicU64,
}

impl AtomicOperationStats {
    /// 创建新统计
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, op_type: OperationType) -> &AtomicU64 {
        match op_type {
            OperationType::Insert => &self.insert_count,
            OperationType::Set => &self.set_count,
            OperationType::PushDouble => &self.push_double_count,
            OperationType::Get => &self.get_count,
            OperationType::Contains => &self.contains_count,
            OperationType::Remove => &self.remove_count,
        }
    }

    /// 记录操作
    pub fn record(&self, op_type: OperationType) {
        self.counter(op_type).fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次查找未命中
    pub fn record_miss(&self) {
        self.miss_count.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一次被忽略的重复写入
    pub fn record_suppressed(&self) {
        self.suppressed_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> OperationStatsSnapshot {
        OperationStatsSnapshot {
            insert_count: self.insert_count.load(Ordering::Relaxed),
            set_count: self.set_count.load(Ordering::Relaxed),
            push_double_count: self.push_double_count.load(Ordering::Relaxed),
            get_count: self.get_count.load(Ordering::Relaxed),
            contains_count: self.contains_count.load(Ordering::Relaxed),
            remove_count: self.remove_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            suppressed_count: self.suppressed_count.load(Ordering::Relaxed),
        }
    }

    /// 重置统计
    pub fn reset(&self) {
        for op in OperationType::ALL {
            self.counter(op).store(0, Ordering::Relaxed);
        }
        self.miss_count.store(0, Ordering::Relaxed);
        self.suppressed_count.store(0, Ordering::Relaxed);
    }

    /// 导出Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();

        for op in OperationType::ALL {
            let count = self.counter(op).load(Ordering::Relaxed);
            let _ = writeln!(
                output,
                "# HELP bucket_table_operation_{0}_count Total {0} operations",
                op.as_str()
            );
            let _ = writeln!(
                output,
                "# TYPE bucket_table_operation_{}_count counter",
                op.as_str()
            );
            let _ = writeln!(output, "bucket_table_operation_{}_count {}", op.as_str(), count);
        }

        output.push_str("# HELP bucket_table_miss_count Lookups that found no entry\n");
        output.push_str("# TYPE bucket_table_miss_count counter\n");
        let _ = writeln!(
            output,
            "bucket_table_miss_count {}",
            self.miss_count.load(Ordering::Relaxed)
        );

        output.push_str("# HELP bucket_table_suppressed_count Duplicate pushes ignored\n");
        output.push_str("# TYPE bucket_table_suppressed_count counter\n");
        let _ = writeln!(
            output,
            "bucket_table_suppressed_count {}",
            self.suppressed_count.load(Ordering::Relaxed)
        );

        output
    }
}

impl Clone for AtomicOperationStats {
    fn clone(&self) -> Self {
        let snapshot = self.snapshot();
        Self {
            insert_count: AtomicU64::new(snapshot.insert_count),
            set_count: AtomicU64::new(snapshot.set_count),
            push_double_count: AtomicU64::new(snapshot.push_double_count),
            get_count: AtomicU64::new(snapshot.get_count),
            contains_count: AtomicU64::new(snapshot.contains_count),
            remove_count: AtomicU64::new(snapshot.remove_count),
            miss_count: AtomicU64::new(snapshot.miss_count),
            suppressed_count: AtomicU64::new(snapshot.suppressed_count),
        }
    }
}
