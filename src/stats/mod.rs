//! 统计模块 - 哈希表操作计数

pub mod operation;

pub use operation::{AtomicOperationStats, OperationStatsSnapshot};
