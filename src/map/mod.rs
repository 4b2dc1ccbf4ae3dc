//! 哈希表核心模块 - 拉链法哈希表及其桶

pub mod bucket;
pub mod bucket_table;

pub use bucket::Bucket;
pub use bucket_table::{BucketTable, BucketTableConfig, BucketTableStats};

use once_cell::sync::Lazy;

/// 默认桶数量
pub const DEFAULT_BUCKET_COUNT: usize = 30;

/// 全局默认配置
pub static DEFAULT_CONFIG: Lazy<BucketTableConfig> = Lazy::new(BucketTableConfig::default);
