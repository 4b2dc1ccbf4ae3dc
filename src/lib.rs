//! 固定桶数的拉链法哈希表
//!
//! 键通过可注入的哈希函数 `(key, bucket_count) -> index` 定位到桶，
//! 同一桶内的键值对按插入顺序组成链。桶数量在构造时确定，终身不变。
//!
//! ## 主要特性
//! - 普通插入（允许重复键）、唯一键插入、去重插入
//! - 查找、删除、成员判断、自动插入默认值的索引访问
//! - 深拷贝，副本与原表完全独立
//! - 按表统计操作次数，可导出Prometheus格式
//!
//! ## 快速开始
//!
//! ```rust
//! use chained_hashtable::{BucketTable, CharSumHash, TableError};
//!
//! let mut table = BucketTable::with_hasher(30, CharSumHash).expect("桶数量必须大于0");
//!
//! table.set("Dima", "Kyiv");
//! table.set("Oleg", "Lviv");
//!
//! assert_eq!(table.size(), 2);
//! assert_eq!(*table.get(&"Dima").unwrap(), "Kyiv");
//! assert_eq!(table.get(&"Vika"), Err(TableError::KeyNotFound));
//!
//! table.remove(&"Oleg");
//! assert!(!table.contains(&"Oleg"));
//! ```

#![warn(clippy::all)]

#[cfg(feature = "logging")]
#[doc(hidden)]
pub use log as __log;

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

#[cfg(feature = "logging")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "logging"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

// 核心模块导出
pub mod error;
pub mod types;
pub mod hash;
pub mod map;
pub mod stats;

// 公共接口导出
pub use crate::{
    error::{Result, TableError},
    hash::{
        calculate_bucket,
        default_hash_function,
        CharSumHash,
        HashAlgorithm,
        HashFunction,
        ModuloHash,
        ModuloKey,
        SeededHash,
    },
    map::{
        Bucket,
        BucketTable,
        BucketTableConfig,
        BucketTableStats,
        DEFAULT_BUCKET_COUNT,
        DEFAULT_CONFIG,
    },
    stats::{AtomicOperationStats, OperationStatsSnapshot},
    types::{Entry, OperationType},
};

/// 字符串键值的默认表类型
pub type DefaultTable = BucketTable<String, String>;

/// 批量普通插入，返回插入数量
pub fn batch_insert<K, V>(table: &mut BucketTable<K, V>, items: impl IntoIterator<Item = (K, V)>) -> usize {
    let mut count = 0;
    for (k, v) in items {
        table.insert(k, v);
        count += 1;
    }
    count
}

/// 批量查询，缺失的键对应 `None`
pub fn batch_get<'a, K: Eq + 'a, V: Clone>(
    table: &BucketTable<K, V>,
    keys: impl IntoIterator<Item = &'a K>,
) -> Vec<Option<V>> {
    keys.into_iter().map(|k| table.get(k).ok().cloned()).collect()
}
