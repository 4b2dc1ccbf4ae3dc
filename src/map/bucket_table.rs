//! 拉链法哈希表核心实现
//!
//! 桶数量在构造时确定，之后不再改变：没有扩容，也没有按负载因子重新哈希。

use crate::{
    error::{Result, TableError},
    hash::{default_hash_function, HashAlgorithm, HashFunction, SeededHash},
    map::{bucket::Bucket, DEFAULT_BUCKET_COUNT, DEFAULT_CONFIG},
    stats::{AtomicOperationStats, OperationStatsSnapshot},
    types::OperationType,
};
use std::{fmt, hash::Hash, sync::Arc};

/// 哈希表配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketTableConfig {
    /// 桶数量，必须大于0
    pub bucket_count: usize,
    pub hash_algorithm: HashAlgorithm,
}

impl Default for BucketTableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            hash_algorithm: HashAlgorithm::AHash,
        }
    }
}

impl BucketTableConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(TableError::zero_buckets());
        }
        Ok(())
    }
}

/// 哈希表统计信息
#[derive(Debug, Default, Clone)]
pub struct BucketTableStats {
    pub size: usize,
    pub capacity: usize,
    pub load_factor: f32,
    /// 最长链的长度
    pub longest_chain: usize,
    pub empty_buckets: usize,
    pub operations: OperationStatsSnapshot,
}

/// 固定桶数的拉链法哈希表
///
/// `get`、`get_mut`、`get_or_insert_default` 返回的引用借用整个表，
/// 在下一次插入或删除之前必须释放。
///
/// 表内部不加锁。跨线程共享修改时需在外部包一层互斥锁。
#[derive(Clone)]
pub struct BucketTable<K, V> {
    buckets: Vec<Bucket<K, V>>,
    bucket_count: usize,
    entry_count: usize,
    // 哈希函数是纯函数，克隆时共享同一个实例
    hash_fn: Arc<dyn HashFunction<K>>,
    op_stats: AtomicOperationStats,
}

impl<K: Hash, V> BucketTable<K, V> {
    /// 使用默认哈希函数创建
    pub fn new(bucket_count: usize) -> Result<Self> {
        Self::with_hasher(bucket_count, default_hash_function())
    }

    /// 按配置创建
    pub fn with_config(config: BucketTableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(
            config.bucket_count,
            Arc::new(SeededHash::new(config.hash_algorithm)),
        ))
    }
}

impl<K: Hash, V> Default for BucketTable<K, V> {
    fn default() -> Self {
        Self::from_parts(
            DEFAULT_CONFIG.bucket_count,
            Arc::new(SeededHash::new(DEFAULT_CONFIG.hash_algorithm)),
        )
    }
}

impl<K, V> BucketTable<K, V> {
    /// 使用指定哈希函数创建
    pub fn with_hasher<H>(bucket_count: usize, hash_fn: H) -> Result<Self>
    where
        H: HashFunction<K> + 'static,
    {
        if bucket_count == 0 {
            log_error!("Refusing to build a table with zero buckets");
            return Err(TableError::zero_buckets());
        }
        Ok(Self::from_parts(bucket_count, Arc::new(hash_fn)))
    }

    fn from_parts(bucket_count: usize, hash_fn: Arc<dyn HashFunction<K>>) -> Self {
        log_debug!("Creating bucket table with {} buckets", bucket_count);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, Bucket::new);
        Self {
            buckets,
            bucket_count,
            entry_count: 0,
            hash_fn,
            op_stats: AtomicOperationStats::new(),
        }
    }

    /// 替换哈希函数
    ///
    /// 已有条目不会重新分桶。旧函数下插入的键若在新函数下落到别的桶，
    /// 之后将无法通过 `get`/`contains`/`remove` 找到。
    pub fn set_hash_function<H>(&mut self, hash_fn: H)
    where
        H: HashFunction<K> + 'static,
    {
        log_info!("Replacing hash function of table with {} buckets", self.bucket_count);
        if self.entry_count > 0 {
            log_warn!(
                "Hash function replaced with {} live entries; existing entries are not rehashed",
                self.entry_count
            );
        }
        self.hash_fn = Arc::new(hash_fn);
    }

    /// 计算键所在的桶
    ///
    /// # Panics
    ///
    /// 哈希函数返回的索引不在 `[0, capacity())` 内时panic。
    pub fn bucket_index(&self, key: &K) -> usize {
        let index = self.hash_fn.bucket_index(key, self.bucket_count);
        if index >= self.bucket_count {
            log_error!(
                "Hash function returned bucket index {} for a table with {} buckets",
                index,
                self.bucket_count
            );
            panic!(
                "哈希函数返回的桶索引越界: {} (桶数量: {})",
                index, self.bucket_count
            );
        }
        index
    }

    /// 桶数量
    pub fn capacity(&self) -> usize {
        self.bucket_count
    }

    /// 键值对总数
    pub fn size(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// 负载因子，仅用于观察
    pub fn load_factor(&self) -> f32 {
        self.entry_count as f32 / self.bucket_count as f32
    }

    /// 指定桶的链长度，索引越界时返回 `None`
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(Bucket::len)
    }

    /// 清空所有桶，保留桶数量与哈希函数
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.entry_count = 0;
    }

    /// 普通插入：直接追加到链尾，允许重复键
    pub fn insert(&mut self, key: K, value: V) {
        let index = self.bucket_index(&key);
        self.buckets[index].push(key, value);
        self.entry_count += 1;
        self.op_stats.record(OperationType::Insert);
    }

    pub fn operation_stats(&self) -> OperationStatsSnapshot {
        self.op_stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.op_stats.reset();
    }

    /// 导出本表操作计数的Prometheus格式指标
    pub fn export_prometheus(&self) -> String {
        self.op_stats.export_prometheus()
    }

    pub fn stats(&self) -> BucketTableStats {
        BucketTableStats {
            size: self.entry_count,
            capacity: self.bucket_count,
            load_factor: self.load_factor(),
            longest_chain: self.buckets.iter().map(Bucket::len).max().unwrap_or(0),
            empty_buckets: self.buckets.iter().filter(|b| b.is_empty()).count(),
            operations: self.op_stats.snapshot(),
        }
    }
}

impl<K: Eq, V> BucketTable<K, V> {
    /// 唯一键插入：键已存在时原地覆盖并返回旧值
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        self.op_stats.record(OperationType::Set);
        let bucket = &mut self.buckets[index];
        match bucket.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                bucket.push(key, value);
                self.entry_count += 1;
                None
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        let index = self.bucket_index(key);
        self.op_stats.record(OperationType::Contains);
        let found = self.buckets[index].contains_key(key);
        if !found {
            self.op_stats.record_miss();
        }
        found
    }

    /// 查找键对应的值，键不存在时返回 `KeyNotFound`
    pub fn get(&self, key: &K) -> Result<&V> {
        let index = self.bucket_index(key);
        self.op_stats.record(OperationType::Get);
        let value = self.buckets[index].get(key);
        if value.is_none() {
            self.op_stats.record_miss();
        }
        value.ok_or(TableError::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let index = self.bucket_index(key);
        self.op_stats.record(OperationType::Get);
        let value = self.buckets[index].get_mut(key);
        if value.is_none() {
            self.op_stats.record_miss();
        }
        value.ok_or(TableError::KeyNotFound)
    }

    /// 索引访问：键不存在时先插入默认值
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = self.bucket_index(&key);
        self.op_stats.record(OperationType::Set);
        let (value, inserted) = self.buckets[index].get_or_push_with(key, V::default);
        if inserted {
            self.entry_count += 1;
        }
        value
    }

    /// 删除桶内所有键相等的键值对，返回删除数量
    pub fn remove(&mut self, key: &K) -> usize {
        let index = self.bucket_index(key);
        self.op_stats.record(OperationType::Remove);
        let removed = self.buckets[index].remove_all(key);
        self.entry_count -= removed;
        removed
    }
}

impl<K: Eq, V: PartialEq> BucketTable<K, V> {
    /// 去重插入
    ///
    /// 目标桶中已有相同的键，且桶中任意键值对的值与 `value` 相等时不做任何修改，
    /// 返回 `false`；否则按普通插入追加并返回 `true`。
    pub fn push_double(&mut self, key: K, value: V) -> bool {
        let index = self.bucket_index(&key);
        self.op_stats.record(OperationType::PushDouble);
        let bucket = &mut self.buckets[index];
        if bucket.contains_key(&key) && bucket.contains_value(&value) {
            self.op_stats.record_suppressed();
            log_debug!("Duplicate push ignored in bucket {}", index);
            return false;
        }
        bucket.push(key, value);
        self.entry_count += 1;
        true
    }
}

impl<K, V> fmt::Debug for BucketTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketTable")
            .field("size", &self.entry_count)
            .field("capacity", &self.bucket_count)
            .field("load_factor", &self.load_factor())
            .finish()
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{CharSumHash, ModuloHash};

    fn modulo_table(bucket_count: usize) -> BucketTable<u32, String> {
        BucketTable::with_hasher(bucket_count, ModuloHash).unwrap()
    }

    #[test]
    fn test_zero_buckets_rejected() {
        let err = BucketTable::<u32, u32>::new(0).unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig { .. }));

        let config = BucketTableConfig {
            bucket_count: 0,
            ..Default::default()
        };
        assert!(BucketTable::<u32, u32>::with_config(config).is_err());
        assert!(BucketTable::<u32, u32>::with_hasher(0, ModuloHash).is_err());
    }

    #[test]
    fn test_default_table() {
        let table: BucketTable<String, i32> = BucketTable::default();
        assert_eq!(table.capacity(), DEFAULT_BUCKET_COUNT);
        assert_eq!(table.size(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_allows_duplicate_keys() {
        let mut table = modulo_table(8);
        table.insert(1, "a".to_string());
        table.insert(1, "b".to_string());
        assert_eq!(table.size(), 2);
        assert_eq!(table.bucket_len(1), Some(2));
        // 返回链中第一个匹配项
        assert_eq!(table.get(&1).unwrap(), "a");
    }

    #[test]
    fn test_set_overwrites() {
        let mut table = modulo_table(8);
        assert_eq!(table.set(3, "x".to_string()), None);
        assert_eq!(table.set(3, "y".to_string()), Some("x".to_string()));
        assert_eq!(table.size(), 1);
        assert_eq!(table.get(&3).unwrap(), "y");
    }

    #[test]
    fn test_push_double() {
        let mut table = modulo_table(4);
        assert!(table.push_double(1, "v".to_string()));
        assert!(!table.push_double(1, "v".to_string()));
        assert_eq!(table.size(), 1);

        // 同键不同值
        assert!(table.push_double(1, "w".to_string()));
        assert_eq!(table.size(), 2);

        // 同值但桶内没有该键：5 与 1 同桶
        assert!(table.push_double(5, "v".to_string()));
        assert_eq!(table.size(), 3);

        // 5 已存在，且桶内有等值 "w"（属于键1）
        assert!(!table.push_double(5, "w".to_string()));
        assert_eq!(table.size(), 3);
        assert_eq!(table.operation_stats().suppressed_count, 2);
    }

    #[test]
    fn test_get_missing_key() {
        let table = modulo_table(8);
        let err = table.get(&42).unwrap_err();
        assert_eq!(err, TableError::KeyNotFound);
        assert_eq!(err.to_string(), "Data is not exists!");
        assert!(!table.contains(&42));
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut table = modulo_table(8);
        table.insert(7, "old".to_string());
        table.get_mut(&7).unwrap().push_str("-new");
        assert_eq!(table.get(&7).unwrap(), "old-new");
        assert!(table.get_mut(&8).is_err());
    }

    #[test]
    fn test_get_or_insert_default() {
        let mut table: BucketTable<&str, u32> = BucketTable::with_hasher(30, CharSumHash).unwrap();
        *table.get_or_insert_default("hits") += 1;
        *table.get_or_insert_default("hits") += 1;
        assert_eq!(table.size(), 1);
        assert_eq!(*table.get(&"hits").unwrap(), 2);

        assert_eq!(*table.get_or_insert_default("fresh"), 0);
        assert_eq!(table.size(), 2);
    }

    #[test]
    fn test_remove_all_duplicates() {
        let mut table = modulo_table(8);
        table.insert(2, "a".to_string());
        table.insert(2, "b".to_string());
        table.insert(10, "c".to_string());
        assert_eq!(table.remove(&2), 2);
        assert_eq!(table.size(), 1);
        assert!(!table.contains(&2));
        assert!(table.contains(&10));
        assert_eq!(table.remove(&2), 0);
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_clear() {
        let mut table = modulo_table(8);
        for i in 0..20 {
            table.insert(i, i.to_string());
        }
        table.clear();
        assert_eq!(table.size(), 0);
        assert_eq!(table.capacity(), 8);
        assert!(!table.contains(&3));
    }

    #[test]
    fn test_stats() {
        let mut table = modulo_table(4);
        table.insert(0, "a".to_string());
        table.insert(4, "b".to_string());
        table.insert(1, "c".to_string());
        let _ = table.get(&9);

        let stats = table.stats();
        assert_eq!(stats.size, 3);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.longest_chain, 2);
        assert_eq!(stats.empty_buckets, 2);
        assert!((stats.load_factor - 0.75).abs() < f32::EPSILON);
        assert_eq!(stats.operations.insert_count, 3);
        assert_eq!(stats.operations.miss_count, 1);

        table.reset_stats();
        assert_eq!(table.operation_stats(), OperationStatsSnapshot::default());
    }

    #[test]
    fn test_set_hash_function_does_not_rehash() {
        let mut table = modulo_table(10);
        table.insert(3, "three".to_string());
        assert_eq!(table.bucket_len(3), Some(1));

        table.set_hash_function(|key: &u32, n: usize| (*key as usize + 1) % n);
        assert_eq!(table.bucket_len(3), Some(1));
        assert_eq!(table.size(), 1);
        // 键3现在被定位到桶4，旧条目查不到
        assert!(!table.contains(&3));

        table.set_hash_function(ModuloHash);
        assert!(table.contains(&3));
    }

    #[test]
    #[should_panic(expected = "桶索引越界")]
    fn test_out_of_range_hash_panics() {
        let mut table: BucketTable<u32, u32> =
            BucketTable::with_hasher(4, |_: &u32, n: usize| n).unwrap();
        table.insert(1, 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = modulo_table(8);
        original.insert(1, "one".to_string());
        original.insert(2, "two".to_string());

        let mut copy = original.clone();
        copy.remove(&1);
        copy.insert(3, "three".to_string());
        copy.get_mut(&2).unwrap().push('!');

        assert_eq!(original.size(), 2);
        assert_eq!(original.get(&1).unwrap(), "one");
        assert_eq!(original.get(&2).unwrap(), "two");
        assert!(!original.contains(&3));

        original.insert(4, "four".to_string());
        assert!(!copy.contains(&4));
        assert_eq!(copy.size(), 2);
        assert_eq!(copy.capacity(), original.capacity());
    }

    #[test]
    fn test_debug_output() {
        let table = modulo_table(8);
        let text = format!("{:?}", table);
        assert!(text.contains("BucketTable"));
        assert!(text.contains("capacity: 8"));
    }
}
