//! 哈希模块 - 可注入的桶定位函数

pub mod strategy;
pub mod simple;

pub use strategy::{HashAlgorithm, SeededHash};
pub use simple::{CharSumHash, ModuloHash, ModuloKey};

/// 哈希函数特征
///
/// 根据键和桶数量返回桶索引，返回值必须落在 `[0, bucket_count)` 内，
/// 且对相同输入始终返回相同结果。越界的返回值会让哈希表直接panic。
pub trait HashFunction<K: ?Sized>: Send + Sync {
    fn bucket_index(&self, key: &K, bucket_count: usize) -> usize;
}

impl<K: ?Sized, F> HashFunction<K> for F
where
    F: Fn(&K, usize) -> usize + Send + Sync,
{
    fn bucket_index(&self, key: &K, bucket_count: usize) -> usize {
        self(key, bucket_count)
    }
}

/// 默认哈希函数：固定种子的AHash
pub fn default_hash_function() -> SeededHash {
    SeededHash::new(HashAlgorithm::AHash)
}

/// 哈希工具函数
pub fn calculate_bucket(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}
