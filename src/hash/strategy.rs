//! 带种子的通用哈希函数 - 适用于任意实现 `Hash` 的键

use crate::hash::{calculate_bucket, HashFunction};
use ahash::RandomState;
use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
};

/// 固定种子，保证同一进程内结果确定
const DEFAULT_SEED: u64 = 42;

/// 哈希算法选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    AHash,
    XxHash,
    Default,
}

/// 按所选算法对键求哈希，再对桶数量取模
#[derive(Clone)]
pub struct SeededHash {
    algorithm: HashAlgorithm,
    seed: u64,
    ahash_state: RandomState,
}

impl SeededHash {
    /// 使用默认种子创建
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self::with_seed(algorithm, DEFAULT_SEED)
    }

    /// 使用指定种子创建（`Default` 算法忽略种子）
    pub fn with_seed(algorithm: HashAlgorithm, seed: u64) -> Self {
        Self {
            algorithm,
            seed,
            ahash_state: RandomState::with_seed(seed as usize),
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// 计算键的64位哈希值
    pub fn hash_key<K: Hash + ?Sized>(&self, key: &K) -> u64 {
        match self.algorithm {
            HashAlgorithm::AHash => {
                let mut hasher = std::hash::BuildHasher::build_hasher(&self.ahash_state);
                key.hash(&mut hasher);
                hasher.finish()
            }
            HashAlgorithm::XxHash => {
                let mut hasher = twox_hash::XxHash64::with_seed(self.seed);
                key.hash(&mut hasher);
                hasher.finish()
            }
            HashAlgorithm::Default => {
                let mut hasher = DefaultHasher::new();
                key.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl Default for SeededHash {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl fmt::Debug for SeededHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeededHash")
            .field("algorithm", &self.algorithm)
            .field("seed", &self.seed)
            .finish()
    }
}

impl<K: Hash + ?Sized> HashFunction<K> for SeededHash {
    fn bucket_index(&self, key: &K, bucket_count: usize) -> usize {
        calculate_bucket(self.hash_key(key), bucket_count)
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    fn check_algorithm(algorithm: HashAlgorithm) {
        let hasher = SeededHash::new(algorithm);
        let key = "test_key".to_string();

        let b1 = hasher.bucket_index(&key, 100);
        let b2 = hasher.bucket_index(&key, 100);
        assert_eq!(b1, b2, "相同键应有相同的桶索引");
        assert!(b1 < 100, "桶索引应在容量范围内");

        let copy = hasher.clone();
        assert_eq!(copy.bucket_index(&key, 100), b1, "克隆后的哈希函数结果应一致");
    }

    #[test]
    fn test_seeded_hash_ahash() {
        check_algorithm(HashAlgorithm::AHash);
    }

    #[test]
    fn test_seeded_hash_xxhash() {
        check_algorithm(HashAlgorithm::XxHash);
    }

    #[test]
    fn test_seeded_hash_default() {
        check_algorithm(HashAlgorithm::Default);
    }

    #[test]
    fn test_different_keys_spread() {
        let hasher = SeededHash::new(HashAlgorithm::XxHash);
        let mut used = [false; 64];
        for i in 0..512u64 {
            used[hasher.bucket_index(&i, 64)] = true;
        }
        // 512个键落入64个桶，绝大多数桶都应被用到
        assert!(used.iter().filter(|u| **u).count() > 48);
    }

    #[test]
    fn test_seed_changes_xxhash() {
        let a = SeededHash::with_seed(HashAlgorithm::XxHash, 1);
        let b = SeededHash::with_seed(HashAlgorithm::XxHash, 2);
        assert_ne!(a.hash_key("seeded"), b.hash_key("seeded"));
    }
}
