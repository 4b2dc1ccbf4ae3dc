//! 简单哈希函数 - 整数取模与字符码求和

use crate::hash::HashFunction;

/// 可直接对桶数量取模的键
pub trait ModuloKey {
    fn modulo(&self, bucket_count: usize) -> usize;
}

macro_rules! impl_modulo_unsigned {
    ($($t:ty),*) => {
        $(
            impl ModuloKey for $t {
                fn modulo(&self, bucket_count: usize) -> usize {
                    (*self as u128 % bucket_count as u128) as usize
                }
            }
        )*
    };
}

macro_rules! impl_modulo_signed {
    ($($t:ty),*) => {
        $(
            impl ModuloKey for $t {
                // 负数键取欧几里得余数，结果非负
                fn modulo(&self, bucket_count: usize) -> usize {
                    (*self as i128).rem_euclid(bucket_count as i128) as usize
                }
            }
        )*
    };
}

impl_modulo_unsigned!(u8, u16, u32, u64, u128, usize);
impl_modulo_signed!(i8, i16, i32, i64, i128, isize);

/// 整数键取模：`key % bucket_count`
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuloHash;

impl<K: ModuloKey + ?Sized> HashFunction<K> for ModuloHash {
    fn bucket_index(&self, key: &K, bucket_count: usize) -> usize {
        key.modulo(bucket_count)
    }
}

/// 字符码求和后取模，适用于字符串键
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSumHash;

impl CharSumHash {
    pub fn char_sum(s: &str) -> u64 {
        s.chars().map(|c| c as u64).sum()
    }
}

impl<K: AsRef<str> + ?Sized> HashFunction<K> for CharSumHash {
    fn bucket_index(&self, key: &K, bucket_count: usize) -> usize {
        (Self::char_sum(key.as_ref()) % bucket_count as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulo_unsigned() {
        assert_eq!(ModuloHash.bucket_index(&47u32, 30), 17);
        assert_eq!(ModuloHash.bucket_index(&u64::MAX, 30), (u64::MAX % 30) as usize);
    }

    #[test]
    fn test_modulo_signed_is_non_negative() {
        assert_eq!(ModuloHash.bucket_index(&-1i32, 30), 29);
        assert_eq!(ModuloHash.bucket_index(&-30i64, 30), 0);
        assert_eq!(ModuloHash.bucket_index(&i64::MIN, 7), (i64::MIN as i128).rem_euclid(7) as usize);
    }

    #[test]
    fn test_char_sum() {
        // 'D'(68) + 'i'(105) + 'm'(109) + 'a'(97) = 379
        assert_eq!(CharSumHash::char_sum("Dima"), 379);
        assert_eq!(CharSumHash.bucket_index("Dima", 30), 379 % 30);
        assert_eq!(CharSumHash.bucket_index(&"Dima".to_string(), 30), 379 % 30);
        assert_eq!(CharSumHash.bucket_index("", 30), 0);
    }
}
