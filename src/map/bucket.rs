// src/map/bucket.rs
//! 桶实现 - 单条拉链及其扫描、删除操作

use crate::types::Entry;
use std::fmt;

/// 单个桶：按插入顺序保存键值对的链
#[derive(Clone, PartialEq, Eq)]
pub struct Bucket<K, V> {
    entries: Vec<Entry<K, V>>,
}

impl<K, V> fmt::Debug for Bucket<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bucket(entries: {})", self.entries.len())
    }
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Bucket<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 返回桶中所有键值对
    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// 追加到链尾，不检查重复
    pub fn push(&mut self, key: K, value: V) {
        self.entries.push(Entry::new(key, value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Eq, V> Bucket<K, V> {
    /// 第一个键相等的位置
    pub fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == *key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key == *key)
            .map(|entry| &mut entry.value)
    }

    /// 键存在时返回其值，否则用 `default` 构造并追加；第二个返回值表示是否新插入
    pub fn get_or_push_with<F>(&mut self, key: K, default: F) -> (&mut V, bool)
    where
        F: FnOnce() -> V,
    {
        let (index, inserted) = match self.position(&key) {
            Some(index) => (index, false),
            None => {
                self.entries.push(Entry::new(key, default()));
                (self.entries.len() - 1, true)
            }
        };
        (&mut self.entries[index].value, inserted)
    }

    /// 删除所有键相等的键值对，返回删除数量
    pub fn remove_all(&mut self, key: &K) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key != *key);
        before - self.entries.len()
    }
}

impl<K, V: PartialEq> Bucket<K, V> {
    /// 桶内任意键值对的值与给定值相等
    pub fn contains_value(&self, value: &V) -> bool {
        self.entries.iter().any(|entry| entry.value == *value)
    }
}
