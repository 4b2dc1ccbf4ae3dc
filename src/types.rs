//! 核心类型定义 - 共享类型

use std::fmt;

/// 桶内的一个键值对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// 拆分为元组
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// 操作类型，用于统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Insert,
    Set,
    PushDouble,
    Get,
    Contains,
    Remove,
}

impl OperationType {
    pub const ALL: [OperationType; 6] = [
        OperationType::Insert,
        OperationType::Set,
        OperationType::PushDouble,
        OperationType::Get,
        OperationType::Contains,
        OperationType::Remove,
    ];

    /// 指标名中使用的小写名称
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationType::Insert => "insert",
            OperationType::Set => "set",
            OperationType::PushDouble => "push_double",
            OperationType::Get => "get",
            OperationType::Contains => "contains",
            OperationType::Remove => "remove",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
