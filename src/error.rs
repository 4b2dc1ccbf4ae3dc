//! 统一错误处理 - 哈希表可能返回的错误类型

/// 哈希表操作可能发生的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("无效配置: {reason}")]
    InvalidConfig {
        reason: String,
    },

    /// 键不存在。消息固定，不携带键，查找失败路径不分配内存
    #[error("Data is not exists!")]
    KeyNotFound,
}

impl TableError {
    /// 获取错误恢复建议
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfig { .. } => Some("检查配置参数，桶数量必须大于0"),
            Self::KeyNotFound => Some("先调用contains确认键是否存在"),
        }
    }

    /// 判断错误是否可恢复
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidConfig { .. })
    }

    pub(crate) fn zero_buckets() -> Self {
        Self::InvalidConfig {
            reason: "桶数量必须大于0".into(),
        }
    }
}

/// 本库统一的Result别名
pub type Result<T> = std::result::Result<T, TableError>;
