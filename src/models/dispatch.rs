use std::fmt;

use crate::models::intention::Intention;
use crate::models::record::RecordSet;

/// 分发失败
///
/// 这是数据而不是错误：失败会一路带到回复生成阶段，由模型向用户说明。
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchFailure {
    /// 存储操作失败
    StoreUnavailable {
        /// 失败操作的可读描述
        operation: String,
        /// 底层错误文本
        message: String,
    },
    /// 意图无法识别，未执行任何查询
    UnknownIntention,
}

impl fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchFailure::StoreUnavailable { operation, message } => {
                write!(f, "error {}: {}", operation, message)
            }
            DispatchFailure::UnknownIntention => f.write_str("unknown intention"),
        }
    }
}

/// 分发结果载荷，二者必居其一
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchPayload {
    Records(RecordSet),
    Failure(DispatchFailure),
}

/// 分发结果
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    /// 原始意图，失败时同样保留
    pub intention: Intention,
    pub payload: DispatchPayload,
}

impl DispatchResult {
    pub fn records(intention: Intention, records: RecordSet) -> Self {
        Self {
            intention,
            payload: DispatchPayload::Records(records),
        }
    }

    pub fn failure(intention: Intention, failure: DispatchFailure) -> Self {
        Self {
            intention,
            payload: DispatchPayload::Failure(failure),
        }
    }

    pub fn unknown(intention: Intention) -> Self {
        Self::failure(intention, DispatchFailure::UnknownIntention)
    }

    pub fn is_unknown_intention(&self) -> bool {
        matches!(
            self.payload,
            DispatchPayload::Failure(DispatchFailure::UnknownIntention)
        )
    }

    pub fn is_store_failure(&self) -> bool {
        matches!(
            self.payload,
            DispatchPayload::Failure(DispatchFailure::StoreUnavailable { .. })
        )
    }
}
