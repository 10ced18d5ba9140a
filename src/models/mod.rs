//! 核心数据模型模块
//!
//! 定义管道中流转的数据结构：Intention, ResolvedQuery, DispatchResult,
//! ChatResponse，以及存储层返回的 Follower, Following, Like 记录
//! 和 Instagram takeout 导出文件的结构。

pub mod chat;
pub mod dispatch;
pub mod intention;
pub mod query;
pub mod record;
pub mod takeout;

pub use chat::*;
pub use dispatch::*;
pub use intention::*;
pub use query::*;
pub use record::*;
