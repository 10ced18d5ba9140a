//! 存储层模块
//!
//! 管道只通过 [`SocialStore`](repository::SocialStore) 访问数据，
//! 支持内存存储和 SurrealDB。

pub mod factory;
pub mod memory;
pub mod repository;

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

pub use factory::create_social_store;
pub use memory::MemorySocialStore;
pub use repository::SocialStore;
