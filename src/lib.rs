//! Protohush - 自然语言查询 Instagram 导出数据
//!
//! 用语言模型把一句指令解析成结构化查询，在社交数据存储上执行，
//! 再把结果组织成面向用户的自然语言回复。

pub mod api;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
