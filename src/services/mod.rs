//! 服务模块

pub mod chat;
pub mod composer;
pub mod dispatcher;
pub mod resolver;

pub use chat::{ChatService, ChatServiceImpl, create_chat_service};
pub use composer::ReplyComposer;
pub use dispatcher::IntentDispatcher;
pub use resolver::QueryResolver;
