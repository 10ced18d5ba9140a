//! 意图分发服务
//!
//! 每个已知意图恰好对应一次存储读取。存储失败和无法识别的意图都作为
//! [`DispatchResult`] 中的数据返回，不会变成错误。

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::dispatch::{DispatchFailure, DispatchResult};
use crate::models::intention::Intention;
use crate::models::query::ResolvedQuery;
use crate::models::record::RecordSet;
use crate::storage::repository::SocialStore;

/// 意图分发器
pub struct IntentDispatcher {
    store: Arc<dyn SocialStore>,
    /// 排序点赞查询未给出 limit 时的默认条数
    default_likes_limit: u32,
}

impl IntentDispatcher {
    /// 创建意图分发器
    pub fn new(store: Arc<dyn SocialStore>, default_likes_limit: u32) -> Self {
        Self {
            store,
            default_likes_limit,
        }
    }

    /// 执行查询对应的存储操作，结果始终带有原始意图
    pub async fn dispatch(&self, query: &ResolvedQuery) -> DispatchResult {
        let value = query.value.as_str();

        let (operation, outcome): (String, Result<RecordSet>) = match &query.intention {
            Intention::FindAllLikes => (
                "fetching all likes".to_string(),
                self.store.find_all_likes().await.map(RecordSet::Likes),
            ),
            Intention::FindLikesByUsername => (
                format!("fetching likes by username '{}'", value),
                self.store
                    .find_likes_by_username(value)
                    .await
                    .map(RecordSet::Likes),
            ),
            Intention::FindAllFollowers => (
                "fetching all followers".to_string(),
                self.store.find_all_followers().await.map(RecordSet::Followers),
            ),
            Intention::FindAllFollowings => (
                "fetching all followings".to_string(),
                self.store
                    .find_all_followings()
                    .await
                    .map(RecordSet::Followings),
            ),
            Intention::FindLikesSortedByDate => {
                let limit = query.limit.unwrap_or(self.default_likes_limit);
                (
                    format!("fetching the latest {} likes", limit),
                    self.store
                        .find_likes_sorted_by_date(limit)
                        .await
                        .map(RecordSet::Likes),
                )
            }
            Intention::FindFollowersByUsername => (
                format!("fetching followers by username '{}'", value),
                self.store
                    .find_followers_by_username(value)
                    .await
                    .map(RecordSet::Followers),
            ),
            Intention::FindFollowingsByUsername => (
                format!("fetching followings by username '{}'", value),
                self.store
                    .find_followings_by_username(value)
                    .await
                    .map(RecordSet::Followings),
            ),
            Intention::Unrecognized(raw) => {
                info!(intention = %raw, "unknown intention, no query executed");
                return DispatchResult::unknown(query.intention.clone());
            }
        };

        match outcome {
            Ok(records) => {
                info!(
                    intention = %query.intention,
                    collection = %query.effective_collection(),
                    count = records.len(),
                    "dispatch succeeded"
                );
                DispatchResult::records(query.intention.clone(), records)
            }
            Err(e) => {
                warn!(intention = %query.intention, error = %e, "{} failed", operation);
                DispatchResult::failure(
                    query.intention.clone(),
                    DispatchFailure::StoreUnavailable {
                        operation,
                        message: e.to_string(),
                    },
                )
            }
        }
    }
}
