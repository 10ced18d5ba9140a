//! 内存存储
//!
//! 开发环境默认后端，也用于测试。

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::record::{Follower, Following, Like};
use crate::storage::repository::SocialStore;

#[derive(Default)]
struct Collections {
    followers: Vec<Follower>,
    followings: Vec<Following>,
    likes: Vec<Like>,
}

/// 内存存储实现
#[derive(Default)]
pub struct MemorySocialStore {
    collections: RwLock<Collections>,
}

impl MemorySocialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用给定记录创建存储
    pub fn with_records(
        followers: Vec<Follower>,
        followings: Vec<Following>,
        likes: Vec<Like>,
    ) -> Self {
        Self {
            collections: RwLock::new(Collections {
                followers,
                followings,
                likes,
            }),
        }
    }
}

#[async_trait]
impl SocialStore for MemorySocialStore {
    async fn find_all_likes(&self) -> Result<Vec<Like>> {
        Ok(self.collections.read().await.likes.clone())
    }

    async fn find_likes_by_username(&self, username: &str) -> Result<Vec<Like>> {
        let collections = self.collections.read().await;
        Ok(collections
            .likes
            .iter()
            .filter(|l| l.username == username)
            .cloned()
            .collect())
    }

    async fn find_all_followers(&self) -> Result<Vec<Follower>> {
        Ok(self.collections.read().await.followers.clone())
    }

    async fn find_all_followings(&self) -> Result<Vec<Following>> {
        Ok(self.collections.read().await.followings.clone())
    }

    async fn find_likes_sorted_by_date(&self, limit: u32) -> Result<Vec<Like>> {
        let mut likes = self.collections.read().await.likes.clone();
        likes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        likes.truncate(limit as usize);
        Ok(likes)
    }

    async fn find_followers_by_username(&self, username: &str) -> Result<Vec<Follower>> {
        let collections = self.collections.read().await;
        Ok(collections
            .followers
            .iter()
            .filter(|f| f.username == username)
            .cloned()
            .collect())
    }

    async fn find_followings_by_username(&self, username: &str) -> Result<Vec<Following>> {
        let collections = self.collections.read().await;
        Ok(collections
            .followings
            .iter()
            .filter(|f| f.username == username)
            .cloned()
            .collect())
    }

    async fn save_followers(&self, followers: &[Follower]) -> Result<usize> {
        self.collections
            .write()
            .await
            .followers
            .extend_from_slice(followers);
        Ok(followers.len())
    }

    async fn save_followings(&self, followings: &[Following]) -> Result<usize> {
        self.collections
            .write()
            .await
            .followings
            .extend_from_slice(followings);
        Ok(followings.len())
    }

    async fn save_likes(&self, likes: &[Like]) -> Result<usize> {
        self.collections.write().await.likes.extend_from_slice(likes);
        Ok(likes.len())
    }

    async fn drop_all(&self) -> Result<()> {
        *self.collections.write().await = Collections::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn like(username: &str, timestamp: i64) -> Like {
        Like {
            username: username.into(),
            href: format!("https://www.instagram.com/p/{}/", timestamp),
            timestamp,
        }
    }

    #[tokio::test]
    async fn test_sorted_likes_newest_first_and_bounded() {
        let store = MemorySocialStore::with_records(
            vec![],
            vec![],
            vec![like("a", 10), like("b", 30), like("c", 20), like("d", 5)],
        );

        let likes = store.find_likes_sorted_by_date(2).await.unwrap();
        assert_eq!(likes.len(), 2);
        assert_eq!(likes[0].username, "b");
        assert_eq!(likes[1].username, "c");

        let all = store.find_likes_sorted_by_date(100).await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_username_filters() {
        let store = MemorySocialStore::new();
        store
            .save_likes(&[like("guillermo", 1), like("ana", 2), like("guillermo", 3)])
            .await
            .unwrap();
        store
            .save_followings(&[Following {
                username: "ana".into(),
                profile_uri: "https://www.instagram.com/ana".into(),
            }])
            .await
            .unwrap();

        assert_eq!(store.find_likes_by_username("guillermo").await.unwrap().len(), 2);
        assert_eq!(store.find_followings_by_username("ana").await.unwrap().len(), 1);
        assert!(store.find_followers_by_username("ana").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drop_all_clears_everything() {
        let store = MemorySocialStore::new();
        store
            .save_followers(&[Follower {
                username: "ana".into(),
                profile_uri: "https://www.instagram.com/ana".into(),
            }])
            .await
            .unwrap();
        store.save_likes(&[like("x", 1)]).await.unwrap();

        store.drop_all().await.unwrap();

        assert!(store.find_all_followers().await.unwrap().is_empty());
        assert!(store.find_all_likes().await.unwrap().is_empty());
    }
}
