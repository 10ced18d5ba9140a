use async_trait::async_trait;

use crate::error::Result;
use crate::models::record::{Follower, Following, Like};

/// 社交图谱存储 trait
///
/// 七个只读查询与分发器的意图一一对应；写方法只供导入使用。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialStore: Send + Sync {
    /// 获取全部点赞
    async fn find_all_likes(&self) -> Result<Vec<Like>>;

    /// 按作者用户名获取点赞
    async fn find_likes_by_username(&self, username: &str) -> Result<Vec<Like>>;

    /// 获取全部粉丝
    async fn find_all_followers(&self) -> Result<Vec<Follower>>;

    /// 获取全部关注
    async fn find_all_followings(&self) -> Result<Vec<Following>>;

    /// 按时间倒序获取最近的点赞，最多 `limit` 条
    async fn find_likes_sorted_by_date(&self, limit: u32) -> Result<Vec<Like>>;

    /// 按用户名获取粉丝
    async fn find_followers_by_username(&self, username: &str) -> Result<Vec<Follower>>;

    /// 按用户名获取关注
    async fn find_followings_by_username(&self, username: &str) -> Result<Vec<Following>>;

    // === 导入 ===

    /// 保存粉丝，返回写入条数
    async fn save_followers(&self, followers: &[Follower]) -> Result<usize>;

    /// 保存关注，返回写入条数
    async fn save_followings(&self, followings: &[Following]) -> Result<usize>;

    /// 保存点赞，返回写入条数
    async fn save_likes(&self, likes: &[Like]) -> Result<usize>;

    /// 清空全部集合
    async fn drop_all(&self) -> Result<()>;
}

#[cfg(feature = "surrealdb")]
pub use surreal::SurrealSocialStore;

#[cfg(feature = "surrealdb")]
mod surreal {
    use super::*;
    use surrealdb::{Surreal, engine::any::Any};

    use crate::storage::surrealdb::SurrealPool;

    const LIKE_FIELDS: &str = "username, href, timestamp";
    const ACCOUNT_FIELDS: &str = "username, profile_uri";

    /// SurrealDB 存储实现
    ///
    /// 集合对应三张表：`followers`、`followings`、`likes`。
    #[derive(Clone)]
    pub struct SurrealSocialStore {
        pool: SurrealPool,
    }

    impl SurrealSocialStore {
        pub fn new(pool: SurrealPool) -> Self {
            Self { pool }
        }

        fn db(&self) -> &Surreal<Any> {
            self.pool.inner()
        }

        async fn select_all<T>(&self, fields: &str, table: &str) -> Result<Vec<T>>
        where
            T: serde::de::DeserializeOwned,
        {
            let query = format!("SELECT {} FROM {}", fields, table);
            let rows: Vec<T> = self.db().query(query).await?.take(0)?;
            Ok(rows)
        }

        async fn select_by_username<T>(&self, fields: &str, table: &str, username: &str) -> Result<Vec<T>>
        where
            T: serde::de::DeserializeOwned,
        {
            let query = format!("SELECT {} FROM {} WHERE username = $username", fields, table);
            let rows: Vec<T> = self
                .db()
                .query(query)
                .bind(("username", username.to_string()))
                .await?
                .take(0)?;
            Ok(rows)
        }

        async fn insert<T>(&self, table: &str, records: &[T]) -> Result<usize>
        where
            T: serde::Serialize + Clone + Send + Sync + 'static,
        {
            if records.is_empty() {
                return Ok(0);
            }
            let query = format!("INSERT INTO {} $records", table);
            self.db()
                .query(query)
                .bind(("records", records.to_vec()))
                .await?
                .check()?;
            Ok(records.len())
        }
    }

    #[async_trait]
    impl SocialStore for SurrealSocialStore {
        async fn find_all_likes(&self) -> Result<Vec<Like>> {
            self.select_all(LIKE_FIELDS, "likes").await
        }

        async fn find_likes_by_username(&self, username: &str) -> Result<Vec<Like>> {
            self.select_by_username(LIKE_FIELDS, "likes", username).await
        }

        async fn find_all_followers(&self) -> Result<Vec<Follower>> {
            self.select_all(ACCOUNT_FIELDS, "followers").await
        }

        async fn find_all_followings(&self) -> Result<Vec<Following>> {
            self.select_all(ACCOUNT_FIELDS, "followings").await
        }

        async fn find_likes_sorted_by_date(&self, limit: u32) -> Result<Vec<Like>> {
            let query = format!(
                "SELECT {} FROM likes ORDER BY timestamp DESC LIMIT $limit",
                LIKE_FIELDS
            );
            let rows: Vec<Like> = self
                .db()
                .query(query)
                .bind(("limit", limit))
                .await?
                .take(0)?;
            Ok(rows)
        }

        async fn find_followers_by_username(&self, username: &str) -> Result<Vec<Follower>> {
            self.select_by_username(ACCOUNT_FIELDS, "followers", username)
                .await
        }

        async fn find_followings_by_username(&self, username: &str) -> Result<Vec<Following>> {
            self.select_by_username(ACCOUNT_FIELDS, "followings", username)
                .await
        }

        async fn save_followers(&self, followers: &[Follower]) -> Result<usize> {
            self.insert("followers", followers).await
        }

        async fn save_followings(&self, followings: &[Following]) -> Result<usize> {
            self.insert("followings", followings).await
        }

        async fn save_likes(&self, likes: &[Like]) -> Result<usize> {
            self.insert("likes", likes).await
        }

        async fn drop_all(&self) -> Result<()> {
            self.db()
                .query("DELETE followers; DELETE followings; DELETE likes;")
                .await?
                .check()?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::config::config::StorageConfig;

        async fn mem_store() -> SurrealSocialStore {
            let config = StorageConfig {
                backend: "surrealdb".into(),
                url: "mem://".into(),
                namespace: "protohush".into(),
                database: "test".into(),
                username: String::new(),
                password: String::new(),
            };
            SurrealSocialStore::new(SurrealPool::new(config).await.unwrap())
        }

        fn like(username: &str, timestamp: i64) -> Like {
            Like {
                username: username.into(),
                href: format!("https://www.instagram.com/p/{}/", timestamp),
                timestamp,
            }
        }

        #[tokio::test]
        async fn test_sorted_likes_are_newest_first() {
            let store = mem_store().await;
            store
                .save_likes(&[like("a", 10), like("b", 30), like("c", 20)])
                .await
                .unwrap();

            let likes = store.find_likes_sorted_by_date(2).await.unwrap();
            let names: Vec<&str> = likes.iter().map(|l| l.username.as_str()).collect();
            assert_eq!(names, vec!["b", "c"]);
        }

        #[tokio::test]
        async fn test_username_lookup_and_drop() {
            let store = mem_store().await;
            store
                .save_followers(&[
                    Follower {
                        username: "ana".into(),
                        profile_uri: "https://www.instagram.com/ana".into(),
                    },
                    Follower {
                        username: "bruno".into(),
                        profile_uri: "https://www.instagram.com/bruno".into(),
                    },
                ])
                .await
                .unwrap();

            let found = store.find_followers_by_username("ana").await.unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].username, "ana");

            store.drop_all().await.unwrap();
            assert!(store.find_all_followers().await.unwrap().is_empty());
        }
    }
}
