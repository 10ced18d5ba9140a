//! Takeout 导入模块
//!
//! 读取 Instagram 数据导出目录中的粉丝、关注和点赞文件，写入社交数据存储。
//! 缺失的文件会被跳过，格式错误的文件会中止导入。

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::config::IngestionConfig;
use crate::error::{AppError, Result};
use crate::models::record::{Follower, Following, Like};
use crate::models::takeout::{FollowingExport, LikesExport, TakeoutEntry};
use crate::storage::repository::SocialStore;

/// 导入结果统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub followers: usize,
    pub followings: usize,
    pub likes: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.followers + self.followings + self.likes
    }
}

/// Takeout 导入器
pub struct TakeoutImporter {
    store: Arc<dyn SocialStore>,
    config: IngestionConfig,
}

impl TakeoutImporter {
    pub fn new(store: Arc<dyn SocialStore>, config: IngestionConfig) -> Self {
        Self { store, config }
    }

    /// 导入配置目录中的全部文件
    pub async fn import_dir(&self) -> Result<ImportSummary> {
        let started_at = Utc::now();
        let dir = self.config.takeout_dir.as_path();
        info!(dir = %dir.display(), "importing takeout export");

        let followers: Option<Vec<Follower>> =
            read_export::<Vec<TakeoutEntry>>(&dir.join(&self.config.followers_file))
                .await?
                .map(|entries| entries.iter().flat_map(|e| e.followers()).collect());

        let followings: Option<Vec<Following>> =
            read_export::<FollowingExport>(&dir.join(&self.config.followings_file))
                .await?
                .map(|export| {
                    export
                        .relationships_following
                        .iter()
                        .flat_map(|e| e.followings())
                        .collect()
                });

        let likes: Option<Vec<Like>> = read_export::<LikesExport>(&dir.join(&self.config.likes_file))
            .await?
            .map(|export| {
                export
                    .likes_media_likes
                    .iter()
                    .flat_map(|e| e.likes())
                    .collect()
            });

        // Every file is decoded before the store is touched.
        if self.config.drop_existing {
            self.store.drop_all().await?;
            info!("existing social data dropped");
        }

        let followers = match followers {
            Some(records) => self.store.save_followers(&records).await?,
            None => 0,
        };
        let followings = match followings {
            Some(records) => self.store.save_followings(&records).await?,
            None => 0,
        };
        let likes = match likes {
            Some(records) => self.store.save_likes(&records).await?,
            None => 0,
        };

        let summary = ImportSummary {
            followers,
            followings,
            likes,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            followers = summary.followers,
            followings = summary.followings,
            likes = summary.likes,
            "takeout import finished"
        );
        Ok(summary)
    }
}

/// Reads and parses one export file. `Ok(None)` when the file does not exist.
async fn read_export<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "takeout file not found, skipping");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| AppError::Ingestion(format!("{}: {}", path.display(), e)))
}

/// 导入后是否继续提供服务
///
/// 内存存储随进程退出而丢失，因此导入后必须在同一进程中继续服务。
pub fn serve_after_import(backend: &str) -> bool {
    backend == "memory"
}

/// 导入目录。`PROTOHUSH_IMPORT` 的值若是路径则覆盖配置，`1`/`true` 表示使用配置目录
pub fn resolve_dir(config: &IngestionConfig, override_dir: Option<&str>) -> PathBuf {
    match override_dir.map(str::trim) {
        Some("") | Some("1") | Some("true") | None => config.takeout_dir.clone(),
        Some(dir) => PathBuf::from(dir),
    }
}
