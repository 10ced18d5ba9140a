//! Instagram takeout 导出文件结构
//!
//! 粉丝文件是条目数组；关注文件包在 `relationships_following` 下；
//! 点赞文件包在 `likes_media_likes` 下。

use serde::{Deserialize, Serialize};

use crate::models::record::{Follower, Following, Like};

/// `string_list_data` 中的一项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeoutStringData {
    /// 主页或内容链接
    pub href: String,
    /// 用户名（点赞文件中通常是表情）
    pub value: String,
    /// Unix 秒
    pub timestamp: i64,
}

/// 导出文件中的一个条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeoutEntry {
    pub title: String,
    pub media_list_data: Vec<serde_json::Value>,
    pub string_list_data: Vec<TakeoutStringData>,
}

/// following.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FollowingExport {
    pub relationships_following: Vec<TakeoutEntry>,
}

/// liked_posts.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LikesExport {
    pub likes_media_likes: Vec<TakeoutEntry>,
}

impl TakeoutEntry {
    fn account_name(&self, data: &TakeoutStringData) -> String {
        if data.value.is_empty() {
            self.title.clone()
        } else {
            data.value.clone()
        }
    }

    pub fn followers(&self) -> impl Iterator<Item = Follower> + '_ {
        self.string_list_data.iter().map(|data| Follower {
            username: self.account_name(data),
            profile_uri: data.href.clone(),
        })
    }

    pub fn followings(&self) -> impl Iterator<Item = Following> + '_ {
        self.string_list_data.iter().map(|data| Following {
            username: self.account_name(data),
            profile_uri: data.href.clone(),
        })
    }

    /// 点赞条目的 title 是作者，value 只是表情
    pub fn likes(&self) -> impl Iterator<Item = Like> + '_ {
        self.string_list_data.iter().map(|data| Like {
            username: if self.title.is_empty() {
                data.value.clone()
            } else {
                self.title.clone()
            },
            href: data.href.clone(),
            timestamp: data.timestamp,
        })
    }
}
