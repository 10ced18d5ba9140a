use serde::{Deserialize, Serialize};

/// 粉丝
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    /// 粉丝的用户名
    pub username: String,
    /// 粉丝主页地址
    pub profile_uri: String,
}

/// 关注的账号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Following {
    pub username: String,
    pub profile_uri: String,
}

/// 点赞
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    /// 被点赞内容的作者
    pub username: String,
    /// 被点赞内容的链接
    pub href: String,
    /// 点赞时间（Unix 秒）
    #[serde(default)]
    pub timestamp: i64,
}

/// 一次查询返回的记录集合
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordSet {
    Likes(Vec<Like>),
    Followers(Vec<Follower>),
    Followings(Vec<Following>),
}

impl RecordSet {
    pub fn len(&self) -> usize {
        match self {
            RecordSet::Likes(v) => v.len(),
            RecordSet::Followers(v) => v.len(),
            RecordSet::Followings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 渲染为嵌入提示词的 JSON 文本
    pub fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }
}
