use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户指令的意图
///
/// 七种已知意图加上一个兜底的 `Unrecognized`，后者保留模型给出的原始字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intention {
    /// 查询全部点赞
    FindAllLikes,
    /// 按用户名查询点赞
    FindLikesByUsername,
    /// 查询全部粉丝
    FindAllFollowers,
    /// 查询全部关注
    FindAllFollowings,
    /// 按日期排序并限制条数的点赞
    FindLikesSortedByDate,
    /// 按用户名查询粉丝
    FindFollowersByUsername,
    /// 按用户名查询关注
    FindFollowingsByUsername,
    /// 无法识别的意图（包括空字符串）
    Unrecognized(String),
}

impl Intention {
    /// 全部已知意图，顺序即系统提示中的列举顺序
    pub const KNOWN: [Intention; 7] = [
        Intention::FindAllLikes,
        Intention::FindLikesByUsername,
        Intention::FindAllFollowers,
        Intention::FindAllFollowings,
        Intention::FindLikesSortedByDate,
        Intention::FindFollowersByUsername,
        Intention::FindFollowingsByUsername,
    ];

    /// 从模型输出解析意图，未知值不会失败
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "FindAllLikes" => Intention::FindAllLikes,
            // older prompts spelled it in the singular
            "FindLikesByUsername" | "FindLikeByUsername" => Intention::FindLikesByUsername,
            "FindAllFollowers" => Intention::FindAllFollowers,
            "FindAllFollowings" => Intention::FindAllFollowings,
            "FindLikesSortedByDate" => Intention::FindLikesSortedByDate,
            "FindFollowersByUsername" => Intention::FindFollowersByUsername,
            "FindFollowingsByUsername" => Intention::FindFollowingsByUsername,
            _ => Intention::Unrecognized(raw.to_string()),
        }
    }

    /// 规范名称；未知意图返回原始字符串
    pub fn as_str(&self) -> &str {
        match self {
            Intention::FindAllLikes => "FindAllLikes",
            Intention::FindLikesByUsername => "FindLikesByUsername",
            Intention::FindAllFollowers => "FindAllFollowers",
            Intention::FindAllFollowings => "FindAllFollowings",
            Intention::FindLikesSortedByDate => "FindLikesSortedByDate",
            Intention::FindFollowersByUsername => "FindFollowersByUsername",
            Intention::FindFollowingsByUsername => "FindFollowingsByUsername",
            Intention::Unrecognized(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Intention::Unrecognized(_))
    }
}

impl From<String> for Intention {
    fn from(raw: String) -> Self {
        Intention::parse(&raw)
    }
}

impl From<Intention> for String {
    fn from(intention: Intention) -> Self {
        intention.as_str().to_string()
    }
}

impl fmt::Display for Intention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("FindAllLikes", Intention::FindAllLikes)]
    #[case("FindLikesByUsername", Intention::FindLikesByUsername)]
    #[case("FindLikeByUsername", Intention::FindLikesByUsername)]
    #[case("FindAllFollowers", Intention::FindAllFollowers)]
    #[case("FindAllFollowings", Intention::FindAllFollowings)]
    #[case("FindLikesSortedByDate", Intention::FindLikesSortedByDate)]
    #[case("FindFollowersByUsername", Intention::FindFollowersByUsername)]
    #[case("FindFollowingsByUsername", Intention::FindFollowingsByUsername)]
    #[case(" FindAllLikes ", Intention::FindAllLikes)]
    fn test_parse_known(#[case] raw: &str, #[case] expected: Intention) {
        assert_eq!(Intention::parse(raw), expected);
        assert!(expected.is_known());
    }

    #[rstest]
    #[case("")]
    #[case("FindAllUsers")]
    #[case("findalllikes")]
    fn test_parse_unrecognized_keeps_raw(#[case] raw: &str) {
        let intention = Intention::parse(raw);
        assert_eq!(intention, Intention::Unrecognized(raw.to_string()));
        assert!(!intention.is_known());
        assert_eq!(intention.as_str(), raw);
    }

    #[test]
    fn test_known_names_round_trip_through_as_str() {
        for intention in Intention::KNOWN.iter() {
            assert_eq!(&Intention::parse(intention.as_str()), intention);
        }
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        let json = serde_json::to_string(&Intention::FindAllFollowers).unwrap();
        assert_eq!(json, "\"FindAllFollowers\"");

        let parsed: Intention = serde_json::from_str("\"Whatever\"").unwrap();
        assert_eq!(parsed, Intention::Unrecognized("Whatever".into()));
    }
}
