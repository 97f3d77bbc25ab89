use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 选项解析错误（在边界处拒绝，不会转发给目录 API）
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionError {
    #[error("未知的选项名: {0}")]
    UnknownOption(String),

    #[error("选项 {name} 的值无效: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// 画质筛选
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Quality {
    #[default]
    #[serde(rename = "All")]
    All,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "2160p")]
    P2160,
    #[serde(rename = "3D")]
    ThreeD,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::All,
        Quality::P720,
        Quality::P1080,
        Quality::P2160,
        Quality::ThreeD,
    ];

    /// 请求参数中使用的标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::All => "All",
            Quality::P720 => "720p",
            Quality::P1080 => "1080p",
            Quality::P2160 => "2160p",
            Quality::ThreeD => "3D",
        }
    }

    /// 下拉框中显示的文字
    pub fn label(&self) -> &'static str {
        match self {
            Quality::All => "Quality",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Quality {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quality::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| OptionError::InvalidValue {
                name: "quality",
                value: s.to_string(),
            })
    }
}

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    Title,
    Year,
    Rating,
    DownloadCount,
    #[default]
    LikeCount,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Title,
        SortBy::Year,
        SortBy::Rating,
        SortBy::DownloadCount,
        SortBy::LikeCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Title => "title",
            SortBy::Year => "year",
            SortBy::Rating => "rating",
            SortBy::DownloadCount => "download_count",
            SortBy::LikeCount => "like_count",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Title => "Title",
            SortBy::Year => "Year",
            SortBy::Rating => "Rating",
            SortBy::DownloadCount => "Most watched",
            SortBy::LikeCount => "Popular",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortBy {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| OptionError::InvalidValue {
                name: "sort_by",
                value: s.to_string(),
            })
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    Asc,
    #[default]
    Desc,
}

impl OrderBy {
    pub const ALL: [OrderBy; 2] = [OrderBy::Asc, OrderBy::Desc];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Asc => "asc",
            OrderBy::Desc => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderBy::Asc => "Ascending",
            OrderBy::Desc => "Descending",
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderBy {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(OrderBy::Asc),
            "desc" => Ok(OrderBy::Desc),
            _ => Err(OptionError::InvalidValue {
                name: "order_by",
                value: s.to_string(),
            }),
        }
    }
}

/// 目录查询参数
///
/// 九个字段始终存在；每次修改只替换其中一个字段。
/// 数值字段不做范围校验，原样转发给目录 API。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub limit: i64,
    pub page: i64,
    pub quality: Quality,
    pub minimum_rating: i32,
    pub query_term: String,
    pub genre: String,
    pub sort_by: SortBy,
    pub order_by: OrderBy,
    pub with_rt_ratings: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: 50,
            page: 1,
            quality: Quality::All,
            minimum_rating: 0,
            query_term: String::new(),
            genre: String::new(),
            sort_by: SortBy::LikeCount,
            order_by: OrderBy::Desc,
            with_rt_ratings: false,
        }
    }
}

/// 单个字段的修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "snake_case")]
pub enum OptionChange {
    Limit(i64),
    Page(i64),
    Quality(Quality),
    MinimumRating(i32),
    QueryTerm(String),
    Genre(String),
    SortBy(SortBy),
    OrderBy(OrderBy),
    WithRtRatings(bool),
}

impl OptionChange {
    /// 从 (字段名, 字符串值) 解析，未知字段或非法值直接拒绝
    pub fn parse(name: &str, value: &str) -> Result<Self, OptionError> {
        let invalid = |name: &'static str| OptionError::InvalidValue {
            name,
            value: value.to_string(),
        };

        let change = match name {
            "limit" => OptionChange::Limit(value.trim().parse().map_err(|_| invalid("limit"))?),
            "page" => OptionChange::Page(value.trim().parse().map_err(|_| invalid("page"))?),
            "quality" => OptionChange::Quality(value.parse()?),
            "minimum_rating" => OptionChange::MinimumRating(
                value.trim().parse().map_err(|_| invalid("minimum_rating"))?,
            ),
            "query_term" => OptionChange::QueryTerm(value.to_string()),
            "genre" => OptionChange::Genre(value.to_string()),
            "sort_by" => OptionChange::SortBy(value.parse()?),
            "order_by" => OptionChange::OrderBy(value.parse()?),
            "with_rt_ratings" => OptionChange::WithRtRatings(
                value.trim().parse().map_err(|_| invalid("with_rt_ratings"))?,
            ),
            other => return Err(OptionError::UnknownOption(other.to_string())),
        };

        Ok(change)
    }

    pub fn name(&self) -> &'static str {
        match self {
            OptionChange::Limit(_) => "limit",
            OptionChange::Page(_) => "page",
            OptionChange::Quality(_) => "quality",
            OptionChange::MinimumRating(_) => "minimum_rating",
            OptionChange::QueryTerm(_) => "query_term",
            OptionChange::Genre(_) => "genre",
            OptionChange::SortBy(_) => "sort_by",
            OptionChange::OrderBy(_) => "order_by",
            OptionChange::WithRtRatings(_) => "with_rt_ratings",
        }
    }
}

impl QueryOptions {
    /// 替换一个字段，其余字段保持不变
    pub fn with_change(&self, change: OptionChange) -> Self {
        let mut next = self.clone();
        next.apply(change);
        next
    }

    pub fn apply(&mut self, change: OptionChange) {
        match change {
            OptionChange::Limit(v) => self.limit = v,
            OptionChange::Page(v) => self.page = v,
            OptionChange::Quality(v) => self.quality = v,
            OptionChange::MinimumRating(v) => self.minimum_rating = v,
            OptionChange::QueryTerm(v) => self.query_term = v,
            OptionChange::Genre(v) => self.genre = v,
            OptionChange::SortBy(v) => self.sort_by = v,
            OptionChange::OrderBy(v) => self.order_by = v,
            OptionChange::WithRtRatings(v) => self.with_rt_ratings = v,
        }
    }

    /// 上一页（不做下限截断，第 1 页的上一页是 0）
    pub fn previous_page(&self) -> OptionChange {
        OptionChange::Page(self.page.wrapping_sub(1))
    }

    /// 下一页，越过 i64 上界时回绕
    pub fn next_page(&self) -> OptionChange {
        OptionChange::Page(self.page.wrapping_add(1))
    }

    /// 序列化为请求参数，九个字段全部发送
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("page", self.page.to_string()),
            ("quality", self.quality.as_str().to_string()),
            ("minimum_rating", self.minimum_rating.to_string()),
            ("query_term", self.query_term.clone()),
            ("genre", self.genre.clone()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("order_by", self.order_by.as_str().to_string()),
            ("with_rt_ratings", self.with_rt_ratings.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let options = QueryOptions::default();
        assert_eq!(options.limit, 50);
        assert_eq!(options.page, 1);
        assert_eq!(options.quality, Quality::All);
        assert_eq!(options.minimum_rating, 0);
        assert!(options.query_term.is_empty());
        assert!(options.genre.is_empty());
        assert_eq!(options.sort_by, SortBy::LikeCount);
        assert_eq!(options.order_by, OrderBy::Desc);
        assert!(!options.with_rt_ratings);
    }

    #[test]
    fn test_change_replaces_single_field() {
        let options = QueryOptions::default().with_change(OptionChange::Genre("Drama".into()));
        assert_eq!(options.genre, "Drama");
        assert_eq!(
            QueryOptions {
                genre: String::new(),
                ..options
            },
            QueryOptions::default()
        );
    }

    #[test]
    fn test_set_quality_is_idempotent() {
        let change = OptionChange::parse("quality", "1080p").unwrap();
        let once = QueryOptions::default().with_change(change.clone());
        let twice = once.with_change(change);
        assert_eq!(once, twice);
        assert_eq!(once.quality, Quality::P1080);
    }

    #[test]
    fn test_previous_page_is_not_clamped() {
        let options = QueryOptions::default().with_change(OptionChange::Page(1));
        let options = options.with_change(options.previous_page());
        assert_eq!(options.page, 0);

        let pairs = options.to_query_pairs();
        assert!(pairs.contains(&("page", "0".to_string())));
    }

    #[test]
    fn test_next_page() {
        let options = QueryOptions::default();
        assert_eq!(options.next_page(), OptionChange::Page(2));
    }

    #[test]
    fn test_query_pairs_cover_all_fields() {
        let pairs = QueryOptions::default().to_query_pairs();
        let names: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            names,
            vec![
                "limit",
                "page",
                "quality",
                "minimum_rating",
                "query_term",
                "genre",
                "sort_by",
                "order_by",
                "with_rt_ratings"
            ]
        );
        assert!(pairs.contains(&("sort_by", "like_count".to_string())));
        assert!(pairs.contains(&("with_rt_ratings", "false".to_string())));
    }

    #[test]
    fn test_parse_rejects_unknown_labels() {
        assert!(matches!(
            OptionChange::parse("quality", "480p"),
            Err(OptionError::InvalidValue { name: "quality", .. })
        ));
        assert!(matches!(
            OptionChange::parse("sort_by", "seeds"),
            Err(OptionError::InvalidValue { name: "sort_by", .. })
        ));
        assert!(matches!(
            OptionChange::parse("order_by", "up"),
            Err(OptionError::InvalidValue { name: "order_by", .. })
        ));
        assert_eq!(
            OptionChange::parse("color", "red"),
            Err(OptionError::UnknownOption("color".to_string()))
        );
    }

    #[test]
    fn test_parse_forwards_out_of_range_numbers() {
        assert_eq!(
            OptionChange::parse("minimum_rating", "42").unwrap(),
            OptionChange::MinimumRating(42)
        );
        assert_eq!(OptionChange::parse("page", "-3").unwrap(), OptionChange::Page(-3));
        assert_eq!(OptionChange::parse("limit", "-5").unwrap(), OptionChange::Limit(-5));
        assert_eq!(OptionChange::parse("limit", "5000").unwrap(), OptionChange::Limit(5000));
    }

    #[test]
    fn test_page_steps_at_integer_bounds() {
        let last = QueryOptions::default().with_change(OptionChange::Page(i64::MAX));
        assert_eq!(last.next_page(), OptionChange::Page(i64::MIN));
        assert_eq!(last.previous_page(), OptionChange::Page(i64::MAX - 1));

        let first = QueryOptions::default().with_change(OptionChange::Page(i64::MIN));
        assert_eq!(first.previous_page(), OptionChange::Page(i64::MAX));
        assert_eq!(first.next_page(), OptionChange::Page(i64::MIN + 1));
    }

    #[test]
    fn test_change_json_shape() {
        let change: OptionChange =
            serde_json::from_str(r#"{"name":"quality","value":"2160p"}"#).unwrap();
        assert_eq!(change, OptionChange::Quality(Quality::P2160));
        assert_eq!(change.name(), "quality");
    }

    fn arb_change() -> impl Strategy<Value = OptionChange> {
        prop_oneof![
            any::<i64>().prop_map(OptionChange::Limit),
            any::<i64>().prop_map(OptionChange::Page),
            proptest::sample::select(Quality::ALL.to_vec()).prop_map(OptionChange::Quality),
            (0..10i32).prop_map(OptionChange::MinimumRating),
            "[a-z ]{0,8}".prop_map(OptionChange::QueryTerm),
            "[A-Za-z]{0,8}".prop_map(OptionChange::Genre),
            proptest::sample::select(SortBy::ALL.to_vec()).prop_map(OptionChange::SortBy),
            proptest::sample::select(OrderBy::ALL.to_vec()).prop_map(OptionChange::OrderBy),
            any::<bool>().prop_map(OptionChange::WithRtRatings),
        ]
    }

    proptest! {
        #[test]
        fn prop_fields_track_last_change(changes in proptest::collection::vec(arb_change(), 0..32)) {
            let mut options = QueryOptions::default();
            for change in &changes {
                options = options.with_change(change.clone());
            }

            // 每个字段等于最后一次设置的值，从未设置过的保持默认
            let mut last = std::collections::HashMap::new();
            for change in changes {
                last.insert(change.name(), change);
            }
            let mut expected = QueryOptions::default();
            for (_, change) in last {
                expected.apply(change);
            }
            prop_assert_eq!(&options, &expected);
            prop_assert_eq!(options.to_query_pairs().len(), 9);
        }
    }
}
