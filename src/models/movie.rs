use serde::{Deserialize, Serialize};

/// 目录 API 返回的电影条目
///
/// 除展示所需字段外不做解释，未知字段忽略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub medium_cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_cover_image: Option<String>,
}

/// `list_movies.json` 响应
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListMoviesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
    pub data: MovieListData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MovieListData {
    #[serde(default)]
    pub movie_count: Option<u64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub page_number: Option<i64>,
    /// 空页时 YTS 不返回该字段
    #[serde(default)]
    pub movies: Vec<Movie>,
}

impl ListMoviesResponse {
    pub fn into_movies(self) -> Vec<Movie> {
        self.data.movies
    }
}
