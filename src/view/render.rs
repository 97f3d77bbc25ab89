use serde::Serialize;

use super::state::ViewState;
use crate::models::{Movie, OrderBy, Quality, QueryOptions, SortBy};

/// 分页条上固定显示的页码数量
pub const PAGE_BUTTONS: i64 = 10;

/// 评分下拉框的取值上限（含）
pub const MAX_RATING_CHOICE: i32 = 9;

/// 渲染结果，三种状态互斥
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderState {
    Loading,
    Error { message: String },
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadyView {
    pub filters: FilterControls,
    pub cards: Vec<MovieCard>,
    pub pagination: Pagination,
}

/// 下拉框的一个选项
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterControls {
    pub query_term: String,
    pub quality: Vec<Choice>,
    pub minimum_rating: Vec<Choice>,
    pub genre: Vec<Choice>,
    pub sort_by: Vec<Choice>,
    pub order_by: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub caption: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageButton {
    pub page: i64,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub previous: i64,
    pub next: i64,
    pub pages: Vec<PageButton>,
}

/// 根据视图状态生成输出，错误优先于加载状态
pub fn render(state: &ViewState) -> RenderState {
    if let Some(ref message) = state.error {
        return RenderState::Error {
            message: message.clone(),
        };
    }

    if state.loading {
        return RenderState::Loading;
    }

    RenderState::Ready(ReadyView {
        filters: filter_controls(state),
        cards: state.movies.iter().map(MovieCard::from).collect(),
        pagination: Pagination::for_options(&state.options),
    })
}

fn filter_controls(state: &ViewState) -> FilterControls {
    let options = &state.options;

    let quality = Quality::ALL
        .iter()
        .map(|q| Choice::new(q.as_str(), q.label(), *q == options.quality))
        .collect();

    let minimum_rating = (0..=MAX_RATING_CHOICE)
        .map(|r| {
            let value = r.to_string();
            Choice::new(&value, &value, r == options.minimum_rating)
        })
        .collect();

    let mut genre = vec![Choice::new("", "Genre", options.genre.is_empty())];
    genre.extend(
        state
            .genres
            .iter()
            .map(|g| Choice::new(g, g, g == options.genre)),
    );

    let sort_by = SortBy::ALL
        .iter()
        .map(|s| Choice::new(s.as_str(), s.label(), *s == options.sort_by))
        .collect();

    let order_by = OrderBy::ALL
        .iter()
        .map(|o| Choice::new(o.as_str(), o.label(), *o == options.order_by))
        .collect();

    FilterControls {
        query_term: options.query_term.clone(),
        quality,
        minimum_rating,
        genre,
        sort_by,
        order_by,
    }
}

impl Choice {
    fn new(value: &str, label: &str, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected,
        }
    }
}

impl Pagination {
    /// 上一页不做下限截断
    pub fn for_options(options: &QueryOptions) -> Self {
        Self {
            previous: options.page.wrapping_sub(1),
            next: options.page.wrapping_add(1),
            pages: (1..=PAGE_BUTTONS)
                .map(|page| PageButton {
                    page,
                    current: page == options.page,
                })
                .collect(),
        }
    }
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        let rating = movie.rating.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
        let year = movie.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string());
        let runtime = movie.runtime.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());

        Self {
            id: movie.id,
            title: movie.title.clone(),
            image: movie.medium_cover_image.clone(),
            caption: format!("{} / 10 | {} | {} min", rating, year, runtime),
            link: movie_link(movie.id),
        }
    }
}

/// 详情页地址
pub fn movie_link(id: u64) -> String {
    format!("/movies/{}", id)
}
