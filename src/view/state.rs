use crate::external::FetchFailure;
use crate::models::{GenreSet, Movie, OptionChange, QueryOptions};

/// 请求代数，每发出一次同类请求加一
pub type Generation = u64;

/// 电影列表视图的全部状态
///
/// 只通过 [`transition`] 产生新状态。
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub options: QueryOptions,
    pub movies: Vec<Movie>,
    pub genres: GenreSet,
    pub loading: bool,
    pub error: Option<String>,
    movies_generation: Generation,
    genres_generation: Generation,
    // 记录错误时所在的电影请求代数
    error_generation: Generation,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            options: QueryOptions::default(),
            movies: Vec::new(),
            genres: GenreSet::new(),
            loading: true,
            error: None,
            movies_generation: 0,
            genres_generation: 0,
            error_generation: 0,
        }
    }
}

impl ViewState {
    pub fn movies_generation(&self) -> Generation {
        self.movies_generation
    }

    pub fn genres_generation(&self) -> Generation {
        self.genres_generation
    }
}

/// 驱动状态变化的事件
#[derive(Debug, Clone)]
pub enum ViewEvent {
    /// 视图挂载：同时请求电影和类型
    Mounted,
    OptionsChanged(OptionChange),
    MoviesFetched {
        generation: Generation,
        result: Result<Vec<Movie>, FetchFailure>,
    },
    GenresFetched {
        generation: Generation,
        result: Result<Vec<Movie>, FetchFailure>,
    },
    GenresRefreshRequested,
}

/// 需要执行的异步请求
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchMovies {
        generation: Generation,
        options: QueryOptions,
    },
    FetchGenres {
        generation: Generation,
    },
}

/// 状态转换函数
pub fn transition(state: &ViewState, event: ViewEvent) -> (ViewState, Vec<Effect>) {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        ViewEvent::Mounted => {
            effects.push(issue_movies(&mut next));
            effects.push(issue_genres(&mut next));
        }
        ViewEvent::OptionsChanged(change) => {
            next.options.apply(change);
            effects.push(issue_movies(&mut next));
        }
        ViewEvent::GenresRefreshRequested => {
            effects.push(issue_genres(&mut next));
        }
        ViewEvent::MoviesFetched { generation, result } => {
            if generation != next.movies_generation {
                tracing::debug!(
                    "Discarding stale movie result (generation {}, latest {})",
                    generation,
                    next.movies_generation
                );
                return (next, effects);
            }

            next.loading = false;
            match result {
                Ok(movies) => {
                    next.movies = movies;
                    // 同一轮内的错误（例如类型请求失败）继续生效
                    if next.error.is_some() && next.error_generation < generation {
                        next.error = None;
                    }
                }
                Err(e) => {
                    next.error = Some(e.to_string());
                    next.error_generation = generation;
                }
            }
        }
        ViewEvent::GenresFetched { generation, result } => {
            if generation != next.genres_generation {
                tracing::debug!(
                    "Discarding stale genre result (generation {}, latest {})",
                    generation,
                    next.genres_generation
                );
                return (next, effects);
            }

            match result {
                Ok(movies) => next.genres = GenreSet::from_movies(&movies),
                Err(e) => {
                    next.error = Some(e.to_string());
                    next.error_generation = next.movies_generation;
                }
            }
        }
    }

    (next, effects)
}

fn issue_movies(state: &mut ViewState) -> Effect {
    state.movies_generation += 1;
    state.loading = true;
    Effect::FetchMovies {
        generation: state.movies_generation,
        options: state.options.clone(),
    }
}

fn issue_genres(state: &mut ViewState) -> Effect {
    state.genres_generation += 1;
    Effect::FetchGenres {
        generation: state.genres_generation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quality;

    fn movie(id: u64, genres: &[&str]) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            year: Some(2000 + id as i32),
            rating: Some(7.0),
            runtime: Some(100),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            medium_cover_image: Some(format!("https://img.example/{}.jpg", id)),
            title_long: None,
            slug: None,
            summary: None,
            language: None,
            large_cover_image: None,
        }
    }

    fn mounted() -> ViewState {
        transition(&ViewState::default(), ViewEvent::Mounted).0
    }

    #[test]
    fn test_mount_issues_both_fetches() {
        let (state, effects) = transition(&ViewState::default(), ViewEvent::Mounted);
        assert!(state.loading);
        assert_eq!(
            effects,
            vec![
                Effect::FetchMovies {
                    generation: 1,
                    options: QueryOptions::default()
                },
                Effect::FetchGenres { generation: 1 },
            ]
        );
    }

    #[test]
    fn test_options_change_fetches_movies_only() {
        let (state, effects) = transition(
            &mounted(),
            ViewEvent::OptionsChanged(OptionChange::Quality(Quality::P1080)),
        );
        assert_eq!(state.options.quality, Quality::P1080);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            &effects[0],
            Effect::FetchMovies { generation: 2, options } if options.quality == Quality::P1080
        ));
        assert_eq!(state.genres_generation(), 1);
    }

    #[test]
    fn test_movies_success() {
        let (state, effects) = transition(
            &mounted(),
            ViewEvent::MoviesFetched {
                generation: 1,
                result: Ok(vec![movie(1, &[]), movie(2, &[])]),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.movies.len(), 2);
        assert!(!state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_movies_failure() {
        let (state, _) = transition(
            &mounted(),
            ViewEvent::MoviesFetched {
                generation: 1,
                result: Err(FetchFailure::HttpStatus(500)),
            },
        );
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Request failed with status code 500"));
    }

    #[test]
    fn test_stale_movie_result_is_discarded() {
        let state = mounted();
        let (state, _) = transition(&state, ViewEvent::OptionsChanged(OptionChange::Page(2)));
        let (state, _) = transition(&state, ViewEvent::OptionsChanged(OptionChange::Page(3)));

        let (state, _) = transition(
            &state,
            ViewEvent::MoviesFetched {
                generation: 3,
                result: Ok(vec![movie(3, &[])]),
            },
        );
        // 较早的请求后返回，不能覆盖新结果
        let (after, _) = transition(
            &state,
            ViewEvent::MoviesFetched {
                generation: 2,
                result: Ok(vec![movie(2, &[]), movie(22, &[])]),
            },
        );
        assert_eq!(after, state);
        assert_eq!(after.movies[0].id, 3);
    }

    #[test]
    fn test_genres_derived_from_unfiltered_result() {
        let (state, _) = transition(
            &mounted(),
            ViewEvent::GenresFetched {
                generation: 1,
                result: Ok(vec![movie(1, &["Action", "Drama"]), movie(2, &["Drama", "Comedy"])]),
            },
        );
        assert_eq!(state.genres, ["Action", "Drama", "Comedy"].into_iter().collect::<GenreSet>());
    }

    #[test]
    fn test_genre_failure_overrides_same_cycle_movies() {
        let state = mounted();
        let (state, _) = transition(
            &state,
            ViewEvent::GenresFetched {
                generation: 1,
                result: Err(FetchFailure::Network("connection reset".into())),
            },
        );
        let (state, _) = transition(
            &state,
            ViewEvent::MoviesFetched {
                generation: 1,
                result: Ok(vec![movie(1, &[])]),
            },
        );
        assert!(state.error.is_some());
        assert!(!state.loading);

        // 下一次选项变化后的成功请求清除错误
        let (state, _) = transition(&state, ViewEvent::OptionsChanged(OptionChange::Page(2)));
        assert!(state.error.is_some());
        let (state, _) = transition(
            &state,
            ViewEvent::MoviesFetched {
                generation: 2,
                result: Ok(vec![movie(2, &[])]),
            },
        );
        assert!(state.error.is_none());
    }

    #[test]
    fn test_refresh_genres() {
        let (state, effects) = transition(&mounted(), ViewEvent::GenresRefreshRequested);
        assert_eq!(effects, vec![Effect::FetchGenres { generation: 2 }]);
        assert_eq!(state.movies_generation(), 1);

        let (after, _) = transition(
            &state,
            ViewEvent::GenresFetched {
                generation: 1,
                result: Ok(vec![movie(1, &["Western"])]),
            },
        );
        assert!(after.genres.is_empty());
    }
}
