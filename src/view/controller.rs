use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::render::{render, RenderState};
use super::state::{transition, Effect, ViewEvent, ViewState};
use crate::external::CatalogSource;
use crate::models::OptionChange;

/// 电影列表视图
///
/// 状态由读写锁保护，转换在锁内完成，网络请求在锁外的独立任务中执行。
/// 旧请求不会被取消，其结果由代数检查丢弃。
#[derive(Clone)]
pub struct MovieListView {
    state: Arc<RwLock<ViewState>>,
    source: Arc<dyn CatalogSource>,
}

/// 本次操作发出的请求任务
#[must_use = "fetches run in the background; await `settled` to observe their result"]
pub struct PendingFetches {
    handles: Vec<JoinHandle<()>>,
}

impl PendingFetches {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// 等待所有请求完成并写回状态
    pub async fn settled(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!("Fetch task failed: {}", e);
            }
        }
    }
}

impl MovieListView {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ViewState::default())),
            source,
        }
    }

    pub fn source(&self) -> &Arc<dyn CatalogSource> {
        &self.source
    }

    pub async fn mount(&self) -> PendingFetches {
        self.dispatch_with(|_| ViewEvent::Mounted).await
    }

    /// 修改一个查询参数并重新请求电影列表
    pub async fn set_option(&self, change: OptionChange) -> PendingFetches {
        tracing::info!("Option changed: {} = {:?}", change.name(), change);
        self.dispatch_with(|_| ViewEvent::OptionsChanged(change)).await
    }

    pub async fn previous_page(&self) -> PendingFetches {
        self.dispatch_with(|state| ViewEvent::OptionsChanged(state.options.previous_page()))
            .await
    }

    pub async fn next_page(&self) -> PendingFetches {
        self.dispatch_with(|state| ViewEvent::OptionsChanged(state.options.next_page()))
            .await
    }

    pub async fn refresh_genres(&self) -> PendingFetches {
        self.dispatch_with(|_| ViewEvent::GenresRefreshRequested).await
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn render(&self) -> RenderState {
        render(&*self.state.read().await)
    }

    async fn dispatch_with<F>(&self, make_event: F) -> PendingFetches
    where
        F: FnOnce(&ViewState) -> ViewEvent,
    {
        let effects = {
            let mut state = self.state.write().await;
            let event = make_event(&*state);
            let (next, effects) = transition(&*state, event);
            *state = next;
            effects
        };

        PendingFetches {
            handles: effects.into_iter().map(|effect| self.spawn(effect)).collect(),
        }
    }

    fn spawn(&self, effect: Effect) -> JoinHandle<()> {
        let view = self.clone();

        tokio::spawn(async move {
            let event = match effect {
                Effect::FetchMovies { generation, options } => {
                    tracing::info!(
                        "Fetching movies (generation {}, page {}, quality {})",
                        generation,
                        options.page,
                        options.quality
                    );
                    let result = view.source.list_movies(Some(&options)).await;
                    match result {
                        Ok(ref movies) => tracing::info!(
                            "Fetched {} movies (generation {})",
                            movies.len(),
                            generation
                        ),
                        Err(ref e) => tracing::warn!("Movie fetch failed (generation {}): {}", generation, e),
                    }
                    ViewEvent::MoviesFetched { generation, result }
                }
                Effect::FetchGenres { generation } => {
                    tracing::info!("Fetching genres (generation {})", generation);
                    let result = view.source.list_movies(None).await;
                    if let Err(ref e) = result {
                        tracing::warn!("Genre fetch failed (generation {}): {}", generation, e);
                    }
                    ViewEvent::GenresFetched { generation, result }
                }
            };

            view.apply(event).await;
        })
    }

    async fn apply(&self, event: ViewEvent) {
        let mut state = self.state.write().await;
        let (next, effects) = transition(&*state, event);
        *state = next;
        // 请求结果不会再产生新的请求
        debug_assert!(effects.is_empty());
    }
}
