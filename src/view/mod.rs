pub mod controller;
pub mod render;
pub mod state;

pub use controller::{MovieListView, PendingFetches};
pub use render::{render, RenderState};
pub use state::{transition, Effect, ViewEvent, ViewState};
