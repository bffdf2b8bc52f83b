//! Store traits, one per record kind.
//!
//! Every backend implements all of them; `StorageBackend` dispatches.

mod favorite;
mod model_config;
mod project;
mod screen;

pub use favorite::FavoriteStore;
pub use model_config::ModelConfigStore;
pub use project::ProjectStore;
pub use screen::ScreenStore;
