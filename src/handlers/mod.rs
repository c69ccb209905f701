pub mod app;
pub mod favorites;
pub mod pantry;
pub mod recipe_card;
pub mod session;

pub use app::AppHandler;
