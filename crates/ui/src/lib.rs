pub mod app;
pub mod context;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, PracticeContext, PracticeSlot, UiApp, build_app_context};
pub use routes::Route;
