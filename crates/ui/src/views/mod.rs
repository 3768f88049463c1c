mod admin;
mod home;
mod quiz;
mod results;
mod setup;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use home::HomeView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use setup::SetupView;
pub use state::{ViewError, ViewState, view_state_from_resource};
