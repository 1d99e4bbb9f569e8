//! Full pages. Navigation is left to the caller through event handlers so
//! the same views work under any router.

mod auth_pages;
pub use auth_pages::{LoginView, RegisterView};

mod dashboard;
pub use dashboard::DashboardView;

mod deal_pages;
pub use deal_pages::{CreateDealView, DealDetailView, DealEditView};

mod profile;
pub use profile::ProfileView;

mod settings;
pub use settings::SettingsView;

mod not_found;
pub use not_found::NotFoundView;
