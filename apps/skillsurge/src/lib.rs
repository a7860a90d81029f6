//! SkillSurge client: REST bindings for the SkillSurge backend plus the
//! onboarding, roadmap, dashboard and interview flows built on top of them.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod errors;
pub mod graph;
pub mod interview;
pub mod models;
pub mod onboarding;
pub mod resume;
pub mod roadmap;
pub mod session;
pub mod state;

pub use api::ApiClient;
pub use config::Config;
pub use errors::ClientError;
pub use session::SessionStore;
