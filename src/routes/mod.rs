// Routes module

pub mod awareness;
pub mod dashboard;
pub mod health;
pub mod profile;
pub mod projects;
pub mod shopping;
pub mod tasks;

pub use awareness::{awareness_routes, AwarenessCache};
pub use dashboard::dashboard_routes;
pub use health::health_routes;
pub use profile::profile_routes;
pub use projects::projects_routes;
pub use shopping::shopping_routes;
pub use tasks::tasks_routes;
