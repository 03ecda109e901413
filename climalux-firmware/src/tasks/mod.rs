//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod climate;
pub mod dashboard;
pub mod light;

pub use climate::climate_task;
pub use dashboard::dashboard_task;
pub use light::light_task;
