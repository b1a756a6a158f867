//! API endpoint modules.

pub mod exports;
pub mod health;
pub mod images;
pub mod lines;
pub mod openapi;
pub mod reports;
pub mod stats;

pub use exports::configure_export_routes;
pub use health::configure_health_routes;
pub use images::configure_image_routes;
pub use lines::configure_line_routes;
pub use openapi::ApiDoc;
pub use reports::configure_report_routes;
pub use stats::configure_stats_routes;
