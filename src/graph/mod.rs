mod assets;
mod data;
mod dot;
mod layout;
mod routes;
mod svg;

pub use data::{GraphData, GraphLink, GraphMetadata, GraphNode};
pub use dot::to_dot;
pub use layout::{EdgeSegment, Layout, NodePosition};
pub use routes::{AppState, InsightsJob, router, serve, spawn_insights};
pub use svg::render_svg;
