pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod model;
pub mod render;
pub mod report;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PlacementConfig, load_config};
pub use layout::{
    InsertResult, PendingOutcome, apply_result, auto_insert, chain_push, place_canvas,
    process_pending,
};
pub use model::{Canvas, Edge, Node, NodeKind, PENDING_POSITION, Point, needs_layout};
