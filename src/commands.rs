pub mod check;
pub mod config;
pub mod draw;
pub mod setup;

pub use check::run_check;
pub use config::run_config;
pub use draw::{run_draw, DrawOptions};
pub use setup::run_setup;

use crate::engine::DrawEngine;
use crate::error::Result;
use crate::roster::BulkSummary;
use std::path::Path;

/// Bulk-add every line of a roster file
pub fn load_roster(path: &Path, engine: &mut DrawEngine) -> Result<BulkSummary> {
    let content = std::fs::read_to_string(path)?;
    engine.bulk_add_participants(content.lines())
}
