pub mod cycles;
pub mod init;
pub mod issues;
pub mod labels;
pub mod projects;
pub mod teams;
pub mod users;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::{self, Listing};

fn show_list<T: Listing>(items: &[T], format: OutputFormat) -> Result<()> {
    output::print(&output::render_list(items, format)?);
    Ok(())
}

fn show_one<T: Listing>(item: &T, format: OutputFormat) -> Result<()> {
    output::print(&output::render_one(item, format)?);
    Ok(())
}
