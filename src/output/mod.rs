pub mod json;
pub mod pretty;

use crate::appstore::{Product, Workflow};
use crate::cli::OutputFormat;
use crate::error::Result;

/// Format a list of products based on output format
pub fn format_products(products: &[Product], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_products(products)),
        OutputFormat::Json => json::format_products(products),
    }
}

/// Format a list of workflows based on output format
pub fn format_workflows(workflows: &[Workflow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_workflows(workflows)),
        OutputFormat::Json => json::format_workflows(workflows),
    }
}
