use crate::appstore::{Product, Workflow};
use crate::error::Result;

/// Format a list of products as JSON
pub fn format_products(products: &[Product]) -> Result<String> {
    Ok(serde_json::to_string_pretty(products)?)
}

/// Format a list of workflows as JSON
pub fn format_workflows(workflows: &[Workflow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(workflows)?)
}
