use crate::appstore::AppStoreClient;
use crate::cli::args::{OutputFormat, WorkflowsArgs};
use crate::error::Result;
use crate::output;

use super::build::resolve_product;

/// Handle the workflows command
pub fn workflows(
    client: &AppStoreClient,
    args: &WorkflowsArgs,
    format: OutputFormat,
) -> Result<String> {
    let product = resolve_product(client, args.product.as_deref())?;
    let workflows = client.list_workflows(&product.id)?;
    output::format_workflows(&workflows, format)
}
