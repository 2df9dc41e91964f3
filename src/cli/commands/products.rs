use crate::appstore::{reconcile_bundle_ids, AppStoreClient};
use crate::cli::args::{OutputFormat, ProductsArgs};
use crate::error::Result;
use crate::output;

/// Handle the products command
pub fn products(
    client: &AppStoreClient,
    args: &ProductsArgs,
    format: OutputFormat,
) -> Result<String> {
    let bundle_ids = client.list_bundle_ids()?;
    let mut all_products = client.list_products()?;
    reconcile_bundle_ids(&mut all_products, &bundle_ids);

    let products: Vec<_> = if let Some(ref filter) = args.filter {
        let filter_lower = filter.to_lowercase();
        all_products
            .into_iter()
            .filter(|p| p.attributes.name.to_lowercase().contains(&filter_lower))
            .collect()
    } else {
        all_products
    };

    output::format_products(&products, format)
}
