use colored::Colorize;

use crate::appstore::{Product, Workflow};

/// Format a list of products for pretty output
pub fn format_products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Products".bold()));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for product in products {
        output.push_str(&format!("{}", product.attributes.name.bold()));
        if let Some(bundle_id) = product.bundle_identifier() {
            output.push_str(&format!("  {}", bundle_id.dimmed()));
        }
        if let Some(ref product_type) = product.attributes.product_type {
            output.push_str(&format!("  [{}]", product_type.to_lowercase().cyan()));
        }
        output.push('\n');
    }

    output
}

/// Format a list of workflows for pretty output
pub fn format_workflows(workflows: &[Workflow]) -> String {
    if workflows.is_empty() {
        return "No workflows found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Workflows".bold()));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for workflow in workflows {
        output.push_str(&workflow.attributes.name.bold().to_string());
        if let Some(ref description) = workflow.attributes.description {
            if !description.is_empty() {
                output.push_str(&format!("  {}", description.dimmed()));
            }
        }
        output.push('\n');
    }

    output
}
