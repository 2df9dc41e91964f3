//! Interactive terminal prompts
//!
//! Thin wrapper over dialoguer so the selection pipeline stays free of
//! terminal concerns.

use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;

use crate::error::Result;

/// Present a filterable single-choice list and return the chosen index.
///
/// The caller guarantees `items` is non-empty; an interrupted or failed
/// prompt surfaces as an error rather than a default pick.
pub fn choose<T: ToString>(prompt: &str, items: &[T]) -> Result<usize> {
    let index = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(index)
}
