//! Generic selection stage
//!
//! Every pipeline stage narrows a fetched candidate list the same way: an
//! exact-match flag value when one was given, otherwise an interactive pick.

use crate::cli::prompt;
use crate::error::{Result, XccError};

/// Resolve one candidate from a fetched list.
///
/// With a filter, the first candidate the matcher accepts wins; a miss is a
/// not-found error enumerating every candidate's display string. Without a
/// filter, an empty list fails the same way and a non-empty one goes to the
/// interactive chooser.
pub fn resolve<T>(
    kind: &'static str,
    filter: Option<&str>,
    mut candidates: Vec<T>,
    display: impl Fn(&T) -> String,
    matches: impl Fn(&T, &str) -> bool,
) -> Result<T> {
    if let Some(wanted) = filter {
        return match candidates.iter().position(|c| matches(c, wanted)) {
            Some(index) => Ok(candidates.remove(index)),
            None => Err(XccError::not_found(
                kind,
                wanted,
                candidates.iter().map(&display).collect(),
            )),
        };
    }

    if candidates.is_empty() {
        return Err(XccError::not_found(kind, "(no candidates)", vec![]));
    }

    let labels: Vec<String> = candidates.iter().map(&display).collect();
    let index = prompt::choose(&format!("Select a {}", kind.to_lowercase()), &labels)?;
    Ok(candidates.remove(index))
}
