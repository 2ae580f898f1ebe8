//! # Block Identity Resolver
//!
//! Binds the block names a generator needs to runtime ids, once, at
//! construction. Generation code only ever sees the resolved ids.

use stratum_core::{BlockId, ContentRegistry};

use crate::error::GenResult;

/// Resolves a fixed list of block names.
///
/// # Errors
///
/// Returns [`crate::GenerationError::Content`] wrapping
/// [`stratum_core::ContentError::MissingBlock`] for the first unknown name.
/// There is no fallback id.
pub fn resolve_blocks<const N: usize>(
    content: &ContentRegistry,
    names: [&str; N],
) -> GenResult<[BlockId; N]> {
    let mut ids = [0; N];
    for (slot, name) in ids.iter_mut().zip(names) {
        *slot = content.require_block(name).map_err(|e| {
            tracing::warn!(block = name, "generator requires an unregistered block");
            e
        })?;
    }
    tracing::debug!(?names, ?ids, "resolved generator blocks");
    Ok(ids)
}
