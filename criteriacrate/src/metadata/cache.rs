//! Process-wide descriptor cache.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use tracing::debug;

use super::criteria::Criteria;
use super::descriptor::CriteriaDescriptor;
use super::extraction::extract_descriptor;
use crate::errors::Result;

/// Published descriptors, one per criteria type.
static DESCRIPTORS: LazyLock<RwLock<HashMap<TypeId, Arc<CriteriaDescriptor>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// The descriptor of `T`, extracted on first use.
///
/// Every call for the same type returns the same `Arc`. Concurrent first calls may each
/// extract a draft; the first one published wins and the others are discarded. Extraction
/// runs without holding the lock. Failed extractions are not cached, so a misconfigured type
/// fails on every call.
///
/// # Errors
///
/// The configuration error found while extracting `T`.
pub fn extract<T: Criteria>() -> Result<Arc<CriteriaDescriptor>> {
    let key = TypeId::of::<T>();
    if let Some(descriptor) = lookup(key) {
        return Ok(descriptor);
    }

    let draft = Arc::new(extract_descriptor(&T::declaration())?);
    let mut descriptors = DESCRIPTORS.write().unwrap_or_else(PoisonError::into_inner);
    let published = descriptors.entry(key).or_insert_with(|| {
        debug!(criteria = type_name::<T>(), "Publishing criteria descriptor");
        draft
    });
    Ok(Arc::clone(published))
}

/// Whether `T` already has a published descriptor.
#[must_use]
pub fn is_cached<T: Criteria>() -> bool {
    lookup(TypeId::of::<T>()).is_some()
}

fn lookup(key: TypeId) -> Option<Arc<CriteriaDescriptor>> {
    DESCRIPTORS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .cloned()
}
