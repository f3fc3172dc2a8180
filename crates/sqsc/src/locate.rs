//! Lookup by name on top of a list call

use crate::error::{Error, ResourceKind, Result};
use sqsc_core::locate::{Named, find_named};
use std::future::Future;

/// Await `list`, then return the item called `name`.
///
/// A miss is [`Error::NotFound`] for `kind`; a failing list call is returned
/// unchanged, so a missing parent project still reads as such.
pub async fn find_by_name<T, Fut>(list: Fut, kind: ResourceKind, name: &str) -> Result<T>
where
    T: Named,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let items = list.await?;
    find_named(items, name).ok_or_else(|| Error::not_found(kind, name))
}
