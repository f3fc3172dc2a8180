//! Name-based lookup over listed collections.
//!
//! Most control-plane collections (stateful nodes, batches, redis databases,
//! services, ...) only expose a list route. Looking one item up means listing
//! the whole collection and scanning it, which is O(n) per lookup. Callers
//! should not do this in tight loops; results are never cached because the
//! control plane may change between two calls.

/// A record identified by a human-chosen name.
pub trait Named {
    /// The name the control plane uses to address this record.
    fn name(&self) -> &str;
}

/// Return the first item whose name equals `name`.
///
/// Duplicate names are not flagged; the first match wins.
///
/// # Examples
///
/// ```rust
/// use sqsc_core::locate::{Named, find_named};
///
/// struct Node(&'static str);
///
/// impl Named for Node {
///     fn name(&self) -> &str {
///         self.0
///     }
/// }
///
/// let found = find_named(vec![Node("a"), Node("b")], "b");
/// assert_eq!(found.map(|n| n.0), Some("b"));
/// ```
pub fn find_named<T, I>(items: I, name: &str) -> Option<T>
where
    T: Named,
    I: IntoIterator<Item = T>,
{
    items.into_iter().find(|item| item.name() == name)
}

/// Borrowing variant of [`find_named`].
pub fn find_named_ref<'a, T: Named>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        name: String,
    }

    impl Named for Item {
        fn name(&self) -> &str {
            &self.name
        }
    }

    fn item(id: u32, name: &str) -> Item {
        Item {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_find_named_hit() {
        let items = vec![item(1, "nodeb"), item(2, "x"), item(3, "test1")];
        assert_eq!(find_named(items, "x"), Some(item(2, "x")));
    }

    #[test]
    fn test_find_named_miss() {
        let items = vec![item(1, "nodeb"), item(2, "test1")];
        assert_eq!(find_named(items, "x"), None);
    }

    #[test]
    fn test_find_named_empty() {
        assert_eq!(find_named(Vec::<Item>::new(), "x"), None);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let items = vec![item(1, "dup"), item(2, "dup")];
        assert_eq!(find_named(items, "dup").map(|i| i.id), Some(1));
    }

    #[test]
    fn test_find_named_ref_leaves_list_untouched() {
        let items = vec![item(1, "a"), item(2, "b")];
        let before = items.clone();

        let found = find_named_ref(&items, "b");

        assert_eq!(found, Some(&item(2, "b")));
        assert_eq!(items, before);
    }

    proptest! {
        #[test]
        fn prop_found_item_has_requested_name(
            names in proptest::collection::vec("[a-z]{1,4}", 0..16),
            wanted in "[a-z]{1,4}",
        ) {
            let items: Vec<Item> = names
                .iter()
                .enumerate()
                .map(|(i, n)| item(i as u32, n))
                .collect();

            match find_named_ref(&items, &wanted) {
                Some(found) => {
                    prop_assert_eq!(&found.name, &wanted);
                    let first = names.iter().position(|n| *n == wanted).unwrap();
                    prop_assert_eq!(found.id, first as u32);
                }
                None => prop_assert!(!names.contains(&wanted)),
            }
        }
    }
}
