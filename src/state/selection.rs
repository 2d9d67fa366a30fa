//! Active-notebook selection rules.
//!
//! Pure functions over `(notebook ids in display order, active id)` so the
//! single-active-notebook invariant can be tested without a DOM or storage.

/// Selection at load time: the first notebook, or nothing.
pub(crate) fn initial_active(ids: &[String]) -> Option<String> {
    ids.first().cloned()
}

/// Selection after deleting `deleted` from `ids` (display order, pre-delete).
///
/// The deleted row's sibling takes over regardless of which notebook was
/// active: the next one, else the previous one, else nothing.
pub(crate) fn next_active_after_delete(ids: &[String], deleted: &str) -> Option<String> {
    let index = ids.iter().position(|id| id == deleted)?;
    ids.get(index + 1)
        .or_else(|| index.checked_sub(1).and_then(|i| ids.get(i)))
        .cloned()
}

/// Clamps a possibly stale selection onto the current notebook list.
pub(crate) fn reconcile(ids: &[String], active: Option<&str>) -> Option<String> {
    match active {
        Some(id) if ids.iter().any(|x| x == id) => Some(id.to_string()),
        _ => ids.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_initial_active_is_first_notebook() {
        assert_eq!(initial_active(&ids(&["a", "b"])), Some("a".to_string()));
        assert_eq!(initial_active(&[]), None);
    }

    #[test]
    fn test_delete_prefers_next_sibling() {
        let list = ids(&["a", "b", "c"]);
        assert_eq!(
            next_active_after_delete(&list, "b"),
            Some("c".to_string())
        );
    }

    #[test]
    fn test_delete_last_falls_back_to_previous() {
        let list = ids(&["a", "b", "c"]);
        assert_eq!(
            next_active_after_delete(&list, "c"),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_delete_only_notebook_clears_selection() {
        let list = ids(&["a"]);
        assert_eq!(next_active_after_delete(&list, "a"), None);
    }

    #[test]
    fn test_delete_hands_selection_to_the_deleted_rows_sibling() {
        // The sibling of the deleted row takes over even when another
        // notebook was active.
        let list = ids(&["a", "b", "c"]);
        assert_eq!(
            next_active_after_delete(&list, "a"),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_delete_with_sole_sibling_activates_it() {
        let list = ids(&["n1", "n2"]);
        assert_eq!(
            next_active_after_delete(&list, "n1"),
            Some("n2".to_string())
        );
    }

    #[test]
    fn test_reconcile_keeps_valid_selection_and_repairs_stale_ones() {
        let list = ids(&["a", "b"]);
        assert_eq!(reconcile(&list, Some("b")), Some("b".to_string()));
        assert_eq!(reconcile(&list, Some("ghost")), Some("a".to_string()));
        assert_eq!(reconcile(&list, None), Some("a".to_string()));
        assert_eq!(reconcile(&[], Some("a")), None);
    }

    #[test]
    fn test_exactly_one_active_across_random_sequences() {
        // Simulate create/delete/activate sequences and check the invariant:
        // active is Some iff any notebook exists, and always names a member.
        let mut list: Vec<String> = vec![];
        let mut active: Option<String> = None;

        let apply_delete = |list: &mut Vec<String>, active: &mut Option<String>, id: &str| {
            let sibling = next_active_after_delete(list, id);
            list.retain(|x| x != id);
            *active = reconcile(list, sibling.as_deref());
        };

        for step in 0..40u32 {
            match step % 4 {
                // create: new notebook becomes active
                0 | 1 => {
                    let id = format!("nb-{step}");
                    list.push(id.clone());
                    active = Some(id);
                }
                // activate some existing notebook
                2 => {
                    if let Some(id) = list.get(step as usize % list.len().max(1)) {
                        active = Some(id.clone());
                    }
                }
                // delete the active notebook
                _ => {
                    if let Some(id) = active.clone() {
                        apply_delete(&mut list, &mut active, &id);
                    }
                }
            }

            assert_eq!(active.is_some(), !list.is_empty());
            if let Some(id) = &active {
                assert!(list.contains(id));
            }
        }
    }
}
