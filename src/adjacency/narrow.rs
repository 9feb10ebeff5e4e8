//! Pruning primitive.
//!
//! `narrow_down` is the single bulk mutation behind node deletion
//! (`keep = false` against the deleted id) and subgraph compaction
//! (`keep = true` against the surviving ids).

use hashbrown::HashSet;

use super::AdjacencySet;
use crate::model::ElementId;

/// Narrow `adj` against `reference` in place.
///
/// With `keep = true` every id outside `reference` is dropped; with
/// `keep = false` every id inside `reference` is dropped. Returns the number
/// of ids removed. Empty inputs are valid and may leave `adj` untouched.
pub fn narrow_down<A>(adj: &mut A, reference: &HashSet<ElementId>, keep: bool) -> usize
where
    A: AdjacencySet + ?Sized,
{
    if adj.is_empty() {
        return 0;
    }
    if keep {
        let doomed: Vec<ElementId> = adj
            .ids()
            .into_iter()
            .filter(|id| !reference.contains(id))
            .collect();
        doomed.iter().filter(|id| adj.remove(id)).count()
    } else {
        reference.iter().filter(|id| adj.remove(id)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::Adjacency;
    use crate::config::ContainerKind;
    use pretty_assertions::assert_eq;

    fn ids(xs: &[i64]) -> HashSet<ElementId> {
        xs.iter().map(|&x| ElementId::from(x)).collect()
    }

    fn filled(kind: ContainerKind, xs: &[i64]) -> Adjacency {
        let mut adj = Adjacency::new(kind, ElementId::from(0));
        for &x in xs {
            adj.insert(&ElementId::from(x)).unwrap();
        }
        adj
    }

    #[test]
    fn test_drop_reference_ids() {
        for kind in [ContainerKind::List, ContainerKind::Set, ContainerKind::String] {
            let mut adj = filled(kind, &[3, 4, 5, 6]);
            let removed = narrow_down(&mut adj, &ids(&[4, 6]), false);
            assert_eq!(removed, 2);
            let got: HashSet<ElementId> = adj.ids().into_iter().collect();
            assert_eq!(got, ids(&[3, 5]), "{kind}");
        }
    }

    #[test]
    fn test_list_keeps_relative_order() {
        let mut adj = filled(ContainerKind::List, &[3, 4, 5, 6]);
        narrow_down(&mut adj, &ids(&[4, 6]), false);
        assert_eq!(adj.ids(), vec![ElementId::from(3), ElementId::from(5)]);
    }

    #[test]
    fn test_keep_reference_ids() {
        for kind in [ContainerKind::List, ContainerKind::Set, ContainerKind::String] {
            let mut adj = filled(kind, &[1, 2, 3, 4]);
            assert_eq!(narrow_down(&mut adj, &ids(&[2, 4, 9]), true), 2);
            let got: HashSet<ElementId> = adj.ids().into_iter().collect();
            assert_eq!(got, ids(&[2, 4]), "{kind}");
        }
    }

    #[test]
    fn test_empty_inputs() {
        let mut adj = filled(ContainerKind::Set, &[1, 2]);
        assert_eq!(narrow_down(&mut adj, &HashSet::new(), false), 0);
        assert_eq!(adj.len(), 2);

        assert_eq!(narrow_down(&mut adj, &HashSet::new(), true), 2);
        assert!(adj.is_empty());

        let mut empty = filled(ContainerKind::String, &[]);
        assert_eq!(narrow_down(&mut empty, &ids(&[1]), true), 0);
    }

    #[test]
    fn test_keep_with_own_contents_is_noop() {
        let mut adj = filled(ContainerKind::List, &[7, 8, 9]);
        let own: HashSet<ElementId> = adj.ids().into_iter().collect();
        assert_eq!(narrow_down(&mut adj, &own, true), 0);
        assert_eq!(adj.len(), 3);
    }
}
