//! # ColumnOrder
//!
//! Maps the user's display order of columns onto the server's column indices.
//!
//! Display indices come from header/cell clicks and are 1-based over the data
//! columns: index 0 is always the synthetic row number column, which exists
//! only on the client and can never be the target of a mutation. The order is
//! a permutation `order[display - 1] = backend`.

use serde::{Deserialize, Serialize};

use crate::error::LoomError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnOrder {
    order: Vec<usize>,
}

/// Backend index for display index `display_index` under `order`
pub fn to_backend(display_index: usize, order: &[usize]) -> Result<usize, LoomError> {
    if display_index == 0 {
        return Err(LoomError::immutable_column());
    }
    match order.get(display_index - 1) {
        Some(backend) => Ok(*backend),
        None => Err(LoomError::column_out_of_range(display_index, order.len())),
    }
}

fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &i in order {
        match seen.get_mut(i) {
            Some(s) if !*s => *s = true,
            _ => return false,
        }
    }
    true
}

impl ColumnOrder {
    pub fn identity(len: usize) -> ColumnOrder {
        ColumnOrder {
            order: (0..len).collect(),
        }
    }

    /// Uses `order` if it is a permutation of `0..column_count`, identity otherwise
    pub fn from_order(order: Vec<usize>, column_count: usize) -> ColumnOrder {
        if order.len() == column_count && is_permutation(&order) {
            ColumnOrder { order }
        } else {
            log::warn!(
                "column order {:?} does not match {} columns, using identity",
                order,
                column_count
            );
            ColumnOrder::identity(column_count)
        }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.order.iter().enumerate().all(|(i, &b)| i == b)
    }

    /// The order to compute with for a table of `column_count` columns. A stale
    /// order of the wrong length is never indexed, identity is used instead.
    fn effective(&self, column_count: usize) -> ColumnOrder {
        if self.order.len() == column_count {
            self.clone()
        } else {
            log::warn!(
                "stale column order of length {} for {} columns, falling back to identity",
                self.order.len(),
                column_count
            );
            ColumnOrder::identity(column_count)
        }
    }

    /// Backend index of the column shown at `display_index`
    pub fn to_backend(&self, display_index: usize, column_count: usize) -> Result<usize, LoomError> {
        to_backend(display_index, self.effective(column_count).as_slice())
    }

    /// Backend insert position for a new column added at the clicked header.
    /// The serial column (0) inserts at the front, any other header inserts
    /// right after the backend column it shows.
    pub fn insert_position(&self, display_index: usize, column_count: usize) -> Result<usize, LoomError> {
        if display_index == 0 {
            return Ok(0);
        }
        let backend = to_backend(display_index, self.effective(column_count).as_slice())?;
        Ok(backend + 1)
    }

    /// Move the data column at display position `source` to `target`, both
    /// 0-based over the data columns.
    pub fn reorder(&mut self, source: usize, target: usize) -> Result<(), LoomError> {
        let len = self.order.len();
        if source >= len || target >= len {
            return Err(LoomError::validation(format!(
                "Cannot move column {source} to {target}, the table has {len} columns"
            )));
        }
        if source == target {
            return Ok(());
        }
        let moved = self.order.remove(source);
        self.order.insert(target, moved);
        Ok(())
    }

    /// Called whenever the server returns a new column set. A different column
    /// count resets to identity, the same count keeps the user's order.
    pub fn reconcile(&mut self, column_count: usize) {
        if self.order.len() != column_count {
            log::debug!(
                "column count changed {} -> {}, resetting column order",
                self.order.len(),
                column_count
            );
            *self = ColumnOrder::identity(column_count);
        }
    }

    /// `items` (in backend order) rearranged into display order
    pub fn arrange<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.effective(items.len())
            .order
            .iter()
            .filter_map(|&i| items.get(i).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_backend_every_display_index() {
        let orders: Vec<Vec<usize>> = vec![
            vec![0],
            vec![1, 0],
            vec![2, 0, 1],
            vec![3, 1, 0, 4, 2],
            (0..8).rev().collect(),
        ];
        for order in orders {
            for i in 1..=order.len() {
                assert_eq!(to_backend(i, &order).unwrap(), order[i - 1]);
            }
            assert!(matches!(
                to_backend(0, &order),
                Err(LoomError::ImmutableColumn(_))
            ));
        }
    }

    #[test]
    fn test_right_click_third_visible_column() {
        let order = ColumnOrder::from_order(vec![2, 0, 1], 3);
        // header index 2 is the second data column
        assert_eq!(order.to_backend(2, 3).unwrap(), 0);
        assert_eq!(order.to_backend(3, 3).unwrap(), 1);
    }

    #[test]
    fn test_out_of_range_display_index() {
        let order = ColumnOrder::identity(3);
        assert!(matches!(
            order.to_backend(4, 3),
            Err(LoomError::Validation(_))
        ));
    }

    #[test]
    fn test_stale_order_falls_back_to_identity() {
        let order = ColumnOrder::from_order(vec![3, 1, 0, 4, 2], 5);
        // the table now only has 3 columns
        assert_eq!(order.to_backend(1, 3).unwrap(), 0);
        assert_eq!(order.to_backend(3, 3).unwrap(), 2);
        assert_eq!(order.insert_position(3, 3).unwrap(), 3);
    }

    #[test]
    fn test_insert_position() {
        let order = ColumnOrder::from_order(vec![2, 0, 1], 3);
        assert_eq!(order.insert_position(0, 3).unwrap(), 0);
        assert_eq!(order.insert_position(1, 3).unwrap(), 3);
        assert_eq!(order.insert_position(2, 3).unwrap(), 1);
    }

    #[test]
    fn test_from_order_rejects_non_permutations() {
        assert!(ColumnOrder::from_order(vec![0, 0, 1], 3).is_identity());
        assert!(ColumnOrder::from_order(vec![0, 1], 3).is_identity());
        assert!(ColumnOrder::from_order(vec![0, 1, 5], 3).is_identity());
        assert_eq!(ColumnOrder::from_order(vec![1, 2, 0], 3).as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn test_reorder() {
        let mut order = ColumnOrder::identity(4);
        order.reorder(0, 2).unwrap();
        assert_eq!(order.as_slice(), &[1, 2, 0, 3]);
        order.reorder(3, 0).unwrap();
        assert_eq!(order.as_slice(), &[3, 1, 2, 0]);
        order.reorder(1, 1).unwrap();
        assert_eq!(order.as_slice(), &[3, 1, 2, 0]);
        assert!(order.reorder(4, 0).is_err());
    }

    #[test]
    fn test_reconcile_resets_only_on_length_change() {
        let mut order = ColumnOrder::from_order(vec![3, 1, 0, 4, 2], 5);
        order.reconcile(5);
        assert_eq!(order.as_slice(), &[3, 1, 0, 4, 2]);
        order.reconcile(4);
        assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_arrange() {
        let order = ColumnOrder::from_order(vec![2, 0, 1], 3);
        assert_eq!(order.arrange(&["a", "b", "c"]), vec!["c", "a", "b"]);
    }
}
