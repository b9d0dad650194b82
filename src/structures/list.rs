//! Index-linked singly-linked list
//!
//! Nodes live in a `Vec` and point at each other by index, so a cycle is just
//! a `next` that refers back to an earlier slot. `None` is the null link.

use super::errors::InputError;

/// A list node: a value and an optional link to another slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListNode {
    pub value: i64,
    pub next: Option<usize>,
}

/// A singly-linked list stored as a node arena
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkedList {
    nodes: Vec<ListNode>,
    cycle_at: Option<usize>,
}

impl LinkedList {
    /// Build a straight chain `values[0] → values[1] → … → null`
    pub fn from_values(values: &[i64]) -> Self {
        let nodes = values
            .iter()
            .enumerate()
            .map(|(idx, &value)| ListNode {
                value,
                next: (idx + 1 < values.len()).then_some(idx + 1),
            })
            .collect();

        LinkedList {
            nodes,
            cycle_at: None,
        }
    }

    /// Build a chain whose tail links back to `position`
    pub fn with_cycle(values: &[i64], position: usize) -> Result<Self, InputError> {
        if position >= values.len() {
            return Err(InputError::CyclePosition {
                position,
                len: values.len(),
            });
        }

        let mut list = Self::from_values(values);
        if let Some(tail) = list.nodes.last_mut() {
            tail.next = Some(position);
        }
        list.cycle_at = Some(position);
        Ok(list)
    }

    pub fn nodes(&self) -> &[ListNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Where the tail links back to, if the list was built with a cycle
    pub fn cycle_at(&self) -> Option<usize> {
        self.cycle_at
    }

    /// Follow the link out of `index`
    pub fn next_of(&self, index: usize) -> Option<usize> {
        self.nodes.get(index).and_then(|node| node.next)
    }

    pub fn value_at(&self, index: usize) -> Option<i64> {
        self.nodes.get(index).map(|node| node.value)
    }
}

/// Validate a find-duplicate array: `n + 1` values, each in `1..=n`
pub fn validate_duplicate_array(values: &[i64]) -> Result<Vec<usize>, InputError> {
    if values.len() < 2 {
        return Err(InputError::Empty {
            what: "duplicate candidates (need at least two numbers)",
        });
    }

    let max = (values.len() - 1) as i64;
    values
        .iter()
        .map(|&value| {
            if (1..=max).contains(&value) {
                Ok(value as usize)
            } else {
                Err(InputError::OutOfRange { value, min: 1, max })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_links_forward() {
        let list = LinkedList::from_values(&[3, 2, 0]);
        assert_eq!(list.next_of(0), Some(1));
        assert_eq!(list.next_of(1), Some(2));
        assert_eq!(list.next_of(2), None);
        assert_eq!(list.cycle_at(), None);
    }

    #[test]
    fn test_cycle_redirects_tail() {
        let list = LinkedList::with_cycle(&[4, 1, 2, 3], 1).unwrap();
        assert_eq!(list.next_of(3), Some(1));
        assert_eq!(list.cycle_at(), Some(1));
    }

    #[test]
    fn test_cycle_position_out_of_range() {
        let err = LinkedList::with_cycle(&[1, 2], 5).unwrap_err();
        assert_eq!(err, InputError::CyclePosition { position: 5, len: 2 });
    }

    #[test]
    fn test_duplicate_array_range() {
        assert_eq!(
            validate_duplicate_array(&[1, 3, 4, 2, 2]).unwrap(),
            vec![1, 3, 4, 2, 2]
        );
        assert!(validate_duplicate_array(&[0, 1]).is_err());
        assert!(validate_duplicate_array(&[1, 5, 2]).is_err());
    }
}
