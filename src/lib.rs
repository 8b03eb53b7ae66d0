/*

                                  [A+B+C+D+E]          [0, 5)
                          _________/       \_________
                     [A+B]                       [C+D+E]      [0, 2) [2, 5)
                     /   \                       /     \
                    A     B                    C      [D+E]   [2, 3) [3, 5)
                                                       /   \
                                                      D     E

    node i has children 2i+1 (left half [s, mid)) and 2i+2 (right half [mid, e)),
    mid = s + (e - s) / 2

*/
use std::fmt;

use log::{debug, trace};

mod error;
mod operator;
mod summary;

pub use error::RangeQueryError;
pub use operator::{from_fn, BitwiseAnd, BitwiseOr, Euclid, FromFn, Gcd, Max, Min, Operator, Sum};
pub use summary::{Summarize, Summary};

#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
// Span is a half-open interval [start, end)
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    fn mid(&self) -> usize {
        self.start + (self.end - self.start) / 2
    }

    fn is_disjoint(&self, other: &Span) -> bool {
        self.end <= other.start || self.start >= other.end
    }

    fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    span: Span,
    value: T,
}

/// A segment tree answering `O::combine` over any half-open index range in
/// O(log n), with O(log n) point updates.
///
/// The length is fixed at construction. Queries only need `&self`, updates
/// need `&mut self`, so a shared tree can be read from several threads while
/// writers must hold it exclusively (e.g. behind an `RwLock`).
#[derive(Clone, Debug)]
pub struct RangeQueryTree<T, O> {
    tree: Vec<Option<Node<T>>>,
    len: usize,
    operator: O,
}

impl<T: Clone, O: Operator<T>> RangeQueryTree<T, O> {
    pub fn build(values: &[T], operator: O) -> Self {
        let len = values.len();
        let mut seg_tree = Self {
            tree: Vec::new(),
            len,
            operator,
        };

        debug!("building range query tree over {} values", len);
        if len == 0 {
            return seg_tree;
        }

        seg_tree.tree = vec![None; 4 * len];
        seg_tree.build_recursive(values, 0, Span::new(0, len));
        seg_tree
    }

    fn build_recursive(&mut self, values: &[T], index: usize, span: Span) -> T {
        let value = if span.len() == 1 {
            values[span.start].clone()
        } else {
            let mid = span.mid();
            let left = self.build_recursive(values, index * 2 + 1, Span::new(span.start, mid));
            let right = self.build_recursive(values, index * 2 + 2, Span::new(mid, span.end));

            self.operator.combine(&left, &right)
        };

        self.tree[index] = Some(Node {
            span,
            value: value.clone(),
        });
        value
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    /// Reduces `values[start..end]` with the tree's operator.
    pub fn query(&self, start: usize, end: usize) -> Result<T, RangeQueryError> {
        self.query_span(Span::new(start, end))
    }

    pub fn query_span(&self, query_span: Span) -> Result<T, RangeQueryError> {
        self.check_span(query_span)?;
        self.query_dfs(0, query_span)
            .ok_or_else(|| self.invalid_range(query_span))
    }

    fn query_dfs(&self, index: usize, query_span: Span) -> Option<T> {
        let node = self.tree.get(index)?.as_ref()?;

        if node.span.is_disjoint(&query_span) {
            // no overlap
            return None;
        }

        if query_span.contains_span(&node.span) {
            // total overlap
            return Some(node.value.clone());
        }

        let left_res = self.query_dfs(index * 2 + 1, query_span);
        let right_res = self.query_dfs(index * 2 + 2, query_span);

        match (left_res, right_res) {
            (Some(left), Some(right)) => Some(self.operator.combine(&left, &right)),
            (Some(left), None) => Some(left),
            (None, Some(right)) => Some(right),
            (None, None) => None,
        }
    }

    /// Same answer as [`query`](Self::query), walking the tree with an
    /// explicit stack instead of recursion.
    pub fn query_with_stack(&self, start: usize, end: usize) -> Result<T, RangeQueryError> {
        let query_span = Span::new(start, end);
        self.check_span(query_span)?;

        let mut stack: Vec<usize> = vec![0];
        let mut result: Option<T> = None;

        while let Some(i) = stack.pop() {
            let Some(Some(node)) = self.tree.get(i) else {
                continue;
            };

            if node.span.is_disjoint(&query_span) {
                continue;
            }

            if query_span.contains_span(&node.span) {
                result = match result {
                    Some(acc) => Some(self.operator.combine(&acc, &node.value)),
                    None => Some(node.value.clone()),
                };
                continue;
            }

            // right first, so the left half is folded first
            stack.push(i * 2 + 2);
            stack.push(i * 2 + 1);
        }

        result.ok_or_else(|| self.invalid_range(query_span))
    }

    /// Replaces the value at `index` and refreshes every aggregate above it.
    pub fn update(&mut self, index: usize, value: T) -> Result<(), RangeQueryError> {
        self.check_index(index)?;

        trace!("updating index {} of {}", index, self.len);
        self.update_recursive(0, index, value);
        Ok(())
    }

    fn update_recursive(&mut self, node_index: usize, target: usize, value: T) {
        let Some(span) = self
            .tree
            .get(node_index)
            .and_then(|node| node.as_ref())
            .map(|node| node.span)
        else {
            return;
        };

        let value = if span.len() == 1 {
            value
        } else {
            let left_child_index = node_index * 2 + 1;
            let right_child_index = node_index * 2 + 2;

            if target < span.mid() {
                self.update_recursive(left_child_index, target, value);
            } else {
                self.update_recursive(right_child_index, target, value);
            }

            match (self.value_at(left_child_index), self.value_at(right_child_index)) {
                (Some(left), Some(right)) => self.operator.combine(left, right),
                // internal nodes always have both children
                _ => return,
            }
        };

        if let Some(node) = self.tree[node_index].as_mut() {
            node.value = value;
        }
    }

    /// Current value at `index`.
    pub fn get(&self, index: usize) -> Result<&T, RangeQueryError> {
        self.check_index(index)?;

        let mut node_index = 0;
        loop {
            let node = self.tree[node_index]
                .as_ref()
                .ok_or(RangeQueryError::IndexOutOfRange {
                    index,
                    len: self.len,
                })?;

            if node.span.len() == 1 {
                return Ok(&node.value);
            }

            node_index = if index < node.span.mid() {
                node_index * 2 + 1
            } else {
                node_index * 2 + 2
            };
        }
    }

    /// Current values in index order.
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.len)
            .filter_map(|index| self.get(index).ok().cloned())
            .collect()
    }

    fn value_at(&self, index: usize) -> Option<&T> {
        self.tree.get(index)?.as_ref().map(|node| &node.value)
    }

    fn check_span(&self, query_span: Span) -> Result<(), RangeQueryError> {
        if self.is_empty() {
            debug!("rejected query {:?} on empty tree", query_span);
            return Err(RangeQueryError::EmptyStructure);
        }

        if query_span.start >= query_span.end || query_span.end > self.len {
            debug!("rejected query {:?} on tree of length {}", query_span, self.len);
            return Err(self.invalid_range(query_span));
        }

        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), RangeQueryError> {
        if self.is_empty() {
            debug!("rejected index {} on empty tree", index);
            return Err(RangeQueryError::EmptyStructure);
        }

        if index >= self.len {
            debug!("rejected index {} on tree of length {}", index, self.len);
            return Err(RangeQueryError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        Ok(())
    }

    fn invalid_range(&self, query_span: Span) -> RangeQueryError {
        RangeQueryError::InvalidRange {
            start: query_span.start,
            end: query_span.end,
            len: self.len,
        }
    }
}

impl<T: Clone, O: Operator<T> + Default> FromIterator<T> for RangeQueryTree<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        Self::build(&values, O::default())
    }
}

// Sideways rendering: right subtree above its parent, left subtree below.
impl<T: fmt::Display, O> fmt::Display for RangeQueryTree<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node_recursive<T: fmt::Display>(
            tree: &[Option<Node<T>>],
            f: &mut fmt::Formatter<'_>,
            node_index: usize,
            depth: usize,
            is_right: bool,
        ) -> fmt::Result {
            let Some(Some(node)) = tree.get(node_index) else {
                return Ok(());
            };

            write_node_recursive(tree, f, node_index * 2 + 2, depth + 1, true)?;

            let indent = "      ".repeat(depth);
            let branch = if is_right { " /" } else { " \\" };
            writeln!(
                f,
                "{}{}----<[{}, {}), {}>",
                indent, branch, node.span.start, node.span.end, node.value
            )?;

            write_node_recursive(tree, f, node_index * 2 + 1, depth + 1, false)
        }
        write_node_recursive(&self.tree, f, 0, 0, true)
    }
}
