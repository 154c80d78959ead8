//! Nesting flat clauses by their dotted numbers.

use std::collections::HashMap;

use crate::tree::ClauseNode;

/// The number of the clause that would contain `number`, e.g. `"2.1"` for `"2.1.3"`.
///
/// Numbers without a dot (`"2"`, `"Auto"`, `""`) have no parent.
pub fn parent_number(number: &str) -> Option<&str> {
    number.rfind('.').map(|dot| &number[..dot])
}

/// Nest `clauses` under the clause their number points to.
///
/// A clause becomes a child of the clause named by [`parent_number`] when one
/// exists (for duplicate numbers, the last one), and a root otherwise. Order
/// among siblings and roots follows the input. `children` is only set on
/// clauses that received at least one child.
pub fn build_tree(clauses: &[ClauseNode]) -> Vec<ClauseNode> {
    let index: HashMap<&str, usize> = clauses
        .iter()
        .enumerate()
        .map(|(i, clause)| (clause.number.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); clauses.len()];
    let mut roots = Vec::new();

    for (i, clause) in clauses.iter().enumerate() {
        match parent_number(&clause.number).and_then(|parent| index.get(parent)) {
            Some(&parent) => children[parent].push(i),
            None => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|i| nest(i, clauses, &children))
        .collect()
}

fn nest(i: usize, clauses: &[ClauseNode], children: &[Vec<usize>]) -> ClauseNode {
    let mut node = ClauseNode {
        children: None,
        ..clauses[i].clone()
    };
    if !children[i].is_empty() {
        node.children = Some(
            children[i]
                .iter()
                .map(|&child| nest(child, clauses, children))
                .collect(),
        );
    }
    node
}

/// Depth-first, pre-order search for a clause number.
pub fn find_clause_by_number<'a>(tree: &'a [ClauseNode], number: &str) -> Option<&'a ClauseNode> {
    tree.iter().find_map(|clause| {
        if clause.number == number {
            return Some(clause);
        }
        clause
            .children
            .as_deref()
            .and_then(|children| find_clause_by_number(children, number))
    })
}
