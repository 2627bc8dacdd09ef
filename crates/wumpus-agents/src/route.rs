//! Shortest routes through cells the knowledge base proves safe.
//!
//! Routes are found with a breadth-first search that only expands safe or
//! visited cells, so every cell on a returned route can be entered without
//! risk. Neighbors are expanded North, East, South, West, which makes the
//! chosen route deterministic when several shortest routes exist.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use wumpus_types::Cell;

use crate::knowledge::KnowledgeBase;

/// Find the shortest safe route from `start` to the nearest cell satisfying
/// `is_goal`.
///
/// Returns the ordered cells from `start` to the goal (inclusive), or `None`
/// if no goal is reachable. Goal cells themselves must be safe.
pub fn find_route(
    kb: &KnowledgeBase,
    start: Cell,
    is_goal: impl Fn(Cell) -> bool,
) -> Option<Vec<Cell>> {
    if is_goal(start) {
        return Some(vec![start]);
    }

    let bounds = kb.bounds();
    let mut seen: BTreeSet<Cell> = BTreeSet::new();
    let mut prev: BTreeMap<Cell, Cell> = BTreeMap::new();
    let mut queue: VecDeque<Cell> = VecDeque::new();

    seen.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in bounds.neighbors(current) {
            if !kb.ask_safe(neighbor) || !seen.insert(neighbor) {
                continue;
            }
            prev.insert(neighbor, current);
            if is_goal(neighbor) {
                return Some(reconstruct(&prev, start, neighbor));
            }
            queue.push_back(neighbor);
        }
    }

    None
}

/// Find the shortest safe route between two cells.
pub fn route_to(kb: &KnowledgeBase, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    find_route(kb, start, |cell| cell == goal)
}

fn reconstruct(prev: &BTreeMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = VecDeque::new();
    let mut current = goal;
    path.push_front(current);
    while current != start {
        let Some(&predecessor) = prev.get(&current) else {
            break;
        };
        path.push_front(predecessor);
        current = predecessor;
    }
    path.into_iter().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wumpus_types::{GridBounds, PerceptSet};

    use super::*;

    fn explored() -> KnowledgeBase {
        // (1,1) quiet, (2,1) breeze, (1,2) quiet: (2,2) and (1,3) safe, (3,1) pit.
        let mut kb = KnowledgeBase::new(GridBounds::default());
        kb.tell(Cell::START, PerceptSet::none()).unwrap();
        kb.tell(Cell::new(2, 1), PerceptSet::none().with_breeze()).unwrap();
        kb.tell(Cell::new(1, 2), PerceptSet::none()).unwrap();
        kb
    }

    #[test]
    fn route_to_self_is_single_cell() {
        let kb = explored();
        assert_eq!(route_to(&kb, Cell::START, Cell::START), Some(vec![Cell::START]));
    }

    #[test]
    fn route_passes_only_safe_cells() {
        let kb = explored();
        let route = route_to(&kb, Cell::new(2, 1), Cell::new(1, 3)).unwrap();
        assert_eq!(route.first(), Some(&Cell::new(2, 1)));
        assert_eq!(route.last(), Some(&Cell::new(1, 3)));
        assert_eq!(route.len(), 4);
        assert!(route.iter().all(|&c| kb.ask_safe(c)));
    }

    #[test]
    fn unknown_cells_block_routes() {
        let kb = explored();
        assert_eq!(route_to(&kb, Cell::START, Cell::new(4, 4)), None);
        assert_eq!(route_to(&kb, Cell::START, Cell::new(3, 1)), None);
    }

    #[test]
    fn nearest_goal_found_first() {
        let kb = explored();
        let route = find_route(&kb, Cell::START, |c| !kb.is_visited(c)).unwrap();
        // (1,2) is expanded before (2,1), and its North neighbor first.
        assert_eq!(route, vec![Cell::START, Cell::new(1, 2), Cell::new(1, 3)]);
    }
}
