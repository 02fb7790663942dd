// src/layout/layering.rs

//! Longest-path layering over the resolved dependency edges.
//!
//! Kahn's algorithm, where every processed step pushes
//! `level(current) + 1` onto each dependent and keeps the maximum. A step's
//! level therefore equals its longest resolved dependency chain.
//!
//! Steps Kahn never reaches (on a cycle, or downstream of one) are placed
//! one level below the deepest level known at that point, in list order.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, warn};

use crate::dag::StepGraph;

/// Level assignment for a step graph, indexed by step position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layering {
    levels: Vec<usize>,
    rows: Vec<Vec<usize>>,
    fallback: Vec<usize>,
}

impl Layering {
    /// Level of the step at list position `i`.
    pub fn level(&self, i: usize) -> usize {
        self.levels[i]
    }

    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Step positions grouped by ascending level, list order within a row.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Positions that were placed by the cycle fallback.
    pub fn fallback(&self) -> &[usize] {
        &self.fallback
    }
}

pub fn assign_levels(graph: &StepGraph) -> Layering {
    let n = graph.len();

    let mut indegree: Vec<usize> = (0..n).map(|i| graph.dependency_indices(i).len()).collect();
    let mut level: Vec<Option<usize>> = vec![None; n];
    let mut processed = vec![false; n];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for (i, &deg) in indegree.iter().enumerate() {
        if deg == 0 {
            level[i] = Some(0);
            queue.push_back(i);
        }
    }

    while let Some(current) = queue.pop_front() {
        processed[current] = true;
        let next = level[current].unwrap_or(0) + 1;

        for &child in graph.dependent_indices(current) {
            level[child] = Some(level[child].map_or(next, |l| l.max(next)));

            indegree[child] = indegree[child].saturating_sub(1);
            if indegree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    let mut fallback = Vec::new();
    for i in 0..n {
        if processed[i] {
            continue;
        }
        let max_known = level.iter().flatten().copied().max().unwrap_or(0);
        level[i] = Some(max_known + 1);
        fallback.push(i);
        warn!(
            step = %graph.steps()[i].step_id,
            level = max_known + 1,
            "step not reachable by layering (cycle or unresolved chain); placing below deepest level"
        );
    }

    let levels: Vec<usize> = level.into_iter().map(|l| l.unwrap_or(0)).collect();

    let mut grouped: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &l) in levels.iter().enumerate() {
        grouped.entry(l).or_default().push(i);
    }
    let rows: Vec<Vec<usize>> = grouped.into_values().collect();

    debug!(steps = n, rows = rows.len(), fallback = fallback.len(), "assigned levels");

    Layering {
        levels,
        rows,
        fallback,
    }
}
