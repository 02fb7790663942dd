// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::warn;

use crate::dag::step::{Step, StepId};

/// Internal adjacency for one step, as indices into the step list.
#[derive(Debug, Clone, Default)]
struct StepLinks {
    /// Dependencies that resolve to a step, in dependency order.
    deps: Vec<usize>,
    /// Steps that list this one as a dependency, in list order.
    dependents: Vec<usize>,
}

/// Id-indexed arena over an ordered step list.
///
/// Steps never reference each other directly; every relation goes through
/// `step_id` lookups, so dangling ids, self-references and cycles are all
/// representable. Raw dependency lists are kept untouched for readiness;
/// resolved adjacency drops dangling ids and is used for layout.
#[derive(Debug, Clone, Default)]
pub struct StepGraph {
    steps: Vec<Step>,
    index: HashMap<StepId, usize>,
    links: Vec<StepLinks>,
}

impl StepGraph {
    /// Build the arena from a step list.
    ///
    /// Ids are expected to be unique. A repeated id keeps its first
    /// occurrence; later ones are dropped with a warning.
    pub fn new(steps: Vec<Step>) -> Self {
        let mut kept: Vec<Step> = Vec::with_capacity(steps.len());
        let mut index: HashMap<StepId, usize> = HashMap::with_capacity(steps.len());

        for step in steps {
            if index.contains_key(&step.step_id) {
                warn!(step = %step.step_id, "duplicate step id; keeping first occurrence");
                continue;
            }
            index.insert(step.step_id.clone(), kept.len());
            kept.push(step);
        }

        let mut links = vec![StepLinks::default(); kept.len()];
        for (i, step) in kept.iter().enumerate() {
            for dep in &step.dependencies {
                match index.get(dep) {
                    Some(&d) => {
                        links[i].deps.push(d);
                        links[d].dependents.push(i);
                    }
                    None => {
                        warn!(
                            step = %step.step_id,
                            dep = %dep,
                            "dependency does not resolve to a step"
                        );
                    }
                }
            }
        }

        Self {
            steps: kept,
            index,
            links,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in list order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.index.get(id).map(|&i| &self.steps[i])
    }

    /// Position of a step in the list.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Raw dependency ids of a step, exactly as supplied.
    pub fn dependencies_of(&self, id: &str) -> &[StepId] {
        self.step(id)
            .map(|s| s.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Dependencies of a step that resolve to existing steps.
    pub fn resolved_dependencies_of(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&i| {
                self.links[i]
                    .deps
                    .iter()
                    .map(|&d| self.steps[d].step_id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Steps that depend on `id`, in list order.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.index
            .get(id)
            .map(|&i| {
                self.links[i]
                    .dependents
                    .iter()
                    .map(|&d| self.steps[d].step_id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Index-level adjacency used by the layering pass.
    pub(crate) fn dependent_indices(&self, i: usize) -> &[usize] {
        &self.links[i].dependents
    }

    pub(crate) fn dependency_indices(&self, i: usize) -> &[usize] {
        &self.links[i].deps
    }

    /// Every resolved `(dependency, dependent)` pair, ordered by dependent
    /// in list order, then by dependency order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut out = Vec::new();
        for (i, step) in self.steps.iter().enumerate() {
            for &d in &self.links[i].deps {
                out.push((self.steps[d].step_id.as_str(), step.step_id.as_str()));
            }
        }
        out
    }

    /// Display name for an id, falling back to the raw id for dangling ones.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.step(id).map(|s| s.step_name.as_str()).unwrap_or(id)
    }

    /// Groups of step ids that sit on a dependency cycle (including
    /// self-loops), each group in list order, groups ordered by their first
    /// member.
    pub fn cycles(&self) -> Vec<Vec<StepId>> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.len(), 0);
        let nodes: Vec<NodeIndex> = (0..self.len()).map(|i| graph.add_node(i)).collect();

        for (i, links) in self.links.iter().enumerate() {
            for &d in &links.deps {
                graph.add_edge(nodes[d], nodes[i], ());
            }
        }

        let mut groups: Vec<Vec<usize>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || graph.find_edge(scc[0], scc[0]).is_some()
            })
            .map(|scc| {
                let mut members: Vec<usize> = scc.into_iter().map(|n| graph[n]).collect();
                members.sort_unstable();
                members
            })
            .collect();
        groups.sort();

        groups
            .into_iter()
            .map(|g| g.into_iter().map(|i| self.steps[i].step_id.clone()).collect())
            .collect()
    }
}
