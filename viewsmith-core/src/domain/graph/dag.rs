// viewsmith-core/src/domain/graph/dag.rs

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

/// One row of the dependency metadata: `dependent` needs `dependency` to exist first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub dependent: String,
    pub dependency: String,
}

impl DependencyEdge {
    pub fn new(dependent: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            dependent: dependent.into(),
            dependency: dependency.into(),
        }
    }
}

/// Adjacency list keyed by dependency, plus in-degree counts.
///
/// `views` keeps every identifier in first-seen order (dependent before
/// dependency for each edge). That order drives the solver's seed queue, so
/// the same input always yields the same ordering.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    dependents: HashMap<String, Vec<String>>,
    in_degree: HashMap<String, usize>,
    views: Vec<String>,
}

impl DependencyGraph {
    pub fn build<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a DependencyEdge>,
    {
        let mut graph = Self::default();
        let mut seen: HashSet<String> = HashSet::new();

        for edge in edges {
            graph
                .dependents
                .entry(edge.dependency.clone())
                .or_default()
                .push(edge.dependent.clone());
            *graph.in_degree.entry(edge.dependent.clone()).or_insert(0) += 1;

            for view in [&edge.dependent, &edge.dependency] {
                if seen.insert(view.clone()) {
                    graph.in_degree.entry(view.clone()).or_insert(0);
                    graph.views.push(view.clone());
                }
            }
        }

        graph
    }

    pub fn views(&self) -> &[String] {
        &self.views
    }

    pub fn in_degree(&self, view: &str) -> Option<usize> {
        self.in_degree.get(view).copied()
    }

    /// Views that depend on `view`, in input order.
    pub fn dependents_of(&self, view: &str) -> &[String] {
        self.dependents.get(view).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Output of the solver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewOrdering {
    /// Every dependency precedes its dependents.
    pub ordered: Vec<String>,
    /// Views that never reached in-degree zero: cycle members and anything downstream of them.
    pub unresolved: Vec<String>,
}

impl ViewOrdering {
    pub fn drop_order(&self) -> impl Iterator<Item = &String> {
        self.ordered.iter().rev()
    }

    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }
}

pub struct GraphSolver;

impl GraphSolver {
    /// Kahn's algorithm over the whole graph.
    ///
    /// A cycle is not an error here: its members are left out of `ordered`
    /// and reported in `unresolved`.
    pub fn order(graph: &DependencyGraph) -> ViewOrdering {
        let mut in_degree = graph.in_degree.clone();
        let mut queue: VecDeque<&String> = graph
            .views
            .iter()
            .filter(|v| in_degree.get(v.as_str()).copied().unwrap_or(0) == 0)
            .collect();

        let mut ordered = Vec::with_capacity(graph.len());

        while let Some(current) = queue.pop_front() {
            ordered.push(current.clone());

            for neighbor in graph.dependents_of(current) {
                if let Some(degree) = in_degree.get_mut(neighbor) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        let resolved: HashSet<&String> = ordered.iter().collect();
        let unresolved = graph
            .views
            .iter()
            .filter(|v| !resolved.contains(v))
            .cloned()
            .collect();

        ViewOrdering {
            ordered,
            unresolved,
        }
    }
}
