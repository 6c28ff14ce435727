//! Graph traversal over linked relationships.
//!
//! All traversals walk outgoing edges only: relationships whose linked
//! source reference is the current model. Since every loaded edge is stored
//! with its mirror, reachability behaves like an undirected closure unless
//! a caller filters by direction.

use std::collections::{HashSet, VecDeque};

use super::{Environment, ModelId, RelId};
use crate::error::Error;
use crate::model::Model;
use crate::relationship::Relationship;

/// Order in which flattened tree paths are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Parent paths first, then each child subtree in full.
    #[default]
    DepthFirst,
    /// All paths of length n before any path of length n + 1.
    BreadthFirst,
}

/// One node of an outgoing-relationship tree: the model reached, the
/// relationship used to reach it (`None` at the root), and the subtrees
/// reached through the model's own outgoing relationships.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelTree {
    pub model: ModelId,
    pub relationship: Option<RelId>,
    pub children: Vec<ModelTree>,
}

impl ModelTree {
    /// Total number of nodes in this tree, the root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ModelTree::node_count).sum::<usize>()
    }
}

/// One step of a root-to-node path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    pub model: ModelId,
    pub relationship: Option<RelId>,
}

impl Environment {
    fn require_model(&self, name: &str) -> Result<ModelId, Error> {
        self.model_id(name).ok_or_else(|| Error::UnknownModel {
            name: name.to_string(),
        })
    }

    /// Outgoing edges: relationships whose linked source is the given model.
    fn outgoing(&self, model: ModelId) -> impl Iterator<Item = (RelId, &Relationship)> {
        self.relationships
            .iter()
            .enumerate()
            .filter(move |(_, rel)| rel.source() == Some(model))
            .map(|(index, rel)| (RelId(index as u32), rel))
    }

    /// Direct targets of all relationships sourced at the named model,
    /// deduplicated, in edge load order.
    pub fn neighbor_models(&self, name: &str) -> Result<Vec<&Model>, Error> {
        let start = self.require_model(name)?;
        let mut seen = HashSet::new();
        let mut neighbors = Vec::new();
        for (_, rel) in self.outgoing(start) {
            if let Some(target) = rel.target() {
                if seen.insert(target) {
                    neighbors.push(&self.models[target.index()]);
                }
            }
        }
        Ok(neighbors)
    }

    /// Breadth-first reachable set from a start model, the start included.
    fn connected_ids(&self, start: ModelId) -> Vec<ModelId> {
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut reached = vec![start];
        while let Some(current) = queue.pop_front() {
            for (_, rel) in self.outgoing(current) {
                if let Some(target) = rel.target() {
                    if visited.insert(target) {
                        reached.push(target);
                        queue.push_back(target);
                    }
                }
            }
        }
        reached
    }

    /// Every model reachable from the named one by repeatedly following
    /// outgoing relationships, the start included.
    pub fn connected_models(&self, name: &str) -> Result<Vec<&Model>, Error> {
        let start = self.require_model(name)?;
        Ok(self
            .connected_ids(start)
            .into_iter()
            .map(|id| &self.models[id.index()])
            .collect())
    }

    /// Partition the whole model set into connectivity classes.
    pub fn connected_domains(&self) -> Vec<Vec<ModelId>> {
        let mut classified: HashSet<ModelId> = HashSet::new();
        let mut domains = Vec::new();
        for index in 0..self.models.len() {
            let id = ModelId(index as u32);
            if classified.contains(&id) {
                continue;
            }
            let domain = self.connected_ids(id);
            classified.extend(domain.iter().copied());
            domains.push(domain);
        }
        domains
    }

    /// [`Environment::connected_domains`], resolved to model names.
    pub fn connected_domain_names(&self) -> Vec<Vec<String>> {
        self.connected_domains()
            .into_iter()
            .map(|domain| {
                domain
                    .into_iter()
                    .map(|id| self.models[id.index()].name().to_string())
                    .collect()
            })
            .collect()
    }

    /// Build the tree of relationship paths rooted at the named model.
    ///
    /// `max_depth` bounds the number of edges on any branch; 0 means
    /// unlimited. A branch is pruned when the edge about to be followed is
    /// identical to, or the mirror of, an edge already used by an ancestor
    /// on the current path. That stops immediate backtracking and bounds
    /// true edge cycles, but a model reached through a different edge set
    /// still gets its own node: the tree enumerates distinct edge paths,
    /// not distinct reachable models.
    pub fn outgoing_tree(&self, name: &str, max_depth: usize) -> Result<ModelTree, Error> {
        let start = self.require_model(name)?;
        let remaining = (max_depth > 0).then_some(max_depth);
        let mut ancestors = Vec::new();
        Ok(self.build_tree(start, None, &mut ancestors, remaining))
    }

    fn build_tree(
        &self,
        model: ModelId,
        via: Option<RelId>,
        ancestors: &mut Vec<RelId>,
        remaining: Option<usize>,
    ) -> ModelTree {
        let mut children = Vec::new();
        if remaining != Some(0) {
            for (rel_id, rel) in self.outgoing(model) {
                let blocked = ancestors.iter().any(|&used| {
                    used == rel_id || self.relationships[used.index()].mirror() == Some(rel_id)
                });
                if blocked {
                    continue;
                }
                let Some(target) = rel.target() else {
                    continue;
                };
                ancestors.push(rel_id);
                children.push(self.build_tree(
                    target,
                    Some(rel_id),
                    ancestors,
                    remaining.map(|depth| depth - 1),
                ));
                ancestors.pop();
            }
        }
        ModelTree {
            model,
            relationship: via,
            children,
        }
    }

    /// Flatten the outgoing tree into root-to-node paths, one per tree node,
    /// the single-step root path included.
    pub fn outgoing_paths(
        &self,
        name: &str,
        max_depth: usize,
        order: TraversalOrder,
    ) -> Result<Vec<Vec<PathStep>>, Error> {
        let tree = self.outgoing_tree(name, max_depth)?;
        let mut paths = Vec::new();
        match order {
            TraversalOrder::DepthFirst => {
                let mut prefix = Vec::new();
                Self::flatten_depth_first(&tree, &mut prefix, &mut paths);
            }
            TraversalOrder::BreadthFirst => {
                let mut queue = VecDeque::from([(&tree, Vec::new())]);
                while let Some((node, prefix)) = queue.pop_front() {
                    let mut path = prefix;
                    path.push(PathStep {
                        model: node.model,
                        relationship: node.relationship,
                    });
                    for child in &node.children {
                        queue.push_back((child, path.clone()));
                    }
                    paths.push(path);
                }
            }
        }
        Ok(paths)
    }

    fn flatten_depth_first(
        node: &ModelTree,
        prefix: &mut Vec<PathStep>,
        paths: &mut Vec<Vec<PathStep>>,
    ) {
        prefix.push(PathStep {
            model: node.model,
            relationship: node.relationship,
        });
        paths.push(prefix.clone());
        for child in &node.children {
            Self::flatten_depth_first(child, prefix, paths);
        }
        prefix.pop();
    }
}
