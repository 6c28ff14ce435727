//! The environment: a linked graph of models and relationships.

mod traversal;

pub use traversal::{ModelTree, PathStep, TraversalOrder};

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::Error;
use crate::model::{Model, ModelTemplate};
use crate::relationship::{DirectionSet, Relationship, RelationshipTemplate};

/// Stable identifier for models loaded into an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u32);

impl ModelId {
    /// Zero-based index of the model in load order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable identifier for relationships loaded into an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelId(u32);

impl RelId {
    /// Zero-based index of the relationship in load order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One row of the diagnostic relationship table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRow {
    pub source: String,
    pub source_alias: String,
    pub target: String,
    pub target_alias: String,
    /// Cardinality ordinal.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Cardinality name.
    #[serde(rename = "typeString")]
    pub kind_name: &'static str,
    /// `"forward"` or `"reverse"`.
    pub direction: &'static str,
    pub chain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Descriptor for a model a relationship needs but cannot reach: either the
/// name is not loaded at all (missing) or the reference has not been
/// resolved by a link pass yet (unlinked).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyIssue {
    /// The unreachable model name.
    pub name: String,
    /// Set when the model is needed as a relationship source; carries the
    /// name of the model on the other end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_for: Option<String>,
    /// Set when the model is needed as a relationship target; carries the
    /// name of the model on the other end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_for: Option<String>,
    pub source_alias: String,
    pub target_alias: String,
    /// Cardinality ordinal.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Cardinality name.
    #[serde(rename = "typeString")]
    pub kind_name: &'static str,
    /// `"forward"` or `"reverse"`.
    pub direction: &'static str,
    pub chain: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,
}

/// The graph container: owns all loaded models and relationships, resolves
/// relationship endpoints to model references, and answers traversal and
/// consistency queries.
///
/// Both stores grow monotonically; nothing is ever removed. Every loaded
/// relationship is stored together with its auto-derived mirror, so the
/// relationship list always has an even length. Models and the
/// relationships that reference them may be loaded in any order: an
/// endpoint naming a not-yet-loaded model stays unlinked until a link pass
/// runs after that model arrives.
#[derive(Debug, Default)]
pub struct Environment {
    models: Vec<Model>,
    names: HashMap<String, ModelId>,
    relationships: Vec<Relationship>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Environment::default()
    }

    /// Create an environment seeded from model templates.
    pub fn from_templates(templates: &[ModelTemplate]) -> Result<Self, Error> {
        let mut env = Environment::new();
        env.load_model_templates(templates)?;
        Ok(env)
    }

    /// Load a model and run a link pass.
    ///
    /// Fails on a duplicate model name. The model's ownership template and
    /// declared relationship templates are loaded as relationships in the
    /// same call; a failure partway through the cascade leaves the earlier
    /// insertions in place.
    pub fn load_model(&mut self, model: Model) -> Result<ModelId, Error> {
        let id = self.load_model_deferred(model)?;
        self.link();
        Ok(id)
    }

    /// Load a model without running a link pass afterwards.
    pub fn load_model_deferred(&mut self, model: Model) -> Result<ModelId, Error> {
        let name = model.name().to_string();
        if self.names.contains_key(&name) {
            return Err(Error::DuplicateModel { name });
        }

        debug!(model = %name, "loading model");
        let id = ModelId(self.models.len() as u32);
        self.names.insert(name, id);
        self.models.push(model);

        let ownership = self.models[id.index()].ownership_template();
        if let Some(template) = ownership {
            self.load_relationship_template(&template)?;
        }
        let declared: Vec<RelationshipTemplate> =
            self.models[id.index()].relationships().to_vec();
        for template in &declared {
            self.load_relationship_template(template)?;
        }

        Ok(id)
    }

    /// Load several models, then run one link pass.
    pub fn load_models(&mut self, models: Vec<Model>) -> Result<Vec<ModelId>, Error> {
        let mut ids = Vec::with_capacity(models.len());
        for model in models {
            ids.push(self.load_model_deferred(model)?);
        }
        self.link();
        Ok(ids)
    }

    /// Build a model from a template, load it, and run a link pass.
    pub fn load_model_template(&mut self, template: &ModelTemplate) -> Result<ModelId, Error> {
        self.load_model(Model::from_template(template)?)
    }

    /// Build and load several models from templates, then run one link pass.
    pub fn load_model_templates(
        &mut self,
        templates: &[ModelTemplate],
    ) -> Result<Vec<ModelId>, Error> {
        let mut ids = Vec::with_capacity(templates.len());
        for template in templates {
            ids.push(self.load_model_deferred(Model::from_template(template)?)?);
        }
        self.link();
        Ok(ids)
    }

    /// Load a relationship together with its auto-derived mirror.
    ///
    /// Fails if a relationship with the same (source alias, target alias)
    /// pair is already loaded; aliasing lets two relationships between the
    /// same two models coexist. The relationship list grows by exactly two.
    /// No link pass is run; callers run [`Environment::link`] after a bulk
    /// load.
    pub fn load_relationship(
        &mut self,
        relationship: Relationship,
    ) -> Result<(RelId, RelId), Error> {
        let source_alias = relationship.source_alias().to_string();
        let target_alias = relationship.target_alias().to_string();
        if !self
            .relationships_by_source_and_target_alias(
                &source_alias,
                &target_alias,
                DirectionSet::BOTH,
            )
            .is_empty()
        {
            return Err(Error::DuplicateRelationship {
                source_name: relationship.source_name().to_string(),
                source_alias,
                target: relationship.target_name().to_string(),
                target_alias,
            });
        }

        trace!(
            source = relationship.source_name(),
            target = relationship.target_name(),
            "loading relationship pair"
        );
        let first = RelId(self.relationships.len() as u32);
        let second = RelId(self.relationships.len() as u32 + 1);
        let mut loaded = relationship;
        let mut mirror = loaded.mirrored();
        loaded.set_mirror(second);
        mirror.set_mirror(first);
        self.relationships.push(loaded);
        self.relationships.push(mirror);

        Ok((first, second))
    }

    /// Build a relationship from a template and load it with its mirror.
    pub fn load_relationship_template(
        &mut self,
        template: &RelationshipTemplate,
    ) -> Result<(RelId, RelId), Error> {
        self.load_relationship(Relationship::from_template(template)?)
    }

    /// Build and load several relationships from templates.
    pub fn load_relationship_templates(
        &mut self,
        templates: &[RelationshipTemplate],
    ) -> Result<Vec<(RelId, RelId)>, Error> {
        templates
            .iter()
            .map(|template| self.load_relationship_template(template))
            .collect()
    }

    /// Resolve relationship endpoints against the loaded models.
    ///
    /// Idempotent and monotonic: already-linked endpoints are untouched and
    /// endpoints only ever go from unlinked to linked. Returns whether any
    /// assignment happened, so repeated calls after incremental loads
    /// converge without redundant work.
    pub fn link(&mut self) -> bool {
        let mut changed = false;
        for relationship in self.relationships.iter_mut() {
            if relationship.source().is_none() {
                if let Some(&id) = self.names.get(relationship.source_name()) {
                    relationship.set_source(id);
                    changed = true;
                }
            }
            if relationship.target().is_none() {
                if let Some(&id) = self.names.get(relationship.target_name()) {
                    relationship.set_target(id);
                    changed = true;
                }
            }
        }
        if changed {
            debug!("linked relationship endpoints to models");
        }
        changed
    }

    /// All loaded models, in load order.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// All loaded model names, in load order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|model| model.name()).collect()
    }

    /// Look up a model by id.
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.index())
    }

    /// Look up a model by name.
    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.model_id(name).map(|id| &self.models[id.index()])
    }

    /// Look up a model id by name.
    pub fn model_id(&self, name: &str) -> Option<ModelId> {
        self.names.get(name).copied()
    }

    /// All loaded relationships, mirrors included, in load order.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Look up a relationship by id.
    pub fn relationship(&self, id: RelId) -> Option<&Relationship> {
        self.relationships.get(id.index())
    }

    fn filtered(
        &self,
        direction: DirectionSet,
        predicate: impl Fn(&Relationship) -> bool,
    ) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|rel| direction.contains(rel.direction()) && predicate(rel))
            .collect()
    }

    /// Relationships whose source name matches, aliases notwithstanding.
    pub fn relationships_by_source(
        &self,
        name: &str,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, |rel| rel.source_name() == name)
    }

    /// Relationships whose target name matches, aliases notwithstanding.
    pub fn relationships_by_target(
        &self,
        name: &str,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, |rel| rel.target_name() == name)
    }

    /// Relationships whose source and target names both match.
    pub fn relationships_by_source_and_target(
        &self,
        source: &str,
        target: &str,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, |rel| {
            rel.source_name() == source && rel.target_name() == target
        })
    }

    /// Relationships whose source alias (or name fallback) matches.
    pub fn relationships_by_source_alias(
        &self,
        alias: &str,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, |rel| rel.source_alias() == alias)
    }

    /// Relationships whose target alias (or name fallback) matches.
    pub fn relationships_by_target_alias(
        &self,
        alias: &str,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, |rel| rel.target_alias() == alias)
    }

    /// Relationships whose alias pair matches exactly.
    pub fn relationships_by_source_and_target_alias(
        &self,
        source_alias: &str,
        target_alias: &str,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, |rel| {
            rel.source_alias() == source_alias && rel.target_alias() == target_alias
        })
    }

    /// Relationships whose linked source reference matches.
    pub fn relationships_by_source_ref(
        &self,
        source: ModelId,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, move |rel| rel.source() == Some(source))
    }

    /// Relationships whose linked target reference matches.
    pub fn relationships_by_target_ref(
        &self,
        target: ModelId,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, move |rel| rel.target() == Some(target))
    }

    /// Relationships whose linked references match on both ends.
    pub fn relationships_by_source_and_target_ref(
        &self,
        source: ModelId,
        target: ModelId,
        direction: DirectionSet,
    ) -> Vec<&Relationship> {
        self.filtered(direction, move |rel| {
            rel.source() == Some(source) && rel.target() == Some(target)
        })
    }

    /// Diagnostic table of every loaded relationship, mirrors included.
    pub fn relationship_table(&self) -> Vec<RelationshipRow> {
        self.relationships
            .iter()
            .map(|rel| RelationshipRow {
                source: rel.source_name().to_string(),
                source_alias: rel.source_alias().to_string(),
                target: rel.target_name().to_string(),
                target_alias: rel.target_alias().to_string(),
                kind: rel.kind().ordinal(),
                kind_name: rel.kind().name(),
                direction: rel.direction().as_str(),
                chain: rel.is_chained(),
                name: rel.name().map(String::from),
            })
            .collect()
    }

    fn issue(rel: &Relationship, name: &str, as_source: bool) -> ConsistencyIssue {
        ConsistencyIssue {
            name: name.to_string(),
            source_for: as_source.then(|| rel.target_name().to_string()),
            target_for: (!as_source).then(|| rel.source_name().to_string()),
            source_alias: rel.source_alias().to_string(),
            target_alias: rel.target_alias().to_string(),
            kind: rel.kind().ordinal(),
            kind_name: rel.kind().name(),
            direction: rel.direction().as_str(),
            chain: rel.is_chained(),
            relationship_name: rel.name().map(String::from),
        }
    }

    /// Models that relationships name but that are not loaded at all. A
    /// relationship missing both ends contributes two descriptors.
    pub fn missing_models(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();
        for rel in &self.relationships {
            if !self.names.contains_key(rel.source_name()) {
                issues.push(Environment::issue(rel, rel.source_name(), true));
            }
            if !self.names.contains_key(rel.target_name()) {
                issues.push(Environment::issue(rel, rel.target_name(), false));
            }
        }
        issues
    }

    /// Relationship endpoints whose model reference has not been resolved.
    /// Distinct from [`Environment::missing_models`]: the model may already
    /// be loaded while the reference is still stale because no link pass ran.
    pub fn unlinked_models(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();
        for rel in &self.relationships {
            if rel.source().is_none() {
                issues.push(Environment::issue(rel, rel.source_name(), true));
            }
            if rel.target().is_none() {
                issues.push(Environment::issue(rel, rel.target_name(), false));
            }
        }
        issues
    }

    /// A complete environment has no missing models and no unlinked
    /// endpoints.
    pub fn is_complete(&self) -> bool {
        self.missing_models().is_empty() && self.unlinked_models().is_empty()
    }

    /// Fail with both consistency counts unless the environment is complete.
    pub fn assert_complete(&self) -> Result<(), Error> {
        let missing = self.missing_models().len();
        let unlinked = self.unlinked_models().len();
        if missing > 0 || unlinked > 0 {
            return Err(Error::Incomplete { missing, unlinked });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::relationship::{Cardinality, Direction};
    use modelgraph_types::DataType;

    fn model(name: &str) -> Model {
        Model::new(name, Attribute::from_type(DataType::uuid()))
    }

    fn edge(source: &str, target: &str, kind: Cardinality) -> Relationship {
        Relationship::from_template(&RelationshipTemplate::between(source, target, kind)).unwrap()
    }

    #[test]
    fn test_duplicate_model_name_is_rejected() {
        let mut env = Environment::new();
        env.load_model(model("user")).unwrap();
        assert!(matches!(
            env.load_model(model("user")),
            Err(Error::DuplicateModel { name }) if name == "user"
        ));
        assert_eq!(env.models().len(), 1);
    }

    #[test]
    fn test_loading_a_relationship_stores_the_mirror_pair() {
        let mut env = Environment::new();
        let (first, second) = env
            .load_relationship(edge("user", "item", Cardinality::OneToMany))
            .unwrap();

        assert_eq!(env.relationships().len(), 2);

        let forward = env.relationship(first).unwrap();
        let reverse = env.relationship(second).unwrap();
        assert_eq!(forward.mirror(), Some(second));
        assert_eq!(reverse.mirror(), Some(first));
        assert_eq!(forward.direction(), Direction::Forward);
        assert_eq!(reverse.direction(), Direction::Reverse);
        assert_eq!(reverse.source_name(), "item");
        assert_eq!(reverse.target_name(), "user");
        assert_eq!(reverse.kind(), Cardinality::ManyToOne);
    }

    #[test]
    fn test_duplicate_alias_pair_is_rejected() {
        let mut env = Environment::new();
        env.load_relationship(edge("user", "item", Cardinality::OneToMany))
            .unwrap();

        assert!(matches!(
            env.load_relationship(edge("user", "item", Cardinality::ManyToMany)),
            Err(Error::DuplicateRelationship { .. })
        ));

        // The stored mirror occupies the swapped pair, so loading the
        // opposite direction explicitly is a duplicate too.
        assert!(matches!(
            env.load_relationship(edge("item", "user", Cardinality::ManyToOne)),
            Err(Error::DuplicateRelationship { .. })
        ));

        // Different aliases make a second edge between the same models fine.
        let aliased = Relationship::from_template(
            &RelationshipTemplate::between("user", "item", Cardinality::OneToMany)
                .with_target_as("favorites"),
        )
        .unwrap();
        env.load_relationship(aliased).unwrap();
        assert_eq!(env.relationships().len(), 4);
    }

    #[test]
    fn test_linking_is_order_independent() {
        let mut env = Environment::new();
        env.load_relationship(edge("user", "item", Cardinality::OneToMany))
            .unwrap();
        assert_eq!(env.unlinked_models().len(), 4);
        assert_eq!(env.missing_models().len(), 4);

        env.load_model(model("user")).unwrap();
        env.load_model(model("item")).unwrap();

        assert!(env.is_complete());
        for rel in env.relationships() {
            assert!(rel.source().is_some());
            assert!(rel.target().is_some());
        }
    }

    #[test]
    fn test_linking_is_idempotent() {
        let mut env = Environment::new();
        env.load_model(model("user")).unwrap();
        env.load_relationship(edge("user", "user", Cardinality::ManyToMany))
            .unwrap();

        assert!(env.link());
        assert!(!env.link());
    }

    #[test]
    fn test_unlinked_is_distinct_from_missing() {
        let mut env = Environment::new();
        env.load_model(model("user")).unwrap();
        env.load_model(model("item")).unwrap();
        // load_relationship does not run a link pass.
        env.load_relationship(edge("user", "item", Cardinality::OneToMany))
            .unwrap();

        assert!(env.missing_models().is_empty());
        let unlinked = env.unlinked_models();
        assert_eq!(unlinked.len(), 4);
        assert!(!env.is_complete());

        env.link();
        assert!(env.unlinked_models().is_empty());
        assert!(env.is_complete());
    }

    #[test]
    fn test_missing_model_descriptors() {
        let mut env = Environment::new();
        env.load_model(model("user")).unwrap();
        let rel = Relationship::from_template(
            &RelationshipTemplate::between("user", "ghost", Cardinality::OneToMany)
                .with_name("haunting"),
        )
        .unwrap();
        env.load_relationship(rel).unwrap();
        env.link();

        let missing = env.missing_models();
        // The forward edge misses its target, the mirror misses its source.
        assert_eq!(missing.len(), 2);

        let forward = &missing[0];
        assert_eq!(forward.name, "ghost");
        assert_eq!(forward.target_for.as_deref(), Some("user"));
        assert_eq!(forward.source_for, None);
        assert_eq!(forward.kind_name, "ONE_TO_MANY");
        assert_eq!(forward.direction, "forward");
        assert_eq!(forward.relationship_name.as_deref(), Some("haunting"));

        let reverse = &missing[1];
        assert_eq!(reverse.name, "ghost");
        assert_eq!(reverse.source_for.as_deref(), Some("user"));
        assert_eq!(reverse.direction, "reverse");
    }

    #[test]
    fn test_assert_complete_reports_both_counts() {
        let mut env = Environment::new();
        env.load_relationship(edge("user", "item", Cardinality::OneToMany))
            .unwrap();

        match env.assert_complete() {
            Err(Error::Incomplete { missing, unlinked }) => {
                assert_eq!(missing, 4);
                assert_eq!(unlinked, 4);
            }
            other => panic!("expected incomplete environment, got {other:?}"),
        }

        let mut env = Environment::new();
        env.load_model(model("user")).unwrap();
        env.assert_complete().unwrap();
    }

    #[test]
    fn test_model_cascade_loads_declared_relationships() {
        let mut env = Environment::new();
        env.load_model(model("user")).unwrap();

        let item = model("item")
            .with_ownership(RelationshipTemplate::new("user", Cardinality::OneToMany))
            .with_relationship(RelationshipTemplate::new("user", Cardinality::ManyToMany));
        env.load_model(item).unwrap();

        // Ownership pair plus declared pair.
        assert_eq!(env.relationships().len(), 4);
        assert!(env.is_complete());

        let ownership = env.relationships_by_target_alias("owner", DirectionSet::FORWARD);
        assert_eq!(ownership.len(), 1);
        assert!(ownership[0].is_chained());
        assert_eq!(ownership[0].name(), Some("ownership"));
    }

    #[test]
    fn test_bulk_load_has_no_rollback() {
        let mut env = Environment::new();
        let templates = [
            ModelTemplate {
                name: Some("user".into()),
                id: DataType::uuid().into(),
                ownership: None,
                attributes: None,
                relationships: None,
            },
            ModelTemplate {
                name: Some("user".into()),
                id: DataType::uuid().into(),
                ownership: None,
                attributes: None,
                relationships: None,
            },
        ];

        assert!(matches!(
            env.load_model_templates(&templates),
            Err(Error::DuplicateModel { .. })
        ));
        // The first load committed before the second failed.
        assert_eq!(env.model_names(), vec!["user"]);
    }

    #[test]
    fn test_lookups_by_name_alias_and_reference() {
        let mut env = Environment::new();
        let user = env.load_model(model("user")).unwrap();
        let item = env.load_model(model("item")).unwrap();
        let aliased = Relationship::from_template(
            &RelationshipTemplate::between("user", "item", Cardinality::OneToMany)
                .with_target_as("belongings"),
        )
        .unwrap();
        env.load_relationship(aliased).unwrap();
        env.link();

        assert_eq!(
            env.relationships_by_source("user", DirectionSet::BOTH).len(),
            1
        );
        assert_eq!(
            env.relationships_by_source("item", DirectionSet::BOTH).len(),
            1
        );
        assert_eq!(
            env.relationships_by_source("user", DirectionSet::REVERSE).len(),
            0
        );
        assert_eq!(
            env.relationships_by_target("item", DirectionSet::FORWARD).len(),
            1
        );
        assert_eq!(
            env.relationships_by_source_and_target("user", "item", DirectionSet::BOTH)
                .len(),
            1
        );
        assert_eq!(
            env.relationships_by_target_alias("belongings", DirectionSet::BOTH)
                .len(),
            1
        );
        assert_eq!(
            env.relationships_by_source_alias("belongings", DirectionSet::REVERSE)
                .len(),
            1
        );
        assert_eq!(
            env.relationships_by_source_ref(user, DirectionSet::BOTH).len(),
            1
        );
        assert_eq!(
            env.relationships_by_source_and_target_ref(item, user, DirectionSet::BOTH)
                .len(),
            1
        );
    }

    #[test]
    fn test_relationship_table_rows() {
        let mut env = Environment::new();
        env.load_relationship(edge("user", "item", Cardinality::OneToMany))
            .unwrap();

        let table = env.relationship_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].source, "user");
        assert_eq!(table[0].source_alias, "user");
        assert_eq!(table[0].kind, 1);
        assert_eq!(table[0].kind_name, "ONE_TO_MANY");
        assert_eq!(table[0].direction, "forward");
        assert!(!table[0].chain);
        assert_eq!(table[1].direction, "reverse");
        assert_eq!(table[1].kind_name, "MANY_TO_ONE");
    }

    #[test]
    fn test_from_templates_seeds_and_links() {
        let env = Environment::from_templates(&[
            ModelTemplate {
                name: Some("user".into()),
                id: DataType::uuid().into(),
                ownership: None,
                attributes: None,
                relationships: None,
            },
            ModelTemplate {
                name: Some("item".into()),
                id: DataType::uuid().into(),
                ownership: Some(RelationshipTemplate::new("user", Cardinality::OneToMany)),
                attributes: None,
                relationships: None,
            },
        ])
        .unwrap();

        assert_eq!(env.model_names(), vec!["user", "item"]);
        assert!(env.is_complete());
    }
}
