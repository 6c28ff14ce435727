//! Directed relationships between named models.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::environment::{ModelId, RelId};
use crate::error::Error;
use crate::format::TemplateFormat;
use crate::render::{render_template, TemplateStringOptions};

/// Cardinality of a relationship. Ordinals are stable and part of the
/// template contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    OneToOne = 0,
    OneToMany = 1,
    ManyToOne = 2,
    ManyToMany = 3,
}

impl Cardinality {
    /// The stable ordinal for this cardinality.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a cardinality by ordinal.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, Error> {
        match ordinal {
            0 => Ok(Cardinality::OneToOne),
            1 => Ok(Cardinality::OneToMany),
            2 => Ok(Cardinality::ManyToOne),
            3 => Ok(Cardinality::ManyToMany),
            other => Err(Error::UnknownCardinality(other.to_string())),
        }
    }

    /// The cardinality name, e.g. `"ONE_TO_MANY"`.
    pub fn name(self) -> &'static str {
        match self {
            Cardinality::OneToOne => "ONE_TO_ONE",
            Cardinality::OneToMany => "ONE_TO_MANY",
            Cardinality::ManyToOne => "MANY_TO_ONE",
            Cardinality::ManyToMany => "MANY_TO_MANY",
        }
    }

    /// Look up a cardinality by name.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name {
            "ONE_TO_ONE" => Ok(Cardinality::OneToOne),
            "ONE_TO_MANY" => Ok(Cardinality::OneToMany),
            "MANY_TO_ONE" => Ok(Cardinality::ManyToOne),
            "MANY_TO_MANY" => Ok(Cardinality::ManyToMany),
            other => Err(Error::UnknownCardinality(other.to_string())),
        }
    }

    /// The cardinality of the mirror edge (target -> source).
    pub fn reversed(self) -> Self {
        match self {
            Cardinality::OneToMany => Cardinality::ManyToOne,
            Cardinality::ManyToOne => Cardinality::OneToMany,
            other => other,
        }
    }
}

/// Which half of a mirrored pair a relationship is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward = 1,
    Reverse = 2,
}

impl Direction {
    /// The bit this direction occupies in a [`DirectionSet`].
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// The direction string used in diagnostic output.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }

    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// A set of directions used to filter relationship lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSet(u8);

impl DirectionSet {
    /// Only forward relationships.
    pub const FORWARD: DirectionSet = DirectionSet(1);
    /// Only reverse relationships.
    pub const REVERSE: DirectionSet = DirectionSet(2);
    /// Both directions.
    pub const BOTH: DirectionSet = DirectionSet(3);

    /// Check whether the given direction is a member of this set.
    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }
}

impl BitOr for DirectionSet {
    type Output = DirectionSet;

    fn bitor(self, rhs: DirectionSet) -> DirectionSet {
        DirectionSet(self.0 | rhs.0)
    }
}

impl From<Direction> for DirectionSet {
    fn from(direction: Direction) -> DirectionSet {
        DirectionSet(direction.bit())
    }
}

/// A cardinality as it appears in a template: a name string or an ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardinalityValue {
    /// Internal ordinal form.
    Ordinal(u8),
    /// Name form, e.g. `"ONE_TO_MANY"`, or the namespaced export form.
    Name(String),
}

impl CardinalityValue {
    /// Resolve to a [`Cardinality`], rejecting unrecognized values.
    pub fn resolve(&self) -> Result<Cardinality, Error> {
        match self {
            CardinalityValue::Ordinal(ordinal) => Cardinality::from_ordinal(*ordinal),
            CardinalityValue::Name(name) => Cardinality::from_name(name),
        }
    }

    /// Render a cardinality in the requested template format.
    pub fn render(kind: Cardinality, format: TemplateFormat) -> CardinalityValue {
        match format {
            TemplateFormat::Internal => CardinalityValue::Ordinal(kind.ordinal()),
            TemplateFormat::Explicit => CardinalityValue::Name(kind.name().to_string()),
            TemplateFormat::Object => {
                CardinalityValue::Name(format!("Relationship.{}", kind.name()))
            }
        }
    }
}

impl From<Cardinality> for CardinalityValue {
    fn from(kind: Cardinality) -> CardinalityValue {
        CardinalityValue::Name(kind.name().to_string())
    }
}

/// Template for one directed relationship between two named models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTemplate {
    /// Source model name. Omitted in model-scoped templates; the owning
    /// model stamps it before loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Target model name.
    pub target: String,
    /// Alias for the source endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_as: Option<String>,
    /// Alias for the target endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_as: Option<String>,
    /// Cardinality, as a name string or ordinal.
    #[serde(rename = "type")]
    pub kind: CardinalityValue,
    /// Relationship name, e.g. `"ownership"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the relationship propagates up the ownership tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<bool>,
}

impl RelationshipTemplate {
    /// Create a model-scoped template (no source; the owning model stamps it).
    pub fn new(target: impl Into<String>, kind: Cardinality) -> Self {
        RelationshipTemplate {
            source: None,
            target: target.into(),
            source_as: None,
            target_as: None,
            kind: kind.into(),
            name: None,
            chain: None,
        }
    }

    /// Create a standalone template with both endpoints named.
    pub fn between(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: Cardinality,
    ) -> Self {
        RelationshipTemplate {
            source: Some(source.into()),
            ..RelationshipTemplate::new(target, kind)
        }
    }

    /// Set the source alias.
    pub fn with_source_as(mut self, alias: impl Into<String>) -> Self {
        self.source_as = Some(alias.into());
        self
    }

    /// Set the target alias.
    pub fn with_target_as(mut self, alias: impl Into<String>) -> Self {
        self.target_as = Some(alias.into());
        self
    }

    /// Set the relationship name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Mark the relationship as chained.
    pub fn with_chain(mut self) -> Self {
        self.chain = Some(true);
        self
    }
}

/// One directed edge between two models.
///
/// Every loaded edge is stored alongside its auto-derived mirror: endpoints
/// and aliases swapped, cardinality reversed, name and chain flag copied.
/// Exactly one half of the pair has direction [`Direction::Forward`]. The
/// `source`/`target` model references start unset and are populated by the
/// environment's link pass; `mirror` is set when the pair is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    name: Option<String>,
    kind: Cardinality,
    chain: bool,
    source_name: String,
    target_name: String,
    source_alias: Option<String>,
    target_alias: Option<String>,
    direction: Direction,
    source: Option<ModelId>,
    target: Option<ModelId>,
    mirror: Option<RelId>,
}

impl Relationship {
    /// Build a forward relationship from a template.
    ///
    /// The template must carry a source name (model-scoped templates get
    /// theirs stamped by the owning model) and a recognized cardinality.
    pub fn from_template(template: &RelationshipTemplate) -> Result<Self, Error> {
        let source_name = template
            .source
            .clone()
            .ok_or_else(|| Error::Template("relationship template has no source model".into()))?;
        let kind = template.kind.resolve()?;

        Ok(Relationship {
            name: template.name.clone(),
            kind,
            chain: template.chain.unwrap_or(false),
            source_name,
            target_name: template.target.clone(),
            source_alias: template.source_as.clone(),
            target_alias: template.target_as.clone(),
            direction: Direction::Forward,
            source: None,
            target: None,
            mirror: None,
        })
    }

    /// Derive the mirror edge: endpoints, aliases, and model references
    /// swapped, cardinality reversed, direction flipped. Involutive.
    pub fn mirrored(&self) -> Relationship {
        Relationship {
            name: self.name.clone(),
            kind: self.kind.reversed(),
            chain: self.chain,
            source_name: self.target_name.clone(),
            target_name: self.source_name.clone(),
            source_alias: self.target_alias.clone(),
            target_alias: self.source_alias.clone(),
            direction: self.direction.flipped(),
            source: self.target,
            target: self.source,
            mirror: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> Cardinality {
        self.kind
    }

    pub fn is_chained(&self) -> bool {
        self.chain
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Source alias; falls back to the source name when no alias is set.
    pub fn source_alias(&self) -> &str {
        self.source_alias.as_deref().unwrap_or(&self.source_name)
    }

    /// Target alias; falls back to the target name when no alias is set.
    pub fn target_alias(&self) -> &str {
        self.target_alias.as_deref().unwrap_or(&self.target_name)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_forward(&self) -> bool {
        self.direction == Direction::Forward
    }

    pub fn is_reverse(&self) -> bool {
        self.direction == Direction::Reverse
    }

    /// Linked source model, if the link pass has resolved it.
    pub fn source(&self) -> Option<ModelId> {
        self.source
    }

    /// Linked target model, if the link pass has resolved it.
    pub fn target(&self) -> Option<ModelId> {
        self.target
    }

    /// The other half of the mirrored pair, once loaded into an environment.
    pub fn mirror(&self) -> Option<RelId> {
        self.mirror
    }

    pub(crate) fn set_source(&mut self, model: ModelId) {
        self.source = Some(model);
    }

    pub(crate) fn set_target(&mut self, model: ModelId) {
        self.target = Some(model);
    }

    pub(crate) fn set_mirror(&mut self, relationship: RelId) {
        self.mirror = Some(relationship);
    }

    /// Export as a template carrying only the fields that were actually set.
    pub fn to_minimal_template(&self, format: TemplateFormat) -> RelationshipTemplate {
        RelationshipTemplate {
            source: Some(self.source_name.clone()),
            target: self.target_name.clone(),
            source_as: self.source_alias.clone(),
            target_as: self.target_alias.clone(),
            kind: CardinalityValue::render(self.kind, format),
            name: self.name.clone(),
            chain: if self.chain { Some(true) } else { None },
        }
    }

    /// Export as a template with all redundant fields spelled out: aliases
    /// fall back to the endpoint names and the chain flag is always present.
    pub fn to_complete_template(&self, format: TemplateFormat) -> RelationshipTemplate {
        RelationshipTemplate {
            source: Some(self.source_name.clone()),
            target: self.target_name.clone(),
            source_as: Some(self.source_alias().to_string()),
            target_as: Some(self.target_alias().to_string()),
            kind: CardinalityValue::render(self.kind, format),
            name: self.name.clone(),
            chain: Some(self.chain),
        }
    }

    /// Render as a template string, e.g. for file export.
    pub fn to_template_string(&self, options: &TemplateStringOptions) -> Result<String, Error> {
        let template = if options.complete {
            self.to_complete_template(options.format)
        } else {
            self.to_minimal_template(options.format)
        };
        render_template(&template, options)
    }
}
