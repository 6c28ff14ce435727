//! Entity model definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, AttributeTemplate};
use crate::error::Error;
use crate::format::TemplateFormat;
use crate::relationship::{Relationship, RelationshipTemplate};
use crate::render::{render_template, TemplateStringOptions};

/// Template for one model: identity attribute, optional ownership, named
/// attributes, and relationship templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelTemplate {
    /// Model name; required to build a [`Model`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Template for the identity attribute.
    pub id: AttributeTemplate,
    /// Ownership relationship template, if the entity is owned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership: Option<RelationshipTemplate>,
    /// Attribute templates keyed by attribute name. `None` and an empty map
    /// both mean "no attributes"; the distinction only matters for export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, AttributeTemplate>>,
    /// Relationship templates declared by this model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Vec<RelationshipTemplate>>,
}

/// Options controlling which redundant fields model exports carry.
#[derive(Debug, Clone)]
pub struct ModelExportOptions {
    /// Include the model name.
    pub name: bool,
    /// Include attribute names (normally implied by the map keys).
    pub attribute_names: bool,
    /// Include relationship sources (normally implied by the enclosing model).
    pub relationship_sources: bool,
    /// Include the default `"owner"` alias on the ownership template.
    pub ownership_alias: bool,
    /// Include the default `"ownership"` name on the ownership template.
    pub ownership_name: bool,
    /// Include the default `chain: true` flag on the ownership template.
    pub ownership_chain: bool,
    /// Include empty attribute/relationship collections.
    pub empty_objects: bool,
}

impl Default for ModelExportOptions {
    fn default() -> Self {
        ModelExportOptions {
            name: true,
            attribute_names: false,
            relationship_sources: false,
            ownership_alias: false,
            ownership_name: false,
            ownership_chain: false,
            empty_objects: false,
        }
    }
}

/// An entity definition: a name, an identity attribute, an optional
/// ownership template, named attributes, and relationship templates.
///
/// Relationship templates stored on a model are always stamped with this
/// model as their source; the actual [`Relationship`] objects are created
/// when the model is loaded into an environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    id: Attribute,
    ownership: Option<RelationshipTemplate>,
    attributes: BTreeMap<String, Attribute>,
    relationships: Vec<RelationshipTemplate>,
}

impl Model {
    /// Create a model with the given identity attribute.
    pub fn new(name: impl Into<String>, id: Attribute) -> Self {
        let name = name.into();
        let mut id = id.with_name("id");
        id.set_model_name(&name);
        Model {
            name,
            id,
            ownership: None,
            attributes: BTreeMap::new(),
            relationships: Vec::new(),
        }
    }

    /// Build a model from a template, creating its attribute objects and
    /// stamping every relationship template with this model as source.
    pub fn from_template(template: &ModelTemplate) -> Result<Self, Error> {
        let name = template
            .name
            .clone()
            .ok_or_else(|| Error::Template("cannot create a model without a name".into()))?;

        let mut model = Model::new(name, Attribute::from_template(&template.id)?);

        if let Some(ownership) = &template.ownership {
            model.ownership = Some(model.stamp_ownership(ownership));
        }

        if let Some(attributes) = &template.attributes {
            for (key, attr_template) in attributes {
                let mut attribute = Attribute::from_template(attr_template)?.with_name(key.clone());
                attribute.set_model_name(&model.name);
                model.attributes.insert(key.clone(), attribute);
            }
        }

        if let Some(relationships) = &template.relationships {
            for rel_template in relationships {
                let stamped = model.attach_as_source(rel_template);
                model.relationships.push(stamped);
            }
        }

        Ok(model)
    }

    /// Add a named attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        let name = name.into();
        let mut attribute = attribute.with_name(name.clone());
        attribute.set_model_name(&self.name);
        self.attributes.insert(name, attribute);
        self
    }

    /// Add a relationship template, stamped with this model as source.
    pub fn with_relationship(mut self, template: RelationshipTemplate) -> Self {
        let stamped = self.attach_as_source(&template);
        self.relationships.push(stamped);
        self
    }

    /// Declare this model as owned via the given relationship template.
    pub fn with_ownership(mut self, template: RelationshipTemplate) -> Self {
        self.ownership = Some(self.stamp_ownership(&template));
        self
    }

    /// Stamp an ownership template: this model as source, the fixed
    /// `"owner"` target alias, `"ownership"` name, and chain propagation.
    fn stamp_ownership(&self, template: &RelationshipTemplate) -> RelationshipTemplate {
        let mut stamped = self.attach_as_source(template);
        stamped.target_as = Some("owner".to_string());
        stamped.name = Some("ownership".to_string());
        stamped.chain = Some(true);
        stamped
    }

    /// Copy a relationship template with this model set as its source.
    /// The caller's template is left untouched.
    pub fn attach_as_source(&self, template: &RelationshipTemplate) -> RelationshipTemplate {
        let mut stamped = template.clone();
        stamped.source = Some(self.name.clone());
        stamped
    }

    /// Copy a relationship template with this model set as its target.
    /// The caller's template is left untouched.
    pub fn attach_as_target(&self, template: &RelationshipTemplate) -> RelationshipTemplate {
        let mut stamped = template.clone();
        stamped.target = self.name.clone();
        stamped
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identity attribute.
    pub fn id(&self) -> &Attribute {
        &self.id
    }

    /// The stamped ownership template, if this entity is owned.
    pub fn ownership_template(&self) -> Option<RelationshipTemplate> {
        self.ownership.clone()
    }

    /// All attributes, in name order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    /// All attribute names, in name order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().map(|name| name.as_str()).collect()
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// The stamped relationship templates declared by this model.
    pub fn relationships(&self) -> &[RelationshipTemplate] {
        &self.relationships
    }

    /// Relationship templates targeting the named model.
    pub fn relationships_by_target(&self, name: &str) -> Vec<&RelationshipTemplate> {
        self.relationships
            .iter()
            .filter(|template| template.target == name)
            .collect()
    }

    /// Relationship templates carrying the given source alias.
    pub fn relationships_by_source_alias(&self, alias: &str) -> Vec<&RelationshipTemplate> {
        self.relationships
            .iter()
            .filter(|template| template.source_as.as_deref() == Some(alias))
            .collect()
    }

    /// Relationship templates carrying the given target alias.
    pub fn relationships_by_target_alias(&self, alias: &str) -> Vec<&RelationshipTemplate> {
        self.relationships
            .iter()
            .filter(|template| template.target_as.as_deref() == Some(alias))
            .collect()
    }

    /// Export as a template carrying only non-default fields.
    pub fn to_minimal_template(
        &self,
        format: TemplateFormat,
        options: &ModelExportOptions,
    ) -> Result<ModelTemplate, Error> {
        self.export_template(format, options, false)
    }

    /// Export as a template with redundant fields spelled out.
    pub fn to_complete_template(
        &self,
        format: TemplateFormat,
        options: &ModelExportOptions,
    ) -> Result<ModelTemplate, Error> {
        self.export_template(format, options, true)
    }

    fn export_template(
        &self,
        format: TemplateFormat,
        options: &ModelExportOptions,
        complete: bool,
    ) -> Result<ModelTemplate, Error> {
        let export_attribute = |attribute: &Attribute| {
            let mut template = if complete {
                attribute.to_complete_template(format)
            } else {
                attribute.to_minimal_template(format)
            };
            if !options.attribute_names {
                template.name = None;
            }
            // The enclosing model template implies the back-reference.
            template.model = None;
            template
        };

        let ownership = self
            .ownership
            .as_ref()
            .map(|template| self.export_ownership(template, format, options, complete))
            .transpose()?;

        let attributes = if !self.attributes.is_empty() || options.empty_objects {
            Some(
                self.attributes
                    .iter()
                    .map(|(key, attribute)| (key.clone(), export_attribute(attribute)))
                    .collect(),
            )
        } else {
            None
        };

        let relationships = if !self.relationships.is_empty() || options.empty_objects {
            let mut list = Vec::new();
            for template in &self.relationships {
                let rel = Relationship::from_template(template)?;
                let mut exported = if complete {
                    rel.to_complete_template(format)
                } else {
                    rel.to_minimal_template(format)
                };
                if !options.relationship_sources {
                    exported.source = None;
                    if complete && exported.source_as.as_deref() == Some(self.name.as_str()) {
                        exported.source_as = None;
                    }
                }
                list.push(exported);
            }
            Some(list)
        } else {
            None
        };

        Ok(ModelTemplate {
            name: options.name.then(|| self.name.clone()),
            id: export_attribute(&self.id),
            ownership,
            attributes,
            relationships,
        })
    }

    fn export_ownership(
        &self,
        template: &RelationshipTemplate,
        format: TemplateFormat,
        options: &ModelExportOptions,
        complete: bool,
    ) -> Result<RelationshipTemplate, Error> {
        let rel = Relationship::from_template(template)?;
        let mut exported = if complete {
            rel.to_complete_template(format)
        } else {
            rel.to_minimal_template(format)
        };

        if !options.relationship_sources {
            exported.source = None;
            if complete && exported.source_as.as_deref() == Some(self.name.as_str()) {
                exported.source_as = None;
            }
        }
        if !options.ownership_alias && exported.target_as.as_deref() == Some("owner") {
            exported.target_as = None;
        }
        if !options.ownership_name && exported.name.as_deref() == Some("ownership") {
            exported.name = None;
        }
        if !options.ownership_chain && exported.chain == Some(true) {
            exported.chain = None;
        }

        Ok(exported)
    }

    /// Render as a template string, e.g. for file export.
    pub fn to_template_string(
        &self,
        options: &TemplateStringOptions,
        export: &ModelExportOptions,
    ) -> Result<String, Error> {
        let template = if options.complete {
            self.to_complete_template(options.format, export)?
        } else {
            self.to_minimal_template(options.format, export)?
        };
        render_template(&template, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationship::{Cardinality, CardinalityValue};
    use modelgraph_types::DataType;
    use serde_json::json;

    fn item_template() -> ModelTemplate {
        serde_json::from_value(json!({
            "name": "item",
            "id": { "type": "UUID()" },
            "ownership": { "target": "user", "type": "ONE_TO_MANY" },
            "attributes": {
                "name": { "type": "STRING()" },
                "price": { "type": "FLOAT()" }
            },
            "relationships": [
                { "target": "category", "type": "MANY_TO_ONE" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_from_template_requires_name() {
        let template = ModelTemplate {
            name: None,
            id: DataType::uuid().into(),
            ownership: None,
            attributes: None,
            relationships: None,
        };
        assert!(matches!(
            Model::from_template(&template),
            Err(Error::Template(_))
        ));
    }

    #[test]
    fn test_id_attribute_is_named_id() {
        let model = Model::from_template(&item_template()).unwrap();
        assert_eq!(model.id().name(), Some("id"));
        assert_eq!(model.id().model_name(), Some("item"));
    }

    #[test]
    fn test_ownership_is_stamped() {
        let model = Model::from_template(&item_template()).unwrap();
        let ownership = model.ownership_template().unwrap();

        assert_eq!(ownership.source.as_deref(), Some("item"));
        assert_eq!(ownership.target, "user");
        assert_eq!(ownership.target_as.as_deref(), Some("owner"));
        assert_eq!(ownership.name.as_deref(), Some("ownership"));
        assert_eq!(ownership.chain, Some(true));
    }

    #[test]
    fn test_relationships_are_stamped_with_source() {
        let model = Model::from_template(&item_template()).unwrap();
        assert_eq!(model.relationships().len(), 1);
        assert_eq!(model.relationships()[0].source.as_deref(), Some("item"));
    }

    #[test]
    fn test_attach_leaves_caller_template_untouched() {
        let model = Model::from_template(&item_template()).unwrap();
        let original = RelationshipTemplate::new("vendor", Cardinality::ManyToOne);

        let as_source = model.attach_as_source(&original);
        assert_eq!(as_source.source.as_deref(), Some("item"));
        assert_eq!(original.source, None);

        let as_target = model.attach_as_target(&original);
        assert_eq!(as_target.target, "item");
        assert_eq!(original.target, "vendor");
    }

    #[test]
    fn test_attribute_lookup() {
        let model = Model::from_template(&item_template()).unwrap();

        assert_eq!(model.attribute_names(), vec!["name", "price"]);
        let price = model.attribute("price").unwrap();
        assert_eq!(price.name(), Some("price"));
        assert_eq!(price.model_name(), Some("item"));
        assert!(model.attribute("missing").is_none());
    }

    #[test]
    fn test_relationship_template_filters() {
        let model = Model::new("order", Attribute::from_type(DataType::uuid()))
            .with_relationship(RelationshipTemplate::new("user", Cardinality::ManyToOne))
            .with_relationship(
                RelationshipTemplate::new("item", Cardinality::ManyToMany).with_target_as("lines"),
            );

        assert_eq!(model.relationships_by_target("user").len(), 1);
        assert_eq!(model.relationships_by_target("vendor").len(), 0);
        assert_eq!(model.relationships_by_target_alias("lines").len(), 1);
        assert_eq!(model.relationships_by_source_alias("order").len(), 0);
    }

    #[test]
    fn test_minimal_export_collapses_defaults() {
        let model = Model::from_template(&item_template()).unwrap();
        let exported = model
            .to_minimal_template(TemplateFormat::Explicit, &ModelExportOptions::default())
            .unwrap();

        assert_eq!(exported.name.as_deref(), Some("item"));
        assert_eq!(exported.id.name, None);

        let ownership = exported.ownership.unwrap();
        assert_eq!(ownership.source, None);
        assert_eq!(ownership.target_as, None);
        assert_eq!(ownership.name, None);
        assert_eq!(ownership.chain, None);
        assert_eq!(ownership.target, "user");

        let relationships = exported.relationships.unwrap();
        assert_eq!(relationships[0].source, None);
    }

    #[test]
    fn test_minimal_export_keeps_defaults_on_request() {
        let model = Model::from_template(&item_template()).unwrap();
        let exported = model
            .to_minimal_template(
                TemplateFormat::Explicit,
                &ModelExportOptions {
                    attribute_names: true,
                    relationship_sources: true,
                    ownership_alias: true,
                    ownership_name: true,
                    ownership_chain: true,
                    ..ModelExportOptions::default()
                },
            )
            .unwrap();

        assert_eq!(exported.id.name.as_deref(), Some("id"));
        let ownership = exported.ownership.unwrap();
        assert_eq!(ownership.source.as_deref(), Some("item"));
        assert_eq!(ownership.target_as.as_deref(), Some("owner"));
        assert_eq!(ownership.name.as_deref(), Some("ownership"));
        assert_eq!(ownership.chain, Some(true));
    }

    #[test]
    fn test_complete_export_strips_redundant_source_alias() {
        let model = Model::from_template(&item_template()).unwrap();
        let exported = model
            .to_complete_template(TemplateFormat::Explicit, &ModelExportOptions::default())
            .unwrap();

        // The complete alias fell back to the model name, which is redundant
        // once the source is implied by the enclosing template.
        let ownership = exported.ownership.unwrap();
        assert_eq!(ownership.source, None);
        assert_eq!(ownership.source_as, None);
        assert_eq!(
            ownership.kind,
            CardinalityValue::Name("ONE_TO_MANY".into())
        );
    }

    #[test]
    fn test_empty_objects_option() {
        let model = Model::new("tag", Attribute::from_type(DataType::uuid()));

        let exported = model
            .to_minimal_template(TemplateFormat::Explicit, &ModelExportOptions::default())
            .unwrap();
        assert!(exported.attributes.is_none());
        assert!(exported.relationships.is_none());

        let exported = model
            .to_minimal_template(
                TemplateFormat::Explicit,
                &ModelExportOptions {
                    empty_objects: true,
                    ..ModelExportOptions::default()
                },
            )
            .unwrap();
        assert_eq!(exported.attributes, Some(BTreeMap::new()));
        assert_eq!(exported.relationships, Some(Vec::new()));
    }

    #[test]
    fn test_suppressing_model_name() {
        let model = Model::new("tag", Attribute::from_type(DataType::uuid()));
        let exported = model
            .to_minimal_template(
                TemplateFormat::Explicit,
                &ModelExportOptions {
                    name: false,
                    ..ModelExportOptions::default()
                },
            )
            .unwrap();
        assert_eq!(exported.name, None);
    }

    #[test]
    fn test_template_string_rendering() {
        let model = Model::new("tag", Attribute::from_type(DataType::uuid()));
        let rendered = model
            .to_template_string(
                &TemplateStringOptions::default(),
                &ModelExportOptions::default(),
            )
            .unwrap();
        assert_eq!(rendered, "{\n    \"name\": \"tag\",\n    \"id\": {\n        \"type\": \"UUID()\"\n    }\n}");
    }
}
