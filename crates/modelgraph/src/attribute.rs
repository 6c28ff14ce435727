//! Typed, constrained attribute definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use modelgraph_types::{get_call, parse_call, DataType, PropertyOverrides};

use crate::environment::Environment;
use crate::error::Error;
use crate::format::TemplateFormat;
use crate::model::Model;
use crate::render::{render_template, TemplateStringOptions};

/// A data type as it appears in a template: a constructed value or a
/// rendered call string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    /// A constructed type value (serializes to the canonical call string).
    Value(DataType),
    /// A rendered call string, e.g. `"STRING(42)"` or `"Types.STRING(42)"`.
    Call(String),
}

impl TypeSpec {
    /// Resolve to a [`DataType`]. Call strings are parsed; the namespaced
    /// object form is not parseable and is rejected.
    pub fn resolve(&self) -> Result<DataType, Error> {
        match self {
            TypeSpec::Value(ty) => Ok(ty.clone()),
            TypeSpec::Call(call) => Ok(parse_call(call)?),
        }
    }
}

impl From<DataType> for TypeSpec {
    fn from(ty: DataType) -> TypeSpec {
        TypeSpec::Value(ty)
    }
}

/// Template for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeTemplate {
    /// Attribute name. Usually carried by the enclosing map key instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Name of the model this attribute belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// The attribute's data type.
    #[serde(rename = "type")]
    pub ty: TypeSpec,
    /// NOT NULL constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_null: Option<bool>,
    /// PRIMARY KEY constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    /// UNIQUE constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    /// CHECK constraint expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// Name of the entity this attribute references by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign: Option<String>,
    /// Type property overrides, applied once at construction.
    #[serde(flatten)]
    pub overrides: PropertyOverrides,
}

impl AttributeTemplate {
    /// Create a template around a type with no constraints.
    pub fn new(ty: DataType) -> Self {
        AttributeTemplate {
            name: None,
            model: None,
            ty: ty.into(),
            not_null: None,
            primary: None,
            unique: None,
            check: None,
            foreign: None,
            overrides: PropertyOverrides::default(),
        }
    }

    /// Set the attribute name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add the NOT NULL constraint.
    pub fn not_null(mut self) -> Self {
        self.not_null = Some(true);
        self
    }

    /// Add the PRIMARY KEY constraint.
    pub fn primary(mut self) -> Self {
        self.primary = Some(true);
        self
    }

    /// Add the UNIQUE constraint.
    pub fn unique(mut self) -> Self {
        self.unique = Some(true);
        self
    }

    /// Set a CHECK constraint expression.
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check = Some(check.into());
        self
    }

    /// Set a foreign-key reference to another entity.
    pub fn with_foreign(mut self, entity: impl Into<String>) -> Self {
        self.foreign = Some(entity.into());
        self
    }

    /// Override the type's absent value.
    pub fn with_absent_value(mut self, value: Value) -> Self {
        self.overrides.absent_value = Some(value);
        self
    }
}

impl From<DataType> for AttributeTemplate {
    fn from(ty: DataType) -> AttributeTemplate {
        AttributeTemplate::new(ty)
    }
}

/// A typed, constrained field definition attached to a model.
///
/// Immutable after construction; the owning model stamps `model_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: Option<String>,
    model_name: Option<String>,
    ty: DataType,
    not_null: bool,
    primary: bool,
    unique: bool,
    check: Option<String>,
    foreign: Option<String>,
}

impl Attribute {
    /// Create an attribute around a bare type with default constraints.
    pub fn from_type(ty: DataType) -> Self {
        Attribute {
            name: None,
            model_name: None,
            ty,
            not_null: false,
            primary: false,
            unique: false,
            check: None,
            foreign: None,
        }
    }

    /// Create an attribute from a template. Property overrides are applied
    /// to this attribute's own copy of the type; the template is untouched.
    pub fn from_template(template: &AttributeTemplate) -> Result<Self, Error> {
        let mut ty = template.ty.resolve()?;
        ty.apply_properties(&template.overrides);

        Ok(Attribute {
            name: template.name.clone(),
            model_name: template.model.clone(),
            ty,
            not_null: template.not_null.unwrap_or(false),
            primary: template.primary.unwrap_or(false),
            unique: template.unique.unwrap_or(false),
            check: template.check.clone(),
            foreign: template.foreign.clone(),
        })
    }

    /// Replace the attribute name (the owning model names map entries).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn set_model_name(&mut self, name: &str) {
        self.model_name = Some(name.to_string());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name of the owning model, stamped when the model is built.
    pub fn model_name(&self) -> Option<&str> {
        self.model_name.as_deref()
    }

    /// Resolve the owning model through an environment.
    pub fn model<'a>(&self, env: &'a Environment) -> Option<&'a Model> {
        self.model_name
            .as_deref()
            .and_then(|name| env.model_by_name(name))
    }

    pub fn data_type(&self) -> &DataType {
        &self.ty
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn check(&self) -> Option<&str> {
        self.check.as_deref()
    }

    pub fn foreign_key(&self) -> Option<&str> {
        self.foreign.as_deref()
    }

    pub fn has_enumerable_type(&self) -> bool {
        self.ty.is_enumerable()
    }

    pub fn has_comparable_type(&self) -> bool {
        self.ty.is_comparable()
    }

    pub fn has_searchable_type(&self) -> bool {
        self.ty.is_searchable()
    }

    pub fn has_fragmentable_type(&self) -> bool {
        self.ty.is_fragmentable()
    }

    pub fn absent_value(&self) -> Option<&Value> {
        self.ty.absent_value()
    }

    /// Render a type in the requested template format.
    pub fn format_type(ty: &DataType, format: TemplateFormat) -> TypeSpec {
        match format {
            TemplateFormat::Internal => TypeSpec::Value(ty.clone()),
            TemplateFormat::Explicit => TypeSpec::Call(get_call(ty)),
            TemplateFormat::Object => TypeSpec::Call(format!("Types.{}", get_call(ty))),
        }
    }

    /// Export as a template carrying only non-default fields. Property
    /// overrides appear only where they differ from a default-constructed
    /// type of the same kind.
    pub fn to_minimal_template(&self, format: TemplateFormat) -> AttributeTemplate {
        let defaults = DataType::with_defaults(self.ty.kind());

        let differs = |actual: bool, dflt: bool| (actual != dflt).then_some(actual);
        let overrides = PropertyOverrides {
            enumerable: differs(self.ty.is_enumerable(), defaults.is_enumerable()),
            comparable: differs(self.ty.is_comparable(), defaults.is_comparable()),
            searchable: differs(self.ty.is_searchable(), defaults.is_searchable()),
            fragmentable: differs(self.ty.is_fragmentable(), defaults.is_fragmentable()),
            absent_value: if self.ty.absent_value() != defaults.absent_value() {
                Some(self.ty.absent_value().cloned().unwrap_or(Value::Null))
            } else {
                None
            },
        };

        AttributeTemplate {
            name: self.name.clone(),
            model: self.model_name.clone(),
            ty: Attribute::format_type(&self.ty, format),
            not_null: self.not_null.then_some(true),
            primary: self.primary.then_some(true),
            unique: self.unique.then_some(true),
            check: self.check.clone(),
            foreign: self.foreign.clone(),
            overrides,
        }
    }

    /// Export as a template with every field spelled out.
    pub fn to_complete_template(&self, format: TemplateFormat) -> AttributeTemplate {
        AttributeTemplate {
            name: self.name.clone(),
            model: self.model_name.clone(),
            ty: Attribute::format_type(&self.ty, format),
            not_null: Some(self.not_null),
            primary: Some(self.primary),
            unique: Some(self.unique),
            check: self.check.clone(),
            foreign: self.foreign.clone(),
            overrides: PropertyOverrides {
                enumerable: Some(self.ty.is_enumerable()),
                comparable: Some(self.ty.is_comparable()),
                searchable: Some(self.ty.is_searchable()),
                fragmentable: Some(self.ty.is_fragmentable()),
                absent_value: Some(self.ty.absent_value().cloned().unwrap_or(Value::Null)),
            },
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
