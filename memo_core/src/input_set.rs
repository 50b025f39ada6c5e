// Copyright 2026 the Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Named, dynamically typed input records, with the set of fields declared up front.

use std::rc::Rc;

use hashbrown::HashMap;
use thiserror::Error;

use crate::{ShallowEq, Value};

/// Failures when declaring a [`Schema`] or building an [`InputSet`] against one.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// The same field name was declared twice.
    #[error("field `{0}` is declared more than once")]
    DuplicateField(Rc<str>),
    /// A value was given for a field the schema doesn't declare.
    #[error("`{0}` is not a field of this schema")]
    UnknownField(String),
    /// A declared field was never given a value.
    #[error("field `{0}` was not given a value")]
    MissingField(Rc<str>),
}

#[derive(Debug)]
struct SchemaInner {
    names: Vec<Rc<str>>,
    index: HashMap<Rc<str>, usize>,
}

/// The ordered field names of an [`InputSet`].
///
/// A schema is declared once, typically when a memoized unit is created, and shared by every
/// input set built for that unit. Cloning a schema is cheap.
#[derive(Clone, Debug)]
pub struct Schema(Rc<SchemaInner>);

impl Schema {
    /// Declares a schema with the given field names, in order.
    pub fn new<I, S>(fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Rc<str>>,
    {
        let mut names = Vec::new();
        let mut index = HashMap::new();
        for name in fields {
            let name: Rc<str> = name.into();
            if index.insert(Rc::clone(&name), names.len()).is_some() {
                return Err(SchemaError::DuplicateField(name));
            }
            names.push(name);
        }
        Ok(Self(Rc::new(SchemaInner { names, index })))
    }

    /// The field names, in declaration order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.0.names.iter().map(|name| &**name)
    }

    /// The position of `field` in this schema.
    pub fn position(&self, field: &str) -> Option<usize> {
        self.0.index.get(field).copied()
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.0.names.len()
    }

    /// Whether this schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.names.is_empty()
    }

    /// Whether both schemas have the same field names in the same order.
    pub fn same_fields(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0.names == other.0.names
    }

    /// Starts building an [`InputSet`] for this schema.
    pub fn inputs(&self) -> InputSetBuilder {
        InputSet::builder(self)
    }
}

/// One value per field of a [`Schema`].
///
/// Two input sets are shallowly equal when they have the same fields, and every field's
/// [`Value`] is shallowly equal. Input sets with different fields are never equal.
#[derive(Clone, Debug)]
pub struct InputSet {
    schema: Schema,
    values: Box<[Value]>,
}

impl InputSet {
    /// Starts building an input set for `schema`.
    pub fn builder(schema: &Schema) -> InputSetBuilder {
        InputSetBuilder {
            schema: schema.clone(),
            values: vec![None; schema.len()],
        }
    }

    /// The schema these inputs were built against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The value of `field`, if the schema declares it.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.schema
            .position(field)
            .and_then(|idx| self.values.get(idx))
    }

    /// Iterates over the fields and their values, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.schema.fields().zip(self.values.iter())
    }
}

impl ShallowEq for InputSet {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.schema.same_fields(&other.schema)
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.shallow_eq(b))
    }
}

/// Builder for an [`InputSet`], created by [`InputSet::builder`].
#[derive(Debug)]
#[must_use = "An input set is only created once `build` is called"]
pub struct InputSetBuilder {
    schema: Schema,
    values: Vec<Option<Value>>,
}

impl InputSetBuilder {
    /// Sets the value of `field`, replacing any value given earlier.
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Result<Self, SchemaError> {
        let idx = self
            .schema
            .position(field)
            .ok_or_else(|| SchemaError::UnknownField(field.to_owned()))?;
        self.values[idx] = Some(value.into());
        Ok(self)
    }

    /// Finishes the input set, failing if any declared field has no value.
    pub fn build(self) -> Result<InputSet, SchemaError> {
        let Self { schema, values } = self;
        let values = values
            .into_iter()
            .zip(schema.0.names.iter())
            .map(|(value, name)| value.ok_or_else(|| SchemaError::MissingField(Rc::clone(name))))
            .collect::<Result<Box<[Value]>, _>>()?;
        Ok(InputSet { schema, values })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::Object;

    fn name_schema() -> Schema {
        Schema::new(["name"]).unwrap()
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let err = Schema::new(["data", "onClick", "data"]).unwrap_err();
        assert_matches!(err, SchemaError::DuplicateField(name) if &*name == "data");
    }

    #[test]
    fn builder_checks_fields() {
        let schema = Schema::new(["data", "onClick"]).unwrap();
        assert_matches!(
            schema.inputs().set("name", "Ravi"),
            Err(SchemaError::UnknownField(field)) if field == "name"
        );
        let missing = schema.inputs().set("data", 1).unwrap().build();
        assert_matches!(missing, Err(SchemaError::MissingField(name)) if &*name == "onClick");
    }

    #[test]
    fn values_are_read_by_name() {
        let inputs = name_schema().inputs().set("name", "Raj").unwrap().build().unwrap();
        assert_eq!(inputs.get("name").and_then(Value::as_str), Some("Raj"));
        assert!(inputs.get("age").is_none());
        assert_eq!(inputs.iter().count(), 1);
    }

    #[test]
    fn equal_when_every_field_is_equal() {
        let schema = name_schema();
        let a = schema.inputs().set("name", "Raj").unwrap().build().unwrap();
        let b = schema.inputs().set("name", "Raj").unwrap().build().unwrap();
        let c = schema.inputs().set("name", "Ravi").unwrap().build().unwrap();
        assert!(a.shallow_eq(&b));
        assert!(!a.shallow_eq(&c));
    }

    #[test]
    fn separately_declared_schemas_with_same_fields_compare() {
        let a = name_schema().inputs().set("name", "Raj").unwrap().build().unwrap();
        let b = name_schema().inputs().set("name", "Raj").unwrap().build().unwrap();
        assert!(a.shallow_eq(&b));
    }

    #[test]
    fn different_fields_are_unequal() {
        let a = Schema::new(["name"]).unwrap();
        let b = Schema::new(["nameObj"]).unwrap();
        let obj = Object::new("Raj");
        let a = a.inputs().set("name", obj.clone()).unwrap().build().unwrap();
        let b = b.inputs().set("nameObj", obj).unwrap().build().unwrap();
        assert!(!a.shallow_eq(&b));
    }
}
