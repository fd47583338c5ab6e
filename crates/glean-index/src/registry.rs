//! Field registries and the per-type registry cache.
//!
//! A [`FieldRegistry`] maps qualified names to [`FieldDescriptor`]s for one
//! record type. [`Searchables`] builds registries from a [`Schema`] on first
//! access, resolving relation fields recursively through the same cache, and
//! keeps each one for the lifetime of the cache.

use std::{
    collections::BTreeMap,
    sync::{Arc, OnceLock},
};

use glean_query::FieldLookup;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    descriptor::FieldDescriptor,
    error::SchemaError,
    schema::{RecordType, Schema},
};

/// The searchable fields of one record type, in build order.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    /// Record type the registry belongs to.
    record_type: String,
    /// Descriptors keyed by qualified name.
    fields: IndexMap<String, FieldDescriptor>,
}

impl FieldRegistry {
    /// Creates an empty registry for `record_type`.
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            fields: IndexMap::new(),
        }
    }

    /// Registers a descriptor under its qualified name.
    ///
    /// A descriptor with the same qualified name is replaced and returned; the
    /// name keeps its original position in build order.
    pub fn insert(&mut self, descriptor: FieldDescriptor) -> Option<FieldDescriptor> {
        let name = descriptor.qualified_name().to_string();
        let previous = self.fields.insert(name, descriptor);
        if let Some(previous) = &previous {
            warn!(
                record_type = %self.record_type,
                field = previous.qualified_name(),
                "searchable field redeclared, later declaration wins"
            );
        }
        previous
    }

    /// Returns the record type this registry belongs to.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Returns the descriptor registered under `qualified_name`.
    pub fn get(&self, qualified_name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(qualified_name)
    }

    /// Returns true if `qualified_name` is registered.
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.fields.contains_key(qualified_name)
    }

    /// Iterates descriptors in build order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Iterates qualified names in build order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns the number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldLookup for FieldRegistry {
    fn lookup(&self, alias: &str) -> Option<&str> {
        if let Some((name, _)) = self.fields.get_key_value(alias) {
            return Some(name);
        }
        let alias = alias.to_lowercase();
        self.names().find(|name| name.to_lowercase() == alias)
    }
}

/// Lazily built, cached field registries for every record type of a schema.
///
/// Registries are built on first access and published once. Concurrent first
/// accesses may build the same registry twice; the first published result is
/// kept and the other dropped, which is harmless because building is a pure
/// function of the schema.
#[derive(Debug)]
pub struct Searchables {
    /// Record types and their declarations.
    schema: Schema,
    /// One slot per record type.
    cache: BTreeMap<String, OnceLock<Arc<FieldRegistry>>>,
}

impl Searchables {
    /// Creates an empty cache over `schema`.
    pub fn new(schema: Schema) -> Self {
        let cache = schema
            .type_names()
            .map(|name| (name.to_string(), OnceLock::new()))
            .collect();
        Self { schema, cache }
    }

    /// Returns the schema registries are built from.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the registry for `record_type`, building it on first access.
    pub fn registry(&self, record_type: &str) -> Result<Arc<FieldRegistry>, SchemaError> {
        self.resolve(record_type, &mut Vec::new())
    }

    /// Builds every registry, returning the first error.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for name in self.schema.type_names() {
            self.registry(name)?;
        }
        Ok(())
    }

    /// Returns the cached registry for `record_type` or builds and publishes it.
    ///
    /// `stack` holds the types currently being built, outermost first.
    fn resolve(
        &self,
        record_type: &str,
        stack: &mut Vec<String>,
    ) -> Result<Arc<FieldRegistry>, SchemaError> {
        let slot = self
            .cache
            .get(record_type)
            .ok_or_else(|| SchemaError::UnknownType(record_type.to_string()))?;
        if let Some(registry) = slot.get() {
            return Ok(Arc::clone(registry));
        }

        if let Some(start) = stack.iter().position(|name| name == record_type) {
            let mut path = stack[start..].to_vec();
            path.push(record_type.to_string());
            return Err(SchemaError::CyclicRelation { path });
        }

        stack.push(record_type.to_string());
        let built = self.build(record_type, stack);
        stack.pop();

        let built = Arc::new(built?);
        let registry = slot.get_or_init(|| built);
        debug!(
            record_type,
            fields = registry.len(),
            "searchable field registry built"
        );
        Ok(Arc::clone(registry))
    }

    /// Resolves every declaration of `record_type` into descriptors.
    fn build(&self, record_type: &str, stack: &mut Vec<String>) -> Result<FieldRegistry, SchemaError> {
        let ty = self
            .schema
            .get(record_type)
            .ok_or_else(|| SchemaError::UnknownType(record_type.to_string()))?;

        let mut registry = FieldRegistry::new(record_type);
        for declaration in ty.declarations() {
            let Some(relation) = self.schema.relation(record_type, &declaration.field) else {
                if !ty.has_field(&declaration.field) {
                    return Err(SchemaError::UnknownField {
                        record_type: record_type.to_string(),
                        field: declaration.field.clone(),
                    });
                }
                registry.insert(FieldDescriptor::direct(record_type, declaration));
                continue;
            };

            let inner = self.related(ty, &declaration.field, &relation.target, stack)?;
            for descriptor in inner
                .iter()
                .filter(|d| declaration.options.exposes(d.qualified_name()))
            {
                registry.insert(FieldDescriptor::through(record_type, declaration, descriptor));
            }
        }
        Ok(registry)
    }

    /// Resolves the registry of a relation's target type.
    fn related(
        &self,
        owner: &RecordType,
        field: &str,
        target: &str,
        stack: &mut Vec<String>,
    ) -> Result<Arc<FieldRegistry>, SchemaError> {
        if self.schema.get(target).is_none() {
            return Err(SchemaError::UnknownRelationTarget {
                record_type: owner.name().to_string(),
                field: field.to_string(),
                target: target.to_string(),
            });
        }
        self.resolve(target, stack)
    }
}
