//! Entity introspection: `EntityDescriptor` → `SchemaType`.

use crate::contract::{Constraints, FieldSpec, SchemaType};
use crate::descriptor::EntityDescriptor;
use crate::error::{PipelineError, Result};
use crate::typemap::TypeMapper;
use std::collections::BTreeSet;

/// Build `SchemaType` records for every entity, in declaration order.
///
/// Fails with a `MappingError` naming the entity, field and type tag when a
/// field's source type has no mapping; unmapped types are never coerced.
pub fn introspect_entities(entities: &[EntityDescriptor]) -> Result<Vec<SchemaType>> {
    entities.iter().map(introspect_entity).collect()
}

fn introspect_entity(entity: &EntityDescriptor) -> Result<SchemaType> {
    let mut fields = Vec::with_capacity(entity.fields.len());
    let mut required = BTreeSet::new();

    for field in &entity.fields {
        let contract = TypeMapper::contract_for_source(&field.source_type).ok_or_else(|| {
            PipelineError::Mapping {
                entity: entity.name.clone(),
                field: field.name.clone(),
                source_type: field.source_type.clone(),
            }
        })?;

        // An enum declaration without a value set has nothing to map to.
        if field.source_type.eq_ignore_ascii_case("enum") && field.enum_values.is_empty() {
            return Err(PipelineError::Mapping {
                entity: entity.name.clone(),
                field: field.name.clone(),
                source_type: "enum (no declared values)".to_string(),
            });
        }

        // Required iff no default and declared non-nullable.
        if !field.nullable && field.default.is_none() {
            required.insert(field.name.clone());
        }

        fields.push(FieldSpec {
            name: field.name.clone(),
            source_type: field.source_type.to_ascii_lowercase(),
            contract,
            nullable: field.nullable,
            constraints: Constraints {
                max_length: field.max_length,
                enum_values: field.enum_values.clone(),
                precision: field.precision,
                default: field.default.clone(),
            },
        });
    }

    tracing::debug!(entity = %entity.name, fields = fields.len(), "introspected entity");

    Ok(SchemaType {
        name: entity.name.clone(),
        source_module: if entity.module.is_empty() {
            "<unknown>".to_string()
        } else {
            entity.module.clone()
        },
        fields,
        required,
    })
}
