//! `types.ts` emission: one interface per contract schema.

use super::emit::{ts_header, CodeWriter, GeneratedFile};
use crate::contract::{Contract, FieldSpec};
use crate::typemap::{TargetLanguage, TypeMapper};

pub fn generate_types(contract: &Contract, language: TargetLanguage) -> GeneratedFile {
    let mut w = CodeWriter::new();
    ts_header(&mut w);

    let mut first = true;
    for schema in contract.schemas.values() {
        if !first {
            w.blank();
        }
        first = false;
        w.open(format!("export interface {} {{", schema.name));
        for field in &schema.fields {
            w.line(field_line(field, schema.required.contains(&field.name), language));
        }
        w.close("}");
    }

    GeneratedFile::new(format!("types.{}", language.extension()), w.finish())
}

/// Render one interface member. Optionality (`?`) marks fields that may be
/// absent (defaulted); `| null` marks nullable columns. A nullable field is
/// always present in payloads, so it gets `| null` without `?`.
fn field_line(field: &FieldSpec, required: bool, language: TargetLanguage) -> String {
    let ty = ts_type(field, language);
    let optional = if !required && !field.nullable { "?" } else { "" };
    let nullable = if field.nullable { " | null" } else { "" };
    format!("{}{}: {}{};", field.name, optional, ty, nullable)
}

pub(super) fn ts_type(field: &FieldSpec, language: TargetLanguage) -> String {
    if !field.constraints.enum_values.is_empty() {
        return field
            .constraints
            .enum_values
            .iter()
            .map(|v| format!("{v:?}"))
            .collect::<Vec<_>>()
            .join(" | ");
    }
    TypeMapper::target_for_contract(field.contract, language).to_string()
}
