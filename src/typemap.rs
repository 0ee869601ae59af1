//! Bidirectional type mapping table.
//!
//! Maps framework-native source type tags to contract `(type, format)` pairs
//! and projects contract types into each generation target's type system.
//! Every supported source type gets a distinct `(type, format)` pair so the
//! reverse lookup loses neither precision nor nullability; aliases (`numeric`
//! for `decimal`) share the canonical pair and resolve back to the canonical
//! tag.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Output language for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    TypeScript,
}

impl TargetLanguage {
    /// File extension for typed source files in this language.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetLanguage::TypeScript => "ts",
        }
    }
}

/// A contract-level scalar type: OpenAPI `type` plus optional `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContractType {
    pub ty: &'static str,
    pub format: Option<&'static str>,
}

/// One row of the mapping table.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapping {
    pub source: &'static str,
    pub contract: ContractType,
    pub typescript: &'static str,
    /// Aliases resolve forward but never win the reverse lookup.
    pub canonical: bool,
}

const fn row(
    source: &'static str,
    ty: &'static str,
    format: Option<&'static str>,
    typescript: &'static str,
    canonical: bool,
) -> TypeMapping {
    TypeMapping {
        source,
        contract: ContractType { ty, format },
        typescript,
        canonical,
    }
}

static TABLE: &[TypeMapping] = &[
    row("integer", "integer", Some("int32"), "number", true),
    row("biginteger", "integer", Some("int64"), "number", true),
    row("float", "number", Some("float"), "number", true),
    row("double", "number", Some("double"), "number", true),
    row("decimal", "number", Some("decimal"), "number", true),
    row("numeric", "number", Some("decimal"), "number", false),
    row("string", "string", None, "string", true),
    row("text", "string", Some("text"), "string", true),
    row("uuid", "string", Some("uuid"), "string", true),
    row("date", "string", Some("date"), "string", true),
    row("datetime", "string", Some("date-time"), "string", true),
    row("time", "string", Some("time"), "string", true),
    row("boolean", "boolean", None, "boolean", true),
    row("json", "object", None, "Record<string, unknown>", true),
    // Enum fields carry their value set in constraints; the scalar side is a
    // plain string, so the reverse lookup resolves to `string`.
    row("enum", "string", None, "string", false),
];

static BY_SOURCE: Lazy<HashMap<&'static str, &'static TypeMapping>> = Lazy::new(|| {
    TABLE.iter().map(|m| (m.source, m)).collect()
});

static BY_CONTRACT: Lazy<HashMap<ContractType, &'static TypeMapping>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for m in TABLE.iter().filter(|m| m.canonical) {
        map.entry(m.contract).or_insert(m);
    }
    map
});

/// Static lookup facade over the mapping table.
pub struct TypeMapper;

impl TypeMapper {
    /// Source type tag → contract type. Lookup is case-insensitive.
    pub fn contract_for_source(source: &str) -> Option<ContractType> {
        BY_SOURCE
            .get(source.to_ascii_lowercase().as_str())
            .map(|m| m.contract)
    }

    /// Contract type → canonical source type tag (reverse table).
    pub fn source_for_contract(contract: ContractType) -> Option<&'static str> {
        BY_CONTRACT.get(&contract).map(|m| m.source)
    }

    /// Contract type → target-language type.
    pub fn target_for_contract(contract: ContractType, language: TargetLanguage) -> &'static str {
        let mapping = BY_CONTRACT.get(&contract);
        match language {
            TargetLanguage::TypeScript => mapping.map(|m| m.typescript).unwrap_or("unknown"),
        }
    }
}
