//! `store.<entity>.ts` emission: one Pinia-style state container per entity
//! appearing as a response payload in the contract.
//!
//! Actions mirror only the CRUD operations the contract actually has for the
//! entity; nothing is synthesized. Collection and pagination state appear
//! only when a List operation exists.

use super::client::{query_options_param, signature_params};
use super::emit::{ts_header, CodeWriter, GeneratedFile};
use super::naming::{camel_case, snake_case, NamingConvention};
use crate::contract::{Contract, Operation, OperationKind};
use crate::typemap::TargetLanguage;
use std::collections::BTreeSet;

pub fn generate_stores(
    contract: &Contract,
    language: TargetLanguage,
    naming: NamingConvention,
    scope: Option<&[String]>,
) -> Vec<GeneratedFile> {
    contract
        .schemas
        .values()
        .filter(|schema| in_scope(scope, &schema.name))
        .filter_map(|schema| {
            let ops = contract.operations_for(&schema.name);
            if ops.is_empty() {
                return None;
            }
            Some(generate_store(contract, &schema.name, &ops, language, naming))
        })
        .collect()
}

pub(super) fn in_scope(scope: Option<&[String]>, name: &str) -> bool {
    match scope {
        Some(names) => names.iter().any(|n| n.eq_ignore_ascii_case(name)),
        None => true,
    }
}

fn generate_store(
    contract: &Contract,
    entity: &str,
    ops: &[&Operation],
    language: TargetLanguage,
    naming: NamingConvention,
) -> GeneratedFile {
    let has_list = contract.has_list_operation(entity);
    let list_op = ops.iter().find(|op| op.kind == OperationKind::List);
    let store_id = snake_case(entity);
    let store_fn = camel_case(&format!("use_{}_store", store_id));

    // Request bodies may reference other schemas (input payload types), so
    // the import set is wider than the entity itself.
    let mut imports: BTreeSet<&str> = BTreeSet::new();
    imports.insert(entity);
    for op in ops {
        if let Some(body) = &op.request_body {
            imports.insert(body.as_str());
        }
    }

    let mut w = CodeWriter::new();
    ts_header(&mut w);
    w.line("import { defineStore } from \"pinia\";");
    w.line("import { api, ApiError } from \"./client\";");
    w.line(format!(
        "import type {{ {} }} from \"./types\";",
        imports.into_iter().collect::<Vec<_>>().join(", ")
    ));
    w.blank();

    w.open(format!(
        "export const {store_fn} = defineStore(\"{store_id}\", {{"
    ));

    w.open("state: () => ({");
    if has_list {
        w.line(format!("items: [] as {entity}[],"));
    }
    w.line(format!("current: null as {entity} | null,"));
    w.line("loading: false,");
    w.line("error: null as ApiError | null,");
    if has_list {
        // Pagination cursor state; wired into the list call when the
        // operation declares matching query params.
        w.line("limit: 20,");
        w.line("offset: 0,");
    }
    w.close("}),");

    w.blank();
    w.open("actions: {");
    let mut first = true;
    for op in ops {
        if op.kind == OperationKind::Custom {
            continue;
        }
        if !first {
            w.blank();
        }
        first = false;
        emit_action(&mut w, op, list_op.copied(), naming);
    }
    w.close("},");

    w.close("});");

    GeneratedFile::new(
        format!("store.{store_id}.{}", language.extension()),
        w.finish(),
    )
}

fn emit_action(
    w: &mut CodeWriter,
    op: &Operation,
    list_op: Option<&Operation>,
    naming: NamingConvention,
) {
    let name = naming.apply(&op.name);
    let params = match op.kind {
        // List actions read pagination from store state; any other query
        // params still arrive through the options argument.
        OperationKind::List if has_extra_query(op) => {
            query_options_param(op).unwrap_or_default()
        }
        OperationKind::List => String::new(),
        _ => signature_params(op, naming),
    };
    w.open(format!("async {name}({params}) {{"));
    w.line("this.loading = true;");
    w.line("this.error = null;");
    w.open("try {");
    match op.kind {
        OperationKind::List => {
            let call = list_call(op, naming);
            w.line(format!("this.items = await {call};"));
        }
        OperationKind::Get | OperationKind::Create | OperationKind::Update => {
            let call = forward_call(op, naming);
            if op.response.is_some() {
                w.line(format!("this.current = await {call};"));
            } else {
                w.line(format!("await {call};"));
            }
        }
        OperationKind::Delete => {
            w.line(format!("await {};", forward_call(op, naming)));
            w.line("this.current = null;");
        }
        OperationKind::Custom => {}
    }
    // Refresh the collection after writes when the contract has a list op
    // whose action can be called without arguments.
    if matches!(
        op.kind,
        OperationKind::Create | OperationKind::Update | OperationKind::Delete
    ) {
        if let Some(list) = list_op {
            if !list_requires_args(list) {
                w.line(format!("await this.{}();", naming.apply(&list.name)));
            }
        }
    }
    w.close("} catch (err) {");
    w.indent();
    w.line("this.error = err instanceof ApiError ? err : new ApiError(0, String(err));");
    w.line("throw this.error;");
    w.close("} finally {");
    w.indent();
    w.line("this.loading = false;");
    w.close("}");
    w.close("},");
}

/// Forward a store action to the matching client callable with the same args.
fn forward_call(op: &Operation, naming: NamingConvention) -> String {
    let name = naming.apply(&op.name);
    let mut args: Vec<String> = op
        .path_params
        .iter()
        .map(|p| naming.apply(&snake_case(&p.name)))
        .collect();
    if op.request_body.is_some() {
        args.push("payload".to_string());
    }
    if !op.query_params.is_empty() {
        args.push("options".to_string());
    }
    format!("api.{}({})", name, args.join(", "))
}

/// Query params beyond the store-managed pagination cursor.
fn has_extra_query(op: &Operation) -> bool {
    op.query_params
        .iter()
        .any(|p| !matches!(p.name.as_str(), "limit" | "offset"))
}

/// Whether the generated list action has a required parameter, which rules
/// out the implicit refresh call after writes.
fn list_requires_args(op: &Operation) -> bool {
    has_extra_query(op) && op.query_params.iter().any(|p| p.required)
}

fn list_call(op: &Operation, naming: NamingConvention) -> String {
    let name = naming.apply(&op.name);
    let mut fields = Vec::new();
    if has_extra_query(op) {
        fields.push("...options");
    }
    if op.query_params.iter().any(|p| p.name == "limit") {
        fields.push("limit: this.limit");
    }
    if op.query_params.iter().any(|p| p.name == "offset") {
        fields.push("offset: this.offset");
    }
    if fields.is_empty() {
        format!("api.{name}()")
    } else {
        format!("api.{name}({{ {} }})", fields.join(", "))
    }
}
