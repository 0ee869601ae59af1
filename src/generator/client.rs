//! `client.ts` emission: one typed callable per contract operation.

use super::emit::{ts_header, CodeWriter, GeneratedFile};
use super::naming::NamingConvention;
use crate::contract::{Contract, Operation, ParamSpec};
use crate::typemap::{TargetLanguage, TypeMapper};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap()
});

pub fn generate_client(
    contract: &Contract,
    language: TargetLanguage,
    naming: NamingConvention,
) -> GeneratedFile {
    let mut w = CodeWriter::new();
    ts_header(&mut w);

    let referenced = referenced_schemas(contract);
    if !referenced.is_empty() {
        w.line(format!(
            "import type {{ {} }} from \"./types\";",
            referenced.into_iter().collect::<Vec<_>>().join(", ")
        ));
        w.blank();
    }

    emit_api_error(&mut w);
    w.blank();
    emit_request_plumbing(&mut w);
    w.blank();

    w.open("export class ApiClient {");
    w.open("constructor(");
    w.line("private baseUrl: string = \"\",");
    w.line("private getToken: () => string | null = () => null,");
    w.close(") {}");
    w.blank();
    emit_request_method(&mut w);

    let mut current_tag = String::new();
    for op in &contract.operations {
        if op.tag != current_tag {
            current_tag = op.tag.clone();
            w.blank();
            w.line(format!("// --- {} ---", current_tag));
        }
        w.blank();
        emit_operation(&mut w, op, naming);
    }

    w.close("}");
    w.blank();
    w.line("export const api = new ApiClient();");

    GeneratedFile::new(format!("client.{}", language.extension()), w.finish())
}

fn referenced_schemas(contract: &Contract) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for op in &contract.operations {
        if let Some(body) = &op.request_body {
            out.insert(body.clone());
        }
        if let Some(response) = &op.response {
            out.insert(response.schema.clone());
        }
    }
    out
}

fn emit_api_error(w: &mut CodeWriter) {
    w.line("/** Typed failure raised for transport errors and non-2xx responses. */");
    w.open("export class ApiError extends Error {");
    w.open("constructor(");
    w.line("public status: number,");
    w.line("message: string,");
    w.line("public body?: unknown,");
    w.close(") {");
    w.indent();
    w.line("super(message);");
    w.line("this.name = \"ApiError\";");
    w.close("}");
    w.close("}");
}

fn emit_request_plumbing(w: &mut CodeWriter) {
    w.open("interface RequestOptions {");
    w.line("query?: Record<string, unknown>;");
    w.line("body?: unknown;");
    w.line("auth?: boolean;");
    w.close("}");
}

fn emit_request_method(w: &mut CodeWriter) {
    w.open("private async request<T>(method: string, path: string, opts: RequestOptions = {}): Promise<T> {");
    w.line("let url = this.baseUrl + path;");
    w.open("if (opts.query) {");
    w.line("const search = new URLSearchParams();");
    w.open("for (const [key, value] of Object.entries(opts.query)) {");
    w.line("if (value !== undefined && value !== null) search.set(key, String(value));");
    w.close("}");
    w.line("const qs = search.toString();");
    w.line("if (qs) url += `?${qs}`;");
    w.close("}");
    w.line("const headers: Record<string, string> = { \"Content-Type\": \"application/json\" };");
    w.open("if (opts.auth) {");
    w.line("const token = this.getToken();");
    w.line("if (token) headers[\"Authorization\"] = `Bearer ${token}`;");
    w.close("}");
    w.line("let response: Response;");
    w.open("try {");
    w.open("response = await fetch(url, {");
    w.line("method,");
    w.line("headers,");
    w.line("body: opts.body === undefined ? undefined : JSON.stringify(opts.body),");
    w.close("});");
    w.close("} catch (err) {");
    w.indent();
    w.line("throw new ApiError(0, `network error: ${String(err)}`);");
    w.close("}");
    w.open("if (!response.ok) {");
    w.line("const body = await response.json().catch(() => undefined);");
    w.line("throw new ApiError(response.status, `${method} ${path} failed with ${response.status}`, body);");
    w.close("}");
    w.line("if (response.status === 204) return undefined as T;");
    w.line("return (await response.json()) as T;");
    w.close("}");
}

fn emit_operation(w: &mut CodeWriter, op: &Operation, naming: NamingConvention) {
    w.line(format!("/** {} {} */", op.method, op.path));
    let name = naming.apply(&op.name);
    let params = signature_params(op, naming);
    let ret = response_type(op);
    w.open(format!(
        "async {name}({params}): Promise<{ret}> {{",
    ));
    w.line(format!("return this.request(\"{}\", {}, {});", op.method, path_expr(op, naming), request_opts(op)));
    w.close("}");
}

/// Positional path args in path-declaration order, then the body payload,
/// then one optional trailing query options object.
pub(super) fn signature_params(op: &Operation, naming: NamingConvention) -> String {
    let mut parts: Vec<String> = op
        .path_params
        .iter()
        .map(|p| format!("{}: {}", naming.apply(&super::naming::snake_case(&p.name)), scalar_ts(p)))
        .collect();
    if let Some(body) = &op.request_body {
        parts.push(format!("payload: {body}"));
    }
    if let Some(options) = query_options_param(op) {
        parts.push(options);
    }
    parts.join(", ")
}

/// The trailing query options parameter, when the operation has query
/// params. Optional (`?`) unless any query param is required.
pub(super) fn query_options_param(op: &Operation) -> Option<String> {
    if op.query_params.is_empty() {
        return None;
    }
    let any_required = op.query_params.iter().any(|p| p.required);
    let fields = op
        .query_params
        .iter()
        .map(|p| {
            let opt = if p.required { "" } else { "?" };
            format!("{}{}: {}", p.name, opt, scalar_ts(p))
        })
        .collect::<Vec<_>>()
        .join("; ");
    let opt = if any_required { "" } else { "?" };
    Some(format!("options{opt}: {{ {fields} }}"))
}

pub(super) fn scalar_ts(p: &ParamSpec) -> &'static str {
    TypeMapper::target_for_contract(p.contract, TargetLanguage::TypeScript)
}

pub(super) fn response_type(op: &Operation) -> String {
    match &op.response {
        Some(r) if r.many => format!("{}[]", r.schema),
        Some(r) => r.schema.clone(),
        None => "void".to_string(),
    }
}

/// Path template as a TS template literal with placeholders interpolated.
pub(super) fn path_expr(op: &Operation, naming: NamingConvention) -> String {
    let replaced = PLACEHOLDER_RE.replace_all(&op.path, |caps: &regex::Captures<'_>| {
        format!("${{{}}}", naming.apply(&super::naming::snake_case(&caps[1])))
    });
    if replaced.contains("${") {
        format!("`{replaced}`")
    } else {
        format!("\"{replaced}\"")
    }
}

fn request_opts(op: &Operation) -> String {
    let mut parts = Vec::new();
    if !op.query_params.is_empty() {
        parts.push("query: options".to_string());
    }
    if op.request_body.is_some() {
        parts.push("body: payload".to_string());
    }
    if op.requires_auth {
        parts.push("auth: true".to_string());
    }
    if parts.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", parts.join(", "))
    }
}
