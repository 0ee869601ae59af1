//! Vue scaffold emission: list/detail/form components bound one-to-one to a
//! generated store.
//!
//! Scaffolds are starting points, not finished UI: plain markup, no styling,
//! no business logic. An entity without a store gets no components; that is
//! a skip, not an error.

use super::emit::{CodeWriter, GeneratedFile};
use super::naming::{camel_case, pascal_case, snake_case, NamingConvention};
use super::store::in_scope;
use crate::contract::{Contract, Operation, OperationKind, SchemaType};

pub fn generate_components(
    contract: &Contract,
    naming: NamingConvention,
    scope: Option<&[String]>,
) -> Vec<GeneratedFile> {
    let mut files = Vec::new();
    for schema in contract.schemas.values() {
        if !in_scope(scope, &schema.name) {
            continue;
        }
        let ops = contract.operations_for(&schema.name);
        if ops.is_empty() {
            // No store was generated for this entity, so nothing to bind to.
            continue;
        }
        let find = |kind: OperationKind| ops.iter().find(|op| op.kind == kind).copied();
        if let Some(list) = find(OperationKind::List) {
            files.push(list_component(schema, list, naming));
        }
        if let Some(get) = find(OperationKind::Get) {
            files.push(detail_component(schema, get, naming));
        }
        let create = find(OperationKind::Create);
        let update = find(OperationKind::Update);
        if create.is_some() || update.is_some() {
            files.push(form_component(schema, create, update, naming));
        }
    }
    files
}

fn store_binding(w: &mut CodeWriter, entity: &str) {
    let store_fn = camel_case(&format!("use_{}_store", snake_case(entity)));
    w.line(format!(
        "import {{ {store_fn} }} from \"./store.{}\";",
        snake_case(entity)
    ));
    w.blank();
    w.line(format!("const store = {store_fn}();"));
}

fn vue_header(w: &mut CodeWriter) {
    w.line("<!-- Generated by frontsync. Scaffold only; replace markup as needed. -->");
}

fn list_component(
    schema: &SchemaType,
    list: &Operation,
    naming: NamingConvention,
) -> GeneratedFile {
    let entity = &schema.name;
    let action = naming.apply(&list.name);
    let key = schema
        .fields
        .first()
        .map(|f| f.name.clone())
        .unwrap_or_else(|| "id".to_string());

    let mut w = CodeWriter::new();
    vue_header(&mut w);
    w.open("<script setup lang=\"ts\">");
    w.line("import { onMounted } from \"vue\";");
    store_binding(&mut w, entity);
    w.blank();
    w.line(format!("onMounted(() => store.{action}());"));
    w.close("</script>");
    w.blank();
    w.open("<template>");
    w.open(format!("<div class=\"{}-list\">", snake_case(entity)));
    w.line("<p v-if=\"store.loading\">Loading...</p>");
    w.line("<p v-else-if=\"store.error\">{{ store.error.message }}</p>");
    w.open("<table v-else>");
    w.open("<thead>");
    w.open("<tr>");
    for field in &schema.fields {
        w.line(format!("<th>{}</th>", field.name));
    }
    w.close("</tr>");
    w.close("</thead>");
    w.open("<tbody>");
    w.open(format!(
        "<tr v-for=\"item in store.items\" :key=\"item.{key}\">"
    ));
    for field in &schema.fields {
        w.line(format!("<td>{{{{ item.{} }}}}</td>", field.name));
    }
    w.close("</tr>");
    w.close("</tbody>");
    w.close("</table>");
    w.close("</div>");
    w.close("</template>");

    GeneratedFile::new(format!("{}List.vue", pascal_case(entity)), w.finish())
}

fn detail_component(
    schema: &SchemaType,
    get: &Operation,
    naming: NamingConvention,
) -> GeneratedFile {
    let entity = &schema.name;
    let action = naming.apply(&get.name);
    let id_param = get
        .path_params
        .first()
        .map(|p| naming.apply(&snake_case(&p.name)))
        .unwrap_or_else(|| "id".to_string());

    let mut w = CodeWriter::new();
    vue_header(&mut w);
    w.open("<script setup lang=\"ts\">");
    w.line("import { onMounted } from \"vue\";");
    store_binding(&mut w, entity);
    w.blank();
    w.line(format!(
        "const props = defineProps<{{ {id_param}: {} }}>();",
        get.path_params
            .first()
            .map(super::client::scalar_ts)
            .unwrap_or("string")
    ));
    w.blank();
    w.line(format!("onMounted(() => store.{action}(props.{id_param}));"));
    w.close("</script>");
    w.blank();
    w.open("<template>");
    w.open(format!("<div class=\"{}-detail\">", snake_case(entity)));
    w.line("<p v-if=\"store.loading\">Loading...</p>");
    w.line("<p v-else-if=\"store.error\">{{ store.error.message }}</p>");
    w.open("<dl v-else-if=\"store.current\">");
    for field in &schema.fields {
        w.line(format!("<dt>{}</dt>", field.name));
        w.line(format!("<dd>{{{{ store.current.{} }}}}</dd>", field.name));
    }
    w.close("</dl>");
    w.close("</div>");
    w.close("</template>");

    GeneratedFile::new(format!("{}Detail.vue", pascal_case(entity)), w.finish())
}

fn form_component(
    schema: &SchemaType,
    create: Option<&Operation>,
    update: Option<&Operation>,
    naming: NamingConvention,
) -> GeneratedFile {
    let entity = &schema.name;

    let mut imports: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
    imports.insert(entity.as_str());
    for op in create.iter().chain(update.iter()) {
        if let Some(body) = &op.request_body {
            imports.insert(body.as_str());
        }
    }

    let mut w = CodeWriter::new();
    vue_header(&mut w);
    w.open("<script setup lang=\"ts\">");
    w.line("import { reactive } from \"vue\";");
    w.line(format!(
        "import type {{ {} }} from \"./types\";",
        imports.into_iter().collect::<Vec<_>>().join(", ")
    ));
    store_binding(&mut w, entity);
    w.blank();
    w.line(format!(
        "const form = reactive<Partial<{entity}>>({{}});"
    ));
    w.blank();
    w.open("async function submit() {");
    // An update path is only viable when every path param resolves to a
    // schema field the form can carry.
    let update_call = update.and_then(|u| update_args(schema, u, entity).map(|args| (u, args)));
    match (create, update_call) {
        (Some(c), Some((u, args))) => {
            let guard = args.first().cloned().unwrap_or_else(|| "form.id".to_string());
            w.open(format!("if ({guard} !== undefined) {{"));
            w.line(format!(
                "await store.{}({});",
                naming.apply(&u.name),
                args.join(", ")
            ));
            w.close("} else {");
            w.indent();
            w.line(create_call(c, entity, naming));
            w.close("}");
        }
        (Some(c), None) => {
            w.line(create_call(c, entity, naming));
        }
        (None, Some((u, args))) => {
            w.line(format!(
                "await store.{}({});",
                naming.apply(&u.name),
                args.join(", ")
            ));
        }
        (None, None) => {}
    }
    w.close("}");
    w.close("</script>");
    w.blank();
    w.open("<template>");
    w.open(format!(
        "<form class=\"{}-form\" @submit.prevent=\"submit\">",
        snake_case(entity)
    ));
    for field in &schema.fields {
        w.open("<label>");
        w.line(field.name.as_str());
        w.line(input_for(field));
        w.close("</label>");
    }
    w.line("<p v-if=\"store.error\">{{ store.error.message }}</p>");
    w.line("<button type=\"submit\" :disabled=\"store.loading\">Save</button>");
    w.close("</form>");
    w.close("</template>");

    GeneratedFile::new(format!("{}Form.vue", pascal_case(entity)), w.finish())
}

/// Form field expression for a path param: the schema field with the param's
/// name, falling back to an `id` field.
fn form_field(schema: &SchemaType, name: &str) -> Option<String> {
    schema
        .field(name)
        .or_else(|| schema.field("id"))
        .map(|f| format!("form.{}", f.name))
}

/// The payload argument for a write call, present only when the operation
/// declares a request body.
fn payload_arg(entity: &str, op: &Operation) -> Option<String> {
    op.request_body.as_ref().map(|body| {
        if body == entity {
            format!("form as {body}")
        } else {
            format!("form as unknown as {body}")
        }
    })
}

/// Arguments matching the store's update action signature, or `None` when a
/// path param has no usable form field.
fn update_args(schema: &SchemaType, op: &Operation, entity: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    for p in &op.path_params {
        args.push(form_field(schema, &p.name)?);
    }
    args.extend(payload_arg(entity, op));
    Some(args)
}

fn create_call(op: &Operation, entity: &str, naming: NamingConvention) -> String {
    match payload_arg(entity, op) {
        Some(payload) => format!("await store.{}({payload});", naming.apply(&op.name)),
        None => format!("await store.{}();", naming.apply(&op.name)),
    }
}

fn input_for(field: &crate::contract::FieldSpec) -> String {
    let name = &field.name;
    if !field.constraints.enum_values.is_empty() {
        let options = field
            .constraints
            .enum_values
            .iter()
            .map(|v| format!("<option value=\"{v}\">{v}</option>"))
            .collect::<Vec<_>>()
            .join("");
        return format!("<select v-model=\"form.{name}\">{options}</select>");
    }
    match field.contract.ty {
        "integer" | "number" => format!("<input v-model.number=\"form.{name}\" type=\"number\" />"),
        "boolean" => format!("<input v-model=\"form.{name}\" type=\"checkbox\" />"),
        _ => format!("<input v-model=\"form.{name}\" type=\"text\" />"),
    }
}
