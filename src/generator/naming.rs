//! Case transforms and resource-name inflection for generated identifiers.

/// How generated identifiers are cased in the target code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingConvention {
    #[default]
    Camel,
    Snake,
}

impl NamingConvention {
    /// Join a canonical snake_case name per this convention.
    pub fn apply(&self, snake: &str) -> String {
        match self {
            NamingConvention::Camel => camel_case(snake),
            NamingConvention::Snake => snake.to_string(),
        }
    }
}

/// Split an identifier into lowercase words on `_`, `-`, `/`, `.` and
/// case boundaries.
pub fn split_words(name: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == '/' || ch == '.' {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            current.push(ch.to_ascii_lowercase());
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn pascal_case(name: &str) -> String {
    split_words(name)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn camel_case(name: &str) -> String {
    let mut words = split_words(name).into_iter();
    let first = words.next().unwrap_or_default();
    let mut out = first;
    for w in words {
        let mut chars = w.chars();
        if let Some(c) = chars.next() {
            out.push(c.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

pub fn snake_case(name: &str) -> String {
    split_words(name).join("_")
}

/// Singular form of a resource word: `orders` → `order`, `categories` →
/// `category`. Words ending in `ss` are left alone.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if word.ends_with("ss") || !word.ends_with('s') {
        return word.to_string();
    }
    word[..word.len() - 1].to_string()
}

/// Canonical snake_case callable name for `(verb, resource)`, singularizing
/// the resource unless `plural` is set (list operations keep the collection
/// name).
pub fn callable_name(verb: &str, resource: &str, plural: bool) -> String {
    let mut words = vec![verb.to_string()];
    let resource_words = split_words(resource);
    let count = resource_words.len();
    for (i, w) in resource_words.into_iter().enumerate() {
        if i + 1 == count && !plural {
            words.push(singularize(&w));
        } else {
            words.push(w);
        }
    }
    words.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_splitting() {
        assert_eq!(split_words("work-orders"), vec!["work", "orders"]);
        assert_eq!(split_words("WorkOrder"), vec!["work", "order"]);
        assert_eq!(split_words("user_id"), vec!["user", "id"]);
    }

    #[test]
    fn case_transforms() {
        assert_eq!(pascal_case("work-orders"), "WorkOrders");
        assert_eq!(camel_case("get_work_order"), "getWorkOrder");
        assert_eq!(snake_case("WorkOrder"), "work_order");
    }

    #[test]
    fn singular_forms() {
        assert_eq!(singularize("orders"), "order");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("status"), "statu"); // naive, but deterministic
    }

    #[test]
    fn callable_names() {
        assert_eq!(callable_name("get", "work-orders", false), "get_work_order");
        assert_eq!(callable_name("list", "products", true), "list_products");
        assert_eq!(callable_name("create", "products", false), "create_product");
        assert_eq!(
            NamingConvention::Camel.apply(&callable_name("get", "work-orders", false)),
            "getWorkOrder"
        );
    }
}
