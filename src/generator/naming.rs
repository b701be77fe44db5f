use crate::config::Configuration;
use convert_case::{Case, Casing};
use std::path::PathBuf;

/// Convert to `snake_case`. Used for file names, method names and Ruby keyword arguments.
pub fn snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

/// Convert to `PascalCase`. Used for class names.
pub fn pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

/// Rails-style `underscore`.
///
/// Unlike [`snake_case`] this never splits letters from digits, so version
/// segments survive intact: `AdminV2` → `admin_v2`, `HTTPServer` → `http_server`.
pub fn underscore(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '-' | '_' | ' ' | '.') {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out.trim_end_matches('_').to_string()
}

/// Directory segments for a `::`-separated class prefix.
///
/// Segments of at most two characters are lower-cased verbatim (`V1` → `v1`);
/// longer ones go through [`underscore`] (`API` → `api`, `AdminV2` → `admin_v2`).
pub fn prefix_segments(prefix: &str) -> Vec<String> {
    prefix
        .split("::")
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.chars().count() <= 2 {
                segment.to_lowercase()
            } else {
                underscore(segment)
            }
        })
        .collect()
}

/// `Prefix::Name`, or just `Name` when the prefix is blank.
pub fn qualified_class_name(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim().trim_end_matches("::");
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}::{name}")
    }
}

/// Rails route syntax for an OpenAPI path template: `/users/{id}` → `/users/:id`.
pub fn rails_route_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        if c == '{' {
            out.push(':');
            for n in chars.by_ref() {
                if n == '}' {
                    break;
                }
                out.push(n);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn is_ruby_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn quoted(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for c in name.chars() {
        if matches!(c, '"' | '\\' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Ruby symbol literal for a wire name: `:page` or `:"page-size"`.
pub fn ruby_symbol(name: &str) -> String {
    if is_ruby_identifier(name) {
        format!(":{name}")
    } else {
        format!(":{}", quoted(name))
    }
}

/// Ruby hash key in `key: value` form: `tags:` or `"display-name":`.
pub fn ruby_hash_key(name: &str) -> String {
    if is_ruby_identifier(name) {
        format!("{name}:")
    } else {
        format!("{}:", quoted(name))
    }
}

/// Local variable / keyword argument name for a wire name.
///
/// [`snake_case`] first, then every character Ruby rejects becomes `_`:
/// `pageSize` → `page_size`, `filter.name` → `filter_name`. A leading digit
/// gains a `_` prefix.
pub fn ruby_argument(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    for c in snake_case(name).chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let out = out.trim_matches('_').to_string();
    match out.chars().next() {
        None => "value".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{out}"),
        Some(_) => out,
    }
}

/// Where each kind of artifact is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectories {
    pub package_dir: PathBuf,
    pub controller_dir: PathBuf,
    pub service_dir: PathBuf,
    pub routes_dir: PathBuf,
}

/// Resolve artifact directories for a configuration.
///
/// ```text
/// <directory>/<snake(package)>/<controller-directory>/<controller prefix segments>
/// <directory>/<snake(package)>/<service-directory>/<service prefix segments>
/// <directory>/<snake(package)>/<routes-directory>
/// ```
pub fn resolve_output_directories(config: &Configuration) -> OutputDirectories {
    let options = &config.output_options;
    let package_dir = config.working_directory.join(snake_case(&config.package_name));

    let nested = |base: &str, prefix: &str| {
        let mut dir = package_dir.clone();
        if !base.is_empty() {
            dir.push(base);
        }
        for segment in prefix_segments(prefix) {
            dir.push(segment);
        }
        dir
    };

    OutputDirectories {
        controller_dir: nested(&options.controller_directory, &options.controller_prefix),
        service_dir: nested(&options.service_directory, &options.service_prefix),
        routes_dir: nested(&options.routes_directory, ""),
        package_dir,
    }
}
