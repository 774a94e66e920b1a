//! Command name derivation
//!
//! Command names are taken from the type path, taking the root namespace into
//! account:
//!
//! - `app::commands::UpdateHosts` becomes `update-hosts`
//! - `app::commands::package::UpdateHosts` becomes `package:update-hosts`
//! - `app::commands::package::sub::UpdateHosts` becomes `package:sub:update-hosts`

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Separator between the segments of a type path
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Separator between the segments of a command name
pub const NAME_SEPARATOR: char = ':';

/// Splits a joined name into its package prefix and the command leaf
static PACKAGE_AND_COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<package>(?:[^:]+:)*)(?P<command>.+)$").expect("name pattern is valid")
});

/// A command name split into its package segments and its leaf
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedName {
    /// Kebab-cased package segments, outermost first
    pub package: Vec<String>,

    /// Kebab-cased command leaf
    pub command: String,
}

impl DerivedName {
    /// Derive a name from a type path
    ///
    /// The first `prefix_depth + 1` segments of the path are the root
    /// namespace and are dropped. The caller must pass a path that keeps at
    /// least one segment after that.
    pub fn from_type_name(type_name: &str, prefix_depth: usize) -> Self {
        let joined = type_name
            .trim_start_matches(NAMESPACE_SEPARATOR)
            .split(NAMESPACE_SEPARATOR)
            .skip(prefix_depth + 1)
            .collect::<Vec<_>>()
            .join(&NAME_SEPARATOR.to_string());

        match PACKAGE_AND_COMMAND.captures(&joined) {
            Some(caps) => DerivedName {
                package: caps["package"]
                    .split(NAME_SEPARATOR)
                    .filter(|segment| !segment.is_empty())
                    .map(to_kebab_case)
                    .collect(),
                command: to_kebab_case(&caps["command"]),
            },
            None => DerivedName {
                package: Vec::new(),
                command: String::new(),
            },
        }
    }

    /// Whether the command sits inside a package
    pub fn is_packaged(&self) -> bool {
        !self.package.is_empty()
    }
}

impl fmt::Display for DerivedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.package {
            write!(f, "{}{}", segment, NAME_SEPARATOR)?;
        }
        f.write_str(&self.command)
    }
}

/// Number of separators in a root namespace
///
/// `app` has depth 0 and `app::commands` has depth 1.
pub fn prefix_depth(namespace: &str) -> usize {
    namespace
        .trim_matches(':')
        .matches(NAMESPACE_SEPARATOR)
        .count()
}

/// Derive the command name for a type path
pub fn derive_name(type_name: &str, prefix_depth: usize) -> String {
    DerivedName::from_type_name(type_name, prefix_depth).to_string()
}

/// Convert a PascalCase, camelCase or snake_case segment to kebab-case
///
/// A run of capitals stays one word, so `HTTPServer` becomes `http-server`.
pub fn to_kebab_case(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut out = String::with_capacity(segment.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            push_dash(&mut out);
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                push_dash(&mut out);
            }
        }

        out.extend(c.to_lowercase());
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn push_dash(out: &mut String) {
    if !out.is_empty() && !out.ends_with('-') {
        out.push('-');
    }
}
