//! Identifier generation for Go bindings.
//!
//! Wire names (interface, member and argument names) are turned into Go
//! identifiers that are never reserved words and never start with a digit.
//!
//! | Input | Style | Export | Output |
//! |-------|-------|--------|--------|
//! | `my_varName` | Camel | no | `myVarName` |
//! | `camel_case_name` | Underscore | yes | `Camel_Case_Name` |
//! | `org.freedesktop.DBus` | Camel | yes | `OrgFreedesktopDBus` |
//! | `interface` | any | no | `varInterface` (prefix `var`) |
//! | empty | any | no | `in3` (prefix `in`, index 3) |

/// How separator runs in wire names are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameStyle {
    /// Title-cased segments joined with a single `_`.
    #[default]
    Underscore,
    /// Title-cased segments joined without a separator.
    Camel,
}

/// Words a generated identifier must never be equal to.
pub trait ReservedWords {
    /// Returns true if `word` cannot be used as an identifier.
    fn is_reserved(&self, word: &str) -> bool;
}

/// The 25 Go keywords.
pub const GO_KEYWORDS: [&str; 25] = [
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Go keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoKeywords;

impl ReservedWords for GoKeywords {
    fn is_reserved(&self, word: &str) -> bool {
        GO_KEYWORDS.contains(&word)
    }
}

/// Names already bound inside generated function bodies: the receiver,
/// the context and error parameters, and the imported package names.
const GO_LOCALS: [&str; 8] = [
    "ctx",
    "err",
    "o",
    "context",
    "dbus",
    "errors",
    "fmt",
    "introspect",
];

/// Go keywords plus the locals of generated functions. Used for argument
/// and parameter names.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoLocals;

impl ReservedWords for GoLocals {
    fn is_reserved(&self, word: &str) -> bool {
        GoKeywords.is_reserved(word) || GO_LOCALS.contains(&word)
    }
}

/// Converts wire names into identifiers.
#[derive(Debug, Clone, Default)]
pub struct Namer<R = GoKeywords> {
    style: NameStyle,
    reserved: R,
}

impl<R: ReservedWords> Namer<R> {
    /// Creates a namer with the given style and reserved word set.
    #[must_use]
    pub const fn new(style: NameStyle, reserved: R) -> Self {
        Self { style, reserved }
    }

    /// Returns the configured style.
    #[must_use]
    pub const fn style(&self) -> NameStyle {
        self.style
    }

    /// Converts a wire name into an identifier.
    ///
    /// # Arguments
    /// * `raw` - Wire name, possibly empty
    /// * `index` - Position used for the fallback name
    /// * `prefix` - Fallback prefix for empty names, reserved words and
    ///   names starting with a digit; must start with a letter
    /// * `export` - Upper-case the first character
    #[must_use]
    pub fn ident(&self, raw: &str, index: usize, prefix: &str, export: bool) -> String {
        let is_separator = |c: char| !c.is_ascii_alphanumeric();
        let segments: Vec<&str> = raw.split(is_separator).filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            let name = format!("{prefix}{index}");
            return if export { capitalize(&name) } else { name };
        }

        // Separators at either edge are not followed by a segment and stay
        // as underscores.
        let leading = raw.chars().take_while(|&c| is_separator(c)).count();
        let trailing = raw.chars().rev().take_while(|&c| is_separator(c)).count();

        let joiner = match self.style {
            NameStyle::Camel => "",
            NameStyle::Underscore => "_",
        };
        let mut name = "_".repeat(leading);
        for (i, segment) in segments.iter().enumerate() {
            if i == 0 {
                name.push_str(segment);
            } else {
                name.push_str(joiner);
                name.push_str(&capitalize(segment));
            }
        }
        name.push_str(&"_".repeat(trailing));

        let name = if export {
            capitalize(&name)
        } else {
            decapitalize(&name)
        };

        let leading_digit = name.starts_with(|c: char| c.is_ascii_digit());
        if leading_digit || self.reserved.is_reserved(&name) {
            return format!("{prefix}{}", capitalize(&name));
        }
        name
    }

    /// Converts an interface name into an exported type name.
    ///
    /// The first prefix that matches on a dot boundary is stripped first.
    /// A prefix equal to the whole name is ignored.
    #[must_use]
    pub fn iface_type(&self, name: &str, prefixes: &[String]) -> String {
        let stripped = prefixes
            .iter()
            .find_map(|prefix| strip_prefix(name, prefix))
            .unwrap_or(name);
        self.ident(stripped, 0, "Iface", true)
    }
}

fn strip_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
    if prefix.is_empty() {
        return None;
    }
    name.strip_prefix(prefix)?
        .strip_prefix('.')
        .filter(|rest| !rest.is_empty())
}

/// Upper-cases the first character.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
