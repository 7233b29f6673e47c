//! Type tag resolution.
//!
//! A type tag is the textual identifier embedded in every serialized blob.
//! It is derived from a [`TypeDescriptor`]:
//!
//! 1. Build the canonical name: module path (with `::` rendered as `.`),
//!    enclosing type names, then the simple name, joined by `.`.
//! 2. Double every literal `_`.
//! 3. For a nested type, replace the one `.` between the immediately
//!    enclosing type and the nested simple name with `_-`.
//!
//! Escaping always runs before the nesting substitution, so a reader that
//! splits tags can tell an escaped underscore from the nesting marker.

use crate::config::TagConfig;
use std::fmt;

/// Identity of a configuration type, as far as tagging is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    module: String,
    enclosing: Vec<String>,
    name: String,
}

impl TypeDescriptor {
    /// Describe a top-level type declared in `module` (a `module_path!()`-style path).
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains a path separator, or if `module`
    /// has an empty or dotted segment.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::nested(module, &[], name)
    }

    /// Describe a type nested inside `enclosing` (outermost first).
    ///
    /// # Panics
    ///
    /// Panics if `name` or any enclosing segment is empty or contains a path
    /// separator, or if `module` has an empty or dotted segment.
    pub fn nested(module: impl Into<String>, enclosing: &[&str], name: impl Into<String>) -> Self {
        let module = module.into();
        let name = name.into();
        let enclosing: Vec<String> = enclosing.iter().map(|s| s.to_string()).collect();

        assert!(is_valid_module(&module), "invalid module path: {:?}", module);
        assert!(is_valid_segment(&name), "invalid type name: {:?}", name);
        for segment in &enclosing {
            assert!(
                is_valid_segment(segment),
                "invalid enclosing type name: {:?}",
                segment
            );
        }

        Self {
            module,
            enclosing,
            name,
        }
    }

    /// Parse a `std::any::type_name` style path such as `my_crate::settings::Config`.
    ///
    /// Returns `None` for generic or otherwise non-path names.
    pub fn from_type_name(path: &str) -> Option<Self> {
        if path.is_empty() || path.contains(['<', '>', '[', ']', '(', ')', '&', ' ', ',', ';']) {
            return None;
        }

        let (module, name) = match path.rsplit_once(TagConfig::MODULE_SEPARATOR) {
            Some((module, name)) => (module, name),
            None => ("", path),
        };

        if !is_valid_segment(name) {
            return None;
        }
        if !is_valid_module(module) {
            return None;
        }

        Some(Self {
            module: module.to_string(),
            enclosing: Vec::new(),
            name: name.to_string(),
        })
    }

    /// Describe `T` from its compiler-provided type name.
    ///
    /// Generic arguments are erased, so `Wrapper<u32>` and `Wrapper<String>`
    /// share the tag of `Wrapper`.
    ///
    /// # Panics
    ///
    /// Panics for types with no path at all, such as tuples or slices.
    pub fn of_type<T: ?Sized>() -> Self {
        let path = erase_generics(std::any::type_name::<T>());
        Self::from_type_name(path)
            .unwrap_or_else(|| panic!("type {} has no taggable path; override its descriptor", path))
    }

    /// The type's simple name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaring module path.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Enclosing type names, outermost first.
    pub fn enclosing(&self) -> &[String] {
        &self.enclosing
    }

    /// Whether the type is declared inside another type.
    pub fn is_nested(&self) -> bool {
        !self.enclosing.is_empty()
    }

    /// Dotted, unescaped canonical name.
    pub fn canonical_name(&self) -> String {
        let mut segments: Vec<&str> = Vec::with_capacity(self.enclosing.len() + 4);
        if !self.module.is_empty() {
            segments.extend(self.module.split(TagConfig::MODULE_SEPARATOR));
        }
        segments.extend(self.enclosing.iter().map(String::as_str));
        segments.push(&self.name);

        let mut canonical = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                canonical.push(TagConfig::PATH_SEPARATOR);
            }
            canonical.push_str(segment);
        }
        canonical
    }

    /// Tag derived from this descriptor.
    pub fn tag(&self) -> String {
        type_tag(self)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Compute the canonical tag for a descriptor.
pub fn type_tag(descriptor: &TypeDescriptor) -> String {
    let mut tag = descriptor
        .canonical_name()
        .replace(TagConfig::UNDERSCORE, TagConfig::ESCAPED_UNDERSCORE);

    if descriptor.is_nested() {
        // Only the boundary right before the simple name is marked.
        if let Some(idx) = tag.rfind(TagConfig::PATH_SEPARATOR) {
            tag.replace_range(idx..idx + 1, TagConfig::NESTED_SEPARATOR);
        }
    }

    tag
}

/// Strip generic arguments: `a::Wrapper<b::C>` becomes `a::Wrapper`.
fn erase_generics(path: &str) -> &str {
    match path.find('<') {
        Some(idx) => &path[..idx],
        None => path,
    }
}

fn is_valid_module(module: &str) -> bool {
    module.is_empty()
        || module
            .split(TagConfig::MODULE_SEPARATOR)
            .all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.contains(TagConfig::PATH_SEPARATOR)
        && !segment.contains(':')
}
