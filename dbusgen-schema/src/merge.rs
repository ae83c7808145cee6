//! Interface merging and filtering across introspection documents.
//!
//! Merging is first-definition-wins: a later interface whose name was
//! already seen is dropped whole, never combined member by member.

use crate::types::Interface;
use tracing::debug;

/// Appends the interfaces of `chunk` whose names are not yet present in
/// `accumulated`, preserving first-seen order.
///
/// # Arguments
/// * `accumulated` - Interfaces merged so far
/// * `chunk` - Interfaces of the next document
///
/// # Returns
/// The grown accumulator.
#[must_use]
pub fn merge(mut accumulated: Vec<Interface>, chunk: Vec<Interface>) -> Vec<Interface> {
    for iface in chunk {
        if accumulated.iter().any(|seen| seen.name == iface.name) {
            debug!(interface = %iface.name, "dropping duplicate interface");
            continue;
        }
        accumulated.push(iface);
    }
    accumulated
}

/// Folds a sequence of documents into one interface list.
#[must_use]
pub fn merge_all<I>(chunks: I) -> Vec<Interface>
where
    I: IntoIterator<Item = Vec<Interface>>,
{
    chunks.into_iter().fold(Vec::new(), merge)
}

/// Selects interfaces by name.
///
/// With no lists every interface passes. An include list keeps only the
/// named interfaces, an exclude list drops them. Setting both is a
/// configuration error reported by the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceFilter {
    /// Interfaces to keep.
    pub include: Vec<String>,
    /// Interfaces to drop.
    pub exclude: Vec<String>,
}

impl InterfaceFilter {
    /// A filter that keeps only the named interfaces.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: names.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    /// A filter that drops the named interfaces.
    pub fn except<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: Vec::new(),
            exclude: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if both lists are set.
    #[must_use]
    pub fn is_conflicting(&self) -> bool {
        !self.include.is_empty() && !self.exclude.is_empty()
    }

    /// Returns true if the named interface passes the filter.
    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        if !self.include.is_empty() {
            return self.include.iter().any(|n| n == name);
        }
        !self.exclude.iter().any(|n| n == name)
    }

    /// Keeps the interfaces that pass the filter, in order.
    #[must_use]
    pub fn apply(&self, interfaces: Vec<Interface>) -> Vec<Interface> {
        interfaces
            .into_iter()
            .filter(|iface| {
                let keep = self.allows(&iface.name);
                if !keep {
                    debug!(interface = %iface.name, "filtered out interface");
                }
                keep
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Method;

    fn iface(name: &str, method: &str) -> Interface {
        let mut iface = Interface::new(name);
        iface.methods.push(Method::new(method));
        iface
    }

    fn names(ifaces: &[Interface]) -> Vec<&str> {
        ifaces.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_merge_keeps_first_definition() {
        let first = vec![iface("org.bluez", "First")];
        let second = vec![iface("org.bluez", "Second")];

        let merged = merge(first, second);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].methods[0].name, "First");
    }

    #[test]
    fn test_merge_preserves_first_seen_order() {
        let merged = merge_all(vec![
            vec![iface("a.One", "M"), iface("a.Two", "M")],
            vec![iface("a.Three", "M"), iface("a.One", "Other")],
            vec![iface("a.Two", "Other"), iface("a.Four", "M")],
        ]);
        assert_eq!(names(&merged), vec!["a.One", "a.Two", "a.Three", "a.Four"]);
        assert_eq!(merged[0].methods[0].name, "M");
    }

    #[test]
    fn test_merge_all_empty() {
        assert!(merge_all(Vec::<Vec<Interface>>::new()).is_empty());
    }

    #[test]
    fn test_filter_default_allows_everything() {
        let filter = InterfaceFilter::default();
        assert!(filter.allows("anything.At.All"));
        assert!(!filter.is_conflicting());
    }

    #[test]
    fn test_filter_include() {
        let filter = InterfaceFilter::only(["a.Two"]);
        let kept = filter.apply(vec![iface("a.One", "M"), iface("a.Two", "M")]);
        assert_eq!(names(&kept), vec!["a.Two"]);
    }

    #[test]
    fn test_filter_exclude() {
        let filter = InterfaceFilter::except(["a.Two"]);
        let kept = filter.apply(vec![
            iface("a.One", "M"),
            iface("a.Two", "M"),
            iface("a.Three", "M"),
        ]);
        assert_eq!(names(&kept), vec!["a.One", "a.Three"]);
    }

    #[test]
    fn test_filter_conflict() {
        let filter = InterfaceFilter {
            include: vec!["a.One".to_string()],
            exclude: vec!["a.Two".to_string()],
        };
        assert!(filter.is_conflicting());
    }
}
