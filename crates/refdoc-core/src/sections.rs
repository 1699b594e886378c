//! Section classification
//!
//! Groups page names by section. The resulting map drives both the table of
//! contents and the "see also" block of every page.

use std::collections::BTreeMap;

use tracing::debug;

use crate::descriptor::FunctionDescriptor;
use crate::registry::Registry;

/// Section of functions that declare neither a section nor a protocol
pub const UNCLASSIFIED: &str = "Unclassified";

/// Section a function belongs to: its own section, else its protocol's
/// section, else [`UNCLASSIFIED`]
pub fn effective_section<'a>(registry: &'a Registry, fx: &'a FunctionDescriptor) -> &'a str {
    if let Some(section) = &fx.section {
        return section;
    }
    registry
        .protocol_of(fx)
        .map_or(UNCLASSIFIED, |p| p.section.as_str())
}

/// Page names per section, each list sorted alphabetically
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: BTreeMap<String, Vec<String>>,
}

impl SectionMap {
    /// Classify every registered function.
    ///
    /// A function with a `_mem` variant contributes both names to its
    /// section.
    pub fn classify(registry: &Registry) -> Self {
        let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for fx in registry.functions() {
            let members = sections
                .entry(effective_section(registry, fx).to_string())
                .or_default();
            members.push(fx.name.clone());
            if let Some(mem_name) = fx.mem_name() {
                members.push(mem_name);
            }
        }

        for members in sections.values_mut() {
            members.sort();
        }

        debug!(sections = sections.len(), "classified functions");
        Self { sections }
    }

    /// Members of a section, sorted; `None` if nothing was classified there
    pub fn members(&self, section: &str) -> Option<&[String]> {
        self.sections.get(section).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ProtocolDescriptor, ProtocolKind};
    use crate::registry::RegistryBuilder;

    fn registry() -> Registry {
        let mut builder = RegistryBuilder::new();

        let mut msleep = FunctionDescriptor::new("msleep", "waits until deadline expires");
        msleep.section = Some("Deadlines".to_string());
        builder.register(msleep).unwrap();

        let mut now = FunctionDescriptor::new("now", "get current time");
        now.section = Some("Deadlines".to_string());
        builder.register(now).unwrap();

        let mut connect = FunctionDescriptor::new("tcp_connect", "connects");
        connect.protocol = Some("tcp".to_string());
        connect.mem = Some("tcp_storage".to_string());
        builder.register(connect).unwrap();

        let mut close = FunctionDescriptor::new("tcp_close", "closes");
        close.protocol = Some("tcp".to_string());
        close.section = Some("Handles".to_string());
        builder.register(close).unwrap();

        builder
            .register(FunctionDescriptor::new("orphan", "no home"))
            .unwrap();

        builder
            .register_protocol(ProtocolDescriptor {
                id: "tcp".to_string(),
                section: "TCP protocol".to_string(),
                kind: ProtocolKind::Bytestream,
                info: String::new(),
                example: None,
                experimental: false,
            })
            .unwrap();

        builder.freeze().unwrap()
    }

    #[test]
    fn test_effective_section_precedence() {
        let registry = registry();
        let section = |name: &str| effective_section(&registry, registry.get(name).unwrap()).to_string();
        assert_eq!(section("msleep"), "Deadlines");
        assert_eq!(section("tcp_connect"), "TCP protocol");
        assert_eq!(section("tcp_close"), "Handles");
        assert_eq!(section("orphan"), UNCLASSIFIED);
    }

    #[test]
    fn test_members_sorted_with_mem_names() {
        let sections = SectionMap::classify(&registry());
        assert_eq!(sections.members("Deadlines").unwrap(), ["msleep", "now"]);
        assert_eq!(
            sections.members("TCP protocol").unwrap(),
            ["tcp_connect", "tcp_connect_mem"]
        );
        assert_eq!(sections.members("Unclassified").unwrap(), ["orphan"]);
        assert!(sections.members("Channels").is_none());
        assert_eq!(sections.len(), 4);
    }
}
