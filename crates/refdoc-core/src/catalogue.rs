//! Catalogue documents
//!
//! A catalogue is a TOML document with `[[protocol]]` and `[[function]]`
//! tables. Several documents may feed one registry; a function can refer to
//! a protocol declared in any of them.

use serde::{Deserialize, Serialize};

use crate::descriptor::{FunctionDescriptor, ProtocolDescriptor};
use crate::error::{CatalogueError, RegistryError};
use crate::registry::RegistryBuilder;

/// The parsed contents of one catalogue document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalogue {
    #[serde(default, rename = "protocol")]
    pub protocols: Vec<ProtocolDescriptor>,

    #[serde(default, rename = "function")]
    pub functions: Vec<FunctionDescriptor>,
}

impl Catalogue {
    /// Parse a catalogue from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid, has unknown fields, or a
    /// function name is not a C identifier.
    pub fn parse(content: &str) -> Result<Self, CatalogueError> {
        let catalogue: Self = toml::from_str(content)?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    fn validate(&self) -> Result<(), CatalogueError> {
        for fx in &self.functions {
            validate_name(&fx.name)?;
        }
        Ok(())
    }

    /// Register every protocol, then every function, in document order
    pub fn register_into(self, builder: &mut RegistryBuilder) -> Result<(), RegistryError> {
        for protocol in self.protocols {
            builder.register_protocol(protocol)?;
        }
        for fx in self.functions {
            builder.register(fx)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty() && self.functions.is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), CatalogueError> {
    let invalid = |reason| Err(CatalogueError::InvalidName(name.to_string(), reason));

    let Some(first) = name.chars().next() else {
        return invalid("name cannot be empty");
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return invalid("must start with a letter or underscore");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return invalid("must contain only letters, digits and underscores");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ProtocolKind;

    const TCP: &str = r#"
[[protocol]]
id = "tcp"
section = "TCP protocol"
type = "bytestream"
info = "TCP protocol is a reliable bytestream protocol."
example = """
    int s = tcp_connect(&addr, -1);
"""

[[function]]
name = "tcp_connect"
protocol = "tcp"
info = "creates a connection to remote TCP endpoint"
has_deadline = true
allocates_handle = true
uses_connection = true
mem = "tcp_storage"
errors = ["EINVAL"]
result = { type = "int", success = "newly created socket handle", error = "-1" }
args = [
    { name = "addr", type = "const struct ipaddr*", info = "IP address to connect to." },
]

[function.custom_errors]
ECONNREFUSED = "The target address was not listening for connections or refused the connection request."

[[function]]
name = "tcp_close"
protocol = "tcp"
info = "closes TCP connection in an orderly manner"
has_handle_argument = true
"#;

    #[test]
    fn test_parse_catalogue() {
        let catalogue = Catalogue::parse(TCP).unwrap();
        assert_eq!(catalogue.protocols.len(), 1);
        assert_eq!(catalogue.protocols[0].kind, ProtocolKind::Bytestream);

        let connect = &catalogue.functions[0];
        assert_eq!(connect.name, "tcp_connect");
        assert_eq!(connect.protocol.as_deref(), Some("tcp"));
        assert!(connect.has_deadline);
        assert_eq!(connect.mem.as_deref(), Some("tcp_storage"));
        assert_eq!(connect.result.as_ref().unwrap().ty, "int");
        assert_eq!(connect.args[0].ty.as_deref(), Some("const struct ipaddr*"));
        assert!(connect.custom_errors.contains_key("ECONNREFUSED"));

        let close = &catalogue.functions[1];
        assert!(close.has_handle_argument);
        assert!(close.result.is_none());
        assert!(close.args.is_empty());
    }

    #[test]
    fn test_register_into() {
        let mut builder = RegistryBuilder::new();
        Catalogue::parse(TCP)
            .unwrap()
            .register_into(&mut builder)
            .unwrap();
        let registry = builder.freeze().unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.protocol("tcp").is_some());
    }

    #[test]
    fn test_duplicate_across_documents() {
        let mut builder = RegistryBuilder::new();
        Catalogue::parse("[[function]]\nname = \"now\"\ninfo = \"get current time\"\n")
            .unwrap()
            .register_into(&mut builder)
            .unwrap();
        let err = Catalogue::parse("[[function]]\nname = \"now\"\ninfo = \"again\"\n")
            .unwrap()
            .register_into(&mut builder)
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("now".to_string()));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = Catalogue::parse("[[function]]\nname = \"now\"\ninfo = \"x\"\nhas_timeout = true\n");
        assert!(matches!(result, Err(CatalogueError::Parse(_))));
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "9lives", "tcp-connect"] {
            let doc = format!("[[function]]\nname = \"{name}\"\ninfo = \"x\"\n");
            assert!(
                matches!(Catalogue::parse(&doc), Err(CatalogueError::InvalidName(..))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(Catalogue::parse("").unwrap().is_empty());
    }
}
