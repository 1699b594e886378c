//! Declarative descriptors of documented functions and protocols

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Suffix appended to the name of the storage-supplying variant of a function
pub const MEM_SUFFIX: &str = "_mem";

/// Description of one documented function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionDescriptor {
    /// Function name, unique across the registry
    pub name: String,

    /// Section the function is listed under
    #[serde(default)]
    pub section: Option<String>,

    /// Short description used on the NAME line
    pub info: String,

    /// Return value; `None` for functions returning `void`
    #[serde(default)]
    pub result: Option<ResultInfo>,

    /// Declared arguments, in call order
    #[serde(default)]
    pub args: Vec<Argument>,

    /// Text rendered before the argument list
    #[serde(default)]
    pub prologue: Option<String>,

    /// Text rendered after the argument list
    #[serde(default)]
    pub epilogue: Option<String>,

    /// Id of the protocol this function belongs to
    #[serde(default)]
    pub protocol: Option<String>,

    /// Declarations inserted into the synopsis before the signature
    #[serde(default)]
    pub add_to_synopsis: Option<String>,

    /// Text rendered after the error list
    #[serde(default)]
    pub add_to_errors: Option<String>,

    /// Takes a linked list of I/O buffers
    #[serde(default, rename = "has_iol")]
    pub has_io_list: bool,

    /// Takes a trailing deadline
    #[serde(default)]
    pub has_deadline: bool,

    /// At least one argument is a handle
    #[serde(default)]
    pub has_handle_argument: bool,

    /// Allocates at least one handle
    #[serde(default)]
    pub allocates_handle: bool,

    /// Operates on a connection that may break
    #[serde(default)]
    pub uses_connection: bool,

    /// Declared in the implementation header rather than the public one
    #[serde(default, rename = "is_in_libdillimpl")]
    pub in_implementation_header: bool,

    /// The API may still change
    #[serde(default)]
    pub experimental: bool,

    /// Storage struct name; when set, a `_mem` page is generated as well
    #[serde(default)]
    pub mem: Option<String>,

    /// Error codes described by the standard error table
    #[serde(default)]
    pub errors: Vec<String>,

    /// Error descriptions that take precedence over the standard ones
    #[serde(default)]
    pub custom_errors: BTreeMap<String, String>,

    /// Usage example; overrides the protocol example
    #[serde(default)]
    pub example: Option<String>,
}

impl FunctionDescriptor {
    /// Create a descriptor with just a name and a short description
    pub fn new(name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            info: info.into(),
            ..Self::default()
        }
    }

    /// Name of the `_mem` variant, if the function has one
    pub fn mem_name(&self) -> Option<String> {
        self.mem
            .as_ref()
            .map(|_| format!("{}{}", self.name, MEM_SUFFIX))
    }

    /// Name of the page rendered for the given variant
    pub fn page_name(&self, variant: Variant) -> String {
        match variant {
            Variant::Plain => self.name.clone(),
            Variant::Mem => format!("{}{}", self.name, MEM_SUFFIX),
        }
    }

    /// Variants that get a page of their own
    pub fn variants(&self) -> impl Iterator<Item = Variant> {
        let mem = self.mem.is_some().then_some(Variant::Mem);
        std::iter::once(Variant::Plain).chain(mem)
    }
}

/// Which rendition of a descriptor is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// The function as declared
    Plain,
    /// The variant that stores its object in caller-supplied memory
    Mem,
}

impl Variant {
    pub fn is_mem(self) -> bool {
        self == Variant::Mem
    }
}

/// A function argument
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Argument {
    pub name: String,

    /// C type; absent for macro-like constructs taking an expression
    #[serde(default, rename = "type")]
    pub ty: Option<String>,

    /// Part of the type that goes after the name, e.g. `[2]`
    #[serde(default)]
    pub suffix: Option<String>,

    pub info: String,
}

impl Argument {
    /// Create a typed argument
    pub fn new(name: impl Into<String>, ty: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
            suffix: None,
            info: info.into(),
        }
    }

    /// Declaration as it appears inside the signature
    pub fn declaration(&self) -> String {
        let mut decl = String::new();
        if let Some(ty) = &self.ty {
            decl.push_str(ty);
            decl.push(' ');
        }
        decl.push_str(&self.name);
        if let Some(suffix) = &self.suffix {
            decl.push_str(suffix);
        }
        decl
    }
}

/// Return value of a function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultInfo {
    #[serde(rename = "type")]
    pub ty: String,

    /// What is returned on success
    #[serde(default)]
    pub success: Option<String>,

    /// What is returned on failure
    #[serde(default)]
    pub error: Option<String>,

    /// Additional remarks on the return value
    #[serde(default)]
    pub info: Option<String>,
}

/// A network protocol that functions can be attached to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolDescriptor {
    /// Key that function descriptors refer to
    pub id: String,

    /// Section the protocol's functions are listed under
    pub section: String,

    #[serde(rename = "type")]
    pub kind: ProtocolKind,

    /// Description rendered at the top of every function page
    pub info: String,

    /// Default example for the protocol's functions
    #[serde(default)]
    pub example: Option<String>,

    #[serde(default)]
    pub experimental: bool,
}

/// Kind of socket a protocol produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    Bytestream,
    Message,
    Application,
}

impl ProtocolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Bytestream => "bytestream",
            ProtocolKind::Message => "message",
            ProtocolKind::Application => "application",
        }
    }
}

impl std::fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
