//! Refdoc Core - reference page synthesis for C API catalogues
//!
//! This crate provides the synthesis pipeline:
//! - Catalogue: TOML documents of function and protocol descriptors
//! - Registry: two-phase registration with uniqueness enforcement
//! - Sections: grouping of page names for cross-references and the ToC
//! - Signature: C declarations with capability-derived parameters
//! - Errors: error-code resolution with override precedence
//! - Page/ToC: Markdown rendering and paragraph reflow
//!
//! Reading and writing files is left to the caller.

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Catalogue documents - TOML input format
pub mod catalogue;

/// Render configuration - policy lists and literal names
pub mod config;

/// Descriptor data model
pub mod descriptor;

/// Error types
pub mod error;

/// Error set resolution and the standard error table
pub mod errors;

/// Typed document blocks and their Markdown serialization
pub mod markdown;

/// Reference page rendering
pub mod page;

/// Text reflow engine
pub mod reflow;

/// Descriptor registry
pub mod registry;

/// Section classification
pub mod sections;

/// Function signature assembly
pub mod signature;

/// Table of contents rendering
pub mod toc;

/// Convenience re-export of catalogue types
pub use catalogue::Catalogue;

/// Convenience re-export of configuration
pub use config::RenderConfig;

/// Convenience re-export of descriptor types
pub use descriptor::{
    Argument, FunctionDescriptor, ProtocolDescriptor, ProtocolKind, ResultInfo, Variant,
};

/// Convenience re-export of error types
pub use error::{CatalogueError, RegistryError};

/// Convenience re-export of error resolution
pub use errors::{resolve_errors, ErrorSet, StandardErrorTable};

/// Convenience re-export of the renderer
pub use page::{RenderedPage, Renderer};

/// Convenience re-export of reflow functions
pub use reflow::{make_paragraphs, trim_rect};

/// Convenience re-export of registry types
pub use registry::{Registry, RegistryBuilder};

/// Convenience re-export of section classification
pub use sections::{SectionMap, UNCLASSIFIED};

/// Convenience re-export of signature assembly
pub use signature::{assemble_signature, Signature};
