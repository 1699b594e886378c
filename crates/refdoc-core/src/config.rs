//! Render configuration
//!
//! Every policy list the renderer consults lives here as data. The defaults
//! reproduce the libdill reference pages; a project can override any field
//! from the `[render]` table of its `refdoc.toml`.

use serde::{Deserialize, Serialize};

use crate::errors::StandardErrorTable;

/// Sections listed in the table of contents, in order.
///
/// Sections missing from this list are never shown in the table of contents,
/// even though their functions still get pages.
pub const TOC_SECTIONS: [&str; 18] = [
    "Coroutines",
    "Deadlines",
    "Channels",
    "Handles",
    "File descriptors",
    "Bytestream sockets",
    "Message sockets",
    "IP addresses",
    "Happy Eyeballs protocol",
    "HTTP protocol",
    "IPC protocol",
    "PREFIX protocol",
    "SUFFIX protocol",
    "TCP protocol",
    "TERM protocol",
    "TLS protocol",
    "UDP protocol",
    "WebSocket protocol",
];

/// Functions whose storage argument goes first instead of last
pub const MEM_FIRST: [&str; 2] = ["chmake", "ipc_pair"];

/// Primitives cross-referenced from every bytestream protocol page
pub const BYTESTREAM_COMPANIONS: [&str; 4] = ["brecv", "brecvl", "bsend", "bsendl"];

/// Primitives cross-referenced from every message protocol page
pub const MESSAGE_COMPANIONS: [&str; 4] = ["mrecv", "mrecvl", "msend", "msendl"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Configuration for page and table-of-contents rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Library name used in build-flag caveats
    pub library: String,

    /// Header included by ordinary functions
    pub public_header: String,

    /// Header included by functions flagged `is_in_libdillimpl`
    pub implementation_header: String,

    /// Sections shown in the table of contents, in order
    pub toc_sections: Vec<String>,

    /// The function that sleeps until its own deadline and so cannot time out
    pub deadline_sleep: String,

    /// Functions that take their storage argument first
    pub mem_first: Vec<String>,

    /// Referenced from every page of a function with a deadline
    pub clock_function: String,

    /// Referenced from every page of a function that allocates a handle
    pub close_function: String,

    pub bytestream_companions: Vec<String>,

    pub message_companions: Vec<String>,

    /// Sections unavailable when the library is built without sockets
    pub sockets_sections: Vec<String>,

    /// Protocol section unavailable when the library is built without TLS
    pub tls_section: String,

    /// Default descriptions of error codes
    pub standard_errors: StandardErrorTable,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            library: String::from("libdill"),
            public_header: String::from("libdill.h"),
            implementation_header: String::from("libdillimpl.h"),
            toc_sections: owned(&TOC_SECTIONS),
            deadline_sleep: String::from("msleep"),
            mem_first: owned(&MEM_FIRST),
            clock_function: String::from("now"),
            close_function: String::from("hclose"),
            bytestream_companions: owned(&BYTESTREAM_COMPANIONS),
            message_companions: owned(&MESSAGE_COMPANIONS),
            sockets_sections: vec![String::from("IP addresses")],
            tls_section: String::from("TLS protocol"),
            standard_errors: StandardErrorTable::default(),
        }
    }
}

impl RenderConfig {
    /// Whether the storage argument of `name` goes before its other arguments
    pub fn is_mem_first(&self, name: &str) -> bool {
        self.mem_first.iter().any(|n| n == name)
    }
}
