//! Error set resolution
//!
//! Computes the `errno` values a function can fail with: the codes listed
//! explicitly on the descriptor plus the ones implied by its capability
//! flags, described by the standard error table and overridden by the
//! descriptor's custom descriptions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::RenderConfig;
use crate::descriptor::{FunctionDescriptor, Variant};

/// Canonical descriptions of error codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardErrorTable(BTreeMap<String, String>);

impl Default for StandardErrorTable {
    fn default() -> Self {
        let entries = [
            ("EBADF", "Invalid handle."),
            (
                "EBUSY",
                "The handle is currently being used by a different coroutine.",
            ),
            ("ETIMEDOUT", "Deadline was reached."),
            ("ENOMEM", "Not enough memory."),
            (
                "EMFILE",
                "The maximum number of file descriptors in the process are already open.",
            ),
            (
                "ENFILE",
                "The maximum number of file descriptors in the system are already open.",
            ),
            ("EINVAL", "Invalid argument."),
            ("EMSGSIZE", "The data won't fit into the supplied buffer."),
            ("ECONNRESET", "Broken connection."),
            ("ECANCELED", "Current coroutine was canceled."),
            ("ENOTSUP", "The handle does not support this operation."),
        ];
        Self(
            entries
                .into_iter()
                .map(|(code, desc)| (code.to_string(), desc.to_string()))
                .collect(),
        )
    }
}

impl StandardErrorTable {
    /// An empty table
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Look up the canonical description of a code
    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    /// Add or replace a description
    pub fn insert(&mut self, code: impl Into<String>, description: impl Into<String>) {
        self.0.insert(code.into(), description.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolved error codes of one page, ordered by code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    entries: BTreeMap<String, Option<String>>,
}

impl ErrorSet {
    /// Codes in lexicographic order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Codes with their descriptions, in lexicographic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(code, desc)| (code.as_str(), desc.as_deref()))
    }

    pub fn description(&self, code: &str) -> Option<&str> {
        self.entries.get(code).and_then(|d| d.as_deref())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Error codes implied by the descriptor, before descriptions are attached
fn implied_codes<'a>(
    fx: &'a FunctionDescriptor,
    variant: Variant,
    config: &RenderConfig,
) -> Vec<&'a str> {
    let mut codes: Vec<&str> = fx.errors.iter().map(String::as_str).collect();

    if fx.has_handle_argument {
        codes.extend(["EBADF", "ENOTSUP"]);
    }
    if fx.has_deadline {
        codes.push("ECANCELED");
        if fx.name != config.deadline_sleep {
            codes.push("ETIMEDOUT");
        }
    }
    if fx.allocates_handle {
        codes.extend(["EMFILE", "ENFILE", "ENOMEM"]);
    }
    if fx.uses_connection {
        codes.extend(["ECONNRESET", "ECANCELED"]);
    }
    // Only the allocating variant can fail with ENOMEM.
    if fx.mem.is_some() && !variant.is_mem() {
        codes.push("ENOMEM");
    }

    codes
}

/// Resolve the error set of a descriptor for one variant.
///
/// Custom descriptions replace standard ones for the same code; codes with
/// no description from either source are kept and logged.
pub fn resolve_errors(fx: &FunctionDescriptor, variant: Variant, config: &RenderConfig) -> ErrorSet {
    let mut entries: BTreeMap<String, Option<String>> = BTreeMap::new();

    for code in implied_codes(fx, variant, config) {
        entries
            .entry(code.to_string())
            .or_insert_with(|| config.standard_errors.get(code).map(str::to_string));
    }

    for (code, desc) in &fx.custom_errors {
        entries.insert(code.clone(), Some(desc.clone()));
    }

    for (code, desc) in &entries {
        if desc.is_none() {
            warn!(function = %fx.name, code = %code, "error code has no description");
        }
    }

    ErrorSet { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn test_handle_and_deadline() {
        let mut fx = FunctionDescriptor::new("brecv", "receives data");
        fx.has_handle_argument = true;
        fx.has_deadline = true;

        let errors = resolve_errors(&fx, Variant::Plain, &config());
        assert_eq!(
            errors.codes().collect::<Vec<_>>(),
            vec!["EBADF", "ECANCELED", "ENOTSUP", "ETIMEDOUT"]
        );
    }

    #[test]
    fn test_deadline_sleep_cannot_time_out() {
        let mut fx = FunctionDescriptor::new("msleep", "waits until deadline expires");
        fx.has_deadline = true;

        let errors = resolve_errors(&fx, Variant::Plain, &config());
        assert_eq!(errors.codes().collect::<Vec<_>>(), vec!["ECANCELED"]);
    }

    #[test]
    fn test_allocation_and_connection_dedup() {
        let mut fx = FunctionDescriptor::new("tcp_accept", "accepts a connection");
        fx.allocates_handle = true;
        fx.uses_connection = true;
        fx.has_deadline = true;
        fx.errors = vec!["ENOMEM".to_string(), "EINVAL".to_string()];

        let errors = resolve_errors(&fx, Variant::Plain, &config());
        assert_eq!(
            errors.codes().collect::<Vec<_>>(),
            vec![
                "ECANCELED",
                "ECONNRESET",
                "EINVAL",
                "EMFILE",
                "ENFILE",
                "ENOMEM",
                "ETIMEDOUT"
            ]
        );
    }

    #[test]
    fn test_mem_variant_exempt_from_enomem() {
        let mut fx = FunctionDescriptor::new("bundle", "creates an empty bundle");
        fx.mem = Some("bundle_storage".to_string());

        let plain = resolve_errors(&fx, Variant::Plain, &config());
        assert!(plain.contains("ENOMEM"));

        let mem = resolve_errors(&fx, Variant::Mem, &config());
        assert!(mem.is_empty());
    }

    #[test]
    fn test_custom_overrides_standard() {
        let mut fx = FunctionDescriptor::new("tcp_connect", "connects");
        fx.uses_connection = true;
        fx.custom_errors.insert(
            "ECONNRESET".to_string(),
            "Remote host reset the connection request.".to_string(),
        );
        fx.custom_errors.insert(
            "ECONNREFUSED".to_string(),
            "The target address was not listening.".to_string(),
        );

        let errors = resolve_errors(&fx, Variant::Plain, &config());
        assert_eq!(
            errors.description("ECONNRESET"),
            Some("Remote host reset the connection request.")
        );
        assert_eq!(
            errors.description("ECONNREFUSED"),
            Some("The target address was not listening.")
        );
        assert_eq!(
            errors.description("ECANCELED"),
            Some("Current coroutine was canceled.")
        );
    }

    #[test]
    fn test_project_error_table() {
        let mut table = StandardErrorTable::empty();
        assert!(table.is_empty());
        table.insert("ECANCELED", "The coroutine was canceled.");
        table.insert("ECANCELED", "Current coroutine was canceled by its owner.");
        assert_eq!(table.len(), 1);

        let config = RenderConfig {
            standard_errors: table,
            ..RenderConfig::default()
        };
        let mut fx = FunctionDescriptor::new("msleep", "waits until deadline expires");
        fx.has_deadline = true;
        fx.errors = vec!["EINVAL".to_string()];

        let errors = resolve_errors(&fx, Variant::Plain, &config);
        assert_eq!(
            errors.description("ECANCELED"),
            Some("Current coroutine was canceled by its owner.")
        );
        assert!(errors.contains("EINVAL"));
        assert_eq!(errors.description("EINVAL"), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_unknown_code_kept_without_description() {
        let mut fx = FunctionDescriptor::new("ws_recv", "receives a message");
        fx.errors = vec!["EPROTO".to_string()];

        let errors = resolve_errors(&fx, Variant::Plain, &config());
        assert!(errors.contains("EPROTO"));
        assert_eq!(errors.description("EPROTO"), None);
    }

    #[test]
    fn test_no_errors() {
        let fx = FunctionDescriptor::new("now", "get current time");
        assert!(resolve_errors(&fx, Variant::Plain, &config()).is_empty());
    }
}
