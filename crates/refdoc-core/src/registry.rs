//! Descriptor registry
//!
//! Descriptors are collected in a [`RegistryBuilder`], which rejects
//! duplicate names as they arrive. [`RegistryBuilder::freeze`] checks the
//! protocol references and hands back a read-only [`Registry`] that the
//! rest of the pipeline borrows.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::descriptor::{FunctionDescriptor, ProtocolDescriptor};
use crate::error::RegistryError;

/// Mutable registration phase of the registry
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    functions: Vec<FunctionDescriptor>,
    index: HashMap<String, usize>,
    /// Every page name in use, `_mem` names included
    page_names: HashSet<String>,
    protocols: HashMap<String, ProtocolDescriptor>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function descriptor.
    ///
    /// Fails if its name or its `_mem` name is already the name of a page,
    /// plain or `_mem`; the existing descriptor is left in place.
    pub fn register(&mut self, fx: FunctionDescriptor) -> Result<(), RegistryError> {
        let mem_name = fx.mem_name();
        if let Some(taken) = std::iter::once(&fx.name)
            .chain(mem_name.as_ref())
            .find(|name| self.page_names.contains(*name))
        {
            return Err(RegistryError::DuplicateName(taken.clone()));
        }

        debug!(function = %fx.name, "registered function");
        self.page_names.insert(fx.name.clone());
        self.page_names.extend(mem_name);
        self.index.insert(fx.name.clone(), self.functions.len());
        self.functions.push(fx);
        Ok(())
    }

    /// Register a protocol that function descriptors can refer to by id
    pub fn register_protocol(&mut self, protocol: ProtocolDescriptor) -> Result<(), RegistryError> {
        if self.protocols.contains_key(&protocol.id) {
            return Err(RegistryError::DuplicateProtocol(protocol.id));
        }
        debug!(protocol = %protocol.id, section = %protocol.section, "registered protocol");
        self.protocols.insert(protocol.id.clone(), protocol);
        Ok(())
    }

    /// Look up a registered function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// End the registration phase.
    ///
    /// Every protocol reference must name a registered protocol.
    pub fn freeze(self) -> Result<Registry, RegistryError> {
        for fx in &self.functions {
            if let Some(id) = &fx.protocol {
                if !self.protocols.contains_key(id) {
                    return Err(RegistryError::UnknownProtocol {
                        function: fx.name.clone(),
                        protocol: id.clone(),
                    });
                }
            }
        }

        info!(
            functions = self.functions.len(),
            protocols = self.protocols.len(),
            "registry frozen"
        );

        Ok(Registry {
            functions: self.functions,
            index: self.index,
            protocols: self.protocols,
        })
    }
}

/// Read-only set of registered descriptors
#[derive(Debug, Clone)]
pub struct Registry {
    functions: Vec<FunctionDescriptor>,
    index: HashMap<String, usize>,
    protocols: HashMap<String, ProtocolDescriptor>,
}

impl Registry {
    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    /// All functions in registration order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDescriptor> {
        self.functions.iter()
    }

    /// Look up a protocol by id
    pub fn protocol(&self, id: &str) -> Option<&ProtocolDescriptor> {
        self.protocols.get(id)
    }

    /// The protocol a function belongs to, if any
    pub fn protocol_of(&self, fx: &FunctionDescriptor) -> Option<&ProtocolDescriptor> {
        fx.protocol.as_deref().and_then(|id| self.protocols.get(id))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
