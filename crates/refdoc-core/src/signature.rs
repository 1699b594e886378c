//! Function signature assembly
//!
//! The declared arguments of a descriptor are extended with parameters
//! implied by its capabilities: the I/O list bounds, the storage pointer of
//! the `_mem` variant and the trailing deadline.

use std::fmt::Write;

use crate::config::RenderConfig;
use crate::descriptor::{Argument, FunctionDescriptor, Variant};

const IOL_TYPE: &str = "struct iolist*";

const DEADLINE_INFO: &str = "A point in time when the operation should time out, in \
milliseconds. Use the **now** function to get your current point in time. 0 means \
immediate timeout, i.e., perform the operation if possible or return without blocking \
if not. -1 means no deadline, i.e., the call will block forever if the operation \
cannot be performed.";

const MEM_INFO: &str = "The structure to store the newly created object in. It must \
not be deallocated before the object is closed.";

/// A fully assembled C function signature
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// Return type, `void` when the descriptor has no result
    pub return_type: String,
    /// Function name including the `_mem` suffix where applicable
    pub name: String,
    /// Final argument list, synthesized parameters included
    pub args: Vec<Argument>,
}

impl Signature {
    /// Render the declaration, one argument per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        write!(out, "{} {}(", self.return_type, self.name).unwrap();

        if self.args.is_empty() {
            out.push_str("void");
        } else {
            out.push('\n');
            let decls: Vec<String> = self
                .args
                .iter()
                .map(|a| format!("    {}", a.declaration()))
                .collect();
            out.push_str(&decls.join(",\n"));
        }

        out.push_str(");");
        out
    }

    /// Names of the arguments, in order
    pub fn arg_names(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Assemble the signature of a descriptor for one variant.
///
/// Synthesized parameters are appended in a fixed order: `first`/`last` for
/// I/O lists, the storage pointer for the `_mem` variant, then `deadline`.
/// The storage pointer goes to the front instead for the functions listed in
/// [`RenderConfig::mem_first`], whose output array precedes everything else.
///
/// Returns `None` for the `_mem` variant of a descriptor without storage.
pub fn assemble_signature(
    fx: &FunctionDescriptor,
    variant: Variant,
    config: &RenderConfig,
) -> Option<Signature> {
    let mut args = fx.args.clone();

    if fx.has_io_list {
        args.push(Argument::new(
            "first",
            IOL_TYPE,
            "Pointer to the first item of a linked list of I/O buffers.",
        ));
        args.push(Argument::new(
            "last",
            IOL_TYPE,
            "Pointer to the last item of a linked list of I/O buffers.",
        ));
    }

    if variant.is_mem() {
        let storage = fx.mem.as_deref()?;
        let mem = Argument::new("mem", format!("struct {storage}*"), MEM_INFO);
        if config.is_mem_first(&fx.name) {
            args.insert(0, mem);
        } else {
            args.push(mem);
        }
    }

    if fx.has_deadline {
        args.push(Argument::new("deadline", "int64_t", DEADLINE_INFO));
    }

    Some(Signature {
        return_type: fx
            .result
            .as_ref()
            .map_or_else(|| String::from("void"), |r| r.ty.clone()),
        name: fx.page_name(variant),
        args,
    })
}
