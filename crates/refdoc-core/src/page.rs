//! Reference page rendering
//!
//! A page is assembled from a fixed sequence of sections: NAME, SYNOPSIS,
//! DESCRIPTION, RETURN VALUE, ERRORS, an optional EXAMPLE and SEE ALSO.

use rayon::prelude::*;
use tracing::debug;

use crate::config::RenderConfig;
use crate::descriptor::{FunctionDescriptor, ProtocolKind, Variant, MEM_SUFFIX};
use crate::errors::resolve_errors;
use crate::markdown::{Block, Document};
use crate::reflow::trim_rect;
use crate::registry::Registry;
use crate::sections::{effective_section, SectionMap};
use crate::signature::{assemble_signature, Signature};
use crate::toc;

const EXPERIMENTAL_WARNING: &str = "**WARNING: This is experimental functionality and the \
API may change in the future.**";

const IOL_INTRO: &str = "
    This function accepts a linked list of I/O buffers instead of a
    single buffer. Argument **first** points to the first item in the
    list, **last** points to the last buffer in the list. The list
    represents a single, fragmented message, not a list of multiple
    messages. Structure **iolist** has the following members:
";

const IOL_MEMBERS: &str = "
    void *iol_base;          /* Pointer to the buffer. */
    size_t iol_len;          /* Size of the buffer. */
    struct iolist *iol_next; /* Next buffer in the list. */
    int iol_rsvd;            /* Reserved. Must be set to zero. */
";

const IOL_RULES: &str = "
    When receiving, **iol_base** equal to NULL means that **iol_len**
    bytes should be skipped.

    The function returns **EINVAL** error in the case the list is
    malformed:
";

const IOL_MALFORMED: [&str; 4] = [
    "If **last->iol_next** is not **NULL**.",
    "If **first** and **last** don't belong to the same list.",
    "If there's a loop in the list.",
    "If **iol_rsvd** of any item is non-zero.",
];

const IOL_OUTRO: &str = "
    The list (but not the buffers themselves) can be temporarily
    modified while the function is in progress. However, once the
    function returns the list is guaranteed to be the same as before
    the call.
";

/// A rendered page, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Page name; `_mem` variants carry the suffix
    pub name: String,
    pub markdown: String,
}

/// Renders pages from a frozen registry
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    registry: &'a Registry,
    sections: SectionMap,
    config: &'a RenderConfig,
}

impl<'a> Renderer<'a> {
    /// Create a renderer, classifying the registry's functions once
    pub fn new(registry: &'a Registry, config: &'a RenderConfig) -> Self {
        Self {
            registry,
            sections: SectionMap::classify(registry),
            config,
        }
    }

    /// Find the descriptor and variant behind a page name
    pub fn lookup(&self, page_name: &str) -> Option<(&'a FunctionDescriptor, Variant)> {
        if let Some(fx) = self.registry.get(page_name) {
            return Some((fx, Variant::Plain));
        }
        let base = page_name.strip_suffix(MEM_SUFFIX)?;
        self.registry
            .get(base)
            .filter(|fx| fx.mem.is_some())
            .map(|fx| (fx, Variant::Mem))
    }

    /// Render the page with the given name to Markdown
    pub fn render(&self, page_name: &str) -> Option<String> {
        self.lookup(page_name)
            .and_then(|(fx, variant)| self.page(fx, variant))
            .map(|doc| doc.to_markdown())
    }

    /// Render every page, in registration order, each plain page followed
    /// by its `_mem` variant
    pub fn render_all(&self) -> Vec<RenderedPage> {
        let jobs: Vec<(&FunctionDescriptor, Variant)> = self
            .registry
            .functions()
            .flat_map(|fx| fx.variants().map(move |v| (fx, v)))
            .collect();

        jobs.par_iter()
            .filter_map(|&(fx, variant)| {
                self.page(fx, variant).map(|doc| RenderedPage {
                    name: fx.page_name(variant),
                    markdown: doc.to_markdown(),
                })
            })
            .collect()
    }

    /// Render the table of contents
    pub fn toc(&self) -> String {
        toc::render_toc(&self.sections, self.config)
    }

    /// Assemble the document of one page, or `None` when the descriptor
    /// has no such variant
    pub fn page(&self, fx: &FunctionDescriptor, variant: Variant) -> Option<Document> {
        let signature = assemble_signature(fx, variant, self.config)?;
        debug!(page = %signature.name, "rendering page");

        let mut doc = Document::new();

        Self::name_section(&mut doc, fx, variant);
        self.synopsis_section(&mut doc, fx, &signature);
        self.description_section(&mut doc, fx, variant, &signature);
        Self::return_section(&mut doc, fx);
        self.errors_section(&mut doc, fx, variant);
        self.example_section(&mut doc, fx);

        doc.push(Block::heading("SEE ALSO"));
        doc.push(Block::SeeAlso(self.see_also(fx, variant)));

        Some(doc)
    }

    fn name_section(doc: &mut Document, fx: &FunctionDescriptor, variant: Variant) {
        doc.push(Block::heading("NAME"));
        doc.push(Block::prose(format!(
            "{} - {}",
            fx.page_name(variant),
            fx.info.trim()
        )));
    }

    fn synopsis_section(&self, doc: &mut Document, fx: &FunctionDescriptor, signature: &Signature) {
        let header = if fx.in_implementation_header {
            &self.config.implementation_header
        } else {
            &self.config.public_header
        };

        let mut body = format!("#include <{}>\n\n", header);
        if let Some(extra) = &fx.add_to_synopsis {
            body.push_str(&trim_rect(extra));
            body.push_str("\n\n");
        }
        body.push_str(&signature.render());

        doc.push(Block::heading("SYNOPSIS"));
        doc.push(Block::Code {
            lang: Some(String::from("c")),
            body,
        });
    }

    fn description_section(
        &self,
        doc: &mut Document,
        fx: &FunctionDescriptor,
        variant: Variant,
        signature: &Signature,
    ) {
        let protocol = self.registry.protocol_of(fx);

        doc.push(Block::heading("DESCRIPTION"));

        if fx.experimental || protocol.is_some_and(|p| p.experimental) {
            doc.push(Block::prose(EXPERIMENTAL_WARNING));
        }
        if let Some(protocol) = protocol {
            doc.push(Block::prose(protocol.info.as_str()));
        }
        if let Some(prologue) = &fx.prologue {
            doc.push(Block::prose(prologue.as_str()));
        }

        if fx.has_io_list {
            doc.push(Block::prose(IOL_INTRO));
            doc.push(Block::c_code(IOL_MEMBERS));
            doc.push(Block::prose(IOL_RULES));
            doc.push(Block::List(
                IOL_MALFORMED.iter().map(|s| (*s).to_string()).collect(),
            ));
            doc.push(Block::prose(IOL_OUTRO));
        }

        if variant.is_mem() {
            doc.push(Block::prose(format!(
                "This function allows to avoid one dynamic memory allocation by \
                 storing the object in user-supplied memory. Unless you are \
                 hyper-optimizing use **{}** instead.",
                fx.name
            )));
        }

        for arg in &signature.args {
            doc.push(Block::prose(format!("**{}**: {}", arg.name, arg.info)));
        }

        if let Some(epilogue) = &fx.epilogue {
            doc.push(Block::prose(epilogue.as_str()));
        }

        let in_sockets_section = fx
            .section
            .as_ref()
            .is_some_and(|s| self.config.sockets_sections.contains(s));
        if protocol.is_some() || in_sockets_section {
            doc.push(Block::prose(format!(
                "This function is not available if {} is compiled with \
                 **--disable-sockets** option.",
                self.config.library
            )));
        }
        if protocol.is_some_and(|p| p.section == self.config.tls_section) {
            doc.push(Block::prose(format!(
                "This function is not available if {} is compiled without \
                 **--enable-tls** option.",
                self.config.library
            )));
        }
    }

    fn return_section(doc: &mut Document, fx: &FunctionDescriptor) {
        doc.push(Block::heading("RETURN VALUE"));

        let Some(result) = &fx.result else {
            doc.push(Block::prose("None."));
            return;
        };

        if let (Some(success), Some(error)) = (&result.success, &result.error) {
            doc.push(Block::prose(format!(
                "In case of success the function returns {}. In case of error it \
                 returns {} and sets **errno** to one of the values below.",
                success, error
            )));
        }
        if let Some(info) = &result.info {
            doc.push(Block::prose(info.as_str()));
        }
    }

    fn errors_section(&self, doc: &mut Document, fx: &FunctionDescriptor, variant: Variant) {
        doc.push(Block::heading("ERRORS"));

        let errors = resolve_errors(fx, variant, self.config);
        if errors.is_empty() {
            doc.push(Block::prose("None."));
        } else {
            let items = errors
                .iter()
                .map(|(code, desc)| match desc {
                    Some(desc) => format!("**{}**: {}", code, desc),
                    None => format!("**{}**", code),
                })
                .collect();
            doc.push(Block::List(items));
        }

        if let Some(extra) = &fx.add_to_errors {
            doc.push(Block::prose(extra.as_str()));
        }
    }

    fn example_section(&self, doc: &mut Document, fx: &FunctionDescriptor) {
        let example = fx.example.as_deref().or_else(|| {
            self.registry
                .protocol_of(fx)
                .and_then(|p| p.example.as_deref())
        });

        if let Some(example) = example {
            doc.push(Block::heading("EXAMPLE"));
            doc.push(Block::c_code(example));
        }
    }

    /// Pages cross-referenced from a page, sorted and without the page itself
    pub fn see_also(&self, fx: &FunctionDescriptor, variant: Variant) -> Vec<String> {
        let own_name = fx.page_name(variant);
        let section = effective_section(self.registry, fx);

        let mut names: Vec<String> = self
            .sections
            .members(section)
            .unwrap_or_default()
            .to_vec();

        if fx.has_deadline {
            names.push(self.config.clock_function.clone());
        }
        if fx.allocates_handle {
            names.push(self.config.close_function.clone());
        }
        match self.registry.protocol_of(fx).map(|p| p.kind) {
            Some(ProtocolKind::Bytestream) => {
                names.extend(self.config.bytestream_companions.iter().cloned());
            }
            Some(ProtocolKind::Message) => {
                names.extend(self.config.message_companions.iter().cloned());
            }
            Some(ProtocolKind::Application) | None => {}
        }

        names.retain(|n| *n != own_name);
        names.sort();
        names.dedup();
        names
    }
}
