//! The streaming dispatcher: a single pass over the tokenizer's events,
//! maintaining the live ancestor path and per-element contexts, and
//! invoking the actions registered for whatever the current path matches.

use crate::context::ElementContext;
use crate::error::DevourError;
use crate::mapping::Mapping;
use crate::stacks::Stacks;
use devour_qname::{ExactPath, NamespaceScope, QualifiedName};
use quick_xml::NsReader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, PrefixDeclaration, ResolveResult};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

/// A reusable, thread-shareable XML-to-structure mapper.
///
/// Construction freezes a [`Mapping`]; each `parse` call then owns its
/// entire mutable state (ancestor path, context stack, stack store), so
/// one `Devourer` may serve any number of concurrent parses. The only
/// shared mutable structure is the pattern-lookup cache, which is
/// internally synchronized.
#[derive(Clone)]
pub struct Devourer {
    mapping: Arc<Mapping>,
    strip_spaces: bool,
}

impl Devourer {
    pub fn new(mapping: Mapping) -> Self {
        Self {
            mapping: Arc::new(mapping),
            strip_spaces: false,
        }
    }

    /// Shorthand for [`Mapping::builder`].
    pub fn builder() -> crate::mapping::MappingBuilder {
        Mapping::builder()
    }

    /// When set, dispatched text is trimmed of surrounding whitespace.
    /// Whitespace-only text never dispatches either way.
    pub fn with_strip_spaces(mut self, strip_spaces: bool) -> Self {
        self.strip_spaces = strip_spaces;
        self
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// Parses one XML document from a string and returns the populated
    /// stack store.
    ///
    /// Consecutive raw text events at the same position (CDATA boundaries,
    /// split text nodes) each dispatch at-actions independently; no
    /// coalescing is performed.
    pub fn parse(&self, xml: &str) -> Result<Stacks, DevourError> {
        self.parse_reader(xml.as_bytes())
    }

    /// Parses one XML document from a buffered byte source.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<Stacks, DevourError> {
        let mut reader = NsReader::from_reader(source);
        reader.config_mut().trim_text(false);
        self.run(&mut reader)
    }

    /// Parses one XML document from a file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Stacks, DevourError> {
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    fn run<R: BufRead>(&self, reader: &mut NsReader<R>) -> Result<Stacks, DevourError> {
        let mut state = ParseState::new(&self.mapping, self.strip_spaces);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let context = element_context(reader, &e)?;
                    state.start_element(context)?;
                }
                Ok(Event::Empty(e)) => {
                    let context = element_context(reader, &e)?;
                    state.start_element(context)?;
                    state.end_element()?;
                }
                Ok(Event::End(_)) => {
                    state.end_element()?;
                }
                Ok(Event::Text(e)) => {
                    let raw = std::str::from_utf8(e.as_ref())?;
                    let text =
                        unescape(raw).map_err(|e| DevourError::Unescape(e.to_string()))?;
                    state.text(&text)?;
                }
                Ok(Event::CData(e)) => {
                    let raw = std::str::from_utf8(&e)?;
                    state.text(raw)?;
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(DevourError::Syntax {
                        position: reader.buffer_position(),
                        source: e,
                    });
                }
            }
            buf.clear();
        }

        Ok(state.into_stacks())
    }
}

/// The per-call mutable state of one parse.
struct ParseState<'m> {
    mapping: &'m Mapping,
    strip_spaces: bool,
    path: ExactPath,
    context_stack: Vec<ElementContext>,
    stacks: Stacks,
}

impl<'m> ParseState<'m> {
    fn new(mapping: &'m Mapping, strip_spaces: bool) -> Self {
        Self {
            mapping,
            strip_spaces,
            path: ExactPath::root(),
            context_stack: Vec::new(),
            stacks: Stacks::new(),
        }
    }

    fn start_element(&mut self, context: ElementContext) -> Result<(), DevourError> {
        self.path = self.path.append(context.name().clone());
        if let Some(bundle) = self.mapping.lookup(&self.path) {
            log::trace!("dispatch before-actions at {}", self.path);
            for action in bundle.before_actions() {
                action(&mut self.stacks, &context)
                    .map_err(|source| self.action_error(source))?;
            }
        }
        self.context_stack.push(context);
        Ok(())
    }

    fn text(&mut self, raw: &str) -> Result<(), DevourError> {
        // Whitespace-only text never dispatches, trimmed or not.
        if raw.trim().is_empty() {
            return Ok(());
        }
        // Text does not change the path; it belongs to the enclosing
        // element. Text outside any element is not dispatchable.
        let Some(context) = self.context_stack.last() else {
            return Ok(());
        };
        let text = if self.strip_spaces { raw.trim() } else { raw };
        if let Some(bundle) = self.mapping.lookup(&self.path) {
            log::trace!("dispatch at-actions at {}", self.path);
            for action in bundle.at_actions() {
                action(&mut self.stacks, context, text)
                    .map_err(|source| DevourError::Action {
                        path: self.path.to_string(),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    fn end_element(&mut self) -> Result<(), DevourError> {
        let Some(context) = self.context_stack.pop() else {
            return Ok(());
        };
        if let Some(bundle) = self.mapping.lookup(&self.path) {
            log::trace!("dispatch after-actions at {}", self.path);
            for action in bundle.after_actions() {
                action(&mut self.stacks, &context)
                    .map_err(|source| self.action_error(source))?;
            }
        }
        self.path = self.path.parent();
        Ok(())
    }

    fn action_error(&self, source: crate::action::ActionError) -> DevourError {
        DevourError::Action {
            path: self.path.to_string(),
            source,
        }
    }

    fn into_stacks(self) -> Stacks {
        self.stacks
    }
}

/// Builds the per-element snapshot: resolved element name, resolved
/// attributes (namespace declarations excluded), and the live namespace
/// bindings.
fn element_context<R>(
    reader: &NsReader<R>,
    start: &BytesStart<'_>,
) -> Result<ElementContext, DevourError> {
    let (resolution, local) = reader.resolve_element(start.name());
    let name = qualified_name(
        resolution,
        std::str::from_utf8(local.as_ref())?,
        prefix_of(start)?,
    )?;

    let mut attributes = HashMap::new();
    for attr in start.attributes() {
        let attr = attr?;
        if is_namespace_declaration(attr.key.as_ref()) {
            continue;
        }
        let (resolution, local) = reader.resolve_attribute(attr.key);
        let prefix = attr
            .key
            .prefix()
            .map(|p| std::str::from_utf8(p.as_ref()).map(str::to_string))
            .transpose()?;
        let key = qualified_name(resolution, std::str::from_utf8(local.as_ref())?, prefix)?;
        let raw = std::str::from_utf8(&attr.value)?;
        let value = unescape(raw)
            .map_err(|e| DevourError::Unescape(e.to_string()))?
            .into_owned();
        attributes.insert(key, value);
    }

    Ok(ElementContext::new(name, attributes, live_scope(reader)?))
}

fn prefix_of(start: &BytesStart<'_>) -> Result<Option<String>, DevourError> {
    start
        .name()
        .prefix()
        .map(|p| Ok(std::str::from_utf8(p.as_ref())?.to_string()))
        .transpose()
}

fn qualified_name(
    resolution: ResolveResult<'_>,
    local_name: &str,
    prefix: Option<String>,
) -> Result<QualifiedName, DevourError> {
    match resolution {
        ResolveResult::Unbound => Ok(QualifiedName::local(local_name)),
        ResolveResult::Bound(Namespace(ns)) => {
            let namespace = std::str::from_utf8(ns)?;
            Ok(match prefix {
                Some(prefix) => QualifiedName::prefixed(local_name, namespace, prefix),
                None => QualifiedName::namespaced(local_name, namespace),
            })
        }
        ResolveResult::Unknown(prefix) => Err(DevourError::UnboundPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn is_namespace_declaration(key: &[u8]) -> bool {
    key == b"xmlns" || key.starts_with(b"xmlns:")
}

/// Snapshots the prefix bindings the tokenizer currently has in scope.
fn live_scope<R>(reader: &NsReader<R>) -> Result<NamespaceScope, DevourError> {
    let mut scope = NamespaceScope::new();
    for (declaration, Namespace(ns)) in reader.prefixes() {
        let namespace = std::str::from_utf8(ns)?;
        match declaration {
            PrefixDeclaration::Default => scope.set_default(namespace),
            PrefixDeclaration::Named(prefix) => {
                scope.bind(std::str::from_utf8(prefix)?, namespace);
            }
        }
    }
    Ok(scope)
}
