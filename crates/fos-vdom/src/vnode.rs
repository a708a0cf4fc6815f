//! Virtual Node - one position in a rendered tree
//!
//! A `VNode` is built once per render pass and read-only afterwards.
//! The reconciler-owned slots (`elm`, `component_instance`) are the only
//! fields written after construction, so they sit behind `RefCell`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// Type-erased value carried through the tree but never inspected here
pub type Opaque = Rc<dyn Any>;

/// Identity hint used by the reconciler to match siblings across renders
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Str(Box<str>),
    Int(i64),
}

impl Key {
    /// Prefix reserved for keys synthesized during normalization
    pub const SYNTHETIC_PREFIX: &'static str = "__vlist";

    /// Key for the `index`-th child of a list found at nesting path `label`
    pub(crate) fn synthetic(label: &str, index: usize) -> Self {
        Key::Str(format!("{}{}_{}__", Self::SYNTHETIC_PREFIX, label, index).into_boxed_str())
    }

    /// Whether this key has the shape of a synthesized list key
    pub fn is_synthetic(&self) -> bool {
        match self {
            Key::Str(s) => s.starts_with(Self::SYNTHETIC_PREFIX) && s.ends_with("__"),
            Key::Int(_) => false,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s.into_boxed_str())
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n.into())
    }
}

/// Attribute, event and directive bundle attached to a node
///
/// Only `key` is read by this crate; everything else passes through to the
/// reconciler untouched.
#[derive(Debug, Default)]
pub struct VNodeData {
    pub key: Option<Key>,
    pub attrs: Vec<(Box<str>, Box<str>)>,
    /// Events, directives, props: owned by the consumer
    pub payload: Option<Opaque>,
}

impl VNodeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Data carrying only a user key
    pub fn keyed(key: impl Into<Key>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Add an attribute, replacing an existing one of the same name
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        match self.attrs.iter().position(|(n, _)| &**n == name) {
            Some(i) => self.attrs[i].1 = value.into(),
            None => self.attrs.push((name.into(), value.into())),
        }
        self
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| &**v)
    }
}

/// What a node stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNodeKind {
    /// Element or component placeholder
    Element { tag: Box<str> },
    /// Text content
    Text(Box<str>),
    /// Comment; also used for "render nothing" and async placeholders
    Comment(Box<str>),
    /// Neither tag nor text
    Empty,
}

/// Per-node boolean state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Server rendering: `text` is literal markup
    pub raw: bool,
    pub is_static: bool,
    pub is_root_insert: bool,
    pub is_cloned: bool,
    pub is_once: bool,
    pub is_async_placeholder: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            raw: false,
            is_static: false,
            is_root_insert: true,
            is_cloned: false,
            is_once: false,
            is_async_placeholder: false,
        }
    }
}

/// Virtual node
#[derive(Debug)]
pub struct VNode {
    kind: VNodeKind,
    data: Option<Rc<VNodeData>>,
    children: Option<Rc<[VNode]>>,
    /// Produced output artifact (e.g. a real DOM node), set by the reconciler
    elm: RefCell<Option<Opaque>>,
    ns: Option<Box<str>>,
    /// Owning component instance
    context: Option<Weak<dyn Any>>,
    key: Option<Key>,
    component_options: Option<Opaque>,
    component_instance: RefCell<Option<Opaque>>,
    /// Placeholder node in the parent tree
    parent: Option<Opaque>,
    flags: Flags,
    async_factory: Option<Opaque>,
    async_meta: Option<Opaque>,
    ssr_context: Option<Opaque>,
    fn_context: Option<Weak<dyn Any>>,
    fn_options: Option<Opaque>,
    fn_scope_id: Option<Box<str>>,
}

impl VNode {
    /// Start building a node
    pub fn builder() -> VNodeBuilder {
        VNodeBuilder::default()
    }

    /// Create an element node
    pub fn element(tag: &str, data: Option<VNodeData>, children: Vec<VNode>) -> Self {
        let mut builder = Self::builder().tag(tag).children(children);
        if let Some(data) = data {
            builder = builder.data(data);
        }
        builder.build()
    }

    /// Create a text node from anything displayable
    pub fn text(value: impl fmt::Display) -> Self {
        Self::builder().text(value.to_string()).build()
    }

    /// Create a comment node standing in for "render nothing"
    pub fn empty(text: &str) -> Self {
        Self::builder().text(text).comment().build()
    }

    /// Empty comment node with no text
    pub fn empty_comment() -> Self {
        Self::empty("")
    }

    /// Comment node marking where an async component will be mounted
    pub fn async_placeholder(factory: Opaque, meta: Option<Opaque>) -> Self {
        let mut builder = Self::builder().text("").comment().async_factory(factory);
        builder.async_meta = meta;
        builder.flags.is_async_placeholder = true;
        builder.build()
    }

    /// Clone for reinsertion at another tree position
    ///
    /// Data, children, the rendered element and component options are
    /// shared with `self`. The result is always marked as cloned.
    pub fn clone_node(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            data: self.data.clone(),
            children: self.children.clone(),
            elm: RefCell::new(self.elm.borrow().clone()),
            ns: self.ns.clone(),
            context: self.context.clone(),
            key: self.key.clone(),
            component_options: self.component_options.clone(),
            component_instance: RefCell::new(None),
            parent: None,
            flags: Flags {
                is_static: self.flags.is_static,
                is_cloned: true,
                ..Flags::default()
            },
            async_factory: self.async_factory.clone(),
            async_meta: self.async_meta.clone(),
            ssr_context: None,
            fn_context: self.fn_context.clone(),
            fn_options: self.fn_options.clone(),
            fn_scope_id: self.fn_scope_id.clone(),
        }
    }

    /// Same node with `key` set
    pub fn with_key(self, key: Key) -> Self {
        Self {
            key: Some(key),
            ..self
        }
    }

    /// Same node owned by `owner`
    pub fn with_context(self, owner: &Opaque) -> Self {
        Self {
            context: Some(Rc::downgrade(owner)),
            ..self
        }
    }

    /// Same node attributed to a functional component
    pub fn with_functional(
        self,
        context: &Opaque,
        options: Option<Opaque>,
        scope_id: Option<&str>,
    ) -> Self {
        Self {
            fn_context: Some(Rc::downgrade(context)),
            fn_options: options,
            fn_scope_id: scope_id.map(Into::into),
            ..self
        }
    }

    /// Same node hanging off a placeholder in the parent tree
    pub fn with_parent(self, parent: Opaque) -> Self {
        Self {
            parent: Some(parent),
            ..self
        }
    }

    /// Same node with a server-render context
    pub fn with_ssr_context(self, ssr_context: Opaque) -> Self {
        Self {
            ssr_context: Some(ssr_context),
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> &VNodeKind {
        &self.kind
    }

    /// Tag name if this is an element or component placeholder
    #[inline]
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            VNodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    /// Text of a text or comment node
    #[inline]
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            VNodeKind::Text(text) | VNodeKind::Comment(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.kind, VNodeKind::Element { .. })
    }

    /// Text node that may merge with adjacent text
    #[inline]
    pub fn is_text_node(&self) -> bool {
        matches!(self.kind, VNodeKind::Text(_))
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, VNodeKind::Comment(_))
    }

    pub fn data(&self) -> Option<&Rc<VNodeData>> {
        self.data.as_ref()
    }

    /// Normalized children, if any
    pub fn children(&self) -> Option<&[VNode]> {
        self.children.as_deref()
    }

    /// Children handle, shared with clones
    pub fn shared_children(&self) -> Option<&Rc<[VNode]>> {
        self.children.as_ref()
    }

    /// Rendered output artifact
    pub fn elm(&self) -> Option<Opaque> {
        self.elm.borrow().clone()
    }

    /// Record the output artifact produced for this node
    pub fn set_elm(&self, elm: Option<Opaque>) {
        *self.elm.borrow_mut() = elm;
    }

    pub fn ns(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    /// Owning component, if it is still alive
    pub fn context(&self) -> Option<Opaque> {
        self.context.as_ref().and_then(Weak::upgrade)
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn component_options(&self) -> Option<&Opaque> {
        self.component_options.as_ref()
    }

    /// Component instance mounted for this placeholder
    pub fn component_instance(&self) -> Option<Opaque> {
        self.component_instance.borrow().clone()
    }

    pub fn set_component_instance(&self, instance: Option<Opaque>) {
        *self.component_instance.borrow_mut() = instance;
    }

    pub fn parent(&self) -> Option<&Opaque> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn is_cloned(&self) -> bool {
        self.flags.is_cloned
    }

    pub fn async_factory(&self) -> Option<&Opaque> {
        self.async_factory.as_ref()
    }

    pub fn async_meta(&self) -> Option<&Opaque> {
        self.async_meta.as_ref()
    }

    pub fn ssr_context(&self) -> Option<&Opaque> {
        self.ssr_context.as_ref()
    }

    pub fn fn_context(&self) -> Option<Opaque> {
        self.fn_context.as_ref().and_then(Weak::upgrade)
    }

    pub fn fn_options(&self) -> Option<&Opaque> {
        self.fn_options.as_ref()
    }

    pub fn fn_scope_id(&self) -> Option<&str> {
        self.fn_scope_id.as_deref()
    }
}

/// Clone every node of a reused static subtree or slot
pub fn clone_nodes(nodes: &[VNode]) -> Vec<VNode> {
    nodes.iter().map(VNode::clone_node).collect()
}

/// Builder for [`VNode`]
///
/// The node kind is resolved in [`build`](VNodeBuilder::build): a comment
/// flag wins over text, text wins over tag.
#[derive(Default)]
pub struct VNodeBuilder {
    tag: Option<Box<str>>,
    text: Option<Box<str>>,
    comment: bool,
    data: Option<Rc<VNodeData>>,
    children: Option<Rc<[VNode]>>,
    elm: Option<Opaque>,
    ns: Option<Box<str>>,
    context: Option<Weak<dyn Any>>,
    component_options: Option<Opaque>,
    async_factory: Option<Opaque>,
    async_meta: Option<Opaque>,
    flags: Flags,
}

impl VNodeBuilder {
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn text(mut self, text: impl Into<Box<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Build a comment node
    pub fn comment(mut self) -> Self {
        self.comment = true;
        self
    }

    pub fn data(self, data: VNodeData) -> Self {
        self.shared_data(Rc::new(data))
    }

    pub fn shared_data(mut self, data: Rc<VNodeData>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn children(mut self, children: impl Into<Rc<[VNode]>>) -> Self {
        self.children = Some(children.into());
        self
    }

    pub fn elm(mut self, elm: Opaque) -> Self {
        self.elm = Some(elm);
        self
    }

    pub fn ns(mut self, ns: &str) -> Self {
        self.ns = Some(ns.into());
        self
    }

    pub fn context(mut self, owner: &Opaque) -> Self {
        self.context = Some(Rc::downgrade(owner));
        self
    }

    pub fn component_options(mut self, options: Opaque) -> Self {
        self.component_options = Some(options);
        self
    }

    pub fn async_factory(mut self, factory: Opaque) -> Self {
        self.async_factory = Some(factory);
        self
    }

    pub fn is_static(mut self, value: bool) -> Self {
        self.flags.is_static = value;
        self
    }

    pub fn raw(mut self, value: bool) -> Self {
        self.flags.raw = value;
        self
    }

    pub fn once(mut self, value: bool) -> Self {
        self.flags.is_once = value;
        self
    }

    pub fn root_insert(mut self, value: bool) -> Self {
        self.flags.is_root_insert = value;
        self
    }

    pub fn build(self) -> VNode {
        let kind = match (self.comment, self.text, self.tag) {
            (true, text, _) => VNodeKind::Comment(text.unwrap_or_default()),
            (false, Some(text), _) => VNodeKind::Text(text),
            (false, None, Some(tag)) => VNodeKind::Element { tag },
            (false, None, None) => VNodeKind::Empty,
        };
        let key = self.data.as_ref().and_then(|d| d.key.clone());

        VNode {
            kind,
            data: self.data,
            children: self.children,
            elm: RefCell::new(self.elm),
            ns: self.ns,
            context: self.context,
            key,
            component_options: self.component_options,
            component_instance: RefCell::new(None),
            parent: None,
            flags: self.flags,
            async_factory: self.async_factory,
            async_meta: self.async_meta,
            ssr_context: None,
            fn_context: None,
            fn_options: None,
            fn_scope_id: None,
        }
    }
}
