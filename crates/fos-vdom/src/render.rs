//! Render Context - node construction for one component render
//!
//! Builds parent nodes from raw children using the normalization mode the
//! compiler picked, and turns the render function's return value into the
//! single root node the reconciler expects.

use std::fmt;

use crate::child::{Child, ChildList};
use crate::config::Config;
use crate::normalize::{normalize, NormalizationMode};
use crate::vnode::{Opaque, VNode, VNodeData};

/// Render error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Multiple root nodes ({count}) returned from render function")]
    MultipleRoots { count: usize },

    #[error("Render function returned no root node")]
    NoRoot,
}

/// Node factory bound to the component being rendered
#[derive(Debug, Default)]
pub struct RenderContext {
    config: Config,
    /// Component instance that owns the nodes
    owner: Option<Opaque>,
    /// Placeholder node of this component in the parent tree
    parent_vnode: Option<Opaque>,
}

impl RenderContext {
    /// Create a context with no owning component
    pub fn new(config: Config) -> Self {
        Self {
            config,
            owner: None,
            parent_vnode: None,
        }
    }

    /// Nodes built by this context reference `owner` as their context
    pub fn with_owner(mut self, owner: Opaque) -> Self {
        self.owner = Some(owner);
        self
    }

    /// The resolved root hangs off `parent_vnode`
    pub fn with_parent_vnode(mut self, parent_vnode: Opaque) -> Self {
        self.parent_vnode = Some(parent_vnode);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn owner(&self) -> Option<&Opaque> {
        self.owner.as_ref()
    }

    /// Create an element using the configured default mode
    pub fn create_element(
        &self,
        tag: Option<&str>,
        data: Option<VNodeData>,
        children: impl Into<Child>,
    ) -> VNode {
        self.create_element_with(tag, data, children, self.config.default_mode)
    }

    /// Create an element, normalizing `children` with `mode`
    ///
    /// A missing or empty tag yields an empty comment node.
    pub fn create_element_with(
        &self,
        tag: Option<&str>,
        data: Option<VNodeData>,
        children: impl Into<Child>,
        mode: NormalizationMode,
    ) -> VNode {
        let Some(tag) = tag.filter(|t| !t.is_empty()) else {
            return self.create_empty("");
        };

        let mode = if self.config.always_normalize {
            NormalizationMode::Deep
        } else {
            mode
        };

        let mut builder = VNode::builder().tag(tag);
        if let Some(data) = data {
            builder = builder.data(data);
        }
        if let Some(children) = normalize(children.into(), mode) {
            builder = builder.children(children);
        }
        if let Some(owner) = &self.owner {
            builder = builder.context(owner);
        }
        builder.build()
    }

    pub fn create_text(&self, value: impl fmt::Display) -> VNode {
        VNode::text(value)
    }

    pub fn create_empty(&self, text: &str) -> VNode {
        VNode::empty(text)
    }

    /// Resolve render output to exactly one root node
    ///
    /// A one-element list is unwrapped. Anything else that is not a node is
    /// replaced with an empty comment node.
    pub fn resolve_root(&self, output: impl Into<Child>) -> VNode {
        match self.try_resolve_root(output) {
            Ok(root) => root,
            Err(err) => {
                if self.config.warn_on_multiple_roots
                    && matches!(err, RenderError::MultipleRoots { .. })
                {
                    tracing::warn!("{}", err);
                }
                self.attach(self.create_empty(""))
            }
        }
    }

    /// Strict form of [`resolve_root`](Self::resolve_root)
    pub fn try_resolve_root(&self, output: impl Into<Child>) -> Result<VNode, RenderError> {
        let output = match output.into() {
            Child::List(list) if list.len() == 1 => {
                list.items.into_iter().next().unwrap_or(Child::Null)
            }
            other => other,
        };

        match output {
            Child::Node(root) => Ok(self.attach(root)),
            Child::List(list) if !list.is_empty() => {
                Err(RenderError::MultipleRoots { count: list.len() })
            }
            _ => Err(RenderError::NoRoot),
        }
    }

    fn attach(&self, root: VNode) -> VNode {
        match &self.parent_vnode {
            Some(parent) => root.with_parent(parent.clone()),
            None => root,
        }
    }
}

/// Render each item of a loop, marking the result as a v-list
///
/// `render` receives the item and its index.
pub fn render_list<I, F, C>(items: I, mut render: F) -> Child
where
    I: IntoIterator,
    F: FnMut(I::Item, usize) -> C,
    C: Into<Child>,
{
    let items = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| render(item, i).into())
        .collect();
    Child::List(ChildList::vlist(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn tags(nodes: &[VNode]) -> Vec<&str> {
        nodes.iter().filter_map(VNode::tag).collect()
    }

    #[test]
    fn test_missing_tag_is_empty() {
        let ctx = RenderContext::default();
        assert!(ctx.create_element(None, None, Child::Null).is_comment());
        assert!(ctx.create_element(Some(""), None, Child::Null).is_comment());
    }

    #[test]
    fn test_create_text_and_empty() {
        let ctx = RenderContext::default();
        assert_eq!(ctx.create_text(3).text_content(), Some("3"));
        assert!(ctx.create_empty("note").is_comment());
    }

    #[test]
    fn test_shallow_children() {
        let ctx = RenderContext::default();
        let children = Child::list([
            Child::from(VNode::builder().tag("a").build()),
            Child::list([
                VNode::builder().tag("b").build(),
                VNode::builder().tag("c").build(),
            ]),
        ]);
        let node =
            ctx.create_element_with(Some("div"), None, children, NormalizationMode::Shallow);
        assert_eq!(tags(node.children().unwrap()), ["a", "b", "c"]);
    }

    #[test]
    fn test_always_normalize_forces_deep() {
        let ctx = RenderContext::new(Config {
            always_normalize: true,
            ..Config::default()
        });
        let node = ctx.create_element(Some("p"), None, Child::from(vec!["a", "b"]));
        let children = node.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].text_content(), Some("ab"));
    }

    #[test]
    fn test_owner_becomes_context() {
        let owner: Opaque = Rc::new("vm");
        let ctx = RenderContext::default().with_owner(owner.clone());
        let node = ctx.create_element(Some("div"), None, Child::Null);
        assert!(Rc::ptr_eq(&node.context().unwrap(), &owner));
        assert!(Rc::ptr_eq(ctx.owner().unwrap(), &owner));
    }

    #[test]
    fn test_resolve_single_element_list() {
        let ctx = RenderContext::default();
        let root = ctx.resolve_root(vec![VNode::builder().tag("main").build()]);
        assert_eq!(root.tag(), Some("main"));
    }

    #[test]
    fn test_multiple_roots() {
        let ctx = RenderContext::default();
        let output = || vec![VNode::builder().tag("a").build(), VNode::builder().tag("b").build()];

        assert_eq!(
            ctx.try_resolve_root(output()).unwrap_err(),
            RenderError::MultipleRoots { count: 2 }
        );
        assert!(ctx.resolve_root(output()).is_comment());
    }

    #[test]
    fn test_no_root() {
        let ctx = RenderContext::default();
        assert_eq!(ctx.try_resolve_root(Child::Null).unwrap_err(), RenderError::NoRoot);
        assert_eq!(ctx.try_resolve_root(Vec::<VNode>::new()).unwrap_err(), RenderError::NoRoot);
        assert!(ctx.resolve_root("text").is_comment());
    }

    #[test]
    fn test_root_gets_parent_vnode() {
        let placeholder: Opaque = Rc::new("placeholder");
        let ctx = RenderContext::default().with_parent_vnode(placeholder.clone());
        let root = ctx.resolve_root(VNode::builder().tag("div").build());
        assert!(Rc::ptr_eq(root.parent().unwrap(), &placeholder));
    }

    #[test]
    fn test_render_list_marks_vlist() {
        let Child::List(list) = render_list(["a", "b"], |item, _| item) else {
            panic!("expected list");
        };
        assert!(list.is_vlist);
        assert_eq!(list.len(), 2);
    }
}
