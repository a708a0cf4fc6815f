//! fOS VDOM - Virtual node tree
//!
//! Node model and child-list normalization for declarative rendering.
//! Render functions produce raw, possibly nested output; this crate turns
//! it into flat, text-merged, key-stabilized node lists for the reconciler.
//!
//! # Example
//! ```rust
//! use fos_vdom::{deep_normalize, Child, VNode};
//!
//! let children = Child::list([
//!     Child::from(VNode::text("Hello ")),
//!     Child::from(vec![Child::from("World"), Child::from(42)]),
//!     Child::Null,
//!     Child::from(VNode::builder().tag("span").build()),
//! ]);
//! let nodes = deep_normalize(children).unwrap();
//! assert_eq!(nodes.len(), 2);
//! assert_eq!(nodes[0].text_content(), Some("Hello World42"));
//! ```

mod child;
mod config;
mod normalize;
mod render;
mod vnode;
pub mod path;

pub use child::{Child, ChildList};
pub use config::Config;
pub use normalize::{deep_normalize, normalize, shallow_normalize, NormalizationMode};
pub use render::{render_list, RenderContext, RenderError};
pub use vnode::{clone_nodes, Flags, Key, Opaque, VNode, VNodeBuilder, VNodeData, VNodeKind};
