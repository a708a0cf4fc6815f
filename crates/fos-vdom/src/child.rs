//! Raw render output
//!
//! What a render function hands back before normalization: nodes,
//! primitives, holes, and lists of those nested to any depth.

use crate::vnode::{Opaque, VNode};

/// One entry of raw render output
#[derive(Debug)]
pub enum Child {
    Node(VNode),
    Str(String),
    Int(i64),
    Float(f64),
    /// Renders nothing (conditional output such as `cond && node`)
    Bool(bool),
    /// Renders nothing
    Null,
    List(ChildList),
    /// Anything else a render function produced; never renderable
    Opaque(Opaque),
}

impl Child {
    /// Build an unmarked list
    pub fn list<I, C>(items: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        Child::List(ChildList::new(items.into_iter().map(Into::into).collect()))
    }

    /// Text a string, integer or float renders as; `None` for anything else
    pub fn primitive_text(self) -> Option<String> {
        match self {
            Child::Str(s) => Some(s),
            Child::Int(n) => Some(n.to_string()),
            Child::Float(n) => Some(number_text(n)),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&VNode> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn into_node(self) -> Option<VNode> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// Ordered list of raw children
#[derive(Debug, Default)]
pub struct ChildList {
    pub items: Vec<Child>,
    /// Produced by a looping construct; key-less elements get synthetic keys
    pub is_vlist: bool,
}

impl ChildList {
    pub fn new(items: Vec<Child>) -> Self {
        Self {
            items,
            is_vlist: false,
        }
    }

    /// List produced by a looping construct
    pub fn vlist(items: Vec<Child>) -> Self {
        Self {
            items,
            is_vlist: true,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<ChildList> for Child {
    fn from(list: ChildList) -> Self {
        Child::List(list)
    }
}

impl From<VNode> for Child {
    fn from(node: VNode) -> Self {
        Child::Node(node)
    }
}

impl From<String> for Child {
    fn from(s: String) -> Self {
        Child::Str(s)
    }
}

impl From<&str> for Child {
    fn from(s: &str) -> Self {
        Child::Str(s.to_string())
    }
}

impl From<i64> for Child {
    fn from(n: i64) -> Self {
        Child::Int(n)
    }
}

impl From<i32> for Child {
    fn from(n: i32) -> Self {
        Child::Int(n.into())
    }
}

impl From<u32> for Child {
    fn from(n: u32) -> Self {
        Child::Int(n.into())
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Float(n)
    }
}

impl From<bool> for Child {
    fn from(b: bool) -> Self {
        Child::Bool(b)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Child::Null, Into::into)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Child::list(items)
    }
}

/// Render a float the way a script runtime stringifies numbers
///
/// Magnitudes from `1e21` up and below `1e-6` use exponent form with an
/// explicit sign (`1e+21`, `1e-7`).
pub(crate) fn number_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n == 0.0 {
        // covers -0
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    } else {
        n.to_string()
    }
}
