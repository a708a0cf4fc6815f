//! Child-list normalization
//!
//! Turns raw render output into a flat sequence of nodes before it is
//! attached to a parent. The compiler decides per call site which path is
//! needed:
//!
//! - plain markup children are already `Vec<VNode>` and skip normalization;
//! - children containing components only need [`shallow_normalize`], since a
//!   functional component may return a list but always normalizes its own
//!   children first;
//! - hand-written render output, loops and `<template>`/`<slot>` expansion
//!   need [`deep_normalize`].

use serde::{Deserialize, Serialize};

use crate::child::{Child, ChildList};
use crate::vnode::{Key, VNode};

/// Normalization required by a call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Children are already a flat list of nodes
    #[default]
    Skip,
    /// At most one level of nested lists of normalized nodes
    Shallow,
    /// Arbitrary nesting, primitives and holes
    Deep,
}

impl From<u8> for NormalizationMode {
    /// Compiler encoding: `1` shallow, `2` deep, anything else skip
    fn from(flag: u8) -> Self {
        match flag {
            1 => NormalizationMode::Shallow,
            2 => NormalizationMode::Deep,
            _ => NormalizationMode::Skip,
        }
    }
}

/// Normalize `children` with the given mode
///
/// Returns `None` when there is nothing renderable. Non-node entries left
/// over by the skip and shallow paths are dropped.
pub fn normalize(children: Child, mode: NormalizationMode) -> Option<Vec<VNode>> {
    match (mode, children) {
        (NormalizationMode::Deep, children) => deep_normalize(children),
        (NormalizationMode::Shallow, Child::List(list)) => {
            Some(nodes_only(shallow_normalize(list.items)))
        }
        (NormalizationMode::Skip, Child::List(list)) => Some(nodes_only(list.items)),
        _ => None,
    }
}

fn nodes_only(items: Vec<Child>) -> Vec<VNode> {
    items.into_iter().filter_map(Child::into_node).collect()
}

/// Flatten exactly one level of nested lists
///
/// When no entry is a list the input is returned as-is, without
/// reallocating. Lists nested deeper than one level are left in place.
pub fn shallow_normalize(children: Vec<Child>) -> Vec<Child> {
    if !children.iter().any(|c| matches!(c, Child::List(_))) {
        return children;
    }

    let capacity = children
        .iter()
        .map(|c| match c {
            Child::List(list) => list.len(),
            _ => 1,
        })
        .sum();
    let mut flat = Vec::with_capacity(capacity);
    for child in children {
        match child {
            Child::List(list) => flat.extend(list.items),
            other => flat.push(other),
        }
    }

    tracing::debug!("Shallow normalization flattened to {} children", flat.len());
    flat
}

/// Fully normalize arbitrary render output
///
/// A single primitive becomes one text node, a list is flattened
/// recursively with adjacent text merged, and anything else (including a
/// bare node or boolean) yields `None`.
pub fn deep_normalize(children: Child) -> Option<Vec<VNode>> {
    match children {
        Child::List(list) => Some(normalize_list(list, None)),
        other => other.primitive_text().map(|text| vec![VNode::text(text)]),
    }
}

/// Flatten `list` into an accumulator
///
/// `nested` is the nesting path of `list` inside the top-level children,
/// e.g. `_1_0`; it is absent at the top level and only feeds synthetic keys.
fn normalize_list(list: ChildList, nested: Option<&str>) -> Vec<VNode> {
    let ChildList { items, is_vlist } = list;
    let mut res: Vec<VNode> = Vec::with_capacity(items.len());

    for (i, child) in items.into_iter().enumerate() {
        match child {
            Child::Null | Child::Bool(_) | Child::Opaque(_) => continue,
            Child::List(inner) => {
                if inner.is_empty() {
                    continue;
                }
                let label = format!("{}_{}", nested.unwrap_or(""), i);
                let inner = normalize_list(inner, Some(&label));

                // merge text across the nesting boundary
                let head_merged = match inner.first() {
                    Some(head) if head.is_text_node() => {
                        merge_into_last(&mut res, head.text_content().unwrap_or_default())
                    }
                    _ => false,
                };
                res.extend(inner.into_iter().skip(usize::from(head_merged)));
            }
            Child::Node(node) => {
                if node.is_text_node()
                    && merge_into_last(&mut res, node.text_content().unwrap_or_default())
                {
                    continue;
                }

                let node = match nested {
                    Some(label) if is_vlist && node.is_element() && node.key().is_none() => {
                        let key = Key::synthetic(label, i);
                        tracing::trace!(
                            "Synthetic key {} for <{}>",
                            key,
                            node.tag().unwrap_or_default()
                        );
                        node.with_key(key)
                    }
                    _ => node,
                };
                res.push(node);
            }
            primitive => {
                if let Some(text) = primitive.primitive_text() {
                    push_primitive(&mut res, text);
                }
            }
        }
    }

    res
}

fn push_primitive(res: &mut Vec<VNode>, text: String) {
    if !merge_into_last(res, &text) && !text.is_empty() {
        res.push(VNode::text(text));
    }
}

/// Append `text` to the last node if it is a text node
///
/// The slot is replaced by a fresh text node; nodes handed in by the caller
/// are never modified.
fn merge_into_last(res: &mut [VNode], text: &str) -> bool {
    match res.last_mut() {
        Some(last) if last.is_text_node() => {
            let merged = format!("{}{}", last.text_content().unwrap_or_default(), text);
            *last = VNode::text(merged);
            true
        }
        _ => false,
    }
}
