//! Edge case tests for fos-vdom
//!
//! Holes, empty lists, malformed entries and boundary shapes.

use std::rc::Rc;

use fos_vdom::{
    deep_normalize, normalize, shallow_normalize, Child, ChildList, Key, NormalizationMode,
    RenderContext, RenderError, VNode, VNodeData, VNodeKind,
};

// ============================================================================
// DEEP NORMALIZATION
// ============================================================================

#[test]
fn test_falsy_elision() {
    let out = deep_normalize(Child::list([
        Child::Null,
        Child::Bool(false),
        Child::from(None::<VNode>),
        Child::from(""),
        Child::from(0),
    ]))
    .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text_content(), Some("0"));
}

#[test]
fn test_empty_input_list() {
    let out = deep_normalize(Child::list(Vec::<Child>::new())).unwrap();
    assert!(out.is_empty(), "An empty list normalizes to an empty sequence");
}

#[test]
fn test_only_empty_nested_lists() {
    let out = deep_normalize(Child::list([
        Child::list(Vec::<Child>::new()),
        Child::list([Child::list(Vec::<Child>::new())]),
        Child::list([Child::Null]),
    ]))
    .unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_opaque_entries_render_nothing() {
    let out = deep_normalize(Child::list([
        Child::from("a"),
        Child::Opaque(Rc::new(7u8)),
        Child::from("b"),
    ]))
    .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text_content(), Some("ab"));

    assert!(deep_normalize(Child::Opaque(Rc::new(()))).is_none());
}

#[test]
fn test_deeply_nested() {
    let mut child = Child::from("leaf");
    for _ in 0..64 {
        child = Child::list([child]);
    }
    let out = deep_normalize(Child::list([Child::from("root-"), child])).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].text_content(), Some("root-leaf"));
}

#[test]
fn test_empty_string_after_node_is_dropped() {
    let out = deep_normalize(Child::list([
        Child::from(VNode::builder().tag("b").build()),
        Child::from(""),
    ]))
    .unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn test_empty_text_node_is_kept() {
    let out = deep_normalize(Child::list([
        Child::from(VNode::builder().tag("b").build()),
        Child::from(VNode::text("")),
    ]))
    .unwrap();
    assert_eq!(out.len(), 2, "Only empty primitives are dropped");
}

#[test]
fn test_merge_replaces_user_node() {
    let owner: fos_vdom::Opaque = Rc::new("vm");
    let text = VNode::builder().text("a").context(&owner).build();
    let out = deep_normalize(Child::list([Child::from(text), Child::from("b")])).unwrap();
    assert_eq!(out[0].text_content(), Some("ab"));
    assert!(out[0].context().is_none(), "Merged text is a fresh node");
}

#[test]
fn test_unicode_text_merge() {
    let out = deep_normalize(Child::from(vec!["世界", "🚀", "Привет"])).unwrap();
    assert_eq!(out[0].text_content(), Some("世界🚀Привет"));
}

#[test]
fn test_float_formatting() {
    let out = deep_normalize(Child::list([Child::from(1.0), Child::from(f64::INFINITY)])).unwrap();
    assert_eq!(out[0].text_content(), Some("1Infinity"));
}

// ============================================================================
// SYNTHETIC KEYS
// ============================================================================

#[test]
fn test_vlist_skips_comments_and_keyed() {
    let list = ChildList::vlist(vec![
        VNode::empty("v-if").into(),
        VNode::element("li", Some(VNodeData::keyed(1)), Vec::new()).into(),
        VNode::builder().tag("li").build().into(),
    ]);
    let out = deep_normalize(Child::list([Child::from(list)])).unwrap();

    assert!(out[0].key().is_none());
    assert_eq!(out[1].key(), Some(&Key::Int(1)));
    assert_eq!(out[2].key().map(ToString::to_string).as_deref(), Some("__vlist_0_2__"));
}

#[test]
fn test_unmarked_nested_list_gets_no_keys() {
    let nested = Child::list([VNode::builder().tag("li").build()]);
    let out = deep_normalize(Child::list([nested])).unwrap();
    assert!(out[0].key().is_none());
}

#[test]
fn test_user_key_cannot_look_synthetic_by_accident() {
    for user in ["0", "_0_1", "vlist_0_1", "item-3"] {
        assert!(!Key::from(user).is_synthetic(), "{} should not look synthetic", user);
    }
}

// ============================================================================
// SHALLOW NORMALIZATION
// ============================================================================

#[test]
fn test_shallow_empty_input() {
    let out = shallow_normalize(Vec::new());
    assert!(out.is_empty());
}

#[test]
fn test_shallow_does_not_merge_text() {
    let out = shallow_normalize(vec![
        Child::from(VNode::text("a")),
        Child::list([VNode::text("b")]),
    ]);
    assert_eq!(out.len(), 2);
}

#[test]
fn test_shallow_mode_drops_non_nodes() {
    let out = normalize(
        Child::list([Child::from(VNode::text("a")), Child::list([Child::from("raw")])]),
        NormalizationMode::Shallow,
    )
    .unwrap();
    assert_eq!(out.len(), 1);
}

// ============================================================================
// NODE MODEL
// ============================================================================

#[test]
fn test_component_instance_slot() {
    let node = VNode::builder().tag("my-comp").component_options(Rc::new("opts")).build();
    assert!(node.component_instance().is_none());
    node.set_component_instance(Some(Rc::new("instance")));
    assert!(node.component_instance().is_some());
    assert!(node.clone_node().component_instance().is_none());
}

#[test]
fn test_functional_fields_survive_clone() {
    let fn_ctx: fos_vdom::Opaque = Rc::new("parent");
    let node = VNode::builder()
        .tag("div")
        .build()
        .with_functional(&fn_ctx, Some(Rc::new("options")), Some("data-v-1"));
    let cloned = node.clone_node();
    assert_eq!(cloned.fn_scope_id(), Some("data-v-1"));
    assert!(Rc::ptr_eq(&cloned.fn_context().unwrap(), &fn_ctx));
    assert!(cloned.fn_options().is_some());
}

#[test]
fn test_ssr_context_not_cloned() {
    let node = VNode::builder().tag("div").build().with_ssr_context(Rc::new(()));
    assert!(node.ssr_context().is_some());
    assert!(node.clone_node().ssr_context().is_none());
}

#[test]
fn test_raw_and_root_insert_flags() {
    let node = VNode::builder().text("<b>x</b>").raw(true).root_insert(false).build();
    assert!(node.flags().raw);
    assert!(!node.flags().is_root_insert);
    assert_eq!(node.kind(), &VNodeKind::Text("<b>x</b>".into()));
}

// ============================================================================
// ROOT RESOLUTION
// ============================================================================

#[test]
fn test_warning_disabled_still_falls_back() {
    let ctx = RenderContext::new(fos_vdom::Config {
        warn_on_multiple_roots: false,
        ..Default::default()
    });
    let root = ctx.resolve_root(vec![VNode::text("a"), VNode::text("b")]);
    assert!(root.is_comment());
}

#[test]
fn test_error_messages() {
    let err = RenderError::MultipleRoots { count: 3 };
    assert!(err.to_string().contains("Multiple root nodes"));
    assert_eq!(RenderError::NoRoot.to_string(), "Render function returned no root node");
}
