//! Example: one render pass through fos-vdom

use fos_vdom::{render_list, Child, Config, NormalizationMode, RenderContext, VNode, VNodeData};
use tracing_subscriber::EnvFilter;

fn dump(node: &VNode, depth: usize) {
    let indent = "  ".repeat(depth);
    match (node.tag(), node.text_content()) {
        (Some(tag), _) => match node.key() {
            Some(key) => println!("{}<{} key={}>", indent, tag, key),
            None => println!("{}<{}>", indent, tag),
        },
        (None, Some(text)) if node.is_comment() => println!("{}<!--{}-->", indent, text),
        (None, Some(text)) => println!("{}{:?}", indent, text),
        (None, None) => println!("{}(empty)", indent),
    }
    for child in node.children().unwrap_or_default() {
        dump(child, depth + 1);
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ctx = RenderContext::new(Config::default());
    let todos = ["write docs", "build crate", "ship"];

    let list = ctx.create_element_with(
        Some("ul"),
        Some(VNodeData::new().attr("class", "todos")),
        Child::list([render_list(todos, |todo, _| {
            ctx.create_element(Some("li"), None, vec![VNode::text(todo)])
        })]),
        NormalizationMode::Deep,
    );
    let header = ctx.create_element_with(
        Some("h1"),
        None,
        Child::list([
            Child::from("Todo"),
            Child::from(" ("),
            Child::from(todos.len() as i64),
            Child::from(")"),
        ]),
        NormalizationMode::Deep,
    );

    let root = ctx.try_resolve_root(ctx.create_element(Some("main"), None, vec![header, list]))?;
    dump(&root, 0);
    Ok(())
}
