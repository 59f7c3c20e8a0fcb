use std::io::Write;

use weft::{
    Component, ComponentCssClass, ComponentScript, CssClass, Fragment, RenderContext, RenderError,
    Text, component_fn, render_css_items, render_document, render_script_items, render_to_string,
    serialize_script_call,
};

fn widget_class() -> CssClass {
    ComponentCssClass::new("widget", "color:teal;").into()
}

fn widget_script() -> ComponentScript {
    ComponentScript::new(
        "widgetInit",
        "function widgetInit(n){}",
        serialize_script_call("widgetInit", &[1]),
    )
}

fn widget(ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
    render_css_items(ctx, w, &[widget_class()])?;
    render_script_items(ctx, w, &[widget_script()])?;
    w.write_all(b"<div class=\"widget\">")?;
    ctx.children().render(ctx.clear_children(), w)?;
    w.write_all(b"</div>")?;
    Ok(())
}

#[test]
fn nested_instances_emit_resources_once_per_document() {
    let inner = Text::new("inner");
    let outer = component_fn(move |ctx: RenderContext<'_>, w: &mut dyn Write| {
        widget(ctx.with_children(&inner), w)
    });
    let tree = Fragment::new()
        .push(component_fn(widget))
        .push(outer)
        .push(component_fn(widget));

    let mut out = Vec::new();
    let ledger = render_document(&tree, &mut out).expect("render");
    let html = String::from_utf8(out).expect("utf-8");

    assert_eq!(html.matches("<style").count(), 1);
    assert_eq!(html.matches("<script").count(), 1);
    assert_eq!(html.matches("<div class=\"widget\">").count(), 3);
    assert!(html.contains("<div class=\"widget\">inner</div>"));

    let class_name = widget_class().class_name().to_string();
    assert_eq!(
        ledger.all(),
        vec![format!("class_{class_name}"), "script_widgetInit".to_string()]
    );
}

#[test]
fn separate_documents_each_carry_their_own_resources() {
    let tree = component_fn(widget);
    let first = render_to_string(&tree).expect("first render");
    let second = render_to_string(&tree).expect("second render");

    assert_eq!(first, second);
    assert_eq!(first.matches("<style").count(), 1);
}

#[test]
fn detached_context_emits_on_every_call() {
    let mut out = Vec::new();
    let ctx = RenderContext::detached();
    widget(ctx, &mut out).expect("first");
    widget(ctx, &mut out).expect("second");
    let html = String::from_utf8(out).expect("utf-8");

    assert_eq!(html.matches("<style").count(), 2);
}
