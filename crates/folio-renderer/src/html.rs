//! HTML backend for document rendering.
//!
//! Produces semantic HTML5 output suitable for embedding in a page body.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::options::RenderOptions;
use crate::util::{escape_attr, escape_html};

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<pre><code>` for code blocks
/// - `<blockquote>` for blockquotes
/// - `<img>` for images
/// - `<iframe>` wrapped in a `<div>` for video embeds
/// - Disabled checkboxes for task items
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_attr(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: Option<&str>, options: &RenderOptions, out: &mut String) {
        write!(out, r#"<img src="{}""#, escape_attr(src)).unwrap();
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            write!(out, r#" title="{}""#, escape_attr(title)).unwrap();
        }
        write!(out, r#" alt="{}""#, escape_attr(alt)).unwrap();
        push_class(options.image_class.as_deref(), out);
        out.push('>');
    }

    fn video_embed(
        embed_url: &str,
        width: u32,
        height: u32,
        options: &RenderOptions,
        out: &mut String,
    ) {
        out.push_str("<div");
        push_class(options.embed_class.as_deref(), out);
        write!(
            out,
            r#"><iframe src="{}" width="{width}" height="{height}" frameborder="0" allowfullscreen></iframe></div>"#,
            escape_attr(embed_url)
        )
        .unwrap();
    }

    fn link_start(href: &str, options: &RenderOptions, out: &mut String) {
        write!(out, r#"<a href="{}""#, escape_attr(href)).unwrap();
        if let Some(rel) = options.link_rel.as_deref().filter(|r| !r.is_empty()) {
            write!(out, r#" rel="{}""#, escape_attr(rel)).unwrap();
        }
        if let Some(target) = options.link_target.as_deref().filter(|t| !t.is_empty()) {
            write!(out, r#" target="{}""#, escape_attr(target)).unwrap();
        }
        out.push('>');
    }

    fn task_list_start(out: &mut String) {
        out.push_str(r#"<ul class="task-list">"#);
    }

    fn task_list_end(out: &mut String) {
        out.push_str("</ul>");
    }

    fn task_item_start(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<li class="task-item"><input type="checkbox" checked disabled><span>"#);
        } else {
            out.push_str(r#"<li class="task-item"><input type="checkbox" disabled><span>"#);
        }
    }

    fn task_item_end(out: &mut String) {
        out.push_str("</span></li>");
    }
}

fn push_class(class: Option<&str>, out: &mut String) {
    if let Some(class) = class.filter(|c| !c.is_empty()) {
        write!(out, r#" class="{}""#, escape_attr(class)).unwrap();
    }
}
