pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Standalone result page for browsers that posted the contact form natively.
pub fn render_result_page(title: &str, message: &str, back_href: &str) -> String {
    let title = escape_html(title);
    format!(
        r#"<!doctype html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1" /><title>{title}</title><style>body{{font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;background:#FAFAFA;color:#111827;padding:2rem;line-height:1.6}} .card{{max-width:720px;margin:0 auto;background:#fff;border:1px solid #E5E7EB;border-radius:12px;box-shadow:0 10px 15px -3px rgba(0,0,0,.1),0 4px 6px -4px rgba(0,0,0,.1);padding:1.5rem}}</style></head><body><div class="card"><h1 style="margin-top:0">{title}</h1><pre style="white-space:pre-wrap">{message}</pre><p><a href="{href}">Back to contact</a></p></div></body></html>"#,
        title = title,
        message = escape_html(message),
        href = escape_html(back_href),
    )
}
