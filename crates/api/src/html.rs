//! HTML Page Rendering

use axum::response::Html;
use std::fmt::Write;

/// Escape text for element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body fragment in the shared page layout
pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }}
label {{ display: block; margin-top: 0.8rem; }}
.success {{ background: #e6f4ea; padding: 0.8rem; border-radius: 4px; }}
.error {{ background: #fdecea; padding: 0.8rem; border-radius: 4px; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.3rem 0.5rem; text-align: left; }}
</style>
</head>
<body>
<nav><a href="/">Estimator</a> | <a href="/history">History</a></nav>
{body}
</body>
</html>"#,
        title = escape(title),
        body = body,
    ))
}

/// `<option>` list with `selected` marked
pub fn options(choices: &[&str], selected: &str) -> String {
    let mut out = String::new();
    for choice in choices {
        let mark = if *choice == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{v}"{mark}>{v}</option>"#,
            v = escape(choice),
            mark = mark
        );
    }
    out
}

/// Error list fragment, empty when there are no messages
pub fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<div class="error"><ul>{}</ul></div>"#, items)
}

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;
const CHART_PAD: f64 = 10.0;

/// Line chart of predicted days as inline SVG
pub fn trend_chart(values: &[i64]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let min = values.iter().copied().min().unwrap_or(0) as f64;
    let max = values.iter().copied().max().unwrap_or(0) as f64;
    let span = (max - min).max(1.0);
    let step = if values.len() > 1 {
        (CHART_WIDTH - 2.0 * CHART_PAD) / (values.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = CHART_PAD + step * i as f64;
            let y = CHART_HEIGHT - CHART_PAD - (v as f64 - min) / span * (CHART_HEIGHT - 2.0 * CHART_PAD);
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    format!(
        r##"<svg class="trend" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img"><polyline fill="none" stroke="#1f77b4" stroke-width="2" points="{points}"/></svg>"##,
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        points = points.join(" "),
    )
}
