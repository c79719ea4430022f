//! Standalone HTML export.

use super::figure::Figure;
use crate::error::Result;

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render a figure as a self-contained HTML page.
///
/// The figure JSON is inlined; Plotly itself is loaded from its CDN.
pub fn render_html(figure: &Figure) -> Result<String> {
    // "</" inside a string would otherwise close the script element
    let json = figure.to_json()?.replace("</", "<\\/");
    let title = escape_html(&figure.layout.title.text);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="plot" style="width:100%;"></div>
<script>
const figure = {json};
Plotly.newPlot("plot", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#,
        title = title,
        cdn = PLOTLY_CDN,
        json = json,
    ))
}

fn escape_html(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::figure::{AxisValue, Layout, Trace};

    #[test]
    fn test_page_embeds_figure() {
        let mut figure = Figure::new(Layout::new("Flight <3>", "t", "v", 700));
        figure.add_trace(Trace::scattergl(
            "a.csv:roll (X: t)",
            vec![AxisValue::Number(0.0)],
            &[1.0],
        ));

        let html = render_html(&figure).unwrap();
        assert!(html.contains(PLOTLY_CDN));
        assert!(html.contains("<title>Flight &lt;3&gt;</title>"));
        assert!(html.contains("\"type\":\"scattergl\""));
        assert!(html.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let mut figure = Figure::new(Layout::new("t", "x", "y", 700));
        figure.add_trace(Trace::scattergl("</script><b>", vec![], &[]));

        let html = render_html(&figure).unwrap();
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("<\\/script><b>"));
    }
}
