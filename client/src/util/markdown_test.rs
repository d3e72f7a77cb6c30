use super::*;

#[test]
fn headings_and_emphasis_render() {
    let html = render_markdown_html("## Cluster 1\n\nMostly **tumour** samples.");
    assert!(html.contains("<h2>Cluster 1</h2>"));
    assert!(html.contains("<strong>tumour</strong>"));
}

#[test]
fn tables_are_enabled() {
    let html = render_markdown_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(html.contains("<table>"));
}

#[test]
fn raw_html_is_dropped() {
    let html = render_markdown_html("before <script>alert(1)</script> after");
    assert!(!html.contains("<script>"));
    assert!(html.contains("before"));
}
