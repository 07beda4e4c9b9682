//! Standalone SVG drawing of a computed [`Layout`].

use std::fmt::Write as _;
use stratum::{Layout, LayoutNode, Waypoint};

const MARGIN: f64 = 8.0;
const STYLE: &str = "\
.node rect{fill:#f4f6fb;stroke:#4a5a80;stroke-width:1}\
.node text{font:12px sans-serif;fill:#1c2333;text-anchor:middle;dominant-baseline:central}\
.edge{fill:none;stroke:#7a869a;stroke-width:1.2}\
.edge.reversed{stroke-dasharray:4 3}";

pub fn render(layout: &Layout) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
        -MARGIN,
        -MARGIN,
        layout.width + 2.0 * MARGIN,
        layout.height + 2.0 * MARGIN,
        layout.width + 2.0 * MARGIN,
        layout.height + 2.0 * MARGIN,
    );
    out.push_str("<style>");
    out.push_str(STYLE);
    out.push_str("</style>");
    out.push_str(
        r##"<defs><marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse"><path d="M0,0L10,5L0,10z" fill="#7a869a"/></marker></defs>"##,
    );

    out.push_str(r#"<g class="edges">"#);
    for edge in &layout.edges {
        let (Some(source), Some(target)) = (layout.node(&edge.source), layout.node(&edge.target))
        else {
            continue;
        };
        let class = if edge.reversed { "edge reversed" } else { "edge" };
        if edge.source == edge.target {
            let (x, y) = (source.x + source.width, source.y + source.height / 2.0);
            let _ = write!(
                out,
                r#"<path class="{class}" d="M{},{} c18,-16 18,20 0,8" marker-end="url(#arrow)"/>"#,
                x,
                y - 4.0,
            );
            continue;
        }
        let points = clip_to_boxes(&edge.points, source, target);
        out.push_str(r#"<polyline class=""#);
        out.push_str(class);
        out.push_str(r#"" points=""#);
        for (i, (x, y)) in points.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{x},{y}");
        }
        out.push_str(r#"" marker-end="url(#arrow)"/>"#);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for node in &layout.nodes {
        out.push_str(r#"<g class="node" data-id=""#);
        escape_xml_into(&mut out, &node.id);
        let _ = write!(
            out,
            r#""><rect x="{}" y="{}" width="{}" height="{}" rx="4"/><text x="{}" y="{}">"#,
            node.x,
            node.y,
            node.width,
            node.height,
            node.x + node.width / 2.0,
            node.y + node.height / 2.0,
        );
        escape_xml_into(&mut out, &node.id);
        out.push_str("</text></g>");
    }
    out.push_str("</g></svg>\n");
    out
}

/// Waypoint centres with the two endpoints moved onto the border of their node boxes.
fn clip_to_boxes(
    points: &[Waypoint],
    source: &LayoutNode,
    target: &LayoutNode,
) -> Vec<(f64, f64)> {
    let mut out: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    if out.len() < 2 {
        return out;
    }
    let last = out.len() - 1;
    out[0] = intersect_box(source, out[1]);
    out[last] = intersect_box(target, out[last - 1]);
    out
}

fn intersect_box(node: &LayoutNode, toward: (f64, f64)) -> (f64, f64) {
    let x = node.x + node.width / 2.0;
    let y = node.y + node.height / 2.0;
    let dx = toward.0 - x;
    let dy = toward.1 - y;
    let mut w = node.width / 2.0;
    let mut h = node.height / 2.0;

    if dx == 0.0 && dy == 0.0 {
        return (x + w, y);
    }

    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };
    (x + sx, y + sy)
}

fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}
