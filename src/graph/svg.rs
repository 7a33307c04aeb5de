use super::data::{GraphData, GraphLink, GraphNode};
use crate::model::RiskLevel;
use std::fmt::Write;

const NODE_RADIUS: f64 = 18.0;
const EDGE_COLOR: &str = "#8a8fa3";
const CYCLE_COLOR: &str = "#e94560";

/// Static SVG of the circular layout. Output depends only on `data`.
pub fn render_svg(data: &GraphData) -> String {
    let width = data.metadata.width;
    let height = data.metadata.height;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(out, "  <defs>");
    let _ = writeln!(out, "{}", arrow_marker("arrow", EDGE_COLOR));
    let _ = writeln!(out, "{}", arrow_marker("arrow-cycle", CYCLE_COLOR));
    let _ = writeln!(out, "  </defs>");
    let _ = writeln!(
        out,
        r##"  <rect width="100%" height="100%" fill="#16213e"/>"##
    );

    let _ = writeln!(out, r#"  <g class="links">"#);
    for link in &data.links {
        out.push_str(&render_link(link));
    }
    let _ = writeln!(out, "  </g>");

    let _ = writeln!(out, r#"  <g class="nodes">"#);
    for node in &data.nodes {
        out.push_str(&render_node(node));
    }
    let _ = writeln!(out, "  </g>");
    let _ = writeln!(out, "</svg>");

    out
}

fn arrow_marker(id: &str, color: &str) -> String {
    format!(
        r#"    <marker id="{id}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="6" markerHeight="6" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{color}"/></marker>"#
    )
}

fn render_link(link: &GraphLink) -> String {
    let (color, marker, class) = if link.is_cycle {
        (CYCLE_COLOR, "arrow-cycle", "link cycle")
    } else {
        (EDGE_COLOR, "arrow", "link")
    };
    let title = format!(
        "<title>{} → {}</title>",
        escape(&link.source),
        escape(&link.target)
    );

    if link.source == link.target {
        return format!(
            "    <path class=\"{class} self-loop\" d=\"{d}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"1.5\" marker-end=\"url(#{marker})\">{title}</path>\n",
            d = self_loop_path(link.x1, link.y1),
        );
    }

    let (x1, y1, x2, y2) = trim_to_rims(link);

    format!(
        "    <line class=\"{class}\" x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{color}\" stroke-width=\"1.5\" marker-end=\"url(#{marker})\">{title}</line>\n"
    )
}

/// Segment endpoints pulled in to the node rims so the arrow head stays
/// visible. Segments too short to trim at both ends are drawn centre to centre.
fn trim_to_rims(link: &GraphLink) -> (f64, f64, f64, f64) {
    let dx = link.x2 - link.x1;
    let dy = link.y2 - link.y1;
    let length = (dx * dx + dy * dy).sqrt();

    if length <= NODE_RADIUS * 2.0 {
        return (link.x1, link.y1, link.x2, link.y2);
    }

    let ux = dx / length;
    let uy = dy / length;
    (
        link.x1 + ux * NODE_RADIUS,
        link.y1 + uy * NODE_RADIUS,
        link.x2 - ux * NODE_RADIUS,
        link.y2 - uy * NODE_RADIUS,
    )
}

/// Loop above the node, leaving and re-entering at its top rim.
fn self_loop_path(x: f64, y: f64) -> String {
    let top = y - NODE_RADIUS;
    let apex = top - NODE_RADIUS * 2.0;
    format!(
        "M {:.2} {:.2} C {:.2} {:.2}, {:.2} {:.2}, {:.2} {:.2}",
        x - 6.0,
        top,
        x - NODE_RADIUS * 1.5,
        apex,
        x + NODE_RADIUS * 1.5,
        apex,
        x + 6.0,
        top
    )
}

fn render_node(node: &GraphNode) -> String {
    let fill = match node.risk {
        Some(RiskLevel::High) => "#e94560",
        Some(RiskLevel::Medium) => "#f5a623",
        None if node.orphan => "#555b6e",
        None => "#00d9ff",
    };

    format!(
        "    <g class=\"node\" data-id=\"{id}\"><circle cx=\"{x:.2}\" cy=\"{y:.2}\" r=\"{r}\" fill=\"{fill}\"/><text x=\"{x:.2}\" y=\"{ty:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"11\" fill=\"#eeeeee\">{name}</text><title>{name} ({category}) degree {degree}</title></g>\n",
        id = escape(&node.id),
        x = node.x,
        y = node.y,
        r = NODE_RADIUS,
        ty = node.y + NODE_RADIUS + 14.0,
        name = escape(&node.name),
        category = escape(&node.category),
        degree = node.degree,
    )
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
