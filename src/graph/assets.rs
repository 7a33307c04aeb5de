/// Embedded web page for the graph visualization.
///
/// Node positions come precomputed from `/api/graph`; the page only draws
/// them and polls `/api/analysis` until insights have been merged.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>svcgraph - Service Dependencies</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #1a1a2e;
            color: #eee;
        }
        #container { display: flex; height: 100vh; }
        #graph { flex: 1; background: #16213e; overflow: auto; }
        #sidebar {
            width: 340px;
            padding: 20px;
            border-left: 1px solid #333;
            overflow-y: auto;
        }
        h1 { font-size: 1.4em; margin-bottom: 10px; color: #00d9ff; }
        h2 {
            font-size: 1.0em;
            margin: 18px 0 8px;
            color: #888;
            text-transform: uppercase;
            letter-spacing: 1px;
        }
        .stat {
            display: flex;
            justify-content: space-between;
            padding: 6px 0;
            border-bottom: 1px solid #333;
        }
        .stat .value { color: #00d9ff; font-weight: bold; }
        li { margin: 4px 0 4px 16px; }
        .high { color: #e94560; }
        .medium { color: #f5a623; }
        .muted { color: #777; font-style: italic; }
        .link { stroke: #8a8fa3; stroke-width: 1.5; }
        .link.cycle { stroke: #e94560; }
        text { fill: #eee; font-size: 11px; }
    </style>
</head>
<body>
<div id="container">
    <div id="graph"><svg id="canvas"></svg></div>
    <div id="sidebar">
        <h1>Service Graph</h1>
        <div id="metrics"></div>
        <h2>Hotspots</h2><ul id="hotspots"></ul>
        <h2>Cycles</h2><ul id="cycles"></ul>
        <h2>Orphaned</h2><ul id="orphans"></ul>
        <h2>Insights</h2><div id="insights" class="muted">Waiting for insights...</div>
    </div>
</div>
<script>
const NS = "http://www.w3.org/2000/svg";
const R = 18;

function el(name, attrs) {
    const node = document.createElementNS(NS, name);
    for (const [k, v] of Object.entries(attrs)) node.setAttribute(k, v);
    return node;
}

function list(id, items, render) {
    const ul = document.getElementById(id);
    ul.innerHTML = "";
    if (items.length === 0) {
        ul.innerHTML = '<li class="muted">none</li>';
        return;
    }
    for (const item of items) {
        const li = document.createElement("li");
        render(li, item);
        ul.appendChild(li);
    }
}

function drawGraph(data) {
    const svg = document.getElementById("canvas");
    svg.setAttribute("width", data.metadata.width);
    svg.setAttribute("height", data.metadata.height);

    const defs = el("defs", {});
    for (const [id, color] of [["arrow", "#8a8fa3"], ["arrow-cycle", "#e94560"]]) {
        const marker = el("marker", {
            id, viewBox: "0 0 10 10", refX: 10, refY: 5,
            markerWidth: 6, markerHeight: 6, orient: "auto-start-reverse"
        });
        marker.appendChild(el("path", { d: "M 0 0 L 10 5 L 0 10 z", fill: color }));
        defs.appendChild(marker);
    }
    svg.appendChild(defs);

    for (const link of data.links) {
        const cls = link.isCycle ? "link cycle" : "link";
        const marker = link.isCycle ? "url(#arrow-cycle)" : "url(#arrow)";
        if (link.source === link.target) {
            const top = link.y1 - R, apex = top - 2 * R;
            svg.appendChild(el("path", {
                class: cls, fill: "none", "marker-end": marker,
                d: `M ${link.x1 - 6} ${top} C ${link.x1 - 1.5 * R} ${apex}, ${link.x1 + 1.5 * R} ${apex}, ${link.x1 + 6} ${top}`
            }));
            continue;
        }
        const dx = link.x2 - link.x1, dy = link.y2 - link.y1;
        const len = Math.hypot(dx, dy);
        // Too short to trim at both rims: draw centre to centre.
        const trim = len > 2 * R ? R : 0;
        const ux = len > 0 ? dx / len : 0, uy = len > 0 ? dy / len : 0;
        svg.appendChild(el("line", {
            class: cls,
            x1: link.x1 + ux * trim, y1: link.y1 + uy * trim,
            x2: link.x2 - ux * trim, y2: link.y2 - uy * trim,
            "marker-end": marker
        }));
    }

    for (const node of data.nodes) {
        const fill = node.risk === "high" ? "#e94560"
            : node.risk === "medium" ? "#f5a623"
            : node.orphan ? "#555b6e" : "#00d9ff";
        const circle = el("circle", { cx: node.x, cy: node.y, r: R, fill });
        const title = el("title", {});
        title.textContent = `${node.name} (${node.category}) in ${node.fanIn} / out ${node.fanOut}`;
        circle.appendChild(title);
        svg.appendChild(circle);
        const label = el("text", { x: node.x, y: node.y + R + 14, "text-anchor": "middle" });
        label.textContent = node.name;
        svg.appendChild(label);
    }
}

function drawAnalysis(record) {
    const m = record.analysis.metrics;
    document.getElementById("metrics").innerHTML = [
        ["Services", m.totalNodes],
        ["Dependencies", m.totalEdges],
        ["Max degree", m.maxDegree],
        ["Avg degree", m.avgDegree.toFixed(2)],
        ["Complexity", m.complexityScore],
    ].map(([k, v]) => `<div class="stat"><span>${k}</span><span class="value">${v}</span></div>`).join("");

    list("hotspots", record.analysis.hotspots, (li, h) => {
        li.className = h.riskLevel;
        li.textContent = `${h.nodeId} (degree ${h.degree}, ${h.riskLevel})`;
    });
    list("cycles", record.analysis.cycles, (li, c) => { li.textContent = c.join(" → "); });
    list("orphans", record.analysis.orphanedNodes, (li, o) => { li.textContent = o; });

    if (record.insights) {
        const box = document.getElementById("insights");
        box.className = "";
        box.innerHTML = "";
        const p = document.createElement("p");
        p.textContent = record.insights.healthAssessment;
        box.appendChild(p);
        const ul = document.createElement("ul");
        for (const r of record.insights.recommendations) {
            const li = document.createElement("li");
            li.className = r.priority;
            li.textContent = `${r.issue}: ${r.recommendation}`;
            ul.appendChild(li);
        }
        box.appendChild(ul);
        return true;
    }
    return false;
}

async function refresh() {
    const record = await (await fetch("/api/analysis")).json();
    if (!drawAnalysis(record)) setTimeout(refresh, 3000);
}

fetch("/api/graph").then(r => r.json()).then(drawGraph);
refresh();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_draws_from_api() {
        assert!(INDEX_HTML.contains(r#"fetch("/api/graph")"#));
        assert!(INDEX_HTML.contains(r#"fetch("/api/analysis")"#));
        // Self-loops get their own path; short edges fall back to untrimmed lines.
        assert!(INDEX_HTML.contains("link.source === link.target"));
        assert!(INDEX_HTML.contains("len > 2 * R ? R : 0"));
    }
}
