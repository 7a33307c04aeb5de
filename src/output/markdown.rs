use crate::model::{AnalysisRecord, Insights, RiskLevel};
use crate::output::OutputFormatter;
use std::io::Write;

pub struct MarkdownOutput {
    pub title: String,
}

impl MarkdownOutput {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for MarkdownOutput {
    fn default() -> Self {
        Self::new("services")
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, record: &AnalysisRecord, writer: &mut W) -> std::io::Result<()> {
        let analysis = &record.analysis;
        let metrics = &analysis.metrics;

        writeln!(writer, "# Service Dependency Analysis: {}\n", self.title)?;

        writeln!(writer, "## Metrics\n")?;
        writeln!(writer, "- **Services**: {}", metrics.total_nodes)?;
        writeln!(writer, "- **Dependencies**: {}", metrics.total_edges)?;
        writeln!(writer, "- **Max degree**: {}", metrics.max_degree)?;
        writeln!(writer, "- **Average degree**: {:.2}", metrics.avg_degree)?;
        writeln!(
            writer,
            "- **Complexity score**: {}",
            metrics.complexity_score
        )?;

        let dangling = record.graph.dangling_edges();
        if !dangling.is_empty() {
            writeln!(writer, "\n### ⚠️ Unknown Dependencies\n")?;
            for edge in dangling {
                writeln!(
                    writer,
                    "- `{}` depends on `{}`, which is not declared",
                    edge.from, edge.to
                )?;
            }
        }

        if metrics.total_nodes > 0
            && analysis.orphaned_nodes.is_empty()
            && analysis.hotspots.is_empty()
            && analysis.cycles.is_empty()
        {
            writeln!(writer, "\n## No Issues Found\n")?;
            writeln!(writer, "No orphans, hotspots or cycles detected.")?;
        }

        if !analysis.cycles.is_empty() {
            writeln!(writer, "\n## 🔴 Circular Dependencies\n")?;
            for cycle in &analysis.cycles {
                writeln!(writer, "- {}", cycle.join(" → "))?;
            }
        }

        if !analysis.hotspots.is_empty() {
            writeln!(writer, "\n## 🟡 Hotspots\n")?;
            for hotspot in &analysis.hotspots {
                let marker = match hotspot.risk_level {
                    RiskLevel::High => "**high**",
                    RiskLevel::Medium => "medium",
                };
                writeln!(
                    writer,
                    "- `{}` - degree {} ({} risk)",
                    hotspot.node_id, hotspot.degree, marker
                )?;
            }
        }

        if !analysis.orphaned_nodes.is_empty() {
            writeln!(writer, "\n## 🔵 Orphaned Services\n")?;
            for id in &analysis.orphaned_nodes {
                writeln!(writer, "- `{}`", id)?;
            }
        }

        if let Some(insights) = &record.insights {
            write_insights(insights, writer)?;
        }

        Ok(())
    }
}

fn write_insights<W: Write>(insights: &Insights, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "\n## Insights\n")?;
    writeln!(writer, "{}", insights.health_assessment)?;

    if !insights.risks.is_empty() {
        writeln!(writer, "\n### Risks\n")?;
        for risk in &insights.risks {
            writeln!(writer, "- {}", risk)?;
        }
    }

    if !insights.recommendations.is_empty() {
        writeln!(writer, "\n### Recommendations\n")?;
        for rec in &insights.recommendations {
            writeln!(
                writer,
                "- [{}] **{}**: {}",
                rec.priority, rec.issue, rec.recommendation
            )?;
        }
    }

    Ok(())
}
