use super::{InsightsError, InsightsRequest};
use crate::model::{Insights, Recommendation};
use serde::Deserialize;
use serde_json::Value;

pub const SYSTEM_PROMPT: &str = "You are a senior software architect reviewing a microservice \
dependency graph. Always respond with a single JSON object and nothing else.";

pub fn build_prompt(request: &InsightsRequest) -> Result<String, InsightsError> {
    let payload = serde_json::to_string_pretty(request)
        .map_err(|e| InsightsError::Malformed(format!("could not encode request: {}", e)))?;

    Ok(format!(
        "Analyze this service dependency graph and its computed diagnostics.\n\n\
         ```json\n{}\n```\n\n\
         Respond with JSON of exactly this shape:\n\
         {{\n  \"healthAssessment\": \"one paragraph on overall architecture health\",\n  \
         \"risks\": [\"short risk statement\"],\n  \
         \"recommendations\": [{{\"issue\": \"...\", \"recommendation\": \"...\", \"priority\": \"high|medium|low\"}}]\n}}",
        payload
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInsights {
    health_assessment: Option<String>,
    risks: Option<Vec<Value>>,
    recommendations: Option<Vec<Value>>,
}

/// Decode a provider reply. Only the presence of the three top-level fields is
/// required; list entries of the wrong shape are dropped.
pub fn parse_insights(text: &str) -> Result<Insights, InsightsError> {
    let json = extract_json_object(text)
        .ok_or_else(|| InsightsError::Malformed("no JSON object in response".to_string()))?;

    let raw: RawInsights = serde_json::from_str(json)
        .map_err(|e| InsightsError::Malformed(format!("invalid JSON: {}", e)))?;

    let health_assessment = raw
        .health_assessment
        .ok_or_else(|| InsightsError::Malformed("missing healthAssessment".to_string()))?;
    let risks = raw
        .risks
        .ok_or_else(|| InsightsError::Malformed("missing risks".to_string()))?;
    let recommendations = raw
        .recommendations
        .ok_or_else(|| InsightsError::Malformed("missing recommendations".to_string()))?;

    Ok(Insights {
        health_assessment,
        risks: risks
            .into_iter()
            .filter_map(|r| r.as_str().map(str::to_string))
            .collect(),
        recommendations: recommendations
            .into_iter()
            .filter_map(|r| serde_json::from_value::<Recommendation>(r).ok())
            .collect(),
    })
}

/// Outermost `{ ... }` span, tolerating code fences and surrounding prose.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
