//! HTML report renderer.
//!
//! Builds the persisted report from the extracted recommendation object.
//! Items in list sections may be plain strings or `{name, description,
//! example}` objects; anything else is shown as serialized JSON. A
//! recommendation that only carries a `raw` key (degraded extraction)
//! renders as a preformatted block instead of structured sections.

use serde_json::{Map, Value};

use caseforge_core::types::AnalysisType;

const STYLE: &str = r#"
    body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,Helvetica,Arial,sans-serif;line-height:1.6;color:#333;max-width:900px;margin:2rem auto;padding:0 1rem;background-color:#f9f9f9}
    h1,h2,h3,h4{color:#222;margin-top:1.5em}h1{border-bottom:2px solid #eee;padding-bottom:.5rem;margin-top:0}
    .section{background-color:#fff;border:1px solid #ddd;border-radius:8px;padding:1.5rem 2rem;margin-bottom:2rem;box-shadow:0 2px 4px rgba(0,0,0,0.05)}
    ul{padding-left:20px;list-style:none}li{margin-bottom:1rem}
    .analysis-grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(300px,1fr));gap:1.5rem}
    .analysis-card{padding:1.5rem;background-color:#fafafa;border:1px solid #eee;border-radius:8px}
    .analysis-card h4{margin-top:0;color:#007bff;border-bottom:1px solid #ddd;padding-bottom:.5rem;margin-bottom:1rem}
    .empty-item{color:#999;font-style:italic}
    #timeline-chart{min-height:350px}
    .list-item-title{font-weight:bold;color:#333}
    .list-item-desc{color:#555;font-size:.95em}
    .list-item-example{color:#777;font-size:.9em;font-style:italic;border-left:3px solid #eee;padding-left:10px;margin-top:5px}
    pre{white-space:pre-wrap;word-break:break-word}
"#;

/// Render a full report page.
pub fn render(title: &str, analysis_type: AnalysisType, recommendation: &Map<String, Value>) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str(&format!("<title>Consulting Report - {}</title>", escape(title)));
    html.push_str("<script src=\"https://cdn.jsdelivr.net/npm/apexcharts\"></script>");
    html.push_str(&format!("<style>{STYLE}</style></head><body>"));
    html.push_str(&format!("<h1>{}</h1>", escape(title)));

    // Degraded extraction: show the raw text verbatim.
    if let Some(Value::String(raw)) = recommendation.get("raw") {
        html.push_str(&format!(
            "<div class=\"section\"><pre>{}</pre></div>",
            escape(raw)
        ));
        html.push_str("</body></html>");
        return html;
    }

    match analysis_type {
        AnalysisType::Standard => render_standard(&mut html, recommendation),
        AnalysisType::Swot => render_grid(
            &mut html,
            recommendation,
            &[
                ("Strengths", "strengths"),
                ("Weaknesses", "weaknesses"),
                ("Opportunities", "opportunities"),
                ("Threats", "threats"),
            ],
        ),
        AnalysisType::Pestle => render_grid(
            &mut html,
            recommendation,
            &[
                ("Political", "political"),
                ("Economic", "economic"),
                ("Social", "social"),
                ("Technological", "technological"),
                ("Legal", "legal"),
                ("Environmental", "environmental"),
            ],
        ),
    }

    html.push_str("</body></html>");
    html
}

fn render_standard(html: &mut String, rec: &Map<String, Value>) {
    if let Some(Value::String(summary)) = rec.get("executive_summary") {
        html.push_str(&format!(
            "<div class=\"section\"><h2>Executive Summary</h2><p>{}</p></div>",
            escape(summary)
        ));
    }
    section_list(html, "Diagnosis", rec.get("diagnosis"));
    render_plan(html, rec.get("plan_30_60_90"));
    section_list(html, "Metrics for Success", rec.get("metrics"));
    section_list(html, "Quick Wins", rec.get("quick_wins"));
    html.push_str(&timeline_script(rec.get("plan_30_60_90")));
}

fn render_plan(html: &mut String, plan: Option<&Value>) {
    let Some(Value::Object(plan)) = plan else {
        return;
    };
    html.push_str("<div class=\"section\"><h2>30-60-90 Day Plan</h2>");
    html.push_str("<div id=\"timeline-chart\"></div>");
    for (label, key) in [
        ("First 30 Days", "30"),
        ("Next 60 Days", "60"),
        ("Next 90 Days", "90"),
    ] {
        html.push_str(&format!("<h4>{label}</h4>"));
        html.push_str(&render_list(plan.get(key)));
    }
    html.push_str("</div>");
}

/// Range-bar timeline for the 30-60-90 plan. The plan object is inlined as
/// JSON; `</` is escaped so item text cannot terminate the script element.
fn timeline_script(plan: Option<&Value>) -> String {
    let plan_json = plan
        .filter(|p| p.is_object())
        .map(|p| p.to_string())
        .unwrap_or_else(|| "{}".to_string())
        .replace("</", "<\\/");

    format!(
        r##"<script>
document.addEventListener("DOMContentLoaded", function() {{
    const planData = {plan_json};
    if (planData && Object.keys(planData).length > 0) {{
        const day = 24 * 60 * 60 * 1000;
        const now = new Date().getTime();
        const seriesData = [
            {{ name: 'First 30 Days', data: (planData['30'] || []).map(task => ({{ x: (task.name || task), y: [now, now + 30 * day] }})) }},
            {{ name: 'Next 60 Days', data: (planData['60'] || []).map(task => ({{ x: (task.name || task), y: [now + 30 * day, now + 60 * day] }})) }},
            {{ name: 'Next 90 Days', data: (planData['90'] || []).map(task => ({{ x: (task.name || task), y: [now + 60 * day, now + 90 * day] }})) }}
        ];
        var options = {{
            series: seriesData, chart: {{ type: 'rangeBar', height: 400, toolbar: {{ show: false }} }},
            plotOptions: {{ bar: {{ horizontal: true, barHeight: '80%', borderRadius: 5 }} }},
            xaxis: {{ type: 'datetime' }}, stroke: {{ width: 1 }}, fill: {{ type: 'solid', opacity: 0.6 }},
            legend: {{ position: 'top', horizontalAlign: 'left' }}, tooltip: {{ x: {{ format: 'dd MMM' }} }}
        }};
        var chart = new ApexCharts(document.querySelector("#timeline-chart"), options);
        chart.render();
    }}
}});
</script>"##
    )
}

fn render_grid(html: &mut String, rec: &Map<String, Value>, cards: &[(&str, &str)]) {
    html.push_str("<div class=\"section analysis-grid\">");
    for (heading, key) in cards {
        html.push_str(&format!(
            "<div class=\"analysis-card\"><h4>{heading}</h4>{}</div>",
            render_list(rec.get(*key))
        ));
    }
    html.push_str("</div>");
}

fn section_list(html: &mut String, heading: &str, items: Option<&Value>) {
    html.push_str(&format!(
        "<div class=\"section\"><h2>{heading}</h2>{}</div>",
        render_list(items)
    ));
}

/// Render a list of items; each may be a string or an object with
/// `name`/`description`/`example`.
fn render_list(items: Option<&Value>) -> String {
    let items = match items.and_then(|v| v.as_array()) {
        Some(items) if !items.is_empty() => items,
        _ => {
            return "<ul><li class=\"empty-item\">No specific items identified.</li></ul>"
                .to_string()
        }
    };

    let mut out = String::from("<ul>");
    for item in items {
        out.push_str("<li>");
        match item {
            Value::String(text) => out.push_str(&escape(text)),
            Value::Object(obj) if obj.contains_key("name") => {
                if let Some(Value::String(name)) = obj.get("name") {
                    out.push_str(&format!(
                        "<div class=\"list-item-title\">{}</div>",
                        escape(name)
                    ));
                }
                if let Some(Value::String(desc)) = obj.get("description") {
                    out.push_str(&format!(
                        "<div class=\"list-item-desc\">{}</div>",
                        escape(desc)
                    ));
                }
                if let Some(Value::String(example)) = obj.get("example") {
                    out.push_str(&format!(
                        "<div class=\"list-item-example\">e.g., {}</div>",
                        escape(example)
                    ));
                }
            }
            other => out.push_str(&escape(&other.to_string())),
        }
        out.push_str("</li>");
    }
    out.push_str("</ul>");
    out
}

/// Minimal HTML escaping for text interpolated into the page.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
