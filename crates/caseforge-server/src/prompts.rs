//! Prompt builders for each analysis type.
//!
//! Each synthesis prompt demands ONLY minified JSON with the keys the report
//! renderer understands; the extractor recovers the object even when the
//! model wraps it in prose anyway.

/// System preamble for chat-style backends.
pub const CONSULTANT_SYSTEM: &str =
    "You are a world-class senior management consultant AI.";

/// Step 1 of a standard case: the questions a consultant would ask.
pub fn diagnostic_questions(company_name: &str, problem_statement: &str) -> String {
    format!(
        "Given the problem '{problem_statement}' for the company '{company_name}', \
         generate 3-4 critical diagnostic questions a consultant would ask to understand \
         the root cause. Just return the questions, each on a new line."
    )
}

/// Step 2: answer the diagnostic questions to build context.
pub fn diagnostic_answers(
    company_name: &str,
    problem_statement: &str,
    questions: &str,
) -> String {
    format!(
        "You are a senior consultant analyzing a problem for '{company_name}': \
         '{problem_statement}'. Your internal diagnostic questions are: '{questions}'. \
         Provide concise, expert answers to your own questions based on common business \
         scenarios to build a context for your final analysis."
    )
}

/// Step 3: the final strategic plan as minified JSON.
pub fn final_synthesis(
    company_name: &str,
    problem_statement: &str,
    internal_answers: &str,
) -> String {
    format!(
        "You are a Partner-level management consultant synthesizing a final report. \
         Based on the deep context below, produce a comprehensive and actionable \
         strategic plan.\n\nContext:\n- Company: {company_name}\n- Stated Problem: \
         {problem_statement}\n- Your Internal Analysis & Reasoning:\n{internal_answers}\n\n\
         Your final output must be a strategic document of the highest quality. For each \
         key in the JSON, provide detailed and insightful content. The 30-60-90 day plan \
         must contain specific, actionable steps. Return ONLY valid, minified JSON with \
         the following structure: {{\"executive_summary\":\"...\",\"diagnosis\":[...],\
         \"plan_30_60_90\":{{\"30\":[...],\"60\":[...],\"90\":[...]}},\"metrics\":[...],\
         \"quick_wins\":[...]}}"
    )
}

/// One-shot SWOT analysis prompt.
pub fn swot(company_name: &str) -> String {
    format!(
        "You are a top-tier management consultant from a McKinsey / BCG / Bain level \
         firm. Conduct a comprehensive SWOT analysis for the company '{company_name}'. \
         For each of the four categories (Strengths, Weaknesses, Opportunities, Threats), \
         provide at least 4-6 detailed, insightful bullet points. Each bullet point \
         should be a JSON object with 'name', 'description', and 'example' keys. Your \
         analysis must be sharp, specific, and actionable. Return ONLY valid, minified \
         JSON with keys: {{\"strengths\":[...],\"weaknesses\":[...],\
         \"opportunities\":[...],\"threats\":[...]}}"
    )
}

/// One-shot PESTLE analysis prompt.
pub fn pestle(industry: &str) -> String {
    format!(
        "You are a senior geopolitical and economic analyst from a world-renowned think \
         tank. Conduct a comprehensive PESTLE analysis for the '{industry}' industry. \
         For each of the six categories (Political, Economic, Social, Technological, \
         Legal, Environmental), provide at least 4-6 detailed, specific factors. Each \
         factor should be a JSON object with 'name' and 'description' keys, explaining \
         its potential impact. Return ONLY valid, minified JSON with keys: \
         {{\"political\":[...],\"economic\":[...],\"social\":[...],\
         \"technological\":[...],\"legal\":[...],\"environmental\":[...]}}"
    )
}
