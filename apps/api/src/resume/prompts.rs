// Resume service LLM prompt templates.
// Placeholders in braces are substituted with str::replace before the call.

use crate::llm_client::CallParams;

// ────────────────────────────────────────────────────────────────────────────
// Structuring (raw PDF text → section tree)
// ────────────────────────────────────────────────────────────────────────────

pub const STRUCTURE_PARAMS: CallParams = CallParams::new(2048, 0.2);

pub const STRUCTURE_SYSTEM: &str = "\
You are a meticulous resume parsing assistant. \
You MUST respond with a single valid JSON object only — no markdown fences, no explanations. \
The keys of the output object MUST appear in exactly the order the sections appear in the resume.";

pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"Convert the resume text below into a structured JSON object.

RULES:
1. Detect every section heading from the text itself (e.g. SUMMARY, EDUCATION, EXPERIENCE, SKILLS, AREAS OF INTEREST). Do not invent sections.
2. When a section has subheadings (employers, institutions, project titles), nest an object keyed by the subheading with its bullets as a list of strings.
3. When a section has no subheadings, use "" as the single subheading key.
4. Every bullet is a string ending with a full stop.
5. Values may only be strings, lists, or objects. Never use numbers, booleans, or null.
6. PRESERVE the original section order exactly. Do not sort or regroup sections.

OUTPUT SHAPE EXAMPLE:
{
  "SUMMARY": {"": ["Backend engineer with five years of experience."]},
  "EXPERIENCE": {"Acme Corp — Software Engineer": ["Built the billing service."]},
  "SKILLS": {"": ["Rust, Python, SQL."]}
}

RESUME TEXT:
"""
{resume_text}
"""

Return ONLY the JSON object."#;

// ────────────────────────────────────────────────────────────────────────────
// Bullet review
// ────────────────────────────────────────────────────────────────────────────

pub const BULLET_REVIEW_PARAMS: CallParams = CallParams::new(300, 0.3);

pub const BULLET_REVIEW_SYSTEM: &str = "\
You are an expert resume writing assistant. You review one bullet point at a time. \
Respond with valid JSON only: {\"suggested\": \"...\", \"feedback\": \"...\", \
\"scores\": {\"clarity\": n, \"impact\": n, \"conciseness\": n}}. \
Do NOT use markdown code fences. Do NOT add any explanation outside the JSON object.";

pub const BULLET_REVIEW_PROMPT_TEMPLATE: &str = r#"Evaluate this resume bullet point:

"{bullet}"

TASKS:
1. Suggest an improved version if it can be made clearer or more impactful. If it is already strong, return it unchanged.
2. Give one short sentence of feedback explaining the change (or why none was needed).
3. Score the ORIGINAL bullet from 1 to 10 on clarity, impact, and conciseness.

DO NOT invent metrics, employers, or technologies that the original does not mention.

Return JSON only:
{
  "suggested": "<improved bullet>",
  "feedback": "<one sentence>",
  "scores": {"clarity": <1-10>, "impact": <1-10>, "conciseness": <1-10>}
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Keyword gap analysis
// ────────────────────────────────────────────────────────────────────────────

pub const KEYWORD_MATCH_PARAMS: CallParams = CallParams::new(400, 0.3);

pub const KEYWORD_MATCH_PROMPT_TEMPLATE: &str = r#"Find the technical keywords a job description asks for that a resume does not cover.

STEP 1: From the JOB DESCRIPTION, extract only the most important technical skills, tools, frameworks, platforms, and programming languages.
STEP 2: For each keyword, decide whether the RESUME covers it in its skills, projects, experience, certifications, or technical coursework.

MATCHING RULES:
- Match semantically, not by spelling: React == React.js, Google Cloud Platform == GCP, scikit learn == scikit-learn, Python3 == Python.
- Ignore casing, abbreviations, and common short forms.
- IGNORE soft skills (communication, collaboration, problem-solving) and vague phrases ("optimize performance", "work with backend").
- IGNORE job titles and responsibilities ("Frontend Developer", "team player").

OUTPUT: a JSON array of the keywords that are missing or only very weakly represented, e.g. ["Redux", "Webpack", "Docker"].
Return an empty array if nothing is missing.

RESUME (JSON):
{resume_json}

JOB DESCRIPTION:
"""
{jd_text}
""""#;

// ────────────────────────────────────────────────────────────────────────────
// LinkedIn summary
// ────────────────────────────────────────────────────────────────────────────

pub const LINKEDIN_SUMMARY_PARAMS: CallParams = CallParams::new(300, 0.5);

pub const LINKEDIN_SUMMARY_SYSTEM: &str = "\
You are a professional resume and personal-branding assistant. \
You write in plain prose: no JSON, no markdown, no headings, no bullet points.";

pub const LINKEDIN_SUMMARY_PROMPT_TEMPLATE: &str = r#"Write the "About" section of a LinkedIn profile for the person whose structured resume is below.

GUIDELINES:
- Focus on strengths, interests, and aspirations.
- Work in experience and technical proficiencies naturally.
- Conversational yet professional, first person.
- 3 to 5 concise, well-formed sentences.
- Do NOT copy the resume's own summary section verbatim.

RESUME (JSON):
{resume_json}"#;
