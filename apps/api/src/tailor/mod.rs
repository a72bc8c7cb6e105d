// Resume tailoring pipeline.
// upload -> text extraction -> LLM rewrite -> PDF render.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod upload;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::resume::Resume;
use crate::tailor::prompts::{build_tailor_prompt, TAILOR_SYSTEM};

/// Asks the LLM to rewrite the resume against the job description.
pub async fn tailor_resume(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
) -> Result<Resume, AppError> {
    let prompt = build_tailor_prompt(resume_text, job_description);
    let resume: Resume = llm.call_json(&prompt, TAILOR_SYSTEM).await?;

    info!(
        "Tailored resume: {} experience, {} education, {} project entries",
        resume.experience.len(),
        resume.education.len(),
        resume.projects.len()
    );
    Ok(resume)
}
