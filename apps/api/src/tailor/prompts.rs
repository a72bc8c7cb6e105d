// Tailoring prompt templates.
// The resume text and job description are spliced between the fixed
// instruction blocks by `build_tailor_prompt`.

pub const TAILOR_SYSTEM: &str = "\
You are an expert resume writer. \
You only reorganize and reword existing information - you never fabricate experiences or skills.";

const TAILOR_PREAMBLE: &str = "\
You are an expert resume writer and career coach. \
Your task is to rebuild an existing resume to match a specific job description.

IMPORTANT RULES:
You will tailor the resume to match the job description.";

const TAILOR_INSTRUCTIONS: &str = r#"Please analyze both documents and create a tailored resume that:
- Reorganizes sections to prioritize the most relevant information for the job description
- VERY IMPORTANT: REWORD bullet points to align with job responsibilities. MAKE SURE THE RESUME ALIGNS WELL WITH THE JOB. If this means replacing a bullet point with a new one, do it, so that it aligns with the job description.
- Emphasizes transferable skills that match the job
- Maintains relative factual accuracy from the original resume
- Extract key technical skills and competencies mentioned in the job description that align with the candidate's experience
- Do not include a professional summary section to save space for more experience details
- Try to avoid removing whole experiences, find ways to keep them but make them more relevant to the job description
- ALWAYS include a comprehensive skills section at the BOTTOM of the resume
- Include MANY skills (15-20+) as a single array from BOTH the original resume AND the job description
- Prioritize skills mentioned in the job description first, then add relevant skills from the resume
- Include technical skills, tools, languages, frameworks, methodologies, and soft skills all in one list

DO NOT miss any of these bullets.

Return the tailored resume in the following JSON structure:
{
  "name": "Full Name",
  "contact": {
    "email": "email@example.com",
    "phone": "phone number",
    "location": "City, State",
    "linkedin": "LinkedIn URL (if available)",
    "website": "Personal website (if available)"
  },
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "location": "City, State",
      "dates": "Start Date - End Date",
      "bullets": ["Achievement/responsibility", "Achievement/responsibility"]
    }
  ],
  "education": [
    {
      "degree": "Degree Name",
      "school": "School Name",
      "location": "City, State",
      "date": "Graduation Date",
      "details": "GPA, honors, relevant coursework (if applicable)"
    }
  ],
  "skills": ["Python", "JavaScript", "SQL", "Power BI", "Azure", "AWS", "Machine Learning", "Data Analysis", "Agile", "Leadership", "Problem-solving", "Communication", "Project Management"],
  "projects": [
    {
      "name": "Project Name",
      "description": "Brief description",
      "bullets": ["Achievement", "Technology used"]
    }
  ]
}"#;

/// Builds the user message for a tailoring call.
///
/// Inputs are concatenated rather than substituted into placeholders so that
/// text inside the resume can never be mistaken for a template marker.
pub fn build_tailor_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{TAILOR_PREAMBLE}\n\nORIGINAL RESUME:\n{resume_text}\n\n\
         TARGET JOB DESCRIPTION:\n{job_description}\n\n{TAILOR_INSTRUCTIONS}\n"
    )
}
