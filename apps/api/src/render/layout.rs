//! Top-down, single-page layout of a tailored resume.
//!
//! The pass walks the sections in a fixed order (contact header, experience,
//! education, projects, skills) with a running baseline `y`. Content that
//! would start below the cutoff is dropped rather than flowed onto a new page,
//! and nothing at all is drawn beneath the bottom margin.

use crate::models::resume::{present, Resume, Skills};

use super::font_metrics::Font;
use super::wrap::wrap_text;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 50.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN * 2.0;
/// Lowest baseline any text or rule may use.
pub const PAGE_FLOOR: f32 = MARGIN;
/// Entries, bullets and most sections are skipped once `y` drops below this.
pub const ENTRY_CUTOFF: f32 = 100.0;
/// The skills section and dividers leading into it tolerate a little more depth.
pub const SKILLS_CUTOFF: f32 = 80.0;
pub const LINE_HEIGHT: f32 = 1.15;
pub const BULLET_INDENT: f32 = 15.0;
pub const SEPARATOR: &str = " • ";

const NAME_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 12.0;
const ENTRY_TITLE_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const DATES_SIZE: f32 = 9.0;

/// A single drawing instruction in PDF user space (origin bottom-left, points).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        font: Font,
    },
    /// A 1pt horizontal rule spanning the content width.
    Rule { y: f32 },
}

struct Canvas {
    y: f32,
    ops: Vec<DrawOp>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            y: PAGE_HEIGHT - MARGIN,
            ops: Vec::new(),
        }
    }

    fn text_at(&mut self, text: &str, x: f32, y: f32, size: f32, font: Font) {
        if text.is_empty() || y < PAGE_FLOOR {
            return;
        }
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            font,
        });
    }

    /// Draws at the cursor, then moves the cursor down by `advance`.
    fn line(&mut self, text: &str, size: f32, font: Font, advance: f32) {
        let y = self.y;
        self.text_at(text, MARGIN, y, size, font);
        self.y -= advance;
    }

    fn centered(&mut self, text: &str, size: f32, font: Font, advance: f32) {
        let x = (PAGE_WIDTH - font.width_of_text_at_size(text, size)) / 2.0;
        let y = self.y;
        self.text_at(text, x, y, size, font);
        self.y -= advance;
    }

    /// Draws `text` wrapped to `max_width` starting at the cursor; leaves the
    /// cursor one line below the last line drawn.
    fn wrapped(&mut self, text: &str, x: f32, size: f32, font: Font, max_width: f32) {
        for line in wrap_text(text, max_width, size, font) {
            if self.y < PAGE_FLOOR {
                break;
            }
            let y = self.y;
            self.text_at(&line, x, y, size, font);
            self.y -= size * LINE_HEIGHT;
        }
    }

    fn rule(&mut self, advance: f32) {
        if self.y >= PAGE_FLOOR {
            self.ops.push(DrawOp::Rule { y: self.y });
        }
        self.y -= advance;
    }

    fn heading(&mut self, title: &str) {
        self.line(title, HEADING_SIZE, Font::HelveticaBold, 15.0);
    }

    fn bullets(&mut self, bullets: &[String]) {
        for bullet in bullets {
            if self.y < ENTRY_CUTOFF {
                break;
            }
            let y = self.y;
            self.text_at("•", MARGIN, y, BODY_SIZE, Font::Helvetica);
            self.wrapped(
                bullet,
                MARGIN + BULLET_INDENT,
                BODY_SIZE,
                Font::Helvetica,
                CONTENT_WIDTH - BULLET_INDENT,
            );
            self.y -= 4.0;
        }
    }

    /// Bold label followed by a list wrapped in the remaining width.
    fn labelled_list(&mut self, label: &str, items: &[String]) {
        let label_width = Font::HelveticaBold.width_of_text_at_size(label, BODY_SIZE);
        let y = self.y;
        self.text_at(label, MARGIN, y, BODY_SIZE, Font::HelveticaBold);
        self.wrapped(
            &items.join(", "),
            MARGIN + label_width,
            BODY_SIZE,
            Font::Helvetica,
            CONTENT_WIDTH - label_width,
        );
    }
}

/// "a • b" from whichever of the two parts are present.
fn joined(primary: &Option<String>, secondary: &Option<String>) -> String {
    [present(primary), present(secondary)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Lays out the whole resume and returns the drawing instructions in paint order.
pub fn layout_resume(resume: &Resume) -> Vec<DrawOp> {
    let mut c = Canvas::new();

    let name = present(&resume.name).unwrap_or("Name");
    c.centered(name, NAME_SIZE, Font::HelveticaBold, 26.0);

    let contact = resume.contact_parts();
    if !contact.is_empty() {
        c.centered(&contact.join(SEPARATOR), BODY_SIZE, Font::Helvetica, 16.0);
    }

    c.rule(12.0);

    let has_experience = resume.has_experience();
    let has_education = resume.has_education();
    let has_projects = resume.has_projects();
    let has_skills = resume.has_skills();

    if has_experience {
        c.heading("EXPERIENCE");

        for exp in &resume.experience {
            if c.y < ENTRY_CUTOFF {
                break;
            }
            c.line(
                present(&exp.title).unwrap_or_default(),
                ENTRY_TITLE_SIZE,
                Font::HelveticaBold,
                12.0,
            );
            c.line(
                &joined(&exp.company, &exp.location),
                BODY_SIZE,
                Font::HelveticaOblique,
                12.0,
            );
            c.line(
                present(&exp.dates).unwrap_or_default(),
                DATES_SIZE,
                Font::Helvetica,
                12.0,
            );
            c.bullets(&exp.bullets);
            c.y -= 6.0;
        }

        if (has_education && c.y > ENTRY_CUTOFF)
            || (has_projects && c.y > ENTRY_CUTOFF)
            || (has_skills && c.y > SKILLS_CUTOFF)
        {
            c.rule(10.0);
        }
    }

    if has_education && c.y > ENTRY_CUTOFF {
        c.heading("EDUCATION");

        for edu in &resume.education {
            if c.y < ENTRY_CUTOFF {
                break;
            }
            c.line(
                present(&edu.degree).unwrap_or_default(),
                ENTRY_TITLE_SIZE,
                Font::HelveticaBold,
                12.0,
            );
            c.line(
                &joined(&edu.school, &edu.location),
                BODY_SIZE,
                Font::HelveticaOblique,
                12.0,
            );
            c.line(
                present(&edu.date).unwrap_or_default(),
                BODY_SIZE,
                Font::Helvetica,
                10.0,
            );
            if let Some(details) = present(&edu.details) {
                c.wrapped(details, MARGIN, BODY_SIZE, Font::Helvetica, CONTENT_WIDTH);
                c.y -= 6.0;
            }
            c.y -= 5.0;
        }

        if (has_projects && c.y > ENTRY_CUTOFF) || (has_skills && c.y > SKILLS_CUTOFF) {
            c.rule(10.0);
        }
    }

    if has_projects && c.y > ENTRY_CUTOFF {
        c.heading("PROJECTS");

        for project in &resume.projects {
            if c.y < ENTRY_CUTOFF {
                break;
            }
            c.line(
                present(&project.name).unwrap_or_default(),
                ENTRY_TITLE_SIZE,
                Font::HelveticaBold,
                12.0,
            );
            if let Some(description) = present(&project.description) {
                c.wrapped(description, MARGIN, BODY_SIZE, Font::Helvetica, CONTENT_WIDTH);
                c.y -= 4.0;
            }
            c.bullets(&project.bullets);
            c.y -= 6.0;
        }

        if has_skills && c.y > SKILLS_CUTOFF {
            c.rule(10.0);
        }
    }

    // Skills close the page; no divider follows them.
    if has_skills && c.y > SKILLS_CUTOFF {
        c.heading("SKILLS");

        match &resume.skills {
            Some(Skills::List(items)) => {
                c.wrapped(
                    &items.join(", "),
                    MARGIN,
                    BODY_SIZE,
                    Font::Helvetica,
                    CONTENT_WIDTH,
                );
            }
            Some(Skills::Categorized(categories)) => {
                if !categories.technical.is_empty() {
                    c.labelled_list("Technical: ", &categories.technical);
                    c.y -= 6.0;
                }
                if !categories.other.is_empty() {
                    c.labelled_list("Other: ", &categories.other);
                }
            }
            None => {}
        }
    }

    c.ops
}
