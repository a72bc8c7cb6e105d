//! The tailored resume returned by the LLM and consumed by the renderer.
//!
//! Every field is optional on the wire: the model is prompted with a fixed
//! schema but routinely omits, nulls or mistypes sections. Deserialization
//! treats `null` the same as absent, drops list items of the wrong shape, and
//! turns a value of the wrong type into an absent field instead of failing.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<Contact>,
    #[serde(default, deserialize_with = "list")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "list")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "list")]
    pub projects: Vec<Project>,
    #[serde(default, deserialize_with = "skills")]
    pub skills: Option<Skills>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub dates: Option<String>,
    #[serde(default, deserialize_with = "list")]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "list")]
    pub bullets: Vec<String>,
}

/// Skills come either as one flat list (current prompt) or as the older
/// `{ technical, other }` split.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Skills {
    List(Vec<String>),
    Categorized(CategorizedSkills),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorizedSkills {
    #[serde(default, deserialize_with = "list")]
    pub technical: Vec<String>,
    #[serde(default, deserialize_with = "list")]
    pub other: Vec<String>,
}

impl Resume {
    pub fn has_experience(&self) -> bool {
        !self.experience.is_empty()
    }

    pub fn has_education(&self) -> bool {
        !self.education.is_empty()
    }

    pub fn has_projects(&self) -> bool {
        !self.projects.is_empty()
    }

    pub fn has_skills(&self) -> bool {
        match &self.skills {
            Some(Skills::List(items)) => !items.is_empty(),
            Some(Skills::Categorized(c)) => !c.technical.is_empty() || !c.other.is_empty(),
            None => false,
        }
    }

    /// Non-empty contact fields in display order: email, phone, location, LinkedIn, website.
    pub fn contact_parts(&self) -> Vec<&str> {
        let Some(contact) = &self.contact else {
            return Vec::new();
        };
        [
            &contact.email,
            &contact.phone,
            &contact.location,
            &contact.linkedin,
            &contact.website,
        ]
        .into_iter()
        .filter_map(present)
        .collect()
    }
}

/// Returns the field's text when it is set and not blank.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Keeps the items that have the expected shape. Anything but an array is empty.
fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// A value of the wrong shape reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(T::deserialize(Value::deserialize(deserializer)?).ok())
}

/// An array is the flat list and an object the categorized split; anything else is absent.
fn skills<'de, D>(deserializer: D) -> Result<Option<Skills>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        items @ Value::Array(_) => list(items).ok().map(Skills::List),
        categories @ Value::Object(_) => CategorizedSkills::deserialize(categories)
            .ok()
            .map(Skills::Categorized),
        _ => None,
    })
}

/// Strings pass through and numbers or booleans are printed; anything else is absent.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
