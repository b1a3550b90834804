//! Portfolio Data Model
//!
//! Shapes of `portfolio.json` and of the chat wire messages. Only the fields
//! the server reasons about are typed; everything else the site renders is
//! kept in `extra` and written back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whole portfolio document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub designer: Designer,

    #[serde(default)]
    pub projects: Vec<Project>,
}

impl PortfolioData {
    /// Linear scan for the project with `id`
    pub fn find_project(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// Portfolio owner profile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Designer {
    pub name: String,

    /// Free-form: "5+ years" in most files, a bare number in some
    pub experience: Value,

    pub skills: Vec<String>,

    /// title, bio, email, behance, location, availability, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Designer {
    /// Experience as plain text, without JSON quoting
    pub fn experience_text(&self) -> String {
        match &self.experience {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// A single portfolio project
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,

    /// title, category, description, images, tags, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Inbound chat request body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
}

/// Outbound chat response body
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "designer": {
                "name": "Ada",
                "title": "Brand Designer",
                "experience": "6+ years",
                "skills": ["Branding", "UI"],
                "email": "ada@example.com"
            },
            "projects": [
                {"id": 1, "title": "Logo", "tags": ["brand"]},
                {"id": 7, "title": "Poster", "category": "print"}
            ]
        })
    }

    #[test]
    fn test_descriptive_fields_survive_round_trip() {
        let data: PortfolioData = serde_json::from_value(sample()).unwrap();
        assert_eq!(data.designer.extra["title"], "Brand Designer");
        assert_eq!(data.projects[1].extra["category"], "print");

        let back = serde_json::to_value(&data).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_find_project() {
        let data: PortfolioData = serde_json::from_value(sample()).unwrap();
        assert_eq!(data.find_project(7).unwrap().extra["title"], "Poster");
        assert!(data.find_project(2).is_none());
    }

    #[test]
    fn test_experience_text() {
        let mut data: PortfolioData = serde_json::from_value(sample()).unwrap();
        assert_eq!(data.designer.experience_text(), "6+ years");

        data.designer.experience = json!(4);
        assert_eq!(data.designer.experience_text(), "4");
    }

    #[test]
    fn test_missing_projects_defaults_to_empty() {
        let data: PortfolioData = serde_json::from_value(json!({
            "designer": {"name": "Ada", "experience": "1 year", "skills": []}
        }))
        .unwrap();
        assert!(data.projects.is_empty());
    }

    #[test]
    fn test_designer_name_is_required() {
        let result: Result<PortfolioData, _> = serde_json::from_value(json!({
            "designer": {"experience": "1 year", "skills": []},
            "projects": []
        }));
        assert!(result.is_err());
    }
}
