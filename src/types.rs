use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{FolioError, Result};

pub const DEFAULT_LINK_TEXT: &str = "Read More";

/// One portfolio entry. Wire field names are fixed by the hosted document
/// (`linkText` stays camelCase); `id` is assigned on creation and omitted
/// from JSON when absent so foreign documents round-trip untouched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub img: String,
    pub alt: String,
    pub desc: String,
    pub link: String,
    #[serde(rename = "linkText", default)]
    pub link_text: String,
}

/// Insertion order is display order and the positional index used by
/// update/delete. The whole collection is always loaded and saved wholesale.
pub type ProjectCollection = Vec<ProjectRecord>;

impl ProjectRecord {
    pub fn new(
        title: impl Into<String>,
        img: impl Into<String>,
        alt: impl Into<String>,
        desc: impl Into<String>,
        link: impl Into<String>,
        link_text: impl Into<String>,
    ) -> Self {
        ProjectRecord {
            id: None,
            title: title.into(),
            img: img.into(),
            alt: alt.into(),
            desc: desc.into(),
            link: link.into(),
            link_text: link_text.into(),
        }
    }

    /// Required-field emptiness check; `linkText` is the only optional field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("title", &self.title),
            ("img", &self.img),
            ("alt", &self.alt),
            ("desc", &self.desc),
            ("link", &self.link),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(FolioError::Validation(format!(
                    "field \"{}\" is required",
                    name
                )));
            }
        }
        Ok(())
    }

    /// An empty `linkText` becomes the stock "Read More" label.
    pub fn normalize(&mut self) {
        if self.link_text.trim().is_empty() {
            self.link_text = DEFAULT_LINK_TEXT.to_string();
        }
    }
}
