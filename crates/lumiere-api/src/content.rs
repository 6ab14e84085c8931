//! Blog posts and skin quiz questions

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::kind::ResourceKind;
use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl Resource for BlogPost {
    const KIND: ResourceKind = ResourceKind::BlogPost;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.content.as_str()];
        if let Some(author) = self.author.as_deref() {
            fields.push(author);
        }
        fields
    }
}

/// One selectable answer of a quiz question, weighted toward a skin type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub content: String,
    pub skin_type_id: EntityId,
    #[serde(default = "default_score")]
    pub score: u32,
}

fn default_score() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: EntityId,
    pub content: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Resource for Question {
    const KIND: ResourceKind = ResourceKind::Question;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.content
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![self.content.as_str()];
        fields.extend(self.answers.iter().map(|a| a.content.as_str()));
        fields
    }
}
