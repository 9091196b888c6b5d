//! Post form: binds submitted fields and validates them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Group, Post, PostChanges};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_CHOICE_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Char,
    Choice,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Char => "char",
            FieldKind::Choice => "choice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Textarea,
    Select,
}

impl Widget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Widget::Textarea => "textarea",
            Widget::Select => "select",
        }
    }
}

/// Static description of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: &'static str,
    pub label: &'static str,
    pub help_text: &'static str,
    pub kind: FieldKind,
    pub widget: Widget,
    pub required: bool,
}

pub const TEXT_FIELD: FieldMeta = FieldMeta {
    name: "text",
    label: "Text",
    help_text: "Text of the new post",
    kind: FieldKind::Char,
    widget: Widget::Textarea,
    required: true,
};

pub const GROUP_FIELD: FieldMeta = FieldMeta {
    name: "group",
    label: "Group",
    help_text: "Group the post will belong to",
    kind: FieldKind::Choice,
    widget: Widget::Select,
    required: false,
};

pub const POST_FORM_FIELDS: [FieldMeta; 2] = [TEXT_FIELD, GROUP_FIELD];

/// Raw values as submitted. Anything else in the submission, such as an
/// `author` field, is dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFormData {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: String,
}

impl PostFormData {
    /// Form data prefilled from an existing post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            text: post.text.clone(),
            group: post.group_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    /// Validate against the groups that may be chosen.
    pub fn clean(&self, groups: &[Group]) -> Result<PostChanges, FormErrors> {
        let mut errors = FormErrors::default();

        let text = self.text.trim();
        if text.is_empty() {
            errors.add(TEXT_FIELD.name, REQUIRED_MESSAGE);
        }

        let group = self.group.trim();
        let group_id = if group.is_empty() {
            None
        } else {
            match group.parse::<i32>() {
                Ok(id) if groups.iter().any(|g| g.id == id) => Some(id),
                _ => {
                    errors.add(GROUP_FIELD.name, INVALID_CHOICE_MESSAGE);
                    None
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PostChanges {
            text: text.to_string(),
            group_id,
        })
    }
}

/// Field-level validation errors, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<Group> {
        vec![Group {
            id: 4,
            title: "Test group".to_string(),
            slug: "test_group".to_string(),
            description: String::new(),
        }]
    }

    fn data(text: &str, group: &str) -> PostFormData {
        PostFormData {
            text: text.to_string(),
            group: group.to_string(),
        }
    }

    #[test]
    fn test_valid_with_group() {
        let cleaned = data("  Just a correct text ", "4").clean(&groups()).unwrap();
        assert_eq!(cleaned.text, "Just a correct text");
        assert_eq!(cleaned.group_id, Some(4));
    }

    #[test]
    fn test_group_is_optional() {
        let cleaned = data("text", "").clean(&groups()).unwrap();
        assert_eq!(cleaned.group_id, None);
    }

    #[test]
    fn test_blank_text_is_required() {
        let errors = data("   ", "").clean(&groups()).unwrap_err();
        assert_eq!(errors.get("text"), Some(&[REQUIRED_MESSAGE.to_string()][..]));
        assert_eq!(errors.get("group"), None);
    }

    #[test]
    fn test_unknown_or_malformed_group() {
        for group in ["99", "abc"] {
            let errors = data("text", group).clean(&groups()).unwrap_err();
            assert_eq!(
                errors.get("group"),
                Some(&[INVALID_CHOICE_MESSAGE.to_string()][..])
            );
        }
    }

    #[test]
    fn test_help_texts() {
        assert_eq!(TEXT_FIELD.help_text, "Text of the new post");
        assert_eq!(GROUP_FIELD.help_text, "Group the post will belong to");
    }
}
