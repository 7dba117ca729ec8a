//! Item Entity
//!
//! A to-do or workout entry owned by exactly one identity.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::weekday::Weekday;

/// Store-assigned document id
pub type ItemId = String;

/// A persisted item as delivered by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    /// Set once at creation, never rewritten
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    /// Milliseconds since the epoch, stamped by the store
    #[serde(default)]
    pub created_at: i64,
}

impl Item {
    pub fn from_new(id: impl Into<ItemId>, new_item: NewItem, created_at: i64) -> Self {
        Self {
            id: id.into(),
            text: new_item.text,
            done: new_item.done,
            owner_id: new_item.owner_id,
            muscle_group: new_item.muscle_group,
            day: new_item.day,
            created_at,
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }
}

/// What the user typed (or what a suggestion carries) before an owner is stamped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub text: String,
    pub muscle_group: Option<String>,
    pub day: Option<Weekday>,
}

impl ItemDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_muscle_group(mut self, muscle_group: impl Into<String>) -> Self {
        let muscle_group = muscle_group.into();
        self.muscle_group = (!muscle_group.trim().is_empty()).then(|| muscle_group.trim().to_string());
        self
    }

    pub fn with_day(mut self, day: Option<Weekday>) -> Self {
        self.day = day;
        self
    }

    /// Stamp the owner and check required fields.
    pub fn into_new_item(self, owner_id: &str) -> Result<NewItem, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if owner_id.is_empty() {
            return Err(ValidationError::MissingOwner);
        }
        Ok(NewItem {
            text: text.to_string(),
            done: false,
            owner_id: owner_id.to_string(),
            muscle_group: self.muscle_group,
            day: self.day,
        })
    }
}

/// Create payload sent to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub text: String,
    pub done: bool,
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
}

/// Partial update; only `done` is mutable after creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

impl ItemPatch {
    pub fn done(done: bool) -> Self {
        Self { done: Some(done) }
    }

    pub fn apply(&self, item: &mut Item) {
        if let Some(done) = self.done {
            item.done = done;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_stamps_owner_and_trims() {
        let new_item = ItemDraft::new("  Squats ")
            .with_muscle_group("Pernas")
            .into_new_item("user-1")
            .unwrap();
        assert_eq!(new_item.text, "Squats");
        assert_eq!(new_item.owner_id, "user-1");
        assert_eq!(new_item.muscle_group.as_deref(), Some("Pernas"));
        assert!(!new_item.done);
    }

    #[test]
    fn test_draft_rejects_blank_text_and_missing_owner() {
        assert_eq!(ItemDraft::new("   ").into_new_item("u"), Err(ValidationError::EmptyText));
        assert_eq!(ItemDraft::new("Run").into_new_item(""), Err(ValidationError::MissingOwner));
    }

    #[test]
    fn test_blank_muscle_group_is_dropped() {
        let draft = ItemDraft::new("Run").with_muscle_group("  ");
        assert_eq!(draft.muscle_group, None);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let item = Item::from_new(
            "abc",
            ItemDraft::new("Supino")
                .with_day(Some(Weekday::Segunda))
                .into_new_item("u1")
                .unwrap(),
            42,
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["ownerId"], "u1");
        assert_eq!(json["createdAt"], 42);
        assert_eq!(json["day"], "Segunda");
        assert!(json.get("muscleGroup").is_none());
    }

    #[test]
    fn test_patch_only_touches_done() {
        let mut item = Item::from_new("1", ItemDraft::new("Run").into_new_item("u").unwrap(), 0);
        ItemPatch::default().apply(&mut item);
        assert!(!item.done);
        ItemPatch::done(true).apply(&mut item);
        assert!(item.done);
        assert_eq!(item.text, "Run");
    }
}
