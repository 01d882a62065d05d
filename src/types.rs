use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

static MESSAGE_SEQ: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

/// One entry of a tab conversation. Conversations are append-only.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    /// Builds a message stamped with the current time.
    ///
    /// Ids combine the timestamp with a process-wide sequence number so that two
    /// messages created within the same instant still differ.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        let timestamp = OffsetDateTime::now_utc();
        let seq = MESSAGE_SEQ.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("{}-{}", timestamp.unix_timestamp_nanos() / 1_000_000, seq),
            role,
            content: content.into(),
            timestamp,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Role::Ai, content)
    }
}

/// Conversation entry as the optimize endpoint expects it (no id, no timestamp).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: u32,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    pub calories_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Difficulty label as produced by the backend. Unknown labels are kept verbatim
/// so that a recipe survives an optimize round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Other(String),
}

impl Difficulty {
    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
            Difficulty::Other(label) => label,
        }
    }
}

impl From<String> for Difficulty {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "简单" => Difficulty::Easy,
            "中等" => Difficulty::Medium,
            "困难" => Difficulty::Hard,
            _ => Difficulty::Other(raw),
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub dish_name: String,
    pub description: String,
    pub cuisine_type: String,
    pub difficulty: Difficulty,
    pub prep_time_mins: u32,
    pub cook_time_mins: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub tips: Vec<String>,
    pub nutritional_info: NutritionalInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    /// Copy of this recipe with the generated dish image attached.
    pub fn with_image(&self, url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..self.clone()
        }
    }
}

/// A photo picked by the user, ready to be sent as multipart form data.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or(mime_guess::mime::IMAGE_JPEG)
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("a");
        let b = ChatMessage::user("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn history_entry_drops_id_and_timestamp() {
        let msg = ChatMessage::ai("你好");
        let json = serde_json::to_value(HistoryEntry::from(&msg)).unwrap();
        assert_eq!(json, serde_json::json!({"role": "ai", "content": "你好"}));
    }

    #[test]
    fn difficulty_keeps_unknown_labels() {
        let parsed: Difficulty = serde_json::from_str("\"大师级\"").unwrap();
        assert_eq!(parsed, Difficulty::Other("大师级".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"大师级\"");

        let easy: Difficulty = serde_json::from_str("\"简单\"").unwrap();
        assert_eq!(easy, Difficulty::Easy);
    }

    #[test]
    fn extreme_durations_deserialize_unchanged() {
        let recipe: Recipe = serde_json::from_value(serde_json::json!({
            "dish_name": "慢炖牛腩",
            "description": "",
            "cuisine_type": "中式",
            "difficulty": "困难",
            "prep_time_mins": u32::MAX,
            "cook_time_mins": 1,
            "servings": 4,
            "ingredients": [],
            "instructions": [],
            "nutritional_info": {"calories_kcal": 0, "protein_g": 0, "carbs_g": 0, "fat_g": 0}
        }))
        .unwrap();
        assert_eq!(recipe.prep_time_mins, u32::MAX);
        assert_eq!(recipe.with_image("https://img/1.png").cook_time_mins, 1);
    }

    #[test]
    fn upload_mime_follows_extension() {
        assert_eq!(ImageUpload::new("fridge.PNG", vec![]).mime, "image/png");
        assert_eq!(ImageUpload::new("dish.avif", vec![]).mime, "image/avif");
        assert_eq!(ImageUpload::new("scan.tiff", vec![]).mime, "image/tiff");
        assert_eq!(ImageUpload::new("photo", vec![]).mime, "image/jpeg");
    }
}
