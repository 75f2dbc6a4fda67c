use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// The label shown in the list and the add form
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Next value in the selector cycle
    pub fn cycled(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id, generated at creation, immutable
    pub id: Uuid,
    /// Task text; at least 2 characters after trimming (enforced by the store)
    #[serde(rename = "todo")]
    pub text: String,
    /// Priority; absent in stored form means medium
    #[serde(default)]
    pub priority: Priority,
    /// Optional due date; empty or malformed stored values degrade to none
    #[serde(
        rename = "dueDate",
        default,
        with = "due_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    /// Completion flag
    #[serde(rename = "isCompleted")]
    pub is_completed: bool,
}

impl Task {
    /// Create an incomplete task with a fresh id
    pub fn new(text: String, priority: Priority, due_date: Option<NaiveDate>) -> Self {
        Task {
            id: Uuid::new_v4(),
            text,
            priority,
            due_date,
            is_completed: false,
        }
    }
}

/// Stored form of `dueDate`: a `YYYY-MM-DD` string. The original data may
/// carry an empty string or junk for this field; both read back as none
/// rather than failing the record.
mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .filter(|s| !s.is_empty())
            .and_then(|s| NaiveDate::parse_from_str(&s, FORMAT).ok()))
    }
}
