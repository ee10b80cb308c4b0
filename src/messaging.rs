use serde::{Deserialize, Serialize};

/// A comment as it travels over the wire: `{"text": ..., "type": ...}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    #[serde(rename = "type")]
    pub comment_type: i32,
}

impl Comment {
    pub fn new(text: impl Into<String>, comment_type: i32) -> Self {
        Self {
            text: text.into(),
            comment_type,
        }
    }

    pub fn topic(&self) -> Topic {
        Topic::for_type(self.comment_type)
    }
}

/// Destination topic of a comment, selected by its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Topic1,
    Topic2,
    Topic3,
    Default,
}

impl Topic {
    pub fn for_type(comment_type: i32) -> Self {
        match comment_type {
            1 => Topic::Topic1,
            2 => Topic::Topic2,
            3 => Topic::Topic3,
            _ => Topic::Default,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Topic::Topic1 => "topic1",
            Topic::Topic2 => "topic2",
            Topic::Topic3 => "topic3",
            Topic::Default => "defaultTopic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "topic1" => Some(Topic::Topic1),
            "topic2" => Some(Topic::Topic2),
            "topic3" => Some(Topic::Topic3),
            "defaultTopic" => Some(Topic::Default),
            _ => None,
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reply of `POST /api/v1/comments`.
#[derive(Serialize, Deserialize, Debug)]
pub struct PushResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<Comment>,
}

impl PushResponse {
    pub fn pushed(comment: Comment) -> Self {
        Self {
            success: true,
            message: String::from("Comment pushed successfully"),
            comment: Some(comment),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            comment: None,
        }
    }
}

/// Reply of `GET /api/v1/topics/{topic}`.
#[derive(Serialize, Deserialize, Debug)]
pub struct TopicResponse {
    pub topic: String,
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_uses_type_on_the_wire() {
        let json = serde_json::to_value(Comment::new("message 1", 1)).unwrap();
        assert_eq!(json, serde_json::json!({"text": "message 1", "type": 1}));
    }

    #[test]
    fn unknown_types_go_to_default_topic() {
        assert_eq!(Topic::for_type(2), Topic::Topic2);
        assert_eq!(Topic::for_type(0), Topic::Default);
        assert_eq!(Topic::for_type(42).name(), "defaultTopic");
    }

    #[test]
    fn topic_names_parse_back() {
        for topic in [Topic::Topic1, Topic::Topic2, Topic::Topic3, Topic::Default] {
            assert_eq!(Topic::from_name(topic.name()), Some(topic));
        }
        assert_eq!(Topic::from_name("topic4"), None);
    }

    #[test]
    fn failed_push_omits_comment() {
        let json = serde_json::to_value(PushResponse::failed("Unable to parse")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Unable to parse"})
        );
    }
}
