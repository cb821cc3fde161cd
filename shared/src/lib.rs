use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// 后端对主题长度的限制
pub const MAX_SUBJECT_LEN: usize = 500;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 邮件语气
///
/// 序列化为首字母大写的名称，解析时大小写不敏感。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Formal,
    Casual,
    Friendly,
    Persuasive,
    Concise,
    Empathetic,
    Neutral,
    Encouraging,
}

impl Tone {
    pub const ALL: [Tone; 8] = [
        Tone::Formal,
        Tone::Casual,
        Tone::Friendly,
        Tone::Persuasive,
        Tone::Concise,
        Tone::Empathetic,
        Tone::Neutral,
        Tone::Encouraging,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Casual => "Casual",
            Tone::Friendly => "Friendly",
            Tone::Persuasive => "Persuasive",
            Tone::Concise => "Concise",
            Tone::Empathetic => "Empathetic",
            Tone::Neutral => "Neutral",
            Tone::Encouraging => "Encouraging",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tone: {0}")]
pub struct UnknownTone(pub String);

impl FromStr for Tone {
    type Err = UnknownTone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTone(s.to_string()))
    }
}

/// 历史记录条目（只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailHistoryEntry {
    pub id: i64,
    pub prompt: String,
    #[serde(alias = "generatedEmail")]
    pub generated_email: String,
    pub timestamp: Timestamp,
}

/// 生成的邮件草稿
///
/// 只能通过用户显式编辑修改正文，生命周期为一次生成交互。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDraft {
    pub subject: String,
    pub tone: Tone,
    pub body: String,
}

impl GeneratedDraft {
    pub fn new(subject: impl Into<String>, tone: Tone, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            tone,
            body: body.into(),
        }
    }

    /// 用户编辑正文
    pub fn edit_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// 生成交给外部邮件客户端的 `mailto:` 链接
    ///
    /// 空格编码为 `%20` 而不是表单风格的 `+`，多数邮件客户端不会把 `+` 还原为空格。
    pub fn mailto_uri(&self) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("subject", &self.subject)
            .append_pair("body", &self.body)
            .finish();
        // 字面量 '+' 已被编码为 %2B，剩下的 '+' 都来自空格
        format!("mailto:?{}", query.replace('+', "%20"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parse_is_case_insensitive() {
        assert_eq!("formal".parse::<Tone>().unwrap(), Tone::Formal);
        assert_eq!(" ENCOURAGING ".parse::<Tone>().unwrap(), Tone::Encouraging);
        assert_eq!(
            "sarcastic".parse::<Tone>(),
            Err(UnknownTone("sarcastic".to_string()))
        );
        assert_eq!(
            "".parse::<Tone>().unwrap_err().to_string(),
            "unknown tone: "
        );
    }

    #[test]
    fn test_tone_serializes_capitalized() {
        assert_eq!(serde_json::to_string(&Tone::Formal).unwrap(), "\"Formal\"");
        for tone in Tone::ALL {
            assert_eq!(tone.as_str().parse::<Tone>().unwrap(), tone);
        }
    }

    #[test]
    fn test_history_entry_accepts_both_field_names() {
        let snake: EmailHistoryEntry = serde_json::from_value(serde_json::json!({
            "id": 1,
            "prompt": "Quarterly report",
            "generated_email": "Subject: Q3",
            "timestamp": "2024-05-01T08:30:00"
        }))
        .unwrap();
        let camel: EmailHistoryEntry = serde_json::from_value(serde_json::json!({
            "id": 1,
            "prompt": "Quarterly report",
            "generatedEmail": "Subject: Q3",
            "timestamp": "2024-05-01T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(snake, camel);
    }

    #[test]
    fn test_draft_edit_and_mailto() {
        let mut draft = GeneratedDraft::new("Project Update", Tone::Formal, "Dear Team,");
        draft.edit_body("Hi all & thanks +1");

        assert_eq!(draft.body, "Hi all & thanks +1");
        assert_eq!(
            draft.mailto_uri(),
            "mailto:?subject=Project%20Update&body=Hi%20all%20%26%20thanks%20%2B1"
        );
    }
}
