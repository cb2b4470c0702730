//! Display language and user-facing messages.
//!
//! The dashboard speaks two hard-coded languages. Every message a user can
//! see outside of data values is a [`Notice`], rendered per [`Language`].

use serde::{Deserialize, Serialize};

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" | "한국어" => Some(Self::Korean),
            "en" | "english" => Some(Self::English),
            _ => None,
        }
    }

    /// Name of the language as written in an instruction to the model.
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::English => "English",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Korean => write!(f, "ko"),
            Self::English => write!(f, "en"),
        }
    }
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LocationRequired,
    EmptyPaste,
    UnrecognizedFormat,
    RecordsAdded(usize),
    RecordAdded(String),
    RecordRemoved(String),
    IndexOutOfRange { index: usize, len: usize },
    InsightFailed,
    InsightEmpty,
}

impl Notice {
    pub fn text(&self, language: Language) -> String {
        match language {
            Language::Korean => self.korean(),
            Language::English => self.english(),
        }
    }

    fn korean(&self) -> String {
        match self {
            Self::LocationRequired => "배너 위치를 입력해주세요.".to_string(),
            Self::EmptyPaste => "데이터를 입력해주세요.".to_string(),
            Self::UnrecognizedFormat => {
                "데이터 형식이 올바르지 않습니다. 엑셀에서 행 전체를 복사해서 붙여넣어주세요."
                    .to_string()
            }
            Self::RecordsAdded(n) => format!("{n}개의 데이터가 추가되었습니다."),
            Self::RecordAdded(location) => format!("'{location}' 지면이 추가되었습니다."),
            Self::RecordRemoved(location) => format!("'{location}' 지면이 삭제되었습니다."),
            Self::IndexOutOfRange { index, len } => {
                format!("{index}번 항목이 없습니다 (전체 {len}개).")
            }
            Self::InsightFailed => {
                "AI 분석을 불러오는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.".to_string()
            }
            Self::InsightEmpty => "현재 AI 분석 결과를 생성할 수 없습니다.".to_string(),
        }
    }

    fn english(&self) -> String {
        match self {
            Self::LocationRequired => "Please enter a banner location.".to_string(),
            Self::EmptyPaste => "Please paste some data.".to_string(),
            Self::UnrecognizedFormat => {
                "The data format was not recognized. Copy entire rows from the spreadsheet and paste them again."
                    .to_string()
            }
            Self::RecordsAdded(n) => format!("{n} records added."),
            Self::RecordAdded(location) => format!("Added placement '{location}'."),
            Self::RecordRemoved(location) => format!("Removed placement '{location}'."),
            Self::IndexOutOfRange { index, len } => {
                format!("No record at index {index} ({len} records).")
            }
            Self::InsightFailed => {
                "An error occurred while loading the AI analysis. Please try again shortly."
                    .to_string()
            }
            Self::InsightEmpty => "No insights could be generated at this time.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_is_default() {
        assert_eq!(Language::default(), Language::Korean);
    }

    #[test]
    fn records_added_includes_count() {
        assert_eq!(
            Notice::RecordsAdded(3).text(Language::Korean),
            "3개의 데이터가 추가되었습니다."
        );
        assert_eq!(Notice::RecordsAdded(3).text(Language::English), "3 records added.");
    }

    #[test]
    fn parse_language_names() {
        assert_eq!(Language::parse("KO"), Some(Language::Korean));
        assert_eq!(Language::parse("english"), Some(Language::English));
        assert_eq!(Language::parse("fr"), None);
    }

    #[test]
    fn language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::English).unwrap(), "\"en\"");
    }
}
