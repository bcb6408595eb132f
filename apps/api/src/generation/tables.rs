//! Guidance lookup tables: tone per recipient, required elements per category,
//! length and style guides.
//!
//! `PromptTables::default()` carries the built-in guidance. A JSON file may
//! replace any of the four tables at startup; a table present in the file is
//! used as-is, so keys it leaves out resolve through the fallbacks below.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::generation::options::{Category, LengthOption, Recipient, StyleOption};

/// Tone used when the recipient has no entry and no override was supplied.
pub const DEFAULT_TONE: &str = "정중하고 명확한 톤. 존댓말 사용";
pub const DEFAULT_CATEGORY_ELEMENTS: &str = "핵심 정보";
pub const DEFAULT_LENGTH_GUIDE: &str = "80자 내외";
pub const DEFAULT_STYLE_GUIDE: &str = "표준적인 문체";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PromptTables {
    #[serde(default = "default_tone_guides")]
    pub tone: BTreeMap<Recipient, String>,
    #[serde(default = "default_category_elements")]
    pub category_elements: BTreeMap<Category, String>,
    #[serde(default = "default_length_guides")]
    pub length: BTreeMap<LengthOption, String>,
    #[serde(default = "default_style_guides")]
    pub style: BTreeMap<StyleOption, String>,
}

impl Default for PromptTables {
    fn default() -> Self {
        Self {
            tone: default_tone_guides(),
            category_elements: default_category_elements(),
            length: default_length_guides(),
            style: default_style_guides(),
        }
    }
}

impl PromptTables {
    /// Loads tables from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt tables from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid prompt tables JSON in {}", path.display()))
    }

    /// Tone for the recipient; falls back to a non-empty caller override, then `DEFAULT_TONE`.
    pub fn tone_for<'a>(&'a self, recipient: Recipient, tone_override: Option<&'a str>) -> &'a str {
        if let Some(tone) = self.tone.get(&recipient) {
            return tone;
        }
        match tone_override.map(str::trim) {
            Some(custom) if !custom.is_empty() => custom,
            _ => DEFAULT_TONE,
        }
    }

    pub fn elements_for(&self, category: Category) -> &str {
        self.category_elements
            .get(&category)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY_ELEMENTS)
    }

    pub fn length_for(&self, length: LengthOption) -> &str {
        self.length
            .get(&length)
            .map(String::as_str)
            .unwrap_or(DEFAULT_LENGTH_GUIDE)
    }

    pub fn style_for(&self, style: StyleOption) -> &str {
        self.style
            .get(&style)
            .map(String::as_str)
            .unwrap_or(DEFAULT_STYLE_GUIDE)
    }
}

fn owned<K: Ord + Copy>(pairs: &[(K, &str)]) -> BTreeMap<K, String> {
    pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

fn default_tone_guides() -> BTreeMap<Recipient, String> {
    owned(&[
        (
            Recipient::Parent,
            "정중하고 상세하며 신뢰감을 주는 톤. 존댓말 사용. [학교명]으로 시작",
        ),
        (
            Recipient::Student,
            "친근하고 이해하기 쉬운 톤. 존댓말 사용. 학생들의 눈높이에 맞춘 표현",
        ),
        (
            Recipient::Staff,
            "간결하고 업무적이며 핵심만 전달하는 톤. 존댓말 사용. 담당 업무 명시",
        ),
    ])
}

fn default_category_elements() -> BTreeMap<Category, String> {
    owned(&[
        (Category::Safety, "안전 주의사항, 구체적인 행동 지침"),
        (Category::Disaster, "대응 방법, 비상 연락처, 준비물"),
        (Category::FieldTrip, "일시, 장소, 준비물, 주의사항"),
        (Category::Event, "일시, 장소, 참여 방법, 준비사항"),
        (Category::Counseling, "상담 일정, 신청 방법, 준비 서류"),
        (Category::Notice, "핵심 정보, 확인 사항, 문의처"),
    ])
}

fn default_length_guides() -> BTreeMap<LengthOption, String> {
    owned(&[
        (LengthOption::VeryShort, "40자 이내로 핵심만 간단히"),
        (LengthOption::Short, "60자 이내로 간결하게"),
        (LengthOption::Standard, "80자 내외로 적절하게"),
        (LengthOption::Long, "120자 내외로 상세하게"),
        (LengthOption::VeryLong, "180자 내외로 자세하게"),
    ])
}

fn default_style_guides() -> BTreeMap<StyleOption, String> {
    owned(&[
        (StyleOption::Basic, "표준적이고 격식 있는 문체"),
        (StyleOption::Friendly, "따뜻하고 친근한 문체, 이모티콘 포함 가능"),
        (StyleOption::Urgent, "긴급하고 단호한 문체, 중요 내용 강조"),
        (StyleOption::Formal, "매우 격식 있고 공식적인 문체"),
        (StyleOption::Guide, "차분하고 설명적인 문체, 단계별 안내"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_cover_every_key() {
        let tables = PromptTables::default();
        assert_eq!(tables.tone.len(), Recipient::ALL.len());
        assert_eq!(tables.category_elements.len(), Category::ALL.len());
        assert_eq!(tables.length.len(), LengthOption::ALL.len());
        assert_eq!(tables.style.len(), StyleOption::ALL.len());
    }

    #[test]
    fn test_every_recipient_category_pair_selects_fixed_guidance() {
        let tables = PromptTables::default();
        let expected_tone = [
            (Recipient::Parent, "정중하고 상세하며 신뢰감을 주는 톤"),
            (Recipient::Student, "친근하고 이해하기 쉬운 톤"),
            (Recipient::Staff, "간결하고 업무적이며 핵심만 전달하는 톤"),
        ];
        let expected_elements = [
            (Category::Safety, "안전 주의사항, 구체적인 행동 지침"),
            (Category::Disaster, "대응 방법, 비상 연락처, 준비물"),
            (Category::FieldTrip, "일시, 장소, 준비물, 주의사항"),
            (Category::Event, "일시, 장소, 참여 방법, 준비사항"),
            (Category::Counseling, "상담 일정, 신청 방법, 준비 서류"),
            (Category::Notice, "핵심 정보, 확인 사항, 문의처"),
        ];

        for (recipient, tone_prefix) in expected_tone {
            for (category, elements) in expected_elements {
                let tone = tables.tone_for(recipient, None);
                assert!(
                    tone.starts_with(tone_prefix),
                    "{recipient:?}/{category:?}: unexpected tone {tone}"
                );
                assert_eq!(tables.elements_for(category), elements);
            }
        }
    }

    #[test]
    fn test_known_recipient_ignores_override() {
        let tables = PromptTables::default();
        let tone = tables.tone_for(Recipient::Staff, Some("긴급하고 단호한 톤"));
        assert!(tone.starts_with("간결하고 업무적"));
    }

    #[test]
    fn test_missing_tone_uses_override_then_default() {
        let mut tables = PromptTables::default();
        tables.tone.remove(&Recipient::Student);

        assert_eq!(
            tables.tone_for(Recipient::Student, Some("긴급하고 단호한 톤")),
            "긴급하고 단호한 톤"
        );
        assert_eq!(tables.tone_for(Recipient::Student, Some("   ")), DEFAULT_TONE);
        assert_eq!(tables.tone_for(Recipient::Student, None), DEFAULT_TONE);
    }

    #[test]
    fn test_missing_keys_use_fixed_defaults() {
        let tables = PromptTables {
            tone: BTreeMap::new(),
            category_elements: BTreeMap::new(),
            length: BTreeMap::new(),
            style: BTreeMap::new(),
        };
        assert_eq!(tables.elements_for(Category::Event), "핵심 정보");
        assert_eq!(tables.length_for(LengthOption::Long), "80자 내외");
        assert_eq!(tables.style_for(StyleOption::Urgent), "표준적인 문체");
    }

    #[test]
    fn test_partial_json_keeps_builtin_tables_it_omits() {
        let json = r#"{ "style": { "basic": "간결한 문체" } }"#;
        let tables: PromptTables = serde_json::from_str(json).unwrap();

        assert_eq!(tables.style_for(StyleOption::Basic), "간결한 문체");
        assert_eq!(tables.style_for(StyleOption::Formal), DEFAULT_STYLE_GUIDE);
        assert_eq!(tables.length_for(LengthOption::Short), "60자 이내로 간결하게");
        assert_eq!(tables.tone, PromptTables::default().tone);
    }
}
