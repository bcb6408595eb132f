//! Closed form enumerations: recipient, category, length and style.
//!
//! Wire values are snake_case; `label()` is the Korean label that goes into
//! the prompt, the export file, and the form.

use serde::{Deserialize, Serialize};

/// Who the message is addressed to. Selects the tone guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    Parent,
    Student,
    Staff,
}

impl Recipient {
    pub const ALL: [Recipient; 3] = [Recipient::Parent, Recipient::Student, Recipient::Staff];

    pub fn label(&self) -> &'static str {
        match self {
            Recipient::Parent => "학부모",
            Recipient::Student => "학생",
            Recipient::Staff => "교직원",
        }
    }
}

/// Topic of the message. Selects the required content elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Safety,
    Disaster,
    FieldTrip,
    Event,
    Counseling,
    Notice,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Safety,
        Category::Disaster,
        Category::FieldTrip,
        Category::Event,
        Category::Counseling,
        Category::Notice,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Safety => "안전",
            Category::Disaster => "재난",
            Category::FieldTrip => "체험학습",
            Category::Event => "행사 안내",
            Category::Counseling => "상담",
            Category::Notice => "안내",
        }
    }
}

/// Requested output length.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LengthOption {
    VeryShort,
    Short,
    #[default]
    Standard,
    Long,
    VeryLong,
}

impl LengthOption {
    pub const ALL: [LengthOption; 5] = [
        LengthOption::VeryShort,
        LengthOption::Short,
        LengthOption::Standard,
        LengthOption::Long,
        LengthOption::VeryLong,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LengthOption::VeryShort => "매우 짧게",
            LengthOption::Short => "짧게",
            LengthOption::Standard => "표준",
            LengthOption::Long => "길게",
            LengthOption::VeryLong => "매우 길게",
        }
    }

    /// Approximate target size in characters, shown as form help.
    pub fn target_chars(&self) -> u32 {
        match self {
            LengthOption::VeryShort => 40,
            LengthOption::Short => 60,
            LengthOption::Standard => 80,
            LengthOption::Long => 120,
            LengthOption::VeryLong => 180,
        }
    }
}

/// Requested tone register.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StyleOption {
    #[default]
    Basic,
    Friendly,
    Urgent,
    Formal,
    Guide,
}

impl StyleOption {
    pub const ALL: [StyleOption; 5] = [
        StyleOption::Basic,
        StyleOption::Friendly,
        StyleOption::Urgent,
        StyleOption::Formal,
        StyleOption::Guide,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StyleOption::Basic => "기본",
            StyleOption::Friendly => "친근함",
            StyleOption::Urgent => "긴급함",
            StyleOption::Formal => "공식적",
            StyleOption::Guide => "안내형",
        }
    }
}

/// A labelled option as rendered by the form.
#[derive(Debug, Clone, Serialize)]
pub struct OptionEntry<T: Serialize> {
    pub value: T,
    pub label: &'static str,
}

/// An optional free-text (or fixed-choice) field the form shows for a category
/// or batch scenario. `key` becomes the extra-field name in the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ExtraFieldSpec {
    pub key: &'static str,
    pub placeholder: &'static str,
    #[serde(skip_serializing_if = "has_no_choices")]
    pub choices: &'static [&'static str],
}

fn has_no_choices(choices: &&'static [&'static str]) -> bool {
    choices.is_empty()
}

pub(crate) const fn text_field(key: &'static str, placeholder: &'static str) -> ExtraFieldSpec {
    ExtraFieldSpec {
        key,
        placeholder,
        choices: &[],
    }
}

const fn choice_field(key: &'static str, choices: &'static [&'static str]) -> ExtraFieldSpec {
    ExtraFieldSpec {
        key,
        placeholder: "",
        choices,
    }
}

const FIELD_TRIP_FIELDS: &[ExtraFieldSpec] = &[
    text_field("장소", "예: 국립과학관"),
    text_field("준비물", "예: 도시락, 물, 우산"),
    text_field("학년", "예: 3학년"),
];

const EVENT_FIELDS: &[ExtraFieldSpec] = &[
    text_field("행사명", "예: 가을 축제"),
    text_field("장소", "예: 운동장"),
    text_field("참가 대상", "예: 전교생"),
];

const COUNSELING_FIELDS: &[ExtraFieldSpec] = &[
    choice_field("상담 유형", &["학부모 상담", "진로 상담", "학습 상담"]),
    text_field("신청 방법", "예: 담임교사에게 신청"),
    text_field("기한", "예: 11월 20일까지"),
];

const SAFETY_FIELDS: &[ExtraFieldSpec] = &[
    text_field("위험 요소", "예: 빗길 미끄러움"),
    text_field("주의 구역", "예: 정문 앞 횡단보도"),
];

const DISASTER_FIELDS: &[ExtraFieldSpec] = &[
    choice_field("재난 유형", &["태풍", "폭우", "폭설", "지진", "화재"]),
    text_field("대응 방법", "예: 실내 대피"),
];

const NOTICE_FIELDS: &[ExtraFieldSpec] = &[
    text_field("문의처", "예: 교무실 02-123-4567"),
    text_field("참고 사항", "예: 자세한 내용은 홈페이지 참조"),
];

impl Category {
    /// Optional fields the single-message form offers for this category.
    pub fn extra_fields(&self) -> &'static [ExtraFieldSpec] {
        match self {
            Category::FieldTrip => FIELD_TRIP_FIELDS,
            Category::Event => EVENT_FIELDS,
            Category::Counseling => COUNSELING_FIELDS,
            Category::Safety => SAFETY_FIELDS,
            Category::Disaster => DISASTER_FIELDS,
            Category::Notice => NOTICE_FIELDS,
        }
    }
}
