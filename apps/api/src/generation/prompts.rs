// Prompt template for message generation.
// The system instruction lives in llm_client::prompts.

/// Placeholder text for the extra-information section when no field is filled.
pub const NO_EXTRA_INFO: &str = "없음";

/// Message generation prompt template.
/// Replace: {recipient}, {category}, {school}, {date}, {content}, {extra_info},
///          {tone}, {elements}, {length}, {style}
pub const MESSAGE_PROMPT_TEMPLATE: &str = r#"학교에서 발송하는 문자 메시지를 작성해주세요.

대상: {recipient}
카테고리: {category}
학교명: {school}
날짜/시간: {date}
주요 내용: {content}

추가 정보:
{extra_info}

작성 지침:
1. 톤: {tone}
2. 필수 포함 요소: {elements}
3. 길이: {length}
4. 스타일: {style}
5. 명확하고 구체적인 정보 전달
6. 불필요한 미사나 수식어 제외
7. 모든 대상에게 존댓말 사용

문자 메시지만 작성하고, 다른 설명은 포함하지 마세요."#;

/// Prefix of the text returned in place of a message when the completion call fails.
pub const GENERATION_FAILURE_PREFIX: &str = "문자 생성 중 오류가 발생했습니다";
