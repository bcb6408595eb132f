// Shared prompt constants for the completion client.
// Generation-specific templates live in generation::prompts.

/// System instruction sent with every message generation.
pub const SCHOOL_ADMIN_SYSTEM: &str =
    "당신은 학교 행정 업무를 돕는 전문가입니다. 간결하고 명확한 문자 메시지를 작성합니다.";
