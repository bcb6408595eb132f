//! Plain-text export of batch results.

use chrono::NaiveDateTime;

use crate::generation::batch::{BatchMessage, Scenario};

/// One block per message, blocks separated by a blank line.
pub fn render_batch_text(messages: &[BatchMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            format!(
                "[{}용 문자]\n{}\n(글자수: {}자)",
                m.recipient.label(),
                m.content,
                m.char_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `{scenario label}_{YYYYmmdd_HHMMSS}.txt`
pub fn export_file_name(scenario: Scenario, at: NaiveDateTime) -> String {
    format!("{}_{}.txt", scenario.spec().label, at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generator::MessageKind;
    use crate::generation::options::Recipient;
    use chrono::NaiveDate;

    fn message(recipient: Recipient, content: &str) -> BatchMessage {
        BatchMessage {
            recipient,
            content: content.to_string(),
            char_count: content.chars().count(),
            kind: MessageKind::Sms,
        }
    }

    #[test]
    fn test_render_joins_blocks_with_blank_line() {
        let text = render_batch_text(&[
            message(Recipient::Parent, "우산을 챙겨 주세요."),
            message(Recipient::Staff, "안전 지도 부탁드립니다."),
        ]);

        assert_eq!(
            text,
            "[학부모용 문자]\n우산을 챙겨 주세요.\n(글자수: 11자)\n\n\
             [교직원용 문자]\n안전 지도 부탁드립니다.\n(글자수: 13자)"
        );
    }

    #[test]
    fn test_render_empty_batch_is_empty() {
        assert_eq!(render_batch_text(&[]), "");
    }

    #[test]
    fn test_file_name_uses_scenario_label_and_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 11, 5)
            .unwrap()
            .and_hms_opt(8, 3, 9)
            .unwrap();
        assert_eq!(
            export_file_name(Scenario::FieldTrip, at),
            "현장체험학습 안내_20241105_080309.txt"
        );
    }
}
