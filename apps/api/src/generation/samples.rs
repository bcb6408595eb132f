//! Reference messages shown next to a generated message. Not every
//! (recipient, category) pair has one.

use crate::generation::options::{Category, Recipient};

const SAMPLES: &[(Recipient, Category, &str)] = &[
    (
        Recipient::Parent,
        Category::Safety,
        "[○○학교] 11월 15일 등하교 시 교통안전 지도 부탁드립니다. 횡단보도에서 좌우를 확인하도록 가정에서도 지도 부탁드립니다.",
    ),
    (
        Recipient::Parent,
        Category::FieldTrip,
        "[○○학교] 3학년 11월 20일 과학관 현장체험학습 안내입니다. 도시락, 물, 우산을 준비해 주세요. 참가 동의서는 11월 18일까지 제출 부탁드립니다.",
    ),
    (
        Recipient::Student,
        Category::Safety,
        "[○○학교] 내일 등교할 때 빗길에 미끄러지지 않도록 조심하세요. 우산을 꼭 챙기고, 천천히 걸어오세요.",
    ),
    (
        Recipient::Student,
        Category::Event,
        "[○○학교] 11월 25일 오후 2시 운동장에서 가을 축제가 열립니다. 친구들과 함께 즐거운 시간 보내세요!",
    ),
    (
        Recipient::Staff,
        Category::Safety,
        "[○○학교] 11월 15일 우천 시 등하교 안전 지도 철저히 부탁드립니다. 담당 구역 확인 후 배치 부탁드립니다.",
    ),
    (
        Recipient::Staff,
        Category::Event,
        "[○○학교] 11월 25일 14:00 가을축제 진행. 담당 부스 운영 교사는 13:30까지 준비 완료 부탁드립니다.",
    ),
];

pub fn sample_message(recipient: Recipient, category: Category) -> Option<&'static str> {
    SAMPLES
        .iter()
        .find(|(r, c, _)| *r == recipient && *c == category)
        .map(|(_, _, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pair_has_sample() {
        let sample = sample_message(Recipient::Student, Category::Event).unwrap();
        assert!(sample.contains("가을 축제"));
    }

    #[test]
    fn test_pair_without_sample_is_none() {
        assert!(sample_message(Recipient::Staff, Category::Counseling).is_none());
        assert!(sample_message(Recipient::Parent, Category::Event).is_none());
    }
}
