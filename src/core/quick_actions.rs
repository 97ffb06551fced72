//! Frequently asked questions with canned answers.
//!
//! Selecting one answers locally, without a network call, and offers
//! follow-up questions that do go to the server.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    /// Question appended as the user's turn.
    pub prompt: &'static str,
    pub answer: &'static str,
    pub follow_ups: &'static [&'static str],
}

/// Sentence shown above the follow-up chips of a canned answer.
pub const FOLLOW_UP_PROMPT: &str = "더 궁금하신 점이 있으신가요? 아래 질문을 선택해 보세요.";

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        title: "대출 한도",
        prompt: "청년주택담보대출 한도가 얼마인가요?",
        answer: "청년주택담보대출의 한도는 최대 4억원까지 가능합니다. 다만, 주택가격의 70% 이내에서 결정되며, 신청자의 소득 및 신용도에 따라 달라질 수 있습니다.",
        follow_ups: &[
            "제 소득으로 받을 수 있는 한도를 알고 싶어요",
            "주택가격의 70%는 어떻게 계산되나요?",
        ],
    },
    QuickAction {
        title: "금리 정보",
        prompt: "현재 금리는 어떻게 되나요?",
        answer: "청년주택담보대출의 금리는 연 3.0%~4.5% 수준입니다. 고정금리와 변동금리 중 선택 가능하며, 소득 수준과 대출 기간에 따라 금리 우대가 적용될 수 있습니다.",
        follow_ups: &[
            "고정금리와 변동금리 중 무엇이 유리한가요?",
            "금리 우대 조건을 알려주세요",
        ],
    },
    QuickAction {
        title: "필요 서류",
        prompt: "대출 신청에 필요한 서류는 무엇인가요?",
        answer: "주민등록등본, 재직증명서, 소득금액증명원, 건강보험자격득실확인서, 매매계약서 사본, 등기부등본이 필요합니다. 추가로 은행에서 요구하는 서류가 있을 수 있습니다.",
        follow_ups: &[
            "서류는 어디에서 발급받나요?",
            "프리랜서는 어떤 소득 서류를 내야 하나요?",
        ],
    },
    QuickAction {
        title: "자격 조건",
        prompt: "대출 신청 자격 조건이 어떻게 되나요?",
        answer: "만 19세~34세 이하의 청년이며, 연 소득 5천만원 이하, 순자산 3.45억원 이하여야 합니다. 무주택자 또는 1주택자(생애최초 주택구입자)가 대상입니다.",
        follow_ups: &[
            "맞벌이 부부도 신청할 수 있나요?",
            "순자산은 어떻게 계산하나요?",
        ],
    },
];

impl QuickAction {
    pub fn follow_up_list(&self) -> Vec<String> {
        self.follow_ups.iter().map(|s| s.to_string()).collect()
    }
}
