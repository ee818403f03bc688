//! 원격 생성 요청 프롬프트 구성 규칙.

use crate::domain::asset::UploadedAsset;

/// AI 윤문 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolishMode {
    /// 더 구체적이고 풍성하게
    Enrich,
    /// 간결하게 요약
    Simplify,
}

impl PolishMode {
    /// 지원값: enrich/simplify (미지정/알수없음은 enrich 기본값)
    pub fn from_config(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("simplify" | "simple" | "short") => Self::Simplify,
            _ => Self::Enrich,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Enrich => "enrich",
            Self::Simplify => "simplify",
        }
    }
}

pub fn build_polish_prompt(text: &str, mode: PolishMode) -> String {
    match mode {
        PolishMode::Enrich => format!(
            "다음 생기부 특기사항 문구를 더 구체적이고 교육적인 표현으로 풍성하게 다듬어주세요. 원래 의미는 유지하되, 학생의 성장이 돋보이도록 문장을 업그레이드해주세요. 결과물은 완성된 문장 하나만 출력하세요.\n\n문구: \"{text}\""
        ),
        PolishMode::Simplify => format!(
            "다음 생기부 특기사항 문구를 간결하고 명확하게 요약해주세요. 결과물은 문장 하나만 출력하세요.\n\n문구: \"{text}\""
        ),
    }
}

/// 이미지 앞에 붙는 번호 라벨. 사용자가 "N번 사진"으로 지칭할 수 있게 한다.
pub fn image_label(position: usize, asset: &UploadedAsset) -> String {
    format!("[사진 {position}] {}", asset.file_name)
}

/// 이미지 뒤에 붙는 작성 지시문.
pub fn build_image_instruction(instruction: &str, image_count: usize) -> String {
    let mut out = String::new();
    out.push_str(
        "위 증빙 사진들을 바탕으로 학교생활기록부 창의적 체험활동 특기사항을 작성해주세요.\n",
    );
    out.push_str(&format!(
        "사진은 1번부터 {image_count}번까지 업로드 순서대로 번호가 붙어 있습니다.\n"
    ));
    out.push_str("학생의 활동 내용, 역할, 배우고 느낀 점이 드러나도록 '~함.', '~임.' 형태의 개조식 종결어미로 작성하세요.\n");
    out.push_str("사진에 없는 사실은 지어내지 말고, 결과물은 완성된 특기사항 문단만 출력하세요.\n");

    let extra = instruction.trim();
    if !extra.is_empty() {
        out.push_str("\n추가 요청 사항(반드시 따를 것):\n");
        out.push_str(extra);
        out.push('\n');
    }
    out
}
