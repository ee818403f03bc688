//! 이미지 기반 생성에 쓰이는 업로드 자산.

/// base64로 인코딩된 이미지 한 장. 한 번의 생성 요청 동안만 유지된다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub id: String,
    pub file_name: String,
    pub mime_type: String,
    pub base64: String,
}

/// 확장자로 이미지 MIME 타입을 판별한다. 이미지가 아니면 `None`.
pub fn image_mime_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}
