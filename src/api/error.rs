use thiserror::Error;

/// 리소스 호출 내부 에러
///
/// 호출 경계에서 `Envelope::Failure`로 바뀌며 그 밖으로 나가지 않는다.
/// `Display` 문자열이 곧 화면에 보이는 메시지다.
#[derive(Error, Debug)]
pub enum ApiError {
    /// 서버에 연결하지 못함 (응답 없음)
    #[error("Network error: Unable to connect to the server")]
    Network(#[source] reqwest::Error),

    /// 2xx가 아닌 응답 (백엔드 메시지 또는 상태 코드 문구)
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 응답 본문 해석 실패
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed response: missing `{0}`")]
    MissingField(&'static str),

    /// 요청을 만들 수 없음 (빈 식별자, 잘못된 URL 등)
    #[error("{0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            ApiError::InvalidRequest(format!("Failed to read response: {}", err))
        } else {
            ApiError::Network(err)
        }
    }

    /// 비정상 응답 본문에서 백엔드 메시지 추출
    ///
    /// Flask 라우트는 `error`, flask-jwt-extended는 `msg`를 쓴다.
    pub(crate) fn from_status(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["error", "message", "msg"].iter().find_map(|key| {
                    value
                        .get(*key)
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string)
                })
            })
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        ApiError::Status { status, message }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
