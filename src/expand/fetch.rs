//! 자동완성 조회 인터페이스
//!
//! 확장 드라이버는 실제 제공자(네이버, 구글 등)를 모른다. 호출하는 쪽이
//! [`AutocompleteFetcher`] 구현을 주입한다.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 자동완성 제안 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub keyword: String,
    /// 검색량 (자동완성 단계에서는 보통 0)
    #[serde(default)]
    pub volume: u64,
}

impl Suggestion {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            volume: 0,
        }
    }
}

/// 자동완성 조회 실패
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// 네트워크/전송 실패
    #[error("request failed: {0}")]
    Http(String),
    /// 제공자가 오류 상태를 반환
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
    /// 응답 파싱 실패
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// 쿼리에 대한 데이터 없음
    #[error("no data for query: {0}")]
    NotFound(String),
    /// 저장된 응답 파일 읽기 실패
    #[error("failed to read fixture: {0}")]
    Io(String),
}

/// 쿼리 하나에 대한 자동완성 제안 조회
#[async_trait]
pub trait AutocompleteFetcher: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError>;
}

/// 비동기 클로저를 [`AutocompleteFetcher`]로 감싸는 어댑터
pub struct FnFetcher<F>(pub F);

#[async_trait]
impl<F, Fut> AutocompleteFetcher for FnFetcher<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Suggestion>, FetchError>> + Send,
{
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        (self.0)(query.to_string()).await
    }
}

#[async_trait]
impl<'a, T: AutocompleteFetcher + ?Sized> AutocompleteFetcher for &'a T {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        (**self).fetch(query).await
    }
}

#[async_trait]
impl<T: AutocompleteFetcher + ?Sized> AutocompleteFetcher for std::sync::Arc<T> {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        (**self).fetch(query).await
    }
}

/// 미리 저장된 응답을 돌려주는 제공자
///
/// # 파일 형식
/// ```json
/// {
///   "노트북 가": ["노트북 가방", "노트북 가격"],
///   "노트북 추": ["노트북 추천"]
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticAutocomplete {
    responses: HashMap<String, Vec<String>>,
    /// 없는 쿼리를 오류로 처리할지 여부 (기본: 빈 결과)
    strict: bool,
}

impl StaticAutocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// 쿼리 응답 추가
    pub fn with_response<I, S>(mut self, query: impl Into<String>, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses.insert(
            query.into(),
            suggestions.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// 등록되지 않은 쿼리를 [`FetchError::NotFound`]로 처리
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// JSON 문자열에서 로드
    pub fn from_json(json_str: &str) -> Result<Self, FetchError> {
        let responses: HashMap<String, Vec<String>> =
            serde_json::from_str(json_str).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(Self {
            responses,
            strict: false,
        })
    }

    /// JSON 파일에서 로드
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let content = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| FetchError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl AutocompleteFetcher for StaticAutocomplete {
    async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
        match self.responses.get(query) {
            Some(list) => Ok(list.iter().map(Suggestion::new).collect()),
            None if self.strict => Err(FetchError::NotFound(query.to_string())),
            None => Ok(Vec::new()),
        }
    }
}
