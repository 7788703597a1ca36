//! 확장 드라이버 설정
//!
//! 제공자마다 관찰된 호출 간격과 동시 요청 수가 달라 프리셋으로 제공한다.

use serde::{Deserialize, Serialize};

use super::dedup::Normalization;

/// 기준 키워드와 상태(음절/타이핑 상태)를 합치는 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compose {
    /// "{기준} {상태}"
    #[default]
    Prefix,
    /// "{상태} {기준}"
    Suffix,
}

impl Compose {
    pub fn query(&self, base: &str, state: &str) -> String {
        match self {
            Compose::Prefix => format!("{base} {state}"),
            Compose::Suffix => format!("{state} {base}"),
        }
    }
}

/// 확장 실행 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandOptions {
    /// 배치 사이 대기 시간 (ms)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// 한 배치에 동시에 보내는 요청 수
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub compose: Compose,
    #[serde(default)]
    pub normalization: Normalization,
    /// 상태를 붙이기 전에 기준 키워드 자체도 조회
    #[serde(default)]
    pub include_base_query: bool,
}

fn default_delay_ms() -> u64 {
    50
}

fn default_batch_size() -> usize {
    1
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            batch_size: default_batch_size(),
            compose: Compose::default(),
            normalization: Normalization::default(),
            include_base_query: false,
        }
    }
}

impl ExpandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 네이버 자동완성: 순차 호출, 50ms 간격
    pub fn naver() -> Self {
        Self::default()
    }

    /// 구글 자동완성: 10개씩 동시, 100ms 간격
    pub fn google() -> Self {
        Self::new().with_batch_size(10).with_delay_ms(100)
    }

    /// 알림 작업: 기준 키워드 포함, 5개씩 동시, 100ms 간격
    pub fn alert() -> Self {
        Self::new()
            .with_batch_size(5)
            .with_delay_ms(100)
            .with_base_query(true)
    }

    /// 2단계 재확장: 순차 호출, 30ms 간격
    pub fn reexpand() -> Self {
        Self::new().with_delay_ms(30)
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_compose(mut self, compose: Compose) -> Self {
        self.compose = compose;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_base_query(mut self, include: bool) -> Self {
        self.include_base_query = include;
        self
    }
}
