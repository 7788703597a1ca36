//! 확장 실행 단위 중복 제거

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// 중복 판정용 키 정규화 규칙
///
/// `Lowercase`에서는 "노트북 추천"과 "노트북추천"이 다른 키워드,
/// `LowercaseNoWhitespace`에서는 같은 키워드로 취급된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalization {
    /// 소문자화만
    #[default]
    Lowercase,
    /// 소문자화 + 모든 공백 제거
    LowercaseNoWhitespace,
    /// 정규화 없이 문자열 그대로
    Exact,
}

impl Normalization {
    pub fn normalize(&self, keyword: &str) -> String {
        match self {
            Normalization::Lowercase => keyword.to_lowercase(),
            Normalization::LowercaseNoWhitespace => keyword
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect(),
            Normalization::Exact => keyword.to_string(),
        }
    }
}

/// 한 번의 확장 실행 동안 본 키워드 집합
#[derive(Debug, Clone, Default)]
pub struct DeduplicationSet {
    normalization: Normalization,
    seen: HashSet<String>,
}

impl DeduplicationSet {
    pub fn new(normalization: Normalization) -> Self {
        Self {
            normalization,
            seen: HashSet::new(),
        }
    }

    /// 처음 보는 키워드면 기록하고 true
    pub fn insert(&mut self, keyword: &str) -> bool {
        self.seen.insert(self.normalization.normalize(keyword))
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.seen.contains(&self.normalization.normalize(keyword))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
