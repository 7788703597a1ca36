//! 자동완성 확장 드라이버
//!
//! 기준 키워드에 음절/타이핑 상태를 붙여 자동완성을 반복 조회하고,
//! 결과를 중복 제거하여 출처(source)와 함께 모은다.
//!
//! - 배치는 순차 실행, 배치 안의 요청은 동시에 보내고 모두 기다린다
//! - 배치 사이에 `delay_ms`만큼 쉰다 (제공자 속도 제한 회피)
//! - 쿼리 하나의 실패는 로그만 남기고 빈 결과로 취급한다

use std::time::Duration;

use futures_util::future::join_all;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::config::{Compose, ExpandOptions};
use super::dedup::{DeduplicationSet, Normalization};
use super::fetch::AutocompleteFetcher;
use crate::core::syllable_table::{initial_syllables, korean_syllable_strings};
use crate::core::typing::typing_sequence;

/// 점진적 모드에서 한 호출당 2단계로 재확장할 키워드 수
pub const DEFAULT_KEYWORDS_PER_BATCH: usize = 5;

/// 결과가 어느 단계에서 나왔는지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// 196개 음절 단순 확장
    SimpleSuffix,
    /// 타이핑 중간 상태 확장
    #[serde(rename = "phase1-typing")]
    Phase1Typing,
    /// 1단계 키워드 재확장
    #[serde(rename = "phase2-reexpand")]
    Phase2Reexpand,
}

/// 확장 결과 키워드 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub keyword: String,
    /// 검색량은 별도 조회 단계에서 채움
    pub volume: u64,
    /// 이 키워드를 만든 음절/상태
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
}

/// 실패한 쿼리 기록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedQuery {
    pub query: String,
    pub source: String,
    pub error: String,
}

/// 확장 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpansionReport {
    pub results: Vec<ExpansionResult>,
    pub failed_queries: Vec<FailedQuery>,
    pub queries_issued: usize,
}

/// 호출자가 나눠서 이어 부르는 확장의 한 페이지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionPage {
    pub results: Vec<ExpansionResult>,
    pub failed_queries: Vec<FailedQuery>,
    pub start_index: usize,
    /// 다음 호출의 시작 인덱스
    pub next_index: usize,
    pub total: usize,
    pub has_more: bool,
}

/// 점진적 모드 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveRequest {
    pub keyword: String,
    pub target_suffix: String,
    #[serde(default)]
    pub batch_index: usize,
    /// 이전 호출이 돌려준 1단계 키워드 (batch_index > 0일 때 사용)
    #[serde(default)]
    pub phase1_keywords: Option<Vec<String>>,
    #[serde(default = "default_keywords_per_batch")]
    pub keywords_per_batch: usize,
}

fn default_keywords_per_batch() -> usize {
    DEFAULT_KEYWORDS_PER_BATCH
}

impl ProgressiveRequest {
    pub fn new(keyword: impl Into<String>, target_suffix: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            target_suffix: target_suffix.into(),
            batch_index: 0,
            phase1_keywords: None,
            keywords_per_batch: DEFAULT_KEYWORDS_PER_BATCH,
        }
    }

    /// 이전 응답의 배치 정보로 다음 요청 생성
    pub fn next(&self, batch: &BatchInfo) -> Self {
        Self {
            batch_index: batch.current_batch + 1,
            phase1_keywords: Some(batch.phase1_keywords.clone()),
            ..self.clone()
        }
    }
}

/// 점진적 모드 진행 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchInfo {
    pub current_batch: usize,
    pub has_more: bool,
    pub total_keywords: usize,
    pub processed_keywords: usize,
    /// 다음 호출에 넘길 재확장 대상 키워드
    pub phase1_keywords: Vec<String>,
}

/// 점진적 모드 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressivePage {
    pub results: Vec<ExpansionResult>,
    pub batch: BatchInfo,
}

/// 확장 시작 전 입력 검증 실패
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    #[error("keyword must not be empty")]
    EmptyKeyword,
    #[error("target suffix must not be empty")]
    EmptyTargetSuffix,
    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}

/// 조회할 쿼리와 그 출처
struct PlannedQuery {
    query: String,
    source: String,
}

/// 자동완성 확장 드라이버
pub struct Expander<F> {
    fetcher: F,
    options: ExpandOptions,
}

impl<F: AutocompleteFetcher> Expander<F> {
    pub fn new(fetcher: F, options: ExpandOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn options(&self) -> &ExpandOptions {
        &self.options
    }

    /// 상태 목록으로 확장하고 결과만 반환
    pub async fn expand<S: AsRef<str>>(
        &self,
        base: &str,
        states: &[S],
    ) -> Result<Vec<ExpansionResult>, ExpandError> {
        Ok(self.run(base, states).await?.results)
    }

    /// 상태 목록으로 확장하고 실패 기록까지 반환
    pub async fn run<S: AsRef<str>>(
        &self,
        base: &str,
        states: &[S],
    ) -> Result<ExpansionReport, ExpandError> {
        self.run_tagged(base, states, None, &self.options).await
    }

    /// 196개 음절을 붙여 확장
    pub async fn expand_syllables(&self, base: &str) -> Result<ExpansionReport, ExpandError> {
        self.run_tagged(base, korean_syllable_strings(), Some(Phase::SimpleSuffix), &self.options)
            .await
    }

    /// `states[start_index..start_index + count]`만 처리
    ///
    /// 긴 확장을 여러 요청으로 나눌 때 사용한다. 중복 제거는 페이지 안에서만 적용되므로
    /// 앞 페이지에서 나온 키워드가 다음 페이지에 다시 나올 수 있다. 병합은 호출자 몫.
    pub async fn expand_page<S: AsRef<str>>(
        &self,
        base: &str,
        states: &[S],
        start_index: usize,
        count: usize,
    ) -> Result<ExpansionPage, ExpandError> {
        self.validate(base)?;
        if count == 0 {
            return Err(ExpandError::InvalidBatchSize);
        }

        let total = states.len();
        let start = start_index.min(total);
        let end = start.saturating_add(count).min(total);

        debug!("[EXPAND] 페이지 {}..{} / {}", start, end, total);

        let report = self
            .run_tagged(base, &states[start..end], None, &self.options)
            .await?;

        Ok(ExpansionPage {
            results: report.results,
            failed_queries: report.failed_queries,
            start_index: start,
            next_index: end,
            total,
            has_more: end < total,
        })
    }

    /// 점진적 타이핑 2단계 확장
    ///
    /// 1단계(`batch_index == 0`에서만): `target_suffix`의 타이핑 상태를 기준 키워드 뒤에 붙여 조회.
    /// 2단계: 1단계 키워드 중 이번 배치 몫을 196개 음절로 재확장.
    /// 2단계 호출 간격은 설정의 `delay_ms`가 아니라 `ExpandOptions::reexpand()`를 따른다.
    pub async fn progressive(
        &self,
        request: &ProgressiveRequest,
    ) -> Result<ProgressivePage, ExpandError> {
        let base = request.keyword.as_str();
        let suffix = request.target_suffix.as_str();
        self.validate(base)?;
        if suffix.trim().is_empty() {
            return Err(ExpandError::EmptyTargetSuffix);
        }
        if request.keywords_per_batch == 0 {
            return Err(ExpandError::InvalidBatchSize);
        }

        info!(
            "[EXPAND] 점진적 모드 배치 {}: '{}' + '{}'",
            request.batch_index, base, suffix
        );

        let mut dedup = DeduplicationSet::new(self.options.normalization);
        let mut report = ExpansionReport::default();

        let phase1_keywords: Vec<String> = if request.batch_index == 0 {
            let sequence = typing_sequence(suffix);
            debug!("[EXPAND] 타이핑 시퀀스: {:?}", sequence);

            let queries = sequence
                .iter()
                .map(|state| PlannedQuery {
                    query: Compose::Prefix.query(base, state),
                    source: state.clone(),
                })
                .collect();
            let before = report.results.len();
            self.execute(queries, Some(Phase::Phase1Typing), &self.options, &mut dedup, &mut report)
                .await;

            let added: Vec<String> = report.results[before..]
                .iter()
                .map(|r| r.keyword.clone())
                .collect();
            info!("[EXPAND] 1단계 완료: 새 키워드 {}개", added.len());
            added
        } else {
            request.phase1_keywords.clone().unwrap_or_default()
        };

        let full_lower = format!("{base} {suffix}").to_lowercase();
        let base_lower = base.to_lowercase();
        let candidates: Vec<String> = phase1_keywords
            .into_iter()
            .filter(|k| {
                let lower = k.to_lowercase();
                lower != full_lower && lower != base_lower
            })
            .collect();

        let total = candidates.len();
        let start = request
            .batch_index
            .saturating_mul(request.keywords_per_batch)
            .min(total);
        let end = start.saturating_add(request.keywords_per_batch).min(total);

        debug!("[EXPAND] 2단계 배치 {}: {}..{} / {}", request.batch_index, start, end, total);

        let reexpand = ExpandOptions {
            normalization: self.options.normalization,
            ..ExpandOptions::reexpand()
        };
        for keyword in &candidates[start..end] {
            if report.queries_issued > 0 {
                self.pause(&reexpand).await;
            }
            let queries = korean_syllable_strings()
                .iter()
                .map(|syllable| PlannedQuery {
                    query: reexpand.compose.query(keyword, syllable),
                    source: format!("{keyword}+{syllable}"),
                })
                .collect();
            let before = report.results.len();
            self.execute(queries, Some(Phase::Phase2Reexpand), &reexpand, &mut dedup, &mut report)
                .await;
            debug!(
                "[EXPAND] '{}' → 새 키워드 {}개",
                keyword,
                report.results.len() - before
            );
        }

        let has_more = end < total;
        info!(
            "[EXPAND] 배치 {} 완료: 총 {}개, 남은 배치 {}",
            request.batch_index,
            report.results.len(),
            if has_more { "있음" } else { "없음" }
        );

        Ok(ProgressivePage {
            results: report.results,
            batch: BatchInfo {
                current_batch: request.batch_index,
                has_more,
                total_keywords: total,
                processed_keywords: end,
                phase1_keywords: candidates,
            },
        })
    }

    /// 기준 키워드 + 초성 음절 14개(가~하) 빠른 확장
    ///
    /// 키워드 알림 작업용. 설정과 무관하게 `ExpandOptions::alert()` 간격(5개씩, 100ms)으로
    /// 조회하고 제안 문자열을 그대로 비교해 중복 제거한다.
    pub async fn expand_initials(&self, keyword: &str) -> Result<Vec<String>, ExpandError> {
        let options = ExpandOptions {
            normalization: Normalization::Exact,
            ..ExpandOptions::alert()
        };
        let report = self
            .run_tagged(keyword, &initial_syllables(), None, &options)
            .await?;
        Ok(report.results.into_iter().map(|r| r.keyword).collect())
    }

    fn validate(&self, base: &str) -> Result<(), ExpandError> {
        self.validate_with(base, &self.options)
    }

    fn validate_with(&self, base: &str, options: &ExpandOptions) -> Result<(), ExpandError> {
        if base.trim().is_empty() {
            return Err(ExpandError::EmptyKeyword);
        }
        if options.batch_size == 0 {
            return Err(ExpandError::InvalidBatchSize);
        }
        Ok(())
    }

    async fn run_tagged<S: AsRef<str>>(
        &self,
        base: &str,
        states: &[S],
        phase: Option<Phase>,
        options: &ExpandOptions,
    ) -> Result<ExpansionReport, ExpandError> {
        self.validate_with(base, options)?;

        let mut dedup = DeduplicationSet::new(options.normalization);
        let mut report = ExpansionReport::default();

        // 기준 키워드 조회 직후 바로 첫 배치를 보낸다
        if options.include_base_query {
            let base_query = PlannedQuery {
                query: base.to_string(),
                source: base.to_string(),
            };
            self.execute(vec![base_query], phase, options, &mut dedup, &mut report)
                .await;
        }

        let queries = states
            .iter()
            .map(|state| PlannedQuery {
                query: options.compose.query(base, state.as_ref()),
                source: state.as_ref().to_string(),
            })
            .collect();
        self.execute(queries, phase, options, &mut dedup, &mut report)
            .await;

        info!(
            "[EXPAND] '{}': 쿼리 {}개, 키워드 {}개, 실패 {}개",
            base,
            report.queries_issued,
            report.results.len(),
            report.failed_queries.len()
        );

        Ok(report)
    }

    /// 쿼리를 배치 단위로 조회하고 새 키워드를 보고서에 추가
    async fn execute(
        &self,
        queries: Vec<PlannedQuery>,
        phase: Option<Phase>,
        options: &ExpandOptions,
        dedup: &mut DeduplicationSet,
        report: &mut ExpansionReport,
    ) {
        let batch_size = options.batch_size.max(1);
        let batch_count = queries.len().div_ceil(batch_size);

        for (batch_index, batch) in queries.chunks(batch_size).enumerate() {
            let responses = join_all(batch.iter().map(|q| self.fetcher.fetch(&q.query))).await;
            report.queries_issued += batch.len();

            // 응답 완료 순서와 무관하게 요청 순서대로 병합
            for (planned, response) in batch.iter().zip(responses) {
                match response {
                    Ok(suggestions) => {
                        for suggestion in suggestions {
                            if dedup.insert(&suggestion.keyword) {
                                report.results.push(ExpansionResult {
                                    keyword: suggestion.keyword,
                                    volume: 0,
                                    source: planned.source.clone(),
                                    phase,
                                });
                            }
                        }
                    }
                    Err(e) => {
                        warn!("[EXPAND] '{}' 조회 실패: {}", planned.query, e);
                        report.failed_queries.push(FailedQuery {
                            query: planned.query.clone(),
                            source: planned.source.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }

            debug!("[EXPAND] 배치 {}/{} 완료", batch_index + 1, batch_count);

            if batch_index + 1 < batch_count {
                self.pause(options).await;
            }
        }
    }

    async fn pause(&self, options: &ExpandOptions) {
        if options.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(options.delay_ms)).await;
        }
    }
}
