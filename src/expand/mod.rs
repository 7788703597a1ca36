//! 음절 기반 자동완성 확장
//!
//! 기준 키워드에 196개 음절이나 타이핑 중간 상태를 붙여 자동완성 제공자를
//! 반복 조회하고, 새로 나온 키워드를 출처와 함께 모은다.
//!
//! # 사용 예시
//!
//! ```
//! use kwexpand::expand::{Expander, ExpandOptions, StaticAutocomplete};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let fetcher = StaticAutocomplete::new().with_response("노트북 추", ["노트북 추천"]);
//! let expander = Expander::new(fetcher, ExpandOptions::naver().with_delay_ms(0));
//!
//! let results = expander.expand("노트북", &["ㅊ", "추"]).await.unwrap();
//! assert_eq!(results[0].keyword, "노트북 추천");
//! assert_eq!(results[0].source, "추");
//! # });
//! ```

mod config;
mod dedup;
mod driver;
mod fetch;

// 공개 인터페이스
pub use config::{Compose, ExpandOptions};
pub use dedup::{DeduplicationSet, Normalization};
pub use driver::{
    BatchInfo, ExpandError, Expander, ExpansionPage, ExpansionReport, ExpansionResult,
    FailedQuery, Phase, ProgressivePage, ProgressiveRequest, DEFAULT_KEYWORDS_PER_BATCH,
};
pub use fetch::{AutocompleteFetcher, FetchError, FnFetcher, StaticAutocomplete, Suggestion};
