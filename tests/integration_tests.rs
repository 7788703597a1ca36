//! 통합 테스트 - 음절 테이블, 타이핑 시퀀스, 확장 드라이버

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kwexpand::expand::{
    ExpandOptions, Expander, FetchError, FnFetcher, Phase, ProgressiveRequest,
    StaticAutocomplete, Suggestion,
};
use kwexpand::{build_syllable_table, compose_syllable, decompose_syllable, typing_sequence};

#[test]
fn test_syllable_table_properties() {
    let table = build_syllable_table();
    assert_eq!(table.len(), 196);

    let unique: HashSet<char> = table.iter().map(|s| s.as_char()).collect();
    assert_eq!(unique.len(), 196);
    assert!(table
        .iter()
        .all(|s| ('\u{AC00}'..='\u{D7A3}').contains(&s.as_char())));
}

#[test]
fn test_round_trip_law() {
    for cho in 0..19 {
        for jung in 0..21 {
            let c = compose_syllable(cho, jung, 0).unwrap();
            assert_eq!(decompose_syllable(c), Some((cho, jung, 0)));
        }
    }
}

#[test]
fn test_not_hangul() {
    for c in ['a', '1', ' ', 'ㄱ'] {
        assert_eq!(decompose_syllable(c), None);
    }
}

#[test]
fn test_typing_sequence_examples() {
    assert_eq!(typing_sequence("가"), vec!["ㄱ", "가"]);
    assert!(typing_sequence("").is_empty());
    assert_eq!(typing_sequence("ab"), vec!["a", "ab"]);
    assert_eq!(typing_sequence("춘"), vec!["ㅊ", "추", "춘"]);
}

#[test]
fn test_typing_sequence_mixed_script_one_step_per_char() {
    // 영문 구간은 글자마다 한 단계씩 (쿼리 수에 직접 영향)
    assert_eq!(
        typing_sequence("갤s24"),
        vec!["ㄱ", "개", "갤", "갤s", "갤s2", "갤s24"]
    );
}

#[tokio::test]
async fn test_always_failing_fetcher_returns_empty() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let fetcher = FnFetcher(move |_q: String| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<Vec<Suggestion>, _>(FetchError::Http("connection reset".into()))
        }
    });
    let expander = Expander::new(fetcher, ExpandOptions::google().with_delay_ms(0));

    let results = expander
        .expand("노트북", &typing_sequence("추천"))
        .await
        .unwrap();
    assert!(results.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_single_suggestion_for_every_state() {
    let fetcher = FnFetcher(|q: String| async move {
        // 대소문자만 다른 같은 제안
        let keyword = if q.ends_with('가') { "Galaxy" } else { "GALAXY" };
        Ok::<_, FetchError>(vec![Suggestion::new(keyword)])
    });
    let expander = Expander::new(fetcher, ExpandOptions::naver().with_delay_ms(0));

    let states = ["가", "나", "다", "라"];
    let results = expander.expand("폰", &states).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].keyword, "Galaxy");
    assert_eq!(results[0].source, "가");
}

#[tokio::test]
async fn test_deterministic_runs() {
    let fetcher = StaticAutocomplete::new()
        .with_response("맛집 가", ["맛집 가성비", "맛집 가족"])
        .with_response("맛집 나", ["맛집 나들이"])
        .with_response("맛집 히", ["맛집 히든"]);
    let expander = Expander::new(fetcher, ExpandOptions::google().with_delay_ms(0));

    let first = expander.expand_syllables("맛집").await.unwrap();
    let second = expander.expand_syllables("맛집").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.results.len(), 4);
    assert_eq!(first.queries_issued, 196);
    assert!(first
        .results
        .iter()
        .all(|r| r.phase == Some(Phase::SimpleSuffix)));
}

#[tokio::test]
async fn test_paged_expansion_resumes() {
    let fetcher = StaticAutocomplete::new()
        .with_response("k a", ["k a1"])
        .with_response("k c", ["k c1"])
        .with_response("k e", ["k e1"]);
    let expander = Expander::new(fetcher, ExpandOptions::naver().with_delay_ms(0));
    let states = ["a", "b", "c", "d", "e"];

    let mut collected = Vec::new();
    let mut index = 0;
    loop {
        let page = expander.expand_page("k", &states, index, 2).await.unwrap();
        collected.extend(page.results.into_iter().map(|r| r.keyword));
        index = page.next_index;
        if !page.has_more {
            break;
        }
    }
    assert_eq!(collected, vec!["k a1", "k c1", "k e1"]);
}

#[tokio::test(start_paused = true)]
async fn test_progressive_round_trip_across_batches() {
    let fetcher = StaticAutocomplete::new()
        .with_response(
            "카메라 ㄹ",
            ["카메라 렌즈", "카메라 렌탈", "카메라 루믹스"],
        )
        .with_response("카메라 렌즈 가", ["카메라 렌즈 가격"])
        .with_response("카메라 루믹스 가", ["카메라 루믹스 가방"]);
    let expander = Expander::new(fetcher, ExpandOptions::naver().with_delay_ms(0));

    let mut request = ProgressiveRequest::new("카메라", "렌즈");
    request.keywords_per_batch = 1;

    let first = expander.progressive(&request).await.unwrap();
    // "카메라 렌즈"는 기준+접미어와 같아 재확장 대상에서 제외
    assert_eq!(first.batch.phase1_keywords, vec!["카메라 렌탈", "카메라 루믹스"]);
    assert!(first.batch.has_more);
    assert!(first
        .results
        .iter()
        .all(|r| r.keyword != "카메라 루믹스 가방"));

    let second = expander.progressive(&request.next(&first.batch)).await.unwrap();
    assert!(!second.batch.has_more);
    assert_eq!(second.results.len(), 1);
    assert_eq!(second.results[0].keyword, "카메라 루믹스 가방");
    assert_eq!(second.results[0].source, "카메라 루믹스+가");
}
