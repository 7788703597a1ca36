//! 자음 + 모음 조합 음절 테이블
//!
//! 키보드에서 한 번에 입력 가능한 기본 자음 14개와 기본 모음 14개로
//! 종성 없는 음절 196개를 만든다. 자동완성 확장 쿼리의 재료로 쓰인다.

use lazy_static::lazy_static;

use crate::core::unicode::{compose_syllable, Syllable};

/// 기본 자음 (14개, 쌍자음 제외)
pub const BASIC_CONSONANTS: [char; 14] = [
    'ㄱ', 'ㄴ', 'ㄷ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅅ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// 기본 모음 (14개, 복합 모음 제외)
pub const BASIC_VOWELS: [char; 14] = [
    'ㅏ', 'ㅑ', 'ㅓ', 'ㅕ', 'ㅗ', 'ㅛ', 'ㅜ', 'ㅠ', 'ㅡ', 'ㅣ', 'ㅐ', 'ㅒ', 'ㅔ', 'ㅖ',
];

/// 전체 초성 테이블 (19개, 유니코드 순서)
pub const CHOSEONG_TABLE: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// 전체 중성 테이블 (21개, 유니코드 순서)
pub const JUNGSEONG_TABLE: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ', 'ㅞ',
    'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// 음절 테이블 크기 (14 × 14)
pub const SYLLABLE_TABLE_SIZE: usize = BASIC_CONSONANTS.len() * BASIC_VOWELS.len();

lazy_static! {
    static ref KOREAN_SYLLABLES: Vec<Syllable> = build_syllable_table();
    static ref KOREAN_SYLLABLE_STRINGS: Vec<String> = KOREAN_SYLLABLES
        .iter()
        .map(|s| s.to_string())
        .collect();
}

fn choseong_index(jamo: char) -> Option<u32> {
    CHOSEONG_TABLE.iter().position(|&c| c == jamo).map(|i| i as u32)
}

fn jungseong_index(jamo: char) -> Option<u32> {
    JUNGSEONG_TABLE.iter().position(|&c| c == jamo).map(|i| i as u32)
}

/// 196개 음절 테이블 생성
///
/// 순서: 자음 바깥 루프, 모음 안쪽 루프 (가 갸 거 겨 ... 헤 혜)
pub fn build_syllable_table() -> Vec<Syllable> {
    let mut syllables = Vec::with_capacity(SYLLABLE_TABLE_SIZE);

    for &consonant in BASIC_CONSONANTS.iter() {
        for &vowel in BASIC_VOWELS.iter() {
            // 기본 자모는 모두 전체 테이블에 존재
            let (Some(cho), Some(jung)) = (choseong_index(consonant), jungseong_index(vowel)) else {
                continue;
            };
            if let Some(syllable) = Syllable::compose(cho, jung, 0) {
                syllables.push(syllable);
            }
        }
    }

    syllables
}

/// 메모이즈된 196개 음절 (프로세스 전역, 읽기 전용)
pub fn korean_syllables() -> &'static [Syllable] {
    &KOREAN_SYLLABLES
}

/// 196개 음절을 한 글자 문자열로 반환
pub fn korean_syllable_strings() -> &'static [String] {
    &KOREAN_SYLLABLE_STRINGS
}

/// 기본 자음마다 ㅏ를 붙인 14개 음절 (가 나 다 ... 하)
pub fn initial_syllables() -> Vec<String> {
    BASIC_CONSONANTS
        .iter()
        .filter_map(|&c| choseong_index(c))
        .filter_map(|cho| compose_syllable(cho, 0, 0))
        .map(String::from)
        .collect()
}
