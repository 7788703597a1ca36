//! 유니코드 한글 조합/분해 유틸리티

use std::fmt;

/// 한글 음절 시작 코드포인트 (가)
pub const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 마지막 코드포인트 (힣)
pub const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;

/// 초성 개수
pub const CHOSEONG_COUNT: u32 = 19;
/// 중성 개수
pub const JUNGSEONG_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
pub const JONGSEONG_COUNT: u32 = 28;

/// 완성형 한글 음절 하나와 그 인덱스
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Syllable {
    ch: char,
    choseong: u32,
    jungseong: u32,
    jongseong: u32,
}

impl Syllable {
    /// 인덱스로 음절 생성 (범위 밖이면 None)
    pub fn compose(choseong: u32, jungseong: u32, jongseong: u32) -> Option<Self> {
        let ch = compose_syllable(choseong, jungseong, jongseong)?;
        Some(Self {
            ch,
            choseong,
            jungseong,
            jongseong,
        })
    }

    /// 문자를 음절로 분해 (완성형 한글이 아니면 None)
    pub fn from_char(c: char) -> Option<Self> {
        let (choseong, jungseong, jongseong) = decompose_syllable(c)?;
        Some(Self {
            ch: c,
            choseong,
            jungseong,
            jongseong,
        })
    }

    pub fn as_char(&self) -> char {
        self.ch
    }

    /// (초성, 중성, 종성) 인덱스
    pub fn indices(&self) -> (u32, u32, u32) {
        (self.choseong, self.jungseong, self.jongseong)
    }

    pub fn choseong(&self) -> u32 {
        self.choseong
    }

    pub fn jungseong(&self) -> u32 {
        self.jungseong
    }

    pub fn jongseong(&self) -> u32 {
        self.jongseong
    }

    /// 종성 유무
    pub fn has_jongseong(&self) -> bool {
        self.jongseong > 0
    }

    /// 종성을 뗀 음절 (초성+중성)
    pub fn without_jongseong(&self) -> Self {
        // 유효한 음절에서 종성만 0으로 바꾸므로 항상 범위 안
        let code = self.ch as u32 - self.jongseong;
        Self {
            ch: char::from_u32(code).unwrap_or(self.ch),
            jongseong: 0,
            ..*self
        }
    }

    /// 초성 단독 자모 (호환용 자모)
    pub fn choseong_jamo(&self) -> Option<char> {
        choseong_to_jamo_char(self.choseong)
    }
}

impl fmt::Display for Syllable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ch)
    }
}

/// 초성/중성/종성 인덱스로 완성된 한글 유니코드 생성
/// - choseong: 초성 인덱스 (0~18)
/// - jungseong: 중성 인덱스 (0~20)
/// - jongseong: 종성 인덱스 (0~27, 0 = 종성 없음)
pub fn compose_syllable(choseong: u32, jungseong: u32, jongseong: u32) -> Option<char> {
    if choseong >= CHOSEONG_COUNT || jungseong >= JUNGSEONG_COUNT || jongseong >= JONGSEONG_COUNT {
        return None;
    }
    let code = HANGUL_SYLLABLE_BASE
        + (choseong * JUNGSEONG_COUNT + jungseong) * JONGSEONG_COUNT
        + jongseong;
    char::from_u32(code)
}

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 반환: (초성 인덱스, 중성 인덱스, 종성 인덱스)
/// U+AC00..=U+D7A3 밖의 문자(낱자모, 영문, 숫자 등)는 None
pub fn decompose_syllable(c: char) -> Option<(u32, u32, u32)> {
    let code = c as u32;
    if !(HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST).contains(&code) {
        return None;
    }
    let offset = code - HANGUL_SYLLABLE_BASE;
    let jongseong = offset % JONGSEONG_COUNT;
    let jungseong = (offset / JONGSEONG_COUNT) % JUNGSEONG_COUNT;
    let choseong = offset / (JUNGSEONG_COUNT * JONGSEONG_COUNT);
    Some((choseong, jungseong, jongseong))
}

/// 초성만 있을 때 해당 자모 문자 반환 (호환용 자모)
pub fn choseong_to_jamo_char(cho: u32) -> Option<char> {
    if cho < CHOSEONG_COUNT {
        // 호환용 자모: 초성 순서와 다르므로 직접 매핑
        #[rustfmt::skip]
        let jamo_codes: [u32; 19] = [
            0x3131, // ㄱ
            0x3132, // ㄲ
            0x3134, // ㄴ
            0x3137, // ㄷ
            0x3138, // ㄸ
            0x3139, // ㄹ
            0x3141, // ㅁ
            0x3142, // ㅂ
            0x3143, // ㅃ
            0x3145, // ㅅ
            0x3146, // ㅆ
            0x3147, // ㅇ
            0x3148, // ㅈ
            0x3149, // ㅉ
            0x314A, // ㅊ
            0x314B, // ㅋ
            0x314C, // ㅌ
            0x314D, // ㅍ
            0x314E, // ㅎ
        ];
        char::from_u32(jamo_codes[cho as usize])
    } else {
        None
    }
}
