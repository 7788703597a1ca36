//! 점진적 타이핑 시퀀스 생성
//!
//! 사용자가 두벌식 자판으로 단어를 입력할 때 자동완성 서버가 보게 되는
//! 중간 상태를 순서대로 만든다.
//!
//! ```
//! use kwexpand::typing_sequence;
//! assert_eq!(typing_sequence("추천"), vec!["ㅊ", "추", "추ㅊ", "추처", "추천"]);
//! ```

use crate::core::unicode::Syllable;

/// 입력 문자열의 타이핑 중간 상태 목록
///
/// 음절마다 초성만 → 초성+중성 → (종성이 있으면) 초성+중성+종성 순으로 추가하고,
/// 한글 음절이 아닌 문자는 한 글자씩 붙여 한 상태로 추가한다.
pub fn typing_sequence(text: &str) -> Vec<String> {
    let mut sequence = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        let Some(syllable) = Syllable::from_char(c) else {
            // 영문, 숫자, 공백, 낱자모는 그대로
            current.push(c);
            sequence.push(current.clone());
            continue;
        };

        // 1. 초성만
        if let Some(jamo) = syllable.choseong_jamo() {
            sequence.push(format!("{current}{jamo}"));
        }

        // 2. 초성 + 중성
        sequence.push(format!("{current}{}", syllable.without_jongseong()));

        // 3. 종성까지
        if syllable.has_jongseong() {
            sequence.push(format!("{current}{syllable}"));
        }

        current.push(c);
    }

    sequence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::unicode::compose_syllable;

    #[test]
    fn test_single_open_syllable() {
        assert_eq!(typing_sequence("가"), vec!["ㄱ", "가"]);
    }

    #[test]
    fn test_syllable_with_jongseong() {
        // 춫 = ㅊ + ㅜ + ㅊ(종성 23)
        let chut = compose_syllable(14, 13, 23).unwrap();
        let seq = typing_sequence(&chut.to_string());
        assert_eq!(seq, vec!["ㅊ".to_string(), "추".to_string(), chut.to_string()]);
    }

    #[test]
    fn test_two_syllables() {
        assert_eq!(
            typing_sequence("추천"),
            vec!["ㅊ", "추", "추ㅊ", "추처", "추천"]
        );
        assert_eq!(
            typing_sequence("한글"),
            vec!["ㅎ", "하", "한", "한ㄱ", "한그", "한글"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(typing_sequence("").is_empty());
    }

    #[test]
    fn test_non_hangul_one_step_per_char() {
        assert_eq!(typing_sequence("ab"), vec!["a", "ab"]);
        assert_eq!(typing_sequence("x"), vec!["x"]);
    }

    #[test]
    fn test_mixed_script() {
        // 공백과 영문은 글자마다 한 단계
        assert_eq!(
            typing_sequence("a 가"),
            vec!["a", "a ", "a ㄱ", "a 가"]
        );
        assert_eq!(typing_sequence("가1"), vec!["ㄱ", "가", "가1"]);
    }

    #[test]
    fn test_standalone_jamo_passthrough() {
        assert_eq!(typing_sequence("ㄱㄴ"), vec!["ㄱ", "ㄱㄴ"]);
    }

    #[test]
    fn test_last_state_is_original_word() {
        for word in ["노트북", "추천", "맛집 추천", "iphone 15"] {
            let seq = typing_sequence(word);
            assert_eq!(seq.last().map(String::as_str), Some(word));
            let n = word.chars().count();
            assert!(seq.len() >= n && seq.len() <= n * 3);
        }
    }

    #[test]
    fn test_restartable() {
        assert_eq!(typing_sequence("노트북"), typing_sequence("노트북"));
    }
}
