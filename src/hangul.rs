//! Hangul syllable decomposition.
//!
//! Precomposed syllable blocks (U+AC00..=U+D7A3) encode a leading
//! consonant, a vowel, and an optional trailing consonant in a single
//! code point. Decomposition inverts that arithmetic and yields
//! compatibility jamo (U+3131..=U+3163), so the output is directly
//! comparable with the standalone jamo a learner produces mid-composition.
//!
//! Characters outside the supported alphabet pass through unchanged as
//! single opaque units; decomposition never fails.

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const COMPAT_JAMO_FIRST: u32 = 0x3131;
const COMPAT_JAMO_LAST: u32 = 0x3163;

const JUNGSEONG_COUNT: u32 = 21;
const JONGSEONG_COUNT: u32 = 28;

/// Leading consonants in syllable-index order.
const CHOSEONG: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ',
    'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Vowels in syllable-index order.
const JUNGSEONG: [char; 21] = [
    'ㅏ', 'ㅐ', 'ㅑ', 'ㅒ', 'ㅓ', 'ㅔ', 'ㅕ', 'ㅖ', 'ㅗ', 'ㅘ', 'ㅙ', 'ㅚ', 'ㅛ', 'ㅜ', 'ㅝ',
    'ㅞ', 'ㅟ', 'ㅠ', 'ㅡ', 'ㅢ', 'ㅣ',
];

/// Trailing consonants; index 0 is the empty coda. A compound coda such as
/// ㄳ or ㄺ is entered with one keyboard position per component but counts
/// as one positional unit here, matching how the syllable stores it.
const JONGSEONG: [Option<char>; 28] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

/// Whether `c` is a precomposed Hangul syllable block.
pub fn is_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

/// Whether `c` is a standalone compatibility jamo.
pub fn is_jamo(c: char) -> bool {
    (COMPAT_JAMO_FIRST..=COMPAT_JAMO_LAST).contains(&(c as u32))
}

fn push_jamo(c: char, out: &mut Vec<char>) {
    if !is_syllable(c) {
        out.push(c);
        return;
    }
    let idx = c as u32 - SYLLABLE_BASE;
    let cho = idx / (JUNGSEONG_COUNT * JONGSEONG_COUNT);
    let jung = idx % (JUNGSEONG_COUNT * JONGSEONG_COUNT) / JONGSEONG_COUNT;
    let jong = idx % JONGSEONG_COUNT;

    out.push(CHOSEONG[cho as usize]);
    out.push(JUNGSEONG[jung as usize]);
    if let Some(coda) = JONGSEONG[jong as usize] {
        out.push(coda);
    }
}

/// Expand `text` into its flat, ordered jamo sequence.
pub fn decompose(text: &str) -> Vec<char> {
    let mut jamo = Vec::with_capacity(text.len());
    for c in text.chars() {
        push_jamo(c, &mut jamo);
    }
    jamo
}

/// Number of jamo `text` decomposes to, without building the sequence.
pub fn jamo_count(text: &str) -> usize {
    text.chars()
        .map(|c| {
            if !is_syllable(c) {
                1
            } else if (c as u32 - SYLLABLE_BASE) % JONGSEONG_COUNT == 0 {
                2
            } else {
                3
            }
        })
        .sum()
}

/// The first target jamo the input has not matched yet, or `None` when the
/// input covers the whole target. Drives the virtual-keyboard highlight.
pub fn next_jamo(input: &str, target: &str) -> Option<char> {
    let typed = decompose(input);
    let wanted = decompose(target);

    for (i, &w) in wanted.iter().enumerate() {
        match typed.get(i) {
            Some(&t) if t == w => continue,
            _ => return Some(w),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_open_syllable() {
        assert_eq!(decompose("가"), vec!['ㄱ', 'ㅏ']);
        assert_eq!(decompose("나"), vec!['ㄴ', 'ㅏ']);
    }

    #[test]
    fn test_decompose_closed_syllable() {
        assert_eq!(decompose("안"), vec!['ㅇ', 'ㅏ', 'ㄴ']);
        assert_eq!(decompose("강"), vec!['ㄱ', 'ㅏ', 'ㅇ']);
    }

    #[test]
    fn test_decompose_compound_coda_stays_single() {
        assert_eq!(decompose("닭"), vec!['ㄷ', 'ㅏ', 'ㄺ']);
        assert_eq!(decompose("값"), vec!['ㄱ', 'ㅏ', 'ㅄ']);
    }

    #[test]
    fn test_decompose_multi_syllable() {
        assert_eq!(decompose("안녕"), vec!['ㅇ', 'ㅏ', 'ㄴ', 'ㄴ', 'ㅕ', 'ㅇ']);
        assert_eq!(decompose("가방"), vec!['ㄱ', 'ㅏ', 'ㅂ', 'ㅏ', 'ㅇ']);
    }

    #[test]
    fn test_decompose_empty() {
        assert_eq!(decompose(""), Vec::<char>::new());
    }

    #[test]
    fn test_standalone_jamo_passes_through() {
        assert_eq!(decompose("ㅏ"), vec!['ㅏ']);
        assert_eq!(decompose("ㄱㅏ"), vec!['ㄱ', 'ㅏ']);
    }

    #[test]
    fn test_unsupported_characters_pass_through() {
        assert_eq!(decompose("a1!"), vec!['a', '1', '!']);
        assert_eq!(decompose("가 나"), vec!['ㄱ', 'ㅏ', ' ', 'ㄴ', 'ㅏ']);
    }

    #[test]
    fn test_decompose_is_deterministic() {
        let text = "한글 타자 연습";
        assert_eq!(decompose(text), decompose(text));
    }

    #[test]
    fn test_every_syllable_expands_to_two_or_three() {
        for c in ['가', '힣', '뷁', '쏢', '논'] {
            let jamo = decompose(&c.to_string());
            assert!(jamo.len() == 2 || jamo.len() == 3, "{c} -> {jamo:?}");
        }
    }

    #[test]
    fn test_jamo_count_matches_decompose() {
        for text in ["", "가", "안녕하세요", "닭갈비 abc", "ㅏㅑㅓ"] {
            assert_eq!(jamo_count(text), decompose(text).len());
        }
    }

    #[test]
    fn test_is_syllable() {
        assert!(is_syllable('가'));
        assert!(is_syllable('힣'));
        assert!(!is_syllable('ㄱ'));
        assert!(!is_syllable('a'));
    }

    #[test]
    fn test_is_jamo() {
        assert!(is_jamo('ㄱ'));
        assert!(is_jamo('ㅣ'));
        assert!(!is_jamo('가'));
        assert!(!is_jamo('z'));
    }

    #[test]
    fn test_next_jamo_from_empty_input() {
        assert_eq!(next_jamo("", "가방"), Some('ㄱ'));
    }

    #[test]
    fn test_next_jamo_mid_syllable() {
        // After ㄱ the learner still owes the vowel of 가.
        assert_eq!(next_jamo("ㄱ", "가방"), Some('ㅏ'));
        assert_eq!(next_jamo("가", "가방"), Some('ㅂ'));
        assert_eq!(next_jamo("가바", "가방"), Some('ㅇ'));
    }

    #[test]
    fn test_next_jamo_on_mismatch_points_at_expected() {
        assert_eq!(next_jamo("나", "가방"), Some('ㄱ'));
    }

    #[test]
    fn test_next_jamo_exhausted() {
        assert_eq!(next_jamo("가방", "가방"), None);
    }
}
