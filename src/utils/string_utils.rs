//! # 문자열 유틸리티
//!
//! 사용자명 파생, 무작위 접미사/비밀번호 생성 등
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// 소셜 가입 시 생성되는 무작위 비밀번호 길이
///
/// 이 비밀번호는 사용자에게 절대 전달되지 않습니다. 소셜 계정은
/// 외부 아이덴티티 제공자를 통해서만 인증합니다.
pub const OPAQUE_PASSWORD_LEN: usize = 32;

/// 유니크 사용자명 생성 최종 폴백 접미사 길이 (자릿수)
pub const FALLBACK_SUFFIX_DIGITS: u32 = 12;

/// 첫 글자를 대문자로 변환
///
/// 중복 필드 에러 메시지("Username already exists.")에 사용됩니다.
pub fn capitalize_first_letter(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// 표시 이름에서 사용자명 파생 (공백을 `_`로 치환)
pub fn derive_username(display_name: &str) -> String {
    display_name.split(' ').collect::<Vec<_>>().join("_")
}

/// `digits`자리의 무작위 숫자 접미사 생성
///
/// 자릿수는 오버플로 없이 표현 가능한 범위로 제한합니다.
pub fn random_numeric_suffix(digits: u32) -> u64 {
    let digits = digits.clamp(1, 18);
    let min = 10u64.pow(digits - 1);
    let max = 10u64.pow(digits);
    rand::thread_rng().gen_range(min..max)
}

/// 소셜 가입용 불투명 무작위 비밀번호 생성
pub fn random_opaque_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(OPAQUE_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first_letter() {
        assert_eq!(capitalize_first_letter("username"), "Username");
        assert_eq!(capitalize_first_letter("email"), "Email");
        assert_eq!(capitalize_first_letter(""), "");
    }

    #[test]
    fn test_derive_username_replaces_spaces() {
        assert_eq!(derive_username("John Doe"), "John_Doe");
        assert_eq!(derive_username("Alice"), "Alice");
        assert_eq!(derive_username("A B C"), "A_B_C");
    }

    #[test]
    fn test_random_numeric_suffix_digit_count() {
        for digits in 1..=18u32 {
            let suffix = random_numeric_suffix(digits);
            assert_eq!(suffix.to_string().len() as u32, digits);
        }
        // 범위를 벗어나는 요청은 안전하게 잘린다
        assert_eq!(random_numeric_suffix(30).to_string().len(), 18);
    }

    #[test]
    fn test_random_opaque_password_len() {
        let pw = random_opaque_password();
        assert_eq!(pw.len(), OPAQUE_PASSWORD_LEN);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
