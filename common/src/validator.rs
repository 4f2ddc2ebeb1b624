//! タグ値の検証
//!
//! AIの生の値を清掃し、属性の語彙に対して完全一致→部分一致の順で照合する。

/// 語彙に一致しなかった値のマーカー
pub const UNRECOGNIZED: &str = "unrecognized";

/// 値から取り除く不可視文字（ゼロ幅スペース、BOM）
const INVISIBLE_CHARS: &[char] = &['\u{200B}', '\u{FEFF}'];

/// 値を清掃する
///
/// 前後の空白を除去したうえで、内部の半角スペースと不可視文字をすべて削除する。
pub fn clean_value(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != ' ' && !INVISIBLE_CHARS.contains(c))
        .collect()
}

/// 清掃済みの値を語彙と照合する
///
/// 照合順序:
/// 1. 完全一致（語彙の定義順で最初のもの）
/// 2. 部分一致（入力が語彙に含まれる、または語彙が入力に含まれる）
///
/// # Returns
/// * `Some(&str)` - 一致した語彙
/// * `None` - 一致なし
pub fn match_vocabulary<'a, S: AsRef<str>>(allowed: &'a [S], cleaned: &str) -> Option<&'a str> {
    if let Some(exact) = allowed.iter().find(|v| v.as_ref() == cleaned) {
        return Some(exact.as_ref());
    }

    allowed
        .iter()
        .map(|v| v.as_ref())
        .find(|v| v.contains(cleaned) || cleaned.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLEEVE: &[&str] = &["长袖", "短袖", "无袖", "七分袖", "五分袖"];

    #[test]
    fn test_clean_value_strips_spaces_and_invisible() {
        assert_eq!(clean_value("  红 色 "), "红色");
        assert_eq!(clean_value("\u{FEFF}红\u{200B}色"), "红色");
        assert_eq!(clean_value("\t红色\n"), "红色");
    }

    #[test]
    fn test_clean_value_keeps_full_width_space_inside() {
        // 全角スペースは前後のみ除去（trimの対象）で、内部は残る
        assert_eq!(clean_value("红\u{3000}色"), "红\u{3000}色");
    }

    #[test]
    fn test_exact_match_wins_over_contains() {
        let allowed = ["长款", "中长款"];
        assert_eq!(match_vocabulary(&allowed, "中长款"), Some("中长款"));
    }

    #[test]
    fn test_fuzzy_input_inside_allowed() {
        assert_eq!(match_vocabulary(SLEEVE, "七分"), Some("七分袖"));
    }

    #[test]
    fn test_fuzzy_allowed_inside_input() {
        assert_eq!(match_vocabulary(SLEEVE, "修身短袖款"), Some("短袖"));
    }

    #[test]
    fn test_fuzzy_follows_definition_order() {
        // "袖" は全ての語彙に含まれるため先頭が選ばれる
        assert_eq!(match_vocabulary(SLEEVE, "袖"), Some("长袖"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(match_vocabulary(SLEEVE, "荷叶边"), None);
    }

    #[test]
    fn test_case_sensitive() {
        let allowed = ["V领"];
        assert_eq!(match_vocabulary(&allowed, "v领"), None);
    }
}
