use super::{normalize, normalize_path};
use rstest::rstest;

#[rstest]
#[case("1. Methods")]
#[case("一、Methods")]
#[case("**Methods**")]
#[case("Methods")]
#[case("  - Methods  ")]
#[case("3) `Methods`")]
#[case("【Methods】")]
#[case("METHODS")]
fn test_cosmetic_variants_collapse(#[case] title: &str) {
    assert_eq!(normalize(title), "methods");
}

#[rstest]
#[case("12. Related Work", "relatedwork")]
#[case("4、研究方法", "研究方法")]
#[case("二：实验设计", "实验设计")]
#[case("５：Ｆｕｌｌｗｉｄｔｈ", "fullwidth")]
#[case("snake_case title", "snakecasetitle")]
#[case("Results (2024)", "results2024")]
#[case("", "")]
fn test_expected_keys(#[case] title: &str, #[case] key: &str) {
    assert_eq!(normalize(title), key);
}

#[rstest]
#[case("1. Methods")]
#[case("一、一、重复")]
#[case("1.2 Sub-section")]
#[case("*** ---")]
#[case("Ünïcödé Straße")]
#[case("第3章 总结")]
#[case("e\u{1fbc}\u{301}")]
#[case("हिन्दी")]
fn test_idempotent(#[case] title: &str) {
    let once = normalize(title);
    assert_eq!(normalize(&once), once);
}

#[test]
fn test_combining_marks_are_dropped() {
    // Vowel signs and the virama are marks, not letters.
    assert_eq!(normalize("हिन्दी"), "हनद");
    assert_eq!(normalize("e\u{1fbc}\u{301}"), "e\u{3ac}");
}

#[test]
fn test_only_leading_number_is_stripped() {
    // The second number is part of the title.
    assert_eq!(normalize("1.2 Setup"), "2setup");
    assert_eq!(normalize("Phase 2"), "phase2");
}

#[test]
fn test_normalize_path() {
    assert_eq!(
        normalize_path(&["1. Intro", "**Background**"]),
        vec!["intro".to_string(), "background".to_string()]
    );
}
