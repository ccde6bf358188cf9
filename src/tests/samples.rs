use super::{build_samples, hint_prefix, locate_history, CaseContext, HistoryMode, SampleSettings};

fn case<'a>(manuscript: &'a str) -> CaseContext<'a> {
    CaseContext {
        label: "case0",
        user_intent: "write a survey",
        outline: "# 标题",
        manuscript,
    }
}

fn settings(ratios: &[f64]) -> SampleSettings {
    SampleSettings {
        ratios: ratios.to_vec(),
        min_chars: 8,
    }
}

#[test]
fn test_hint_prefix_counts_chars() {
    assert_eq!(hint_prefix("你好世界", 0.5), "你好");
    assert_eq!(hint_prefix("abcdefgh", 0.25), "ab");
    assert_eq!(hint_prefix("abcdefgh", 0.0), "");
    assert_eq!(hint_prefix("abcdefgh", 0.3), "abc");
    assert_eq!(hint_prefix("abc", 1.0), "abc");
}

#[test]
fn test_cumulative_history() {
    let fragments: Vec<String> = [
        "\n# 标题\n",
        "短句。",
        "这是一个足够长的句子。",
        "第二个足够长的句子在这里。",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect();
    let samples = build_samples(
        &fragments,
        HistoryMode::Cumulative,
        &case(""),
        &settings(&[0.0, 0.5]),
    );

    assert_eq!(samples.len(), 4);
    assert_eq!(samples[0].context, "\n# 标题\n短句。");
    assert_eq!(samples[0].hint, "");
    assert_eq!(samples[1].hint, "这是一个足够");
    assert_eq!(samples[1].ratio, 0.5);
    assert_eq!(samples[2].context, "\n# 标题\n短句。这是一个足够长的句子。");
    assert_eq!(samples[3].output, "第二个足够长的句子在这里。");
    assert!(samples.iter().all(|s| s.file == "case0" && s.user_intent == "write a survey"));
}

#[test]
fn test_located_history() {
    let manuscript = "# 标题\n这是一个足够长的句子。\n第二个  足够长的\n句子在这里。";
    let fragments = vec![
        "这是一个足够长的句子。".to_string(),
        "第二个 足够长的 句子在这里。".to_string(),
        "不存在的一段很长的文字。".to_string(),
    ];
    let samples = build_samples(
        &fragments,
        HistoryMode::Located,
        &case(manuscript),
        &settings(&[0.0]),
    );

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].context, "# 标题\n");
    assert_eq!(samples[1].context, "# 标题\n这是一个足够长的句子。\n");
}

#[test]
fn test_located_without_manuscript_yields_nothing() {
    let fragments = vec!["这是一个足够长的句子。".to_string()];
    let samples = build_samples(&fragments, HistoryMode::Located, &case(""), &settings(&[0.0]));
    assert!(samples.is_empty());
}

#[test]
fn test_locate_history_escapes_regex_characters() {
    let manuscript = "intro (a+b)*  c? done";
    assert_eq!(locate_history(manuscript, "(a+b)* c?"), Some("intro "));
    assert_eq!(locate_history(manuscript, ""), None);
    assert_eq!(locate_history(manuscript, "missing"), None);
}
