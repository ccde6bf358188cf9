use super::{parse_segment_reply, RetryingSegmenter, SegmentError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const BLOCK: &str = "First sentence. Second sentence. Third sentence. Fourth sentence.";

#[test]
fn test_exact_split_is_accepted() {
    let segmenter = RetryingSegmenter::new(
        |content: &str| -> Result<Vec<String>, SegmentError> {
            let (a, b) = content.split_at(32);
            Ok(vec![a.to_string(), b.to_string()])
        },
        3,
        Duration::ZERO,
    );
    let pieces = segmenter.split(BLOCK);
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces.concat(), BLOCK);
}

#[test]
fn test_rewritten_output_falls_back_to_whole_block() {
    let calls = AtomicUsize::new(0);
    let segmenter = RetryingSegmenter::new(
        |_: &str| -> Result<Vec<String>, SegmentError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["First sentence.".to_string(), "Second sentence.".to_string()])
        },
        3,
        Duration::ZERO,
    );
    assert_eq!(segmenter.split(BLOCK), vec![BLOCK.to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_retry_after_failure() {
    let calls = AtomicUsize::new(0);
    let segmenter = RetryingSegmenter::new(
        |content: &str| -> Result<Vec<String>, SegmentError> {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(SegmentError::Malformed("not json".to_string()));
            }
            Ok(vec![content.to_string()])
        },
        3,
        Duration::ZERO,
    );
    assert_eq!(segmenter.split(BLOCK), vec![BLOCK.to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_empty_pieces_dropped_and_empty_reply_rejected() {
    let segmenter = RetryingSegmenter::new(
        |_: &str| -> Result<Vec<String>, SegmentError> {
            Ok(vec!["ab".to_string(), String::new(), "cd".to_string()])
        },
        1,
        Duration::ZERO,
    );
    assert_eq!(segmenter.split("abcd"), vec!["ab", "cd"]);

    let empty = RetryingSegmenter::new(
        |_: &str| -> Result<Vec<String>, SegmentError> { Ok(Vec::new()) },
        2,
        Duration::ZERO,
    );
    assert_eq!(empty.split("abcd"), vec!["abcd"]);
}

#[test]
fn test_parse_fenced_reply() {
    let reply = "```json\n[\"a \", \"b\"]\n```";
    assert_eq!(parse_segment_reply(reply).unwrap(), vec!["a ", "b"]);
}

#[test]
fn test_parse_reply_with_surrounding_prose() {
    let reply = "Here you go: [\"x\", 1, \"y\"] hope that helps";
    assert_eq!(parse_segment_reply(reply).unwrap(), vec!["x", "y"]);
}

#[test]
fn test_parse_reply_without_array() {
    assert!(matches!(
        parse_segment_reply("sorry, I cannot do that"),
        Err(SegmentError::Malformed(_))
    ));
}
