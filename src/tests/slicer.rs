use super::{own_content, own_ranges, ContentIndex};
use crate::formats::atx::AtxLineFormat;
use crate::input::{Document, ParseOptions};

fn parse(source: &str) -> Document {
    Document::parse(source, &AtxLineFormat, &ParseOptions::default()).unwrap()
}

const PAPER: &str = "\
preamble without heading
# Title
Abstract line.

## 1. Intro
Intro text.

### Motivation
Why we care.

Back in intro after the subsection? No, still motivation.
## 2. Methods

Method text.
#### Deep detail
detail
## 3. Results
Results text.
";

#[test]
fn test_ranges_partition_every_section() {
    let doc = parse(PAPER);
    for (i, section) in doc.sections.iter().enumerate() {
        let mut covered = vec![0usize; doc.lines.len()];
        for range in own_ranges(&doc, i) {
            for line in range {
                covered[line] += 1;
            }
        }
        for &child in &section.children_indices {
            for line in doc.sections[child].span() {
                covered[line] += 1;
            }
        }
        for line in section.body() {
            assert_eq!(covered[line], 1, "line {line} of {:?}", section.title);
        }
        let outside: usize = covered
            .iter()
            .enumerate()
            .filter(|(line, _)| !section.body().contains(line))
            .map(|(_, count)| count)
            .sum();
        assert_eq!(outside, 0);
    }
}

#[test]
fn test_reconstruct_document_from_forest() {
    // Rebuild the text after the first heading from headings and own ranges alone.
    let doc = parse(PAPER);

    fn emit(doc: &Document, index: usize, out: &mut Vec<usize>) {
        let section = &doc.sections[index];
        out.push(section.heading_line);
        let mut pieces: Vec<(usize, Option<usize>)> = own_ranges(doc, index)
            .into_iter()
            .map(|r| (r.start, None))
            .chain(
                section
                    .children_indices
                    .iter()
                    .map(|&c| (doc.sections[c].heading_line, Some(c))),
            )
            .collect();
        pieces.sort_by_key(|(start, _)| *start);
        for (start, child) in pieces {
            match child {
                Some(c) => emit(doc, c, out),
                None => {
                    let range = own_ranges(doc, index)
                        .into_iter()
                        .find(|r| r.start == start)
                        .unwrap();
                    out.extend(range);
                }
            }
        }
    }

    let mut lines = Vec::new();
    for root in doc.roots().collect::<Vec<_>>() {
        emit(&doc, root, &mut lines);
    }
    let first = doc.sections[0].heading_line;
    assert_eq!(lines, (first..doc.lines.len()).collect::<Vec<_>>());
}

#[test]
fn test_own_content_excludes_children() {
    let doc = parse(PAPER);
    assert_eq!(own_content(&doc, 0), "Abstract line.");
    assert_eq!(own_content(&doc, 1), "Intro text.");
    assert_eq!(
        own_content(&doc, 2),
        "Why we care.\n\nBack in intro after the subsection? No, still motivation."
    );
    assert_eq!(own_content(&doc, 3), "Method text.");
    assert_eq!(own_content(&doc, 4), "detail");
    assert_eq!(own_content(&doc, 5), "Results text.");
}

#[test]
fn test_text_after_child_belongs_to_next_sibling() {
    let doc = parse("# A\nbefore\n\n## B\ninside\n# C\n");
    assert_eq!(own_content(&doc, 0), "before");

    let doc = parse("## A\nbefore\n### B\ninside\n## C\n# D\n");
    assert_eq!(own_content(&doc, 0), "before");

    let doc = parse("# A\nbefore\n### B\ninside\n## C\nafter\n");
    assert_eq!(own_content(&doc, 0), "before");
    assert_eq!(own_content(&doc, 2), "after");
}

#[test]
fn test_empty_and_blank_sections_are_empty_strings() {
    let doc = parse("# A\n\n\n# B\n# C\n   \n");
    assert_eq!(own_content(&doc, 0), "");
    assert_eq!(own_content(&doc, 1), "");
    assert_eq!(own_content(&doc, 2), "");
}

#[test]
fn test_internal_blank_lines_and_indentation_kept() {
    let doc = parse("# A\n\n  indented\n\nsecond para\n\n");
    assert_eq!(own_content(&doc, 0), "  indented\n\nsecond para");
}

#[test]
fn test_index_has_entry_per_section_in_order() {
    let doc = parse(PAPER);
    let index = ContentIndex::build(&doc);
    assert_eq!(index.len(), 6);
    let paths: Vec<Vec<String>> = index.iter().map(|e| e.path.clone()).collect();
    assert_eq!(paths[0], vec!["title"]);
    assert_eq!(paths[2], vec!["title", "intro", "motivation"]);
    assert_eq!(paths[4], vec!["title", "methods", "deepdetail"]);
    assert_eq!(
        index.get(&["title".to_string(), "results".to_string()]),
        Some("Results text.")
    );
}

#[test]
fn test_duplicate_path_keeps_first_slot_last_content() {
    let doc = parse("# A\nfirst\n# B\nb\n# A\nsecond\n");
    let index = ContentIndex::build(&doc);
    assert_eq!(index.len(), 2);
    let first = index.iter().next().unwrap();
    assert_eq!(first.path, vec!["a"]);
    assert_eq!(first.content, "second");
}

#[test]
fn test_no_headings_gives_empty_index() {
    let index = ContentIndex::build(&parse("prose only"));
    assert!(index.is_empty());
}
