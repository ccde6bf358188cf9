use super::{truncate_before_heading, Document, ParseOptions};
use crate::formats::atx::AtxLineFormat;

fn parse(source: &str) -> Document {
    Document::parse(source, &AtxLineFormat, &ParseOptions::default()).unwrap()
}

#[test]
fn test_tree_links_and_ranges() {
    let doc = parse("# A\na\n## B\nb\n### C\nc\n## D\nd\n# E\ne");

    let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C", "D", "E"]);

    assert_eq!(doc.sections[0].children_indices, vec![1, 3]);
    assert_eq!(doc.sections[1].children_indices, vec![2]);
    assert_eq!(doc.sections[2].parent_index, Some(1));
    assert_eq!(doc.sections[3].parent_index, Some(0));
    assert_eq!(doc.sections[4].parent_index, None);

    // A runs until E; B until D; C until D; D until E; E until the end.
    assert_eq!(doc.sections[0].body(), 1..8);
    assert_eq!(doc.sections[1].body(), 3..6);
    assert_eq!(doc.sections[2].body(), 5..6);
    assert_eq!(doc.sections[3].body(), 7..8);
    assert_eq!(doc.sections[4].body(), 9..10);
}

#[test]
fn test_children_contained_in_parent() {
    let doc = parse("# A\n## B\n#### C\n### D\nx\n## E\n");
    for section in &doc.sections {
        if let Some(parent) = section.parent_index {
            let outer = doc.sections[parent].body();
            assert!(outer.start <= section.heading_line);
            assert!(section.line_end <= outer.end);
        }
    }
    // Skipped levels still nest under the nearest shallower heading.
    assert_eq!(doc.sections[2].parent_index, Some(1));
    assert_eq!(doc.sections[3].parent_index, Some(1));
}

#[test]
fn test_empty_heading_has_empty_range() {
    let doc = parse("# A\n# B\ntext");
    assert_eq!(doc.sections[0].body(), 1..1);
    assert_eq!(doc.text(doc.sections[0].body()), "");
}

#[test]
fn test_no_headings_is_empty_forest() {
    let doc = parse("just prose\nmore prose");
    assert!(doc.sections.is_empty());
    assert_eq!(doc.lines.len(), 2);
    assert_eq!(doc.roots().count(), 0);
}

#[test]
fn test_outline_levels_clamp_to_three() {
    let doc = Document::parse(
        "# A\n## B\n##### Deep\n###### Deeper",
        &AtxLineFormat,
        &ParseOptions::outline(),
    )
    .unwrap();
    let levels: Vec<usize> = doc.sections.iter().map(|s| s.level).collect();
    assert_eq!(levels, vec![1, 2, 3, 3]);
    // Clamped siblings, not nested.
    assert_eq!(doc.sections[3].parent_index, Some(1));
}

#[test]
fn test_title_path_follows_parents() {
    let doc = parse("# A\n## B\n### C\n");
    assert_eq!(doc.title_path(2), vec!["A", "B", "C"]);
    assert_eq!(doc.title_path(0), vec!["A"]);
}

#[test]
fn test_manuscript_cut_at_reference() {
    let source = "# Intro\ntext\n## Reference\nkept\n# Reference\n## Cited\nignored";
    let doc = Document::parse(source, &AtxLineFormat, &ParseOptions::manuscript("Reference"))
        .unwrap();

    let titles: Vec<&str> = doc.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Intro", "Reference"]);
    assert_eq!(doc.lines.len(), 4);
}

#[test]
fn test_truncate_requires_exact_title() {
    let source = "# Intro\n# References\nstill here\n";
    assert_eq!(truncate_before_heading(source, "Reference"), source);
    assert_eq!(truncate_before_heading("a\n# Reference\nb", "Reference"), "a\n");
}
