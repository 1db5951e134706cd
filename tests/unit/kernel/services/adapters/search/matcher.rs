use super::*;

fn literal(query: &str) -> Matcher {
    Matcher::compile(query, PatternMode::Literal, 1 << 20).unwrap()
}

#[test]
fn test_literal_search() {
    let matches = literal("cat").find_all("the cat sat on the cat mat");

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].offset, 4);
    assert_eq!(matches[1].offset, 19);
}

#[test]
fn test_case_insensitive() {
    let matches = literal("hello").find_all("Hello HELLO hello");
    assert_eq!(matches.len(), 3);
}

#[test]
fn test_literal_escapes_metacharacters() {
    let matcher = literal("a.c");
    assert!(matcher.find_all("abc").is_empty());
    assert_eq!(matcher.find_all("xa.c").len(), 1);
}

#[test]
fn test_regex_search() {
    let matcher = Matcher::compile(r"\w+\d+", PatternMode::Regex, 1 << 20).unwrap();
    assert_eq!(matcher.find_all("hello123 world456").len(), 2);
}

#[test]
fn test_invalid_regex() {
    let result = Matcher::compile("[invalid", PatternMode::Regex, 1 << 20);
    assert!(matches!(
        result,
        Err(crate::kernel::services::ports::SearchError::InvalidPattern(_))
    ));
}

#[test]
fn test_offsets_count_characters() {
    // "é" is two bytes; the offset stays in characters
    let matches = literal("cat").find_all("éé cat");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].offset, 3);
    assert_eq!(matches[0].start, 5);
    assert_eq!(matches[0].end, 8);
}

#[test]
fn test_non_ascii_query() {
    let matches = literal("ÉTÉ").find_all("un été, deux étés");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].offset, 3);
    assert_eq!(matches[1].offset, 13);
}

#[test]
fn test_for_each_match_stops_on_break() {
    let matcher = literal("a");
    let mut seen = 0;
    matcher.for_each_match("aaaa", |_| {
        seen += 1;
        if seen == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(seen, 2);
}

#[test]
fn test_highlight_all_occurrences() {
    let matcher = literal("cat");
    let out = matcher.highlight("Cat and cat", "[", "]");
    assert_eq!(out, "[Cat] and [cat]");
}

#[test]
fn test_query_len_in_chars() {
    assert_eq!(literal("été").query_len(), 3);
}
