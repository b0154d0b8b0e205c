//! Text Chunker: splits long resume text on paragraph boundaries.
//!
//! Chunks are borrowed, contiguous, non-overlapping slices of the input.
//! Joining them with `PARAGRAPH_SEPARATOR` reproduces the input exactly.
//! Sizes are measured in characters, not bytes.

/// Blank line between paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits `text` into chunks of at most `max_chars` characters where the
/// paragraph structure allows it.
///
/// - A paragraph longer than `max_chars` becomes its own oversized chunk;
///   text is never truncated.
/// - A whitespace-only paragraph that would overflow the current chunk opens
///   the next one instead. Trailing whitespace at the end of the text joins
///   the last chunk, so no chunk is blank.
/// - Empty or whitespace-only input yields no chunks.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let sep_chars = PARAGRAPH_SEPARATOR.chars().count();
    // Byte ranges of finished chunks.
    let mut ranges: Vec<(usize, usize)> = Vec::new();

    // Byte range and character count of the chunk being built.
    let mut chunk_start = 0;
    let mut chunk_end = 0;
    let mut chunk_chars = 0;
    let mut chunk_has_content = false;
    let mut first_paragraph = true;

    let mut offset = 0;
    for paragraph in text.split(PARAGRAPH_SEPARATOR) {
        let para_start = offset;
        let para_end = para_start + paragraph.len();
        offset = para_end + PARAGRAPH_SEPARATOR.len();

        let para_chars = paragraph.chars().count();
        let would_be = if first_paragraph {
            para_chars
        } else {
            chunk_chars + sep_chars + para_chars
        };

        if chunk_has_content && would_be > max_chars {
            ranges.push((chunk_start, chunk_end));
            chunk_start = para_start;
            chunk_chars = para_chars;
            chunk_has_content = false;
        } else {
            chunk_chars = would_be;
        }

        chunk_end = para_end;
        chunk_has_content |= !paragraph.trim().is_empty();
        first_paragraph = false;
    }

    match ranges.last_mut() {
        Some((_, last_end)) if !chunk_has_content => *last_end = chunk_end,
        _ => ranges.push((chunk_start, chunk_end)),
    }

    ranges.into_iter().map(|(start, end)| &text[start..end]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(ch: char, len: usize) -> String {
        std::iter::repeat(ch).take(len).collect()
    }

    fn assert_lossless(text: &str, chunks: &[&str]) {
        assert_eq!(chunks.join(PARAGRAPH_SEPARATOR), text);
    }

    #[test]
    fn test_empty_and_whitespace_input_yield_nothing() {
        assert!(split_into_chunks("", 100).is_empty());
        assert!(split_into_chunks("  \n\n \t\n\n", 100).is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = "Experience\n\nBuilt things in Rust";
        assert_eq!(split_into_chunks(text, 4000), vec![text]);
    }

    #[test]
    fn test_ten_thousand_chars_yield_three_chunks() {
        let paragraphs: Vec<String> = (0..10)
            .map(|i| paragraph(char::from(b'a' + i as u8), 998))
            .collect();
        let text = paragraphs.join(PARAGRAPH_SEPARATOR);
        assert_eq!(text.chars().count(), 9998);

        let chunks = split_into_chunks(&text, 4000);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4000));
        assert_lossless(&text, &chunks);
    }

    #[test]
    fn test_oversized_paragraph_is_emitted_unsplit() {
        let big = paragraph('x', 5000);
        let text = format!("intro\n\n{big}\n\noutro");
        let chunks = split_into_chunks(&text, 4000);
        assert_eq!(chunks, vec!["intro", big.as_str(), "outro"]);
        assert_lossless(&text, &chunks);
    }

    #[test]
    fn test_oversized_first_paragraph_does_not_emit_empty_chunk() {
        let big = paragraph('y', 50);
        let text = format!("{big}\n\nnext");
        let chunks = split_into_chunks(&text, 10);
        assert_eq!(chunks, vec![big.as_str(), "next"]);
    }

    #[test]
    fn test_trailing_blank_paragraphs_stay_attached() {
        let text = format!("{}\n\n\n\n", paragraph('z', 10));
        let chunks = split_into_chunks(&text, 10);
        assert_eq!(chunks.len(), 1);
        assert_lossless(&text, &chunks);
    }

    #[test]
    fn test_no_chunk_is_blank() {
        let text = "\n\nalpha\n\n\n\nbeta\n\n   \n\ngamma";
        let chunks = split_into_chunks(text, 5);
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
        assert_lossless(text, &chunks);
    }

    #[test]
    fn test_blank_paragraph_opens_next_chunk_instead_of_overflowing() {
        let text = "aaaa\n\n  \n\nbb";
        let chunks = split_into_chunks(text, 4);
        assert_eq!(chunks, vec!["aaaa", "  \n\nbb"]);
        assert_lossless(text, &chunks);
    }

    #[test]
    fn test_blank_paragraph_that_fits_stays_in_chunk() {
        let text = "aa\n\n \n\nbbbbbbbb";
        let chunks = split_into_chunks(text, 6);
        assert_eq!(chunks, vec!["aa\n\n ", "bbbbbbbb"]);
    }

    #[test]
    fn test_character_count_preserved() {
        let text = "Projekte: Größenordnung\n\nÜberblick über Tokio\n\nRust ✓";
        let chunks = split_into_chunks(text, 20);
        let separators = (chunks.len() - 1) * PARAGRAPH_SEPARATOR.chars().count();
        let total: usize = chunks.iter().map(|c| c.chars().count()).sum();
        assert_eq!(total + separators, text.chars().count());
        assert_lossless(text, &chunks);
    }

    #[test]
    fn test_separator_counts_towards_limit() {
        // "aaaa" + "\n\n" + "bbbb" = 10 chars
        assert_eq!(split_into_chunks("aaaa\n\nbbbb", 10).len(), 1);
        assert_eq!(split_into_chunks("aaaa\n\nbbbb", 9).len(), 2);
    }
}
