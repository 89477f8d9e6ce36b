//! Line preprocessing: the shared substrate every extractor consumes.

/// Split raw OCR text into trimmed, non-empty lines, preserving order.
///
/// No error path: empty input yields an empty sequence and every extractor
/// tolerates that by reporting "not found".
pub fn preprocess_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
