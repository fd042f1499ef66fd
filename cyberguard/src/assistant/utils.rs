/// Replace Unicode hyphen variants (U+2010, U+2011) with an ASCII `-`.
///
/// Model output and pasted labels often carry non-breaking hyphens, which
/// would otherwise defeat exact label matching and keyword search.
pub fn fold_hyphens(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2010}' | '\u{2011}' => '-',
            other => other,
        })
        .collect()
}
