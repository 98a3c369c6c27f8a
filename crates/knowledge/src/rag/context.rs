//! Rendering of search results into the generation context block.

use crate::types::SearchResult;

/// Header line that opens every context block.
pub const CONTEXT_HEADER: &str = "Information from web sources:\n\n";

/// Render results as numbered evidence blocks.
///
/// The output is the header followed, per result in order, by
/// `[Source i] title:\nsnippet\n\n` with `i` starting at 1.
pub fn build_context(results: &[SearchResult]) -> String {
    let mut context = String::from(CONTEXT_HEADER);
    for (i, result) in results.iter().enumerate() {
        context.push_str(&format!(
            "[Source {}] {}:\n{}\n\n",
            i + 1,
            result.title,
            result.snippet
        ));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_numbering() {
        let results = vec![
            SearchResult::new("Telephone", "A device for talking at a distance.", "", "wikipedia"),
            SearchResult::new("Alexander Graham Bell", "Credited with the telephone patent.", "", "wikipedia"),
        ];

        let context = build_context(&results);
        assert_eq!(
            context,
            "Information from web sources:\n\n\
             [Source 1] Telephone:\nA device for talking at a distance.\n\n\
             [Source 2] Alexander Graham Bell:\nCredited with the telephone patent.\n\n"
        );
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[]), CONTEXT_HEADER);
    }
}
