//! Terminal rendering of answers and sources.
//!
//! Everything here writes to a caller-supplied writer so commands print to
//! stdout while tests capture into a buffer.

use serde::Serialize;
use std::io::{self, Write};
use webask_core::AppResult;
use webask_knowledge::{AnswerResult, SearchResult};

const RULE_WIDTH: usize = 80;

fn rule(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "{}", title)?;
    rule(out)
}

/// Echo the question being answered.
pub fn write_question(out: &mut impl Write, question: &str) -> io::Result<()> {
    heading(out, &format!("QUESTION: {}", question))
}

/// Print the answer followed by its sources.
pub fn write_answer(out: &mut impl Write, result: &AnswerResult) -> io::Result<()> {
    heading(out, "ANSWER:")?;
    writeln!(out, "{}", result.answer.trim_end())?;

    if !result.sources.is_empty() {
        write_sources(out, &result.sources)?;
    }

    writeln!(out)?;
    rule(out)
}

/// Print a numbered source list with links where known.
pub fn write_sources(out: &mut impl Write, sources: &[SearchResult]) -> io::Result<()> {
    heading(out, &format!("SOURCES ({} found):", sources.len()))?;
    for (i, source) in sources.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, source.title)?;
        if !source.link.is_empty() {
            writeln!(out, "   {}", source.link)?;
        }
    }
    Ok(())
}

/// Print retrieved results with their snippets.
pub fn write_results(out: &mut impl Write, results: &[SearchResult]) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No results found.");
    }

    heading(out, &format!("RESULTS ({} found):", results.len()))?;
    for (i, result) in results.iter().enumerate() {
        writeln!(out, "\n{}. {} [{}]", i + 1, result.title, result.source)?;
        if !result.link.is_empty() {
            writeln!(out, "   {}", result.link)?;
        }
        writeln!(out, "   {}", result.snippet)?;
    }
    writeln!(out)?;
    rule(out)
}

/// Print any serializable value as pretty JSON.
pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(result: &AnswerResult) -> String {
        let mut buf = Vec::new();
        write_answer(&mut buf, result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn answer_with_sources() {
        let result = AnswerResult::new(
            "Alexander Graham Bell is credited with inventing the telephone.\n",
            vec![
                SearchResult::new(
                    "Telephone",
                    "snippet",
                    "https://en.wikipedia.org/wiki/Telephone",
                    "wikipedia",
                ),
                SearchResult::new("Main Answer", "snippet", "", "duckduckgo"),
            ],
        );

        let text = render(&result);
        assert!(text.contains("ANSWER:\n"));
        assert!(text.contains("inventing the telephone.\n"));
        assert!(text.contains("SOURCES (2 found):"));
        assert!(text.contains("\n1. Telephone\n   https://en.wikipedia.org/wiki/Telephone\n"));
        // Empty links are omitted
        assert!(text.contains("\n2. Main Answer\n\n"));
    }

    #[test]
    fn question_echo() {
        let mut buf = Vec::new();
        write_question(&mut buf, "What is photosynthesis?").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\nQUESTION: What is photosynthesis?\n"));
    }

    #[test]
    fn answer_without_sources_has_no_source_section() {
        let text = render(&AnswerResult::empty_question());
        assert!(text.contains("Please ask a question!"));
        assert!(!text.contains("SOURCES"));
    }

    #[test]
    fn results_include_snippets() {
        let results = vec![SearchResult::new(
            "Photosynthesis",
            "Plants turn light into chemical energy.",
            "https://en.wikipedia.org/wiki/Photosynthesis",
            "wikipedia",
        )];
        let mut buf = Vec::new();
        write_results(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("RESULTS (1 found):"));
        assert!(text.contains("1. Photosynthesis [wikipedia]"));
        assert!(text.contains("   Plants turn light into chemical energy."));

        let mut buf = Vec::new();
        write_results(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No results found.\n");
    }

    #[test]
    fn json_output() {
        let result = AnswerResult::new(
            "Bell.",
            vec![SearchResult::new("Telephone", "snippet", "", "wikipedia")],
        );
        let mut buf = Vec::new();
        write_json(&mut buf, &result).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["answer"], "Bell.");
        assert_eq!(value["sources"][0]["title"], "Telephone");
    }
}
