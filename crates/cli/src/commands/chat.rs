//! Chat command handler.
//!
//! Reads questions from stdin until an exit word, end of input or Ctrl-C.

use crate::render;
use clap::Args;
use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use webask_core::{config::AppConfig, AppResult};
use webask_knowledge::AnswerPipeline;

/// Words that end the session, compared case-insensitively.
const EXIT_WORDS: [&str; 4] = ["quit", "exit", "q", "bye"];

const EXAMPLE_QUESTIONS: [&str; 6] = [
    "What is artificial intelligence?",
    "Who invented the telephone?",
    "How does the internet work?",
    "What is the tallest mountain?",
    "Explain photosynthesis",
    "What causes earthquakes?",
];

/// Ask questions interactively
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Skip the banner and example questions
    #[arg(long)]
    pub quiet: bool,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let pipeline = AnswerPipeline::from_config(config)?;
        let mut stdout = std::io::stdout();

        if !self.quiet {
            write_banner(&mut stdout)?;
        }

        run_chat(
            &pipeline,
            BufReader::new(tokio::io::stdin()),
            &mut stdout,
            tokio::signal::ctrl_c(),
        )
        .await
    }
}

/// Whether the input asks to leave the session.
pub fn is_exit_word(input: &str) -> bool {
    let input = input.trim();
    EXIT_WORDS.iter().any(|word| input.eq_ignore_ascii_case(word))
}

fn write_banner(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(out, "webask - ask anything, answered from the web")?;
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(out, "\nAnswers are grounded in Wikipedia and DuckDuckGo results.")?;
    writeln!(out, "The generation backend must be reachable (for Ollama: ollama serve).")?;
    writeln!(out, "\nExample questions to try:")?;
    for (i, example) in EXAMPLE_QUESTIONS.iter().enumerate() {
        writeln!(out, "   {}. {}", i + 1, example)?;
    }
    writeln!(out, "\nType 'quit' to exit.")?;
    writeln!(out, "{}", "=".repeat(80))
}

/// Question loop over any line source.
///
/// `interrupt` is polled while waiting for input and while answering;
/// once it completes the session ends.
pub async fn run_chat<R, W, I>(
    pipeline: &AnswerPipeline,
    input: R,
    out: &mut W,
    interrupt: I,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    I: Future<Output = std::io::Result<()>>,
{
    let mut lines = input.lines();
    tokio::pin!(interrupt);

    loop {
        write!(out, "\nYour question: ")?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut interrupt => {
                writeln!(out, "\n\nInterrupted. Goodbye!")?;
                break;
            }
        };

        let Some(line) = line else {
            writeln!(out, "\nGoodbye!")?;
            break;
        };

        let question = line.trim();
        if is_exit_word(question) {
            writeln!(out, "\nGoodbye!")?;
            break;
        }
        if question.is_empty() {
            writeln!(out, "   Please type a question!")?;
            continue;
        }

        render::write_question(out, question)?;
        out.flush()?;

        let result = tokio::select! {
            result = pipeline.answer(question) => result,
            _ = &mut interrupt => {
                writeln!(out, "\n\nInterrupted. Goodbye!")?;
                break;
            }
        };
        render::write_answer(out, &result)?;
    }

    Ok(())
}
