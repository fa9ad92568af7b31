use parley_session::ConversationSession;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Lines that end the console session, compared case-insensitively.
pub const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "bye"];

pub const BANNER: &str = "Parley ready! Type 'exit' to quit.\n\n";
pub const FAREWELL: &str = "Bot: See you next time!";
pub const GOODBYE: &str = "Goodbye!";

/// Why the console loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplExit {
    /// The user typed one of [`EXIT_COMMANDS`].
    Command,
    /// Input was closed.
    EndOfInput,
}

pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    EXIT_COMMANDS.iter().any(|c| line.eq_ignore_ascii_case(c))
}

/// Read lines from `input`, answer each through `session`, write to `output`.
pub async fn run<R, W>(
    session: &mut ConversationSession,
    input: R,
    mut output: W,
) -> std::io::Result<ReplExit>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(BANNER.as_bytes()).await?;
    let mut lines = input.lines();

    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(format!("\n{GOODBYE}\n").as_bytes()).await?;
            output.flush().await?;
            return Ok(ReplExit::EndOfInput);
        };

        if is_exit_command(&line) {
            output.write_all(format!("{FAREWELL}\n").as_bytes()).await?;
            output.flush().await?;
            return Ok(ReplExit::Command);
        }

        let reply = session.respond(&line);
        output.write_all(format!("Bot: {reply}\n").as_bytes()).await?;
    }
}
