use std::io::{self, BufRead, Write};

use chat_console::providers;
use chat_session::{ChatSession, Speaker};
use session_identity::{state_root, FileStorage, SessionIdentity};
use tracing_subscriber::EnvFilter;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let service = providers::service_from_env().map_err(io::Error::other)?;
    let cwd = std::env::current_dir()?;
    let state_dir = state_root(&cwd);
    tracing::debug!(state_dir = %state_dir.display(), "starting chat console");
    let identity = SessionIdentity::new(FileStorage::new(state_dir));
    let mut chat = ChatSession::new(service, identity);

    println!("Welcome to the chat console. Type 'exit' to quit.");

    let stdin = io::stdin();
    let mut rendered = 0usize;
    loop {
        print!("You: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            println!("Bot: Goodbye!");
            break;
        }

        chat.set_draft(input);
        runtime.block_on(chat.send());

        // The user's own line is already on screen; print only new Bot turns.
        for turn in &chat.transcript()[rendered..] {
            if turn.speaker == Speaker::Bot {
                println!("Bot: {}", turn.text);
            }
        }
        rendered = chat.transcript().len();
    }

    Ok(())
}
