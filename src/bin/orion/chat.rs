//! Interactive chat loops

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use orion::api::ApiClient;
use orion::config::Config;
use orion::models::{MessageKind, Speaker};
use orion::nav::{Navigator, Route};
use orion::session::{CharacterChatSession, CharacterTiming, ChatSession, SendOutcome};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

fn prompt(label: &str) -> std::io::Result<()> {
    print!("{}> ", label);
    std::io::stdout().flush()
}

async fn confirm(input: &mut Input, question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let answer = input.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub async fn run_chat(client: ApiClient, config: &Config, id: Option<i64>) -> anyhow::Result<()> {
    let navigator = Navigator::new(Route::Chat(id));
    let mut session = ChatSession::new(Arc::new(client), navigator.clone(), &config.backend.model);
    session.sync_with_route().await;

    if let (Some(id), None) = (id, session.conversation_id()) {
        println!("Conversation {} could not be loaded; starting a new chat.", id);
    }
    for message in session.messages() {
        print_message(message.kind, &message.content);
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("you")?;
        let Some(line) = input.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        let cancel = session.cancel_handle();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
        let before = session.messages().len();
        let outcome = session.send(&line).await;
        watcher.abort();

        match outcome {
            SendOutcome::Ignored => continue,
            SendOutcome::Cancelled => println!("(stopped)"),
            SendOutcome::Replied | SendOutcome::Fallback => {
                let reply = session
                    .messages()
                    .iter()
                    .skip(before)
                    .rfind(|m| m.kind == MessageKind::Received);
                if let Some(reply) = reply {
                    print_message(reply.kind, &reply.content);
                    if let Some(summary) = reply.tool_action.as_ref().and_then(|a| a.summary()) {
                        println!("  [{}]", summary);
                    }
                }
            }
        }
    }

    if let Some(id) = session.conversation_id() {
        println!("Saved as {}", navigator.current());
        tracing::debug!(conversation_id = id, "Chat closed");
    }
    Ok(())
}

fn print_message(kind: MessageKind, content: &str) {
    match kind {
        MessageKind::Sent => println!("you> {}", content),
        MessageKind::Received => println!("orion> {}", content),
    }
}

pub async fn run_character_chat(client: ApiClient, config: &Config, id: &str) -> anyhow::Result<()> {
    let timing = CharacterTiming::from(&config.session);
    let mut session = CharacterChatSession::open(Arc::new(client), id, &config.backend.model, timing)
        .await
        .with_context(|| format!("Character '{}' is not available", id))?;

    let name = session.persona().short_name().to_string();
    println!("Chatting with {} (/reset, /delete, /quit)", session.persona().name);
    print_turns(&session, &name);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("you")?;
        let Some(line) = input.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/reset" => {
                if confirm(&mut input, "Reset this chat to the greeting?").await? {
                    match session.reset().await {
                        Ok(()) => print_turns(&session, &name),
                        Err(e) => eprintln!("{}", e),
                    }
                }
            }
            "/delete" => {
                if confirm(&mut input, "Delete the whole transcript?").await? {
                    match session.delete().await {
                        Ok(()) => println!("Transcript deleted."),
                        Err(e) => eprintln!("{}", e),
                    }
                }
            }
            _ => {
                println!("{} is typing...", name);
                if session.send(&line).await != SendOutcome::Ignored {
                    if let Some(turn) = session.turns().last() {
                        println!("{}> {}", name, turn.content);
                    }
                }
            }
        }
    }

    if let Err(e) = session.flush().await {
        eprintln!("{}", e);
    }
    println!("{} messages from you in this chat.", session.user_turn_count());
    Ok(())
}

fn print_turns<B: orion::api::CharacterBackend + 'static>(
    session: &CharacterChatSession<B>,
    name: &str,
) {
    for turn in session.turns() {
        match turn.speaker {
            Speaker::User => println!("you> {}", turn.content),
            Speaker::Character => println!("{}> {}", name, turn.content),
        }
    }
}
