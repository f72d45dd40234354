#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::io::Write;
use std::path;

use anyhow::bail;
use anyhow::Result;
use dialoguer::Password;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::models::Message;
use crate::domain::models::Notification;
use crate::domain::models::NotificationKind;
use crate::domain::models::Role;
use crate::domain::models::SlashCommand;
use crate::domain::models::SubjectCatalog;
use crate::domain::services::ChatSessionController;
use crate::domain::services::CredentialStore;
use crate::domain::services::SendOutcome;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::stores::FileStore;
use crate::infrastructure::stores::MemoryStore;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /subject (/s) [SUBJECT_ID] - Switches the subject area. The chat history is kept.
- /subjects (/ls) - Lists all subject areas.
- /samples [NUMBER?] - Lists sample questions for the current subject. Passing a NUMBER sends that question.
- /clear (/c) - Clears the conversation.
- /quit /exit (/q) - Exit Scholar Scribe.
- /help (/h) - Provides this help menu.

CITATIONS:
Citations are formatted outside of the chat with `scholar-scribe cite`. Run `scholar-scribe cite --help` for the available fields.
"#;

    return text.trim().to_string();
}

pub fn print_notification(notification: &Notification) {
    let text = format!("{}: {}", notification.title, notification.description);
    match notification.kind {
        NotificationKind::Error => eprintln!("{}", Paint::red(text)),
        NotificationKind::Success => println!("{}", Paint::green(text)),
        NotificationKind::Info => println!("{}", Paint::cyan(text)),
    }
}

pub fn credential_store() -> CredentialStore {
    let store_file = path::PathBuf::from(Config::get(ConfigKey::StoreFile));
    return CredentialStore::new(Box::new(FileStore::new(store_file)));
}

fn drain_notifications(rx: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        print_notification(&notification);
    }
}

fn print_message(message: &Message) {
    let author = match message.role() {
        Role::User => "You",
        Role::Assistant => "Scholar Scribe",
        Role::System => "System",
    };

    println!(
        "\n{} {}\n{}\n",
        Paint::new(author).bold(),
        Paint::new(message.time_label()).dimmed(),
        message.content()
    );
}

fn format_subjects(selected: &str) -> String {
    return SubjectCatalog::list()
        .iter()
        .map(|subject| {
            let marker = if subject.id == selected { "*" } else { " " };
            return format!(
                "{marker} {} ({}): {}",
                subject.name, subject.id, subject.description
            );
        })
        .collect::<Vec<String>>()
        .join("\n");
}

fn format_samples(subject_id: &str) -> String {
    return SubjectCatalog::sample_queries(subject_id)
        .iter()
        .enumerate()
        .map(|(idx, sample)| {
            return format!("{}. {}", idx + 1, sample.text);
        })
        .collect::<Vec<String>>()
        .join("\n");
}

/// Resolves `/samples N` to the sample question text. Numbers start at 1.
pub fn sample_by_number(subject_id: &str, number: &str) -> Option<&'static str> {
    let idx = number.parse::<usize>().ok()?;
    if idx == 0 {
        return None;
    }

    return SubjectCatalog::sample_queries(subject_id)
        .get(idx - 1)
        .map(|sample| return sample.text);
}

async fn ensure_credential(credentials: &CredentialStore) -> Result<()> {
    if credentials.read().await?.is_some() {
        return Ok(());
    }

    print_notification(&Notification::info(
        "API key",
        "No OpenAI API key is set. Enter one now, or leave blank and run `scholar-scribe credential set` later.",
    ));

    let value = match Password::new()
        .with_prompt("OpenAI API key")
        .allow_empty_password(true)
        .interact()
    {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(err = ?err, "Unable to prompt for API key");
            return Ok(());
        }
    };

    if value.trim().is_empty() {
        return Ok(());
    }

    match credentials.write(&value).await {
        Ok(_) => print_notification(&Notification::success(
            "Success",
            "API key saved successfully",
        )),
        Err(err) => print_notification(&Notification::error("Error", &err.to_string())),
    }

    return Ok(());
}

async fn send(
    controller: &ChatSessionController,
    rx: &mut mpsc::UnboundedReceiver<Notification>,
    content: &str,
) -> Result<()> {
    println!("{}", Paint::new("Scholar Scribe is thinking...").dimmed());
    let outcome = controller.send_message(content).await?;
    if outcome == SendOutcome::Replied {
        if let Some(message) = controller.messages().await.last() {
            tracing::debug!(id = message.id(), "Reply received");
            print_message(message);
        }
    }
    drain_notifications(rx);

    return Ok(());
}

fn prompt() -> Result<()> {
    print!("{} ", Paint::new(">").bold());
    std::io::stdout().flush()?;
    return Ok(());
}

pub async fn start() -> Result<()> {
    let backend_name = match BackendName::parse(Config::get(ConfigKey::Backend)) {
        Some(name) => name,
        None => bail!(format!(
            "Unknown backend {}",
            Config::get(ConfigKey::Backend)
        )),
    };

    // The local backend never reads the credential, keep it off disk.
    let credentials = match backend_name {
        BackendName::OpenAI => {
            let credentials = credential_store();
            ensure_credential(&credentials).await?;
            credentials
        }
        BackendName::Local => CredentialStore::new(Box::<MemoryStore>::default()),
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
    let controller = ChatSessionController::new(
        BackendManager::get(backend_name)?,
        credentials,
        &Config::get(ConfigKey::Subject),
        tx,
    );

    controller.check_backend().await?;
    drain_notifications(&mut rx);

    let subject_id = controller.selected_subject().await;
    let subject_name = SubjectCatalog::lookup(&subject_id)
        .map(|subject| return subject.name)
        .unwrap_or_default();
    println!(
        "{}\nSubject: {subject_name}. Type a question, or /help for commands.\n\n{}",
        Paint::new("Welcome to Scholar Scribe").bold(),
        format_samples(&subject_id)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        if let Some(command) = SlashCommand::parse(&line) {
            let subject_id = controller.selected_subject().await;

            if command.is_quit() {
                break;
            } else if command.is_help() {
                println!("{}", help_text());
            } else if command.is_subject_list() {
                println!("{}", format_subjects(&subject_id));
            } else if command.is_clear() {
                let conversation_id = controller.conversation_id().await;
                controller.clear_chat().await;
                tracing::debug!(conversation = ?conversation_id, "Conversation cleared");
                println!("Conversation cleared.");
            } else if command.is_subject_set() {
                let requested = command.args.first().map(|e| return e.as_str()).unwrap_or("");
                if controller.change_subject(requested).await {
                    println!("Subject set to {requested}.");
                    println!("{}", format_samples(requested));
                } else {
                    print_notification(&Notification::error(
                        "Error",
                        &format!(
                            "Unknown subject \"{requested}\". Available: {}",
                            SubjectCatalog::ids().join(", ")
                        ),
                    ));
                }
            } else if command.is_samples() {
                match command.args.first() {
                    Some(number) => match sample_by_number(&subject_id, number) {
                        Some(sample) => {
                            println!("{sample}");
                            send(&controller, &mut rx, sample).await?;
                        }
                        None => print_notification(&Notification::error(
                            "Error",
                            &format!("No sample question numbered {number}"),
                        )),
                    },
                    None => println!("{}", format_samples(&subject_id)),
                }
            }
        } else if !line.trim().is_empty() {
            send(&controller, &mut rx, &line).await?;
        }

        prompt()?;
    }

    let session = controller.snapshot().await;
    tracing::debug!(
        conversation = ?session.conversation_id,
        subject = %session.selected_subject,
        messages = session.messages.len(),
        loading = session.is_loading,
        "Chat ended"
    );

    return Ok(());
}
