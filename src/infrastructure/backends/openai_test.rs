use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::completion_body;
use test_utils::empty_choices_body;

use super::OpenAI;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::SubjectCatalog;

impl OpenAI {
    fn with_url(url: String) -> OpenAI {
        return OpenAI {
            url,
            timeout: "200".to_string(),
        };
    }
}

fn to_prompt(text: &str, credential: Option<&str>) -> BackendPrompt {
    let subject = SubjectCatalog::lookup("stem").unwrap();
    let history = vec![
        Message::new(Role::User, "What is entropy?"),
        Message::new(Role::Assistant, "A measure of disorder."),
        Message::new(Role::User, text),
    ];

    return BackendPrompt::new(subject, &history, credential.map(|e| return e.to_string()));
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_successfully_health_checks_404() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(404)
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_without_url() {
    let backend = OpenAI::with_url("".to_string());
    let res = backend.health_check().await;

    assert_eq!(res.unwrap_err().to_string(), "OpenAI URL is not defined");
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("Authorization", "Bearer abc")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.3,
            "max_tokens": 1000,
        })))
        .with_status(200)
        .with_body(completion_body("Entropy always increases."))
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend
        .get_completion(to_prompt("Give an example", Some("abc")))
        .await?;

    mock.assert_async().await;
    assert_eq!(res, "Entropy always increases.");

    return Ok(());
}

#[tokio::test]
async fn it_sends_full_history() -> Result<()> {
    let subject = SubjectCatalog::lookup("stem").unwrap();
    let system = BackendPrompt::system_instruction(subject);

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": "What is entropy?" },
                { "role": "assistant", "content": "A measure of disorder." },
                { "role": "user", "content": "Give an example" },
            ],
        })))
        .with_status(200)
        .with_body(completion_body("Ice melting."))
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend
        .get_completion(to_prompt("Give an example", Some("abc")))
        .await?;

    mock.assert_async().await;
    assert_eq!(res, "Ice melting.");

    return Ok(());
}

#[tokio::test]
async fn it_fails_without_credential() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_completion(to_prompt("Hello", None)).await;

    assert_eq!(res.unwrap_err().to_string(), "No OpenAI API key is set");
    mock.assert_async().await;

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_unsuccessful_status() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_completion(to_prompt("Hello", Some("bad"))).await;

    mock.assert_async().await;
    insta::assert_snapshot!(res.unwrap_err().to_string(), @"Failed to make completion request to OpenAI, status 401");

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_empty_choices() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(empty_choices_body())
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_completion(to_prompt("Hello", Some("abc"))).await;

    mock.assert_async().await;
    assert!(res.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_malformed_bodies() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("<html>Bad gateway</html>")
        .create_async()
        .await;

    let backend = OpenAI::with_url(server.url());
    let res = backend.get_completion(to_prompt("Hello", Some("abc"))).await;

    mock.assert_async().await;
    assert!(res.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_fails_when_unreachable() {
    let backend = OpenAI::with_url("http://127.0.0.1:1".to_string());
    let res = backend.get_completion(to_prompt("Hello", Some("abc"))).await;

    assert!(res
        .unwrap_err()
        .to_string()
        .starts_with("Failed to connect to OpenAI"));
}
