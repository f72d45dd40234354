/// Body of a successful chat completion as returned by an OpenAI compatible
/// API, trimmed to the fields the client reads plus a few it ignores.
pub fn completion_body(content: &str) -> String {
    return serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content,
                },
                "finish_reason": "stop",
            }
        ],
        "usage": {
            "prompt_tokens": 12,
            "completion_tokens": 7,
            "total_tokens": 19,
        },
    })
    .to_string();
}

pub fn empty_choices_body() -> String {
    return serde_json::json!({
        "id": "chatcmpl-456",
        "object": "chat.completion",
        "choices": [],
    })
    .to_string();
}
