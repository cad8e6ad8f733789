use serde::{Deserialize, Serialize};

use crate::traits::Message;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatResponse {
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModelTag {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_is_non_streaming_with_lowercase_roles() {
        let messages = [Message::system("Eres un asistente"), Message::user("Hola")];
        let request = ChatRequest {
            model: "llama3.2:3b",
            messages: &messages,
            stream: false,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "llama3.2:3b",
                "messages": [
                    {"role": "system", "content": "Eres un asistente"},
                    {"role": "user", "content": "Hola"}
                ],
                "stream": false
            })
        );
    }

    #[test]
    fn responses_tolerate_missing_fields() {
        let empty: ChatResponse =
            serde_json::from_value(json!({"model": "llama3.2:3b", "done": true})).unwrap();
        assert!(empty.message.is_none());

        let chat: ChatResponse = serde_json::from_value(json!({
            "model": "llama3.2:3b",
            "message": {"role": "assistant", "content": "Te recomiendo Casa Rufino"},
            "done": true
        }))
        .unwrap();
        assert_eq!(
            chat.message.map(|m| m.content).as_deref(),
            Some("Te recomiendo Casa Rufino")
        );
    }
}
