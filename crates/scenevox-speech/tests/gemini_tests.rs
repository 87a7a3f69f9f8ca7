#![cfg(feature = "gemini")]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use httpmock::prelude::*;
use scenevox_speech::providers::gemini::{GeminiConfig, GeminiTTS};
use scenevox_speech::{SpeechError, SpeechRequest, TTSSpeechProvider};
use serde_json::json;

const PATH: &str = "/v1beta/models/gemini-2.5-flash-preview-tts:generateContent";

fn provider(server: &MockServer) -> GeminiTTS {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = GeminiConfig::default()
        .with_api_key("test-key")
        .with_base_url(server.base_url());
    GeminiTTS::new(config).expect("Failed to build Gemini client")
}

fn audio_body(pcm: &[u8]) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{
                    "inlineData": {
                        "mimeType": "audio/L16;codec=pcm;rate=24000",
                        "data": STANDARD.encode(pcm)
                    }
                }],
                "role": "model"
            }
        }]
    })
}

#[tokio::test]
async fn test_gemini_speech_succeeds() {
    let server = MockServer::start_async().await;
    let pcm: Vec<u8> = (0..10).collect();

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PATH).query_param("key", "test-key");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(audio_body(&pcm));
        })
        .await;

    let response = provider(&server)
        .generate_speech(SpeechRequest::new("Hello", "Kore"))
        .await
        .unwrap();

    assert_eq!(response.audio.bytes, pcm);
    assert_eq!(response.audio.sample_rate, 24000);
    assert_eq!(response.text, "Hello");
    assert_eq!(response.audio.to_wav().len(), 54);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_custom_model_path() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-pro-preview-tts:generateContent");
            then.status(200).json_body(audio_body(&[1, 0]));
        })
        .await;

    let config = GeminiConfig::default()
        .with_api_key("test-key")
        .with_model("gemini-2.5-pro-preview-tts")
        .with_base_url(server.base_url());
    let pcm = GeminiTTS::new(config)
        .unwrap()
        .synthesize("Hi", "Puck")
        .await
        .unwrap();

    assert_eq!(pcm, vec![1, 0]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_fails_on_api_error() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(500).json_body(json!({
                "error": {
                    "code": 500,
                    "message": "Internal server error",
                    "status": "INTERNAL"
                }
            }));
        })
        .await;

    let result = provider(&server)
        .generate_speech(SpeechRequest::new("Hello", "Kore"))
        .await;

    match result {
        Err(SpeechError::ProviderError(msg, provider)) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("Internal server error"));
            assert_eq!(provider, "gemini");
        }
        other => panic!("Expected SpeechError::ProviderError, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_fails_without_audio() {
    let server = MockServer::start_async().await;

    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "I cannot speak that."}]}
                }]
            }));
        })
        .await;

    let err = provider(&server)
        .generate_speech(SpeechRequest::new("Hello", "Kore"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("No audio data returned"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_fails_on_malformed_body() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path(PATH);
            then.status(200).body("<html>proxy error</html>");
        })
        .await;

    let err = provider(&server)
        .generate_speech(SpeechRequest::new("Hello", "Kore"))
        .await
        .unwrap_err();

    assert!(matches!(err, SpeechError::ProviderError(ref msg, _) if msg.contains("Malformed")));
}

#[tokio::test]
async fn test_gemini_network_failure_is_provider_error() {
    // Nothing listens on the discard port.
    let config = GeminiConfig::default()
        .with_api_key("test-key")
        .with_base_url("http://127.0.0.1:9")
        .with_timeout_secs(5);

    let err = GeminiTTS::new(config)
        .unwrap()
        .generate_speech(SpeechRequest::new("Hello", "Kore"))
        .await
        .unwrap_err();

    assert!(matches!(err, SpeechError::ProviderError(..)));
}
