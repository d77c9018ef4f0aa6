use chatline_core::config::Settings;
use chatline_core::*;
use std::path::PathBuf;
use tempfile::TempDir;

// ========================================================================
// Settings Tests (config/mod.rs)
// ========================================================================

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert_eq!(settings.provider, "huggingface");
    assert_eq!(settings.provider_id(), Some(ProviderId::HuggingFace));
    assert_eq!(settings.chat.max_turns, 5);
    assert_eq!(settings.chat.history_file, PathBuf::from("chat_history.json"));

    assert_eq!(settings.huggingface.model, "microsoft/DialoGPT-medium");
    assert_eq!(settings.huggingface.token_env, "HF_TOKEN");
    assert_eq!(settings.openai.model, "gpt-4o-mini");
    assert_eq!(settings.openai.api_key_env, "OPENAI_API_KEY");
}

#[test]
fn test_settings_save_and_reload_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("chatline").join("config.toml");

    let mut settings = Settings::default();
    settings.provider = "openai".to_string();
    settings.chat.max_turns = 8;
    settings.openai.model = "gpt-4o".to_string();

    settings.save_to(&config_path).unwrap();
    let loaded = Settings::try_load_from(&config_path).unwrap();

    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_load_from_missing_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::load_from(&temp_dir.path().join("nope.toml"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_settings_load_from_invalid_file_returns_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "provider = [unclosed").unwrap();

    assert!(Settings::try_load_from(&path).is_err());
    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_settings_model_for_provider() {
    let settings = Settings::default();
    assert_eq!(settings.model_for(ProviderId::HuggingFace), "microsoft/DialoGPT-medium");
    assert_eq!(settings.model_for(ProviderId::OpenAI), "gpt-4o-mini");
}

#[test]
fn test_settings_credential_from_named_env() {
    let mut settings = Settings::default();
    settings.openai.api_key_env = "CHATLINE_CORE_TEST_OPENAI_KEY".to_string();
    std::env::set_var("CHATLINE_CORE_TEST_OPENAI_KEY", "sk-test");
    assert_eq!(settings.openai_api_key().as_deref(), Some("sk-test"));

    std::env::set_var("CHATLINE_CORE_TEST_OPENAI_KEY", "   ");
    assert!(settings.openai_api_key().is_none());
    std::env::remove_var("CHATLINE_CORE_TEST_OPENAI_KEY");
}

// ========================================================================
// Memory + Store Tests (context/)
// ========================================================================

#[test]
fn test_memory_and_store_agree_after_same_additions() {
    let temp_dir = TempDir::new().unwrap();
    let store = HistoryStore::initialize(temp_dir.path().join("h.json"), 2);
    let mut memory = ConversationMemory::new(2);

    let script = [
        (Role::User, "u1"),
        (Role::Assistant, "a1"),
        (Role::User, "u2"),
        (Role::Assistant, "a2"),
        (Role::User, "u3"),
    ];
    for (role, content) in script {
        memory.add(role, content);
        store.append(role, content);
    }

    assert_eq!(memory.len(), 4);
    assert_eq!(memory.as_messages(), store.load());
    assert_eq!(memory.as_messages()[0], Turn::assistant("a1"));
}

#[test]
fn test_persisted_file_is_plain_record_list() {
    let temp_dir = TempDir::new().unwrap();
    let store = HistoryStore::initialize(temp_dir.path().join("h.json"), 5);
    store.append(Role::User, "Hi");

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!([{"role": "user", "content": "Hi"}]));
}

// ========================================================================
// Prompt Tests (context/prompt.rs)
// ========================================================================

#[test]
fn test_prompt_from_memory() {
    let mut memory = ConversationMemory::new(5);
    memory.add_user("Hi");
    memory.add_assistant("Hello!");
    memory.add_user("Tell me a joke");

    let prompt = PromptAssembler::to_prompt(&memory.as_messages());
    assert_eq!(
        prompt,
        "User: Hi\n\nAssistant: Hello!\n\nUser: Tell me a joke\n\nAssistant:"
    );
}

#[test]
fn test_prompt_echo_then_normalize() {
    let prompt = PromptAssembler::to_prompt(&[Turn::user("Hi")]);
    let raw = format!("{prompt} Hey! How can I help?  ");
    assert_eq!(normalize_reply(&prompt, &raw), "Hey! How can I help?");
}

// ========================================================================
// Error Tests (error.rs)
// ========================================================================

#[test]
fn test_error_messages_carry_upstream_text() {
    let err = ChatError::Generation("quota exceeded".into());
    assert!(err.to_string().contains("quota exceeded"));
    assert!(err.is_generation());

    let err = ChatError::Initialization("bad token".into());
    assert!(err.to_string().contains("bad token"));
    assert!(err.is_initialization());
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: ChatError = io.into();
    assert!(matches!(err, ChatError::Io(_)));
}
