use ac_protocol::*;
use uuid::Uuid;

#[test]
fn test_agent_json_uses_camel_case_and_omits_absent_fields() {
    let agent = Agent::new(
        "translator".to_string(),
        "Translator".to_string(),
        "Translate to English".to_string(),
    );

    let json = serde_json::to_value(&agent).expect("Failed to serialize Agent");

    assert_eq!(json["systemPrompt"], "Translate to English");
    assert!(json.get("createdAt").is_some());
    assert!(json.get("apiKey").is_none(), "absent api key should be omitted");
    assert!(json.get("avatarUrl").is_none());

    let deserialized: Agent = serde_json::from_value(json).expect("Failed to deserialize Agent");
    assert_eq!(deserialized, agent);
}

#[test]
fn test_agent_deserializes_browser_record() {
    let json = r#"{
        "id": "b7e0",
        "name": "Poet",
        "description": "",
        "systemPrompt": "Answer in verse",
        "apiKey": "secret",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-02T10:00:00.000Z"
    }"#;

    let agent: Agent = serde_json::from_str(json).expect("Failed to deserialize Agent");
    assert_eq!(agent.api_key.as_deref(), Some("secret"));
    assert_eq!(agent.avatar_url, None);

    let config = AgentConfig::from(&agent);
    assert_eq!(config.credential.as_deref(), Some("secret"));
}

#[test]
fn test_pipeline_definition_from_yaml() {
    let yaml_str = r#"
id: translate-summarize
name: Translate then summarize
description: Two step pipeline
agents:
  - translator
  - summarizer
"#;

    let definition: PipelineDefinition =
        serde_yaml::from_str(yaml_str).expect("Failed to deserialize PipelineDefinition");
    assert_eq!(definition.agents, vec!["translator", "summarizer"]);

    let pipeline = Pipeline::from(definition);
    assert_eq!(pipeline.id, "translate-summarize");
    assert_eq!(pipeline.description, "Two step pipeline");
    assert_eq!(pipeline.agent_sequence.len(), 2);
    assert_eq!(pipeline.agent_sequence[1].agent_id, "summarizer");
}

#[test]
fn test_pipeline_result_failure_shape() {
    let result = PipelineResult {
        initial_input_text: "x".to_string(),
        initial_image: None,
        steps: vec![PipelineStepResult {
            agent_id: "a".to_string(),
            agent_name: "A".to_string(),
            input_text: "x".to_string(),
            output_text: None,
            error_message: Some("boom".to_string()),
            duration_ms: Some(3),
        }],
        final_output_text: None,
        overall_error_message: Some("Pipeline failed at agent: A. Error: boom".to_string()),
    };

    let json = serde_json::to_value(&result).expect("Failed to serialize PipelineResult");
    assert_eq!(json["steps"][0]["errorMessage"], "boom");
    assert_eq!(json["steps"][0]["durationMs"], 3);
    assert!(json["steps"][0].get("outputText").is_none());
    assert!(json.get("finalOutputText").is_none());
    assert!(json.get("overallErrorMessage").is_some());
}

#[test]
fn test_comparison_result_serialization() {
    let entry = ComparisonResult {
        agent_id: "a".to_string(),
        agent_name: "A".to_string(),
        avatar_ref: None,
        response_text: Some("hello".to_string()),
        error_message: None,
    };

    let json = serde_json::to_string(&entry).expect("Failed to serialize ComparisonResult");
    assert!(json.contains("\"responseText\":\"hello\""));
    assert!(!json.contains("errorMessage"));
    assert!(!entry.is_error());
}

#[test]
fn test_event_serialization() {
    let run_id = Uuid::new_v4();
    let event = Event::StepStarted {
        run_id,
        step_index: 1,
        agent_id: "b".to_string(),
        agent_name: "B".to_string(),
    };

    let json = serde_json::to_value(&event).expect("Failed to serialize Event");
    assert_eq!(json["type"], "stepStarted");
    assert_eq!(json["payload"]["stepIndex"], 1);
    assert_eq!(json["payload"]["runId"], run_id.to_string());

    let deserialized: Event = serde_json::from_value(json).expect("Failed to deserialize Event");
    assert_eq!(deserialized, event);
    assert!(!deserialized.is_terminal());
    assert!(Event::PipelineCompleted { run_id }.is_terminal());
}

#[test]
fn test_global_config_serde_defaults() {
    let config: GlobalConfig =
        serde_yaml::from_str("{}").expect("Failed to deserialize GlobalConfig");

    assert_eq!(config, GlobalConfig::default());
    assert_eq!(config.provider, "gemini");
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.locale, Locale::Arabic);
    assert_eq!(config.store_dir, None);
}

#[test]
fn test_locale_serialization() {
    assert_eq!(
        serde_json::to_value(Locale::English).expect("Failed to serialize Locale"),
        "en"
    );
    let locale: Locale = serde_json::from_value(serde_json::json!("ar"))
        .expect("Failed to deserialize Locale");
    assert_eq!(locale, Locale::Arabic);
}

#[test]
fn test_chat_session_round_trip_keeps_roles() {
    let mut session = ChatSession::new("a".to_string());
    session.messages.push(Message::user("hi".to_string(), None));
    session
        .messages
        .push(Message::agent("a".to_string(), "hello".to_string()));

    let json = serde_json::to_value(&session).expect("Failed to serialize ChatSession");
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][1]["role"], "agent");
    assert_eq!(json["messages"][1]["agentId"], "a");
}
