//! Interaction snapshots and accumulator finalization.

mod common;

use common::{stub_runtime, ScriptedConsole, StubProvider};
use decision_sim::agent::Interaction;
use decision_sim::types::Message;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn finalize_without_instruction_makes_no_call() {
    let stub = StubProvider::new();
    let runtime = stub_runtime(&stub);
    let agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let interaction = Interaction::new(&agent, &runtime, None).unwrap();

    assert_eq!(interaction.finalize().await.unwrap(), None);
    assert_eq!(stub.call_count(), 0);
}

#[test]
fn blank_accumulator_instruction_is_rejected() {
    let runtime = stub_runtime(&StubProvider::new());
    let agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let err = Interaction::new(&agent, &runtime, Some(" ".into())).unwrap_err();
    assert_eq!(err.kind(), "validation");
}

#[tokio::test]
async fn snapshot_is_isolated_from_later_agent_changes() {
    let stub = StubProvider::with_replies(&["hi"]);
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    agent.send("hello").await.unwrap();

    let interaction = Interaction::new(&agent, &runtime, None).unwrap();
    agent.clear_history();
    agent.send("again").await.unwrap();

    assert_eq!(
        interaction.get_conversation(),
        &[Message::user("hello"), Message::assistant("hi")]
    );
}

#[tokio::test]
async fn finalize_sends_one_transcript_to_the_accumulator() {
    let stub = StubProvider::with_replies(&["Sure, tell me more.", "{\"summary\": \"ok\"}"]);
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("Interviewer", "Ask questions.").unwrap();
    let mut console = ScriptedConsole::new(&["I like boats", "exit"]);

    let interaction = agent
        .interact(&mut console, Some("What do you like?"), Some("Summarize as JSON."))
        .await
        .unwrap();
    let before = interaction.get_conversation().to_vec();

    let result = interaction.finalize().await.unwrap();

    assert_eq!(result.as_deref(), Some("{\"summary\": \"ok\"}"));
    assert_eq!(stub.call_count(), 2);
    let request = &stub.requests()[1];
    assert_eq!(
        request.messages,
        vec![
            Message::system("Summarize as JSON."),
            Message::user(
                "Process this conversation:\n\n\
                 assistant: What do you like?\n\
                 user: I like boats\n\
                 assistant: Sure, tell me more."
            ),
        ]
    );
    assert_eq!(interaction.get_conversation(), before.as_slice());
    // The source agent is not touched either.
    assert_eq!(agent.history().len(), 3);
}

#[tokio::test]
async fn finalize_can_run_repeatedly() {
    let stub = StubProvider::with_replies(&["first", "second"]);
    let runtime = stub_runtime(&stub);
    let agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let interaction = Interaction::new(&agent, &runtime, Some("Extract.".into())).unwrap();

    assert_eq!(interaction.finalize().await.unwrap().as_deref(), Some("first"));
    assert_eq!(interaction.finalize().await.unwrap().as_deref(), Some("second"));
    assert_eq!(stub.call_count(), 2);
}

#[tokio::test]
async fn transcript_has_one_line_per_message() {
    let stub = StubProvider::with_replies(&["a1", "a2"]);
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    agent.send("q1").await.unwrap();
    agent.send("q2").await.unwrap();

    let interaction = Interaction::new(&agent, &runtime, None).unwrap();
    let transcript = interaction.get_transcript();

    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines, vec!["user: q1", "assistant: a1", "user: q2", "assistant: a2"]);
    assert_eq!(lines.len(), interaction.get_conversation().len());
}

#[tokio::test]
async fn finalize_failure_is_reported_against_the_accumulator() {
    let stub = StubProvider::new();
    stub.fail(decision_sim::error::ProviderError::Timeout(1000));
    let runtime = stub_runtime(&stub);
    let agent = runtime.create_agent("Chat", "You are helpful.").unwrap();
    let interaction = Interaction::new(&agent, &runtime, Some("Extract.".into())).unwrap();

    let err = interaction.finalize().await.unwrap_err();

    assert!(err.to_string().contains("'Chat - Accumulator'"));
}
