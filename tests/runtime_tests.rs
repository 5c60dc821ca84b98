//! Turn submission and the interactive session loop.

mod common;

use std::error::Error as _;

use common::{stub_runtime, ScriptedConsole, StubProvider};
use decision_sim::agent::ConsoleInput;
use decision_sim::error::{ProviderError, SimError};
use decision_sim::types::Message;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn failed_send_leaves_history_untouched() {
    let stub = StubProvider::with_replies(&["Hello!"]);
    stub.fail(ProviderError::RateLimited { retry_after_ms: None });
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();

    assert_eq!(agent.send("Hi").await.unwrap(), "Hello!");
    assert_eq!(
        agent.history(),
        &[Message::user("Hi"), Message::assistant("Hello!")]
    );

    let err = agent.send("Bye").await.unwrap_err();

    assert_eq!(
        agent.history(),
        &[Message::user("Hi"), Message::assistant("Hello!")]
    );
    assert!(matches!(err, SimError::Submit { ref agent, .. } if agent == "A"));
    assert_eq!(err.root().kind(), "provider_call");

    let mut chain = Vec::new();
    let mut cause = err.source();
    while let Some(inner) = cause {
        chain.push(inner.to_string());
        cause = inner.source();
    }
    assert!(
        chain.iter().any(|c| c.contains("Rate limited")),
        "chain: {chain:?}"
    );
}

#[tokio::test]
async fn submit_sends_instruction_history_then_message() {
    let stub = StubProvider::with_replies(&["first", "second"]);
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "Be brief.").unwrap();

    agent.send("one").await.unwrap();
    agent.send("two").await.unwrap();

    let last = &stub.requests()[1];
    assert_eq!(
        last.messages,
        vec![
            Message::system("Be brief."),
            Message::user("one"),
            Message::assistant("first"),
            Message::user("two"),
        ]
    );
}

#[tokio::test]
async fn send_without_history_records_nothing() {
    let stub = StubProvider::with_replies(&["reply"]);
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "Be brief.").unwrap();

    let reply = agent.send_with("ephemeral", false).await.unwrap();

    assert_eq!(reply, "reply");
    assert!(agent.history().is_empty());
    assert_eq!(stub.call_count(), 1);
}

#[tokio::test]
async fn identical_inputs_produce_identical_payloads() {
    let stub = StubProvider::new();
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    agent.send("seed").await.unwrap();

    let messages = agent.get_messages(true);
    runtime.service().complete(messages.clone()).await.unwrap();
    runtime.service().complete(messages).await.unwrap();

    let requests = stub.requests();
    let first = serde_json::to_vec(&requests[1]).unwrap();
    let second = serde_json::to_vec(&requests[2]).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn invoke_uses_a_throwaway_agent() {
    let stub = StubProvider::with_replies(&["42"]);
    let runtime = stub_runtime(&stub);

    let reply = runtime.invoke("Oracle", "Answer tersely.", "meaning?").await.unwrap();

    assert_eq!(reply, "42");
    assert_eq!(
        stub.requests()[0].messages,
        vec![Message::system("Answer tersely."), Message::user("meaning?")]
    );
}

#[tokio::test]
async fn opener_is_recorded_without_a_completion_call() {
    let stub = StubProvider::new();
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let mut console = ScriptedConsole::new(&["exit"]);

    let interaction = agent
        .interact(&mut console, Some("Hi there"), None)
        .await
        .unwrap();

    assert_eq!(interaction.get_conversation(), &[Message::assistant("Hi there")]);
    assert_eq!(stub.call_count(), 0);
    assert!(console.printed().contains("Ending session with A."));
}

#[tokio::test]
async fn session_excludes_history_from_before_it_started() {
    let stub = StubProvider::with_replies(&["earlier reply"]);
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    agent.send("earlier").await.unwrap();
    let mut console = ScriptedConsole::new(&["QUIT"]);

    let interaction = agent
        .interact(&mut console, Some("Hi there"), None)
        .await
        .unwrap();

    assert_eq!(interaction.get_conversation(), &[Message::assistant("Hi there")]);
    assert_eq!(agent.history().len(), 3);
}

#[tokio::test]
async fn empty_opener_is_ignored() {
    let stub = StubProvider::new();
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let mut console = ScriptedConsole::new(&["exit"]);

    let interaction = agent.interact(&mut console, Some(""), None).await.unwrap();

    assert!(interaction.get_conversation().is_empty());
}

#[tokio::test]
async fn session_survives_a_failed_turn() {
    let stub = StubProvider::new();
    stub.fail(ProviderError::api(500, "upstream broke"));
    stub.reply("second try worked");
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let mut console = ScriptedConsole::new(&["first", "", "   ", "second", "exit"]);

    let interaction = agent.interact(&mut console, None, None).await.unwrap();

    assert_eq!(
        interaction.get_conversation(),
        &[
            Message::user("second"),
            Message::assistant("second try worked"),
        ]
    );
    // Blank lines never reach the backend.
    assert_eq!(stub.call_count(), 2);
    let printed = console.printed();
    assert!(printed.contains("\nError: Failed to get response from LLM for agent 'A'"));
    assert!(printed.contains("\nA: second try worked\n"));
}

#[tokio::test]
async fn end_of_input_keeps_completed_turns() {
    let stub = StubProvider::with_replies(&["noted"]);
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let mut console = ScriptedConsole::new(&["remember this"]).then(ConsoleInput::Interrupted);

    let interaction = agent.interact(&mut console, None, None).await.unwrap();

    assert_eq!(interaction.get_conversation().len(), 2);
    assert!(console.printed().contains("Session interrupted."));
}

#[tokio::test]
async fn interrupt_during_a_turn_ends_the_session() {
    let stub = StubProvider::with_replies(&["kept"]);
    stub.hang();
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    agent.send("before").await.unwrap();
    let mut console = ScriptedConsole::new(&["never answered", "exit"]).interrupting_turns();

    let interaction = agent.interact(&mut console, None, None).await.unwrap();

    assert!(interaction.get_conversation().is_empty());
    assert_eq!(
        agent.history(),
        &[Message::user("before"), Message::assistant("kept")]
    );
    assert_eq!(console.remaining_inputs(), 1);
}

#[tokio::test]
async fn blank_accumulator_instruction_is_rejected_before_the_session() {
    let stub = StubProvider::new();
    let runtime = stub_runtime(&stub);
    let mut agent = runtime.create_agent("A", "You are helpful.").unwrap();
    let mut console = ScriptedConsole::new(&["hello", "exit"]);

    let err = agent
        .interact(&mut console, Some("opener"), Some("   "))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "validation");
    assert!(agent.history().is_empty());
    assert_eq!(console.remaining_inputs(), 2);
}
