//! Decision simulation over a stub backend.

mod common;

use common::{stub_runtime, StubProvider};
use decision_sim::error::ProviderError;
use decision_sim::simulator::{DecisionSimulator, SimulationResult};
use decision_sim::types::Role;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn each_iteration_is_an_independent_call() {
    let stub = StubProvider::with_replies(&[
        "DECISION: Stay\nOUTCOME: Stable\nREASONING: Low risk",
        "DECISION: Go\nOUTCOME: Growth",
    ]);
    let simulator = DecisionSimulator::new(stub_runtime(&stub), true);

    let results = simulator.simulate("Change jobs?", 2).await.unwrap();

    assert_eq!(
        results,
        vec![
            SimulationResult {
                decision: "Stay".into(),
                outcome: "Stable".into(),
                reasoning: "Low risk".into(),
            },
            SimulationResult {
                decision: "Go".into(),
                outcome: "Growth".into(),
                reasoning: String::new(),
            },
        ]
    );
    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[1].content.starts_with("Scenario: Change jobs?"));
    }
}

#[tokio::test]
async fn zero_iterations_makes_no_calls() {
    let stub = StubProvider::new();
    let simulator = DecisionSimulator::new(stub_runtime(&stub), false);

    assert!(simulator.simulate("Anything", 0).await.unwrap().is_empty());
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn backend_failure_stops_the_run() {
    let stub = StubProvider::with_replies(&["DECISION: A"]);
    stub.fail(ProviderError::Authentication("revoked".into()));
    let simulator = DecisionSimulator::new(stub_runtime(&stub), false);

    let err = simulator.simulate("Anything", 3).await.unwrap_err();

    assert_eq!(err.root().kind(), "provider_call");
    assert_eq!(stub.call_count(), 2);
}
