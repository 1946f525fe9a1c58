//! End-to-end turns through the orchestrator with a scripted Reasoner

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use housedesign::llm::{CompletionRequest, CompletionResponse};
use housedesign::prompts::PromptLoader;
use housedesign::workflow::NodeId;
use housedesign::{LlmClient, LlmError, Orchestrator};

/// Replies with canned text in order; `None` entries fail the call
struct ScriptedClient {
    replies: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn new(replies: &[Option<&str>]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.map(str::to_string)).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn ok(replies: &[&str]) -> Self {
        let replies: Vec<Option<&str>> = replies.iter().copied().map(Some).collect();
        Self::new(&replies)
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.prompts.lock().unwrap().push(request.prompt);

        match self.replies.lock().unwrap().pop_front() {
            Some(Some(text)) => Ok(CompletionResponse::text(text)),
            Some(None) => Err(LlmError::ApiError {
                status: 503,
                message: "scripted outage".to_string(),
            }),
            None => Err(LlmError::InvalidResponse("script exhausted".to_string())),
        }
    }
}

fn session(client: ScriptedClient) -> (Orchestrator, Arc<ScriptedClient>) {
    let client = Arc::new(client);
    let orchestrator = Orchestrator::new(client.clone(), PromptLoader::embedded_only()).unwrap();
    (orchestrator, client)
}

const GREAT_ROOM_40X50: &str =
    r#"{"action": "add_room", "room_name": "Great Room", "room_type": "living", "length_ft": 40, "width_ft": 50}"#;

/// Budget turn followed by a 2000 sq ft floorplan turn
async fn plan_of_2000_sqft(orchestrator: &mut Orchestrator, budget_message: &str) {
    orchestrator.submit(budget_message).await;
    let outcome = orchestrator.submit("Add a great room 40x50 feet").await;
    assert_eq!(outcome.total_area, 2000.0);
    assert_eq!(outcome.estimated_cost, Some(700_000.0));
}

#[tokio::test]
async fn test_add_room_updates_floorplan() {
    let (mut orch, client) = session(ScriptedClient::ok(&[
        "modify_floorplan",
        r#"{"action": "add_room", "room_name": "Master Bedroom", "room_type": "bedroom", "length_ft": 14, "width_ft": 16}"#,
    ]));

    let outcome = orch.submit("Add a master bedroom 14x16 feet").await;

    assert!(outcome.reply.starts_with("✅ **Floorplan Updated Successfully!**"));
    assert_eq!(outcome.floorplan.len(), 1);
    assert_eq!(outcome.total_area, 224.0);
    assert_eq!(outcome.estimated_cost, Some(78_400.0));
    assert_eq!(outcome.stages, vec![NodeId::Router, NodeId::FloorplanMutator]);
    assert!(client.prompts()[1].contains("Empty floorplan"));
}

#[tokio::test]
async fn test_set_budget_on_empty_floorplan() {
    let (mut orch, _client) = session(ScriptedClient::ok(&["set_budget"]));

    let outcome = orch.submit("My budget is $650,000").await;

    assert_eq!(outcome.user_budget, Some(650_000.0));
    assert_eq!(outcome.stages, vec![NodeId::Router, NodeId::BudgetHandler]);
    assert!(outcome.reply.contains("Your budget: $650,000.00"));
    assert!(outcome.reply.contains("Now let's start designing your house!"));
}

#[tokio::test]
async fn test_over_budget_goes_to_constraint_solver() {
    let (mut orch, client) = session(ScriptedClient::ok(&[
        "set_budget",
        "modify_floorplan",
        GREAT_ROOM_40X50,
        "modify_floorplan",
        "I'm not sure what to change.",
        "Shrink the great room to 30x40.",
    ]));
    plan_of_2000_sqft(&mut orch, "My budget is $500,000").await;

    let outcome = orch.submit("Make the house work").await;

    assert_eq!(
        outcome.stages,
        vec![
            NodeId::Router,
            NodeId::FloorplanMutator,
            NodeId::BudgetAnalyst,
            NodeId::ConstraintSolver
        ]
    );
    assert_eq!(outcome.reply, "Shrink the great room to 30x40.");
    let constraint_prompt = client.prompts().last().cloned().unwrap();
    assert!(constraint_prompt.contains("$700,000.00"));
    assert!(constraint_prompt.contains("$500,000.00"));
    assert!(constraint_prompt.contains("$200,000.00"));
}

#[tokio::test]
async fn test_within_budget_gets_summary() {
    let (mut orch, client) = session(ScriptedClient::ok(&[
        "set_budget",
        "modify_floorplan",
        GREAT_ROOM_40X50,
        "modify_floorplan",
        "Nothing to change.",
    ]));
    plan_of_2000_sqft(&mut orch, "My budget is $800,000").await;

    let outcome = orch.submit("Does the plan still work?").await;

    assert_eq!(
        outcome.stages,
        vec![
            NodeId::Router,
            NodeId::FloorplanMutator,
            NodeId::BudgetAnalyst,
            NodeId::ResponseGeneration
        ]
    );
    assert!(outcome.reply.contains("Status: ✅ Within budget"));
    assert!(outcome.reply.contains("Under by: $100,000.00"));
    assert_eq!(client.remaining(), 0);
}

#[tokio::test]
async fn test_question_is_answered_by_consultant() {
    let (mut orch, client) = session(ScriptedClient::ok(&[
        "modify_floorplan",
        r#"{"action": "add_room", "room_name": "Kitchen", "room_type": "kitchen", "length_ft": 12, "width_ft": 14}"#,
        "ask_question",
        "Quartz counters hold up well.",
    ]));
    orch.submit("Add a kitchen 12x14").await;

    let outcome = orch.submit("What countertop should I pick?").await;

    assert_eq!(outcome.reply, "Quartz counters hold up well.");
    assert_eq!(outcome.stages, vec![NodeId::Router, NodeId::DesignConsultant]);
    let consultant_prompt = client.prompts().last().cloned().unwrap();
    assert!(consultant_prompt.contains("What countertop should I pick?"));
    assert!(consultant_prompt.contains("Kitchen"));
}

#[tokio::test]
async fn test_three_floor_fallback_is_deterministic() {
    let malformed = r#"Here is the plan: {"action": "redesign_complete", "rooms": [ {"room_name": "#;
    let message = "Design a three floor house with 3 bedrooms";

    let mut plans = Vec::new();
    for _ in 0..2 {
        let (mut orch, _client) = session(ScriptedClient::ok(&["modify_floorplan", malformed]));
        let outcome = orch.submit(message).await;
        assert!(outcome.reply.starts_with("✅ **Floorplan Created Successfully!**"));
        assert_eq!(outcome.floorplan.len(), 9);
        plans.push(outcome.floorplan);
    }

    assert_eq!(plans[0], plans[1]);
}

#[tokio::test]
async fn test_budget_extracted_whatever_the_classification() {
    let (mut orch, _client) = session(ScriptedClient::ok(&[
        "modify_floorplan",
        r#"{"action": "add_room", "room_name": "Office", "room_type": "office", "length_ft": 10, "width_ft": 12}"#,
    ]));

    let outcome = orch.submit("Add an office 10x12, I can spend $400,000 total").await;

    assert_eq!(outcome.stages, vec![NodeId::Router, NodeId::FloorplanMutator]);
    assert_eq!(outcome.user_budget, Some(400_000.0));
    assert!(outcome.reply.contains("Your budget: $400,000.00"));
}

#[tokio::test]
async fn test_zero_budget_keeps_previous_budget() {
    let (mut orch, _client) = session(ScriptedClient::ok(&["set_budget", "set_budget"]));
    orch.submit("My budget is $650,000").await;

    let outcome = orch.submit("My budget is $0").await;

    assert_eq!(outcome.stages, vec![NodeId::Router, NodeId::BudgetHandler]);
    assert_eq!(outcome.user_budget, Some(650_000.0));
    assert!(outcome.reply.contains("Your budget: $650,000.00"));
}

#[tokio::test]
async fn test_classifier_outage_still_answers() {
    let (mut orch, _client) = session(ScriptedClient::new(&[None, Some("Try vinyl plank.")]));

    let outcome = orch.submit("Any flooring ideas?").await;

    assert_eq!(outcome.reply, "Try vinyl plank.");
    assert_eq!(outcome.stages, vec![NodeId::Router, NodeId::DesignConsultant]);
}

#[tokio::test]
async fn test_failed_turn_leaves_session_untouched() {
    let (mut orch, _client) = session(ScriptedClient::new(&[
        Some("set_budget"),
        Some("ask_question"),
        None,
    ]));
    orch.submit("My budget is $650,000").await;
    let before = orch.state().clone();

    let outcome = orch.submit("Actually $900,000 - what roof is cheapest?").await;

    assert!(outcome.reply.starts_with("❌ Error processing your request: "));
    assert!(outcome.stages.is_empty());
    assert_eq!(outcome.user_budget, Some(650_000.0));
    assert_eq!(orch.state(), &before);
}

#[tokio::test]
async fn test_outcome_serializes_for_json_output() {
    let (mut orch, _client) = session(ScriptedClient::ok(&["set_budget"]));

    let outcome = orch.submit("Budget: $750,000").await;
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["user_budget"], 750_000.0);
    assert_eq!(json["stages"][0], "router");
    assert_eq!(json["stages"][1], "budget_handler");
    assert!(json["reply"].as_str().unwrap().contains("$750,000.00"));
}
