use agent_flow::testing::ScriptedModel;
use agent_flow::{FlowError, MessageRole, ModelResponse, ToolCall};
use medical_agents::{Pipeline, PipelineConfig};
use serde_json::json;
use std::sync::Arc;

fn pipeline(model: &Arc<ScriptedModel>) -> Pipeline {
    Pipeline::new(model.clone(), PipelineConfig::default())
}

/// Content of the tool-result message answering `call_id`
fn tool_result(model: &ScriptedModel, call_id: &str) -> String {
    model
        .requests()
        .into_iter()
        .flat_map(|request| request.messages)
        .find(|message| {
            message.role == MessageRole::Tool && message.tool_call_id.as_deref() == Some(call_id)
        })
        .map(|message| message.content)
        .unwrap_or_default()
}

#[tokio::test]
async fn intake_fetches_record_by_id() {
    let model = Arc::new(
        ScriptedModel::new()
            .then_call("rec-1", "get_patient_record", json!({"patient_id": "P-1001"}))
            .then_text("Maria Garcia, 62F with T2DM, HTN, HLD")
            .then_text("Suboptimal glycemic control")
            .then_text("Intensify diabetes therapy"),
    );

    let report = pipeline(&model).run("P-1001").await.unwrap();

    let record = tool_result(&model, "rec-1");
    assert!(record.contains("Maria Garcia"));
    assert!(record.contains("metformin 1000mg BID"));
    assert_eq!(report.patient_history, record);
    assert_eq!(report.intake_summary, "Maria Garcia, 62F with T2DM, HTN, HLD");

    // Diagnosis sees the fetched record alongside the summary
    let requests = model.requests();
    let diagnosis_request = &requests[2];
    assert!(diagnosis_request.messages[1].content.contains("PATIENT HISTORY:\nPatient: Maria Garcia"));
}

#[tokio::test]
async fn major_interaction_reaches_the_report_and_care_plan() {
    let model = Arc::new(
        ScriptedModel::new()
            .then_call("rec-1", "get_patient_record", json!({"patient_id": "P-1004"}))
            .then_text("Robert Williams, 71M, AF on warfarin")
            .then_respond(ModelResponse::with_tool_calls(
                "",
                vec![ToolCall::new(
                    "ddi-1",
                    "check_drug_interactions",
                    json!({"drug_names": ["warfarin", "aspirin"]}),
                )],
            ))
            .then_text("Bleeding risk from dual antithrombotic therapy")
            .then_text("Reassess aspirin indication"),
    );

    let report = pipeline(&model).run("P-1004").await.unwrap();

    assert!(report.drug_interactions.contains("⚠ Major Interaction: Warfarin + Aspirin"));
    assert!(report.drug_interactions.contains("Increased risk of bleeding."));
    assert!(report.search_results.is_empty());

    let care_plan_request = model.requests().pop().unwrap();
    assert!(care_plan_request.tool_names.is_empty());
    assert!(care_plan_request.messages[1].content.contains("DRUG INTERACTION ALERTS:\n⚠ Major"));
}

#[tokio::test]
async fn unknown_patient_is_reported_in_band() {
    let model = Arc::new(
        ScriptedModel::new()
            .then_call("rec-1", "get_patient_record", json!({"patient_id": "P-9999"}))
            .then_text("No record found for P-9999")
            .then_text("Insufficient data")
            .then_text("Collect history"),
    );

    let report = pipeline(&model).run("P-9999").await.unwrap();

    assert_eq!(
        tool_result(&model, "rec-1"),
        "Patient 'P-9999' not found. Available IDs: P-1001, P-1002, P-1003, P-1004"
    );
    assert_eq!(report.log.len(), 3);
}

#[tokio::test]
async fn log_has_one_entry_per_stage_in_order() {
    let model = Arc::new(
        ScriptedModel::new()
            .then_text("Free-text intake")
            .then_text("Assessment")
            .then_text("Plan"),
    );

    let report = pipeline(&model).run("45 year old with headache").await.unwrap();

    assert_eq!(report.input, "45 year old with headache");
    assert_eq!(
        report.log,
        vec![
            "[Intake Agent] Completed intake processing.",
            "[Diagnosis Agent] Completed diagnostic assessment.",
            "[Care Plan Agent] Completed care plan generation.",
        ]
    );
}

#[tokio::test]
async fn runaway_intake_is_capped_and_pipeline_continues() {
    let mut script = ScriptedModel::new();
    for i in 0..6 {
        script = script.then_call(
            format!("search-{i}"),
            "search_patient_records",
            json!({"query": "Hypertension"}),
        );
    }
    let model = Arc::new(
        script
            .then_text("Assessment without intake")
            .then_text("Plan"),
    );

    let report = pipeline(&model).run("hypertension").await.unwrap();

    assert_eq!(model.call_count(), 8);
    assert_eq!(report.intake_summary, "Intake could not be completed.");
    assert_eq!(report.diagnosis, "Assessment without intake");
}

#[tokio::test]
async fn configured_caps_are_honoured() {
    let model = Arc::new(
        ScriptedModel::new()
            .then_text("Intake")
            .then_call("c0", "lookup_drug_info", json!({"drug_name": "warfarin"}))
            .then_call("c1", "lookup_drug_info", json!({"drug_name": "aspirin"}))
            .then_text("Plan"),
    );
    let config = PipelineConfig {
        intake_max_iterations: 1,
        diagnosis_max_iterations: 2,
    };

    let report = Pipeline::new(model.clone(), config).run("P-1004").await.unwrap();

    assert_eq!(model.call_count(), 4);
    assert_eq!(report.diagnosis, "Diagnosis reasoning could not be completed.");
    assert_eq!(report.care_plan, "Plan");
}

#[tokio::test]
async fn model_failure_aborts_run() {
    let model = Arc::new(
        ScriptedModel::new()
            .then_text("Intake")
            .then_fail("503 Service Unavailable"),
    );

    let result = pipeline(&model).run("P-1002").await;

    assert_eq!(
        result,
        Err(FlowError::ModelUnavailable("503 Service Unavailable".to_string()))
    );
    assert_eq!(model.remaining(), 0);
}

#[tokio::test]
async fn tool_outside_the_stage_set_aborts_run() {
    let model = Arc::new(
        ScriptedModel::new()
            .then_call("c1", "lookup_drug_info", json!({"drug_name": "warfarin"}))
            .then_text("unreachable"),
    );

    let result = pipeline(&model).run("P-1004").await;

    assert_eq!(result, Err(FlowError::UnknownTool("lookup_drug_info".to_string())));
    assert_eq!(model.call_count(), 1);
}
