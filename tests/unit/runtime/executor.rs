use super::*;
use crate::project::dsl::{LayerBuilder, ProjectBuilder, SlideBuilder, TriggerBuilder, variable};
use crate::project::model::VariableType;

fn project() -> Project {
    ProjectBuilder::new("p", "P")
        .variable(variable("score", VariableType::Number, 0))
        .variable(variable("done", VariableType::Boolean, false))
        .slide(
            SlideBuilder::new("s1")
                .layer(LayerBuilder::new("l1").hidden().build())
                .build(),
        )
        .slide(SlideBuilder::new("s2").build())
        .build_unchecked()
}

type Outcome = (Vec<Result<Effect, RuntimeFault>>, VariableStore, LayerState);

fn run(project: &Project, trigger: TriggerBuilder) -> Outcome {
    let trigger = trigger.build();
    let mut variables = VariableStore::seed(project);
    let mut layers = LayerState::default();
    layers.reset_for(&project.slides[0]);
    let mut exec = ActionExecutor {
        project,
        variables: &mut variables,
        layers: &mut layers,
    };
    let effects = trigger
        .actions
        .iter()
        .map(|a| exec.execute(&trigger.id, a))
        .collect();
    (effects, variables, layers)
}

#[test]
fn set_variable_reports_old_and_new() {
    let p = project();
    let trigger = TriggerBuilder::on_click("t").add_to("score", 10).toggle("done");
    let (effects, vars, _) = run(&p, trigger);
    assert_eq!(
        effects,
        vec![
            Ok(Effect::VariableChanged {
                id: "score".to_owned(),
                old: Some(Value::I32(0)),
                new: Value::I32(10),
            }),
            Ok(Effect::VariableChanged {
                id: "done".to_owned(),
                old: Some(Value::Bool(false)),
                new: Value::Bool(true),
            }),
        ]
    );
    assert_eq!(vars.get("score"), Some(&Value::I32(10)));
}

#[test]
fn writing_the_same_value_is_unchanged() {
    let p = project();
    let (effects, _, _) = run(&p, TriggerBuilder::on_click("t").set_variable("score", 0));
    assert_eq!(effects, vec![Ok(Effect::Unchanged)]);
}

#[test]
fn layer_actions_report_flips_only() {
    let p = project();
    let (effects, _, layers) = run(
        &p,
        TriggerBuilder::on_click("t").show_layer("l1").show_layer("l1").hide_layer("l1"),
    );
    assert_eq!(
        effects,
        vec![
            Ok(Effect::LayerChanged {
                id: "l1".to_owned(),
                visible: true,
            }),
            Ok(Effect::Unchanged),
            Ok(Effect::LayerChanged {
                id: "l1".to_owned(),
                visible: false,
            }),
        ]
    );
    assert_eq!(layers.is_visible("l1"), Some(false));
}

#[test]
fn navigation_resolves_slide_index() {
    let p = project();
    let (effects, _, _) = run(&p, TriggerBuilder::on_click("t").navigate("s2"));
    assert_eq!(effects, vec![Ok(Effect::Navigate(1))]);
}

#[test]
fn dangling_targets_become_faults() {
    let p = project();
    let (effects, vars, _) = run(
        &p,
        TriggerBuilder::on_click("t")
            .navigate("nowhere")
            .set_variable("ghost", 1)
            .show_layer("phantom")
            .add_to("score", 1),
    );
    let fault = |kind, id: &str| {
        Err(RuntimeFault::DanglingReference {
            trigger_id: "t".to_owned(),
            kind,
            id: id.to_owned(),
        })
    };
    assert_eq!(effects[0], fault(ReferenceKind::Slide, "nowhere"));
    assert_eq!(effects[1], fault(ReferenceKind::Variable, "ghost"));
    assert_eq!(effects[2], fault(ReferenceKind::Layer, "phantom"));
    assert!(effects[3].is_ok());
    assert_eq!(vars.get("score"), Some(&Value::I32(1)));
    assert!(!vars.contains("ghost"));
}

#[test]
fn type_mismatch_leaves_variable_untouched() {
    let p = project();
    let (effects, vars, _) = run(&p, TriggerBuilder::on_click("t").toggle("score"));
    assert_eq!(
        effects,
        vec![Err(RuntimeFault::TypeMismatch {
            trigger_id: "t".to_owned(),
            variable_id: "score".to_owned(),
            detail: "cannot toggle a number value".to_owned(),
        })]
    );
    assert_eq!(vars.get("score"), Some(&Value::I32(0)));
}

#[test]
fn faults_display_and_serialize() {
    let fault = RuntimeFault::DanglingReference {
        trigger_id: "t".to_owned(),
        kind: ReferenceKind::Layer,
        id: "x".to_owned(),
    };
    assert_eq!(fault.to_string(), "trigger 't': layer 'x' does not resolve");
    let json = serde_json::to_value(&fault).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "fault": "danglingReference",
            "triggerId": "t",
            "kind": "layer",
            "id": "x",
        })
    );
}
