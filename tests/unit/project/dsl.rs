use super::*;
use crate::schema::validate::DiagnosticKind;

#[test]
fn builders_create_expected_structure() {
    let project = ProjectBuilder::new("p", "Demo")
        .variable(variable("clicks", VariableType::Number, 0))
        .slide(
            SlideBuilder::new("s1")
                .title("Intro")
                .layer(
                    LayerBuilder::new("l1")
                        .object(
                            ObjectBuilder::button("b1", "Next")
                                .trigger(
                                    TriggerBuilder::on_click("t1")
                                        .add_to("clicks", 1)
                                        .navigate("s2")
                                        .build(),
                                )
                                .build(),
                        )
                        .build(),
                )
                .build(),
        )
        .slide(SlideBuilder::new("s2").build())
        .build()
        .unwrap();

    assert_eq!(project.slides.len(), 2);
    assert_eq!(project.slides[0].title, "Intro");
    assert_eq!(project.slides[1].title, "s2");
    let trigger = &project.slides[0].layers[0].objects[0].triggers[0];
    assert_eq!(trigger.trigger_type, TriggerType::OnClick);
    assert_eq!(trigger.actions.len(), 2);
    assert!(matches!(
        &trigger.actions[0],
        Action::SetVariable(SetVariableAction { operation: SetOperation::Add, .. })
    ));
}

#[test]
fn build_rejects_invalid_projects() {
    let err = ProjectBuilder::new("p", "Demo")
        .slide(SlideBuilder::new("s1").build())
        .slide(SlideBuilder::new("s1").build())
        .build()
        .unwrap_err();
    let kinds: Vec<_> = err.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiagnosticKind::DuplicateSlideId]);
}

#[test]
fn build_unchecked_keeps_broken_graphs() {
    let project = ProjectBuilder::new("p", "")
        .slide(
            SlideBuilder::new("s1")
                .layer(
                    LayerBuilder::new("l1")
                        .object(
                            ObjectBuilder::text("t", "x")
                                .trigger(TriggerBuilder::on_timeline_start("empty").build())
                                .build(),
                        )
                        .build(),
                )
                .build(),
        )
        .build_unchecked();
    assert!(project.name.is_empty());
    assert!(project.slides[0].layers[0].objects[0].triggers[0].actions.is_empty());
}

#[test]
fn toggle_carries_no_operand() {
    let trigger = TriggerBuilder::on_click("t").toggle("flag").build();
    assert_eq!(
        trigger.actions,
        vec![Action::SetVariable(SetVariableAction {
            variable_id: "flag".to_owned(),
            operation: SetOperation::Toggle,
            value: None,
        })]
    );
}
