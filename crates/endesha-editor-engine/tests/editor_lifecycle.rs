use endesha_editor_engine::{
    AnswerSession, BlockKey, BlockKind, EditOp, EditorError, EditorMode, Entity, InlineStyle,
    Permission, PermissionSet, ProjectorConfig, SaveRequest, Verb, decode,
    permissions::ANSWERS_PATH,
};
use pretty_assertions::assert_eq;

fn block_key(session: &AnswerSession, index: usize) -> BlockKey {
    session.editor().document().blocks()[index].key().clone()
}

fn edit(session: &mut AnswerSession, op: EditOp) {
    session.editor_mut().on_edit(op).unwrap();
}

/// Writes a short answer the way an author would: type, split into
/// blocks, format, link.
fn author_answer(session: &mut AnswerSession) {
    let first = block_key(session, 0);
    edit(
        session,
        EditOp::InsertText {
            block: first.clone(),
            offset: 0,
            text: "Overtaking".to_string(),
        },
    );
    edit(
        session,
        EditOp::SetBlockKind {
            block: first.clone(),
            kind: BlockKind::Header(2),
        },
    );
    edit(
        session,
        EditOp::SplitBlock {
            block: first,
            offset: 10,
        },
    );

    let body = block_key(session, 1);
    edit(
        session,
        EditOp::SetBlockKind {
            block: body.clone(),
            kind: BlockKind::Unstyled,
        },
    );
    edit(
        session,
        EditOp::InsertText {
            block: body.clone(),
            offset: 0,
            text: "Never overtake near a junction.".to_string(),
        },
    );
    edit(
        session,
        EditOp::ToggleStyle {
            block: body.clone(),
            range: 0..5,
            style: InlineStyle::Bold,
        },
    );
    edit(
        session,
        EditOp::ApplyEntity {
            block: body,
            range: 22..30,
            entity: Entity::link("https://endesha.example/junctions"),
        },
    );
}

#[test]
fn authoring_updates_markdown() {
    let mut session = AnswerSession::new(ProjectorConfig::default());
    author_answer(&mut session);

    insta::assert_snapshot!(session.editor().markdown(), @r"
## Overtaking
**Never** overtake near a [junction](https://endesha.example/junctions).
");
}

#[test]
fn create_then_edit_round_trip() {
    let permissions: PermissionSet = [
        Permission::new(ANSWERS_PATH, Verb::Get),
        Permission::new(ANSWERS_PATH, Verb::Post),
        Permission::new(ANSWERS_PATH, Verb::Patch),
    ]
    .into_iter()
    .collect();

    let mut session = AnswerSession::new(ProjectorConfig::default());
    session.set_short_description("Overtaking rules");
    author_answer(&mut session);

    let SaveRequest::Create(mut stored) = session.submit(&permissions).unwrap() else {
        panic!("a new answer is created");
    };
    stored.id = Some("31".to_string());

    let mut reopened = AnswerSession::from_record(&stored, ProjectorConfig::default());
    assert_eq!(reopened.editor().document(), session.editor().document());
    assert_eq!(reopened.editor().markdown(), stored.answer_md);

    // plain mode keeps the structured content as it was
    reopened.editor_mut().switch_to_plain();
    reopened
        .editor_mut()
        .on_plain_text_change("## Overtaking\nOnly on open road.")
        .unwrap();
    assert_eq!(
        reopened.editor_mut().switch_to_rich(),
        Err(EditorError::RichFromPlain)
    );

    let SaveRequest::Update(updated) = reopened.submit(&permissions).unwrap() else {
        panic!("an existing answer is updated");
    };
    assert_eq!(updated.id.as_deref(), Some("31"));
    assert_eq!(updated.answer_md, "## Overtaking\nOnly on open road.");
    assert_eq!(
        decode(&updated.answer).unwrap(),
        *session.editor().document()
    );
}

#[test]
fn plain_authored_answer_reopens_in_plain_mode() {
    let mut session = AnswerSession::new(ProjectorConfig::default());
    session.set_short_description("Hazard lights");
    session.editor_mut().switch_to_plain();
    session
        .editor_mut()
        .on_plain_text_change("Use hazard lights when stopped.")
        .unwrap();

    let permissions: PermissionSet = [Permission::new(ANSWERS_PATH, Verb::Post)]
        .into_iter()
        .collect();
    let request = session.submit(&permissions).unwrap();

    let reopened = AnswerSession::from_record(request.record(), ProjectorConfig::default());
    assert_eq!(reopened.editor().mode(), EditorMode::Plain);
    assert_eq!(
        reopened.editor().markdown(),
        "Use hazard lights when stopped."
    );
}
