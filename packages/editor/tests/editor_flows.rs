//! End-to-end editing flows through the session layer

use courseforge_content::model::Course;
use courseforge_editor::{
    DragEnd, EditSession, EditorError, FormError, LessonContent, LessonFormData, SectionFormData,
};

fn instructor_session() -> EditSession {
    EditSession::new(
        "session-1",
        Course::new("algebra-101", "Algebra 101", "Linear equations and beyond"),
        true,
    )
}

fn add_section(session: &mut EditSession, title: &str) -> String {
    session.open_section_form(None).unwrap();
    session
        .submit_section_form(SectionFormData::new(title))
        .unwrap()
        .created_id
        .unwrap()
}

fn add_lesson(session: &mut EditSession, section_id: &str, form: LessonFormData) -> String {
    session.open_lesson_form(section_id, None).unwrap();
    session
        .submit_lesson_form(form)
        .unwrap()
        .created_id
        .unwrap()
}

#[test]
fn test_author_reorder_delete_scenario() {
    let mut session = instructor_session();

    // Create section "Intro"
    let section_id = add_section(&mut session, "Intro");

    // Add document lesson "L1"
    let l1 = add_lesson(
        &mut session,
        &section_id,
        LessonFormData::Document {
            title: "L1".to_string(),
            url: "https://cdn.example.com/l1.pdf".to_string(),
        },
    );

    // Add video lesson "L2" with duration 300
    let l2 = add_lesson(
        &mut session,
        &section_id,
        LessonFormData::Video {
            title: "L2".to_string(),
            url: "https://cdn.example.com/l2.mp4".to_string(),
            duration: 300,
        },
    );

    // Reorder so L2 precedes L1
    let moved = session
        .handle_lesson_drag(&section_id, &DragEnd::new(l2.clone(), Some(&l1)))
        .unwrap();
    assert!(moved.is_some());

    let section = session.course().find_section(&section_id).unwrap();
    assert_eq!(section.lessons[0].id, l2);
    assert_eq!(section.lessons[1].id, l1);

    // Delete L1 with confirmation
    session.request_delete_lesson(&section_id, &l1).unwrap();
    session.confirm_delete().unwrap();

    let section = session.course().find_section(&section_id).unwrap();
    let remaining: Vec<&str> = section.lessons.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(remaining, vec![l2.as_str()]);
    assert_eq!(section.lesson_count(), 1);
    assert_eq!(section.total_duration(), 300);
}

#[test]
fn test_add_then_confirmed_delete_restores_original_list() {
    let mut session = instructor_session();
    add_section(&mut session, "Intro");
    let before: Vec<String> = session
        .course()
        .sections
        .iter()
        .map(|s| s.id.clone())
        .collect();

    let added = add_section(&mut session, "Scratch");
    session.request_delete_section(&added).unwrap();
    session.confirm_delete().unwrap();

    let after: Vec<String> = session
        .course()
        .sections
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(after, before);
}

#[test]
fn test_section_drag_reorders_without_touching_lessons() {
    let mut session = instructor_session();
    let s1 = add_section(&mut session, "Intro");
    let s2 = add_section(&mut session, "Basics");
    let s3 = add_section(&mut session, "Advanced");

    add_lesson(
        &mut session,
        &s2,
        LessonFormData::Video {
            title: "Watch".to_string(),
            url: "https://cdn.example.com/v.mp4".to_string(),
            duration: 120,
        },
    );
    let s2_lessons = session.course().find_section(&s2).unwrap().lessons.clone();

    session
        .handle_section_drag(&DragEnd::new(s3.clone(), Some(&s1)))
        .unwrap();

    let order: Vec<&str> = session
        .course()
        .sections
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(order, vec![s3.as_str(), s1.as_str(), s2.as_str()]);

    // Internal lesson lists survive the permutation untouched
    assert_eq!(session.course().find_section(&s2).unwrap().lessons, s2_lessons);
}

#[test]
fn test_drag_noops_do_not_bump_version() {
    let mut session = instructor_session();
    let s1 = add_section(&mut session, "Intro");
    add_section(&mut session, "Basics");
    let version = session.version();

    let dropped_nowhere = session
        .handle_section_drag(&DragEnd::new(s1.clone(), None))
        .unwrap();
    let dropped_on_self = session
        .handle_section_drag(&DragEnd::new(s1.clone(), Some(&s1)))
        .unwrap();

    assert!(dropped_nowhere.is_none());
    assert!(dropped_on_self.is_none());
    assert_eq!(session.version(), version);
}

#[test]
fn test_empty_lesson_title_raises_exactly_one_alert() {
    let mut session = instructor_session();
    let section_id = add_section(&mut session, "Intro");

    session.open_lesson_form(&section_id, None).unwrap();
    let result = session.submit_lesson_form(LessonFormData::Document {
        title: "  ".to_string(),
        url: "https://cdn.example.com/doc.pdf".to_string(),
    });

    match result {
        Err(EditorError::Validation(FormError::EmptyTitle)) => {}
        other => panic!("expected a single empty-title alert, got {:?}", other.err()),
    }
    let section = session.course().find_section(&section_id).unwrap();
    assert_eq!(section.lesson_count(), 0);
}

#[test]
fn test_editing_quiz_lesson_title_preserves_questions() {
    let mut session = instructor_session();
    let section_id = add_section(&mut session, "Intro");
    let lesson_id = add_lesson(
        &mut session,
        &section_id,
        LessonFormData::Quiz {
            title: "Checkpoint".to_string(),
        },
    );

    session.add_question(&section_id, &lesson_id).unwrap();
    session.add_question(&section_id, &lesson_id).unwrap();

    session
        .open_lesson_form(&section_id, Some(&lesson_id))
        .unwrap();
    session
        .submit_lesson_form(LessonFormData::Quiz {
            title: "Final checkpoint".to_string(),
        })
        .unwrap();

    let lesson = session
        .course()
        .find_section(&section_id)
        .unwrap()
        .find_lesson(&lesson_id)
        .unwrap();
    assert_eq!(lesson.title, "Final checkpoint");
    match &lesson.content {
        LessonContent::Quiz { quiz } => assert_eq!(quiz.question_count, 2),
        other => panic!("expected quiz content, got {}", other.kind()),
    }
}

#[test]
fn test_changing_lesson_type_discards_previous_payload() {
    let mut session = instructor_session();
    let section_id = add_section(&mut session, "Intro");
    let lesson_id = add_lesson(
        &mut session,
        &section_id,
        LessonFormData::Video {
            title: "Watch".to_string(),
            url: "https://cdn.example.com/v.mp4".to_string(),
            duration: 600,
        },
    );

    session
        .open_lesson_form(&section_id, Some(&lesson_id))
        .unwrap();
    session
        .submit_lesson_form(LessonFormData::Document {
            title: "Read instead".to_string(),
            url: "https://cdn.example.com/notes.pdf".to_string(),
        })
        .unwrap();

    let section = session.course().find_section(&section_id).unwrap();
    let lesson = section.find_lesson(&lesson_id).unwrap();
    assert_eq!(lesson.content.kind(), "document");
    assert_eq!(section.total_duration(), 0);
}

#[test]
fn test_course_info_update_validates_and_round_trips() {
    let mut session = instructor_session();

    let result = session.update_course_info("   ", "whatever");
    assert!(result.is_err());
    assert_eq!(session.course().title, "Algebra 101");

    session
        .update_course_info("Algebra 102", "Quadratics")
        .unwrap();
    assert_eq!(session.course().title, "Algebra 102");
    assert_eq!(session.course().description, "Quadratics");

    session.undo().unwrap();
    assert_eq!(session.course().title, "Algebra 101");
    assert_eq!(session.course().description, "Linear equations and beyond");
}

#[test]
fn test_undo_redo_through_the_session() {
    let mut session = instructor_session();
    let section_id = add_section(&mut session, "Intro");
    add_lesson(
        &mut session,
        &section_id,
        LessonFormData::Document {
            title: "L1".to_string(),
            url: "https://cdn.example.com/l1.pdf".to_string(),
        },
    );

    assert!(session.undo().unwrap());
    assert_eq!(
        session.course().find_section(&section_id).unwrap().lesson_count(),
        0
    );

    assert!(session.redo().unwrap());
    let section = session.course().find_section(&section_id).unwrap();
    assert_eq!(section.lesson_count(), 1);
    assert_eq!(section.lessons[0].title, "L1");
}
