//! Longer mutation sequences against the draft, checking the invariants
//! the presentation layer relies on

use courseforge_content::model::{Course, LessonContent, Quiz};
use courseforge_editor::{CourseDraft, Mutation, QuestionField, UndoStack};

fn draft() -> CourseDraft {
    CourseDraft::new(Course::new("algebra-101", "Algebra 101", ""))
}

fn add_section(draft: &mut CourseDraft, title: &str) -> String {
    draft
        .apply(&Mutation::AddSection {
            title: title.to_string(),
        })
        .unwrap()
        .created_id
        .unwrap()
}

fn add_quiz_lesson(draft: &mut CourseDraft, section_id: &str) -> String {
    draft
        .apply(&Mutation::AddLesson {
            section_id: section_id.to_string(),
            title: "Checkpoint".to_string(),
            content: LessonContent::Quiz {
                quiz: Quiz::new("", "Checkpoint"),
            },
        })
        .unwrap()
        .created_id
        .unwrap()
}

#[test]
fn test_question_orders_stay_contiguous_across_arbitrary_deletes() {
    let mut draft = draft();
    let section_id = add_section(&mut draft, "Intro");
    let lesson_id = add_quiz_lesson(&mut draft, &section_id);

    for _ in 0..6 {
        draft
            .apply(&Mutation::AddQuestion {
                section_id: section_id.clone(),
                lesson_id: lesson_id.clone(),
            })
            .unwrap();
    }

    // Delete from the middle, the front, and the back
    for index in [2, 0, 3] {
        draft
            .apply(&Mutation::RemoveQuestion {
                section_id: section_id.clone(),
                lesson_id: lesson_id.clone(),
                index,
            })
            .unwrap();

        let quiz = match &draft.course().sections[0].lessons[0].content {
            LessonContent::Quiz { quiz } => quiz,
            _ => unreachable!(),
        };
        let orders: Vec<usize> = quiz.questions.iter().map(|q| q.order).collect();
        let expected: Vec<usize> = (1..=quiz.questions.len()).collect();
        assert_eq!(orders, expected);
        assert_eq!(quiz.question_count, quiz.questions.len());
    }
}

#[test]
fn test_delete_to_empty_quiz_is_fine() {
    let mut draft = draft();
    let section_id = add_section(&mut draft, "Intro");
    let lesson_id = add_quiz_lesson(&mut draft, &section_id);

    draft
        .apply(&Mutation::AddQuestion {
            section_id: section_id.clone(),
            lesson_id: lesson_id.clone(),
        })
        .unwrap();
    draft
        .apply(&Mutation::RemoveQuestion {
            section_id: section_id.clone(),
            lesson_id: lesson_id.clone(),
            index: 0,
        })
        .unwrap();

    let quiz = match &draft.course().sections[0].lessons[0].content {
        LessonContent::Quiz { quiz } => quiz,
        _ => unreachable!(),
    };
    assert!(quiz.questions.is_empty());
    assert_eq!(quiz.question_count, 0);
}

#[test]
fn test_option_edits_replace_the_whole_array() {
    let mut draft = draft();
    let section_id = add_section(&mut draft, "Intro");
    let lesson_id = add_quiz_lesson(&mut draft, &section_id);
    draft
        .apply(&Mutation::AddQuestion {
            section_id: section_id.clone(),
            lesson_id: lesson_id.clone(),
        })
        .unwrap();

    let options = [
        "3".to_string(),
        "4".to_string(),
        "5".to_string(),
        "6".to_string(),
    ];
    draft
        .apply(&Mutation::UpdateQuestion {
            section_id: section_id.clone(),
            lesson_id: lesson_id.clone(),
            index: 0,
            field: QuestionField::Options(options.clone()),
        })
        .unwrap();
    draft
        .apply(&Mutation::UpdateQuestion {
            section_id,
            lesson_id,
            index: 0,
            field: QuestionField::CorrectAnswer(1),
        })
        .unwrap();

    let quiz = match &draft.course().sections[0].lessons[0].content {
        LessonContent::Quiz { quiz } => quiz,
        _ => unreachable!(),
    };
    assert_eq!(quiz.questions[0].options, options);
    assert_eq!(quiz.questions[0].correct_answer, 1);
}

#[test]
fn test_interleaved_reorder_and_delete_address_by_identity() {
    let mut draft = draft();
    let s1 = add_section(&mut draft, "Intro");
    let s2 = add_section(&mut draft, "Basics");
    let s3 = add_section(&mut draft, "Advanced");

    // Move s3 to the front, then delete s1 by identity; the delete must
    // not be confused by the shifted positions
    draft
        .apply(&Mutation::MoveSection {
            section_id: s3.clone(),
            index: 0,
        })
        .unwrap();
    draft
        .apply(&Mutation::RemoveSection {
            section_id: s1.clone(),
        })
        .unwrap();

    let order: Vec<&str> = draft
        .course()
        .sections
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(order, vec![s3.as_str(), s2.as_str()]);
}

#[test]
fn test_every_mutation_kind_round_trips_through_undo() {
    let mut draft = draft();
    let mut stack = UndoStack::new();

    let mutations: Vec<Box<dyn Fn(&CourseDraft) -> Mutation>> = vec![
        Box::new(|_| Mutation::AddSection {
            title: "Intro".to_string(),
        }),
        Box::new(|d| Mutation::RenameSection {
            section_id: d.course().sections[0].id.clone(),
            title: "Renamed".to_string(),
        }),
        Box::new(|d| Mutation::AddLesson {
            section_id: d.course().sections[0].id.clone(),
            title: "Checkpoint".to_string(),
            content: LessonContent::Quiz {
                quiz: Quiz::new("", "Checkpoint"),
            },
        }),
        Box::new(|d| Mutation::AddQuestion {
            section_id: d.course().sections[0].id.clone(),
            lesson_id: d.course().sections[0].lessons[0].id.clone(),
        }),
        Box::new(|d| Mutation::UpdateQuestion {
            section_id: d.course().sections[0].id.clone(),
            lesson_id: d.course().sections[0].lessons[0].id.clone(),
            index: 0,
            field: QuestionField::Text("2 + 2?".to_string()),
        }),
        Box::new(|d| Mutation::RemoveQuestion {
            section_id: d.course().sections[0].id.clone(),
            lesson_id: d.course().sections[0].lessons[0].id.clone(),
            index: 0,
        }),
        Box::new(|d| Mutation::RemoveLesson {
            section_id: d.course().sections[0].id.clone(),
            lesson_id: d.course().sections[0].lessons[0].id.clone(),
        }),
        Box::new(|d| Mutation::RemoveSection {
            section_id: d.course().sections[0].id.clone(),
        }),
    ];

    let mut snapshots = vec![draft.course().clone()];
    for build in &mutations {
        let mutation = build(&draft);
        stack.apply(&mutation, &mut draft).unwrap();
        snapshots.push(draft.course().clone());
    }

    // Unwind the whole history, checking each intermediate state
    for snapshot in snapshots.iter().rev().skip(1) {
        assert!(stack.undo(&mut draft).unwrap());
        assert_eq!(draft.course(), snapshot);
    }
    assert!(!stack.can_undo());

    // Replay it all forward again
    for snapshot in snapshots.iter().skip(1) {
        assert!(stack.redo(&mut draft).unwrap());
        assert_eq!(draft.course(), snapshot);
    }
    assert!(!stack.can_redo());
}
