use nursy_quiz::services::import_service::{QuestionImporter, RejectionReason};
use nursy_quiz::services::quiz_engine::QuizEngine;
use nursy_quiz::Quiz;
use std::collections::HashSet;

const PASTE: &str = "\
Which vein is preferred for venipuncture?|Median cubital|Femoral|Jugular|Saphenous|0
Normal adult respiratory rate?|4-8|12-20|25-30|35-40|1

Question only|A|B
Insulin type with fastest onset?|NPH|Glargine|Lispro|Detemir|2
Bad key|a|b|c|d|9
";

#[test]
fn paste_is_split_into_accepted_and_rejected_lines() {
    let report = QuestionImporter::default().parse(PASTE);

    let texts: Vec<_> = report.accepted.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Which vein is preferred for venipuncture?",
            "Normal adult respiratory rate?",
            "Insulin type with fastest onset?",
        ]
    );

    let rejected: Vec<_> = report
        .rejected
        .iter()
        .map(|r| (r.line_number, r.reason.clone()))
        .collect();
    assert_eq!(
        rejected,
        [
            (4, RejectionReason::TooFewFields { found: 3 }),
            (6, RejectionReason::CorrectIndexOutOfRange { value: "9".into() }),
        ]
    );
}

#[test]
fn import_appends_after_existing_questions() {
    let importer = QuestionImporter::default();
    let mut quiz = Quiz::new("quiz-9", "Clinical skills");
    importer.import_into(&mut quiz, "Existing?|a|b|c|d|3");

    let report = importer.import_into(&mut quiz, PASTE);
    assert_eq!(report.summary().accepted, 3);
    assert_eq!(quiz.len(), 4);
    assert_eq!(quiz.questions[0].text, "Existing?");
    assert_eq!(quiz.questions[3].text, "Insulin type with fastest onset?");
}

#[test]
fn repeated_import_duplicates_content_with_fresh_ids() {
    let importer = QuestionImporter::default();
    let mut quiz = Quiz::new("quiz-9", "Clinical skills");
    importer.import_into(&mut quiz, PASTE);
    importer.import_into(&mut quiz, PASTE);

    assert_eq!(quiz.len(), 6);
    assert_eq!(quiz.questions[0].text, quiz.questions[3].text);
    assert_eq!(quiz.questions[0].options, quiz.questions[3].options);

    let ids: HashSet<_> = quiz.questions.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), 6);
}

#[test]
fn imported_quiz_is_playable() {
    let mut quiz = Quiz::new("quiz-9", "Clinical skills");
    QuestionImporter::default().import_into(&mut quiz, PASTE);

    let engine = QuizEngine::default();
    let mut session = engine.start(&quiz).expect("imported questions are valid");
    engine.select(&mut session, 0, 0).unwrap();
    engine.select(&mut session, 1, 1).unwrap();
    engine.select(&mut session, 2, 0).unwrap();

    let result = engine.submit(&mut session).unwrap();
    assert_eq!(result.score, 67);
    assert!(result.passed);
}

#[test]
fn report_serializes_for_author_feedback() {
    let report = QuestionImporter::default().parse("Question only|A|B");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["accepted"], serde_json::json!([]));
    assert_eq!(json["rejected"][0]["line_number"], 1);
    assert_eq!(json["rejected"][0]["reason"]["kind"], "too_few_fields");
}
