use crate::config::Config;
use crate::models::question::{Question, OPTION_COUNT};
use crate::models::quiz::Quiz;
use serde::Serialize;
use std::num::IntErrorKind;

const FIELD_DELIMITER: char = '|';
/// question text, four options, correct index
const REQUIRED_FIELDS: usize = OPTION_COUNT + 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexPolicy {
    /// A correct-index field that is not a number becomes 0.
    #[default]
    Lenient,
    /// A correct-index field that is not a number rejects the line.
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportPolicy {
    pub invalid_index: IndexPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    #[error("expected at least {min} '|'-separated fields, found {found}", min = REQUIRED_FIELDS)]
    TooFewFields { found: usize },
    #[error("question text is empty")]
    EmptyQuestionText,
    #[error("correct index '{value}' is not a number")]
    UnparsableCorrectIndex { value: String },
    #[error("correct index {value} is outside 0..={max}", max = OPTION_COUNT - 1)]
    CorrectIndexOutOfRange { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedLine {
    /// 1-based line number in the pasted text, blank lines included.
    pub line_number: usize,
    pub content: String,
    pub reason: RejectionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub accepted: Vec<Question>,
    pub rejected: Vec<RejectedLine>,
}

impl ImportReport {
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            accepted: self.accepted.len(),
            rejected: self.rejected.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Turns pasted `text|A|B|C|D|index` lines into questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionImporter {
    policy: ImportPolicy,
}

impl QuestionImporter {
    pub fn new(policy: ImportPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &Config) -> Self {
        let invalid_index = if config.import_strict_index {
            IndexPolicy::Strict
        } else {
            IndexPolicy::Lenient
        };
        Self::new(ImportPolicy { invalid_index })
    }

    pub fn parse(&self, text: &str) -> ImportReport {
        let mut report = ImportReport::default();

        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match self.parse_line(line) {
                Ok(question) => report.accepted.push(question),
                Err(reason) => {
                    tracing::warn!(line = idx + 1, %reason, "Rejected bulk import line");
                    report.rejected.push(RejectedLine {
                        line_number: idx + 1,
                        content: line.to_string(),
                        reason,
                    });
                }
            }
        }

        let summary = report.summary();
        tracing::info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            "Parsed bulk question import"
        );
        report
    }

    /// Parses `text` and appends the accepted questions to `quiz` in input
    /// order. Existing questions are left alone and nothing is deduplicated.
    pub fn import_into(&self, quiz: &mut Quiz, text: &str) -> ImportReport {
        let report = self.parse(text);
        let added = quiz.append_questions(report.accepted.iter().cloned());
        tracing::info!(quiz_id = %quiz.id, added, total = quiz.len(), "Imported questions into quiz");
        report
    }

    fn parse_line(&self, line: &str) -> Result<Question, RejectionReason> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();

        // Anything past the index field is ignored.
        if fields.len() < REQUIRED_FIELDS {
            return Err(RejectionReason::TooFewFields {
                found: fields.len(),
            });
        }

        let text = fields[0];
        if text.is_empty() {
            return Err(RejectionReason::EmptyQuestionText);
        }

        let index_field = fields[OPTION_COUNT + 1];
        let out_of_range = || RejectionReason::CorrectIndexOutOfRange {
            value: index_field.to_string(),
        };
        let index = match index_field.parse::<i64>() {
            Ok(n) => n,
            // A number too wide for i64 is still a number, just not a valid key.
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                return Err(out_of_range())
            }
            Err(_) => match self.policy.invalid_index {
                IndexPolicy::Lenient => 0,
                IndexPolicy::Strict => {
                    return Err(RejectionReason::UnparsableCorrectIndex {
                        value: index_field.to_string(),
                    })
                }
            },
        };

        let correct = usize::try_from(index)
            .ok()
            .filter(|&i| i < OPTION_COUNT)
            .ok_or_else(out_of_range)?;

        let options = fields[1..=OPTION_COUNT]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Ok(Question::new(text, options, correct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn strict() -> QuestionImporter {
        QuestionImporter::new(ImportPolicy {
            invalid_index: IndexPolicy::Strict,
        })
    }

    #[test]
    fn parses_a_well_formed_line() {
        let report = QuestionImporter::default().parse("What is X?|A|B|C|D|2");
        assert!(report.is_clean());
        assert_eq!(report.accepted.len(), 1);

        let q = &report.accepted[0];
        assert_eq!(q.text, "What is X?");
        assert_eq!(q.options, ["A", "B", "C", "D"]);
        assert_eq!(q.correct_option_index, 2);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn trims_every_field() {
        let report = QuestionImporter::default().parse("  Dose?  | 5 mg |10 mg| 15 mg |20 mg |  1 ");
        let q = &report.accepted[0];
        assert_eq!(q.text, "Dose?");
        assert_eq!(q.options, ["5 mg", "10 mg", "15 mg", "20 mg"]);
        assert_eq!(q.correct_option_index, 1);
    }

    #[test]
    fn skips_blank_lines_without_reporting_them() {
        let text = "\n   \nQ1|a|b|c|d|0\n\t\nQ2|a|b|c|d|3\n";
        let report = QuestionImporter::default().parse(text);
        assert_eq!(report.summary(), ImportSummary { accepted: 2, rejected: 0 });
    }

    #[test]
    fn short_line_is_rejected_with_line_number() {
        let text = "Q1|a|b|c|d|0\nQuestion only|A|B";
        let report = QuestionImporter::default().parse(text);
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(
            report.rejected,
            vec![RejectedLine {
                line_number: 2,
                content: "Question only|A|B".to_string(),
                reason: RejectionReason::TooFewFields { found: 3 },
            }]
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let report = QuestionImporter::default().parse("Q|a|b|c|d|3|explanation|more");
        assert_eq!(report.accepted.len(), 1);
        assert_eq!(report.accepted[0].correct_option_index, 3);
    }

    #[test]
    fn non_numeric_index_defaults_to_zero_when_lenient() {
        let report = QuestionImporter::default().parse("Q|a|b|c|d|abc");
        assert!(report.is_clean());
        assert_eq!(report.accepted[0].correct_option_index, 0);
    }

    #[test]
    fn empty_index_field_defaults_to_zero_when_lenient() {
        let report = QuestionImporter::default().parse("Q|a|b|c|d|");
        assert_eq!(report.accepted[0].correct_option_index, 0);
    }

    #[test]
    fn non_numeric_index_is_rejected_when_strict() {
        let report = strict().parse("Q|a|b|c|d|abc");
        assert!(report.accepted.is_empty());
        assert_eq!(
            report.rejected[0].reason,
            RejectionReason::UnparsableCorrectIndex { value: "abc".into() }
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let report = QuestionImporter::default().parse("Q|a|b|c|d|4\nQ|a|b|c|d|-1");
        assert!(report.accepted.is_empty());
        let reasons: Vec<_> = report.rejected.iter().map(|r| r.reason.clone()).collect();
        assert_eq!(
            reasons,
            [
                RejectionReason::CorrectIndexOutOfRange { value: "4".into() },
                RejectionReason::CorrectIndexOutOfRange { value: "-1".into() },
            ]
        );
    }

    #[test]
    fn oversized_index_is_out_of_range_not_defaulted() {
        let text = "Q|a|b|c|d|99999999999999999999\nQ|a|b|c|d|-99999999999999999999\nQ|a|b|c|d|9";
        for importer in [QuestionImporter::default(), strict()] {
            let report = importer.parse(text);
            assert!(report.accepted.is_empty());
            let reasons: Vec<_> = report.rejected.iter().map(|r| r.reason.clone()).collect();
            assert_eq!(
                reasons,
                [
                    RejectionReason::CorrectIndexOutOfRange {
                        value: "99999999999999999999".into()
                    },
                    RejectionReason::CorrectIndexOutOfRange {
                        value: "-99999999999999999999".into()
                    },
                    RejectionReason::CorrectIndexOutOfRange { value: "9".into() },
                ]
            );
        }
    }

    #[test]
    fn empty_question_text_is_rejected() {
        let report = QuestionImporter::default().parse("  |a|b|c|d|1");
        assert_eq!(report.rejected[0].reason, RejectionReason::EmptyQuestionText);
    }

    #[test]
    fn handles_windows_line_endings() {
        let report = QuestionImporter::default().parse("Q1|a|b|c|d|1\r\nQ2|a|b|c|d|2\r\n");
        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.accepted[1].correct_option_index, 2);
    }

    #[test]
    fn rejection_reasons_read_well() {
        let reason = RejectionReason::TooFewFields { found: 3 };
        assert_eq!(
            reason.to_string(),
            "expected at least 6 '|'-separated fields, found 3"
        );
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "too_few_fields", "found": 3 }));
    }
}
