//! Skin-type quiz scoring

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lumiere_api::EntityId;
use lumiere_api::catalog::SkinType;
use lumiere_api::content::Question;

use crate::error::{CoreError, Result};
use crate::list::lookup_name;

/// Outcome of one quiz run, as kept in the `skinTestResults` cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinTestResult {
    pub skin_type_id: EntityId,
    /// Empty when the skin type is not in the lookup list
    pub skin_type_name: String,
    pub taken_at: DateTime<Utc>,
}

/// A quiz in progress
#[derive(Debug, Clone)]
pub struct SkinQuiz {
    questions: Vec<Question>,
    answers: Vec<Option<usize>>,
}

impl SkinQuiz {
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self { questions, answers }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Pick answer `answer` for question `question`, replacing any earlier pick
    ///
    /// # Errors
    /// `CoreError::Quiz` when either index is out of range.
    pub fn answer(&mut self, question: usize, answer: usize) -> Result<()> {
        let q = self
            .questions
            .get(question)
            .ok_or_else(|| CoreError::Quiz(format!("no question {}", question + 1)))?;
        if answer >= q.answers.len() {
            return Err(CoreError::Quiz(format!(
                "question {} has no answer {}",
                question + 1,
                answer + 1
            )));
        }
        self.answers[question] = Some(answer);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// Points per skin type, in the order the skin types were first reached
    pub fn scores(&self) -> Vec<(EntityId, u32)> {
        let mut scores: Vec<(EntityId, u32)> = Vec::new();
        let picked = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter_map(|(q, a)| a.and_then(|a| q.answers.get(a)));

        for answer in picked {
            match scores.iter_mut().find(|(id, _)| *id == answer.skin_type_id) {
                Some((_, total)) => *total += answer.score,
                None => scores.push((answer.skin_type_id.clone(), answer.score)),
            }
        }
        scores
    }

    /// Highest scoring skin type; ties go to the one reached first.
    /// `None` until at least one question is answered.
    pub fn result(&self, skin_types: &[SkinType], now: DateTime<Utc>) -> Option<SkinTestResult> {
        let mut best: Option<(EntityId, u32)> = None;
        for (id, score) in self.scores() {
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((id, score));
            }
        }

        best.map(|(skin_type_id, _)| SkinTestResult {
            skin_type_name: lookup_name(skin_types, &skin_type_id).to_string(),
            skin_type_id,
            taken_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumiere_api::content::Answer;

    fn answer(content: &str, skin_type: i64, score: u32) -> Answer {
        Answer {
            content: content.to_string(),
            skin_type_id: EntityId::Number(skin_type),
            score,
        }
    }

    fn quiz() -> SkinQuiz {
        SkinQuiz::new(vec![
            Question {
                id: EntityId::Number(1),
                content: "How does your skin feel at noon?".into(),
                answers: vec![answer("Shiny", 1, 2), answer("Tight", 2, 2)],
            },
            Question {
                id: EntityId::Number(2),
                content: "How often do you break out?".into(),
                answers: vec![answer("Often", 1, 1), answer("Rarely", 2, 1)],
            },
        ])
    }

    fn skin_types() -> Vec<SkinType> {
        vec![
            SkinType {
                id: EntityId::Number(1),
                name: "Oily".into(),
                description: String::new(),
                is_deleted: false,
            },
            SkinType {
                id: EntityId::Number(2),
                name: "Dry".into(),
                description: String::new(),
                is_deleted: false,
            },
        ]
    }

    #[test]
    fn test_highest_score_wins() {
        let mut quiz = quiz();
        quiz.answer(0, 1).unwrap();
        assert!(!quiz.is_complete());
        quiz.answer(1, 1).unwrap();
        assert!(quiz.is_complete());

        let result = quiz.result(&skin_types(), Utc::now()).unwrap();
        assert_eq!(result.skin_type_id, EntityId::Number(2));
        assert_eq!(result.skin_type_name, "Dry");
    }

    #[test]
    fn test_tie_goes_to_first_reached() {
        let mut quiz = quiz();
        quiz.answer(0, 1).unwrap();
        quiz.answer(1, 0).unwrap();
        assert_eq!(
            quiz.scores(),
            vec![(EntityId::Number(2), 2), (EntityId::Number(1), 1)]
        );

        let mut tied = SkinQuiz::new(vec![
            Question {
                id: EntityId::Number(8),
                content: "After cleansing?".into(),
                answers: vec![answer("Tight", 2, 1)],
            },
            Question {
                id: EntityId::Number(9),
                content: "By evening?".into(),
                answers: vec![answer("Shiny", 1, 1)],
            },
        ]);
        tied.answer(0, 0).unwrap();
        tied.answer(1, 0).unwrap();
        let result = tied.result(&skin_types(), Utc::now()).unwrap();
        assert_eq!(result.skin_type_name, "Dry");
    }

    #[test]
    fn test_out_of_range_answers_are_rejected() {
        let mut quiz = quiz();
        assert!(matches!(quiz.answer(5, 0), Err(CoreError::Quiz(_))));
        assert!(matches!(quiz.answer(0, 7), Err(CoreError::Quiz(_))));
        assert!(quiz.result(&skin_types(), Utc::now()).is_none());
    }

    #[test]
    fn test_unknown_skin_type_has_empty_name() {
        let mut quiz = SkinQuiz::new(vec![Question {
            id: EntityId::Number(1),
            content: "?".into(),
            answers: vec![answer("x", 42, 1)],
        }]);
        quiz.answer(0, 0).unwrap();
        let result = quiz.result(&skin_types(), Utc::now()).unwrap();
        assert_eq!(result.skin_type_name, "");
    }
}
