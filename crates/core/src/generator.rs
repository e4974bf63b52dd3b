use rand::Rng;
use thiserror::Error;

use crate::model::{Archetype, Grade, GradeError, Problem, Template};

/// Every level attempt is exactly this many questions.
pub const QUESTIONS_PER_LEVEL: usize = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionSetError {
    #[error("a question set needs exactly {expected} problems, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Builds grade-leveled algebra problems.
///
/// Slot `i` always uses archetype `i mod 3` of the grade's rotation; only the
/// operands are random. Pass a seeded RNG to make the draws reproducible.
///
/// # Examples
///
/// ```
/// # use quest_core::generator::ProblemGenerator;
/// # use quest_core::model::{Archetype, Grade};
/// let mut rng = rand::rng();
/// let grade = Grade::new(4)?;
/// let problem = ProblemGenerator::generate(&mut rng, grade, 0);
/// assert_eq!(problem.archetype(), Archetype::MissingAddend);
/// # Ok::<(), quest_core::model::GradeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemGenerator;

impl ProblemGenerator {
    /// Generate the problem for `slot` of a level at `grade`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, grade: Grade, slot: usize) -> Problem {
        let archetype = Self::archetype_for(grade, slot);
        Problem::from_template(sample_template(rng, archetype))
    }

    /// Like [`ProblemGenerator::generate`] but takes an unchecked grade number.
    ///
    /// # Errors
    ///
    /// Returns `GradeError::Unsupported` for grades outside 4 through 8.
    pub fn generate_for<R: Rng + ?Sized>(
        rng: &mut R,
        grade: u8,
        slot: usize,
    ) -> Result<Problem, GradeError> {
        let grade = Grade::new(grade)?;
        Ok(Self::generate(rng, grade, slot))
    }

    #[must_use]
    pub fn archetype_for(grade: Grade, slot: usize) -> Archetype {
        let rotation = Archetype::for_grade(grade);
        rotation[slot % rotation.len()]
    }
}

fn sample_template<R: Rng + ?Sized>(rng: &mut R, archetype: Archetype) -> Template {
    match archetype {
        Archetype::MissingAddend => Template::MissingAddend {
            a: rng.random_range(1..=20),
            b: rng.random_range(1..=20),
        },
        Archetype::OneStepAddition => Template::OneStepAddition {
            x: rng.random_range(1..=15),
            b: rng.random_range(1..=10),
        },
        Archetype::ArithmeticSequence => Template::ArithmeticSequence {
            start: rng.random_range(1..=10),
            step: rng.random_range(2..=6),
        },
        Archetype::TwoStepLinear => Template::TwoStepLinear {
            x: rng.random_range(1..=10),
            a: rng.random_range(2..=6),
            b: rng.random_range(1..=10),
        },
        Archetype::OrderOfOperations => Template::OrderOfOperations {
            a: rng.random_range(2..=6),
            b: rng.random_range(2..=6),
            c: rng.random_range(1..=10),
        },
        Archetype::VariableSubstitution => Template::VariableSubstitution {
            x: rng.random_range(1..=8),
            a: rng.random_range(2..=6),
            b: rng.random_range(1..=5),
        },
        Archetype::BoundedInequality => Template::BoundedInequality {
            x: rng.random_range(1..=10),
            b: rng.random_range(1..=10),
        },
        Archetype::Proportion => Template::Proportion {
            a: rng.random_range(2..=6),
            b: rng.random_range(2..=6),
            multiplier: rng.random_range(2..=5),
        },
        Archetype::LikeTerms => Template::LikeTerms {
            a: rng.random_range(2..=6),
            b: rng.random_range(2..=6),
        },
        Archetype::ThreeTermLinear => Template::ThreeTermLinear {
            x: rng.random_range(1..=10),
            a: rng.random_range(2..=5),
            b: rng.random_range(1..=10),
            c: rng.random_range(1..=10),
        },
        Archetype::SubtractionLinear => Template::SubtractionLinear {
            x: rng.random_range(1..=10),
            a: rng.random_range(2..=6),
            b: rng.random_range(5..=14),
        },
        Archetype::LinearFunction => Template::LinearFunction {
            m: rng.random_range(1..=5),
            x: rng.random_range(1..=10),
            b: rng.random_range(1..=10),
        },
        Archetype::PerfectSquare => Template::PerfectSquare {
            x: rng.random_range(2..=9),
        },
        Archetype::TwoVariableSubstitution => Template::TwoVariableSubstitution {
            x: rng.random_range(1..=5),
            y: rng.random_range(1..=5),
        },
        Archetype::FunctionNotation => Template::FunctionNotation {
            input: rng.random_range(1..=10),
            a: rng.random_range(2..=5),
            b: rng.random_range(1..=10),
        },
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// The ordered, fixed-size list of problems for one level attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    grade: Grade,
    problems: Vec<Problem>,
}

impl QuestionSet {
    /// Generate a full level of problems for `grade`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, grade: Grade) -> Self {
        let problems = (0..QUESTIONS_PER_LEVEL)
            .map(|slot| ProblemGenerator::generate(&mut *rng, grade, slot))
            .collect();
        Self { grade, problems }
    }

    /// Build a set from hand-picked problems.
    ///
    /// # Errors
    ///
    /// Returns `QuestionSetError::WrongLength` unless exactly
    /// [`QUESTIONS_PER_LEVEL`] problems are given.
    pub fn from_problems(grade: Grade, problems: Vec<Problem>) -> Result<Self, QuestionSetError> {
        if problems.len() != QUESTIONS_PER_LEVEL {
            return Err(QuestionSetError::WrongLength {
                expected: QUESTIONS_PER_LEVEL,
                actual: problems.len(),
            });
        }
        Ok(Self { grade, problems })
    }

    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Problem> {
        self.problems.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
