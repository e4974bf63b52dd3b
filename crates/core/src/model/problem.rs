use crate::model::Grade;

/// Answers within this distance of the correct value are accepted.
pub const ANSWER_TOLERANCE: f64 = 0.01;

//
// ─── ARCHETYPES ────────────────────────────────────────────────────────────────
//

/// One of the three structurally distinct problem templates a grade draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    // Grade 4
    MissingAddend,
    OneStepAddition,
    ArithmeticSequence,
    // Grade 5
    TwoStepLinear,
    OrderOfOperations,
    VariableSubstitution,
    // Grade 6
    BoundedInequality,
    Proportion,
    LikeTerms,
    // Grade 7
    ThreeTermLinear,
    SubtractionLinear,
    LinearFunction,
    // Grade 8
    PerfectSquare,
    TwoVariableSubstitution,
    FunctionNotation,
}

impl Archetype {
    /// The round-robin archetype rotation for a grade.
    #[must_use]
    pub fn for_grade(grade: Grade) -> [Archetype; 3] {
        match grade.value() {
            4 => [
                Self::MissingAddend,
                Self::OneStepAddition,
                Self::ArithmeticSequence,
            ],
            5 => [
                Self::TwoStepLinear,
                Self::OrderOfOperations,
                Self::VariableSubstitution,
            ],
            6 => [Self::BoundedInequality, Self::Proportion, Self::LikeTerms],
            7 => [
                Self::ThreeTermLinear,
                Self::SubtractionLinear,
                Self::LinearFunction,
            ],
            _ => [
                Self::PerfectSquare,
                Self::TwoVariableSubstitution,
                Self::FunctionNotation,
            ],
        }
    }

    /// Display glyph shown next to the prompt.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::MissingAddend => "🔢",
            Self::OneStepAddition => "✨",
            Self::ArithmeticSequence => "🔄",
            Self::TwoStepLinear => "🎯",
            Self::OrderOfOperations => "🧮",
            Self::VariableSubstitution => "📊",
            Self::BoundedInequality => "⚖️",
            Self::Proportion => "🎲",
            Self::LikeTerms => "🔍",
            Self::ThreeTermLinear => "🎪",
            Self::SubtractionLinear => "➖",
            Self::LinearFunction => "📈",
            Self::PerfectSquare => "²",
            Self::TwoVariableSubstitution => "🔗",
            Self::FunctionNotation => "🔢",
        }
    }
}

//
// ─── TEMPLATES ─────────────────────────────────────────────────────────────────
//

/// A problem archetype together with the concrete operands drawn for it.
///
/// The template is the source of truth for a problem: prompt, hint and answer
/// are all derived from these operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// `a + ___ = a + b`, answer `b`.
    MissingAddend { a: i32, b: i32 },
    /// `x + b = x + b`, answer `x`.
    OneStepAddition { x: i32, b: i32 },
    /// `start, start + step, start + 2·step, ___`, answer `start + 3·step`.
    ArithmeticSequence { start: i32, step: i32 },
    /// `a·x + b = c`, answer `x`.
    TwoStepLinear { x: i32, a: i32, b: i32 },
    /// `a × b + c`, answer `a·b + c`.
    OrderOfOperations { a: i32, b: i32, c: i32 },
    /// `a·x + b` at the given `x`.
    VariableSubstitution { x: i32, a: i32, b: i32 },
    /// `x + b < x + b + 5`, answer is the largest whole `x`, i.e. `x + 4`.
    BoundedInequality { x: i32, b: i32 },
    /// `a:b = a·m:x`, answer `b·m`.
    Proportion { a: i32, b: i32, multiplier: i32 },
    /// `a·x + b·x`, answer is the coefficient `a + b`.
    LikeTerms { a: i32, b: i32 },
    /// `a·x + b + c = total`, answer `x`.
    ThreeTermLinear { x: i32, a: i32, b: i32, c: i32 },
    /// `a·x - b = total`, answer `x`.
    SubtractionLinear { x: i32, a: i32, b: i32 },
    /// `y = m·x + b` at the given `x`.
    LinearFunction { m: i32, x: i32, b: i32 },
    /// `x² = square`, answer the positive root `x`.
    PerfectSquare { x: i32 },
    /// `x + y = sum` with `x` given, answer `y`.
    TwoVariableSubstitution { x: i32, y: i32 },
    /// `f(x) = a·x + b`, answer `f(input)`.
    FunctionNotation { input: i32, a: i32, b: i32 },
}

impl Template {
    #[must_use]
    pub fn archetype(&self) -> Archetype {
        match self {
            Self::MissingAddend { .. } => Archetype::MissingAddend,
            Self::OneStepAddition { .. } => Archetype::OneStepAddition,
            Self::ArithmeticSequence { .. } => Archetype::ArithmeticSequence,
            Self::TwoStepLinear { .. } => Archetype::TwoStepLinear,
            Self::OrderOfOperations { .. } => Archetype::OrderOfOperations,
            Self::VariableSubstitution { .. } => Archetype::VariableSubstitution,
            Self::BoundedInequality { .. } => Archetype::BoundedInequality,
            Self::Proportion { .. } => Archetype::Proportion,
            Self::LikeTerms { .. } => Archetype::LikeTerms,
            Self::ThreeTermLinear { .. } => Archetype::ThreeTermLinear,
            Self::SubtractionLinear { .. } => Archetype::SubtractionLinear,
            Self::LinearFunction { .. } => Archetype::LinearFunction,
            Self::PerfectSquare { .. } => Archetype::PerfectSquare,
            Self::TwoVariableSubstitution { .. } => Archetype::TwoVariableSubstitution,
            Self::FunctionNotation { .. } => Archetype::FunctionNotation,
        }
    }

    /// The exact answer implied by the operands.
    #[must_use]
    pub fn answer(&self) -> i32 {
        match *self {
            Self::MissingAddend { b, .. } => b,
            Self::OneStepAddition { x, .. } => x,
            Self::ArithmeticSequence { start, step } => start + 3 * step,
            Self::TwoStepLinear { x, .. } => x,
            Self::OrderOfOperations { a, b, c } => a * b + c,
            Self::VariableSubstitution { x, a, b } => a * x + b,
            Self::BoundedInequality { x, .. } => x + 4,
            Self::Proportion { b, multiplier, .. } => b * multiplier,
            Self::LikeTerms { a, b } => a + b,
            Self::ThreeTermLinear { x, .. } => x,
            Self::SubtractionLinear { x, .. } => x,
            Self::LinearFunction { m, x, b } => m * x + b,
            Self::PerfectSquare { x } => x,
            Self::TwoVariableSubstitution { y, .. } => y,
            Self::FunctionNotation { input, a, b } => a * input + b,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        match *self {
            Self::MissingAddend { a, b } => format!("{a} + ___ = {}", a + b),
            Self::OneStepAddition { x, b } => format!("x + {b} = {}. What is x?", x + b),
            Self::ArithmeticSequence { start, step } => format!(
                "What comes next? {start}, {}, {}, ___",
                start + step,
                start + 2 * step
            ),
            Self::TwoStepLinear { x, a, b } => format!("{a}x + {b} = {}. What is x?", a * x + b),
            Self::OrderOfOperations { a, b, c } => format!("{a} × {b} + {c} = ?"),
            Self::VariableSubstitution { x, a, b } => format!("If x = {x}, what is {a}x + {b}?"),
            Self::BoundedInequality { x, b } => format!(
                "x + {b} < {}. What is the largest whole number x can be?",
                x + b + 5
            ),
            Self::Proportion { a, b, multiplier } => {
                format!("If {a}:{b} = {}:x, what is x?", a * multiplier)
            }
            Self::LikeTerms { a, b } => format!("Simplify: {a}x + {b}x = ?"),
            Self::ThreeTermLinear { x, a, b, c } => {
                format!("{a}x + {b} + {c} = {}. What is x?", a * x + b + c)
            }
            Self::SubtractionLinear { x, a, b } => {
                format!("{a}x - {b} = {}. What is x?", a * x - b)
            }
            Self::LinearFunction { m, x, b } => {
                format!("If y = {m}x + {b} and x = {x}, what is y?")
            }
            Self::PerfectSquare { x } => format!("x² = {}. What is x? (positive answer)", x * x),
            Self::TwoVariableSubstitution { x, y } => {
                format!("x + y = {} and x = {x}. What is y?", x + y)
            }
            Self::FunctionNotation { input, a, b } => {
                format!("If f(x) = {a}x + {b}, what is f({input})?")
            }
        }
    }

    /// A worked solving step that names the concrete operands.
    #[must_use]
    pub fn hint(&self) -> String {
        match *self {
            Self::MissingAddend { a, b } => {
                format!("What do you need to add to {a} to get {}?", a + b)
            }
            Self::OneStepAddition { x, b } => {
                format!("Subtract {b} from both sides: x = {} - {b}", x + b)
            }
            Self::ArithmeticSequence { step, .. } => format!(
                "Look at the difference between each number. They increase by {step}."
            ),
            Self::TwoStepLinear { a, b, .. } => {
                format!("First subtract {b} from both sides, then divide by {a}.")
            }
            Self::OrderOfOperations { a, b, c } => format!(
                "Remember PEMDAS! Multiply first: {a} × {b} = {}, then add {c}.",
                a * b
            ),
            Self::VariableSubstitution { x, a, b } => {
                format!("Replace x with {x}: {a} × {x} + {b}")
            }
            Self::BoundedInequality { x, b } => format!(
                "Subtract {b} from both sides. x must be less than {}.",
                x + 5
            ),
            Self::Proportion { a, b, multiplier } => format!(
                "{a} was multiplied by {multiplier} to get {}. Do the same to {b}.",
                a * multiplier
            ),
            Self::LikeTerms { a, b } => format!(
                "Combine like terms: ({a} + {b})x = {sum}x. Just enter {sum}.",
                sum = a + b
            ),
            Self::ThreeTermLinear { x, a, b, c } => format!(
                "First combine {b} + {c} = {}, then solve {a}x + {} = {}.",
                b + c,
                b + c,
                a * x + b + c
            ),
            Self::SubtractionLinear { x, a, b } => format!(
                "Add {b} to both sides to get {a}x = {}, then divide by {a}.",
                a * x
            ),
            Self::LinearFunction { m, x, b } => format!(
                "Substitute {x} for x: y = {m}({x}) + {b} = {} + {b}",
                m * x
            ),
            Self::PerfectSquare { x } => format!(
                "What number times itself equals {}? Think of square roots.",
                x * x
            ),
            Self::TwoVariableSubstitution { x, y } => format!(
                "Substitute x = {x} into the equation: {x} + y = {}",
                x + y
            ),
            Self::FunctionNotation { input, a, b } => {
                format!("Replace x with {input}: f({input}) = {a}({input}) + {b}")
            }
        }
    }
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// A single generated question. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    template: Template,
    prompt: String,
    hint: String,
    correct_answer: f64,
}

impl Problem {
    #[must_use]
    pub fn from_template(template: Template) -> Self {
        Self {
            prompt: template.prompt(),
            hint: template.hint(),
            correct_answer: f64::from(template.answer()),
            template,
        }
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub fn archetype(&self) -> Archetype {
        self.template.archetype()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn visual_glyph(&self) -> &'static str {
        self.template.archetype().glyph()
    }

    #[must_use]
    pub fn correct_answer(&self) -> f64 {
        self.correct_answer
    }

    /// Returns true when `submitted` lies within `tolerance` of the answer.
    #[must_use]
    pub fn accepts(&self, submitted: f64, tolerance: f64) -> bool {
        (submitted - self.correct_answer).abs() < tolerance
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
