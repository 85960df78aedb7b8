use std::fmt;

use rowan::TextRange;

/// What went wrong. Declaration order groups kinds by the stage that reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Syntax
    UnclosedGroup,
    ExpectedExpression,
    ExpectedRuleName,
    ExpectedColon,
    ExpectedSemicolon,
    UnexpectedToken,

    // Name resolution and rule shape
    DuplicateRule,
    UndefinedSymbol,
    LeftRecursionNoBase,
    EmptyGrammar,
    UnproductiveStart,

    // Table construction
    GrammarConflict,

    // Warnings
    ShadowedAction,
    UnusedRule,
    NonRegularGrammar,
    EndConflict,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::ShadowedAction
            | Self::UnusedRule
            | Self::NonRegularGrammar
            | Self::EndConflict => Severity::Warning,
            _ => Severity::Error,
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::UnclosedGroup => "missing closing `)`",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedRuleName => "expected rule name",
            Self::ExpectedColon => "expected `:` after rule name",
            Self::ExpectedSemicolon => "expected `;` after rule body",
            Self::UnexpectedToken => "unexpected token",
            Self::DuplicateRule => "duplicate rule",
            Self::UndefinedSymbol => "undefined symbol",
            Self::LeftRecursionNoBase => "left recursion without a base case",
            Self::EmptyGrammar => "grammar has no rules",
            Self::UnproductiveStart => "start rule derives no actions",
            Self::GrammarConflict => "grammar is ambiguous",
            Self::ShadowedAction => "rule shadows an action",
            Self::UnusedRule => "rule is never used",
            Self::NonRegularGrammar => "grammar is not regular",
            Self::EndConflict => "ambiguous end of input",
        }
    }

    /// Rendered message. Most kinds take a symbol name as `detail`; the rest
    /// append it to their summary.
    pub fn message(self, detail: Option<&str>) -> String {
        let Some(detail) = detail else {
            return self.summary().to_string();
        };
        match self {
            Self::DuplicateRule => format!("`{detail}` is already defined"),
            Self::UndefinedSymbol => format!("`{detail}` is neither an action nor a rule"),
            Self::LeftRecursionNoBase => format!("`{detail}` is left recursive in every branch"),
            Self::ShadowedAction => {
                format!("rule `{detail}` shadows the action of the same name")
            }
            Self::UnusedRule => format!("rule `{detail}` is never used"),
            Self::UnproductiveStart => {
                format!("start rule `{detail}` never finishes deriving")
            }
            Self::NonRegularGrammar => {
                format!("rule `{detail}` recurses outside tail position; lowering directly")
            }
            Self::UnclosedGroup => format!("{}; {detail}", self.summary()),
            _ => format!("{}: {detail}", self.summary()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Secondary location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Related {
    pub(crate) range: TextRange,
    pub(crate) label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<Related>,
}

impl Diagnostic {
    pub(crate) fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// `error at 3..4: message (related: label at 0..1)`, for tests and logs.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = |r: TextRange| format!("{}..{}", u32::from(r.start()), u32::from(r.end()));
        write!(f, "{} at {}: {}", self.severity(), range(self.range), self.message)?;
        for related in &self.related {
            write!(f, " (related: {} at {})", related.label, range(related.range))?;
        }
        Ok(())
    }
}
