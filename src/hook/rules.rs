use super::Severity;

/// Substring predicate evaluated against the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Contains(&'static str),
    Not(Box<Condition>),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    #[must_use]
    pub fn matches(&self, content: &str) -> bool {
        match self {
            Self::Contains(needle) => content.contains(needle),
            Self::Not(inner) => !inner.matches(content),
            Self::All(conditions) => conditions.iter().all(|c| c.matches(content)),
            Self::Any(conditions) => conditions.iter().any(|c| c.matches(content)),
        }
    }

    fn absent(needle: &'static str) -> Self {
        Self::Not(Box::new(Self::Contains(needle)))
    }
}

/// A check and the condition under which it fires.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub when: Condition,
}

/// Checks for Express-style route files, in report order.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "error-handling",
            severity: Severity::Warning,
            message: "No try/catch error handling found",
            when: Condition::All(vec![Condition::absent("try"), Condition::absent("catch")]),
        },
        Rule {
            id: "status-codes",
            severity: Severity::Warning,
            message: "No explicit status codes - use res.status(200), etc.",
            when: Condition::absent("res.status"),
        },
        Rule {
            id: "authentication",
            severity: Severity::Info,
            message: "POST/PUT routes should consider authentication",
            when: Condition::All(vec![
                Condition::Any(vec![
                    Condition::Contains("router.post"),
                    Condition::Contains("router.put"),
                ]),
                Condition::absent("auth"),
                Condition::absent("authenticate"),
            ]),
        },
        Rule {
            id: "input-validation",
            severity: Severity::Info,
            message: "Consider adding input validation for req.body",
            when: Condition::All(vec![
                Condition::Contains("req.body"),
                Condition::absent("validate"),
            ]),
        },
    ]
}
