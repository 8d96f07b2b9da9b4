//! Actions, prepositions and qualified nouns.
//!
//! Every ARO statement has the shape
//! `<Verb> the <result: specifiers> preposition the <object: specifiers>.`
//! The verb determines a static semantic role that drives analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Verbs that pull data in from outside the feature set.
pub const REQUEST_VERBS: &[&str] = &[
    "extract", "parse", "retrieve", "fetch", "read", "receive", "get", "load", "request", "query",
];

/// Verbs that push data out of the feature set.
pub const RESPONSE_VERBS: &[&str] = &[
    "return", "throw", "send", "log", "print", "output", "store", "save", "persist", "write",
    "emit", "notify", "alert", "render", "respond", "reply", "dispatch", "broadcast",
];

/// Verbs that make a binding visible to other feature sets.
pub const EXPORT_VERBS: &[&str] = &["publish", "export", "expose", "share"];

/// Semantic role of an action, derived from its verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionRole {
    /// External to internal.
    Request,
    /// Internal to internal.
    Own,
    /// Internal to external.
    Response,
    /// Makes a binding visible to other feature sets.
    Export,
}

impl ActionRole {
    /// Classifies a verb. Matching is case-insensitive; unknown verbs are [`ActionRole::Own`].
    pub fn classify(verb: &str) -> Self {
        let lower = verb.to_ascii_lowercase();
        let lower = lower.as_str();
        if REQUEST_VERBS.contains(&lower) {
            ActionRole::Request
        } else if RESPONSE_VERBS.contains(&lower) {
            ActionRole::Response
        } else if EXPORT_VERBS.contains(&lower) {
            ActionRole::Export
        } else {
            ActionRole::Own
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionRole::Request => "request",
            ActionRole::Own => "own",
            ActionRole::Response => "response",
            ActionRole::Export => "export",
        }
    }
}

impl fmt::Display for ActionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verb together with its derived role.
///
/// Serialized as the bare verb string; the role is recomputed on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Action {
    pub verb: String,
    pub role: ActionRole,
}

impl Action {
    pub fn new(verb: impl Into<String>) -> Self {
        let verb = verb.into();
        let role = ActionRole::classify(&verb);
        Self { verb, role }
    }

    /// Lowercase form of the verb.
    pub fn lowercase_verb(&self) -> String {
        self.verb.to_ascii_lowercase()
    }
}

impl From<String> for Action {
    fn from(verb: String) -> Self {
        Action::new(verb)
    }
}

impl From<&str> for Action {
    fn from(verb: &str) -> Self {
        Action::new(verb)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.verb
    }
}

/// Prepositions linking the result to the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preposition {
    From,
    For,
    With,
    To,
    Into,
    Via,
    Against,
    On,
}

impl Preposition {
    pub const ALL: [Preposition; 8] = [
        Preposition::From,
        Preposition::For,
        Preposition::With,
        Preposition::To,
        Preposition::Into,
        Preposition::Via,
        Preposition::Against,
        Preposition::On,
    ];

    /// Integer encoding carried in object descriptors.
    pub fn code(&self) -> i32 {
        match self {
            Preposition::From => 1,
            Preposition::For => 2,
            Preposition::With => 3,
            Preposition::To => 4,
            Preposition::Into => 5,
            Preposition::Via => 6,
            Preposition::Against => 7,
            Preposition::On => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preposition::From => "from",
            Preposition::For => "for",
            Preposition::With => "with",
            Preposition::To => "to",
            Preposition::Into => "into",
            Preposition::Via => "via",
            Preposition::Against => "against",
            Preposition::On => "on",
        }
    }
}

impl fmt::Display for Preposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A variable name with ordered specifiers, e.g. `<user: id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedNoun {
    pub name: String,
    #[serde(default)]
    pub specifiers: Vec<String>,
}

impl QualifiedNoun {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specifiers: Vec::new(),
        }
    }

    pub fn with_specifiers<I, S>(name: impl Into<String>, specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            specifiers: specifiers.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&str> for QualifiedNoun {
    fn from(name: &str) -> Self {
        QualifiedNoun::new(name)
    }
}

/// The prepositional object of an action statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectClause {
    pub preposition: Preposition,
    pub noun: QualifiedNoun,
}

impl ObjectClause {
    pub fn new(preposition: Preposition, noun: impl Into<QualifiedNoun>) -> Self {
        Self {
            preposition,
            noun: noun.into(),
        }
    }

    /// Shorthand for the object's variable name.
    pub fn name(&self) -> &str {
        &self.noun.name
    }
}
