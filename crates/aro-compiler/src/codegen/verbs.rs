//! Canonical action verbs.
//!
//! The runtime exports one `aro_action_<verb>` entry point per canonical
//! verb. Synonyms collapse onto their canonical verb; any other verb is
//! dispatched by name through the custom-action entry point.

/// Verbs with a dedicated runtime entry point, in declaration order.
pub const CANONICAL_VERBS: &[&str] = &[
    "extract",
    "retrieve",
    "request",
    "read",
    "receive",
    "compute",
    "validate",
    "compare",
    "transform",
    "create",
    "update",
    "delete",
    "merge",
    "sort",
    "filter",
    "split",
    "accept",
    "return",
    "throw",
    "send",
    "log",
    "store",
    "write",
    "emit",
    "notify",
    "render",
    "publish",
    "start",
    "listen",
    "stop",
    "wait",
];

/// `(synonym, canonical)` pairs.
const SYNONYMS: &[(&str, &str)] = &[
    ("parse", "extract"),
    ("get", "retrieve"),
    ("load", "retrieve"),
    ("query", "retrieve"),
    ("fetch", "request"),
    ("call", "request"),
    ("invoke", "request"),
    ("calculate", "compute"),
    ("derive", "compute"),
    ("verify", "validate"),
    ("check", "validate"),
    ("convert", "transform"),
    ("map", "transform"),
    ("make", "create"),
    ("build", "create"),
    ("construct", "create"),
    ("modify", "update"),
    ("change", "update"),
    ("set", "update"),
    ("remove", "delete"),
    ("destroy", "delete"),
    ("combine", "merge"),
    ("join", "merge"),
    ("order", "sort"),
    ("respond", "return"),
    ("reply", "return"),
    ("raise", "throw"),
    ("fail", "throw"),
    ("print", "log"),
    ("output", "log"),
    ("save", "store"),
    ("persist", "store"),
    ("dispatch", "emit"),
    ("broadcast", "emit"),
    ("alert", "notify"),
    ("export", "publish"),
    ("expose", "publish"),
    ("share", "publish"),
    ("serve", "start"),
    ("shutdown", "stop"),
    ("keepalive", "wait"),
];

/// Canonical verb for `verb` (case-insensitive), or `None` for a custom action.
///
/// Canonical verbs map to themselves, so applying this twice changes nothing.
pub fn canonical_verb(verb: &str) -> Option<&'static str> {
    let lower = verb.to_ascii_lowercase();
    if let Some(&canonical) = CANONICAL_VERBS.iter().find(|&&c| c == lower) {
        return Some(canonical);
    }
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == lower)
        .map(|&(_, canonical)| canonical)
}

/// Runtime function implementing a canonical verb.
pub fn action_function(canonical: &str) -> String {
    format!("aro_action_{canonical}")
}
