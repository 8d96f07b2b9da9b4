//! Names that are always provided by the runtime.

/// Slot the code generator binds an action's literal into.
pub const LITERAL_SLOT: &str = "_literal_";

/// Slot the code generator binds an action's evaluated expression into.
pub const EXPRESSION_SLOT: &str = "_expression_";

/// Names every feature set may read without defining or requiring them.
pub const KNOWN_EXTERNALS: &[&str] = &[
    "request",
    "session",
    "context",
    "headers",
    "pathParameters",
    "queryParameters",
    "console",
    "application",
    "event",
    "port",
    "host",
    "directory",
    "file",
    "events",
    LITERAL_SLOT,
    EXPRESSION_SLOT,
];

/// Whether `name` is runtime-provided. Case-sensitive.
pub fn is_known_external(name: &str) -> bool {
    KNOWN_EXTERNALS.contains(&name)
}
