//! Verification pass - cross-feature-set dependency resolution.
//!
//! Runs after every feature set has been analyzed and registered. Each
//! dependency must be published by some feature set (or be a known external
//! name). Unresolved names get one advisory warning, reported against the
//! first feature set that depends on them. Never fatal.

use aro_core::{Diagnostic, DiagnosticCode, Diagnostics};
use aro_registry::GlobalSymbolRegistry;
use rustc_hash::FxHashSet;
use tracing::debug;

use super::analyzer::AnalyzedFeatureSet;
use super::known::is_known_external;

pub(crate) fn verify_dependencies(
    feature_sets: &[AnalyzedFeatureSet<'_>],
    registry: &GlobalSymbolRegistry,
    diagnostics: &mut Diagnostics,
) {
    let mut reported: FxHashSet<&str> = FxHashSet::default();

    for unit in feature_sets {
        for (name, span) in &unit.dependencies {
            if registry.contains(name) || is_known_external(name) {
                continue;
            }
            if !reported.insert(name.as_str()) {
                continue;
            }
            debug!(dependency = %name, feature_set = unit.name(), "unresolved dependency");
            diagnostics.push(
                Diagnostic::warning(
                    DiagnosticCode::UnresolvedDependency,
                    format!(
                        "'{name}' is not published by any feature set; \
                         add a <Publish> statement for it or provide it from the framework"
                    ),
                    *span,
                )
                .in_feature_set(unit.name()),
            );
        }
    }
}
