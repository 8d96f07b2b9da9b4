//! Semantic Analyzer - scope, data flow and cross-feature-set dependencies.
//!
//! Each feature set is analyzed in a single forward pass, in program order.
//! The pass builds the feature set's symbol table, records one
//! [`DataFlowInfo`] per top-level statement, collects external dependencies,
//! and registers published names in the [`GlobalSymbolRegistry`]. Once every
//! feature set has been analyzed, the verification pass checks that each
//! dependency is published somewhere.
//!
//! ## Statement rules
//!
//! | Statement | Inputs | Defines |
//! |-----------|--------|---------|
//! | request action | object | result (extracted from object) |
//! | own action | object | result (computed) |
//! | response action | result, object | nothing; records a side effect |
//! | export action / `Publish` | internal name | alias under the external name |
//! | `Require` | nothing | external symbol |
//! | `match` | subject | whatever its bodies define |
//!
//! Analysis never stops early. Findings are collected as [`Diagnostics`].

use aro_core::{Diagnostic, DiagnosticCode, Diagnostics, Span};
use aro_registry::{
    DataType, GlobalSymbolRegistry, Provenance, Symbol, SymbolTable, SymbolTableBuilder,
    Visibility,
};
use aro_syntax::ast::visitor::{Visitor, walk_expr};
use aro_syntax::ast::*;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use tracing::{debug, trace};

use super::dataflow::DataFlowInfo;
use super::infer::infer_expr;
use super::known::is_known_external;
use super::verify::verify_dependencies;

/// Dependencies of a feature set, keyed by name, with the span of first use.
pub type Dependencies = IndexMap<String, Span, FxBuildHasher>;

/// The analysis result for one feature set.
#[derive(Debug, Clone)]
pub struct AnalyzedFeatureSet<'ast> {
    pub feature_set: &'ast FeatureSet,
    pub symbols: SymbolTable,
    /// One entry per top-level statement, in order.
    pub data_flows: Vec<DataFlowInfo>,
    /// Names this feature set expects some other feature set to publish.
    pub dependencies: Dependencies,
    /// External names this feature set publishes, in order.
    pub exports: Vec<String>,
}

impl AnalyzedFeatureSet<'_> {
    pub fn name(&self) -> &str {
        &self.feature_set.name
    }

    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }
}

/// The analysis result for a whole program.
#[derive(Debug, Clone)]
pub struct AnalyzedProgram<'ast> {
    pub program: &'ast Program,
    pub feature_sets: Vec<AnalyzedFeatureSet<'ast>>,
    pub registry: GlobalSymbolRegistry,
    pub diagnostics: Diagnostics,
}

impl<'ast> AnalyzedProgram<'ast> {
    pub fn feature_set(&self, name: &str) -> Option<&AnalyzedFeatureSet<'ast>> {
        self.feature_sets.iter().find(|fs| fs.name() == name)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Entry point for semantic analysis.
pub struct SemanticAnalyzer;

impl SemanticAnalyzer {
    /// Analyze a program with a fresh registry.
    pub fn analyze(program: &Program) -> AnalyzedProgram<'_> {
        Self::analyze_with_registry(program, GlobalSymbolRegistry::new())
    }

    /// Analyze a program on top of names a previous run already registered.
    /// The updated registry is returned inside the result.
    #[tracing::instrument(skip_all, fields(feature_sets = program.feature_sets.len()))]
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn analyze_with_registry(
        program: &Program,
        mut registry: GlobalSymbolRegistry,
    ) -> AnalyzedProgram<'_> {
        let mut diagnostics = Diagnostics::new();
        let mut feature_sets = Vec::with_capacity(program.feature_sets.len());

        for feature_set in &program.feature_sets {
            let analyzed = FeatureSetAnalyzer::new(feature_set, &mut diagnostics).run();

            for name in &analyzed.exports {
                if let Err(err) = registry.register(name.as_str(), feature_set.name.as_str()) {
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticCode::DuplicatePublish,
                            err.to_string(),
                            feature_set.span,
                        )
                        .in_feature_set(&feature_set.name),
                    );
                }
            }
            feature_sets.push(analyzed);
        }

        verify_dependencies(&feature_sets, &registry, &mut diagnostics);

        debug!(
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            published = registry.len(),
            "analysis finished"
        );

        AnalyzedProgram {
            program,
            feature_sets,
            registry,
            diagnostics,
        }
    }
}

/// Per-feature-set state for the forward pass.
struct FeatureSetAnalyzer<'ast, 'd> {
    feature_set: &'ast FeatureSet,
    symbols: SymbolTableBuilder,
    /// Every name read anywhere in the feature set.
    used: FxHashSet<String>,
    dependencies: Dependencies,
    exports: Vec<String>,
    diagnostics: &'d mut Diagnostics,
}

impl<'ast, 'd> FeatureSetAnalyzer<'ast, 'd> {
    fn new(feature_set: &'ast FeatureSet, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            feature_set,
            symbols: SymbolTableBuilder::new(),
            used: FxHashSet::default(),
            dependencies: Dependencies::default(),
            exports: Vec::new(),
            diagnostics,
        }
    }

    fn run(mut self) -> AnalyzedFeatureSet<'ast> {
        debug!(
            feature_set = %self.feature_set.name,
            statements = self.feature_set.statements.len(),
            "analyzing feature set"
        );

        let data_flows = self
            .feature_set
            .statements
            .iter()
            .map(|stmt| {
                let mut flow = DataFlowInfo::new();
                self.statement(stmt, &mut flow);
                flow
            })
            .collect();

        self.report_unused();

        AnalyzedFeatureSet {
            feature_set: self.feature_set,
            symbols: self.symbols.build(),
            data_flows,
            dependencies: self.dependencies,
            exports: self.exports,
        }
    }

    fn statement(&mut self, stmt: &Statement, flow: &mut DataFlowInfo) {
        match stmt {
            Statement::Action(s) => self.action(s, flow),
            Statement::Publish(s) => {
                self.publish(&s.external_name, &s.internal_variable, s.span, flow)
            }
            Statement::Require(s) => self.require(s, flow),
            Statement::Match(s) => self.match_statement(s, flow),
        }
    }

    fn action(&mut self, stmt: &ActionStatement, flow: &mut DataFlowInfo) {
        let object = stmt.object.name();
        let result = stmt.result.name.as_str();
        trace!(verb = %stmt.action.verb, role = %stmt.action.role, result, object, "action");

        match stmt.action.role {
            ActionRole::Request => {
                self.read(object, flow);
                if !self.is_defined(object) && !is_known_external(object) {
                    self.add_dependency(object, stmt.span);
                }
                self.expression_inputs(stmt, flow);
                let ty = self.result_type(stmt);
                self.define(
                    Symbol::internal(
                        result,
                        Provenance::ExtractedFrom(object.to_string()),
                        ty,
                        stmt.span,
                    ),
                    flow,
                );
            }
            ActionRole::Own => {
                self.check_defined(object, stmt.span);
                self.read(object, flow);
                self.expression_inputs(stmt, flow);
                let ty = self.result_type(stmt);
                self.define(
                    Symbol::internal(result, Provenance::Computed, ty, stmt.span),
                    flow,
                );
            }
            ActionRole::Response => {
                self.check_defined(object, stmt.span);
                self.read(result, flow);
                self.read(object, flow);
                self.expression_inputs(stmt, flow);
                flow.add_side_effect(&stmt.action.lowercase_verb(), result);
            }
            ActionRole::Export => {
                self.expression_inputs(stmt, flow);
                self.publish(result, result, stmt.span, flow);
            }
        }
    }

    fn publish(&mut self, external: &str, internal: &str, span: Span, flow: &mut DataFlowInfo) {
        if !self.is_defined(internal) {
            self.error(
                DiagnosticCode::UndefinedPublish,
                format!("cannot publish undefined variable '{internal}'"),
                span,
            );
            return;
        }

        self.read(internal, flow);
        self.symbols.promote_to_published(internal);
        if external != internal {
            let ty = self.symbols.type_of(internal);
            self.symbols.define(Symbol::alias(external, internal, ty, span));
        }
        flow.add_output(external);
        if !self.exports.iter().any(|e| e == external) {
            self.exports.push(external.to_string());
        }
    }

    fn require(&mut self, stmt: &RequireStatement, flow: &mut DataFlowInfo) {
        self.define(
            Symbol::external(&stmt.variable, stmt.source.as_str(), stmt.span),
            flow,
        );
        self.add_dependency(&stmt.variable, stmt.span);
    }

    fn match_statement(&mut self, stmt: &MatchStatement, flow: &mut DataFlowInfo) {
        let subject = stmt.subject.name.as_str();
        self.check_defined(subject, stmt.span);
        self.read(subject, flow);

        for case in &stmt.cases {
            for nested in &case.body {
                self.statement(nested, flow);
            }
        }
        if let Some(body) = &stmt.otherwise {
            for nested in body {
                self.statement(nested, flow);
            }
        }
    }

    // === Helpers ===

    fn is_defined(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    fn read(&mut self, name: &str, flow: &mut DataFlowInfo) {
        flow.add_input(name);
        if !self.used.contains(name) {
            self.used.insert(name.to_string());
        }
    }

    fn define(&mut self, symbol: Symbol, flow: &mut DataFlowInfo) {
        flow.add_output(&symbol.name);
        self.symbols.define(symbol);
    }

    fn add_dependency(&mut self, name: &str, span: Span) {
        if !self.dependencies.contains_key(name) {
            self.dependencies.insert(name.to_string(), span);
        }
    }

    /// Warns when an own/response statement reads a name nothing provides.
    fn check_defined(&mut self, name: &str, span: Span) {
        if is_known_external(name) || self.is_defined(name) || self.dependencies.contains_key(name)
        {
            return;
        }
        self.warning(
            DiagnosticCode::UsedBeforeDefinition,
            format!("variable '{name}' is used before definition"),
            span,
        );
    }

    /// Every variable the expression references is an input; unknown ones
    /// become dependencies.
    fn expression_inputs(&mut self, stmt: &ActionStatement, flow: &mut DataFlowInfo) {
        let Some(expr) = &stmt.expression else {
            return;
        };
        let mut collector = VarCollector::default();
        walk_expr(&mut collector, expr);
        for name in collector.names {
            self.read(&name, flow);
            if !self.is_defined(&name) && !is_known_external(&name) {
                self.add_dependency(&name, stmt.span);
            }
        }
    }

    fn result_type(&self, stmt: &ActionStatement) -> DataType {
        match &stmt.expression {
            Some(expr) => infer_expr(expr),
            None => DataType::from_specifiers(&stmt.result.specifiers),
        }
    }

    fn report_unused(&mut self) {
        let unused: Vec<(String, Span)> = self
            .symbols_in_order()
            .filter(|s| s.visibility == Visibility::Internal && !s.is_alias())
            .filter(|s| !self.used.contains(&s.name))
            .map(|s| (s.name.clone(), s.span))
            .collect();

        for (name, span) in unused {
            self.warning(
                DiagnosticCode::UnusedVariable,
                format!("variable '{name}' is defined but never used"),
                span,
            );
        }
    }

    fn symbols_in_order(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    fn warning(&mut self, code: DiagnosticCode, message: String, span: Span) {
        self.diagnostics.push(
            Diagnostic::warning(code, message, span).in_feature_set(&self.feature_set.name),
        );
    }

    fn error(&mut self, code: DiagnosticCode, message: String, span: Span) {
        self.diagnostics.push(
            Diagnostic::error(code, message, span).in_feature_set(&self.feature_set.name),
        );
    }
}

/// Collects variable names referenced by an expression, first-seen order.
#[derive(Default)]
struct VarCollector {
    names: Vec<String>,
}

impl Visitor for VarCollector {
    fn visit_var_expr(&mut self, expr: &VarExpr) {
        if !self.names.contains(&expr.name) {
            self.names.push(expr.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs(name: &str, statements: Vec<Statement>) -> FeatureSet {
        FeatureSet::new(name, "Test").with_statements(statements)
    }

    fn act(verb: &str, result: &str, prep: Preposition, object: &str) -> Statement {
        ActionStatement::new(verb, result, prep, object).into()
    }

    fn codes(analyzed: &AnalyzedProgram<'_>) -> Vec<DiagnosticCode> {
        analyzed.diagnostics.iter().map(|d| d.code).collect()
    }

    #[test]
    fn request_defines_result_and_records_dependency() {
        let program = Program::new(vec![fs(
            "Get User",
            vec![
                act("Retrieve", "user", Preposition::From, "user-repository"),
                act("Return", "OK", Preposition::For, "user"),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        let unit = &analyzed.feature_sets[0];

        let user = unit.symbols.get("user").unwrap();
        assert_eq!(
            user.provenance,
            Provenance::ExtractedFrom("user-repository".into())
        );
        assert!(unit.depends_on("user-repository"));
        assert_eq!(unit.data_flows.len(), 2);
        assert_eq!(unit.data_flows[0].inputs, vec!["user-repository"]);
        assert_eq!(unit.data_flows[0].outputs, vec!["user"]);
        assert_eq!(unit.data_flows[1].inputs, vec!["OK", "user"]);
        assert_eq!(unit.data_flows[1].side_effects, vec!["return:OK"]);
    }

    #[test]
    fn request_from_known_external_is_not_a_dependency() {
        let program = Program::new(vec![fs(
            "A",
            vec![
                act("Extract", "id", Preposition::From, "pathParameters"),
                act("Log", "id", Preposition::To, "console"),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        assert!(analyzed.feature_sets[0].dependencies.is_empty());
        assert!(analyzed.diagnostics.is_empty());
    }

    #[test]
    fn own_warns_on_undefined_object() {
        let program = Program::new(vec![fs(
            "A",
            vec![
                act("Compute", "total", Preposition::From, "items"),
                act("Return", "OK", Preposition::With, "total"),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        assert_eq!(codes(&analyzed), vec![DiagnosticCode::UsedBeforeDefinition]);
        let diag = analyzed.diagnostics.iter().next().unwrap();
        assert_eq!(diag.feature_set.as_deref(), Some("A"));
        assert!(diag.message.contains("'items'"));
    }

    #[test]
    fn unused_variable_warns_once() {
        let program = Program::new(vec![fs(
            "A",
            vec![act("Create", "x", Preposition::With, "_literal_")],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        let unused: Vec<_> = analyzed
            .diagnostics
            .with_code(DiagnosticCode::UnusedVariable)
            .collect();
        assert_eq!(unused.len(), 1);
        assert!(unused[0].message.contains("'x'"));
    }

    #[test]
    fn publish_suppresses_unused_and_adds_alias() {
        let program = Program::new(vec![fs(
            "A",
            vec![
                act("Create", "x", Preposition::With, "_literal_"),
                PublishStatement::new("shared-x", "x").into(),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        assert!(analyzed.diagnostics.is_empty(), "{}", analyzed.diagnostics);

        let unit = &analyzed.feature_sets[0];
        assert_eq!(unit.symbols.get("x").unwrap().visibility, Visibility::Published);
        let alias = unit.symbols.get("shared-x").unwrap();
        assert_eq!(alias.provenance, Provenance::AliasOf("x".into()));
        assert_eq!(analyzed.registry.owner("shared-x"), Some("A"));
        assert_eq!(unit.exports, vec!["shared-x"]);
    }

    #[test]
    fn publish_of_undefined_is_an_error() {
        let program = Program::new(vec![fs(
            "A",
            vec![PublishStatement::new("shared", "missing").into()],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        assert!(analyzed.has_errors());
        assert_eq!(codes(&analyzed), vec![DiagnosticCode::UndefinedPublish]);
        assert!(analyzed.registry.is_empty());
    }

    #[test]
    fn export_verb_publishes_under_own_name() {
        let program = Program::new(vec![fs(
            "A",
            vec![
                act("Create", "config", Preposition::With, "_literal_"),
                act("Export", "config", Preposition::To, "application"),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        assert!(analyzed.diagnostics.is_empty(), "{}", analyzed.diagnostics);
        assert_eq!(analyzed.registry.owner("config"), Some("A"));
        let symbol = analyzed.feature_sets[0].symbols.get("config").unwrap();
        assert_eq!(symbol.visibility, Visibility::Published);
        assert!(!symbol.is_alias());
    }

    #[test]
    fn duplicate_publish_keeps_first_owner() {
        let unit = |name: &str| {
            fs(
                name,
                vec![
                    act("Create", "x", Preposition::With, "_literal_"),
                    PublishStatement::new("shared", "x").into(),
                ],
            )
        };
        let program = Program::new(vec![unit("A"), unit("B")]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        assert_eq!(codes(&analyzed), vec![DiagnosticCode::DuplicatePublish]);
        assert_eq!(analyzed.registry.owner("shared"), Some("A"));
    }

    #[test]
    fn require_defines_external_symbol() {
        let program = Program::new(vec![fs(
            "A",
            vec![
                RequireStatement::new("db", "Database Setup").into(),
                act("Retrieve", "rows", Preposition::From, "db"),
                act("Return", "OK", Preposition::With, "rows"),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        let unit = &analyzed.feature_sets[0];
        let db = unit.symbols.get("db").unwrap();
        assert_eq!(db.visibility, Visibility::External);
        assert_eq!(db.provenance, Provenance::ExtractedFrom("Database Setup".into()));
        assert!(unit.depends_on("db"));
        // Defined by Require, so the request does not add a second dependency.
        assert_eq!(unit.dependencies.len(), 1);
    }

    #[test]
    fn expression_variables_are_inputs() {
        let stmt = ActionStatement::new("Compute", "total", Preposition::From, "_expression_")
            .with_expression(Expr::binary(
                Expr::var("price"),
                BinaryOp::Mul,
                Expr::var("quantity"),
            ));
        let program = Program::new(vec![fs(
            "A",
            vec![
                act("Extract", "price", Preposition::From, "request"),
                stmt.into(),
                act("Return", "OK", Preposition::With, "total"),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        let unit = &analyzed.feature_sets[0];
        assert_eq!(
            unit.data_flows[1].inputs,
            vec!["_expression_", "price", "quantity"]
        );
        assert!(unit.depends_on("quantity"));
        assert!(!unit.depends_on("price"));
        assert_eq!(unit.symbols.get("total").unwrap().data_type, DataType::Number);
    }

    #[test]
    fn result_type_from_specifiers() {
        let stmt = ActionStatement::new(
            "Extract",
            QualifiedNoun::with_specifiers("order", ["Order"]),
            Preposition::From,
            "request",
        );
        let program = Program::new(vec![fs(
            "A",
            vec![stmt.into(), act("Return", "OK", Preposition::With, "order")],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        assert_eq!(
            analyzed.feature_sets[0].symbols.get("order").unwrap().data_type,
            DataType::Named("Order".into())
        );
    }

    #[test]
    fn match_folds_nested_facts() {
        let program = Program::new(vec![fs(
            "A",
            vec![
                act("Extract", "status", Preposition::From, "request"),
                MatchStatement::new("status")
                    .with_case(
                        Pattern::Literal("active".into()),
                        vec![act("Log", "status", Preposition::To, "console")],
                    )
                    .with_otherwise(vec![act("Send", "alert", Preposition::To, "admin")])
                    .into(),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze(&program);
        let unit = &analyzed.feature_sets[0];
        assert_eq!(unit.data_flows.len(), 2);
        let flow = &unit.data_flows[1];
        assert_eq!(flow.inputs, vec!["status", "console", "alert", "admin"]);
        assert_eq!(flow.side_effects, vec!["log:status", "send:alert"]);
        assert_eq!(
            codes(&analyzed),
            vec![DiagnosticCode::UsedBeforeDefinition]
        );
    }

    #[test]
    fn registry_is_threaded_through() {
        let mut prior = GlobalSymbolRegistry::new();
        prior.register("user", "Other Program").unwrap();

        let program = Program::new(vec![fs(
            "A",
            vec![
                RequireStatement::new("user", "Other Program").into(),
                act("Log", "user", Preposition::To, "console"),
            ],
        )]);
        let analyzed = SemanticAnalyzer::analyze_with_registry(&program, prior);
        assert!(analyzed.diagnostics.is_empty(), "{}", analyzed.diagnostics);
        assert_eq!(analyzed.registry.owner("user"), Some("Other Program"));
    }
}
