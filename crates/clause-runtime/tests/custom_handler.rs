//! Registering a third-party operator without touching the dispatcher

use clause_core::{CombinationMode, FieldDeclaration, Metadata, Value};
use clause_runtime::handler::{BuildContext, MetadataKind, ModeSupport, OperatorHandler};
use clause_runtime::{
    ComposeError, ConditionComposer, HandlerRegistry, ParameterContext, Predicate, Result,
};
use std::sync::Arc;

/// `column IS NULL OR column = ''`, only for AND modes
struct BlankHandler;

impl OperatorHandler for BlankHandler {
    fn kind(&self) -> &str {
        "IS_BLANK"
    }

    fn and_annotation(&self) -> ModeSupport {
        ModeSupport::Metadata(MetadataKind::Column)
    }

    fn or_annotation(&self) -> ModeSupport {
        ModeSupport::Unsupported
    }

    fn or_not_annotation(&self) -> ModeSupport {
        ModeSupport::Unsupported
    }

    fn build_predicate(
        &self,
        ctx: &BuildContext<'_>,
        field: &str,
        _value: &Value,
        metadata: Option<&Metadata>,
    ) -> Result<Option<Predicate>> {
        let column = ctx.column(field, metadata)?;
        Ok(Some(Predicate::Or(vec![
            Predicate::is_null(column.clone()),
            Predicate::compare(column, clause_runtime::CompareOp::Eq, Value::from("")),
        ])))
    }
}

fn registry() -> Arc<HandlerRegistry> {
    let mut registry = HandlerRegistry::with_builtins();
    registry.register(BlankHandler);
    Arc::new(registry)
}

#[test]
fn test_custom_handler_is_dispatched() {
    let composer = ConditionComposer::new(registry());
    let decls = vec![
        FieldDeclaration::new("age", "GREATER_THAN", 18),
        FieldDeclaration::new("nickname", "is_blank", Value::Null)
            .with_mode(CombinationMode::AndNot)
            .with_metadata(Metadata::column("nick")),
    ];

    let tree = composer.compose(&decls, &ParameterContext::new()).unwrap();
    assert_eq!(
        tree.to_string(),
        "(age > 18 AND NOT (nick IS NULL OR nick = ''))"
    );
}

#[test]
fn test_custom_handler_unsupported_mode() {
    let composer = ConditionComposer::new(registry());
    let decls =
        vec![FieldDeclaration::new("nickname", "IS_BLANK", Value::Null).with_mode(CombinationMode::Or)];

    let err = composer
        .compose(&decls, &ParameterContext::new())
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        ComposeError::UnsupportedMode { operator_kind, .. } if operator_kind == "IS_BLANK"
    ));
}

#[test]
fn test_composer_is_shareable_across_threads() {
    let composer = Arc::new(ConditionComposer::new(registry()));
    let decls = Arc::new(vec![FieldDeclaration::new("age", "LESS_THAN", 30)]);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let composer = Arc::clone(&composer);
            let decls = Arc::clone(&decls);
            std::thread::spawn(move || {
                let ctx = ParameterContext::new().with("n", i);
                composer.compose(&decls, &ctx).map(|tree| tree.to_string())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "age < 30");
    }
}
