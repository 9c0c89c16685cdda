//! Per-mode dispatch
//!
//! Maps a declaration's combination mode onto one of the eight build methods
//! of a handler, after checking the matching annotation accessor.

use super::{BuildContext, ModeSupport, OperatorHandler};
use crate::error::{ComposeError, Result};
use crate::predicate::ConditionFragment;
use clause_core::{CombinationMode, Metadata, Value};

/// The handler's declared support for `mode`
pub fn mode_support(handler: &dyn OperatorHandler, mode: CombinationMode) -> ModeSupport {
    match mode {
        CombinationMode::And => handler.and_annotation(),
        CombinationMode::AndNot => handler.and_not_annotation(),
        CombinationMode::Or => handler.or_annotation(),
        CombinationMode::OrNot => handler.or_not_annotation(),
    }
}

/// Build the fragment for one declaration
///
/// The metadata variant is used when metadata is present and the handler
/// reads metadata for this mode; otherwise the plain variant.
pub fn build_fragment(
    handler: &dyn OperatorHandler,
    ctx: &BuildContext<'_>,
    field: &str,
    value: &Value,
    mode: CombinationMode,
    metadata: Option<&Metadata>,
) -> Result<Option<ConditionFragment>> {
    let metadata = match mode_support(handler, mode) {
        ModeSupport::Unsupported => {
            return Err(ComposeError::UnsupportedMode {
                operator_kind: handler.kind().to_string(),
                mode,
            })
        }
        ModeSupport::Plain => {
            if metadata.is_some() {
                tracing::debug!(
                    "Operator {} ignores metadata on field '{}'",
                    handler.kind(),
                    field
                );
            }
            None
        }
        ModeSupport::Metadata(_) => metadata,
    };

    match (mode, metadata) {
        (CombinationMode::And, Some(m)) => handler.build_and_predicate(ctx, field, value, m),
        (CombinationMode::And, None) => handler.build_and_predicate_plain(ctx, field, value),
        (CombinationMode::AndNot, Some(m)) => {
            handler.build_and_not_predicate(ctx, field, value, m)
        }
        (CombinationMode::AndNot, None) => {
            handler.build_and_not_predicate_plain(ctx, field, value)
        }
        (CombinationMode::Or, Some(m)) => handler.build_or_predicate(ctx, field, value, m),
        (CombinationMode::Or, None) => handler.build_or_predicate_plain(ctx, field, value),
        (CombinationMode::OrNot, Some(m)) => {
            handler.build_or_not_predicate(ctx, field, value, m)
        }
        (CombinationMode::OrNot, None) => handler.build_or_not_predicate_plain(ctx, field, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComposerConfig;
    use crate::handler::{MetadataKind, RecordShape};
    use crate::predicate::Predicate;
    use crate::Result;

    /// Records which variant was called through the predicate it builds
    struct ModeRecorder {
        not_modes: ModeSupport,
    }

    impl OperatorHandler for ModeRecorder {
        fn kind(&self) -> &str {
            "RECORD_MODE"
        }

        fn and_annotation(&self) -> ModeSupport {
            ModeSupport::Metadata(MetadataKind::Column)
        }

        fn and_not_annotation(&self) -> ModeSupport {
            self.not_modes
        }

        fn or_not_annotation(&self) -> ModeSupport {
            self.not_modes
        }

        fn build_predicate(
            &self,
            _ctx: &BuildContext<'_>,
            field: &str,
            _value: &Value,
            metadata: Option<&Metadata>,
        ) -> Result<Option<Predicate>> {
            let tag = if metadata.is_some() { "meta" } else { "plain" };
            Ok(Some(Predicate::is_null(format!("{field}:{tag}"))))
        }
    }

    fn build(
        handler: &dyn OperatorHandler,
        mode: CombinationMode,
        metadata: Option<&Metadata>,
    ) -> Result<Option<ConditionFragment>> {
        let config = ComposerConfig::default();
        let shape = RecordShape::default();
        let ctx = BuildContext::new(&config, &shape);
        build_fragment(handler, &ctx, "f", &Value::Null, mode, metadata)
    }

    #[test]
    fn test_every_mode_is_tagged() {
        let recorder = ModeRecorder {
            not_modes: ModeSupport::Metadata(MetadataKind::Column),
        };
        let meta = Metadata::column("c");

        for mode in CombinationMode::ALL {
            let fragment = build(&recorder, mode, Some(&meta)).unwrap().unwrap();
            assert_eq!(fragment.mode, mode);
            assert_eq!(fragment.predicate, Predicate::is_null("f:meta"));

            let fragment = build(&recorder, mode, None).unwrap().unwrap();
            assert_eq!(fragment.mode, mode);
            assert_eq!(fragment.predicate, Predicate::is_null("f:plain"));
        }
    }

    #[test]
    fn test_plain_support_drops_metadata() {
        let recorder = ModeRecorder {
            not_modes: ModeSupport::Plain,
        };
        let meta = Metadata::column("c");
        let fragment = build(&recorder, CombinationMode::OrNot, Some(&meta))
            .unwrap()
            .unwrap();
        assert_eq!(fragment.predicate, Predicate::is_null("f:plain"));
    }

    #[test]
    fn test_unsupported_mode_is_an_error() {
        let recorder = ModeRecorder {
            not_modes: ModeSupport::Unsupported,
        };
        assert!(build(&recorder, CombinationMode::And, None).is_ok());
        assert!(build(&recorder, CombinationMode::Or, None).is_ok());

        let err = build(&recorder, CombinationMode::AndNot, None).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::UnsupportedMode { operator_kind, mode: CombinationMode::AndNot }
                if operator_kind == "RECORD_MODE"
        ));
    }
}
