use super::CompiledStatement;
use crate::error::RowsetResult;

/// Base trait for statement builders.
pub trait StatementBuilder {
    /// Validate the spec. Runs to completion before any SQL text exists:
    /// entity names against the injection denylist, then structural
    /// requirements.
    fn validate(&self) -> RowsetResult<()>;

    /// Assemble SQL text and its ordered parameter list.
    ///
    /// Implementations may assume [`StatementBuilder::validate`] passed.
    fn compile(&self) -> RowsetResult<CompiledStatement>;

    /// Validate, then compile.
    fn build(&self) -> RowsetResult<CompiledStatement> {
        self.validate()?;
        let compiled = self.compile()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "rowset.sql",
            sql = %compiled.sql,
            param_count = compiled.params.len(),
            "compiled statement"
        );
        Ok(compiled)
    }
}
