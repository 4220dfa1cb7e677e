use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A read reached an empty chain. Construction always installs a genesis
    /// block, so hitting this is an invariant violation, not a runtime state.
    #[error("chain is empty")]
    EmptyChain,
}
