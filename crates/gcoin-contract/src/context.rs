use gcoin_auth::IdentityContext;
use gcoin_store::LedgerStore;
use uuid::Uuid;

/// Everything one invocation may touch: ledger state and the caller.
///
/// Operations receive the context explicitly; nothing about the caller or
/// the store is read from process-wide state.
pub struct InvocationContext<'a> {
    pub store: &'a dyn LedgerStore,
    pub identity: &'a dyn IdentityContext,
    pub tx_id: Uuid,
}

impl<'a> InvocationContext<'a> {
    /// Context with a freshly generated transaction id.
    pub fn new(store: &'a dyn LedgerStore, identity: &'a dyn IdentityContext) -> Self {
        Self::with_tx_id(store, identity, Uuid::now_v7())
    }

    pub fn with_tx_id(
        store: &'a dyn LedgerStore,
        identity: &'a dyn IdentityContext,
        tx_id: Uuid,
    ) -> Self {
        Self {
            store,
            identity,
            tx_id,
        }
    }

    /// Label of the invoking caller.
    pub fn caller(&self) -> &str {
        self.identity.caller_label()
    }
}

impl std::fmt::Debug for InvocationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocationContext")
            .field("caller", &self.caller())
            .field("tx_id", &self.tx_id)
            .finish_non_exhaustive()
    }
}
