use gcoin_auth::{require_owner, AffiliationPolicy, AuthError};
use gcoin_types::{validate_amount, Account, Record};
use tracing::{debug, info};

use crate::config::ContractConfig;
use crate::context::InvocationContext;
use crate::error::{ContractError, ContractResult};

/// Status returned by a successful mint.
pub const MINT_OK: &str = "Gcoin Created successfully";
/// Status returned by a successful transfer.
pub const TRANSFER_OK: &str = "transaction performed successfully";

/// The account contract.
///
/// Stateless: all state lives in the ledger store reached through the
/// [`InvocationContext`]. Each operation reads what it needs, runs every
/// check, and only then writes.
#[derive(Clone, Debug)]
pub struct AccountContract {
    config: ContractConfig,
    searchers: AffiliationPolicy,
    makers: AffiliationPolicy,
}

impl AccountContract {
    pub fn new(config: ContractConfig) -> Self {
        Self {
            config,
            searchers: AffiliationPolicy::searcher(),
            makers: AffiliationPolicy::maker(),
        }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    // ---- Existence & CRUD ----

    /// `true` iff a non-empty value is stored at `account_id`.
    pub fn exists(&self, ctx: &InvocationContext<'_>, account_id: &str) -> ContractResult<bool> {
        Ok(ctx
            .store
            .get(account_id)?
            .is_some_and(|value| !value.is_empty()))
    }

    /// Register a new account with a zero balance.
    ///
    /// No authorization: any caller may register an account for any owner.
    pub fn create(
        &self,
        ctx: &InvocationContext<'_>,
        account_id: &str,
        owner_enrollment_id: &str,
    ) -> ContractResult<()> {
        if self.exists(ctx, account_id)? {
            return Err(ContractError::AlreadyExists(account_id.to_string()));
        }
        let account = Account::new(owner_enrollment_id);
        self.store_account(ctx, account_id, &account)?;
        info!(tx = %ctx.tx_id, account = account_id, owner = owner_enrollment_id, "account created");
        Ok(())
    }

    /// Return the account if the caller owns it.
    pub fn read(&self, ctx: &InvocationContext<'_>, account_id: &str) -> ContractResult<Account> {
        let account = self.load_account(ctx, account_id)?;
        require_owner(ctx.identity, &account.owner_enrollment_id, account_id)?;
        Ok(account)
    }

    /// Replace the stored value with `raw_value` verbatim.
    ///
    /// The value is not decoded or validated. Ownership is only checked when
    /// `owner_checked_update` is set.
    pub fn update(
        &self,
        ctx: &InvocationContext<'_>,
        account_id: &str,
        raw_value: &[u8],
    ) -> ContractResult<()> {
        if !self.exists(ctx, account_id)? {
            return Err(ContractError::NotFound(account_id.to_string()));
        }
        if self.config.owner_checked_update {
            let account = self.load_account(ctx, account_id)?;
            require_owner(ctx.identity, &account.owner_enrollment_id, account_id)?;
        }
        ctx.store.put(account_id, raw_value.to_vec())?;
        info!(tx = %ctx.tx_id, account = account_id, len = raw_value.len(), "account overwritten");
        Ok(())
    }

    /// Remove the account key.
    ///
    /// Ownership is checked when `owner_checked_delete` is set (the default).
    pub fn delete(&self, ctx: &InvocationContext<'_>, account_id: &str) -> ContractResult<()> {
        if !self.exists(ctx, account_id)? {
            return Err(ContractError::NotFound(account_id.to_string()));
        }
        if self.config.owner_checked_delete {
            let account = self.load_account(ctx, account_id)?;
            require_owner(ctx.identity, &account.owner_enrollment_id, account_id)?;
        }
        ctx.store.delete(account_id)?;
        info!(tx = %ctx.tx_id, account = account_id, "account deleted");
        Ok(())
    }

    // ---- Enumeration ----

    /// Every non-empty entry in the configured key range, in ascending key
    /// order. Requires the `searcher` or `every` affiliation.
    pub fn list_all(&self, ctx: &InvocationContext<'_>) -> ContractResult<Vec<(String, Record)>> {
        self.searchers.check(ctx.identity)?;

        let scan = ctx
            .store
            .range_scan(&self.config.list_start_key, &self.config.list_end_key)?;
        let mut records = Vec::new();
        for entry in scan {
            let entry = entry?;
            if entry.value.is_empty() {
                continue;
            }
            let record = Record::decode(&entry.value);
            if record.as_account().is_none() {
                debug!(key = %entry.key, "listing raw value");
            }
            records.push((entry.key, record));
        }
        debug!(tx = %ctx.tx_id, count = records.len(), "listed accounts");
        Ok(records)
    }

    // ---- Minting ----

    /// Credit `amount` to the caller's own account.
    ///
    /// The caller needs the `maker` or `every` affiliation and must own the
    /// account. `owner_enrollment_id` is accepted for interface
    /// compatibility but never compared against the stored owner.
    pub fn mint(
        &self,
        ctx: &InvocationContext<'_>,
        account_id: &str,
        owner_enrollment_id: &str,
        amount: i64,
    ) -> ContractResult<&'static str> {
        let amount = validate_amount(amount).map_err(|e| ContractError::InvalidAmount(e.to_string()))?;
        let mut account = self.load_account(ctx, account_id)?;
        debug!(
            account = account_id,
            stored_owner = %account.owner_enrollment_id,
            claimed_owner = owner_enrollment_id,
            "mint requested"
        );

        self.makers.check(ctx.identity)?;
        if !account.is_owned_by(ctx.caller()) {
            return Err(AuthError::ForeignMint {
                account: account_id.to_string(),
                caller: ctx.caller().to_string(),
            }
            .into());
        }

        let balance = account
            .credit(amount)
            .map_err(|e| ContractError::InvalidAmount(e.to_string()))?;
        self.store_account(ctx, account_id, &account)?;
        info!(tx = %ctx.tx_id, account = account_id, amount, balance, "minted");
        Ok(MINT_OK)
    }

    // ---- Transfer ----

    /// Move `amount` from `sender_id` to `receiver_id`.
    ///
    /// Only the sender's owner may transfer. The debited sender is written
    /// before the receiver is read, so a self-transfer nets to zero.
    /// `receiver_enrollment_id` is accepted but not validated.
    pub fn transfer(
        &self,
        ctx: &InvocationContext<'_>,
        sender_id: &str,
        receiver_id: &str,
        receiver_enrollment_id: &str,
        amount: i64,
    ) -> ContractResult<&'static str> {
        let amount = validate_amount(amount).map_err(|e| ContractError::InvalidAmount(e.to_string()))?;
        for id in [sender_id, receiver_id] {
            if !self.exists(ctx, id)? {
                return Err(ContractError::NotFound(id.to_string()));
            }
        }

        let mut sender = self.load_account(ctx, sender_id)?;
        if !sender.is_owned_by(ctx.caller()) {
            return Err(AuthError::ForeignTransfer {
                account: sender_id.to_string(),
                owner: sender.owner_enrollment_id.clone(),
            }
            .into());
        }
        debug!(
            sender = sender_id,
            receiver = receiver_id,
            claimed_receiver_owner = receiver_enrollment_id,
            amount,
            "transfer requested"
        );

        let balance = sender.balance;
        if sender.debit(amount).is_none() {
            return Err(ContractError::InsufficientFunds {
                account: sender_id.to_string(),
                balance,
                requested: amount,
            });
        }
        self.store_account(ctx, sender_id, &sender)?;

        let mut receiver = self.load_account(ctx, receiver_id)?;
        receiver
            .credit(amount)
            .map_err(|e| ContractError::InvalidAmount(e.to_string()))?;
        self.store_account(ctx, receiver_id, &receiver)?;

        info!(tx = %ctx.tx_id, sender = sender_id, receiver = receiver_id, amount, "transferred");
        Ok(TRANSFER_OK)
    }

    // ---- Helpers ----

    fn load_account(&self, ctx: &InvocationContext<'_>, account_id: &str) -> ContractResult<Account> {
        let bytes = ctx
            .store
            .get(account_id)?
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ContractError::NotFound(account_id.to_string()))?;
        Account::from_bytes(&bytes).map_err(|e| ContractError::Codec {
            account: account_id.to_string(),
            reason: e.to_string(),
        })
    }

    fn store_account(
        &self,
        ctx: &InvocationContext<'_>,
        account_id: &str,
        account: &Account,
    ) -> ContractResult<()> {
        let bytes = account.to_bytes().map_err(|e| ContractError::Codec {
            account: account_id.to_string(),
            reason: e.to_string(),
        })?;
        ctx.store.put(account_id, bytes)?;
        Ok(())
    }
}

impl Default for AccountContract {
    fn default() -> Self {
        Self::new(ContractConfig::default())
    }
}
