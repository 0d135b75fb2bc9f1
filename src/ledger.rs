use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::types::{InstructionDetails, Tside};

/// one side of a double-entry posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingLeg {
    pub account_id: String,
    pub address: String,
}

impl PostingLeg {
    pub fn new(account_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            address: address.into(),
        }
    }
}

/// a double-entry transfer instruction for the host ledger
///
/// the amount is always non-negative; direction lives in the legs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingInstruction {
    pub amount: Money,
    pub denomination: String,
    pub asset: String,
    /// idempotency key, deterministic per execution/address/asset/denomination/tier
    pub client_transaction_id: String,
    pub debit: PostingLeg,
    pub credit: PostingLeg,
    pub details: InstructionDetails,
    pub override_all_restrictions: bool,
}

/// host ledger capability injected into every entry point
pub trait LedgerPort {
    fn account_id(&self) -> &str;
    fn execution_id(&self) -> String;
    fn post_transfer(&mut self, instruction: &PostingInstruction) -> Result<()>;
}

/// post a batch in order, stopping at the first rejection
pub fn post_all(ledger: &mut impl LedgerPort, instructions: &[PostingInstruction]) -> Result<()> {
    for instruction in instructions {
        ledger.post_transfer(instruction)?;
    }
    Ok(())
}

/// net balances observed at the customer account
///
/// balances are tside-adjusted: positive means the address holds value in
/// the direction the account accrues it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerBalances {
    balances: HashMap<(String, String), Money>,
}

impl LedgerBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, address: impl Into<String>, denomination: impl Into<String>, amount: Money) {
        self.balances
            .insert((address.into(), denomination.into()), amount);
    }

    /// net balance at an address, zero when the address has never been posted to
    pub fn net(&self, address: &str, denomination: &str) -> Money {
        self.balances
            .get(&(address.to_string(), denomination.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// a posting accepted by the in-memory ledger
#[derive(Debug, Clone, PartialEq)]
pub struct PostedEntry {
    pub entry_id: Uuid,
    pub instruction: PostingInstruction,
}

/// in-memory ledger modelling the customer account, used by tests and demos
///
/// only legs on the customer account move balances; internal accounts are
/// outside the model
#[derive(Debug)]
pub struct MemoryLedger {
    account_id: String,
    execution_id: String,
    tside: Tside,
    posted: Vec<PostedEntry>,
    balances: HashMap<(String, String), Money>,
}

impl MemoryLedger {
    pub fn new(
        account_id: impl Into<String>,
        execution_id: impl Into<String>,
        tside: Tside,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            execution_id: execution_id.into(),
            tside,
            posted: Vec::new(),
            balances: HashMap::new(),
        }
    }

    /// start a new hook execution against the same account
    ///
    /// transaction ids embed the execution id, so a fresh execution lets the
    /// same logical accrual post again the next day
    pub fn begin_execution(&mut self, execution_id: impl Into<String>) {
        self.execution_id = execution_id.into();
    }

    pub fn posted(&self) -> &[PostedEntry] {
        &self.posted
    }

    /// snapshot of the customer account's net balances
    pub fn balances(&self) -> LedgerBalances {
        LedgerBalances {
            balances: self.balances.clone(),
        }
    }

    pub fn net(&self, address: &str, denomination: &str) -> Money {
        self.balances
            .get(&(address.to_string(), denomination.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn move_balance(&mut self, address: &str, denomination: &str, signed: Money) {
        let key = (address.to_string(), denomination.to_string());
        *self.balances.entry(key).or_insert(Decimal::ZERO) += signed;
    }
}

impl LedgerPort for MemoryLedger {
    fn account_id(&self) -> &str {
        &self.account_id
    }

    fn execution_id(&self) -> String {
        self.execution_id.clone()
    }

    fn post_transfer(&mut self, instruction: &PostingInstruction) -> Result<()> {
        if self
            .posted
            .iter()
            .any(|entry| entry.instruction.client_transaction_id == instruction.client_transaction_id)
        {
            return Err(EngineError::DuplicateClientTransactionId {
                id: instruction.client_transaction_id.clone(),
            });
        }

        // debits raise an asset-side balance and lower a liability-side one;
        // credits do the opposite
        let debit_sign = match self.tside {
            Tside::Asset => Decimal::ONE,
            Tside::Liability => -Decimal::ONE,
        };
        if instruction.debit.account_id == self.account_id {
            self.move_balance(
                &instruction.debit.address,
                &instruction.denomination,
                debit_sign * instruction.amount,
            );
        }
        if instruction.credit.account_id == self.account_id {
            self.move_balance(
                &instruction.credit.address,
                &instruction.denomination,
                -debit_sign * instruction.amount,
            );
        }

        self.posted.push(PostedEntry {
            entry_id: Uuid::new_v4(),
            instruction: instruction.clone(),
        });
        Ok(())
    }
}
