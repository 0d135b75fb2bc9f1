use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::events::{Event, EventStore};
use crate::interest::{calculate_accruals, fee_accruals, TierAccrual};
use crate::ledger::{LedgerPort, PostingInstruction, PostingLeg};
use crate::requests::{AccrualRequest, AddressMapping, FeeRequest};
use crate::types::{ChargeType, InstructionDetails, Tside, DEFAULT_ADDRESS, DEFAULT_ASSET};

/// per-invocation call metadata shared by every entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualContext {
    pub tside: Tside,
    pub effective_date: NaiveDate,
    /// event name stamped into instruction details
    pub event_type: String,
    /// product tag stamped into instruction details
    pub account_type: String,
    pub number_of_days: u32,
}

impl AccrualContext {
    pub fn new(
        tside: Tside,
        effective_date: NaiveDate,
        event_type: impl Into<String>,
        account_type: impl Into<String>,
    ) -> Self {
        Self {
            tside,
            effective_date,
            event_type: event_type.into(),
            account_type: account_type.into(),
            number_of_days: 1,
        }
    }
}

/// which side of the payable/receivable pair an amount settles on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// the bank owes the customer
    Payable,
    /// the customer owes the bank
    Receivable,
}

/// positive amounts on a liability and negative amounts on an asset are
/// money the bank pays out; everything else is money the bank collects
pub fn scenario_for(amount: Money, tside: Tside) -> Scenario {
    let payable = (amount > Decimal::ZERO && tside == Tside::Liability)
        || (amount < Decimal::ZERO && tside == Tside::Asset);
    if payable {
        Scenario::Payable
    } else {
        Scenario::Receivable
    }
}

/// idempotency key for one logical movement within an execution
pub(crate) fn client_transaction_id(
    prefix: &str,
    execution_id: &str,
    address: &str,
    asset: &str,
    denomination: &str,
    tier_name: Option<&str>,
) -> String {
    let tier = match tier_name {
        Some(name) if !name.is_empty() => format!("{}_", name.to_uppercase()),
        _ => String::new(),
    };
    format!("{tier}{prefix}_{execution_id}_{address}_{asset}_{denomination}")
}

/// one accrual-topology posting pair waiting to be constructed
pub(crate) struct AccrualPosting<'a> {
    pub prefix: &'a str,
    pub tier_name: Option<&'a str>,
    pub denomination: &'a str,
    pub amount: Money,
    pub description: &'a str,
    pub capitalise_into: Option<&'a str>,
    pub reverse: bool,
}

pub(crate) fn require(value: &str, role: &str) -> Result<()> {
    if value.is_empty() {
        return Err(EngineError::MissingAddress {
            role: role.to_string(),
        });
    }
    Ok(())
}

/// construct the posting pair for one signed accrual amount
///
/// zero amounts construct nothing. capitalised accruals settle the customer
/// leg at the capitalisation target and offset against the paid/received
/// internal account instead of the payable/receivable one
pub(crate) fn build_accrual_instruction(
    ledger: &impl LedgerPort,
    ctx: &AccrualContext,
    mapping: &AddressMapping,
    posting: AccrualPosting<'_>,
) -> Result<Option<PostingInstruction>> {
    if posting.amount.is_zero() {
        return Ok(None);
    }

    let scenario = scenario_for(posting.amount, ctx.tside);
    let (customer_address, address_role, internal_account, account_role) =
        match (scenario, posting.capitalise_into) {
            (Scenario::Payable, None) => (
                mapping.payable_address.as_str(),
                "payable_address",
                mapping.payable_internal_account.as_str(),
                "payable_internal_account",
            ),
            (Scenario::Receivable, None) => (
                mapping.receivable_address.as_str(),
                "receivable_address",
                mapping.receivable_internal_account.as_str(),
                "receivable_internal_account",
            ),
            (Scenario::Payable, Some(target)) => (
                target,
                "capitalise_into",
                mapping.paid_internal_account.as_str(),
                "paid_internal_account",
            ),
            (Scenario::Receivable, Some(target)) => (
                target,
                "capitalise_into",
                mapping.received_internal_account.as_str(),
                "received_internal_account",
            ),
        };
    require(customer_address, address_role)?;
    require(internal_account, account_role)?;

    let customer = PostingLeg::new(ledger.account_id(), customer_address);
    let internal = PostingLeg::new(internal_account, DEFAULT_ADDRESS);
    let (debit, credit) = match scenario {
        Scenario::Payable => (internal, customer),
        Scenario::Receivable => (customer, internal),
    };
    let (debit, credit) = if posting.reverse {
        (credit, debit)
    } else {
        (debit, credit)
    };

    Ok(Some(PostingInstruction {
        amount: posting.amount.abs(),
        denomination: posting.denomination.to_string(),
        asset: DEFAULT_ASSET.to_string(),
        client_transaction_id: client_transaction_id(
            posting.prefix,
            &ledger.execution_id(),
            customer_address,
            DEFAULT_ASSET,
            posting.denomination,
            posting.tier_name,
        ),
        debit,
        credit,
        details: InstructionDetails::new(
            posting.description,
            ctx.event_type.clone(),
            true,
            ctx.account_type.clone(),
        ),
        override_all_restrictions: true,
    }))
}

/// collapse per-tier accruals into one signed amount and one description
fn net_accruals(accruals: &[TierAccrual]) -> TierAccrual {
    TierAccrual {
        name: String::new(),
        amount: accruals.iter().map(|accrual| accrual.amount).sum(),
        description: accruals
            .iter()
            .map(|accrual| accrual.description.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// accrue a rate-based charge for each request, returning the instructions
/// to hand to the ledger
pub fn accrue_interest(
    ledger: &impl LedgerPort,
    ctx: &AccrualContext,
    charge_type: ChargeType,
    requests: &[AccrualRequest],
    events: &mut EventStore,
) -> Result<Vec<PostingInstruction>> {
    let mut instructions = Vec::new();
    let prefix = format!("ACCRUE_{charge_type}");

    for request in requests {
        let accruals = calculate_accruals(request, ctx.effective_date, ctx.number_of_days)?;
        if accruals.is_empty() {
            continue;
        }

        let mut built_any = false;
        if request.net_postings {
            let netted = net_accruals(&accruals);
            let description = request.description.as_deref().unwrap_or(&netted.description);
            let built = build_accrual_instruction(
                ledger,
                ctx,
                &request.mapping,
                AccrualPosting {
                    prefix: &prefix,
                    tier_name: None,
                    denomination: &request.denomination,
                    amount: netted.amount,
                    description,
                    capitalise_into: request.capitalise_into.as_deref(),
                    reverse: false,
                },
            )?;
            if let Some(instruction) = built {
                instructions.push(instruction);
                built_any = true;
            }
        } else {
            for accrual in &accruals {
                let description = request.description.as_deref().unwrap_or(&accrual.description);
                let built = build_accrual_instruction(
                    ledger,
                    ctx,
                    &request.mapping,
                    AccrualPosting {
                        prefix: &prefix,
                        tier_name: Some(&accrual.name),
                        denomination: &request.denomination,
                        amount: accrual.amount,
                        description,
                        capitalise_into: request.capitalise_into.as_deref(),
                        reverse: false,
                    },
                )?;
                if let Some(instruction) = built {
                    instructions.push(instruction);
                    built_any = true;
                }
            }
        }

        if built_any {
            let total: Money = accruals.iter().map(|accrual| accrual.amount).sum();
            match charge_type {
                ChargeType::Interest => events.emit(Event::InterestAccrued {
                    account_id: ledger.account_id().to_string(),
                    denomination: request.denomination.clone(),
                    amount: total,
                    number_of_days: ctx.number_of_days,
                    effective_date: ctx.effective_date,
                }),
                ChargeType::Fees => events.emit(Event::FeeAccrued {
                    account_id: ledger.account_id().to_string(),
                    denomination: request.denomination.clone(),
                    fee_name: String::new(),
                    amount: total,
                    effective_date: ctx.effective_date,
                }),
            }
        }
    }

    Ok(instructions)
}

/// accrue flat fees; always one posting pair per fee, never netted
pub fn accrue_fees(
    ledger: &impl LedgerPort,
    ctx: &AccrualContext,
    requests: &[FeeRequest],
    events: &mut EventStore,
) -> Result<Vec<PostingInstruction>> {
    let mut instructions = Vec::new();
    let prefix = format!("ACCRUE_{}", ChargeType::Fees);

    for request in requests {
        for accrual in fee_accruals(request) {
            // the fee name takes the tier slot so same-signed fees in one
            // execution keep distinct ids
            let built = build_accrual_instruction(
                ledger,
                ctx,
                &request.mapping,
                AccrualPosting {
                    prefix: &prefix,
                    tier_name: Some(&accrual.name),
                    denomination: &request.denomination,
                    amount: accrual.amount,
                    description: &accrual.description,
                    capitalise_into: None,
                    reverse: false,
                },
            )?;
            if let Some(instruction) = built {
                instructions.push(instruction);
                events.emit(Event::FeeAccrued {
                    account_id: ledger.account_id().to_string(),
                    denomination: request.denomination.clone(),
                    fee_name: accrual.name.clone(),
                    amount: accrual.amount,
                    effective_date: ctx.effective_date,
                });
            }
        }
    }

    Ok(instructions)
}
