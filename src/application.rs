use crate::decimal::round_decimal;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::ledger::{LedgerBalances, LedgerPort, PostingInstruction, PostingLeg};
use crate::postings::{
    build_accrual_instruction, client_transaction_id, require, scenario_for, AccrualContext,
    AccrualPosting, Scenario,
};
use crate::requests::{AccrualRequest, ChargeApplicationRequest};
use crate::types::{ChargeType, InstructionDetails, DEFAULT_ADDRESS, DEFAULT_ASSET};

/// the payable or receivable half of a mapping during application
struct ApplicationSide<'a> {
    accrued_address: &'a str,
    accrual_internal: &'a str,
    accrual_internal_role: &'a str,
    settlement_internal: &'a str,
    settlement_internal_role: &'a str,
}

fn sides(request: &ChargeApplicationRequest) -> [ApplicationSide<'_>; 2] {
    [
        ApplicationSide {
            accrued_address: request.mapping.payable_address.as_str(),
            accrual_internal: request.mapping.payable_internal_account.as_str(),
            accrual_internal_role: "payable_internal_account",
            settlement_internal: request.mapping.paid_internal_account.as_str(),
            settlement_internal_role: "paid_internal_account",
        },
        ApplicationSide {
            accrued_address: request.mapping.receivable_address.as_str(),
            accrual_internal: request.mapping.receivable_internal_account.as_str(),
            accrual_internal_role: "receivable_internal_account",
            settlement_internal: request.mapping.received_internal_account.as_str(),
            settlement_internal_role: "received_internal_account",
        },
    ]
}

/// move accrued balances into their applied form
///
/// per configured side: the rounded application moves through a primary
/// pair into `apply_address` and an offset pair drains the accrued address.
/// with `zero_out_remainder`, the sub-precision residue is posted away so
/// the accrued address lands exactly on zero
pub fn apply_charges(
    ledger: &impl LedgerPort,
    ctx: &AccrualContext,
    charge_type: ChargeType,
    balances: &LedgerBalances,
    requests: &[ChargeApplicationRequest],
    events: &mut EventStore,
) -> Result<Vec<PostingInstruction>> {
    let mut instructions = Vec::new();
    let prefix = format!("APPLY_ACCRUED_{charge_type}");
    let offset_prefix = format!("{prefix}_OFFSET");
    let remainder_prefix = format!("{prefix}_REMAINDER");

    for request in requests {
        for side in sides(request) {
            if side.accrued_address.is_empty() {
                continue;
            }
            let balance = balances.net(side.accrued_address, &request.denomination);
            if balance.is_zero() {
                continue;
            }

            let application = round_decimal(balance, request.precision, request.rounding_mode);
            let remainder = balance - application;
            let built_before = instructions.len();

            if !application.is_zero() {
                require(&request.apply_address, "apply_address")?;
                require(side.settlement_internal, side.settlement_internal_role)?;
                require(side.accrual_internal, side.accrual_internal_role)?;

                let scenario = scenario_for(application, ctx.tside);
                let amount = application.abs();

                let customer_apply =
                    PostingLeg::new(ledger.account_id(), request.apply_address.as_str());
                let settlement = PostingLeg::new(side.settlement_internal, DEFAULT_ADDRESS);
                let (debit, credit) = match scenario {
                    Scenario::Payable => (settlement, customer_apply),
                    Scenario::Receivable => (customer_apply, settlement),
                };
                instructions.push(PostingInstruction {
                    amount,
                    denomination: request.denomination.clone(),
                    asset: DEFAULT_ASSET.to_string(),
                    client_transaction_id: client_transaction_id(
                        &prefix,
                        &ledger.execution_id(),
                        side.accrued_address,
                        DEFAULT_ASSET,
                        &request.denomination,
                        None,
                    ),
                    debit,
                    credit,
                    details: InstructionDetails::new(
                        format!("Accrued {} applied.", charge_type.noun()),
                        ctx.event_type.clone(),
                        true,
                        ctx.account_type.clone(),
                    ),
                    override_all_restrictions: true,
                });

                let customer_accrued =
                    PostingLeg::new(ledger.account_id(), side.accrued_address);
                let accrual_internal = PostingLeg::new(side.accrual_internal, DEFAULT_ADDRESS);
                let (debit, credit) = match scenario {
                    Scenario::Payable => (customer_accrued, accrual_internal),
                    Scenario::Receivable => (accrual_internal, customer_accrued),
                };
                instructions.push(PostingInstruction {
                    amount,
                    denomination: request.denomination.clone(),
                    asset: DEFAULT_ASSET.to_string(),
                    client_transaction_id: client_transaction_id(
                        &offset_prefix,
                        &ledger.execution_id(),
                        side.accrued_address,
                        DEFAULT_ASSET,
                        &request.denomination,
                        None,
                    ),
                    debit,
                    credit,
                    details: InstructionDetails::new(
                        format!("Offsetting applied accrued {}.", charge_type.noun()),
                        ctx.event_type.clone(),
                        true,
                        ctx.account_type.clone(),
                    ),
                    override_all_restrictions: true,
                });
            }

            if request.zero_out_remainder && !remainder.is_zero() {
                // a remainder with the application's sign is accrual we
                // already posted and must unwind; an opposite-signed
                // remainder is accrual we still owe the books
                let reversal = (remainder.is_sign_positive() == application.is_sign_positive())
                    || application.is_zero();
                let (posted_amount, reverse, description) = if reversal {
                    (
                        remainder,
                        true,
                        format!("Reversing remainder of accrued {}.", charge_type.noun()),
                    )
                } else {
                    (
                        -remainder,
                        false,
                        format!("Accruing remainder of {}.", charge_type.noun()),
                    )
                };
                let built = build_accrual_instruction(
                    ledger,
                    ctx,
                    &request.mapping,
                    AccrualPosting {
                        prefix: &remainder_prefix,
                        tier_name: None,
                        denomination: &request.denomination,
                        amount: posted_amount,
                        description: &description,
                        capitalise_into: None,
                        reverse,
                    },
                )?;
                if let Some(instruction) = built {
                    instructions.push(instruction);
                }
            }

            if instructions.len() > built_before {
                events.emit(Event::ChargeApplied {
                    account_id: ledger.account_id().to_string(),
                    denomination: request.denomination.clone(),
                    charge_type,
                    accrued_address: side.accrued_address.to_string(),
                    application,
                    remainder,
                    effective_date: ctx.effective_date,
                });
            }
        }
    }

    Ok(instructions)
}

/// unwind every outstanding accrued interest balance, e.g. on account closure
pub fn reverse_interest(
    ledger: &impl LedgerPort,
    ctx: &AccrualContext,
    balances: &LedgerBalances,
    requests: &[AccrualRequest],
    description: Option<&str>,
    events: &mut EventStore,
) -> Result<Vec<PostingInstruction>> {
    let mut instructions = Vec::new();
    let prefix = format!("REVERSE_ACCRUED_{}", ChargeType::Interest);
    let description = description.unwrap_or("Reversing accrued interest");

    for request in requests {
        let addresses = [
            request.mapping.payable_address.as_str(),
            request.mapping.receivable_address.as_str(),
        ];
        for accrued_address in addresses {
            if accrued_address.is_empty() {
                continue;
            }
            let balance = balances.net(accrued_address, &request.denomination);
            if balance.is_zero() {
                continue;
            }

            let built = build_accrual_instruction(
                ledger,
                ctx,
                &request.mapping,
                AccrualPosting {
                    prefix: &prefix,
                    tier_name: None,
                    denomination: &request.denomination,
                    amount: balance,
                    description,
                    capitalise_into: None,
                    reverse: true,
                },
            )?;
            if let Some(instruction) = built {
                instructions.push(instruction);
                events.emit(Event::AccrualReversed {
                    account_id: ledger.account_id().to_string(),
                    denomination: request.denomination.clone(),
                    accrued_address: accrued_address.to_string(),
                    amount: balance,
                    effective_date: ctx.effective_date,
                });
            }
        }
    }

    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interest::DayCountBasis;
    use crate::ledger::{post_all, MemoryLedger};
    use crate::postings::accrue_interest;
    use crate::requests::AddressMapping;
    use crate::types::Tside;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn context(tside: Tside, event_type: &str) -> AccrualContext {
        AccrualContext::new(
            tside,
            NaiveDate::from_ymd_opt(2019, 1, 31).unwrap(),
            event_type,
            "SAVINGS",
        )
    }

    fn accrue_deposit_interest(ledger: &mut MemoryLedger, balance: Decimal) {
        let mut events = EventStore::new();
        let mut request = AccrualRequest::flat_rate(
            "GBP",
            balance,
            dec!(0.031),
            AddressMapping::accrued_interest(),
        );
        request.day_count_basis = DayCountBasis::Fixed365;
        let instructions = accrue_interest(
            ledger,
            &context(Tside::Liability, "ACCRUE_INTEREST"),
            ChargeType::Interest,
            &[request],
            &mut events,
        )
        .unwrap();
        post_all(ledger, &instructions).unwrap();
    }

    fn application_request(zero_out_remainder: bool) -> ChargeApplicationRequest {
        let mut request = ChargeApplicationRequest::new(
            "GBP",
            DEFAULT_ADDRESS,
            AddressMapping::accrued_interest(),
        );
        request.zero_out_remainder = zero_out_remainder;
        request
    }

    #[test]
    fn test_application_zeroes_the_accrued_address() {
        let mut ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        accrue_deposit_interest(&mut ledger, dec!(1000));
        assert_eq!(ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP"), dec!(0.08493));

        let instructions = apply_charges(
            &ledger,
            &context(Tside::Liability, "APPLY_ACCRUED_INTEREST"),
            ChargeType::Interest,
            &ledger.balances(),
            &[application_request(true)],
            &mut events,
        )
        .unwrap();
        assert_eq!(instructions.len(), 3);
        post_all(&mut ledger, &instructions).unwrap();

        assert_eq!(ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP"), dec!(0));
        assert_eq!(ledger.net(DEFAULT_ADDRESS, "GBP"), dec!(0.08));
    }

    #[test]
    fn test_application_posting_topology_and_ids() {
        let mut ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        accrue_deposit_interest(&mut ledger, dec!(1000));

        let instructions = apply_charges(
            &ledger,
            &context(Tside::Liability, "APPLY_ACCRUED_INTEREST"),
            ChargeType::Interest,
            &ledger.balances(),
            &[application_request(true)],
            &mut events,
        )
        .unwrap();

        let primary = &instructions[0];
        assert_eq!(primary.amount, dec!(0.08));
        assert_eq!(primary.debit.account_id, "INTEREST_PAID_ACCOUNT");
        assert_eq!(primary.credit.account_id, "Main account");
        assert_eq!(primary.credit.address, DEFAULT_ADDRESS);
        assert_eq!(
            primary.client_transaction_id,
            "APPLY_ACCRUED_INTEREST_MOCK_HOOK_ACCRUED_INTEREST_PAYABLE_COMMERCIAL_BANK_MONEY_GBP"
        );
        assert_eq!(primary.details.description, "Accrued interest applied.");

        let offset = &instructions[1];
        assert_eq!(offset.amount, dec!(0.08));
        assert_eq!(offset.debit.account_id, "Main account");
        assert_eq!(offset.debit.address, "ACCRUED_INTEREST_PAYABLE");
        assert_eq!(offset.credit.account_id, "ACCRUED_INTEREST_PAYABLE_ACCOUNT");
        assert_eq!(
            offset.client_transaction_id,
            "APPLY_ACCRUED_INTEREST_OFFSET_MOCK_HOOK_ACCRUED_INTEREST_PAYABLE_COMMERCIAL_BANK_MONEY_GBP"
        );

        let remainder = &instructions[2];
        assert_eq!(remainder.amount, dec!(0.00493));
        assert_eq!(remainder.debit.account_id, "Main account");
        assert_eq!(remainder.debit.address, "ACCRUED_INTEREST_PAYABLE");
        assert_eq!(
            remainder.client_transaction_id,
            "APPLY_ACCRUED_INTEREST_REMAINDER_MOCK_HOOK_ACCRUED_INTEREST_PAYABLE_COMMERCIAL_BANK_MONEY_GBP"
        );
        assert_eq!(
            remainder.details.description,
            "Reversing remainder of accrued interest."
        );
    }

    #[test]
    fn test_opposite_signed_remainder_accrues_the_difference() {
        // 0.085 rounds up to 0.09, so the books are short 0.005
        let ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        let mut balances = LedgerBalances::new();
        balances.set("ACCRUED_INTEREST_PAYABLE", "GBP", dec!(0.085));

        let instructions = apply_charges(
            &ledger,
            &context(Tside::Liability, "APPLY_ACCRUED_INTEREST"),
            ChargeType::Interest,
            &balances,
            &[application_request(true)],
            &mut events,
        )
        .unwrap();

        assert_eq!(instructions.len(), 3);
        let remainder = &instructions[2];
        assert_eq!(remainder.amount, dec!(0.005));
        // posted in the accrual direction, not reversed
        assert_eq!(remainder.debit.account_id, "ACCRUED_INTEREST_PAYABLE_ACCOUNT");
        assert_eq!(remainder.credit.account_id, "Main account");
        assert_eq!(remainder.credit.address, "ACCRUED_INTEREST_PAYABLE");
        assert_eq!(remainder.details.description, "Accruing remainder of interest.");

        // replaying onto a ledger seeded with the same balance lands on zero
        let mut replay = MemoryLedger::new("Main account", "SEED_HOOK", Tside::Liability);
        let seed = PostingInstruction {
            amount: dec!(0.085),
            denomination: "GBP".to_string(),
            asset: DEFAULT_ASSET.to_string(),
            client_transaction_id: "SEED".to_string(),
            debit: PostingLeg::new("ACCRUED_INTEREST_PAYABLE_ACCOUNT", DEFAULT_ADDRESS),
            credit: PostingLeg::new("Main account", "ACCRUED_INTEREST_PAYABLE"),
            details: InstructionDetails::new("seed", "SEED", true, "SAVINGS"),
            override_all_restrictions: true,
        };
        replay.post_transfer(&seed).unwrap();
        post_all(&mut replay, &instructions).unwrap();
        assert_eq!(replay.net("ACCRUED_INTEREST_PAYABLE", "GBP"), dec!(0));
        assert_eq!(replay.net(DEFAULT_ADDRESS, "GBP"), dec!(0.09));
    }

    #[test]
    fn test_zero_application_still_zeroes_out_the_remainder() {
        let ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        let mut balances = LedgerBalances::new();
        balances.set("ACCRUED_INTEREST_PAYABLE", "GBP", dec!(0.004));

        let instructions = apply_charges(
            &ledger,
            &context(Tside::Liability, "APPLY_ACCRUED_INTEREST"),
            ChargeType::Interest,
            &balances,
            &[application_request(true)],
            &mut events,
        )
        .unwrap();

        // nothing to apply, one reversed remainder posting
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].amount, dec!(0.004));
        assert_eq!(instructions[0].debit.account_id, "Main account");
        match &events.events()[0] {
            Event::ChargeApplied {
                application,
                remainder,
                ..
            } => {
                assert_eq!(*application, dec!(0));
                assert_eq!(*remainder, dec!(0.004));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_remainder_left_in_place_without_zero_out() {
        let mut ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        accrue_deposit_interest(&mut ledger, dec!(1000));

        let instructions = apply_charges(
            &ledger,
            &context(Tside::Liability, "APPLY_ACCRUED_INTEREST"),
            ChargeType::Interest,
            &ledger.balances(),
            &[application_request(false)],
            &mut events,
        )
        .unwrap();
        assert_eq!(instructions.len(), 2);
        post_all(&mut ledger, &instructions).unwrap();

        assert_eq!(ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP"), dec!(0.00493));
        assert_eq!(ledger.net(DEFAULT_ADDRESS, "GBP"), dec!(0.08));
    }

    #[test]
    fn test_asset_receivable_application() {
        let mut ledger = MemoryLedger::new("Loan account", "MOCK_HOOK", Tside::Asset);
        let mut events = EventStore::new();
        let mut request = AccrualRequest::flat_rate(
            "GBP",
            dec!(1000),
            dec!(0.031),
            AddressMapping::accrued_interest(),
        );
        request.day_count_basis = DayCountBasis::Fixed365;
        let accrued = accrue_interest(
            &ledger,
            &context(Tside::Asset, "ACCRUE_INTEREST"),
            ChargeType::Interest,
            &[request],
            &mut events,
        )
        .unwrap();
        post_all(&mut ledger, &accrued).unwrap();
        assert_eq!(ledger.net("ACCRUED_INTEREST_RECEIVABLE", "GBP"), dec!(0.08493));

        let mut application = ChargeApplicationRequest::new(
            "GBP",
            "INTEREST_DUE",
            AddressMapping::accrued_interest(),
        );
        application.zero_out_remainder = true;
        let instructions = apply_charges(
            &ledger,
            &context(Tside::Asset, "APPLY_ACCRUED_INTEREST"),
            ChargeType::Interest,
            &ledger.balances(),
            &[application],
            &mut events,
        )
        .unwrap();
        post_all(&mut ledger, &instructions).unwrap();

        assert_eq!(ledger.net("ACCRUED_INTEREST_RECEIVABLE", "GBP"), dec!(0));
        assert_eq!(ledger.net("INTEREST_DUE", "GBP"), dec!(0.08));

        let primary = &instructions[0];
        assert_eq!(primary.debit.account_id, "Loan account");
        assert_eq!(primary.debit.address, "INTEREST_DUE");
        assert_eq!(primary.credit.account_id, "INTEREST_RECEIVED_ACCOUNT");
    }

    #[test]
    fn test_blank_side_is_skipped() {
        let ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        let mut balances = LedgerBalances::new();
        balances.set("ACCRUED_INTEREST_PAYABLE", "GBP", dec!(0.08));

        let mut request = application_request(true);
        request.mapping.receivable_address = String::new();
        request.mapping.receivable_internal_account = String::new();
        request.mapping.received_internal_account = String::new();

        let instructions = apply_charges(
            &ledger,
            &context(Tside::Liability, "APPLY_ACCRUED_INTEREST"),
            ChargeType::Interest,
            &balances,
            &[request],
            &mut events,
        )
        .unwrap();
        assert_eq!(instructions.len(), 2);
        assert_eq!(events.events().len(), 1);
    }

    #[test]
    fn test_fee_application_uses_fee_accounts_and_ids() {
        let mut ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        let seed = PostingInstruction {
            amount: dec!(15),
            denomination: "GBP".to_string(),
            asset: DEFAULT_ASSET.to_string(),
            client_transaction_id: "SEED".to_string(),
            debit: PostingLeg::new("Main account", "ACCRUED_FEES_RECEIVABLE"),
            credit: PostingLeg::new("ACCRUED_FEES_RECEIVABLE_ACCOUNT", DEFAULT_ADDRESS),
            details: InstructionDetails::new("seed", "SEED", true, "SAVINGS"),
            override_all_restrictions: true,
        };
        ledger.post_transfer(&seed).unwrap();
        assert_eq!(ledger.net("ACCRUED_FEES_RECEIVABLE", "GBP"), dec!(-15));

        let mut request = ChargeApplicationRequest::new(
            "GBP",
            DEFAULT_ADDRESS,
            AddressMapping::accrued_fees(),
        );
        request.zero_out_remainder = true;
        let instructions = apply_charges(
            &ledger,
            &context(Tside::Liability, "APPLY_ACCRUED_FEES"),
            ChargeType::Fees,
            &ledger.balances(),
            &[request],
            &mut events,
        )
        .unwrap();
        post_all(&mut ledger, &instructions).unwrap();

        assert_eq!(instructions.len(), 2);
        assert_eq!(
            instructions[0].client_transaction_id,
            "APPLY_ACCRUED_FEES_MOCK_HOOK_ACCRUED_FEES_RECEIVABLE_COMMERCIAL_BANK_MONEY_GBP"
        );
        assert_eq!(instructions[0].details.description, "Accrued fees applied.");
        assert_eq!(ledger.net("ACCRUED_FEES_RECEIVABLE", "GBP"), dec!(0));
        assert_eq!(ledger.net(DEFAULT_ADDRESS, "GBP"), dec!(-15));
    }

    #[test]
    fn test_reverse_interest_zeroes_both_sides() {
        let mut ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        for (id, debit, credit) in [
            (
                "SEED_PAYABLE",
                PostingLeg::new("ACCRUED_INTEREST_PAYABLE_ACCOUNT", DEFAULT_ADDRESS),
                PostingLeg::new("Main account", "ACCRUED_INTEREST_PAYABLE"),
            ),
            (
                "SEED_RECEIVABLE",
                PostingLeg::new("Main account", "ACCRUED_INTEREST_RECEIVABLE"),
                PostingLeg::new("ACCRUED_INTEREST_RECEIVABLE_ACCOUNT", DEFAULT_ADDRESS),
            ),
        ] {
            let seed = PostingInstruction {
                amount: dec!(0.5),
                denomination: "GBP".to_string(),
                asset: DEFAULT_ASSET.to_string(),
                client_transaction_id: id.to_string(),
                debit,
                credit,
                details: InstructionDetails::new("seed", "SEED", true, "SAVINGS"),
                override_all_restrictions: true,
            };
            ledger.post_transfer(&seed).unwrap();
        }
        assert_eq!(ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP"), dec!(0.5));
        assert_eq!(ledger.net("ACCRUED_INTEREST_RECEIVABLE", "GBP"), dec!(-0.5));

        let request = AccrualRequest::flat_rate(
            "GBP",
            dec!(0),
            dec!(0.031),
            AddressMapping::accrued_interest(),
        );
        let instructions = reverse_interest(
            &ledger,
            &context(Tside::Liability, "CLOSE_ACCOUNT"),
            &ledger.balances(),
            &[request],
            None,
            &mut events,
        )
        .unwrap();
        assert_eq!(instructions.len(), 2);
        assert_eq!(
            instructions[0].client_transaction_id,
            "REVERSE_ACCRUED_INTEREST_MOCK_HOOK_ACCRUED_INTEREST_PAYABLE_COMMERCIAL_BANK_MONEY_GBP"
        );
        assert_eq!(instructions[0].details.description, "Reversing accrued interest");

        post_all(&mut ledger, &instructions).unwrap();
        assert_eq!(ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP"), dec!(0));
        assert_eq!(ledger.net("ACCRUED_INTEREST_RECEIVABLE", "GBP"), dec!(0));
        assert_eq!(events.events().len(), 2);
    }

    #[test]
    fn test_reverse_interest_on_an_asset_account() {
        let mut ledger = MemoryLedger::new("Loan account", "MOCK_HOOK", Tside::Asset);
        let mut events = EventStore::new();
        let mut request = AccrualRequest::flat_rate(
            "GBP",
            dec!(1000),
            dec!(0.031),
            AddressMapping::accrued_interest(),
        );
        request.day_count_basis = DayCountBasis::Fixed365;
        let accrued = accrue_interest(
            &ledger,
            &context(Tside::Asset, "ACCRUE_INTEREST"),
            ChargeType::Interest,
            &[request.clone()],
            &mut events,
        )
        .unwrap();
        post_all(&mut ledger, &accrued).unwrap();

        let instructions = reverse_interest(
            &ledger,
            &context(Tside::Asset, "CLOSE_ACCOUNT"),
            &ledger.balances(),
            &[request],
            Some("Unwinding interest at closure"),
            &mut events,
        )
        .unwrap();
        assert_eq!(instructions.len(), 1);
        assert_eq!(
            instructions[0].details.description,
            "Unwinding interest at closure"
        );

        post_all(&mut ledger, &instructions).unwrap();
        assert_eq!(ledger.net("ACCRUED_INTEREST_RECEIVABLE", "GBP"), dec!(0));
    }

    #[test]
    fn test_reversal_with_no_balances_builds_nothing() {
        let ledger = MemoryLedger::new("Main account", "MOCK_HOOK", Tside::Liability);
        let mut events = EventStore::new();
        let request = AccrualRequest::flat_rate(
            "GBP",
            dec!(0),
            dec!(0.031),
            AddressMapping::accrued_interest(),
        );
        let instructions = reverse_interest(
            &ledger,
            &context(Tside::Liability, "CLOSE_ACCOUNT"),
            &LedgerBalances::new(),
            &[request],
            None,
            &mut events,
        )
        .unwrap();
        assert!(instructions.is_empty());
        assert!(events.events().is_empty());
    }
}
