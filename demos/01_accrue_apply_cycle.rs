/// accrue and apply - a week of daily accrual, then period-end application
use accrual_engine_rs::{
    accrue_interest, apply_charges, post_all, AccrualContext, AccrualRequest, AddressMapping,
    ChargeApplicationRequest, ChargeType, DayCountBasis, EventStore, MemoryLedger, Tside,
    DEFAULT_ADDRESS,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== accrue and apply example ===\n");

    let mut ledger = MemoryLedger::new("Main account", "DEMO_HOOK_DAY_1", Tside::Liability);
    let mut events = EventStore::new();
    let mapping = AddressMapping::accrued_interest();

    // accrue each day of the first week of january
    for day in 1..=7 {
        ledger.begin_execution(format!("DEMO_HOOK_DAY_{day}"));
        let mut request =
            AccrualRequest::flat_rate("GBP", dec!(1000), dec!(0.031), mapping.clone());
        request.day_count_basis = DayCountBasis::Fixed365;

        let ctx = AccrualContext::new(
            Tside::Liability,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            "ACCRUE_INTEREST",
            "SAVINGS",
        );
        let instructions =
            accrue_interest(&ledger, &ctx, ChargeType::Interest, &[request], &mut events)?;
        post_all(&mut ledger, &instructions)?;
    }
    println!(
        "accrued after 7 days: {} GBP",
        ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP")
    );

    // period end: round to 2 places, post the remainder away
    ledger.begin_execution("DEMO_HOOK_APPLY");
    let mut application =
        ChargeApplicationRequest::new("GBP", DEFAULT_ADDRESS, mapping.clone());
    application.zero_out_remainder = true;

    let ctx = AccrualContext::new(
        Tside::Liability,
        NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        "APPLY_ACCRUED_INTEREST",
        "SAVINGS",
    );
    let instructions = apply_charges(
        &ledger,
        &ctx,
        ChargeType::Interest,
        &ledger.balances(),
        &[application],
        &mut events,
    )?;
    post_all(&mut ledger, &instructions)?;

    println!(
        "applied to {}: {} GBP",
        DEFAULT_ADDRESS,
        ledger.net(DEFAULT_ADDRESS, "GBP")
    );
    println!(
        "accrued address after application: {} GBP",
        ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP")
    );

    println!("\nevents:");
    for event in events.take_events() {
        println!("  {event:?}");
    }

    Ok(())
}
