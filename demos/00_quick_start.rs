/// quick start - accrue one day of deposit interest
use accrual_engine_rs::{
    accrue_interest, post_all, AccrualContext, AccrualRequest, AddressMapping, ChargeType,
    DayCountBasis, EventStore, MemoryLedger, Tside,
};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = MemoryLedger::new("Main account", "DEMO_HOOK", Tside::Liability);
    let mut events = EventStore::new();

    // 3.1% yearly on a 1000 GBP deposit, 365-day year
    let mut request = AccrualRequest::flat_rate(
        "GBP",
        dec!(1000),
        dec!(0.031),
        AddressMapping::accrued_interest(),
    );
    request.day_count_basis = DayCountBasis::Fixed365;

    let ctx = AccrualContext::new(
        Tside::Liability,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        "ACCRUE_INTEREST",
        "SAVINGS",
    );

    let instructions =
        accrue_interest(&ledger, &ctx, ChargeType::Interest, &[request], &mut events)?;
    post_all(&mut ledger, &instructions)?;

    // print the posting instruction as the host platform would receive it
    for instruction in &instructions {
        println!("{}", serde_json::to_string_pretty(instruction)?);
    }
    println!(
        "\naccrued balance: {} GBP",
        ledger.net("ACCRUED_INTEREST_PAYABLE", "GBP")
    );

    Ok(())
}
