//! Integration tests for slitplan.

use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use chrono::NaiveDate;
use slitplan::report::REPORT_HEADERS;
use slitplan::{
    compute, export_report, format_duration, CuttingPlan, HistoryRecord, HistoryStore, Lane,
    MaterialCode, MaterialSpec, OrderSpec, PlanError, RollSpec, StockTicket,
};

fn plan(useful: f64, roll_width: f64, roll_length: f64, jumbo: f64, order: i64) -> CuttingPlan {
    compute(
        &MaterialSpec::new(850.0, useful),
        &RollSpec::new(roll_width, roll_length),
        &OrderSpec::new(jumbo, order),
    )
    .unwrap()
}

// ==================== Scenario tests ====================

#[test]
fn test_exact_fit_plan() {
    let plan = plan(800.0, 100.0, 500.0, 5000.0, 40);

    assert_eq!(plan.main_count, 8);
    assert_eq!(plan.remaining_width_mm, 0.0);
    assert!(!plan.was_adjusted);
    assert_eq!(plan.additional_width_mm, None);
    assert_eq!(plan.length_count, 9);
    assert_eq!(plan.cycles_needed, 5);
    assert_eq!(plan.cycles_used, 5);
    assert_eq!(plan.total_rolls, 40);
    assert_eq!(plan.surplus_rolls, 0);
    assert_eq!(plan.shortage_rolls, 0);
    assert_eq!(plan.used_length_m, 2510.0);
    assert_eq!(plan.total_area_m2, 2133.5);
    assert_eq!(plan.useful_area_m2, 2000.0);
    assert_eq!(plan.waste_area_m2, 133.5);
    assert_eq!(plan.waste_percent, 6.3);
    assert_eq!(plan.cycles_per_hour, Some(10));
    assert_eq!(plan.estimated_hours, Some(0.5));
    assert_eq!(format_duration(plan.estimated_hours), "00 h 45 min");
}

#[test]
fn test_rejected_adjustment_cuts_trailing_roll() {
    let plan = plan(650.0, 100.0, 500.0, 5000.0, 40);

    assert_eq!(plan.main_count, 6);
    assert_eq!(plan.remaining_width_mm, 50.0);
    assert!(!plan.was_adjusted);
    assert_eq!(plan.additional_width_mm, Some(50.0));

    assert_eq!(plan.cycles_needed, 7);
    assert_eq!(plan.cycles_used, 7);
    assert_eq!(plan.total_main_rolls, 42);
    assert_eq!(plan.total_additional_rolls, 7);
    assert_eq!(plan.surplus_main_rolls, 2);
    assert_eq!(plan.surplus_additional_rolls, 7);
    assert_eq!(plan.surplus_rolls, 9);
    assert_eq!(format_duration(plan.estimated_hours), "00 h 55 min");
}

#[test]
fn test_accepted_adjustment() {
    let plan = plan(690.0, 100.0, 500.0, 5000.0, 40);

    assert_eq!(plan.main_count, 7);
    assert_eq!(plan.roll_width_mm, 98.6);
    assert_eq!(plan.roll_width_input_mm, 100.0);
    assert!(plan.was_adjusted);
    assert_eq!(plan.additional_width_mm, None);
    assert_eq!(plan.remaining_width_mm, 0.0);
}

#[test]
fn test_jumbo_too_short_after_setup() {
    let err = compute(
        &MaterialSpec::new(850.0, 800.0),
        &RollSpec::new(100.0, 30.0),
        &OrderSpec::new(35.0, 40),
    )
    .unwrap_err();

    assert_eq!(
        err,
        PlanError::InsufficientJumboLength {
            available: 25.0,
            setup: 10.0,
            roll: 30.0,
        }
    );
    assert_eq!(err.code_value(), 300);
}

#[test]
fn test_order_larger_than_jumbo() {
    let plan = plan(800.0, 100.0, 500.0, 5000.0, 1000);

    assert_eq!(plan.main_count, 8);
    assert_eq!(plan.length_count, 9);
    assert_eq!(plan.cycles_needed, 125);
    assert_eq!(plan.cycles_used, 9);
    assert_eq!(plan.total_main_rolls, 72);
    assert_eq!(plan.shortage_rolls, 928);
    assert!(plan.is_short());
    assert_eq!(plan.used_length_m, plan.big_roll_length_m);
}

// ==================== Rounding tests ====================

#[test]
fn test_adjusted_width_tie_rounds_to_even() {
    // 694.75 / 7 = 99.25 exactly
    let plan = plan(694.75, 100.0, 500.0, 5000.0, 40);

    assert!(plan.was_adjusted);
    assert_eq!(plan.main_count, 7);
    assert_eq!(plan.roll_width_mm, 99.2);
    assert!(plan.cut_width_mm() <= plan.useful_width_mm);
    assert!((plan.remaining_width_mm - 0.35).abs() < 1e-9);
}

#[test]
fn test_area_tie_rounds_to_even() {
    // 0.75 m * (993 m + 10 m setup) = 752.25 m2
    let plan = compute(
        &MaterialSpec::new(750.0, 700.0),
        &RollSpec::new(100.0, 993.0),
        &OrderSpec::new(5000.0, 7),
    )
    .unwrap();

    assert_eq!(plan.used_length_m, 1003.0);
    assert_eq!(plan.total_area_m2, 752.2);
}

// ==================== Override tests ====================

#[test]
fn test_override_keeps_requested_width() {
    let order = OrderSpec::new(5000.0, 40).with_additional_width(60.0);
    let plan = compute(
        &MaterialSpec::new(850.0, 690.0),
        &RollSpec::new(100.0, 500.0),
        &order,
    )
    .unwrap();

    // The override disables the adjustment that would otherwise apply
    assert!(!plan.was_adjusted);
    assert_eq!(plan.roll_width_mm, 100.0);
    assert_eq!(plan.main_count, 6);
    assert_eq!(plan.additional_width_mm, Some(60.0));
}

#[test]
fn test_non_numeric_override_is_a_format_error() {
    let order = OrderSpec::new(5000.0, 40).with_additional_width(f64::NAN);
    let err = compute(
        &MaterialSpec::new(850.0, 650.0),
        &RollSpec::new(100.0, 500.0),
        &order,
    )
    .unwrap_err();

    assert!(matches!(err, PlanError::AdditionalWidthFormat { .. }));
    assert_eq!(err.code_value(), 200);
}

#[test]
fn test_override_wider_than_leftover() {
    let order = OrderSpec::new(5000.0, 40).with_additional_width(55.0);
    let err = compute(
        &MaterialSpec::new(850.0, 650.0),
        &RollSpec::new(100.0, 500.0),
        &order,
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Additional width 55.0 mm exceeds the available 50.0 mm"
    );
}

// ==================== Property tests ====================

fn sample_plans() -> Vec<CuttingPlan> {
    let mut plans = Vec::new();
    for useful in [550.0, 640.0, 690.0, 777.7, 850.0] {
        for roll_width in [20.0, 48.5, 100.0, 155.0, 310.0] {
            for (roll_length, jumbo) in [(30.0, 500.0), (450.0, 5000.0), (1100.0, 22000.0)] {
                for order in [1, 37, 500] {
                    if let Ok(plan) = compute(
                        &MaterialSpec::new(850.0, useful),
                        &RollSpec::new(roll_width, roll_length),
                        &OrderSpec::new(jumbo, order),
                    ) {
                        plans.push(plan);
                    }
                }
            }
        }
    }
    plans
}

#[test]
fn test_plan_invariants() {
    let plans = sample_plans();
    assert!(!plans.is_empty());

    for plan in &plans {
        assert!(plan.main_count >= 1, "{plan:?}");
        assert!(plan.remaining_width_mm >= 0.0, "{plan:?}");
        assert!(
            plan.cycles_used <= plan.cycles_needed.min(plan.length_count),
            "{plan:?}"
        );

        // Each rounded area is within half a step of its exact value
        let diff = plan.total_area_m2 - plan.useful_area_m2 - plan.waste_area_m2;
        assert!(diff.abs() <= 0.15 + 1e-9, "{plan:?}");

        if plan.shortage_rolls > 0 {
            assert_eq!(plan.used_length_m, plan.big_roll_length_m);
        }
        if plan.was_adjusted {
            assert!(plan.roll_width_mm >= plan.roll_width_input_mm * 0.97, "{plan:?}");
        }
    }
}

#[test]
fn test_compute_is_deterministic() {
    let order = OrderSpec::new(7300.0, 250).with_additional_width(25.0);
    let material = MaterialSpec::new(900.0, 880.0);
    let roll = RollSpec::new(77.0, 640.0);

    let first = compute(&material, &roll, &order).unwrap();
    let second = compute(&material, &roll, &order).unwrap();
    assert_eq!(first, second);
}

// ==================== Layout tests ====================

#[test]
fn test_lanes_with_trailing_roll() {
    let plan = plan(650.0, 100.0, 500.0, 5000.0, 40);
    let mut expected = vec![Lane::EdgeTrim(100.0)];
    expected.extend(std::iter::repeat(Lane::Main(100.0)).take(6));
    expected.push(Lane::Additional(50.0));
    expected.push(Lane::EdgeTrim(100.0));

    assert_eq!(plan.lanes(), expected);
}

#[test]
fn test_lanes_with_scrap() {
    // 640 / 105 -> 6 rolls, 10 mm left is too narrow for a trailing roll
    let plan = plan(640.0, 105.0, 500.0, 5000.0, 40);

    assert_eq!(plan.additional_width_mm, None);
    let mut expected = vec![Lane::EdgeTrim(105.0)];
    expected.extend(std::iter::repeat(Lane::Main(105.0)).take(6));
    expected.push(Lane::Scrap(10.0));
    expected.push(Lane::EdgeTrim(105.0));

    assert_eq!(plan.lanes(), expected);
}

#[test]
fn test_lanes_without_edge_trim() {
    // Zero override counts as automatic: 800 / 130 -> 6 rolls and a 20 mm trailing roll
    let order = OrderSpec::new(5000.0, 40).with_additional_width(0.0);
    let plan = compute(
        &MaterialSpec::new(800.0, 800.0),
        &RollSpec::new(130.0, 500.0),
        &order,
    )
    .unwrap();

    assert_eq!(plan.additional_width_mm, Some(20.0));
    let lanes = plan.lanes();
    assert_eq!(lanes.first(), Some(&Lane::Main(130.0)));
    assert_eq!(lanes.last(), Some(&Lane::Additional(20.0)));
    assert!(lanes.iter().all(|lane| !lane.is_waste()));
}

#[test]
fn test_lanes_display() {
    let plan = plan(690.0, 100.0, 500.0, 5000.0, 40);
    let rendered: Vec<String> = plan.lanes().iter().map(|l| l.to_string()).collect();
    assert_eq!(rendered.first().map(String::as_str), Some("trim 80.0"));
    assert_eq!(rendered[1], "roll 98.6");
    assert_eq!(rendered.len(), 9);
}

// ==================== History tests ====================

fn record(plan: &CuttingPlan, minute: u32, ticket: &str) -> HistoryRecord {
    let timestamp = NaiveDate::from_ymd_opt(2025, 9, 1)
        .unwrap()
        .and_hms_opt(7, minute, 30)
        .unwrap();
    HistoryRecord::from_plan(
        plan,
        timestamp,
        StockTicket::parse_optional(ticket).unwrap(),
        MaterialCode::parse("CPP25").unwrap(),
    )
}

#[test]
fn test_history_persists_on_disk() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("history.db");

    {
        let store = HistoryStore::open(&db).unwrap();
        store
            .insert(&record(&plan(800.0, 100.0, 500.0, 5000.0, 40), 0, "7/2025"))
            .unwrap();
        store
            .insert(&record(&plan(650.0, 100.0, 500.0, 5000.0, 40), 5, ""))
            .unwrap();
    }

    let store = HistoryStore::open(&db).unwrap();
    assert_eq!(store.count().unwrap(), 2);

    let rows = store.fetch_recent(10).unwrap();
    assert_eq!(rows[0].stock_ticket, "");
    assert_eq!(rows[0].surplus_additional_rolls, 7);
    assert_eq!(rows[1].stock_ticket, "007/2025");
    assert_eq!(rows[1].used_length_m, 2510.0);
}

#[test]
fn test_export_report_to_directory() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::open(&dir.path().join("history.db")).unwrap();
    store
        .insert(&record(&plan(690.0, 100.0, 500.0, 5000.0, 40), 15, "123/2024"))
        .unwrap();

    let out_dir = dir.path().join("reports");
    let now = NaiveDate::from_ymd_opt(2025, 9, 1)
        .unwrap()
        .and_hms_opt(18, 4, 9)
        .unwrap();
    let path = export_report(&store, &out_dir, now).unwrap();

    assert_eq!(path, out_dir.join("report_20250901_180409.csv"));

    let text = fs::read_to_string(&path).unwrap();
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, REPORT_HEADERS.map(String::from).to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][0], "07:15");
    assert_eq!(&records[0][1], "123/2024");
    assert_eq!(&records[0][2], "CPP25");
    assert_eq!(&records[0][3], "100.0");
}

#[test]
fn test_clear_history() {
    let dir = TempDir::new().unwrap();
    let store = HistoryStore::open(&dir.path().join("history.db")).unwrap();
    let plan = plan(800.0, 100.0, 500.0, 5000.0, 40);
    for minute in 0..3 {
        store.insert(&record(&plan, minute, "1/2025")).unwrap();
    }

    assert_eq!(store.clear().unwrap(), 3);
    assert_eq!(store.count().unwrap(), 0);
}
