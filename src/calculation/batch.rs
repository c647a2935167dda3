//! Batch aggregation across employees.

use std::collections::{BTreeMap, HashMap};

use crate::config::StipendSettings;
use crate::models::{AttendanceRow, EmployeeResult, Period};

use super::balance::calculate_balance;
use super::naming::normalize_name;

/// Calculates balances for every employee key in `rows_by_employee`.
///
/// Keys are raw source identifiers (file names); the display name is
/// derived from them with the configured naming policy. Employees without a
/// link get an empty `download_url`. The output is sorted by display name,
/// ignoring case, and ties keep the ascending key order. Names are compared
/// by code point after case folding; this is dictionary order for Hangul and
/// for Latin letters, but not a full locale collation (accented Latin
/// letters sort after `z`).
///
/// # Example
///
/// ```
/// use std::collections::{BTreeMap, HashMap};
/// use stipend_engine::calculation::aggregate_balances;
/// use stipend_engine::config::{NamePolicy, NamingConfig, StipendSettings};
/// use stipend_engine::models::Period;
/// use rust_decimal::Decimal;
///
/// let settings = StipendSettings {
///     daily_rate: Decimal::from(10_000),
///     sheet_name: "식대".to_string(),
///     cell_range: "B3:L204".to_string(),
///     naming: NamingConfig {
///         policy: NamePolicy::LastSegment,
///         template_base: "ACG".to_string(),
///         legacy_prefix: "ACG_".to_string(),
///     },
/// };
///
/// let mut rows = BTreeMap::new();
/// rows.insert("ACG_하늘.xlsx".to_string(), vec![]);
/// rows.insert("ACG_가람.xlsx".to_string(), vec![]);
///
/// let results = aggregate_balances(&rows, &HashMap::new(), &Period::new(2025, 3).unwrap(), &settings);
/// let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, vec!["가람", "하늘"]);
/// ```
pub fn aggregate_balances(
    rows_by_employee: &BTreeMap<String, Vec<AttendanceRow>>,
    links: &HashMap<String, String>,
    period: &Period,
    settings: &StipendSettings,
) -> Vec<EmployeeResult> {
    let mut results: Vec<EmployeeResult> = rows_by_employee
        .iter()
        .map(|(key, rows)| {
            let name = normalize_name(key, &settings.naming, Some(period));
            let download_url = links.get(key).cloned().unwrap_or_default();
            calculate_balance(rows, period.month, settings.daily_rate, name, download_url)
        })
        .collect();

    results.sort_by_cached_key(|result| result.name.to_lowercase());
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{HOLIDAY_TYPE_CODE, WORK_DAY_CODE, WORKED_CODE};
    use crate::config::{NamePolicy, NamingConfig};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn settings(policy: NamePolicy) -> StipendSettings {
        StipendSettings {
            daily_rate: Decimal::from(10_000),
            sheet_name: "식대".to_string(),
            cell_range: "B3:L204".to_string(),
            naming: NamingConfig {
                policy,
                template_base: "ACG_식대 정리_Template".to_string(),
                legacy_prefix: "ACG_식대 정리_Template_2025년 상반기_".to_string(),
            },
        }
    }

    fn march() -> Period {
        Period::new(2025, 3).unwrap()
    }

    fn row(work_type: &str, attendance: &str, amount: i64) -> AttendanceRow {
        AttendanceRow {
            year: 2025,
            month: 3,
            work_type: work_type.to_string(),
            attendance: attendance.to_string(),
            amount: Decimal::from(amount),
        }
    }

    fn full_month() -> Vec<AttendanceRow> {
        let mut rows: Vec<AttendanceRow> = (0..20)
            .map(|i| row(WORK_DAY_CODE, WORKED_CODE, if i < 15 { 10_000 } else { 0 }))
            .collect();
        rows.push(row(HOLIDAY_TYPE_CODE, WORKED_CODE, 0));
        rows
    }

    #[test]
    fn test_two_employees_full_month() {
        let mut data = BTreeMap::new();
        data.insert("ACG_식대 정리_Template_2025년 상반기_홍길동.xlsx".to_string(), full_month());
        data.insert("ACG_식대 정리_Template_2025년 상반기_김철수.xlsx".to_string(), full_month());

        let mut links = HashMap::new();
        links.insert(
            "ACG_식대 정리_Template_2025년 상반기_홍길동.xlsx".to_string(),
            "https://files/hong".to_string(),
        );

        let results = aggregate_balances(&data, &links, &march(), &settings(NamePolicy::TemplatePrefix));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "김철수");
        assert_eq!(results[1].name, "홍길동");
        for result in &results {
            assert_eq!(result.work_day, 20);
            assert_eq!(result.weekend_work, 1);
            assert_eq!(result.holiday, 0);
            assert_eq!(result.total, Decimal::from(210_000));
            assert_eq!(result.used_amount, Decimal::from(150_000));
            assert_eq!(result.balance, Decimal::from(60_000));
        }
        assert_eq!(results[0].download_url, "");
        assert_eq!(results[1].download_url, "https://files/hong");
    }

    #[test]
    fn test_employee_without_rows_is_present_with_zeroes() {
        let mut data = BTreeMap::new();
        data.insert("x_빈칸.xlsx".to_string(), Vec::new());

        let results = aggregate_balances(&data, &HashMap::new(), &march(), &settings(NamePolicy::LastSegment));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "빈칸");
        assert_eq!(results[0].total, Decimal::ZERO);
        assert_eq!(results[0].balance, Decimal::ZERO);
    }

    #[test]
    fn test_sorts_by_display_name_not_key() {
        let mut data = BTreeMap::new();
        data.insert("a_하늘.xlsx".to_string(), Vec::new());
        data.insert("b_가람.xlsx".to_string(), Vec::new());

        let results = aggregate_balances(&data, &HashMap::new(), &march(), &settings(NamePolicy::LastSegment));
        assert_eq!(results[0].name, "가람");
        assert_eq!(results[1].name, "하늘");
    }

    #[test]
    fn test_ties_keep_key_order() {
        let mut data = BTreeMap::new();
        data.insert("b_홍길동.xlsx".to_string(), vec![row(WORK_DAY_CODE, "", 2)]);
        data.insert("a_홍길동.xlsx".to_string(), vec![row(WORK_DAY_CODE, "", 1)]);

        let results = aggregate_balances(&data, &HashMap::new(), &march(), &settings(NamePolicy::LastSegment));
        assert_eq!(results[0].used_amount, Decimal::from(1));
        assert_eq!(results[1].used_amount, Decimal::from(2));
    }

    #[test]
    fn test_latin_names_sort_ignoring_case() {
        let mut data = BTreeMap::new();
        data.insert("a_Bob.xlsx".to_string(), Vec::new());
        data.insert("b_alice.xlsx".to_string(), Vec::new());
        data.insert("c_김철수.xlsx".to_string(), Vec::new());

        let results = aggregate_balances(&data, &HashMap::new(), &march(), &settings(NamePolicy::LastSegment));
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alice", "Bob", "김철수"]);
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let results = aggregate_balances(&BTreeMap::new(), &HashMap::new(), &march(), &settings(NamePolicy::LastSegment));
        assert!(results.is_empty());
    }

    proptest! {
        #[test]
        fn prop_output_sorted_and_complete(names in prop::collection::btree_set("[가-힣]{1,4}", 0..30)) {
            let data: BTreeMap<String, Vec<AttendanceRow>> = names
                .iter()
                .enumerate()
                .map(|(i, name)| (format!("{:03}_{}.xlsx", i, name), Vec::new()))
                .collect();

            let results = aggregate_balances(&data, &HashMap::new(), &march(), &settings(NamePolicy::LastSegment));

            prop_assert_eq!(results.len(), data.len());
            prop_assert!(results.windows(2).all(|w| w[0].name.to_lowercase() <= w[1].name.to_lowercase()));
        }
    }
}
