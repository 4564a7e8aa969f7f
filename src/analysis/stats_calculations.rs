//! Cálculos de estadísticas de gasto y consumo
//!
//! Funciones puras sobre registros ya cargados. Los importes se agregan
//! en Decimal y se exponen como f64 en el resultado final.

use chrono::Datelike;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::fuel_record::FuelRecord;
use crate::models::maintenance_log::MaintenanceLog;
use crate::utils::format::month_label;

/// Número de meses que conserva la serie mensual
pub const MONTH_BUCKETS: usize = 6;

/// Totales agregados de un conjunto de registros
#[derive(Debug, Clone, PartialEq)]
pub struct StatsData {
    pub fuel_spent: f64,
    pub maintenance_spent: f64,
    pub total_spent: f64,
    pub fuel_count: usize,
    pub maintenance_count: usize,
    pub avg_consumption: Option<f64>,
}

/// Gasto de un mes de calendario
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySpending {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub fuel: f64,
    pub maintenance: f64,
    pub total: f64,
}

/// Consumo medio en L/100km a partir de repostajes con depósito lleno.
///
/// Ordena los repostajes llenos por fecha y acumula los tramos con avance
/// de odómetro positivo; los retrocesos no aportan distancia ni litros.
/// Devuelve None con menos de dos repostajes llenos o con distancia cero.
pub fn calculate_consumption(records: &[FuelRecord]) -> Option<f64> {
    let mut full_tank: Vec<&FuelRecord> = records.iter().filter(|r| r.is_full_tank).collect();
    if full_tank.len() < 2 {
        return None;
    }
    full_tank.sort_by_key(|r| r.fuel_date);

    let mut total_distance = 0.0;
    let mut total_liters = 0.0;

    for pair in full_tank.windows(2) {
        let distance = pair[1].odometer - pair[0].odometer;
        if distance > 0.0 {
            total_distance += distance;
            total_liters += pair[1].quantity.to_f64().unwrap_or(0.0);
        }
    }

    if total_distance == 0.0 {
        return None;
    }

    Some((total_liters / total_distance) * 100.0)
}

/// Coste por kilómetro de un período. None si no hubo avance de odómetro.
pub fn cost_per_km(total_cost: f64, start_odometer: f64, end_odometer: f64) -> Option<f64> {
    let distance = end_odometer - start_odometer;
    if distance <= 0.0 {
        return None;
    }
    Some(total_cost / distance)
}

/// Suma de costes de combustible
pub fn total_fuel_cost(records: &[FuelRecord]) -> Decimal {
    records.iter().map(|r| r.cost).sum()
}

/// Suma de costes de mantenimiento (coste ausente cuenta como cero)
pub fn total_maintenance_cost(logs: &[MaintenanceLog]) -> Decimal {
    logs.iter().filter_map(|l| l.cost).sum()
}

/// Totales agregados de combustible + mantenimiento
pub fn aggregate_stats(fuel: &[FuelRecord], maintenance: &[MaintenanceLog]) -> StatsData {
    let fuel_spent = total_fuel_cost(fuel);
    let maintenance_spent = total_maintenance_cost(maintenance);
    let total = fuel_spent + maintenance_spent;

    StatsData {
        fuel_spent: fuel_spent.to_f64().unwrap_or(0.0),
        maintenance_spent: maintenance_spent.to_f64().unwrap_or(0.0),
        total_spent: total.to_f64().unwrap_or(0.0),
        fuel_count: fuel.len(),
        maintenance_count: maintenance.len(),
        avg_consumption: calculate_consumption(fuel),
    }
}

/// Variación porcentual entre dos períodos. None si el anterior es cero:
/// sin base no hay comparación que mostrar.
pub fn percentage_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some(((current - previous) / previous) * 100.0)
}

/// Serie mensual de gasto: meses de calendario con datos, en orden
/// cronológico, limitada a los últimos MONTH_BUCKETS meses.
pub fn group_by_month(fuel: &[FuelRecord], maintenance: &[MaintenanceLog]) -> Vec<MonthlySpending> {
    let mut buckets: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

    for record in fuel {
        let key = (record.fuel_date.year(), record.fuel_date.month());
        let entry = buckets.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += record.cost;
    }

    for log in maintenance {
        let key = (log.service_date.year(), log.service_date.month());
        let entry = buckets.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.1 += log.cost.unwrap_or(Decimal::ZERO);
    }

    let months: Vec<MonthlySpending> = buckets
        .into_iter()
        .map(|((year, month), (fuel_total, maintenance_total))| {
            let total = fuel_total + maintenance_total;
            MonthlySpending {
                year,
                month,
                label: month_label(year, month),
                fuel: fuel_total.to_f64().unwrap_or(0.0),
                maintenance: maintenance_total.to_f64().unwrap_or(0.0),
                total: total.to_f64().unwrap_or(0.0),
            }
        })
        .collect();

    let skip = months.len().saturating_sub(MONTH_BUCKETS);
    months.into_iter().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn fuel(date: &str, odometer: f64, quantity: Decimal, cost: Decimal, full: bool) -> FuelRecord {
        FuelRecord {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            fuel_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            fuel_type: "gasoline".to_string(),
            quantity,
            price_per_unit: Decimal::new(1700, 3),
            cost,
            odometer,
            is_full_tank: full,
            station_name: None,
            location: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn maintenance(date: &str, cost: Option<Decimal>) -> MaintenanceLog {
        MaintenanceLog {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            service_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            maintenance_type: crate::models::maintenance_log::MaintenanceType::OilChange,
            description: "Mudança de óleo".to_string(),
            cost,
            odometer: 10_000.0,
            next_service_date: None,
            next_service_km: None,
            service_provider: None,
            receipt_url: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_consumption_two_full_tanks() {
        // 1000 -> 1500 km con 35 L repostados al llegar: 7.0 L/100km
        let records = vec![
            fuel("2025-01-01", 1000.0, Decimal::new(4000, 2), Decimal::new(6800, 2), true),
            fuel("2025-01-10", 1500.0, Decimal::new(3500, 2), Decimal::new(5950, 2), true),
        ];
        assert_close(calculate_consumption(&records).unwrap(), 7.0);
    }

    #[test]
    fn test_consumption_needs_two_full_tanks() {
        assert!(calculate_consumption(&[]).is_none());

        let one = vec![fuel("2025-01-01", 1000.0, Decimal::new(4000, 2), Decimal::new(6800, 2), true)];
        assert!(calculate_consumption(&one).is_none());

        // Dos registros pero sólo uno con depósito lleno
        let mixed = vec![
            fuel("2025-01-01", 1000.0, Decimal::new(4000, 2), Decimal::new(6800, 2), true),
            fuel("2025-01-10", 1500.0, Decimal::new(3500, 2), Decimal::new(5950, 2), false),
        ];
        assert!(calculate_consumption(&mixed).is_none());
    }

    #[test]
    fn test_consumption_ignores_partial_fills() {
        // Un repostaje parcial intermedio no cambia el resultado
        let records = vec![
            fuel("2025-01-01", 1000.0, Decimal::new(4000, 2), Decimal::new(6800, 2), true),
            fuel("2025-01-05", 1200.0, Decimal::new(1500, 2), Decimal::new(2550, 2), false),
            fuel("2025-01-10", 1500.0, Decimal::new(3500, 2), Decimal::new(5950, 2), true),
        ];
        assert_close(calculate_consumption(&records).unwrap(), 7.0);
    }

    #[test]
    fn test_consumption_skips_odometer_regression() {
        // El tramo 1000 -> 900 se descarta; sólo cuenta 900 -> 1400
        let records = vec![
            fuel("2025-01-01", 1000.0, Decimal::new(4000, 2), Decimal::new(6800, 2), true),
            fuel("2025-01-05", 900.0, Decimal::new(3000, 2), Decimal::new(5100, 2), true),
            fuel("2025-01-10", 1400.0, Decimal::new(2500, 2), Decimal::new(4250, 2), true),
        ];
        assert_close(calculate_consumption(&records).unwrap(), 5.0);
    }

    #[test]
    fn test_consumption_all_regressions_is_none() {
        let records = vec![
            fuel("2025-01-01", 1000.0, Decimal::new(4000, 2), Decimal::new(6800, 2), true),
            fuel("2025-01-10", 900.0, Decimal::new(3500, 2), Decimal::new(5950, 2), true),
        ];
        assert!(calculate_consumption(&records).is_none());
    }

    #[test]
    fn test_consumption_sorts_by_date() {
        // El orden de llegada no importa, se ordena por fuel_date
        let records = vec![
            fuel("2025-01-10", 1500.0, Decimal::new(3500, 2), Decimal::new(5950, 2), true),
            fuel("2025-01-01", 1000.0, Decimal::new(4000, 2), Decimal::new(6800, 2), true),
        ];
        assert_close(calculate_consumption(&records).unwrap(), 7.0);
    }

    #[test]
    fn test_aggregate_stats_totals() {
        // 45.30 + 38.10 combustible, 85.00 mantenimiento
        let fuel_records = vec![
            fuel("2025-01-01", 1000.0, Decimal::new(2500, 2), Decimal::new(4530, 2), true),
            fuel("2025-01-15", 1400.0, Decimal::new(2100, 2), Decimal::new(3810, 2), true),
        ];
        let logs = vec![maintenance("2025-01-20", Some(Decimal::new(8500, 2)))];

        let stats = aggregate_stats(&fuel_records, &logs);
        assert_close(stats.fuel_spent, 83.40);
        assert_close(stats.maintenance_spent, 85.00);
        assert_close(stats.total_spent, 168.40);
        assert_eq!(stats.fuel_count, 2);
        assert_eq!(stats.maintenance_count, 1);
    }

    #[test]
    fn test_aggregate_stats_missing_maintenance_cost() {
        let logs = vec![
            maintenance("2025-01-05", None),
            maintenance("2025-01-20", Some(Decimal::new(5000, 2))),
        ];
        let stats = aggregate_stats(&[], &logs);
        assert_close(stats.maintenance_spent, 50.0);
        assert_eq!(stats.maintenance_count, 2);
        assert!(stats.avg_consumption.is_none());
    }

    #[test]
    fn test_aggregate_stats_additive_over_disjoint_sets() {
        let set_a = vec![fuel("2025-01-01", 1000.0, Decimal::new(2000, 2), Decimal::new(3412, 2), true)];
        let set_b = vec![fuel("2025-02-01", 1500.0, Decimal::new(1800, 2), Decimal::new(2999, 2), true)];
        let merged: Vec<FuelRecord> = set_a.iter().chain(set_b.iter()).cloned().collect();

        let total_a = aggregate_stats(&set_a, &[]).total_spent;
        let total_b = aggregate_stats(&set_b, &[]).total_spent;
        let total_merged = aggregate_stats(&merged, &[]).total_spent;
        assert_close(total_merged, total_a + total_b);
    }

    #[test]
    fn test_percentage_change() {
        assert_close(percentage_change(80.0, 100.0).unwrap(), -20.0);
        assert_close(percentage_change(120.0, 100.0).unwrap(), 20.0);
        assert_close(percentage_change(100.0, 100.0).unwrap(), 0.0);
        assert!(percentage_change(50.0, 0.0).is_none());
    }

    #[test]
    fn test_cost_per_km() {
        assert_close(cost_per_km(100.0, 1000.0, 1500.0).unwrap(), 0.2);
        assert!(cost_per_km(100.0, 1500.0, 1500.0).is_none());
        assert!(cost_per_km(100.0, 1500.0, 1000.0).is_none());
    }

    #[test]
    fn test_group_by_month_buckets_and_order() {
        let fuel_records = vec![
            fuel("2025-02-10", 1000.0, Decimal::new(2000, 2), Decimal::new(3000, 2), true),
            fuel("2025-01-05", 900.0, Decimal::new(2000, 2), Decimal::new(2000, 2), true),
            fuel("2025-02-20", 1300.0, Decimal::new(2000, 2), Decimal::new(1050, 2), true),
        ];
        let logs = vec![maintenance("2025-01-15", Some(Decimal::new(8500, 2)))];

        let months = group_by_month(&fuel_records, &logs);
        assert_eq!(months.len(), 2);

        assert_eq!((months[0].year, months[0].month), (2025, 1));
        assert_close(months[0].fuel, 20.0);
        assert_close(months[0].maintenance, 85.0);
        assert_close(months[0].total, 105.0);
        assert_eq!(months[0].label, "jan 2025");

        assert_eq!((months[1].year, months[1].month), (2025, 2));
        assert_close(months[1].fuel, 40.50);
        assert_close(months[1].maintenance, 0.0);
    }

    #[test]
    fn test_group_by_month_keeps_latest_six() {
        let mut fuel_records = Vec::new();
        for month in 1..=8 {
            let date = format!("2025-{:02}-10", month);
            fuel_records.push(fuel(&date, 1000.0, Decimal::new(2000, 2), Decimal::new(1000, 2), true));
        }

        let months = group_by_month(&fuel_records, &[]);
        assert_eq!(months.len(), MONTH_BUCKETS);
        assert_eq!(months[0].month, 3);
        assert_eq!(months[5].month, 8);
    }
}
