use crate::analysis::stats_calculations::{aggregate_stats, group_by_month, percentage_change, StatsData};
use crate::dto::stats_dto::{
    MonthlySpendingResponse, PeriodResponse, PeriodTotalsResponse, StatsChangesResponse,
    StatsQuery, VehicleStatsResponse,
};
use crate::models::fuel_record::FuelRecordFilters;
use crate::models::maintenance_log::{MaintenanceLog, MaintenanceLogFilters};
use crate::repositories::fuel_record_repository::FuelRecordRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct StatsController {
    fuel: FuelRecordRepository,
    maintenance: MaintenanceRepository,
    vehicles: VehicleRepository,
}

impl StatsController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            fuel: FuelRecordRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Estadísticas agregadas de un vehículo, con comparación frente al
    /// período anterior cuando la query trae start_date.
    pub async fn vehicle_stats(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        query: StatsQuery,
    ) -> Result<VehicleStatsResponse, AppError> {
        self.vehicles.find_owned(vehicle_id, user_id).await?;

        let fuel_filters = FuelRecordFilters {
            vehicle_id: Some(vehicle_id),
            start_date: query.start_date,
            end_date: query.end_date,
        };
        let maintenance_filters = MaintenanceLogFilters {
            vehicle_id: Some(vehicle_id),
        };

        // El mantenimiento se trae completo una sola vez y se filtra en
        // memoria para ambos períodos
        let (fuel, maintenance_all) = futures::try_join!(
            self.fuel.find_filtered(user_id, &fuel_filters),
            self.maintenance.find_filtered(user_id, &maintenance_filters)
        )?;

        let maintenance = filter_by_period(&maintenance_all, query.start_date, query.end_date);
        let totals = aggregate_stats(&fuel, &maintenance);

        let mut period = None;
        let mut previous = None;
        let mut changes = None;

        if let Some(start) = query.start_date {
            let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());
            let (prev_start, prev_end) = previous_window(start, end);

            let prev_fuel_filters = FuelRecordFilters {
                vehicle_id: Some(vehicle_id),
                start_date: Some(prev_start),
                end_date: Some(prev_end),
            };
            let prev_fuel = self.fuel.find_filtered(user_id, &prev_fuel_filters).await?;
            let prev_maintenance =
                filter_by_period(&maintenance_all, Some(prev_start), Some(prev_end));
            let prev_totals = aggregate_stats(&prev_fuel, &prev_maintenance);

            changes = Some(StatsChangesResponse {
                total: percentage_change(totals.total_spent, prev_totals.total_spent),
                fuel: percentage_change(totals.fuel_spent, prev_totals.fuel_spent),
                maintenance: percentage_change(
                    totals.maintenance_spent,
                    prev_totals.maintenance_spent,
                ),
            });
            previous = Some(totals_response(prev_totals));
            period = Some(PeriodResponse {
                start_date: start,
                end_date: end,
            });
        }

        Ok(VehicleStatsResponse {
            vehicle_id,
            period,
            totals: totals_response(totals),
            previous,
            changes,
        })
    }

    /// Serie de gasto mensual (combustible + mantenimiento) de los
    /// últimos meses del vehículo.
    pub async fn monthly_spending(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
    ) -> Result<Vec<MonthlySpendingResponse>, AppError> {
        self.vehicles.find_owned(vehicle_id, user_id).await?;

        let fuel_filters = FuelRecordFilters {
            vehicle_id: Some(vehicle_id),
            ..Default::default()
        };
        let maintenance_filters = MaintenanceLogFilters {
            vehicle_id: Some(vehicle_id),
        };

        let (fuel, maintenance) = futures::try_join!(
            self.fuel.find_filtered(user_id, &fuel_filters),
            self.maintenance.find_filtered(user_id, &maintenance_filters)
        )?;

        let series = group_by_month(&fuel, &maintenance)
            .into_iter()
            .map(|bucket| MonthlySpendingResponse {
                year: bucket.year,
                month: bucket.month,
                label: bucket.label,
                fuel: bucket.fuel,
                maintenance: bucket.maintenance,
                total: bucket.total,
            })
            .collect();

        Ok(series)
    }
}

/// Ventana inmediatamente anterior con la misma duración que [start, end]
fn previous_window(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    let span = (end - start).num_days();
    let prev_end = start - Duration::days(1);
    let prev_start = prev_end - Duration::days(span);
    (prev_start, prev_end)
}

fn filter_by_period(
    logs: &[MaintenanceLog],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<MaintenanceLog> {
    logs.iter()
        .filter(|log| start.map_or(true, |s| log.service_date >= s))
        .filter(|log| end.map_or(true, |e| log.service_date <= e))
        .cloned()
        .collect()
}

fn totals_response(data: StatsData) -> PeriodTotalsResponse {
    PeriodTotalsResponse {
        fuel_spent: data.fuel_spent,
        maintenance_spent: data.maintenance_spent,
        total_spent: data.total_spent,
        fuel_count: data.fuel_count,
        maintenance_count: data.maintenance_count,
        avg_consumption: data.avg_consumption,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::maintenance_log::MaintenanceType;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log_on(day: NaiveDate) -> MaintenanceLog {
        let now = Utc::now();
        MaintenanceLog {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            service_date: day,
            maintenance_type: MaintenanceType::Repair,
            description: "Cambio de pastillas".to_string(),
            cost: None,
            odometer: 50_000.0,
            next_service_date: None,
            next_service_km: None,
            service_provider: None,
            receipt_url: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_previous_window_full_month() {
        let (start, end) = previous_window(date(2025, 3, 1), date(2025, 3, 31));
        assert_eq!(end, date(2025, 2, 28));
        assert_eq!(start, date(2025, 1, 29));
    }

    #[test]
    fn test_previous_window_single_day() {
        let (start, end) = previous_window(date(2025, 6, 15), date(2025, 6, 15));
        assert_eq!(start, date(2025, 6, 14));
        assert_eq!(end, date(2025, 6, 14));
    }

    #[test]
    fn test_filter_by_period_bounds_inclusive() {
        let logs = vec![
            log_on(date(2025, 2, 28)),
            log_on(date(2025, 3, 1)),
            log_on(date(2025, 3, 31)),
            log_on(date(2025, 4, 1)),
        ];

        let filtered = filter_by_period(&logs, Some(date(2025, 3, 1)), Some(date(2025, 3, 31)));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|l| l.service_date.month() == 3));
    }

    #[test]
    fn test_filter_by_period_open_ended() {
        let logs = vec![log_on(date(2025, 2, 28)), log_on(date(2025, 3, 1))];

        assert_eq!(filter_by_period(&logs, None, None).len(), 2);
        assert_eq!(
            filter_by_period(&logs, Some(date(2025, 3, 1)), None).len(),
            1
        );
    }
}
