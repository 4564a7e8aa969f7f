use crate::analysis::stats_calculations::{aggregate_stats, calculate_consumption, percentage_change};
use crate::analysis::timeline::{
    expiring_document_alerts, recent_activity, upcoming_timeline, DEFAULT_ACTIVITY_LIMIT,
};
use crate::dto::stats_dto::{
    ActivityItemResponse, ActivityQuery, DashboardQuery, DashboardSummaryResponse,
    DocumentAlertResponse, TimelineItemResponse,
};
use crate::models::document::DocumentFilters;
use crate::models::fuel_record::{FuelRecord, FuelRecordFilters};
use crate::models::maintenance_log::{MaintenanceLog, MaintenanceLogFilters};
use crate::models::vehicle::Vehicle;
use crate::repositories::document_repository::DocumentRepository;
use crate::repositories::fuel_record_repository::FuelRecordRepository;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::format::{format_currency, format_date_pt, month_label};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Tope superior del parámetro limit de actividad reciente
const MAX_ACTIVITY_LIMIT: usize = 50;

pub struct DashboardController {
    vehicles: VehicleRepository,
    fuel: FuelRecordRepository,
    maintenance: MaintenanceRepository,
    documents: DocumentRepository,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            fuel: FuelRecordRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool.clone()),
            documents: DocumentRepository::new(pool),
        }
    }

    /// Con vehicle_id explícito se comprueba la propiedad; sin él se usa
    /// el vehículo principal del usuario (si existe).
    async fn resolve_vehicle(
        &self,
        user_id: Uuid,
        vehicle_id: Option<Uuid>,
    ) -> Result<Option<Vehicle>, AppError> {
        match vehicle_id {
            Some(id) => Ok(Some(self.vehicles.find_owned(id, user_id).await?)),
            None => self.vehicles.find_primary(user_id).await,
        }
    }

    /// Resumen del mes en curso: gasto acumulado hasta hoy comparado con
    /// el mes de calendario anterior completo.
    pub async fn summary(
        &self,
        user_id: Uuid,
        query: DashboardQuery,
    ) -> Result<DashboardSummaryResponse, AppError> {
        let today = Utc::now().date_naive();
        let label = month_label(today.year(), today.month());

        let vehicle = match self.resolve_vehicle(user_id, query.vehicle_id).await? {
            Some(vehicle) => vehicle,
            None => {
                // Usuario sin vehículos: resumen vacío en lugar de error
                return Ok(DashboardSummaryResponse {
                    vehicle_id: None,
                    month_label: label,
                    total_spent: 0.0,
                    total_spent_formatted: format_currency(0.0),
                    fuel_spent: 0.0,
                    maintenance_spent: 0.0,
                    avg_consumption: None,
                    change_vs_previous: None,
                });
            }
        };

        let fuel_filters = FuelRecordFilters {
            vehicle_id: Some(vehicle.id),
            ..Default::default()
        };
        let maintenance_filters = MaintenanceLogFilters {
            vehicle_id: Some(vehicle.id),
        };

        // Todo el histórico en una pasada; los períodos se filtran en memoria
        let (fuel_all, maintenance_all) = futures::try_join!(
            self.fuel.find_filtered(user_id, &fuel_filters),
            self.maintenance.find_filtered(user_id, &maintenance_filters)
        )?;

        let start = month_start(today);
        let (prev_start, prev_end) = previous_month_window(today);

        let fuel_month = fuel_between(&fuel_all, start, today);
        let maintenance_month = maintenance_between(&maintenance_all, start, today);
        let fuel_prev = fuel_between(&fuel_all, prev_start, prev_end);
        let maintenance_prev = maintenance_between(&maintenance_all, prev_start, prev_end);

        let current = aggregate_stats(&fuel_month, &maintenance_month);
        let previous = aggregate_stats(&fuel_prev, &maintenance_prev);

        Ok(DashboardSummaryResponse {
            vehicle_id: Some(vehicle.id),
            month_label: label,
            total_spent: current.total_spent,
            total_spent_formatted: format_currency(current.total_spent),
            fuel_spent: current.fuel_spent,
            maintenance_spent: current.maintenance_spent,
            // El consumo medio se calcula sobre todo el histórico, no
            // sobre el mes en curso
            avg_consumption: calculate_consumption(&fuel_all),
            change_vs_previous: percentage_change(current.total_spent, previous.total_spent),
        })
    }

    /// Próximos vencimientos: mantenimientos programados y caducidades
    /// de documentos, en orden cronológico.
    pub async fn timeline(
        &self,
        user_id: Uuid,
        query: DashboardQuery,
    ) -> Result<Vec<TimelineItemResponse>, AppError> {
        if let Some(id) = query.vehicle_id {
            self.vehicles.find_owned(id, user_id).await?;
        }

        let maintenance_filters = MaintenanceLogFilters {
            vehicle_id: query.vehicle_id,
        };
        let document_filters = DocumentFilters {
            vehicle_id: query.vehicle_id,
            ..Default::default()
        };

        let (maintenance, documents) = futures::try_join!(
            self.maintenance.find_filtered(user_id, &maintenance_filters),
            self.documents.find_filtered(user_id, &document_filters)
        )?;

        let today = Utc::now().date_naive();
        let items = upcoming_timeline(&maintenance, &documents, today)
            .into_iter()
            .map(|item| TimelineItemResponse {
                kind: item.kind.as_str().to_string(),
                source_id: item.source_id,
                title: item.title,
                due_date: item.due_date,
                due_date_formatted: format_date_pt(item.due_date),
                days_until: item.days_until,
                overdue: item.overdue,
            })
            .collect();

        Ok(items)
    }

    /// Alertas de documentos dentro de su ventana de aviso o ya expirados.
    pub async fn alerts(
        &self,
        user_id: Uuid,
        query: DashboardQuery,
    ) -> Result<Vec<DocumentAlertResponse>, AppError> {
        if let Some(id) = query.vehicle_id {
            self.vehicles.find_owned(id, user_id).await?;
        }

        let document_filters = DocumentFilters {
            vehicle_id: query.vehicle_id,
            ..Default::default()
        };
        let documents = self.documents.find_filtered(user_id, &document_filters).await?;

        let today = Utc::now().date_naive();
        let alerts = expiring_document_alerts(&documents, today)
            .into_iter()
            .map(|alert| DocumentAlertResponse {
                document_id: alert.document_id,
                title: alert.title,
                document_type: alert.document_type,
                expiry_date: alert.expiry_date,
                days_remaining: alert.days_remaining,
                expired: alert.expired,
                message: alert.message,
            })
            .collect();

        Ok(alerts)
    }

    /// Actividad reciente combinada (repostajes, mantenimientos y
    /// documentos subidos), más reciente primero.
    pub async fn activity(
        &self,
        user_id: Uuid,
        query: ActivityQuery,
    ) -> Result<Vec<ActivityItemResponse>, AppError> {
        if let Some(id) = query.vehicle_id {
            self.vehicles.find_owned(id, user_id).await?;
        }

        let limit = query
            .limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .min(MAX_ACTIVITY_LIMIT);

        let fuel_filters = FuelRecordFilters {
            vehicle_id: query.vehicle_id,
            ..Default::default()
        };
        let maintenance_filters = MaintenanceLogFilters {
            vehicle_id: query.vehicle_id,
        };
        let document_filters = DocumentFilters {
            vehicle_id: query.vehicle_id,
            ..Default::default()
        };

        let (fuel, maintenance, documents) = futures::try_join!(
            self.fuel.find_filtered(user_id, &fuel_filters),
            self.maintenance.find_filtered(user_id, &maintenance_filters),
            self.documents.find_filtered(user_id, &document_filters)
        )?;

        let entries = recent_activity(&fuel, &maintenance, &documents, limit)
            .into_iter()
            .map(|entry| ActivityItemResponse {
                kind: entry.kind.as_str().to_string(),
                source_id: entry.source_id,
                date: entry.date,
                title: entry.title,
                detail: entry.detail,
                amount: entry.amount,
                amount_formatted: entry.amount.map(format_currency),
            })
            .collect();

        Ok(entries)
    }
}

fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

/// Mes de calendario anterior completo al mes de `today`
fn previous_month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let prev_end = month_start(today) - Duration::days(1);
    (month_start(prev_end), prev_end)
}

fn fuel_between(records: &[FuelRecord], start: NaiveDate, end: NaiveDate) -> Vec<FuelRecord> {
    records
        .iter()
        .filter(|r| r.fuel_date >= start && r.fuel_date <= end)
        .cloned()
        .collect()
}

fn maintenance_between(
    logs: &[MaintenanceLog],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<MaintenanceLog> {
    logs.iter()
        .filter(|l| l.service_date >= start && l.service_date <= end)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fuel_on(day: NaiveDate) -> FuelRecord {
        FuelRecord {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            fuel_date: day,
            fuel_type: "diesel".to_string(),
            quantity: Decimal::new(40, 0),
            price_per_unit: Decimal::new(165, 2),
            cost: Decimal::new(6600, 2),
            odometer: 81_000.0,
            is_full_tank: true,
            station_name: None,
            location: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_previous_month_window_mid_month() {
        let (start, end) = previous_month_window(date(2025, 3, 15));
        assert_eq!(start, date(2025, 2, 1));
        assert_eq!(end, date(2025, 2, 28));
    }

    #[test]
    fn test_previous_month_window_year_rollover() {
        let (start, end) = previous_month_window(date(2025, 1, 7));
        assert_eq!(start, date(2024, 12, 1));
        assert_eq!(end, date(2024, 12, 31));
    }

    #[test]
    fn test_fuel_between_inclusive() {
        let records = vec![
            fuel_on(date(2025, 1, 31)),
            fuel_on(date(2025, 2, 1)),
            fuel_on(date(2025, 2, 28)),
            fuel_on(date(2025, 3, 1)),
        ];

        let filtered = fuel_between(&records, date(2025, 2, 1), date(2025, 2, 28));
        assert_eq!(filtered.len(), 2);
    }
}
