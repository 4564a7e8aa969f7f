use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::DocumentType;

// Query de período para estadísticas. Sin start_date no hay período
// definido y la respuesta no incluye comparación con el anterior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// Totales de gasto de un período
#[derive(Debug, Serialize)]
pub struct PeriodTotalsResponse {
    pub fuel_spent: f64,
    pub maintenance_spent: f64,
    pub total_spent: f64,
    pub fuel_count: usize,
    pub maintenance_count: usize,
    pub avg_consumption: Option<f64>,
}

// Variaciones porcentuales frente al período anterior (None cuando el
// valor del período anterior es cero)
#[derive(Debug, Serialize)]
pub struct StatsChangesResponse {
    pub total: Option<f64>,
    pub fuel: Option<f64>,
    pub maintenance: Option<f64>,
}

// Período consultado
#[derive(Debug, Serialize)]
pub struct PeriodResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// Estadísticas agregadas de un vehículo
#[derive(Debug, Serialize)]
pub struct VehicleStatsResponse {
    pub vehicle_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodResponse>,
    pub totals: PeriodTotalsResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PeriodTotalsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<StatsChangesResponse>,
}

// Punto de la serie mensual de gasto
#[derive(Debug, Serialize)]
pub struct MonthlySpendingResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub fuel: f64,
    pub maintenance: f64,
    pub total: f64,
}

// Query del dashboard: vehículo opcional, por defecto el principal
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub vehicle_id: Option<Uuid>,
}

// Query de actividad reciente
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub vehicle_id: Option<Uuid>,
    pub limit: Option<usize>,
}

// Resumen del mes en curso para el dashboard
#[derive(Debug, Serialize)]
pub struct DashboardSummaryResponse {
    pub vehicle_id: Option<Uuid>,
    pub month_label: String,
    pub total_spent: f64,
    pub total_spent_formatted: String,
    pub fuel_spent: f64,
    pub maintenance_spent: f64,
    pub avg_consumption: Option<f64>,
    pub change_vs_previous: Option<f64>,
}

// Elemento del timeline de próximos vencimientos
#[derive(Debug, Serialize)]
pub struct TimelineItemResponse {
    pub kind: String, // "maintenance" | "document"
    pub source_id: Uuid,
    pub title: String,
    pub due_date: NaiveDate,
    pub due_date_formatted: String,
    pub days_until: i64,
    pub overdue: bool,
}

// Alerta de documento a punto de expirar
#[derive(Debug, Serialize)]
pub struct DocumentAlertResponse {
    pub document_id: Uuid,
    pub title: String,
    pub document_type: DocumentType,
    pub expiry_date: NaiveDate,
    pub days_remaining: i64,
    pub expired: bool,
    pub message: String,
}

// Evento de actividad reciente (combustible, mantenimiento o documento)
#[derive(Debug, Serialize)]
pub struct ActivityItemResponse {
    pub kind: String, // "fuel" | "maintenance" | "document"
    pub source_id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub detail: Option<String>,
    pub amount: Option<f64>,
    pub amount_formatted: Option<String>,
}
