//! Línea de tiempo de vencimientos y alertas de documentos
//!
//! Funciones puras sobre registros ya cargados: próximos servicios y
//! caducidades fusionados en una sola línea de tiempo, alertas de
//! documentos a punto de expirar y actividad reciente combinada.

use chrono::{Duration, NaiveDate};
use num_traits::ToPrimitive;
use uuid::Uuid;

use crate::models::document::{Document, DocumentType};
use crate::models::fuel_record::FuelRecord;
use crate::models::maintenance_log::MaintenanceLog;

/// Días de antelación por defecto para avisar de una caducidad
pub const DEFAULT_REMINDER_DAYS: i64 = 30;

/// Límite por defecto de la actividad reciente
pub const DEFAULT_ACTIVITY_LIMIT: usize = 10;

/// Origen de un elemento de la línea de tiempo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpcomingKind {
    Maintenance,
    Document,
}

impl UpcomingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpcomingKind::Maintenance => "maintenance",
            UpcomingKind::Document => "document",
        }
    }
}

/// Elemento de la línea de tiempo de vencimientos
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingItem {
    pub kind: UpcomingKind,
    pub source_id: Uuid,
    pub title: String,
    pub due_date: NaiveDate,
    pub days_until: i64,
    pub overdue: bool,
}

/// Alerta de documento próximo a expirar (o ya expirado)
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAlert {
    pub document_id: Uuid,
    pub title: String,
    pub document_type: DocumentType,
    pub expiry_date: NaiveDate,
    pub days_remaining: i64,
    pub expired: bool,
    pub message: String,
}

/// Origen de un evento de actividad reciente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Fuel,
    Maintenance,
    Document,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Fuel => "fuel",
            ActivityKind::Maintenance => "maintenance",
            ActivityKind::Document => "document",
        }
    }
}

/// Evento de actividad reciente
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub source_id: Uuid,
    pub date: NaiveDate,
    pub title: String,
    pub detail: Option<String>,
    pub amount: Option<f64>,
}

/// Línea de tiempo de próximos vencimientos.
///
/// Fusiona los mantenimientos con próxima fecha de servicio y los
/// documentos con fecha de caducidad, en orden cronológico. Un elemento
/// con fecha anterior a `today` se marca como vencido.
pub fn upcoming_timeline(
    maintenance: &[MaintenanceLog],
    documents: &[Document],
    today: NaiveDate,
) -> Vec<UpcomingItem> {
    let mut items: Vec<UpcomingItem> = Vec::new();

    for log in maintenance {
        if let Some(due_date) = log.next_service_date {
            items.push(UpcomingItem {
                kind: UpcomingKind::Maintenance,
                source_id: log.id,
                title: log.maintenance_type.label_pt().to_string(),
                due_date,
                days_until: (due_date - today).num_days(),
                overdue: due_date < today,
            });
        }
    }

    for document in documents {
        if let Some(due_date) = document.expiry_date {
            items.push(UpcomingItem {
                kind: UpcomingKind::Document,
                source_id: document.id,
                title: document.title.clone(),
                due_date,
                days_until: (due_date - today).num_days(),
                overdue: due_date < today,
            });
        }
    }

    items.sort_by_key(|item| item.due_date);
    items
}

/// Alertas de documentos a punto de expirar.
///
/// Un documento alerta cuando hoy ya entró en su ventana de aviso
/// (`expiry_date - reminder_days_before`, 30 días si no se indica).
/// Los documentos sin fecha de caducidad nunca alertan. El resultado
/// sale ordenado por días restantes: lo más urgente primero.
pub fn expiring_document_alerts(documents: &[Document], today: NaiveDate) -> Vec<DocumentAlert> {
    let mut alerts: Vec<DocumentAlert> = Vec::new();

    for document in documents {
        let Some(expiry_date) = document.expiry_date else {
            continue;
        };

        let lead_days = document
            .reminder_days_before
            .map(|d| d as i64)
            .unwrap_or(DEFAULT_REMINDER_DAYS);

        if today < expiry_date - Duration::days(lead_days) {
            continue;
        }

        let days_remaining = (expiry_date - today).num_days();
        let expired = days_remaining < 0;
        let message = alert_message(&document.title, days_remaining);

        alerts.push(DocumentAlert {
            document_id: document.id,
            title: document.title.clone(),
            document_type: document.document_type,
            expiry_date,
            days_remaining,
            expired,
            message,
        });
    }

    alerts.sort_by_key(|alert| alert.days_remaining);
    alerts
}

/// Mensaje pt-PT de la alerta según los días restantes
fn alert_message(title: &str, days_remaining: i64) -> String {
    match days_remaining {
        d if d < -1 => format!("{} expirou há {} dias", title, -d),
        -1 => format!("{} expirou ontem", title),
        0 => format!("{} expira hoje", title),
        1 => format!("{} expira amanhã", title),
        d => format!("{} expira em {} dias", title, d),
    }
}

/// Actividad reciente combinada (combustible, mantenimiento, documentos),
/// ordenada por fecha descendente y limitada a `limit` elementos.
pub fn recent_activity(
    fuel: &[FuelRecord],
    maintenance: &[MaintenanceLog],
    documents: &[Document],
    limit: usize,
) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = Vec::new();

    for record in fuel {
        entries.push(ActivityEntry {
            kind: ActivityKind::Fuel,
            source_id: record.id,
            date: record.fuel_date,
            title: "Combustível".to_string(),
            detail: record.station_name.clone(),
            amount: record.cost.to_f64(),
        });
    }

    for log in maintenance {
        entries.push(ActivityEntry {
            kind: ActivityKind::Maintenance,
            source_id: log.id,
            date: log.service_date,
            title: log.maintenance_type.label_pt().to_string(),
            detail: Some(log.description.clone()),
            amount: log.cost.and_then(|c| c.to_f64()),
        });
    }

    for document in documents {
        entries.push(ActivityEntry {
            kind: ActivityKind::Document,
            source_id: document.id,
            date: document.created_at.date_naive(),
            title: document.title.clone(),
            detail: Some(document.document_type.label_pt().to_string()),
            amount: None,
        });
    }

    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::maintenance_log::MaintenanceType;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn maintenance(next_service: Option<&str>) -> MaintenanceLog {
        MaintenanceLog {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            service_date: date("2025-01-10"),
            maintenance_type: MaintenanceType::OilChange,
            description: "Óleo e filtro".to_string(),
            cost: Some(Decimal::new(8500, 2)),
            odometer: 45_000.0,
            next_service_date: next_service.map(date),
            next_service_km: None,
            service_provider: None,
            receipt_url: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn document(
        title: &str,
        expiry: Option<&str>,
        reminder_days_before: Option<i32>,
    ) -> Document {
        Document {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            title: title.to_string(),
            document_type: DocumentType::Insurance,
            file_url: "http://localhost:3000/files/u/v/seguro.pdf".to_string(),
            file_name: "seguro.pdf".to_string(),
            file_size: Some(1024),
            expiry_date: expiry.map(date),
            reminder_days_before,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fuel(fuel_date: &str, cost: Decimal) -> FuelRecord {
        FuelRecord {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            fuel_date: date(fuel_date),
            fuel_type: "gasoline".to_string(),
            quantity: Decimal::new(4000, 2),
            price_per_unit: Decimal::new(1700, 3),
            cost,
            odometer: 45_000.0,
            is_full_tank: true,
            station_name: Some("Galp".to_string()),
            location: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_timeline_merges_and_sorts_chronologically() {
        let today = date("2025-03-01");
        let logs = vec![maintenance(Some("2025-04-15"))];
        let docs = vec![
            document("Seguro", Some("2025-03-20"), None),
            document("Inspeção anual", Some("2025-05-01"), None),
        ];

        let items = upcoming_timeline(&logs, &docs, today);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Seguro");
        assert_eq!(items[1].kind, UpcomingKind::Maintenance);
        assert_eq!(items[1].title, "Troca de Óleo");
        assert_eq!(items[2].title, "Inspeção anual");
        assert!(items.iter().all(|i| !i.overdue));
        assert_eq!(items[0].days_until, 19);
    }

    #[test]
    fn test_timeline_flags_overdue_items() {
        let today = date("2025-03-01");
        let logs = vec![maintenance(Some("2025-02-20"))];

        let items = upcoming_timeline(&logs, &[], today);
        assert_eq!(items.len(), 1);
        assert!(items[0].overdue);
        assert_eq!(items[0].days_until, -9);
    }

    #[test]
    fn test_timeline_skips_entries_without_dates() {
        let today = date("2025-03-01");
        let logs = vec![maintenance(None)];
        let docs = vec![document("Fatura oficina", None, None)];

        assert!(upcoming_timeline(&logs, &docs, today).is_empty());
    }

    #[test]
    fn test_alert_inside_default_window() {
        // Caducidad a 5 días: dentro de los 30 días por defecto
        let today = date("2025-03-01");
        let docs = vec![document("Seguro", Some("2025-03-06"), None)];

        let alerts = expiring_document_alerts(&docs, today);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days_remaining, 5);
        assert!(!alerts[0].expired);
        assert_eq!(alerts[0].message, "Seguro expira em 5 dias");
    }

    #[test]
    fn test_alert_outside_window_is_silent() {
        // Caducidad a 31 días con antelación por defecto de 30
        let today = date("2025-03-01");
        let docs = vec![document("Seguro", Some("2025-04-01"), None)];

        assert!(expiring_document_alerts(&docs, today).is_empty());
    }

    #[test]
    fn test_alert_window_boundary_day() {
        // Justo en expiry - reminder la alerta ya se emite
        let today = date("2025-03-02");
        let docs = vec![document("Seguro", Some("2025-04-01"), None)];

        let alerts = expiring_document_alerts(&docs, today);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].days_remaining, 30);
    }

    #[test]
    fn test_alert_custom_reminder_lead() {
        let today = date("2025-03-01");
        let docs = vec![
            document("Garantia", Some("2025-03-10"), Some(5)),
            document("Seguro", Some("2025-03-04"), Some(5)),
        ];

        let alerts = expiring_document_alerts(&docs, today);
        // La garantía aún está fuera de su ventana de 5 días
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "Seguro");
    }

    #[test]
    fn test_alert_expired_document() {
        let today = date("2025-03-10");
        let docs = vec![document("Inspeção", Some("2025-03-05"), None)];

        let alerts = expiring_document_alerts(&docs, today);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].expired);
        assert_eq!(alerts[0].days_remaining, -5);
        assert_eq!(alerts[0].message, "Inspeção expirou há 5 dias");
    }

    #[test]
    fn test_alert_messages_near_boundary() {
        assert_eq!(alert_message("Seguro", 0), "Seguro expira hoje");
        assert_eq!(alert_message("Seguro", 1), "Seguro expira amanhã");
        assert_eq!(alert_message("Seguro", -1), "Seguro expirou ontem");
    }

    #[test]
    fn test_alerts_sorted_by_urgency() {
        let today = date("2025-03-01");
        let docs = vec![
            document("Seguro", Some("2025-03-20"), None),
            document("Inspeção", Some("2025-03-05"), None),
            document("Registo", Some("2025-02-25"), None),
        ];

        let alerts = expiring_document_alerts(&docs, today);
        let titles: Vec<&str> = alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Registo", "Inspeção", "Seguro"]);
    }

    #[test]
    fn test_recent_activity_merges_and_limits() {
        let fuel_records = vec![
            fuel("2025-03-10", Decimal::new(4530, 2)),
            fuel("2025-03-01", Decimal::new(3810, 2)),
        ];
        let logs = vec![maintenance(None)]; // service_date 2025-01-10
        let docs = vec![document("Seguro", None, None)]; // created_at hoy

        let entries = recent_activity(&fuel_records, &logs, &docs, 3);
        assert_eq!(entries.len(), 3);
        // El documento se creó "hoy", más reciente que los repostajes de marzo de 2025
        assert_eq!(entries[0].kind, ActivityKind::Document);
        assert_eq!(entries[1].date, date("2025-03-10"));
        assert_eq!(entries[1].title, "Combustível");
        assert_eq!(entries[1].amount, Some(45.30));
        assert_eq!(entries[2].date, date("2025-03-01"));
    }

    #[test]
    fn test_recent_activity_maintenance_detail() {
        let logs = vec![maintenance(None)];
        let entries = recent_activity(&[], &logs, &[], DEFAULT_ACTIVITY_LIMIT);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Troca de Óleo");
        assert_eq!(entries[0].detail.as_deref(), Some("Óleo e filtro"));
        assert_eq!(entries[0].amount, Some(85.0));
    }
}
