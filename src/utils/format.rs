//! Utilidades de formato
//!
//! Helpers de localización pt-PT para importes, números y etiquetas de mes.
//! El producto es de cara al usuario portugués, así que los textos legibles
//! de la API (resúmenes, alertas, actividad) usan estas funciones.

use chrono::NaiveDate;

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun",
    "jul", "ago", "set", "out", "nov", "dez",
];

/// Formatear un número con separador decimal de coma y agrupación por espacios
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, dec_part) = match formatted.split_once('.') {
        Some((i, d)) => (i.to_string(), Some(d.to_string())),
        None => (formatted, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(*c);
    }

    let mut result = String::new();
    if value < 0.0 {
        result.push('-');
    }
    result.push_str(&grouped);
    if let Some(d) = dec_part {
        result.push(',');
        result.push_str(&d);
    }
    result
}

/// Formatear un importe en euros al estilo pt-PT: "1 234,56 €"
pub fn format_currency(value: f64) -> String {
    format!("{} €", format_number(value, 2))
}

/// Etiqueta corta de mes para las series mensuales: "jan 2025"
pub fn month_label(year: i32, month: u32) -> String {
    let name = MONTHS_PT
        .get((month as usize).saturating_sub(1))
        .copied()
        .unwrap_or("---");
    format!("{} {}", name, year)
}

/// Fecha corta pt-PT: "15 jan 2025"
pub fn format_date_pt(date: NaiveDate) -> String {
    use chrono::Datelike;
    let name = MONTHS_PT
        .get((date.month() as usize).saturating_sub(1))
        .copied()
        .unwrap_or("---");
    format!("{} {} {}", date.day(), name, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1234.5, 2), "1 234,50");
        assert_eq!(format_number(1234567.89, 2), "1 234 567,89");
        assert_eq!(format_number(45.3, 2), "45,30");
        assert_eq!(format_number(0.0, 2), "0,00");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1234.5, 2), "-1 234,50");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(168.4), "168,40 €");
        assert_eq!(format_currency(1250.0), "1 250,00 €");
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(2025, 1), "jan 2025");
        assert_eq!(month_label(2024, 12), "dez 2024");
    }

    #[test]
    fn test_format_date_pt() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(format_date_pt(date), "15 mar 2025");
    }
}
