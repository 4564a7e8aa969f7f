use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "🚗 Vehicle Pulse Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("VEHICLE_PULSE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    println!("{} {}", "🌐 API:".bright_blue(), base_url);

    let client = reqwest::Client::new();

    // Paso 1: Login (con registro opcional) y obtener token
    let token = authenticate(&client, &base_url).await?;

    // Paso 2: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Listar vehículos");
        println!("2. ➕ Crear vehículo");
        println!("3. ⛽ Registrar repostaje");
        println!("4. 📊 Estadísticas de un vehículo");
        println!("5. 📋 Resumen del dashboard");
        println!("6. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-6): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        match choice.trim() {
            "1" => list_vehicles(&client, &base_url, &token).await?,
            "2" => create_vehicle(&client, &base_url, &token).await?,
            "3" => add_fuel_record(&client, &base_url, &token).await?,
            "4" => show_vehicle_stats(&client, &base_url, &token).await?,
            "5" => show_dashboard_summary(&client, &base_url, &token).await?,
            "6" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn print_response(title: &str, status: reqwest::StatusCode, body: &Value) {
    println!();
    println!("{}", title.bright_green().bold());
    println!("{}", "=====================".bright_green());
    println!("{} {}", "📟 Status:".bright_blue(), status);
    println!("{}", "📄 Body de la Respuesta:".bright_blue());
    println!(
        "{}",
        serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
    );
}

async fn authenticate(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    println!();
    println!("{}", "🔐 AUTENTICACIÓN".bright_cyan().bold());
    println!("{}", "=================".bright_cyan());

    let register = prompt("¿Registrar un usuario nuevo? (s/N): ")?;
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;

    if register.eq_ignore_ascii_case("s") {
        let full_name = prompt("Nombre completo: ")?;
        let payload = json!({
            "email": email,
            "password": password,
            "full_name": full_name,
        });

        let response = client
            .post(format!("{}/api/auth/register", base_url))
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        let body: Value = response.json().await?;
        print_response("📥 RESPUESTA DE REGISTRO:", status, &body);
    }

    let payload = json!({
        "email": email,
        "password": password,
    });

    let response = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 RESPUESTA DE LOGIN:", status, &body);

    if let Some(token) = body.get("token").and_then(|t| t.as_str()) {
        println!();
        println!("{}", "✅ TOKEN EXTRAÍDO:".bright_green().bold());
        println!("{}", token);
        return Ok(token.to_string());
    }

    Err("❌ No se pudo extraer el token de la respuesta".into())
}

async fn list_vehicles(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .get(format!("{}/api/vehicle", base_url))
        .bearer_auth(token)
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 VEHÍCULOS:", status, &body);

    if let Some(vehicles) = body.as_array() {
        println!();
        println!(
            "{}",
            format!("🚗 TOTAL: {} vehículo(s)", vehicles.len())
                .bright_green()
                .bold()
        );
    }

    Ok(())
}

async fn create_vehicle(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("{}", "➕ NUEVO VEHÍCULO".bright_cyan().bold());
    println!("{}", "==================".bright_cyan());

    let brand = prompt("Marca (ej: Renault): ")?;
    let model = prompt("Modelo (ej: Clio): ")?;
    let year = prompt("Año (ej: 2019): ")?;
    let plate = prompt("Matrícula (ej: AB-12-CD): ")?;
    let fuel_type = prompt("Combustible (gasoline/diesel/electric/hybrid/lpg): ")?;

    let payload = json!({
        "brand": brand,
        "model": model,
        "year": year.parse::<i32>().unwrap_or(2020),
        "plate": plate,
        "vehicle_type": "car",
        "fuel_type": if fuel_type.is_empty() { "gasoline".to_string() } else { fuel_type },
    });

    let response = client
        .post(format!("{}/api/vehicle", base_url))
        .bearer_auth(token)
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 RESPUESTA:", status, &body);

    Ok(())
}

async fn add_fuel_record(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("{}", "⛽ NUEVO REPOSTAJE".bright_cyan().bold());
    println!("{}", "===================".bright_cyan());

    let vehicle_id = prompt("ID del vehículo: ")?;
    let fuel_date = prompt("Fecha (YYYY-MM-DD): ")?;
    let quantity = prompt("Litros (ej: 42.5): ")?;
    let price_per_unit = prompt("Precio por litro (ej: 1.65): ")?;
    let odometer = prompt("Odómetro en km (ej: 81500): ")?;

    let payload = json!({
        "vehicle_id": vehicle_id,
        "fuel_date": fuel_date,
        "fuel_type": "diesel",
        "quantity": quantity,
        "price_per_unit": price_per_unit,
        "odometer": odometer.parse::<f64>().unwrap_or(0.0),
        "is_full_tank": true,
    });

    let response = client
        .post(format!("{}/api/fuel", base_url))
        .bearer_auth(token)
        .json(&payload)
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 RESPUESTA:", status, &body);

    Ok(())
}

async fn show_vehicle_stats(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("{}", "📊 ESTADÍSTICAS".bright_cyan().bold());
    println!("{}", "================".bright_cyan());

    let vehicle_id = prompt("ID del vehículo: ")?;
    let start_date = prompt("Fecha inicio (YYYY-MM-DD, vacío = sin período): ")?;

    let mut url = format!("{}/api/stats/vehicle/{}", base_url, vehicle_id);
    if !start_date.is_empty() {
        url = format!("{}?start_date={}", url, start_date);
    }

    let response = client.get(&url).bearer_auth(token).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 ESTADÍSTICAS DEL PERÍODO:", status, &body);

    let response = client
        .get(format!(
            "{}/api/stats/vehicle/{}/monthly",
            base_url, vehicle_id
        ))
        .bearer_auth(token)
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 SERIE MENSUAL:", status, &body);

    Ok(())
}

async fn show_dashboard_summary(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = client
        .get(format!("{}/api/dashboard/summary", base_url))
        .bearer_auth(token)
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 RESUMEN DEL MES:", status, &body);

    let response = client
        .get(format!("{}/api/dashboard/alerts", base_url))
        .bearer_auth(token)
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_response("📥 ALERTAS DE DOCUMENTOS:", status, &body);

    Ok(())
}
