use anyhow::{anyhow, Result};
use colored::*;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚗 Kendaraan API Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = ask_base_url()?;
    let client = Client::new();

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🔁 Flujo completo de transmisi (store → get → update → delete)");
        println!("2. 📄 Listar transmisi");
        println!("3. 🚙 Listar kendaraan");
        println!("4. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-4): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let result = match choice.trim() {
            "1" => transmisi_flow(&client, &base_url).await,
            "2" => list(&client, &base_url, "/api/transmisi").await,
            "3" => list(&client, &base_url, "/api/kendaraan").await,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{}", format!("❌ {}", e).bright_red());
        }
    }

    Ok(())
}

fn ask_base_url() -> Result<String> {
    print!("{}", "URL del servidor [http://localhost:8080]: ".bright_yellow());
    io::stdout().flush()?;
    let mut url = String::new();
    io::stdin().read_line(&mut url)?;
    let url = url.trim().trim_end_matches('/');
    Ok(if url.is_empty() {
        "http://localhost:8080".to_string()
    } else {
        url.to_string()
    })
}

async fn list(client: &Client, base_url: &str, path: &str) -> Result<()> {
    let response = client.get(format!("{}{}", base_url, path)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_step("GET", path, status, &body);
    Ok(())
}

/// Recorre el ciclo de vida completo de una transmisi y comprueba cada status
async fn transmisi_flow(client: &Client, base_url: &str) -> Result<()> {
    println!();
    println!("{}", "🔁 FLUJO TRANSMISI".bright_cyan().bold());
    println!("{}", "===================".bright_cyan());

    let response = client
        .post(format!("{}/api/transmisi/store", base_url))
        .json(&json!({ "nama_transmisi": "Manual" }))
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_step("POST", "/api/transmisi/store", status, &body);
    expect(status, StatusCode::CREATED)?;
    let id = body["data"]["id_transmisi"]
        .as_i64()
        .ok_or_else(|| anyhow!("la respuesta no trae id_transmisi"))?;

    let path = format!("/api/transmisi/{}", id);
    let response = client.get(format!("{}{}", base_url, path)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_step("GET", &path, status, &body);
    expect(status, StatusCode::OK)?;

    let path = format!("/api/transmisi/update/{}", id);
    let response = client
        .patch(format!("{}{}", base_url, path))
        .json(&json!({ "nama_transmisi": "Automatic" }))
        .send()
        .await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_step("PATCH", &path, status, &body);
    expect(status, StatusCode::OK)?;

    let path = format!("/api/transmisi/delete/{}", id);
    let response = client.delete(format!("{}{}", base_url, path)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_step("DELETE", &path, status, &body);
    expect(status, StatusCode::OK)?;

    let path = format!("/api/transmisi/{}", id);
    let response = client.get(format!("{}{}", base_url, path)).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    print_step("GET", &path, status, &body);
    expect(status, StatusCode::NOT_FOUND)?;

    println!("{}", "✅ Flujo completado".bright_green().bold());
    Ok(())
}

fn expect(actual: StatusCode, expected: StatusCode) -> Result<()> {
    if actual != expected {
        return Err(anyhow!("se esperaba {} y llegó {}", expected, actual));
    }
    Ok(())
}

fn print_step(method: &str, path: &str, status: StatusCode, body: &Value) {
    let line = format!("{} {} → {}", method, path, status);
    if status.is_success() {
        println!("{}", line.bright_green());
    } else {
        println!("{}", line.bright_yellow());
    }
    println!("{}", serde_json::to_string_pretty(body).unwrap_or_default());
}
