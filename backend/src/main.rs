//! Kanasu API - Main Entry Point

use kanasu_api::run_server;
use kanasu_core::config::Settings;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("╔════════════════════════════════════════════════╗");
    println!("║   Kanasu - Bilingual Career Guidance API       ║");
    println!("║   English · ಕನ್ನಡ                               ║");
    println!("╚════════════════════════════════════════════════╝");
    println!();

    run_server(Settings::from_env()).await
}
