// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{WorkshopRepository, WorkshopStore},
    services::{DocumentService, MetricsService, PdfRenderer, ReportRenderer, ReportService},
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub fonts_dir: String,
    pub font_family: String,
    pub shop_name: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_var_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} contém um valor inválido: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        Ok(Self {
            database_url,
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            db_max_connections: parsed_var_or("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(parsed_var_or("DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            fonts_dir: var_or("REPORT_FONTS_DIR", "./fonts"),
            font_family: var_or("REPORT_FONT_FAMILY", "Roboto"),
            shop_name: var_or("SHOP_NAME", "Taller Mecánico"),
        })
    }
}

// O estado compartilhado que será acessível em todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub metrics_service: MetricsService,
    pub report_service: ReportService,
    pub document_service: DocumentService,
}

impl AppState {
    /// Monta o gráfico de dependências sobre qualquer camada de dados e renderizador.
    pub fn new(store: Arc<dyn WorkshopStore>, renderer: Arc<dyn ReportRenderer>) -> Self {
        Self {
            metrics_service: MetricsService::new(store.clone()),
            report_service: ReportService::new(store),
            document_service: DocumentService::new(renderer),
        }
    }

    /// Conecta ao PostgreSQL, roda as migrações e monta o estado de produção.
    pub async fn connect(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.db_max_connections)
            .acquire_timeout(settings.db_acquire_timeout)
            .connect(&settings.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        let store = Arc::new(WorkshopRepository::new(db_pool));
        let renderer = Arc::new(PdfRenderer::new(
            settings.fonts_dir.clone(),
            settings.font_family.clone(),
            settings.shop_name.clone(),
        ));

        Ok(Self::new(store, renderer))
    }
}
