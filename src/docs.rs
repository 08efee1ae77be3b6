// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Taller Backend", description = "Indicadores e relatórios da oficina mecânica"),
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_dashboard,

        // --- Reports ---
        handlers::reports::sales_by_period,
        handlers::reports::critical_inventory,
        handlers::reports::employee_productivity,
        handlers::reports::orders_by_status,
        handlers::reports::frequent_clients,

        // --- Documents ---
        handlers::documents::dashboard_pdf,
        handlers::documents::sales_pdf,
        handlers::documents::critical_inventory_pdf,
        handlers::documents::productivity_pdf,
        handlers::documents::orders_by_status_pdf,
        handlers::documents::frequent_clients_pdf,
    ),
    components(
        schemas(
            // --- DASHBOARD ---
            models::dashboard::DashboardSnapshot,
            models::dashboard::DailySales,
            models::dashboard::MechanicWorkload,
            models::dashboard::CriticalPartEntry,

            // --- REPORTS ---
            models::reports::SalesByPeriodReport,
            models::reports::EmployeeProductivityEntry,
            models::reports::EmployeeProductivityReport,
            models::reports::OrderStatusCounts,
            models::reports::FrequentClientEntry,
            models::reports::FrequentClientsReport,

            // --- Entidades ---
            models::crm::Client,
            models::inventory::Part,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores Operacionais"),
        (name = "Reports", description = "Relatórios Gerenciais"),
        (name = "Documents", description = "Relatórios em PDF")
    )
)]
pub struct ApiDoc;
