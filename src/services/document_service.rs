// src/services/document_service.rs

use std::{path::PathBuf, sync::Arc};

use chrono::{NaiveDate, NaiveDateTime};
use genpdf::{elements, style, Element};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::reports::ReportDocument,
};

/// Converte um relatório já calculado em um artefato binário.
/// Recebe o relatório emprestado: quem chamou continua com ele e pode tentar de novo.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, AppError>;
}

/// Documento pronto para ser entregue como anexo.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct DocumentService {
    renderer: Arc<dyn ReportRenderer>,
}

impl DocumentService {
    pub fn new(renderer: Arc<dyn ReportRenderer>) -> Self {
        Self { renderer }
    }

    pub fn render(&self, document: &ReportDocument) -> Result<RenderedReport, AppError> {
        let bytes = self
            .renderer
            .render(document)
            .inspect_err(|e| tracing::error!("Falha ao gerar \"{}\": {}", document.title(), e))?;

        let file_name = document.file_name();
        tracing::info!("📄 Documento {} gerado ({} bytes)", file_name, bytes.len());

        Ok(RenderedReport { file_name, bytes })
    }
}

// =========================================================================
//  DIAGRAMAÇÃO
// =========================================================================

/// Uma tabela do documento: cabeçalho com pesos de coluna + linhas já formatadas.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSection {
    pub heading: Option<String>,
    pub columns: Vec<(&'static str, usize)>,
    pub rows: Vec<Vec<String>>,
}

/// Conteúdo do relatório independente do formato de saída.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub title: &'static str,
    pub details: Vec<String>,
    pub sections: Vec<TableSection>,
    pub totals: Vec<String>,
}

fn money(value: Decimal) -> String {
    format!("$ {:.2}", value)
}

fn day(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn instant(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}

fn table(
    heading: Option<&str>,
    columns: Vec<(&'static str, usize)>,
    rows: Vec<Vec<String>>,
) -> TableSection {
    TableSection { heading: heading.map(str::to_string), columns, rows }
}

impl ReportLayout {
    pub fn of(document: &ReportDocument) -> Self {
        let title = document.title();

        match document {
            ReportDocument::Dashboard(s) => {
                let indicators = vec![
                    vec!["Clientes ativos".to_string(), s.total_clients.to_string()],
                    vec!["Veículos ativos".to_string(), s.total_vehicles.to_string()],
                    vec!["Funcionários ativos".to_string(), s.total_employees.to_string()],
                    vec!["Ordens de hoje".to_string(), s.orders_today.to_string()],
                    vec!["Ordens pendentes".to_string(), s.pending_orders.to_string()],
                    vec!["Ordens em andamento".to_string(), s.in_progress_orders.to_string()],
                    vec!["Receita do mês".to_string(), money(s.revenue_this_month)],
                    vec!["Receita do mês anterior".to_string(), money(s.revenue_last_month)],
                    vec!["Crescimento".to_string(), format!("{:.2}%", s.revenue_growth)],
                    vec!["Peças com estoque baixo".to_string(), s.low_stock_parts.to_string()],
                ];
                let trend = s
                    .sales_last_7_days
                    .iter()
                    .map(|d| vec![day(d.date), money(d.total)])
                    .collect();
                let mechanics = s
                    .mechanic_workloads
                    .iter()
                    .map(|m| {
                        vec![
                            m.employee_name.clone(),
                            m.active_orders.to_string(),
                            m.completed_orders.to_string(),
                        ]
                    })
                    .collect();
                let parts = s
                    .critical_parts
                    .iter()
                    .map(|p| {
                        vec![
                            p.code.clone(),
                            p.name.clone(),
                            p.current_stock.to_string(),
                            p.minimum_stock.to_string(),
                        ]
                    })
                    .collect();

                Self {
                    title,
                    details: vec![format!("Referência: {}", instant(s.as_of))],
                    sections: vec![
                        table(None, vec![("Indicador", 3), ("Valor", 2)], indicators),
                        table(Some("Vendas dos últimos 7 dias"), vec![("Data", 1), ("Total", 1)], trend),
                        table(
                            Some("Carga dos mecânicos"),
                            vec![("Mecânico", 3), ("Em andamento", 1), ("Concluídas", 1)],
                            mechanics,
                        ),
                        table(
                            Some("Peças com menor estoque"),
                            vec![("Código", 1), ("Peça", 3), ("Estoque", 1), ("Mínimo", 1)],
                            parts,
                        ),
                    ],
                    totals: Vec::new(),
                }
            }

            ReportDocument::SalesByPeriod(r) => Self {
                title,
                details: vec![format!("Período: {} a {}", day(r.start), day(r.end))],
                sections: vec![table(
                    None,
                    vec![("Data", 1), ("Total", 1)],
                    r.daily_totals.iter().map(|d| vec![day(d.date), money(d.total)]).collect(),
                )],
                totals: vec![format!("TOTAL GERAL: {}", money(r.grand_total))],
            },

            ReportDocument::CriticalInventory { generated_at, parts } => Self {
                title,
                details: vec![format!("Gerado em: {}", instant(*generated_at))],
                sections: vec![table(
                    None,
                    vec![("Código", 1), ("Peça", 3), ("Marca", 2), ("Estoque", 1), ("Mínimo", 1), ("Ativa", 1)],
                    parts
                        .iter()
                        .map(|p| {
                            vec![
                                p.code.clone(),
                                p.name.clone(),
                                p.brand.clone().unwrap_or_else(|| "-".to_string()),
                                p.current_stock.to_string(),
                                p.minimum_stock.to_string(),
                                if p.is_active { "Sim" } else { "Não" }.to_string(),
                            ]
                        })
                        .collect(),
                )],
                totals: vec![format!("Peças em estoque crítico: {}", parts.len())],
            },

            ReportDocument::EmployeeProductivity(r) => {
                let revenue = r.entries.iter().map(|e| e.revenue_generated).sum::<Decimal>();
                Self {
                    title,
                    details: vec![format!("Período: {} a {}", day(r.start), day(r.end))],
                    sections: vec![table(
                        None,
                        vec![("Funcionário", 3), ("Concluídas", 1), ("Em andamento", 1), ("Receita", 2)],
                        r.entries
                            .iter()
                            .map(|e| {
                                vec![
                                    e.employee_name.clone(),
                                    e.completed_count.to_string(),
                                    e.active_count.to_string(),
                                    money(e.revenue_generated),
                                ]
                            })
                            .collect(),
                    )],
                    totals: vec![format!("RECEITA TOTAL: {}", money(revenue))],
                }
            }

            ReportDocument::OrdersByStatus { generated_at, counts } => {
                let total = counts.pending
                    + counts.in_progress
                    + counts.completed
                    + counts.delivered
                    + counts.cancelled;
                Self {
                    title,
                    details: vec![format!("Gerado em: {}", instant(*generated_at))],
                    sections: vec![table(
                        None,
                        vec![("Situação", 3), ("Quantidade", 1)],
                        vec![
                            vec!["Pendentes".to_string(), counts.pending.to_string()],
                            vec!["Em andamento".to_string(), counts.in_progress.to_string()],
                            vec!["Concluídas".to_string(), counts.completed.to_string()],
                            vec!["Entregues".to_string(), counts.delivered.to_string()],
                            vec!["Canceladas".to_string(), counts.cancelled.to_string()],
                        ],
                    )],
                    totals: vec![format!("Total de ordens: {}", total)],
                }
            }

            ReportDocument::FrequentClients { generated_at, report } => Self {
                title,
                details: vec![
                    format!("Gerado em: {}", instant(*generated_at)),
                    format!("Limite: {} clientes", report.limit),
                ],
                sections: vec![table(
                    None,
                    vec![("Cliente", 3), ("Ordens", 1), ("Última visita", 2), ("Total gasto", 2)],
                    report
                        .entries
                        .iter()
                        .map(|e| {
                            vec![
                                e.client.full_name(),
                                e.total_orders.to_string(),
                                e.last_visit_date.map(|d| day(d.date())).unwrap_or_else(|| "-".to_string()),
                                money(e.total_spent),
                            ]
                        })
                        .collect(),
                )],
                totals: Vec::new(),
            },
        }
    }
}

// =========================================================================
//  PDF
// =========================================================================

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    fonts_dir: PathBuf,
    font_family: String,
    shop_name: String,
}

impl PdfRenderer {
    pub fn new(
        fonts_dir: impl Into<PathBuf>,
        font_family: impl Into<String>,
        shop_name: impl Into<String>,
    ) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            font_family: font_family.into(),
            shop_name: shop_name.into(),
        }
    }
}

fn render_error(e: genpdf::error::Error) -> AppError {
    AppError::RenderError(e.to_string())
}

impl ReportRenderer for PdfRenderer {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, AppError> {
        let layout = ReportLayout::of(document);

        // Carrega a família de fontes (Regular, Bold, Italic, BoldItalic)
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, &self.font_family, None)
            .map_err(|_| {
                AppError::FontNotFound(format!(
                    "Fonte {} não encontrada na pasta {}",
                    self.font_family,
                    self.fonts_dir.display()
                ))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(layout.title);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new(self.shop_name.as_str())
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Break::new(1.5));
        doc.push(
            elements::Paragraph::new(layout.title)
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        for line in &layout.details {
            doc.push(elements::Paragraph::new(line.as_str()).styled(style::Style::new().with_font_size(10)));
        }

        // --- TABELAS ---
        let style_bold = style::Style::new().bold();
        for section in layout.sections {
            doc.push(elements::Break::new(2));
            if let Some(heading) = section.heading {
                doc.push(elements::Paragraph::new(heading).styled(style::Style::new().bold().with_font_size(12)));
                doc.push(elements::Break::new(0.5));
            }

            let weights = section.columns.iter().map(|(_, w)| *w).collect();
            let mut table = elements::TableLayout::new(weights);
            table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

            let mut header = table.row();
            for (name, _) in &section.columns {
                header = header.element(elements::Paragraph::new(*name).styled(style_bold));
            }
            header.push().map_err(render_error)?;

            if section.rows.is_empty() {
                let mut row = table.row();
                for i in 0..section.columns.len() {
                    let text = if i == 0 { "Sem registros" } else { "" };
                    row = row.element(elements::Paragraph::new(text));
                }
                row.push().map_err(render_error)?;
            }

            for cells in section.rows {
                let mut row = table.row();
                for cell in cells {
                    row = row.element(elements::Paragraph::new(cell));
                }
                row.push().map_err(render_error)?;
            }

            doc.push(table);
        }

        // --- TOTAIS ---
        if !layout.totals.is_empty() {
            doc.push(elements::Break::new(2));
        }
        for line in layout.totals {
            let mut total_paragraph = elements::Paragraph::new(line);
            total_paragraph.set_alignment(genpdf::Alignment::Right);
            doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));
        }

        // Renderiza para buffer (memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer).map_err(render_error)?;

        Ok(buffer)
    }
}
