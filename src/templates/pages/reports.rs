use crate::presentation::summary::{EmptyView, SummaryView};
use crate::presentation::ReportView;
use crate::templates::{desktop_layout, flash};
use maud::{html, Markup};

pub struct ReportsVm<'a> {
    pub full_name: &'a str,
    pub title: &'a str,
    pub start: &'a str,
    pub end: &'a str,
    pub view: Option<ReportView>,
    pub error: Option<String>,
}

pub fn reports_page(vm: &ReportsVm) -> Markup {
    desktop_layout(
        "Reports",
        Some(vm.full_name),
        html! {
            main class="container" {
                h1 { "Status Reports" }

                form method="get" action="/reports" class="card" style="display: flex; gap: 10px; align-items: end; flex-wrap: wrap;" {
                    div {
                        label for="report-title" { "Title" } br;
                        input type="text" id="report-title" name="title" value=(vm.title);
                    }
                    div {
                        label for="start-date" { "From" } br;
                        input type="date" id="start-date" name="start" value=(vm.start) required;
                    }
                    div {
                        label for="end-date" { "To" } br;
                        input type="date" id="end-date" name="end" value=(vm.end) required;
                    }
                    button type="submit" class="act-btn e-btn" { "Run report" }
                }

                (flash(vm.error.as_deref()))

                div id="active-report-display" {
                    @match &vm.view {
                        Some(ReportView::Summary(summary)) => (summary_card(summary)),
                        Some(ReportView::Empty(empty)) => (empty_card(empty)),
                        None => {},
                    }
                }
            }
        },
    )
}

fn export_href(kind: &str, summary: &SummaryView) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("start", &summary.start)
        .append_pair("end", &summary.end)
        .append_pair("title", &summary.title)
        .finish();
    format!("/reports/export.{kind}?{query}")
}

fn summary_card(summary: &SummaryView) -> Markup {
    html! {
        div class="summary-card" {
            div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px;" {
                h2 style="margin: 0; font-size: 1.2rem;" { (summary.title) }
                div class="actions" {
                    a class="act-btn e-btn" href=(export_href("pdf", summary)) { "DOWNLOAD PDF" }
                    a class="act-btn e-btn" href=(export_href("xlsx", summary)) { "DOWNLOAD XLSX" }
                }
            }
            p style="font-size: 0.75rem; color: #64748b;" { "Period: " (summary.period) }
            hr;
            div class="summary-line" { b { "Total Requests:" } " " (summary.total) }
            @for row in &summary.rows {
                div class=(format!("summary-line {}", row.color_tag)) {
                    b { (row.label) ":" } " " (row.count) " (" (row.percent_text()) "%)"
                }
            }
        }
    }
}

fn empty_card(empty: &EmptyView) -> Markup {
    html! {
        div class="summary-card" {
            h2 style="margin: 0; font-size: 1.2rem;" { (empty.title) }
            p style="font-size: 0.75rem; color: #64748b;" { "Period: " (empty.period) }
            p class="no-data" {
                "No records were requested in this period. "
                (empty.unfiltered_total) " records are on file in total."
            }
        }
    }
}
