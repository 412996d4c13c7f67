use crate::domain::dates::format_display_date;
use crate::domain::record::Record;
use crate::domain::status::StatusCategory;
use crate::forms::record_path;
use crate::templates::{desktop_layout, flash, status_pill};
use maud::{html, Markup};
use std::collections::BTreeMap;

pub struct DashboardVm<'a> {
    pub full_name: &'a str,
    pub records: &'a [Record],
    pub counts: BTreeMap<StatusCategory, usize>,
    pub notice: Option<&'a str>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "Records",
        Some(vm.full_name),
        html! {
            main class="container" {
                h1 { "Foreclosure Records" }

                (flash(vm.notice))

                (stat_counters(vm))

                div class="desktop-table" style="overflow-x: auto;" {
                    table {
                        thead {
                            tr {
                                th { "Applicant" }
                                th { "Branch" }
                                th { "Location" }
                                th { "Collateral" }
                                th { "Qty" }
                                th { "Requested" }
                                th { "Appointment" }
                                th { "Engineer" }
                                th { "Status" }
                                th { "Reported" }
                                th { "Remarks" }
                                th { "Actions" }
                            }
                        }
                        tbody id="desktop-body" {
                            @for record in vm.records.iter().rev() {
                                tr {
                                    td { b { (record.applicant_name) } }
                                    td { (record.branch) }
                                    td { (record.site_location) }
                                    td { (record.collateral_type) }
                                    td { (record.number_of_collaterals) }
                                    td { (format_display_date(record.date_of_request.as_deref())) }
                                    td { (format_display_date(record.date_of_appointment.as_deref())) }
                                    td { (record.engineer_name.as_deref().unwrap_or("")) }
                                    td { (status_pill(&record.report_status)) }
                                    td { (format_display_date(record.date_of_report.as_deref())) }
                                    td { (record.remarks.as_deref().unwrap_or("")) }
                                    td { (record_actions(record)) }
                                }
                            }
                        }
                    }
                    @if vm.records.is_empty() {
                        p { "No records yet. " a href="/records/new" { "Create the first one." } }
                    }
                }

                div id="mobile-cards-container" class="mobile-cards" {
                    @for record in vm.records.iter().rev() {
                        div class="card" {
                            div class="card-header" style="display: flex; justify-content: space-between;" {
                                div {
                                    h3 class="card-title" { (record.applicant_name) }
                                    div class="card-subtitle" { (record.branch) " | " (record.site_location) }
                                }
                                (status_pill(&record.report_status))
                            }
                            div class="card-meta" {
                                b { "Type:" } " " (record.collateral_type) " (" (record.number_of_collaterals) ")"
                                br;
                                b { "Requested:" } " " (format_display_date(record.date_of_request.as_deref()))
                            }
                            (record_actions(record))
                        }
                    }
                }
            }
        },
    )
}

fn stat_counters(vm: &DashboardVm) -> Markup {
    let total: usize = vm.counts.values().sum();
    html! {
        div class="stats" {
            div class="stat" id="count-total" { b { (total) } "Total" }
            @for category in StatusCategory::ALL {
                div class="stat" id=(format!("count-{}", category.color_tag())) {
                    b { (vm.counts.get(&category).copied().unwrap_or(0)) }
                    (category.label())
                }
            }
        }
    }
}

fn record_actions(record: &Record) -> Markup {
    html! {
        div class="actions" {
            a class="act-btn e-btn" href=(record_path(&record.id, "/edit")) { "Edit" }
            form method="post" action=(record_path(&record.id, "/delete")) style="margin: 0;"
                onsubmit="return confirm('Are you sure you want to delete this record?')"
            {
                button type="submit" class="act-btn d-btn" { "Delete" }
            }
        }
    }
}
