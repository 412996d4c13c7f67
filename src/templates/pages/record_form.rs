use crate::forms::RecordForm;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct RecordFormVm<'a> {
    pub full_name: &'a str,
    pub heading: &'a str,
    pub action: String,
    pub form: &'a RecordForm,
    pub problems: &'a [String],
    /// Appointment, report and engineer fields only make sense once a case exists.
    pub show_progress: bool,
}

const STATUS_OPTIONS: [(&str, &str); 4] = [
    ("pending", "Pending"),
    ("in progress", "In Progress"),
    ("reported", "Reported"),
    ("canceled", "Canceled"),
];

pub fn record_form_page(vm: &RecordFormVm) -> Markup {
    let f = vm.form;
    let known_status = STATUS_OPTIONS
        .iter()
        .any(|(value, _)| value.eq_ignore_ascii_case(f.report_status.trim()));

    desktop_layout(
        vm.heading,
        Some(vm.full_name),
        html! {
            main class="container narrow" {
                h1 id="modalTitle" { (vm.heading) }

                @if !vm.problems.is_empty() {
                    div class="flash" role="alert" {
                        ul {
                            @for problem in vm.problems {
                                li { (problem) }
                            }
                        }
                    }
                }

                form method="post" action=(vm.action) class="card" {
                    (text_input("applicant", "applicantName", "Applicant name", &f.applicant_name, true))
                    (text_input("branch", "branch", "Branch", &f.branch, true))
                    (text_input("location", "siteLocation", "Site location", &f.site_location, true))
                    (text_input("collateral-type", "collateralType", "Collateral type", &f.collateral_type, true))

                    label for="num-collateral" { "Number of collaterals" }
                    br;
                    input type="number" min="0" id="num-collateral" name="numberOfCollaterals" value=(f.number_of_collaterals);
                    br;

                    (date_input("req-date", "dateOfRequest", "Date of request", &f.date_of_request, true))

                    @if vm.show_progress {
                        fieldset id="progressiveSection" {
                            legend { "Progress" }
                            (date_input("app-date", "dateOfAppointment", "Date of appointment", &f.date_of_appointment, false))
                            (date_input("reported-date", "dateOfReport", "Date of report", &f.date_of_report, false))
                            (text_input("engineer", "engineerName", "Engineer", &f.engineer_name, false))

                            label for="status" { "Status" }
                            br;
                            select id="status" name="reportStatus" {
                                @if !known_status {
                                    option value=(f.report_status) selected { (f.report_status) }
                                }
                                @for (value, label) in STATUS_OPTIONS {
                                    option value=(value) selected[value.eq_ignore_ascii_case(f.report_status.trim())] { (label) }
                                }
                            }
                            br;

                            label for="remark" { "Remarks" }
                            br;
                            textarea id="remark" name="remarks" rows="3" { (f.remarks) }
                        }
                    } @else {
                        input type="hidden" name="reportStatus" value=(f.report_status);
                    }

                    br;
                    div class="actions" {
                        button type="submit" class="act-btn e-btn" { "Save" }
                        a href="/dashboard" class="act-btn d-btn" { "Cancel" }
                    }
                }
            }
        },
    )
}

fn text_input(id: &str, name: &str, label: &str, value: &str, required: bool) -> Markup {
    html! {
        label for=(id) { (label) }
        br;
        input type="text" id=(id) name=(name) value=(value) required[required];
        br;
    }
}

fn date_input(id: &str, name: &str, label: &str, value: &str, required: bool) -> Markup {
    html! {
        label for=(id) { (label) }
        br;
        input type="date" id=(id) name=(name) value=(value) required[required];
        br;
    }
}
